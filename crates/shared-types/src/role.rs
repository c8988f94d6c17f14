use serde::{Deserialize, Serialize};

/// Staff roles known to the hospital backend.
///
/// Serialized with the backend's role strings. English names are accepted
/// on the way in so that fixtures and config can use either.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "administratif", alias = "admin")]
    Admin,
    #[serde(rename = "medcin", alias = "physician", alias = "medecin")]
    Physician,
    #[serde(rename = "secretaire", alias = "secretary")]
    Secretary,
    #[serde(rename = "technicien", alias = "technician")]
    Technician,
    #[serde(rename = "infirmier", alias = "nurse")]
    Nurse,
}

/// All roles in the order the staff directory lists them.
pub const ALL_ROLES: &[Role] = &[
    Role::Admin,
    Role::Physician,
    Role::Secretary,
    Role::Technician,
    Role::Nurse,
];

impl Role {
    /// Parse a role string as sent by the backend. Case and surrounding
    /// whitespace are ignored; unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "administratif" | "admin" => Some(Role::Admin),
            "medcin" | "medecin" | "médecin" | "physician" => Some(Role::Physician),
            "secretaire" | "secrétaire" | "secretary" => Some(Role::Secretary),
            "technicien" | "technician" => Some(Role::Technician),
            "infirmier" | "nurse" => Some(Role::Nurse),
            _ => None,
        }
    }

    /// The string the backend stores for this role.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Admin => "administratif",
            Role::Physician => "medcin",
            Role::Secretary => "secretaire",
            Role::Technician => "technicien",
            Role::Nurse => "infirmier",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Physician => "Physician",
            Role::Secretary => "Secretary",
            Role::Technician => "Technician",
            Role::Nurse => "Nurse",
        }
    }

    /// Specialties a staff member with this role may declare.
    pub fn specialties(&self) -> &'static [&'static str] {
        match self {
            Role::Physician => &[
                "Cardiologie",
                "Dermatologie",
                "Pédiatrie",
                "Neurologie",
                "Chirurgie",
            ],
            Role::Nurse => &[
                "Soins intensifs",
                "Pédiatrie",
                "Bloc opératoire",
                "Urgences",
                "Gériatrie",
            ],
            Role::Technician => &[
                "Radiologie",
                "Laboratoire",
                "Maintenance",
                "Biomédical",
                "Informatique",
            ],
            Role::Admin | Role::Secretary => &[],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
