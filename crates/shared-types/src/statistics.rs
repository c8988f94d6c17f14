use serde::{Deserialize, Serialize};

/// Dashboard counters from `GET /statistiques`. Missing counters are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_patients: u64,
    pub total_rendezvous: u64,
    pub total_conges: u64,
    pub total_equipments: u64,
    pub total_medecins: u64,
    pub total_infirmiers: u64,
    pub total_techniciens: u64,
    pub total_secretaires: u64,
}

/// One labelled counter of the statistics dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: u64,
    /// Share of the largest counter, 0 to 100.
    pub percent: u8,
}

impl Statistics {
    pub fn cards(&self) -> Vec<StatCard> {
        let values = [
            ("Patients", self.total_patients),
            ("Appointments", self.total_rendezvous),
            ("Leave requests", self.total_conges),
            ("Equipment", self.total_equipments),
            ("Physicians", self.total_medecins),
            ("Nurses", self.total_infirmiers),
            ("Technicians", self.total_techniciens),
            ("Secretaries", self.total_secretaires),
        ];
        let max = values.iter().map(|(_, v)| *v).max().unwrap_or(0);
        values
            .into_iter()
            .map(|(label, value)| StatCard {
                label,
                value,
                percent: if max == 0 {
                    0
                } else {
                    (u128::from(value) * 100 / u128::from(max)) as u8
                },
            })
            .collect()
    }

    pub fn total_staff(&self) -> u64 {
        [
            self.total_medecins,
            self.total_infirmiers,
            self.total_techniciens,
            self.total_secretaires,
        ]
        .into_iter()
        .fold(0u64, u64::saturating_add)
    }
}
