use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use validator::Validate;

use crate::common::{date_part, null_as_default, parse_date, string_or_empty};
use crate::crud::Resource;
use crate::error::AppError;
use crate::listing::{compare_text, Searchable, Sortable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentStatus {
    #[default]
    #[serde(rename = "actif")]
    Active,
    #[serde(rename = "inactif")]
    Inactive,
    #[serde(rename = "en maintenance")]
    InMaintenance,
}

pub const EQUIPMENT_STATUSES: [EquipmentStatus; 3] = [
    EquipmentStatus::Active,
    EquipmentStatus::Inactive,
    EquipmentStatus::InMaintenance,
];

impl EquipmentStatus {
    pub fn as_wire(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "actif",
            EquipmentStatus::Inactive => "inactif",
            EquipmentStatus::InMaintenance => "en maintenance",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        EQUIPMENT_STATUSES.into_iter().find(|s| s.as_wire() == value)
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EquipmentStatus::Active => "Active",
            EquipmentStatus::Inactive => "Inactive",
            EquipmentStatus::InMaintenance => "In maintenance",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    pub id: i64,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "string_or_empty")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: EquipmentStatus,
    #[serde(default)]
    pub last_maintenance: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub serial_number: String,
}

impl Equipment {
    /// `Scanner (SN-42)`, or just the name without a serial number.
    pub fn label(&self) -> String {
        if self.serial_number.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.serial_number)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Validate)]
pub struct EquipmentForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub kind: String,
    pub status: EquipmentStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_maintenance: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EquipmentColumn {
    Name,
    Type,
    LastMaintenance,
}

impl Searchable for Equipment {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.kind.as_str()]
    }
}

impl Sortable for Equipment {
    type Column = EquipmentColumn;

    fn compare_by(&self, other: &Self, column: EquipmentColumn) -> Ordering {
        match column {
            EquipmentColumn::Name => compare_text(&self.name, &other.name),
            EquipmentColumn::Type => compare_text(&self.kind, &other.kind),
            EquipmentColumn::LastMaintenance => {
                let a = self.last_maintenance.as_deref().and_then(parse_date);
                let b = other.last_maintenance.as_deref().and_then(parse_date);
                a.cmp(&b)
            }
        }
    }
}

impl Resource for Equipment {
    type Form = EquipmentForm;
    const PATH: &'static str = "equipments";
    const NOUN: &'static str = "Equipment";
    const DELETE_GATED: bool = true;

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> EquipmentForm {
        EquipmentForm {
            name: self.name.clone(),
            kind: self.kind.clone(),
            status: self.status,
            last_maintenance: self
                .last_maintenance
                .as_deref()
                .map(|d| date_part(d).to_string())
                .unwrap_or_default(),
        }
    }

    fn validate(form: &EquipmentForm, _: &[Self], _: Option<i64>) -> Result<(), AppError> {
        form.validate()?;
        if !form.last_maintenance.is_empty() && parse_date(&form.last_maintenance).is_none() {
            return Err(AppError::invalid_field(
                "last_maintenance",
                "Last maintenance is not a valid date",
            ));
        }
        Ok(())
    }
}
