use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use validator::Validate;

use crate::common::{null_as_default, string_or_empty};
use crate::crud::{LinksTo, Resource, Transition, Transitional};
use crate::equipment::Equipment;
use crate::error::AppError;
use crate::listing::{compare_text, Searchable, Sortable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    Completed,
}

pub const MAINTENANCE_STATUSES: [MaintenanceStatus; 2] =
    [MaintenanceStatus::Pending, MaintenanceStatus::Completed];

impl MaintenanceStatus {
    pub fn as_wire(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::Completed => "completed",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        MAINTENANCE_STATUSES.into_iter().find(|s| s.as_wire() == value)
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MaintenanceStatus::Pending => "Pending",
            MaintenanceStatus::Completed => "Completed",
        })
    }
}

/// Status filter of the maintenance view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(MaintenanceStatus),
}

impl StatusFilter {
    pub fn keeps(&self, ticket: &MaintenanceTicket) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => ticket.status == *status,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_wire(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => StatusFilter::Only(MaintenanceStatus::Pending),
            "completed" => StatusFilter::Only(MaintenanceStatus::Completed),
            _ => StatusFilter::All,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRef {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub serial_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceTicket {
    pub id: i64,
    #[serde(default)]
    pub equipment_id: Option<i64>,
    #[serde(default)]
    pub equipment: Option<EquipmentRef>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: MaintenanceStatus,
}

impl MaintenanceTicket {
    pub fn equipment_name(&self) -> &str {
        self.equipment.as_ref().map(|e| e.name.as_str()).unwrap_or("")
    }

    pub fn serial_number(&self) -> &str {
        self.equipment
            .as_ref()
            .map(|e| e.serial_number.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Validate)]
pub struct MaintenanceForm {
    #[validate(required(message = "Equipment is required"))]
    pub equipment_id: Option<i64>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaintenanceColumn {
    Equipment,
    Status,
}

impl Searchable for MaintenanceTicket {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.equipment_name(),
            self.description.as_str(),
            self.serial_number(),
        ]
    }
}

impl Sortable for MaintenanceTicket {
    type Column = MaintenanceColumn;

    fn compare_by(&self, other: &Self, column: MaintenanceColumn) -> Ordering {
        match column {
            MaintenanceColumn::Equipment => compare_text(self.equipment_name(), other.equipment_name()),
            MaintenanceColumn::Status => self.status.as_wire().cmp(other.status.as_wire()),
        }
    }
}

impl LinksTo<Equipment> for MaintenanceTicket {
    fn link(&mut self, equipment: &[Equipment]) {
        if self.equipment.is_some() {
            return;
        }
        let Some(id) = self.equipment_id else { return };
        if let Some(e) = equipment.iter().find(|e| e.id == id) {
            self.equipment = Some(EquipmentRef {
                name: e.name.clone(),
                serial_number: e.serial_number.clone(),
            });
        }
    }
}

impl Resource for MaintenanceTicket {
    type Form = MaintenanceForm;
    const PATH: &'static str = "maintenance-requests";
    const NOUN: &'static str = "Maintenance request";
    const DELETE_GATED: bool = true;

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> MaintenanceForm {
        MaintenanceForm {
            equipment_id: self.equipment_id,
            description: self.description.clone(),
            status: self.status,
        }
    }

    fn validate(form: &MaintenanceForm, _: &[Self], _: Option<i64>) -> Result<(), AppError> {
        form.validate()?;
        if form.description.trim().is_empty() {
            return Err(AppError::invalid_field("description", "Description is required"));
        }
        Ok(())
    }
}

impl Transitional for MaintenanceTicket {
    fn can_transition(&self, transition: Transition) -> bool {
        transition == Transition::Complete && self.status == MaintenanceStatus::Pending
    }

    fn apply_transition(&mut self, transition: Transition) {
        if transition == Transition::Complete {
            self.status = MaintenanceStatus::Completed;
        }
    }
}
