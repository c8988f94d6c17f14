use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use validator::Validate;

use crate::common::{date_part, null_as_default, parse_date, string_or_empty};
use crate::crud::{LinksTo, Resource, Transition, Transitional};
use crate::error::AppError;
use crate::listing::{compare_text, Searchable, Sortable};
use crate::user::Employee;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveType {
    #[default]
    #[serde(rename = "annuel")]
    Annual,
    #[serde(rename = "maladie")]
    Sick,
    #[serde(rename = "maternité")]
    Maternity,
    #[serde(rename = "exceptionnel")]
    Exceptional,
}

pub const LEAVE_TYPES: [LeaveType; 4] = [
    LeaveType::Annual,
    LeaveType::Sick,
    LeaveType::Maternity,
    LeaveType::Exceptional,
];

impl LeaveType {
    pub fn as_wire(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annuel",
            LeaveType::Sick => "maladie",
            LeaveType::Maternity => "maternité",
            LeaveType::Exceptional => "exceptionnel",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        LEAVE_TYPES.into_iter().find(|t| t.as_wire() == value)
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeaveType::Annual => "Annual",
            LeaveType::Sick => "Sick",
            LeaveType::Maternity => "Maternity",
            LeaveType::Exceptional => "Exceptional",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveStatus {
    #[default]
    #[serde(rename = "en attente")]
    Pending,
    #[serde(rename = "accepté")]
    Approved,
    #[serde(rename = "refusé")]
    Rejected,
}

pub const LEAVE_STATUSES: [LeaveStatus; 3] = [
    LeaveStatus::Pending,
    LeaveStatus::Approved,
    LeaveStatus::Rejected,
];

impl LeaveStatus {
    pub fn as_wire(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "en attente",
            LeaveStatus::Approved => "accepté",
            LeaveStatus::Rejected => "refusé",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        LEAVE_STATUSES.into_iter().find(|s| s.as_wire() == value)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaveUser {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaveRequest {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user: Option<LeaveUser>,
    #[serde(rename = "date_debut", default, deserialize_with = "string_or_empty")]
    pub start_date: String,
    #[serde(rename = "date_fin", default, deserialize_with = "string_or_empty")]
    pub end_date: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: LeaveType,
    #[serde(rename = "motif", default, deserialize_with = "string_or_empty")]
    pub reason: String,
    #[serde(rename = "statut", default, deserialize_with = "null_as_default")]
    pub status: LeaveStatus,
}

impl LeaveRequest {
    pub fn employee_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("")
    }

    /// Inclusive day count; `None` when a date is missing or the range is
    /// reversed.
    pub fn days(&self) -> Option<i64> {
        leave_days(&self.start_date, &self.end_date)
    }

    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }
}

/// Days from `start` to `end`, both included.
pub fn leave_days(start: &str, end: &str) -> Option<i64> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let days = (end - start).num_days() + 1;
    (days > 0).then_some(days)
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Validate)]
pub struct LeaveForm {
    #[validate(required(message = "Employee is required"))]
    pub user_id: Option<i64>,
    #[serde(rename = "date_debut")]
    #[validate(length(min = 1, message = "Start date is required"))]
    pub start_date: String,
    #[serde(rename = "date_fin")]
    #[validate(length(min = 1, message = "End date is required"))]
    pub end_date: String,
    #[serde(rename = "type")]
    pub kind: LeaveType,
    #[serde(rename = "motif")]
    pub reason: String,
    #[serde(rename = "statut")]
    pub status: LeaveStatus,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeaveColumn {
    Employee,
    Start,
    Status,
}

impl Searchable for LeaveRequest {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.employee_name(),
            self.kind.as_wire(),
            self.status.as_wire(),
        ]
    }
}

impl Sortable for LeaveRequest {
    type Column = LeaveColumn;

    fn compare_by(&self, other: &Self, column: LeaveColumn) -> Ordering {
        match column {
            LeaveColumn::Employee => compare_text(self.employee_name(), other.employee_name()),
            LeaveColumn::Start => parse_date(&self.start_date).cmp(&parse_date(&other.start_date)),
            LeaveColumn::Status => compare_text(self.status.as_wire(), other.status.as_wire()),
        }
    }
}

impl LinksTo<Employee> for LeaveRequest {
    fn link(&mut self, employees: &[Employee]) {
        if self.user.is_some() {
            return;
        }
        let Some(id) = self.user_id else { return };
        if let Some(e) = employees.iter().find(|e| e.id == id) {
            self.user = Some(LeaveUser {
                name: e.name.clone(),
            });
        }
    }
}

impl Resource for LeaveRequest {
    type Form = LeaveForm;
    const PATH: &'static str = "conges";
    const NOUN: &'static str = "Leave request";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> LeaveForm {
        LeaveForm {
            user_id: self.user_id,
            start_date: date_part(&self.start_date).to_string(),
            end_date: date_part(&self.end_date).to_string(),
            kind: self.kind,
            reason: self.reason.clone(),
            status: self.status,
        }
    }

    fn validate(form: &LeaveForm, _: &[Self], _: Option<i64>) -> Result<(), AppError> {
        form.validate()?;
        let (Some(start), Some(end)) = (parse_date(&form.start_date), parse_date(&form.end_date))
        else {
            return Err(AppError::invalid_field("date_debut", "Dates are not valid"));
        };
        if end < start {
            return Err(AppError::invalid_field(
                "date_fin",
                "End date must be on or after the start date",
            ));
        }
        Ok(())
    }
}

impl Transitional for LeaveRequest {
    fn can_transition(&self, transition: Transition) -> bool {
        self.is_pending() && matches!(transition, Transition::Approve | Transition::Reject)
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Approve => self.status = LeaveStatus::Approved,
            Transition::Reject => self.status = LeaveStatus::Rejected,
            Transition::Complete => {}
        }
    }
}
