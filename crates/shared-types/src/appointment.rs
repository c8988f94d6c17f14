use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use validator::Validate;

use crate::common::{is_blank, string_or_empty, PatientSummary};
use crate::crud::{LinksTo, Resource};
use crate::error::AppError;
use crate::listing::{compare_text, Searchable, Sortable};
use crate::patient::{find_patient, Patient};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse the date-time shapes the backend and `datetime-local` inputs use.
/// Fractional seconds and a trailing `Z` are ignored.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim().trim_end_matches('Z');
    let value = value.split('.').next().unwrap_or(value);
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub patient: Option<PatientSummary>,
    #[serde(rename = "date_heure", default, deserialize_with = "string_or_empty")]
    pub scheduled_at: String,
    #[serde(rename = "motif", default, deserialize_with = "string_or_empty")]
    pub reason: String,
    #[serde(rename = "statut", default)]
    pub status: Option<String>,
}

impl Appointment {
    pub fn patient_name(&self) -> String {
        self.patient
            .as_ref()
            .map(PatientSummary::full_name)
            .unwrap_or_default()
    }

    /// `dd/mm/yyyy hh:mm`, or the raw value when it does not parse.
    pub fn display_time(&self) -> String {
        parse_date_time(&self.scheduled_at)
            .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_else(|| self.scheduled_at.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Validate)]
pub struct AppointmentForm {
    #[validate(required(message = "Patient is required"))]
    pub patient_id: Option<i64>,
    #[serde(rename = "date_heure")]
    #[validate(length(min = 1, message = "Date and time are required"))]
    pub scheduled_at: String,
    #[serde(rename = "motif")]
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppointmentColumn {
    Time,
    Patient,
}

impl Searchable for Appointment {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.reason.as_str()];
        if let Some(p) = &self.patient {
            fields.push(p.last_name.as_str());
            fields.push(p.first_name.as_str());
        }
        fields
    }
}

impl Sortable for Appointment {
    type Column = AppointmentColumn;

    fn compare_by(&self, other: &Self, column: AppointmentColumn) -> Ordering {
        match column {
            AppointmentColumn::Time => {
                parse_date_time(&self.scheduled_at).cmp(&parse_date_time(&other.scheduled_at))
            }
            AppointmentColumn::Patient => compare_text(&self.patient_name(), &other.patient_name()),
        }
    }
}

impl LinksTo<Patient> for Appointment {
    fn link(&mut self, patients: &[Patient]) {
        if self.patient.is_none() {
            if let Some(p) = self.patient_id.and_then(|id| find_patient(patients, id)) {
                self.patient = Some(p.summary());
            }
        }
    }
}

impl Resource for Appointment {
    type Form = AppointmentForm;
    const PATH: &'static str = "rendezvous";
    const NOUN: &'static str = "Appointment";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> AppointmentForm {
        AppointmentForm {
            patient_id: self.patient_id,
            scheduled_at: parse_date_time(&self.scheduled_at)
                .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
                .unwrap_or_default(),
            reason: self.reason.clone(),
        }
    }

    fn validate(form: &AppointmentForm, _: &[Self], _: Option<i64>) -> Result<(), AppError> {
        form.validate()?;
        if !is_blank(&form.scheduled_at) && parse_date_time(&form.scheduled_at).is_none() {
            return Err(AppError::invalid_field("date_heure", "Date and time are not valid"));
        }
        Ok(())
    }
}
