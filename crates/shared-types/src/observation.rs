use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use validator::Validate;

use crate::appointment::parse_date_time;
use crate::common::{date_part, parse_date, string_or_empty, PatientSummary};
use crate::crud::{LinksTo, Resource};
use crate::error::AppError;
use crate::listing::{compare_text, Searchable, Sortable};
use crate::patient::{find_patient, Patient};

/// A nurse's note about a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub id: i64,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub patient: Option<PatientSummary>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Observation {
    pub fn patient_name(&self) -> String {
        self.patient
            .as_ref()
            .map(PatientSummary::full_name)
            .unwrap_or_default()
    }

    /// `dd/mm/yyyy` of the creation date, empty when unknown.
    pub fn display_date(&self) -> String {
        let Some(raw) = self.created_at.as_deref() else {
            return String::new();
        };
        parse_date(raw)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| date_part(raw).to_string())
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Validate)]
pub struct ObservationForm {
    #[validate(required(message = "Patient is required"))]
    pub patient_id: Option<i64>,
    #[validate(length(min = 1, message = "Observation text is required"))]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObservationColumn {
    Patient,
    Created,
}

impl Searchable for Observation {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.text.as_str()];
        if let Some(p) = &self.patient {
            fields.push(p.last_name.as_str());
            fields.push(p.first_name.as_str());
        }
        fields
    }
}

impl Sortable for Observation {
    type Column = ObservationColumn;

    fn compare_by(&self, other: &Self, column: ObservationColumn) -> Ordering {
        match column {
            ObservationColumn::Patient => compare_text(&self.patient_name(), &other.patient_name()),
            ObservationColumn::Created => {
                let a = self.created_at.as_deref().and_then(parse_date_time);
                let b = other.created_at.as_deref().and_then(parse_date_time);
                a.cmp(&b)
            }
        }
    }
}

impl LinksTo<Patient> for Observation {
    fn link(&mut self, patients: &[Patient]) {
        if self.patient.is_none() {
            if let Some(p) = self.patient_id.and_then(|id| find_patient(patients, id)) {
                self.patient = Some(p.summary());
            }
        }
    }
}

impl Resource for Observation {
    type Form = ObservationForm;
    const PATH: &'static str = "observations";
    const NOUN: &'static str = "Observation";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> ObservationForm {
        ObservationForm {
            patient_id: self.patient_id,
            text: self.text.clone(),
        }
    }

    fn validate(form: &ObservationForm, _: &[Self], _: Option<i64>) -> Result<(), AppError> {
        form.validate()?;
        if form.text.trim().is_empty() {
            return Err(AppError::invalid_field("text", "Observation text is required"));
        }
        Ok(())
    }
}
