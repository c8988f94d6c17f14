use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use validator::Validate;

use crate::common::{date_part, flexible_bool, is_blank, parse_date, string_or_empty, PatientSummary};
use crate::crud::Resource;
use crate::error::AppError;
use crate::listing::{compare_text, Searchable, Sortable};
use crate::user::is_valid_email;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: i64,
    #[serde(rename = "nom", default, deserialize_with = "string_or_empty")]
    pub last_name: String,
    #[serde(rename = "prenom", default, deserialize_with = "string_or_empty")]
    pub first_name: String,
    #[serde(rename = "date_naissance", default)]
    pub birth_date: Option<String>,
    #[serde(rename = "telephone", default, deserialize_with = "string_or_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(rename = "adresse", default, deserialize_with = "string_or_empty")]
    pub address: String,
    #[serde(rename = "antecedents_medicaux", default, deserialize_with = "string_or_empty")]
    pub medical_history: String,
    #[serde(rename = "hospitalise", default, deserialize_with = "flexible_bool")]
    pub hospitalized: bool,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn summary(&self) -> PatientSummary {
        PatientSummary {
            id: Some(self.id),
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            age: None,
        }
    }
}

/// Find a patient by id in a lookup list.
pub fn find_patient(patients: &[Patient], id: i64) -> Option<&Patient> {
    patients.iter().find(|p| p.id == id)
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Validate)]
pub struct PatientForm {
    #[serde(rename = "nom")]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[serde(rename = "prenom")]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(rename = "date_naissance", skip_serializing_if = "String::is_empty")]
    pub birth_date: String,
    #[serde(rename = "telephone")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "adresse")]
    pub address: String,
    #[serde(rename = "antecedents_medicaux")]
    pub medical_history: String,
    #[serde(rename = "hospitalise")]
    pub hospitalized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatientColumn {
    Name,
    BirthDate,
    Hospitalized,
}

impl Searchable for Patient {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.last_name.as_str(),
            self.first_name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        ]
    }
}

impl Sortable for Patient {
    type Column = PatientColumn;

    fn compare_by(&self, other: &Self, column: PatientColumn) -> Ordering {
        match column {
            PatientColumn::Name => compare_text(&self.last_name, &other.last_name)
                .then_with(|| compare_text(&self.first_name, &other.first_name)),
            PatientColumn::BirthDate => {
                let a = self.birth_date.as_deref().and_then(parse_date);
                let b = other.birth_date.as_deref().and_then(parse_date);
                a.cmp(&b)
            }
            PatientColumn::Hospitalized => self.hospitalized.cmp(&other.hospitalized),
        }
    }
}

impl Resource for Patient {
    type Form = PatientForm;
    const PATH: &'static str = "patients";
    const NOUN: &'static str = "Patient";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> PatientForm {
        PatientForm {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            birth_date: self
                .birth_date
                .as_deref()
                .map(|d| date_part(d).to_string())
                .unwrap_or_default(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            medical_history: self.medical_history.clone(),
            hospitalized: self.hospitalized,
        }
    }

    fn validate(form: &PatientForm, _: &[Self], _: Option<i64>) -> Result<(), AppError> {
        form.validate()?;
        if !is_blank(&form.email) && !is_valid_email(form.email.trim()) {
            return Err(AppError::invalid_field("email", "Valid email is required"));
        }
        if !is_blank(&form.birth_date) && parse_date(&form.birth_date).is_none() {
            return Err(AppError::invalid_field("date_naissance", "Birth date is not a valid date"));
        }
        Ok(())
    }
}
