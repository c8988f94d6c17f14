use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use validator::Validate;

use crate::common::{date_part, is_blank, parse_date, string_or_empty, PatientSummary};
use crate::crud::{LinksTo, Resource};
use crate::error::AppError;
use crate::listing::{compare_text, Searchable, Sortable};
use crate::patient::{find_patient, Patient};

/// One line of a prescription.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    #[serde(rename = "nom", default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub dosage: String,
    #[serde(rename = "frequence", default, deserialize_with = "string_or_empty")]
    pub frequency: String,
    #[serde(rename = "duree", default, deserialize_with = "string_or_empty")]
    pub duration: String,
}

/// The medication list is stored as a JSON column and may come back either
/// decoded or as its JSON text.
fn medication_list<'de, D>(deserializer: D) -> Result<Vec<Medication>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<Medication>),
        Encoded(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::List(items)) => Ok(items),
        Some(Raw::Encoded(text)) if is_blank(&text) => Ok(Vec::new()),
        Some(Raw::Encoded(text)) => serde_json::from_str(&text).map_err(serde::de::Error::custom),
        None => Ok(Vec::new()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    pub id: i64,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub patient: Option<PatientSummary>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub date: String,
    #[serde(rename = "prescriptions", default, deserialize_with = "medication_list")]
    pub medications: Vec<Medication>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub notes: String,
}

impl Prescription {
    pub fn patient_name(&self) -> String {
        self.patient
            .as_ref()
            .map(PatientSummary::full_name)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Validate)]
pub struct PrescriptionForm {
    #[validate(required(message = "Patient is required"))]
    pub patient_id: Option<i64>,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[serde(rename = "prescriptions")]
    pub medications: Vec<Medication>,
    pub notes: String,
}

impl PrescriptionForm {
    pub fn add_medication(&mut self, medication: Medication) {
        self.medications.push(medication);
    }

    /// Removes the row at `index`; out of range is ignored.
    pub fn remove_medication(&mut self, index: usize) {
        if index < self.medications.len() {
            self.medications.remove(index);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrescriptionColumn {
    Patient,
    Date,
}

impl Searchable for Prescription {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![date_part(&self.date)];
        if let Some(p) = &self.patient {
            fields.push(p.last_name.as_str());
            fields.push(p.first_name.as_str());
        }
        fields.extend(self.medications.iter().map(|m| m.name.as_str()));
        fields
    }
}

impl Sortable for Prescription {
    type Column = PrescriptionColumn;

    fn compare_by(&self, other: &Self, column: PrescriptionColumn) -> Ordering {
        match column {
            PrescriptionColumn::Patient => compare_text(&self.patient_name(), &other.patient_name()),
            PrescriptionColumn::Date => parse_date(&self.date).cmp(&parse_date(&other.date)),
        }
    }
}

impl LinksTo<Patient> for Prescription {
    fn link(&mut self, patients: &[Patient]) {
        if self.patient.is_none() {
            if let Some(p) = self.patient_id.and_then(|id| find_patient(patients, id)) {
                self.patient = Some(p.summary());
            }
        }
    }
}

impl Resource for Prescription {
    type Form = PrescriptionForm;
    const PATH: &'static str = "ordonnances";
    const NOUN: &'static str = "Prescription";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> PrescriptionForm {
        PrescriptionForm {
            patient_id: self.patient_id,
            date: date_part(&self.date).to_string(),
            medications: self.medications.clone(),
            notes: self.notes.clone(),
        }
    }

    fn validate(form: &PrescriptionForm, _: &[Self], _: Option<i64>) -> Result<(), AppError> {
        form.validate()?;
        if parse_date(&form.date).is_none() {
            return Err(AppError::invalid_field("date", "Date is not a valid date"));
        }
        if form.medications.is_empty() {
            return Err(AppError::invalid_field(
                "prescriptions",
                "Add at least one medication",
            ));
        }
        if let Some(n) = form
            .medications
            .iter()
            .position(|m| is_blank(&m.name) || is_blank(&m.dosage))
        {
            return Err(AppError::invalid_field(
                "prescriptions",
                format!("Medication {} needs a name and a dosage", n + 1),
            ));
        }
        Ok(())
    }
}
