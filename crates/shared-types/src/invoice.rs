use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use validator::Validate;

use crate::common::{amount_text, date_part, null_as_default, parse_date, string_or_empty, PatientSummary};
use crate::crud::{LinksTo, Resource};
use crate::error::AppError;
use crate::listing::{compare_text, Searchable, Sortable};
use crate::patient::{find_patient, Patient};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[serde(rename = "payé")]
    Paid,
    #[default]
    #[serde(rename = "en_attente")]
    Pending,
    #[serde(rename = "annulé")]
    Cancelled,
}

pub const INVOICE_STATUSES: [InvoiceStatus; 3] = [
    InvoiceStatus::Paid,
    InvoiceStatus::Pending,
    InvoiceStatus::Cancelled,
];

impl InvoiceStatus {
    pub fn as_wire(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "payé",
            InvoiceStatus::Pending => "en_attente",
            InvoiceStatus::Cancelled => "annulé",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        INVOICE_STATUSES.into_iter().find(|s| s.as_wire() == value)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: i64,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub patient: Option<PatientSummary>,
    #[serde(rename = "date_facture", default, deserialize_with = "string_or_empty")]
    pub date: String,
    /// Kept as text; see [`Invoice::amount_value`].
    #[serde(rename = "montant", default, deserialize_with = "amount_text")]
    pub amount: String,
    #[serde(rename = "statut", default, deserialize_with = "null_as_default")]
    pub status: InvoiceStatus,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub details: String,
}

impl Invoice {
    pub fn amount_value(&self) -> f64 {
        self.amount.parse().unwrap_or(0.0)
    }

    /// Two decimals, e.g. `120.50`.
    pub fn display_amount(&self) -> String {
        format!("{:.2}", self.amount_value())
    }

    pub fn patient_name(&self) -> String {
        self.patient
            .as_ref()
            .map(PatientSummary::full_name)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Validate)]
pub struct InvoiceForm {
    #[validate(required(message = "Patient is required"))]
    pub patient_id: Option<i64>,
    #[serde(rename = "date_facture")]
    #[validate(length(min = 1, message = "Invoice date is required"))]
    pub date: String,
    #[serde(rename = "montant")]
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount: String,
    #[serde(rename = "statut")]
    pub status: InvoiceStatus,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvoiceColumn {
    Patient,
    Date,
    Amount,
}

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.amount.as_str(), date_part(&self.date)];
        if let Some(p) = &self.patient {
            fields.push(p.last_name.as_str());
            fields.push(p.first_name.as_str());
        }
        fields
    }
}

impl Sortable for Invoice {
    type Column = InvoiceColumn;

    fn compare_by(&self, other: &Self, column: InvoiceColumn) -> Ordering {
        match column {
            InvoiceColumn::Patient => compare_text(&self.patient_name(), &other.patient_name()),
            InvoiceColumn::Date => parse_date(&self.date).cmp(&parse_date(&other.date)),
            InvoiceColumn::Amount => self.amount_value().total_cmp(&other.amount_value()),
        }
    }
}

impl LinksTo<Patient> for Invoice {
    fn link(&mut self, patients: &[Patient]) {
        if self.patient.is_none() {
            if let Some(p) = self.patient_id.and_then(|id| find_patient(patients, id)) {
                self.patient = Some(p.summary());
            }
        }
    }
}

impl Resource for Invoice {
    type Form = InvoiceForm;
    const PATH: &'static str = "factures";
    const NOUN: &'static str = "Invoice";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> InvoiceForm {
        InvoiceForm {
            patient_id: self.patient_id,
            date: date_part(&self.date).to_string(),
            amount: self.amount.clone(),
            status: self.status,
            details: self.details.clone(),
        }
    }

    fn validate(form: &InvoiceForm, _: &[Self], _: Option<i64>) -> Result<(), AppError> {
        form.validate()?;
        if parse_date(&form.date).is_none() {
            return Err(AppError::invalid_field("date_facture", "Invoice date is not a valid date"));
        }
        match form.amount.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(()),
            _ => Err(AppError::invalid_field(
                "montant",
                "Amount must be a number of zero or more",
            )),
        }
    }
}
