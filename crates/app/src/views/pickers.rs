//! Selects backed by lookup collections fetched alongside a list.

use dioxus::prelude::*;
use shared_types::{Employee, Equipment, Patient};
use shared_ui::components::FormSelect;

/// Id of the selected option; the empty placeholder maps to `None`.
pub fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

fn id_value(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

#[component]
pub fn PatientSelect(
    patients: Signal<Vec<Patient>>,
    value: Option<i64>,
    on_change: EventHandler<Option<i64>>,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        FormSelect {
            label: "Patient",
            required: true,
            placeholder: "Select a patient",
            disabled,
            value: id_value(value),
            onchange: move |e: Event<FormData>| on_change.call(parse_id(&e.value())),
            for patient in patients.read().iter() {
                option { key: "{patient.id}", value: "{patient.id}", {patient.full_name()} }
            }
        }
    }
}

#[component]
pub fn EquipmentSelect(
    equipment: Signal<Vec<Equipment>>,
    value: Option<i64>,
    on_change: EventHandler<Option<i64>>,
) -> Element {
    rsx! {
        FormSelect {
            label: "Equipment",
            required: true,
            placeholder: "Select equipment",
            value: id_value(value),
            onchange: move |e: Event<FormData>| on_change.call(parse_id(&e.value())),
            for item in equipment.read().iter() {
                option { key: "{item.id}", value: "{item.id}", {item.label()} }
            }
        }
    }
}

#[component]
pub fn EmployeeSelect(
    employees: Signal<Vec<Employee>>,
    value: Option<i64>,
    on_change: EventHandler<Option<i64>>,
) -> Element {
    rsx! {
        FormSelect {
            label: "Employee",
            required: true,
            placeholder: "Select an employee",
            value: id_value(value),
            onchange: move |e: Event<FormData>| on_change.call(parse_id(&e.value())),
            for employee in employees.read().iter() {
                option { key: "{employee.id}", value: "{employee.id}", "{employee.name}" }
            }
        }
    }
}
