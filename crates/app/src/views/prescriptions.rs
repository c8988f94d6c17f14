use client::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdPencil, LdPlus, LdTrash2, LdX};
use dioxus_free_icons::Icon;
use shared_types::{Medication, Patient, Prescription, PrescriptionColumn, PrescriptionForm};
use shared_ui::components::{
    Button, ButtonVariant, DataTable, DataTableActions, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, Input, PageActions,
    PageHeader, PageTitle, Pagination, SearchBar, Sheet, SheetClose, SheetContent,
    SheetDescription, SheetFooter, SheetHeader, SheetTitle, SkeletonRows, Textarea,
};

use super::crud::{column_sort, delete_dialog, notice_banner, sheet_title, use_crud, CrudHandle};
use super::pickers::PatientSelect;
use crate::format_helpers::{format_date, or_dash, today};

/// `Paracetamol 500mg, Ibuprofen` style summary of the medication lines.
fn medication_summary(medications: &[Medication]) -> String {
    medications
        .iter()
        .filter(|m| !m.name.trim().is_empty())
        .map(|m| {
            let dosage = m.dosage.trim();
            if dosage.is_empty() {
                m.name.trim().to_string()
            } else {
                format!("{} {dosage}", m.name.trim())
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Physician view: prescriptions with their medication lines.
#[component]
pub fn PrescriptionsView() -> Element {
    let patients = use_signal(Vec::<Patient>::new);
    let crud = use_crud(move |api: ApiClient| async move {
        let mut patients = patients;
        let (prescriptions, lookup) = api.list_linked::<Prescription, Patient>().await?;
        patients.set(lookup);
        Ok(prescriptions)
    });
    let snap = crud.page();
    let empty = snap.empty_message("prescriptions");
    let form_open = crud.form().is_some();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Medication issued to your patients".to_string(), "Prescriptions" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| {
                            crud.open_create_with(PrescriptionForm {
                                date: today(),
                                medications: vec![Medication::default()],
                                ..Default::default()
                            })
                        },
                        Icon::<LdPlus> { icon: LdPlus, width: 16, height: 16 }
                        "New prescription"
                    }
                }
            }

            if !form_open {
                {notice_banner(crud)}
            }

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by patient, medication or date...",
                span { class: "search-count", "{snap.filtered} of {snap.total}" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    DataTableHeader {
                        DataTableColumn {
                            sort: column_sort(&snap.query, PrescriptionColumn::Patient),
                            on_sort: move |_| crud.toggle_sort(PrescriptionColumn::Patient),
                            "Patient"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, PrescriptionColumn::Date),
                            on_sort: move |_| crud.toggle_sort(PrescriptionColumn::Date),
                            "Date"
                        }
                        DataTableColumn { "Medication" }
                        DataTableColumn { "Notes" }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 5, "{message}" }
                        }
                        for prescription in snap.rows.iter().cloned() {
                            PrescriptionRow { key: "{prescription.id}", crud, prescription }
                        }
                    }
                }
                Pagination {
                    page: snap.page,
                    page_count: snap.page_count,
                    total: snap.filtered,
                    on_change: move |page: usize| crud.set_page(page),
                }
            }

            PrescriptionSheet { crud, patients }
            {delete_dialog(crud, "The prescription and its medication lines will be removed.".to_string())}
        }
    }
}

#[component]
fn PrescriptionRow(crud: CrudHandle<Prescription>, prescription: Prescription) -> Element {
    let id = prescription.id;
    let patient = or_dash(&prescription.patient_name());
    let date = format_date(&prescription.date);
    let medication = or_dash(&medication_summary(&prescription.medications));
    let notes = or_dash(&prescription.notes);

    rsx! {
        DataTableRow {
            DataTableCell { span { class: "cell-strong", "{patient}" } }
            DataTableCell { "{date}" }
            DataTableCell { "{medication}" }
            DataTableCell { span { class: "cell-muted", "{notes}" } }
            DataTableActions {
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Edit",
                    onclick: move |_| crud.open_edit(id),
                    Icon::<LdPencil> { icon: LdPencil, width: 16, height: 16 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Delete",
                    onclick: move |_| crud.open_delete(id),
                    Icon::<LdTrash2> { icon: LdTrash2, width: 16, height: 16 }
                }
            }
        }
    }
}

#[component]
fn PrescriptionSheet(crud: CrudHandle<Prescription>, patients: Signal<Vec<Patient>>) -> Element {
    let Some(form) = crud.form() else {
        return rsx! {};
    };
    let title = sheet_title(&crud.modal(), "Prescription");
    let saving = crud.is_saving();

    rsx! {
        Sheet {
            open: true,
            on_close: move |_| crud.cancel(),
            dismissable: !saving,
            SheetContent {
                SheetHeader {
                    SheetTitle { "{title}" }
                    SheetDescription { "One line per medication." }
                    SheetClose { on_close: move |_| crud.cancel(), disabled: saving }
                }

                {notice_banner(crud)}

                Form {
                    onsubmit: move |_| crud.submit(),
                    busy: saving,
                    div { class: "sheet-form",
                        PatientSelect {
                            patients,
                            value: form.patient_id,
                            on_change: move |id: Option<i64>| crud.edit_form(|f| f.patient_id = id),
                        }
                        Input {
                            label: "Date",
                            required: true,
                            input_type: "date",
                            value: form.date.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.date = e.value()),
                        }

                        fieldset { class: "medication-lines",
                            legend { "Medication" }
                            for (index, medication) in form.medications.iter().cloned().enumerate() {
                                MedicationLine { key: "{index}", crud, index, medication }
                            }
                            Button {
                                variant: ButtonVariant::Outline,
                                button_type: "button",
                                onclick: move |_| crud.edit_form(|f| f.add_medication(Medication::default())),
                                Icon::<LdPlus> { icon: LdPlus, width: 16, height: 16 }
                                "Add medication"
                            }
                        }

                        Textarea {
                            label: "Notes",
                            rows: 3,
                            value: form.notes.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.notes = e.value()),
                        }
                    }
                    SheetFooter {
                        Button {
                            variant: ButtonVariant::Outline,
                            disabled: saving,
                            onclick: move |_| crud.cancel(),
                            "Cancel"
                        }
                        Button { button_type: "submit", loading: saving, "Save" }
                    }
                }
            }
        }
    }
}

#[component]
fn MedicationLine(crud: CrudHandle<Prescription>, index: usize, medication: Medication) -> Element {
    let edit = move |apply: fn(&mut Medication, String), value: String| {
        crud.edit_form(|f| {
            if let Some(line) = f.medications.get_mut(index) {
                apply(line, value);
            }
        });
    };

    rsx! {
        div { class: "medication-line",
            Input {
                placeholder: "Name",
                value: medication.name.clone(),
                on_input: move |e: FormEvent| edit(|m, v| m.name = v, e.value()),
            }
            Input {
                placeholder: "Dosage",
                value: medication.dosage.clone(),
                on_input: move |e: FormEvent| edit(|m, v| m.dosage = v, e.value()),
            }
            Input {
                placeholder: "Frequency",
                value: medication.frequency.clone(),
                on_input: move |e: FormEvent| edit(|m, v| m.frequency = v, e.value()),
            }
            Input {
                placeholder: "Duration",
                value: medication.duration.clone(),
                on_input: move |e: FormEvent| edit(|m, v| m.duration = v, e.value()),
            }
            Button {
                variant: ButtonVariant::Ghost,
                button_type: "button",
                title: "Remove",
                onclick: move |_| crud.edit_form(|f| f.remove_medication(index)),
                Icon::<LdX> { icon: LdX, width: 16, height: 16 }
            }
        }
    }
}
