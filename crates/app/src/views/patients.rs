use client::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdPencil, LdPlus, LdTrash2};
use dioxus_free_icons::Icon;
use shared_types::{Patient, PatientColumn};
use shared_ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, DataTable, DataTableActions, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormRow,
    Input, PageActions, PageHeader, PageTitle, Pagination, SearchBar, Sheet, SheetClose,
    SheetContent, SheetDescription, SheetFooter, SheetHeader, SheetTitle, SkeletonRows, Textarea,
};

use super::crud::{column_sort, delete_dialog, notice_banner, sheet_title, use_crud, CrudHandle};
use crate::format_helpers::{format_date, or_dash};

/// Secretary view: full patient CRUD.
#[component]
pub fn PatientRecordsView() -> Element {
    let crud = use_crud(|api: ApiClient| async move { api.list::<Patient>().await });
    let snap = crud.page();
    let empty = snap.empty_message("patients");
    let form_open = crud.form().is_some();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Registered patients and their records".to_string(), "Patients" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| crud.open_create(),
                        Icon::<LdPlus> { icon: LdPlus, width: 16, height: 16 }
                        "New patient"
                    }
                }
            }

            if !form_open {
                {notice_banner(crud)}
            }

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by name, email or phone...",
                span { class: "search-count", "{snap.filtered} of {snap.total}" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    DataTableHeader {
                        DataTableColumn {
                            sort: column_sort(&snap.query, PatientColumn::Name),
                            on_sort: move |_| crud.toggle_sort(PatientColumn::Name),
                            "Name"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, PatientColumn::BirthDate),
                            on_sort: move |_| crud.toggle_sort(PatientColumn::BirthDate),
                            "Date of birth"
                        }
                        DataTableColumn { "Phone" }
                        DataTableColumn { "Email" }
                        DataTableColumn {
                            sort: column_sort(&snap.query, PatientColumn::Hospitalized),
                            on_sort: move |_| crud.toggle_sort(PatientColumn::Hospitalized),
                            "Status"
                        }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 6, "{message}" }
                        }
                        for patient in snap.rows.iter().cloned() {
                            PatientRow { key: "{patient.id}", crud, patient, editable: true }
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

            PatientSheet { crud }
            {delete_dialog(crud, "The patient record will be removed permanently.".to_string())}
        }
    }
}

/// Nurse view: read-only roster with search.
#[component]
pub fn PatientRosterView() -> Element {
    let crud = use_crud(|api: ApiClient| async move { api.list::<Patient>().await });
    let snap = crud.page();
    let empty = snap.empty_message("patients");

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Patients currently on file".to_string(), "Patient roster" }
            }

            {notice_banner(crud)}

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by name, email or phone...",
                span { class: "search-count", "{snap.filtered} of {snap.total}" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    DataTableHeader {
                        DataTableColumn {
                            sort: column_sort(&snap.query, PatientColumn::Name),
                            on_sort: move |_| crud.toggle_sort(PatientColumn::Name),
                            "Name"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, PatientColumn::BirthDate),
                            on_sort: move |_| crud.toggle_sort(PatientColumn::BirthDate),
                            "Date of birth"
                        }
                        DataTableColumn { "Phone" }
                        DataTableColumn { "Email" }
                        DataTableColumn {
                            sort: column_sort(&snap.query, PatientColumn::Hospitalized),
                            on_sort: move |_| crud.toggle_sort(PatientColumn::Hospitalized),
                            "Status"
                        }
                    }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 5, "{message}" }
                        }
                        for patient in snap.rows.iter().cloned() {
                            PatientRow { key: "{patient.id}", crud, patient, editable: false }
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
        }
    }
}

#[component]
fn PatientRow(crud: CrudHandle<Patient>, patient: Patient, editable: bool) -> Element {
    let id = patient.id;
    let name = patient.full_name();
    let born = patient.birth_date.as_deref().map(format_date).unwrap_or_default();
    let born = or_dash(&born);
    let phone = or_dash(&patient.phone);
    let email = or_dash(&patient.email);
    let (variant, status) = if patient.hospitalized {
        (BadgeVariant::Warning, "Hospitalized")
    } else {
        (BadgeVariant::Secondary, "Outpatient")
    };

    rsx! {
        DataTableRow {
            DataTableCell { span { class: "cell-strong", "{name}" } }
            DataTableCell { "{born}" }
            DataTableCell { "{phone}" }
            DataTableCell { "{email}" }
            DataTableCell {
                Badge { variant, "{status}" }
            }
            if editable {
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
}

#[component]
fn PatientSheet(crud: CrudHandle<Patient>) -> Element {
    let Some(form) = crud.form() else {
        return rsx! {};
    };
    let title = sheet_title(&crud.modal(), "Patient");
    let saving = crud.is_saving();

    rsx! {
        Sheet {
            open: true,
            on_close: move |_| crud.cancel(),
            dismissable: !saving,
            SheetContent {
                SheetHeader {
                    SheetTitle { "{title}" }
                    SheetDescription { "Identity, contact details and medical history." }
                    SheetClose { on_close: move |_| crud.cancel(), disabled: saving }
                }

                {notice_banner(crud)}

                Form {
                    onsubmit: move |_| crud.submit(),
                    busy: saving,
                    div { class: "sheet-form",
                        FormRow {
                            Input {
                                label: "Last name",
                                required: true,
                                value: form.last_name.clone(),
                                on_input: move |e: FormEvent| crud.edit_form(|f| f.last_name = e.value()),
                            }
                            Input {
                                label: "First name",
                                required: true,
                                value: form.first_name.clone(),
                                on_input: move |e: FormEvent| crud.edit_form(|f| f.first_name = e.value()),
                            }
                        }
                        FormRow {
                            Input {
                                label: "Date of birth",
                                input_type: "date",
                                value: form.birth_date.clone(),
                                on_input: move |e: FormEvent| crud.edit_form(|f| f.birth_date = e.value()),
                            }
                            Input {
                                label: "Phone",
                                input_type: "tel",
                                value: form.phone.clone(),
                                on_input: move |e: FormEvent| crud.edit_form(|f| f.phone = e.value()),
                            }
                        }
                        Input {
                            label: "Email",
                            input_type: "email",
                            value: form.email.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.email = e.value()),
                        }
                        Input {
                            label: "Address",
                            value: form.address.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.address = e.value()),
                        }
                        Textarea {
                            label: "Medical history",
                            value: form.medical_history.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.medical_history = e.value()),
                        }
                        label { class: "checkbox-field",
                            input {
                                r#type: "checkbox",
                                checked: form.hospitalized,
                                onchange: move |e: FormEvent| crud.edit_form(|f| f.hospitalized = e.checked()),
                            }
                            "Currently hospitalized"
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
