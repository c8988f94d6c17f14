use client::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdPencil, LdPlus, LdTrash2};
use dioxus_free_icons::Icon;
use shared_types::{Appointment, AppointmentColumn, Patient, SortSpec};
use shared_ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, DataTable, DataTableActions, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, Input,
    PageActions, PageHeader, PageTitle, Pagination, SearchBar, Sheet, SheetClose, SheetContent,
    SheetDescription, SheetFooter, SheetHeader, SheetTitle, SkeletonRows, Textarea,
};

use super::crud::{column_sort, delete_dialog, notice_banner, sheet_title, use_crud, CrudHandle};
use super::pickers::PatientSelect;
use crate::format_helpers::or_dash;

/// Secretary view: book, move and cancel appointments.
#[component]
pub fn AppointmentBookView() -> Element {
    let patients = use_signal(Vec::<Patient>::new);
    let crud = use_crud(move |api: ApiClient| async move {
        let mut patients = patients;
        let (appointments, lookup) = api.list_linked::<Appointment, Patient>().await?;
        patients.set(lookup);
        Ok(appointments)
    });
    let snap = crud.page();
    let empty = snap.empty_message("appointments");
    let form_open = crud.form().is_some();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Upcoming and past consultations".to_string(), "Appointments" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| crud.open_create(),
                        Icon::<LdPlus> { icon: LdPlus, width: 16, height: 16 }
                        "New appointment"
                    }
                }
            }

            if !form_open {
                {notice_banner(crud)}
            }

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by patient or reason...",
                span { class: "search-count", "{snap.filtered} of {snap.total}" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    DataTableHeader {
                        DataTableColumn {
                            sort: column_sort(&snap.query, AppointmentColumn::Time),
                            on_sort: move |_| crud.toggle_sort(AppointmentColumn::Time),
                            "Date"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, AppointmentColumn::Patient),
                            on_sort: move |_| crud.toggle_sort(AppointmentColumn::Patient),
                            "Patient"
                        }
                        DataTableColumn { "Reason" }
                        DataTableColumn { "Status" }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 5, "{message}" }
                        }
                        for appointment in snap.rows.iter().cloned() {
                            AppointmentRow { key: "{appointment.id}", crud, appointment, editable: true }
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

            AppointmentSheet { crud, patients }
            {delete_dialog(crud, "The appointment will be cancelled and removed.".to_string())}
        }
    }
}

/// Physician view: read-only schedule in chronological order.
#[component]
pub fn AppointmentScheduleView() -> Element {
    let crud = use_crud(|api: ApiClient| async move { api.list::<Appointment>().await });
    use_hook(move || crud.sort_by(SortSpec::ascending(AppointmentColumn::Time)));
    let snap = crud.page();
    let empty = snap.empty_message("appointments");

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Your consultations, earliest first".to_string(), "Schedule" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| crud.reload(),
                        "Refresh"
                    }
                }
            }

            {notice_banner(crud)}

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by patient or reason...",
                span { class: "search-count", "{snap.filtered} of {snap.total}" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    DataTableHeader {
                        DataTableColumn {
                            sort: column_sort(&snap.query, AppointmentColumn::Time),
                            on_sort: move |_| crud.toggle_sort(AppointmentColumn::Time),
                            "Date"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, AppointmentColumn::Patient),
                            on_sort: move |_| crud.toggle_sort(AppointmentColumn::Patient),
                            "Patient"
                        }
                        DataTableColumn { "Reason" }
                        DataTableColumn { "Status" }
                    }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 4, "{message}" }
                        }
                        for appointment in snap.rows.iter().cloned() {
                            AppointmentRow { key: "{appointment.id}", crud, appointment, editable: false }
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
fn AppointmentRow(crud: CrudHandle<Appointment>, appointment: Appointment, editable: bool) -> Element {
    let id = appointment.id;
    let when = appointment.display_time();
    let patient = or_dash(&appointment.patient_name());
    let age = appointment
        .patient
        .as_ref()
        .and_then(|p| p.age)
        .map(|age| format!("{age} yrs"));
    let reason = or_dash(&appointment.reason);
    let status = appointment.status.clone().filter(|s| !s.trim().is_empty());

    rsx! {
        DataTableRow {
            DataTableCell { span { class: "cell-strong", "{when}" } }
            DataTableCell {
                "{patient}"
                if let Some(age) = age {
                    span { class: "cell-muted", " \u{00B7} {age}" }
                }
            }
            DataTableCell { "{reason}" }
            DataTableCell {
                if let Some(status) = status {
                    Badge { variant: BadgeVariant::Outline, "{status}" }
                } else {
                    "\u{2014}"
                }
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
fn AppointmentSheet(crud: CrudHandle<Appointment>, patients: Signal<Vec<Patient>>) -> Element {
    let Some(form) = crud.form() else {
        return rsx! {};
    };
    let title = sheet_title(&crud.modal(), "Appointment");
    let saving = crud.is_saving();

    rsx! {
        Sheet {
            open: true,
            on_close: move |_| crud.cancel(),
            dismissable: !saving,
            SheetContent {
                SheetHeader {
                    SheetTitle { "{title}" }
                    SheetDescription { "Pick the patient and the time slot." }
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
                            label: "Date and time",
                            required: true,
                            input_type: "datetime-local",
                            value: form.scheduled_at.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.scheduled_at = e.value()),
                        }
                        Textarea {
                            label: "Reason",
                            rows: 3,
                            value: form.reason.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.reason = e.value()),
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
