use client::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdNotebookPen, LdPencil, LdTrash2};
use dioxus_free_icons::Icon;
use shared_types::{Observation, ObservationColumn, Patient, SortDirection, SortSpec};
use shared_ui::components::{
    Button, ButtonVariant, DataTable, DataTableActions, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, PageActions, PageHeader,
    PageTitle, Pagination, SearchBar, Sheet, SheetClose, SheetContent, SheetDescription,
    SheetFooter, SheetHeader, SheetTitle, SkeletonRows, Textarea,
};

use super::crud::{column_sort, delete_dialog, notice_banner, sheet_title, use_crud, CrudHandle};
use super::pickers::PatientSelect;
use crate::format_helpers::or_dash;

/// Nurse view: bedside observations, newest first.
#[component]
pub fn ObservationsView() -> Element {
    let patients = use_signal(Vec::<Patient>::new);
    let crud = use_crud(move |api: ApiClient| async move {
        let mut patients = patients;
        let (observations, lookup) = api.list_linked::<Observation, Patient>().await?;
        patients.set(lookup);
        Ok(observations)
    });
    use_hook(move || {
        crud.sort_by(SortSpec {
            column: ObservationColumn::Created,
            direction: SortDirection::Descending,
        })
    });
    let snap = crud.page();
    let empty = snap.empty_message("observations");
    let form_open = crud.form().is_some();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Notes recorded during rounds".to_string(), "Observations" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| crud.open_create(),
                        Icon::<LdNotebookPen> { icon: LdNotebookPen, width: 16, height: 16 }
                        "New observation"
                    }
                }
            }

            if !form_open {
                {notice_banner(crud)}
            }

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by patient or note...",
                span { class: "search-count", "{snap.filtered} of {snap.total}" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    DataTableHeader {
                        DataTableColumn {
                            sort: column_sort(&snap.query, ObservationColumn::Created),
                            on_sort: move |_| crud.toggle_sort(ObservationColumn::Created),
                            "Date"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, ObservationColumn::Patient),
                            on_sort: move |_| crud.toggle_sort(ObservationColumn::Patient),
                            "Patient"
                        }
                        DataTableColumn { "Observation" }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 4, "{message}" }
                        }
                        for observation in snap.rows.iter().cloned() {
                            ObservationRow { key: "{observation.id}", crud, observation }
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

            ObservationSheet { crud, patients }
            {delete_dialog(crud, "The observation will be removed from the patient's file.".to_string())}
        }
    }
}

#[component]
fn ObservationRow(crud: CrudHandle<Observation>, observation: Observation) -> Element {
    let id = observation.id;
    let date = or_dash(&observation.display_date());
    let patient = or_dash(&observation.patient_name());

    rsx! {
        DataTableRow {
            DataTableCell { "{date}" }
            DataTableCell { span { class: "cell-strong", "{patient}" } }
            DataTableCell { span { class: "cell-wrap", "{observation.text}" } }
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
fn ObservationSheet(crud: CrudHandle<Observation>, patients: Signal<Vec<Patient>>) -> Element {
    let Some(form) = crud.form() else {
        return rsx! {};
    };
    let title = sheet_title(&crud.modal(), "Observation");
    let saving = crud.is_saving();

    rsx! {
        Sheet {
            open: true,
            on_close: move |_| crud.cancel(),
            dismissable: !saving,
            SheetContent {
                SheetHeader {
                    SheetTitle { "{title}" }
                    SheetDescription { "The note is timestamped when saved." }
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
                        Textarea {
                            label: "Observation",
                            rows: 6,
                            value: form.text.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.text = e.value()),
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
