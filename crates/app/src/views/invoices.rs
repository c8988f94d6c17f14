use client::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdPencil, LdPlus, LdTrash2};
use dioxus_free_icons::Icon;
use shared_types::{Invoice, InvoiceColumn, InvoiceForm, InvoiceStatus, Patient, INVOICE_STATUSES};
use shared_ui::components::{
    Badge, Button, ButtonVariant, DataTable, DataTableActions, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormRow, FormSelect,
    Input, PageActions, PageHeader, PageTitle, Pagination, SearchBar, Sheet, SheetClose,
    SheetContent, SheetDescription, SheetFooter, SheetHeader, SheetTitle, SkeletonRows, Textarea,
};

use super::crud::{column_sort, delete_dialog, notice_banner, sheet_title, use_crud, CrudHandle};
use super::pickers::PatientSelect;
use crate::format_helpers::{format_date, invoice_badge, or_dash, today};

#[component]
pub fn InvoicesView() -> Element {
    let patients = use_signal(Vec::<Patient>::new);
    let crud = use_crud(move |api: ApiClient| async move {
        let mut patients = patients;
        let (invoices, lookup) = api.list_linked::<Invoice, Patient>().await?;
        patients.set(lookup);
        Ok(invoices)
    });
    let snap = crud.page();
    let empty = snap.empty_message("invoices");
    let form_open = crud.form().is_some();
    let outstanding: f64 = crud
        .view
        .read()
        .records()
        .iter()
        .filter(|i| i.status == InvoiceStatus::Pending)
        .map(Invoice::amount_value)
        .sum();
    let outstanding = format!("{outstanding:.2}");

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Billing for consultations and stays".to_string(), "Invoices" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| crud.open_create_with(InvoiceForm { date: today(), ..Default::default() }),
                        Icon::<LdPlus> { icon: LdPlus, width: 16, height: 16 }
                        "New invoice"
                    }
                }
            }

            if !form_open {
                {notice_banner(crud)}
            }

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by patient, amount or date...",
                span { class: "search-count", "{snap.filtered} of {snap.total} \u{00B7} {outstanding} outstanding" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    DataTableHeader {
                        DataTableColumn {
                            sort: column_sort(&snap.query, InvoiceColumn::Patient),
                            on_sort: move |_| crud.toggle_sort(InvoiceColumn::Patient),
                            "Patient"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, InvoiceColumn::Date),
                            on_sort: move |_| crud.toggle_sort(InvoiceColumn::Date),
                            "Date"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, InvoiceColumn::Amount),
                            on_sort: move |_| crud.toggle_sort(InvoiceColumn::Amount),
                            "Amount"
                        }
                        DataTableColumn { "Status" }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 5, "{message}" }
                        }
                        for invoice in snap.rows.iter().cloned() {
                            InvoiceRow { key: "{invoice.id}", crud, invoice }
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

            InvoiceSheet { crud, patients }
            {delete_dialog(crud, "The invoice will be removed from the patient's billing.".to_string())}
        }
    }
}

#[component]
fn InvoiceRow(crud: CrudHandle<Invoice>, invoice: Invoice) -> Element {
    let id = invoice.id;
    let patient = or_dash(&invoice.patient_name());
    let date = format_date(&invoice.date);
    let amount = invoice.display_amount();
    let variant = invoice_badge(invoice.status);
    let status = invoice.status;

    rsx! {
        DataTableRow {
            DataTableCell { span { class: "cell-strong", "{patient}" } }
            DataTableCell { "{date}" }
            DataTableCell { span { class: "cell-number", "{amount}" } }
            DataTableCell {
                Badge { variant, "{status}" }
            }
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
fn InvoiceSheet(crud: CrudHandle<Invoice>, patients: Signal<Vec<Patient>>) -> Element {
    let Some(form) = crud.form() else {
        return rsx! {};
    };
    let title = sheet_title(&crud.modal(), "Invoice");
    let saving = crud.is_saving();

    rsx! {
        Sheet {
            open: true,
            on_close: move |_| crud.cancel(),
            dismissable: !saving,
            SheetContent {
                SheetHeader {
                    SheetTitle { "{title}" }
                    SheetDescription { "Amounts are recorded with two decimals." }
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
                        FormRow {
                            Input {
                                label: "Date",
                                required: true,
                                input_type: "date",
                                value: form.date.clone(),
                                on_input: move |e: FormEvent| crud.edit_form(|f| f.date = e.value()),
                            }
                            Input {
                                label: "Amount",
                                required: true,
                                input_type: "number",
                                placeholder: "0.00",
                                value: form.amount.clone(),
                                on_input: move |e: FormEvent| crud.edit_form(|f| f.amount = e.value()),
                            }
                        }
                        FormSelect {
                            label: "Status",
                            value: form.status.as_wire().to_string(),
                            onchange: move |e: Event<FormData>| {
                                if let Some(status) = InvoiceStatus::from_wire(&e.value()) {
                                    crud.edit_form(|f| f.status = status);
                                }
                            },
                            for status in INVOICE_STATUSES {
                                option { key: "{status:?}", value: status.as_wire(), "{status}" }
                            }
                        }
                        Textarea {
                            label: "Details",
                            rows: 3,
                            value: form.details.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.details = e.value()),
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
