use client::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdCheck, LdPencil, LdPlus, LdTrash2, LdX};
use dioxus_free_icons::Icon;
use shared_types::{
    leave_days, Employee, LeaveColumn, LeaveRequest, LeaveStatus, LeaveType, Transition,
    LEAVE_STATUSES, LEAVE_TYPES,
};
use shared_ui::components::{
    Badge, Button, ButtonVariant, DataTable, DataTableActions, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormRow, FormSelect,
    Input, PageActions, PageHeader, PageTitle, Pagination, SearchBar, Sheet, SheetClose,
    SheetContent, SheetDescription, SheetFooter, SheetHeader, SheetTitle, SkeletonRows, Textarea,
};

use super::crud::{column_sort, delete_dialog, notice_banner, sheet_title, use_crud, CrudHandle};
use super::pickers::EmployeeSelect;
use crate::format_helpers::{format_date, leave_badge, or_dash};

/// Administrator view: approve or reject pending requests.
///
/// Decisions are shown immediately; a failed call reloads the list so the
/// row falls back to what the backend holds.
#[component]
pub fn LeaveApprovalView() -> Element {
    let crud = use_crud(|api: ApiClient| async move { api.list::<LeaveRequest>().await });
    let mut pending_only = use_signal(|| false);
    let only = pending_only();
    let snap = crud.page_with(move |r: &LeaveRequest| !only || r.is_pending());
    let empty = snap.empty_message("leave requests");

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Requests awaiting a decision".to_string(), "Leave approval" }
                PageActions {
                    Button {
                        variant: if only { ButtonVariant::Primary } else { ButtonVariant::Outline },
                        onclick: move |_| pending_only.toggle(),
                        if only { "Show all" } else { "Pending only" }
                    }
                }
            }

            {notice_banner(crud)}

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by employee, type or status...",
                span { class: "search-count", "{snap.filtered} of {snap.total}" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    LeaveHeader { crud }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 7, "{message}" }
                        }
                        for request in snap.rows.iter().cloned() {
                            ApprovalRow { key: "{request.id}", crud, request }
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

/// Secretary view: file and edit leave requests for employees.
#[component]
pub fn LeaveRequestsView() -> Element {
    let employees = use_signal(Vec::<Employee>::new);
    let crud = use_crud(move |api: ApiClient| async move {
        let mut employees = employees;
        let (requests, lookup) = api.list_joined::<LeaveRequest, Employee>("users/conge").await?;
        employees.set(lookup);
        Ok(requests)
    });
    let snap = crud.page();
    let empty = snap.empty_message("leave requests");
    let form_open = crud.form().is_some();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Absences filed for staff".to_string(), "Leave requests" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| crud.open_create(),
                        Icon::<LdPlus> { icon: LdPlus, width: 16, height: 16 }
                        "New request"
                    }
                }
            }

            if !form_open {
                {notice_banner(crud)}
            }

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by employee, type or status...",
                span { class: "search-count", "{snap.filtered} of {snap.total}" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    LeaveHeader { crud }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 7, "{message}" }
                        }
                        for request in snap.rows.iter().cloned() {
                            RequestRow { key: "{request.id}", crud, request }
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

            LeaveSheet { crud, employees }
            {delete_dialog(crud, "The leave request will be withdrawn.".to_string())}
        }
    }
}

#[component]
fn LeaveHeader(crud: CrudHandle<LeaveRequest>) -> Element {
    let query = crud.view.read().query.clone();
    rsx! {
        DataTableHeader {
            DataTableColumn {
                sort: column_sort(&query, LeaveColumn::Employee),
                on_sort: move |_| crud.toggle_sort(LeaveColumn::Employee),
                "Employee"
            }
            DataTableColumn { "Type" }
            DataTableColumn {
                sort: column_sort(&query, LeaveColumn::Start),
                on_sort: move |_| crud.toggle_sort(LeaveColumn::Start),
                "From"
            }
            DataTableColumn { "To" }
            DataTableColumn { "Days" }
            DataTableColumn {
                sort: column_sort(&query, LeaveColumn::Status),
                on_sort: move |_| crud.toggle_sort(LeaveColumn::Status),
                "Status"
            }
            DataTableColumn { "" }
        }
    }
}

#[component]
fn LeaveCells(request: LeaveRequest) -> Element {
    let employee = or_dash(request.employee_name());
    let from = format_date(&request.start_date);
    let to = format_date(&request.end_date);
    let days = request.days().map(|d| d.to_string()).unwrap_or_default();
    let days = or_dash(&days);
    let variant = leave_badge(request.status);
    let status = request.status;
    let kind = request.kind;

    rsx! {
        DataTableCell { span { class: "cell-strong", "{employee}" } }
        DataTableCell { "{kind}" }
        DataTableCell { "{from}" }
        DataTableCell { "{to}" }
        DataTableCell { "{days}" }
        DataTableCell {
            Badge { variant, "{status}" }
        }
    }
}

#[component]
fn ApprovalRow(crud: CrudHandle<LeaveRequest>, request: LeaveRequest) -> Element {
    let id = request.id;
    let pending = crud.is_pending(id);
    let decidable = request.is_pending();

    rsx! {
        DataTableRow { pending,
            LeaveCells { request }
            DataTableActions {
                if decidable {
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: pending,
                        onclick: move |_| crud.transition(id, Transition::Approve, true),
                        Icon::<LdCheck> { icon: LdCheck, width: 16, height: 16 }
                        "Approve"
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: pending,
                        onclick: move |_| crud.transition(id, Transition::Reject, true),
                        Icon::<LdX> { icon: LdX, width: 16, height: 16 }
                        "Reject"
                    }
                }
            }
        }
    }
}

#[component]
fn RequestRow(crud: CrudHandle<LeaveRequest>, request: LeaveRequest) -> Element {
    let id = request.id;

    rsx! {
        DataTableRow {
            LeaveCells { request }
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
fn LeaveSheet(crud: CrudHandle<LeaveRequest>, employees: Signal<Vec<Employee>>) -> Element {
    let Some(form) = crud.form() else {
        return rsx! {};
    };
    let title = sheet_title(&crud.modal(), "Leave request");
    let saving = crud.is_saving();
    let span = leave_days(&form.start_date, &form.end_date)
        .map(|d| if d == 1 { "1 day".to_string() } else { format!("{d} days") });

    rsx! {
        Sheet {
            open: true,
            on_close: move |_| crud.cancel(),
            dismissable: !saving,
            SheetContent {
                SheetHeader {
                    SheetTitle { "{title}" }
                    SheetDescription { "Both dates are included in the leave." }
                    SheetClose { on_close: move |_| crud.cancel(), disabled: saving }
                }

                {notice_banner(crud)}

                Form {
                    onsubmit: move |_| crud.submit(),
                    busy: saving,
                    div { class: "sheet-form",
                        EmployeeSelect {
                            employees,
                            value: form.user_id,
                            on_change: move |id: Option<i64>| crud.edit_form(|f| f.user_id = id),
                        }
                        FormRow {
                            Input {
                                label: "Start date",
                                required: true,
                                input_type: "date",
                                value: form.start_date.clone(),
                                on_input: move |e: FormEvent| crud.edit_form(|f| f.start_date = e.value()),
                            }
                            Input {
                                label: "End date",
                                required: true,
                                input_type: "date",
                                value: form.end_date.clone(),
                                on_input: move |e: FormEvent| crud.edit_form(|f| f.end_date = e.value()),
                            }
                        }
                        if let Some(span) = span {
                            p { class: "field-hint", "{span}" }
                        }
                        FormRow {
                            FormSelect {
                                label: "Type",
                                value: form.kind.as_wire().to_string(),
                                onchange: move |e: Event<FormData>| {
                                    if let Some(kind) = LeaveType::from_wire(&e.value()) {
                                        crud.edit_form(|f| f.kind = kind);
                                    }
                                },
                                for kind in LEAVE_TYPES {
                                    option { key: "{kind:?}", value: kind.as_wire(), "{kind}" }
                                }
                            }
                            FormSelect {
                                label: "Status",
                                value: form.status.as_wire().to_string(),
                                onchange: move |e: Event<FormData>| {
                                    if let Some(status) = LeaveStatus::from_wire(&e.value()) {
                                        crud.edit_form(|f| f.status = status);
                                    }
                                },
                                for status in LEAVE_STATUSES {
                                    option { key: "{status:?}", value: status.as_wire(), "{status}" }
                                }
                            }
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
