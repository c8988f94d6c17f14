use client::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdCircleCheck, LdPencil, LdPlus, LdTrash2};
use dioxus_free_icons::Icon;
use shared_types::{
    Equipment, MaintenanceColumn, MaintenanceStatus, MaintenanceTicket, StatusFilter, Transition,
    MAINTENANCE_STATUSES,
};
use shared_ui::components::{
    AlertDialogActions, AlertDialogContent, AlertDialogDescription, AlertDialogRoot,
    AlertDialogTitle, Badge, Button, ButtonVariant, DataTable, DataTableActions, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form,
    FormSelect, PageActions, PageHeader, PageTitle, Pagination, SearchBar, Sheet, SheetClose,
    SheetContent, SheetDescription, SheetFooter, SheetHeader, SheetTitle, SkeletonRows, Textarea,
};

use super::crud::{column_sort, delete_dialog, notice_banner, sheet_title, use_crud, CrudHandle};
use super::pickers::EquipmentSelect;
use crate::format_helpers::{maintenance_badge, or_dash};

/// Technician view: maintenance requests against the inventory.
#[component]
pub fn MaintenanceView() -> Element {
    let equipment = use_signal(Vec::<Equipment>::new);
    let crud = use_crud(move |api: ApiClient| async move {
        let mut equipment = equipment;
        let (tickets, lookup) = api.list_linked::<MaintenanceTicket, Equipment>().await?;
        equipment.set(lookup);
        Ok(tickets)
    });
    let mut filter = use_signal(StatusFilter::default);
    let mut completing = use_signal(|| None::<i64>);

    let status = filter();
    let snap = crud.page_with(move |t: &MaintenanceTicket| status.keeps(t));
    let empty = snap.empty_message("maintenance requests");
    let form_open = crud.form().is_some();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Repairs and servicing requested for equipment".to_string(), "Maintenance" }
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
                placeholder: "Search by equipment, serial number or description...",
                FormSelect {
                    value: status.as_str().to_string(),
                    onchange: move |e: Event<FormData>| {
                        filter.set(StatusFilter::parse(&e.value()));
                        crud.set_page(1);
                    },
                    option { value: "all", "All statuses" }
                    for s in MAINTENANCE_STATUSES {
                        option { key: "{s:?}", value: s.as_wire(), "{s}" }
                    }
                }
                span { class: "search-count", "{snap.filtered} of {snap.total}" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    DataTableHeader {
                        DataTableColumn {
                            sort: column_sort(&snap.query, MaintenanceColumn::Equipment),
                            on_sort: move |_| crud.toggle_sort(MaintenanceColumn::Equipment),
                            "Equipment"
                        }
                        DataTableColumn { "Serial number" }
                        DataTableColumn { "Description" }
                        DataTableColumn {
                            sort: column_sort(&snap.query, MaintenanceColumn::Status),
                            on_sort: move |_| crud.toggle_sort(MaintenanceColumn::Status),
                            "Status"
                        }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 5, "{message}" }
                        }
                        for ticket in snap.rows.iter().cloned() {
                            TicketRow {
                                key: "{ticket.id}",
                                crud,
                                ticket,
                                on_complete: move |id: i64| completing.set(Some(id)),
                            }
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

            TicketSheet { crud, equipment }
            {delete_dialog(crud, "The maintenance request will be removed from the log.".to_string())}

            AlertDialogRoot {
                open: completing().is_some(),
                on_open_change: move |open: bool| {
                    if !open {
                        completing.set(None);
                    }
                },
                AlertDialogContent {
                    AlertDialogTitle { "Mark as completed?" }
                    AlertDialogDescription { "The request will move to the completed list." }
                    AlertDialogActions {
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| completing.set(None),
                            "Cancel"
                        }
                        Button {
                            onclick: move |_| {
                                let id = completing();
                                completing.set(None);
                                if let Some(id) = id {
                                    crud.transition(id, Transition::Complete, false);
                                }
                            },
                            "Complete"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TicketRow(
    crud: CrudHandle<MaintenanceTicket>,
    ticket: MaintenanceTicket,
    on_complete: EventHandler<i64>,
) -> Element {
    let id = ticket.id;
    let pending = crud.is_pending(id);
    let open = ticket.status == MaintenanceStatus::Pending;
    let equipment = or_dash(ticket.equipment_name());
    let serial = or_dash(ticket.serial_number());
    let variant = maintenance_badge(ticket.status);
    let status = ticket.status;

    rsx! {
        DataTableRow { pending,
            DataTableCell { span { class: "cell-strong", "{equipment}" } }
            DataTableCell { span { class: "cell-muted", "{serial}" } }
            DataTableCell { "{ticket.description}" }
            DataTableCell {
                Badge { variant, "{status}" }
            }
            DataTableActions {
                if open {
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Mark as completed",
                        disabled: pending,
                        onclick: move |_| on_complete.call(id),
                        Icon::<LdCircleCheck> { icon: LdCircleCheck, width: 16, height: 16 }
                    }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Edit",
                    disabled: pending,
                    onclick: move |_| crud.open_edit(id),
                    Icon::<LdPencil> { icon: LdPencil, width: 16, height: 16 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Delete",
                    disabled: pending,
                    onclick: move |_| crud.open_delete(id),
                    Icon::<LdTrash2> { icon: LdTrash2, width: 16, height: 16 }
                }
            }
        }
    }
}

#[component]
fn TicketSheet(crud: CrudHandle<MaintenanceTicket>, equipment: Signal<Vec<Equipment>>) -> Element {
    let Some(form) = crud.form() else {
        return rsx! {};
    };
    let title = sheet_title(&crud.modal(), "Maintenance request");
    let saving = crud.is_saving();

    rsx! {
        Sheet {
            open: true,
            on_close: move |_| crud.cancel(),
            dismissable: !saving,
            SheetContent {
                SheetHeader {
                    SheetTitle { "{title}" }
                    SheetDescription { "Describe the fault or the servicing needed." }
                    SheetClose { on_close: move |_| crud.cancel(), disabled: saving }
                }

                {notice_banner(crud)}

                Form {
                    onsubmit: move |_| crud.submit(),
                    busy: saving,
                    div { class: "sheet-form",
                        EquipmentSelect {
                            equipment,
                            value: form.equipment_id,
                            on_change: move |id: Option<i64>| crud.edit_form(|f| f.equipment_id = id),
                        }
                        Textarea {
                            label: "Description",
                            rows: 4,
                            value: form.description.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.description = e.value()),
                        }
                        FormSelect {
                            label: "Status",
                            value: form.status.as_wire().to_string(),
                            onchange: move |e: Event<FormData>| {
                                if let Some(status) = MaintenanceStatus::from_wire(&e.value()) {
                                    crud.edit_form(|f| f.status = status);
                                }
                            },
                            for s in MAINTENANCE_STATUSES {
                                option { key: "{s:?}", value: s.as_wire(), "{s}" }
                            }
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
