use client::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdPencil, LdPlus, LdTrash2};
use dioxus_free_icons::Icon;
use shared_types::{Equipment, EquipmentColumn, EquipmentStatus, EQUIPMENT_STATUSES};
use shared_ui::components::{
    Badge, Button, ButtonVariant, DataTable, DataTableActions, DataTableBody, DataTableCell,
    DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormRow, FormSelect,
    Input, PageActions, PageHeader, PageTitle, Pagination, SearchBar, Sheet, SheetClose,
    SheetContent, SheetDescription, SheetFooter, SheetHeader, SheetTitle, SkeletonRows,
};

use super::crud::{column_sort, delete_dialog, notice_banner, sheet_title, use_crud, CrudHandle};
use crate::format_helpers::{equipment_badge, format_date, or_dash};

/// Technician view: the equipment inventory.
#[component]
pub fn EquipmentView() -> Element {
    let crud = use_crud(|api: ApiClient| async move { api.list::<Equipment>().await });
    let snap = crud.page();
    let empty = snap.empty_message("equipment");
    let form_open = crud.form().is_some();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Devices tracked by the technical team".to_string(), "Equipment" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| crud.open_create(),
                        Icon::<LdPlus> { icon: LdPlus, width: 16, height: 16 }
                        "Add equipment"
                    }
                }
            }

            if !form_open {
                {notice_banner(crud)}
            }

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by name or type...",
                span { class: "search-count", "{snap.filtered} of {snap.total}" }
            }

            if snap.is_loading() {
                SkeletonRows {}
            } else {
                DataTable {
                    DataTableHeader {
                        DataTableColumn {
                            sort: column_sort(&snap.query, EquipmentColumn::Name),
                            on_sort: move |_| crud.toggle_sort(EquipmentColumn::Name),
                            "Name"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, EquipmentColumn::Type),
                            on_sort: move |_| crud.toggle_sort(EquipmentColumn::Type),
                            "Type"
                        }
                        DataTableColumn { "Serial number" }
                        DataTableColumn { "Status" }
                        DataTableColumn {
                            sort: column_sort(&snap.query, EquipmentColumn::LastMaintenance),
                            on_sort: move |_| crud.toggle_sort(EquipmentColumn::LastMaintenance),
                            "Last maintenance"
                        }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 6, "{message}" }
                        }
                        for equipment in snap.rows.iter().cloned() {
                            EquipmentRow { key: "{equipment.id}", crud, equipment }
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

            EquipmentSheet { crud }
            {delete_dialog(crud, "Its maintenance history will no longer be linked to a device.".to_string())}
        }
    }
}

#[component]
fn EquipmentRow(crud: CrudHandle<Equipment>, equipment: Equipment) -> Element {
    let id = equipment.id;
    let serial = or_dash(&equipment.serial_number);
    let kind = or_dash(&equipment.kind);
    let serviced = equipment
        .last_maintenance
        .as_deref()
        .map(format_date)
        .unwrap_or_default();
    let serviced = or_dash(&serviced);
    let variant = equipment_badge(equipment.status);
    let status = equipment.status;

    rsx! {
        DataTableRow {
            DataTableCell { span { class: "cell-strong", "{equipment.name}" } }
            DataTableCell { "{kind}" }
            DataTableCell { span { class: "cell-muted", "{serial}" } }
            DataTableCell {
                Badge { variant, "{status}" }
            }
            DataTableCell { "{serviced}" }
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
fn EquipmentSheet(crud: CrudHandle<Equipment>) -> Element {
    let Some(form) = crud.form() else {
        return rsx! {};
    };
    let title = sheet_title(&crud.modal(), "Equipment");
    let saving = crud.is_saving();

    rsx! {
        Sheet {
            open: true,
            on_close: move |_| crud.cancel(),
            dismissable: !saving,
            SheetContent {
                SheetHeader {
                    SheetTitle { "{title}" }
                    SheetDescription { "The serial number is assigned by the backend." }
                    SheetClose { on_close: move |_| crud.cancel(), disabled: saving }
                }

                {notice_banner(crud)}

                Form {
                    onsubmit: move |_| crud.submit(),
                    busy: saving,
                    div { class: "sheet-form",
                        Input {
                            label: "Name",
                            required: true,
                            value: form.name.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.name = e.value()),
                        }
                        Input {
                            label: "Type",
                            required: true,
                            placeholder: "Imaging, monitoring, ...",
                            value: form.kind.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.kind = e.value()),
                        }
                        FormRow {
                            FormSelect {
                                label: "Status",
                                value: form.status.as_wire().to_string(),
                                onchange: move |e: Event<FormData>| {
                                    if let Some(status) = EquipmentStatus::from_wire(&e.value()) {
                                        crud.edit_form(|f| f.status = status);
                                    }
                                },
                                for status in EQUIPMENT_STATUSES {
                                    option { key: "{status:?}", value: status.as_wire(), "{status}" }
                                }
                            }
                            Input {
                                label: "Last maintenance",
                                input_type: "date",
                                value: form.last_maintenance.clone(),
                                on_input: move |e: FormEvent| crud.edit_form(|f| f.last_maintenance = e.value()),
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
