use client::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdPencil, LdTrash2, LdUserPlus};
use dioxus_free_icons::Icon;
use shared_types::{head_counts, Role, StaffColumn, StaffUser, ALL_ROLES};
use shared_ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, DataTable, DataTableActions, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, Form, FormRow,
    FormSelect, Input, PageActions, PageHeader, PageTitle, Pagination, SearchBar, Sheet,
    SheetClose, SheetContent, SheetDescription, SheetFooter, SheetHeader, SheetTitle, SkeletonRows,
};

use super::crud::{column_sort, delete_dialog, notice_banner, sheet_title, use_crud, CrudHandle};
use crate::format_helpers::or_dash;

fn role_filter_matches(filter: Option<Role>, user: &StaffUser) -> bool {
    match filter {
        Some(role) => Role::parse(&user.role) == Some(role),
        None => true,
    }
}

fn role_badge(role: &str) -> BadgeVariant {
    match Role::parse(role) {
        Some(Role::Admin) => BadgeVariant::Primary,
        Some(Role::Physician) => BadgeVariant::Success,
        Some(Role::Nurse) => BadgeVariant::Warning,
        Some(_) => BadgeVariant::Secondary,
        None => BadgeVariant::Outline,
    }
}

/// Administrator view: staff accounts, filterable by role.
#[component]
pub fn StaffDirectoryView() -> Element {
    let crud = use_crud(|api: ApiClient| async move { api.list::<StaffUser>().await });
    let mut filter = use_signal(|| None::<Role>);
    let role = filter();
    let snap = crud.page_with(move |u: &StaffUser| role_filter_matches(role, u));
    let counts = crud.with_matching(
        move |u: &StaffUser| role_filter_matches(role, u),
        |users| head_counts(users.iter().copied()),
    );
    let empty = snap.empty_message("staff members");
    let form_open = crud.form().is_some();
    let filter_value = role.map(|r| r.as_wire().to_string()).unwrap_or_default();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Accounts that can sign in to the hospital".to_string(), "Staff" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| crud.open_create(),
                        Icon::<LdUserPlus> { icon: LdUserPlus, width: 16, height: 16 }
                        "New staff member"
                    }
                }
            }

            if !form_open {
                {notice_banner(crud)}
            }

            SearchBar {
                value: snap.query.term.clone(),
                on_search: move |term: String| crud.set_search(term),
                placeholder: "Search by name, email or specialty...",
                FormSelect {
                    value: filter_value,
                    placeholder: "All roles",
                    onchange: move |e: Event<FormData>| {
                        filter.set(Role::parse(&e.value()));
                        crud.set_page(1);
                    },
                    for role in ALL_ROLES.iter().copied() {
                        option { key: "{role:?}", value: role.as_wire(), "{role}" }
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
                            sort: column_sort(&snap.query, StaffColumn::Name),
                            on_sort: move |_| crud.toggle_sort(StaffColumn::Name),
                            "Name"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, StaffColumn::Email),
                            on_sort: move |_| crud.toggle_sort(StaffColumn::Email),
                            "Email"
                        }
                        DataTableColumn {
                            sort: column_sort(&snap.query, StaffColumn::Role),
                            on_sort: move |_| crud.toggle_sort(StaffColumn::Role),
                            "Role"
                        }
                        DataTableColumn { "Specialty" }
                        DataTableColumn { "" }
                    }
                    DataTableBody {
                        if let Some(message) = empty {
                            DataTableEmpty { colspan: 5, "{message}" }
                        }
                        for user in snap.rows.iter().cloned() {
                            StaffRow { key: "{user.id}", crud, user }
                        }
                    }
                }
                Pagination {
                    page: snap.page,
                    page_count: snap.page_count,
                    total: snap.filtered,
                    on_change: move |page: usize| crud.set_page(page),
                }
                div { class: "head-counts",
                    span { class: "head-count",
                        strong { "Total" }
                        " {snap.filtered}"
                    }
                    for (role, count) in counts.into_iter() {
                        span { key: "{role:?}", class: "head-count",
                            strong { "{role}" }
                            " {count}"
                        }
                    }
                }
            }

            StaffSheet { crud }
            {delete_dialog(crud, "The account will no longer be able to sign in.".to_string())}
        }
    }
}

#[component]
fn StaffRow(crud: CrudHandle<StaffUser>, user: StaffUser) -> Element {
    let id = user.id;
    let variant = role_badge(&user.role);
    let role = user.role_label().to_string();
    let specialty = or_dash(user.specialty.as_deref().unwrap_or(""));

    rsx! {
        DataTableRow {
            DataTableCell { span { class: "cell-strong", "{user.name}" } }
            DataTableCell { "{user.email}" }
            DataTableCell {
                Badge { variant, "{role}" }
            }
            DataTableCell { "{specialty}" }
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
fn StaffSheet(crud: CrudHandle<StaffUser>) -> Element {
    let Some(form) = crud.form() else {
        return rsx! {};
    };
    let modal = crud.modal();
    let editing = matches!(modal, shared_types::Modal::Edit { .. });
    let title = sheet_title(&modal, "Staff member");
    let saving = crud.is_saving();
    let specialties = Role::parse(&form.role)
        .map(|r| r.specialties())
        .unwrap_or(&[]);
    let specialty = form.specialty.clone().unwrap_or_default();
    let password_hint = if editing {
        "Leave blank to keep the current password"
    } else {
        "At least 6 characters"
    };

    rsx! {
        Sheet {
            open: true,
            on_close: move |_| crud.cancel(),
            dismissable: !saving,
            SheetContent {
                SheetHeader {
                    SheetTitle { "{title}" }
                    SheetDescription { "Sign-in details and role." }
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
                            label: "Email",
                            required: true,
                            input_type: "email",
                            value: form.email.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.email = e.value()),
                        }
                        Input {
                            label: "Password",
                            input_type: "password",
                            required: !editing,
                            placeholder: password_hint.to_string(),
                            value: form.password.clone(),
                            on_input: move |e: FormEvent| crud.edit_form(|f| f.password = e.value()),
                        }
                        FormRow {
                            FormSelect {
                                label: "Role",
                                required: true,
                                placeholder: "Select a role",
                                value: form.role.clone(),
                                onchange: move |e: Event<FormData>| crud.edit_form(|f| f.set_role(&e.value())),
                                for role in ALL_ROLES.iter().copied() {
                                    option { key: "{role:?}", value: role.as_wire(), "{role}" }
                                }
                            }
                            FormSelect {
                                label: "Specialty",
                                placeholder: "None",
                                disabled: specialties.is_empty(),
                                value: specialty,
                                onchange: move |e: Event<FormData>| {
                                    let value = e.value();
                                    crud.edit_form(|f| f.specialty = (!value.is_empty()).then_some(value));
                                },
                                for name in specialties.iter().copied() {
                                    option { key: "{name}", value: name, "{name}" }
                                }
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
