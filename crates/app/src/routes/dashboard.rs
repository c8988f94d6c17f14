use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdCalendar, LdClipboardList, LdLayoutDashboard, LdLogOut, LdMenu, LdMonitor, LdMoon,
    LdNotebookPen, LdPill, LdPlaneTakeoff, LdReceipt, LdSun, LdUsers, LdWrench,
};
use dioxus_free_icons::Icon;
use shared_types::{NavIcon, ViewKind, ViewRouter};
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle, Sidebar,
    SidebarContent, SidebarFooter, SidebarGroupLabel, SidebarHeader, SidebarInset, SidebarMenu,
    SidebarMenuButton, SidebarMenuItem, SidebarProvider, SidebarTrigger,
};
use shared_ui::theme::{use_theme, ThemeMode};

use crate::auth::{role_label, use_auth};
use crate::routes::Route;
use crate::use_hospital;
use crate::views::{
    AppointmentBookView, AppointmentScheduleView, EquipmentView, InvoicesView, LeaveApprovalView,
    LeaveRequestsView, MaintenanceView, ObservationsView, PatientRecordsView, PatientRosterView,
    PrescriptionsView, StaffDirectoryView, StatisticsView,
};

/// Signed-in landing page. Keyed on the role so a role change rebuilds the
/// shell and re-seeds its router.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let role = auth.role();

    rsx! {
        Shell { key: "{role}", role }
    }
}

#[component]
fn Shell(role: String) -> Element {
    let ctx = use_hospital();
    let auth = use_auth();
    let mut theme = use_theme();
    let mut router = use_signal(|| ViewRouter::for_role(&role));

    let sign_out = move |_: MouseEvent| {
        ctx.client().session().end_session();
        navigator().replace(Route::Login {});
    };

    if router.read().role().is_none() {
        tracing::warn!(role = %role, "no dashboard configured for role");
        return rsx! {
            document::Link { rel: "stylesheet", href: asset!("./layout.css") }
            div { class: "auth-page",
                Card { class: "auth-card",
                    CardHeader {
                        CardTitle { "No dashboard available" }
                        CardDescription { "Your account's role has no dashboard in this application." }
                    }
                    CardContent {
                        Button { variant: ButtonVariant::Outline, onclick: sign_out, "Sign out" }
                    }
                }
            }
        };
    }

    let entries = router.read().entries();
    let active = router.read().active_entry_id();
    let title = router.read().active_entry().map(|e| e.label).unwrap_or("");
    let view = router.read().active_view();
    let user_name = auth
        .user
        .read()
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_default();
    let role_name = role_label(&role);
    let mode = theme.current();
    let toggle_label = mode.toggle_label();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        SidebarProvider {
            Sidebar {
                SidebarHeader {
                    div { class: "sidebar-brand",
                        span { class: "sidebar-brand-name", "Hospital" }
                        span { class: "sidebar-brand-role", "{role_name}" }
                    }
                }

                SidebarContent {
                    SidebarGroupLabel { "Menu" }
                    SidebarMenu {
                        for entry in entries.iter() {
                            SidebarMenuItem { key: "{entry.id:?}",
                                SidebarMenuButton {
                                    active: active == Some(entry.id),
                                    onclick: move |_| {
                                        router.write().select(entry.id);
                                    },
                                    NavIconView { icon: entry.icon }
                                    "{entry.label}"
                                }
                            }
                        }
                    }
                }

                SidebarFooter {
                    button {
                        r#type: "button",
                        class: "sidebar-footer-row",
                        onclick: move |_| theme.toggle(),
                        if mode == ThemeMode::Light {
                            Icon::<LdMoon> { icon: LdMoon, width: 16, height: 16 }
                        } else {
                            Icon::<LdSun> { icon: LdSun, width: 16, height: 16 }
                        }
                        span { "{toggle_label}" }
                    }
                    div { class: "sidebar-user",
                        span { class: "sidebar-user-name", "{user_name}" }
                        span { class: "sidebar-user-role", "{role_name}" }
                    }
                    button {
                        r#type: "button",
                        class: "sidebar-footer-row",
                        onclick: sign_out,
                        Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                        span { "Sign out" }
                    }
                }
            }

            SidebarInset {
                header { class: "navbar-bar",
                    SidebarTrigger {
                        Icon::<LdMenu> { icon: LdMenu, width: 18, height: 18 }
                    }
                    span { class: "navbar-title", "{title}" }
                }
                main { class: "page-content",
                    if let Some(view) = view {
                        ActiveView { key: "{view:?}", view }
                    }
                }
            }
        }
    }
}

#[component]
fn ActiveView(view: ViewKind) -> Element {
    match view {
        ViewKind::Statistics => rsx! { StatisticsView {} },
        ViewKind::StaffDirectory => rsx! { StaffDirectoryView {} },
        ViewKind::LeaveApproval => rsx! { LeaveApprovalView {} },
        ViewKind::LeaveRequests => rsx! { LeaveRequestsView {} },
        ViewKind::PatientRecords => rsx! { PatientRecordsView {} },
        ViewKind::PatientRoster => rsx! { PatientRosterView {} },
        ViewKind::AppointmentBook => rsx! { AppointmentBookView {} },
        ViewKind::AppointmentSchedule => rsx! { AppointmentScheduleView {} },
        ViewKind::Invoices => rsx! { InvoicesView {} },
        ViewKind::Prescriptions => rsx! { PrescriptionsView {} },
        ViewKind::Equipment => rsx! { EquipmentView {} },
        ViewKind::Maintenance => rsx! { MaintenanceView {} },
        ViewKind::Observations => rsx! { ObservationsView {} },
    }
}

#[component]
fn NavIconView(icon: NavIcon) -> Element {
    match icon {
        NavIcon::Dashboard => rsx! { Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 } },
        NavIcon::Staff => rsx! { Icon::<LdUsers> { icon: LdUsers, width: 18, height: 18 } },
        NavIcon::Leave => rsx! { Icon::<LdPlaneTakeoff> { icon: LdPlaneTakeoff, width: 18, height: 18 } },
        NavIcon::Patient => rsx! { Icon::<LdClipboardList> { icon: LdClipboardList, width: 18, height: 18 } },
        NavIcon::Calendar => rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 18, height: 18 } },
        NavIcon::Invoice => rsx! { Icon::<LdReceipt> { icon: LdReceipt, width: 18, height: 18 } },
        NavIcon::Prescription => rsx! { Icon::<LdPill> { icon: LdPill, width: 18, height: 18 } },
        NavIcon::Equipment => rsx! { Icon::<LdMonitor> { icon: LdMonitor, width: 18, height: 18 } },
        NavIcon::Wrench => rsx! { Icon::<LdWrench> { icon: LdWrench, width: 18, height: 18 } },
        NavIcon::Notes => rsx! { Icon::<LdNotebookPen> { icon: LdNotebookPen, width: 18, height: 18 } },
    }
}
