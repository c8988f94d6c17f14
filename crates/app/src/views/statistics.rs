use dioxus::prelude::*;
use shared_ui::components::{
    Button, ButtonVariant, Card, CardContent, PageActions, PageHeader, PageTitle, Skeleton, StatCard,
};

use crate::use_hospital;

/// Counters dashboard for administrators and secretaries.
#[component]
pub fn StatisticsView() -> Element {
    let ctx = use_hospital();
    let mut stats = use_resource(move || async move { ctx.client().statistics().await });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { subtitle: "Hospital activity at a glance".to_string(), "Dashboard" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| stats.restart(),
                        "Refresh"
                    }
                }
            }

            match &*stats.read() {
                Some(Ok(stats)) => {
                    let cards = stats.cards();
                    let staff = stats.total_staff();
                    rsx! {
                        p { class: "stat-summary", "{staff} staff members on record" }
                        div { class: "stat-grid",
                            for card in cards {
                                StatCard {
                                    key: "{card.label}",
                                    label: card.label.to_string(),
                                    value: card.value,
                                    percent: f64::from(card.percent),
                                }
                            }
                        }
                    }
                }
                Some(Err(e)) => {
                    let message = e.friendly_message();
                    rsx! {
                        Card {
                            CardContent {
                                p { class: "view-error", "{message}" }
                            }
                        }
                    }
                }
                None => rsx! {
                    div { class: "stat-grid",
                        for i in 0..8 {
                            Skeleton { key: "{i}", class: "stat-skeleton" }
                        }
                    }
                },
            }
        }
    }
}
