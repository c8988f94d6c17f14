use dioxus::prelude::*;

/// Scrollable table wrapper with co-located styles.
#[component]
pub fn DataTable(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table {
                {children}
            }
        }
    }
}

/// Table header section. Wraps `th` elements in a `thead > tr`.
#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead {
            tr { {children} }
        }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

/// Sort indicator for a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnSort {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl ColumnSort {
    pub fn arrow(&self) -> &'static str {
        match self {
            ColumnSort::Unsorted => "\u{21C5}",
            ColumnSort::Ascending => "\u{2191}",
            ColumnSort::Descending => "\u{2193}",
        }
    }

    fn aria(&self) -> &'static str {
        match self {
            ColumnSort::Unsorted => "none",
            ColumnSort::Ascending => "ascending",
            ColumnSort::Descending => "descending",
        }
    }
}

/// Column header cell. With `on_sort` the header becomes a sort toggle.
#[component]
pub fn DataTableColumn(
    #[props(default)] sort: ColumnSort,
    #[props(default)] on_sort: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    match on_sort {
        Some(handler) => rsx! {
            th { class: "sortable", "aria-sort": sort.aria(),
                button {
                    class: "data-table-sort",
                    r#type: "button",
                    onclick: move |evt| handler.call(evt),
                    {children}
                    span {
                        class: "data-table-sort-arrow",
                        "data-active": if sort == ColumnSort::Unsorted { "false" } else { "true" },
                        {sort.arrow()}
                    }
                }
            }
        },
        None => rsx! {
            th { {children} }
        },
    }
}

/// Table row. `pending` dims the row while an action on it is in flight.
#[component]
pub fn DataTableRow(
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    #[props(default = false)] pending: bool,
    children: Element,
) -> Element {
    let has_click = onclick.is_some();
    rsx! {
        tr {
            class: if has_click { "data-table-row clickable" } else { "data-table-row" },
            "data-pending": if pending { "true" } else { "false" },
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn DataTableCell(children: Element) -> Element {
    rsx! {
        td { {children} }
    }
}

/// Right-aligned cell holding row action buttons.
#[component]
pub fn DataTableActions(children: Element) -> Element {
    rsx! {
        td { class: "data-table-actions",
            div { class: "data-table-actions-inner", {children} }
        }
    }
}

/// Full-width row shown when there is nothing to list.
#[component]
pub fn DataTableEmpty(colspan: u32, children: Element) -> Element {
    rsx! {
        tr { class: "data-table-empty",
            td { colspan: "{colspan}", {children} }
        }
    }
}
