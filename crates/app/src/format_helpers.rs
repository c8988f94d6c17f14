//! Shared formatting utilities for the UI layer.
//!
//! Dates arrive as `YYYY-MM-DD` or full ISO timestamps and are shown in
//! the day-first form the hospital staff use.

use shared_types::{
    parse_date, parse_date_time, EquipmentStatus, InvoiceStatus, LeaveStatus, MaintenanceStatus,
};
use shared_ui::BadgeVariant;

/// Format a date as "20/01/2026". Falls back to the raw value.
pub fn format_date(value: &str) -> String {
    parse_date(value)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Format a date-time as "20/01/2026 21:35". Falls back to date-only.
pub fn format_datetime(value: &str) -> String {
    match parse_date_time(value) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => format_date(value),
    }
}

/// Today's date in the `YYYY-MM-DD` shape date inputs use.
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Placeholder for empty table cells.
pub fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "\u{2014}".to_string()
    } else {
        value.to_string()
    }
}

pub fn invoice_badge(status: InvoiceStatus) -> BadgeVariant {
    match status {
        InvoiceStatus::Paid => BadgeVariant::Success,
        InvoiceStatus::Pending => BadgeVariant::Warning,
        InvoiceStatus::Cancelled => BadgeVariant::Destructive,
    }
}

pub fn leave_badge(status: LeaveStatus) -> BadgeVariant {
    match status {
        LeaveStatus::Pending => BadgeVariant::Warning,
        LeaveStatus::Approved => BadgeVariant::Success,
        LeaveStatus::Rejected => BadgeVariant::Destructive,
    }
}

pub fn equipment_badge(status: EquipmentStatus) -> BadgeVariant {
    match status {
        EquipmentStatus::Active => BadgeVariant::Success,
        EquipmentStatus::Inactive => BadgeVariant::Secondary,
        EquipmentStatus::InMaintenance => BadgeVariant::Warning,
    }
}

pub fn maintenance_badge(status: MaintenanceStatus) -> BadgeVariant {
    match status {
        MaintenanceStatus::Pending => BadgeVariant::Warning,
        MaintenanceStatus::Completed => BadgeVariant::Success,
    }
}
