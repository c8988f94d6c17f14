//! One component per [`ViewKind`](shared_types::ViewKind) the shell can mount.

pub mod crud;
pub mod pickers;

mod appointments;
mod equipment;
mod invoices;
mod leave;
mod maintenance;
mod observations;
mod patients;
mod prescriptions;
mod staff;
mod statistics;

pub use appointments::{AppointmentBookView, AppointmentScheduleView};
pub use equipment::EquipmentView;
pub use invoices::InvoicesView;
pub use leave::{LeaveApprovalView, LeaveRequestsView};
pub use maintenance::MaintenanceView;
pub use observations::ObservationsView;
pub use patients::{PatientRecordsView, PatientRosterView};
pub use prescriptions::PrescriptionsView;
pub use staff::StaffDirectoryView;
pub use statistics::StatisticsView;
