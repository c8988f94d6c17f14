//! Role registry: which navigation entries each role sees, which entry a
//! role lands on, and which view each entry mounts.
//!
//! The tables are static. Lookups are pure and never fail for a typed
//! [`Role`]; the string-keyed helpers exist for the boundary where the role
//! still arrives as an untrusted backend string.

use crate::error::UnknownRoleError;
use crate::role::Role;

/// Navigation entry identifiers, unique within a role's entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryId {
    Dashboard,
    Users,
    Leave,
    Patients,
    Appointments,
    Invoices,
    Prescriptions,
    Equipment,
    Maintenance,
    Observations,
}

impl EntryId {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryId::Dashboard => "dashboard",
            EntryId::Users => "users",
            EntryId::Leave => "leave",
            EntryId::Patients => "patients",
            EntryId::Appointments => "appointments",
            EntryId::Invoices => "invoices",
            EntryId::Prescriptions => "prescriptions",
            EntryId::Equipment => "equipment",
            EntryId::Maintenance => "maintenance",
            EntryId::Observations => "observations",
        }
    }
}

/// Symbolic icon reference. The UI maps these to concrete icon components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Dashboard,
    Staff,
    Leave,
    Patient,
    Calendar,
    Invoice,
    Prescription,
    Equipment,
    Wrench,
    Notes,
}

/// The concrete view mounted for a navigation entry.
///
/// The same entry id can mount different views for different roles: a
/// secretary manages patients while a nurse only consults the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Statistics,
    StaffDirectory,
    LeaveApproval,
    LeaveRequests,
    PatientRecords,
    PatientRoster,
    AppointmentBook,
    AppointmentSchedule,
    Invoices,
    Prescriptions,
    Equipment,
    Maintenance,
    Observations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationEntry {
    pub id: EntryId,
    pub label: &'static str,
    pub icon: NavIcon,
    pub view: ViewKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleProfile {
    pub role: Role,
    pub entries: &'static [NavigationEntry],
    pub default_entry: EntryId,
}

impl RoleProfile {
    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn entry(&self, id: EntryId) -> Option<&'static NavigationEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

const fn entry(id: EntryId, label: &'static str, icon: NavIcon, view: ViewKind) -> NavigationEntry {
    NavigationEntry {
        id,
        label,
        icon,
        view,
    }
}

static ADMIN: RoleProfile = RoleProfile {
    role: Role::Admin,
    entries: &[
        entry(EntryId::Dashboard, "Dashboard", NavIcon::Dashboard, ViewKind::Statistics),
        entry(EntryId::Users, "Staff", NavIcon::Staff, ViewKind::StaffDirectory),
        entry(EntryId::Leave, "Leave Approval", NavIcon::Leave, ViewKind::LeaveApproval),
    ],
    default_entry: EntryId::Dashboard,
};

static SECRETARY: RoleProfile = RoleProfile {
    role: Role::Secretary,
    entries: &[
        entry(EntryId::Dashboard, "Dashboard", NavIcon::Dashboard, ViewKind::Statistics),
        entry(EntryId::Patients, "Patients", NavIcon::Patient, ViewKind::PatientRecords),
        entry(EntryId::Appointments, "Appointments", NavIcon::Calendar, ViewKind::AppointmentBook),
        entry(EntryId::Invoices, "Invoices", NavIcon::Invoice, ViewKind::Invoices),
        entry(EntryId::Leave, "Leave Requests", NavIcon::Leave, ViewKind::LeaveRequests),
    ],
    default_entry: EntryId::Dashboard,
};

static PHYSICIAN: RoleProfile = RoleProfile {
    role: Role::Physician,
    entries: &[
        entry(EntryId::Appointments, "Appointments", NavIcon::Calendar, ViewKind::AppointmentSchedule),
        entry(EntryId::Prescriptions, "Prescriptions", NavIcon::Prescription, ViewKind::Prescriptions),
    ],
    default_entry: EntryId::Appointments,
};

static TECHNICIAN: RoleProfile = RoleProfile {
    role: Role::Technician,
    entries: &[
        entry(EntryId::Equipment, "Equipment", NavIcon::Equipment, ViewKind::Equipment),
        entry(EntryId::Maintenance, "Maintenance", NavIcon::Wrench, ViewKind::Maintenance),
    ],
    default_entry: EntryId::Equipment,
};

static NURSE: RoleProfile = RoleProfile {
    role: Role::Nurse,
    entries: &[
        entry(EntryId::Patients, "Patients", NavIcon::Patient, ViewKind::PatientRoster),
        entry(EntryId::Observations, "Observations", NavIcon::Notes, ViewKind::Observations),
    ],
    default_entry: EntryId::Patients,
};

/// The role profile for a typed role.
pub fn profile(role: Role) -> &'static RoleProfile {
    match role {
        Role::Admin => &ADMIN,
        Role::Secretary => &SECRETARY,
        Role::Physician => &PHYSICIAN,
        Role::Technician => &TECHNICIAN,
        Role::Nurse => &NURSE,
    }
}

/// Navigation entries for a role string. Unknown roles get no entries.
pub fn entries_for(role: &str) -> &'static [NavigationEntry] {
    Role::parse(role).map(|r| profile(r).entries).unwrap_or(&[])
}

/// The entry a role lands on after login.
pub fn default_entry_for(role: &str) -> Result<EntryId, UnknownRoleError> {
    Role::parse(role)
        .map(|r| profile(r).default_entry)
        .ok_or_else(|| UnknownRoleError {
            role: role.to_string(),
        })
}

/// The view an entry mounts for a role, if the role has that entry.
pub fn view_for(role: Role, id: EntryId) -> Option<ViewKind> {
    profile(role).entry(id).map(|e| e.view)
}
