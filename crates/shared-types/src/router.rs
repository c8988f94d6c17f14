use crate::navigation::{self, EntryId, NavigationEntry, RoleProfile, ViewKind};
use crate::role::Role;

/// In-page view selection for the dashboard shell.
///
/// The active entry is always one of the active role's entries. A router
/// without a role (nobody signed in, or an unknown role) has no active
/// entry at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewRouter {
    profile: Option<&'static RoleProfile>,
    active: Option<EntryId>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router already seeded for a role.
    pub fn for_role(role: &str) -> Self {
        let mut router = Self::new();
        router.on_role_change(role);
        router
    }

    /// Re-seed to the new role's default entry, whatever was active before.
    pub fn on_role_change(&mut self, role: &str) {
        self.profile = Role::parse(role).map(navigation::profile);
        self.active = self.profile.map(|p| p.default_entry);
    }

    /// Drop the role and the selection, e.g. after sign-out.
    pub fn clear(&mut self) {
        self.profile = None;
        self.active = None;
    }

    /// Activate `id` if the current role has it. Returns whether the active
    /// entry changed.
    pub fn select(&mut self, id: EntryId) -> bool {
        match self.profile {
            Some(p) if p.contains(id) => {
                let changed = self.active != Some(id);
                self.active = Some(id);
                changed
            }
            _ => false,
        }
    }

    pub fn active_entry_id(&self) -> Option<EntryId> {
        self.active
    }

    pub fn active_view(&self) -> Option<ViewKind> {
        let profile = self.profile?;
        let id = self.active?;
        profile.entry(id).map(|e| e.view)
    }

    pub fn active_entry(&self) -> Option<&'static NavigationEntry> {
        let profile = self.profile?;
        profile.entry(self.active?)
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.map(|p| p.role)
    }

    pub fn entries(&self) -> &'static [NavigationEntry] {
        self.profile.map(|p| p.entries).unwrap_or(&[])
    }
}
