use pretty_assertions::assert_eq;
use shared_types::{default_entry_for, EntryId, ViewKind, ViewRouter};

use crate::common::{self, MockBackend};

#[tokio::test]
async fn test_each_role_lands_on_its_default_view() {
    let backend = MockBackend::start().await;
    let cases = [
        (common::ADMIN, EntryId::Dashboard, ViewKind::Statistics),
        (common::SECRETARY, EntryId::Dashboard, ViewKind::Statistics),
        (common::PHYSICIAN, EntryId::Appointments, ViewKind::AppointmentSchedule),
        (common::TECHNICIAN, EntryId::Equipment, ViewKind::Equipment),
        (common::NURSE, EntryId::Patients, ViewKind::PatientRoster),
    ];

    for (email, entry, view) in cases {
        let api = backend.signed_in(email).await;
        let user = api.session().user().expect("Profile after login");
        let router = ViewRouter::for_role(&user.role);

        assert_eq!(router.active_entry_id(), Some(entry), "{email}");
        assert_eq!(router.active_view(), Some(view), "{email}");
    }
}

#[tokio::test]
async fn test_unknown_role_gets_no_dashboard() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::INTERN).await;
    let user = api.session().user().expect("Profile after login");

    let router = ViewRouter::for_role(&user.role);

    assert_eq!(router.role(), None);
    assert!(router.entries().is_empty());
    assert_eq!(router.active_view(), None);
    let err = default_entry_for(&user.role).unwrap_err();
    assert_eq!(err.to_string(), "No dashboard available for role 'stagiaire'");
}

#[tokio::test]
async fn test_entries_outside_the_role_cannot_be_selected() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::NURSE).await;
    let user = api.session().user().expect("Profile after login");
    let mut router = ViewRouter::for_role(&user.role);

    assert!(!router.select(EntryId::Invoices));
    assert_eq!(router.active_entry_id(), Some(EntryId::Patients));

    assert!(router.select(EntryId::Observations));
    assert_eq!(router.active_view(), Some(ViewKind::Observations));
    assert!(!router.select(EntryId::Observations), "Reselecting is not a change");
}

#[tokio::test]
async fn test_next_sign_in_reseeds_the_router() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut router = ViewRouter::for_role(&api.session().user().expect("Profile").role);
    router.select(EntryId::Invoices);

    api.session().end_session();
    router.clear();
    assert_eq!(router.active_entry_id(), None);

    let next = backend.signed_in(common::TECHNICIAN).await;
    router.on_role_change(&next.session().user().expect("Profile").role);
    assert_eq!(router.active_entry_id(), Some(EntryId::Equipment));
    let labels: Vec<&str> = router.entries().iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["Equipment", "Maintenance"]);
}
