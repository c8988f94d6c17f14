use pretty_assertions::assert_eq;
use shared_types::{
    AppErrorKind, CrudView, Equipment, EquipmentColumn, EquipmentForm, EquipmentStatus, FollowUp,
    LoadState, Modal, Mutation, NoticeKind,
};

use crate::common::{self, MockBackend};

#[tokio::test]
async fn test_fetch_failure_puts_view_in_error_state() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    backend.fail("GET", "equipments");
    let mut view: CrudView<Equipment> = CrudView::new();

    common::load(&mut view, &api).await;

    let LoadState::Error(err) = view.state() else {
        panic!("Expected an error state, got {:?}", view.state());
    };
    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert!(view.records().is_empty());
    assert!(!view.is_loading());
    let notice = view.notice().expect("Error notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Database unavailable");

    view.open_create();
    assert!(matches!(view.modal(), Modal::Create(_)), "Create stays available after a failed load");
}

#[tokio::test]
async fn test_retry_after_failure_recovers() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    backend.fail("GET", "equipments");
    let mut view: CrudView<Equipment> = CrudView::new();
    common::load(&mut view, &api).await;

    backend.recover();
    common::load(&mut view, &api).await;

    assert_eq!(view.state(), &LoadState::Ready);
    assert_eq!(view.records().len(), 2);
}

#[tokio::test]
async fn test_stale_load_result_is_dropped() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    let mut view: CrudView<Equipment> = CrudView::new();

    let stale = view.begin_load();
    let current = view.begin_load();
    let fresh = api.list::<Equipment>().await;

    assert!(!view.finish_load(stale, Ok(Vec::new())));
    assert!(view.is_loading());
    assert!(view.finish_load(current, fresh));
    assert_eq!(view.records().len(), 2);
}

#[tokio::test]
async fn test_equipment_fields_and_sorting() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    let mut view: CrudView<Equipment> = CrudView::new();
    common::load(&mut view, &api).await;

    let defib = view.find(2).expect("Equipment 2");
    assert_eq!(defib.status, EquipmentStatus::InMaintenance);
    assert_eq!(defib.last_maintenance, None);
    assert_eq!(defib.label(), "Défibrillateur (SN-200)");

    view.query.toggle_sort(EquipmentColumn::LastMaintenance);
    let order: Vec<i64> = view.page().rows.iter().map(|e| e.id).collect();
    assert_eq!(order, vec![2, 1], "Never-serviced equipment sorts first");
}

#[tokio::test]
async fn test_delete_needs_acknowledgement() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    let mut view: CrudView<Equipment> = CrudView::new();
    common::load(&mut view, &api).await;
    let before = backend.request_count();

    assert!(view.open_delete(1));
    assert_eq!(view.confirm_delete(), None, "Unacknowledged delete is refused");
    assert_eq!(backend.request_count(), before);

    view.acknowledge_delete(true);
    let mutation = view.confirm_delete().expect("Acknowledged delete proceeds");
    assert_eq!(mutation, Mutation::Delete { id: 1 });

    let follow_up = common::settle(&mut view, &api, mutation).await;

    assert_eq!(follow_up, FollowUp::Nothing);
    assert_eq!(view.find(1), None);
    assert_eq!(view.records().len(), 1);
    assert_eq!(view.modal(), &Modal::Closed);
    assert_eq!(view.notice().expect("Notice").text, "Equipment deleted");
    assert_eq!(backend.count("equipments"), 1);
}

#[tokio::test]
async fn test_failed_delete_keeps_the_record() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    let mut view: CrudView<Equipment> = CrudView::new();
    common::load(&mut view, &api).await;
    backend.fail("DELETE", "equipments/2");

    view.open_delete(2);
    view.acknowledge_delete(true);
    let mutation = view.confirm_delete().expect("Acknowledged delete proceeds");
    common::settle(&mut view, &api, mutation).await;

    assert!(view.find(2).is_some());
    assert_eq!(view.modal(), &Modal::Closed);
    assert_eq!(view.notice().expect("Error notice").kind, NoticeKind::Error);
    assert_eq!(backend.count("equipments"), 2);
}

#[tokio::test]
async fn test_invalid_maintenance_date_is_rejected() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    let mut view: CrudView<Equipment> = CrudView::new();
    common::load(&mut view, &api).await;
    let before = backend.request_count();

    view.open_create_with(EquipmentForm {
        name: "Échographe".into(),
        kind: "Imagerie".into(),
        status: EquipmentStatus::Active,
        last_maintenance: "15/01/2024".into(),
    });
    let err = view.submit().unwrap_err();

    assert_eq!(err.field_errors["last_maintenance"], "Last maintenance is not a valid date");
    assert_eq!(backend.request_count(), before);

    view.form_mut().expect("Form still open").last_maintenance = "2024-01-15".into();
    let mutation = view.submit().expect("Corrected form is valid");
    common::settle(&mut view, &api, mutation).await;
    let stored = backend.record("equipments", 100).expect("New equipment");
    assert_eq!(stored["type"], "Imagerie");
    assert_eq!(stored["status"], "actif");
}
