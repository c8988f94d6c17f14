use client::ApiClient;
use pretty_assertions::assert_eq;
use shared_types::{
    AppErrorKind, CrudView, Equipment, LoadState, MaintenanceForm, MaintenanceStatus,
    MaintenanceTicket, StatusFilter, Transition,
};

use std::time::Duration;

use crate::common::{self, MockBackend};

async fn load_linked(view: &mut CrudView<MaintenanceTicket>, api: &ApiClient) -> bool {
    common::load_with(view, async {
        api.list_linked::<MaintenanceTicket, Equipment>()
            .await
            .map(|(tickets, _)| tickets)
    })
    .await
}

#[tokio::test]
async fn test_tickets_are_linked_to_their_equipment() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;

    let (tickets, equipment) = api
        .list_linked::<MaintenanceTicket, Equipment>()
        .await
        .expect("Both lists load");

    assert_eq!(equipment.len(), 2);
    assert_eq!(tickets[0].equipment_name(), "Défibrillateur");
    assert_eq!(tickets[0].serial_number(), "SN-200");
    assert_eq!(tickets[1].equipment_name(), "Scanner");
}

#[tokio::test]
async fn test_view_stays_loading_until_equipment_arrives() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    backend.delay("GET", "equipments", Duration::from_millis(500));
    let mut view: CrudView<MaintenanceTicket> = CrudView::new();

    let ticket = view.begin_load();
    let fetch = api.list_linked::<MaintenanceTicket, Equipment>();
    tokio::pin!(fetch);
    let early = tokio::time::timeout(Duration::from_millis(150), &mut fetch).await;

    assert!(early.is_err(), "Equipment is still in flight");
    assert_eq!(view.state(), &LoadState::Loading);
    assert!(view.records().is_empty());
    let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    assert!(paths.contains(&"maintenance-requests".to_string()), "Tickets already answered");

    let result = fetch.await.map(|(tickets, _)| tickets);
    assert!(view.finish_load(ticket, result));
    assert_eq!(view.state(), &LoadState::Ready);
    assert_eq!(view.records()[0].equipment_name(), "Défibrillateur");
}

#[tokio::test]
async fn test_search_reaches_linked_serial_numbers() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    let mut view: CrudView<MaintenanceTicket> = CrudView::new();
    load_linked(&mut view, &api).await;

    view.set_search("sn-100");
    let ids: Vec<i64> = view.page().rows.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn test_status_filter_narrows_the_list() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    let mut view: CrudView<MaintenanceTicket> = CrudView::new();
    load_linked(&mut view, &api).await;

    let pending = StatusFilter::parse("pending");
    let page = view.page_with(|t| pending.keeps(t));
    assert_eq!(page.filtered, 1);
    assert_eq!(page.total, 2);
    assert_eq!(page.rows[0].id, 1);

    let all = StatusFilter::parse("all");
    assert_eq!(view.page_with(|t| all.keeps(t)).filtered, 2);
}

#[tokio::test]
async fn test_completion_waits_for_the_backend() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    let mut view: CrudView<MaintenanceTicket> = CrudView::new();
    load_linked(&mut view, &api).await;

    let mutation = view
        .begin_transition(1, Transition::Complete, false)
        .expect("Pending ticket can be completed");
    assert_eq!(view.find(1).expect("Ticket 1").status, MaintenanceStatus::Pending);
    assert!(view.is_pending(1));

    let result = api.execute::<MaintenanceTicket>(&mutation).await;
    view.finish_mutation(&mutation, result);
    load_linked(&mut view, &api).await;

    let ticket = view.find(1).expect("Ticket 1");
    assert_eq!(ticket.status, MaintenanceStatus::Completed);
    assert_eq!(ticket.equipment_name(), "Défibrillateur", "Reload keeps the link");
    assert_eq!(view.notice().expect("Notice").text, "Maintenance request completed");
    assert_eq!(
        backend.requests().iter().filter(|r| r.method == "PUT").count(),
        1
    );
    assert_eq!(view.begin_transition(1, Transition::Complete, false), None);
}

#[tokio::test]
async fn test_new_ticket_requires_equipment() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    let mut view: CrudView<MaintenanceTicket> = CrudView::new();
    load_linked(&mut view, &api).await;

    view.open_create_with(MaintenanceForm {
        equipment_id: None,
        description: "Écran fissuré".into(),
        status: MaintenanceStatus::Pending,
    });
    let err = view.submit().unwrap_err();
    assert_eq!(err.message, "Equipment is required");

    view.form_mut().expect("Form still open").equipment_id = Some(1);
    let mutation = view.submit().expect("Form is valid");
    let result = api.execute::<MaintenanceTicket>(&mutation).await;
    view.finish_mutation(&mutation, result);
    load_linked(&mut view, &api).await;

    let created = view.find(100).expect("New ticket listed");
    assert_eq!(created.equipment_name(), "Scanner");
    assert_eq!(created.status, MaintenanceStatus::Pending);
}

#[tokio::test]
async fn test_equipment_failure_fails_the_whole_load() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::TECHNICIAN).await;
    backend.fail("GET", "equipments");
    let mut view: CrudView<MaintenanceTicket> = CrudView::new();

    load_linked(&mut view, &api).await;

    let LoadState::Error(err) = view.state() else {
        panic!("Expected an error state, got {:?}", view.state());
    };
    assert_eq!(err.kind, AppErrorKind::InternalError);
    assert!(view.records().is_empty(), "No partial list is shown");
}
