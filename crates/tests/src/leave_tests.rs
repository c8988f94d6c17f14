use client::ApiClient;
use pretty_assertions::assert_eq;
use shared_types::{
    AppErrorKind, CrudView, Employee, LeaveForm, LeaveRequest, LeaveStatus, LeaveType, LoadState, Mutation,
    NoticeKind, Transition,
};

use crate::common::{self, MockBackend};

async fn load_joined(view: &mut CrudView<LeaveRequest>, api: &ApiClient) -> bool {
    common::load_with(view, async {
        api.list_joined::<LeaveRequest, Employee>("users/conge")
            .await
            .map(|(requests, _)| requests)
    })
    .await
}

#[tokio::test]
async fn test_leave_list_joins_employee_names() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;

    let (requests, employees) = api
        .list_joined::<LeaveRequest, Employee>("users/conge")
        .await
        .expect("Both lists load");

    assert_eq!(employees.len(), 5, "Administrators take no leave");
    assert_eq!(requests[0].employee_name(), "Sara Idrissi");
    assert_eq!(requests[1].employee_name(), "Leila Mansouri");
    assert_eq!(requests[0].days(), Some(5));
    assert_eq!(requests[1].kind, LeaveType::Sick);
    assert_eq!(requests[1].reason, "");

    let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    assert!(paths.contains(&"conges".to_string()));
    assert!(paths.contains(&"users/conge".to_string()));
}

#[tokio::test]
async fn test_reversed_date_range_is_rejected_before_any_request() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<LeaveRequest> = CrudView::new();
    load_joined(&mut view, &api).await;
    let before = backend.request_count();

    view.open_create_with(LeaveForm {
        user_id: Some(3),
        start_date: "2024-09-10".into(),
        end_date: "2024-09-01".into(),
        kind: LeaveType::Annual,
        ..Default::default()
    });
    let err = view.submit().unwrap_err();

    assert_eq!(err.message, "End date must be on or after the start date");
    assert_eq!(err.field_errors["date_fin"], err.message);
    assert_eq!(backend.request_count(), before);
    assert_eq!(backend.count("conges"), 2);
}

#[tokio::test]
async fn test_secretary_files_a_leave_request() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<LeaveRequest> = CrudView::new();
    load_joined(&mut view, &api).await;

    view.open_create_with(LeaveForm {
        user_id: Some(4),
        start_date: "2024-09-01".into(),
        end_date: "2024-09-01".into(),
        kind: LeaveType::Exceptional,
        reason: "Déménagement".into(),
        status: LeaveStatus::Pending,
    });
    let mutation = view.submit().expect("Single-day leave is valid");
    let result = api.execute::<LeaveRequest>(&mutation).await;
    view.finish_mutation(&mutation, result);
    load_joined(&mut view, &api).await;

    assert_eq!(view.records().len(), 3);
    let filed = view
        .records()
        .iter()
        .find(|r| r.user_id == Some(4))
        .expect("New request is listed");
    assert_eq!(filed.employee_name(), "Youssef Amrani");
    assert_eq!(filed.days(), Some(1));
    let stored = backend.record("conges", 100).expect("Stored under a new id");
    assert_eq!(stored["type"], "exceptionnel");
    assert_eq!(stored["statut"], "en attente");
}

#[tokio::test]
async fn test_approval_is_optimistic_and_confirmed_by_reload() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<LeaveRequest> = CrudView::new();
    common::load(&mut view, &api).await;

    let mutation = view
        .begin_transition(1, Transition::Approve, true)
        .expect("Pending request can be approved");
    assert_eq!(view.find(1).expect("Request 1").status, LeaveStatus::Approved);
    assert!(view.is_pending(1));
    assert_eq!(view.begin_transition(1, Transition::Reject, true), None, "One action per row at a time");

    let result = api.execute::<LeaveRequest>(&mutation).await;
    view.finish_mutation(&mutation, result);
    common::load(&mut view, &api).await;

    assert!(!view.is_pending(1));
    assert_eq!(view.find(1).expect("Request 1").status, LeaveStatus::Approved);
    assert_eq!(view.notice().expect("Notice").text, "Leave request approved");
    let stored = backend.record("conges", 1).expect("Request 1");
    assert_eq!(stored["statut"], "accepté");
}

#[tokio::test]
async fn test_failed_approval_is_rolled_back_by_reload() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<LeaveRequest> = CrudView::new();
    common::load(&mut view, &api).await;
    backend.fail("PUT", "conges/1/reject");

    let mutation = view
        .begin_transition(1, Transition::Reject, true)
        .expect("Pending request can be rejected");
    assert_eq!(view.find(1).expect("Request 1").status, LeaveStatus::Rejected);

    let result = api.execute::<LeaveRequest>(&mutation).await;
    assert!(result.is_err());
    view.finish_mutation(&mutation, result);
    common::load(&mut view, &api).await;

    assert_eq!(view.find(1).expect("Request 1").status, LeaveStatus::Pending);
    let notice = view.notice().expect("Error notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Database unavailable");
}

#[tokio::test]
async fn test_settled_requests_cannot_transition() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<LeaveRequest> = CrudView::new();
    common::load(&mut view, &api).await;
    let before = backend.request_count();

    assert_eq!(view.begin_transition(2, Transition::Reject, true), None);
    assert_eq!(view.begin_transition(1, Transition::Complete, true), None);
    assert_eq!(view.find(2).expect("Request 2").status, LeaveStatus::Approved);
    assert_eq!(backend.request_count(), before);
}

#[tokio::test]
async fn test_approval_list_does_not_depend_on_employee_lookup() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    backend.fail("GET", "users/conge");
    let mut view: CrudView<LeaveRequest> = CrudView::new();

    assert!(common::load(&mut view, &api).await);

    assert_eq!(view.state(), &LoadState::Ready);
    assert_eq!(view.records().len(), 2);
    assert_eq!(view.find(1).expect("Request 1").employee_name(), "Sara Idrissi");
    let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    assert!(!paths.contains(&"users/conge".to_string()));
}

#[tokio::test]
async fn test_leave_list_fails_when_employee_lookup_fails() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    backend.fail("GET", "users/conge");
    let mut view: CrudView<LeaveRequest> = CrudView::new();

    load_joined(&mut view, &api).await;

    assert!(matches!(view.state(), LoadState::Error(_)));
    assert!(view.records().is_empty());
    assert_eq!(view.notice().expect("Error notice").text, "Database unavailable");
}

#[tokio::test]
async fn test_transition_on_unknown_request_is_not_found() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;

    let err = api
        .execute::<LeaveRequest>(&Mutation::Transition {
            id: 99,
            transition: Transition::Approve,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(backend.last_request().map(|r| r.path), Some("conges/99/approve".to_string()));
}
