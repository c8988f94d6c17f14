use pretty_assertions::assert_eq;
use shared_types::{
    AppErrorKind, CrudView, FollowUp, LoadState, Modal, Mutation, NoticeKind, Patient,
    PatientColumn,
};

use crate::common::{self, MockBackend};

fn names(view: &CrudView<Patient>) -> Vec<String> {
    view.page().rows.iter().map(|p| p.last_name.clone()).collect()
}

#[tokio::test]
async fn test_patient_list_reads_paginated_envelope() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<Patient> = CrudView::new();

    assert!(common::load(&mut view, &api).await);

    assert_eq!(view.state(), &LoadState::Ready);
    assert_eq!(view.records().len(), 3);
    let first = view.find(1).expect("Patient 1");
    assert_eq!(first.full_name(), "Nadia Alaoui");
    assert!(first.hospitalized);
    assert!(!view.find(3).expect("Patient 3").hospitalized, "0 reads as false");
    assert_eq!(view.find(2).expect("Patient 2").email, "", "null reads as empty");
}

#[tokio::test]
async fn test_search_matches_name_email_and_phone() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<Patient> = CrudView::new();
    common::load(&mut view, &api).await;

    view.set_search("ALAOUI");
    assert_eq!(names(&view), vec!["Alaoui"]);

    view.set_search("0622");
    assert_eq!(names(&view), vec!["Bennani"]);

    view.set_search("salma.c@");
    assert_eq!(names(&view), vec!["Chraibi"]);

    view.set_search("nobody");
    let page = view.page();
    assert!(page.is_empty());
    assert_eq!(page.total, 3);

    view.set_search("");
    assert_eq!(view.page().filtered, 3);
}

#[tokio::test]
async fn test_sorting_by_name_toggles_direction() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::NURSE).await;
    let mut view: CrudView<Patient> = CrudView::new();
    common::load(&mut view, &api).await;

    view.query.toggle_sort(PatientColumn::Name);
    assert_eq!(names(&view), vec!["Alaoui", "Bennani", "Chraibi"]);

    view.query.toggle_sort(PatientColumn::Name);
    assert_eq!(names(&view), vec!["Chraibi", "Bennani", "Alaoui"]);
}

#[tokio::test]
async fn test_small_pages_split_the_list() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<Patient> = CrudView::with_page_size(2);
    common::load(&mut view, &api).await;
    view.query.toggle_sort(PatientColumn::Name);

    let page = view.page();
    assert_eq!(page.page_count, 2);
    assert!(page.has_next());

    view.query.set_page(2);
    assert_eq!(names(&view), vec!["Chraibi"]);

    view.query.set_page(9);
    assert_eq!(view.page().page, 2, "Out-of-range pages clamp to the last one");
}

#[tokio::test]
async fn test_create_patient_posts_form_and_reloads() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<Patient> = CrudView::new();
    common::load(&mut view, &api).await;

    view.open_create();
    {
        let form = view.form_mut().expect("Create form is open");
        form.last_name = "Drissi".into();
        form.first_name = "Hamza".into();
        form.birth_date = "2001-11-30".into();
        form.phone = "0644556677".into();
    }
    let mutation = view.submit().expect("Form is valid");
    assert!(matches!(mutation, Mutation::Create(_)));
    assert!(view.is_saving());

    let follow_up = common::settle(&mut view, &api, mutation).await;

    assert_eq!(follow_up, FollowUp::Reload);
    assert_eq!(view.records().len(), 4);
    assert_eq!(view.modal(), &Modal::Closed);
    assert!(!view.is_saving());
    let notice = view.notice().expect("Success notice");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, "Patient created");

    let post = backend
        .requests()
        .into_iter()
        .find(|r| r.method == "POST" && r.path == "patients")
        .expect("POST /patients was sent");
    let body = post.body.expect("Create has a body");
    assert_eq!(body["nom"], "Drissi");
    assert_eq!(body["date_naissance"], "2001-11-30");
    assert_eq!(body["hospitalise"], false);
}

#[tokio::test]
async fn test_missing_name_is_rejected_before_any_request() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<Patient> = CrudView::new();
    common::load(&mut view, &api).await;
    let before = backend.request_count();

    view.open_create();
    view.form_mut().expect("Create form is open").first_name = "Hamza".into();
    let err = view.submit().unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(err.field_errors["last_name"], "Last name is required");
    assert!(matches!(view.modal(), Modal::Create(_)), "Form stays open for correction");
    assert_eq!(view.notice().expect("Error notice").kind, NoticeKind::Error);
    assert!(!view.is_saving());
    assert_eq!(backend.request_count(), before);
}

#[tokio::test]
async fn test_edit_patient_updates_backend_record() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<Patient> = CrudView::new();
    common::load(&mut view, &api).await;

    assert!(view.open_edit(2));
    assert_eq!(view.form().expect("Edit form").last_name, "Bennani");
    view.form_mut().expect("Edit form").phone = "0700000000".into();
    let mutation = view.submit().expect("Form is valid");
    assert!(matches!(mutation, Mutation::Update { id: 2, .. }));

    common::settle(&mut view, &api, mutation).await;

    assert_eq!(view.notice().expect("Notice").text, "Patient updated");
    assert_eq!(view.find(2).expect("Patient 2").phone, "0700000000");
    let stored = backend.record("patients", 2).expect("Patient 2 stored");
    assert_eq!(stored["telephone"], "0700000000");
}

#[tokio::test]
async fn test_failed_save_keeps_form_open() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<Patient> = CrudView::new();
    common::load(&mut view, &api).await;
    backend.fail("PUT", "patients/1");

    view.open_edit(1);
    view.form_mut().expect("Edit form").address = "1 place de la Gare".into();
    let mutation = view.submit().expect("Form is valid");
    let follow_up = common::settle(&mut view, &api, mutation).await;

    assert_eq!(follow_up, FollowUp::Nothing);
    assert!(matches!(view.modal(), Modal::Edit { id: 1, .. }));
    assert_eq!(view.notice().expect("Error notice").text, "Database unavailable");
    assert!(!view.is_saving(), "The form can be submitted again");
}
