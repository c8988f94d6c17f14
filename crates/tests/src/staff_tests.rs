use pretty_assertions::assert_eq;
use shared_types::{
    head_counts, Credentials, CrudView, EntryId, FollowUp, Modal, Mutation, Role, StaffUser,
    UserForm, ViewRouter,
};

use crate::common::{self, MockBackend};

fn nurse_form(email: &str) -> UserForm {
    UserForm {
        name: "Rachid Ouali".into(),
        email: email.into(),
        password: "motdepasse".into(),
        role: "infirmier".into(),
        specialty: Some("Gériatrie".into()),
    }
}

#[tokio::test]
async fn test_staff_directory_lists_every_account() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<StaffUser> = CrudView::new();

    common::load(&mut view, &api).await;

    assert_eq!(view.records().len(), 6);
    assert_eq!(view.find(2).expect("User 2").role_label(), "Physician");
    assert_eq!(view.find(6).expect("User 6").role_label(), "stagiaire", "Unknown roles show raw");

    view.set_search("urgences");
    let page = view.page();
    assert_eq!(page.filtered, 1, "Specialty is searchable");
    assert_eq!(page.rows[0].name, "Leila Mansouri");
}

#[tokio::test]
async fn test_head_counts_span_every_page_of_the_search() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<StaffUser> = CrudView::new();
    common::load(&mut view, &api).await;
    view.query.page_size = 2;

    view.set_search("hospital.org");
    let matching = view.matching_with(|_| true);
    let counts = head_counts(matching.iter().copied());

    assert_eq!(view.page().rows.len(), 2);
    assert_eq!(matching.len(), 6);
    assert!(counts.iter().all(|(_, n)| *n == 1), "{counts:?}");

    let physicians = view.matching_with(|u| Role::parse(&u.role) == Some(Role::Physician));
    assert_eq!(head_counts(physicians.iter().copied())[1], (Role::Physician, 1));
}

#[tokio::test]
async fn test_duplicate_email_is_caught_before_sending() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<StaffUser> = CrudView::new();
    common::load(&mut view, &api).await;
    let before = backend.request_count();

    view.open_create_with(nurse_form("S.IDRISSI@hospital.org"));
    let err = view.submit().unwrap_err();

    assert_eq!(err.field_errors["email"], "This email is already in use");
    assert_eq!(backend.request_count(), before);
}

#[tokio::test]
async fn test_editing_keeps_own_email() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<StaffUser> = CrudView::new();
    common::load(&mut view, &api).await;

    view.open_edit(3);
    view.form_mut().expect("Edit form").name = "Sara El Idrissi".into();
    let mutation = view.submit().expect("Own email is not a duplicate");
    let follow_up = common::settle(&mut view, &api, mutation).await;

    assert_eq!(follow_up, FollowUp::Reload);
    assert_eq!(view.find(3).expect("User 3").name, "Sara El Idrissi");
    let put = backend
        .requests()
        .into_iter()
        .find(|r| r.method == "PUT" && r.path == "users/3")
        .expect("PUT /users/3 was sent");
    let body = put.body.expect("Update has a body");
    assert!(body.get("password").is_none(), "Blank password is not sent");
    assert!(body.get("specialite").is_none());

    // The unchanged password still works.
    backend.signed_in(common::SECRETARY).await;
}

#[tokio::test]
async fn test_new_accounts_need_a_real_password() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<StaffUser> = CrudView::new();
    common::load(&mut view, &api).await;

    let mut form = nurse_form("r.ouali@hospital.org");
    form.password = "abc".into();
    view.open_create_with(form);
    let err = view.submit().unwrap_err();

    assert_eq!(err.field_errors["password"], "Password must be at least 6 characters");
}

#[tokio::test]
async fn test_specialty_must_belong_to_role() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<StaffUser> = CrudView::new();
    common::load(&mut view, &api).await;

    let mut form = nurse_form("r.ouali@hospital.org");
    form.role = "technicien".into();
    view.open_create_with(form);
    let err = view.submit().unwrap_err();
    assert_eq!(err.message, "Gériatrie is not a specialty for Technician");

    view.form_mut().expect("Form still open").set_role("technicien");
    assert_eq!(view.form().expect("Form").specialty, None);
    assert!(view.submit().is_ok());
}

#[tokio::test]
async fn test_created_account_can_sign_in() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<StaffUser> = CrudView::new();
    common::load(&mut view, &api).await;

    view.open_create_with(nurse_form("r.ouali@hospital.org"));
    let mutation = view.submit().expect("Form is valid");
    common::settle(&mut view, &api, mutation).await;

    assert_eq!(view.records().len(), 7);
    assert_eq!(view.notice().expect("Notice").text, "User created");

    let newcomer = backend.client();
    let session = newcomer
        .session()
        .login(
            &newcomer,
            &Credentials {
                email: "r.ouali@hospital.org".into(),
                password: "motdepasse".into(),
            },
        )
        .await
        .expect("New account signs in");
    assert_eq!(session.user.specialty.as_deref(), Some("Gériatrie"));
    let router = ViewRouter::for_role(&session.user.role);
    assert_eq!(router.active_entry_id(), Some(EntryId::Patients));
}

#[tokio::test]
async fn test_backend_duplicate_surfaces_as_field_error() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    // Nothing loaded, so only the backend can spot the duplicate.
    let mut view: CrudView<StaffUser> = CrudView::new();

    view.open_create_with(nurse_form(common::NURSE));
    let mutation = view.submit().expect("No local duplicate");
    let Mutation::Create(form) = &mutation else {
        panic!("Expected a create, got {mutation:?}");
    };
    let err = api.create::<StaffUser>(form).await.unwrap_err();
    assert_eq!(err.field_errors["email"], "The email has already been taken.");

    let follow_up = view.finish_mutation(&mutation, Err(err));
    assert_eq!(follow_up, FollowUp::Nothing);
    assert!(matches!(view.modal(), Modal::Create(_)));
    assert_eq!(
        view.notice().expect("Error notice").text,
        "The email has already been taken."
    );
}

#[tokio::test]
async fn test_deleting_staff_is_not_gated() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;
    let mut view: CrudView<StaffUser> = CrudView::new();
    common::load(&mut view, &api).await;

    view.open_delete(6);
    let mutation = view.confirm_delete().expect("Plain confirmation is enough");
    common::settle(&mut view, &api, mutation).await;

    assert_eq!(view.records().len(), 5);
    assert_eq!(backend.count("users"), 5);
}
