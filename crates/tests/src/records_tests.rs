use client::ApiClient;
use pretty_assertions::assert_eq;
use shared_types::{
    Appointment, AppointmentColumn, AppointmentForm, CrudView, Invoice, InvoiceForm,
    InvoiceStatus, Medication, Observation, ObservationColumn, ObservationForm, Patient,
    Prescription, PrescriptionForm, SortDirection, SortSpec,
};

use crate::common::{self, MockBackend};

#[tokio::test]
async fn test_statistics_count_records_and_staff() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::ADMIN).await;

    let stats = api.statistics().await.expect("Statistics load");

    assert_eq!(stats.total_patients, 3);
    assert_eq!(stats.total_rendezvous, 2);
    assert_eq!(stats.total_conges, 2);
    assert_eq!(stats.total_equipments, 2);
    assert_eq!(stats.total_medecins, 1);
    assert_eq!(stats.total_staff(), 4);
    let cards = stats.cards();
    assert_eq!(cards.len(), 8);
    assert_eq!(cards[0].label, "Patients");
    assert_eq!(cards[0].percent, 100);
    assert_eq!(cards[4].percent, 33);
}

#[tokio::test]
async fn test_schedule_is_linked_and_sorted_by_time() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::PHYSICIAN).await;
    let mut view: CrudView<Appointment> = CrudView::new();
    common::load_with(&mut view, async {
        api.list_linked::<Appointment, Patient>().await.map(|(a, _)| a)
    })
    .await;

    view.query.sort = Some(SortSpec::ascending(AppointmentColumn::Time));
    let page = view.page();
    let ids: Vec<i64> = page.rows.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(page.rows[1].patient_name(), "Nadia Alaoui");
    assert_eq!(page.rows[1].display_time(), "03/06/2024 09:30");

    view.set_search("bennani");
    assert_eq!(view.page().rows[0].id, 2);
}

#[tokio::test]
async fn test_booking_sends_the_picked_time() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<Appointment> = CrudView::new();
    common::load(&mut view, &api).await;

    view.open_create_with(AppointmentForm {
        patient_id: Some(3),
        scheduled_at: "2024-06-10T11:15".into(),
        reason: "Suivi".into(),
    });
    let mutation = view.submit().expect("Form is valid");
    common::settle(&mut view, &api, mutation).await;

    let stored = backend.record("rendezvous", 100).expect("New appointment");
    assert_eq!(stored["patient_id"], 3);
    assert_eq!(stored["date_heure"], "2024-06-10T11:15");
    assert_eq!(stored["motif"], "Suivi");
    assert_eq!(view.records().len(), 3);
}

#[tokio::test]
async fn test_invoices_read_text_and_numeric_amounts() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;

    let (invoices, _) = api
        .list_linked::<Invoice, Patient>()
        .await
        .expect("Invoices load");

    assert_eq!(invoices[0].status, InvoiceStatus::Paid);
    assert_eq!(invoices[0].display_amount(), "150.00");
    assert_eq!(invoices[1].amount_value(), 80.5);
    assert_eq!(invoices[1].display_amount(), "80.50");
    assert_eq!(invoices[1].patient_name(), "Omar Bennani");
    assert_eq!(invoices[1].details, "");
}

#[tokio::test]
async fn test_negative_invoice_amount_is_rejected() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::SECRETARY).await;
    let mut view: CrudView<Invoice> = CrudView::new();
    common::load(&mut view, &api).await;
    let before = backend.request_count();

    view.open_create_with(InvoiceForm {
        patient_id: Some(2),
        date: "2024-06-01".into(),
        amount: "-10".into(),
        status: InvoiceStatus::Pending,
        details: String::new(),
    });
    let err = view.submit().unwrap_err();

    assert_eq!(err.field_errors["montant"], "Amount must be a number of zero or more");
    assert_eq!(backend.request_count(), before);
}

async fn load_prescriptions(view: &mut CrudView<Prescription>, api: &ApiClient) {
    common::load_with(view, async {
        api.list_linked::<Prescription, Patient>().await.map(|(p, _)| p)
    })
    .await;
}

#[tokio::test]
async fn test_prescription_needs_complete_medication_lines() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::PHYSICIAN).await;
    let mut view: CrudView<Prescription> = CrudView::new();
    load_prescriptions(&mut view, &api).await;
    let before = backend.request_count();

    view.open_create_with(PrescriptionForm {
        patient_id: Some(2),
        date: "2024-06-05".into(),
        ..Default::default()
    });
    assert_eq!(view.submit().unwrap_err().message, "Add at least one medication");

    view.form_mut().expect("Form still open").add_medication(Medication {
        name: "Amoxicilline".into(),
        ..Default::default()
    });
    assert_eq!(
        view.submit().unwrap_err().message,
        "Medication 1 needs a name and a dosage"
    );
    assert_eq!(backend.request_count(), before);
}

#[tokio::test]
async fn test_prescription_round_trips_its_medication_list() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::PHYSICIAN).await;
    let mut view: CrudView<Prescription> = CrudView::new();
    load_prescriptions(&mut view, &api).await;

    let seeded = view.find(1).expect("Prescription 1");
    assert_eq!(seeded.medications.len(), 1, "JSON-encoded list is decoded");
    assert_eq!(seeded.medications[0].name, "Ventoline");
    assert_eq!(seeded.patient_name(), "Nadia Alaoui");

    let mut form = PrescriptionForm {
        patient_id: Some(2),
        date: "2024-06-05".into(),
        notes: "À prendre pendant les repas".into(),
        ..Default::default()
    };
    form.add_medication(Medication {
        name: "Amoxicilline".into(),
        dosage: "1g".into(),
        frequency: "3x/jour".into(),
        duration: "7 jours".into(),
    });
    form.add_medication(Medication {
        name: "Paracétamol".into(),
        dosage: "500mg".into(),
        ..Default::default()
    });
    form.remove_medication(5);
    view.open_create_with(form);
    let mutation = view.submit().expect("Form is valid");
    let result = api.execute::<Prescription>(&mutation).await;
    view.finish_mutation(&mutation, result);
    load_prescriptions(&mut view, &api).await;

    let created = view.find(100).expect("New prescription");
    assert_eq!(created.medications.len(), 2);
    assert_eq!(created.medications[0].frequency, "3x/jour");
    assert_eq!(created.patient_name(), "Omar Bennani");
    let stored = backend.record("ordonnances", 100).expect("Stored");
    assert_eq!(stored["prescriptions"][1]["nom"], "Paracétamol");
}

#[tokio::test]
async fn test_new_observation_comes_first() {
    let backend = MockBackend::start().await;
    let api = backend.signed_in(common::NURSE).await;
    let mut view: CrudView<Observation> = CrudView::new();
    view.query.sort = Some(SortSpec {
        column: ObservationColumn::Created,
        direction: SortDirection::Descending,
    });

    view.open_create_with(ObservationForm {
        patient_id: Some(2),
        text: "   ".into(),
    });
    assert_eq!(view.submit().unwrap_err().message, "Observation text is required");

    view.form_mut().expect("Form still open").text = "Pouls normal".into();
    let mutation = view.submit().expect("Form is valid");
    let result = api.execute::<Observation>(&mutation).await;
    view.finish_mutation(&mutation, result);
    common::load_with(&mut view, async {
        api.list_linked::<Observation, Patient>().await.map(|(o, _)| o)
    })
    .await;

    let page = view.page();
    let ids: Vec<i64> = page.rows.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![100, 2, 1]);
    assert_eq!(page.rows[0].patient_name(), "Omar Bennani");
    assert_eq!(page.rows[0].display_date(), "03/06/2024");
    assert_eq!(view.notice().expect("Notice").text, "Observation created");
}
