use std::sync::Arc;

use forms::{ContactForm, EInviteForm, FormPhase, SubmitOutcome};
use shared::domain::{ContactSubmission, EInviteSubmission, FormKind};
use shared::error::FieldError;
use storage::{config, KeyValueStore, Storage, SubmissionLog};

#[tokio::test]
async fn lead_capture_flow_persists_submissions_across_reopen() {
    let temp_root = tempfile::tempdir().expect("temp root");
    let db_path = temp_root.path().join("site").join("submissions.db");
    let config_path = temp_root.path().join("site.toml");
    std::fs::write(
        &config_path,
        format!(
            "database_url = \"{}\"\n",
            db_path.to_string_lossy().replace('\\', "/")
        ),
    )
    .expect("write config");

    let settings = config::load_settings(&config_path);
    let database_url = config::prepare_database_url(&settings.database_url).expect("prepare url");

    let storage = Arc::new(Storage::new(&database_url).await.expect("open store"));
    storage.health_check().await.expect("health check");
    let log = SubmissionLog::new(storage.clone());

    // A typo'd email is rejected and leaves no trace in the store.
    let mut contact = ContactForm::new(log.clone());
    {
        let draft = contact.draft_mut();
        draft.name = "Maya Chen".into();
        draft.email = "maya.example.com".into();
        draft.phone = "4155550134".into();
        draft.message = "We are planning a garden wedding for next spring.".into();
    }
    let rejected = contact.submit().await.expect("submit");
    assert!(matches!(rejected, SubmitOutcome::Rejected { .. }));
    assert_eq!(contact.field_error("email"), Some("Invalid email address"));
    let raw = storage
        .load(FormKind::Contact.storage_key())
        .await
        .expect("load");
    assert!(raw.is_none());

    // Correcting the email turns the same draft into the first log entry.
    contact.draft_mut().email = "maya@example.com".into();
    let accepted = match contact.submit().await.expect("submit") {
        SubmitOutcome::Accepted { record } => record,
        other => panic!("expected accepted outcome, got {other:?}"),
    };
    assert_eq!(contact.phase(), FormPhase::Submitted);
    assert_eq!(accepted.email, "maya@example.com");

    // Reset hands the visitor an empty form; a second enquiry appends.
    contact.reset();
    assert_eq!(contact.draft().name, "");
    {
        let draft = contact.draft_mut();
        draft.name = "Noah Patel".into();
        draft.email = "noah@example.com".into();
        draft.phone = "2065550199".into();
        draft.message = "Looking for a winter venue recommendation.".into();
    }
    let second = match contact.submit().await.expect("second submit") {
        SubmitOutcome::Accepted { record } => record,
        other => panic!("expected accepted outcome, got {other:?}"),
    };

    // The e-invite form keeps its own log and insists on an event date.
    let mut einvite = EInviteForm::new(log.clone());
    {
        let draft = einvite.draft_mut();
        draft.name = "Sofia Reyes".into();
        draft.email = "sofia@example.com".into();
        draft.phone = "3125550172".into();
        draft.message = "Digital invites for a rooftop ceremony.".into();
    }
    let missing_date = rejected_field_errors(einvite.submit().await.expect("submit"));
    assert_eq!(
        missing_date,
        vec![FieldError::new("event_date", "Event date is required")]
    );
    einvite.draft_mut().event_date = "2025-09-20".into();
    einvite.submit().await.expect("einvite submit");

    // The stored value is the records' own JSON, array-wrapped: camelCase
    // keys in declaration order, byte for byte.
    let raw = storage
        .load(FormKind::Contact.storage_key())
        .await
        .expect("load")
        .expect("contact log exists");
    let expected = format!(
        "[{},{}]",
        serde_json::to_string(&accepted).expect("encode first record"),
        serde_json::to_string(&second).expect("encode second record")
    );
    assert_eq!(raw, expected);

    let raw = storage
        .load(FormKind::EInvite.storage_key())
        .await
        .expect("load")
        .expect("einvite log exists");
    assert!(raw.contains("\"eventDate\":\"2025-09-20\""));

    drop(contact);
    drop(einvite);
    drop(log);
    drop(storage);

    // Everything survives a process restart with order and ids intact.
    let reopened = Storage::new(&database_url).await.expect("reopen");
    let log = SubmissionLog::new(Arc::new(reopened));
    let contacts: Vec<ContactSubmission> = log
        .read_all(FormKind::Contact.storage_key())
        .await
        .expect("read contacts");
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].name, "Maya Chen");
    assert_eq!(contacts[1].name, "Noah Patel");
    assert!(contacts[0].id <= contacts[1].id);
    assert!(contacts[0].submitted_at <= contacts[1].submitted_at);

    let einvites: Vec<EInviteSubmission> = log
        .read_all(FormKind::EInvite.storage_key())
        .await
        .expect("read einvites");
    assert_eq!(einvites.len(), 1);
    assert_eq!(einvites[0].event_date, "2025-09-20");
}

fn rejected_field_errors<R: std::fmt::Debug>(outcome: SubmitOutcome<R>) -> Vec<FieldError> {
    match outcome {
        SubmitOutcome::Rejected { field_errors } => field_errors,
        other => panic!("expected rejected outcome, got {other:?}"),
    }
}
