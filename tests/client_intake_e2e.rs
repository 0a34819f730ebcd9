//! Alta de cliente de punta a punta: navegación condicional, autosave
//! incremental y promoción del borrador.
use std::sync::Arc;

use serde_json::json;

use form_core::{AutosaveConfig, InMemoryDraftBackend, InMemoryEventStore, SessionEventKind, WizardSession};
use formflow_rust::intake::client_wizard;

const CFG: AutosaveConfig = AutosaveConfig { debounce_ms: 100, saved_display_ms: 200, failed_display_ms: 500 };

fn new_session() -> WizardSession<InMemoryEventStore> {
    WizardSession::new(Arc::new(client_wizard().expect("definition")), InMemoryEventStore::default(), CFG)
}

#[tokio::test]
async fn buyer_intake_promotes_the_autosaved_draft() {
    let backend = InMemoryDraftBackend::new();
    let mut s = new_session();
    assert_eq!(s.progress(), (0, 3), "financing is hidden at start");

    s.set_field("first_name", json!("Ana"), 0).expect("set");
    s.set_field("last_name", json!("Torres"), 10).expect("set");
    s.set_field("email", json!("ana.torres@example.com"), 20).expect("set");
    s.autosave_tick(&backend, 20 + CFG.debounce_ms).await;
    let draft_id = s.draft_id().expect("first autosave creates the draft");

    s.next().expect("to intent");
    s.set_field("intent", json!("BUY"), 200).expect("set");
    assert_eq!(s.progress(), (1, 4), "BUY reveals financing");
    s.set_field("budget", json!(320_000), 210).expect("set");

    s.next().expect("to financing");
    s.set_field("financing_type", json!("CASH"), 300).expect("set");
    s.next().expect("to preferences");

    let final_id = s.submit(&backend).await.expect("submit").expect("valid form");
    assert_eq!(final_id, draft_id);

    let record = backend.draft(final_id).await.expect("record");
    assert!(record.finalized);
    assert_eq!(record.entity_kind, "client");
    assert_eq!(record.fields.get("budget"), Some(&json!(320_000)));
}

#[test]
fn conditionally_required_identity_fields() {
    let mut s = new_session();

    // Persona jurídica: nombre y apellido dejan de ser obligatorios
    s.set_field("person_type", json!("COMPANY"), 0).expect("set");
    s.set_field("phone", json!("+34 600 123 456"), 10).expect("set");

    assert_eq!(s.next().expect("next"), false, "company_name still missing");
    assert!(s.validation_errors().contains_key("company_name"));
    assert!(!s.validation_errors().contains_key("first_name"));

    s.set_field("company_name", json!("Inmobiliaria Sol SL"), 20).expect("set");
    assert_eq!(s.next().expect("next"), true);
}

#[tokio::test]
async fn seller_intake_skips_financing_and_creates_final_directly() {
    let backend = InMemoryDraftBackend::new();
    let mut s = new_session();

    s.set_field("first_name", json!("Luis"), 0).expect("set");
    s.set_field("last_name", json!("Prado"), 1).expect("set");
    s.set_field("phone", json!("+34 600 000 111"), 2).expect("set");
    s.next().expect("to intent");
    s.set_field("intent", json!("SELL"), 3).expect("set");
    s.next().expect("to preferences, financing skipped");
    assert_eq!(s.current_step().id(), "preferences");

    // Submit sin autosave previo: camino de creación directa
    let final_id = s.submit(&backend).await.expect("submit").expect("valid");
    assert!(s.draft_id().is_none());
    let record = backend.draft(final_id).await.expect("record");
    assert!(record.finalized);
    assert!(!record.fields.contains_key("financing_type"),
            "hidden financing fields must not reach the final record");
}

#[tokio::test]
async fn abandoned_intake_leaves_a_resumable_draft() {
    let backend = InMemoryDraftBackend::new();
    let mut s = new_session();

    s.set_field("first_name", json!("Marta"), 0).expect("set");
    s.autosave_tick(&backend, CFG.debounce_ms).await;
    let draft_id = s.draft_id().expect("draft");

    s.cancel().expect("cancel");
    let record = backend.draft(draft_id).await.expect("draft survives");
    assert!(!record.finalized);
    assert_eq!(record.fields.get("first_name"), Some(&json!("Marta")));

    let kinds: Vec<_> = s.events().into_iter().map(|e| e.kind).collect();
    assert!(kinds.iter().any(|k| matches!(k, SessionEventKind::SessionCancelled)));
}
