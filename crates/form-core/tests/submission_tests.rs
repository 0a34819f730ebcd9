//! Submit final: validación global, salto al primer paso inválido,
//! promoción de borrador vs. creación directa y reintento tras fallo.
use std::sync::Arc;

use serde_json::json;

use form_core::{AutosaveConfig, FailingDraftBackend, InMemoryDraftBackend, InMemoryEventStore, SessionPhase,
                WizardError, WizardSession};
use form_domain::{CrossFieldRule, FieldKind, FieldSchema, StepDefinition, WizardDefinition};

fn client_like_wizard() -> Arc<WizardDefinition> {
    let wizard = WizardDefinition::builder("client")
        .step(StepDefinition::new("contact", "Contact")
            .field(FieldSchema::new("name", "Full name", FieldKind::String).required())
            .field(FieldSchema::new("email", "Email", FieldKind::String))
            .field(FieldSchema::new("phone", "Phone", FieldKind::String)))
        .step(StepDefinition::new("intent", "Intent")
            .field(FieldSchema::new("intent", "Intent", FieldKind::Enum)
                .with_options(["BUY", "SELL"])
                .required()))
        .rule(CrossFieldRule::new("email", "at least one of email or phone is required", |v| {
            !v.is_blank("email") || !v.is_blank("phone")
        }))
        .build()
        .expect("wizard");
    Arc::new(wizard)
}

fn session() -> WizardSession<InMemoryEventStore> {
    WizardSession::new(client_like_wizard(), InMemoryEventStore::default(), AutosaveConfig::default())
}

#[tokio::test]
async fn cross_rule_failure_attaches_to_designated_field_and_jumps_back() {
    let backend = InMemoryDraftBackend::new();
    let mut s = session();

    s.set_field("name", json!("Ana"), 0).expect("set");
    s.set_field("email", json!(""), 1).expect("set");
    s.set_field("phone", json!("555-1234"), 2).expect("set");
    s.next().expect("advance");
    s.set_field("intent", json!("BUY"), 3).expect("set");
    // Borrar el teléfono desde el paso 2 deja la regla cruzada sin cumplir
    s.set_field("phone", json!(""), 4).expect("set");

    // submit() falla por la regla cruzada; el error se adjunta a email y el
    // cursor vuelve al paso que lo contiene
    let outcome = s.submit(&backend).await.expect("submit");
    assert!(outcome.is_none());
    assert!(s.validation_errors().contains_key("email"));
    assert_eq!(s.progress().0, 0);
    assert_eq!(s.phase(), SessionPhase::Editing);
    assert_eq!(backend.draft_count().await, 0, "failed validation must not touch the backend");
}

#[tokio::test]
async fn submit_without_prior_autosave_creates_final_record_directly() {
    let backend = InMemoryDraftBackend::new();
    let mut s = session();

    s.set_field("name", json!("Ana"), 0).expect("set");
    s.set_field("email", json!("ana@example.com"), 1).expect("set");
    s.next().expect("advance");
    s.set_field("intent", json!("SELL"), 2).expect("set");

    let final_id = s.submit(&backend).await.expect("submit").expect("valid");
    assert!(s.draft_id().is_none(), "no draft was ever created");
    let record = backend.draft(final_id).await.expect("record");
    assert!(record.finalized);
    assert_eq!(backend.draft_count().await, 1, "exactly one of the two finalize paths runs");
}

#[tokio::test]
async fn transport_failure_preserves_values_for_retry() {
    let backend = FailingDraftBackend::new();
    let mut s = session();

    s.set_field("name", json!("Ana"), 0).expect("set");
    s.set_field("phone", json!("555-1234"), 1).expect("set");
    s.next().expect("advance");
    s.set_field("intent", json!("BUY"), 2).expect("set");

    backend.fail_finalize(true);
    let err = s.submit(&backend).await.expect_err("transport failure");
    assert!(matches!(err, WizardError::Backend(_)));
    assert_eq!(s.phase(), SessionPhase::Editing, "session must return to editable state");
    assert_eq!(s.values().str("name"), Some("Ana"), "values preserved for retry");

    backend.fail_finalize(false);
    let final_id = s.submit(&backend).await.expect("retry").expect("valid");
    assert!(backend.inner().draft(final_id).await.expect("record").finalized);
    assert!(matches!(s.phase(), SessionPhase::Completed(_)));
}

#[tokio::test]
async fn completed_session_rejects_further_activity() {
    let backend = InMemoryDraftBackend::new();
    let mut s = session();

    s.set_field("name", json!("Ana"), 0).expect("set");
    s.set_field("phone", json!("555"), 1).expect("set");
    s.next().expect("advance");
    s.set_field("intent", json!("BUY"), 2).expect("set");
    s.submit(&backend).await.expect("submit").expect("valid");

    assert!(matches!(s.set_field("name", json!("x"), 10).unwrap_err(), WizardError::SessionClosed));
    assert!(matches!(s.next().unwrap_err(), WizardError::SessionClosed));
    assert!(matches!(s.submit(&backend).await.unwrap_err(), WizardError::SessionClosed));
}

#[tokio::test]
async fn cancelled_session_leaves_draft_retrievable() {
    let backend = InMemoryDraftBackend::new();
    let mut s = session();

    s.set_field("name", json!("Ana"), 0).expect("set");
    s.autosave_tick(&backend, AutosaveConfig::default().debounce_ms).await;
    let draft_id = s.draft_id().expect("draft created");

    s.cancel().expect("cancel");
    assert_eq!(s.phase(), SessionPhase::Cancelled);

    // El borrador no se revierte: el host decide limpieza o reanudación
    let record = backend.draft(draft_id).await.expect("draft survives cancellation");
    assert!(!record.finalized);
    assert_eq!(record.fields.get("name"), Some(&json!("Ana")));
}
