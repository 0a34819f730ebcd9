//! Tests de integración del modelo de dominio.
use form_domain::{CrossFieldRule, FieldKind, FieldSchema, FormValues, StepDefinition, WizardDefinition};
use serde_json::json;

fn sample_wizard() -> WizardDefinition {
    WizardDefinition::builder("client")
        .step(StepDefinition::new("contact", "Contact")
            .field(FieldSchema::new("person_type", "Person type", FieldKind::Enum)
                .with_options(["INDIVIDUAL", "COMPANY"])
                .with_default(json!("INDIVIDUAL")))
            .field(FieldSchema::new("name", "Name", FieldKind::String)
                .required_when(|v| v.str("person_type") == Some("INDIVIDUAL"))))
        .step(StepDefinition::new("financing", "Financing")
            .field(FieldSchema::new("budget", "Budget", FieldKind::Number).with_range(Some(0.0), None))
            .visible_when(|v| v.str("intent") == Some("BUY")))
        .step(StepDefinition::new("extra", "Extra")
            .field(FieldSchema::new("intent", "Intent", FieldKind::Enum).with_options(["BUY", "SELL"])))
        .rule(CrossFieldRule::new("name", "name required", |v| !v.is_blank("name")))
        .build()
        .expect("wizard")
}

#[test]
fn definition_is_pure_data_queryable_without_a_session() {
    let wizard = sample_wizard();

    let seed = wizard.seed_values();
    assert_eq!(seed.str("person_type"), Some("INDIVIDUAL"));

    // La visibilidad es un predicado puro sobre valores arbitrarios
    let mut values = FormValues::new();
    assert!(!wizard.steps()[1].is_visible(&values));
    values.set("intent", json!("BUY"));
    assert!(wizard.steps()[1].is_visible(&values));

    assert_eq!(wizard.step_index_of_field("budget"), Some(1));
    assert!(wizard.field("name").expect("schema").is_required(&seed));
}

#[test]
fn values_diff_composes_with_projection() {
    let mut snapshot = FormValues::new();
    snapshot.set("name", json!("Ana"));

    let mut values = snapshot.clone();
    values.set("budget", json!(100_000));
    values.set("intent", json!("BUY"));

    let diff = values.diff_against(&snapshot);
    assert_eq!(diff.len(), 2);

    let projected = values.project(["name", "budget"]);
    assert_eq!(projected.len(), 2);
    assert!(!projected.contains_key("intent"));
}
