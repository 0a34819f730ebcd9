//! Wizard de alta de clientes.
//!
//! Cuatro pasos: contacto, intención, financiamiento (sólo para quien
//! compra o invierte) y preferencias. La obligatoriedad de los campos de
//! identidad depende del tipo de persona; el contacto exige email o
//! teléfono (regla cruzada).
use serde_json::json;

use form_domain::{CrossFieldRule, DomainError, FieldKind, FieldSchema, StepDefinition, WizardDefinition};

use super::ENTITY_CLIENT;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const PHONE_PATTERN: &str = r"^\+?[0-9\s\-()]{7,20}$";

fn contact_step() -> Result<StepDefinition, DomainError> {
    Ok(StepDefinition::new("contact", "Contact details")
        .with_description("Who is this client and how do we reach them")
        .field(FieldSchema::new("person_type", "Person type", FieldKind::Enum)
            .with_options(["INDIVIDUAL", "COMPANY"])
            .with_default(json!("INDIVIDUAL"))
            .required())
        .field(FieldSchema::new("first_name", "First name", FieldKind::String)
            .required_when(|v| v.str("person_type") == Some("INDIVIDUAL")))
        .field(FieldSchema::new("last_name", "Last name", FieldKind::String)
            .required_when(|v| v.str("person_type") == Some("INDIVIDUAL")))
        .field(FieldSchema::new("company_name", "Company name", FieldKind::String)
            .required_when(|v| v.str("person_type") == Some("COMPANY")))
        .field(FieldSchema::new("email", "Email", FieldKind::String).with_pattern(EMAIL_PATTERN)?)
        .field(FieldSchema::new("phone", "Phone", FieldKind::String).with_pattern(PHONE_PATTERN)?))
}

fn intent_step() -> StepDefinition {
    StepDefinition::new("intent", "Intent")
        .with_description("What the client is looking for")
        .field(FieldSchema::new("intent", "Intent", FieldKind::Enum)
            .with_options(["BUY", "SELL", "RENT", "INVEST"])
            .required())
        .field(FieldSchema::new("budget", "Budget", FieldKind::Number)
            .with_range(Some(0.0), None)
            .required_when(|v| matches!(v.str("intent"), Some("BUY") | Some("INVEST"))))
        .field(FieldSchema::new("target_move_date", "Target move date", FieldKind::Date))
}

fn financing_step() -> StepDefinition {
    StepDefinition::new("financing", "Financing")
        .with_description("Only relevant for buyers and investors")
        .visible_when(|v| matches!(v.str("intent"), Some("BUY") | Some("INVEST")))
        .field(FieldSchema::new("financing_type", "Financing type", FieldKind::Enum)
            .with_options(["CASH", "MORTGAGE", "MIXED"])
            .required())
        .field(FieldSchema::new("preapproved", "Pre-approved", FieldKind::Boolean).with_default(json!(false)))
        .field(FieldSchema::new("mortgage_lender", "Mortgage lender", FieldKind::String)
            .required_when(|v| v.str("financing_type") == Some("MORTGAGE")))
}

fn preferences_step() -> StepDefinition {
    StepDefinition::new("preferences", "Preferences")
        .field(FieldSchema::new("preferred_contact", "Preferred contact channel", FieldKind::Enum)
            .with_options(["EMAIL", "PHONE", "WHATSAPP"])
            .with_default(json!("EMAIL")))
        .field(FieldSchema::new("areas_of_interest", "Areas of interest", FieldKind::MultiEnum)
            .with_options(["CENTER", "NORTH", "SOUTH", "EAST", "WEST", "SUBURBS"]))
        .field(FieldSchema::new("newsletter", "Subscribe to newsletter", FieldKind::Boolean)
            .with_default(json!(false)))
}

/// Construye la definición completa del alta de clientes.
pub fn client_wizard() -> Result<WizardDefinition, DomainError> {
    WizardDefinition::builder(ENTITY_CLIENT)
        .step(contact_step()?)
        .step(intent_step())
        .step(financing_step())
        .step(preferences_step())
        .rule(CrossFieldRule::new("email", "at least one of email or phone is required", |v| {
            !v.is_blank("email") || !v.is_blank("phone")
        }))
        .build()
}
