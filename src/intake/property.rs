//! Wizard de alta de propiedades.
//!
//! Básicos, ubicación, interior (oculto para terrenos) y precio. El
//! depósito sólo es exigible cuando la operación es un alquiler.
use serde_json::json;

use form_domain::{CrossFieldRule, DomainError, FieldKind, FieldSchema, StepDefinition, WizardDefinition};

use super::ENTITY_PROPERTY;

const POSTAL_CODE_PATTERN: &str = r"^[0-9]{4,6}$";

fn basics_step() -> StepDefinition {
    StepDefinition::new("basics", "Basics")
        .field(FieldSchema::new("title", "Listing title", FieldKind::String).required())
        .field(FieldSchema::new("property_type", "Property type", FieldKind::Enum)
            .with_options(["APARTMENT", "HOUSE", "OFFICE", "LAND"])
            .required())
        .field(FieldSchema::new("operation", "Operation", FieldKind::Enum)
            .with_options(["SALE", "RENT"])
            .with_default(json!("SALE"))
            .required())
        .field(FieldSchema::new("available_from", "Available from", FieldKind::Date))
}

fn location_step() -> Result<StepDefinition, DomainError> {
    Ok(StepDefinition::new("location", "Location")
        .field(FieldSchema::new("address", "Street address", FieldKind::String).required())
        .field(FieldSchema::new("city", "City", FieldKind::String).required())
        .field(FieldSchema::new("postal_code", "Postal code", FieldKind::String)
            .with_pattern(POSTAL_CODE_PATTERN)?))
}

fn interior_step() -> StepDefinition {
    StepDefinition::new("interior", "Interior")
        .with_description("Not applicable to land")
        .visible_when(|v| v.str("property_type") != Some("LAND"))
        .field(FieldSchema::new("area_m2", "Built area (m²)", FieldKind::Number)
            .with_range(Some(1.0), None)
            .required())
        .field(FieldSchema::new("bedrooms", "Bedrooms", FieldKind::Number).with_range(Some(0.0), Some(30.0)))
        .field(FieldSchema::new("bathrooms", "Bathrooms", FieldKind::Number).with_range(Some(0.0), Some(30.0)))
        .field(FieldSchema::new("amenities", "Amenities", FieldKind::MultiEnum)
            .with_options(["POOL", "GARAGE", "ELEVATOR", "TERRACE", "GARDEN", "STORAGE"]))
}

fn pricing_step() -> StepDefinition {
    StepDefinition::new("pricing", "Pricing")
        .field(FieldSchema::new("price", "Price", FieldKind::Number)
            .with_range(Some(1.0), None)
            .required())
        .field(FieldSchema::new("currency", "Currency", FieldKind::Enum)
            .with_options(["EUR", "USD"])
            .with_default(json!("EUR"))
            .required())
        .field(FieldSchema::new("deposit", "Rental deposit", FieldKind::Number).with_range(Some(0.0), None))
}

/// Construye la definición completa del alta de propiedades.
pub fn property_wizard() -> Result<WizardDefinition, DomainError> {
    WizardDefinition::builder(ENTITY_PROPERTY)
        .step(basics_step())
        .step(location_step()?)
        .step(interior_step())
        .step(pricing_step())
        .rule(CrossFieldRule::new("deposit", "a deposit is required for rentals", |v| {
            v.str("operation") != Some("RENT") || !v.is_blank("deposit")
        }))
        .build()
}
