//! Wizards de alta del CRM.
//!
//! Las definiciones son datos que el host entrega al motor: una por tipo de
//! entidad, intercambiables sin tocar el engine. Aquí viven las dos altas
//! del CRM inmobiliario: clientes y propiedades.
pub mod client;
pub mod property;

pub use client::client_wizard;
pub use property::property_wizard;

/// Claves de entidad que viajan al backend en `create_draft`.
pub const ENTITY_CLIENT: &str = "client";
pub const ENTITY_PROPERTY: &str = "property";
