//! FormFlow Rust Library
//!
//! Este crate actúa como la capa host sobre el motor de wizards:
//! - Expone `config` para cargar los ajustes de tiempo desde el entorno.
//! - Expone `intake` con las definiciones de alta del CRM (clientes y
//!   propiedades), que son datos intercambiables para `form-core`.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod intake;
