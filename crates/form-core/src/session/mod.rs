//! Sesión de wizard: estado vivo + navegación + autosave + submit.
pub mod autosave;
pub mod navigation;
pub mod state;
pub mod submission;

pub use state::{SessionPhase, WizardSession};
