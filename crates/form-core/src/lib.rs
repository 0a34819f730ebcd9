//! form-core: motor de sesión para wizards de alta multi-paso
pub mod autosave;
pub mod backend;
pub mod clock;
pub mod constants;
pub mod errors;
pub mod event;
pub mod session;
pub mod status;
pub mod validation;

pub use autosave::{AutosaveConfig, SaveRequest};
pub use backend::{BackendError, DraftBackend, DraftRecord, FailingDraftBackend, InMemoryDraftBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::WizardError;
pub use event::{EventStore, InMemoryEventStore, SessionEvent, SessionEventKind};
pub use session::{SessionPhase, WizardSession};
pub use status::AutosaveStatus;
pub use validation::ValidationErrors;
