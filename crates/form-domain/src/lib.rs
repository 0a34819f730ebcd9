// form-domain library entry point
pub mod error;
pub mod field;
pub mod rules;
pub mod step;
pub mod value;
pub mod wizard;

pub use error::DomainError;
pub use field::{FieldConstraints, FieldKind, FieldSchema, RequiredRule};
pub use rules::{CrossFieldRule, Predicate};
pub use step::StepDefinition;
pub use value::{FieldMap, FormValues};
pub use wizard::{WizardBuilder, WizardDefinition};
