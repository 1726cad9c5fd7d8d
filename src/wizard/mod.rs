//! Multi-step form wizards.
//!
//! A [`schema::WizardSchema`] declares steps and per-field rules; the
//! [`engine::Wizard`] drives any schema (step gating, validation, photo
//! upload, submission). [`hire::HireKind`] holds the concrete hiring forms
//! and [`store::WizardStore`] keeps drafts between requests.

pub mod engine;
pub mod hire;
pub mod schema;
pub mod store;

pub use engine::{SubmitOutcome, Wizard, WizardState};
pub use hire::HireKind;
pub use schema::{FieldSpec, InputKind, Rule, StepSpec, WizardSchema};
pub use store::WizardStore;
