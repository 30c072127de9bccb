//! Form domain layer
//!
//! Steps, fields and the controller that moves a form from editing through
//! submission and back.

mod controller;
mod definition;
mod field;
mod form_state;
mod review;
mod step;

pub use controller::{FormController, SubmitOutcome};
pub use definition::FormDefinition;
pub use field::{Field, FieldRef};
pub use form_state::FormState;
pub use step::Step;
