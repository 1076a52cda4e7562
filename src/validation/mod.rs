//! Diagnostics for rendered layer documents.

mod validate;

pub use validate::{validate_layer, ValidationResult};
