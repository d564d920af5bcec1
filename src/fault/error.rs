//! Contract violations raised by fault construction and aggregation.
//!
//! These signal a defect in the calling validation code, never bad input
//! data. Faults themselves are reported through [`Fault`](super::Fault).

use thiserror::Error;

/// Precondition violations when building or aggregating faults.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("Property name must not be empty. Omit .property() for object-wide faults")]
    EmptyPropertyName,

    #[error("Message must not be empty. Omit .message() when there is nothing to say")]
    EmptyMessage,

    #[error("Type '{origin_type}' has no property '{property}'")]
    NoSuchProperty {
        origin_type: &'static str,
        property: String,
    },

    #[error("{kind} must name a property. Call .property(name)")]
    PropertyRequired { kind: &'static str },

    #[error("No instance of '{origin_type}' to read property '{property}' from")]
    NoInstance {
        origin_type: &'static str,
        property: String,
    },

    #[error("Only faults for property '{expected}' are allowed (got {actual:?})")]
    PropertyMismatch {
        expected: String,
        actual: Option<String>,
    },

    #[error("Only faults for origin {expected} are allowed")]
    OriginMismatch { expected: String },

    #[error("Only faults for origin type '{expected}' are allowed (got '{actual}')")]
    OriginTypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}
