//! Fault records and fault aggregation.
//!
//! Validation code should not stop at the first problem it finds. It
//! appends one [`PropertyFault`] per violated rule to a
//! [`FaultAggregate`], closes the aggregate, and only then reports:
//! a single fault as itself, several faults as one [`CompoundFault`]
//! bucketed by property name.
//!
//! Two failure tiers are kept apart:
//! - [`Fault`]: the product of validation, "this bean is invalid".
//! - [`ContractViolation`]: a defect in the validation code itself, such
//!   as naming a property the bean does not have.
//!
//! # Example
//!
//! ```rust
//! use rousseau::fault::{Fault, FaultAggregate, FaultBuilder};
//! use rousseau::introspect;
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! introspect! {
//!     Person { name, age }
//! }
//!
//! let person = Arc::new(Person { name: String::new(), age: 12 });
//! let mut aggregate = FaultAggregate::for_origin(&person);
//!
//! let required = FaultBuilder::for_origin(&person)
//!     .property("name")
//!     .message("required")
//!     .build_value()
//!     .unwrap();
//! aggregate.add_element_fault(required).unwrap();
//!
//! assert_eq!(aggregate.size(), 1);
//! let fault = aggregate.throw_if_not_empty().unwrap_err();
//! assert!(matches!(fault, Fault::Property(_)));
//! ```

pub mod aggregate;
pub mod builder;
pub mod compound;
pub mod error;
pub mod property;

pub use aggregate::{ElementFaults, FaultAggregate, FaultCheck};
pub use builder::FaultBuilder;
pub use compound::{CompoundFault, Fault};
pub use error::ContractViolation;
pub use property::{Cause, FaultKind, FaultReport, PropertyFault};
