//! Rousseau: beans may be wild, as long as they say so
//!
//! Rousseau is built on Stillwater's "accumulate, don't short-circuit"
//! philosophy. Validating a bean never stops at the first problem: every
//! violated rule becomes a [`PropertyFault`], gathered in a
//! [`FaultAggregate`], and only when collecting is done is the aggregate
//! closed and reported.
//!
//! # Core Concepts
//!
//! - **Introspection**: the [`core::Introspect`] capability answers "does
//!   this type have property `p`?" and "what does `p` hold now?"
//! - **Faults**: [`PropertyFault`] in three kinds (plain, value, setter)
//! - **Aggregation**: an open [`FaultAggregate`] closes into an immutable
//!   [`CompoundFault`]
//! - **Civility**: [`RousseauBean`] beans report their own wild faults
//! - **Presentation**: [`i18n::MessageResolver`] localizes faults
//!
//! # Example
//!
//! ```rust
//! use rousseau::{introspect, FaultAggregate, FaultBuilder, RousseauBean};
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
//! impl RousseauBean for Person {
//!     fn wild_faults(self: &Arc<Self>) -> FaultAggregate {
//!         let mut faults = FaultAggregate::for_origin(self);
//!         let rules = [
//!             ("name", "required", self.name.is_empty()),
//!             ("age", "out of range", self.age > 150),
//!         ];
//!         for (property, message, broken) in rules {
//!             if broken {
//!                 let fault = FaultBuilder::for_origin(self)
//!                     .property(property)
//!                     .message(message)
//!                     .build_value()
//!                     .expect("rules only name Person properties");
//!                 faults.add_element_fault(fault).expect("faults target this person");
//!             }
//!         }
//!         faults
//!     }
//!
//!     fn has_same_values(&self, other: &Self) -> bool {
//!         self.name == other.name && self.age == other.age
//!     }
//! }
//!
//! let wild = Arc::new(Person { name: String::new(), age: 200 });
//! let compound = wild.check_civility().unwrap_err();
//!
//! assert_eq!(compound.size(), 2);
//! assert!(compound.element_faults().contains_key(&Some("age".to_string())));
//! ```

pub mod bean;
pub mod core;
pub mod fault;
pub mod i18n;

// Re-export commonly used types
pub use bean::{Civility, RousseauBean};
pub use fault::{
    CompoundFault, ContractViolation, Fault, FaultAggregate, FaultBuilder, FaultReport,
    PropertyFault,
};
