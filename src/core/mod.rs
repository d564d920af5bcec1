//! Core collaborator types.
//!
//! This module contains everything faults need to know about the beans
//! they report on, and nothing about faults themselves:
//! - `Introspect`: property existence and property value queries
//! - `Origin` / `OriginType`: which bean (or bean type) a fault is about
//! - `Value`: captured property values under the safe reference policy

mod introspect;
mod macros;
mod origin;
mod value;

pub use introspect::{Introspect, ToValue};
pub use origin::{Origin, OriginType};
pub use value::{safe_reference, Value};
