//! Property introspection capability.
//!
//! Fault construction only ever asks two questions about a bean type:
//! "do you have a property called `p`?" and "what does `p` hold right
//! now?". [`Introspect`] is that capability. Implement it by hand, or
//! register a property table with the [`introspect!`](crate::introspect)
//! macro.

use super::value::Value;
use std::any::Any;
use std::fmt::Debug;

/// Answers property existence and property value queries for a type.
///
/// Property names are opaque to this crate: implementations may accept
/// dotted paths such as `"address.street"` if their application uses them.
///
/// # Example
///
/// ```rust
/// use rousseau::core::{Introspect, Value};
///
/// #[derive(Debug)]
/// struct Person {
///     name: String,
/// }
///
/// impl Introspect for Person {
///     fn has_property(name: &str) -> bool {
///         name == "name"
///     }
///
///     fn property_value(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(Value::copyable(self.name.clone())),
///             _ => None,
///         }
///     }
/// }
///
/// assert!(Person::has_property("name"));
/// assert!(!Person::has_property("age"));
/// ```
pub trait Introspect: Any + Debug + Send + Sync {
    /// Whether values of this type expose a property with this name.
    fn has_property(name: &str) -> bool
    where
        Self: Sized;

    /// Current value of the named property; `None` when it holds no value.
    fn property_value(&self, name: &str) -> Option<Value>;

    /// Name used in messages and as the type's own bundle name.
    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }

    /// Bundle base names consulted for this type's messages, most
    /// specific first.
    fn bundle_chain() -> Vec<&'static str>
    where
        Self: Sized,
    {
        vec![Self::type_name()]
    }
}

/// Conversion of a field into a captured [`Value`].
///
/// Used by the [`introspect!`](crate::introspect) macro. Owned containers
/// are captured as copyable values, plain scalars as shared ones, and
/// `Option::None` as no value at all.
pub trait ToValue {
    fn to_value(&self) -> Option<Value>;
}

macro_rules! shared_to_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Option<Value> {
                    Some(Value::shared(*self))
                }
            }
        )*
    };
}

shared_to_value!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    &'static str,
);

impl ToValue for String {
    fn to_value(&self) -> Option<Value> {
        Some(Value::copyable(self.clone()))
    }
}

impl<T> ToValue for Vec<T>
where
    T: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    fn to_value(&self) -> Option<Value> {
        Some(Value::copyable(self.clone()))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(ToValue::to_value)
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Option<Value> {
        Some(self.safe_reference())
    }
}
