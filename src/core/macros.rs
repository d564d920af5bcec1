//! Macros for registering property tables.

/// Generate an [`Introspect`](crate::core::Introspect) implementation
/// from a list of fields.
///
/// Each listed field becomes a property of the same name; its value is
/// captured through [`ToValue`](crate::core::ToValue). The type name used
/// in messages and bundle lookups is the struct's identifier.
///
/// # Example
///
/// ```
/// use rousseau::introspect;
/// use rousseau::core::{Introspect, Value};
///
/// #[derive(Debug)]
/// pub struct Person {
///     name: String,
///     age: Option<u32>,
/// }
///
/// introspect! {
///     Person { name, age }
/// }
///
/// let person = Person { name: "Alice".to_string(), age: None };
///
/// assert!(Person::has_property("age"));
/// assert_eq!(Person::type_name(), "Person");
/// assert_eq!(person.property_value("name"), Some(Value::copyable("Alice".to_string())));
/// assert!(person.property_value("age").is_none());
/// ```
#[macro_export]
macro_rules! introspect {
    (
        $ty:ident {
            $($field:ident),+ $(,)?
        }
        $(bundles: [$($bundle:expr),* $(,)?])?
    ) => {
        impl $crate::core::Introspect for $ty {
            fn has_property(name: &str) -> bool {
                [$(stringify!($field)),+]
                    .iter()
                    .any(|candidate| *candidate == name)
            }

            fn property_value(&self, name: &str) -> ::std::option::Option<$crate::core::Value> {
                $(
                    if name == stringify!($field) {
                        return $crate::core::ToValue::to_value(&self.$field);
                    }
                )+
                ::std::option::Option::None
            }

            fn type_name() -> &'static str {
                stringify!($ty)
            }

            $(
                fn bundle_chain() -> ::std::vec::Vec<&'static str> {
                    let mut chain = ::std::vec![stringify!($ty)];
                    $(chain.push($bundle);)*
                    chain
                }
            )?
        }
    };
}
