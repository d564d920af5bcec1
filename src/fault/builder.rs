//! Builder for constructing faults and fault aggregates.

use crate::core::{Introspect, Origin, Value};
use crate::fault::aggregate::FaultAggregate;
use crate::fault::error::ContractViolation;
use crate::fault::property::{Cause, FaultKind, PropertyFault};
use std::error::Error;
use std::sync::Arc;

/// Builder for constructing faults with a fluent API.
///
/// Pick the origin first:
/// - [`FaultBuilder::for_origin`] for a live bean,
/// - [`FaultBuilder::in_initialization`] from inside a constructor, where
///   the bean must not leak: only its type is recorded,
/// - [`FaultBuilder::for_type`] when no instance exists at all.
///
/// # Example
///
/// ```rust
/// use rousseau::fault::FaultBuilder;
/// use rousseau::introspect;
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct Person {
///     name: String,
/// }
///
/// introspect! {
///     Person { name }
/// }
///
/// let person = Arc::new(Person { name: String::new() });
/// let fault = FaultBuilder::for_origin(&person)
///     .property("name")
///     .message("required")
///     .build_value()
///     .unwrap();
///
/// assert_eq!(fault.property_name(), Some("name"));
/// assert!(fault.origin_object().is_some());
/// ```
pub struct FaultBuilder<'a> {
    origin: Origin,
    reader: Option<&'a dyn Introspect>,
    property_name: Option<String>,
    message: Option<String>,
    cause: Option<Cause>,
}

impl<'a> FaultBuilder<'a> {
    /// Faults about a live bean.
    pub fn for_origin<T: Introspect>(object: &'a Arc<T>) -> Self {
        let reader: &'a T = object;
        Self::with_origin(Origin::live(object), Some(reader))
    }

    /// Faults raised while `object` is still being constructed.
    ///
    /// The fault records only the type; current values can still be read
    /// for value faults.
    pub fn in_initialization<T: Introspect>(object: &'a T) -> Self {
        Self::with_origin(Origin::type_only::<T>(), Some(object))
    }

    /// Faults about a bean type, without any instance.
    pub fn for_type<T: Introspect>() -> Self {
        Self::with_origin(Origin::type_only::<T>(), None)
    }

    fn with_origin(origin: Origin, reader: Option<&'a dyn Introspect>) -> Self {
        Self {
            origin,
            reader,
            property_name: None,
            message: None,
            cause: None,
        }
    }

    /// Scope the fault to one property (optional).
    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.property_name = Some(name.into());
        self
    }

    /// Set the message or message key (optional).
    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(text.into());
        self
    }

    /// Wrap an underlying failure (optional).
    pub fn cause<E>(self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.shared_cause(Arc::new(cause))
    }

    /// Wrap an already shared underlying failure (optional).
    ///
    /// Faults sharing one cause handle are `like` each other.
    pub fn shared_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    fn check(&self) -> Result<(), ContractViolation> {
        if self.message.as_deref() == Some("") {
            return Err(ContractViolation::EmptyMessage);
        }
        if let Some(property) = &self.property_name {
            if property.is_empty() {
                return Err(ContractViolation::EmptyPropertyName);
            }
            let origin_type = self.origin.origin_type();
            if !origin_type.has_property(property) {
                return Err(ContractViolation::NoSuchProperty {
                    origin_type: origin_type.name(),
                    property: property.clone(),
                });
            }
        }
        Ok(())
    }

    fn current_value(
        &self,
        kind: &'static str,
    ) -> Result<(String, Option<Value>), ContractViolation> {
        let property = self
            .property_name
            .clone()
            .ok_or(ContractViolation::PropertyRequired { kind })?;
        let reader = self.reader.ok_or_else(|| ContractViolation::NoInstance {
            origin_type: self.origin.origin_type().name(),
            property: property.clone(),
        })?;
        let value = reader.property_value(&property).map(|v| v.safe_reference());
        Ok((property, value))
    }

    /// Build a plain property fault.
    pub fn build(self) -> Result<PropertyFault, ContractViolation> {
        self.check()?;
        Ok(PropertyFault::from_parts(
            self.origin,
            self.property_name,
            self.message,
            self.cause,
            FaultKind::Property,
        ))
    }

    /// Build a fault that captures the property's current value.
    pub fn build_value(self) -> Result<PropertyFault, ContractViolation> {
        self.check()?;
        let (property, property_value) = self.current_value("ValueFault")?;
        Ok(PropertyFault::from_parts(
            self.origin,
            Some(property),
            self.message,
            self.cause,
            FaultKind::Value { property_value },
        ))
    }

    /// Build a fault for a setter that refused `vetoed`.
    pub fn build_setter(self, vetoed: Option<Value>) -> Result<PropertyFault, ContractViolation> {
        self.check()?;
        let (property, property_value) = self.current_value("SetterFault")?;
        Ok(PropertyFault::from_parts(
            self.origin,
            Some(property),
            self.message,
            self.cause,
            FaultKind::Setter {
                property_value,
                vetoed_value: vetoed.map(|v| v.safe_reference()),
            },
        ))
    }

    /// Build an open aggregate targeted at this origin and property.
    pub fn build_aggregate(self) -> Result<FaultAggregate, ContractViolation> {
        self.check()?;
        Ok(FaultAggregate::from_parts(
            Some(self.origin),
            self.property_name,
            self.message,
            self.cause,
        ))
    }
}
