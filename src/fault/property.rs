//! Single-violation fault records.

use crate::core::{safe_reference, Introspect, Origin, OriginType, Value};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Underlying failure wrapped by a fault. Compared by reference.
pub type Cause = Arc<dyn Error + Send + Sync>;

/// What a fault records beyond origin, property, message and cause.
#[derive(Clone, Debug)]
pub enum FaultKind {
    /// The property (or the whole object) is wrong.
    Property,

    /// The property's current value is wrong; the value is kept.
    Value { property_value: Option<Value> },

    /// A setter refused a candidate value; both values are kept.
    Setter {
        property_value: Option<Value>,
        vetoed_value: Option<Value>,
    },
}

impl FaultKind {
    /// Name of the kind, used in messages and as bundle key prefix.
    pub fn name(&self) -> &'static str {
        match self {
            FaultKind::Property => "PropertyFault",
            FaultKind::Value { .. } => "ValueFault",
            FaultKind::Setter { .. } => "SetterFault",
        }
    }
}

/// Read-only view shared by every fault shape, used for presentation.
pub trait FaultReport {
    fn kind_name(&self) -> &'static str;

    /// Type of the bean the fault is about, if scoped to one.
    fn report_origin_type(&self) -> Option<OriginType>;

    fn property_name(&self) -> Option<&str>;

    fn message(&self) -> Option<&str>;

    /// Current property value, for faults that captured one.
    fn report_property_value(&self) -> Option<Value> {
        None
    }

    /// Value vetoed by a setter, for faults that captured one.
    fn report_vetoed_value(&self) -> Option<Value> {
        None
    }
}

/// One recorded violation of one bean (or bean type), optionally scoped to
/// one property.
///
/// Faults are immutable report objects. They have no value equality;
/// use [`PropertyFault::like`] to ask whether two faults report the same
/// thing. Build them with [`FaultBuilder`](super::FaultBuilder).
#[derive(Clone, Debug)]
pub struct PropertyFault {
    origin: Origin,
    property_name: Option<String>,
    message: Option<String>,
    cause: Option<Cause>,
    kind: FaultKind,
}

impl PropertyFault {
    pub(crate) fn from_parts(
        origin: Origin,
        property_name: Option<String>,
        message: Option<String>,
        cause: Option<Cause>,
        kind: FaultKind,
    ) -> Self {
        Self {
            origin,
            property_name,
            message,
            cause,
            kind,
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// The failing bean; `None` for type-only faults.
    pub fn origin_object(&self) -> Option<&Arc<dyn Introspect>> {
        self.origin.object()
    }

    pub fn origin_type(&self) -> OriginType {
        self.origin.origin_type()
    }

    /// `None` means the fault applies to the object as a whole.
    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub fn kind(&self) -> &FaultKind {
        &self.kind
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Snapshot of the property value at fault time.
    ///
    /// Copyable values are duplicated on every call.
    pub fn property_value(&self) -> Option<Value> {
        match &self.kind {
            FaultKind::Property => None,
            FaultKind::Value { property_value } | FaultKind::Setter { property_value, .. } => {
                safe_reference(property_value.as_ref())
            }
        }
    }

    /// The value a setter refused.
    ///
    /// Copyable values are duplicated on every call.
    pub fn vetoed_value(&self) -> Option<Value> {
        match &self.kind {
            FaultKind::Setter { vetoed_value, .. } => safe_reference(vetoed_value.as_ref()),
            _ => None,
        }
    }

    /// Whether `other` reports the same thing.
    ///
    /// Same kind, same origin object (by reference), same origin type,
    /// same property name, same message, same cause (by reference), and
    /// equal captured values. `None` values are only like `None`.
    pub fn like(&self, other: &PropertyFault) -> bool {
        self.kind_name() == other.kind_name()
            && self.origin.like(&other.origin)
            && self.property_name == other.property_name
            && self.message == other.message
            && same_cause(self.cause.as_ref(), other.cause.as_ref())
            && self.property_value() == other.property_value()
            && self.vetoed_value() == other.vetoed_value()
    }
}

pub(crate) fn same_cause(a: Option<&Cause>, b: Option<&Cause>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
        }
        (None, None) => true,
        _ => false,
    }
}

impl FaultReport for PropertyFault {
    fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    fn report_origin_type(&self) -> Option<OriginType> {
        Some(self.origin_type())
    }

    fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn report_property_value(&self) -> Option<Value> {
        self.property_value()
    }

    fn report_vetoed_value(&self) -> Option<Value> {
        self.vetoed_value()
    }
}

impl fmt::Display for PropertyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.kind_name(), self.origin_type())?;
        if let Some(property) = &self.property_name {
            write!(f, ".{}", property)?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl Error for PropertyFault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}
