//! Closed fault aggregates and the fault type callers receive.

use crate::core::{Origin, OriginType, Value};
use crate::fault::aggregate::{ElementFaults, FaultAggregate, FaultCheck};
use crate::fault::property::{same_cause, Cause, FaultReport, PropertyFault};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use stillwater::validation::Validation;

/// An immutable, closed set of faults.
///
/// Produced by [`FaultAggregate::close`]. Cloning is cheap and clones
/// share the frozen buckets, so a compound fault can be handed to other
/// threads once closed.
#[derive(Clone, Debug)]
pub struct CompoundFault {
    frozen: Arc<FaultAggregate>,
}

impl CompoundFault {
    /// Kind name used in messages and as bundle key prefix.
    pub const KIND: &'static str = "CompoundFault";

    pub(crate) fn freeze(aggregate: FaultAggregate) -> Self {
        Self {
            frozen: Arc::new(aggregate),
        }
    }

    /// Always `true`.
    pub fn is_closed(&self) -> bool {
        true
    }

    pub fn is_empty(&self) -> bool {
        self.frozen.is_empty()
    }

    pub fn size(&self) -> usize {
        self.frozen.size()
    }

    pub fn target_origin(&self) -> Option<&Origin> {
        self.frozen.target_origin()
    }

    pub fn property_name(&self) -> Option<&str> {
        self.frozen.property_name()
    }

    pub fn message(&self) -> Option<&str> {
        self.frozen.message()
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.frozen.cause()
    }

    /// The frozen buckets, shared rather than copied.
    pub fn element_faults(&self) -> &ElementFaults {
        self.frozen.elements()
    }

    pub fn general_element_faults(&self) -> &[PropertyFault] {
        self.frozen.general_element_faults()
    }

    pub fn all_element_faults(&self) -> Vec<&PropertyFault> {
        self.frozen.all_element_faults()
    }

    pub fn an_element(&self) -> Option<&PropertyFault> {
        self.frozen.an_element()
    }

    pub fn contains(&self, fault: &PropertyFault) -> bool {
        self.frozen.contains(fault)
    }

    /// Fail if anything was collected.
    ///
    /// One fault fails as that fault, more fail as `self`; an empty
    /// compound is returned unchanged.
    pub fn throw_if_not_empty(self) -> Result<Self, Fault> {
        if self.size() > 1 {
            return Err(Fault::Compound(self));
        }
        match self.an_element() {
            Some(single) => Err(Fault::Property(single.clone())),
            None => Ok(self),
        }
    }

    /// Same target and, element for element, `like` faults.
    pub fn like(&self, other: &CompoundFault) -> bool {
        let targets_like = match (self.target_origin(), other.target_origin()) {
            (Some(a), Some(b)) => a.like(b),
            (None, None) => true,
            _ => false,
        };
        targets_like
            && self.property_name() == other.property_name()
            && self.message() == other.message()
            && same_cause(self.cause(), other.cause())
            && self.size() == other.size()
            && self.all_element_faults().iter().all(|f| other.contains(f))
            && other.all_element_faults().iter().all(|f| self.contains(f))
    }

    /// Convert back into an accumulated validation result.
    ///
    /// Succeeds exactly when the compound is empty.
    pub fn to_validation(&self) -> FaultCheck {
        let checks: Vec<FaultCheck> = self
            .all_element_faults()
            .into_iter()
            .cloned()
            .map(Validation::fail)
            .collect();
        Validation::all_vec(checks).map(|_| ())
    }
}

impl FaultReport for CompoundFault {
    fn kind_name(&self) -> &'static str {
        Self::KIND
    }

    fn report_origin_type(&self) -> Option<OriginType> {
        self.target_origin().map(Origin::origin_type)
    }

    fn property_name(&self) -> Option<&str> {
        self.frozen.property_name()
    }

    fn message(&self) -> Option<&str> {
        self.frozen.message()
    }
}

impl fmt::Display for CompoundFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::KIND)?;
        if let Some(origin) = self.target_origin() {
            write!(f, " on {}", origin.origin_type())?;
            if let Some(property) = self.property_name() {
                write!(f, ".{}", property)?;
            }
        }
        if let Some(message) = self.message() {
            write!(f, ": {}", message)?;
        }
        write!(f, " ({} faults", self.size())?;
        let properties: Vec<&str> = self
            .element_faults()
            .keys()
            .map(|key| key.as_deref().unwrap_or("*"))
            .collect();
        if !properties.is_empty() {
            write!(f, " on {}", properties.join(", "))?;
        }
        write!(f, ")")
    }
}

impl Error for CompoundFault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause()
            .map(|cause| cause.as_ref() as &(dyn Error + 'static))
    }
}

/// A reported validation failure: one fault, or several at once.
///
/// # Example
///
/// ```rust
/// use rousseau::fault::{Fault, FaultAggregate, FaultBuilder};
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
/// fn validate(person: &Arc<Person>) -> Result<(), Fault> {
///     let mut aggregate = FaultAggregate::for_origin(person);
///     if person.name.is_empty() {
///         let fault = FaultBuilder::for_origin(person)
///             .property("name")
///             .message("required")
///             .build_value()
///             .expect("name is a property of Person");
///         aggregate.add_element_fault(fault).expect("fault targets this person");
///     }
///     aggregate.throw_if_not_empty().map(|_| ())
/// }
///
/// let err = validate(&Arc::new(Person { name: String::new() })).unwrap_err();
/// assert!(matches!(err, Fault::Property(_)));
/// assert_eq!(err.to_string(), "ValueFault on Person.name: required");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
pub enum Fault {
    #[error(transparent)]
    Property(#[from] PropertyFault),

    #[error(transparent)]
    Compound(#[from] CompoundFault),
}

impl Fault {
    /// Number of faults reported.
    pub fn size(&self) -> usize {
        match self {
            Fault::Property(_) => 1,
            Fault::Compound(compound) => compound.size(),
        }
    }

    /// Every reported fault.
    pub fn faults(&self) -> Vec<&PropertyFault> {
        match self {
            Fault::Property(fault) => vec![fault],
            Fault::Compound(compound) => compound.all_element_faults(),
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Fault::Compound(_))
    }

    pub fn as_property(&self) -> Option<&PropertyFault> {
        match self {
            Fault::Property(fault) => Some(fault),
            Fault::Compound(_) => None,
        }
    }

    pub fn as_compound(&self) -> Option<&CompoundFault> {
        match self {
            Fault::Compound(compound) => Some(compound),
            Fault::Property(_) => None,
        }
    }

    pub fn like(&self, other: &Fault) -> bool {
        match (self, other) {
            (Fault::Property(a), Fault::Property(b)) => a.like(b),
            (Fault::Compound(a), Fault::Compound(b)) => a.like(b),
            _ => false,
        }
    }
}

impl FaultReport for Fault {
    fn kind_name(&self) -> &'static str {
        match self {
            Fault::Property(fault) => fault.kind_name(),
            Fault::Compound(compound) => FaultReport::kind_name(compound),
        }
    }

    fn report_origin_type(&self) -> Option<OriginType> {
        match self {
            Fault::Property(fault) => fault.report_origin_type(),
            Fault::Compound(compound) => compound.report_origin_type(),
        }
    }

    fn property_name(&self) -> Option<&str> {
        match self {
            Fault::Property(fault) => fault.property_name(),
            Fault::Compound(compound) => compound.property_name(),
        }
    }

    fn message(&self) -> Option<&str> {
        match self {
            Fault::Property(fault) => fault.message(),
            Fault::Compound(compound) => compound.message(),
        }
    }

    fn report_property_value(&self) -> Option<Value> {
        self.as_property().and_then(PropertyFault::property_value)
    }

    fn report_vetoed_value(&self) -> Option<Value> {
        self.as_property().and_then(PropertyFault::vetoed_value)
    }
}
