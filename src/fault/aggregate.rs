//! Open fault aggregates: collect every violation before reporting.
//!
//! A [`FaultAggregate`] is the collecting phase. Faults are appended one
//! at a time, bucketed by property name. [`FaultAggregate::close`]
//! consumes the aggregate and yields an immutable
//! [`CompoundFault`](super::CompoundFault); a closed aggregate cannot be
//! closed again or appended to, because the open one no longer exists.
//!
//! ```compile_fail
//! use rousseau::fault::FaultAggregate;
//!
//! let aggregate = FaultAggregate::new();
//! let closed = aggregate.close();
//! let again = aggregate.close(); // use of moved value
//! ```

use crate::core::{Introspect, Origin};
use crate::fault::compound::{CompoundFault, Fault};
use crate::fault::error::ContractViolation;
use crate::fault::property::{Cause, FaultReport, PropertyFault};
use std::collections::BTreeMap;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, trace};

/// Faults bucketed by property name; `None` holds object-wide faults.
///
/// Buckets are never empty.
pub type ElementFaults = BTreeMap<Option<String>, Vec<PropertyFault>>;

/// Result of one accumulating check.
pub type FaultCheck = Validation<(), NonEmptyVec<PropertyFault>>;

/// An open, growing collection of faults.
///
/// The aggregate has its own target: an optional origin and an optional
/// property name. Every appended fault must match that target.
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
///     age: u32,
/// }
///
/// introspect! {
///     Person { name, age }
/// }
///
/// let person = Arc::new(Person { name: String::new(), age: 200 });
/// let mut aggregate = FaultAggregate::for_origin(&person);
///
/// let required = FaultBuilder::for_origin(&person)
///     .property("name")
///     .message("required")
///     .build()
///     .unwrap();
/// let out_of_range = FaultBuilder::for_origin(&person)
///     .property("age")
///     .message("out of range")
///     .build()
///     .unwrap();
/// aggregate.add_element_fault(required).unwrap();
/// aggregate.add_element_fault(out_of_range).unwrap();
///
/// match aggregate.throw_if_not_empty() {
///     Err(Fault::Compound(compound)) => assert_eq!(compound.size(), 2),
///     _ => panic!("expected a compound fault"),
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct FaultAggregate {
    target: Option<Origin>,
    property_name: Option<String>,
    message: Option<String>,
    cause: Option<Cause>,
    elements: ElementFaults,
}

impl FaultAggregate {
    /// An unscoped aggregate, for gathering faults over many beans.
    pub fn new() -> Self {
        Self::default()
    }

    /// An aggregate scoped to the whole of `object`.
    pub fn for_origin<T: Introspect>(object: &Arc<T>) -> Self {
        Self::from_parts(Some(Origin::live(object)), None, None, None)
    }

    pub(crate) fn from_parts(
        target: Option<Origin>,
        property_name: Option<String>,
        message: Option<String>,
        cause: Option<Cause>,
    ) -> Self {
        Self {
            target,
            property_name,
            message,
            cause,
            elements: ElementFaults::new(),
        }
    }

    /// Always `false`: closing consumes the aggregate.
    pub fn is_closed(&self) -> bool {
        false
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total number of faults over all buckets.
    pub fn size(&self) -> usize {
        self.elements.values().map(Vec::len).sum()
    }

    pub fn target_origin(&self) -> Option<&Origin> {
        self.target.as_ref()
    }

    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Snapshot of the buckets.
    ///
    /// The copy is detached: later appends do not show up in it.
    pub fn element_faults(&self) -> ElementFaults {
        self.elements.clone()
    }

    pub(crate) fn elements(&self) -> &ElementFaults {
        &self.elements
    }

    /// Faults not attributed to a single property.
    pub fn general_element_faults(&self) -> &[PropertyFault] {
        self.elements
            .get(&None)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every fault, over all buckets.
    pub fn all_element_faults(&self) -> Vec<&PropertyFault> {
        self.elements.values().flatten().collect()
    }

    /// Some fault of this aggregate, or `None` when empty.
    pub fn an_element(&self) -> Option<&PropertyFault> {
        self.elements.values().flatten().next()
    }

    /// Whether a fault `like` the given one is in its property's bucket.
    pub fn contains(&self, fault: &PropertyFault) -> bool {
        let key = fault.property_name().map(str::to_owned);
        self.elements
            .get(&key)
            .is_some_and(|bucket| bucket.iter().any(|candidate| candidate.like(fault)))
    }

    /// Append a fault to the bucket of its property name.
    ///
    /// Fails when the aggregate targets a property and the fault is about
    /// another one, or when the fault's origin does not match the target
    /// origin (by reference for live origins, by type otherwise). A failed
    /// append leaves the aggregate unchanged.
    pub fn add_element_fault(&mut self, fault: PropertyFault) -> Result<(), ContractViolation> {
        self.check_target(&fault)?;
        self.insert(fault);
        Ok(())
    }

    fn check_target(&self, fault: &PropertyFault) -> Result<(), ContractViolation> {
        if let Some(expected) = &self.property_name {
            if fault.property_name() != Some(expected.as_str()) {
                return Err(ContractViolation::PropertyMismatch {
                    expected: expected.clone(),
                    actual: fault.property_name().map(str::to_owned),
                });
            }
        }
        match &self.target {
            Some(target @ Origin::Live { .. }) => {
                if !target.same_object(fault.origin()) {
                    return Err(ContractViolation::OriginMismatch {
                        expected: target.to_string(),
                    });
                }
            }
            Some(Origin::TypeOnly(expected)) => {
                if fault.origin_type() != *expected {
                    return Err(ContractViolation::OriginTypeMismatch {
                        expected: expected.name(),
                        actual: fault.origin_type().name(),
                    });
                }
            }
            None => {}
        }
        Ok(())
    }

    /// Append without target checks. Only sound on unscoped aggregates.
    pub(crate) fn insert(&mut self, fault: PropertyFault) {
        trace!(
            kind = fault.kind_name(),
            origin_type = fault.origin_type().name(),
            property = ?fault.property_name(),
            "adding element fault"
        );
        self.elements
            .entry(fault.property_name().map(str::to_owned))
            .or_default()
            .push(fault);
    }

    /// Append every failure of an accumulating check.
    ///
    /// All or nothing: when one failure does not match the target, none
    /// of them are appended.
    pub fn absorb(&mut self, check: FaultCheck) -> Result<(), ContractViolation> {
        if let Validation::Failure(faults) = check {
            for fault in faults.iter() {
                self.check_target(fault)?;
            }
            for fault in faults.iter() {
                self.insert(fault.clone());
            }
        }
        Ok(())
    }

    /// Run all checks, accumulating ALL failures, and append them.
    pub fn absorb_all(&mut self, checks: Vec<FaultCheck>) -> Result<(), ContractViolation> {
        self.absorb(Validation::all_vec(checks).map(|_| ()))
    }

    /// Stop collecting: freeze into an immutable compound fault.
    pub fn close(self) -> CompoundFault {
        debug!(
            size = self.size(),
            properties = self.elements.len(),
            "closing fault aggregate"
        );
        CompoundFault::freeze(self)
    }

    /// Close, then fail if anything was collected.
    ///
    /// One fault fails as that [`PropertyFault`]; two or more fail as the
    /// closed aggregate. An empty aggregate comes back closed.
    pub fn throw_if_not_empty(self) -> Result<CompoundFault, Fault> {
        self.close().throw_if_not_empty()
    }
}

impl FaultReport for FaultAggregate {
    fn kind_name(&self) -> &'static str {
        CompoundFault::KIND
    }

    fn report_origin_type(&self) -> Option<crate::core::OriginType> {
        self.target.as_ref().map(Origin::origin_type)
    }

    fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::fault::FaultBuilder;

    #[derive(Debug)]
    struct Person {
        name: String,
        age: u32,
    }

    crate::introspect! {
        Person { name, age }
    }

    #[derive(Debug)]
    struct Pet {
        name: String,
    }

    crate::introspect! {
        Pet { name }
    }

    fn alice() -> Arc<Person> {
        Arc::new(Person {
            name: "Alice".to_string(),
            age: 200,
        })
    }

    fn fault(person: &Arc<Person>, property: &str, message: &str) -> PropertyFault {
        FaultBuilder::for_origin(person)
            .property(property)
            .message(message)
            .build()
            .unwrap()
    }

    #[test]
    fn new_aggregate_is_open_and_empty() {
        let aggregate = FaultAggregate::new();

        assert!(!aggregate.is_closed());
        assert!(aggregate.is_empty());
        assert_eq!(aggregate.size(), 0);
        assert!(aggregate.an_element().is_none());
        assert!(aggregate.general_element_faults().is_empty());
        assert!(aggregate.all_element_faults().is_empty());
        assert!(aggregate.target_origin().is_none());
    }

    #[test]
    fn faults_are_bucketed_by_property_name() {
        let person = alice();
        let mut aggregate = FaultAggregate::for_origin(&person);

        aggregate
            .add_element_fault(fault(&person, "name", "required"))
            .unwrap();
        aggregate
            .add_element_fault(fault(&person, "age", "out of range"))
            .unwrap();
        aggregate
            .add_element_fault(fault(&person, "age", "not a number"))
            .unwrap();
        aggregate
            .add_element_fault(FaultBuilder::for_origin(&person).build().unwrap())
            .unwrap();

        let buckets = aggregate.element_faults();
        assert_eq!(aggregate.size(), 4);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[&Some("name".to_string())].len(), 1);
        assert_eq!(buckets[&Some("age".to_string())].len(), 2);
        assert_eq!(aggregate.general_element_faults().len(), 1);
        assert_eq!(aggregate.all_element_faults().len(), 4);
        for (key, bucket) in &buckets {
            assert!(!bucket.is_empty());
            assert!(bucket.iter().all(|f| f.property_name() == key.as_deref()));
        }
    }

    #[test]
    fn contains_uses_like() {
        let person = alice();
        let mut aggregate = FaultAggregate::for_origin(&person);
        aggregate
            .add_element_fault(fault(&person, "name", "required"))
            .unwrap();

        assert!(aggregate.contains(&fault(&person, "name", "required")));
        assert!(!aggregate.contains(&fault(&person, "name", "too long")));
        assert!(!aggregate.contains(&fault(&person, "age", "required")));
    }

    #[test]
    fn snapshots_are_isolated_from_later_appends() {
        let person = alice();
        let mut aggregate = FaultAggregate::for_origin(&person);
        aggregate
            .add_element_fault(fault(&person, "name", "required"))
            .unwrap();

        let snapshot = aggregate.element_faults();
        aggregate
            .add_element_fault(fault(&person, "name", "too short"))
            .unwrap();
        aggregate
            .add_element_fault(fault(&person, "age", "out of range"))
            .unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[&Some("name".to_string())].len(), 1);
        assert_eq!(aggregate.size(), 3);
    }

    #[test]
    fn targeted_aggregate_rejects_other_properties() {
        let person = alice();
        let mut aggregate = FaultBuilder::for_origin(&person)
            .property("name")
            .build_aggregate()
            .unwrap();

        let result = aggregate.add_element_fault(fault(&person, "age", "out of range"));

        assert_eq!(
            result,
            Err(ContractViolation::PropertyMismatch {
                expected: "name".to_string(),
                actual: Some("age".to_string()),
            })
        );
        assert_eq!(aggregate.size(), 0);

        aggregate
            .add_element_fault(fault(&person, "name", "required"))
            .unwrap();
        assert_eq!(aggregate.size(), 1);
        assert_eq!(aggregate.element_faults().len(), 1);
    }

    #[test]
    fn targeted_aggregate_rejects_general_faults() {
        let person = alice();
        let mut aggregate = FaultBuilder::for_origin(&person)
            .property("name")
            .build_aggregate()
            .unwrap();

        let general = FaultBuilder::for_origin(&person).build().unwrap();
        assert!(aggregate.add_element_fault(general).is_err());
        assert!(aggregate.is_empty());
    }

    #[test]
    fn live_target_rejects_other_objects() {
        let person = alice();
        let twin = alice();
        let mut aggregate = FaultAggregate::for_origin(&person);

        let result = aggregate.add_element_fault(fault(&twin, "name", "required"));
        assert!(matches!(result, Err(ContractViolation::OriginMismatch { .. })));

        let type_only = FaultBuilder::for_type::<Person>()
            .property("name")
            .build()
            .unwrap();
        assert!(aggregate.add_element_fault(type_only).is_err());
        assert!(aggregate.is_empty());
    }

    #[test]
    fn type_target_rejects_other_types() {
        let mut aggregate = FaultBuilder::for_type::<Person>()
            .build_aggregate()
            .unwrap();
        let pet = Arc::new(Pet {
            name: "Rex".to_string(),
        });
        let pet_name = FaultBuilder::for_origin(&pet)
            .property("name")
            .build()
            .unwrap();

        let result = aggregate.add_element_fault(pet_name);
        assert_eq!(
            result,
            Err(ContractViolation::OriginTypeMismatch {
                expected: "Person",
                actual: "Pet",
            })
        );

        let person_name = FaultBuilder::for_origin(&alice())
            .property("name")
            .build()
            .unwrap();
        aggregate.add_element_fault(person_name).unwrap();
        assert_eq!(aggregate.size(), 1);
    }

    #[test]
    fn unscoped_aggregate_accepts_any_origin() {
        let mut aggregate = FaultAggregate::new();
        let pet = Arc::new(Pet {
            name: "Rex".to_string(),
        });

        aggregate
            .add_element_fault(fault(&alice(), "name", "required"))
            .unwrap();
        let pet_name = FaultBuilder::for_origin(&pet)
            .property("name")
            .build()
            .unwrap();
        aggregate.add_element_fault(pet_name).unwrap();

        assert_eq!(aggregate.size(), 2);
        assert_eq!(aggregate.element_faults().len(), 1);
    }

    #[test]
    fn single_fault_is_thrown_unwrapped() {
        let person = alice();
        let fault1 = FaultBuilder::for_origin(&person)
            .property("name")
            .message("required")
            .build_value()
            .unwrap();
        let mut aggregate = FaultAggregate::new();
        aggregate.add_element_fault(fault1.clone()).unwrap();

        assert_eq!(aggregate.size(), 1);
        match aggregate.throw_if_not_empty() {
            Err(Fault::Property(thrown)) => {
                assert!(thrown.like(&fault1));
                assert_eq!(
                    thrown.property_value(),
                    Some(Value::copyable("Alice".to_string()))
                );
            }
            other => panic!("expected the single fault, got {:?}", other),
        }
    }

    #[test]
    fn several_faults_are_thrown_as_compound() {
        let person = alice();
        let mut aggregate = FaultAggregate::new();
        aggregate
            .add_element_fault(fault(&person, "name", "required"))
            .unwrap();
        aggregate
            .add_element_fault(fault(&person, "age", "out of range"))
            .unwrap();

        match aggregate.throw_if_not_empty() {
            Err(Fault::Compound(compound)) => {
                assert!(compound.is_closed());
                let keys: Vec<_> = compound.element_faults().keys().cloned().collect();
                assert_eq!(
                    keys,
                    vec![Some("age".to_string()), Some("name".to_string())]
                );
                assert!(compound.element_faults().values().all(|b| b.len() == 1));
            }
            other => panic!("expected a compound fault, got {:?}", other),
        }
    }

    #[test]
    fn empty_aggregate_does_not_throw_and_is_closed() {
        let closed = FaultAggregate::new().throw_if_not_empty().unwrap();

        assert!(closed.is_closed());
        assert!(closed.is_empty());
    }

    #[test]
    fn absorb_collects_every_failure() {
        let person = alice();
        let checks: Vec<FaultCheck> = vec![
            Validation::fail(fault(&person, "name", "required")),
            Validation::success(()),
            Validation::fail(fault(&person, "age", "out of range")),
        ];
        let mut aggregate = FaultAggregate::for_origin(&person);

        aggregate.absorb_all(checks).unwrap();

        assert_eq!(aggregate.size(), 2);
        assert!(aggregate.contains(&fault(&person, "name", "required")));
        assert!(aggregate.contains(&fault(&person, "age", "out of range")));
    }

    #[test]
    fn absorb_checks_the_target() {
        let person = alice();
        let twin = alice();
        let mut aggregate = FaultAggregate::for_origin(&person);

        let result = aggregate.absorb(Validation::fail(fault(&twin, "name", "required")));

        assert!(result.is_err());
        assert!(aggregate.is_empty());
    }

    #[test]
    fn absorb_rejects_the_whole_batch_on_one_foreign_fault() {
        let person = alice();
        let twin = alice();
        let checks: Vec<FaultCheck> = vec![
            Validation::fail(fault(&person, "name", "required")),
            Validation::fail(fault(&twin, "age", "out of range")),
            Validation::fail(fault(&person, "age", "out of range")),
        ];
        let mut aggregate = FaultAggregate::for_origin(&person);

        let result = aggregate.absorb_all(checks);

        assert!(matches!(result, Err(ContractViolation::OriginMismatch { .. })));
        assert_eq!(aggregate.size(), 0);
        assert!(aggregate.is_empty());
    }

    #[test]
    fn absorb_into_targeted_aggregate_is_all_or_nothing() {
        let person = alice();
        let mut aggregate = FaultBuilder::for_origin(&person)
            .property("name")
            .build_aggregate()
            .unwrap();
        aggregate
            .add_element_fault(fault(&person, "name", "too short"))
            .unwrap();

        let mixed = Validation::all_vec(vec![
            Validation::fail(fault(&person, "name", "required")),
            Validation::fail(fault(&person, "age", "out of range")),
        ])
        .map(|_: Vec<()>| ());
        let result = aggregate.absorb(mixed);

        assert!(matches!(result, Err(ContractViolation::PropertyMismatch { .. })));
        assert_eq!(aggregate.size(), 1);
        assert!(!aggregate.contains(&fault(&person, "name", "required")));
    }

    #[test]
    fn absorbing_success_adds_nothing() {
        let mut aggregate = FaultAggregate::new();
        aggregate.absorb(Validation::success(())).unwrap();

        assert!(aggregate.is_empty());
    }
}
