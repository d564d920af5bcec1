//! Property-based tests for fault aggregation.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use rousseau::core::Value;
use rousseau::fault::{ContractViolation, Fault, FaultAggregate, FaultBuilder, PropertyFault};
use rousseau::introspect;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct Account {
    owner: String,
    balance: i64,
    tags: Vec<String>,
}

introspect! {
    Account { owner, balance, tags }
}

/// A bean whose property can change after a fault was recorded.
#[derive(Debug)]
struct Counter {
    history: Mutex<Vec<u32>>,
}

impl rousseau::core::Introspect for Counter {
    fn has_property(name: &str) -> bool {
        name == "history"
    }

    fn property_value(&self, name: &str) -> Option<Value> {
        match name {
            "history" => self.history.lock().ok().map(|h| Value::copyable(h.clone())),
            _ => None,
        }
    }
}

const PROPERTIES: [Option<&str>; 4] = [None, Some("owner"), Some("balance"), Some("tags")];
const MESSAGES: [Option<&str>; 3] = [None, Some("required"), Some("out of range")];

fn account() -> Arc<Account> {
    Arc::new(Account {
        owner: "Alice".to_string(),
        balance: -5,
        tags: vec!["vip".to_string()],
    })
}

fn fault(account: &Arc<Account>, property: Option<&str>, message: Option<&str>) -> PropertyFault {
    let mut builder = FaultBuilder::for_origin(account);
    if let Some(property) = property {
        builder = builder.property(property);
    }
    if let Some(message) = message {
        builder = builder.message(message);
    }
    builder
        .build()
        .expect("generated faults name existing properties")
}

prop_compose! {
    fn arbitrary_shape()(property in 0..PROPERTIES.len(), message in 0..MESSAGES.len())
        -> (Option<&'static str>, Option<&'static str>) {
        (PROPERTIES[property], MESSAGES[message])
    }
}

proptest! {
    #[test]
    fn size_counts_every_append(shapes in prop::collection::vec(arbitrary_shape(), 0..20)) {
        let account = account();
        let mut aggregate = FaultAggregate::for_origin(&account);
        let faults: Vec<_> = shapes
            .iter()
            .map(|(p, m)| fault(&account, *p, *m))
            .collect();

        for f in &faults {
            aggregate.add_element_fault(f.clone()).unwrap();
        }

        prop_assert_eq!(aggregate.size(), shapes.len());
        prop_assert_eq!(aggregate.is_empty(), shapes.is_empty());
        for f in &faults {
            prop_assert!(aggregate.contains(f));
        }
    }

    #[test]
    fn buckets_hold_only_their_own_property(
        shapes in prop::collection::vec(arbitrary_shape(), 1..20),
    ) {
        let account = account();
        let mut aggregate = FaultAggregate::new();
        for (p, m) in &shapes {
            aggregate
                .add_element_fault(fault(&account, *p, *m))
                .unwrap();
        }

        for (key, bucket) in aggregate.element_faults() {
            prop_assert!(!bucket.is_empty());
            for f in &bucket {
                prop_assert_eq!(f.property_name(), key.as_deref());
            }
        }
    }

    #[test]
    fn snapshots_never_change(
        before in prop::collection::vec(arbitrary_shape(), 0..10),
        after in prop::collection::vec(arbitrary_shape(), 1..10),
    ) {
        let account = account();
        let mut aggregate = FaultAggregate::for_origin(&account);
        for (p, m) in &before {
            aggregate
                .add_element_fault(fault(&account, *p, *m))
                .unwrap();
        }

        let snapshot = aggregate.element_faults();
        let snapshot_size: usize = snapshot.values().map(Vec::len).sum();
        for (p, m) in &after {
            aggregate
                .add_element_fault(fault(&account, *p, *m))
                .unwrap();
        }

        prop_assert_eq!(snapshot_size, before.len());
        prop_assert_eq!(aggregate.size(), before.len() + after.len());
    }

    #[test]
    fn throw_if_not_empty_depends_on_cardinality(
        shapes in prop::collection::vec(arbitrary_shape(), 0..6),
    ) {
        let account = account();
        let mut aggregate = FaultAggregate::new();
        let faults: Vec<_> = shapes
            .iter()
            .map(|(p, m)| fault(&account, *p, *m))
            .collect();
        for f in &faults {
            aggregate.add_element_fault(f.clone()).unwrap();
        }

        match (faults.len(), aggregate.throw_if_not_empty()) {
            (0, Ok(closed)) => prop_assert!(closed.is_closed() && closed.is_empty()),
            (1, Err(Fault::Property(thrown))) => prop_assert!(thrown.like(&faults[0])),
            (n, Err(Fault::Compound(compound))) if n >= 2 => {
                prop_assert!(compound.is_closed());
                prop_assert_eq!(compound.size(), n);
            }
            (n, other) => prop_assert!(false, "{} faults gave {:?}", n, other),
        }
    }

    #[test]
    fn targeted_aggregate_rejects_other_properties(
        target in 1..PROPERTIES.len(),
        shape in arbitrary_shape(),
    ) {
        let account = account();
        let target = PROPERTIES[target].unwrap();
        let mut aggregate = FaultBuilder::for_origin(&account)
            .property(target)
            .build_aggregate()
            .unwrap();

        let result = aggregate.add_element_fault(fault(&account, shape.0, shape.1));

        if shape.0 == Some(target) {
            prop_assert!(result.is_ok());
            prop_assert_eq!(aggregate.size(), 1);
        } else {
            let is_mismatch = matches!(result, Err(ContractViolation::PropertyMismatch { .. }));
            prop_assert!(is_mismatch);
            prop_assert_eq!(aggregate.size(), 0);
        }
    }

    #[test]
    fn like_is_reflexive_and_symmetric(a in arbitrary_shape(), b in arbitrary_shape()) {
        let account = account();
        let first = fault(&account, a.0, a.1);
        let second = fault(&account, b.0, b.1);

        prop_assert!(first.like(&first));
        prop_assert_eq!(first.like(&second), second.like(&first));
        prop_assert_eq!(first.like(&second), a == b);
    }

    #[test]
    fn value_fault_keeps_the_value_it_saw(
        initial in prop::collection::vec(any::<u32>(), 0..8),
        later in any::<u32>(),
    ) {
        let counter = Arc::new(Counter {
            history: Mutex::new(initial.clone()),
        });
        let fault = FaultBuilder::for_origin(&counter)
            .property("history")
            .build_value()
            .unwrap();

        counter.history.lock().unwrap().push(later);

        prop_assert_eq!(fault.property_value(), Some(Value::copyable(initial)));
    }

    #[test]
    fn setter_fault_values_are_equal_only_when_both_are_absent_or_equal(
        vetoed_a in prop::option::of(any::<i64>()),
        vetoed_b in prop::option::of(any::<i64>()),
    ) {
        let account = account();
        let setter = |vetoed: Option<i64>| {
            FaultBuilder::for_origin(&account)
                .property("balance")
                .build_setter(vetoed.map(Value::copyable))
                .unwrap()
        };
        let first = setter(vetoed_a);
        let second = setter(vetoed_b);

        prop_assert_eq!(first.like(&second), vetoed_a == vetoed_b);
    }
}
