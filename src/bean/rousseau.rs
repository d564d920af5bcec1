//! The validation driver contract implemented by validatable beans.

use crate::core::Introspect;
use crate::fault::{CompoundFault, FaultAggregate};
use std::sync::Arc;
use tracing::debug;

/// Whether a bean currently satisfies all of its rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Civility {
    /// Valid.
    Civilized,

    /// Under construction or currently invalid.
    Wild,
}

/// A bean that can report everything currently wrong with it.
///
/// Beans may be wild (invalid) at any time during their life;
/// [`RousseauBean::check_civility`] is where callers decide to reject one.
///
/// # Example
///
/// ```rust
/// use rousseau::bean::{Civility, RousseauBean};
/// use rousseau::fault::{FaultAggregate, FaultBuilder};
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
/// impl RousseauBean for Person {
///     fn wild_faults(self: &Arc<Self>) -> FaultAggregate {
///         let mut faults = FaultAggregate::for_origin(self);
///         if self.name.is_empty() {
///             let fault = FaultBuilder::for_origin(self)
///                 .property("name")
///                 .message("required")
///                 .build_value()
///                 .expect("name is a property of Person");
///             faults.add_element_fault(fault).expect("fault targets this person");
///         }
///         faults
///     }
///
///     fn has_same_values(&self, other: &Self) -> bool {
///         self.name == other.name
///     }
/// }
///
/// let nobody = Arc::new(Person { name: String::new() });
/// assert_eq!(nobody.civility(), Civility::Wild);
/// assert!(nobody.check_civility().is_err());
///
/// let alice = Arc::new(Person { name: "Alice".to_string() });
/// assert!(alice.is_civilized());
/// ```
pub trait RousseauBean: Introspect + Sized {
    /// Everything currently wrong with this bean, as an open aggregate
    /// scoped to the whole bean.
    ///
    /// Never fails and never changes the bean. The default reports
    /// nothing; implementations start from this (or from
    /// [`FaultAggregate::for_origin`]) and append their own faults.
    fn wild_faults(self: &Arc<Self>) -> FaultAggregate {
        FaultAggregate::for_origin(self)
    }

    /// `true` when [`RousseauBean::wild_faults`] is empty.
    fn is_civilized(self: &Arc<Self>) -> bool {
        self.wild_faults().is_empty()
    }

    fn civility(self: &Arc<Self>) -> Civility {
        if self.is_civilized() {
            Civility::Civilized
        } else {
            Civility::Wild
        }
    }

    /// Fail with the closed wild faults unless the bean is civilized.
    ///
    /// Unlike [`FaultAggregate::throw_if_not_empty`], a single fault is
    /// still reported as a compound, keeping the full context.
    fn check_civility(self: &Arc<Self>) -> Result<(), CompoundFault> {
        let wild = self.wild_faults();
        if wild.is_empty() {
            return Ok(());
        }
        let compound = wild.close();
        debug!(
            bean = Self::type_name(),
            size = compound.size(),
            "wild faults are not empty; bean is not civilized"
        );
        for (property, faults) in compound.element_faults() {
            let property = property.as_deref().unwrap_or("<general>");
            for fault in faults {
                debug!(property, %fault, "wild fault");
            }
        }
        Err(compound)
    }

    /// Adjust the representation toward civility without changing the
    /// value the bean represents. The default does nothing.
    fn normalize(&mut self) {}

    /// Value equality, ignoring to-many associations.
    ///
    /// Must give the same answer before and after normalizing both sides.
    fn has_same_values(&self, other: &Self) -> bool;
}

/// [`RousseauBean::has_same_values`] where either side may be absent.
///
/// Two absent beans have the same values.
pub fn has_same_values_with_none<T: RousseauBean>(one: Option<&T>, other: Option<&T>) -> bool {
    match (one, other) {
        (Some(one), Some(other)) => one.has_same_values(other),
        (None, None) => true,
        _ => false,
    }
}
