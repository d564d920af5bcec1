//! Fault origins: the bean (or bean type) a fault reports on.

use super::introspect::Introspect;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Runtime identity of an [`Introspect`] type.
///
/// Carries the type's property existence check and bundle chain so that
/// faults can be validated and localized without an instance at hand.
#[derive(Clone, Copy)]
pub struct OriginType {
    id: TypeId,
    name: &'static str,
    has_property: fn(&str) -> bool,
    bundle_chain: fn() -> Vec<&'static str>,
}

impl OriginType {
    /// The origin type of `T`.
    pub fn of<T: Introspect>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::type_name(),
            has_property: T::has_property,
            bundle_chain: T::bundle_chain,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the type exposes a property with this name.
    pub fn has_property(&self, name: &str) -> bool {
        (self.has_property)(name)
    }

    /// Bundle base names for this type, most specific first.
    pub fn bundle_chain(&self) -> Vec<&'static str> {
        (self.bundle_chain)()
    }
}

impl PartialEq for OriginType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OriginType {}

impl fmt::Debug for OriginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for OriginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The subject of a fault.
///
/// `Live` faults point at the bean that failed. `TypeOnly` faults only
/// know the bean's type: either no instance exists, or the instance was
/// still under construction and must not leak.
#[derive(Clone)]
pub enum Origin {
    Live {
        object: Arc<dyn Introspect>,
        ty: OriginType,
    },
    TypeOnly(OriginType),
}

impl Origin {
    /// A live origin sharing ownership of `object`.
    pub fn live<T: Introspect>(object: &Arc<T>) -> Self {
        let object: Arc<dyn Introspect> = Arc::clone(object) as Arc<dyn Introspect>;
        Origin::Live {
            object,
            ty: OriginType::of::<T>(),
        }
    }

    /// An origin that only records the type `T`.
    pub fn type_only<T: Introspect>() -> Self {
        Origin::TypeOnly(OriginType::of::<T>())
    }

    /// The live bean, if this origin carries one.
    pub fn object(&self) -> Option<&Arc<dyn Introspect>> {
        match self {
            Origin::Live { object, .. } => Some(object),
            Origin::TypeOnly(_) => None,
        }
    }

    pub fn origin_type(&self) -> OriginType {
        match self {
            Origin::Live { ty, .. } | Origin::TypeOnly(ty) => *ty,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Origin::Live { .. })
    }

    /// Reference identity of the carried objects.
    ///
    /// Two type-only origins have the same (absent) object.
    pub fn same_object(&self, other: &Origin) -> bool {
        match (self.object(), other.object()) {
            (Some(a), Some(b)) => same_allocation(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Same object and same origin type.
    pub fn like(&self, other: &Origin) -> bool {
        self.same_object(other) && self.origin_type() == other.origin_type()
    }
}

fn same_allocation(a: &Arc<dyn Introspect>, b: &Arc<dyn Introspect>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Live { object, ty } => f
                .debug_struct("Live")
                .field("ty", ty)
                .field("object", object)
                .finish(),
            Origin::TypeOnly(ty) => f.debug_tuple("TypeOnly").field(ty).finish(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Live { object, ty } => write!(f, "{} {:?}", ty, object),
            Origin::TypeOnly(ty) => write!(f, "{}", ty),
        }
    }
}
