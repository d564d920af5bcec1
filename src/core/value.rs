//! Captured property values and the safe reference policy.
//!
//! A fault report keeps a snapshot of the value a property held (or the
//! value a setter refused). Callers must not be able to rewrite that
//! history afterwards, so every store and every read goes through
//! [`Value::safe_reference`]: values built with [`Value::copyable`] are
//! duplicated, values built with [`Value::shared`] are treated as
//! immutable and handed out by reference.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

type AnyValue = dyn Any + Send + Sync;

/// A type-erased property value with opt-in duplication.
///
/// # Example
///
/// ```rust
/// use rousseau::core::Value;
///
/// let tags = Value::copyable(vec!["a".to_string(), "b".to_string()]);
/// let copy = tags.safe_reference();
///
/// assert_eq!(tags, copy);
/// assert!(!Value::ptr_eq(&tags, &copy));
///
/// let age = Value::shared(42u32);
/// assert!(Value::ptr_eq(&age, &age.safe_reference()));
/// assert_eq!(age.downcast_ref::<u32>(), Some(&42));
/// ```
#[derive(Clone)]
pub struct Value {
    inner: Arc<AnyValue>,
    type_name: &'static str,
    eq: fn(&AnyValue, &AnyValue) -> bool,
    fmt: fn(&AnyValue, &mut fmt::Formatter<'_>) -> fmt::Result,
    duplicate: Option<fn(&Arc<AnyValue>) -> Arc<AnyValue>>,
}

impl Value {
    /// Wrap a value whose type opts into duplication.
    ///
    /// Every call to [`Value::safe_reference`] yields a fresh clone.
    pub fn copyable<T>(value: T) -> Self
    where
        T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        Self {
            duplicate: Some(duplicate_as::<T>),
            ..Self::shared(value)
        }
    }

    /// Wrap a value that is immutable by convention.
    ///
    /// [`Value::safe_reference`] returns the same reference.
    pub fn shared<T>(value: T) -> Self
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
            eq: eq_as::<T>,
            fmt: fmt_as::<T>,
            duplicate: None,
        }
    }

    /// Apply the safe reference policy: duplicate copyable values,
    /// share everything else.
    pub fn safe_reference(&self) -> Self {
        match self.duplicate {
            Some(duplicate) => Self {
                inner: duplicate(&self.inner),
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// Whether this value is duplicated by the safe reference policy.
    pub fn is_copyable(&self) -> bool {
        self.duplicate.is_some()
    }

    /// Name of the wrapped Rust type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the wrapped value as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Value equality, using the wrapped type's own `PartialEq`.
    ///
    /// Values of different types are never equal.
    pub fn same_as(&self, other: &Value) -> bool {
        (self.eq)(self.inner.as_ref(), other.inner.as_ref())
    }

    /// Whether both handles point at the same stored value.
    pub fn ptr_eq(a: &Value, b: &Value) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Human-readable rendering used in messages.
    ///
    /// Strings render without quotes; everything else uses `Debug`.
    pub fn render(&self) -> String {
        if let Some(text) = self.downcast_ref::<String>() {
            text.clone()
        } else if let Some(text) = self.downcast_ref::<&'static str>() {
            (*text).to_string()
        } else {
            format!("{:?}", self)
        }
    }
}

/// Apply the safe reference policy to an optional value.
pub fn safe_reference(value: Option<&Value>) -> Option<Value> {
    value.map(Value::safe_reference)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.fmt)(self.inner.as_ref(), f)
    }
}

fn eq_as<T: PartialEq + 'static>(a: &AnyValue, b: &AnyValue) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn fmt_as<T: fmt::Debug + 'static>(value: &AnyValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => fmt::Debug::fmt(value, f),
        None => f.write_str("<opaque>"),
    }
}

fn duplicate_as<T: Clone + Send + Sync + 'static>(value: &Arc<AnyValue>) -> Arc<AnyValue> {
    match value.downcast_ref::<T>() {
        Some(inner) => Arc::new(inner.clone()),
        None => Arc::clone(value),
    }
}
