//! The type-erased handle the container hands out.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A built object, erased to `Any`.
///
/// Internally every payload is stored as an `Arc<T>` boxed inside another
/// `Arc`, so that unsized payloads such as `Arc<dyn Trait>` can be recovered
/// with the same [`downcast`](Value::downcast) call as plain structs. Cloning
/// a `Value` never clones the payload: clones share identity.
#[derive(Clone)]
pub struct Value {
  inner: Arc<dyn Any + Send + Sync>,
  type_name: &'static str,
}

impl Value {
  /// Wraps an owned object.
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self::from_arc(Arc::new(value))
  }

  /// Wraps an already shared object. `T` may be a trait object.
  pub fn from_arc<T: ?Sized + Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      inner: Arc::new(value),
      type_name: std::any::type_name::<T>(),
    }
  }

  /// Recovers the shared object if it was stored as a `T`.
  pub fn downcast<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.inner.downcast_ref::<Arc<T>>().cloned()
  }

  pub fn is<T: ?Sized + Any + Send + Sync>(&self) -> bool {
    self.inner.is::<Arc<T>>()
  }

  /// Name of the payload type, as given by `std::any::type_name`.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// True when both handles point at the same built object.
  pub fn ptr_eq(this: &Value, other: &Value) -> bool {
    Arc::ptr_eq(&this.inner, &other.inner)
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Value({})", self.type_name)
  }
}
