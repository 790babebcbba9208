//! Construction recipes: factories and class targets.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::container::Container;
use crate::core::Abstract;
use crate::error::Result;
use crate::value::Value;

type FactoryFn = dyn Fn(&Container) -> Result<Value> + Send + Sync;

/// A function of the container producing a value.
///
/// Factories are the one place where user code runs during resolution. They
/// receive the container that is resolving them and may call back into it.
#[derive(Clone)]
pub struct Factory(Arc<FactoryFn>);

impl Factory {
  /// Creates a factory from a closure returning a [`Value`].
  pub fn new<F>(f: F) -> Self
  where
    F: Fn(&Container) -> Result<Value> + Send + Sync + 'static,
  {
    Factory(Arc::new(f))
  }

  /// Creates a factory from a closure returning a plain `T`.
  pub fn typed<T, F>(f: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    Factory::new(move |container| f(container).map(Value::new))
  }

  /// A factory that resolves `target` from whichever container invokes it.
  pub fn resolving(target: impl Into<Abstract>) -> Self {
    let target = target.into();
    Factory::new(move |container| container.make(&target))
  }

  /// Wraps this factory so that it runs at most once successfully.
  ///
  /// The result is memoized in a cell owned by the returned factory alone and
  /// returned on every later call, regardless of which container calls it.
  /// Errors are not memoized.
  pub fn shared(self) -> Self {
    let cell: OnceCell<Value> = OnceCell::new();
    Factory::new(move |container| cell.get_or_try_init(|| self.call(container)).cloned())
  }

  pub fn call(&self, container: &Container) -> Result<Value> {
    (*self.0)(container)
  }
}

impl fmt::Debug for Factory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Factory(..)")
  }
}

/// What an identifier is bound to: a factory, or another identifier to be
/// resolved in its place.
#[derive(Clone, Debug)]
pub enum Concrete {
  Factory(Factory),
  Target(Abstract),
}

impl Concrete {
  /// Turns any recipe into a factory. A target becomes a factory that
  /// resolves the target.
  pub(crate) fn into_factory(self) -> Factory {
    match self {
      Concrete::Factory(factory) => factory,
      Concrete::Target(target) => Factory::resolving(target),
    }
  }
}

impl From<Factory> for Concrete {
  fn from(factory: Factory) -> Self {
    Concrete::Factory(factory)
  }
}

impl From<Abstract> for Concrete {
  fn from(target: Abstract) -> Self {
    Concrete::Target(target)
  }
}

impl From<&str> for Concrete {
  fn from(target: &str) -> Self {
    Concrete::Target(Abstract::from(target))
  }
}

impl From<String> for Concrete {
  fn from(target: String) -> Self {
    Concrete::Target(Abstract::from(target))
  }
}
