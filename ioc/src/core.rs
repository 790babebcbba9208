//! Core data structures shared by the container and the reflector.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::container::Container;
use crate::error::Result;
use crate::factory::Factory;
use crate::value::Value;

/// The key under which a binding, an instance or a class is registered.
///
/// An identifier is either a free-form name (`"cache"`, `"app\\Mailer"`) or a
/// Rust type. The two never compare equal, even when a name happens to spell
/// out a type's path.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Abstract {
  Name(Cow<'static, str>),
  Type(TypeKey),
}

impl Abstract {
  /// The identifier of the type `T`. `T` may be unsized, e.g. `dyn Trait`.
  pub fn of<T: ?Sized + Any>() -> Self {
    Abstract::Type(TypeKey::of::<T>())
  }

  pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
    Abstract::Name(name.into())
  }

  /// Human readable form, used in error messages and log fields.
  pub fn describe(&self) -> &str {
    match self {
      Abstract::Name(name) => name,
      Abstract::Type(key) => key.name,
    }
  }
}

impl From<&str> for Abstract {
  fn from(name: &str) -> Self {
    Abstract::Name(Cow::Owned(name.to_owned()))
  }
}

impl From<String> for Abstract {
  fn from(name: String) -> Self {
    Abstract::Name(Cow::Owned(name))
  }
}

impl From<&String> for Abstract {
  fn from(name: &String) -> Self {
    Abstract::Name(Cow::Owned(name.clone()))
  }
}

impl From<&Abstract> for Abstract {
  fn from(abstract_id: &Abstract) -> Self {
    abstract_id.clone()
  }
}

impl fmt::Display for Abstract {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.describe())
  }
}

impl fmt::Debug for Abstract {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Abstract::Name(name) => write!(f, "Abstract(Name({}))", name),
      Abstract::Type(key) => write!(f, "Abstract(Type({}))", key.name),
    }
  }
}

/// A `TypeId` paired with the type's name. Only the `TypeId` takes part in
/// equality and hashing.
#[derive(Clone, Copy)]
pub struct TypeKey {
  pub(crate) type_id: TypeId,
  pub(crate) name: &'static str,
}

impl TypeKey {
  pub(crate) fn of<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub fn type_name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

/// A registered construction recipe. Target identifiers are normalized into
/// factories before they get here, so a binding always holds a factory.
///
/// A shared binding owns the cell its value is built into. Racing callers
/// block on the cell, so the factory runs once per binding.
#[derive(Clone)]
pub(crate) enum Binding {
  Shared {
    cell: Arc<OnceCell<Value>>,
    factory: Factory,
  },
  Transient {
    factory: Factory,
  },
}

impl Binding {
  pub(crate) fn new(factory: Factory, shared: bool) -> Self {
    if shared {
      Binding::Shared {
        cell: Arc::new(OnceCell::new()),
        factory,
      }
    } else {
      Binding::Transient { factory }
    }
  }

  pub(crate) fn is_shared(&self) -> bool {
    matches!(self, Binding::Shared { .. })
  }

  /// Runs the factory, or for a shared binding returns the value it already
  /// built. A failed build leaves the cell empty.
  pub(crate) fn resolve(&self, container: &Container) -> Result<Value> {
    match self {
      Binding::Shared { cell, factory } => cell.get_or_try_init(|| factory.call(container)).cloned(),
      Binding::Transient { factory } => factory.call(container),
    }
  }
}
