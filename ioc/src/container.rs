//! The main `Container` struct and its associated methods.

use crate::core::{Abstract, Binding};
use crate::error::{ResolutionError, Result};
use crate::factory::{Concrete, Factory};
use crate::reflect::{Class, Parameter, Reflect, Reflector};
use crate::value::Value;
use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The Inversion of Control (IoC) container.
///
/// Holds bindings (identifier to construction recipe) and shared instances
/// (identifier to an already built value), and resolves identifiers into
/// values, constructing constructor dependencies recursively.
///
/// No map entry is borrowed while a factory or constructor runs, so user code
/// may call back into the container freely. A shared binding is built at
/// most once: threads racing on its first resolution wait for the first
/// build and receive the same value.
#[derive(Default)]
pub struct Container {
  bindings: DashMap<Abstract, Binding>,
  instances: DashMap<Abstract, Value>,
  reflector: Arc<Reflector>,
}

impl Container {
  /// Creates a new, empty `Container` with its own reflector.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a container that describes types through a shared reflector.
  pub fn with_reflector(reflector: Arc<Reflector>) -> Self {
    Self {
      bindings: DashMap::new(),
      instances: DashMap::new(),
      reflector,
    }
  }

  pub fn reflector(&self) -> &Arc<Reflector> {
    &self.reflector
  }

  /// Describes `T` to this container's reflector, making it constructible.
  pub fn register<T: Reflect>(&self) {
    self.reflector.register::<T>();
  }

  pub fn register_class(&self, class: Class) {
    self.reflector.insert(class);
  }

  // --- Registration ---

  /// Binds `abstract_id` to a factory, or to another identifier to be
  /// resolved in its place. Forgets any instance cached for `abstract_id`.
  pub fn bind(&self, abstract_id: impl Into<Abstract>, concrete: impl Into<Concrete>, shared: bool) {
    let key = abstract_id.into();
    let concrete = match concrete.into() {
      // A type bound to itself is built directly, not re-resolved.
      Concrete::Target(target) if target == key => {
        Factory::new(move |container| container.build(&target))
      }
      concrete => concrete.into_factory(),
    };
    tracing::trace!(abstract_id = %key, shared, "binding registered");
    self.instances.remove(&key);
    self.bindings.insert(key, Binding::new(concrete, shared));
  }

  /// Binds a shared type: it is built once, then reused.
  pub fn singleton(&self, abstract_id: impl Into<Abstract>, concrete: impl Into<Concrete>) {
    self.bind(abstract_id, concrete, true);
  }

  /// Puts an existing value into the instance cache.
  pub fn instance(&self, abstract_id: impl Into<Abstract>, value: Value) {
    let key = abstract_id.into();
    tracing::trace!(abstract_id = %key, value = value.type_name(), "instance registered");
    self.instances.insert(key, value);
  }

  /// Binds the trait-object identifier of `I` to the construction of `T`.
  ///
  /// `cast` performs the unsizing, usually `|t| t as Arc<dyn Trait>`.
  pub fn bind_trait<I, T>(&self, cast: fn(Arc<T>) -> Arc<I>, shared: bool)
  where
    I: ?Sized + Any + Send + Sync,
    T: Any + Send + Sync,
  {
    let factory = Factory::new(move |container| {
      let concrete = container.get::<T>()?;
      Ok(Value::from_arc(cast(concrete)))
    });
    self.bind(Abstract::of::<I>(), factory, shared);
  }

  /// Removes both the binding and the cached instance for `abstract_id`.
  pub fn forget(&self, abstract_id: impl Into<Abstract>) {
    let key = abstract_id.into();
    tracing::trace!(abstract_id = %key, "binding forgotten");
    self.instances.remove(&key);
    self.bindings.remove(&key);
  }

  /// Wraps `factory` so it memoizes its first successful result.
  ///
  /// The memo belongs to the returned factory, not to this container.
  pub fn share(&self, factory: Factory) -> Factory {
    factory.shared()
  }

  /// True if `abstract_id` has a binding or a cached instance.
  pub fn bound(&self, abstract_id: impl Into<Abstract>) -> bool {
    let key = abstract_id.into();
    self.bindings.contains_key(&key) || self.instances.contains_key(&key)
  }

  // --- Resolution ---

  /// Resolves `abstract_id` into a value.
  pub fn make(&self, abstract_id: impl Into<Abstract>) -> Result<Value> {
    let key = abstract_id.into();

    if let Some(instance) = self.cached(&key) {
      tracing::trace!(abstract_id = %key, "resolved from instance cache");
      return Ok(instance);
    }

    let binding = self.bindings.get(&key).map(|entry| entry.value().clone());
    let shared = binding.as_ref().is_some_and(Binding::is_shared);

    let instance = match binding {
      Some(binding) => binding.resolve(self)?,
      None => self.build(&key)?,
    };

    if shared {
      self.instances.insert(key.clone(), instance.clone());
    }
    tracing::trace!(abstract_id = %key, shared, value = instance.type_name(), "resolved");
    Ok(instance)
  }

  /// Resolves the type identifier of `T` and downcasts the result.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.resolve::<T>(Abstract::of::<T>())
  }

  /// Resolves `abstract_id` and downcasts the result to `T`.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self, abstract_id: impl Into<Abstract>) -> Result<Arc<T>> {
    let key = abstract_id.into();
    let value = self.make(&key)?;
    value.downcast::<T>().ok_or_else(|| ResolutionError::TypeMismatch {
      abstract_id: key.to_string(),
      expected: std::any::type_name::<T>(),
      actual: value.type_name(),
    })
  }

  // --- Internals ---

  fn cached(&self, key: &Abstract) -> Option<Value> {
    self.instances.get(key).map(|entry| entry.value().clone())
  }

  /// Builds the class registered under `target` through its constructor.
  fn build(&self, target: &Abstract) -> Result<Value> {
    let class = self
      .reflector
      .class(target)
      .ok_or_else(|| ResolutionError::UnknownType(target.to_string()))?;

    if !class.is_instantiable() {
      return Err(ResolutionError::NotInstantiable(class.name().to_string()));
    }

    let dependencies = match class.parameters() {
      None => Vec::new(),
      Some(parameters) => self.dependencies(&class, parameters)?,
    };

    class.new_instance(dependencies)
  }

  fn dependencies(&self, class: &Class, parameters: &[Parameter]) -> Result<Vec<Value>> {
    parameters
      .iter()
      .enumerate()
      .map(|(position, parameter)| match parameter.class() {
        Some(dependency) => self.make(dependency),
        None => self.resolve_primitive(class, position, parameter),
      })
      .collect()
  }

  fn resolve_primitive(&self, class: &Class, position: usize, parameter: &Parameter) -> Result<Value> {
    parameter
      .default_value()
      .ok_or_else(|| ResolutionError::Unresolvable {
        class: class.name().to_string(),
        parameter: parameter.name().to_string(),
        position,
      })
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("bindings", &self.bindings.len())
      .field("instances", &self.instances.len())
      .field("reflector", &self.reflector)
      .finish()
  }
}
