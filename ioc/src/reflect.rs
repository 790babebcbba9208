//! Type introspection for constructor injection.
//!
//! Rust has no runtime reflection, so a type becomes constructible by the
//! container only after it has described itself. A description is a
//! [`Class`]: the type's name, whether it can be instantiated at all, and its
//! constructor's parameters in declaration order. Descriptions live in a
//! [`Reflector`], which containers consult but do not own.
//!
//! ```
//! use fibre_little::{Arguments, Class, Container, Reflect};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Foo;
//!
//! struct Bar {
//!   foo: Arc<Foo>,
//!   var: String,
//! }
//!
//! impl Reflect for Foo {
//!   fn class() -> Class {
//!     Class::concrete::<Foo>()
//!   }
//! }
//!
//! impl Reflect for Bar {
//!   fn class() -> Class {
//!     Class::builder::<Bar>()
//!       .inject::<Foo>("foo")
//!       .default("var", || String::from("duck"))
//!       .construct(|mut args: Arguments| {
//!         Ok(Bar {
//!           foo: args.next()?,
//!           var: args.next_cloned()?,
//!         })
//!       })
//!   }
//! }
//!
//! let container = Container::new();
//! container.register::<Foo>();
//! container.register::<Bar>();
//!
//! let bar = container.get::<Bar>().unwrap();
//! assert_eq!(bar.var, "duck");
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use dashmap::DashMap;

use crate::core::{Abstract, TypeKey};
use crate::error::{ResolutionError, Result};
use crate::value::Value;

/// Implemented by types that can describe their own constructor.
pub trait Reflect: Any + Send + Sync {
  fn class() -> Class;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
  Concrete,
  Abstract,
  Interface,
}

type DefaultFn = dyn Fn() -> Value + Send + Sync;
type ConstructFn = dyn Fn(Arguments) -> Result<Value> + Send + Sync;

/// One constructor parameter.
#[derive(Clone)]
pub struct Parameter {
  name: Cow<'static, str>,
  class: Option<Abstract>,
  default: Option<Arc<DefaultFn>>,
}

impl Parameter {
  pub fn name(&self) -> &str {
    &self.name
  }

  /// The declared class or interface, if the parameter is class-typed.
  pub fn class(&self) -> Option<&Abstract> {
    self.class.as_ref()
  }

  pub fn has_default(&self) -> bool {
    self.default.is_some()
  }

  /// Evaluates the declared default value, if any.
  pub fn default_value(&self) -> Option<Value> {
    self.default.as_ref().map(|default| (**default)())
  }
}

impl fmt::Debug for Parameter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Parameter")
      .field("name", &self.name)
      .field("class", &self.class)
      .field("has_default", &self.default.is_some())
      .finish()
  }
}

/// A constructor: its ordered parameters and the function that receives the
/// resolved arguments.
#[derive(Clone)]
struct Constructor {
  parameters: Vec<Parameter>,
  accessible: bool,
  invoke: Arc<ConstructFn>,
}

/// The description of a constructible (or deliberately non-constructible)
/// type.
#[derive(Clone)]
pub struct Class {
  name: Cow<'static, str>,
  key: TypeKey,
  kind: ClassKind,
  constructor: Option<Constructor>,
  // Set only for concrete classes without a declared constructor.
  zero_arg: Option<Arc<ConstructFn>>,
}

impl Class {
  /// A concrete type without a declared constructor, built with `Default`.
  pub fn concrete<T: Default + Any + Send + Sync>() -> Self {
    Self {
      name: Cow::Borrowed(std::any::type_name::<T>()),
      key: TypeKey::of::<T>(),
      kind: ClassKind::Concrete,
      constructor: None,
      zero_arg: Some(Arc::new(|_: Arguments| -> Result<Value> {
        Ok(Value::new(T::default()))
      })),
    }
  }

  /// An abstract type. It can be bound, but never built directly.
  pub fn abstract_type<T: ?Sized + Any>() -> Self {
    Self::uninstantiable::<T>(ClassKind::Abstract)
  }

  /// An interface, typically a `dyn Trait`. It can be bound, but never built
  /// directly.
  pub fn interface<T: ?Sized + Any>() -> Self {
    Self::uninstantiable::<T>(ClassKind::Interface)
  }

  /// Starts describing a type with a declared constructor.
  pub fn builder<T: Any + Send + Sync>() -> ClassBuilder<T> {
    ClassBuilder {
      name: Cow::Borrowed(std::any::type_name::<T>()),
      parameters: Vec::new(),
      accessible: true,
      _marker: PhantomData,
    }
  }

  fn uninstantiable<T: ?Sized + Any>(kind: ClassKind) -> Self {
    Self {
      name: Cow::Borrowed(std::any::type_name::<T>()),
      key: TypeKey::of::<T>(),
      kind,
      constructor: None,
      zero_arg: None,
    }
  }

  /// Replaces the class name, which is also the name the class can be looked
  /// up by.
  pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
    self.name = name.into();
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> ClassKind {
    self.kind
  }

  /// The type identifier of the described type.
  pub fn type_abstract(&self) -> Abstract {
    Abstract::Type(self.key)
  }

  /// The declared constructor parameters, or `None` when the class has no
  /// declared constructor.
  pub fn parameters(&self) -> Option<&[Parameter]> {
    self.constructor.as_ref().map(|c| c.parameters.as_slice())
  }

  pub fn is_instantiable(&self) -> bool {
    match (&self.kind, &self.constructor) {
      (ClassKind::Concrete, Some(constructor)) => constructor.accessible,
      (ClassKind::Concrete, None) => self.zero_arg.is_some(),
      _ => false,
    }
  }

  /// Invokes the constructor with positional arguments.
  pub(crate) fn new_instance(&self, args: Vec<Value>) -> Result<Value> {
    let invoke = match (&self.constructor, &self.zero_arg) {
      (Some(constructor), _) if constructor.accessible => &constructor.invoke,
      (None, Some(zero_arg)) => zero_arg,
      _ => return Err(ResolutionError::NotInstantiable(self.name.to_string())),
    };
    (**invoke)(Arguments::new(self.name.to_string(), args))
  }
}

impl fmt::Debug for Class {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Class")
      .field("name", &self.name)
      .field("kind", &self.kind)
      .field("parameters", &self.parameters())
      .finish()
  }
}

/// Collects the parameters of a declared constructor, then takes the
/// constructor itself.
pub struct ClassBuilder<T> {
  name: Cow<'static, str>,
  parameters: Vec<Parameter>,
  accessible: bool,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ClassBuilder<T> {
  pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
    self.name = name.into();
    self
  }

  /// A parameter typed as the class or interface `D`.
  pub fn inject<D: ?Sized + Any>(self, name: &'static str) -> Self {
    self.inject_abstract(name, Abstract::of::<D>())
  }

  /// A class-typed parameter whose dependency is looked up under an
  /// arbitrary identifier.
  pub fn inject_abstract(mut self, name: &'static str, class: Abstract) -> Self {
    self.parameters.push(Parameter {
      name: Cow::Borrowed(name),
      class: Some(class),
      default: None,
    });
    self
  }

  /// An untyped parameter without a default. Classes declaring one cannot be
  /// built by the container.
  pub fn param(mut self, name: &'static str) -> Self {
    self.parameters.push(Parameter {
      name: Cow::Borrowed(name),
      class: None,
      default: None,
    });
    self
  }

  /// A primitive parameter with a default value.
  pub fn default<V, F>(mut self, name: &'static str, default: F) -> Self
  where
    V: Any + Send + Sync,
    F: Fn() -> V + Send + Sync + 'static,
  {
    self.parameters.push(Parameter {
      name: Cow::Borrowed(name),
      class: None,
      default: Some(Arc::new(move || Value::new(default()))),
    });
    self
  }

  /// Marks the constructor as not publicly accessible.
  pub fn private(mut self) -> Self {
    self.accessible = false;
    self
  }

  pub fn construct<F>(self, f: F) -> Class
  where
    F: Fn(Arguments) -> Result<T> + Send + Sync + 'static,
  {
    Class {
      name: self.name,
      key: TypeKey::of::<T>(),
      kind: ClassKind::Concrete,
      constructor: Some(Constructor {
        parameters: self.parameters,
        accessible: self.accessible,
        invoke: Arc::new(move |args: Arguments| f(args).map(Value::new)),
      }),
      zero_arg: None,
    }
  }
}

/// The resolved constructor arguments, consumed in declaration order.
pub struct Arguments {
  class: String,
  declared: usize,
  values: std::vec::IntoIter<Value>,
}

impl Arguments {
  fn new(class: String, values: Vec<Value>) -> Self {
    Self {
      class,
      declared: values.len(),
      values: values.into_iter(),
    }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.len() == 0
  }

  /// Takes the next argument without inspecting its type.
  pub fn next_value(&mut self) -> Result<Value> {
    let position = self.declared - self.values.len();
    self.values.next().ok_or_else(|| ResolutionError::MissingArgument {
      class: self.class.clone(),
      position,
      declared: self.declared,
    })
  }

  /// Takes the next argument as a shared `T`.
  pub fn next<T: ?Sized + Any + Send + Sync>(&mut self) -> Result<Arc<T>> {
    let value = self.next_value()?;
    value
      .downcast::<T>()
      .ok_or_else(|| ResolutionError::TypeMismatch {
        abstract_id: format!("{} constructor argument", self.class),
        expected: std::any::type_name::<T>(),
        actual: value.type_name(),
      })
  }

  /// Takes the next argument as an owned copy of `T`.
  pub fn next_cloned<T: Any + Send + Sync + Clone>(&mut self) -> Result<T> {
    self.next::<T>().map(|value| (*value).clone())
  }
}

/// The registry of class descriptions.
///
/// Every class is reachable both through its type identifier and through its
/// name.
#[derive(Default)]
pub struct Reflector {
  classes: DashMap<Abstract, Arc<Class>>,
}

impl Reflector {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register<T: Reflect>(&self) {
    self.insert(T::class());
  }

  pub fn insert(&self, class: Class) {
    let class = Arc::new(class);
    tracing::trace!(class = %class.name, kind = ?class.kind, "class registered");
    self
      .classes
      .insert(Abstract::name(class.name.clone()), Arc::clone(&class));
    self.classes.insert(class.type_abstract(), class);
  }

  /// Looks up the class an identifier names.
  pub fn class(&self, target: &Abstract) -> Option<Arc<Class>> {
    self.classes.get(target).map(|entry| Arc::clone(entry.value()))
  }

  pub fn contains(&self, target: &Abstract) -> bool {
    self.classes.contains_key(target)
  }
}

impl fmt::Debug for Reflector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Reflector")
      .field("classes", &self.classes.len())
      .finish()
  }
}
