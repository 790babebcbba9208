#![allow(dead_code)]

use fibre_little::{Arguments, Class, Container, Reflect};
use std::sync::Arc;

// --- Shared Fixtures ---

#[derive(Debug, Default)]
pub struct DummyClass;

impl Reflect for DummyClass {
  fn class() -> Class {
    Class::concrete::<DummyClass>().named("app\\DummyClass")
  }
}

/// Depends on `DummyClass` and has an optional primitive.
pub struct ComplicatedClass {
  pub dummy: Arc<DummyClass>,
  pub foo: Option<String>,
}

impl Reflect for ComplicatedClass {
  fn class() -> Class {
    Class::builder::<ComplicatedClass>()
      .named("app\\ComplicatedClass")
      .inject::<DummyClass>("dummy")
      .default("foo", || None::<String>)
      .construct(|mut args: Arguments| {
        Ok(ComplicatedClass {
          dummy: args.next()?,
          foo: args.next_cloned()?,
        })
      })
  }
}

/// Three primitives, none with a default.
pub struct UnresolvableClass;

impl Reflect for UnresolvableClass {
  fn class() -> Class {
    Class::builder::<UnresolvableClass>()
      .named("UnresolvableClass")
      .param("foo")
      .param("bar")
      .param("baz")
      .construct(|_| Ok(UnresolvableClass))
  }
}

pub struct UninstantiableClass;

impl Reflect for UninstantiableClass {
  fn class() -> Class {
    Class::abstract_type::<UninstantiableClass>().named("UninstantiableClass")
  }
}

/// A container that knows every fixture class.
pub fn container() -> Container {
  let container = Container::new();
  container.register::<DummyClass>();
  container.register::<ComplicatedClass>();
  container.register::<UnresolvableClass>();
  container.register::<UninstantiableClass>();
  container
}
