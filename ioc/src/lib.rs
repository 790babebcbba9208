//! # Fibre Little
//!
//! A minimal, resolving Inversion of Control (IoC) container for Rust.
//!
//! The container maps abstract identifiers (names or types) to construction
//! recipes and builds object graphs by recursively resolving constructor
//! dependencies.
//!
//! ## Core Concepts
//!
//! - **Container**: holds bindings and shared instances. `make` resolves an
//!   identifier into a [`Value`].
//! - **Bindings**: an identifier is bound to a [`Factory`] or to another
//!   identifier. Shared bindings (`singleton`) are built once.
//! - **Implicit self-binding**: an unbound identifier is built as the class it
//!   names, with each class-typed constructor parameter resolved through
//!   `make` and every other parameter taking its default value.
//! - **Reflection**: types describe their constructors through [`Reflect`],
//!   since Rust has no runtime reflection. See the [`reflect`] module.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_little::{Arguments, Class, Container, Factory, Reflect};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Config;
//!
//! struct Mailer {
//!   config: Arc<Config>,
//!   retries: u32,
//! }
//!
//! impl Reflect for Config {
//!   fn class() -> Class {
//!     Class::concrete::<Config>()
//!   }
//! }
//!
//! impl Reflect for Mailer {
//!   fn class() -> Class {
//!     Class::builder::<Mailer>()
//!       .inject::<Config>("config")
//!       .default("retries", || 3_u32)
//!       .construct(|mut args: Arguments| {
//!         Ok(Mailer {
//!           config: args.next()?,
//!           retries: args.next_cloned()?,
//!         })
//!       })
//!   }
//! }
//!
//! let container = Container::new();
//! container.register::<Config>();
//! container.register::<Mailer>();
//!
//! // Config is shared, Mailer is built on every call.
//! container.singleton(fibre_little::Abstract::of::<Config>(), fibre_little::Abstract::of::<Config>());
//! let first = container.get::<Mailer>().unwrap();
//! let second = container.get::<Mailer>().unwrap();
//! assert!(!Arc::ptr_eq(&first, &second));
//! assert!(Arc::ptr_eq(&first.config, &second.config));
//! assert_eq!(first.retries, 3);
//!
//! // Plain factories work for anything.
//! container.bind("foo", Factory::typed(|_| Ok("bar")), false);
//! assert_eq!(*container.resolve::<&str>("foo").unwrap(), "bar");
//! ```

#[cfg(feature = "map")]
mod access;
mod container;
mod core;
mod error;
mod factory;
mod global;
mod macros;
pub mod reflect;
mod value;

#[cfg(feature = "map")]
pub use access::MapAccess;
pub use container::Container;
pub use crate::core::{Abstract, TypeKey};
pub use error::{ResolutionError, Result};
pub use factory::{Concrete, Factory};
pub use global::global;
pub use reflect::{Arguments, Class, ClassBuilder, ClassKind, Parameter, Reflect, Reflector};
pub use value::Value;
