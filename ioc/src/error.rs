use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// The error returned when the container cannot produce a value.
///
/// Every failure is returned synchronously to the caller of
/// [`Container::make`](crate::Container::make). Nothing is retried and nothing
/// is cached for an identifier whose construction failed.
#[derive(Debug, Clone, Error)]
pub enum ResolutionError {
  /// The target identifier does not name a type known to the reflector.
  #[error("Class {0} does not exist")]
  UnknownType(String),

  /// The target is abstract, an interface, or has no accessible constructor.
  #[error("{0} is not instantiable.")]
  NotInstantiable(String),

  /// A constructor parameter has no class dependency and no default value.
  #[error("Unresolvable dependency resolving [Parameter #{position} [ <required> ${parameter} ]] in class {class}")]
  Unresolvable {
    class: String,
    parameter: String,
    position: usize,
  },

  /// A resolved value is not of the requested Rust type.
  #[error("Resolved '{abstract_id}' as '{actual}', which is not a '{expected}'")]
  TypeMismatch {
    abstract_id: String,
    expected: &'static str,
    actual: &'static str,
  },

  /// A constructor consumed more arguments than its class declared.
  #[error("Constructor of {class} asked for argument #{position}, but only {declared} were declared")]
  MissingArgument {
    class: String,
    position: usize,
    declared: usize,
  },

  /// A user factory failed with its own error.
  #[error("Factory failed: {0}")]
  Factory(Arc<dyn StdError + Send + Sync>),
}

impl ResolutionError {
  /// Wraps an arbitrary error raised inside a factory or constructor.
  pub fn factory<E>(error: E) -> Self
  where
    E: Into<Box<dyn StdError + Send + Sync>>,
  {
    ResolutionError::Factory(Arc::from(error.into()))
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = ResolutionError> = std::result::Result<T, E>;
