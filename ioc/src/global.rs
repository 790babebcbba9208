//! The global container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;

// Created on first access.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the global container instance.
///
/// The global container has its own reflector; types used through it are
/// registered on it like on any other container.
///
/// # Examples
///
/// ```
/// use fibre_little::{global, Factory};
///
/// fn register_services() {
///   global().singleton("greeting", Factory::typed(|_| Ok(String::from("Hello from global!"))));
/// }
/// # register_services();
/// # assert!(global().bound("greeting"));
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
