//! Public macros for ergonomic resolution and type description.

/// Resolves a value from the global container as an `Arc<T>`.
///
/// # Panics
///
/// Panics with the underlying [`ResolutionError`](crate::ResolutionError) if
/// the value cannot be resolved or is not a `T`. For a non-panicking version,
/// use [`maybe_resolve!`] or `global().resolve(...)`.
///
/// # Examples
///
/// ```
/// use fibre_little::{global, resolve, Factory};
///
/// global().singleton("message", Factory::typed(|_| Ok(String::from("hello"))));
///
/// let message = resolve!(String, "message");
/// assert_eq!(*message, "hello");
/// ```
///
/// ```
/// use fibre_little::{global, resolve};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// #[derive(Default)]
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
/// fibre_little::reflect!(EnglishGreeter);
///
/// global().register::<EnglishGreeter>();
/// global().bind_trait::<dyn Greeter, EnglishGreeter>(|g| g as Arc<dyn Greeter>, true);
///
/// let greeter = resolve!(trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
    (trait $trait_ident:ident) => {
        $crate::resolve_from!($crate::global(), trait $trait_ident)
    };
    (trait $trait_ident:ident, $name:expr) => {
        $crate::resolve_from!($crate::global(), trait $trait_ident, $name)
    };
    ($type:ty) => {
        $crate::resolve_from!($crate::global(), $type)
    };
    ($type:ty, $name:expr) => {
        $crate::resolve_from!($crate::global(), $type, $name)
    };
}

/// Like [`resolve!`], but returns `None` instead of panicking.
#[macro_export]
macro_rules! maybe_resolve {
    (trait $trait_ident:ident) => {
        $crate::maybe_resolve_from!($crate::global(), trait $trait_ident)
    };
    (trait $trait_ident:ident, $name:expr) => {
        $crate::maybe_resolve_from!($crate::global(), trait $trait_ident, $name)
    };
    ($type:ty) => {
        $crate::maybe_resolve_from!($crate::global(), $type)
    };
    ($type:ty, $name:expr) => {
        $crate::maybe_resolve_from!($crate::global(), $type, $name)
    };
}

/// Resolves a value from an explicit container, panicking on failure.
#[macro_export]
macro_rules! resolve_from {
    ($container:expr, trait $trait_ident:ident) => {
        $container
            .get::<dyn $trait_ident>()
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait service: {}: {}",
                    std::any::type_name::<dyn $trait_ident>(),
                    err
                )
            })
    };
    ($container:expr, trait $trait_ident:ident, $name:expr) => {
        $container
            .resolve::<dyn $trait_ident>($name)
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait service with name '{}': {}: {}",
                    $name,
                    std::any::type_name::<dyn $trait_ident>(),
                    err
                )
            })
    };
    ($container:expr, $type:ty) => {
        $container.get::<$type>().unwrap_or_else(|err| {
            panic!(
                "Failed to resolve required service: {}: {}",
                std::any::type_name::<$type>(),
                err
            )
        })
    };
    ($container:expr, $type:ty, $name:expr) => {
        $container
            .resolve::<$type>($name)
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required service with name '{}': {}: {}",
                    $name,
                    std::any::type_name::<$type>(),
                    err
                )
            })
    };
}

/// Resolves a value from an explicit container, returning an `Option`.
#[macro_export]
macro_rules! maybe_resolve_from {
    ($container:expr, trait $trait_ident:ident) => {
        $container.get::<dyn $trait_ident>().ok()
    };
    ($container:expr, trait $trait_ident:ident, $name:expr) => {
        $container.resolve::<dyn $trait_ident>($name).ok()
    };
    ($container:expr, $type:ty) => {
        $container.get::<$type>().ok()
    };
    ($container:expr, $type:ty, $name:expr) => {
        $container.resolve::<$type>($name).ok()
    };
}

/// Implements [`Reflect`](crate::Reflect) for types without a declared
/// constructor. Each type must implement `Default`.
///
/// ```
/// use fibre_little::{reflect, Container};
///
/// #[derive(Default)]
/// struct Clock;
/// #[derive(Default)]
/// struct Mailer;
///
/// reflect!(Clock, Mailer as "app.mailer");
///
/// let container = Container::new();
/// container.register::<Clock>();
/// container.register::<Mailer>();
/// assert!(container.make("app.mailer").is_ok());
/// ```
#[macro_export]
macro_rules! reflect {
    ($($type:ty $(as $name:literal)?),+ $(,)?) => {
        $(
            impl $crate::Reflect for $type {
                fn class() -> $crate::Class {
                    $crate::Class::concrete::<$type>()$(.named($name))?
                }
            }
        )+
    };
}
