mod common;

use common::{container, DummyClass};
use fibre_little::{Abstract, Container, Factory, Value};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Basic Tests ---

#[test]
fn test_binds_a_type_into_the_container() {
  let container = Container::new();
  container.bind("foo", Factory::typed(|_| Ok("bar")), false);

  let foo = container.resolve::<&str>("foo").unwrap();
  assert_eq!(*foo, "bar");
}

#[test]
fn test_passes_itself_to_the_factory() {
  let container = Arc::new(Container::new());
  let expected = Arc::as_ptr(&container) as usize;

  container.bind(
    "foo",
    Factory::typed(move |c: &Container| Ok(c as *const Container as usize == expected)),
    false,
  );

  assert!(*container.resolve::<bool>("foo").unwrap());
}

#[test]
fn test_singleton_is_built_once() {
  let calls = Arc::new(AtomicUsize::new(0));
  let container = Container::new();

  let counter = Arc::clone(&calls);
  container.singleton(
    "foo",
    Factory::typed(move |_| {
      counter.fetch_add(1, Ordering::SeqCst);
      Ok(DummyClass)
    }),
  );

  let first = container.make("foo").unwrap();
  let second = container.make("foo").unwrap();

  assert!(Value::ptr_eq(&first, &second));
  assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_plain_binding_runs_factory_every_time() {
  let calls = Arc::new(AtomicUsize::new(0));
  let container = Container::new();

  let counter = Arc::clone(&calls);
  container.bind(
    "foo",
    Factory::typed(move |_| Ok(counter.fetch_add(1, Ordering::SeqCst))),
    false,
  );

  let first = container.resolve::<usize>("foo").unwrap();
  let second = container.resolve::<usize>("foo").unwrap();

  assert_eq!((*first, *second), (0, 1));
  assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_binding_constructs_nothing() {
  let calls = Arc::new(AtomicUsize::new(0));
  let container = Container::new();

  let counter = Arc::clone(&calls);
  let factory = Factory::typed(move |_| {
    counter.fetch_add(1, Ordering::SeqCst);
    Ok(DummyClass)
  });
  container.bind("plain", factory.clone(), false);
  container.singleton("shared", factory);

  assert!(container.bound("plain"));
  assert!(container.bound("shared"));
  assert_eq!(calls.load(Ordering::SeqCst), 0);

  container.make("shared").unwrap();
  assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_binds_an_existing_instance() {
  let container = Container::new();
  let dummy = Value::new(DummyClass);

  container.instance("foo", dummy.clone());

  assert!(Value::ptr_eq(&container.make("foo").unwrap(), &dummy));
  assert!(Value::ptr_eq(&container.make("foo").unwrap(), &dummy));
}

#[test]
fn test_new_binding_replaces_cached_instance() {
  let container = Container::new();
  container.instance("foo", Value::new(DummyClass));

  container.bind("foo", Factory::typed(|_| Ok("bar")), false);

  assert_eq!(*container.resolve::<&str>("foo").unwrap(), "bar");
}

#[test]
fn test_rebinding_a_singleton_drops_its_cached_value() {
  let container = Container::new();
  container.singleton("foo", Factory::typed(|_| Ok(1_u8)));
  assert_eq!(*container.resolve::<u8>("foo").unwrap(), 1);

  container.singleton("foo", Factory::typed(|_| Ok(2_u8)));
  assert_eq!(*container.resolve::<u8>("foo").unwrap(), 2);
}

#[test]
fn test_determines_whether_a_type_has_been_bound() {
  let container = Container::new();

  assert!(!container.bound("foo"));
  container.bind("foo", "bar", false);
  assert!(container.bound("foo"));

  assert!(!container.bound("bar"));
  container.instance("bar", Value::new(DummyClass));
  assert!(container.bound("bar"));

  // Type identifiers and names are separate keys.
  assert!(!container.bound(Abstract::of::<DummyClass>()));
}

#[test]
fn test_forget_removes_binding_and_instance() {
  let container = Container::new();
  container.singleton("foo", Factory::typed(|_| Ok(DummyClass)));
  container.make("foo").unwrap();

  container.forget("foo");

  assert!(!container.bound("foo"));
  assert!(container.make("foo").is_err());
}

#[test]
fn test_binds_class_name_as_a_concrete_type() {
  let container = container();
  container.bind("foo", "app\\DummyClass", false);

  let foo = container.make("foo").unwrap();
  assert!(foo.is::<DummyClass>());
}

#[test]
fn test_binding_to_another_identifier_follows_its_binding() {
  let container = Container::new();
  container.singleton("config", Factory::typed(|_| Ok(String::from("shared"))));
  container.bind("alias", "config", false);

  let via_alias = container.make("alias").unwrap();
  let direct = container.make("config").unwrap();

  assert!(Value::ptr_eq(&via_alias, &direct));
}

#[test]
fn test_share_memoizes_without_a_binding() {
  let calls = Arc::new(AtomicUsize::new(0));
  let container = container();

  let counter = Arc::clone(&calls);
  let shared = container.share(Factory::new(move |app| {
    counter.fetch_add(1, Ordering::SeqCst);
    app.make("app\\DummyClass")
  }));

  let first = shared.call(&container).unwrap();
  let second = shared.call(&container).unwrap();

  assert!(Value::ptr_eq(&first, &second));
  assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_shared_factory_bound_as_plain_binding() {
  let container = container();
  let closure = container.share(Factory::new(|app| app.make("app\\DummyClass")));

  container.bind("bar", closure, false);

  assert!(Value::ptr_eq(
    &container.make("bar").unwrap(),
    &container.make("bar").unwrap()
  ));
}

#[test]
fn test_each_share_call_memoizes_independently() {
  let container = Container::new();
  let factory = Factory::typed(|_| Ok(DummyClass));

  let first = container.share(factory.clone());
  let second = container.share(factory);

  assert!(!Value::ptr_eq(
    &first.call(&container).unwrap(),
    &second.call(&container).unwrap()
  ));
}

#[test]
fn test_share_does_not_memoize_failures() {
  let attempts = Arc::new(AtomicUsize::new(0));
  let container = Container::new();

  let counter = Arc::clone(&attempts);
  let flaky = Factory::typed(move |_| {
    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
      Err(fibre_little::ResolutionError::factory("not yet"))
    } else {
      Ok(DummyClass)
    }
  })
  .shared();

  assert!(flaky.call(&container).is_err());
  let first = flaky.call(&container).unwrap();
  let second = flaky.call(&container).unwrap();

  assert!(Value::ptr_eq(&first, &second));
  assert_eq!(attempts.load(Ordering::SeqCst), 2);
}
