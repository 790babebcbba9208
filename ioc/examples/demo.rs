//! Automatic dependency resolution, singletons and `bound` checks.
//!
//! Run with `RUST_LOG=fibre_little=trace` to watch the container work.

use fibre_little::{Abstract, Arguments, Class, Container, Factory, Reflect, Value};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct Foo;

impl Foo {
  fn new(var: i32) -> Self {
    println!("Got {} in Foo", var);
    Foo
  }
}

impl Reflect for Foo {
  fn class() -> Class {
    Class::builder::<Foo>()
      .default("var", || 42_i32)
      .construct(|mut args: Arguments| Ok(Foo::new(args.next_cloned()?)))
  }
}

struct Bar;

impl Bar {
  fn new(_foo: Arc<Foo>, var: &str) -> Self {
    println!("Got {} and an instance of {} in Bar", var, std::any::type_name::<Foo>());
    Bar
  }
}

impl Reflect for Bar {
  fn class() -> Class {
    Class::builder::<Bar>()
      .inject::<Foo>("bar")
      .default("var", || "duck")
      .construct(|mut args: Arguments| {
        let foo = args.next::<Foo>()?;
        let var = args.next_cloned::<&str>()?;
        Ok(Bar::new(foo, var))
      })
  }
}

struct Baz;

impl Reflect for Baz {
  fn class() -> Class {
    Class::builder::<Baz>()
      .inject::<Foo>("foo")
      .inject::<Bar>("bar")
      .construct(|mut args: Arguments| {
        let _foo = args.next::<Foo>()?;
        let _bar = args.next::<Bar>()?;
        println!(
          "Got instances of {} and {} in Baz",
          std::any::type_name::<Foo>(),
          std::any::type_name::<Bar>()
        );
        Ok(Baz)
      })
  }
}

#[derive(Default)]
struct StdClass;

fibre_little::reflect!(StdClass as "stdClass");

fn main() -> fibre_little::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let little = Container::new();
  little.register::<Foo>();
  little.register::<Bar>();
  little.register::<Baz>();
  little.register::<StdClass>();

  // --- Example #1: dependency resolution, bound factories, existing instances ---
  println!("\n\nEXAMPLE #1\n");

  little.bind(Abstract::of::<Foo>(), Factory::typed(|_| Ok(Foo::new(101))), false);
  little.instance(Abstract::of::<Bar>(), Value::new(Bar::new(Arc::new(Foo::new(42)), "dog")));

  little.make(Abstract::of::<Baz>())?;

  // --- Example #2: singletons ---
  println!("\n\nEXAMPLE #2\n");

  little.singleton("dummy", "stdClass");

  let instance = little.make("dummy")?;
  let condition = if Value::ptr_eq(&instance, &little.make("dummy")?) {
    "are"
  } else {
    "are not"
  };
  println!("These two {} equal", condition);

  // --- Example #3: has an identifier been bound? ---
  println!("\n\nEXAMPLE #3\n");

  let random = format!("apples{}", std::process::id());
  let inform = |binding: &str| {
    let condition = if little.bound(binding) { "has been" } else { "has not been" };
    println!("{} {} bound into the container", binding, condition);
  };

  inform(&random);
  little.bind(random.clone(), "unicorns", false);
  inform(&random);

  println!("\n");
  Ok(())
}
