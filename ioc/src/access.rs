//! Map-style access to a container.
//!
//! A thin adapter for code that treats the container as a keyed collection:
//! reading an offset resolves it, writing one binds it, and unsetting one
//! forgets both its binding and its cached instance.

use crate::container::Container;
use crate::core::Abstract;
use crate::error::Result;
use crate::factory::Concrete;
use crate::value::Value;

pub trait MapAccess {
  /// Resolves the value stored under `offset`.
  fn offset_get(&self, offset: impl Into<Abstract>) -> Result<Value>;

  /// Binds `offset` as a non-shared binding.
  fn offset_set(&self, offset: impl Into<Abstract>, concrete: impl Into<Concrete>);

  fn offset_exists(&self, offset: impl Into<Abstract>) -> bool;

  fn offset_unset(&self, offset: impl Into<Abstract>);
}

impl MapAccess for Container {
  fn offset_get(&self, offset: impl Into<Abstract>) -> Result<Value> {
    self.make(offset)
  }

  fn offset_set(&self, offset: impl Into<Abstract>, concrete: impl Into<Concrete>) {
    self.bind(offset, concrete, false);
  }

  fn offset_exists(&self, offset: impl Into<Abstract>) -> bool {
    self.bound(offset)
  }

  fn offset_unset(&self, offset: impl Into<Abstract>) {
    self.forget(offset);
  }
}
