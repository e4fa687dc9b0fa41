//! In-memory metadata for compiled units: type definitions, members,
//! custom attributes and instruction streams.
//!
//! Everything lives in a [`Module`], addressed by typed ids. A module holds
//! the unit being woven together with every definition it references, so
//! any [`TypeRef`] can be resolved without I/O.

use core::marker::PhantomData;

pub mod display;
pub mod framework;
pub mod instr;
pub mod members;
pub mod module;
pub mod types;

pub use instr::{ExceptionHandler, FieldRef, Instruction, MethodBody, MethodRef, OpCode, Operand};
pub use members::{AttributeArg, CustomAttribute, FieldDef, MethodDef, ParamDef, PropertyDef};
pub use module::Module;
pub use types::{TypeDef, TypeKind, TypeRef};

pub type TypeDefId = Id<TypeDef>;
pub type MethodDefId = Id<MethodDef>;
pub type FieldDefId = Id<FieldDef>;
pub type PropertyDefId = Id<PropertyDef>;

/// Typed index into a [`Store`].
#[repr(transparent)]
pub struct Id<T>(u32, PhantomData<fn() -> T>);

impl<T> Id<T> {
  pub const fn new(index: u32) -> Self {
    Self(index, PhantomData)
  }

  pub fn index(self) -> u32 {
    self.0
  }
}

impl<T> Clone for Id<T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
  fn eq(
    &self,
    other: &Self,
  ) -> bool {
    self.0 == other.0
  }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
  fn hash<H: std::hash::Hasher>(
    &self,
    state: &mut H,
  ) {
    self.0.hash(state);
  }
}

impl<T> PartialOrd for Id<T> {
  fn partial_cmp(
    &self,
    other: &Self,
  ) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl<T> Ord for Id<T> {
  fn cmp(
    &self,
    other: &Self,
  ) -> std::cmp::Ordering {
    self.0.cmp(&other.0)
  }
}

impl<T> std::fmt::Debug for Id<T> {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "Id({})", self.0)
  }
}

#[derive(Debug, Clone)]
pub struct Store<T> {
  data: Vec<T>,
}

impl<T> Default for Store<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Store<T> {
  pub fn new() -> Self {
    Self { data: Vec::new() }
  }

  /// Stores `v` and returns its id.
  ///
  /// # Panics
  ///
  /// When the store already holds `u32::MAX + 1` entries; ids are 32-bit.
  pub fn alloc(
    &mut self,
    v: T,
  ) -> Id<T> {
    let index = u32::try_from(self.data.len()).expect("store exceeded u32::MAX entries");
    let id = Id::new(index);
    self.data.push(v);
    id
  }

  pub fn get(
    &self,
    id: &Id<T>,
  ) -> &T {
    &self.data[id.0 as usize]
  }

  pub fn get_mut(
    &mut self,
    id: Id<T>,
  ) -> &mut T {
    &mut self.data[id.0 as usize]
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> {
    self.data.iter().zip(0u32..).map(|(v, i)| (Id::new(i), v))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_store_ids_are_sequential() {
    let mut store = Store::new();
    let first = store.alloc("a");
    let second = store.alloc("b");

    assert_eq!(first.index(), 0);
    assert_eq!(second.index(), 1);
    assert_eq!(*store.get(&second), "b");
    assert_eq!(store.iter().map(|(id, v)| (id.index(), *v)).collect::<Vec<_>>(), [(0, "a"), (1, "b")]);
  }
}
