//! Generic ancestry resolution.
//!
//! [`AncestryWalker`] walks a type's base chain, carrying generic arguments
//! from the requested type up through every level of inheritance.
//! [`GenericArgumentBinder`] searches that chain (and each step's declared
//! interfaces) for instantiations of a given generic definition:
//!
//! ```text
//! StringIntMap : StringMap<Int32>
//! StringMap<T> : Dictionary<String, T>
//!
//! bind(StringIntMap, IEnumerable`1)
//!   -> IEnumerable`1<KeyValuePair`2<String,Int32>>
//! ```

mod binder;
mod error;
mod implements;
mod walker;
mod well_known;

pub use binder::{Bindings, GenericArgumentBinder, InstantiationMatch};
pub use error::ResolutionError;
pub use implements::{InterfaceKind, interface_kind};
pub use walker::{AncestryWalker, GenericArgumentMap, TypeNode};
pub use well_known::{OBJECT_TYPE, SEQUENCE_TYPE, STRING_TYPE, WellKnownTypes};
