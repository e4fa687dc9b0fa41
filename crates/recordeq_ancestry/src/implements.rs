use recordeq_metadata::{Module, TypeRef};

use crate::{GenericArgumentBinder, ResolutionError};

/// What shape of interface a query asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
  /// `IDisposable`
  NonGeneric,
  /// ``IEnumerable`1`` with its parameters open.
  GenericDefinition,
  /// ``IEnumerable`1<System.String>``
  GenericWithArguments,
}

pub fn interface_kind(
  module: &Module,
  interface: &TypeRef,
) -> Result<InterfaceKind, ResolutionError> {
  let is_interface = module
    .resolve(interface)
    .is_some_and(|id| module.type_def(id).is_interface());
  if !is_interface {
    return Err(ResolutionError::NotAnInterface {
      type_name: module.full_name(interface),
    });
  }

  Ok(match interface {
    TypeRef::Generic { .. } => InterfaceKind::GenericWithArguments,
    TypeRef::Def(id) if module.type_def(*id).has_generic_params() => InterfaceKind::GenericDefinition,
    _ => InterfaceKind::NonGeneric,
  })
}

impl GenericArgumentBinder<'_> {
  /// Whether `ty` implements `interface`, directly or through a base type.
  ///
  /// A closed interface must appear with exactly the same arguments; an open
  /// definition matches any instantiation of it. `System.Object` implements
  /// nothing, and every array implements ``IEnumerable`1``.
  pub fn implements_interface(
    &self,
    ty: &TypeRef,
    interface: &TypeRef,
  ) -> Result<bool, ResolutionError> {
    let module = self.module();
    let kind = interface_kind(module, interface)?;

    if module.resolve(ty) == Some(self.well_known().object) {
      return Ok(false);
    }

    match kind {
      InterfaceKind::NonGeneric | InterfaceKind::GenericWithArguments => {
        let wanted = module.full_name(interface);
        if module.full_name(ty) == wanted {
          return Ok(true);
        }
        for node in self.walk(ty) {
          if node?.interfaces.iter().any(|i| module.full_name(i) == wanted) {
            return Ok(true);
          }
        }
        Ok(false)
      },
      InterfaceKind::GenericDefinition => {
        let Some(definition) = module.resolve(interface) else {
          return Ok(false);
        };
        if ty.is_array() && definition == self.well_known().sequence {
          return Ok(true);
        }
        self.implements(ty, definition)
      },
    }
  }
}
