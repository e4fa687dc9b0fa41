use std::collections::VecDeque;

use recordeq_metadata::{Module, TypeDefId, TypeRef};

use crate::{AncestryWalker, ResolutionError, WellKnownTypes};

/// One way a type instantiates a generic definition.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantiationMatch {
  pub requested: TypeRef,
  /// The ancestor reference that instantiates the definition.
  pub ancestor: TypeRef,
  /// Bound arguments, in the definition's parameter order. Empty when the
  /// definition is not generic.
  pub arguments: Vec<TypeRef>,
}

#[derive(Debug, Clone, Copy)]
pub struct GenericArgumentBinder<'m> {
  module: &'m Module,
  well_known: &'m WellKnownTypes,
}

impl<'m> GenericArgumentBinder<'m> {
  pub fn new(
    module: &'m Module,
    well_known: &'m WellKnownTypes,
  ) -> Self {
    Self { module, well_known }
  }

  pub fn module(&self) -> &'m Module {
    self.module
  }

  pub fn well_known(&self) -> &'m WellKnownTypes {
    self.well_known
  }

  pub fn walk(
    &self,
    ty: &TypeRef,
  ) -> AncestryWalker<'m> {
    AncestryWalker::new(self.module, self.well_known, ty)
  }

  /// Every instantiation of `target` reachable from `ty`, in ancestry order.
  pub fn bind(
    &self,
    ty: &TypeRef,
    target: TypeDefId,
  ) -> Bindings<'m> {
    let target_def = self.module.type_def(target);
    let target_name = self.module.type_full_name(target);

    let axiom = match ty {
      TypeRef::Array(element) if target_name == self.module.type_full_name(self.well_known.sequence) => {
        Some(InstantiationMatch {
          requested: ty.clone(),
          ancestor: TypeRef::generic(self.well_known.sequence, vec![(**element).clone()]),
          arguments: vec![(**element).clone()],
        })
      },
      _ => None,
    };

    Bindings {
      module: self.module,
      target_name,
      target_is_generic: target_def.has_generic_params(),
      requested: ty.clone(),
      axiom,
      walker: self.walk(ty),
      skip_instance: !ty.is_array(),
      pending: VecDeque::new(),
      requested_queued: false,
      exhausted: false,
    }
  }

  pub fn bind_first(
    &self,
    ty: &TypeRef,
    target: TypeDefId,
    predicate: Option<&dyn Fn(&InstantiationMatch) -> bool>,
  ) -> Result<Option<InstantiationMatch>, ResolutionError> {
    for found in self.bind(ty, target) {
      let found = found?;
      if predicate.is_none_or(|accept| accept(&found)) {
        return Ok(Some(found));
      }
    }
    Ok(None)
  }

  pub fn implements(
    &self,
    ty: &TypeRef,
    target: TypeDefId,
  ) -> Result<bool, ResolutionError> {
    Ok(self.bind_first(ty, target, None)?.is_some())
  }
}

/// Lazy sequence of [`InstantiationMatch`]es.
///
/// Candidates are visited in this order: the array axiom, the first node's
/// interfaces, then each later node's instance followed by its interfaces,
/// and finally the requested type itself. Clone to replay from the current
/// position.
#[derive(Debug, Clone)]
pub struct Bindings<'m> {
  module: &'m Module,
  target_name: String,
  target_is_generic: bool,
  requested: TypeRef,
  axiom: Option<InstantiationMatch>,
  walker: AncestryWalker<'m>,
  skip_instance: bool,
  pending: VecDeque<TypeRef>,
  requested_queued: bool,
  exhausted: bool,
}

impl Bindings<'_> {
  fn matches(
    &self,
    candidate: &TypeRef,
  ) -> Option<InstantiationMatch> {
    let arguments = match candidate {
      TypeRef::Generic { definition, args } if self.target_is_generic => {
        if self.module.type_full_name(*definition) != self.target_name {
          return None;
        }
        args.clone()
      },
      _ if !self.target_is_generic => {
        if self.module.full_name(candidate) != self.target_name {
          return None;
        }
        Vec::new()
      },
      _ => return None,
    };

    Some(InstantiationMatch {
      requested: self.requested.clone(),
      ancestor: candidate.clone(),
      arguments,
    })
  }
}

impl Iterator for Bindings<'_> {
  type Item = Result<InstantiationMatch, ResolutionError>;

  fn next(&mut self) -> Option<Self::Item> {
    if let Some(axiom) = self.axiom.take() {
      return Some(Ok(axiom));
    }

    loop {
      while let Some(candidate) = self.pending.pop_front() {
        if let Some(found) = self.matches(&candidate) {
          return Some(Ok(found));
        }
      }

      if self.exhausted {
        return None;
      }

      match self.walker.next() {
        Some(Ok(node)) => {
          if !self.skip_instance {
            self.pending.push_back(node.instance);
          }
          self.skip_instance = false;
          self.pending.extend(node.interfaces);
        },
        Some(Err(err)) => {
          self.exhausted = true;
          return Some(Err(err));
        },
        None => {
          self.exhausted = true;
          if !self.requested_queued {
            self.requested_queued = true;
            self.pending.push_back(self.requested.clone());
          }
        },
      }
    }
  }
}
