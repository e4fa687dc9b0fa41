use std::collections::HashSet;

use indexmap::IndexMap;
use recordeq_metadata::{Module, TypeDefId, TypeRef};

use crate::{ResolutionError, WellKnownTypes};

/// Generic parameter name -> bound type, in the declaration order of the
/// step's generic parameters.
///
/// An entry is set once. Binding the same parameter to a different type is
/// a [`ResolutionError::ConflictingBinding`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericArgumentMap {
  entries: IndexMap<String, TypeRef>,
}

impl GenericArgumentMap {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(
    &mut self,
    module: &Module,
    parameter: &str,
    ty: TypeRef,
  ) -> Result<(), ResolutionError> {
    match self.entries.get(parameter) {
      Some(existing) if *existing != ty => Err(ResolutionError::ConflictingBinding {
        parameter: parameter.to_string(),
        existing: module.full_name(existing),
        incoming: module.full_name(&ty),
      }),
      Some(_) => Ok(()),
      None => {
        self.entries.insert(parameter.to_string(), ty);
        Ok(())
      },
    }
  }

  pub fn get(
    &self,
    parameter: &str,
  ) -> Option<&TypeRef> {
    self.entries.get(parameter)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeRef)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Bound types in declaration order.
  pub fn values(&self) -> Vec<TypeRef> {
    self.entries.values().cloned().collect()
  }

  /// Rewrites every bare parameter inside `ty` through this map, descending
  /// into generic arguments and array elements.
  ///
  /// ``ICollection`1<KeyValuePair`2<TKey,TValue>>`` with `{TKey: Int32,
  /// TValue: String}` becomes ``ICollection`1<KeyValuePair`2<Int32,String>>``.
  pub fn substitute(
    &self,
    module: &Module,
    ty: &TypeRef,
    required_by: &TypeRef,
  ) -> Result<TypeRef, ResolutionError> {
    match ty {
      TypeRef::Param(name) => self.get(name).cloned().ok_or_else(|| ResolutionError::MissingMapping {
        parameter: name.clone(),
        required_by: module.full_name(required_by),
      }),
      TypeRef::Generic { definition, args } => {
        let args = args
          .iter()
          .map(|arg| self.substitute(module, arg, required_by))
          .collect::<Result<Vec<_>, _>>()?;
        Ok(TypeRef::generic(*definition, args))
      },
      TypeRef::Array(element) => Ok(TypeRef::array(self.substitute(module, element, required_by)?)),
      TypeRef::Def(_) => Ok(ty.clone()),
    }
  }
}

/// One step of an ancestry walk.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
  pub definition: TypeDefId,
  /// Full name of `instance`.
  pub name: String,
  pub generic_params: Vec<String>,
  /// The definition instantiated with this step's bindings.
  pub instance: TypeRef,
  pub bindings: GenericArgumentMap,
  /// Directly declared interfaces, substituted through `bindings`.
  pub interfaces: Vec<TypeRef>,
  /// Base reference, substituted through `bindings`.
  pub base: Option<TypeRef>,
}

#[derive(Debug, Clone)]
enum WalkState {
  Start(TypeRef),
  Step {
    definition: TypeDefId,
    instance: TypeRef,
    bindings: GenericArgumentMap,
  },
  Done,
}

/// Lazily walks a type's base chain from the type itself up to, but not
/// including, `System.Object`.
///
/// Cloning a walker restarts nothing: the clone continues from the same
/// step. Create a new walker to start over.
#[derive(Debug, Clone)]
pub struct AncestryWalker<'m> {
  module: &'m Module,
  well_known: &'m WellKnownTypes,
  state: WalkState,
  visited: HashSet<TypeDefId>,
}

impl<'m> AncestryWalker<'m> {
  pub fn new(
    module: &'m Module,
    well_known: &'m WellKnownTypes,
    ty: &TypeRef,
  ) -> Self {
    Self {
      module,
      well_known,
      state: WalkState::Start(ty.clone()),
      visited: HashSet::new(),
    }
  }

  /// The requested type's own step. Its arguments are taken verbatim: a
  /// bare parameter here belongs to the caller and stays tracked.
  fn seed(
    &self,
    ty: &TypeRef,
  ) -> Result<Option<WalkState>, ResolutionError> {
    let Some(definition) = self.module.resolve(ty) else {
      if ty.is_array() {
        return Ok(None);
      }
      return Err(ResolutionError::UnresolvableType {
        type_name: self.module.full_name(ty),
      });
    };

    if definition == self.well_known.object {
      return Ok(None);
    }

    let def = self.module.type_def(definition);
    let mut bindings = GenericArgumentMap::new();
    let instance = match ty {
      TypeRef::Generic { args, .. } => {
        if args.len() != def.generic_params.len() {
          return Err(ResolutionError::ArityMismatch {
            type_name: self.module.type_full_name(definition),
            expected: def.generic_params.len(),
            found: args.len(),
          });
        }
        for (param, arg) in def.generic_params.iter().zip(args) {
          bindings.insert(self.module, param, arg.clone())?;
        }
        ty.clone()
      },
      TypeRef::Def(_) => {
        let instance = self.module.self_reference(definition);
        for (param, arg) in def.generic_params.iter().zip(instance.generic_args()) {
          bindings.insert(self.module, param, arg.clone())?;
        }
        instance
      },
      _ => TypeRef::Def(definition),
    };

    Ok(Some(WalkState::Step {
      definition,
      instance,
      bindings,
    }))
  }

  fn visit(
    &mut self,
    definition: TypeDefId,
    instance: TypeRef,
    bindings: GenericArgumentMap,
  ) -> Result<TypeNode, ResolutionError> {
    if !self.visited.insert(definition) {
      return Err(ResolutionError::CyclicAncestry {
        type_name: self.module.type_full_name(definition),
      });
    }

    let module = self.module;
    let def = module.type_def(definition);

    let interfaces = def
      .interfaces
      .iter()
      .map(|iface| bindings.substitute(module, iface, iface))
      .collect::<Result<Vec<_>, _>>()?;

    let base = match &def.base {
      Some(base_ref) => {
        let (base_def, base_instance, base_bindings) = self.step_to_base(&instance, base_ref, &bindings)?;
        if base_def != self.well_known.object {
          self.state = WalkState::Step {
            definition: base_def,
            instance: base_instance.clone(),
            bindings: base_bindings,
          };
        }
        Some(base_instance)
      },
      None => None,
    };

    Ok(TypeNode {
      definition,
      name: module.full_name(&instance),
      generic_params: def.generic_params.clone(),
      instance,
      bindings,
      interfaces,
      base,
    })
  }

  /// Computes the base step's bindings from the current one.
  ///
  /// A bare parameter argument is looked up in `bindings`; anything else is
  /// substituted through it. A non-generic base starts from an empty map.
  fn step_to_base(
    &self,
    current: &TypeRef,
    base_ref: &TypeRef,
    bindings: &GenericArgumentMap,
  ) -> Result<(TypeDefId, TypeRef, GenericArgumentMap), ResolutionError> {
    let module = self.module;
    let base_def = module.resolve(base_ref).ok_or_else(|| ResolutionError::UnresolvableBase {
      type_name: module.full_name(current),
      base: module.full_name(base_ref),
    })?;

    let TypeRef::Generic { args, .. } = base_ref else {
      return Ok((base_def, TypeRef::Def(base_def), GenericArgumentMap::new()));
    };

    let params = &module.type_def(base_def).generic_params;
    if params.len() != args.len() {
      return Err(ResolutionError::ArityMismatch {
        type_name: module.type_full_name(base_def),
        expected: params.len(),
        found: args.len(),
      });
    }

    let mut mapped = GenericArgumentMap::new();
    for (param, arg) in params.iter().zip(args) {
      let bound = bindings.substitute(module, arg, base_ref)?;
      mapped.insert(module, param, bound)?;
    }

    let instance = TypeRef::generic(base_def, mapped.values());
    Ok((base_def, instance, mapped))
  }
}

impl Iterator for AncestryWalker<'_> {
  type Item = Result<TypeNode, ResolutionError>;

  fn next(&mut self) -> Option<Self::Item> {
    let mut state = std::mem::replace(&mut self.state, WalkState::Done);

    if let WalkState::Start(ty) = &state {
      state = match self.seed(ty) {
        Ok(Some(step)) => step,
        Ok(None) => return None,
        Err(err) => return Some(Err(err)),
      };
    }

    match state {
      WalkState::Step {
        definition,
        instance,
        bindings,
      } => {
        let node = self.visit(definition, instance, bindings);
        if node.is_err() {
          self.state = WalkState::Done;
        }
        Some(node)
      },
      WalkState::Start(_) | WalkState::Done => None,
    }
  }
}
