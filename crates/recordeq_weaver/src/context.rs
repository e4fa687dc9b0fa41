use recordeq_ancestry::{ResolutionError, WellKnownTypes};
use recordeq_config::{DefaultBehavior, WeaverConfig};
use recordeq_metadata::{MethodDefId, MethodRef, Module, TypeDefId, TypeRef};

use crate::WeaveError;

/// The deep comparer that replaces ``EqualityComparer`1``.
///
/// Member references are kept as templates and retargeted onto
/// the comparer instantiated over each candidate's element type.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternateComparer {
  pub definition: TypeDefId,
  get_default: MethodRef,
  equals: MethodRef,
  get_hash_code: MethodRef,
}

impl AlternateComparer {
  pub fn locate(
    module: &Module,
    full_name: &str,
  ) -> Result<Self, WeaveError> {
    let definition = module.find_type(full_name).ok_or_else(|| WeaveError::MissingDefinition {
      name: full_name.to_string(),
    })?;

    let member = |name: &str| -> Result<MethodDefId, WeaveError> {
      module.find_method(definition, name).ok_or_else(|| WeaveError::MissingDefinition {
        name: format!("{}::{}", full_name, name),
      })
    };

    let open = module.self_reference(definition);
    Ok(Self {
      definition,
      get_default: MethodRef::from_definition(module, member("get_Default")?, open.clone()),
      equals: MethodRef::from_definition(module, member("Equals")?, open.clone()),
      get_hash_code: MethodRef::from_definition(module, member("GetHashCode")?, open),
    })
  }

  /// The comparer instantiated over `element`.
  pub fn instantiate(
    &self,
    element: TypeRef,
  ) -> TypeRef {
    TypeRef::generic(self.definition, vec![element])
  }

  pub fn get_default(
    &self,
    comparer_type: &TypeRef,
  ) -> MethodRef {
    retarget(&self.get_default, comparer_type)
  }

  pub fn equals(
    &self,
    comparer_type: &TypeRef,
  ) -> MethodRef {
    retarget(&self.equals, comparer_type)
  }

  pub fn get_hash_code(
    &self,
    comparer_type: &TypeRef,
  ) -> MethodRef {
    retarget(&self.get_hash_code, comparer_type)
  }
}

fn retarget(
  template: &MethodRef,
  declaring_type: &TypeRef,
) -> MethodRef {
  MethodRef {
    declaring_type: declaring_type.clone(),
    ..template.clone()
  }
}

/// Everything a pass resolves once per module.
#[derive(Debug, Clone)]
pub struct WeaveContext {
  pub well_known: WellKnownTypes,
  pub comparer: AlternateComparer,
  pub default_behavior: DefaultBehavior,
}

impl WeaveContext {
  pub fn new(
    module: &Module,
    config: &WeaverConfig,
  ) -> Result<Self, WeaveError> {
    let well_known = WellKnownTypes::from_module(module).map_err(|err| match err {
      ResolutionError::MissingWellKnown { name } => WeaveError::MissingDefinition { name },
      other => WeaveError::MissingDefinition { name: other.to_string() },
    })?;

    Ok(Self {
      well_known,
      comparer: AlternateComparer::locate(module, &config.comparer_type)?,
      default_behavior: config.default_behavior,
    })
  }
}
