use recordeq_metadata::{Module, TypeDefId, module::ARRAY_TYPE};

use crate::ResolutionError;

pub const OBJECT_TYPE: &str = "System.Object";
pub const STRING_TYPE: &str = "System.String";
pub const SEQUENCE_TYPE: &str = "System.Collections.Generic.IEnumerable`1";

/// Definitions the resolver treats specially, looked up once per module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownTypes {
  /// Universal root; walks stop before it.
  pub object: TypeDefId,
  pub string: TypeDefId,
  /// The one-parameter sequence abstraction arrays instantiate.
  pub sequence: TypeDefId,
  /// Array ancestry starts here when the module defines it.
  pub array: Option<TypeDefId>,
}

impl WellKnownTypes {
  pub fn from_module(module: &Module) -> Result<Self, ResolutionError> {
    let require = |name: &str| {
      module
        .find_type(name)
        .ok_or_else(|| ResolutionError::MissingWellKnown { name: name.to_string() })
    };

    Ok(Self {
      object: require(OBJECT_TYPE)?,
      string: require(STRING_TYPE)?,
      sequence: require(SEQUENCE_TYPE)?,
      array: module.find_type(ARRAY_TYPE),
    })
  }
}

#[cfg(test)]
mod tests {
  use recordeq_metadata::{TypeDef, framework};

  use super::*;

  #[test]
  fn test_from_framework() {
    let mut module = Module::new("test");
    let fw = framework::install(&mut module);
    let wk = WellKnownTypes::from_module(&module).unwrap();

    assert_eq!(wk.object, fw.object);
    assert_eq!(wk.string, fw.string);
    assert_eq!(wk.sequence, fw.enumerable_of_t);
    assert_eq!(wk.array, Some(fw.array));
  }

  #[test]
  fn test_missing_sequence() {
    let mut module = Module::new("test");
    module.add_type(TypeDef::class("System", "Object"));
    module.add_type(TypeDef::class("System", "String"));

    assert_eq!(
      WellKnownTypes::from_module(&module),
      Err(ResolutionError::MissingWellKnown {
        name: SEQUENCE_TYPE.to_string()
      })
    );
  }
}
