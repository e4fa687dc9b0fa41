#![allow(dead_code)]

use recordeq_ancestry::{GenericArgumentBinder, WellKnownTypes};
use recordeq_metadata::{Module, TypeDef, TypeDefId, TypeRef, framework, framework::Framework};

pub struct Fixture {
  pub module: Module,
  pub fw: Framework,
}

impl Fixture {
  pub fn new() -> Self {
    let mut module = Module::new("TestAssembly");
    let fw = framework::install(&mut module);
    Self { module, fw }
  }

  pub fn well_known(&self) -> WellKnownTypes {
    WellKnownTypes::from_module(&self.module).expect("framework installed")
  }

  pub fn int32(&self) -> TypeRef {
    TypeRef::Def(self.fw.int32)
  }

  pub fn string(&self) -> TypeRef {
    TypeRef::Def(self.fw.string)
  }

  pub fn class(
    &mut self,
    name: &str,
    base: TypeRef,
  ) -> TypeDefId {
    self.module.add_type(TypeDef::class("TestAssembly", name).with_base(base))
  }

  /// `StringMap<T> : Dictionary<String, T>` and `StringIntMap : StringMap<Int32>`.
  pub fn string_int_map(&mut self) -> (TypeDefId, TypeDefId) {
    let dictionary = TypeRef::generic(self.fw.dictionary, vec![self.string(), TypeRef::param("T")]);
    let string_map = self
      .module
      .add_type(TypeDef::class("TestAssembly", "StringMap`1").with_generic_params(&["T"]).with_base(dictionary));

    let base = TypeRef::generic(string_map, vec![self.int32()]);
    let string_int_map = self.class("StringIntMap", base);

    (string_map, string_int_map)
  }

  pub fn names(
    &self,
    tys: &[TypeRef],
  ) -> Vec<String> {
    tys.iter().map(|t| self.module.full_name(t)).collect()
  }
}

/// Full names of the single argument of every `IEnumerable`1` match.
pub fn sequence_arguments(
  binder: &GenericArgumentBinder<'_>,
  ty: &TypeRef,
) -> Vec<String> {
  let module = binder.module();
  binder
    .bind(ty, binder.well_known().sequence)
    .map(|found| {
      let found = found.expect("ancestry resolves");
      assert_eq!(found.arguments.len(), 1);
      module.full_name(&found.arguments[0])
    })
    .collect()
}
