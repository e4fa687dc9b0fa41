//! Maps a candidate's field access back to the property that owns it.

use std::collections::HashSet;

use recordeq_metadata::{FieldRef, Instruction, Module, OpCode, PropertyDefId, TypeDefId};

/// Instructions examined from the anchor, inclusive.
const WINDOW: usize = 5;

/// The single field loaded by `ldfld` in `anchor..anchor+5`. An equality
/// shape loads it twice (`this` and `other`); any second distinct field
/// makes the result `None`.
pub fn backing_field(
  instructions: &[Instruction],
  anchor: usize,
) -> Option<&FieldRef> {
  let mut seen = HashSet::new();
  let mut fields = instructions
    .iter()
    .skip(anchor)
    .take(WINDOW)
    .filter(|i| i.opcode == OpCode::Ldfld)
    .filter_map(Instruction::field)
    .filter(|f| seen.insert(*f));

  let field = fields.next()?;
  match fields.next() {
    Some(_) => None,
    None => Some(field),
  }
}

/// The first property of `owner` whose accessors both touch `field`.
///
/// A missing accessor counts as touching it, but a property must have at
/// least one accessor.
pub fn property_for_field(
  module: &Module,
  owner: TypeDefId,
  field: &FieldRef,
) -> Option<PropertyDefId> {
  let accesses = |accessor: Option<_>| match accessor {
    None => true,
    Some(method) => module
      .method(method)
      .body
      .as_ref()
      .is_some_and(|body| body.references_field(field)),
  };

  module.type_def(owner).properties.iter().copied().find(|id| {
    let property = module.property(*id);
    (property.getter.is_some() || property.setter.is_some()) && accesses(property.getter) && accesses(property.setter)
  })
}

pub fn property_for_candidate(
  module: &Module,
  owner: TypeDefId,
  instructions: &[Instruction],
  anchor: usize,
) -> Option<PropertyDefId> {
  let field = backing_field(instructions, anchor)?;
  property_for_field(module, owner, field)
}

#[cfg(test)]
mod tests {
  use recordeq_metadata::{FieldDef, MethodBody, MethodDef, PropertyDef, TypeDef, TypeRef, framework};

  use super::*;

  struct Sample {
    module: Module,
    owner: TypeDefId,
    first: FieldRef,
    second: FieldRef,
    property: PropertyDefId,
  }

  fn sample() -> Sample {
    let mut module = Module::new("test");
    let fw = framework::install(&mut module);
    let owner = module.add_type(TypeDef::class("TestAssembly", "MainClass"));
    let int32 = TypeRef::Def(fw.int32);

    let f1 = module.add_field(owner, FieldDef::new("<Items>k__BackingField", int32.clone()).private());
    let f2 = module.add_field(owner, FieldDef::new("<Other>k__BackingField", int32.clone()).private());
    let first = FieldRef::from_definition(&module, f1).unwrap();
    let second = FieldRef::from_definition(&module, f2).unwrap();

    let getter = module.add_method(
      owner,
      MethodDef::new("get_Items", int32.clone()).with_body(MethodBody::new(vec![
        Instruction::simple(OpCode::Ldarg0),
        Instruction::ldfld(first.clone()),
        Instruction::simple(OpCode::Ret),
      ])),
    );
    // Unrelated property listed first: its getter reads the other field.
    let other_getter = module.add_method(
      owner,
      MethodDef::new("get_Other", int32.clone()).with_body(MethodBody::new(vec![
        Instruction::simple(OpCode::Ldarg0),
        Instruction::ldfld(second.clone()),
        Instruction::simple(OpCode::Ret),
      ])),
    );
    module.add_property(owner, PropertyDef::new("Other", int32.clone()).with_getter(other_getter));
    module.add_property(owner, PropertyDef::new("Bare", int32.clone()));
    let property = module.add_property(owner, PropertyDef::new("Items", int32).with_getter(getter));

    Sample {
      module,
      owner,
      first,
      second,
      property,
    }
  }

  #[test]
  fn test_equality_window_has_one_field() {
    let s = sample();
    let body = vec![
      Instruction::simple(OpCode::Call),
      Instruction::simple(OpCode::Ldarg0),
      Instruction::ldfld(s.first.clone()),
      Instruction::simple(OpCode::Ldarg1),
      Instruction::ldfld(s.first.clone()),
      Instruction::simple(OpCode::Callvirt),
    ];

    assert_eq!(backing_field(&body, 0), Some(&s.first));
    assert_eq!(property_for_candidate(&s.module, s.owner, &body, 0), Some(s.property));
  }

  #[test]
  fn test_two_fields_are_ambiguous() {
    let s = sample();
    let body = vec![
      Instruction::simple(OpCode::Call),
      Instruction::ldfld(s.first.clone()),
      Instruction::ldfld(s.second.clone()),
    ];

    assert_eq!(backing_field(&body, 0), None);
  }

  #[test]
  fn test_field_without_property() {
    let s = sample();
    let stray = FieldRef {
      name: "stray".to_string(),
      ..s.first.clone()
    };

    assert_eq!(property_for_field(&s.module, s.owner, &stray), None);
    assert_eq!(backing_field(&[Instruction::simple(OpCode::Call)], 0), None);
  }
}
