use std::collections::HashMap;

use crate::{
  FieldDef, FieldDefId, FieldRef, MethodDef, MethodDefId, PropertyDef, PropertyDefId, Store, TypeDef, TypeDefId,
  TypeRef,
};

pub const ARRAY_TYPE: &str = "System.Array";

/// A compiled unit plus every definition it references.
#[derive(Debug, Clone)]
pub struct Module {
  pub name: String,
  types: Store<TypeDef>,
  methods: Store<MethodDef>,
  fields: Store<FieldDef>,
  properties: Store<PropertyDef>,
  top_level: Vec<TypeDefId>,
  by_full_name: HashMap<String, TypeDefId>,
}

impl Module {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      types: Store::new(),
      methods: Store::new(),
      fields: Store::new(),
      properties: Store::new(),
      top_level: Vec::new(),
      by_full_name: HashMap::new(),
    }
  }

  pub fn add_type(
    &mut self,
    mut def: TypeDef,
  ) -> TypeDefId {
    def.declaring_type = None;
    let id = self.types.alloc(def);
    self.top_level.push(id);
    self.register(id);
    id
  }

  pub fn add_nested_type(
    &mut self,
    outer: TypeDefId,
    mut def: TypeDef,
  ) -> TypeDefId {
    def.declaring_type = Some(outer);
    let id = self.types.alloc(def);
    self.types.get_mut(outer).nested_types.push(id);
    self.register(id);
    id
  }

  fn register(
    &mut self,
    id: TypeDefId,
  ) {
    let full_name = self.type_full_name(id);
    self.by_full_name.entry(full_name).or_insert(id);
  }

  pub fn add_method(
    &mut self,
    owner: TypeDefId,
    mut def: MethodDef,
  ) -> MethodDefId {
    def.declaring_type = Some(owner);
    let id = self.methods.alloc(def);
    self.types.get_mut(owner).methods.push(id);
    id
  }

  pub fn add_field(
    &mut self,
    owner: TypeDefId,
    mut def: FieldDef,
  ) -> FieldDefId {
    def.declaring_type = Some(owner);
    let id = self.fields.alloc(def);
    self.types.get_mut(owner).fields.push(id);
    id
  }

  pub fn add_property(
    &mut self,
    owner: TypeDefId,
    mut def: PropertyDef,
  ) -> PropertyDefId {
    def.declaring_type = Some(owner);
    let id = self.properties.alloc(def);
    self.types.get_mut(owner).properties.push(id);
    id
  }

  #[inline]
  pub fn type_def(
    &self,
    id: TypeDefId,
  ) -> &TypeDef {
    self.types.get(&id)
  }

  pub fn type_def_mut(
    &mut self,
    id: TypeDefId,
  ) -> &mut TypeDef {
    self.types.get_mut(id)
  }

  #[inline]
  pub fn method(
    &self,
    id: MethodDefId,
  ) -> &MethodDef {
    self.methods.get(&id)
  }

  pub fn method_mut(
    &mut self,
    id: MethodDefId,
  ) -> &mut MethodDef {
    self.methods.get_mut(id)
  }

  #[inline]
  pub fn field(
    &self,
    id: FieldDefId,
  ) -> &FieldDef {
    self.fields.get(&id)
  }

  pub fn field_mut(
    &mut self,
    id: FieldDefId,
  ) -> &mut FieldDef {
    self.fields.get_mut(id)
  }

  #[inline]
  pub fn property(
    &self,
    id: PropertyDefId,
  ) -> &PropertyDef {
    self.properties.get(&id)
  }

  pub fn property_mut(
    &mut self,
    id: PropertyDefId,
  ) -> &mut PropertyDef {
    self.properties.get_mut(id)
  }

  pub fn find_type(
    &self,
    full_name: &str,
  ) -> Option<TypeDefId> {
    self.by_full_name.get(full_name).copied()
  }

  pub fn find_method(
    &self,
    owner: TypeDefId,
    name: &str,
  ) -> Option<MethodDefId> {
    self.type_def(owner).methods.iter().copied().find(|m| self.method(*m).name == name)
  }

  pub fn find_field(
    &self,
    owner: TypeDefId,
    name: &str,
  ) -> Option<FieldDefId> {
    self.type_def(owner).fields.iter().copied().find(|f| self.field(*f).name == name)
  }

  /// Top-level types in insertion order.
  pub fn types(&self) -> &[TypeDefId] {
    &self.top_level
  }

  /// Every type, each top-level type followed by its nested types in pre-order.
  pub fn all_types(&self) -> Vec<TypeDefId> {
    let mut out = Vec::with_capacity(self.types.len());
    for id in &self.top_level {
      self.collect_nested(*id, &mut out);
    }
    out
  }

  fn collect_nested(
    &self,
    id: TypeDefId,
    out: &mut Vec<TypeDefId>,
  ) {
    out.push(id);
    for nested in &self.type_def(id).nested_types {
      self.collect_nested(*nested, out);
    }
  }

  /// The definition a reference points at. Arrays resolve to `System.Array`
  /// when the module defines it; generic parameters never resolve.
  pub fn resolve(
    &self,
    ty: &TypeRef,
  ) -> Option<TypeDefId> {
    match ty {
      TypeRef::Def(id) => Some(*id),
      TypeRef::Generic { definition, .. } => Some(*definition),
      TypeRef::Array(_) => self.find_type(ARRAY_TYPE),
      TypeRef::Param(_) => None,
    }
  }

  pub fn resolve_field(
    &self,
    field: &FieldRef,
  ) -> Option<FieldDefId> {
    let owner = self.resolve(&field.declaring_type)?;
    self.find_field(owner, &field.name)
  }

  /// How a definition refers to itself from its own members: generic
  /// definitions are instantiated over their own parameters.
  pub fn self_reference(
    &self,
    id: TypeDefId,
  ) -> TypeRef {
    let def = self.type_def(id);
    if def.has_generic_params() {
      TypeRef::generic(id, def.generic_params.iter().map(|p| TypeRef::param(p)).collect())
    } else {
      TypeRef::Def(id)
    }
  }
}
