use crate::{CustomAttribute, FieldDefId, MethodDefId, PropertyDefId, TypeDefId};

/// A reference to a type as it appears in signatures, operands and
/// inheritance clauses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
  /// A definition used as-is: non-generic types, or an open generic
  /// definition such as ``IEnumerable`1``.
  Def(TypeDefId),

  /// An instantiation: ``List`1<SubClass>``, ``Dictionary`2<TKey,TValue>``.
  Generic { definition: TypeDefId, args: Vec<TypeRef> },

  /// A bare generic parameter (`T`, `TKey`), scoped to the definition whose
  /// signature mentions it.
  Param(String),

  /// Single-dimensional array of the element type.
  Array(Box<TypeRef>),
}

impl TypeRef {
  pub fn generic(
    definition: TypeDefId,
    args: Vec<TypeRef>,
  ) -> Self {
    TypeRef::Generic { definition, args }
  }

  pub fn param(name: &str) -> Self {
    TypeRef::Param(name.to_string())
  }

  pub fn array(element: TypeRef) -> Self {
    TypeRef::Array(Box::new(element))
  }

  pub fn is_generic_instance(&self) -> bool {
    matches!(self, TypeRef::Generic { .. })
  }

  pub fn is_array(&self) -> bool {
    matches!(self, TypeRef::Array(_))
  }

  /// Generic arguments of an instantiation; empty for everything else.
  pub fn generic_args(&self) -> &[TypeRef] {
    match self {
      TypeRef::Generic { args, .. } => args,
      _ => &[],
    }
  }

  /// The definition behind `Def` and `Generic` references.
  pub fn element_definition(&self) -> Option<TypeDefId> {
    match self {
      TypeRef::Def(id) => Some(*id),
      TypeRef::Generic { definition, .. } => Some(*definition),
      TypeRef::Param(_) | TypeRef::Array(_) => None,
    }
  }
}

impl From<TypeDefId> for TypeRef {
  fn from(id: TypeDefId) -> Self {
    TypeRef::Def(id)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
  Class,
  Interface,
  ValueType,
}

/// A type definition.
///
/// `interfaces` lists every interface the type declares in metadata. As with
/// compiled CLI metadata, a class lists the full interface set it
/// implements (`List`1` names `IList<T>`, `ICollection<T>` and
/// `IEnumerable<T>`), not only the ones written in source.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
  pub namespace: String,
  /// Simple name including the generic arity suffix (``List`1``).
  pub name: String,
  pub kind: TypeKind,
  pub generic_params: Vec<String>,
  pub base: Option<TypeRef>,
  pub interfaces: Vec<TypeRef>,
  pub is_abstract: bool,
  pub declaring_type: Option<TypeDefId>,
  pub nested_types: Vec<TypeDefId>,
  pub fields: Vec<FieldDefId>,
  pub properties: Vec<PropertyDefId>,
  pub methods: Vec<MethodDefId>,
  pub attributes: Vec<CustomAttribute>,
}

impl TypeDef {
  fn new(
    namespace: &str,
    name: &str,
    kind: TypeKind,
  ) -> Self {
    Self {
      namespace: namespace.to_string(),
      name: name.to_string(),
      kind,
      generic_params: Vec::new(),
      base: None,
      interfaces: Vec::new(),
      is_abstract: false,
      declaring_type: None,
      nested_types: Vec::new(),
      fields: Vec::new(),
      properties: Vec::new(),
      methods: Vec::new(),
      attributes: Vec::new(),
    }
  }

  pub fn class(
    namespace: &str,
    name: &str,
  ) -> Self {
    Self::new(namespace, name, TypeKind::Class)
  }

  pub fn interface(
    namespace: &str,
    name: &str,
  ) -> Self {
    let mut def = Self::new(namespace, name, TypeKind::Interface);
    def.is_abstract = true;
    def
  }

  pub fn value_type(
    namespace: &str,
    name: &str,
  ) -> Self {
    Self::new(namespace, name, TypeKind::ValueType)
  }

  pub fn with_generic_params(
    mut self,
    params: &[&str],
  ) -> Self {
    self.generic_params = params.iter().map(|p| p.to_string()).collect();
    self
  }

  pub fn with_base(
    mut self,
    base: TypeRef,
  ) -> Self {
    self.base = Some(base);
    self
  }

  pub fn with_interface(
    mut self,
    interface: TypeRef,
  ) -> Self {
    self.interfaces.push(interface);
    self
  }

  pub fn with_attribute(
    mut self,
    attribute: CustomAttribute,
  ) -> Self {
    self.attributes.push(attribute);
    self
  }

  pub fn abstract_(mut self) -> Self {
    self.is_abstract = true;
    self
  }

  pub fn is_interface(&self) -> bool {
    self.kind == TypeKind::Interface
  }

  pub fn has_generic_params(&self) -> bool {
    !self.generic_params.is_empty()
  }
}
