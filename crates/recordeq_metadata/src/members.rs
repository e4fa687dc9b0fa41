use crate::{MethodBody, MethodDefId, TypeDefId, TypeRef};

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeArg {
  Bool(bool),
  Int(i64),
  String(String),
  Type(TypeRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttribute {
  pub attribute_type: TypeRef,
  /// Constructor arguments, in order.
  pub args: Vec<AttributeArg>,
}

impl CustomAttribute {
  pub fn new(attribute_type: TypeRef) -> Self {
    Self {
      attribute_type,
      args: Vec::new(),
    }
  }

  pub fn with_arg(
    mut self,
    arg: AttributeArg,
  ) -> Self {
    self.args.push(arg);
    self
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
  pub name: String,
  pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
  pub name: String,
  /// Set when the method is added to a module.
  pub declaring_type: Option<TypeDefId>,
  pub params: Vec<ParamDef>,
  pub return_type: TypeRef,
  pub is_static: bool,
  pub is_virtual: bool,
  pub is_abstract: bool,
  pub body: Option<MethodBody>,
  pub attributes: Vec<CustomAttribute>,
}

impl MethodDef {
  pub fn new(
    name: &str,
    return_type: TypeRef,
  ) -> Self {
    Self {
      name: name.to_string(),
      declaring_type: None,
      params: Vec::new(),
      return_type,
      is_static: false,
      is_virtual: false,
      is_abstract: false,
      body: None,
      attributes: Vec::new(),
    }
  }

  pub fn with_param(
    mut self,
    name: &str,
    ty: TypeRef,
  ) -> Self {
    self.params.push(ParamDef {
      name: name.to_string(),
      ty,
    });
    self
  }

  pub fn with_body(
    mut self,
    body: MethodBody,
  ) -> Self {
    self.body = Some(body);
    self
  }

  pub fn static_(mut self) -> Self {
    self.is_static = true;
    self
  }

  pub fn virtual_(mut self) -> Self {
    self.is_virtual = true;
    self
  }

  pub fn abstract_(mut self) -> Self {
    self.is_virtual = true;
    self.is_abstract = true;
    self
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
  pub name: String,
  pub declaring_type: Option<TypeDefId>,
  pub field_type: TypeRef,
  pub is_private: bool,
  pub is_static: bool,
}

impl FieldDef {
  pub fn new(
    name: &str,
    field_type: TypeRef,
  ) -> Self {
    Self {
      name: name.to_string(),
      declaring_type: None,
      field_type,
      is_private: false,
      is_static: false,
    }
  }

  pub fn private(mut self) -> Self {
    self.is_private = true;
    self
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
  pub name: String,
  pub declaring_type: Option<TypeDefId>,
  pub property_type: TypeRef,
  pub getter: Option<MethodDefId>,
  pub setter: Option<MethodDefId>,
  pub attributes: Vec<CustomAttribute>,
}

impl PropertyDef {
  pub fn new(
    name: &str,
    property_type: TypeRef,
  ) -> Self {
    Self {
      name: name.to_string(),
      declaring_type: None,
      property_type,
      getter: None,
      setter: None,
      attributes: Vec::new(),
    }
  }

  pub fn with_getter(
    mut self,
    getter: MethodDefId,
  ) -> Self {
    self.getter = Some(getter);
    self
  }

  pub fn with_setter(
    mut self,
    setter: MethodDefId,
  ) -> Self {
    self.setter = Some(setter);
    self
  }

  pub fn with_attribute(
    mut self,
    attribute: CustomAttribute,
  ) -> Self {
    self.attributes.push(attribute);
    self
  }
}
