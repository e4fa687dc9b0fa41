#![allow(dead_code)]

use recordeq_config::{DefaultBehavior, WeaverConfig};
use recordeq_metadata::{
  AttributeArg, CustomAttribute, FieldDef, FieldDefId, FieldRef, Instruction, MethodBody, MethodDef, MethodDefId,
  MethodRef, Module, OpCode, Operand, PropertyDef, PropertyDefId, TypeDef, TypeDefId, TypeRef, framework,
  framework::Framework,
};
use recordeq_weaver::{WeaveError, WeaveReport, weave};

/// `-1521134295`, the multiplier compilers use to combine member hashes.
pub const HASH_MULTIPLIER: i32 = -1521134295;

pub struct Member {
  pub name: String,
  pub ty: TypeRef,
  /// `None`: no attribute. `Some(None)`: `[DeepEquals]`. `Some(Some(b))`: `[DeepEquals(b)]`.
  pub deep_equals: Option<Option<bool>>,
}

pub struct RecordSpec {
  pub name: String,
  pub outer: Option<TypeDefId>,
  pub generic_params: Vec<String>,
  pub members: Vec<Member>,
}

impl RecordSpec {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      outer: None,
      generic_params: Vec::new(),
      members: Vec::new(),
    }
  }

  pub fn member(
    mut self,
    name: &str,
    ty: TypeRef,
  ) -> Self {
    self.members.push(Member {
      name: name.to_string(),
      ty,
      deep_equals: None,
    });
    self
  }

  pub fn member_with(
    mut self,
    name: &str,
    ty: TypeRef,
    deep_equals: Option<bool>,
  ) -> Self {
    self.members.push(Member {
      name: name.to_string(),
      ty,
      deep_equals: Some(deep_equals),
    });
    self
  }

  pub fn nested_in(
    mut self,
    outer: TypeDefId,
  ) -> Self {
    self.outer = Some(outer);
    self
  }

  /// Makes the record generic; the name should carry the arity suffix.
  pub fn generic(
    mut self,
    params: &[&str],
  ) -> Self {
    self.generic_params = params.iter().map(|p| p.to_string()).collect();
    self
  }
}

pub struct Record {
  pub ty: TypeDefId,
  pub equals: MethodDefId,
  pub get_hash_code: MethodDefId,
  pub properties: Vec<PropertyDefId>,
  pub fields: Vec<FieldDefId>,
}

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

  pub fn int32(&self) -> TypeRef {
    TypeRef::Def(self.fw.int32)
  }

  pub fn string(&self) -> TypeRef {
    TypeRef::Def(self.fw.string)
  }

  pub fn type_(&self) -> TypeRef {
    TypeRef::Def(self.fw.type_)
  }

  pub fn class(
    &mut self,
    name: &str,
  ) -> TypeDefId {
    let object = TypeRef::Def(self.fw.object);
    self.module.add_type(TypeDef::class("TestAssembly", name).with_base(object))
  }

  pub fn generic(
    &self,
    definition: TypeDefId,
    args: Vec<TypeRef>,
  ) -> TypeRef {
    TypeRef::generic(definition, args)
  }

  fn comparer_call(
    &self,
    method: MethodDefId,
    compared: &TypeRef,
  ) -> MethodRef {
    MethodRef::from_definition(&self.module, method, self.fw.equality_comparer_of(compared.clone()))
  }

  /// `call EqualityComparer`1<compared>::get_Default`
  pub fn acquisition(
    &self,
    compared: &TypeRef,
  ) -> Instruction {
    Instruction::call(self.comparer_call(self.fw.equality_comparer_get_default, compared))
  }

  pub fn equals_invocation(
    &self,
    compared: &TypeRef,
  ) -> Instruction {
    Instruction::callvirt(self.comparer_call(self.fw.equality_comparer_equals, compared))
  }

  pub fn hash_invocation(
    &self,
    compared: &TypeRef,
  ) -> Instruction {
    Instruction::callvirt(self.comparer_call(self.fw.equality_comparer_get_hash_code, compared))
  }

  /// Adds a record the way a compiler emits one: backing fields and
  /// accessors, `EqualityContract`, `PrintMembers`, `ToString`,
  /// `<Clone>$`, `Equals(Self)` and `GetHashCode()`.
  pub fn add_record(
    &mut self,
    spec: RecordSpec,
  ) -> Record {
    let object = TypeRef::Def(self.fw.object);
    let params = spec.generic_params.iter().map(String::as_str).collect::<Vec<_>>();
    let def = TypeDef::class(if spec.outer.is_some() { "" } else { "TestAssembly" }, &spec.name)
      .with_base(object)
      .with_generic_params(&params);
    let ty = match spec.outer {
      Some(outer) => self.module.add_nested_type(outer, def),
      None => self.module.add_type(def),
    };
    let this = self.module.self_reference(ty);
    let fw = self.fw;

    let contract_getter = self.module.add_method(
      ty,
      MethodDef::new("get_EqualityContract", TypeRef::Def(fw.type_))
        .with_body(MethodBody::new(vec![
          Instruction::new(OpCode::Ldtoken, Operand::Type(this.clone())),
          Instruction::simple(OpCode::Ret),
        ]))
        .virtual_(),
    );
    self.module.add_property(
      ty,
      PropertyDef::new("EqualityContract", TypeRef::Def(fw.type_)).with_getter(contract_getter),
    );

    let mut properties = Vec::new();
    let mut fields = Vec::new();
    let mut field_refs = Vec::new();
    for member in &spec.members {
      let field = self.module.add_field(
        ty,
        FieldDef::new(&format!("<{}>k__BackingField", member.name), member.ty.clone()).private(),
      );
      let field_ref = FieldRef::from_definition(&self.module, field).unwrap();

      let getter = self.module.add_method(
        ty,
        MethodDef::new(&format!("get_{}", member.name), member.ty.clone()).with_body(MethodBody::new(vec![
          Instruction::simple(OpCode::Ldarg0),
          Instruction::ldfld(field_ref.clone()),
          Instruction::simple(OpCode::Ret),
        ])),
      );
      let setter = self.module.add_method(
        ty,
        MethodDef::new(&format!("set_{}", member.name), TypeRef::Def(fw.void))
          .with_param("value", member.ty.clone())
          .with_body(MethodBody::new(vec![
            Instruction::simple(OpCode::Ldarg0),
            Instruction::simple(OpCode::Ldarg1),
            Instruction::stfld(field_ref.clone()),
            Instruction::simple(OpCode::Ret),
          ])),
      );

      let mut property = PropertyDef::new(&member.name, member.ty.clone())
        .with_getter(getter)
        .with_setter(setter);
      if let Some(enabled) = member.deep_equals {
        property = property.with_attribute(self.deep_equals(enabled));
      }

      properties.push(self.module.add_property(ty, property));
      fields.push(field);
      field_refs.push((field_ref, member.ty.clone()));
    }

    self.module.add_method(
      ty,
      MethodDef::new("PrintMembers", TypeRef::Def(fw.boolean))
        .with_param("builder", TypeRef::Def(fw.string_builder))
        .with_body(MethodBody::new(vec![Instruction::ldc_i4(1), Instruction::simple(OpCode::Ret)]))
        .virtual_(),
    );
    self.module.add_method(
      ty,
      MethodDef::new("ToString", TypeRef::Def(fw.string))
        .with_body(MethodBody::new(vec![
          Instruction::new(OpCode::Ldstr, Operand::String(spec.name.clone())),
          Instruction::simple(OpCode::Ret),
        ]))
        .virtual_(),
    );
    self.module.add_method(
      ty,
      MethodDef::new("<Clone>$", this.clone())
        .with_body(MethodBody::new(vec![
          Instruction::simple(OpCode::Ldarg0),
          Instruction::simple(OpCode::Ret),
        ]))
        .virtual_(),
    );

    let contract = MethodRef::from_definition(&self.module, contract_getter, this.clone());
    let equals_body = self.equals_body(&contract, &field_refs);
    let equals = self.module.add_method(
      ty,
      MethodDef::new("Equals", TypeRef::Def(fw.boolean))
        .with_param("other", this)
        .with_body(equals_body)
        .virtual_(),
    );
    let hash_body = self.hash_body(&contract, &field_refs);
    let get_hash_code = self.module.add_method(
      ty,
      MethodDef::new("GetHashCode", TypeRef::Def(fw.int32))
        .with_body(hash_body)
        .virtual_(),
    );

    Record {
      ty,
      equals,
      get_hash_code,
      properties,
      fields,
    }
  }

  /// ```text
  /// if (this == other) return true;
  /// if (other == null) return false;
  /// if (EqualityContract != other.EqualityContract) return false;
  /// foreach member: if (!EqualityComparer<T>.Default.Equals(f, other.f)) return false;
  /// return true;
  /// ```
  fn equals_body(
    &self,
    contract: &MethodRef,
    fields: &[(FieldRef, TypeRef)],
  ) -> MethodBody {
    const HEADER: usize = 11;
    const PER_MEMBER: usize = 7;
    let ret_true = HEADER + PER_MEMBER * fields.len();
    let ret_false = ret_true + 2;

    let mut instructions = vec![
      Instruction::simple(OpCode::Ldarg0),
      Instruction::simple(OpCode::Ldarg1),
      Instruction::branch(OpCode::Beq, ret_true),
      Instruction::simple(OpCode::Ldarg1),
      Instruction::branch(OpCode::Brfalse, ret_false),
      Instruction::simple(OpCode::Ldarg0),
      Instruction::callvirt(contract.clone()),
      Instruction::simple(OpCode::Ldarg1),
      Instruction::callvirt(contract.clone()),
      Instruction::simple(OpCode::Ceq),
      Instruction::branch(OpCode::Brfalse, ret_false),
    ];

    for (field, ty) in fields {
      instructions.extend([
        self.acquisition(ty),
        Instruction::simple(OpCode::Ldarg0),
        Instruction::ldfld(field.clone()),
        Instruction::simple(OpCode::Ldarg1),
        Instruction::ldfld(field.clone()),
        self.equals_invocation(ty),
        Instruction::branch(OpCode::Brfalse, ret_false),
      ]);
    }

    instructions.extend([
      Instruction::ldc_i4(1),
      Instruction::simple(OpCode::Ret),
      Instruction::ldc_i4(0),
      Instruction::simple(OpCode::Ret),
    ]);
    MethodBody::new(instructions)
  }

  /// `EqualityComparer<Type>.Default.GetHashCode(EqualityContract) * M + ...`
  fn hash_body(
    &self,
    contract: &MethodRef,
    fields: &[(FieldRef, TypeRef)],
  ) -> MethodBody {
    let type_ = self.type_();
    let mut instructions = vec![
      self.acquisition(&type_),
      Instruction::simple(OpCode::Ldarg0),
      Instruction::callvirt(contract.clone()),
      self.hash_invocation(&type_),
    ];

    for (field, ty) in fields {
      instructions.extend([
        Instruction::ldc_i4(HASH_MULTIPLIER),
        Instruction::simple(OpCode::Mul),
        self.acquisition(ty),
        Instruction::simple(OpCode::Ldarg0),
        Instruction::ldfld(field.clone()),
        self.hash_invocation(ty),
        Instruction::simple(OpCode::Add),
      ]);
    }

    instructions.push(Instruction::simple(OpCode::Ret));
    MethodBody::new(instructions)
  }

  pub fn deep_equals(
    &self,
    enabled: Option<bool>,
  ) -> CustomAttribute {
    let attribute = CustomAttribute::new(TypeRef::Def(self.fw.deep_equals_attribute));
    match enabled {
      Some(enabled) => attribute.with_arg(AttributeArg::Bool(enabled)),
      None => attribute,
    }
  }

  pub fn body(
    &self,
    method: MethodDefId,
  ) -> &MethodBody {
    self.module.method(method).body.as_ref().expect("method has a body")
  }

  pub fn listing(
    &self,
    method: MethodDefId,
  ) -> String {
    self.module.disassemble(self.body(method))
  }

  /// Full names of the declaring types of every `call`/`callvirt` in `method`.
  pub fn call_targets(
    &self,
    method: MethodDefId,
  ) -> Vec<String> {
    self
      .body(method)
      .instructions
      .iter()
      .filter_map(|i| i.method())
      .map(|m| format!("{}::{}", self.module.full_name(&m.declaring_type), m.name))
      .collect()
  }

  pub fn weave(&mut self) -> Result<WeaveReport, WeaveError> {
    weave(&mut self.module, WeaverConfig::default())
  }

  pub fn weave_with(
    &mut self,
    behavior: DefaultBehavior,
  ) -> Result<WeaveReport, WeaveError> {
    weave(&mut self.module, WeaverConfig::default().with_default_behavior(behavior))
  }
}
