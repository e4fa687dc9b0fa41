use crate::{FieldDefId, MethodDefId, Module, TypeRef};

/// Instruction opcodes understood by the model.
///
/// The set covers what compilers emit for record equality and accessor
/// bodies; anything else can be expressed with `Nop` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
  Nop,
  Ldarg0,
  Ldarg1,
  Ldarg2,
  Ldarg,
  Starg,
  Ldloc,
  Stloc,
  Ldnull,
  LdcI4,
  Ldstr,
  Ldfld,
  Ldflda,
  Stfld,
  Ldsfld,
  Ldtoken,
  /// Direct call: statics and non-virtual instance methods.
  Call,
  /// Virtual call through the object's method table.
  Callvirt,
  Newobj,
  Ret,
  Br,
  Brtrue,
  Brfalse,
  Beq,
  Bne,
  Ceq,
  Add,
  Sub,
  Mul,
  Xor,
  Dup,
  Pop,
  Box,
  Castclass,
  Isinst,
  Leave,
  Endfinally,
}

impl OpCode {
  pub fn mnemonic(&self) -> &'static str {
    match self {
      OpCode::Nop => "nop",
      OpCode::Ldarg0 => "ldarg.0",
      OpCode::Ldarg1 => "ldarg.1",
      OpCode::Ldarg2 => "ldarg.2",
      OpCode::Ldarg => "ldarg",
      OpCode::Starg => "starg",
      OpCode::Ldloc => "ldloc",
      OpCode::Stloc => "stloc",
      OpCode::Ldnull => "ldnull",
      OpCode::LdcI4 => "ldc.i4",
      OpCode::Ldstr => "ldstr",
      OpCode::Ldfld => "ldfld",
      OpCode::Ldflda => "ldflda",
      OpCode::Stfld => "stfld",
      OpCode::Ldsfld => "ldsfld",
      OpCode::Ldtoken => "ldtoken",
      OpCode::Call => "call",
      OpCode::Callvirt => "callvirt",
      OpCode::Newobj => "newobj",
      OpCode::Ret => "ret",
      OpCode::Br => "br",
      OpCode::Brtrue => "brtrue",
      OpCode::Brfalse => "brfalse",
      OpCode::Beq => "beq",
      OpCode::Bne => "bne.un",
      OpCode::Ceq => "ceq",
      OpCode::Add => "add",
      OpCode::Sub => "sub",
      OpCode::Mul => "mul",
      OpCode::Xor => "xor",
      OpCode::Dup => "dup",
      OpCode::Pop => "pop",
      OpCode::Box => "box",
      OpCode::Castclass => "castclass",
      OpCode::Isinst => "isinst",
      OpCode::Leave => "leave",
      OpCode::Endfinally => "endfinally",
    }
  }

  pub fn is_branch(&self) -> bool {
    matches!(
      self,
      OpCode::Br | OpCode::Brtrue | OpCode::Brfalse | OpCode::Beq | OpCode::Bne | OpCode::Leave
    )
  }
}

/// A method as referenced from an instruction operand.
///
/// `declaring_type` may be an instantiation (``EqualityComparer`1<List`1<SubClass>>``)
/// while `params` and `return_type` stay in terms of the definition's own
/// generic parameters, as in compiled metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
  pub declaring_type: TypeRef,
  pub name: String,
  pub params: Vec<TypeRef>,
  pub return_type: TypeRef,
  pub has_this: bool,
}

impl MethodRef {
  /// Reference to `method` called through `declaring_type`, typically an
  /// instantiation of the method's owner.
  pub fn from_definition(
    module: &Module,
    method: MethodDefId,
    declaring_type: TypeRef,
  ) -> Self {
    let def = module.method(method);

    Self {
      declaring_type,
      name: def.name.clone(),
      params: def.params.iter().map(|p| p.ty.clone()).collect(),
      return_type: def.return_type.clone(),
      has_this: !def.is_static,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
  pub declaring_type: TypeRef,
  pub name: String,
  pub field_type: TypeRef,
}

impl FieldRef {
  /// Reference to `field` through its owner. `None` for a definition that
  /// was never attached to a type.
  pub fn from_definition(
    module: &Module,
    field: FieldDefId,
  ) -> Option<Self> {
    let def = module.field(field);
    let owner = def.declaring_type?;

    Some(Self {
      declaring_type: module.self_reference(owner),
      name: def.name.clone(),
      field_type: def.field_type.clone(),
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
  None,
  Int(i32),
  String(String),
  Arg(u16),
  Local(u16),
  /// Branch target, as an index into the owning instruction list.
  Target(usize),
  Type(TypeRef),
  Field(FieldRef),
  Method(MethodRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instruction {
  pub opcode: OpCode,
  pub operand: Operand,
}

impl Instruction {
  pub fn new(
    opcode: OpCode,
    operand: Operand,
  ) -> Self {
    Self { opcode, operand }
  }

  pub fn simple(opcode: OpCode) -> Self {
    Self::new(opcode, Operand::None)
  }

  pub fn call(method: MethodRef) -> Self {
    Self::new(OpCode::Call, Operand::Method(method))
  }

  pub fn callvirt(method: MethodRef) -> Self {
    Self::new(OpCode::Callvirt, Operand::Method(method))
  }

  pub fn ldfld(field: FieldRef) -> Self {
    Self::new(OpCode::Ldfld, Operand::Field(field))
  }

  pub fn stfld(field: FieldRef) -> Self {
    Self::new(OpCode::Stfld, Operand::Field(field))
  }

  pub fn ldc_i4(value: i32) -> Self {
    Self::new(OpCode::LdcI4, Operand::Int(value))
  }

  pub fn branch(
    opcode: OpCode,
    target: usize,
  ) -> Self {
    debug_assert!(opcode.is_branch());
    Self::new(opcode, Operand::Target(target))
  }

  pub fn method(&self) -> Option<&MethodRef> {
    match &self.operand {
      Operand::Method(m) => Some(m),
      _ => None,
    }
  }

  pub fn field(&self) -> Option<&FieldRef> {
    match &self.operand {
      Operand::Field(f) => Some(f),
      _ => None,
    }
  }
}

/// Protected region with its handler, as instruction index ranges
/// (`start` inclusive, `end` exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionHandler {
  pub try_start: usize,
  pub try_end: usize,
  pub handler_start: usize,
  pub handler_end: usize,
  /// `None` for finally blocks.
  pub catch_type: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodBody {
  pub instructions: Vec<Instruction>,
  pub handlers: Vec<ExceptionHandler>,
}

impl MethodBody {
  pub fn new(instructions: Vec<Instruction>) -> Self {
    Self {
      instructions,
      handlers: Vec::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.instructions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.instructions.is_empty()
  }

  /// Whether any instruction's operand is exactly `field`.
  pub fn references_field(
    &self,
    field: &FieldRef,
  ) -> bool {
    self.instructions.iter().any(|i| i.field() == Some(field))
  }
}
