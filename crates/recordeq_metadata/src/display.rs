//! Textual names and listings.
//!
//! Names follow the CLI metadata convention (``Ns.Outer/Inner``,
//! ``System.Collections.Generic.List`1<TestAssembly.SubClass>``). Every
//! textual comparison in the weaver goes through these functions.

use std::fmt::Write;

use crate::{Instruction, MethodBody, Module, Operand, TypeDefId, TypeRef};

impl Module {
  pub fn type_full_name(
    &self,
    id: TypeDefId,
  ) -> String {
    let def = self.type_def(id);
    match def.declaring_type {
      Some(outer) => format!("{}/{}", self.type_full_name(outer), def.name),
      None if def.namespace.is_empty() => def.name.clone(),
      None => format!("{}.{}", def.namespace, def.name),
    }
  }

  pub fn full_name(
    &self,
    ty: &TypeRef,
  ) -> String {
    match ty {
      TypeRef::Def(id) => self.type_full_name(*id),
      TypeRef::Generic { definition, args } => {
        let args = args.iter().map(|a| self.full_name(a)).collect::<Vec<_>>().join(",");
        format!("{}<{}>", self.type_full_name(*definition), args)
      },
      TypeRef::Param(name) => name.clone(),
      TypeRef::Array(element) => format!("{}[]", self.full_name(element)),
    }
  }

  /// Simple name without namespace or arguments (``EqualityComparer`1``, `SubClass[]`).
  pub fn short_name(
    &self,
    ty: &TypeRef,
  ) -> String {
    match ty {
      TypeRef::Def(id) | TypeRef::Generic { definition: id, .. } => self.type_def(*id).name.clone(),
      TypeRef::Param(name) => name.clone(),
      TypeRef::Array(element) => format!("{}[]", self.short_name(element)),
    }
  }

  pub fn format_instruction(
    &self,
    instr: &Instruction,
  ) -> String {
    let mnemonic = instr.opcode.mnemonic();
    match &instr.operand {
      Operand::None => mnemonic.to_string(),
      Operand::Int(v) => format!("{} {}", mnemonic, v),
      Operand::String(s) => format!("{} {:?}", mnemonic, s),
      Operand::Arg(i) | Operand::Local(i) => format!("{} {}", mnemonic, i),
      Operand::Target(t) => format!("{} IL_{:04x}", mnemonic, t),
      Operand::Type(ty) => format!("{} {}", mnemonic, self.full_name(ty)),
      Operand::Field(f) => format!("{} {}::{}", mnemonic, self.full_name(&f.declaring_type), f.name),
      Operand::Method(m) => format!("{} {}::{}", mnemonic, self.full_name(&m.declaring_type), m.name),
    }
  }

  /// One `IL_xxxx: ...` line per instruction, labelled by index.
  pub fn disassemble(
    &self,
    body: &MethodBody,
  ) -> String {
    let mut out = String::new();
    for (i, instr) in body.instructions.iter().enumerate() {
      let _ = writeln!(out, "IL_{:04x}: {}", i, self.format_instruction(instr));
    }
    out
  }
}
