use recordeq_metadata::{Instruction, MethodBody, OpCode};

use crate::{AlternateComparer, CandidatePattern, PatternKind, PatternViolation, classify::matches_shape};

/// Swaps a classified candidate's acquisition and invocation for the
/// alternate comparer's, one instruction for one.
#[derive(Debug, Clone, Copy)]
pub struct InstructionRewriter<'c> {
  comparer: &'c AlternateComparer,
}

impl<'c> InstructionRewriter<'c> {
  pub fn new(comparer: &'c AlternateComparer) -> Self {
    Self { comparer }
  }

  /// Returns whether the body changed. Every precondition is checked before
  /// the first write, so an error leaves `body` as it was.
  pub fn rewrite(
    &self,
    body: &mut MethodBody,
    candidate: &CandidatePattern,
    approved: bool,
  ) -> Result<bool, PatternViolation> {
    if !approved {
      return Ok(false);
    }

    let anchor = candidate.offset;
    let Some(distance) = candidate.kind.terminal_distance() else {
      return Err(PatternViolation {
        offset: anchor,
        expected: "an equality or hash-code shape".to_string(),
        found: "an unrecognized shape".to_string(),
      });
    };

    let instructions = &body.instructions;
    if instructions.get(anchor) != Some(&candidate.instruction) {
      return Err(PatternViolation {
        offset: anchor,
        expected: "the scanned get_Default acquisition".to_string(),
        found: describe(instructions.get(anchor)),
      });
    }

    if !matches_shape(instructions, anchor, distance) {
      let gap_callvirt = (anchor + 1..anchor + distance)
        .find(|i| instructions.get(*i).is_some_and(|instr| instr.opcode == OpCode::Callvirt));

      return Err(match gap_callvirt {
        Some(offset) => PatternViolation {
          offset,
          expected: "no callvirt before the comparer invocation".to_string(),
          found: describe(instructions.get(offset)),
        },
        None => PatternViolation {
          offset: anchor + distance,
          expected: "callvirt".to_string(),
          found: describe(instructions.get(anchor + distance)),
        },
      });
    }

    let comparer_type = self.comparer.instantiate(candidate.element_type.clone());
    let invocation = match candidate.kind {
      PatternKind::Equality => self.comparer.equals(&comparer_type),
      _ => self.comparer.get_hash_code(&comparer_type),
    };

    body.instructions[anchor] = Instruction::call(self.comparer.get_default(&comparer_type));
    body.instructions[anchor + distance] = Instruction::callvirt(invocation);

    Ok(true)
  }
}

fn describe(instr: Option<&Instruction>) -> String {
  match instr {
    Some(instr) => instr.opcode.mnemonic().to_string(),
    None => "end of body".to_string(),
  }
}
