//! Fixed-lookahead classification of a candidate's surrounding shape.
//!
//! ```text
//! Equality               HashCode
//! +0 call get_Default    +0 call get_Default
//! +1 ldarg.0             +1 ldarg.0
//! +2 ldfld               +2 ldfld
//! +3 ldarg.1             +3 callvirt GetHashCode
//! +4 ldfld
//! +5 callvirt Equals
//! ```
//!
//! Only the position of `callvirt` matters; the instructions in between
//! are not inspected further. The two shapes cannot both match: Equality
//! needs `+3` not to be a `callvirt`, HashCode needs it to be one.

use recordeq_metadata::{Instruction, OpCode};

use crate::PatternKind;

pub fn classify(
  instructions: &[Instruction],
  anchor: usize,
) -> PatternKind {
  for kind in [PatternKind::Equality, PatternKind::HashCode] {
    if let Some(distance) = kind.terminal_distance()
      && matches_shape(instructions, anchor, distance)
    {
      return kind;
    }
  }
  PatternKind::Unrecognized
}

/// `anchor+1 .. anchor+distance` hold no `callvirt` and `anchor+distance` is one.
pub(crate) fn matches_shape(
  instructions: &[Instruction],
  anchor: usize,
  distance: usize,
) -> bool {
  let Some(window) = anchor
    .checked_add(distance)
    .and_then(|terminal| instructions.get(anchor + 1..=terminal))
  else {
    return false;
  };

  match window.split_last() {
    Some((terminal, gap)) => terminal.opcode == OpCode::Callvirt && gap.iter().all(|i| i.opcode != OpCode::Callvirt),
    None => false,
  }
}
