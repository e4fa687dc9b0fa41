use recordeq_metadata::{Instruction, TypeRef};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternKind {
  /// `get_Default; ldarg.0; ldfld; ldarg.1; ldfld; callvirt Equals`
  Equality,
  /// `get_Default; ldarg.0; ldfld; callvirt GetHashCode`
  HashCode,
  Unrecognized,
}

impl PatternKind {
  /// Distance from the acquisition to the invocation it feeds.
  pub fn terminal_distance(self) -> Option<usize> {
    match self {
      PatternKind::Equality => Some(5),
      PatternKind::HashCode => Some(3),
      PatternKind::Unrecognized => None,
    }
  }
}

/// One default-comparer acquisition over a sequence type.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePattern {
  pub offset: usize,
  /// The acquisition as scanned.
  pub instruction: Instruction,
  pub collection_type: TypeRef,
  pub element_type: TypeRef,
  pub kind: PatternKind,
}

impl CandidatePattern {
  pub fn terminal_offset(&self) -> Option<usize> {
    self.kind.terminal_distance().map(|d| self.offset + d)
  }
}
