use recordeq_ancestry::{GenericArgumentBinder, ResolutionError, STRING_TYPE};
use recordeq_metadata::{Instruction, MethodBody, OpCode};

use crate::{CandidatePattern, PatternKind, ScanError};

pub const ACQUISITION_METHOD: &str = "get_Default";
pub const COMPARER_PREFIX: &str = "EqualityComparer";

/// Finds default-comparer acquisitions over sequence types.
#[derive(Debug, Clone, Copy)]
pub struct CandidateScanner<'m> {
  binder: GenericArgumentBinder<'m>,
}

impl<'m> CandidateScanner<'m> {
  pub fn new(binder: GenericArgumentBinder<'m>) -> Self {
    Self { binder }
  }

  /// Candidates in instruction order, each tagged `Unrecognized`.
  pub fn scan<'a>(
    &'a self,
    body: &'a MethodBody,
  ) -> impl Iterator<Item = Result<CandidatePattern, ScanError>> + 'a {
    body.instructions.iter().enumerate().filter_map(move |(offset, instr)| {
      self
        .inspect(offset, instr)
        .map_err(|source| ScanError { offset, source })
        .transpose()
    })
  }

  pub fn inspect(
    &self,
    offset: usize,
    instr: &Instruction,
  ) -> Result<Option<CandidatePattern>, ResolutionError> {
    if instr.opcode != OpCode::Call {
      return Ok(None);
    }

    let Some(method) = instr.method() else {
      return Ok(None);
    };

    let module = self.binder.module();
    if method.name != ACQUISITION_METHOD || !module.short_name(&method.declaring_type).starts_with(COMPARER_PREFIX) {
      return Ok(None);
    }

    let [collection] = method.declaring_type.generic_args() else {
      return Ok(None);
    };

    // Generic parameters and unknown references have no ancestry to walk.
    if !collection.is_array() && module.resolve(collection).is_none() {
      return Ok(None);
    }

    if module.full_name(collection) == STRING_TYPE {
      return Ok(None);
    }

    let sequence = self.binder.well_known().sequence;
    let Some(found) = self.binder.bind_first(collection, sequence, None)? else {
      return Ok(None);
    };

    let [element] = found.arguments.as_slice() else {
      return Ok(None);
    };

    Ok(Some(CandidatePattern {
      offset,
      instruction: instr.clone(),
      collection_type: collection.clone(),
      element_type: element.clone(),
      kind: PatternKind::Unrecognized,
    }))
  }
}
