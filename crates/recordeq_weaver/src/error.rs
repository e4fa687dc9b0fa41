use std::fmt;

use recordeq_ancestry::ResolutionError;
use recordeq_diagnostics::{Diagnostic, Location};

/// Fatal weaving failures. Unrecognized patterns are reported, not raised.
#[derive(Debug, Clone, PartialEq)]
pub enum WeaveError {
  /// A candidate's collection type has an ancestry that cannot be resolved.
  Resolution {
    type_name: String,
    method_name: String,
    offset: usize,
    source: ResolutionError,
  },
  /// A rewrite was attempted on a body that no longer has the classified shape.
  PatternInvariant {
    type_name: String,
    method_name: String,
    offset: usize,
    expected: String,
    found: String,
  },
  /// The alternate comparer, one of its members, or a well-known framework
  /// type is absent from the module.
  MissingDefinition { name: String },
}

impl WeaveError {
  pub fn code(&self) -> &'static str {
    match self {
      WeaveError::Resolution { .. } => "W0001",
      WeaveError::PatternInvariant { .. } => "W0002",
      WeaveError::MissingDefinition { .. } => "W0003",
    }
  }

  pub fn to_diagnostic(&self) -> Diagnostic {
    let diag = Diagnostic::error(self.to_string(), self.code());

    match self {
      WeaveError::Resolution {
        type_name,
        method_name,
        offset,
        ..
      } => diag
        .with_location(Location::in_method(type_name, method_name).at(*offset))
        .with_note("the comparer's collection type could not be resolved".to_string()),
      WeaveError::PatternInvariant {
        type_name,
        method_name,
        offset,
        ..
      } => diag
        .with_location(Location::in_method(type_name, method_name).at(*offset))
        .with_note("the method body was left unchanged".to_string()),
      WeaveError::MissingDefinition { .. } => {
        diag.with_note("reference the comparer library from the woven module".to_string())
      },
    }
  }
}

impl fmt::Display for WeaveError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      WeaveError::Resolution {
        type_name,
        method_name,
        offset,
        source,
      } => {
        write!(f, "{}::{} at IL_{:04x}: {}", type_name, method_name, offset, source)
      },
      WeaveError::PatternInvariant {
        type_name,
        method_name,
        offset,
        expected,
        found,
      } => {
        write!(
          f,
          "{}::{} at IL_{:04x}: expected {}, found {}",
          type_name, method_name, offset, expected, found
        )
      },
      WeaveError::MissingDefinition { name } => {
        write!(f, "required definition {} not found in module", name)
      },
    }
  }
}

impl std::error::Error for WeaveError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      WeaveError::Resolution { source, .. } => Some(source),
      _ => None,
    }
  }
}

/// A scan failure at one instruction, before method context is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanError {
  pub offset: usize,
  pub source: ResolutionError,
}

impl ScanError {
  pub fn in_method(
    self,
    type_name: &str,
    method_name: &str,
  ) -> WeaveError {
    WeaveError::Resolution {
      type_name: type_name.to_string(),
      method_name: method_name.to_string(),
      offset: self.offset,
      source: self.source,
    }
  }
}

/// A rewrite precondition that did not hold, before method context is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternViolation {
  pub offset: usize,
  pub expected: String,
  pub found: String,
}

impl PatternViolation {
  pub fn in_method(
    self,
    type_name: &str,
    method_name: &str,
  ) -> WeaveError {
    WeaveError::PatternInvariant {
      type_name: type_name.to_string(),
      method_name: method_name.to_string(),
      offset: self.offset,
      expected: self.expected,
      found: self.found,
    }
  }
}
