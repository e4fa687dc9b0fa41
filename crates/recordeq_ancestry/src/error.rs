use std::fmt;

/// Failure to resolve a type's ancestry.
///
/// Every variant means the metadata is inconsistent; none of them is
/// retried or recovered from inside a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
  /// A base or interface argument names a generic parameter that the
  /// current step never bound.
  MissingMapping { parameter: String, required_by: String },
  UnresolvableBase { type_name: String, base: String },
  UnresolvableType { type_name: String },
  ConflictingBinding {
    parameter: String,
    existing: String,
    incoming: String,
  },
  ArityMismatch {
    type_name: String,
    expected: usize,
    found: usize,
  },
  CyclicAncestry { type_name: String },
  NotAnInterface { type_name: String },
  MissingWellKnown { name: String },
}

impl fmt::Display for ResolutionError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ResolutionError::MissingMapping { parameter, required_by } => {
        write!(
          f,
          "no mapping found for parameter {}, required to resolve {}",
          parameter, required_by
        )
      },
      ResolutionError::UnresolvableBase { type_name, base } => {
        write!(f, "cannot resolve base type {} of {}", base, type_name)
      },
      ResolutionError::UnresolvableType { type_name } => {
        write!(f, "cannot resolve type {}", type_name)
      },
      ResolutionError::ConflictingBinding {
        parameter,
        existing,
        incoming,
      } => {
        write!(
          f,
          "parameter {} is already bound to {}, cannot rebind it to {}",
          parameter, existing, incoming
        )
      },
      ResolutionError::ArityMismatch {
        type_name,
        expected,
        found,
      } => {
        write!(
          f,
          "{} declares {} generic parameter(s) but is instantiated with {}",
          type_name, expected, found
        )
      },
      ResolutionError::CyclicAncestry { type_name } => {
        write!(f, "{} appears twice in its own base type chain", type_name)
      },
      ResolutionError::NotAnInterface { type_name } => {
        write!(f, "{} is not an interface", type_name)
      },
      ResolutionError::MissingWellKnown { name } => {
        write!(f, "well-known type {} is not defined in the module", name)
      },
    }
  }
}

impl std::error::Error for ResolutionError {}
