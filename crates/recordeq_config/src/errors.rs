use std::fmt;
use std::path::PathBuf;

/// Errors that can occur when loading the weaver configuration.
#[derive(Debug)]
pub enum ConfigError {
  /// I/O error while reading the configuration file.
  IoError { path: PathBuf, source: std::io::Error },

  /// The TOML could not be parsed or holds an unknown value.
  TomlParseError { path: Option<PathBuf>, message: String },
}

impl fmt::Display for ConfigError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ConfigError::IoError { path, source } => {
        write!(f, "failed to read '{}': {}", path.display(), source)
      },

      ConfigError::TomlParseError { path: Some(path), message } => {
        write!(f, "failed to parse '{}': {}", path.display(), message)
      },

      ConfigError::TomlParseError { path: None, message } => {
        write!(f, "failed to parse weaver configuration: {}", message)
      },
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ConfigError::IoError { source, .. } => Some(source),
      ConfigError::TomlParseError { .. } => None,
    }
  }
}
