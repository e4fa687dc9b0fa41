//! Weaver configuration.
//!
//! `WeaverToml` mirrors the on-disk TOML layout with defaulted fields;
//! `WeaverConfig` is the resolved form threaded through a weaving pass.
//!
//! ```toml
//! default_behavior = "Disabled"
//! comparer_type = "RecordEq.EnumerableValueComparer`1"
//! member_attribute = "DeepEqualsAttribute"
//!
//! [log]
//! verbose = 2
//! debug_trace = ["scan", "rewrite"]
//! ```

mod errors;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use errors::ConfigError;

pub const DEFAULT_COMPARER_TYPE: &str = "RecordEq.EnumerableValueComparer`1";
pub const DEFAULT_MEMBER_ATTRIBUTE: &str = "DeepEqualsAttribute";

/// Whether sequence members of eligible types are rewritten when no
/// member-level override is present.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DefaultBehavior {
  /// Rewrite every sequence member unless it opts out with `[DeepEquals(false)]`.
  #[default]
  Enabled,
  /// Rewrite only members that opt in with `[DeepEquals]`.
  Disabled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugTrace {
  Ancestry,
  Scan,
  Classify,
  Rewrite,
}

impl DebugTrace {
  /// The name used in TOML and in `debug[..]` prefixes.
  pub fn name(self) -> &'static str {
    match self {
      DebugTrace::Ancestry => "ancestry",
      DebugTrace::Scan => "scan",
      DebugTrace::Classify => "classify",
      DebugTrace::Rewrite => "rewrite",
    }
  }
}

/// Root structure of the weaver TOML file.
#[derive(Debug, Deserialize)]
pub struct WeaverToml {
  #[serde(default)]
  pub default_behavior: DefaultBehavior,

  /// Full name of the alternate comparer definition.
  #[serde(default = "default_comparer_type")]
  pub comparer_type: String,

  /// Type name of the attribute carrying per-member overrides.
  #[serde(default = "default_member_attribute")]
  pub member_attribute: String,

  #[serde(default)]
  pub log: LogTomlConfig,
}

/// The `[log]` section.
#[derive(Debug, Default, Deserialize)]
pub struct LogTomlConfig {
  /// Verbosity (0-3). Default: 0.
  #[serde(default)]
  pub verbose: u8,

  #[serde(default)]
  pub quiet: bool,

  /// Enables every debug trace.
  #[serde(default)]
  pub debug: bool,

  #[serde(default)]
  pub debug_trace: Vec<DebugTrace>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaverConfig {
  pub default_behavior: DefaultBehavior,
  pub comparer_type: String,
  pub member_attribute: String,
  pub verbose: u8,
  pub quiet: bool,
  pub debug: bool,
  pub debug_trace: Vec<DebugTrace>,
}

impl Default for WeaverConfig {
  fn default() -> Self {
    Self {
      default_behavior: DefaultBehavior::default(),
      comparer_type: default_comparer_type(),
      member_attribute: default_member_attribute(),
      verbose: 0,
      quiet: false,
      debug: false,
      debug_trace: Vec::new(),
    }
  }
}

impl From<WeaverToml> for WeaverConfig {
  fn from(raw: WeaverToml) -> Self {
    Self {
      default_behavior: raw.default_behavior,
      comparer_type: raw.comparer_type,
      member_attribute: raw.member_attribute,
      verbose: raw.log.verbose,
      quiet: raw.log.quiet,
      debug: raw.log.debug,
      debug_trace: raw.log.debug_trace,
    }
  }
}

impl WeaverConfig {
  pub fn with_default_behavior(
    mut self,
    behavior: DefaultBehavior,
  ) -> Self {
    self.default_behavior = behavior;
    self
  }

  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let raw: WeaverToml = toml::from_str(source).map_err(|e| ConfigError::TomlParseError {
      path: None,
      message: e.to_string(),
    })?;

    Ok(raw.into())
  }

  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
      path: path.to_path_buf(),
      source,
    })?;

    let raw: WeaverToml = toml::from_str(&source).map_err(|e| ConfigError::TomlParseError {
      path: Some(path.to_path_buf()),
      message: e.to_string(),
    })?;

    Ok(raw.into())
  }
}

fn default_comparer_type() -> String {
  DEFAULT_COMPARER_TYPE.to_string()
}

fn default_member_attribute() -> String {
  DEFAULT_MEMBER_ATTRIBUTE.to_string()
}
