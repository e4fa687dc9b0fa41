//! Logging for weaving passes.
//!
//! Every message goes to stderr and is gated by a [`Level`] or a
//! [`DebugTrace`] category from the [`WeaverConfig`]:
//!
//! ```text
//! --> Weaving TestAssembly (Enabled by default)        phase_log!
//! --> TestAssembly.MainClass::GetHashCode IL_0006: ... phase_warn!
//! debug[scan]: TestAssembly.MainClass::Equals IL_000b: call ...   trace_at!
//! debug: type TestAssembly.MainClass                   log_dbg!
//! trace: TestAssembly.MainClass is not eligible        log_trc!
//! ```

pub use recordeq_config::DebugTrace;
use recordeq_config::WeaverConfig;

/// How much a message needs before it is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
  /// Warnings about the pass itself; only `quiet` hides them.
  Phase,
  /// Start and summary lines (`verbose >= 1`).
  Info,
  /// Per-type progress (`verbose >= 2`, or `debug`).
  Debug,
  /// Listings and rejected types (`verbose >= 3`).
  Trace,
}

pub fn effective_verbose(config: &WeaverConfig) -> u8 {
  if config.quiet {
    return 0;
  }

  if config.debug && config.verbose < 2 {
    return 2;
  }

  config.verbose
}

pub fn enabled(
  config: &WeaverConfig,
  level: Level,
) -> bool {
  if config.quiet {
    return false;
  }

  let needed = match level {
    Level::Phase => 0,
    Level::Info => 1,
    Level::Debug => 2,
    Level::Trace => 3,
  };
  effective_verbose(config) >= needed
}

pub fn debug_trace_enabled(
  config: &WeaverConfig,
  trace: DebugTrace,
) -> bool {
  !config.quiet && (config.debug || config.debug_trace.contains(&trace))
}

/// `Type::Method IL_xxxx`, the prefix of every per-instruction message.
pub fn il_site(
  type_name: &str,
  method_name: &str,
  offset: usize,
) -> String {
  format!("{}::{} IL_{:04x}", type_name, method_name, offset)
}

/// Start of a pass (green arrow, indented).
#[macro_export]
macro_rules! phase_log {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::enabled($config, $crate::Level::Info) {
      use colored::Colorize;
      eprintln!("    {} {}", "-->".bright_green().bold(), format!($fmt $(, $arg)*));
    }
  }};
}

/// End of a pass (green arrow).
#[macro_export]
macro_rules! phase_ok {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::enabled($config, $crate::Level::Info) {
      use colored::Colorize;
      eprintln!("{} {}", "-->".bright_green().bold(), format!($fmt $(, $arg)*));
    }
  }};
}

/// Something the pass left alone that the user may want to know about.
#[macro_export]
macro_rules! phase_warn {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::enabled($config, $crate::Level::Phase) {
      use colored::Colorize;
      eprintln!("{} {}", "-->".bright_yellow().bold(), format!($fmt $(, $arg)*));
    }
  }};
}

/// A debug trace tied to one instruction of one method.
///
/// ```ignore
/// trace_at!(config, DebugTrace::Classify, (&type_name, &method_name, 11), "{:?}", kind);
/// // debug[classify]: TestAssembly.MainClass::Equals IL_000b: Equality
/// ```
#[macro_export]
macro_rules! trace_at {
  ($config:expr, $trace:expr, ($type_name:expr, $method_name:expr, $offset:expr), $fmt:literal $(, $arg:expr)* $(,)?) => {{
    let trace: $crate::DebugTrace = $trace;
    if $crate::debug_trace_enabled($config, trace) {
      eprintln!(
        "debug[{}]: {}: {}",
        trace.name(),
        $crate::il_site($type_name, $method_name, $offset),
        format!($fmt $(, $arg)*)
      );
    }
  }};
}

#[macro_export]
macro_rules! log_dbg {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::enabled($config, $crate::Level::Debug) {
      eprintln!("debug: {}", format!($fmt $(, $arg)*));
    }
  }};
}

#[macro_export]
macro_rules! log_trc {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::enabled($config, $crate::Level::Trace) {
      eprintln!("trace: {}", format!($fmt $(, $arg)*));
    }
  }};
}
