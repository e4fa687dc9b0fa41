//! Diagnostic rendering for weaving failures.

pub mod diagnostic_report;

use std::fmt::Write;

use colored::*;

pub use diagnostic_report::{Diagnostic, Label, Location, Severity};

/// Render a diagnostic to stderr.
pub fn render(diag: &Diagnostic) {
  eprint!("{}", format(diag));
}

pub fn render_batch(diagnostics: &[Diagnostic]) {
  for diag in diagnostics {
    render(diag);
  }
}

/// The text [`render`] prints, colored when the terminal allows it.
pub fn format(diag: &Diagnostic) -> String {
  let mut out = String::new();
  write_header(&mut out, diag);

  if let Some(location) = &diag.location {
    let _ = writeln!(out, "{:2}{} {}", "", "-->".blue().bold(), location.to_string().bold());
  }

  for label in &diag.labels {
    let _ = writeln!(
      out,
      "  {} {}: {}",
      "label:".yellow().bold(),
      label.location,
      label.message
    );
  }

  for note in &diag.notes {
    let _ = writeln!(out, "  {} {}", "note:".cyan().bold(), note);
  }

  out.push('\n');
  out
}

fn write_header(
  out: &mut String,
  diag: &Diagnostic,
) {
  let message = diag.message.bold();
  let code = diag.error_code.bold();

  let _ = match diag.severity {
    Severity::Info => writeln!(out, "{}[{}]: {}", "Info".blue().bold(), code.blue(), message),
    Severity::Warning => {
      writeln!(out, "{}[{}]: {}", "Warning".yellow().bold(), code.yellow(), message)
    },
    Severity::Error => writeln!(out, "{}[{}]: {}", "Error".red().bold(), code.red().bold(), message),
  };
}
