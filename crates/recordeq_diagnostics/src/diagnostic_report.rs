/// Where in a module a diagnostic points: a type, optionally one of its
/// methods, optionally an instruction offset in that method's body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
  pub type_name: String,
  pub method_name: Option<String>,
  pub offset: Option<usize>,
}

impl Location {
  pub fn in_type(type_name: &str) -> Self {
    Self {
      type_name: type_name.to_string(),
      method_name: None,
      offset: None,
    }
  }

  pub fn in_method(
    type_name: &str,
    method_name: &str,
  ) -> Self {
    Self {
      type_name: type_name.to_string(),
      method_name: Some(method_name.to_string()),
      offset: None,
    }
  }

  pub fn at(
    mut self,
    offset: usize,
  ) -> Self {
    self.offset = Some(offset);
    self
  }
}

impl std::fmt::Display for Location {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "{}", self.type_name)?;
    if let Some(method) = &self.method_name {
      write!(f, "::{}", method)?;
    }
    if let Some(offset) = self.offset {
      write!(f, " @ IL_{:04x}", offset)?;
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Info,
  Warning,
  Error,
}

#[derive(Debug, Clone)]
pub struct Label {
  pub location: Location,
  pub message: String,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
  pub severity: Severity,
  pub message: String,
  pub error_code: String,
  pub location: Option<Location>,
  pub labels: Vec<Label>,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(
    severity: Severity,
    message: String,
    error_code: &str,
  ) -> Self {
    Self {
      severity,
      message,
      error_code: error_code.to_string(),
      location: None,
      labels: Vec::new(),
      notes: Vec::new(),
    }
  }

  pub fn error(
    message: String,
    error_code: &str,
  ) -> Self {
    Self::new(Severity::Error, message, error_code)
  }

  pub fn with_location(
    mut self,
    location: Location,
  ) -> Self {
    self.location = Some(location);
    self
  }

  pub fn with_label(
    mut self,
    location: Location,
    message: String,
  ) -> Self {
    self.labels.push(Label { location, message });
    self
  }

  pub fn with_note(
    mut self,
    note: String,
  ) -> Self {
    self.notes.push(note);
    self
  }

  pub fn is_error(&self) -> bool {
    self.severity == Severity::Error
  }
}
