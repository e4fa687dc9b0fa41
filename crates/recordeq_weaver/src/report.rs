use serde::Serialize;

use crate::PatternKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
  Rewritten,
  /// Recognised, but the decision gate said no.
  Skipped,
  Unrecognized,
}

/// One candidate seen during a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
  pub type_name: String,
  pub method_name: String,
  pub offset: usize,
  pub kind: PatternKind,
  pub collection_type: String,
  pub element_type: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub property: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub member_override: Option<bool>,
  pub outcome: Outcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeaveReport {
  pub module: String,
  pub types_visited: usize,
  pub eligible_types: usize,
  pub methods_scanned: usize,
  pub candidates: Vec<CandidateRecord>,
}

impl WeaveReport {
  pub fn new(module: &str) -> Self {
    Self {
      module: module.to_string(),
      ..Self::default()
    }
  }

  pub fn count(
    &self,
    outcome: Outcome,
  ) -> usize {
    self.candidates.iter().filter(|c| c.outcome == outcome).count()
  }

  pub fn rewritten(&self) -> usize {
    self.count(Outcome::Rewritten)
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_counts_by_outcome() {
    let record = |outcome| CandidateRecord {
      type_name: "TestAssembly.MainClass".to_string(),
      method_name: "GetHashCode".to_string(),
      offset: 6,
      kind: PatternKind::HashCode,
      collection_type: "System.Int32[]".to_string(),
      element_type: "System.Int32".to_string(),
      property: None,
      member_override: None,
      outcome,
    };

    let mut report = WeaveReport::new("TestAssembly");
    report.candidates = vec![
      record(Outcome::Rewritten),
      record(Outcome::Skipped),
      record(Outcome::Rewritten),
    ];

    assert_eq!(report.rewritten(), 2);
    assert_eq!(report.count(Outcome::Skipped), 1);
    assert_eq!(report.count(Outcome::Unrecognized), 0);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["candidates"][0]["outcome"], "Rewritten");
    assert_eq!(json["candidates"][0]["kind"], "HashCode");
    assert!(json["candidates"][0].get("property").is_none());
  }
}
