mod common;

use common::{Fixture, RecordSpec};
use recordeq_config::{DefaultBehavior, WeaverConfig};
use recordeq_metadata::{Module, PropertyDefId, TypeDefId, TypeRef};
use recordeq_weaver::{ModuleWeaver, Outcome, WeaveReport};

fn outcome_of(
  report: &WeaveReport,
  property: &str,
) -> Vec<Outcome> {
  report
    .candidates
    .iter()
    .filter(|c| c.property.as_deref() == Some(property))
    .map(|c| c.outcome)
    .collect()
}

#[test]
fn opt_out_is_honoured_when_enabled() {
  let mut fx = Fixture::new();
  let items = fx.fw.list_of(fx.int32());
  let record = fx.add_record(RecordSpec::new("MainClass").member_with("Items", items, Some(false)));
  let equals = fx.body(record.equals).clone();
  let hash = fx.body(record.get_hash_code).clone();

  let report = fx.weave_with(DefaultBehavior::Enabled).unwrap();

  assert_eq!(outcome_of(&report, "Items"), [Outcome::Skipped, Outcome::Skipped]);
  assert!(report.candidates.iter().all(|c| c.member_override == Some(false)));
  assert_eq!(fx.body(record.equals), &equals);
  assert_eq!(fx.body(record.get_hash_code), &hash);
}

#[test]
fn only_opted_in_members_change_when_disabled() {
  let mut fx = Fixture::new();
  let opted_in = fx.fw.list_of(fx.int32());
  let silent = fx.fw.list_of(fx.string());
  let bare = TypeRef::array(fx.int32());
  let spec = RecordSpec::new("MainClass")
    .member_with("OptedIn", opted_in, Some(true))
    .member("Silent", silent)
    .member_with("Bare", bare, None);
  fx.add_record(spec);

  let report = fx.weave_with(DefaultBehavior::Disabled).unwrap();

  assert_eq!(outcome_of(&report, "OptedIn"), [Outcome::Rewritten, Outcome::Rewritten]);
  assert_eq!(outcome_of(&report, "Silent"), [Outcome::Skipped, Outcome::Skipped]);
  // `[DeepEquals]` without an argument opts in.
  assert_eq!(outcome_of(&report, "Bare"), [Outcome::Rewritten, Outcome::Rewritten]);
  assert_eq!(report.rewritten(), 4);
}

#[test]
fn default_behavior_loaded_from_toml() {
  let mut fx = Fixture::new();
  let items = fx.fw.list_of(fx.int32());
  let record = fx.add_record(RecordSpec::new("MainClass").member("Items", items));
  let hash = fx.body(record.get_hash_code).clone();

  let config = WeaverConfig::from_toml_str("default_behavior = \"Disabled\"\n").unwrap();
  let report = ModuleWeaver::new(config).execute(&mut fx.module).unwrap();

  assert_eq!(report.count(Outcome::Skipped), 2);
  assert_eq!(fx.body(record.get_hash_code), &hash);
}

#[test]
fn custom_attribute_name() {
  let mut fx = Fixture::new();
  let items = fx.fw.list_of(fx.int32());
  fx.add_record(RecordSpec::new("MainClass").member_with("Items", items, Some(false)));

  // The opt-out is carried by `DeepEqualsAttribute`, which this weaver ignores.
  let config = WeaverConfig::from_toml_str("member_attribute = \"SequenceEqualsAttribute\"\n").unwrap();
  let report = ModuleWeaver::new(config).execute(&mut fx.module).unwrap();

  assert_eq!(report.rewritten(), 2);
  assert!(report.candidates.iter().all(|c| c.member_override.is_none()));
}

#[test]
fn attribute_matches_by_full_name() {
  let mut fx = Fixture::new();
  let items = fx.fw.list_of(fx.int32());
  fx.add_record(RecordSpec::new("MainClass").member_with("Items", items, Some(false)));

  let config = WeaverConfig::from_toml_str("member_attribute = \"RecordEq.DeepEqualsAttribute\"\n").unwrap();
  let report = ModuleWeaver::new(config).execute(&mut fx.module).unwrap();

  assert_eq!(report.count(Outcome::Skipped), 2);
}

#[test]
fn eligibility_and_overrides_are_pluggable() {
  let mut fx = Fixture::new();
  let items = fx.fw.list_of(fx.int32());
  let first = fx.add_record(RecordSpec::new("First").member("Items", items.clone()));
  let second = fx.add_record(RecordSpec::new("Second").member("Items", items));
  let untouched = fx.body(first.get_hash_code).clone();

  let only_second = move |_: &Module, ty: TypeDefId| ty == second.ty;
  let never = |_: &Module, _: PropertyDefId| Some(false);

  let report = ModuleWeaver::new(WeaverConfig::default())
    .with_eligibility(only_second)
    .execute(&mut fx.module)
    .unwrap();
  assert_eq!(report.eligible_types, 1);
  assert_eq!(report.rewritten(), 2);
  assert_eq!(fx.body(first.get_hash_code), &untouched);

  let report = ModuleWeaver::new(WeaverConfig::default())
    .with_overrides(never)
    .execute(&mut fx.module)
    .unwrap();
  assert_eq!(report.rewritten(), 0);
  assert_eq!(report.count(Outcome::Skipped), 2);
  assert_eq!(fx.body(first.get_hash_code), &untouched);
}
