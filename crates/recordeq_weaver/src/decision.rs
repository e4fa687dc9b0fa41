use recordeq_config::DefaultBehavior;
use recordeq_metadata::{AttributeArg, Module, PropertyDefId, TypeDefId};

/// Which types a pass looks inside.
pub trait TypeEligibility {
  fn is_eligible(
    &self,
    module: &Module,
    ty: TypeDefId,
  ) -> bool;
}

impl<F> TypeEligibility for F
where
  F: Fn(&Module, TypeDefId) -> bool,
{
  fn is_eligible(
    &self,
    module: &Module,
    ty: TypeDefId,
  ) -> bool {
    self(module, ty)
  }
}

/// Per-member opt-in or opt-out, `None` when the member says nothing.
pub trait MemberOverrides {
  fn resolve_override(
    &self,
    module: &Module,
    property: PropertyDefId,
  ) -> Option<bool>;
}

impl<F> MemberOverrides for F
where
  F: Fn(&Module, PropertyDefId) -> Option<bool>,
{
  fn resolve_override(
    &self,
    module: &Module,
    property: PropertyDefId,
  ) -> Option<bool> {
    self(module, property)
  }
}

/// Reads `[DeepEquals]` / `[DeepEquals(false)]` from a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepEqualsAttribute {
  name: String,
}

impl DeepEqualsAttribute {
  /// `name` matches either the attribute's simple name or its full name.
  pub fn new(name: &str) -> Self {
    Self { name: name.to_string() }
  }
}

impl MemberOverrides for DeepEqualsAttribute {
  fn resolve_override(
    &self,
    module: &Module,
    property: PropertyDefId,
  ) -> Option<bool> {
    let attribute = module.property(property).attributes.iter().find(|a| {
      module.short_name(&a.attribute_type) == self.name || module.full_name(&a.attribute_type) == self.name
    })?;

    // The constructor's argument defaults to `true`.
    if attribute.args.is_empty() {
      return Some(true);
    }

    attribute.args.iter().find_map(|arg| match arg {
      AttributeArg::Bool(enabled) => Some(*enabled),
      _ => None,
    })
  }
}

pub fn should_rewrite(
  behavior: DefaultBehavior,
  member_override: Option<bool>,
) -> bool {
  match behavior {
    DefaultBehavior::Enabled => member_override != Some(false),
    DefaultBehavior::Disabled => member_override == Some(true),
  }
}
