use recordeq_metadata::{Module, TypeDefId, TypeRef};

use crate::TypeEligibility;

/// Recognises record types by the members their compiler synthesises.
///
/// A record has an `EqualityContract` property of type `System.Type` with a
/// getter, `PrintMembers(StringBuilder) -> bool`, a virtual `ToString()`
/// override, a parameterless `*Clone*` method returning the record itself,
/// and at least one property backed by `<Name>k__BackingField`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordDetector;

impl RecordDetector {
  pub fn is_record(
    module: &Module,
    ty: TypeDefId,
  ) -> bool {
    let def = module.type_def(ty);
    let named = |t: &TypeRef, full_name: &str| module.full_name(t) == full_name;
    let is_self = |t: &TypeRef| *t == TypeRef::Def(ty) || *t == module.self_reference(ty);

    let has_equality_contract = def.properties.iter().any(|id| {
      let p = module.property(*id);
      p.name == "EqualityContract" && named(&p.property_type, "System.Type") && p.getter.is_some()
    });
    if !has_equality_contract {
      return false;
    }

    let methods = || def.methods.iter().map(|id| module.method(*id));

    let has_print_members = methods().any(|m| {
      m.name == "PrintMembers"
        && named(&m.return_type, "System.Boolean")
        && m.params.len() == 1
        && named(&m.params[0].ty, "System.Text.StringBuilder")
    });
    let has_to_string = methods()
      .any(|m| m.name == "ToString" && named(&m.return_type, "System.String") && m.is_virtual && !m.is_abstract);
    let has_clone = methods().any(|m| m.name.contains("Clone") && m.params.is_empty() && is_self(&m.return_type));
    if !(has_print_members && has_to_string && has_clone) {
      return false;
    }

    def.properties.iter().any(|id| {
      let backing = format!("<{}>k__BackingField", module.property(*id).name);
      def.fields.iter().any(|f| {
        let field = module.field(*f);
        field.is_private && field.name == backing
      })
    })
  }
}

impl TypeEligibility for RecordDetector {
  fn is_eligible(
    &self,
    module: &Module,
    ty: TypeDefId,
  ) -> bool {
    RecordDetector::is_record(module, ty)
  }
}
