use recordeq_ancestry::GenericArgumentBinder;
use recordeq_config::{DebugTrace, WeaverConfig};
use recordeq_log::{il_site, log_dbg, log_trc, phase_log, phase_ok, phase_warn, trace_at};
use recordeq_metadata::{MethodDefId, Module, TypeDefId};

use crate::{
  CandidatePattern, CandidateRecord, CandidateScanner, DeepEqualsAttribute, InstructionRewriter, MemberOverrides,
  Outcome, PatternKind, RecordDetector, TypeEligibility, WeaveContext, WeaveError, WeaveReport, backref, classify,
  should_rewrite,
};

/// Runs the pass over a whole module.
///
/// ```ignore
/// let report = ModuleWeaver::new(config).execute(&mut module)?;
/// ```
#[derive(Debug, Clone)]
pub struct ModuleWeaver<E = RecordDetector, O = DeepEqualsAttribute> {
  config: WeaverConfig,
  eligibility: E,
  overrides: O,
}

impl ModuleWeaver {
  pub fn new(config: WeaverConfig) -> Self {
    let overrides = DeepEqualsAttribute::new(&config.member_attribute);
    Self {
      config,
      eligibility: RecordDetector,
      overrides,
    }
  }
}

impl<E, O> ModuleWeaver<E, O> {
  pub fn with_eligibility<E2: TypeEligibility>(
    self,
    eligibility: E2,
  ) -> ModuleWeaver<E2, O> {
    ModuleWeaver {
      config: self.config,
      eligibility,
      overrides: self.overrides,
    }
  }

  pub fn with_overrides<O2: MemberOverrides>(
    self,
    overrides: O2,
  ) -> ModuleWeaver<E, O2> {
    ModuleWeaver {
      config: self.config,
      eligibility: self.eligibility,
      overrides,
    }
  }

  pub fn config(&self) -> &WeaverConfig {
    &self.config
  }
}

/// A candidate with everything decided, waiting to be applied.
struct Planned {
  candidate: CandidatePattern,
  property: Option<String>,
  member_override: Option<bool>,
  approved: bool,
}

impl<E: TypeEligibility, O: MemberOverrides> ModuleWeaver<E, O> {
  pub fn execute(
    &self,
    module: &mut Module,
  ) -> Result<WeaveReport, WeaveError> {
    let config = &self.config;
    let ctx = WeaveContext::new(module, config)?;
    phase_log!(config, "Weaving {} ({:?} by default)", module.name, ctx.default_behavior);

    let mut report = WeaveReport::new(&module.name);
    for ty in module.all_types() {
      report.types_visited += 1;
      if !self.eligibility.is_eligible(module, ty) {
        log_trc!(config, "{} is not eligible", module.type_full_name(ty));
        continue;
      }

      report.eligible_types += 1;
      log_dbg!(config, "type {}", module.type_full_name(ty));

      for method in equality_methods(module, ty) {
        self.weave_method(module, &ctx, ty, method, &mut report)?;
      }
    }

    phase_ok!(
      config,
      "Rewrote {} of {} candidate(s) in {} type(s)",
      report.rewritten(),
      report.candidates.len(),
      report.eligible_types
    );
    Ok(report)
  }

  /// Plans against an immutable module, then applies every approved rewrite
  /// to a copy of the body. The copy replaces the original only when all
  /// rewrites succeed.
  fn weave_method(
    &self,
    module: &mut Module,
    ctx: &WeaveContext,
    ty: TypeDefId,
    method: MethodDefId,
    report: &mut WeaveReport,
  ) -> Result<(), WeaveError> {
    let config = &self.config;
    let type_name = module.type_full_name(ty);
    let method_name = module.method(method).name.clone();

    report.methods_scanned += 1;
    let plan = self.plan(module, ctx, ty, method, &type_name, &method_name)?;
    let Some(original) = module.method(method).body.as_ref() else {
      return Ok(());
    };
    if plan.is_empty() {
      return Ok(());
    }

    let rewriter = InstructionRewriter::new(&ctx.comparer);
    let mut body = original.clone();
    let mut changed = false;

    for planned in plan {
      let candidate = &planned.candidate;
      let rewritten = rewriter
        .rewrite(&mut body, candidate, planned.approved)
        .map_err(|violation| violation.in_method(&type_name, &method_name))?;
      changed |= rewritten;

      let outcome = match (candidate.kind, rewritten) {
        (PatternKind::Unrecognized, _) => {
          phase_warn!(
            config,
            "{}: unrecognized comparer shape left unchanged",
            il_site(&type_name, &method_name, candidate.offset)
          );
          Outcome::Unrecognized
        },
        (_, true) => Outcome::Rewritten,
        (_, false) => Outcome::Skipped,
      };
      trace_at!(
        config,
        DebugTrace::Rewrite,
        (&type_name, &method_name, candidate.offset),
        "{:?}",
        outcome
      );

      report.candidates.push(CandidateRecord {
        type_name: type_name.clone(),
        method_name: method_name.clone(),
        offset: candidate.offset,
        kind: candidate.kind,
        collection_type: module.full_name(&candidate.collection_type),
        element_type: module.full_name(&candidate.element_type),
        property: planned.property,
        member_override: planned.member_override,
        outcome,
      });
    }

    if changed {
      log_trc!(config, "{}::{}\n{}", type_name, method_name, module.disassemble(&body));
      module.method_mut(method).body = Some(body);
    }

    Ok(())
  }

  fn plan(
    &self,
    module: &Module,
    ctx: &WeaveContext,
    ty: TypeDefId,
    method: MethodDefId,
    type_name: &str,
    method_name: &str,
  ) -> Result<Vec<Planned>, WeaveError> {
    let config = &self.config;
    let Some(body) = module.method(method).body.as_ref() else {
      return Ok(Vec::new());
    };

    let scanner = CandidateScanner::new(GenericArgumentBinder::new(module, &ctx.well_known));
    let mut plan = Vec::new();

    for found in scanner.scan(body) {
      let mut candidate = found.map_err(|err| err.in_method(type_name, method_name))?;
      trace_at!(
        config,
        DebugTrace::Scan,
        (type_name, method_name, candidate.offset),
        "{}",
        module.format_instruction(&candidate.instruction)
      );
      trace_at!(
        config,
        DebugTrace::Ancestry,
        (type_name, method_name, candidate.offset),
        "{} is a sequence of {}",
        module.full_name(&candidate.collection_type),
        module.full_name(&candidate.element_type)
      );

      candidate.kind = classify(&body.instructions, candidate.offset);
      trace_at!(
        config,
        DebugTrace::Classify,
        (type_name, method_name, candidate.offset),
        "{:?}",
        candidate.kind
      );

      let property = backref::property_for_candidate(module, ty, &body.instructions, candidate.offset);
      let member_override = property.and_then(|p| self.overrides.resolve_override(module, p));
      let approved = candidate.kind != PatternKind::Unrecognized && should_rewrite(ctx.default_behavior, member_override);

      plan.push(Planned {
        candidate,
        property: property.map(|p| module.property(p).name.clone()),
        member_override,
        approved,
      });
    }

    Ok(plan)
  }
}

/// `Equals(T)` where `T` is the declaring type, and `GetHashCode()`.
fn equality_methods(
  module: &Module,
  ty: TypeDefId,
) -> Vec<MethodDefId> {
  let def = module.type_def(ty);
  def
    .methods
    .iter()
    .copied()
    .filter(|id| {
      let m = module.method(*id);
      let is_equals = m.name == "Equals" && m.params.len() == 1 && module.short_name(&m.params[0].ty) == def.name;
      let is_get_hash_code = m.name == "GetHashCode" && m.params.is_empty();
      m.body.is_some() && (is_equals || is_get_hash_code)
    })
    .collect()
}

/// Weaves `module` with record detection and `[DeepEquals]` overrides.
pub fn weave(
  module: &mut Module,
  config: WeaverConfig,
) -> Result<WeaveReport, WeaveError> {
  ModuleWeaver::new(config).execute(module)
}
