//! Rewrites record equality so sequence members compare by content.
//!
//! Compilers implement record `Equals` and `GetHashCode` by acquiring
//! ``EqualityComparer`1<T>.Default`` for every member. For a sequence member
//! (`List<SubClass>`, `int[]`, `IEnumerable<T>`...) that comparer compares
//! references. The pass finds those acquisitions, classifies the code around
//! them and retargets both the acquisition and the invocation it feeds onto
//! an alternate comparer over the element type:
//!
//! ```text
//! call     EqualityComparer`1<List`1<SubClass>>::get_Default
//! ldarg.0
//! ldfld    <Items>k__BackingField
//! callvirt EqualityComparer`1<List`1<SubClass>>::GetHashCode
//!
//! call     EnumerableValueComparer`1<SubClass>::get_Default
//! ldarg.0
//! ldfld    <Items>k__BackingField
//! callvirt EnumerableValueComparer`1<SubClass>::GetHashCode
//! ```

pub mod backref;
mod candidate;
mod classify;
mod context;
mod decision;
mod error;
mod record;
mod report;
mod rewrite;
mod scanner;
mod weaver;

pub use candidate::{CandidatePattern, PatternKind};
pub use classify::classify;
pub use context::{AlternateComparer, WeaveContext};
pub use decision::{DeepEqualsAttribute, MemberOverrides, TypeEligibility, should_rewrite};
pub use error::{PatternViolation, ScanError, WeaveError};
pub use record::RecordDetector;
pub use report::{CandidateRecord, Outcome, WeaveReport};
pub use rewrite::InstructionRewriter;
pub use scanner::{ACQUISITION_METHOD, COMPARER_PREFIX, CandidateScanner};
pub use weaver::{ModuleWeaver, weave};
