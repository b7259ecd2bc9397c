//! # trc-core — Travel Rule Field Comparison Engine
//!
//! Given the data-field requirements of two counterpart institutions, this
//! crate normalizes field names to canonical identifiers, pairs equivalent
//! fields across the two sides, evaluates AND/OR requirement groups, and
//! classifies the aggregate outcome as match, overcompliance, or
//! undercompliance.
//!
//! ## Layers (leaf first)
//!
//! 1. **Dictionary** (`dictionary.rs`): static alias → canonical mapping with
//!    identity fallback.
//! 2. **Normalizer** (`normalize.rs`): dictionary lookup plus combo-field
//!    (`"a + b"`) decomposition.
//! 3. **Matcher** (`matcher.rs`): decides whether two raw field names denote
//!    the same or overlapping concept.
//! 4. **Comparable sets** (`comparable.rs`): flattened field lists, pairing
//!    maps, group satisfaction, and the canonical presence map.
//! 5. **Classifier** (`classify.rs`): sender/receiver verdict over canonical,
//!    combo-expanded field sets.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `trc-*` crates (this is the leaf of the DAG).
//! - Every comparison operation is a pure, total function: no I/O, no shared
//!   state, no `Result` on the comparison path.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod classify;
pub mod comparable;
pub mod dictionary;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod requirement;

// Re-export primary types for ergonomic imports.
pub use classify::{
    analyze_field_sets, compare, compare_field_sets, ComparisonOutcome, ComplianceReport,
    ComplianceVerdict,
};
pub use comparable::{
    build_comparable_sets, build_field_presence_map, is_field_present_on_both_sides,
    ComparableSets, FieldPresence, GroupOutcome,
};
pub use dictionary::lookup;
pub use error::CoreError;
pub use matcher::{fields_match, find_matching_fields, FieldMatch, MatchKind};
pub use normalize::{normalize_field, NormalizedField, COMBO_SEPARATOR};
pub use requirement::{
    ComparisonInput, Direction, GroupLogic, Party, RequirementGroup, RequirementSet,
};
