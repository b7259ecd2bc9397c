//! # Field Matcher
//!
//! Decides whether two raw field names denote the same or an overlapping
//! compliance concept. Rules, in priority order:
//!
//! 1. Equal `normalized` names match (exact or dictionary-equivalent).
//! 2. Two combos match iff their raw parts intersect.
//! 3. A combo and a plain field match iff the plain field's canonical name
//!    appears verbatim among the combo's raw parts.
//! 4. Anything else does not match.
//!
//! Rule 3 compares a canonical name against un-canonicalized parts:
//! `"dateOfBirth + birthplace"` does not match `"date_of_birth"`. This is
//! pinned by a regression test.

use serde::{Deserialize, Serialize};

use crate::normalize::{normalize_field, NormalizedField};

/// Decide whether two raw field names match.
///
/// Total and symmetric: `fields_match(a, b) == fields_match(b, a)`.
pub fn fields_match(a: &str, b: &str) -> bool {
    normalized_match(&normalize_field(a), &normalize_field(b))
}

pub(crate) fn normalized_match(a: &NormalizedField, b: &NormalizedField) -> bool {
    if a.normalized == b.normalized {
        return true;
    }
    match (a.is_combo, b.is_combo) {
        (true, true) => a.combo_fields.iter().any(|f| b.combo_fields.contains(f)),
        (true, false) => a.combo_fields.contains(&b.normalized),
        (false, true) => b.combo_fields.contains(&a.normalized),
        (false, false) => false,
    }
}

/// How a matched pair was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Equal normalized names.
    Exact,
    /// At least one side is a combo field.
    Combo,
    /// Any other match.
    Partial,
}

/// A matching pair of raw fields from the two sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMatch {
    /// Raw field from the applicant side.
    pub applicant_field: String,
    /// Raw field from the counterparty side.
    pub counterparty_field: String,
    /// How the match was established.
    pub kind: MatchKind,
}

/// Every matching pair between two field lists, in input order.
pub fn find_matching_fields<A, B>(applicant: &[A], counterparty: &[B]) -> Vec<FieldMatch>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let left: Vec<NormalizedField> =
        applicant.iter().map(|f| normalize_field(f.as_ref())).collect();
    let right: Vec<NormalizedField> =
        counterparty.iter().map(|f| normalize_field(f.as_ref())).collect();

    let mut matches = Vec::new();
    for a in &left {
        for b in &right {
            if !normalized_match(a, b) {
                continue;
            }
            let kind = if a.normalized == b.normalized {
                MatchKind::Exact
            } else if a.is_combo || b.is_combo {
                MatchKind::Combo
            } else {
                MatchKind::Partial
            };
            matches.push(FieldMatch {
                applicant_field: a.original.clone(),
                counterparty_field: b.original.clone(),
                kind,
            });
        }
    }
    matches
}
