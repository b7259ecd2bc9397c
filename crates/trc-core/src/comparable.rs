//! # Comparable Sets
//!
//! Builds everything a presentation layer needs to render a side-by-side
//! comparison of two [`RequirementSet`]s:
//!
//! - each side's flattened raw field list (plain fields, then group fields),
//! - a bidirectional pairing map of raw field → matching raw fields,
//! - per-group satisfaction verdicts with the matched subset,
//! - a canonical-name presence map.
//!
//! ## Group Satisfaction
//!
//! Computed after all pairings are known. Applicant groups consult
//! `field_pairings`; counterparty groups consult `reverse_pairings`.
//!
//! - `OR`: satisfied iff any field has a pairing (an empty OR group is
//!   never satisfied).
//! - `AND`: satisfied iff every field has a pairing (an empty AND group is
//!   vacuously satisfied).
//!
//! `matched_fields` lists the paired subset for both logics, so a partial
//! AND match is still visible.
//!
//! ## Presence Map
//!
//! Uses per-field normalization without combo expansion: a combo contributes
//! its whole string. The classifier in [`crate::classify`] expands combos
//! instead; the two policies are independent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matcher::normalized_match;
use crate::normalize::{normalize_field, unique_normalized_fields, NormalizedField};
use crate::requirement::{GroupLogic, RequirementGroup, RequirementSet};

/// Which sides carry a canonical field name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPresence {
    /// Present among the applicant's normalized fields.
    pub in_applicant: bool,
    /// Present among the counterparty's normalized fields.
    pub in_counterparty: bool,
}

impl FieldPresence {
    /// Present on both sides.
    pub fn on_both_sides(&self) -> bool {
        self.in_applicant && self.in_counterparty
    }
}

/// Satisfaction verdict for one requirement group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOutcome {
    /// Positional key, `group_<index>`.
    pub key: String,
    /// AND / OR logic of the group.
    pub logic: GroupLogic,
    /// The group's raw fields, as given.
    pub fields: Vec<String>,
    /// Whether the group's obligation is met by the other side.
    pub satisfied: bool,
    /// Group fields that have at least one pairing.
    pub matched_fields: Vec<String>,
}

/// Result of comparing two requirement sets field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparableSets {
    /// Unique applicant raw fields, first-seen order.
    pub applicant_fields: Vec<String>,
    /// Unique counterparty raw fields, first-seen order.
    pub counterparty_fields: Vec<String>,
    /// Applicant group verdicts, in input order.
    pub applicant_groups: Vec<GroupOutcome>,
    /// Counterparty group verdicts, in input order.
    pub counterparty_groups: Vec<GroupOutcome>,
    /// Applicant field → matching counterparty fields.
    pub field_pairings: BTreeMap<String, Vec<String>>,
    /// Counterparty field → matching applicant fields.
    pub reverse_pairings: BTreeMap<String, Vec<String>>,
    /// Number of applicant fields with at least one pairing.
    pub total_matches: usize,
    /// Keys of `field_pairings`, in applicant field order.
    pub applicant_matched_fields: Vec<String>,
    /// Keys of `reverse_pairings`, in counterparty field order.
    pub counterparty_matched_fields: Vec<String>,
    /// Canonical field name → presence on each side.
    pub field_presence_map: BTreeMap<String, FieldPresence>,
}

impl ComparableSets {
    /// True if the applicant field has at least one pairing.
    pub fn has_matches(&self, applicant_field: &str) -> bool {
        self.field_pairings.contains_key(applicant_field)
    }

    /// Counterparty fields paired with an applicant field.
    pub fn matching_fields(&self, applicant_field: &str) -> &[String] {
        self.field_pairings
            .get(applicant_field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Applicant fields paired with a counterparty field.
    pub fn reverse_matching_fields(&self, counterparty_field: &str) -> &[String] {
        self.reverse_pairings
            .get(counterparty_field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True if the canonical name is present on both sides.
    pub fn is_present_on_both_sides(&self, canonical: &str) -> bool {
        is_field_present_on_both_sides(canonical, &self.field_presence_map)
    }
}

/// Compare two requirement sets field by field.
///
/// Never fails; empty inputs yield empty lists and zero matches.
pub fn build_comparable_sets(
    applicant: &RequirementSet,
    counterparty: &RequirementSet,
) -> ComparableSets {
    let applicant_fields = flatten(applicant);
    let counterparty_fields = flatten(counterparty);

    let left: Vec<NormalizedField> = applicant_fields.iter().map(|f| normalize_field(f)).collect();
    let right: Vec<NormalizedField> =
        counterparty_fields.iter().map(|f| normalize_field(f)).collect();

    let mut field_pairings: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut reverse_pairings: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for a in &left {
        for b in &right {
            if normalized_match(a, b) {
                field_pairings
                    .entry(a.original.clone())
                    .or_default()
                    .push(b.original.clone());
                reverse_pairings
                    .entry(b.original.clone())
                    .or_default()
                    .push(a.original.clone());
            }
        }
    }

    let applicant_groups = evaluate_groups(applicant.groups(), &field_pairings);
    let counterparty_groups = evaluate_groups(counterparty.groups(), &reverse_pairings);

    let applicant_matched_fields = matched_in_order(&applicant_fields, &field_pairings);
    let counterparty_matched_fields = matched_in_order(&counterparty_fields, &reverse_pairings);

    let field_presence_map = build_field_presence_map(&applicant_fields, &counterparty_fields);

    tracing::debug!(
        applicant_fields = applicant_fields.len(),
        counterparty_fields = counterparty_fields.len(),
        total_matches = field_pairings.len(),
        "built comparable sets"
    );

    ComparableSets {
        total_matches: field_pairings.len(),
        applicant_fields,
        counterparty_fields,
        applicant_groups,
        counterparty_groups,
        field_pairings,
        reverse_pairings,
        applicant_matched_fields,
        counterparty_matched_fields,
        field_presence_map,
    }
}

/// Map every canonical name on either side to its presence on each side.
///
/// Combo fields contribute their whole string, not their parts.
pub fn build_field_presence_map<A, B>(
    applicant_fields: &[A],
    counterparty_fields: &[B],
) -> BTreeMap<String, FieldPresence>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let applicant = unique_normalized_fields(applicant_fields);
    let counterparty = unique_normalized_fields(counterparty_fields);

    let mut presence: BTreeMap<String, FieldPresence> = BTreeMap::new();
    for name in &applicant {
        presence.entry(name.clone()).or_default().in_applicant = true;
    }
    for name in &counterparty {
        presence.entry(name.clone()).or_default().in_counterparty = true;
    }
    presence
}

/// True if the canonical name is present on both sides of the map.
pub fn is_field_present_on_both_sides(
    canonical: &str,
    presence: &BTreeMap<String, FieldPresence>,
) -> bool {
    presence
        .get(canonical)
        .is_some_and(FieldPresence::on_both_sides)
}

fn flatten(set: &RequirementSet) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    let grouped = set.groups().iter().flat_map(|g| g.fields.iter());
    for field in set.fields().iter().chain(grouped) {
        if !fields.contains(field) {
            fields.push(field.clone());
        }
    }
    fields
}

fn evaluate_groups(
    groups: &[RequirementGroup],
    pairings: &BTreeMap<String, Vec<String>>,
) -> Vec<GroupOutcome> {
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let matched_fields: Vec<String> = group
                .fields
                .iter()
                .filter(|f| pairings.contains_key(f.as_str()))
                .cloned()
                .collect();
            let satisfied = match group.logic {
                GroupLogic::Or => !matched_fields.is_empty(),
                GroupLogic::And => matched_fields.len() == group.fields.len(),
            };
            GroupOutcome {
                key: format!("group_{index}"),
                logic: group.logic,
                fields: group.fields.clone(),
                satisfied,
                matched_fields,
            }
        })
        .collect()
}

fn matched_in_order(fields: &[String], pairings: &BTreeMap<String, Vec<String>>) -> Vec<String> {
    fields
        .iter()
        .filter(|f| pairings.contains_key(f.as_str()))
        .cloned()
        .collect()
}
