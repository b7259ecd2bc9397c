//! # Compliance Classifier
//!
//! Decides whether the sender's data covers the receiver's requirements.
//!
//! Both sides are expanded into sets of individual canonical names: combo
//! fields are split and each part is canonicalized on its own. Then:
//!
//! 1. Any receiver name missing from the sender → `Undercompliance`.
//! 2. Otherwise any sender name the receiver does not require → `Overcompliance`.
//! 3. Otherwise → `Match`.
//!
//! The missing-field check always takes priority over the excess check.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::comparable::{build_comparable_sets, ComparableSets};
use crate::normalize::expand_canonical;
use crate::requirement::{ComparisonInput, Direction, Party, RequirementSet};

/// Aggregate outcome of a sender/receiver comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceVerdict {
    /// Sender supplies exactly the receiver's canonical field set.
    Match,
    /// Sender supplies everything required plus more.
    Overcompliance,
    /// Sender lacks at least one required field.
    Undercompliance,
}

impl ComplianceVerdict {
    /// The wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Overcompliance => "overcompliance",
            Self::Undercompliance => "undercompliance",
        }
    }

    /// Human-readable status message.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Match => "Perfect match - all required fields are covered",
            Self::Overcompliance => {
                "Overcompliance - additional fields provided beyond requirements"
            }
            Self::Undercompliance => "Undercompliance - some required fields are missing",
        }
    }

    /// True unless required fields are missing.
    pub fn is_compliant(&self) -> bool {
        !matches!(self, Self::Undercompliance)
    }
}

impl fmt::Display for ComplianceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict plus the canonical names behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// The three-way classification.
    pub verdict: ComplianceVerdict,
    /// Direction the comparison was made in.
    pub direction: Direction,
    /// Canonical names the receiver requires and the sender lacks, sorted.
    pub missing_fields: Vec<String>,
    /// Canonical names the sender supplies beyond the receiver's set, sorted.
    pub extra_fields: Vec<String>,
}

/// Field-level comparison together with its compliance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    /// Pairings, group verdicts, and presence map.
    pub sets: ComparableSets,
    /// Sender/receiver verdict.
    pub report: ComplianceReport,
}

/// Classify the sender's field set against the receiver's.
///
/// `Direction::Out` makes the applicant the sender.
pub fn compare_field_sets(
    applicant: &RequirementSet,
    counterparty: &RequirementSet,
    direction: Direction,
) -> ComplianceVerdict {
    analyze_field_sets(applicant, counterparty, direction).verdict
}

/// Like [`compare_field_sets`], also reporting missing and extra names.
pub fn analyze_field_sets(
    applicant: &RequirementSet,
    counterparty: &RequirementSet,
    direction: Direction,
) -> ComplianceReport {
    classify_sets(&build_comparable_sets(applicant, counterparty), direction)
}

/// Run the full comparison for one explicit input.
pub fn compare(input: &ComparisonInput) -> ComparisonOutcome {
    let sets = build_comparable_sets(&input.applicant, &input.counterparty);
    let report = classify_sets(&sets, input.direction);
    ComparisonOutcome { sets, report }
}

fn classify_sets(sets: &ComparableSets, direction: Direction) -> ComplianceReport {
    let applicant = canonical_set(&sets.applicant_fields);
    let counterparty = canonical_set(&sets.counterparty_fields);

    let (sender, receiver) = match direction.sender() {
        Party::Applicant => (&applicant, &counterparty),
        Party::Counterparty => (&counterparty, &applicant),
    };

    let missing_fields: Vec<String> = receiver.difference(sender).cloned().collect();
    let extra_fields: Vec<String> = sender.difference(receiver).cloned().collect();

    let verdict = if !missing_fields.is_empty() {
        ComplianceVerdict::Undercompliance
    } else if !extra_fields.is_empty() {
        ComplianceVerdict::Overcompliance
    } else {
        ComplianceVerdict::Match
    };

    tracing::debug!(
        %direction,
        %verdict,
        missing = missing_fields.len(),
        extra = extra_fields.len(),
        "classified field sets"
    );

    ComplianceReport {
        verdict,
        direction,
        missing_fields,
        extra_fields,
    }
}

fn canonical_set(fields: &[String]) -> BTreeSet<String> {
    fields.iter().flat_map(|f| expand_canonical(f)).collect()
}
