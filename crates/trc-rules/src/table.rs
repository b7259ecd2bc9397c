//! # Rule Table
//!
//! Per-country Travel Rule requirements for individuals.
//!
//! ## Data Model
//!
//! - [`RuleTable`]: country code → [`CountryRule`], sorted by code.
//! - [`CountryRule`]: local currency, threshold (local currency units), and
//!   the [`IndividualBranch`].
//! - [`RuleBlock`]: either `required_fields` or `requirement_groups`, with
//!   [`VerificationFlags`] flattened alongside.
//!
//! An amount strictly below the threshold selects `below_threshold`; any
//! amount at or above it selects `above_threshold`.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use trc_core::{RequirementGroup, RequirementSet};

use crate::error::{RulesError, RulesResult};

const BUILTIN_RULES: &str = include_str!("../data/requirements.json");

// ---------------------------------------------------------------------------
// CountryCode
// ---------------------------------------------------------------------------

/// A country code keying the rule table (e.g. `DEU`, `ZAF`).
///
/// Must be non-empty after trimming. No format beyond that is imposed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CountryCode(String);

impl CountryCode {
    /// Create a country code, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidCountryCode`] if the trimmed value is empty.
    pub fn new(value: impl Into<String>) -> RulesResult<Self> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RulesError::InvalidCountryCode(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl Borrow<str> for CountryCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Rule blocks
// ---------------------------------------------------------------------------

/// Verification obligations attached to a rule block.
///
/// Carried through to the presentation layer untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationFlags {
    /// Know-your-customer verification is required.
    #[serde(default)]
    pub kyc_required: bool,
    /// Anti-money-laundering screening is required.
    #[serde(default)]
    pub aml_required: bool,
    /// The wallet must be attributed to its owner.
    #[serde(default)]
    pub wallet_attribution: bool,
}

impl VerificationFlags {
    /// True when no verification is required at all.
    pub fn is_empty(&self) -> bool {
        !self.kyc_required && !self.aml_required && !self.wallet_attribution
    }
}

/// The field requirements of a rule block: simple or grouped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleRequirements {
    /// A flat list of required fields.
    Simple {
        /// Raw required field names.
        required_fields: Vec<String>,
    },
    /// AND/OR requirement groups.
    Grouped {
        /// Requirement groups.
        requirement_groups: Vec<RequirementGroup>,
    },
}

/// One threshold bucket's requirements and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBlock {
    /// Field requirements.
    #[serde(flatten)]
    pub requirements: RuleRequirements,
    /// Verification flags.
    #[serde(flatten)]
    pub flags: VerificationFlags,
}

impl RuleBlock {
    /// Convert into the comparison engine's input shape.
    pub fn extract(&self) -> ExtractedRequirements {
        let requirements = match &self.requirements {
            RuleRequirements::Simple { required_fields } => {
                RequirementSet::Fields(required_fields.clone())
            }
            RuleRequirements::Grouped { requirement_groups } => {
                RequirementSet::Groups(requirement_groups.clone())
            }
        };
        ExtractedRequirements {
            requirements,
            flags: self.flags,
        }
    }
}

/// Rule blocks for individuals on either side of the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualBranch {
    /// Applies when the amount is below the threshold.
    pub below_threshold: RuleBlock,
    /// Applies when the amount is at or above the threshold.
    pub above_threshold: RuleBlock,
}

impl IndividualBranch {
    /// The block for a bucket.
    pub fn block(&self, bucket: ThresholdBucket) -> &RuleBlock {
        match bucket {
            ThresholdBucket::BelowThreshold => &self.below_threshold,
            ThresholdBucket::AboveThreshold => &self.above_threshold,
        }
    }
}

/// A country's Travel Rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRule {
    /// ISO 4217 code of the local currency.
    pub currency: String,
    /// Threshold in whole local currency units.
    pub threshold: u64,
    /// Requirements for individuals.
    pub individual: IndividualBranch,
}

impl CountryRule {
    /// The bucket an amount falls into.
    pub fn bucket_for(&self, amount: u64) -> ThresholdBucket {
        if amount < self.threshold {
            ThresholdBucket::BelowThreshold
        } else {
            ThresholdBucket::AboveThreshold
        }
    }
}

/// Which side of a country's threshold an amount falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBucket {
    /// Amount below the threshold.
    BelowThreshold,
    /// Amount at or above the threshold.
    AboveThreshold,
}

impl ThresholdBucket {
    /// The wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelowThreshold => "below_threshold",
            Self::AboveThreshold => "above_threshold",
        }
    }
}

impl fmt::Display for ThresholdBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule block resolved into comparison input plus its flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRequirements {
    /// Fields or groups to compare.
    pub requirements: RequirementSet,
    /// Verification flags, passed through.
    pub flags: VerificationFlags,
}

/// Both buckets of a country, resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllRequirements {
    /// Requirements below the threshold.
    pub below_threshold: ExtractedRequirements,
    /// Requirements at or above the threshold.
    pub above_threshold: ExtractedRequirements,
    /// The country's threshold.
    pub threshold: u64,
}

// ---------------------------------------------------------------------------
// RuleTable
// ---------------------------------------------------------------------------

/// Country code → rule mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: BTreeMap<CountryCode, CountryRule>,
}

impl RuleTable {
    /// Build a table from already-parsed rules.
    pub fn new(rules: BTreeMap<CountryCode, CountryRule>) -> Self {
        Self { rules }
    }

    /// Parse a JSON table.
    pub fn from_json_str(s: &str) -> RulesResult<Self> {
        let table: Self = serde_json::from_str(s)?;
        tracing::info!(countries = table.len(), "loaded rule table (json)");
        Ok(table)
    }

    /// Parse a YAML table.
    pub fn from_yaml_str(s: &str) -> RulesResult<Self> {
        let table: Self = serde_yaml::from_str(s)?;
        tracing::info!(countries = table.len(), "loaded rule table (yaml)");
        Ok(table)
    }

    /// Load a table from disk. `.yaml`/`.yml` files parse as YAML, anything
    /// else as JSON.
    pub fn load(path: &Path) -> RulesResult<Self> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "reading rule table");
        if is_yaml(path) {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// The compiled-in sample table.
    pub fn builtin() -> RulesResult<Self> {
        Self::from_json_str(BUILTIN_RULES)
    }

    /// Number of countries in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the table has no countries.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule for a country.
    pub fn country_rule(&self, code: &str) -> Option<&CountryRule> {
        self.rules.get(code)
    }

    /// All country codes, sorted.
    pub fn country_codes(&self) -> Vec<&CountryCode> {
        self.rules.keys().collect()
    }

    /// Iterate over `(code, rule)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&CountryCode, &CountryRule)> {
        self.rules.iter()
    }

    /// True if the table has a rule for the country.
    pub fn is_supported(&self, code: &str) -> bool {
        self.rules.contains_key(code)
    }

    /// A country's threshold.
    pub fn threshold(&self, code: &str) -> Option<u64> {
        self.country_rule(code).map(|rule| rule.threshold)
    }

    /// A country's local currency.
    pub fn currency_for(&self, code: &str) -> Option<&str> {
        self.country_rule(code).map(|rule| rule.currency.as_str())
    }

    /// The bucket an amount falls into for a country.
    pub fn threshold_bucket(&self, code: &str, amount: u64) -> Option<ThresholdBucket> {
        self.country_rule(code).map(|rule| rule.bucket_for(amount))
    }

    /// True if the amount is at or above the country's threshold.
    pub fn is_above_threshold(&self, code: &str, amount: u64) -> Option<bool> {
        self.threshold_bucket(code, amount)
            .map(|bucket| bucket == ThresholdBucket::AboveThreshold)
    }

    /// Requirements and flags applying to a country at an amount.
    pub fn extract_requirements(&self, code: &str, amount: u64) -> Option<ExtractedRequirements> {
        let rule = self.country_rule(code)?;
        let bucket = rule.bucket_for(amount);
        tracing::debug!(country = code, amount, %bucket, "extracting requirements");
        Some(rule.individual.block(bucket).extract())
    }

    /// Requirements for both buckets of a country.
    pub fn all_requirements(&self, code: &str) -> Option<AllRequirements> {
        let rule = self.country_rule(code)?;
        Some(AllRequirements {
            below_threshold: rule.individual.below_threshold.extract(),
            above_threshold: rule.individual.above_threshold.extract(),
            threshold: rule.threshold,
        })
    }

    /// True if the applicable block uses non-empty requirement groups.
    pub fn has_requirement_groups(&self, code: &str, amount: u64) -> bool {
        self.extract_requirements(code, amount)
            .is_some_and(|r| !r.requirements.groups().is_empty())
    }

    /// True if the applicable block uses a non-empty required-field list.
    pub fn has_required_fields(&self, code: &str, amount: u64) -> bool {
        self.extract_requirements(code, amount)
            .is_some_and(|r| !r.requirements.fields().is_empty())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use trc_core::GroupLogic;

    const SAMPLE: &str = r#"{
        "DEU": {
            "currency": "EUR",
            "threshold": 1000,
            "individual": {
                "below_threshold": {
                    "required_fields": ["full_name", "wallet_address"],
                    "kyc_required": false,
                    "aml_required": true,
                    "wallet_attribution": true
                },
                "above_threshold": {
                    "requirement_groups": [
                        {"logic": "AND", "fields": ["full_name", "wallet_address"]},
                        {"logic": "OR", "fields": ["id_document_number", "date_of_birth + birthplace"]}
                    ],
                    "kyc_required": true,
                    "aml_required": true,
                    "wallet_attribution": true
                }
            }
        }
    }"#;

    fn sample() -> RuleTable {
        RuleTable::from_json_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_country_code_validation() {
        assert_eq!(CountryCode::new(" DEU ").unwrap().as_str(), "DEU");
        assert!(matches!(
            CountryCode::new("   "),
            Err(RulesError::InvalidCountryCode(_))
        ));
        assert!(serde_json::from_str::<CountryCode>(r#""""#).is_err());
    }

    #[test]
    fn test_threshold_buckets() {
        let table = sample();
        assert_eq!(
            table.threshold_bucket("DEU", 999),
            Some(ThresholdBucket::BelowThreshold)
        );
        assert_eq!(
            table.threshold_bucket("DEU", 1000),
            Some(ThresholdBucket::AboveThreshold)
        );
        assert_eq!(table.is_above_threshold("DEU", 0), Some(false));
        assert_eq!(table.threshold_bucket("XXX", 10), None);
        assert_eq!(table.threshold("DEU"), Some(1000));
    }

    #[test]
    fn test_extract_simple_block() {
        let extracted = sample().extract_requirements("DEU", 500).unwrap();
        assert_eq!(
            extracted.requirements,
            RequirementSet::from_fields(["full_name", "wallet_address"])
        );
        assert!(!extracted.flags.kyc_required);
        assert!(extracted.flags.aml_required);
        assert!(extracted.flags.wallet_attribution);
    }

    #[test]
    fn test_extract_grouped_block() {
        let extracted = sample().extract_requirements("DEU", 5000).unwrap();
        let groups = extracted.requirements.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].logic, GroupLogic::And);
        assert_eq!(groups[1].fields[1], "date_of_birth + birthplace");
        assert!(extracted.requirements.fields().is_empty());
        assert!(extracted.flags.kyc_required);
    }

    #[test]
    fn test_unknown_country_is_absent() {
        let table = sample();
        assert!(table.extract_requirements("ZZZ", 100).is_none());
        assert!(table.all_requirements("ZZZ").is_none());
        assert!(!table.is_supported("ZZZ"));
        assert!(!table.has_requirement_groups("ZZZ", 100));
    }

    #[test]
    fn test_group_and_field_predicates() {
        let table = sample();
        assert!(table.has_required_fields("DEU", 10));
        assert!(!table.has_requirement_groups("DEU", 10));
        assert!(table.has_requirement_groups("DEU", 10_000));
        assert!(!table.has_required_fields("DEU", 10_000));
    }

    #[test]
    fn test_all_requirements() {
        let all = sample().all_requirements("DEU").unwrap();
        assert_eq!(all.threshold, 1000);
        assert!(matches!(all.below_threshold.requirements, RequirementSet::Fields(_)));
        assert!(matches!(all.above_threshold.requirements, RequirementSet::Groups(_)));
    }

    #[test]
    fn test_flags_default_when_absent() {
        let block: RuleBlock = serde_json::from_str(r#"{"required_fields": ["a"]}"#).unwrap();
        assert!(block.flags.is_empty());
    }

    #[test]
    fn test_yaml_table() {
        let yaml = r#"
ZAF:
  currency: ZAR
  threshold: 5000
  individual:
    below_threshold:
      required_fields: [full_name]
      kyc_required: false
      aml_required: false
      wallet_attribution: false
    above_threshold:
      requirement_groups:
        - logic: OR
          fields: [id_document_number, passportNumber]
      kyc_required: true
      aml_required: true
      wallet_attribution: false
"#;
        let table = RuleTable::from_yaml_str(yaml).unwrap();
        assert_eq!(table.currency_for("ZAF"), Some("ZAR"));
        assert!(table.has_requirement_groups("ZAF", 5000));
    }

    #[test]
    fn test_builtin_table_parses() {
        let table = RuleTable::builtin().unwrap();
        assert!(!table.is_empty());
        for (code, rule) in table.iter() {
            assert!(!rule.currency.is_empty(), "{code} has no currency");
            assert!(rule.threshold > 0, "{code} has a zero threshold");
        }
        assert!(table.is_supported("DEU"));
        assert!(table.is_supported("ZAF"));
    }

    #[test]
    fn test_country_codes_sorted() {
        let table = RuleTable::builtin().unwrap();
        let codes: Vec<&str> = table.country_codes().iter().map(|c| c.as_str()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_malformed_table_errors() {
        assert!(matches!(
            RuleTable::from_json_str(r#"{"DEU": {"currency": "EUR"}}"#),
            Err(RulesError::Json(_))
        ));
        assert!(matches!(
            RuleTable::from_yaml_str("DEU: [unclosed"),
            Err(RulesError::Yaml(_))
        ));
    }
}
