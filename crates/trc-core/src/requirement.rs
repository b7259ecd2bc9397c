//! # Requirement Model
//!
//! Typed inputs to the comparison engine: requirement groups with AND/OR
//! logic, requirement sets (plain fields, groups, or both), the transaction
//! direction, and the explicit per-call [`ComparisonInput`].
//!
//! ## Wire Shape
//!
//! A [`RequirementSet`] serializes as `{ "fields"?: [...], "groups"?: [...] }`.
//! Absent lists deserialize as empty; the variant is chosen from which lists
//! are present.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// GroupLogic
// ---------------------------------------------------------------------------

/// Combination logic of a [`RequirementGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupLogic {
    /// Every field in the group is required.
    #[serde(rename = "AND")]
    And,
    /// Any one field in the group suffices.
    #[serde(rename = "OR")]
    Or,
}

impl GroupLogic {
    /// The wire identifier (`"AND"` or `"OR"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for GroupLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupLogic {
    type Err = CoreError;

    /// Parse `AND` / `OR`, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            _ => Err(CoreError::UnknownLogic(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RequirementGroup
// ---------------------------------------------------------------------------

/// A set of raw field names that jointly (AND) or alternatively (OR)
/// satisfy one compliance obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementGroup {
    /// AND / OR combination logic.
    pub logic: GroupLogic,
    /// Raw field names, possibly including combo fields.
    pub fields: Vec<String>,
}

impl RequirementGroup {
    /// Create a group with the given logic.
    pub fn new<I, S>(logic: GroupLogic, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            logic,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an AND group.
    pub fn all_of<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(GroupLogic::And, fields)
    }

    /// Create an OR group.
    pub fn any_of<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(GroupLogic::Or, fields)
    }
}

// ---------------------------------------------------------------------------
// RequirementSet
// ---------------------------------------------------------------------------

/// The requirements one party imposes: ungrouped fields, groups, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RequirementSetRepr", into = "RequirementSetRepr")]
pub enum RequirementSet {
    /// Plain ungrouped fields only.
    Fields(Vec<String>),
    /// Requirement groups only.
    Groups(Vec<RequirementGroup>),
    /// Plain fields and groups together.
    Mixed {
        /// Plain ungrouped fields.
        fields: Vec<String>,
        /// Requirement groups.
        groups: Vec<RequirementGroup>,
    },
}

impl RequirementSet {
    /// Build a set from plain fields and groups, picking the narrowest variant.
    pub fn new(fields: Vec<String>, groups: Vec<RequirementGroup>) -> Self {
        match (fields.is_empty(), groups.is_empty()) {
            (_, true) => Self::Fields(fields),
            (true, false) => Self::Groups(groups),
            (false, false) => Self::Mixed { fields, groups },
        }
    }

    /// A set of plain fields.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(fields.into_iter().map(Into::into).collect())
    }

    /// A set of requirement groups.
    pub fn from_groups(groups: impl IntoIterator<Item = RequirementGroup>) -> Self {
        Self::Groups(groups.into_iter().collect())
    }

    /// Plain ungrouped fields; empty for [`RequirementSet::Groups`].
    pub fn fields(&self) -> &[String] {
        match self {
            Self::Fields(fields) | Self::Mixed { fields, .. } => fields,
            Self::Groups(_) => &[],
        }
    }

    /// Requirement groups; empty for [`RequirementSet::Fields`].
    pub fn groups(&self) -> &[RequirementGroup] {
        match self {
            Self::Groups(groups) | Self::Mixed { groups, .. } => groups,
            Self::Fields(_) => &[],
        }
    }

    /// True when the set has no fields and no groups.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty() && self.groups().is_empty()
    }
}

impl Default for RequirementSet {
    fn default() -> Self {
        Self::Fields(Vec::new())
    }
}

#[derive(Serialize, Deserialize)]
struct RequirementSetRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    groups: Option<Vec<RequirementGroup>>,
}

impl From<RequirementSetRepr> for RequirementSet {
    fn from(repr: RequirementSetRepr) -> Self {
        match (repr.fields, repr.groups) {
            (Some(fields), Some(groups)) => Self::Mixed { fields, groups },
            (None, Some(groups)) => Self::Groups(groups),
            (Some(fields), None) => Self::Fields(fields),
            (None, None) => Self::default(),
        }
    }
}

impl From<RequirementSet> for RequirementSetRepr {
    fn from(set: RequirementSet) -> Self {
        match set {
            RequirementSet::Fields(fields) => Self {
                fields: Some(fields),
                groups: None,
            },
            RequirementSet::Groups(groups) => Self {
                fields: None,
                groups: Some(groups),
            },
            RequirementSet::Mixed { fields, groups } => Self {
                fields: Some(fields),
                groups: Some(groups),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Direction & Party
// ---------------------------------------------------------------------------

/// One of the two parties to a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    /// The institution running the comparison.
    Applicant,
    /// The other institution.
    Counterparty,
}

impl Party {
    /// `"Sender"` or `"Receiver"` depending on the transaction direction.
    pub fn role_label(&self, direction: Direction) -> &'static str {
        if direction.sender() == *self {
            "Sender"
        } else {
            "Receiver"
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applicant => f.write_str("applicant"),
            Self::Counterparty => f.write_str("counterparty"),
        }
    }
}

/// Transaction direction relative to the applicant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Counterparty sends, applicant receives.
    #[serde(rename = "IN")]
    In,
    /// Applicant sends, counterparty receives.
    #[default]
    #[serde(rename = "OUT")]
    Out,
}

impl Direction {
    /// The party supplying data.
    pub fn sender(&self) -> Party {
        match self {
            Self::Out => Party::Applicant,
            Self::In => Party::Counterparty,
        }
    }

    /// The party whose requirements must be met.
    pub fn receiver(&self) -> Party {
        match self {
            Self::Out => Party::Counterparty,
            Self::In => Party::Applicant,
        }
    }

    /// The wire identifier (`"IN"` or `"OUT"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    /// Parse `IN` / `OUT`, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            _ => Err(CoreError::UnknownDirection(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ComparisonInput
// ---------------------------------------------------------------------------

/// Everything one comparison needs, passed explicitly on each call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonInput {
    /// Requirements of the applicant institution.
    pub applicant: RequirementSet,
    /// Requirements of the counterparty institution.
    pub counterparty: RequirementSet,
    /// Which side sends. Defaults to `OUT`.
    #[serde(default)]
    pub direction: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_picks_variant() {
        assert!(matches!(
            RequirementSet::new(vec!["a".into()], vec![]),
            RequirementSet::Fields(_)
        ));
        assert!(matches!(
            RequirementSet::new(vec![], vec![RequirementGroup::any_of(["a"])]),
            RequirementSet::Groups(_)
        ));
        assert!(matches!(
            RequirementSet::new(vec!["a".into()], vec![RequirementGroup::any_of(["b"])]),
            RequirementSet::Mixed { .. }
        ));
        assert_eq!(RequirementSet::new(vec![], vec![]), RequirementSet::default());
    }

    #[test]
    fn test_accessors_default_to_empty() {
        let fields = RequirementSet::from_fields(["full_name"]);
        assert_eq!(fields.fields(), ["full_name".to_string()]);
        assert!(fields.groups().is_empty());

        let groups = RequirementSet::from_groups([RequirementGroup::all_of(["a", "b"])]);
        assert!(groups.fields().is_empty());
        assert_eq!(groups.groups().len(), 1);
        assert!(RequirementSet::default().is_empty());
    }

    #[test]
    fn test_deserialize_wire_shapes() {
        let empty: RequirementSet = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let fields: RequirementSet = serde_json::from_str(r#"{"fields":["a"]}"#).unwrap();
        assert_eq!(fields, RequirementSet::from_fields(["a"]));

        let groups: RequirementSet =
            serde_json::from_str(r#"{"groups":[{"logic":"OR","fields":["a","b"]}]}"#).unwrap();
        assert_eq!(groups.groups()[0].logic, GroupLogic::Or);

        let mixed: RequirementSet = serde_json::from_str(
            r#"{"fields":["x"],"groups":[{"logic":"AND","fields":["a"]}]}"#,
        )
        .unwrap();
        assert!(matches!(mixed, RequirementSet::Mixed { .. }));
    }

    #[test]
    fn test_serialize_omits_absent_lists() {
        let json = serde_json::to_string(&RequirementSet::from_fields(["a"])).unwrap();
        assert_eq!(json, r#"{"fields":["a"]}"#);
    }

    #[test]
    fn test_direction_roles() {
        assert_eq!(Direction::default(), Direction::Out);
        assert_eq!(Direction::Out.sender(), Party::Applicant);
        assert_eq!(Direction::Out.receiver(), Party::Counterparty);
        assert_eq!(Direction::In.sender(), Party::Counterparty);
        assert_eq!(Direction::In.receiver(), Party::Applicant);
        assert_eq!(Party::Applicant.role_label(Direction::Out), "Sender");
        assert_eq!(Party::Counterparty.role_label(Direction::Out), "Receiver");
        assert_eq!(Party::Applicant.role_label(Direction::In), "Receiver");
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("out".parse::<Direction>().unwrap(), Direction::Out);
        assert_eq!(" IN ".parse::<Direction>().unwrap(), Direction::In);
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(CoreError::UnknownDirection("sideways".into()))
        );
    }

    #[test]
    fn test_logic_parse_and_serde() {
        assert_eq!("and".parse::<GroupLogic>().unwrap(), GroupLogic::And);
        assert!("XOR".parse::<GroupLogic>().is_err());
        assert_eq!(serde_json::to_string(&GroupLogic::Or).unwrap(), r#""OR""#);
        assert_eq!(serde_json::to_string(&Direction::In).unwrap(), r#""IN""#);
    }

    #[test]
    fn test_comparison_input_default_direction() {
        let input: ComparisonInput =
            serde_json::from_str(r#"{"applicant":{"fields":["a"]},"counterparty":{}}"#).unwrap();
        assert_eq!(input.direction, Direction::Out);
    }
}
