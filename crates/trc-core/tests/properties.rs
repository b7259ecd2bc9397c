//! # Property Tests
//!
//! Algebraic properties of normalization, matching, pairing, and group
//! evaluation over generated field names drawn from dictionary aliases,
//! canonical names, combos, and arbitrary strings.

use proptest::prelude::*;

use trc_core::{
    build_comparable_sets, compare_field_sets, fields_match, normalize_field, ComplianceVerdict,
    Direction, GroupLogic, RequirementGroup, RequirementSet,
};

const POOL: &[&str] = &[
    "passportNumber",
    "id_document_number",
    "dateOfBirth",
    "date_of_birth",
    "dob",
    "birthplace",
    "placeOfBirth",
    "nationality",
    "fullName",
    "full_name",
    "residential_address",
    "walletAddress",
];

fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(POOL).prop_map(str::to_string),
        "[a-z_]{1,10}",
        (prop::sample::select(POOL), prop::sample::select(POOL))
            .prop_map(|(a, b)| format!("{a} + {b}")),
    ]
}

fn field_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(field_name(), 0..6)
}

fn group() -> impl Strategy<Value = RequirementGroup> {
    (prop_oneof![Just(GroupLogic::And), Just(GroupLogic::Or)], field_list())
        .prop_map(|(logic, fields)| RequirementGroup::new(logic, fields))
}

fn requirement_set() -> impl Strategy<Value = RequirementSet> {
    (field_list(), prop::collection::vec(group(), 0..3))
        .prop_map(|(fields, groups)| RequirementSet::new(fields, groups))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::In), Just(Direction::Out)]
}

proptest! {
    /// Normalizing a normalized name is a no-op.
    #[test]
    fn normalization_is_idempotent(raw in prop_oneof![field_name(), ".*"]) {
        let once = normalize_field(&raw).normalized;
        let twice = normalize_field(&once).normalized;
        prop_assert_eq!(once, twice);
    }

    /// Matching does not depend on argument order.
    #[test]
    fn matcher_is_symmetric(a in field_name(), b in field_name()) {
        prop_assert_eq!(fields_match(&a, &b), fields_match(&b, &a));
    }

    /// Every field matches itself.
    #[test]
    fn matcher_is_reflexive(a in prop_oneof![field_name(), ".+"]) {
        prop_assert!(fields_match(&a, &a));
    }

    /// g is paired with f exactly when f is reverse-paired with g.
    #[test]
    fn pairings_mirror_reverse_pairings(a in requirement_set(), b in requirement_set()) {
        let sets = build_comparable_sets(&a, &b);
        for (f, targets) in &sets.field_pairings {
            for g in targets {
                prop_assert!(sets.reverse_matching_fields(g).contains(f));
            }
        }
        for (g, sources) in &sets.reverse_pairings {
            for f in sources {
                prop_assert!(sets.matching_fields(f).contains(g));
            }
        }
        prop_assert_eq!(sets.total_matches, sets.field_pairings.len());
    }

    /// Adding a field to a satisfied OR group keeps it satisfied.
    #[test]
    fn or_group_satisfaction_is_monotonic(
        group_fields in field_list(),
        extra in field_name(),
        counterparty in field_list(),
    ) {
        let counterparty = RequirementSet::from_fields(counterparty);
        let before = build_comparable_sets(
            &RequirementSet::from_groups([RequirementGroup::any_of(group_fields.clone())]),
            &counterparty,
        );
        let mut extended = group_fields;
        extended.push(extra);
        let after = build_comparable_sets(
            &RequirementSet::from_groups([RequirementGroup::any_of(extended)]),
            &counterparty,
        );
        if before.applicant_groups[0].satisfied {
            prop_assert!(after.applicant_groups[0].satisfied);
        }
    }

    /// An AND group with any unpaired field is unsatisfied.
    #[test]
    fn and_group_requires_every_field(a in requirement_set(), b in requirement_set()) {
        let sets = build_comparable_sets(&a, &b);
        for group in sets.applicant_groups.iter().filter(|g| g.logic == GroupLogic::And) {
            let all_paired = group.fields.iter().all(|f| sets.has_matches(f));
            prop_assert_eq!(group.satisfied, all_paired);
        }
        for group in sets.counterparty_groups.iter().filter(|g| g.logic == GroupLogic::And) {
            let all_paired = group
                .fields
                .iter()
                .all(|f| !sets.reverse_matching_fields(f).is_empty());
            prop_assert_eq!(group.satisfied, all_paired);
        }
    }

    /// The verdict is always one of the three outcomes and reruns agree.
    #[test]
    fn verdict_is_total_and_deterministic(
        a in requirement_set(),
        b in requirement_set(),
        dir in direction(),
    ) {
        let verdict = compare_field_sets(&a, &b, dir);
        prop_assert!(matches!(
            verdict,
            ComplianceVerdict::Match
                | ComplianceVerdict::Overcompliance
                | ComplianceVerdict::Undercompliance
        ));
        prop_assert_eq!(verdict, compare_field_sets(&a, &b, dir));
    }

    /// Comparing a set with itself is always a match.
    #[test]
    fn identical_sets_match(a in requirement_set(), dir in direction()) {
        prop_assert_eq!(compare_field_sets(&a, &a, dir), ComplianceVerdict::Match);
    }
}
