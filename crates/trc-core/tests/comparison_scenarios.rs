//! # End-to-End Comparison Scenarios
//!
//! Exercises the public API the way a presentation layer does: build two
//! requirement sets, compare them, and read pairings, group verdicts, and
//! the compliance verdict.

use trc_core::{
    build_comparable_sets, compare, compare_field_sets, fields_match, normalize_field,
    ComparisonInput, ComplianceVerdict, Direction, RequirementGroup, RequirementSet,
};

fn fields(names: &[&str]) -> RequirementSet {
    RequirementSet::from_fields(names.iter().copied())
}

#[test]
fn combo_field_matches_its_plain_part() {
    assert!(fields_match("date_of_birth + birthplace", "date_of_birth"));
}

#[test]
fn dictionary_aliases_match_their_canonical_name() {
    assert!(fields_match("passportNumber", "id_document_number"));
}

#[test]
fn or_group_satisfied_by_single_match() {
    let applicant =
        RequirementSet::from_groups([RequirementGroup::any_of(["field1", "field2", "field3"])]);
    let counterparty = RequirementSet::from_groups([RequirementGroup::any_of(["field2"])]);

    let sets = build_comparable_sets(&applicant, &counterparty);
    let group = &sets.applicant_groups[0];
    assert!(group.satisfied);
    assert_eq!(group.matched_fields, vec!["field2"]);
}

#[test]
fn and_group_partial_match_surfaces_matched_subset() {
    let applicant =
        RequirementSet::from_groups([RequirementGroup::all_of(["date_of_birth", "nationality"])]);
    let counterparty = RequirementSet::from_groups([RequirementGroup::all_of(["date_of_birth"])]);

    let sets = build_comparable_sets(&applicant, &counterparty);
    let group = &sets.applicant_groups[0];
    assert!(!group.satisfied);
    assert!(group.matched_fields.iter().any(|f| f == "date_of_birth"));
    assert!(!group.matched_fields.iter().any(|f| f == "nationality"));
}

#[test]
fn missing_required_field_is_undercompliance() {
    let verdict = compare_field_sets(
        &fields(&["full_name"]),
        &fields(&["full_name", "date_of_birth"]),
        Direction::Out,
    );
    assert_eq!(verdict, ComplianceVerdict::Undercompliance);
}

#[test]
fn extra_field_is_overcompliance_with_default_direction() {
    let verdict = compare_field_sets(
        &fields(&["full_name", "date_of_birth", "extra_field"]),
        &fields(&["full_name", "date_of_birth"]),
        Direction::default(),
    );
    assert_eq!(verdict, ComplianceVerdict::Overcompliance);
}

#[test]
fn presence_map_and_classifier_treat_combos_differently() {
    let applicant = fields(&["date_of_birth + birthplace"]);
    let counterparty = fields(&["date_of_birth", "birthplace"]);

    let outcome = compare(&ComparisonInput {
        applicant,
        counterparty,
        direction: Direction::Out,
    });

    // Presence map keeps the combo whole.
    assert!(!outcome.sets.is_present_on_both_sides("date_of_birth"));
    assert!(outcome
        .sets
        .field_presence_map
        .contains_key("date_of_birth + birthplace"));

    // Classifier splits it.
    assert_eq!(outcome.report.verdict, ComplianceVerdict::Match);
}

#[test]
fn combo_alias_parts_do_not_match_canonical_plain_field() {
    // Combo parts are compared raw against the plain side's canonical name.
    assert!(!fields_match("dateOfBirth + birthplace", "date_of_birth"));
    assert_eq!(
        normalize_field("dateOfBirth + birthplace").combo_fields,
        vec!["dateOfBirth", "birthplace"]
    );
}

#[test]
fn mixed_requirement_sets_compare_end_to_end() {
    let applicant = RequirementSet::new(
        vec!["fullName".into(), "passportNumber".into()],
        vec![RequirementGroup::any_of(["dateOfBirth", "residentialAddress"])],
    );
    let counterparty = RequirementSet::new(
        vec!["full_name".into()],
        vec![RequirementGroup::all_of([
            "id_document_number",
            "date_of_birth + birthplace",
        ])],
    );

    let outcome = compare(&ComparisonInput {
        applicant,
        counterparty,
        direction: Direction::Out,
    });

    assert_eq!(
        outcome.sets.applicant_fields,
        vec!["fullName", "passportNumber", "dateOfBirth", "residentialAddress"]
    );
    assert!(outcome.sets.applicant_groups[0].satisfied);
    assert!(outcome.sets.counterparty_groups[0].satisfied);
    assert_eq!(outcome.sets.total_matches, 3);
    assert_eq!(outcome.report.verdict, ComplianceVerdict::Undercompliance);
    assert_eq!(outcome.report.missing_fields, vec!["birthplace"]);
    assert_eq!(outcome.report.extra_fields, vec!["residential_address"]);
}

#[test]
fn comparison_input_deserializes_from_json() {
    let input: ComparisonInput = serde_json::from_str(
        r#"{
            "applicant": {"fields": ["passportNumber", "date_of_birth"]},
            "counterparty": {"fields": ["id_document_number", "date_of_birth"]},
            "direction": "IN"
        }"#,
    )
    .unwrap();
    assert_eq!(input.direction, Direction::In);
    assert_eq!(compare(&input).report.verdict, ComplianceVerdict::Match);
}
