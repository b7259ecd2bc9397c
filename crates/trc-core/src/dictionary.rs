//! # Field Dictionary
//!
//! Static mapping from raw field names (aliases, camelCase spellings, common
//! synonyms) to one canonical snake_case name per compliance concept.
//!
//! ## Invariants
//!
//! - Unknown names map to themselves (identity fallback).
//! - No canonical name appears as an alias key mapping elsewhere, so
//!   `lookup(lookup(x)) == lookup(x)` for every string `x`.

/// Alias → canonical name pairs.
///
/// Canonical names are not listed as keys; they resolve through the
/// identity fallback.
const DICTIONARY: &[(&str, &str)] = &[
    // Names
    ("fullName", "full_name"),
    ("name", "full_name"),
    ("legalName", "full_name"),
    ("legal_name", "full_name"),
    ("customerName", "full_name"),
    ("firstName", "first_name"),
    ("givenName", "first_name"),
    ("given_name", "first_name"),
    ("lastName", "last_name"),
    ("familyName", "last_name"),
    ("family_name", "last_name"),
    ("surname", "last_name"),
    // Birth
    ("dateOfBirth", "date_of_birth"),
    ("birthDate", "date_of_birth"),
    ("birth_date", "date_of_birth"),
    ("dob", "date_of_birth"),
    ("DOB", "date_of_birth"),
    ("placeOfBirth", "birthplace"),
    ("place_of_birth", "birthplace"),
    ("birthPlace", "birthplace"),
    ("birth_place", "birthplace"),
    // Citizenship and residence
    ("citizenship", "nationality"),
    ("countryOfNationality", "nationality"),
    ("countryOfResidence", "country_of_residence"),
    ("residenceCountry", "country_of_residence"),
    ("residence_country", "country_of_residence"),
    // Identity documents
    ("passportNumber", "id_document_number"),
    ("passport_number", "id_document_number"),
    ("idDocumentNumber", "id_document_number"),
    ("documentNumber", "id_document_number"),
    ("document_number", "id_document_number"),
    ("idDocumentType", "id_document_type"),
    ("documentType", "id_document_type"),
    ("document_type", "id_document_type"),
    ("nationalIdentifier", "national_identity_number"),
    ("national_identifier", "national_identity_number"),
    ("nationalIdentityNumber", "national_identity_number"),
    ("nationalIdNumber", "national_identity_number"),
    // Address
    ("residentialAddress", "residential_address"),
    ("address", "residential_address"),
    ("geographicAddress", "residential_address"),
    ("geographic_address", "residential_address"),
    ("physicalAddress", "residential_address"),
    ("physical_address", "residential_address"),
    // Accounts
    ("accountNumber", "account_number"),
    ("account_id", "account_number"),
    ("customerIdentification", "customer_identification_number"),
    ("customerId", "customer_identification_number"),
    ("customer_id", "customer_identification_number"),
];

/// Map a raw field name to its canonical name.
///
/// Returns the input unchanged when the dictionary has no entry for it.
pub fn lookup(raw: &str) -> &str {
    DICTIONARY
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(raw)
}

/// All distinct canonical names known to the dictionary, sorted.
pub fn canonical_fields() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = DICTIONARY.iter().map(|(_, c)| *c).collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// All alias keys in the dictionary, in table order.
pub fn raw_fields() -> Vec<&'static str> {
    DICTIONARY.iter().map(|(alias, _)| *alias).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_aliases() {
        assert_eq!(lookup("passportNumber"), "id_document_number");
        assert_eq!(lookup("idDocumentNumber"), "id_document_number");
        assert_eq!(lookup("dateOfBirth"), "date_of_birth");
        assert_eq!(lookup("fullName"), "full_name");
        assert_eq!(lookup("residentialAddress"), "residential_address");
    }

    #[test]
    fn test_identity_fallback() {
        assert_eq!(lookup("walletAddress"), "walletAddress");
        assert_eq!(lookup("id_document_number"), "id_document_number");
        assert_eq!(lookup(""), "");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup("PASSPORTNUMBER"), "PASSPORTNUMBER");
    }

    #[test]
    fn test_canonical_names_are_fixed_points() {
        for canonical in canonical_fields() {
            assert_eq!(lookup(canonical), canonical, "{canonical} must map to itself");
        }
    }

    #[test]
    fn test_alias_keys_unique() {
        let keys = raw_fields();
        let mut seen = std::collections::HashSet::new();
        for k in &keys {
            assert!(seen.insert(k), "Duplicate alias: {k}");
        }
    }

    #[test]
    fn test_canonical_fields_sorted_and_deduped() {
        let names = canonical_fields();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert!(names.contains(&"id_document_number"));
    }
}
