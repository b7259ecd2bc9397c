//! # Field Normalizer
//!
//! Wraps the [`dictionary`](crate::dictionary) lookup and decomposes combo
//! fields: raw names joining two or more sub-fields with `" + "`, e.g.
//! `"date_of_birth + birthplace"`.
//!
//! A combo keeps its whole raw string as its `normalized` label. Its parts
//! are exposed verbatim (trimmed, not canonicalized) in `combo_fields`.
//! Callers that need canonical parts use [`expand_canonical`].

use serde::{Deserialize, Serialize};

use crate::dictionary;

/// Separator between the sub-fields of a combo field.
pub const COMBO_SEPARATOR: &str = " + ";

/// A raw field name together with its normalization metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedField {
    /// The raw field name as supplied.
    pub original: String,
    /// Canonical name for plain fields; the raw string itself for combos.
    pub normalized: String,
    /// Whether the raw name contains [`COMBO_SEPARATOR`].
    pub is_combo: bool,
    /// Trimmed raw sub-field names. Empty for plain fields.
    pub combo_fields: Vec<String>,
}

/// Normalize a raw field name.
///
/// Every string is valid input; the empty string normalizes to itself.
pub fn normalize_field(raw: &str) -> NormalizedField {
    if is_combo_field(raw) {
        NormalizedField {
            original: raw.to_string(),
            normalized: raw.to_string(),
            is_combo: true,
            combo_fields: split_parts(raw),
        }
    } else {
        NormalizedField {
            original: raw.to_string(),
            normalized: dictionary::lookup(raw).to_string(),
            is_combo: false,
            combo_fields: Vec::new(),
        }
    }
}

/// Normalize every field in a list, preserving order.
pub fn normalize_fields<S: AsRef<str>>(fields: &[S]) -> Vec<NormalizedField> {
    fields.iter().map(|f| normalize_field(f.as_ref())).collect()
}

/// True iff the raw name contains the combo separator.
pub fn is_combo_field(raw: &str) -> bool {
    raw.contains(COMBO_SEPARATOR)
}

/// Split a combo into its trimmed parts; a plain field yields itself.
pub fn split_combo_field(raw: &str) -> Vec<String> {
    if is_combo_field(raw) {
        split_parts(raw)
    } else {
        vec![raw.to_string()]
    }
}

/// Unique `normalized` values in first-seen order.
///
/// Combos contribute their whole string, not their parts.
pub fn unique_normalized_fields<S: AsRef<str>>(fields: &[S]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for field in fields {
        let normalized = normalize_field(field.as_ref()).normalized;
        if !unique.contains(&normalized) {
            unique.push(normalized);
        }
    }
    unique
}

/// Expand a raw field into individual canonical names.
///
/// Each combo part is canonicalized on its own; a plain field yields its
/// canonical name.
pub fn expand_canonical(raw: &str) -> Vec<String> {
    let field = normalize_field(raw);
    if field.is_combo {
        field
            .combo_fields
            .iter()
            .map(|part| dictionary::lookup(part).to_string())
            .collect()
    } else {
        vec![field.normalized]
    }
}

fn split_parts(raw: &str) -> Vec<String> {
    raw.split(COMBO_SEPARATOR)
        .map(|part| part.trim().to_string())
        .collect()
}
