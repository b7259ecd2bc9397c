//! # Field Inspection CLI
//!
//! `trc normalize` and `trc match`: look at how the engine sees raw field
//! names without running a full comparison.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use trc_core::normalize::{expand_canonical, normalize_fields};
use trc_core::{find_matching_fields, MatchKind, NormalizedField};

use crate::{join_or_dash, to_json, OutputFormat};

/// Normalize subcommand arguments.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Raw field names. Quote combo fields: "dateOfBirth + placeOfBirth".
    #[arg(required = true)]
    pub fields: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Match subcommand arguments.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// First raw field name.
    pub first: String,

    /// Second raw field name.
    pub second: String,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// A normalized field plus its classifier expansion.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeEntry {
    #[serde(flatten)]
    pub field: NormalizedField,
    /// Canonical names the field contributes to a compliance verdict.
    pub canonical: Vec<String>,
}

/// Result of `trc match`.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub first: String,
    pub second: String,
    pub matches: bool,
    pub kind: Option<MatchKind>,
}

/// Execute the normalize subcommand.
pub fn run_normalize(args: &NormalizeArgs) -> Result<u8> {
    let entries = normalize_entries(&args.fields);
    match args.format {
        OutputFormat::Text => {
            for entry in &entries {
                println!("{}", render_entry(entry));
            }
        }
        OutputFormat::Json => println!("{}", to_json(&entries)?),
    }
    Ok(0)
}

/// Execute the match subcommand.
pub fn run_match(args: &MatchArgs) -> Result<u8> {
    let result = match_fields(&args.first, &args.second);
    match args.format {
        OutputFormat::Text => println!("{}", render_match(&result)),
        OutputFormat::Json => println!("{}", to_json(&result)?),
    }
    Ok(0)
}

pub fn normalize_entries(fields: &[String]) -> Vec<NormalizeEntry> {
    normalize_fields(fields)
        .into_iter()
        .map(|field| NormalizeEntry {
            canonical: expand_canonical(&field.original),
            field,
        })
        .collect()
}

pub fn match_fields(first: &str, second: &str) -> MatchResult {
    let kind = find_matching_fields(&[first], &[second])
        .first()
        .map(|m| m.kind);
    MatchResult {
        first: first.to_string(),
        second: second.to_string(),
        matches: kind.is_some(),
        kind,
    }
}

fn render_entry(entry: &NormalizeEntry) -> String {
    let field = &entry.field;
    if field.is_combo {
        format!(
            "{} → combo [{}] (canonical: {})",
            field.original,
            field.combo_fields.join(", "),
            join_or_dash(&entry.canonical)
        )
    } else {
        format!("{} → {}", field.original, field.normalized)
    }
}

fn render_match(result: &MatchResult) -> String {
    match result.kind {
        Some(kind) => {
            let kind = match kind {
                MatchKind::Exact => "exact",
                MatchKind::Combo => "combo",
                MatchKind::Partial => "partial",
            };
            format!("{} ~ {}: match ({kind})", result.first, result.second)
        }
        None => format!("{} ~ {}: no match", result.first, result.second),
    }
}
