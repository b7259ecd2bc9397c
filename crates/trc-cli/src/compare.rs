//! # Compare CLI — Side-by-side requirement comparison.
//!
//! Resolves both countries' requirements for one amount, runs the
//! comparison engine, and prints the verdict with its supporting detail:
//! gaps, field pairings, group satisfaction, verification flags, and the
//! amount converted to EUR.
//!
//! ## Usage
//!
//! ```bash
//! trc compare --applicant DEU --counterparty ZAF --amount 6000
//! trc compare --applicant DEU --counterparty ZAF --amount 6000 --direction in --format json
//! ```
//!
//! A country missing from the rule table is an error; the comparison is
//! never run with one side absent.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use trc_core::{
    compare, ComparableSets, ComparisonInput, ComparisonOutcome, Direction, GroupOutcome, Party,
    RequirementSet,
};
use trc_rules::{
    format_currency, validate_amount, CountryCode, CurrencyConversion, CurrencyRates, RuleTable,
    ThresholdBucket, VerificationFlags,
};

use crate::{join_or_dash, to_json, OutputFormat, TableSources};

/// Compare subcommand arguments.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Applicant country code (e.g. DEU).
    #[arg(long)]
    pub applicant: String,

    /// Counterparty country code (e.g. ZAF).
    #[arg(long)]
    pub counterparty: String,

    /// Transaction amount in whole units of the applicant's currency.
    #[arg(long)]
    pub amount: String,

    /// Transaction direction relative to the applicant: `out` (applicant
    /// sends) or `in` (applicant receives).
    #[arg(long, default_value = "out")]
    pub direction: Direction,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// One party's resolved rule.
#[derive(Debug, Clone, Serialize)]
pub struct PartyView {
    /// Country code.
    pub country: String,
    /// `Sender` or `Receiver`.
    pub role: &'static str,
    /// Local currency.
    pub currency: String,
    /// Threshold in local currency.
    pub threshold: u64,
    /// Which rule block applied.
    pub bucket: ThresholdBucket,
    /// Verification flags of that block.
    pub flags: VerificationFlags,
    /// Field requirements of that block.
    pub requirements: RequirementSet,
}

/// Everything `trc compare` prints.
#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    /// Amount as entered.
    pub amount: u64,
    /// Amount in EUR, when the applicant's currency has a rate.
    pub conversion: Option<CurrencyConversion>,
    /// Transaction direction.
    pub direction: Direction,
    /// Applicant side.
    pub applicant: PartyView,
    /// Counterparty side.
    pub counterparty: PartyView,
    /// Pairings, groups, and verdict.
    pub outcome: ComparisonOutcome,
}

/// Execute the compare subcommand.
pub fn run_compare(args: &CompareArgs, sources: &TableSources) -> Result<u8> {
    let rules = sources.load_rules()?;
    let rates = sources.load_rates()?;
    let report = build_compare_report(args, &rules, &rates)?;

    match args.format {
        OutputFormat::Text => println!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", to_json(&report)?),
    }
    Ok(0)
}

/// Resolve both sides and run the comparison.
pub fn build_compare_report(
    args: &CompareArgs,
    rules: &RuleTable,
    rates: &CurrencyRates,
) -> Result<CompareReport> {
    let amount = validate_amount(&args.amount).context("invalid --amount")?;
    let applicant_code = CountryCode::new(args.applicant.as_str()).context("invalid --applicant")?;
    let counterparty_code =
        CountryCode::new(args.counterparty.as_str()).context("invalid --counterparty")?;

    let applicant = resolve_party(rules, &applicant_code, Party::Applicant, amount, args.direction)?;
    let counterparty = resolve_party(
        rules,
        &counterparty_code,
        Party::Counterparty,
        amount,
        args.direction,
    )?;

    let conversion = rates.convert_to_eur(amount, &applicant.currency);
    if conversion.is_none() {
        tracing::warn!(
            currency = %applicant.currency,
            "no EUR rate for applicant currency; skipping conversion"
        );
    }

    let outcome = compare(&ComparisonInput {
        applicant: applicant.requirements.clone(),
        counterparty: counterparty.requirements.clone(),
        direction: args.direction,
    });

    tracing::info!(
        applicant = %applicant_code,
        counterparty = %counterparty_code,
        amount,
        verdict = %outcome.report.verdict,
        "comparison complete"
    );

    Ok(CompareReport {
        amount,
        conversion,
        direction: args.direction,
        applicant,
        counterparty,
        outcome,
    })
}

fn resolve_party(
    rules: &RuleTable,
    code: &CountryCode,
    party: Party,
    amount: u64,
    direction: Direction,
) -> Result<PartyView> {
    let rule = rules
        .country_rule(code.as_str())
        .with_context(|| format!("no rule for country '{code}'"))?;
    let bucket = rule.bucket_for(amount);
    let extracted = rule.individual.block(bucket).extract();
    Ok(PartyView {
        country: code.to_string(),
        role: party.role_label(direction),
        currency: rule.currency.clone(),
        threshold: rule.threshold,
        bucket,
        flags: extracted.flags,
        requirements: extracted.requirements,
    })
}

/// Render a report as text.
pub fn render_text(report: &CompareReport) -> String {
    let mut lines = Vec::new();
    let sets = &report.outcome.sets;
    let verdict = &report.outcome.report;

    let amount = format_currency(report.amount, &report.applicant.currency);
    match &report.conversion {
        Some(c) if c.original_currency != "EUR" => lines.push(format!(
            "Amount:    {amount} (≈ {})",
            format_currency(c.eur_amount, "EUR")
        )),
        _ => lines.push(format!("Amount:    {amount}")),
    }
    lines.push(format!(
        "Direction: {} ({} {} → {} {})",
        report.direction,
        report.direction.sender(),
        party(report, report.direction.sender()).country,
        report.direction.receiver(),
        party(report, report.direction.receiver()).country,
    ));
    lines.push(format!("Verdict:   {}", verdict.verdict.description()));
    lines.push(format!("  missing: {}", join_or_dash(&verdict.missing_fields)));
    lines.push(format!("  extra:   {}", join_or_dash(&verdict.extra_fields)));

    for (view, fields, groups, side) in [
        (
            &report.applicant,
            &sets.applicant_fields,
            &sets.applicant_groups,
            Party::Applicant,
        ),
        (
            &report.counterparty,
            &sets.counterparty_fields,
            &sets.counterparty_groups,
            Party::Counterparty,
        ),
    ] {
        lines.push(String::new());
        render_party(&mut lines, view, fields, groups, sets, side);
    }

    lines.push(String::new());
    lines.push(format!("Matched applicant fields: {}", sets.total_matches));
    lines.join("\n")
}

fn party(report: &CompareReport, which: Party) -> &PartyView {
    match which {
        Party::Applicant => &report.applicant,
        Party::Counterparty => &report.counterparty,
    }
}

fn render_party(
    lines: &mut Vec<String>,
    view: &PartyView,
    fields: &[String],
    groups: &[GroupOutcome],
    sets: &ComparableSets,
    side: Party,
) {
    lines.push(format!(
        "{} {} ({}, threshold {}, {})",
        view.role,
        view.country,
        view.currency,
        format_currency(view.threshold, &view.currency),
        view.bucket,
    ));
    lines.push(format!("  flags: {}", render_flags(&view.flags)));

    for field in fields {
        let matched = match side {
            Party::Applicant => sets.matching_fields(field),
            Party::Counterparty => sets.reverse_matching_fields(field),
        };
        let mark = if matched.is_empty() { ' ' } else { '✓' };
        lines.push(format!("  {mark} {field} → {}", join_or_dash(matched)));
    }

    for group in groups {
        lines.push(format!(
            "  {} {} [{}] {} (matched: {})",
            group.key,
            group.logic,
            group.fields.join(", "),
            if group.satisfied { "satisfied" } else { "not satisfied" },
            join_or_dash(&group.matched_fields),
        ));
    }
}

fn render_flags(flags: &VerificationFlags) -> String {
    let mut set = Vec::new();
    if flags.kyc_required {
        set.push("KYC");
    }
    if flags.aml_required {
        set.push("AML");
    }
    if flags.wallet_attribution {
        set.push("wallet attribution");
    }
    if set.is_empty() {
        "none".to_string()
    } else {
        set.join(", ")
    }
}
