//! # Countries CLI — List the rule table.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use trc_core::RequirementSet;
use trc_rules::{format_currency, CurrencyRates, RuleTable};

use crate::{to_json, OutputFormat, TableSources};

/// Countries subcommand arguments.
#[derive(Args, Debug)]
pub struct CountriesArgs {
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// One row of `trc countries`.
#[derive(Debug, Clone, Serialize)]
pub struct CountrySummary {
    pub country: String,
    pub currency: String,
    pub threshold: u64,
    /// Threshold in EUR, when the currency has a rate.
    pub threshold_eur: Option<u64>,
    /// `fields` or `groups` for each bucket.
    pub below_threshold: &'static str,
    pub above_threshold: &'static str,
}

/// Execute the countries subcommand.
pub fn run_countries(args: &CountriesArgs, sources: &TableSources) -> Result<u8> {
    let rules = sources.load_rules()?;
    let rates = sources.load_rates()?;
    let rows = summarize(&rules, &rates);

    match args.format {
        OutputFormat::Text => {
            println!("Supported countries:");
            println!();
            for row in &rows {
                let eur = row
                    .threshold_eur
                    .map(|eur| format!(" (≈ {})", format_currency(eur, "EUR")))
                    .unwrap_or_default();
                println!(
                    "  {:<4} {:<4} threshold {}{eur}  below: {}, above: {}",
                    row.country,
                    row.currency,
                    format_currency(row.threshold, &row.currency),
                    row.below_threshold,
                    row.above_threshold,
                );
            }
            println!();
            println!("Total: {} countries", rows.len());
        }
        OutputFormat::Json => println!("{}", to_json(&rows)?),
    }
    Ok(0)
}

pub fn summarize(rules: &RuleTable, rates: &CurrencyRates) -> Vec<CountrySummary> {
    rules
        .iter()
        .map(|(code, rule)| {
            let below = rule.individual.below_threshold.extract();
            let above = rule.individual.above_threshold.extract();
            CountrySummary {
                country: code.to_string(),
                currency: rule.currency.clone(),
                threshold: rule.threshold,
                threshold_eur: rates
                    .convert_to_eur(rule.threshold, &rule.currency)
                    .map(|c| c.eur_amount),
                below_threshold: shape(&below.requirements),
                above_threshold: shape(&above.requirements),
            }
        })
        .collect()
}

fn shape(set: &RequirementSet) -> &'static str {
    match set {
        RequirementSet::Fields(_) => "fields",
        RequirementSet::Groups(_) => "groups",
        RequirementSet::Mixed { .. } => "mixed",
    }
}
