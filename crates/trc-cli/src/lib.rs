//! # trc-cli — Travel Rule Calculator CLI
//!
//! Provides the `trc` command-line interface over `trc-core` and
//! `trc-rules`.
//!
//! ## Subcommands
//!
//! - `trc compare` — Compare two countries' requirements for an amount.
//! - `trc normalize` — Show how raw field names normalize.
//! - `trc match` — Check whether two raw field names match.
//! - `trc countries` — List the countries in the rule table.
//!
//! ```bash
//! trc compare --applicant DEU --counterparty ZAF --amount 6000
//! trc --rules rules.yaml compare --applicant CHE --counterparty DEU --amount 900 --format json
//! trc normalize passportNumber "dateOfBirth + placeOfBirth"
//! trc match "date_of_birth + birthplace" dateOfBirth
//! ```

pub mod compare;
pub mod countries;
pub mod inspect;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use trc_rules::{CurrencyRates, RuleTable};

/// Output format shared by every subcommand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Where the rule and rate tables come from. `None` selects the
/// compiled-in table.
#[derive(Debug, Clone, Default)]
pub struct TableSources {
    /// Rule table path (`.json`, `.yaml`, `.yml`).
    pub rules: Option<PathBuf>,
    /// Rate table path (JSON).
    pub rates: Option<PathBuf>,
}

impl TableSources {
    /// Load the rule table.
    pub fn load_rules(&self) -> Result<RuleTable> {
        match &self.rules {
            Some(path) => RuleTable::load(path)
                .with_context(|| format!("failed to load rule table: {}", path.display())),
            None => RuleTable::builtin().context("failed to parse builtin rule table"),
        }
    }

    /// Load the rate table.
    pub fn load_rates(&self) -> Result<CurrencyRates> {
        match &self.rates {
            Some(path) => CurrencyRates::load(path)
                .with_context(|| format!("failed to load rate table: {}", path.display())),
            None => CurrencyRates::builtin().context("failed to parse builtin rate table"),
        }
    }
}

/// Serialize a value as pretty JSON.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

/// Join a list for display, `-` when empty.
pub(crate) fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
