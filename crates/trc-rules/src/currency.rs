//! # Currency Conversion
//!
//! Fixed-rate conversion from local currency to EUR for display. Rates are
//! a static table (units of EUR per unit of local currency); there is no
//! live pricing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::amount::format_amount;
use crate::error::RulesResult;

const BUILTIN_RATES: &str = include_str!("../data/currency_rates.json");

/// The result of converting an amount to EUR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConversion {
    /// Amount in local currency.
    pub original_amount: u64,
    /// Local currency code.
    pub original_currency: String,
    /// Amount in EUR, rounded to a whole unit.
    pub eur_amount: u64,
    /// EUR per unit of local currency.
    pub exchange_rate: f64,
}

/// Currency code → EUR rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyRates {
    rates: BTreeMap<String, f64>,
}

impl CurrencyRates {
    /// Build a rate table from parsed rates.
    pub fn new(rates: BTreeMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Parse a JSON object of `code: rate`.
    pub fn from_json_str(s: &str) -> RulesResult<Self> {
        let rates: Self = serde_json::from_str(s)?;
        tracing::info!(currencies = rates.rates.len(), "loaded currency rates");
        Ok(rates)
    }

    /// Load a JSON rate table from disk.
    pub fn load(path: &Path) -> RulesResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The compiled-in rate table.
    pub fn builtin() -> RulesResult<Self> {
        Self::from_json_str(BUILTIN_RATES)
    }

    /// EUR rate for a currency.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// True if the currency has a rate.
    pub fn is_supported(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// All currency codes with a rate, sorted.
    pub fn supported_currencies(&self) -> Vec<&str> {
        self.rates.keys().map(String::as_str).collect()
    }

    /// Convert an amount to EUR, rounding to the nearest whole unit.
    pub fn convert_to_eur(&self, amount: u64, code: &str) -> Option<CurrencyConversion> {
        let rate = self.rate(code)?;
        Some(CurrencyConversion {
            original_amount: amount,
            original_currency: code.to_string(),
            eur_amount: (amount as f64 * rate).round() as u64,
            exchange_rate: rate,
        })
    }

    /// `"<local> = <eur>"`, e.g. `"R5,000 = €250.00"`.
    pub fn conversion_summary(&self, amount: u64, code: &str) -> Option<String> {
        let conversion = self.convert_to_eur(amount, code)?;
        Some(format!(
            "{} = {}",
            format_currency(amount, code),
            format_currency(conversion.eur_amount, "EUR")
        ))
    }
}

/// Display symbol for a currency; the code itself when unknown.
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "EUR" => "€",
        "ZAR" => "R",
        "USD" => "$",
        "GBP" => "£",
        other => other,
    }
}

/// Format a whole-unit amount: EUR with two decimals, others as integers.
pub fn format_currency(amount: u64, code: &str) -> String {
    let symbol = currency_symbol(code);
    let grouped = format_amount(amount);
    if code == "EUR" {
        format!("{symbol}{grouped}.00")
    } else if symbol == code {
        format!("{code} {grouped}")
    } else {
        format!("{symbol}{grouped}")
    }
}
