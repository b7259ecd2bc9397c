//! # trc-rules — Travel Rule Requirement Tables
//!
//! Supplies the comparison engine in `trc-core` with its inputs:
//!
//! - **Table** (`table.rs`): per-country rules. Each country has a local
//!   currency, a threshold, and an `individual` branch holding one rule
//!   block below the threshold and one at or above it. A block is either a
//!   plain `required_fields` list or a list of `requirement_groups`, plus
//!   three verification flags.
//! - **Currency** (`currency.rs`): fixed-rate conversion of local amounts to
//!   EUR and currency formatting.
//! - **Amount** (`amount.rs`): digit-only amount validation and thousands
//!   formatting.
//!
//! Tables are data: JSON or YAML files, with compiled-in defaults under
//! `data/`. A country absent from the table yields `None`; callers must not
//! compare until both parties resolve.

pub mod amount;
pub mod currency;
pub mod error;
pub mod table;

pub use amount::{format_amount, validate_amount};
pub use currency::{currency_symbol, format_currency, CurrencyConversion, CurrencyRates};
pub use error::{RulesError, RulesResult};
pub use table::{
    AllRequirements, CountryCode, CountryRule, ExtractedRequirements, IndividualBranch,
    RuleBlock, RuleRequirements, RuleTable, ThresholdBucket, VerificationFlags,
};
