//! Data model for the Keel dashboard
//!
//! The only persisted entity is the [`InputRecord`]: the raw form as the
//! user entered it. Every numeric field is kept as a string and coerced to
//! a number by the financial model, so a half-filled or garbled form still
//! produces a (degenerate) dashboard instead of an error.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often income arrives, as entered on the profile.
///
/// Parsing is lenient: anything unrecognized behaves as monthly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeFrequency {
    Annual,
    Monthly,
    Fortnightly,
}

impl IncomeFrequency {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "annual" => IncomeFrequency::Annual,
            "fortnightly" => IncomeFrequency::Fortnightly,
            _ => IncomeFrequency::Monthly,
        }
    }
}

/// How often the expense amounts recur. Applied uniformly to all nine
/// expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseFrequency {
    Weekly,
    Fortnightly,
    Monthly,
}

impl ExpenseFrequency {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "weekly" => ExpenseFrequency::Weekly,
            "fortnightly" => ExpenseFrequency::Fortnightly,
            _ => ExpenseFrequency::Monthly,
        }
    }

    /// Periods per month. Fixed design constants, not derived from
    /// calendar data.
    pub fn monthly_factor(&self) -> f64 {
        match self {
            ExpenseFrequency::Weekly => 4.33,
            ExpenseFrequency::Fortnightly => 2.17,
            ExpenseFrequency::Monthly => 1.0,
        }
    }
}

/// The user's form, exactly as entered.
///
/// Field names on the wire stay camelCase so a previously persisted
/// snapshot from the original client round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputRecord {
    // Identity / income
    pub name: String,
    pub age: String,
    pub income: String,
    pub income_frequency: String,
    pub currency: String,

    // Cash & credit
    pub cash: String,
    pub cash_floor: String,
    pub credit_balance: String,
    pub credit_target: String,

    // Assets. Everything but super/property/other is treated as liquid.
    pub etfs: String,
    pub crypto: String,
    #[serde(rename = "super")]
    pub superannuation: String,
    pub property: String,
    #[serde(rename = "other")]
    pub other_assets: String,

    // Expenses (nine categories, one shared frequency)
    pub rent: String,
    pub utilities: String,
    pub groceries: String,
    pub dining: String,
    pub transport: String,
    pub health: String,
    pub subscriptions: String,
    pub personal: String,
    pub savings: String,
    pub expense_frequency: String,

    // Equity grant (optional)
    pub has_equity: bool,
    pub equity_value: String,
    pub company_valuation: String,
    pub vesting_months: String,
    pub months_vested: String,

    // Pay schedule (informational only)
    pub next_payday: String,
    pub pay_frequency: String,
}

impl InputRecord {
    /// The nine expense category amounts, in display order.
    pub fn expense_amounts(&self) -> [&str; 9] {
        [
            &self.rent,
            &self.utilities,
            &self.groceries,
            &self.dining,
            &self.transport,
            &self.health,
            &self.subscriptions,
            &self.personal,
            &self.savings,
        ]
    }

    /// A record counts as a profile once it has a name. This is the
    /// restored-session shortcut check.
    pub fn has_profile(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Days until the next payday, when `nextPayday` parses as
    /// YYYY-MM-DD. Informational only; never feeds the financial model.
    pub fn days_until_payday(&self) -> Option<i64> {
        let payday = NaiveDate::parse_from_str(self.next_payday.trim(), "%Y-%m-%d").ok()?;
        Some((payday - Local::now().date_naive()).num_days())
    }
}

/// Tone of a single commentary insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Celebrate,
    Warning,
    Opportunity,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Celebrate => "celebrate",
            InsightKind::Warning => "warning",
            InsightKind::Opportunity => "opportunity",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One commentary item from the analysis provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub body: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
}

/// Natural-language commentary returned by the analysis provider.
///
/// Ephemeral until obtained, then persisted alongside the form. Cleared
/// only by a full reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub headline: String,
    pub insights: Vec<Insight>,
    pub one_move: String,
}

impl AnalysisResult {
    /// The fixed fallback shown when the provider is unreachable or
    /// returns something unparsable. Never an error from the user's
    /// perspective.
    pub fn unavailable() -> Self {
        Self {
            headline: "Analysis unavailable".to_string(),
            insights: vec![Insight {
                title: "Could not reach the analysis service".to_string(),
                body: "Your numbers are still computed locally. Try the analysis again later."
                    .to_string(),
                kind: InsightKind::Warning,
            }],
            one_move: "Keep tracking; retry the analysis when you're back online.".to_string(),
        }
    }
}

/// The single persisted slot: the form plus whatever commentary has been
/// obtained so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub form: InputRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
}
