//! Financial model: derived metrics over an [`InputRecord`]
//!
//! Pure and total: every field is coerced independently (unparsable or
//! empty values become zero), every division is guarded, and no input can
//! make computation fail. Recomputed on every read; nothing here is
//! persisted.

use serde::Serialize;

use crate::models::{ExpenseFrequency, IncomeFrequency, InputRecord};

/// Nominal annual growth assumed for the projection.
pub const DEFAULT_ANNUAL_GROWTH: f64 = 0.07;
/// Share of a positive surplus assumed to be invested each month.
pub const DEFAULT_CONTRIBUTION_CAPTURE: f64 = 0.8;
/// Savings rate (percent) considered healthy.
pub const DEFAULT_TARGET_SAVINGS_RATE: f64 = 20.0;
/// Final year of the projection series (years 0..=5 inclusive).
pub const PROJECTION_YEARS: u32 = 5;

/// Policy constants for the model. These were hard-coded in the original
/// product; they are overridable here but the defaults are the product
/// choice.
#[derive(Debug, Clone, Copy)]
pub struct ModelConfig {
    pub annual_growth: f64,
    pub contribution_capture: f64,
    pub target_savings_rate: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            annual_growth: DEFAULT_ANNUAL_GROWTH,
            contribution_capture: DEFAULT_CONTRIBUTION_CAPTURE,
            target_savings_rate: DEFAULT_TARGET_SAVINGS_RATE,
        }
    }
}

/// Coerce a form field to a number. Empty, unparsable, or non-finite
/// input becomes zero. Applied per field; a bad field never rejects the
/// rest of the record.
pub fn coerce(field: &str) -> f64 {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// One point of the future-value projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub year: u32,
    /// Rounded to the nearest whole currency unit for display.
    pub value: f64,
}

/// Everything the dashboard derives from the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    /// May be negative.
    pub surplus: f64,
    /// Percent of monthly income; exactly zero when income is zero.
    pub savings_rate: f64,
    pub liquid_total: f64,
    pub illiquid_total: f64,
    pub net_worth: f64,
    pub vested_equity: f64,
    pub cash_ok: bool,
    pub credit_ok: bool,
    pub rate_ok: bool,
    pub projection: Vec<ProjectionPoint>,
}

impl DerivedMetrics {
    /// Compute all derived metrics. Pure, synchronous, deterministic.
    pub fn compute(record: &InputRecord, config: &ModelConfig) -> Self {
        let income = coerce(&record.income);
        let monthly_income = match IncomeFrequency::parse(&record.income_frequency) {
            IncomeFrequency::Annual => income / 12.0,
            IncomeFrequency::Fortnightly => income * 26.0 / 12.0,
            IncomeFrequency::Monthly => income,
        };

        let category_total: f64 = record.expense_amounts().iter().map(|f| coerce(f)).sum();
        let monthly_expenses =
            category_total * ExpenseFrequency::parse(&record.expense_frequency).monthly_factor();

        let surplus = monthly_income - monthly_expenses;
        let savings_rate = if monthly_income > 0.0 {
            surplus / monthly_income * 100.0
        } else {
            0.0
        };

        let cash = coerce(&record.cash);
        let etfs = coerce(&record.etfs);
        let crypto = coerce(&record.crypto);
        let liquid_total = cash + etfs + crypto;
        let illiquid_total = coerce(&record.superannuation)
            + coerce(&record.property)
            + coerce(&record.other_assets);
        let credit_balance = coerce(&record.credit_balance);
        let net_worth = liquid_total + illiquid_total - credit_balance;

        let vesting_months = coerce(&record.vesting_months);
        let vested_equity = if vesting_months > 0.0 {
            coerce(&record.equity_value) * (coerce(&record.months_vested) / vesting_months)
        } else {
            0.0
        };

        // "No data = no alarm": an unset (zero) threshold never flags.
        let cash_floor = coerce(&record.cash_floor);
        let cash_ok = cash_floor == 0.0 || cash >= cash_floor;
        let credit_target = coerce(&record.credit_target);
        let credit_ok = credit_target == 0.0 || credit_balance <= credit_target;
        let rate_ok = savings_rate >= config.target_savings_rate;

        let projection = project(etfs + crypto, surplus, config);

        Self {
            monthly_income,
            monthly_expenses,
            surplus,
            savings_rate,
            liquid_total,
            illiquid_total,
            net_worth,
            vested_equity,
            cash_ok,
            credit_ok,
            rate_ok,
            projection,
        }
    }
}

/// Future value of the invested assets at years 0..=5: lump sum growing
/// at the nominal monthly rate plus a monthly annuity of the captured
/// surplus. A negative surplus contributes nothing, never withdraws.
fn project(principal: f64, surplus: f64, config: &ModelConfig) -> Vec<ProjectionPoint> {
    let r = config.annual_growth / 12.0;
    let contribution = surplus.max(0.0) * config.contribution_capture;

    (0..=PROJECTION_YEARS)
        .map(|year| {
            let growth = (1.0 + r).powi((year * 12) as i32);
            let value = principal * growth + contribution * ((growth - 1.0) / r);
            ProjectionPoint {
                year,
                value: value.round(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> InputRecord {
        InputRecord::default()
    }

    #[test]
    fn test_coerce_substitutes_zero() {
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce("   "), 0.0);
        assert_eq!(coerce("abc"), 0.0);
        assert_eq!(coerce("NaN"), 0.0);
        assert_eq!(coerce(" 1500.50 "), 1500.50);
        assert_eq!(coerce("-200"), -200.0);
    }

    #[test]
    fn test_monthly_income_annual() {
        let mut r = record();
        r.income = "140000".to_string();
        r.income_frequency = "annual".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert!((m.monthly_income - 11666.666_666_666_666).abs() < 1e-6);
    }

    #[test]
    fn test_monthly_income_frequency_consistent() {
        // annual/12 equals the monthly figure for an equivalent monthly record
        let mut annual = record();
        annual.income = "120000".to_string();
        annual.income_frequency = "annual".to_string();

        let mut monthly = record();
        monthly.income = "10000".to_string();
        monthly.income_frequency = "monthly".to_string();

        let config = ModelConfig::default();
        let a = DerivedMetrics::compute(&annual, &config);
        let m = DerivedMetrics::compute(&monthly, &config);
        assert!((a.monthly_income - m.monthly_income).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_income_fortnightly() {
        let mut r = record();
        r.income = "3000".to_string();
        r.income_frequency = "fortnightly".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert!((m.monthly_income - 3000.0 * 26.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrecognized_income_frequency_is_monthly() {
        let mut r = record();
        r.income = "5000".to_string();
        r.income_frequency = "hourly".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert_eq!(m.monthly_income, 5000.0);
    }

    #[test]
    fn test_monthly_expenses_weekly_factor() {
        let mut r = record();
        r.rent = "1000".to_string();
        r.groceries = "2000".to_string();
        r.dining = "1000".to_string();
        r.expense_frequency = "weekly".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        // 4000 * 4.33 exactly
        assert!((m.monthly_expenses - 17320.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_expenses_sums_all_nine() {
        let mut r = record();
        for field in [
            &mut r.rent,
            &mut r.utilities,
            &mut r.groceries,
            &mut r.dining,
            &mut r.transport,
            &mut r.health,
            &mut r.subscriptions,
            &mut r.personal,
            &mut r.savings,
        ] {
            *field = "100".to_string();
        }
        r.expense_frequency = "fortnightly".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert!((m.monthly_expenses - 900.0 * 2.17).abs() < 1e-9);
    }

    #[test]
    fn test_savings_rate_zero_income() {
        let mut r = record();
        r.rent = "2000".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert_eq!(m.savings_rate, 0.0);
        assert!(m.surplus < 0.0);
    }

    #[test]
    fn test_net_worth_breakdown() {
        let mut r = record();
        r.cash = "15000".to_string();
        r.etfs = "30000".to_string();
        r.crypto = "5000".to_string();
        r.superannuation = "80000".to_string();
        r.property = "100000".to_string();
        r.other_assets = "2000".to_string();
        r.credit_balance = "2500".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert_eq!(m.liquid_total, 50000.0);
        assert_eq!(m.illiquid_total, 182000.0);
        assert_eq!(m.net_worth, 229500.0);
    }

    #[test]
    fn test_status_checks_default_ok_when_unset() {
        let mut r = record();
        r.cash = "50".to_string();
        r.credit_balance = "99999".to_string();
        // Thresholds unset: both ok regardless of balances
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert!(m.cash_ok);
        assert!(m.credit_ok);
    }

    #[test]
    fn test_status_checks_with_thresholds() {
        let mut r = record();
        r.cash = "15000".to_string();
        r.cash_floor = "7000".to_string();
        r.credit_balance = "2500".to_string();
        r.credit_target = "2200".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert!(m.cash_ok);
        assert!(!m.credit_ok);
    }

    #[test]
    fn test_rate_ok_threshold() {
        let mut r = record();
        r.income = "10000".to_string();
        r.income_frequency = "monthly".to_string();
        r.rent = "7500".to_string();
        r.expense_frequency = "monthly".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert!((m.savings_rate - 25.0).abs() < 1e-9);
        assert!(m.rate_ok);

        r.rent = "8100".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert!(!m.rate_ok);
    }

    #[test]
    fn test_vested_equity_zero_denominator() {
        let mut r = record();
        r.has_equity = true;
        r.equity_value = "100000".to_string();
        r.vesting_months = "0".to_string();
        r.months_vested = "12".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert_eq!(m.vested_equity, 0.0);
    }

    #[test]
    fn test_vested_equity_linear() {
        let mut r = record();
        r.has_equity = true;
        r.equity_value = "48000".to_string();
        r.vesting_months = "48".to_string();
        r.months_vested = "12".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert_eq!(m.vested_equity, 12000.0);
    }

    #[test]
    fn test_projection_starts_at_principal() {
        let mut r = record();
        r.etfs = "10000".to_string();
        r.crypto = "2000".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        assert_eq!(m.projection.len(), 6);
        assert_eq!(m.projection[0].year, 0);
        assert_eq!(m.projection[0].value, 12000.0);
    }

    #[test]
    fn test_projection_monotonic_with_nonnegative_surplus() {
        let mut r = record();
        r.income = "8000".to_string();
        r.income_frequency = "monthly".to_string();
        r.rent = "3000".to_string();
        r.expense_frequency = "monthly".to_string();
        r.etfs = "20000".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        for pair in m.projection.windows(2) {
            assert!(pair[1].value >= pair[0].value);
        }
    }

    #[test]
    fn test_projection_negative_surplus_never_withdraws() {
        let mut r = record();
        r.rent = "5000".to_string();
        r.expense_frequency = "monthly".to_string();
        r.etfs = "10000".to_string();
        let m = DerivedMetrics::compute(&r, &ModelConfig::default());
        // No contribution: pure lump-sum growth, still non-decreasing
        for pair in m.projection.windows(2) {
            assert!(pair[1].value >= pair[0].value);
        }
        assert_eq!(m.projection[0].value, 10000.0);
    }

    #[test]
    fn test_projection_annuity_formula() {
        let mut r = record();
        r.income = "5000".to_string();
        r.income_frequency = "monthly".to_string();
        r.etfs = "10000".to_string();
        let config = ModelConfig::default();
        let m = DerivedMetrics::compute(&r, &config);

        let rate = config.annual_growth / 12.0;
        let growth = (1.0 + rate).powi(12);
        let contribution = 5000.0 * config.contribution_capture;
        let expected = (10000.0 * growth + contribution * ((growth - 1.0) / rate)).round();
        assert_eq!(m.projection[1].value, expected);
    }

    #[test]
    fn test_degenerate_record_is_total() {
        // An all-empty record still produces a result
        let m = DerivedMetrics::compute(&record(), &ModelConfig::default());
        assert_eq!(m.monthly_income, 0.0);
        assert_eq!(m.net_worth, 0.0);
        assert_eq!(m.savings_rate, 0.0);
        assert!(m.cash_ok);
        assert!(m.credit_ok);
        assert!(!m.rate_ok);
        assert_eq!(m.projection.len(), 6);
        assert!(m.projection.iter().all(|p| p.value == 0.0));
    }
}
