//! Single-field profile edits

use std::path::Path;

use anyhow::{bail, Result};

use keel_core::{InputRecord, View};

use super::open_session;

/// Valid kebab-case field names, in form order.
pub const FIELDS: &[&str] = &[
    "name",
    "age",
    "income",
    "income-frequency",
    "currency",
    "cash",
    "cash-floor",
    "credit-balance",
    "credit-target",
    "etfs",
    "crypto",
    "super",
    "property",
    "other",
    "rent",
    "utilities",
    "groceries",
    "dining",
    "transport",
    "health",
    "subscriptions",
    "personal",
    "savings",
    "expense-frequency",
    "has-equity",
    "equity-value",
    "company-valuation",
    "vesting-months",
    "months-vested",
    "next-payday",
    "pay-frequency",
];

pub fn cmd_set(data: Option<&Path>, field: &str, value: &str) -> Result<()> {
    let mut session = open_session(data);

    if session.view() != View::Dashboard {
        println!("No profile yet. Run 'keel setup' first so edits are persisted.");
        return Ok(());
    }

    let field = field.to_string();
    let value = value.to_string();
    let mut unknown = None;
    session.edit(|form| {
        if let Err(e) = apply_field(form, &field, &value) {
            unknown = Some(e);
        }
    });
    if let Some(e) = unknown {
        return Err(e);
    }

    println!("✅ {} set to {}", field, value);
    Ok(())
}

/// Apply one edit by kebab-case field name.
pub fn apply_field(form: &mut InputRecord, field: &str, value: &str) -> Result<()> {
    let value = value.to_string();
    match field {
        "name" => form.name = value,
        "age" => form.age = value,
        "income" => form.income = value,
        "income-frequency" => form.income_frequency = value,
        "currency" => form.currency = value,
        "cash" => form.cash = value,
        "cash-floor" => form.cash_floor = value,
        "credit-balance" => form.credit_balance = value,
        "credit-target" => form.credit_target = value,
        "etfs" => form.etfs = value,
        "crypto" => form.crypto = value,
        "super" => form.superannuation = value,
        "property" => form.property = value,
        "other" => form.other_assets = value,
        "rent" => form.rent = value,
        "utilities" => form.utilities = value,
        "groceries" => form.groceries = value,
        "dining" => form.dining = value,
        "transport" => form.transport = value,
        "health" => form.health = value,
        "subscriptions" => form.subscriptions = value,
        "personal" => form.personal = value,
        "savings" => form.savings = value,
        "expense-frequency" => form.expense_frequency = value,
        "has-equity" => {
            form.has_equity = matches!(value.trim().to_lowercase().as_str(), "true" | "y" | "yes")
        }
        "equity-value" => form.equity_value = value,
        "company-valuation" => form.company_valuation = value,
        "vesting-months" => form.vesting_months = value,
        "months-vested" => form.months_vested = value,
        "next-payday" => form.next_payday = value,
        "pay-frequency" => form.pay_frequency = value,
        _ => bail!("Unknown field '{}'. Valid fields: {}", field, FIELDS.join(", ")),
    }
    Ok(())
}
