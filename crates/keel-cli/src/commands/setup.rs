//! Setup wizard: the linear landing -> philosophy -> setup -> dashboard flow

use std::path::Path;

use anyhow::Result;

use keel_core::{View, ViewEvent};

use super::{cmd_dashboard, open_session, prompt_field};

pub fn cmd_setup(data: Option<&Path>) -> Result<()> {
    let mut session = open_session(data);

    if session.view() == View::Dashboard {
        // Editing an existing profile skips the landing/philosophy screens
        session.apply(ViewEvent::Edit);
    } else {
        println!();
        println!("╭─────────────────────────────────────────╮");
        println!("│              ⚓ Keel                     │");
        println!("╰─────────────────────────────────────────╯");
        println!();
        println!("  A dashboard for your whole financial picture.");
        println!("  Enter your numbers once; everything else is derived.");
        session.apply(ViewEvent::Advance);

        println!();
        println!("  The philosophy:");
        println!("   · Keep a cash floor you never dip under.");
        println!("   · Keep credit below a target you choose.");
        println!("   · Save at least 20% of what you earn.");
        println!("   · Let the rest compound.");
        session.apply(ViewEvent::Advance);
    }

    println!();
    println!("📝 Profile (press Enter to keep the current value)");
    println!("   ─────────────────────────────────────────────────────────────");

    let mut updated = session.form().clone();

    updated.name = prompt_field("Name", &updated.name)?;
    updated.age = prompt_field("Age", &updated.age)?;
    updated.currency = prompt_field("Currency code", &updated.currency)?;
    updated.income = prompt_field("Income amount", &updated.income)?;
    updated.income_frequency =
        prompt_field("Income frequency (annual/monthly/fortnightly)", &updated.income_frequency)?;

    println!();
    println!("  Cash & credit");
    updated.cash = prompt_field("Cash balance", &updated.cash)?;
    updated.cash_floor = prompt_field("Cash floor (buffer target)", &updated.cash_floor)?;
    updated.credit_balance = prompt_field("Credit balance", &updated.credit_balance)?;
    updated.credit_target = prompt_field("Credit target (ceiling)", &updated.credit_target)?;

    println!();
    println!("  Assets");
    updated.etfs = prompt_field("ETFs", &updated.etfs)?;
    updated.crypto = prompt_field("Crypto", &updated.crypto)?;
    updated.superannuation = prompt_field("Super / retirement", &updated.superannuation)?;
    updated.property = prompt_field("Property equity", &updated.property)?;
    updated.other_assets = prompt_field("Other assets", &updated.other_assets)?;

    println!();
    println!("  Expenses");
    updated.expense_frequency = prompt_field(
        "Expense frequency (weekly/fortnightly/monthly)",
        &updated.expense_frequency,
    )?;
    updated.rent = prompt_field("Rent / mortgage", &updated.rent)?;
    updated.utilities = prompt_field("Utilities", &updated.utilities)?;
    updated.groceries = prompt_field("Groceries", &updated.groceries)?;
    updated.dining = prompt_field("Dining out", &updated.dining)?;
    updated.transport = prompt_field("Transport", &updated.transport)?;
    updated.health = prompt_field("Health", &updated.health)?;
    updated.subscriptions = prompt_field("Subscriptions", &updated.subscriptions)?;
    updated.personal = prompt_field("Personal", &updated.personal)?;
    updated.savings = prompt_field("Savings / investing", &updated.savings)?;

    println!();
    println!("  Equity grant (optional)");
    let has_equity = prompt_field(
        "Do you have an equity grant? (y/N)",
        if updated.has_equity { "y" } else { "" },
    )?;
    updated.has_equity = has_equity.trim().eq_ignore_ascii_case("y");
    if updated.has_equity {
        updated.equity_value = prompt_field("Total equity value", &updated.equity_value)?;
        updated.company_valuation =
            prompt_field("Company valuation", &updated.company_valuation)?;
        updated.vesting_months = prompt_field("Vesting period (months)", &updated.vesting_months)?;
        updated.months_vested = prompt_field("Months vested so far", &updated.months_vested)?;
    }

    println!();
    println!("  Pay schedule");
    updated.next_payday = prompt_field("Next payday (YYYY-MM-DD)", &updated.next_payday)?;
    updated.pay_frequency =
        prompt_field("Pay frequency (weekly/fortnightly/monthly)", &updated.pay_frequency)?;

    session.edit(|form| *form = updated);
    session.apply(ViewEvent::Advance);

    println!();
    println!("✅ Profile saved.");
    cmd_dashboard(data)
}
