//! Dashboard rendering

use std::path::Path;

use anyhow::Result;

use keel_core::{AnalysisResult, InsightKind, View};

use super::{fmt_money, open_session};

pub fn cmd_dashboard(data: Option<&Path>) -> Result<()> {
    let session = open_session(data);

    if session.view() != View::Dashboard {
        println!("No profile yet. Run 'keel setup' to get started.");
        return Ok(());
    }

    let form = session.form();
    let metrics = session.metrics();
    let currency = if form.currency.trim().is_empty() {
        "USD"
    } else {
        form.currency.trim()
    };

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│            ⚓ Keel Dashboard             │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {} · amounts in {}", form.name, currency);
    if let Some(days) = form.days_until_payday() {
        if days >= 0 {
            println!("  Next payday in {} day{}", days, if days == 1 { "" } else { "s" });
        }
    }
    println!();
    println!("  Monthly income:    {}", fmt_money(metrics.monthly_income));
    println!("  Monthly expenses:  {}", fmt_money(metrics.monthly_expenses));
    println!("  Surplus:           {}", fmt_money(metrics.surplus));
    println!(
        "  {} Savings rate:    {:.1}% (target 20%)",
        ok_icon(metrics.rate_ok),
        metrics.savings_rate
    );
    println!();
    println!(
        "  {} Cash:            {} (floor {})",
        ok_icon(metrics.cash_ok),
        fmt_money(keel_core::coerce(&form.cash)),
        fmt_money(keel_core::coerce(&form.cash_floor))
    );
    println!(
        "  {} Credit:          {} (target {})",
        ok_icon(metrics.credit_ok),
        fmt_money(keel_core::coerce(&form.credit_balance)),
        fmt_money(keel_core::coerce(&form.credit_target))
    );
    println!();
    println!("  💰 Net worth:       {}", fmt_money(metrics.net_worth));
    println!("     Liquid:          {}", fmt_money(metrics.liquid_total));
    println!("     Illiquid:        {}", fmt_money(metrics.illiquid_total));
    if form.has_equity {
        println!("     Vested equity:   {}", fmt_money(metrics.vested_equity));
    }
    println!();
    println!("  📈 Projection (7% nominal, 80% of surplus invested)");
    for point in &metrics.projection {
        println!("     Year {}:  {}", point.year, fmt_money(point.value));
    }

    if let Some(analysis) = session.analysis() {
        println!();
        render_analysis(analysis);
    } else {
        println!();
        println!("  Run 'keel analyze' for AI commentary on these numbers.");
    }

    Ok(())
}

pub fn render_analysis(analysis: &AnalysisResult) {
    println!("  🧭 {}", analysis.headline);
    println!();
    for insight in &analysis.insights {
        println!("  {} {}", kind_icon(insight.kind), insight.title);
        println!("     {}", insight.body);
    }
    println!();
    println!("  One move: {}", analysis.one_move);
}

fn ok_icon(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "⚠️ "
    }
}

fn kind_icon(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Celebrate => "🎉",
        InsightKind::Warning => "⚠️ ",
        InsightKind::Opportunity => "💡",
    }
}
