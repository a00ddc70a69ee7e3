//! Prompt rendering for the analysis request
//!
//! The prompt template is embedded at compile time and rendered with
//! simple `{{var}}` substitution. It has a `# System` section and a
//! `# User` section; the user section carries the derived metrics and a
//! subset of the form.

use std::collections::HashMap;

use crate::metrics::DerivedMetrics;
use crate::models::InputRecord;

/// Embedded analysis prompt (workspace `prompts/` directory).
const ANALYSIS_TEMPLATE: &str = include_str!("../../../../prompts/analysis.md");

/// A rendered prompt ready to send to the provider.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

/// Render the analysis prompt for the current form and metrics.
pub fn render(form: &InputRecord, metrics: &DerivedMetrics) -> RenderedPrompt {
    let currency = if form.currency.trim().is_empty() {
        "USD".to_string()
    } else {
        form.currency.trim().to_string()
    };

    let status = |ok: bool| if ok { "ok" } else { "needs attention" };
    let projection_final = metrics
        .projection
        .last()
        .map(|p| format!("{:.0}", p.value))
        .unwrap_or_else(|| "0".to_string());

    let mut vars: HashMap<&'static str, String> = HashMap::new();
    vars.insert("name", form.name.trim().to_string());
    vars.insert("age", form.age.trim().to_string());
    vars.insert("currency", currency);
    vars.insert("monthly_income", format!("{:.2}", metrics.monthly_income));
    vars.insert("monthly_expenses", format!("{:.2}", metrics.monthly_expenses));
    vars.insert("expense_frequency", form.expense_frequency.trim().to_string());
    vars.insert("surplus", format!("{:.2}", metrics.surplus));
    vars.insert("savings_rate", format!("{:.1}", metrics.savings_rate));
    vars.insert("rate_status", status(metrics.rate_ok).to_string());
    vars.insert("cash", form.cash.trim().to_string());
    vars.insert("cash_floor", form.cash_floor.trim().to_string());
    vars.insert("cash_status", status(metrics.cash_ok).to_string());
    vars.insert("credit_balance", form.credit_balance.trim().to_string());
    vars.insert("credit_target", form.credit_target.trim().to_string());
    vars.insert("credit_status", status(metrics.credit_ok).to_string());
    vars.insert("net_worth", format!("{:.2}", metrics.net_worth));
    vars.insert("liquid_total", format!("{:.2}", metrics.liquid_total));
    vars.insert("illiquid_total", format!("{:.2}", metrics.illiquid_total));
    vars.insert("vested_equity", format!("{:.2}", metrics.vested_equity));
    vars.insert("projection_final", projection_final);

    let mut rendered = ANALYSIS_TEMPLATE.to_string();
    for (key, value) in &vars {
        rendered = rendered.replace(&format!("{{{{{}}}}}", key), value);
    }

    RenderedPrompt {
        system: extract_section(&rendered, "# System").unwrap_or_default(),
        user: extract_section(&rendered, "# User").unwrap_or_else(|| rendered.clone()),
    }
}

/// Pull the body of a `# Heading` section, up to the next top-level
/// heading.
fn extract_section(content: &str, heading: &str) -> Option<String> {
    let start = content.find(heading)? + heading.len();
    let rest = &content[start..];
    let end = rest.find("\n# ").unwrap_or(rest.len());
    let body = rest[..end].trim();
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}
