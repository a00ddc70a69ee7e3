//! Analysis trigger: request AI commentary from the configured provider

use std::path::Path;

use anyhow::Result;

use keel_core::{AnalysisBackend, AnalysisClient, AnalysisFailure, View};

use super::{dashboard::render_analysis, open_session};

pub async fn cmd_analyze(data: Option<&Path>, model: Option<&str>) -> Result<()> {
    let mut session = open_session(data);

    if session.view() != View::Dashboard {
        println!("No profile yet. Run 'keel setup' before requesting analysis.");
        return Ok(());
    }

    let Some(mut client) = AnalysisClient::from_env() else {
        println!("No analysis provider configured.");
        println!("  Set KEEL_ANALYSIS_HOST (and optionally KEEL_ANALYSIS_MODEL,");
        println!("  KEEL_ANALYSIS_KEY) to enable commentary.");
        return Ok(());
    };
    if let Some(model) = model {
        client = client.with_model(model);
    }

    if !client.health_check().await {
        println!("⚠️  {} is not responding; trying anyway...", client.host());
    }

    println!("🧭 Asking {} for commentary...", client.model());
    println!();

    // Failures are not errors here: the fallback commentary is merged and
    // rendered the same way.
    match session.request_analysis(&client).await? {
        None => {}
        Some(AnalysisFailure::Transport(reason)) => {
            println!("⚠️  Provider unreachable ({})", reason);
            println!();
        }
        Some(AnalysisFailure::MalformedPayload(reason)) => {
            println!("⚠️  Provider response did not parse ({})", reason);
            println!();
        }
    }

    if let Some(analysis) = session.analysis() {
        render_analysis(analysis);
    }

    Ok(())
}
