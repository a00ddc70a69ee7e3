//! Session admin: status display and full reset

use std::path::Path;

use anyhow::Result;

use keel_core::{SnapshotStore, ViewEvent};

use super::{confirm, open_session, open_store};

pub fn cmd_status(data: Option<&Path>) -> Result<()> {
    let store = open_store(data);

    println!();
    println!("⚓ Keel Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Snapshot: {}", store.path().display());

    match store.load() {
        Some(snapshot) => {
            let name = if snapshot.form.has_profile() {
                snapshot.form.name.clone()
            } else {
                "(unnamed)".to_string()
            };
            println!("   Profile: {}", name);
            println!(
                "   Analysis: {}",
                if snapshot.analysis.is_some() {
                    "stored"
                } else {
                    "not requested yet"
                }
            );
        }
        None => println!("   Profile: (no prior session)"),
    }

    let provider = std::env::var("KEEL_ANALYSIS_HOST").ok();
    match provider {
        Some(host) => println!("   Analysis provider: {}", host),
        None => println!("   Analysis provider: not configured (KEEL_ANALYSIS_HOST)"),
    }

    println!();
    Ok(())
}

pub fn cmd_reset(data: Option<&Path>, yes: bool) -> Result<()> {
    if !yes {
        println!("⚠️  This will delete your profile and any stored analysis.");
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let mut session = open_session(data);
    session.apply(ViewEvent::Reset);

    println!("✅ Snapshot cleared. Run 'keel setup' to start over.");
    Ok(())
}
