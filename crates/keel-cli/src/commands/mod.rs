//! Command implementations for the Keel CLI

mod admin;
mod analyze;
mod dashboard;
mod profile;
mod setup;

pub use admin::{cmd_reset, cmd_status};
pub use analyze::cmd_analyze;
pub use dashboard::cmd_dashboard;
pub use profile::cmd_set;
pub use setup::cmd_setup;

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use keel_core::{FileStore, Session};

/// Open the session over the snapshot file, honoring `--data`.
pub fn open_session(data: Option<&Path>) -> Session<FileStore> {
    Session::restore(open_store(data))
}

pub fn open_store(data: Option<&Path>) -> FileStore {
    let store = match data {
        Some(path) => FileStore::new(path),
        None => FileStore::new(FileStore::default_path()),
    };
    debug!(path = %store.path().display(), "Opening snapshot store");
    store
}

/// Prompt on stdin; empty input keeps the current value.
pub fn prompt_field(label: &str, current: &str) -> Result<String> {
    if current.is_empty() {
        print!("  {}: ", label);
    } else {
        print!("  {} [{}]: ", label, current);
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    Ok(if input.is_empty() {
        current.to_string()
    } else {
        input.to_string()
    })
}

/// Yes/no confirmation on stdin.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Whole-unit money with thousands separators: 1234567.2 -> "1,234,567".
pub fn fmt_money(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_money_grouping() {
        assert_eq!(fmt_money(0.0), "0");
        assert_eq!(fmt_money(999.0), "999");
        assert_eq!(fmt_money(1000.0), "1,000");
        assert_eq!(fmt_money(11666.67), "11,667");
        assert_eq!(fmt_money(1234567.2), "1,234,567");
        assert_eq!(fmt_money(-2500.0), "-2,500");
    }
}
