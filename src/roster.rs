//! Startup loader for the device roster file.
//!
//! The roster is a one-column CSV listing of device ids, read exactly once
//! before the service starts accepting requests. Nothing re-reads it at
//! runtime; the fleet is fixed for the life of the process.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads the roster file and returns the device ids in file order.
///
/// The first comma-separated field of each row is the id. Blank lines and an
/// optional `device_id` header row are skipped. Duplicates are kept here; the
/// registry collapses them.
pub fn load(path: &Path) -> Result<Vec<String>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse(&contents))
}

fn parse(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter_map(|line| line.split(',').next())
        .map(str::trim)
        .filter(|id| !id.is_empty() && !id.eq_ignore_ascii_case("device_id"))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_field_of_each_row() {
        let ids = parse("dev1,warehouse\ndev2,depot\n");
        assert_eq!(ids, vec!["dev1", "dev2"]);
    }

    #[test]
    fn skips_header_and_blank_lines() {
        let ids = parse("device_id,location\ndev1\n\n  \ndev2\n");
        assert_eq!(ids, vec!["dev1", "dev2"]);
    }

    #[test]
    fn trims_whitespace_around_ids() {
        let ids = parse("  dev1 \n\tdev2\t,extra\n");
        assert_eq!(ids, vec!["dev1", "dev2"]);
    }

    #[test]
    fn keeps_duplicates_for_the_registry_to_collapse() {
        let ids = parse("dev1\ndev1\ndev2\n");
        assert_eq!(ids, vec!["dev1", "dev1", "dev2"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("fleetbeat-no-such-roster.csv");
        assert!(load(&path).is_err());
    }

    #[test]
    fn loads_ids_from_disk() {
        let path = std::env::temp_dir().join(format!("fleetbeat-roster-{}.csv", std::process::id()));
        fs::write(&path, "dev1,depot\ndev2,warehouse\n").unwrap();
        let ids = load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(ids, vec!["dev1", "dev2"]);
    }
}
