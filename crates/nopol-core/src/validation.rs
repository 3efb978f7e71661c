use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::region::RegionEntry;

/// How codes appearing under more than one region are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SharedCodes {
    /// A code listed by two regions is an error.
    #[default]
    Reject,
    /// Tolerated; reverse lookups resolve to the first region in table order.
    Allow,
}

/// Validate internal consistency of a list of region entries.
///
/// This checks:
/// - the table has at least one region
/// - region names are non-empty and unique
/// - every region has at least one code
/// - codes are one or two uppercase ASCII letters
/// - no code appears twice, within a region or across regions
pub fn validate_entries(entries: &[RegionEntry]) -> Result<()> {
    validate_entries_with(entries, SharedCodes::Reject)
}

/// Same as [`validate_entries`], with explicit handling of codes shared
/// between regions. Duplicates inside one region are always rejected.
pub fn validate_entries_with(entries: &[RegionEntry], shared: SharedCodes) -> Result<()> {
    if entries.is_empty() {
        return Err(Error::InvalidTable("table has no regions".to_string()));
    }

    let mut names = BTreeSet::new();
    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();

    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(Error::InvalidTable("empty region name".to_string()));
        }
        if !names.insert(entry.name.as_str()) {
            return Err(Error::InvalidTable(format!(
                "duplicate region name: {}",
                entry.name
            )));
        }
        if entry.codes.is_empty() {
            return Err(Error::InvalidTable(format!(
                "region has no codes: {}",
                entry.name
            )));
        }

        let mut local = BTreeSet::new();
        for code in &entry.codes {
            if !is_region_code(code) {
                return Err(Error::InvalidTable(format!(
                    "malformed code '{code}' in region {}",
                    entry.name
                )));
            }
            if !local.insert(code.as_str()) {
                return Err(Error::InvalidTable(format!(
                    "duplicate code '{code}' in region {}",
                    entry.name
                )));
            }
            match owners.get(code.as_str()) {
                Some(owner) if shared == SharedCodes::Reject => {
                    return Err(Error::InvalidTable(format!(
                        "duplicate code '{code}': {owner} and {}",
                        entry.name
                    )));
                }
                Some(_) => {}
                None => {
                    owners.insert(code.as_str(), entry.name.as_str());
                }
            }
        }
    }

    Ok(())
}

/// Whether `code` has the shape of a registration prefix (`B`, `AB`).
pub fn is_region_code(code: &str) -> bool {
    (1..=2).contains(&code.len()) && code.bytes().all(|byte| byte.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, codes: &[&str]) -> RegionEntry {
        RegionEntry {
            name: name.to_string(),
            codes: codes.iter().map(|code| code.to_string()).collect(),
        }
    }

    #[test]
    fn accepts_well_formed_entries() {
        let entries = vec![entry("DKI Jakarta", &["B"]), entry("Bali", &["DK"])];
        assert!(validate_entries(&entries).is_ok());
    }

    #[test]
    fn rejects_empty_table() {
        assert!(matches!(
            validate_entries_with(&[], SharedCodes::Allow),
            Err(Error::InvalidTable(_))
        ));
    }

    #[test]
    fn rejects_region_without_codes() {
        let entries = vec![entry("Bali", &[])];
        assert!(matches!(
            validate_entries(&entries),
            Err(Error::InvalidTable(_))
        ));
    }

    #[test]
    fn rejects_code_shared_between_regions() {
        let entries = vec![entry("Banten", &["A", "B"]), entry("DKI Jakarta", &["B"])];
        let err = validate_entries(&entries).expect_err("shared code");
        assert!(err.to_string().contains("duplicate code 'B'"));
    }

    #[test]
    fn allows_shared_codes_when_requested() {
        let entries = vec![entry("Banten", &["A", "B"]), entry("DKI Jakarta", &["B"])];
        assert!(validate_entries_with(&entries, SharedCodes::Allow).is_ok());
    }

    #[test]
    fn rejects_repeated_code_inside_region() {
        let entries = vec![entry("Bali", &["DK", "DK"])];
        assert!(validate_entries_with(&entries, SharedCodes::Allow).is_err());
    }

    #[test]
    fn rejects_malformed_codes() {
        for code in ["", "b", "ABC", "1"] {
            let entries = vec![entry("Bali", &[code])];
            assert!(validate_entries(&entries).is_err(), "code {code:?}");
        }
    }
}
