use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::INDONESIA;
use crate::error::{Error, Result};
use crate::validation::{SharedCodes, validate_entries_with};

/// A region (province or special region) and its registration prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub name: String,
    pub codes: Vec<String>,
}

impl RegionEntry {
    pub fn new(name: impl Into<String>, codes: &[&str]) -> Self {
        Self {
            name: name.into(),
            codes: codes.iter().map(|code| code.to_string()).collect(),
        }
    }
}

/// Immutable lookup between region names and registration code prefixes.
///
/// Region order is insertion order and is preserved by every listing.
/// Name lookups are exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct RegionCodeTable {
    entries: Vec<RegionEntry>,
    by_name: HashMap<String, usize>,
    by_code: HashMap<String, usize>,
}

impl RegionCodeTable {
    /// Build a table, rejecting entries that break the table invariants.
    pub fn new(entries: Vec<RegionEntry>) -> Result<Self> {
        Self::with_shared_codes(entries, SharedCodes::Reject)
    }

    /// Build a table with explicit handling of codes listed by several regions.
    pub fn with_shared_codes(entries: Vec<RegionEntry>, shared: SharedCodes) -> Result<Self> {
        validate_entries_with(&entries, shared)?;
        Ok(Self::build(entries))
    }

    /// The built-in table of Indonesian registration regions.
    pub fn indonesia() -> Self {
        let entries = INDONESIA
            .iter()
            .map(|(name, codes)| RegionEntry::new(*name, codes))
            .collect();
        Self::build(entries)
    }

    /// Parse a JSON array of `{"name": ..., "codes": [...]}` objects.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let entries: Vec<RegionEntry> = serde_json::from_str(input)?;
        Self::new(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn build(entries: Vec<RegionEntry>) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_code = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_name.insert(entry.name.clone(), idx);
            for code in &entry.codes {
                by_code.entry(code.clone()).or_insert(idx);
            }
        }

        Self {
            entries,
            by_name,
            by_code,
        }
    }

    /// Registration codes of `region`; never empty for a known region.
    pub fn region_codes(&self, region: &str) -> Result<&[String]> {
        self.by_name
            .get(region)
            .map(|&idx| self.entries[idx].codes.as_slice())
            .ok_or_else(|| Error::NotFound(region.to_string()))
    }

    /// All region names in table order.
    pub fn region_list(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Name of the first region (in table order) listing `code`.
    pub fn region_name_from_code(&self, code: &str) -> Option<&str> {
        self.by_code
            .get(code)
            .map(|&idx| self.entries[idx].name.as_str())
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.by_name.contains_key(region)
    }

    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    /// Every code in the table, in region order then code order.
    pub fn all_codes(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|entry| entry.codes.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
