//! Record filters: structural validity and junk-name removal.

use std::collections::HashSet;

use devdex_catalog::types::ItemRecord;

use crate::pass::{CurationPass, PassOutcome, PassStats};

/// Drops records whose name is empty or whitespace-only.
///
/// An invalid name is a soft error: the record is dropped and counted, the
/// pipeline continues.
#[derive(Debug, Default)]
pub struct ValidityFilter;

impl CurationPass for ValidityFilter {
    fn name(&self) -> &str {
        "validity-filter"
    }

    fn run(&self, records: Vec<ItemRecord>) -> PassOutcome {
        let before = records.len();
        let records: Vec<ItemRecord> = records
            .into_iter()
            .filter(|r| {
                let valid = r.has_valid_name();
                if !valid {
                    log::debug!("validity-filter: dropping record with blank name (url={})", r.url);
                }
                valid
            })
            .collect();

        let stats = PassStats {
            dropped: before - records.len(),
            ..Default::default()
        };
        PassOutcome { records, stats }
    }
}

/// Names that are scrape artifacts rather than items: section headings
/// lifted from encyclopedia pages and similar.
pub const DEFAULT_JUNK_NAMES: &[&str] = &[
    "the original",
    "external links",
    "see also",
    "references",
    "notes",
    "further reading",
    "sources",
    "bibliography",
    "links",
    "footnotes",
];

/// Drops records whose trimmed, lowercased name is in a junk-name table.
#[derive(Debug)]
pub struct JunkFilter {
    junk: HashSet<String>,
}

impl JunkFilter {
    /// Filter with the built-in junk-name table.
    pub fn new() -> Self {
        Self::with_names(DEFAULT_JUNK_NAMES.iter().map(|s| s.to_string()))
    }

    /// Filter with a caller-supplied table. Matching is case-insensitive
    /// on the trimmed name.
    pub fn with_names(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            junk: names.into_iter().map(|n| n.trim().to_lowercase()).collect(),
        }
    }
}

impl Default for JunkFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CurationPass for JunkFilter {
    fn name(&self) -> &str {
        "junk-filter"
    }

    fn run(&self, records: Vec<ItemRecord>) -> PassOutcome {
        let before = records.len();
        let records: Vec<ItemRecord> = records
            .into_iter()
            .filter(|r| {
                let junk = self.junk.contains(&r.name.trim().to_lowercase());
                if junk {
                    log::debug!("junk-filter: dropping \"{}\"", r.name);
                }
                !junk
            })
            .collect();

        let stats = PassStats {
            dropped: before - records.len(),
            ..Default::default()
        };
        PassOutcome { records, stats }
    }
}
