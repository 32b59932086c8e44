//! Flag-setting passes.

use std::collections::HashSet;

use devdex_catalog::normalize::name_key;
use devdex_catalog::types::ItemRecord;

use crate::pass::{CurationPass, PassOutcome, PassStats};

/// Marks records as popular when their name key appears in an injected
/// set. The set itself (the "which tools matter" table) is configuration
/// supplied by the caller; this pass only applies it. Never clears a flag
/// that is already set.
#[derive(Debug)]
pub struct FlagPopular {
    name_keys: HashSet<String>,
}

impl FlagPopular {
    /// Build from display names or keys; everything is normalized through
    /// [`name_key`] so "C++" and "c++" both match.
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            name_keys: names.into_iter().map(|n| name_key(&n)).collect(),
        }
    }
}

impl CurationPass for FlagPopular {
    fn name(&self) -> &str {
        "flag-popular"
    }

    fn run(&self, records: Vec<ItemRecord>) -> PassOutcome {
        let mut records = records;
        let mut stats = PassStats::default();

        for record in &mut records {
            if !record.popular && self.name_keys.contains(&name_key(&record.name)) {
                record.popular = true;
                stats.corrected += 1;
            }
        }

        PassOutcome { records, stats }
    }
}
