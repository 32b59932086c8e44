//! Category correction passes.
//!
//! [`CorrectCategories`] resolves conflicting category values among records
//! that share a normalized name by majority vote. [`ClassifyCategories`]
//! backfills empty categories from an injected oracle (keyword tables, a
//! curated map — configuration, not logic, so it stays outside this crate).

use std::collections::HashMap;

use devdex_catalog::normalize::name_key;
use devdex_catalog::types::ItemRecord;

use crate::pass::{CurationPass, PassOutcome, PassStats};

/// Majority-vote category correction.
///
/// Across all records sharing a name key, the non-empty category value
/// with the most occurrences wins and is assigned to every record of that
/// name. Ties break toward the first-observed value, which keeps the pass
/// deterministic and idempotent. No brand-new category value is ever
/// introduced; values are only redistributed among same-identity records.
#[derive(Debug, Default)]
pub struct CorrectCategories;

impl CurationPass for CorrectCategories {
    fn name(&self) -> &str {
        "correct-categories"
    }

    fn run(&self, records: Vec<ItemRecord>) -> PassOutcome {
        // Vote tallies per name key, in first-observed order so tie-breaks
        // are stable across runs
        let mut votes: HashMap<String, Vec<(String, usize)>> = HashMap::new();
        for record in &records {
            let key = name_key(&record.name);
            let category = record.category.trim();
            if key.is_empty() || category.is_empty() {
                continue;
            }
            let tally = votes.entry(key).or_default();
            match tally.iter_mut().find(|(c, _)| c.as_str() == category) {
                Some((_, n)) => *n += 1,
                None => tally.push((category.to_string(), 1)),
            }
        }

        let mut records = records;
        let mut stats = PassStats::default();

        for record in &mut records {
            let key = name_key(&record.name);
            let Some(tally) = votes.get(&key) else {
                continue;
            };

            let mut best = &tally[0];
            for entry in &tally[1..] {
                if entry.1 > best.1 {
                    best = entry;
                }
            }

            if record.category != best.0 {
                log::debug!(
                    "correct-categories: \"{}\": \"{}\" -> \"{}\"",
                    record.name,
                    record.category,
                    best.0
                );
                record.category = best.0.clone();
                stats.corrected += 1;
            }
        }

        PassOutcome { records, stats }
    }
}

/// Backfills empty categories from an injected classifier.
///
/// Only records with no category are touched; existing assignments are
/// left for [`CorrectCategories`] to reconcile.
pub struct ClassifyCategories<F>
where
    F: Fn(&ItemRecord) -> Option<String>,
{
    classifier: F,
}

impl<F> ClassifyCategories<F>
where
    F: Fn(&ItemRecord) -> Option<String>,
{
    pub fn new(classifier: F) -> Self {
        Self { classifier }
    }
}

impl<F> CurationPass for ClassifyCategories<F>
where
    F: Fn(&ItemRecord) -> Option<String>,
{
    fn name(&self) -> &str {
        "classify-categories"
    }

    fn run(&self, records: Vec<ItemRecord>) -> PassOutcome {
        let mut records = records;
        let mut stats = PassStats::default();

        for record in &mut records {
            if !record.category.trim().is_empty() {
                continue;
            }
            if let Some(category) = (self.classifier)(record) {
                record.category = category;
                stats.corrected += 1;
            }
        }

        PassOutcome { records, stats }
    }
}
