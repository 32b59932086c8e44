//! Insert-if-absent for curated candidate records.
//!
//! Candidates whose identity key is already present merge into the
//! existing record instead of being appended, so a curated list can be
//! re-applied safely.

use std::collections::HashMap;

use devdex_catalog::normalize::{name_key, url_key};
use devdex_catalog::types::ItemRecord;

use crate::merge::merge;
use crate::pass::{CurationPass, PassOutcome, PassStats};

/// Appends candidate records that are not already in the directory.
#[derive(Debug)]
pub struct InsertCandidates {
    candidates: Vec<ItemRecord>,
}

impl InsertCandidates {
    pub fn new(candidates: Vec<ItemRecord>) -> Self {
        Self { candidates }
    }
}

impl CurationPass for InsertCandidates {
    fn name(&self) -> &str {
        "insert"
    }

    fn run(&self, records: Vec<ItemRecord>) -> PassOutcome {
        let mut out = records;
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut by_url: HashMap<String, usize> = HashMap::new();
        let mut stats = PassStats::default();

        for (i, record) in out.iter().enumerate() {
            index_keys(&mut by_name, &mut by_url, record, i);
        }

        for candidate in &self.candidates {
            let nk = name_key(&candidate.name);
            let uk = url_key(&candidate.url);

            let hit = (!uk.is_empty())
                .then(|| by_url.get(&uk).copied())
                .flatten()
                .or_else(|| (!nk.is_empty()).then(|| by_name.get(&nk).copied()).flatten());

            match hit {
                Some(i) => {
                    let merged = merge(&out[i], candidate);
                    if merged != out[i] {
                        log::debug!("insert: backfilling \"{}\" from candidate", out[i].name);
                        out[i] = merged;
                        stats.merged += 1;
                        index_keys(&mut by_name, &mut by_url, &out[i], i);
                    }
                }
                None => {
                    let i = out.len();
                    log::debug!("insert: appending \"{}\"", candidate.name);
                    out.push(candidate.clone());
                    index_keys(&mut by_name, &mut by_url, &out[i], i);
                    stats.inserted += 1;
                }
            }
        }

        PassOutcome {
            records: out,
            stats,
        }
    }
}

fn index_keys(
    by_name: &mut HashMap<String, usize>,
    by_url: &mut HashMap<String, usize>,
    record: &ItemRecord,
    index: usize,
) {
    let nk = name_key(&record.name);
    let uk = url_key(&record.url);
    if !nk.is_empty() {
        by_name.entry(nk).or_insert(index);
    }
    if !uk.is_empty() {
        by_url.entry(uk).or_insert(index);
    }
}
