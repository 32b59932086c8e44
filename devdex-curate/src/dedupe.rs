//! Duplicate detection and in-place merging.
//!
//! A single forward scan over the list, keyed by normalized name and URL.
//! The first occurrence of an identity survives in its original position;
//! later occurrences merge into it via [`merge`]. Because a merge can
//! change the survivor's name (the longer-name rule), the scan repeats
//! until a round produces no merges, so the output never contains two
//! records sharing a name key or a URL key.

use std::collections::HashMap;

use devdex_catalog::normalize::{name_key, url_key};
use devdex_catalog::types::ItemRecord;

use crate::merge::merge;
use crate::pass::{CurationPass, PassOutcome, PassStats};

/// How identity-key collisions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Records are duplicates when *either* the name key or the URL key
    /// collides. Catches renames-with-same-URL and URL variants in one
    /// pass, at the cost of an occasional false-positive merge when two
    /// distinct items normalize to the same name.
    #[default]
    Union,
    /// Records are duplicates only when *both* keys collide on the same
    /// survivor. Higher precision, misses legitimate duplicates whose URL
    /// was never filled in.
    Intersection,
}

/// The deduplication pass.
#[derive(Debug, Default)]
pub struct Dedupe {
    pub policy: KeyPolicy,
}

impl Dedupe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: KeyPolicy) -> Self {
        Self { policy }
    }

    /// One scan. Returns the survivors and how many records were merged.
    fn scan(&self, records: Vec<ItemRecord>) -> (Vec<ItemRecord>, usize) {
        let mut out: Vec<ItemRecord> = Vec::with_capacity(records.len());
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut by_url: HashMap<String, usize> = HashMap::new();
        let mut merged = 0usize;

        for record in records {
            let nk = name_key(&record.name);
            let uk = url_key(&record.url);

            let url_hit = (!uk.is_empty()).then(|| by_url.get(&uk).copied()).flatten();
            let name_hit = (!nk.is_empty()).then(|| by_name.get(&nk).copied()).flatten();

            let target = match self.policy {
                // URL identity takes precedence: a rename keeps its homepage
                KeyPolicy::Union => url_hit.or(name_hit),
                KeyPolicy::Intersection => match (url_hit, name_hit) {
                    (Some(u), Some(n)) if u == n => Some(u),
                    _ => None,
                },
            };

            match target {
                Some(i) => {
                    let survivor = merge(&out[i], &record);
                    log::debug!(
                        "dedupe: merging \"{}\" into \"{}\"",
                        record.name,
                        survivor.name
                    );
                    out[i] = survivor;
                    merged += 1;
                    // Register the survivor's (possibly new) keys while
                    // keeping the old ones as aliases
                    register(&mut by_name, name_key(&out[i].name), i);
                    register(&mut by_url, url_key(&out[i].url), i);
                }
                None => {
                    let i = out.len();
                    out.push(record);
                    register(&mut by_name, nk, i);
                    register(&mut by_url, uk, i);
                }
            }
        }

        (out, merged)
    }
}

fn register(map: &mut HashMap<String, usize>, key: String, index: usize) {
    if !key.is_empty() {
        map.entry(key).or_insert(index);
    }
}

impl CurationPass for Dedupe {
    fn name(&self) -> &str {
        "dedupe"
    }

    fn run(&self, records: Vec<ItemRecord>) -> PassOutcome {
        let mut current = records;
        let mut stats = PassStats::default();

        // A merge can move a survivor under a key that another survivor
        // already owns; rescanning until quiescence restores the no-shared-
        // keys invariant. Terminates: every round with merges shrinks the
        // list.
        loop {
            let (next, merged) = self.scan(current);
            current = next;
            stats.merged += merged;
            if merged == 0 {
                break;
            }
        }

        PassOutcome {
            records: current,
            stats,
        }
    }
}
