use std::collections::HashSet;

use devdex_catalog::normalize::{name_key, url_key};
use devdex_catalog::types::ItemRecord;
use devdex_curate::pass::CurationPass;
use devdex_curate::{Dedupe, KeyPolicy};

fn rec(name: &str, url: &str, description: &str) -> ItemRecord {
    ItemRecord {
        name: name.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        ..Default::default()
    }
}

#[test]
fn same_url_different_case_merges_to_one() {
    let input = vec![
        rec("ESLint", "https://eslint.org/", ""),
        rec("eslint", "https://eslint.org/", "Pluggable linting utility"),
    ];

    let outcome = Dedupe::new().run(input);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.stats.merged, 1);

    let survivor = &outcome.records[0];
    assert_eq!(survivor.name, "ESLint");
    assert_eq!(survivor.url, "https://eslint.org/");
    assert_eq!(survivor.description, "Pluggable linting utility");
}

#[test]
fn rename_with_same_url_merges() {
    // Different names, same homepage: historical rename
    let input = vec![
        rec("Twitter", "https://x.com/", ""),
        rec("X", "https://x.com/", "Social platform"),
    ];

    let outcome = Dedupe::new().run(input);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "Twitter");
    assert_eq!(outcome.records[0].description, "Social platform");
}

#[test]
fn url_variants_merge_by_name_key() {
    let input = vec![
        rec("Node.js", "https://nodejs.org/", ""),
        rec("node.js", "http://www.nodejs.org", "JavaScript runtime"),
    ];

    let outcome = Dedupe::new().run(input);
    assert_eq!(outcome.records.len(), 1);
}

#[test]
fn survivor_keeps_first_occurrence_position() {
    let input = vec![
        rec("Alpha", "https://alpha.dev/", ""),
        rec("Beta", "https://beta.dev/", ""),
        rec("alpha", "https://alpha.dev/", "dup"),
        rec("Gamma", "https://gamma.dev/", ""),
    ];

    let outcome = Dedupe::new().run(input);
    let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
}

#[test]
fn distinct_records_are_untouched() {
    let input = vec![
        rec("Rust", "https://www.rust-lang.org/", ""),
        rec("Go", "https://go.dev/", ""),
        rec("Zig", "https://ziglang.org/", ""),
    ];

    let outcome = Dedupe::new().run(input.clone());
    assert_eq!(outcome.records, input);
    assert_eq!(outcome.stats.merged, 0);
}

#[test]
fn output_has_no_shared_keys() {
    let input = vec![
        rec("Neon", "https://en.wikipedia.org/wiki/Neon_(company)", ""),
        rec("Neon", "https://neon.tech/", ""),
        rec("Neon Database", "https://neon.tech/", "Serverless Postgres"),
        rec("ESLint", "https://eslint.org/", ""),
        rec("eslint", "https://eslint.org", "Linting"),
    ];

    let outcome = Dedupe::new().run(input);

    let mut name_keys = HashSet::new();
    let mut url_keys = HashSet::new();
    for record in &outcome.records {
        let nk = name_key(&record.name);
        if !nk.is_empty() {
            assert!(name_keys.insert(nk), "duplicate name key in output");
        }
        let uk = url_key(&record.url);
        if !uk.is_empty() {
            assert!(url_keys.insert(uk), "duplicate url key in output");
        }
    }
}

#[test]
fn dedupe_is_a_fixed_point() {
    let input = vec![
        rec("Neon", "https://en.wikipedia.org/wiki/Neon_(company)", ""),
        rec("Neon", "https://neon.tech/", ""),
        rec("Microsoft Excel", "https://www.microsoft.com/excel", ""),
        rec("Excel", "https://microsoft.com/excel", "Spreadsheet"),
    ];

    let first = Dedupe::new().run(input);
    let second = Dedupe::new().run(first.records.clone());
    assert_eq!(second.records, first.records);
    assert_eq!(second.stats.merged, 0);
}

#[test]
fn intersection_policy_requires_both_keys() {
    // Same normalized name, different homepages: two distinct companies
    let input = vec![
        rec("Neon", "https://neon.tech/", "Serverless Postgres"),
        rec("Neon", "https://neon.com/", "Payments company"),
    ];

    let union = Dedupe::new().run(input.clone());
    assert_eq!(union.records.len(), 1);

    let both = Dedupe::with_policy(KeyPolicy::Intersection).run(input);
    assert_eq!(both.records.len(), 2);
}

#[test]
fn records_without_keys_never_collide() {
    let input = vec![rec("", "", "a"), rec("", "", "b"), rec("  ", "", "c")];

    // Blank names produce empty keys; nothing merges (the validity filter
    // is responsible for dropping these)
    let outcome = Dedupe::new().run(input);
    assert_eq!(outcome.records.len(), 3);
}
