use devdex_catalog::types::ItemRecord;
use devdex_curate::pass::CurationPass;
use devdex_curate::{
    ClassifyCategories, CorrectCategories, FlagPopular, InsertCandidates, JunkFilter,
    ValidityFilter,
};

fn rec(name: &str, category: &str) -> ItemRecord {
    ItemRecord {
        name: name.to_string(),
        category: category.to_string(),
        ..Default::default()
    }
}

#[test]
fn validity_filter_drops_blank_names() {
    let input = vec![rec("Git", "Tool"), rec("   ", ""), rec("Rust", "")];

    let outcome = ValidityFilter.run(input);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.stats.dropped, 1);
    assert_eq!(outcome.records[0].name, "Git");
    assert_eq!(outcome.records[1].name, "Rust");
}

#[test]
fn junk_filter_drops_scrape_artifacts() {
    let input = vec![
        rec("Git", "Tool"),
        rec("External links", ""),
        rec("SEE ALSO", ""),
        rec("References", ""),
    ];

    let outcome = JunkFilter::new().run(input);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.stats.dropped, 3);
}

#[test]
fn junk_filter_accepts_custom_table() {
    let filter = JunkFilter::with_names(vec!["placeholder".to_string()]);
    let input = vec![rec("Placeholder", ""), rec("External links", "")];

    // Custom table replaces the default one
    let outcome = filter.run(input);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "External links");
}

#[test]
fn majority_vote_corrects_minority_categories() {
    // "Go", "Go", "Go!" share the name key "go"; 2-1 vote wins
    let input = vec![
        rec("Go", "Programming Language"),
        rec("Go", "Programming Language"),
        rec("Go!", "Tool"),
    ];

    let outcome = CorrectCategories.run(input);
    assert_eq!(outcome.stats.corrected, 1);
    for record in &outcome.records {
        assert_eq!(record.category, "Programming Language");
    }
}

#[test]
fn majority_vote_ties_break_toward_first_observed() {
    let input = vec![rec("Vim", "Editor"), rec("vim", "Tool")];

    let outcome = CorrectCategories.run(input);
    assert_eq!(outcome.records[0].category, "Editor");
    assert_eq!(outcome.records[1].category, "Editor");
}

#[test]
fn majority_vote_fills_empty_categories_from_siblings() {
    let input = vec![rec("Figma", "Tool"), rec("figma", "")];

    let outcome = CorrectCategories.run(input);
    assert_eq!(outcome.records[1].category, "Tool");
}

#[test]
fn majority_vote_is_idempotent() {
    let input = vec![
        rec("Go", "Programming Language"),
        rec("Go", "Programming Language"),
        rec("Go!", "Tool"),
        rec("Vim", "Editor"),
        rec("vim", "Tool"),
    ];

    let first = CorrectCategories.run(input);
    let second = CorrectCategories.run(first.records.clone());
    assert_eq!(second.records, first.records);
    assert_eq!(second.stats.corrected, 0);
}

#[test]
fn majority_vote_never_invents_categories() {
    let input = vec![rec("Lonely", ""), rec("Other", "Tool")];

    let outcome = CorrectCategories.run(input);
    // No sibling votes for "Lonely"; it stays uncategorized
    assert_eq!(outcome.records[0].category, "");
}

#[test]
fn classifier_fills_only_empty_categories() {
    let classify = ClassifyCategories::new(|record: &ItemRecord| {
        record
            .name
            .to_lowercase()
            .contains("lang")
            .then(|| "Programming Language".to_string())
    });

    let input = vec![rec("Erlang", ""), rec("Clang", "Tool"), rec("Git", "")];

    let outcome = classify.run(input);
    assert_eq!(outcome.records[0].category, "Programming Language");
    assert_eq!(outcome.records[1].category, "Tool");
    assert_eq!(outcome.records[2].category, "");
    assert_eq!(outcome.stats.corrected, 1);
}

#[test]
fn insert_appends_missing_and_backfills_existing() {
    let existing = vec![ItemRecord {
        name: "Excel".to_string(),
        url: "https://en.wikipedia.org/wiki/Microsoft_Excel".to_string(),
        ..Default::default()
    }];

    let candidates = vec![
        ItemRecord {
            name: "Microsoft Excel".to_string(),
            url: "https://www.microsoft.com/en/microsoft-365/excel".to_string(),
            description: "Spreadsheet software".to_string(),
            ..Default::default()
        },
        ItemRecord {
            name: "Tableau".to_string(),
            url: "https://www.tableau.com/".to_string(),
            description: "Interactive data visualization".to_string(),
            ..Default::default()
        },
    ];

    let outcome = InsertCandidates::new(candidates).run(existing);
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.stats.inserted, 1);
    assert_eq!(outcome.stats.merged, 1);

    // The wiki placeholder got upgraded in place instead of duplicated
    let excel = &outcome.records[0];
    assert_eq!(excel.name, "Microsoft Excel");
    assert_eq!(excel.url, "https://www.microsoft.com/en/microsoft-365/excel");
    assert_eq!(excel.description, "Spreadsheet software");
    assert_eq!(outcome.records[1].name, "Tableau");
}

#[test]
fn insert_is_idempotent() {
    let candidates = vec![ItemRecord {
        name: "Grafana".to_string(),
        url: "https://grafana.com/".to_string(),
        description: "Observability dashboards".to_string(),
        ..Default::default()
    }];

    let first = InsertCandidates::new(candidates.clone()).run(Vec::new());
    assert_eq!(first.stats.inserted, 1);

    let second = InsertCandidates::new(candidates).run(first.records.clone());
    assert_eq!(second.records, first.records);
    assert_eq!(second.stats.inserted, 0);
    assert_eq!(second.stats.merged, 0);
}

#[test]
fn flag_popular_matches_by_name_key() {
    let pass = FlagPopular::new(vec!["C++".to_string(), "git".to_string()]);
    let input = vec![rec("c++", ""), rec("Git", ""), rec("Obscure", "")];

    let outcome = pass.run(input);
    assert!(outcome.records[0].popular);
    assert!(outcome.records[1].popular);
    assert!(!outcome.records[2].popular);
    assert_eq!(outcome.stats.corrected, 2);
}
