//! devdex CLI
//!
//! Command-line interface for curating the developer-tool directory:
//! dedupe and clean the record file, fold in candidate lists, and check
//! that every listed URL still resolves.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use devdex_catalog::{ItemRecord, is_generic_reference, load, save, snapshot};
use devdex_curate::{
    CorrectCategories, CurationPass, Dedupe, InsertCandidates, JunkFilter, KeyPolicy, PassReport,
    ValidityFilter, pipeline,
};
use devdex_probe::{ProbeOptions, ProbeStatus, probe_all};

#[derive(Parser)]
#[command(name = "devdex")]
#[command(about = "Curate the developer-tool directory data file", long_about = None)]
struct Cli {
    /// Path to the record file
    #[arg(short, long, global = true, default_value = "data.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full cleanup: drop invalid and junk entries, dedupe, correct categories
    Curate {
        /// Show what would change without writing
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Only treat records as duplicates when both name and URL agree
        #[arg(long)]
        require_both_keys: bool,
    },

    /// Merge duplicate entries only
    Dedupe {
        #[arg(short = 'n', long)]
        dry_run: bool,

        #[arg(long)]
        require_both_keys: bool,
    },

    /// Fix category disagreements among same-name entries by majority vote
    Correct {
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Drop invalid and junk entries only
    Clean {
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Insert entries from a candidate file, merging into existing ones where they match
    Add {
        /// JSON file of candidate records
        candidates: PathBuf,

        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Probe every entry's URL and report what no longer resolves
    CheckUrls {
        /// Maximum in-flight requests
        #[arg(long, default_value_t = 20)]
        concurrency: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Write the full report as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show record counts, category breakdown, and flag coverage
    Stats,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Curate {
            dry_run,
            require_both_keys,
        } => {
            let validity = ValidityFilter;
            let junk = JunkFilter::new();
            let dedupe = Dedupe::with_policy(key_policy(require_both_keys));
            let correct = CorrectCategories;
            let passes: [&dyn CurationPass; 4] = [&validity, &junk, &dedupe, &correct];
            run_passes(&cli.data, &passes, dry_run, "curate");
        }
        Commands::Dedupe {
            dry_run,
            require_both_keys,
        } => {
            let dedupe = Dedupe::with_policy(key_policy(require_both_keys));
            run_passes(&cli.data, &[&dedupe], dry_run, "dedupe");
        }
        Commands::Correct { dry_run } => {
            run_passes(&cli.data, &[&CorrectCategories], dry_run, "correct");
        }
        Commands::Clean { dry_run } => {
            let validity = ValidityFilter;
            let junk = JunkFilter::new();
            run_passes(&cli.data, &[&validity, &junk], dry_run, "clean");
        }
        Commands::Add {
            candidates,
            dry_run,
        } => {
            run_add(&cli.data, &candidates, dry_run);
        }
        Commands::CheckUrls {
            concurrency,
            timeout,
            output,
        } => {
            run_check_urls(&cli.data, concurrency, timeout, output);
        }
        Commands::Stats => {
            run_stats(&cli.data);
        }
    }
}

fn key_policy(require_both_keys: bool) -> KeyPolicy {
    if require_both_keys {
        KeyPolicy::Intersection
    } else {
        KeyPolicy::Union
    }
}

/// Load, run the given passes, report, and (unless dry-run) snapshot + save.
fn run_passes(data: &Path, passes: &[&dyn CurationPass], dry_run: bool, label: &str) {
    let records = load_or_exit(data);
    let original = records.clone();

    let (cleaned, reports) = pipeline::run(records, passes);
    print_reports(&reports);

    let changed = reports.iter().any(PassReport::changed_anything);
    if !changed {
        println!(
            "{}",
            "Nothing to do, records are already clean".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    if dry_run {
        println!(
            "{}",
            "Dry run: no changes written".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    write_or_exit(data, &original, &cleaned, label);
}

/// Insert candidates from a file into the record list.
fn run_add(data: &Path, candidates_path: &Path, dry_run: bool) {
    let records = load_or_exit(data);
    let original = records.clone();
    let candidates = load_or_exit(candidates_path);

    println!(
        "Adding {} candidates from {}",
        candidates.len(),
        candidates_path
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );

    let insert = InsertCandidates::new(candidates);
    let passes: [&dyn CurationPass; 1] = [&insert];
    let (updated, reports) = pipeline::run(records, &passes);
    print_reports(&reports);

    let changed = reports.iter().any(PassReport::changed_anything);
    if !changed {
        println!(
            "{}",
            "All candidates already present".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    if dry_run {
        println!(
            "{}",
            "Dry run: no changes written".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    write_or_exit(data, &original, &updated, "add");
}

/// Probe every record's URL and print the bucketed findings.
fn run_check_urls(data: &Path, concurrency: usize, timeout: u64, output: Option<PathBuf>) {
    let records = load_or_exit(data);

    let options = ProbeOptions {
        concurrency,
        timeout: Duration::from_secs(timeout),
        ..Default::default()
    };

    println!(
        "Checking {} records ({} in flight, {}s timeout)",
        records.len(),
        options.concurrency,
        timeout,
    );

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!(
                "{} Failed to create async runtime: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            std::process::exit(1);
        }
    };

    let report = rt.block_on(async {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars("/-\\|"),
        );
        pb.set_message("Probing URLs...");
        pb.enable_steady_tick(Duration::from_millis(100));

        let report = probe_all(&records, &options).await;
        pb.finish_and_clear();
        report
    });

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            eprintln!(
                "{} Probe failed: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            std::process::exit(1);
        }
    };

    println!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    println!(
        "  {} {} reachable",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.ok,
    );
    if report.skipped > 0 {
        println!(
            "  {} {} skipped (hosts that block automated clients)",
            "-".if_supports_color(Stdout, |t| t.dimmed()),
            report.skipped,
        );
    }
    if report.redirected > 0 {
        println!(
            "  {} {} redirected off-domain",
            "\u{2192}".if_supports_color(Stdout, |t| t.yellow()),
            report.redirected,
        );
    }
    if report.http_errors > 0 {
        println!(
            "  {} {} HTTP errors",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            report.http_errors,
        );
    }
    if report.timeouts > 0 {
        println!(
            "  {} {} timed out",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            report.timeouts,
        );
    }
    if report.connect_failures > 0 {
        println!(
            "  {} {} unreachable",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            report.connect_failures,
        );
    }
    if report.missing_url > 0 {
        println!(
            "  {} {} records with no URL",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            report.missing_url,
        );
    }

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        println!();
        println!("{}", "Problems:".if_supports_color(Stdout, |t| t.bold()));
        for result in failures {
            println!(
                "  {} {} {}",
                result.name.if_supports_color(Stdout, |t| t.bold()),
                result.url.if_supports_color(Stdout, |t| t.dimmed()),
                describe_status(&result.status).if_supports_color(Stdout, |t| t.yellow()),
            );
        }
    }

    if let Some(path) = output {
        let contents = match report.to_json_string() {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!(
                    "{} Failed to serialize report: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    e,
                );
                std::process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(&path, contents) {
            eprintln!(
                "{} Failed to write {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                path.display(),
                e,
            );
            std::process::exit(1);
        }
        println!();
        println!(
            "{} Report written to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            path.display().if_supports_color(Stdout, |t| t.cyan()),
        );
    }
}

fn describe_status(status: &ProbeStatus) -> String {
    match status {
        ProbeStatus::Ok => "ok".to_string(),
        ProbeStatus::RedirectedOffDomain { final_host } => {
            format!("redirects to {final_host}")
        }
        ProbeStatus::HttpError { code } => format!("HTTP {code}"),
        ProbeStatus::Timeout => "timed out".to_string(),
        ProbeStatus::ConnectFailed { reason } => reason.clone(),
        ProbeStatus::Skipped => "skipped".to_string(),
        ProbeStatus::MissingUrl => "no URL".to_string(),
    }
}

/// Read-only overview of the record file.
fn run_stats(data: &Path) {
    let records = load_or_exit(data);

    println!(
        "{} {}",
        "Records:".if_supports_color(Stdout, |t| t.bold()),
        records.len(),
    );

    // Category breakdown, largest first, first-observed order for ties
    let mut categories: Vec<(String, usize)> = Vec::new();
    let mut uncategorized = 0usize;
    for record in &records {
        let category = record.category.trim();
        if category.is_empty() {
            uncategorized += 1;
            continue;
        }
        match categories.iter_mut().find(|(c, _)| c.as_str() == category) {
            Some((_, n)) => *n += 1,
            None => categories.push((category.to_string(), 1)),
        }
    }
    categories.sort_by(|a, b| b.1.cmp(&a.1));

    if !categories.is_empty() {
        println!();
        println!("{}", "Categories:".if_supports_color(Stdout, |t| t.bold()));
        for (category, count) in &categories {
            println!(
                "  {:>5}  {}",
                count,
                category.if_supports_color(Stdout, |t| t.cyan()),
            );
        }
    }
    if uncategorized > 0 {
        println!(
            "  {:>5}  {}",
            uncategorized,
            "(uncategorized)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let missing_url = records.iter().filter(|r| r.url.trim().is_empty()).count();
    let reference_urls = records
        .iter()
        .filter(|r| is_generic_reference(&r.url))
        .count();
    let popular = records.iter().filter(|r| r.popular).count();
    let verified = records.iter().filter(|r| r.verified).count();

    println!();
    println!("{}", "Coverage:".if_supports_color(Stdout, |t| t.bold()));
    println!("  {:>5}  missing URL", missing_url);
    println!("  {:>5}  still pointing at reference sites", reference_urls);
    println!("  {:>5}  flagged popular", popular);
    println!("  {:>5}  verified", verified);
}

// -- Shared plumbing --

fn load_or_exit(path: &Path) -> Vec<ItemRecord> {
    match load(path) {
        Ok(records) => {
            log::debug!("loaded {} records from {}", records.len(), path.display());
            records
        }
        Err(e) => {
            eprintln!(
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            std::process::exit(1);
        }
    }
}

/// Snapshot the pre-change state, then save the new one.
fn write_or_exit(path: &Path, original: &[ItemRecord], updated: &[ItemRecord], label: &str) {
    let backup = match snapshot(path, original, label) {
        Ok(backup) => backup,
        Err(e) => {
            eprintln!(
                "{} Failed to write backup: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            std::process::exit(1);
        }
    };

    if let Err(e) = save(path, updated) {
        eprintln!(
            "{} Failed to save {}: {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            path.display(),
            e,
        );
        std::process::exit(1);
    }

    println!(
        "{} {} records written to {} (backup: {})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        updated.len(),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        backup
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("?")
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
}

fn print_reports(reports: &[PassReport]) {
    for report in reports {
        let mut effects: Vec<String> = Vec::new();
        if report.stats.dropped > 0 {
            effects.push(format!("{} dropped", report.stats.dropped));
        }
        if report.stats.merged > 0 {
            effects.push(format!("{} merged", report.stats.merged));
        }
        if report.stats.corrected > 0 {
            effects.push(format!("{} corrected", report.stats.corrected));
        }
        if report.stats.inserted > 0 {
            effects.push(format!("{} inserted", report.stats.inserted));
        }

        let effect = if effects.is_empty() {
            "no changes".to_string()
        } else {
            effects.join(", ")
        };

        println!(
            "  {} {} \u{2192} {} {}",
            format!("{}:", report.pass).if_supports_color(Stdout, |t| t.cyan()),
            report.before,
            report.after,
            format!("({effect})").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
