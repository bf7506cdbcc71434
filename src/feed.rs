//! Feed loop: detect changed files and inject their content into the
//! conversation as system entries.
//!
//! One feed cycle scans the repository, compares each file's fingerprint
//! against the session's table, and feeds only new or changed files. The
//! feed loop is the sole mutator of the conversation store and the
//! fingerprint table.

use anyhow::Result;
use tracing::debug;

use crate::chunk::{chunk_or_summarize, split_content, Summarizer};
use crate::config::Config;
use crate::models::FeedReport;
use crate::scanner::scan_repository;
use crate::session::Session;

/// Run one feed cycle against the session.
///
/// Deterministic given the filesystem state and the prior table state.
pub async fn run_feed(
    config: &Config,
    summarizer: &dyn Summarizer,
    session: &mut Session,
) -> Result<FeedReport> {
    println!("Reading repo files...");
    let outcome = scan_repository(&config.repo)?;

    let mut report = FeedReport {
        files_skipped: outcome.skipped,
        ..Default::default()
    };

    for record in &outcome.files {
        let unchanged = session
            .recorded_fingerprint(&record.relative_path)
            .map_or(false, |fp| fp == record.fingerprint);
        if unchanged {
            continue;
        }

        let chunks = chunk_or_summarize(record, &config.chunking, summarizer).await?;
        debug!(path = %record.relative_path, chunks = chunks.len(), "feeding file");
        for chunk in &chunks {
            session.push_system(chunk.render());
        }
        session.record_fingerprint(&record.relative_path, &record.fingerprint);
        report.files_changed += 1;
        report.chunks_fed += chunks.len();
    }

    Ok(report)
}

/// Print the outcome of a feed cycle.
pub fn print_report(report: &FeedReport) {
    if report.chunks_fed > 0 {
        println!("Fed {} chunks.", report.chunks_fed);
    } else {
        println!("No changes detected; nothing to feed.");
    }
    if report.files_skipped > 0 {
        println!("Skipped {} unreadable files.", report.files_skipped);
    }
}

/// Offline preview of what a feed would send: files matched, chunk counts
/// against an empty fingerprint table, and skipped files.
///
/// Never contacts the model; files over the threshold are counted as one
/// pending summary each.
pub fn run_scan(config: &Config) -> Result<()> {
    let outcome = scan_repository(&config.repo)?;

    let mut raw_chunks = 0usize;
    let mut summaries = 0usize;
    for record in &outcome.files {
        let len = record.content.chars().count();
        if config.chunking.summarize && len > config.chunking.max_chars {
            summaries += 1;
        } else {
            raw_chunks +=
                split_content(&record.relative_path, &record.content, config.chunking.max_chars)
                    .len();
        }
    }

    println!("scan {}", config.repo.root.display());
    println!("  files matched: {}", outcome.files.len());
    for record in &outcome.files {
        println!("  {}  {}", &record.fingerprint[..12], record.relative_path);
    }
    println!("  raw chunks: {}", raw_chunks);
    println!("  pending summaries: {}", summaries);
    if outcome.skipped > 0 {
        println!("  skipped: {}", outcome.skipped);
    }
    println!("ok");
    Ok(())
}
