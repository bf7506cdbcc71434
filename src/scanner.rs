use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::warn;
use walkdir::WalkDir;

use crate::config::RepoConfig;
use crate::fingerprint::fingerprint;
use crate::models::FileRecord;

/// Result of one repository scan.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Matched files, sorted by relative path.
    pub files: Vec<FileRecord>,
    /// Entries that matched but could not be read as UTF-8 text.
    pub skipped: usize,
}

/// Walk the repository root and return every matched file with its content
/// and fingerprint.
///
/// A missing root is fatal. An individual file that cannot be read as text
/// is skipped with a warning and counted in [`ScanOutcome::skipped`].
pub fn scan_repository(repo: &RepoConfig) -> Result<ScanOutcome> {
    let root = &repo.root;
    if !root.exists() {
        bail!("Repository root does not exist: {}", root.display());
    }

    let include_set = build_globset(&repo.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(repo.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut outcome = ScanOutcome::default();

    let walker = WalkDir::new(root).follow_links(repo.follow_symlinks);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                outcome.skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %rel_str, error = %e, "skipping unreadable file");
                outcome.skipped += 1;
                continue;
            }
        };

        let fp = fingerprint(&content);
        outcome.files.push(FileRecord {
            relative_path: rel_str,
            content,
            fingerprint: fp,
        });
    }

    // Sort for deterministic ordering
    outcome.files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    Ok(outcome)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
