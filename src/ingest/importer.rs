use std::fs::File;
use std::io::{BufRead, BufReader};
use anyhow::{Result, Context};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, error};

use crate::database::repo::{HashDatabase, Provisioning};
use crate::database::schema::MD5_INDEX_NAME;
use crate::ingest::lines::{classify_line, HashLine};
use crate::utils::config::ImportConfig;

/// Counters for one run. `lines_read` counts every line, comments and rejects included.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub lines_read: u64,
    pub inserted: u64,
    pub comments: u64,
    pub wrong_length: u64,
    pub failed_inserts: u64,
    pub index_built: bool,
    pub total_hashes: u64,
}

/// Loads every MD5 line of `config.input` into the database at `config.output`.
///
/// All inserts share one transaction that is committed after the last line, so
/// a run that fails part way leaves no new rows behind. The md5 index is dropped
/// up front on an existing database and rebuilt after the commit unless
/// `build_index` is off.
pub fn run_import(config: &ImportConfig) -> Result<ImportSummary> {
    let (mut db, provisioning) = HashDatabase::open(&config.output)?;

    if provisioning == Provisioning::Existing {
        info!("Dropping index {}.", MD5_INDEX_NAME);
        if !db.drop_md5_index()? {
            info!("No index {} present.", MD5_INDEX_NAME);
        }
    }

    info!("Opening hash file {}.", config.input.display());
    let file = File::open(&config.input)
        .with_context(|| format!("Failed to open hash file {:?}", config.input))?;
    let file_len = file.metadata()?.len();
    let progress = progress_bar(config.show_progress, file_len);
    let reader = BufReader::new(file);

    let mut summary = ImportSummary::default();
    let loaded = load_lines(&mut db, reader, &progress, &mut summary, config);
    close_progress(&progress, &loaded);
    loaded?;

    if config.build_index {
        info!("Creating index on hashes.md5");
        db.create_md5_index()?;
        summary.index_built = true;
    }

    summary.total_hashes = db.hash_count()?;

    info!("Finished reading {} hashes.", summary.lines_read);
    info!(
        inserted = summary.inserted,
        comments = summary.comments,
        wrong_length = summary.wrong_length,
        failed = summary.failed_inserts,
        total = summary.total_hashes,
        "Import summary"
    );

    Ok(summary)
}

/// Inserts every line of `reader` in one transaction and commits it.
fn load_lines<R: BufRead>(
    db: &mut HashDatabase,
    reader: R,
    progress: &ProgressBar,
    summary: &mut ImportSummary,
    config: &ImportConfig,
) -> Result<()> {
    let batch = db.begin_import()?;

    for line in reader.lines() {
        let line = line.with_context(|| {
            format!("Failed to read line {} of {:?}", summary.lines_read + 1, config.input)
        })?;
        summary.lines_read += 1;
        progress.inc(line.len() as u64 + 1);

        match classify_line(&line) {
            HashLine::Comment => summary.comments += 1,
            HashLine::WrongLength(len) => {
                summary.wrong_length += 1;
                warn!(
                    "Line: {} not the right length for an MD5 hash, length is {}.",
                    summary.lines_read, len
                );
            }
            HashLine::Candidate(hash) => match batch.insert_md5(hash) {
                Ok(()) => summary.inserted += 1,
                Err(e) => {
                    summary.failed_inserts += 1;
                    error!("Line {}: {}", summary.lines_read, e);
                }
            },
        }
    }

    info!("Finished inserts, committing changes.");
    batch.commit()
}

/// Clears the bar after a good load and leaves it in place, stopped, after a failed one.
fn close_progress<T>(progress: &ProgressBar, result: &Result<T>) {
    match result {
        Ok(_) => progress.finish_and_clear(),
        Err(_) => progress.abandon(),
    }
}

fn progress_bar(enabled: bool, len: u64) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
    {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => warn!("Invalid progress bar template: {}", e),
    }
    pb
}
