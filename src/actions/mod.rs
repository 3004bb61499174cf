mod top;
pub use top::{render, top_packages, CountMode, PackageCount};

use crate::{
    contents,
    debug,
    error::ContentsError,
    info,
    types::{config::Config, Architecture},
    utils::downloader::Downloader,
    warn,
};

use anyhow::{Context, Result};
use std::{path::Path, time::Duration};

/// Header printed above the ranking
pub const REPORT_HEADER: &str = "Rank  Package  Num Files";

/// Counted Contents file
#[derive(Debug)]
pub struct Summary {
    pub records: usize,
    pub skipped: usize,
    pub ranked: Vec<PackageCount>,
}

/// Count packages in a downloaded Contents file.
///
/// With `skip_malformed`, bad lines are counted in [`Summary::skipped`] instead of failing.
pub fn summarize(
    path: &Path,
    mode: CountMode,
    skip_malformed: bool,
) -> Result<Summary, ContentsError> {
    info!("Processing {}", path.display());
    let mut reader = contents::extract(path)?;
    let mut records = 0;
    let mut skipped = 0;
    let mut failure = None;
    // Feed records until the first fatal error, which is kept for after counting
    let ranked = top_packages(
        (&mut reader)
            .map_while(|item| match item {
                Ok(record) => {
                    if records == 0 {
                        debug!("First entry: {} => {}", record.file_path, record.package_ref);
                    }
                    records += 1;
                    Some(Some(record))
                }
                Err(e @ ContentsError::MalformedLine { .. }) if skip_malformed => {
                    debug!("Skipping: {}", e);
                    skipped += 1;
                    Some(None)
                }
                Err(e) => {
                    failure = Some(e);
                    None
                }
            })
            .flatten(),
        mode,
    );
    if let Some(e) = failure {
        return Err(e);
    }
    debug!(
        "{} lines read, {} records, {} distinct packages, {} skipped lines",
        reader.lines_read(),
        records,
        ranked.len(),
        skipped
    );

    Ok(Summary {
        records,
        skipped,
        ranked,
    })
}

pub async fn fullfill_command(arch: &str, config: &Config) -> Result<()> {
    let arch: Architecture = match arch.parse() {
        Ok(arch) => arch,
        Err(e) => {
            crate::error!("{}", e);
            info!("Must be one of: {}", Architecture::valid_names());
            return Ok(());
        }
    };

    let downloader = Downloader::new(
        Duration::from_secs(config.connect_timeout_secs),
        config.timeout_secs.map(Duration::from_secs),
    )?;
    let report = top_report(arch, config, &downloader).await?;
    print!("{}", report);

    Ok(())
}

/// Fetch, count and render the ranking for `arch`, header included
pub async fn top_report(
    arch: Architecture,
    config: &Config,
    downloader: &Downloader,
) -> Result<String> {
    let mirror = config.mirror_url()?;
    let path = downloader
        .fetch(&mirror, arch, &config.downloads_dir)
        .await
        .context(format!("Failed to download Contents file for {}", arch))?;

    let mode = if config.split_multi_package {
        CountMode::PerPackage
    } else {
        CountMode::Combined
    };
    let skip_malformed = config.skip_malformed;
    let summary = {
        let path = path.clone();
        tokio::task::spawn_blocking(move || summarize(&path, mode, skip_malformed)).await?
    }
    .context(format!("Failed to process {}", path.display()))?;

    if summary.skipped > 0 {
        warn!(
            "Skipped {} malformed lines, counts cover the remaining {} records.",
            summary.skipped, summary.records
        );
    }
    info!(
        "Counted {} files over {} packages.",
        summary.records,
        summary.ranked.len()
    );

    Ok(format!(
        "{}\n{}",
        REPORT_HEADER,
        render(&summary.ranked, config.top)?
    ))
}
