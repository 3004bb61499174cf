use crate::{debug, error::ContentsError, info, success, types::Architecture};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Response, Url};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::{fs::File, io::AsyncWriteExt};

/// Location of the Contents file for `arch` under `mirror`
pub fn contents_url(mirror: &Url, arch: Architecture) -> Result<Url, ContentsError> {
    mirror.join(&arch.contents_filename()).map_err(|e| {
        ContentsError::InvalidArgument(format!("cannot build URL from {}: {}", mirror, e))
    })
}

pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(connect_timeout: Duration, timeout: Option<Duration>) -> Result<Self, ContentsError> {
        let mut builder = Client::builder().connect_timeout(connect_timeout);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ContentsError::network("<client setup>", e))?;
        Ok(Downloader { client })
    }

    #[cfg(test)]
    pub fn with_client(client: Client) -> Self {
        Downloader { client }
    }

    /// Download the Contents file of `arch` into `download_path`, replacing any earlier copy
    pub async fn fetch(
        &self,
        mirror: &Url,
        arch: Architecture,
        download_path: &Path,
    ) -> Result<PathBuf, ContentsError> {
        let url = contents_url(mirror, arch)?;
        // Create download dir
        if !download_path.is_dir() {
            tokio::fs::create_dir_all(download_path)
                .await
                .map_err(|e| ContentsError::filesystem(download_path, e))?;
        }
        let file_path = download_path.join(arch.contents_filename());

        info!("Downloading {} -> {}", url, file_path.display());
        let mut resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ContentsError::network(&url, e))?;
        resp.error_for_status_ref()
            .map_err(|e| ContentsError::network(&url, e))?;
        debug!("{} answered {}", url, resp.status());

        let bar = match resp.content_length() {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::new_spinner(),
        };
        if let Ok(style) = ProgressStyle::with_template(
            " {wide_msg} {total_bytes:>10} {binary_bytes_per_sec:>12} {eta:>4} [{bar:30.white/black}] {percent:>3}%",
        ) {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar.set_message(arch.contents_filename());

        // Stream into a side file so a broken transfer keeps the previous copy
        let part_path = file_path.with_extension("gz.part");
        let written = match stream_body(&mut resp, &url, &part_path, &bar).await {
            Ok(written) => written,
            Err(e) => {
                bar.abandon();
                if tokio::fs::remove_file(&part_path).await.is_err() {
                    debug!("Nothing to clean up at {}", part_path.display());
                }
                return Err(e);
            }
        };
        bar.finish_and_clear();
        tokio::fs::rename(&part_path, &file_path)
            .await
            .map_err(|e| ContentsError::filesystem(&file_path, e))?;

        success!("Downloaded {} ({} bytes)", arch.contents_filename(), written);
        Ok(file_path)
    }
}

async fn stream_body(
    resp: &mut Response,
    url: &Url,
    part_path: &Path,
    bar: &ProgressBar,
) -> Result<u64, ContentsError> {
    let mut f = File::create(part_path)
        .await
        .map_err(|e| ContentsError::filesystem(part_path, e))?;
    let mut written = 0u64;
    while let Some(chunk) = resp
        .chunk()
        .await
        .map_err(|e| ContentsError::network(url, e))?
    {
        f.write_all(&chunk)
            .await
            .map_err(|e| ContentsError::filesystem(part_path, e))?;
        written += chunk.len() as u64;
        bar.inc(chunk.len() as u64);
    }
    f.flush()
        .await
        .map_err(|e| ContentsError::filesystem(part_path, e))?;
    Ok(written)
}
