use crate::error::ContentsError;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_MIRROR: &str = "http://ftp.uk.debian.org/debian/dists/stable/main/";
pub const DEFAULT_DOWNLOADS_DIR: &str = "downloads";
pub const DEFAULT_TOP: usize = 10;
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 30;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL the Contents file name is joined onto
    pub mirror: String,
    /// Where downloaded Contents files are cached
    pub downloads_dir: PathBuf,
    /// How many packages to list
    pub top: usize,
    /// Total request timeout, unbounded if absent
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: u64,
    /// Skip and count malformed lines instead of failing
    pub skip_malformed: bool,
    /// Count each member of `sec/a,sec/b` separately
    pub split_multi_package: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mirror: DEFAULT_MIRROR.to_owned(),
            downloads_dir: PathBuf::from(DEFAULT_DOWNLOADS_DIR),
            top: DEFAULT_TOP,
            timeout_secs: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT,
            skip_malformed: false,
            split_multi_package: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&data)
            .context(format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Build the effective configuration: config file first, then command line overrides
    pub fn from_opts(opts: &Opts) -> Result<Self> {
        let mut config = match &opts.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        config.apply_opts(opts);
        config.check_sanity()?;
        Ok(config)
    }

    pub fn apply_opts(&mut self, opts: &Opts) {
        if let Some(mirror) = &opts.mirror {
            self.mirror = mirror.clone();
        }
        if let Some(dir) = &opts.downloads_dir {
            self.downloads_dir = dir.clone();
        }
        if let Some(top) = opts.top {
            self.top = top;
        }
        if let Some(timeout) = opts.timeout {
            self.timeout_secs = Some(timeout);
        }
        self.skip_malformed |= opts.skip_malformed;
        self.split_multi_package |= opts.split_multi;
    }

    pub fn check_sanity(&self) -> Result<(), ContentsError> {
        if self.top < 1 {
            return Err(ContentsError::InvalidArgument(
                "number of packages to list must be at least 1".to_owned(),
            ));
        }
        self.mirror_url()?;
        Ok(())
    }

    /// Mirror as an absolute URL ending with `/`, so joining a file name keeps the whole path
    pub fn mirror_url(&self) -> Result<Url, ContentsError> {
        let mut mirror = self.mirror.trim().to_owned();
        if !mirror.ends_with('/') {
            mirror.push('/');
        }
        let url = Url::parse(&mirror).map_err(|e| {
            ContentsError::InvalidArgument(format!("bad mirror URL {:?}: {}", self.mirror, e))
        })?;
        if url.cannot_be_a_base() {
            return Err(ContentsError::InvalidArgument(format!(
                "mirror URL {:?} cannot be used as a base",
                self.mirror
            )));
        }
        Ok(url)
    }
}

#[derive(Parser, Debug)]
#[clap(about, version, author)]
pub struct Opts {
    /// Architecture contents file to get
    #[clap(short, long)]
    pub arch: String,
    /// Number of packages to list [default: 10]
    #[clap(short = 'n', long)]
    pub top: Option<usize>,
    /// TOML configuration file
    #[clap(short, long)]
    pub config: Option<PathBuf>,
    /// Mirror directory holding the Contents files
    #[clap(long)]
    pub mirror: Option<String>,
    /// Directory to store downloaded Contents files in
    #[clap(long)]
    pub downloads_dir: Option<PathBuf>,
    /// Total download timeout in seconds
    #[clap(long)]
    pub timeout: Option<u64>,
    /// Skip malformed lines instead of aborting
    #[clap(long)]
    pub skip_malformed: bool,
    /// Count every package of a comma separated package list on its own
    #[clap(long)]
    pub split_multi: bool,
    #[clap(short, long, help = "Print additional debug information")]
    pub verbose: bool,
}
