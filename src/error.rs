use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to fetch {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to access {}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a valid gzip stream", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed Contents line {line} in {}: {reason}", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl ContentsError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContentsError::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn network(url: impl ToString, source: reqwest::Error) -> Self {
        ContentsError::Network {
            url: url.to_string(),
            source,
        }
    }
}
