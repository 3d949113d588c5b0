use std::path::PathBuf;

use expanse_blocks::BlockConfigError;
use expanse_carvers::CarverConfigError;
use expanse_heights::ScaleRangeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("heights: {0}")]
    Range(#[from] ScaleRangeError),
    #[error("carvers: {0}")]
    Carvers(#[from] CarverConfigError),
    #[error("blocks: {0}")]
    Blocks(#[from] BlockConfigError),
}

/// The datapack cannot be used as a placement registry at all.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("{0} has no placed_feature directory")]
    MissingPlacementDir(PathBuf),
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("tag file {path}: {source}")]
    BadTag {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("encoding {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("output {out} lies inside watched pack {pack}")]
    OutputInsidePack { out: PathBuf, pack: PathBuf },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("watcher: {0}")]
    Watch(#[from] notify::Error),
    #[error("worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
