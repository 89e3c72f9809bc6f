//! Errors at the crate boundary
//!
//! Problems with the page itself are never errors, see [`crate::diagnostic`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid selector `{selector}` for {field}: {message}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        message: String,
    },

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read configuration file {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
