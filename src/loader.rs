//! Blocking page loader
//!
//! Fetches the status page over HTTP and turns every failure into a single
//! diagnostic so callers can show "why is this empty" next to an empty room
//! list. There are no retries.

use std::time::Duration;

use log::{debug, warn};
use scraper::Html;
use serde::Serialize;
use thiserror::Error;

use crate::config::LoaderConfig;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::model::Room;
use crate::rooms::PageParser;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("server answered with HTTP status {0}")]
    Http(u16),

    #[error("loading the page timed out")]
    Timeout,

    #[error("secure connection failed: {0}")]
    Tls(String),

    #[error("could not reach the server: {0}")]
    Network(String),

    #[error("failed to read the page body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

impl LoadError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            LoadError::Http(_) => DiagnosticKind::HttpError,
            LoadError::Timeout => DiagnosticKind::LoadingInterruption,
            LoadError::Tls(_) => DiagnosticKind::SslError,
            LoadError::Network(_) | LoadError::Body(_) => DiagnosticKind::NetworkError,
            LoadError::Other(_) => DiagnosticKind::UnknownError,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.kind(), self.to_string())
    }
}

impl From<ureq::Error> for LoadError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::StatusCode(status) => LoadError::Http(status),
            ureq::Error::Timeout(_) => LoadError::Timeout,
            ureq::Error::Tls(message) => LoadError::Tls(message.to_string()),
            ureq::Error::Rustls(e) => LoadError::Tls(e.to_string()),
            ureq::Error::HostNotFound => LoadError::Network("host not found".to_string()),
            ureq::Error::ConnectionFailed => LoadError::Network("connection failed".to_string()),
            // Handshake failures arrive wrapped in an io::Error.
            ureq::Error::Io(e) if is_tls_failure(&e) => LoadError::Tls(e.to_string()),
            ureq::Error::Io(e) => LoadError::Network(e.to_string()),
            other => LoadError::Other(other.to_string()),
        }
    }
}

fn is_tls_failure(error: &std::io::Error) -> bool {
    error
        .get_ref()
        .is_some_and(|inner| inner.downcast_ref::<rustls::Error>().is_some())
}

/// Outcome of loading and parsing a page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLoad {
    pub rooms: Vec<Room>,
    /// Loading diagnostics only; room findings stay on their rooms
    pub diagnostics: Vec<Diagnostic>,
}

/// Fetch the page body as text
pub fn fetch_page(config: &LoaderConfig) -> Result<String, LoadError> {
    if config.url.trim().is_empty() {
        return Err(LoadError::Other("no page url configured".to_string()));
    }

    let agent = ureq::Agent::new_with_config(
        ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .user_agent(config.user_agent.as_str())
            .build(),
    );

    debug!("fetching {}", config.url);
    let resp = agent.get(config.url.as_str()).call()?;
    if !resp.status().is_success() {
        return Err(LoadError::Http(resp.status().as_u16()));
    }

    resp.into_body()
        .read_to_string()
        .map_err(|e| LoadError::Body(e.to_string()))
}

/// Fetch and parse the page; a failed load yields no rooms and one diagnostic
pub fn load_rooms(parser: &PageParser, config: &LoaderConfig) -> PageLoad {
    match fetch_page(config) {
        Ok(body) => {
            let document = Html::parse_document(&body);
            PageLoad {
                rooms: parser.parse_document(Some(&document)),
                diagnostics: Vec::new(),
            }
        }
        Err(e) => {
            warn!("failed to load {}: {}", config.url, e);
            PageLoad {
                rooms: parser.parse_document(None),
                diagnostics: vec![e.to_diagnostic()],
            }
        }
    }
}
