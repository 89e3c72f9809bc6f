//! HTML scraper for a home automation status page
//!
//! Turns the page into typed rooms:
//! - info texts such as temperatures
//! - openings, shutters, lights and outlets
//! - diagnostics for every place the page deviated from the expected shape
//!
//! Parsing never fails on a malformed page. Only configuration problems
//! (invalid selectors, unreadable config) are errors.

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod ffi;
pub mod html;
pub mod loader;
pub mod model;
pub mod rooms;

pub use config::{Config, ExtractorConfig, LoaderConfig};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::{Error, Result};
pub use extraction::Extraction;
pub use ffi::*;
pub use loader::{fetch_page, load_rooms, LoadError, PageLoad};
pub use model::*;
pub use rooms::{extract_rooms, PageParser, RowKind};
