//! Non-fatal findings raised while extracting a page
//!
//! Diagnostics are plain data. They describe every place where the page
//! deviated from the expected shape and are attached to the owning room.

use serde::{Deserialize, Serialize};

/// How serious a finding is for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Information,
    Warning,
    Error,
}

/// What kind of deviation was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A structurally expected node or cell is missing
    ElementNotLocated,
    /// Specifier and value columns have different lengths
    CountMismatch,
    /// Row was processed with the unknown-device fallback
    UnknownElement,
    /// Device has no milli-amp reading (expected on many devices)
    NoMilliAmpInformation,
    UnknownRoom,
    LoadingInterruption,
    NetworkError,
    HttpError,
    SslError,
    UnknownError,
}

/// A single finding with a human readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
        }
    }

    pub fn information(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Information, kind, message)
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, kind, message)
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, message)
    }

    /// Warning for a node the page should contain but does not
    pub fn not_located(message: impl Into<String>) -> Self {
        Self::warning(DiagnosticKind::ElementNotLocated, message)
    }
}
