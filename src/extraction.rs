//! Partial results paired with their diagnostics
//!
//! Sibling searches are merged with [`Extraction::combine`] in document
//! order, so the final lists read top to bottom like the page.

use serde::Serialize;

use crate::diagnostic::Diagnostic;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Default for Extraction<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl<T> Extraction<T> {
    pub fn new(items: Vec<T>, diagnostics: Vec<Diagnostic>) -> Self {
        Self { items, diagnostics }
    }

    /// A single item without findings
    pub fn item(item: T) -> Self {
        Self::new(vec![item], Vec::new())
    }

    /// Nothing extracted, one finding explaining why
    pub fn failed(diagnostic: Diagnostic) -> Self {
        Self::new(Vec::new(), vec![diagnostic])
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) -> Self {
        self.diagnostics.extend(diagnostics);
        self
    }

    /// Append `other` after `self`, keeping both streams in order
    pub fn combine(mut self, other: Extraction<T>) -> Self {
        self.items.extend(other.items);
        self.diagnostics.extend(other.diagnostics);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.diagnostics.is_empty()
    }
}

impl<T> FromIterator<Extraction<T>> for Extraction<T> {
    fn from_iter<I: IntoIterator<Item = Extraction<T>>>(iter: I) -> Self {
        iter.into_iter().fold(Extraction::default(), Extraction::combine)
    }
}
