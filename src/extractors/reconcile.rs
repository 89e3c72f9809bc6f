//! Pairing specifier cells with value cells
//!
//! Multi-instance rows hold a nested table: the first row names the
//! instances, the second row holds their values and status rows may add
//! hours and watt-hours rows. The columns do not always line up. Nothing
//! found is ever dropped; every imperfect pairing is explained by exactly
//! one `CountMismatch` warning.

use scraper::ElementRef;

use super::Scope;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::extraction::Extraction;
use crate::html::{own_text, row_cells, table_rows};

/// Cells of a nested multi-instance table
#[derive(Debug, Clone)]
pub struct Grid<'a> {
    pub specifiers: Vec<ElementRef<'a>>,
    pub values: Vec<ElementRef<'a>>,
    pub hours: Vec<ElementRef<'a>>,
    pub watt_hours: Vec<ElementRef<'a>>,
}

impl<'a> Grid<'a> {
    /// Read the rows of `table`; `noun` names the devices in diagnostics
    pub fn read(table: ElementRef<'a>, noun: &str) -> Result<Self, Diagnostic> {
        let mut rows = table_rows(table).into_iter();

        let specifiers = rows.next().map(row_cells).ok_or_else(|| {
            Diagnostic::not_located(format!(
                "The inner table contains no rows. No {} could be found. \
                 Please check the website and the documentation.",
                noun
            ))
        })?;

        let values = rows.next().map(row_cells).ok_or_else(|| {
            Diagnostic::not_located(format!(
                "The second row of the inner table which should contain the {} could not be found. \
                 Please check the website and the documentation.",
                noun
            ))
        })?;

        let hours = rows.next().map(row_cells).unwrap_or_default();
        let watt_hours = rows.next().map(row_cells).unwrap_or_default();

        Ok(Self {
            specifiers,
            values,
            hours,
            watt_hours,
        })
    }
}

/// One aligned column of a grid
#[derive(Debug, Clone)]
pub struct Slot<'a> {
    pub specifier: String,
    /// `None` when there were more specifiers than values
    pub value: Option<ElementRef<'a>>,
    pub hours: Option<ElementRef<'a>>,
    pub watt_hours: Option<ElementRef<'a>>,
}

/// Align the grid columns and build one record set per column
///
/// The count-mismatch warning, if any, comes after the records it explains.
pub fn reconcile<'a, T>(
    scope: &Scope<'_>,
    grid: &Grid<'a>,
    noun: &str,
    build: impl FnMut(Slot<'a>) -> Extraction<T>,
) -> Extraction<T> {
    let prefix = &scope.config.auto_specifier_prefix;
    let named = grid.specifiers.len();
    let valued = grid.values.len();

    let slot = |index: usize, specifier: String| Slot {
        specifier,
        value: grid.values.get(index).copied(),
        hours: grid.hours.get(index).copied(),
        watt_hours: grid.watt_hours.get(index).copied(),
    };

    let (slots, mismatch): (Vec<Slot<'a>>, Option<Diagnostic>) = if named == valued {
        let slots = grid
            .specifiers
            .iter()
            .enumerate()
            .map(|(i, cell)| slot(i, own_text(*cell)))
            .collect();
        (slots, None)
    } else if valued > named {
        let slots = (0..valued)
            .map(|i| match grid.specifiers.get(i) {
                Some(cell) => slot(i, own_text(*cell)),
                None => slot(i, format!("{} {}", prefix, i - named + 1)),
            })
            .collect();
        let message = if named == 0 {
            format!(
                "No specifiers were found for the {}. Automatic specifiers were generated for all {} of them. \
                 Please check the website and the documentation.",
                noun, valued
            )
        } else {
            format!(
                "There were more {} ({}) than specifiers ({}). All of them were extracted and the ones \
                 without a specifier got an automatic specifier. Please check the website and the documentation.",
                noun, valued, named
            )
        };
        (slots, Some(Diagnostic::warning(DiagnosticKind::CountMismatch, message)))
    } else {
        let slots = grid
            .specifiers
            .iter()
            .enumerate()
            .map(|(i, cell)| slot(i, own_text(*cell)))
            .collect();
        let message = format!(
            "There were more specifiers ({}) than {} ({}). The specifiers without a value were \
             extracted with their name only. Please check the website and the documentation.",
            named, noun, valued
        );
        (slots, Some(Diagnostic::warning(DiagnosticKind::CountMismatch, message)))
    };

    let built: Extraction<T> = slots.into_iter().map(build).collect();
    built.with_diagnostics(mismatch)
}
