//! Shutter rows
//!
//! A shutter cell holds a form: its button sets the shutter and the form's
//! own text carries the position and the time, e.g. `Raffstore 45% (12:30)`.

use scraper::ElementRef;

use super::{reconcile, Grid, Scope};
use crate::diagnostic::Diagnostic;
use crate::extraction::Extraction;
use crate::html::{leading_cells, non_empty, own_text, text};
use crate::model::{Device, DeviceKind, ShutterState};

pub fn extract_shutters(scope: &Scope<'_>, row: ElementRef<'_>) -> Extraction<Device> {
    let (label_cell, value_cell) = leading_cells(row);

    let Some(label_cell) = label_cell else {
        return Extraction::failed(Diagnostic::not_located(
            "A table row that should contain shutters has no cells. No shutters could be found. \
             Please check the website and the documentation.",
        ));
    };
    let Some(value_cell) = value_cell else {
        return Extraction::failed(Diagnostic::not_located(
            "No second data cell was found which should contain a single shutter or a table of \
             shutters. No shutters could be found. Please check the website and the documentation.",
        ));
    };

    let name = scope.device_name(&own_text(label_cell));

    match value_cell.select(&scope.selectors.table).next() {
        Some(inner_table) => match Grid::read(inner_table, "shutters") {
            Ok(grid) => reconcile(scope, &grid, "shutters", |slot| {
                build_shutter(scope, &name, Some(slot.specifier), slot.value)
            }),
            Err(diagnostic) => Extraction::failed(diagnostic),
        },
        None => build_shutter(scope, &name, None, Some(value_cell)),
    }
}

pub fn build_shutter(
    scope: &Scope<'_>,
    name: &str,
    specifier: Option<String>,
    cell: Option<ElementRef<'_>>,
) -> Extraction<Device> {
    let Some(cell) = cell else {
        return Extraction::item(Device::new(
            name,
            specifier,
            DeviceKind::Shutter(ShutterState::default()),
        ));
    };

    let Some(form) = cell.select(&scope.selectors.shutter_form).next() else {
        let device = Device::new(name, specifier, DeviceKind::Shutter(ShutterState::default()));
        return Extraction::item(device).with_diagnostic(Diagnostic::not_located(
            "The form which should contain the state of the shutter could not be found. \
             The shutter was created without it. Please check the website and the documentation.",
        ));
    };

    let form_text = own_text(form);
    let state = ShutterState {
        set_button_label: form
            .select(&scope.selectors.shutter_button)
            .next()
            .map(text)
            .and_then(non_empty),
        percentage: parse_percentage(&form_text),
        time: parse_time(&form_text),
    };

    Extraction::item(Device::new(name, specifier, DeviceKind::Shutter(state)))
}

/// Position of the shutter
///
/// The text between the first two `%` signs; with a single `%` the number
/// right in front of it.
pub fn parse_percentage(form_text: &str) -> Option<String> {
    let first = form_text.find('%')?;
    let rest = &form_text[first + 1..];

    if let Some(second) = rest.find('%') {
        return non_empty(rest[..second].trim().to_string());
    }

    let before = form_text[..first].trim_end();
    let start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.' || *c == ',')
        .last()
        .map(|(i, _)| i)?;
    non_empty(before[start..].to_string())
}

/// First parenthesised part, parentheses included
pub fn parse_time(form_text: &str) -> Option<String> {
    let open = form_text.find('(')?;
    let close = form_text[open..].find(')')? + open;
    Some(form_text[open..=close].to_string())
}
