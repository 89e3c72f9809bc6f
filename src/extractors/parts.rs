//! Lookups for the pieces a device cell may contain
//!
//! Missing pieces are reported as a [`Diagnostic`] instead of a value; the
//! caller decides whether to keep or drop that finding.

use scraper::ElementRef;

use super::Scope;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::html::{non_empty, normalize_ws, own_text, text};

/// Labels of the on and off buttons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buttons {
    pub on: Option<String>,
    pub off: Option<String>,
}

/// `src` of the first image in the cell
pub fn find_image(scope: &Scope<'_>, cell: ElementRef<'_>) -> Result<String, Diagnostic> {
    let image = cell.select(&scope.selectors.image).next().ok_or_else(|| {
        Diagnostic::not_located(
            "No image could be found for the device but it was created anyway. \
             Please check the website and the documentation.",
        )
    })?;

    match image.value().attr("src").map(str::trim) {
        Some(src) if !src.is_empty() => Ok(src.to_string()),
        _ => Err(Diagnostic::not_located(
            "An image node was found but it has no source. The device was created anyway. \
             Please check the website and the documentation.",
        )),
    }
}

/// Up to two buttons, in document order: on first, off second
pub fn find_buttons(
    scope: &Scope<'_>,
    cell: ElementRef<'_>,
    specifier: &str,
) -> (Buttons, Option<Diagnostic>) {
    let mut labels = cell
        .select(&scope.selectors.buttons)
        .take(2)
        .map(button_label);

    let buttons = Buttons {
        on: labels.next().flatten(),
        off: labels.next().flatten(),
    };

    let found = buttons.on.iter().chain(&buttons.off).count();
    let diagnostic = match found {
        2 => None,
        1 => Some(Diagnostic::not_located(format!(
            "Only one button could be found for \"{}\". \
             Please check the website and the documentation.",
            specifier
        ))),
        _ => Some(Diagnostic::not_located(format!(
            "No buttons could be found for \"{}\". \
             Please check the website and the documentation.",
            specifier
        ))),
    };

    (buttons, diagnostic)
}

fn button_label(button: ElementRef<'_>) -> Option<String> {
    if button.value().name() == "input" {
        button
            .value()
            .attr("value")
            .map(normalize_ws)
            .and_then(non_empty)
    } else {
        non_empty(text(button))
    }
}

/// Milli-amp reading; its absence is only informational
pub fn find_milli_amp(scope: &Scope<'_>, cell: ElementRef<'_>) -> Result<String, Diagnostic> {
    cell.select(&scope.selectors.milli_amp)
        .next()
        .and_then(|span| non_empty(own_text(span)))
        .ok_or_else(|| {
            Diagnostic::information(
                DiagnosticKind::NoMilliAmpInformation,
                "The device shows no milli-amp reading.",
            )
        })
}

/// Text of an hours or watt-hours cell
pub fn metering_text(cell: Option<ElementRef<'_>>) -> Option<String> {
    cell.map(text).and_then(non_empty)
}
