//! Status rows
//!
//! A status row mixes device kinds in one nested table. The specifier text
//! of each column, not the row class, decides which builder applies.

use log::debug;
use scraper::ElementRef;

use super::{build_opening, build_switchable, reconcile, Grid, Scope, Slot, SwitchCells, SwitchKind};
use crate::diagnostic::Diagnostic;
use crate::extraction::Extraction;
use crate::model::{Device, OpeningKind};

/// Device kind selected by a status specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Opening(OpeningKind),
    Switch(SwitchKind),
}

impl StatusKind {
    /// Case-insensitive keyword match on the specifier
    pub fn classify(scope: &Scope<'_>, specifier: &str) -> Self {
        let keywords = &scope.config.keywords;
        match keywords.opening_kind(specifier) {
            OpeningKind::Unknown if keywords.is_light(specifier) => StatusKind::Switch(SwitchKind::Light),
            OpeningKind::Unknown if keywords.is_outlet(specifier) => StatusKind::Switch(SwitchKind::Outlet),
            OpeningKind::Unknown => StatusKind::Switch(SwitchKind::Unknown),
            known => StatusKind::Opening(known),
        }
    }

    /// Label the device name starts with; `None` for the unknown fallback
    fn label(self) -> Option<&'static str> {
        match self {
            StatusKind::Opening(OpeningKind::Window) => Some("Fenster"),
            StatusKind::Opening(OpeningKind::Door) => Some("Tür"),
            StatusKind::Opening(OpeningKind::Unknown) => None,
            StatusKind::Switch(SwitchKind::Light) => Some("Licht"),
            StatusKind::Switch(SwitchKind::Outlet) => Some("Steckdose"),
            StatusKind::Switch(SwitchKind::Unknown) => None,
        }
    }
}

/// Extract every device of a status row
pub fn extract_status(scope: &Scope<'_>, row: ElementRef<'_>) -> Extraction<Device> {
    let Some(inner_table) = row.select(&scope.selectors.table).next() else {
        return Extraction::failed(Diagnostic::not_located(
            "No inner table was found in the status row. It should contain the status elements. \
             No status elements could be found. Please check the website and the documentation.",
        ));
    };

    match Grid::read(inner_table, "status elements") {
        Ok(grid) => reconcile(scope, &grid, "status elements", |slot| build_status_element(scope, slot)),
        Err(diagnostic) => Extraction::failed(diagnostic),
    }
}

/// Build the device of one status column
pub fn build_status_element(scope: &Scope<'_>, slot: Slot<'_>) -> Extraction<Device> {
    let kind = StatusKind::classify(scope, &slot.specifier);
    let name = scope.device_name(kind.label().unwrap_or(&slot.specifier));
    debug!("status element {:?} classified as {:?}", slot.specifier, kind);

    match kind {
        StatusKind::Opening(opening_kind) => {
            build_opening(scope, &name, opening_kind, Some(slot.specifier), slot.value)
        }
        StatusKind::Switch(switch_kind) => {
            let cells = SwitchCells {
                value: slot.value,
                hours: slot.hours,
                watt_hours: slot.watt_hours,
            };
            build_switchable(scope, switch_kind, &name, &slot.specifier, cells)
        }
    }
}
