//! Lights, outlets and the unknown-device fallback
//!
//! All three carry on/off buttons, a milli-amp reading, an image and the
//! optional hours and watt-hours of energy metering.

use scraper::ElementRef;

use super::{find_buttons, find_image, find_milli_amp, metering_text, Scope};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::extraction::Extraction;
use crate::model::{Device, DeviceKind, SwitchState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchKind {
    Light,
    Outlet,
    /// Fallback for anything unrecognized; missing parts are not reported
    Unknown,
}

impl SwitchKind {
    fn wrap(self, state: SwitchState) -> DeviceKind {
        match self {
            SwitchKind::Light => DeviceKind::Light(state),
            SwitchKind::Outlet => DeviceKind::Outlet(state),
            SwitchKind::Unknown => DeviceKind::Unknown(state),
        }
    }
}

/// Cells one switchable device is read from
#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchCells<'a> {
    pub value: Option<ElementRef<'a>>,
    pub hours: Option<ElementRef<'a>>,
    pub watt_hours: Option<ElementRef<'a>>,
}

pub fn build_switchable(
    scope: &Scope<'_>,
    kind: SwitchKind,
    name: &str,
    specifier: &str,
    cells: SwitchCells<'_>,
) -> Extraction<Device> {
    let mut state = SwitchState {
        hours: metering_text(cells.hours),
        watt_hours: metering_text(cells.watt_hours),
        ..SwitchState::default()
    };

    let Some(cell) = cells.value else {
        let device = Device::new(name, Some(specifier.to_string()), kind.wrap(state));
        return Extraction::item(device);
    };

    let mut diagnostics = Vec::new();

    let (buttons, button_diagnostic) = find_buttons(scope, cell, specifier);
    state.on_button_label = buttons.on;
    state.off_button_label = buttons.off;
    diagnostics.extend(button_diagnostic);

    let image_ref = match find_image(scope, cell) {
        Ok(src) => Some(src),
        Err(diagnostic) => {
            diagnostics.push(diagnostic);
            None
        }
    };

    state.milli_amp = match find_milli_amp(scope, cell) {
        Ok(milli_amp) => Some(milli_amp),
        Err(diagnostic) => {
            diagnostics.push(diagnostic);
            None
        }
    };

    if kind == SwitchKind::Unknown {
        diagnostics = vec![Diagnostic::information(
            DiagnosticKind::UnknownElement,
            format!(
                "\"{}\" is not a standard element. Some of its properties might be missing.",
                specifier
            ),
        )];
    }

    let device = Device::new(name, Some(specifier.to_string()), kind.wrap(state)).with_image(image_ref);
    Extraction::new(vec![device], diagnostics)
}
