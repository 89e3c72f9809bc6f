//! Typed model of the smart home page
//!
//! Every value field is an `Option<String>`: the page legitimately omits
//! them and the extractors never invent a value they could not locate.

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;

/// One room block of the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub infos: Vec<InfoText>,
    pub devices: Vec<Device>,
    pub diagnostics: Vec<Diagnostic>,
    /// True for the "Gesamtstatus" room that is moved to the front
    pub is_overall_status: bool,
}

/// A scalar reading such as a temperature
///
/// Parallel readings of the same kind share a label and differ by specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoText {
    pub label: String,
    pub specifier: Option<String>,
    pub value: Option<String>,
}

impl InfoText {
    pub fn new(label: impl Into<String>, specifier: Option<String>, value: Option<String>) -> Self {
        Self {
            label: label.into(),
            specifier,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningKind {
    Window,
    Door,
    Unknown,
}

/// Values read from a shutter form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutterState {
    pub set_button_label: Option<String>,
    pub percentage: Option<String>,
    pub time: Option<String>,
}

/// Values shared by everything that can be switched on and off
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchState {
    pub on_button_label: Option<String>,
    pub off_button_label: Option<String>,
    pub milli_amp: Option<String>,
    pub hours: Option<String>,
    pub watt_hours: Option<String>,
}

/// Variant-specific part of a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceKind {
    Opening { opening_kind: OpeningKind },
    Shutter(ShutterState),
    Light(SwitchState),
    Outlet(SwitchState),
    Unknown(SwitchState),
}

/// A device of a room: shared base fields plus its kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub specifier: Option<String>,
    pub image_ref: Option<String>,
    #[serde(flatten)]
    pub kind: DeviceKind,
}

impl Device {
    pub fn new(name: impl Into<String>, specifier: Option<String>, kind: DeviceKind) -> Self {
        Self {
            name: name.into(),
            specifier,
            image_ref: None,
            kind,
        }
    }

    pub fn with_image(mut self, image_ref: Option<String>) -> Self {
        self.image_ref = image_ref;
        self
    }

    pub fn opening_kind(&self) -> Option<OpeningKind> {
        match self.kind {
            DeviceKind::Opening { opening_kind } => Some(opening_kind),
            _ => None,
        }
    }

    pub fn shutter(&self) -> Option<&ShutterState> {
        match &self.kind {
            DeviceKind::Shutter(state) => Some(state),
            _ => None,
        }
    }

    /// Switch values for lights, outlets and unknown devices
    pub fn switch(&self) -> Option<&SwitchState> {
        match &self.kind {
            DeviceKind::Light(state) | DeviceKind::Outlet(state) | DeviceKind::Unknown(state) => {
                Some(state)
            }
            _ => None,
        }
    }
}
