//! Row extractors
//!
//! Each module handles one kind of content-table row and returns an
//! [`Extraction`](crate::extraction::Extraction) with records and diagnostics.

mod info_text;
mod opening;
mod parts;
mod reconcile;
mod shutter;
mod status;
mod switchable;

pub use info_text::*;
pub use opening::*;
pub use parts::*;
pub use reconcile::*;
pub use shutter::*;
pub use status::*;
pub use switchable::*;

use crate::config::{ExtractorConfig, Selectors};

/// What every extractor needs to know about where it is running
#[derive(Debug, Clone, Copy)]
pub struct Scope<'s> {
    pub config: &'s ExtractorConfig,
    pub selectors: &'s Selectors,
    pub room_name: &'s str,
}

impl<'s> Scope<'s> {
    pub fn new(config: &'s ExtractorConfig, selectors: &'s Selectors, room_name: &'s str) -> Self {
        Self {
            config,
            selectors,
            room_name,
        }
    }

    /// `"<label> <room>"`, the naming used for every device of a room
    pub fn device_name(&self, label: &str) -> String {
        if label.is_empty() {
            self.room_name.to_string()
        } else {
            format!("{} {}", label, self.room_name)
        }
    }
}
