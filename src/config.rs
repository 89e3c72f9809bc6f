//! Configuration
//!
//! The defaults describe the markup conventions of the home automation
//! status page. Everything can be overridden from JSON when a page variant
//! uses other class names or wording.

use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::OpeningKind;

/// Top level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractorConfig,
    pub loader: LoaderConfig,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub selectors: SelectorConfig,
    pub row_classes: RowClasses,
    pub keywords: Keywords,
    /// Prefix for specifiers made up when the page has none
    pub auto_specifier_prefix: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorConfig::default(),
            row_classes: RowClasses::default(),
            keywords: Keywords::default(),
            auto_specifier_prefix: "Automatic Specifier".to_string(),
        }
    }
}

/// CSS selectors, relative to the element they are applied to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub room: String,
    pub room_name: String,
    pub content_table: String,
    pub image: String,
    pub buttons: String,
    pub milli_amp: String,
    pub shutter_form: String,
    pub shutter_button: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            room: "div.room".to_string(),
            room_name: "span.roomName".to_string(),
            content_table: "table".to_string(),
            image: "img".to_string(),
            buttons: "button, input[type=button]".to_string(),
            milli_amp: "span[id*=mA]".to_string(),
            shutter_form: "form".to_string(),
            shutter_button: "button".to_string(),
        }
    }
}

/// Row classes of the content table, matched against the class attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RowClasses {
    pub info_text: Vec<String>,
    pub shutter: Vec<String>,
    pub opening: Vec<String>,
    pub status: Vec<String>,
}

impl Default for RowClasses {
    fn default() -> Self {
        Self {
            info_text: vec!["infoText".to_string(), "temperature".to_string()],
            shutter: vec!["shutter".to_string()],
            opening: vec!["opening".to_string()],
            status: vec!["status".to_string()],
        }
    }
}

/// Case-insensitive substrings that classify labels and specifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    pub window: Vec<String>,
    pub door: Vec<String>,
    pub light: Vec<String>,
    pub outlet: Vec<String>,
    pub overall_status: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            window: vec!["fenster".to_string()],
            door: vec!["tür".to_string(), "tuer".to_string()],
            light: vec!["licht".to_string()],
            outlet: vec!["steckdose".to_string()],
            overall_status: vec!["gesamtstatus".to_string()],
        }
    }
}

impl Keywords {
    pub fn opening_kind(&self, label: &str) -> OpeningKind {
        if contains_any(label, &self.window) {
            OpeningKind::Window
        } else if contains_any(label, &self.door) {
            OpeningKind::Door
        } else {
            OpeningKind::Unknown
        }
    }

    pub fn is_light(&self, text: &str) -> bool {
        contains_any(text, &self.light)
    }

    pub fn is_outlet(&self, text: &str) -> bool {
        contains_any(text, &self.outlet)
    }

    pub fn is_overall_status(&self, room_name: &str) -> bool {
        contains_any(room_name, &self.overall_status)
    }
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    let text = text.to_lowercase();
    keywords
        .iter()
        .any(|keyword| text.contains(&keyword.to_lowercase()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user_agent: concat!("smarthome_parser/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

/// Selectors compiled once per parser
#[derive(Debug, Clone)]
pub struct Selectors {
    pub room: Selector,
    pub room_name: Selector,
    pub content_table: Selector,
    pub image: Selector,
    pub buttons: Selector,
    pub milli_amp: Selector,
    pub shutter_form: Selector,
    pub shutter_button: Selector,
    pub table: Selector,
}

impl Selectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            room: parse_selector("room", &config.room)?,
            room_name: parse_selector("room_name", &config.room_name)?,
            content_table: parse_selector("content_table", &config.content_table)?,
            image: parse_selector("image", &config.image)?,
            buttons: parse_selector("buttons", &config.buttons)?,
            milli_amp: parse_selector("milli_amp", &config.milli_amp)?,
            shutter_form: parse_selector("shutter_form", &config.shutter_form)?,
            shutter_button: parse_selector("shutter_button", &config.shutter_button)?,
            table: parse_selector("table", "table")?,
        })
    }
}

fn parse_selector(field: &'static str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::InvalidSelector {
        field,
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
