//! Room assembly: splits the page into room blocks and dispatches rows
//!
//! Extraction is a pure function of the document. A [`PageParser`] only
//! holds its configuration and compiled selectors and can be shared between
//! threads.

use log::{debug, info, trace};
use scraper::{ElementRef, Html};

use crate::config::{ExtractorConfig, Selectors};
use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::extractors::{extract_info_text, extract_openings, extract_shutters, extract_status, Scope};
use crate::html::{table_rows, text};
use crate::model::{Device, InfoText, Room};

/// Row kinds of a room's content table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    InfoText,
    Shutter,
    Opening,
    Status,
}

#[derive(Debug, Clone)]
pub struct PageParser {
    config: ExtractorConfig,
    selectors: Selectors,
}

impl PageParser {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let selectors = Selectors::compile(&config.selectors)?;
        Ok(Self { config, selectors })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ExtractorConfig::default())
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn parse_html(&self, html: &str) -> Vec<Room> {
        let document = Html::parse_document(html);
        self.parse_document(Some(&document))
    }

    /// All rooms of the page, the overall status room first
    ///
    /// A missing document means the page could not be loaded; the loader
    /// has already reported why, so no diagnostics are added here.
    pub fn parse_document(&self, document: Option<&Html>) -> Vec<Room> {
        let Some(document) = document else {
            debug!("no document, returning no rooms");
            return Vec::new();
        };

        let mut rooms = Vec::new();
        let mut overall_status_placed = false;

        for block in document.select(&self.selectors.room) {
            let Some(name) = self.room_name(block) else {
                debug!("skipping room block without a name");
                continue;
            };

            let is_overall_status =
                !overall_status_placed && self.config.keywords.is_overall_status(&name);
            let room = self.parse_room(block, name, is_overall_status);

            if is_overall_status {
                overall_status_placed = true;
                rooms.insert(0, room);
            } else {
                rooms.push(room);
            }
        }

        info!(
            "parsed {} rooms with {} diagnostics",
            rooms.len(),
            rooms.iter().map(|room| room.diagnostics.len()).sum::<usize>()
        );
        rooms
    }

    fn room_name(&self, block: ElementRef<'_>) -> Option<String> {
        block
            .select(&self.selectors.room_name)
            .next()
            .map(text)
            .filter(|name| !name.is_empty())
    }

    fn parse_room(&self, block: ElementRef<'_>, name: String, is_overall_status: bool) -> Room {
        let rows = block
            .select(&self.selectors.content_table)
            .next()
            .map(table_rows)
            .unwrap_or_default();

        if rows.is_empty() {
            return Room {
                name,
                infos: Vec::new(),
                devices: Vec::new(),
                diagnostics: vec![Diagnostic::not_located(
                    "A room was found but no information table for it could be found. \
                     Please check the website and the documentation.",
                )],
                is_overall_status,
            };
        }

        let scope = Scope::new(&self.config, &self.selectors, &name);
        let mut infos: Vec<InfoText> = Vec::new();
        let mut devices: Vec<Device> = Vec::new();
        let mut diagnostics = Vec::new();

        for row in rows {
            let Some(kind) = self.row_kind(row) else {
                trace!("ignoring unclassified row in room {:?}", name);
                continue;
            };
            debug!("room {:?}: {:?} row", name, kind);

            // Diagnostics are collected in row order across both streams.
            match kind {
                RowKind::InfoText => {
                    let found = extract_info_text(&scope, row);
                    infos.extend(found.items);
                    diagnostics.extend(found.diagnostics);
                }
                RowKind::Shutter | RowKind::Opening | RowKind::Status => {
                    let found = match kind {
                        RowKind::Shutter => extract_shutters(&scope, row),
                        RowKind::Opening => extract_openings(&scope, row),
                        _ => extract_status(&scope, row),
                    };
                    devices.extend(found.items);
                    diagnostics.extend(found.diagnostics);
                }
            }
        }

        Room {
            infos,
            devices,
            diagnostics,
            name,
            is_overall_status,
        }
    }

    /// First matching class wins, in the order info text, shutter, opening, status
    pub fn row_kind(&self, row: ElementRef<'_>) -> Option<RowKind> {
        let classes = &self.config.row_classes;
        let has_any = |names: &[String]| row.value().classes().any(|class| names.iter().any(|n| n == class));

        if has_any(&classes.info_text) {
            Some(RowKind::InfoText)
        } else if has_any(&classes.shutter) {
            Some(RowKind::Shutter)
        } else if has_any(&classes.opening) {
            Some(RowKind::Opening)
        } else if has_any(&classes.status) {
            Some(RowKind::Status)
        } else {
            None
        }
    }
}

/// Parse a page with the default configuration
pub fn extract_rooms(html: &str) -> Result<Vec<Room>> {
    Ok(PageParser::with_defaults()?.parse_html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{DiagnosticKind, Severity};
    use crate::model::{DeviceKind, OpeningKind};

    fn parse(html: &str) -> Vec<Room> {
        extract_rooms(html).unwrap()
    }

    fn room(name: &str, rows: &str) -> String {
        format!(
            r#"<div class="room"><div class="header"><span class="roomName">{}</span></div><table>{}</table></div>"#,
            name, rows
        )
    }

    #[test]
    fn test_single_temperature() {
        let rooms = parse(&room(
            "Wohnzimmer",
            r#"<tr class="temperature"><td>Wohnzimmer</td><td>21.5</td></tr>"#,
        ));

        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "Wohnzimmer");
        assert_eq!(
            rooms[0].infos,
            vec![InfoText::new("Wohnzimmer", None, Some("21.5".to_string()))]
        );
        assert!(rooms[0].devices.is_empty());
        assert!(rooms[0].diagnostics.is_empty());
        assert!(!rooms[0].is_overall_status);
    }

    #[test]
    fn test_shutter_row() {
        let rooms = parse(&room(
            "Wohnzimmer",
            r#"<tr class="shutter"><td>Rollladen</td><td><form><button>Setzen</button>Raffstore 45% (12:30)</form></td></tr>"#,
        ));

        let state = rooms[0].devices[0].shutter().unwrap();
        assert_eq!(state.set_button_label.as_deref(), Some("Setzen"));
        assert_eq!(state.percentage.as_deref(), Some("45"));
        assert_eq!(state.time.as_deref(), Some("(12:30)"));
    }

    #[test]
    fn test_opening_without_image() {
        let rooms = parse(&room(
            "Küche",
            r#"<tr class="opening"><td>Fenster</td><td>zu</td></tr>"#,
        ));

        let devices = &rooms[0].devices;
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].opening_kind(), Some(OpeningKind::Window));
        assert_eq!(devices[0].image_ref, None);
        assert_eq!(rooms[0].diagnostics.len(), 1);
        assert_eq!(rooms[0].diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_status_row_with_missing_value() {
        let rooms = parse(&room(
            "Küche",
            r#"<tr class="status"><td>Status</td><td><table>
                <tr><td>Fenster Küche</td><td>Licht Küche</td><td>Heizung Küche</td></tr>
                <tr><td><img src="/f.png"></td><td><img src="/l.png"><button>An</button><button>Aus</button><span id="x_mA">3</span></td></tr>
            </table></td></tr>"#,
        ));

        let devices = &rooms[0].devices;
        assert_eq!(devices.len(), 3);
        assert_eq!(devices[0].opening_kind(), Some(OpeningKind::Window));
        assert!(matches!(devices[1].kind, DeviceKind::Light(_)));
        assert!(matches!(devices[2].kind, DeviceKind::Unknown(_)));
        assert_eq!(devices[2].specifier.as_deref(), Some("Heizung Küche"));

        let mismatches: Vec<_> = rooms[0]
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::CountMismatch)
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].severity, Severity::Warning);
    }

    #[test]
    fn test_room_without_table() {
        let rooms = parse(
            r#"<div class="room"><span class="roomName">Keller</span><p>nichts</p></div>"#,
        );

        assert_eq!(rooms.len(), 1);
        assert!(rooms[0].infos.is_empty());
        assert!(rooms[0].devices.is_empty());
        assert_eq!(rooms[0].diagnostics.len(), 1);
        assert_eq!(rooms[0].diagnostics[0].kind, DiagnosticKind::ElementNotLocated);
        assert_eq!(rooms[0].diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_room_with_empty_table() {
        let rooms = parse(&room("Keller", ""));
        assert_eq!(rooms[0].diagnostics.len(), 1);
    }

    #[test]
    fn test_overall_status_moves_to_front() {
        let page = [
            room("Küche", r#"<tr class="temperature"><td>T</td><td>20</td></tr>"#),
            room("Bad", r#"<tr class="temperature"><td>T</td><td>23</td></tr>"#),
            room("Gesamtstatus", r#"<tr class="temperature"><td>Außen</td><td>4</td></tr>"#),
            room("Gesamtstatus 2", r#"<tr class="temperature"><td>Außen</td><td>5</td></tr>"#),
        ]
        .concat();

        let rooms = parse(&page);
        let names: Vec<_> = rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Gesamtstatus", "Küche", "Bad", "Gesamtstatus 2"]);
        assert!(rooms[0].is_overall_status);
        assert!(!rooms[3].is_overall_status);
    }

    #[test]
    fn test_nameless_blocks_and_unclassified_rows_are_skipped() {
        let page = [
            r#"<div class="room"><table><tr class="temperature"><td>T</td><td>1</td></tr></table></div>"#.to_string(),
            r#"<div class="room"><span class="roomName">   </span><table><tr><td>x</td></tr></table></div>"#.to_string(),
            room(
                "Flur",
                r#"<tr class="decoration"><td>Bild</td><td>-</td></tr>
                   <tr class="infoText"><td>Luftfeuchte</td><td>45 %</td></tr>"#,
            ),
        ]
        .concat();

        let rooms = parse(&page);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "Flur");
        assert_eq!(rooms[0].infos.len(), 1);
        assert!(rooms[0].diagnostics.is_empty());
    }

    #[test]
    fn test_diagnostics_follow_row_order() {
        let rooms = parse(&room(
            "Küche",
            r#"<tr class="opening"><td>Fenster</td><td>zu</td></tr>
               <tr class="temperature"><td>Küche</td></tr>
               <tr class="shutter"><td>Rollladen</td></tr>"#,
        ));

        let messages: Vec<_> = rooms[0].diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("image"));
        assert!(messages[1].contains("reading"));
        assert!(messages[2].contains("shutter"));
    }

    #[test]
    fn test_each_row_diagnostic_reported_once() {
        let rooms = parse(&room(
            "Bad",
            r#"<tr class="opening"><td>Fenster</td><td>zu</td></tr>
               <tr class="temperature"><td>Bad</td><td><table><tr><td>a</td><td>1</td></tr></table></td></tr>
               <tr class="opening"><td>Tür</td><td><table>
                   <tr><td>Flur</td><td>Garten</td></tr>
                   <tr><td><img src="/t.png"></td></tr>
               </table></td></tr>"#,
        ));

        let kinds: Vec<_> = rooms[0].diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::ElementNotLocated, DiagnosticKind::CountMismatch]
        );
        assert_eq!(rooms[0].infos.len(), 1);
        assert_eq!(rooms[0].devices.len(), 3);
    }

    #[test]
    fn test_no_document() {
        let parser = PageParser::with_defaults().unwrap();
        assert!(parser.parse_document(None).is_empty());
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let page = [
            room("Gesamtstatus", r#"<tr class="status"><td><table><tr><td>Licht</td></tr><tr><td></td><td></td></tr></table></td></tr>"#),
            room("Bad", r#"<tr class="opening"><td>Tür</td><td><img src="/t.png"></td></tr>"#),
        ]
        .concat();

        let parser = PageParser::with_defaults().unwrap();
        assert_eq!(parser.parse_html(&page), parser.parse_html(&page));
    }

    #[test]
    fn test_custom_row_classes() {
        let mut config = ExtractorConfig::default();
        config.row_classes.info_text = vec!["messwert".to_string()];
        let parser = PageParser::new(config).unwrap();

        let rooms = parser.parse_html(&room(
            "Bad",
            r#"<tr class="messwert"><td>Temperatur</td><td>22</td></tr>
               <tr class="temperature"><td>Temperatur</td><td>99</td></tr>"#,
        ));
        assert_eq!(rooms[0].infos.len(), 1);
        assert_eq!(rooms[0].infos[0].value.as_deref(), Some("22"));
    }

    #[test]
    fn test_parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PageParser>();
    }
}
