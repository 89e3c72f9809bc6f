//! Info-text rows: label/value readings such as temperatures

use log::debug;
use scraper::ElementRef;

use super::Scope;
use crate::diagnostic::Diagnostic;
use crate::extraction::Extraction;
use crate::html::{leading_cells, table_rows, text};
use crate::model::InfoText;

/// Extract the readings of one info-text row
///
/// A nested table in the value cell holds one specifier/value pair per row.
/// Nested rows missing either cell are skipped without a diagnostic.
pub fn extract_info_text(scope: &Scope<'_>, row: ElementRef<'_>) -> Extraction<InfoText> {
    let (label_cell, value_cell) = leading_cells(row);

    let Some(label_cell) = label_cell else {
        return Extraction::failed(Diagnostic::not_located(
            "A table row that should contain a reading of the room has no cells. \
             No reading could be found. Please check the website and the documentation.",
        ));
    };
    let Some(value_cell) = value_cell else {
        return Extraction::failed(Diagnostic::not_located(
            "A table row that should contain a reading of the room has no value cell. \
             Please check the website and the documentation.",
        ));
    };

    let label = text(label_cell);

    match value_cell.select(&scope.selectors.table).next() {
        Some(inner_table) => Extraction::new(inner_table_readings(inner_table, &label), Vec::new()),
        None => Extraction::item(InfoText::new(label, None, Some(text(value_cell)))),
    }
}

fn inner_table_readings(inner_table: ElementRef<'_>, label: &str) -> Vec<InfoText> {
    let mut readings = Vec::new();
    for (index, row) in table_rows(inner_table).into_iter().enumerate() {
        match leading_cells(row) {
            (Some(specifier), Some(value)) => {
                readings.push(InfoText::new(label, Some(text(specifier)), Some(text(value))));
            }
            _ => debug!("skipping incomplete row {} of the {:?} readings", index, label),
        }
    }
    readings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use crate::extractors::testing::{select_first, Fixture};
    use scraper::Html;

    fn run(html: &str) -> Extraction<InfoText> {
        let fixture = Fixture::new();
        let document = Html::parse_document(html);
        extract_info_text(&fixture.scope("Wohnzimmer"), select_first(&document, "tr.temperature"))
    }

    #[test]
    fn test_single_reading() {
        let result = run(
            r#"<table><tr class="temperature"><td>Wohnzimmer</td><td> 21.5 </td></tr></table>"#,
        );

        assert_eq!(
            result.items,
            vec![InfoText::new("Wohnzimmer", None, Some("21.5".to_string()))]
        );
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_inner_table_readings() {
        let result = run(
            r#"<table><tr class="temperature">
                <td>Temperatur</td>
                <td><table>
                    <tr><td>Vorlauf</td><td>45.0</td></tr>
                    <tr><td>Rücklauf</td><td>38.5</td></tr>
                    <tr><td>defekt</td></tr>
                </table></td>
            </tr></table>"#,
        );

        assert_eq!(
            result.items,
            vec![
                InfoText::new("Temperatur", Some("Vorlauf".to_string()), Some("45.0".to_string())),
                InfoText::new("Temperatur", Some("Rücklauf".to_string()), Some("38.5".to_string())),
            ]
        );
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_value_cell() {
        let result = run(r#"<table><tr class="temperature"><td>Wohnzimmer</td></tr></table>"#);

        assert!(result.items.is_empty());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::ElementNotLocated);
    }

    #[test]
    fn test_row_without_cells() {
        let result = run(r#"<table><tr class="temperature"><th>nur Kopf</th></tr></table>"#);

        assert!(result.items.is_empty());
        assert!(result.diagnostics[0].message.contains("no cells"));
    }
}
