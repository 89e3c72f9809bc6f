//! Opening rows: windows and doors

use scraper::ElementRef;

use super::{find_image, reconcile, Grid, Scope};
use crate::diagnostic::Diagnostic;
use crate::extraction::Extraction;
use crate::html::{leading_cells, own_text};
use crate::model::{Device, DeviceKind, OpeningKind};

/// Extract all openings of an opening row
///
/// The row label decides the opening kind once for every instance.
pub fn extract_openings(scope: &Scope<'_>, row: ElementRef<'_>) -> Extraction<Device> {
    let (label_cell, value_cell) = leading_cells(row);

    let Some(label_cell) = label_cell else {
        return Extraction::failed(Diagnostic::not_located(
            "A table row that should contain openings has no cells. No openings could be found. \
             Please check the website and the documentation.",
        ));
    };
    let Some(value_cell) = value_cell else {
        return Extraction::failed(Diagnostic::not_located(
            "No second data cell was found which should contain a single opening or a table of \
             openings. No openings could be found. Please check the website and the documentation.",
        ));
    };

    let label = own_text(label_cell);
    let opening_kind = scope.config.keywords.opening_kind(&label);
    let name = scope.device_name(&label);

    match value_cell.select(&scope.selectors.table).next() {
        Some(inner_table) => match Grid::read(inner_table, "openings") {
            Ok(grid) => reconcile(scope, &grid, "openings", |slot| {
                build_opening(scope, &name, opening_kind, Some(slot.specifier), slot.value)
            }),
            Err(diagnostic) => Extraction::failed(diagnostic),
        },
        None => build_opening(scope, &name, opening_kind, None, Some(value_cell)),
    }
}

/// Build one opening; without a value cell only name and specifier are set
pub fn build_opening(
    scope: &Scope<'_>,
    name: &str,
    opening_kind: OpeningKind,
    specifier: Option<String>,
    cell: Option<ElementRef<'_>>,
) -> Extraction<Device> {
    let device = Device::new(name, specifier, DeviceKind::Opening { opening_kind });

    let Some(cell) = cell else {
        return Extraction::item(device);
    };

    match find_image(scope, cell) {
        Ok(src) => Extraction::item(device.with_image(Some(src))),
        Err(diagnostic) => Extraction::item(device).with_diagnostic(diagnostic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{DiagnosticKind, Severity};
    use crate::extractors::testing::{select_first, Fixture};
    use scraper::Html;

    fn run(html: &str) -> Extraction<Device> {
        let fixture = Fixture::new();
        let document = Html::parse_document(html);
        extract_openings(&fixture.scope("Küche"), select_first(&document, "tr.opening"))
    }

    #[test]
    fn test_window_without_image() {
        let result = run(r#"<table><tr class="opening"><td>Fenster</td><td>geschlossen</td></tr></table>"#);

        assert_eq!(result.items.len(), 1);
        let device = &result.items[0];
        assert_eq!(device.name, "Fenster Küche");
        assert_eq!(device.opening_kind(), Some(OpeningKind::Window));
        assert_eq!(device.image_ref, None);
        assert_eq!(device.specifier, None);

        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, Severity::Warning);
        assert!(result.diagnostics[0].message.contains("No image"));
    }

    #[test]
    fn test_multiple_doors_share_kind() {
        let result = run(
            r#"<table><tr class="opening">
                <td>Türen</td>
                <td><table>
                    <tr><td>Terrasse</td><td>Flur</td></tr>
                    <tr><td><img src="/img/zu.png"></td><td><img src="/img/auf.png"></td></tr>
                </table></td>
            </tr></table>"#,
        );

        assert_eq!(result.items.len(), 2);
        assert!(result
            .items
            .iter()
            .all(|d| d.opening_kind() == Some(OpeningKind::Door)));
        assert_eq!(result.items[0].specifier.as_deref(), Some("Terrasse"));
        assert_eq!(result.items[1].image_ref.as_deref(), Some("/img/auf.png"));
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_more_specifiers_than_openings() {
        let result = run(
            r#"<table><tr class="opening">
                <td>Fenster</td>
                <td><table>
                    <tr><td>links</td><td>rechts</td></tr>
                    <tr><td><img src="/img/zu.png"></td></tr>
                </table></td>
            </tr></table>"#,
        );

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[1].specifier.as_deref(), Some("rechts"));
        assert_eq!(result.items[1].image_ref, None);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::CountMismatch);
    }

    #[test]
    fn test_unclassified_label() {
        let result = run(
            r#"<table><tr class="opening"><td>Dachluke</td><td><img src="/x.png"></td></tr></table>"#,
        );
        assert_eq!(result.items[0].opening_kind(), Some(OpeningKind::Unknown));
    }
}
