//! DOM helpers for walking tables
//!
//! Only direct children are considered so that rows and cells of nested
//! tables never leak into the table being walked.

use scraper::ElementRef;

/// Element children of `element`
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Rows of `table`, looking through `thead`, `tbody` and `tfoot`
pub fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in child_elements(table) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => {
                rows.extend(child_elements(child).filter(|el| el.value().name() == "tr"));
            }
            _ => {}
        }
    }
    rows
}

/// `td` cells of a row
pub fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    child_elements(row)
        .filter(|el| el.value().name() == "td")
        .collect()
}

/// First and second data cell of a row
pub fn leading_cells(row: ElementRef<'_>) -> (Option<ElementRef<'_>>, Option<ElementRef<'_>>) {
    let mut cells = child_elements(row).filter(|el| el.value().name() == "td");
    let first = cells.next();
    let second = cells.next();
    (first, second)
}

/// Text of the element and all descendants, whitespace collapsed
pub fn text(element: ElementRef<'_>) -> String {
    normalize_ws(&element.text().collect::<String>())
}

/// Text of the element's own text nodes only, whitespace collapsed
pub fn own_text(element: ElementRef<'_>) -> String {
    let raw: String = element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect::<Vec<&str>>()
        .join(" ");
    normalize_ws(&raw)
}

/// Trimmed text, `None` when there is nothing left
pub fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
