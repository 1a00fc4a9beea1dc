use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use scraper::{Html, Selector};

use crate::models::{FontStyle, StyledSpan};

static SPAN_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span[style]").expect("valid span selector"));

/// Read a markup file produced by the PDF-to-HTML conversion
pub fn read_markup_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

/// Document identifier used in tables and diagnostics: the file stem
pub fn call_title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Walk a markup fragment and collect its font-styled spans in document order.
///
/// Spans without a `font-family`/`font-size` style are skipped.
pub fn read_styled_spans(markup: &str) -> Vec<StyledSpan> {
    if markup.is_empty() {
        return Vec::new();
    }

    let document = Html::parse_document(markup);
    document
        .select(&SPAN_SELECTOR)
        .filter_map(|element| {
            let style = element.value().attr("style").and_then(FontStyle::parse)?;
            Some(StyledSpan::new(style, element.text().collect::<String>()))
        })
        .collect()
}
