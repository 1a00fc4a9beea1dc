use tracing::debug;

use crate::heuristics::{is_boilerplate, ContinuationBuffer, HeuristicsConfig};
use crate::models::{ContentKind, RawContentSpan, StyledSpan};

/// Tag the 10px body runs of a section as speaker, title or text.
///
/// Headers, footers and all-caps runs are dropped, and text runs starting
/// mid-sentence are merged into the preceding entry.
pub fn extract_content(spans: &[StyledSpan], config: &HeuristicsConfig) -> Vec<RawContentSpan> {
    let mut buffer = ContinuationBuffer::new();
    let mut skipped = 0usize;

    for span in spans.iter().filter(|s| s.style.is_size(10)) {
        let Some(kind) = ContentKind::from_class(span.class()) else {
            skipped += 1;
            continue;
        };
        let text = span.trimmed();
        if is_boilerplate(text, &config.footer_separator) {
            skipped += 1;
            continue;
        }
        buffer.push(kind, text);
    }

    debug!(
        "Extracted content: {} merges, {} spans skipped",
        buffer.merges(),
        skipped
    );
    buffer.finish()
}
