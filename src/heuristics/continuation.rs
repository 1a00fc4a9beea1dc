use crate::models::{ContentKind, RawContentSpan};

/// Whether a text run starts in the middle of a sentence.
///
/// The first character must be alphanumeric and unchanged by lower-casing,
/// so lines opening with a digit count as continuations as well.
pub fn starts_mid_sentence(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() && c.to_lowercase().eq(std::iter::once(c)))
}

/// Output buffer that re-joins text wrapped across text boxes or pages.
///
/// The most recent entry is held back as `pending` so a continuation can
/// replace it before it is committed.
#[derive(Debug, Default)]
pub struct ContinuationBuffer {
    committed: Vec<RawContentSpan>,
    pending: Option<RawContentSpan>,
    /// Text of the last span that started a new entry
    last_span_text: String,
    merges: usize,
}

impl ContinuationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a span in document order, merging it into the pending entry when
    /// it continues a wrapped line.
    ///
    /// A merge rebuilds the entry from the last span that started one, and
    /// does not move that anchor. A continuation with nothing pending starts
    /// a new entry.
    pub fn push(&mut self, kind: ContentKind, text: &str) {
        if kind == ContentKind::Text && starts_mid_sentence(text) && self.pending.is_some() {
            let merged = format!("{} {}", self.last_span_text, text);
            self.pending = Some(RawContentSpan::new(ContentKind::Text, merged));
            self.merges += 1;
            return;
        }

        if let Some(previous) = self.pending.replace(RawContentSpan::new(kind, text)) {
            self.committed.push(previous);
        }
        self.last_span_text = text.to_string();
    }

    /// Number of continuation merges performed so far
    pub fn merges(&self) -> usize {
        self.merges
    }

    pub fn finish(mut self) -> Vec<RawContentSpan> {
        self.committed.extend(self.pending.take());
        self.committed
    }
}
