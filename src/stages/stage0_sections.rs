use tracing::warn;

/// Literal strings delimiting the transcript sections.
///
/// These are byte-for-byte fragments of the converter's HTML output; any
/// change in the source layout breaks splitting.
#[derive(Debug, Clone)]
pub struct SectionMarkers {
    /// Heading that opens the prepared remarks
    pub presentation_start: String,
    /// Heading that opens the question-and-answer round
    pub qa_start: String,
    /// First line of the closing disclaimer
    pub end: String,
}

impl Default for SectionMarkers {
    fn default() -> Self {
        Self {
            presentation_start: "<span style=\"font-family: Verdana-Bold; font-size:24px\">Presentation\n<br></span></div>".to_string(),
            qa_start: "<span style=\"font-family: Verdana-Bold; font-size:24px\">Question and Answer\n<br></span></div>".to_string(),
            end: "<span style=\"font-family: Verdana; font-size:8px\">These materials have been prepared solely for information purposes based upon information generally available to the public".to_string(),
        }
    }
}

/// Raw markup segments of one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sections<'a> {
    /// Everything before the presentation heading (title page and roster)
    pub pre_presentation: &'a str,
    pub presentation: &'a str,
    pub qa: &'a str,
    pub presentation_found: bool,
    pub qa_found: bool,
}

/// Split the full markup into roster, presentation and Q&A segments.
///
/// Without a presentation heading nothing is parsed: all segments stay empty.
/// Without a Q&A heading the presentation runs to the end marker.
pub fn split_sections<'a>(markup: &'a str, markers: &SectionMarkers, call_title: &str) -> Sections<'a> {
    let Some((pre, after)) = markup.split_once(markers.presentation_start.as_str()) else {
        warn!("{}: presentation section missing", call_title);
        return Sections::default();
    };

    match after.split_once(markers.qa_start.as_str()) {
        Some((presentation, qa)) => Sections {
            pre_presentation: pre,
            presentation,
            qa: truncate_at(qa, &markers.end),
            presentation_found: true,
            qa_found: true,
        },
        None => {
            warn!("{}: QA missing", call_title);
            Sections {
                pre_presentation: pre,
                presentation: truncate_at(after, &markers.end),
                qa: "",
                presentation_found: true,
                qa_found: false,
            }
        }
    }
}

fn truncate_at<'a>(text: &'a str, marker: &str) -> &'a str {
    match text.find(marker) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(parts: &[&str]) -> String {
        parts.concat()
    }

    #[test]
    fn test_split_all_sections() {
        let markers = SectionMarkers::default();
        let markup = document(&[
            "ROSTER",
            &markers.presentation_start,
            "TALK",
            &markers.qa_start,
            "QUESTIONS",
            &markers.end,
            " DISCLAIMER",
        ]);

        let sections = split_sections(&markup, &markers, "test");
        assert_eq!(sections.pre_presentation, "ROSTER");
        assert_eq!(sections.presentation, "TALK");
        assert_eq!(sections.qa, "QUESTIONS");
        assert!(sections.presentation_found && sections.qa_found);
    }

    #[test]
    fn test_missing_qa_truncates_presentation() {
        let markers = SectionMarkers::default();
        let markup = document(&["ROSTER", &markers.presentation_start, "TALK", &markers.end, "LEGAL"]);

        let sections = split_sections(&markup, &markers, "test");
        assert_eq!(sections.presentation, "TALK");
        assert_eq!(sections.qa, "");
        assert!(!sections.qa_found);
    }

    #[test]
    fn test_missing_end_runs_to_document_end() {
        let markers = SectionMarkers::default();
        let markup = document(&["R", &markers.presentation_start, "TALK", &markers.qa_start, "Q AND A"]);

        let sections = split_sections(&markup, &markers, "test");
        assert_eq!(sections.qa, "Q AND A");
    }

    #[test]
    fn test_missing_presentation_leaves_everything_empty() {
        let markers = SectionMarkers::default();
        let markup = document(&["ROSTER", &markers.qa_start, "QUESTIONS"]);

        let sections = split_sections(&markup, &markers, "test");
        assert_eq!(sections, Sections::default());
    }

    #[test]
    fn test_marker_match_is_exact() {
        let markers = SectionMarkers::default();
        // Same heading without the embedded line break
        let markup = "<span style=\"font-family: Verdana-Bold; font-size:24px\">Presentation<br></span></div>TALK";

        let sections = split_sections(markup, &markers, "test");
        assert!(!sections.presentation_found);
    }
}
