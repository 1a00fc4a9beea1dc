use tracing::{debug, info, warn};

use crate::heuristics::HeuristicsConfig;
use crate::io::read_styled_spans;
use crate::models::{Diagnostic, DiagnosticKind, Paragraph, ParticipantRoster, Round, Transcript};

use super::{
    extract_content, extract_metadata, parse_roster, split_sections, structure_content,
    ExtractedMetadata, MetadataStyles, SectionMarkers,
};

/// Configuration for parsing one document
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    pub markers: SectionMarkers,
    pub heuristics: HeuristicsConfig,
    pub metadata_styles: MetadataStyles,
}

/// Outcome of parsing one document
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub transcript: Transcript,
    /// Non-fatal conditions met along the way, in the order they occurred
    pub diagnostics: Vec<Diagnostic>,
    /// False when a structural failure forced the content tables to be omitted
    pub content_parsed: bool,
}

impl ParsedDocument {
    pub fn has_diagnostic(&self, kind: &DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| &d.kind == kind)
    }
}

/// Parse one document's markup into a transcript.
///
/// Never fails: missing sections, unparseable dates and a malformed roster
/// are reported as diagnostics. A malformed roster omits both paragraph
/// sequences but keeps the title-page metadata.
pub fn parse_document(markup: &str, call_title: &str, config: &ParserConfig) -> ParsedDocument {
    info!("Parsing {}", call_title);
    let mut diagnostics = Vec::new();

    let all_spans = read_styled_spans(markup);
    let ExtractedMetadata { mut metadata, date_error } =
        extract_metadata(&all_spans, call_title, &config.metadata_styles);
    if let Some(err) = date_error {
        debug!("{}: {}", call_title, err);
        diagnostics.push(Diagnostic::new(
            call_title,
            DiagnosticKind::DateUnparsed {
                raw: metadata.time_raw.clone(),
            },
        ));
    }

    let sections = split_sections(markup, &config.markers, call_title);
    if !sections.presentation_found {
        diagnostics.push(Diagnostic::new(call_title, DiagnosticKind::PresentationMissing));
    } else if !sections.qa_found {
        diagnostics.push(Diagnostic::new(call_title, DiagnosticKind::QaMissing));
    }

    let roster_spans = read_styled_spans(sections.pre_presentation);
    match parse_roster(&roster_spans, &config.heuristics) {
        Ok(roster) => metadata.participants = roster,
        Err(err) => {
            warn!("Unable to parse participants for {}: {}", call_title, err);
            diagnostics.push(Diagnostic::new(
                call_title,
                DiagnosticKind::RosterMalformed {
                    reason: err.to_string(),
                },
            ));
            return ParsedDocument {
                transcript: Transcript::new(metadata),
                diagnostics,
                content_parsed: false,
            };
        }
    }

    let presentation = parse_round(sections.presentation, &metadata.participants, Round::Presentation, config);
    let qa = parse_round(sections.qa, &metadata.participants, Round::QA, config);
    info!(
        "{}: {} participants, {} presentation and {} QA paragraphs",
        call_title,
        metadata.participants.participant_count(),
        presentation.len(),
        qa.len()
    );

    ParsedDocument {
        transcript: Transcript {
            metadata,
            presentation,
            qa,
        },
        diagnostics,
        content_parsed: true,
    }
}

fn parse_round(segment: &str, roster: &ParticipantRoster, round: Round, config: &ParserConfig) -> Vec<Paragraph> {
    let spans = read_styled_spans(segment);
    let content = extract_content(&spans, &config.heuristics);
    structure_content(&content, roster, round, &config.heuristics)
}
