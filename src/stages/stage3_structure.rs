use crate::heuristics::HeuristicsConfig;
use crate::models::{normalize_newlines, ContentKind, Paragraph, ParticipantRoster, RawContentSpan, Round};

/// Speaker state carried across the scan of one round
#[derive(Debug, Default)]
struct SpeakerState {
    speaker: String,
    /// Title run seen after the current speaker name
    local_title: Option<String>,
}

/// Turn tagged content into attributed paragraphs.
///
/// The current speaker persists until the next speaker run. Titles and roles
/// come from the roster first; a title run in the body is used only when the
/// roster has no entry for the speaker.
pub fn structure_content(
    content: &[RawContentSpan],
    roster: &ParticipantRoster,
    round: Round,
    config: &HeuristicsConfig,
) -> Vec<Paragraph> {
    let mut state = SpeakerState::default();
    let mut paragraphs = Vec::new();

    for span in content {
        match span.kind {
            ContentKind::Speaker => {
                state.speaker = normalize_newlines(&span.text);
                state.local_title = None;
            }
            ContentKind::SpeakerTitle => {
                state.local_title = Some(normalize_newlines(&span.text));
            }
            ContentKind::Text => {
                let text = normalize_newlines(&span.text);
                let index = paragraphs.len();

                let paragraph = if config.is_operator_announcement(&text) {
                    Paragraph {
                        round,
                        index,
                        speaker: config.operator_speaker.clone(),
                        speaker_title: Some(String::new()),
                        speaker_role: String::new(),
                        text,
                    }
                } else {
                    Paragraph {
                        round,
                        index,
                        speaker: state.speaker.clone(),
                        speaker_title: roster
                            .title(&state.speaker)
                            .map(str::to_string)
                            .or_else(|| state.local_title.clone()),
                        speaker_role: roster
                            .role_of(&state.speaker)
                            .map(|r| r.heading().to_string())
                            .unwrap_or_default(),
                        text,
                    }
                };
                paragraphs.push(paragraph);
            }
        }
    }

    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleCategory;

    fn roster() -> ParticipantRoster {
        let mut roster = ParticipantRoster::new();
        roster.start_role(RoleCategory::Executives);
        roster.add_participant(RoleCategory::Executives, "Jane Doe", "CFO");
        roster.start_role(RoleCategory::Analysts);
        roster.add_participant(RoleCategory::Analysts, "John Roe", "");
        roster
    }

    fn structure(content: &[RawContentSpan], round: Round) -> Vec<Paragraph> {
        structure_content(content, &roster(), round, &HeuristicsConfig::default())
    }

    fn speaker(text: &str) -> RawContentSpan {
        RawContentSpan::new(ContentKind::Speaker, text)
    }

    fn title(text: &str) -> RawContentSpan {
        RawContentSpan::new(ContentKind::SpeakerTitle, text)
    }

    fn text(text: &str) -> RawContentSpan {
        RawContentSpan::new(ContentKind::Text, text)
    }

    #[test]
    fn test_attribution_from_roster() {
        let content = vec![
            speaker("Jane Doe"),
            title("Chief Financial Officer"),
            text("Revenue grew\n12%."),
            text("Margins improved."),
            speaker("John Roe"),
            text("Thanks for taking my question."),
        ];

        let paragraphs = structure(&content, Round::QA);

        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].speaker, "Jane Doe");
        // Roster title wins over the title run
        assert_eq!(paragraphs[0].speaker_title.as_deref(), Some("CFO"));
        assert_eq!(paragraphs[0].speaker_role, "EXECUTIVES");
        assert_eq!(paragraphs[0].text, "Revenue grew 12%.");
        assert_eq!(paragraphs[1].speaker, "Jane Doe");
        assert_eq!(paragraphs[2].speaker_title.as_deref(), Some(""));
        assert_eq!(paragraphs[2].speaker_role, "ANALYSTS");
        assert!(paragraphs.iter().all(|p| p.round == Round::QA));
    }

    #[test]
    fn test_indices_are_contiguous() {
        let content = vec![
            text("Opening remarks."),
            speaker("Jane Doe"),
            text("One."),
            title("CFO"),
            text("Two."),
            speaker("Jane Doe"),
            text("Three."),
        ];

        let paragraphs = structure(&content, Round::Presentation);
        let indices: Vec<usize> = paragraphs.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(paragraphs[0].speaker, "");
    }

    #[test]
    fn test_unknown_speaker_uses_title_run() {
        let content = vec![
            speaker("Guest\nSpeaker"),
            title("Industry\nConsultant"),
            text("Hello."),
            speaker("Another Guest"),
            text("Hi."),
        ];

        let paragraphs = structure(&content, Round::Presentation);
        assert_eq!(paragraphs[0].speaker, "Guest Speaker");
        assert_eq!(paragraphs[0].speaker_title.as_deref(), Some("Industry Consultant"));
        assert_eq!(paragraphs[0].speaker_role, "");
        // A new speaker clears the title run
        assert_eq!(paragraphs[1].speaker_title, None);
    }

    #[test]
    fn test_operator_override() {
        let content = vec![
            speaker("Jane Doe"),
            text("[Operator Instructions] Our first question comes from John Roe."),
            text("Thank you, operator."),
        ];

        let paragraphs = structure(&content, Round::QA);
        assert_eq!(paragraphs[0].speaker, "Operator");
        assert_eq!(paragraphs[0].speaker_title.as_deref(), Some(""));
        assert_eq!(paragraphs[0].speaker_role, "");
        // The carried-forward speaker is untouched by the override
        assert_eq!(paragraphs[1].speaker, "Jane Doe");
        assert_eq!(paragraphs[1].speaker_role, "EXECUTIVES");
    }
}
