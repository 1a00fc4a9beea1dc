use tracing::debug;

use crate::error::{ParseError, Result};
use crate::heuristics::{is_footer_line, HeuristicsConfig};
use crate::models::{normalize_newlines, ParticipantRoster, RoleCategory, StyleClass, StyledSpan};

/// Build the participant roster from the spans preceding the presentation.
///
/// Collection starts at the `EXECUTIVES` heading and stops at the first
/// upper-case footer line. Inside the block, a bold role heading opens a
/// group and any other bold run is a participant name whose title is the
/// next italic run, unless another bold run comes first.
///
/// A heading seen a second time is ignored. A name before any heading is an
/// error.
pub fn parse_roster(spans: &[StyledSpan], config: &HeuristicsConfig) -> Result<ParticipantRoster> {
    let mut roster = ParticipantRoster::new();
    let mut collecting = false;
    let mut current_role: Option<RoleCategory> = None;

    for (i, span) in spans.iter().enumerate() {
        if !span.style.is_size(10) {
            continue;
        }
        let text = span.trimmed();

        if text == RoleCategory::Executives.heading() {
            collecting = true;
        }
        if is_footer_line(text, &config.footer_separator) {
            collecting = false;
        }
        if !collecting || span.class() != StyleClass::Bold10 {
            continue;
        }

        if let Some(role) = RoleCategory::from_heading(text) {
            if roster.start_role(role) {
                current_role = Some(role);
            } else {
                debug!("Ignoring repeated role heading {}", text);
            }
            continue;
        }

        let name = normalize_newlines(text);
        let Some(role) = current_role else {
            return Err(ParseError::NameBeforeRoleHeading { name });
        };
        let title = find_title(&spans[i + 1..], &config.footer_separator);
        roster.add_participant(role, &name, &title);
    }

    Ok(roster)
}

/// Title for a name: the first italic run before the next bold run.
/// A footer line ends the roster block, so the scan stops there as well.
fn find_title(following: &[StyledSpan], footer_separator: &str) -> String {
    for span in following {
        if span.style.is_size(10) && is_footer_line(span.trimmed(), footer_separator) {
            return String::new();
        }
        match span.class() {
            StyleClass::Italic10 => return normalize_newlines(span.trimmed()),
            StyleClass::Bold10 => return String::new(),
            _ => {}
        }
    }
    String::new()
}
