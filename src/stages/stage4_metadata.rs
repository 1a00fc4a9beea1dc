use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::{ParseError, Result};
use crate::models::{StyledSpan, TranscriptMetadata};

/// Layouts tried, in order, against the cleaned date string
const DATETIME_LAYOUTS: &[&str] = &[
    "%B %d %Y %I:%M %p",
    "%B %d %Y %I:%M:%S %p",
    "%B %d %Y %H:%M",
    "%B %d %Y %H:%M:%S",
    "%d %B %Y %I:%M %p",
    "%d %B %Y %I:%M:%S %p",
    "%d %B %Y %H:%M",
    "%d %B %Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_LAYOUTS: &[&str] = &["%B %d %Y", "%d %B %Y", "%Y-%m-%d"];

/// Font sizes of the bold title-page blocks
#[derive(Debug, Clone)]
pub struct MetadataStyles {
    /// Firm name and ticker
    pub firm_sizes: Vec<u32>,
    /// Event type, e.g. "Earnings Call"
    pub call_type_sizes: Vec<u32>,
    /// Event date line
    pub date_sizes: Vec<u32>,
}

impl Default for MetadataStyles {
    fn default() -> Self {
        Self {
            firm_sizes: vec![20, 23],
            call_type_sizes: vec![25, 30],
            date_sizes: vec![17, 18],
        }
    }
}

/// Title-page metadata plus the date parse failure, if any
#[derive(Debug, Clone)]
pub struct ExtractedMetadata {
    pub metadata: TranscriptMetadata,
    pub date_error: Option<ParseError>,
}

/// Read firm, ticker, call type and date from the title-page spans.
///
/// Never fails: a date that cannot be parsed leaves the EST fields unset and
/// is reported through `date_error`.
pub fn extract_metadata(spans: &[StyledSpan], call_title: &str, styles: &MetadataStyles) -> ExtractedMetadata {
    let mut metadata = TranscriptMetadata::new(call_title);

    metadata.firm_full_name = spans
        .iter()
        .filter(|s| s.style.is_bold_in(&styles.firm_sizes))
        .map(|s| s.trimmed())
        .collect::<Vec<_>>()
        .join(" ");
    let (firm_name, ticker) = split_firm_name(&metadata.firm_full_name);
    metadata.firm_name = firm_name;
    metadata.ticker = ticker;

    metadata.call_type = first_text(spans, &styles.call_type_sizes);
    metadata.time_raw = first_text(spans, &styles.date_sizes);

    let date_error = match parse_call_time(&metadata.time_raw) {
        Ok(time) => {
            let est = to_est(time);
            metadata.date_est = Some(est.date_naive());
            metadata.time_est = Some(est);
            None
        }
        Err(e) => {
            warn!("{}'s date: {} cannot be parsed", call_title, metadata.time_raw);
            Some(e)
        }
    };

    ExtractedMetadata { metadata, date_error }
}

/// Split "Acme Corp NasdaqGS:ACME" into the firm name and the ticker token.
/// The last token containing a colon is the ticker.
pub fn split_firm_name(full_name: &str) -> (String, Option<String>) {
    let mut ticker = None;
    let mut name_tokens = Vec::new();
    for token in full_name.split_whitespace() {
        if token.contains(':') {
            ticker = Some(token.to_string());
        } else {
            name_tokens.push(token);
        }
    }
    (name_tokens.join(" "), ticker)
}

fn first_text(spans: &[StyledSpan], sizes: &[u32]) -> String {
    spans
        .iter()
        .find(|s| s.style.is_bold_in(sizes))
        .map(|s| s.trimmed().to_string())
        .unwrap_or_default()
}

/// Fixed UTC-05:00 reference zone used for all call times
pub fn est_offset() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).expect("valid EST offset")
}

pub fn to_est(time: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    time.with_timezone(&est_offset())
}

/// Parse a date line such as "Thursday, February 27, 2020 4:30 PM GMT".
///
/// Everything up to the first comma (the weekday) is dropped. A trailing
/// zone abbreviation sets the offset; an unrecognized one is dropped and,
/// like a missing one, the time is taken as UTC. A date without a time is
/// midnight.
pub fn parse_call_time(raw: &str) -> Result<DateTime<FixedOffset>> {
    let unparseable = || ParseError::UnparseableDate { raw: raw.to_string() };

    let body = raw.split_once(',').map_or(raw, |(_, rest)| rest);
    let cleaned = body.replace(',', " ");
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let offset = match tokens.last().copied() {
        Some(token) => match zone_offset(token) {
            Some(offset) => {
                tokens.pop();
                offset
            }
            None if is_unknown_zone(token) => {
                debug!("Unknown zone {:?} in {:?}, assuming UTC", token, raw);
                tokens.pop();
                utc_offset()
            }
            None => utc_offset(),
        },
        None => utc_offset(),
    };
    let cleaned = tokens.join(" ");
    if cleaned.is_empty() {
        return Err(unparseable());
    }

    let naive = DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(&cleaned, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(&cleaned, layout).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(unparseable)?;

    naive.and_local_timezone(offset).single().ok_or_else(unparseable)
}

fn utc_offset() -> FixedOffset {
    FixedOffset::east_opt(0).expect("valid UTC offset")
}

/// Offset for the zone abbreviations seen on transcript title pages
fn zone_offset(token: &str) -> Option<FixedOffset> {
    let hours = match token.to_ascii_uppercase().as_str() {
        "GMT" | "UTC" | "Z" => 0,
        "EST" | "ET" => -5,
        "EDT" => -4,
        "CST" | "CT" => -6,
        "CDT" => -5,
        "MST" | "MT" => -7,
        "MDT" => -6,
        "PST" | "PT" => -8,
        "PDT" => -7,
        "BST" | "CET" => 1,
        "CEST" => 2,
        _ => return None,
    };
    FixedOffset::east_opt(hours * 3600)
}

/// Trailing alphabetic token that is neither a known zone nor a meridiem
fn is_unknown_zone(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_alphabetic())
        && !token.eq_ignore_ascii_case("AM")
        && !token.eq_ignore_ascii_case("PM")
}
