use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::{Paragraph, ParticipantRoster, Round};

/// Call-level metadata extracted from the title page and roster
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptMetadata {
    /// Identifier of the source document (its file stem)
    pub call_title: String,
    pub firm_full_name: String,
    pub firm_name: String,
    /// Exchange ticker such as `NasdaqGS:VPG`
    pub ticker: Option<String>,
    pub call_type: String,
    pub date_est: Option<NaiveDate>,
    pub time_est: Option<DateTime<FixedOffset>>,
    pub time_raw: String,
    /// Roles, names and titles of the call participants
    pub participants: ParticipantRoster,
}

impl TranscriptMetadata {
    pub fn new(call_title: impl Into<String>) -> Self {
        Self {
            call_title: call_title.into(),
            ..Default::default()
        }
    }

    /// `YYYY-MM-DD` date in EST, if the call date was parsed
    pub fn date_est_string(&self) -> Option<String> {
        self.date_est.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// `YYYY-MM-DD HH:MM:SS` time in EST, if the call date was parsed
    pub fn time_est_string(&self) -> Option<String> {
        self.time_est
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

impl Serialize for TranscriptMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TranscriptMetadata", 10)?;
        s.serialize_field("call_title", &self.call_title)?;
        s.serialize_field("firm_full_name", &self.firm_full_name)?;
        s.serialize_field("firm_name", &self.firm_name)?;
        s.serialize_field("ticker", &self.ticker)?;
        s.serialize_field("call_type", &self.call_type)?;
        s.serialize_field("date_EST", &self.date_est_string())?;
        s.serialize_field("time_EST", &self.time_est_string())?;
        s.serialize_field("time_raw", &self.time_raw)?;
        s.serialize_field("call_participants", &self.participants)?;
        s.serialize_field("call_participants_titles", &self.participants.titles_view())?;
        s.end()
    }
}

/// A parsed call: metadata plus the two attributed paragraph sequences
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    pub metadata: TranscriptMetadata,
    pub presentation: Vec<Paragraph>,
    pub qa: Vec<Paragraph>,
}

impl Transcript {
    pub fn new(metadata: TranscriptMetadata) -> Self {
        Self {
            metadata,
            presentation: Vec::new(),
            qa: Vec::new(),
        }
    }

    pub fn paragraphs(&self, round: Round) -> &[Paragraph] {
        match round {
            Round::Presentation => &self.presentation,
            Round::QA => &self.qa,
        }
    }

    pub fn call_title(&self) -> &str {
        &self.metadata.call_title
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Non-fatal condition met while parsing a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    PresentationMissing,
    QaMissing,
    DateUnparsed { raw: String },
    RosterMalformed { reason: String },
    ReadFailed { reason: String },
    WriteFailed { reason: String },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PresentationMissing => write!(f, "presentation section missing"),
            Self::QaMissing => write!(f, "QA missing"),
            Self::DateUnparsed { raw } => write!(f, "date {:?} cannot be parsed", raw),
            Self::RosterMalformed { reason } => write!(f, "unable to parse participants: {}", reason),
            Self::ReadFailed { reason } => write!(f, "unable to read document: {}", reason),
            Self::WriteFailed { reason } => write!(f, "unable to write results: {}", reason),
        }
    }
}

/// A diagnostic attributed to the document it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub call_title: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(call_title: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            call_title: call_title.into(),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.call_title, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::RoleCategory;

    #[test]
    fn test_metadata_serializes_record_columns() {
        let mut meta = TranscriptMetadata::new("VPG Q4 2019");
        meta.ticker = Some("NYSE:VPG".to_string());
        meta.participants.start_role(RoleCategory::Executives);
        meta.participants
            .add_participant(RoleCategory::Executives, "William M. Clancy", "CFO");
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        meta.time_est = Some(est.with_ymd_and_hms(2020, 2, 27, 11, 30, 0).unwrap());
        meta.date_est = NaiveDate::from_ymd_opt(2020, 2, 27);

        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["date_EST"], "2020-02-27");
        assert_eq!(value["time_EST"], "2020-02-27 11:30:00");
        assert_eq!(value["call_participants"]["EXECUTIVES"][0], "William M. Clancy");
        assert_eq!(value["call_participants_titles"]["William M. Clancy"], "CFO");
        assert_eq!(value["ticker"], "NYSE:VPG");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::new("ACME Q1", DiagnosticKind::QaMissing);
        assert_eq!(diag.to_string(), "ACME Q1: QA missing");
    }
}
