use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{Paragraph, Round, Transcript, TranscriptMetadata};

/// One row of a presentation or Q&A table
#[derive(Debug, Clone, Serialize)]
pub struct ParagraphRow<'a> {
    #[serde(rename = "Title")]
    pub title: &'a str,
    #[serde(rename = "ROUND")]
    pub round: &'static str,
    #[serde(rename = "Paragraph")]
    pub paragraph: usize,
    pub speaker: &'a str,
    pub speaker_title: Option<&'a str>,
    pub speaker_role: &'a str,
    pub text: &'a str,
}

impl<'a> ParagraphRow<'a> {
    pub fn new(call_title: &'a str, paragraph: &'a Paragraph) -> Self {
        Self {
            title: call_title,
            round: paragraph.round.label(),
            paragraph: paragraph.index,
            speaker: &paragraph.speaker,
            speaker_title: paragraph.speaker_title.as_deref(),
            speaker_role: &paragraph.speaker_role,
            text: &paragraph.text,
        }
    }
}

/// Flat per-call metadata record; participants are JSON-encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    pub call_title: String,
    pub firm_full_name: String,
    pub firm_name: String,
    pub ticker: Option<String>,
    pub call_type: String,
    #[serde(rename = "date_EST")]
    pub date_est: Option<String>,
    #[serde(rename = "time_EST")]
    pub time_est: Option<String>,
    pub time_raw: String,
    pub call_participants: String,
    pub call_participants_titles: String,
}

impl MetadataRecord {
    pub fn from_metadata(metadata: &TranscriptMetadata) -> Result<Self> {
        Ok(Self {
            call_title: metadata.call_title.clone(),
            firm_full_name: metadata.firm_full_name.clone(),
            firm_name: metadata.firm_name.clone(),
            ticker: metadata.ticker.clone(),
            call_type: metadata.call_type.clone(),
            date_est: metadata.date_est_string(),
            time_est: metadata.time_est_string(),
            time_raw: metadata.time_raw.clone(),
            call_participants: serde_json::to_string(&metadata.participants)
                .context("Failed to encode participants")?,
            call_participants_titles: serde_json::to_string(&metadata.participants.titles_view())
                .context("Failed to encode participant titles")?,
        })
    }
}

/// File name shared by a call's presentation and Q&A tables
pub fn table_file_name(metadata: &TranscriptMetadata) -> String {
    let date = metadata
        .date_est_string()
        .unwrap_or_else(|| "undated".to_string());
    format!("{} {}.csv", metadata.call_title, date)
}

/// Write one round's paragraphs as CSV
pub fn write_paragraph_table(call_title: &str, paragraphs: &[Paragraph], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    for paragraph in paragraphs {
        writer
            .serialize(ParagraphRow::new(call_title, paragraph))
            .context("Failed to write paragraph row")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the non-empty round tables under `<out_dir>/presentation` and
/// `<out_dir>/QA`, returning the paths written
pub fn write_round_tables(transcript: &Transcript, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let file_name = table_file_name(&transcript.metadata);
    let mut written = Vec::new();

    for round in [Round::Presentation, Round::QA] {
        let paragraphs = transcript.paragraphs(round);
        if paragraphs.is_empty() {
            continue;
        }
        let dir = out_dir.join(round.dir_name());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {:?}", dir))?;
        let path = dir.join(&file_name);
        write_paragraph_table(transcript.call_title(), paragraphs, &path)?;
        written.push(path);
    }

    Ok(written)
}

/// Write the aggregated metadata table
pub fn write_metadata_table(records: &[MetadataRecord], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    for record in records {
        writer.serialize(record).context("Failed to write metadata row")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleCategory;

    fn paragraph(round: Round, index: usize, speaker: &str, text: &str) -> Paragraph {
        Paragraph {
            round,
            index,
            speaker: speaker.to_string(),
            speaker_title: None,
            speaker_role: String::new(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_write_round_tables_skips_empty_rounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut transcript = Transcript::new(TranscriptMetadata::new("ACME Q4"));
        transcript
            .presentation
            .push(paragraph(Round::Presentation, 0, "Operator", "Good morning, everyone."));

        let written = write_round_tables(&transcript, dir.path()).unwrap();

        assert_eq!(written, vec![dir.path().join("presentation").join("ACME Q4 undated.csv")]);
        assert!(!dir.path().join("QA").exists());

        let content = std::fs::read_to_string(&written[0]).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("Title,ROUND,Paragraph,speaker,speaker_title,speaker_role,text")
        );
        assert_eq!(
            lines.next(),
            Some("ACME Q4,Presentation,0,Operator,,,\"Good morning, everyone.\"")
        );
    }

    #[test]
    fn test_metadata_record_json_columns() {
        let mut metadata = TranscriptMetadata::new("ACME Q4");
        metadata.participants.start_role(RoleCategory::Executives);
        metadata
            .participants
            .add_participant(RoleCategory::Executives, "Jane Doe", "CFO");

        let record = MetadataRecord::from_metadata(&metadata).unwrap();
        assert_eq!(record.call_participants, r#"{"EXECUTIVES":["Jane Doe"]}"#);
        assert_eq!(record.call_participants_titles, r#"{"Jane Doe":"CFO"}"#);
        assert_eq!(record.date_est, None);
    }

    #[test]
    fn test_write_metadata_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta_data.csv");
        let record = MetadataRecord::from_metadata(&TranscriptMetadata::new("ACME Q4")).unwrap();

        write_metadata_table(&[record], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(
            "call_title,firm_full_name,firm_name,ticker,call_type,date_EST,time_EST,time_raw,call_participants,call_participants_titles"
        ));
        assert!(content.contains("ACME Q4"));
    }
}
