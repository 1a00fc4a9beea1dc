pub mod batch;
pub mod error;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod stages;

pub use batch::{run_batch, BatchConfig, BatchSummary, DocumentOutcome};
pub use error::ParseError;
pub use heuristics::HeuristicsConfig;
pub use io::{read_markup_file, read_styled_spans, write_round_tables, MetadataRecord};
pub use models::{
    Diagnostic, DiagnosticKind, Paragraph, ParticipantRoster, RoleCategory, Round, StyledSpan,
    Transcript, TranscriptMetadata,
};
pub use stages::{parse_document, MetadataStyles, ParsedDocument, ParserConfig, SectionMarkers};
