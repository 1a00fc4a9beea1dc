use std::fmt;

use serde::Serialize;

/// Section of the call a paragraph belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Round {
    Presentation,
    #[serde(rename = "QA")]
    QA,
}

impl Round {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Presentation => "Presentation",
            Self::QA => "QA",
        }
    }

    /// Output sub-directory for this round's tables
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Presentation => "presentation",
            Self::QA => "QA",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One attributed paragraph of spoken text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub round: Round,
    /// Position within the round, starting at 0 with no gaps
    pub index: usize,
    pub speaker: String,
    pub speaker_title: Option<String>,
    /// Role heading of the speaker, empty if the speaker is not in the roster
    pub speaker_role: String,
    pub text: String,
}
