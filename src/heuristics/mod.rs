pub mod boilerplate;
pub mod continuation;

pub use boilerplate::*;
pub use continuation::*;

/// Literal patterns behind the line-level heuristics
#[derive(Debug, Clone)]
pub struct HeuristicsConfig {
    /// Separator found in running headers and footers ("COMPANY | DATE")
    pub footer_separator: String,
    /// Phrase marking a scripted operator announcement
    pub operator_phrase: String,
    /// Speaker assigned to operator announcements
    pub operator_speaker: String,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            footer_separator: " | ".to_string(),
            operator_phrase: "Operator Instructions".to_string(),
            operator_speaker: "Operator".to_string(),
        }
    }
}

impl HeuristicsConfig {
    /// Whether a paragraph is a standard operator announcement
    pub fn is_operator_announcement(&self, text: &str) -> bool {
        text.contains(&self.operator_phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_announcement() {
        let config = HeuristicsConfig::default();
        assert!(config.is_operator_announcement("[Operator Instructions] Our first question"));
        assert!(!config.is_operator_announcement("operator instructions"));
    }
}
