use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_FONT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"font-family:\s*([^;]+?)\s*;\s*font-size:\s*(\d+)px").expect("valid font style regex")
});

/// Font family of a styled run, as emitted by the PDF-to-HTML converter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// `Verdana`
    Regular,
    /// `Verdana-Bold`
    Bold,
    /// `Verdana-Italic`
    Italic,
    /// Any other family name, kept verbatim
    Other(String),
}

impl FontFamily {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Verdana" => Self::Regular,
            "Verdana-Bold" => Self::Bold,
            "Verdana-Italic" => Self::Italic,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Parsed `style` attribute of a span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontStyle {
    pub family: FontFamily,
    /// Font size in pixels, `None` if the attribute carried no size
    pub size_px: Option<u32>,
}

impl FontStyle {
    pub fn new(family: FontFamily, size_px: u32) -> Self {
        Self {
            family,
            size_px: Some(size_px),
        }
    }

    /// Parse a `font-family: <name>; font-size:<N>px` style attribute.
    /// Returns `None` when the attribute is not a font style at all.
    pub fn parse(style: &str) -> Option<Self> {
        let caps = RE_FONT_STYLE.captures(style)?;
        Some(Self {
            family: FontFamily::from_name(&caps[1]),
            size_px: caps[2].parse().ok(),
        })
    }

    pub fn is_size(&self, size_px: u32) -> bool {
        self.size_px == Some(size_px)
    }

    /// Bold run whose size is one of `sizes`
    pub fn is_bold_in(&self, sizes: &[u32]) -> bool {
        self.family == FontFamily::Bold && self.size_px.is_some_and(|s| sizes.contains(&s))
    }

    /// Collapse the style into the classes the content parsers care about
    pub fn class(&self) -> StyleClass {
        if !self.is_size(10) {
            return StyleClass::Other;
        }
        match self.family {
            FontFamily::Bold => StyleClass::Bold10,
            FontFamily::Italic => StyleClass::Italic10,
            FontFamily::Regular => StyleClass::Plain10,
            FontFamily::Other(_) => StyleClass::Other,
        }
    }
}

/// Style classes of the 10px body text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleClass {
    Bold10,
    Italic10,
    Plain10,
    Other,
}

/// A single styled run of text in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub style: FontStyle,
    /// Raw text, including embedded line breaks
    pub text: String,
}

impl StyledSpan {
    pub fn new(style: FontStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    /// 10px bold run: a speaker name or role heading
    pub fn bold10(text: impl Into<String>) -> Self {
        Self::new(FontStyle::new(FontFamily::Bold, 10), text)
    }

    /// 10px italic run: a speaker title
    pub fn italic10(text: impl Into<String>) -> Self {
        Self::new(FontStyle::new(FontFamily::Italic, 10), text)
    }

    /// 10px regular run: spoken text
    pub fn plain10(text: impl Into<String>) -> Self {
        Self::new(FontStyle::new(FontFamily::Regular, 10), text)
    }

    pub fn class(&self) -> StyleClass {
        self.style.class()
    }

    /// Text with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Kind of a body-text run after style mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Speaker,
    SpeakerTitle,
    Text,
}

impl ContentKind {
    /// Map a style class to a content kind; `None` for non-body styles
    pub fn from_class(class: StyleClass) -> Option<Self> {
        match class {
            StyleClass::Bold10 => Some(Self::Speaker),
            StyleClass::Italic10 => Some(Self::SpeakerTitle),
            StyleClass::Plain10 => Some(Self::Text),
            StyleClass::Other => None,
        }
    }
}

/// A body-text run tagged as speaker, speaker title or spoken text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContentSpan {
    pub kind: ContentKind,
    pub text: String,
}

impl RawContentSpan {
    pub fn new(kind: ContentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Replace embedded line breaks with single spaces
pub fn normalize_newlines(text: &str) -> String {
    text.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_font_style() {
        let style = FontStyle::parse("font-family: Verdana-Bold; font-size:10px").unwrap();
        assert_eq!(style.family, FontFamily::Bold);
        assert_eq!(style.size_px, Some(10));
        assert_eq!(style.class(), StyleClass::Bold10);

        let style = FontStyle::parse("font-family: Verdana; font-size:24px").unwrap();
        assert_eq!(style.family, FontFamily::Regular);
        assert_eq!(style.class(), StyleClass::Other);

        assert!(FontStyle::parse("position:absolute; left:10px").is_none());
    }

    #[test]
    fn test_unknown_family_is_other() {
        let style = FontStyle::parse("font-family: Arial-BoldMT; font-size:10px").unwrap();
        assert_eq!(style.family, FontFamily::Other("Arial-BoldMT".to_string()));
        assert_eq!(style.class(), StyleClass::Other);
    }

    #[test]
    fn test_is_bold_in() {
        let style = FontStyle::new(FontFamily::Bold, 23);
        assert!(style.is_bold_in(&[20, 23]));
        assert!(!style.is_bold_in(&[25, 30]));
        assert!(!FontStyle::new(FontFamily::Regular, 23).is_bold_in(&[20, 23]));
    }
}
