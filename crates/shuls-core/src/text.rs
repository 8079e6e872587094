//! Text direction hints for candidate labels.

use serde::{Deserialize, Serialize};

/// Returns true if `text` contains at least one Hebrew letter.
pub fn has_hebrew(text: &str) -> bool {
    text.chars().any(|c| ('\u{05D0}'..='\u{05EA}').contains(&c))
}

/// Direction a label should be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn for_text(text: &str) -> Self {
        if has_hebrew(text) { Self::Rtl } else { Self::Ltr }
    }

    /// `dir` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    /// `lang` attribute value.
    pub fn lang(&self) -> &'static str {
        match self {
            Self::Ltr => "en",
            Self::Rtl => "he",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_hebrew() {
        assert!(has_hebrew("בית כנסת, Teaneck"));
        assert!(has_hebrew("ך"));
        assert!(!has_hebrew("Young Israel, Teaneck"));
        assert!(!has_hebrew(""));
    }

    #[test]
    fn test_direction_for_text() {
        let rtl = TextDirection::for_text("ישראל");
        assert_eq!(rtl, TextDirection::Rtl);
        assert_eq!(rtl.as_str(), "rtl");
        assert_eq!(rtl.lang(), "he");
        assert_eq!(TextDirection::for_text("Israel").lang(), "en");
    }
}
