/// What the user typed into the data box, and how it is encoded

use std::fmt;

use serde::{Deserialize, Serialize};

/// Characters dropped from phone numbers before encoding
const PHONE_SEPARATORS: [char; 4] = ['-', '(', ')', '.'];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputKind {
    #[default]
    Url,
    Phone,
    Text,
}

impl InputKind {
    pub const ALL: [InputKind; 3] = [InputKind::Url, InputKind::Phone, InputKind::Text];

    /// Turn the raw entry into the payload that gets encoded
    ///
    /// Surrounding whitespace is trimmed for every kind. Phone numbers lose
    /// their separators and become a `tel:` URI with a leading `+`.
    pub fn format_data(self, raw: &str) -> String {
        let text = raw.trim();
        if text.is_empty() {
            return String::new();
        }

        match self {
            InputKind::Phone => {
                let cleaned: String = text
                    .chars()
                    .filter(|c| !c.is_whitespace() && !PHONE_SEPARATORS.contains(c))
                    .collect();
                if cleaned.starts_with('+') {
                    format!("tel:{}", cleaned)
                } else {
                    format!("tel:+{}", cleaned)
                }
            }
            InputKind::Url | InputKind::Text => text.to_string(),
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputKind::Url => "URL",
            InputKind::Phone => "Phone",
            InputKind::Text => "Text",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_becomes_tel_uri() {
        assert_eq!(InputKind::Phone.format_data("(555) 123-4567"), "tel:+5551234567");
        assert_eq!(InputKind::Phone.format_data("555.123.4567"), "tel:+5551234567");
    }

    #[test]
    fn test_phone_keeps_existing_plus() {
        assert_eq!(InputKind::Phone.format_data(" +44 20 7946 0958 "), "tel:+442079460958");
    }

    #[test]
    fn test_url_and_text_are_trimmed_only() {
        assert_eq!(InputKind::Url.format_data("  https://github.com "), "https://github.com");
        assert_eq!(InputKind::Text.format_data("hello (world)"), "hello (world)");
    }

    #[test]
    fn test_blank_entry_stays_empty() {
        assert_eq!(InputKind::Phone.format_data("   "), "");
        assert_eq!(InputKind::Text.format_data(""), "");
    }
}
