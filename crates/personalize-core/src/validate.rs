use crate::catalog::FieldCatalog;
use crate::item::{Field, ItemConfiguration};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MAX_TEXT_LEN: usize = 25;

/// The first reason a draft cannot be saved.
///
/// Checks run font, then color, then text; only the first failure is
/// reported so the caller can focus exactly one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFailure {
    MissingFont,
    UnknownFont { key: String },
    MissingColor,
    UnknownColor { key: String },
    MissingText,
    TextTooLong { len: usize, max: usize },
}

impl ValidationFailure {
    /// The field that should receive focus.
    pub fn field(&self) -> Field {
        match self {
            ValidationFailure::MissingFont | ValidationFailure::UnknownFont { .. } => Field::Font,
            ValidationFailure::MissingColor | ValidationFailure::UnknownColor { .. } => {
                Field::Color
            }
            ValidationFailure::MissingText | ValidationFailure::TextTooLong { .. } => Field::Text,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::MissingFont => f.write_str("please select a font"),
            ValidationFailure::UnknownFont { key } => write!(f, "font '{key}' is not available"),
            ValidationFailure::MissingColor => f.write_str("please select a color"),
            ValidationFailure::UnknownColor { key } => {
                write!(f, "color '{key}' is not available")
            }
            ValidationFailure::MissingText => f.write_str("please enter the text to print"),
            ValidationFailure::TextTooLong { len, max } => {
                write!(f, "text is {len} characters; the limit is {max}")
            }
        }
    }
}

pub fn validate(
    item: &ItemConfiguration,
    catalog: &FieldCatalog,
    max_text_len: usize,
) -> Result<(), ValidationFailure> {
    if !item.has_font() {
        return Err(ValidationFailure::MissingFont);
    }
    if catalog.font(&item.font_key).is_none() {
        return Err(ValidationFailure::UnknownFont {
            key: item.font_key.clone(),
        });
    }
    if !item.has_color() {
        return Err(ValidationFailure::MissingColor);
    }
    if catalog.color(&item.color_key).is_none() {
        return Err(ValidationFailure::UnknownColor {
            key: item.color_key.clone(),
        });
    }
    let text = item.trimmed_text();
    if text.is_empty() {
        return Err(ValidationFailure::MissingText);
    }
    let len = text.chars().count();
    if len > max_text_len {
        return Err(ValidationFailure::TextTooLong {
            len,
            max: max_text_len,
        });
    }
    Ok(())
}

pub fn is_complete(item: &ItemConfiguration, catalog: &FieldCatalog, max_text_len: usize) -> bool {
    validate(item, catalog, max_text_len).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(font: &str, color: &str, text: &str) -> Result<(), ValidationFailure> {
        let item = ItemConfiguration::new(0, font, color, text);
        validate(&item, &FieldCatalog::builtin(), DEFAULT_MAX_TEXT_LEN)
    }

    #[test]
    fn complete_item_is_valid() {
        assert!(check("Script", "Gold", "Sarah").is_ok());
    }

    #[test]
    fn font_checked_first() {
        let err = check("", "", "").unwrap_err();
        assert_eq!(err, ValidationFailure::MissingFont);
        assert_eq!(err.field(), Field::Font);
    }

    #[test]
    fn color_checked_before_text() {
        let err = check("Script", "", "").unwrap_err();
        assert_eq!(err, ValidationFailure::MissingColor);
        assert_eq!(err.field(), Field::Color);
    }

    #[test]
    fn whitespace_only_text_is_missing() {
        assert_eq!(
            check("Script", "Gold", "   ").unwrap_err(),
            ValidationFailure::MissingText
        );
    }

    #[test]
    fn twenty_five_chars_accepted_twenty_six_rejected() {
        assert!(check("Script", "Gold", &"a".repeat(25)).is_ok());
        let err = check("Script", "Gold", &"a".repeat(26)).unwrap_err();
        assert_eq!(err, ValidationFailure::TextTooLong { len: 26, max: 25 });
        assert_eq!(err.field(), Field::Text);
    }

    #[test]
    fn length_measured_after_trim() {
        let padded = format!("  {}  ", "a".repeat(25));
        assert!(check("Script", "Gold", &padded).is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(check("Script", "Gold", &"é".repeat(25)).is_ok());
    }

    #[test]
    fn unknown_keys_fail_on_their_field() {
        assert_eq!(
            check("Comic", "Gold", "Sarah").unwrap_err().field(),
            Field::Font
        );
        assert_eq!(
            check("Script", "Teal", "Sarah").unwrap_err(),
            ValidationFailure::UnknownColor {
                key: "Teal".to_string()
            }
        );
    }
}
