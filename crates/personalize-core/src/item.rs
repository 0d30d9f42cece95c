use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// One of the three user-editable inputs of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Font,
    Color,
    Text,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Font => "font",
            Field::Color => "color",
            Field::Text => "text",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ItemConfiguration
// ---------------------------------------------------------------------------

/// Font, color and text chosen for one physical item.
///
/// Empty keys mean "not selected yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemConfiguration {
    pub index: usize,
    #[serde(default)]
    pub font_key: String,
    #[serde(default)]
    pub color_key: String,
    #[serde(default)]
    pub text: String,
}

impl ItemConfiguration {
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn new(
        index: usize,
        font_key: impl Into<String>,
        color_key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            index,
            font_key: font_key.into(),
            color_key: color_key.into(),
            text: text.into(),
        }
    }

    pub fn has_font(&self) -> bool {
        !self.font_key.is_empty()
    }

    pub fn has_color(&self) -> bool {
        !self.color_key.is_empty()
    }

    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Copy of this configuration with the text trimmed, as it is stored
    /// once saved.
    pub fn normalized(&self) -> Self {
        Self {
            index: self.index,
            font_key: self.font_key.clone(),
            color_key: self.color_key.clone(),
            text: self.trimmed_text().to_string(),
        }
    }

    /// Same selections, re-addressed to another slot.
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

// ---------------------------------------------------------------------------
// CharCounter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterLevel {
    Normal,
    Warning,
    Limit,
}

/// Live character counter for the text field.
///
/// Counts the raw input, whitespace included; trimming only happens when the
/// text is validated or saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharCounter {
    pub count: usize,
    pub max: usize,
    pub level: CounterLevel,
}

impl CharCounter {
    pub fn for_text(text: &str, max: usize, warn_margin: usize) -> Self {
        let count = text.chars().count();
        let level = if count >= max {
            CounterLevel::Limit
        } else if count >= max.saturating_sub(warn_margin) {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        };
        Self { count, max, level }
    }
}

impl fmt::Display for CharCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} characters", self.count, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_item_has_no_selections() {
        let item = ItemConfiguration::empty(2);
        assert_eq!(item.index, 2);
        assert!(!item.has_font());
        assert!(!item.has_color());
        assert_eq!(item.trimmed_text(), "");
    }

    #[test]
    fn normalized_trims_text_only() {
        let item = ItemConfiguration::new(0, "Script", "Gold", "  Sarah ");
        let n = item.normalized();
        assert_eq!(n.text, "Sarah");
        assert_eq!(n.font_key, "Script");
        assert_eq!(item.text, "  Sarah ");
    }

    #[test]
    fn counter_counts_raw_input() {
        assert_eq!(CharCounter::for_text("Sarah", 25, 5).count, 5);
        assert_eq!(CharCounter::for_text("  Sarah  ", 25, 5).count, 9);
        assert_eq!(CharCounter::for_text("Zoë", 25, 5).count, 3);
    }

    #[test]
    fn counter_levels() {
        assert_eq!(CharCounter::for_text(&"a".repeat(19), 25, 5).level, CounterLevel::Normal);
        assert_eq!(CharCounter::for_text(&"a".repeat(20), 25, 5).level, CounterLevel::Warning);
        assert_eq!(CharCounter::for_text(&"a".repeat(25), 25, 5).level, CounterLevel::Limit);
    }

    #[test]
    fn counter_display() {
        assert_eq!(
            CharCounter::for_text("Sarah", 25, 5).to_string(),
            "5 / 25 characters"
        );
    }
}
