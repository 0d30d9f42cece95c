use crate::config::Rules;
use crate::item::{CharCounter, ItemConfiguration};
use serde::{Deserialize, Serialize};

/// What the live preview shows for the draft being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub display_text: String,
    pub style_hint: String,
    pub color_value: String,
    pub details: String,
    pub counter: CharCounter,
}

/// Best-effort preview of a draft. Never validates: unselected or unknown
/// keys fall back to the catalog defaults so the text is always styled.
pub fn render(draft: &ItemConfiguration, rules: &Rules) -> Preview {
    let catalog = rules.catalog();
    let cfg = rules.config();

    let text = draft.trimmed_text();
    let display_text = if text.is_empty() {
        cfg.placeholder.clone()
    } else {
        text.to_string()
    };

    let font = catalog
        .font(&draft.font_key)
        .unwrap_or_else(|| catalog.default_font());
    let color = catalog
        .color(&draft.color_key)
        .unwrap_or_else(|| catalog.default_color());

    let mut parts = Vec::new();
    if draft.has_font() {
        parts.push(format!("{} font", draft.font_key));
    }
    if draft.has_color() {
        parts.push(format!("{} color", draft.color_key));
    }
    let details = if parts.is_empty() {
        cfg.details_placeholder.clone()
    } else {
        parts.join(" • ")
    };

    Preview {
        display_text,
        style_hint: font.style_hint.clone(),
        color_value: color.color_value.clone(),
        details,
        counter: CharCounter::for_text(&draft.text, cfg.max_text_len, cfg.counter_warn_margin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_uses_placeholder_and_defaults() {
        let p = render(&ItemConfiguration::empty(0), &Rules::default());
        assert_eq!(p.display_text, "Your name will appear here");
        assert_eq!(p.style_hint, "font-script");
        assert_eq!(p.color_value, "#d4a574");
        assert_eq!(p.details, "Select font and color above");
        assert_eq!(p.counter.count, 0);
    }

    #[test]
    fn selected_values_drive_style() {
        let draft = ItemConfiguration::new(0, "Art Deco", "Navy Blue", " Sarah ");
        let p = render(&draft, &Rules::default());
        assert_eq!(p.display_text, "Sarah");
        assert_eq!(p.style_hint, "font-artdeco");
        assert_eq!(p.color_value, "#1a3a5c");
        assert_eq!(p.details, "Art Deco font • Navy Blue color");
        assert_eq!(p.counter.count, 7);
    }

    #[test]
    fn partial_selection_details() {
        let draft = ItemConfiguration::new(0, "", "Silver", "");
        let p = render(&draft, &Rules::default());
        assert_eq!(p.details, "Silver color");
        assert_eq!(p.style_hint, "font-script");
        assert_eq!(p.color_value, "#8e8e8e");
    }

    #[test]
    fn unknown_keys_still_render_styled() {
        let draft = ItemConfiguration::new(0, "Comic", "Teal", "Hi");
        let p = render(&draft, &Rules::default());
        assert_eq!(p.style_hint, "font-script");
        assert_eq!(p.color_value, "#d4a574");
    }

    #[test]
    fn over_long_text_still_previews() {
        let long = "x".repeat(30);
        let draft = ItemConfiguration::new(0, "Bold", "Black", long.clone());
        let p = render(&draft, &Rules::default());
        assert_eq!(p.display_text, long);
        assert_eq!(p.counter.count, 30);
    }
}
