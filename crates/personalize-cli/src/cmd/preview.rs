use crate::output::{print_json, print_pairs};
use personalize_core::item::{CounterLevel, ItemConfiguration};
use personalize_core::preview::{self, Preview};
use std::path::Path;

pub fn run(root: &Path, font: &str, color: &str, text: &str, json: bool) -> anyhow::Result<()> {
    let rules = super::load_rules(root)?;
    let draft = ItemConfiguration::new(0, font, color, text);
    let preview = preview::render(&draft, &rules);

    if json {
        print_json(&preview)
    } else {
        print_preview(&preview);
        Ok(())
    }
}

pub(crate) fn print_preview(preview: &Preview) {
    let counter = match preview.counter.level {
        CounterLevel::Normal => preview.counter.to_string(),
        CounterLevel::Warning => format!("{} (near limit)", preview.counter),
        CounterLevel::Limit => format!("{} (at limit)", preview.counter),
    };
    print_pairs(&[
        ("Preview", preview.display_text.clone()),
        ("Style", preview.style_hint.clone()),
        ("Color", preview.color_value.clone()),
        ("Details", preview.details.clone()),
        ("Counter", counter),
    ]);
}
