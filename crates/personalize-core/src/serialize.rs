use crate::config::FieldNames;
use crate::item::ItemConfiguration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// Flat, ordered field list written to the host purchase form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(Vec<FormField>);

impl FormFields {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormField> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Names in the `properties[<name>]` form used by cart line items.
    pub fn as_line_item_properties(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|f| (format!("properties[{}]", f.name), f.value.clone()))
            .collect()
    }

    fn push(&mut self, name: String, value: &str) {
        self.0.push(FormField {
            name,
            value: value.to_string(),
        });
    }
}

/// Project saved configurations onto host form fields.
///
/// A single-item listing gets the three fixed names. Multi-item listings get
/// three position-named fields (1-based) per saved item.
pub fn serialize(saved: &[ItemConfiguration], item_count: usize, names: &FieldNames) -> FormFields {
    let mut out = FormFields::default();
    if item_count <= 1 {
        if let Some(item) = saved.first() {
            out.push(names.font.clone(), &item.font_key);
            out.push(names.color.clone(), &item.color_key);
            out.push(names.text.clone(), &item.text);
        }
        return out;
    }
    for (i, item) in saved.iter().enumerate() {
        let n = i + 1;
        out.push(names.positional(n, &names.font_suffix), &item.font_key);
        out.push(names.positional(n, &names.color_suffix), &item.color_key);
        out.push(names.positional(n, &names.text_suffix), &item.text);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_item_uses_fixed_names() {
        let saved = vec![ItemConfiguration::new(0, "Script", "Gold", "Sarah")];
        let fields = serialize(&saved, 1, &FieldNames::default());
        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("Font"), Some("Script"));
        assert_eq!(fields.get("Color"), Some("Gold"));
        assert_eq!(fields.get("Name on bottle"), Some("Sarah"));
    }

    #[test]
    fn nothing_saved_nothing_written() {
        assert!(serialize(&[], 1, &FieldNames::default()).is_empty());
        assert!(serialize(&[], 3, &FieldNames::default()).is_empty());
    }

    #[test]
    fn multi_item_uses_positional_names() {
        let saved = vec![
            ItemConfiguration::new(0, "Script", "Gold", "Ava"),
            ItemConfiguration::new(1, "Bold", "Black", "Mia"),
        ];
        let fields = serialize(&saved, 3, &FieldNames::default());
        assert_eq!(fields.len(), 6);
        assert_eq!(fields.get("Item 1 — Font"), Some("Script"));
        assert_eq!(fields.get("Item 2 — Color"), Some("Black"));
        assert_eq!(fields.get("Item 2 — Name"), Some("Mia"));
        assert!(fields.get("Item 3 — Name").is_none());
    }

    #[test]
    fn output_order_follows_items() {
        let saved = vec![
            ItemConfiguration::new(0, "Script", "Gold", "Ava"),
            ItemConfiguration::new(1, "Bold", "Black", "Mia"),
        ];
        let names: Vec<String> = serialize(&saved, 2, &FieldNames::default())
            .iter()
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(
            names,
            [
                "Item 1 — Font",
                "Item 1 — Color",
                "Item 1 — Name",
                "Item 2 — Font",
                "Item 2 — Color",
                "Item 2 — Name",
            ]
        );
    }

    #[test]
    fn line_item_property_names() {
        let saved = vec![ItemConfiguration::new(0, "Script", "Gold", "Sarah")];
        let props = serialize(&saved, 1, &FieldNames::default()).as_line_item_properties();
        assert_eq!(props[0], ("properties[Font]".to_string(), "Script".to_string()));
        assert_eq!(props[2].0, "properties[Name on bottle]");
    }

    #[test]
    fn json_is_a_flat_list() {
        let saved = vec![ItemConfiguration::new(0, "Script", "Gold", "Sarah")];
        let json = serde_json::to_value(serialize(&saved, 1, &FieldNames::default())).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Font");
    }
}
