use crate::output::print_json;
use personalize_core::item::ItemConfiguration;
use personalize_core::validate;
use std::path::Path;

pub fn run(root: &Path, font: &str, color: &str, text: &str, json: bool) -> anyhow::Result<()> {
    let rules = super::load_rules(root)?;
    let item = ItemConfiguration::new(0, font, color, text);
    let result = validate::validate(&item, rules.catalog(), rules.max_text_len());

    if json {
        print_json(&serde_json::json!({
            "valid": result.is_ok(),
            "failure": result.as_ref().err(),
            "field": result.as_ref().err().map(|f| f.field()),
        }))?;
    } else {
        match &result {
            Ok(()) => println!("valid"),
            Err(failure) => println!("invalid: {failure} (field: {})", failure.field()),
        }
    }

    if let Err(failure) = result {
        anyhow::bail!("configuration is not valid: {failure}");
    }
    Ok(())
}
