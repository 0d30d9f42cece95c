use crate::output::{print_json, print_table};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum CatalogSubcommand {
    /// List fonts grouped by family
    Fonts,
    /// List colors grouped by family
    Colors,
}

pub fn run(root: &Path, subcmd: CatalogSubcommand, json: bool) -> anyhow::Result<()> {
    let rules = super::load_rules(root)?;
    let catalog = rules.catalog();

    match subcmd {
        CatalogSubcommand::Fonts => {
            if json {
                return print_json(&catalog.fonts());
            }
            let rows = catalog
                .fonts_by_family()
                .into_iter()
                .flat_map(|(family, entries)| {
                    entries.into_iter().map(move |f| {
                        vec![
                            family.label().to_string(),
                            f.key.clone(),
                            f.label.clone(),
                            f.style_hint.clone(),
                        ]
                    })
                })
                .collect();
            print_table(&["FAMILY", "KEY", "LABEL", "STYLE"], rows);
        }
        CatalogSubcommand::Colors => {
            if json {
                return print_json(&serde_json::json!({
                    "default": catalog.default_color().key,
                    "colors": catalog.colors(),
                }));
            }
            let default_key = &catalog.default_color().key;
            let rows = catalog
                .colors_by_family()
                .into_iter()
                .flat_map(|(family, entries)| {
                    entries.into_iter().map(move |c| {
                        let marker = if &c.key == default_key { "*" } else { "" };
                        vec![
                            family.label().to_string(),
                            c.key.clone(),
                            c.label.clone(),
                            c.color_value.clone(),
                            marker.to_string(),
                        ]
                    })
                })
                .collect();
            print_table(&["FAMILY", "KEY", "LABEL", "VALUE", "DEFAULT"], rows);
        }
    }
    Ok(())
}
