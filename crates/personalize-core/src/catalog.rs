use crate::error::{PersonalizeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const BUILTIN_CATALOG_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// FontFamily
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    Script,
    Serif,
    SansSerif,
    Decorative,
}

impl FontFamily {
    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Script,
            FontFamily::Serif,
            FontFamily::SansSerif,
            FontFamily::Decorative,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontFamily::Script => "script",
            FontFamily::Serif => "serif",
            FontFamily::SansSerif => "sans_serif",
            FontFamily::Decorative => "decorative",
        }
    }

    /// Group heading shown above the family's options.
    pub fn label(self) -> &'static str {
        match self {
            FontFamily::Script => "Script & Cursive",
            FontFamily::Serif => "Serif (Classic)",
            FontFamily::SansSerif => "Sans Serif (Modern)",
            FontFamily::Decorative => "Decorative",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ColorFamily
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFamily {
    Metallic,
    Classic,
}

impl ColorFamily {
    pub fn all() -> &'static [ColorFamily] {
        &[ColorFamily::Metallic, ColorFamily::Classic]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorFamily::Metallic => "metallic",
            ColorFamily::Classic => "classic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorFamily::Metallic => "Metallic",
            ColorFamily::Classic => "Classic",
        }
    }
}

impl fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontEntry {
    pub key: String,
    pub label: String,
    pub family: FontFamily,
    /// Visual-style key the preview applies to the rendered text.
    pub style_hint: String,
}

impl FontEntry {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        family: FontFamily,
        style_hint: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            family,
            style_hint: style_hint.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub key: String,
    pub label: String,
    pub family: ColorFamily,
    /// Concrete color value, e.g. `#d4a574`.
    pub color_value: String,
}

impl ColorEntry {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        family: ColorFamily,
        color_value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            family,
            color_value: color_value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldCatalog
// ---------------------------------------------------------------------------

/// Unchecked catalog shape as it appears in config files.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogData {
    #[serde(default = "default_version")]
    pub version: u32,
    pub default_color: String,
    pub fonts: Vec<FontEntry>,
    pub colors: Vec<ColorEntry>,
}

fn default_version() -> u32 {
    BUILTIN_CATALOG_VERSION
}

/// The closed set of selectable fonts and colors.
///
/// Keys are unique within each list, both lists are non-empty, and the
/// designated default color is one of the colors. These hold for every
/// value of this type, including ones read from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogData")]
pub struct FieldCatalog {
    version: u32,
    default_color: String,
    fonts: Vec<FontEntry>,
    colors: Vec<ColorEntry>,
}

impl TryFrom<CatalogData> for FieldCatalog {
    type Error = PersonalizeError;

    fn try_from(data: CatalogData) -> Result<Self> {
        FieldCatalog::new(data.version, data.default_color, data.fonts, data.colors)
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FieldCatalog {
    pub fn new(
        version: u32,
        default_color: impl Into<String>,
        fonts: Vec<FontEntry>,
        colors: Vec<ColorEntry>,
    ) -> Result<Self> {
        let default_color = default_color.into();
        if fonts.is_empty() {
            return Err(PersonalizeError::InvalidCatalog(
                "font list is empty".to_string(),
            ));
        }
        if colors.is_empty() {
            return Err(PersonalizeError::InvalidCatalog(
                "color list is empty".to_string(),
            ));
        }
        check_unique("font", fonts.iter().map(|f| f.key.as_str()))?;
        check_unique("color", colors.iter().map(|c| c.key.as_str()))?;
        if !colors.iter().any(|c| c.key == default_color) {
            return Err(PersonalizeError::InvalidCatalog(format!(
                "default color '{default_color}' is not in the color list"
            )));
        }
        Ok(Self {
            version,
            default_color,
            fonts,
            colors,
        })
    }

    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_CATALOG_VERSION,
            default_color: "Gold".to_string(),
            fonts: builtin_fonts(),
            colors: builtin_colors(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn fonts(&self) -> &[FontEntry] {
        &self.fonts
    }

    pub fn colors(&self) -> &[ColorEntry] {
        &self.colors
    }

    pub fn font(&self, key: &str) -> Option<&FontEntry> {
        self.fonts.iter().find(|f| f.key == key)
    }

    pub fn color(&self, key: &str) -> Option<&ColorEntry> {
        self.colors.iter().find(|c| c.key == key)
    }

    pub fn resolve_font(&self, key: &str) -> Result<&FontEntry> {
        self.font(key)
            .ok_or_else(|| PersonalizeError::UnknownFont(key.to_string()))
    }

    pub fn resolve_color(&self, key: &str) -> Result<&ColorEntry> {
        self.color(key)
            .ok_or_else(|| PersonalizeError::UnknownColor(key.to_string()))
    }

    /// The first font in catalog order.
    pub fn default_font(&self) -> &FontEntry {
        &self.fonts[0]
    }

    pub fn default_color(&self) -> &ColorEntry {
        self.color(&self.default_color)
            .unwrap_or(&self.colors[0])
    }

    /// Fonts grouped by family, families in their declared order. Empty
    /// families are omitted.
    pub fn fonts_by_family(&self) -> Vec<(FontFamily, Vec<&FontEntry>)> {
        FontFamily::all()
            .iter()
            .map(|&fam| {
                let entries: Vec<&FontEntry> =
                    self.fonts.iter().filter(|f| f.family == fam).collect();
                (fam, entries)
            })
            .filter(|(_, entries)| !entries.is_empty())
            .collect()
    }

    pub fn colors_by_family(&self) -> Vec<(ColorFamily, Vec<&ColorEntry>)> {
        ColorFamily::all()
            .iter()
            .map(|&fam| {
                let entries: Vec<&ColorEntry> =
                    self.colors.iter().filter(|c| c.family == fam).collect();
                (fam, entries)
            })
            .filter(|(_, entries)| !entries.is_empty())
            .collect()
    }
}

fn check_unique<'a>(catalog: &str, keys: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(PersonalizeError::DuplicateKey {
                catalog: catalog.to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Built-in data
// ---------------------------------------------------------------------------

fn builtin_fonts() -> Vec<FontEntry> {
    use FontFamily::*;
    [
        ("Script", "Script (Elegant Cursive)", Script, "font-script"),
        ("Calligraphy", "Calligraphy (Formal)", Script, "font-calligraphy"),
        ("Handwritten", "Handwritten (Casual)", Script, "font-handwritten"),
        ("Brush Script", "Brush Script (Artistic)", Script, "font-brush"),
        ("Signature", "Signature (Personal)", Script, "font-signature"),
        ("Serif", "Serif (Traditional)", Serif, "font-serif"),
        ("Elegant", "Elegant (Refined)", Serif, "font-elegant"),
        ("Old English", "Old English (Gothic)", Serif, "font-oldenglish"),
        ("Roman", "Roman (Timeless)", Serif, "font-roman"),
        ("Playfair", "Playfair (Sophisticated)", Serif, "font-playfair"),
        ("Sans Serif", "Sans Serif (Clean)", SansSerif, "font-sans"),
        ("Modern", "Modern (Contemporary)", SansSerif, "font-modern"),
        ("Minimalist", "Minimalist (Simple)", SansSerif, "font-minimalist"),
        ("Bold", "Bold (Statement)", SansSerif, "font-bold"),
        ("Rounded", "Rounded (Friendly)", SansSerif, "font-rounded"),
        ("Art Deco", "Art Deco (Vintage)", Decorative, "font-artdeco"),
        ("Stencil", "Stencil (Industrial)", Decorative, "font-stencil"),
        ("Monogram", "Monogram (Initial Style)", Decorative, "font-monogram"),
        ("Vintage", "Vintage (Retro)", Decorative, "font-vintage"),
    ]
    .into_iter()
    .map(|(key, label, family, hint)| FontEntry::new(key, label, family, hint))
    .collect()
}

fn builtin_colors() -> Vec<ColorEntry> {
    use ColorFamily::*;
    [
        ("Gold", Metallic, "#d4a574"),
        ("Silver", Metallic, "#8e8e8e"),
        ("Rose Gold", Metallic, "#b76e79"),
        ("Champagne", Metallic, "#f7e7ce"),
        ("Bronze", Metallic, "#cd7f32"),
        ("Black", Classic, "#222222"),
        // Rendered as grey so the preview stays readable on a white card.
        ("White", Classic, "#666666"),
        ("Navy Blue", Classic, "#1a3a5c"),
        ("Burgundy", Classic, "#722f37"),
        ("Forest Green", Classic, "#228b22"),
        ("Ivory", Classic, "#fffff0"),
        ("Blush Pink", Classic, "#de98ab"),
    ]
    .into_iter()
    .map(|(key, family, value)| ColorEntry::new(key, key, family, value))
    .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_passes_its_own_checks() {
        let cat = FieldCatalog::builtin();
        let rebuilt = FieldCatalog::new(
            cat.version(),
            cat.default_color().key.clone(),
            cat.fonts().to_vec(),
            cat.colors().to_vec(),
        )
        .unwrap();
        assert_eq!(rebuilt, cat);
        assert_eq!(cat.fonts().len(), 19);
        assert_eq!(cat.colors().len(), 12);
    }

    #[test]
    fn defaults_are_first_font_and_gold() {
        let cat = FieldCatalog::builtin();
        assert_eq!(cat.default_font().key, "Script");
        assert_eq!(cat.default_color().key, "Gold");
        assert_eq!(cat.default_color().color_value, "#d4a574");
    }

    #[test]
    fn lookup_unknown_key_is_detectable() {
        let cat = FieldCatalog::builtin();
        assert!(cat.font("Comic").is_none());
        assert!(matches!(
            cat.resolve_font("Comic"),
            Err(PersonalizeError::UnknownFont(k)) if k == "Comic"
        ));
        assert!(matches!(
            cat.resolve_color("Teal"),
            Err(PersonalizeError::UnknownColor(_))
        ));
        assert_eq!(cat.resolve_color("Rose Gold").unwrap().color_value, "#b76e79");
    }

    #[test]
    fn duplicate_font_key_rejected() {
        let fonts = vec![
            FontEntry::new("Script", "Script", FontFamily::Script, "a"),
            FontEntry::new("Script", "Script again", FontFamily::Serif, "b"),
        ];
        let colors = vec![ColorEntry::new("Gold", "Gold", ColorFamily::Metallic, "#d4a574")];
        let err = FieldCatalog::new(1, "Gold", fonts, colors).unwrap_err();
        assert!(matches!(
            err,
            PersonalizeError::DuplicateKey { ref catalog, ref key } if catalog == "font" && key == "Script"
        ));
    }

    #[test]
    fn default_color_must_exist() {
        let fonts = vec![FontEntry::new("Script", "Script", FontFamily::Script, "a")];
        let colors = vec![ColorEntry::new("Gold", "Gold", ColorFamily::Metallic, "#d4a574")];
        let err = FieldCatalog::new(1, "Silver", fonts, colors).unwrap_err();
        assert!(err.to_string().contains("default color 'Silver'"));
    }

    #[test]
    fn empty_lists_rejected() {
        let colors = vec![ColorEntry::new("Gold", "Gold", ColorFamily::Metallic, "#d4a574")];
        assert!(FieldCatalog::new(1, "Gold", Vec::new(), colors).is_err());
        let fonts = vec![FontEntry::new("Script", "Script", FontFamily::Script, "a")];
        assert!(FieldCatalog::new(1, "Gold", fonts, Vec::new()).is_err());
    }

    #[test]
    fn grouping_preserves_family_order() {
        let cat = FieldCatalog::builtin();
        let fonts = cat.fonts_by_family();
        let families: Vec<FontFamily> = fonts.iter().map(|(f, _)| *f).collect();
        assert_eq!(families, FontFamily::all());
        assert_eq!(fonts[0].1.len(), 5);
        assert_eq!(fonts[3].1.len(), 4);

        let colors = cat.colors_by_family();
        assert_eq!(colors[0].0, ColorFamily::Metallic);
        assert_eq!(colors[0].1.len(), 5);
        assert_eq!(colors[1].1.len(), 7);
    }

    #[test]
    fn yaml_catalog_goes_through_checks() {
        let yaml = r##"
default_color: Gold
fonts:
  - { key: Script, label: Script, family: script, style_hint: font-script }
  - { key: Script, label: Dup, family: serif, style_hint: font-serif }
colors:
  - { key: Gold, label: Gold, family: metallic, color_value: "#d4a574" }
"##;
        let parsed: std::result::Result<FieldCatalog, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn yaml_catalog_roundtrip() {
        let cat = FieldCatalog::builtin();
        let yaml = serde_yaml::to_string(&cat).unwrap();
        let parsed: FieldCatalog = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, cat);
    }
}
