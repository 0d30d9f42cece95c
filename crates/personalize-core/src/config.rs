use crate::catalog::FieldCatalog;
use crate::error::{PersonalizeError, Result};
use crate::paths;
use crate::validate::DEFAULT_MAX_TEXT_LEN;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// FieldNames
// ---------------------------------------------------------------------------

/// Property names written to the host purchase form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNames {
    #[serde(default = "default_font_name")]
    pub font: String,
    #[serde(default = "default_color_name")]
    pub color: String,
    #[serde(default = "default_text_name")]
    pub text: String,
    #[serde(default = "default_item_label")]
    pub item_label: String,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default = "default_font_suffix")]
    pub font_suffix: String,
    #[serde(default = "default_color_suffix")]
    pub color_suffix: String,
    #[serde(default = "default_text_suffix")]
    pub text_suffix: String,
}

fn default_font_name() -> String {
    "Font".to_string()
}

fn default_color_name() -> String {
    "Color".to_string()
}

fn default_text_name() -> String {
    "Name on bottle".to_string()
}

fn default_item_label() -> String {
    "Item".to_string()
}

fn default_separator() -> String {
    " — ".to_string()
}

fn default_font_suffix() -> String {
    "Font".to_string()
}

fn default_color_suffix() -> String {
    "Color".to_string()
}

fn default_text_suffix() -> String {
    "Name".to_string()
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            font: default_font_name(),
            color: default_color_name(),
            text: default_text_name(),
            item_label: default_item_label(),
            separator: default_separator(),
            font_suffix: default_font_suffix(),
            color_suffix: default_color_suffix(),
            text_suffix: default_text_suffix(),
        }
    }
}

impl FieldNames {
    /// Name for one field of the item at 1-based `position` in a multi-item set.
    pub fn positional(&self, position: usize, suffix: &str) -> String {
        format!("{} {}{}{}", self.item_label, position, self.separator, suffix)
    }
}

// ---------------------------------------------------------------------------
// ConfiguratorConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfiguratorConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,
    #[serde(default = "default_warn_margin")]
    pub counter_warn_margin: usize,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_details_placeholder")]
    pub details_placeholder: String,
    #[serde(default = "default_incomplete_message")]
    pub incomplete_message: String,
    #[serde(default)]
    pub fields: FieldNames,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<FieldCatalog>,
}

fn default_version() -> u32 {
    1
}

fn default_max_text_len() -> usize {
    DEFAULT_MAX_TEXT_LEN
}

fn default_warn_margin() -> usize {
    5
}

fn default_placeholder() -> String {
    "Your name will appear here".to_string()
}

fn default_details_placeholder() -> String {
    "Select font and color above".to_string()
}

fn default_incomplete_message() -> String {
    "Please complete all personalization fields before adding to cart.".to_string()
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            max_text_len: default_max_text_len(),
            counter_warn_margin: default_warn_margin(),
            placeholder: default_placeholder(),
            details_placeholder: default_details_placeholder(),
            incomplete_message: default_incomplete_message(),
            fields: FieldNames::default(),
            catalog: None,
        }
    }
}

impl ConfiguratorConfig {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(PersonalizeError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: ConfiguratorConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Load the project config, falling back to built-in defaults when the
    /// project has not been initialized.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(PersonalizeError::NotInitialized) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.max_text_len == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "max_text_len is 0: no text could ever be saved".to_string(),
            });
        }

        if self.max_text_len > DEFAULT_MAX_TEXT_LEN {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "max_text_len={} exceeds the {DEFAULT_MAX_TEXT_LEN}-character print limit",
                    self.max_text_len
                ),
            });
        }

        if self.counter_warn_margin >= self.max_text_len && self.max_text_len > 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "counter_warn_margin={} is not below max_text_len={} (counter always warns)",
                    self.counter_warn_margin, self.max_text_len
                ),
            });
        }

        if self.placeholder.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "placeholder is blank: empty previews render nothing".to_string(),
            });
        }

        let f = &self.fields;
        let named = [
            ("fields.font", &f.font),
            ("fields.color", &f.color),
            ("fields.text", &f.text),
            ("fields.item_label", &f.item_label),
            ("fields.font_suffix", &f.font_suffix),
            ("fields.color_suffix", &f.color_suffix),
            ("fields.text_suffix", &f.text_suffix),
        ];
        for (key, value) in named {
            if value.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("{key} is empty"),
                });
            }
        }

        if f.font == f.color || f.font == f.text || f.color == f.text {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "single-item field names must be distinct".to_string(),
            });
        }
        if f.font_suffix == f.color_suffix
            || f.font_suffix == f.text_suffix
            || f.color_suffix == f.text_suffix
        {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "multi-item field suffixes must be distinct".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Effective configuration for a mounted configurator: the config plus the
/// catalog it resolves to.
#[derive(Debug, Clone)]
pub struct Rules {
    config: ConfiguratorConfig,
    catalog: FieldCatalog,
}

impl Rules {
    /// Resolve `config` into rules. Any Error-level finding from
    /// [`ConfiguratorConfig::validate`] is fatal.
    pub fn new(config: ConfiguratorConfig) -> Result<Self> {
        let errors: Vec<String> = config
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message)
            .collect();
        if !errors.is_empty() {
            return Err(PersonalizeError::InvalidConfig(errors.join("; ")));
        }
        let catalog = config.catalog.clone().unwrap_or_default();
        Ok(Self { config, catalog })
    }

    /// Rules for the project at `root`, built-in defaults when it has not
    /// been initialized.
    pub fn load(root: &Path) -> Result<Self> {
        Self::new(ConfiguratorConfig::load_or_default(root)?)
    }

    pub fn config(&self) -> &ConfiguratorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn max_text_len(&self) -> usize {
        self.config.max_text_len
    }

    pub fn fields(&self) -> &FieldNames {
        &self.config.fields
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            config: ConfiguratorConfig::default(),
            catalog: FieldCatalog::builtin(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
