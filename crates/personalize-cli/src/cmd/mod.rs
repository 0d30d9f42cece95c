pub mod catalog;
pub mod config;
pub mod detect;
pub mod init;
pub mod preview;
pub mod session;
pub mod validate;

use anyhow::Context;
use personalize_core::config::Rules;
use std::path::Path;

/// Effective rules for `root`: the project config when initialized, the
/// built-in defaults otherwise. A config with Error-level findings is refused.
pub(crate) fn load_rules(root: &Path) -> anyhow::Result<Rules> {
    Rules::load(root).context("failed to load config")
}
