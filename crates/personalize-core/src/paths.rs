use crate::error::{PersonalizeError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PERSONALIZE_DIR: &str = ".personalize";
pub const CONFIG_FILE: &str = ".personalize/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn personalize_dir(root: &Path) -> PathBuf {
    root.join(PERSONALIZE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Mount point validation
// ---------------------------------------------------------------------------

static MOUNT_POINT_RE: OnceLock<Regex> = OnceLock::new();

fn mount_point_re() -> &'static Regex {
    MOUNT_POINT_RE
        .get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_mount_point(point: &str) -> Result<()> {
    if point.is_empty() || point.len() > 64 || !mount_point_re().is_match(point) {
        return Err(PersonalizeError::InvalidMountPoint(point.to_string()));
    }
    Ok(())
}
