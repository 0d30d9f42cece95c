use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersonalizeError {
    #[error("not initialized: run 'personalize init'")]
    NotInitialized,

    #[error("unknown font: {0}")]
    UnknownFont(String),

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("duplicate {catalog} key '{key}'")]
    DuplicateKey { catalog: String, key: String },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid transition from {from} on {action}: {reason}")]
    InvalidTransition {
        from: String,
        action: String,
        reason: String,
    },

    #[error("no saved configuration for item {0}")]
    NoSavedItem(usize),

    #[error("invalid item count {0}: must be at least 1")]
    InvalidItemCount(usize),

    #[error("invalid mount point '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidMountPoint(String),

    #[error("nothing mounted at '{0}'")]
    MountNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PersonalizeError>;
