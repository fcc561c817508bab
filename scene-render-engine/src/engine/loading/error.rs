use thiserror::Error;

/// Why a tracked asset never became usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("failed to load {url}: {reason}")]
    Failed { url: String, reason: String },

    #[error("{url} still pending after {after_secs:.1}s")]
    TimedOut { url: String, after_secs: f32 },

    #[error("{url} reported as loaded but missing from its asset store")]
    MissingAsset { url: String },
}

impl LoadError {
    pub fn url(&self) -> &str {
        match self {
            LoadError::Failed { url, .. }
            | LoadError::TimedOut { url, .. }
            | LoadError::MissingAsset { url } => url,
        }
    }
}
