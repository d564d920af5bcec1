//! Error types for message bundles.

use thiserror::Error;

/// Failure to read a bundle or a locale tag.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("message bundle is not a flat JSON object of strings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid locale tag '{0}'")]
    InvalidLocale(String),
}
