//! Configuration errors
//!
//! The per-tick simulation never fails; everything that can go wrong is caught
//! while turning level definitions into live levels.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level `{level}`: {what} has negative size {width}x{height}")]
    NegativeSize {
        level: String,
        what: String,
        width: f32,
        height: f32,
    },
    #[error("level `{level}`: player height must be positive, got {height}")]
    FlatPlayer { level: String, height: f32 },
    #[error("level `{level}`: screen must be positive, got {width}x{height}")]
    BadScreen { level: String, width: f32, height: f32 },
    #[error("level `{level}`: lunge telegraph must be positive, got {telegraph}")]
    BadTelegraph { level: String, telegraph: f32 },
    #[error("campaign has no levels")]
    EmptyCampaign,
    #[error("cannot read campaign file `{path}`: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed campaign json: {0}")]
    Json(#[from] serde_json::Error),
}
