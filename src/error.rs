//! Error type shared by the whole crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration, building geometry or
/// presenting frames.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The configuration file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::io::config::Config`].
    #[error("Failed to parse TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Degenerate parameters handed to a mesh generator.
    #[error("Invalid mesh parameters: {0}")]
    InvalidMesh(String),

    /// A control name that does not map to any blimp control.
    #[error("Unknown control input '{0}'")]
    UnknownInput(String),

    /// Writing the rendered frame failed.
    #[error("Failed to save image to '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The native window could not be created or updated.
    #[error("Window error: {0}")]
    Window(#[from] minifb::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
