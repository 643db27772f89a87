use std::path::PathBuf;

use thiserror::Error;

use crate::store::SampleRole;

/// Failures surfaced by the comparison core.
#[derive(Error, Debug)]
pub enum SigError {
    /// No file in the model store names this identity.
    #[error("no model found for identity `{0}`")]
    ModelNotFound(String),

    /// No subdirectory under the role's root names this identity.
    #[error("no {role} sample directory found for identity `{identity}`")]
    SampleDirNotFound { identity: String, role: SampleRole },

    /// A stored file could not be decoded as an image.
    #[error("failed to decode image {path}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The login attempt budget was spent without resolving an identity.
    #[error("session exhausted after {attempts} failed login attempt(s)")]
    SessionExhausted { attempts: u32 },

    #[error("storage error")]
    Io(#[from] std::io::Error),
}
