use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::warn;

use crate::config::Config;
use crate::error::SigError;
use crate::gate::normalize_token;

/// Which sample collection a lookup addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRole {
    Genuine,
    Forged,
}

impl fmt::Display for SampleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleRole::Genuine => write!(f, "genuine"),
            SampleRole::Forged => write!(f, "forged"),
        }
    }
}

/// A loaded signature image together with the file it came from.
#[derive(Debug)]
pub struct Sample {
    pub path: PathBuf,
    pub image: DynamicImage,
}

/// Read-only registry of identities and their signature images.
///
/// The filesystem layout is one backend; tests substitute in-memory
/// fixtures through the same interface.
pub trait SignatureStore {
    /// Normalized tokens for every identity with a model, in listing order.
    fn identities(&self) -> Result<Vec<String>, SigError>;

    /// The identity's single pre-built model image.
    fn load_model(&self, identity: &str) -> Result<Sample, SigError>;

    /// The identity's sample images for one role, in listing order.
    fn load_samples(&self, identity: &str, role: SampleRole) -> Result<Vec<Sample>, SigError>;
}

/// Filesystem-backed store over three configured roots: one flat directory
/// of model images, and one directory of per-identity subdirectories for
/// each sample role.
pub struct FsStore {
    model_root: PathBuf,
    genuine_root: PathBuf,
    forged_root: PathBuf,
    skip_undecodable: bool,
}

impl FsStore {
    pub fn new(cfg: &Config) -> Self {
        Self {
            model_root: cfg.model_root.clone(),
            genuine_root: cfg.genuine_root.clone(),
            forged_root: cfg.forged_root.clone(),
            skip_undecodable: cfg.skip_undecodable,
        }
    }
}

/// Entries in the order the filesystem returns them; deliberately unsorted,
/// listing order is storage-defined.
fn read_entries(dir: &Path) -> Result<Vec<PathBuf>, SigError> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        out.push(entry?.path());
    }
    Ok(out)
}

fn decode(path: &Path) -> Result<DynamicImage, SigError> {
    image::open(path).map_err(|source| SigError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })
}

impl SignatureStore for FsStore {
    fn identities(&self) -> Result<Vec<String>, SigError> {
        let mut out = Vec::new();
        for path in read_entries(&self.model_root)? {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                out.push(normalize_token(name));
            }
        }
        Ok(out)
    }

    fn load_model(&self, identity: &str) -> Result<Sample, SigError> {
        for path in read_entries(&self.model_root)? {
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            // Substring match here is case-sensitive, unlike the gate's
            // case-insensitive resolution.
            if name.contains(identity) {
                let image = decode(&path)?;
                return Ok(Sample { path, image });
            }
        }
        Err(SigError::ModelNotFound(identity.to_string()))
    }

    fn load_samples(&self, identity: &str, role: SampleRole) -> Result<Vec<Sample>, SigError> {
        let root = match role {
            SampleRole::Genuine => &self.genuine_root,
            SampleRole::Forged => &self.forged_root,
        };
        let needle = identity.to_lowercase();

        let dir = read_entries(root)?
            .into_iter()
            .filter(|p| p.is_dir())
            .find(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
            .ok_or_else(|| SigError::SampleDirNotFound {
                identity: identity.to_string(),
                role,
            })?;

        let mut samples = Vec::new();
        for path in read_entries(&dir)? {
            match decode(&path) {
                Ok(image) => samples.push(Sample { path, image }),
                Err(err) if self.skip_undecodable => {
                    warn!("skipping sample {}: {}", path.display(), err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(samples)
    }
}
