use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub static CONFIG_PATH: Lazy<PathBuf> = Lazy::new(|| {
    if let Some(path) = option_env!("SIGMATCH_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    match ProjectDirs::from("", "", "sigmatch") {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("sigmatch.toml"),
    }
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model_root: PathBuf,
    pub genuine_root: PathBuf,
    pub forged_root: PathBuf,
    pub max_attempts: u32,
    /// RGB channels of the ink threshold color; alpha is implied opaque.
    pub ink_threshold: [u8; 3],
    /// Skip samples that fail to decode instead of failing the request.
    pub skip_undecodable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_root: PathBuf::from("signatures/models"),
            genuine_root: PathBuf::from("signatures/templates"),
            forged_root: PathBuf::from("signatures/forgeries"),
            max_attempts: 3,
            ink_threshold: [128, 128, 128],
            skip_undecodable: false,
        }
    }
}

impl Config {
    /// The ink threshold as a packed signed ARGB value.
    pub fn packed_threshold(&self) -> i32 {
        sigmatch_pixel::pack::pack_rgb(self.ink_threshold)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or(&CONFIG_PATH);
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config at {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<()> {
    let path = path.unwrap_or(&CONFIG_PATH);
    let data = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
