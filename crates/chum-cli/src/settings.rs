//! Runtime configuration, layered from `chum.toml` and `CHUM_*` variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::{SeedableRng, rngs::StdRng};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Fixed seed for reproducible replies; entropy when unset.
  #[serde(default)]
  pub seed:       Option<u64>,
  /// Username assumed when `--user` is omitted.
  #[serde(default)]
  pub owner:      Option<String>,
}

fn default_store_path() -> PathBuf { PathBuf::from("chum.db") }

impl CliConfig {
  /// Read `path` (if it exists) and then the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CHUM"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise CliConfig")
  }

  /// `store_path` with a leading `~` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }

  pub fn rng(&self) -> StdRng {
    match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
