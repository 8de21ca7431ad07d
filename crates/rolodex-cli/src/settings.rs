//! Runtime settings, layered from defaults, an optional TOML file, `ROLODEX_*`
//! environment variables and command-line flags (highest wins).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use rolodex_core::DEFAULT_UPCOMING_DAYS;
use rolodex_store::Backend;
use serde::Deserialize;

/// Settings after all layers are merged.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Where the address book is persisted. A leading `~/` is expanded.
  pub store_path:    PathBuf,
  pub backend:       Backend,
  /// Default window for the `birthdays` command.
  pub upcoming_days: u32,
}

/// Values given on the command line; `None` defers to lower layers.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub store_path: Option<PathBuf>,
  pub backend:    Option<Backend>,
}

impl Settings {
  /// Merge every layer. `config_file` may be absent.
  pub fn load(config_file: &Path, overrides: Overrides) -> Result<Self, ConfigError> {
    Self::load_from(config_file, Environment::with_prefix("ROLODEX"), overrides)
  }

  fn load_from(
    config_file: &Path,
    env: Environment,
    overrides: Overrides,
  ) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("store_path", "addressbook.json")?
      .set_default("backend", Backend::default().to_string())?
      .set_default("upcoming_days", i64::from(DEFAULT_UPCOMING_DAYS))?
      .add_source(File::from(config_file.to_path_buf()).required(false))
      .add_source(env)
      .set_override_option(
        "store_path",
        overrides
          .store_path
          .map(|p| p.to_string_lossy().into_owned()),
      )?
      .set_override_option("backend", overrides.backend.map(|b| b.to_string()))?
      .build()?
      .try_deserialize()
  }

  /// [`Self::store_path`] with `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
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
