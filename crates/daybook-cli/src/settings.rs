//! Application configuration: a `daybook.toml` file overlaid with
//! `DAYBOOK__*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use daybook_core::config::SyncConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// SQLite file holding the lesson cache and the roster.
  pub store_path: PathBuf,
  /// Directory of per-calendar JSON event files.
  pub events_dir: PathBuf,
  pub sync:       SyncConfig,
}

impl AppConfig {
  /// Read `path` (optional) then the environment; `~` in paths is expanded.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("DAYBOOK").separator("__"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: AppConfig = settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.events_dir = expand_tilde(&cfg.events_dir);
    Ok(cfg)
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

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn loads_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daybook.toml");
    std::fs::write(
      &path,
      r#"
store_path = "/var/lib/daybook/daybook.db"
events_dir = "/var/lib/daybook/events"

[sync]
main_calendar = "lessons@school"
demo_calendar = "trials@school"
timezone      = "Asia/Tokyo"
"#,
    )
    .unwrap();

    let cfg = AppConfig::load(&path).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/daybook/daybook.db"));
    assert_eq!(cfg.sync.main_calendar, "lessons@school");
    assert_eq!(cfg.sync.demo_calendar, "trials@school");
    assert!(cfg.sync.time_zone().is_ok());
  }

  #[test]
  fn timezone_defaults_to_utc() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daybook.toml");
    std::fs::write(
      &path,
      "store_path = \"db\"\nevents_dir = \"ev\"\n[sync]\nmain_calendar = \"m\"\ndemo_calendar = \"d\"\n",
    )
    .unwrap();

    assert_eq!(AppConfig::load(&path).unwrap().sync.timezone, "UTC");
  }

  #[test]
  fn missing_required_keys_fail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daybook.toml");
    std::fs::write(&path, "store_path = \"db\"\n").unwrap();
    assert!(AppConfig::load(&path).is_err());
  }

  #[test]
  fn tilde_expansion() {
    let home = std::env::var("HOME").unwrap_or_default();
    if !home.is_empty() {
      assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(&home).join("x.db"));
    }
    assert_eq!(expand_tilde(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
  }
}
