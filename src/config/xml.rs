//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Path: $BULK_RENAME_CONFIG if set, else the OS default config path.
//!
//! Notes:
//! - A missing default file is not an error; a missing explicit file is.
//! - Unknown XML fields are rejected to surface misconfigurations early.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::CONFIG_ENV;
use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "editor")]
    editor: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "verbose", default, deserialize_with = "de_bool_trimmed_opt")]
    verbose: Option<bool>,
}

// Custom deserializer that trims surrounding whitespace for optional bool
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| s.trim().parse::<bool>().ok()))
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();
    cfg.editor = non_empty(parsed.editor.as_deref()).map(str::to_owned);
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);
    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    cfg.verbose = parsed.verbose.unwrap_or(false);
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// The config file that would be used, and whether it was chosen explicitly.
pub fn config_path() -> Option<(PathBuf, bool)> {
    match env::var_os(CONFIG_ENV) {
        Some(p) if !p.is_empty() => Some((PathBuf::from(p), true)),
        _ => default_config_path().map(|p| (p, false)),
    }
}

/// Load the config file if there is one.
///
/// Returns Ok(None) when no explicit file is set and the default file is missing.
pub fn load_config() -> Result<Option<Config>> {
    let Some((path, explicit)) = config_path() else {
        return Ok(None);
    };
    if !explicit && !path.exists() {
        debug!(path = %path.display(), "no config file");
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), explicit, "loaded config");
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn parses_all_fields() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(
            &p,
            "<config>\n  <editor> code --wait </editor>\n  <log_level>debug</log_level>\n  <log_file>/tmp/x.log</log_file>\n  <verbose> true </verbose>\n</config>\n",
        )
        .unwrap();

        let cfg = load_config_from_xml_path(&p).unwrap();
        assert_eq!(cfg.editor.as_deref(), Some("code --wait"));
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/x.log")));
        assert!(cfg.verbose);
        assert!(!cfg.dry_run);
    }

    #[test]
    fn empty_config_gives_defaults() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config></config>").unwrap();
        assert_eq!(load_config_from_xml_path(&p).unwrap(), Config::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config><colour>blue</colour></config>").unwrap();
        assert!(load_config_from_xml_path(&p).is_err());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config><log_level>loud</log_level></config>").unwrap();
        let err = load_config_from_xml_path(&p).unwrap_err();
        assert!(format!("{err:#}").contains("invalid log level"), "{err:#}");
    }

    #[test]
    #[serial]
    fn explicit_env_path_must_exist() {
        let td = tempfile::tempdir().unwrap();
        let missing = td.path().join("nope.xml");
        // SAFETY: serialized with other env-touching tests.
        unsafe { env::set_var(CONFIG_ENV, &missing) };
        let result = load_config();
        unsafe { env::remove_var(CONFIG_ENV) };
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn explicit_env_path_is_loaded() {
        let td = tempfile::tempdir().unwrap();
        let p = td.path().join("cfg.xml");
        fs::write(&p, "<config><editor>nano</editor></config>").unwrap();
        unsafe { env::set_var(CONFIG_ENV, &p) };
        let result = load_config();
        let located = config_path();
        unsafe { env::remove_var(CONFIG_ENV) };
        assert_eq!(result.unwrap().unwrap().editor.as_deref(), Some("nano"));
        assert_eq!(located, Some((p, true)));
    }
}
