//! Runtime settings for the terminal binary.
//!
//! Layers, later wins: built-in defaults, a JSON file named by
//! `WEBTRIS_CONFIG`, then individual `WEBTRIS_*` variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::core::{EngineConfig, RotationPolicy};

pub const CONFIG_PATH_VAR: &str = "WEBTRIS_CONFIG";
pub const LOG_PATH_VAR: &str = "WEBTRIS_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub engine: EngineConfig,
    /// Where to write logs; `None` keeps logging off unless `RUST_LOG` is set.
    pub log_path: Option<PathBuf>,
}

impl Settings {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using `lookup` in place of the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut engine = match non_empty(lookup(CONFIG_PATH_VAR)) {
            Some(path) => read_config_file(Path::new(&path))?,
            None => EngineConfig::default(),
        };
        apply_overrides(&mut engine, &lookup)?;
        engine.validate()?;

        Ok(Self {
            engine,
            log_path: non_empty(lookup(LOG_PATH_VAR)).map(PathBuf::from),
        })
    }
}

pub fn read_config_file(path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

fn apply_overrides(
    config: &mut EngineConfig,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(v) = non_empty(lookup("WEBTRIS_SPEED_MS")) {
        config.initial_speed_ms = parse_var("WEBTRIS_SPEED_MS", &v)?;
    }
    if let Some(v) = non_empty(lookup("WEBTRIS_MIN_SPEED_MS")) {
        config.min_speed_ms = parse_var("WEBTRIS_MIN_SPEED_MS", &v)?;
    }
    if let Some(v) = non_empty(lookup("WEBTRIS_SEED")) {
        config.seed = Some(parse_var("WEBTRIS_SEED", &v)?);
    }
    if let Some(v) = non_empty(lookup("WEBTRIS_ROTATION")) {
        config.rotation = RotationPolicy::from_str(&v)
            .ok_or_else(|| anyhow!("WEBTRIS_ROTATION: expected revert or unchecked, got {v}"))?;
    }
    Ok(())
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("{name}: invalid value {value:?}"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_env_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("WEBTRIS_SPEED_MS", "300"),
            ("WEBTRIS_MIN_SPEED_MS", " 50 "),
            ("WEBTRIS_SEED", "42"),
            ("WEBTRIS_ROTATION", "Unchecked"),
            ("WEBTRIS_LOG_PATH", "/tmp/webtris.log"),
        ]))
        .unwrap();

        assert_eq!(settings.engine.initial_speed_ms, 300);
        assert_eq!(settings.engine.min_speed_ms, 50);
        assert_eq!(settings.engine.seed, Some(42));
        assert_eq!(settings.engine.rotation, RotationPolicy::Unchecked);
        assert_eq!(settings.log_path, Some(PathBuf::from("/tmp/webtris.log")));
    }

    #[test]
    fn test_bad_values_are_errors() {
        assert!(Settings::from_lookup(lookup(&[("WEBTRIS_SPEED_MS", "fast")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("WEBTRIS_ROTATION", "ccw")])).is_err());
        // Parses, but the floor ends up above the initial speed.
        assert!(Settings::from_lookup(lookup(&[("WEBTRIS_MIN_SPEED_MS", "900")])).is_err());
    }

    #[test]
    fn test_file_then_env() {
        let path = env::temp_dir().join(format!("webtris-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{ "initial_speed_ms": 800, "line_score": 20 }"#).unwrap();
        let path_str = path.to_string_lossy().into_owned();

        let settings = Settings::from_lookup(lookup(&[
            ("WEBTRIS_CONFIG", path_str.as_str()),
            ("WEBTRIS_SPEED_MS", "700"),
        ]))
        .unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(settings.engine.initial_speed_ms, 700);
        assert_eq!(settings.engine.line_score, 20);
        assert_eq!(settings.engine.min_speed_ms, 100);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::from_lookup(lookup(&[("WEBTRIS_CONFIG", "/nonexistent/webtris.json")]));
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("reading config file"));
    }
}
