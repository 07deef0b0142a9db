// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use homedash_api::DEFAULT_BASE_URL;
use homedash_app::{APP_NAME, Theme};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "warn";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

pub const CONFIG_PATH_ENV: &str = "HOMEDASH_CONFIG_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Api {
    pub base_url: Option<String>,
    /// Unset means requests wait indefinitely.
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and keep values under [api], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(base_url) = &self.api.base_url {
            let parsed = Url::parse(base_url.trim()).with_context(|| {
                format!("api.base_url in {} is not a URL: {base_url:?}", path.display())
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!(
                    "api.base_url in {} must use http or https, got {}",
                    path.display(),
                    parsed.scheme()
                );
            }
        }

        if let Some(timeout) = &self.api.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed.is_zero() {
                bail!(
                    "api.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(theme) = &self.ui.theme
            && Theme::parse(theme).is_none()
        {
            bail!(
                "ui.theme in {} must be \"light\" or \"dark\", got {theme:?}",
                path.display()
            );
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.trim().to_ascii_lowercase().as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {level:?}",
                path.display(),
                LOG_LEVELS.join(", ")
            );
        }

        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.api
            .base_url
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Result<Option<Duration>> {
        self.api.timeout.as_deref().map(parse_duration).transpose()
    }

    pub fn theme(&self) -> Theme {
        self.ui
            .theme
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> String {
        self.log
            .level
            .as_deref()
            .map(|level| level.trim().to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned())
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# homedash config\n# Place this file at: {}\n\nversion = 1\n\n[api]\nbase_url = \"{}\"\n# Optional. Requests wait indefinitely when unset.\n# timeout = \"10s\"\n\n[ui]\ntheme = \"light\"\n\n[log]\n# One of: {}. HOMEDASH_LOG overrides this.\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_BASE_URL,
            LOG_LEVELS.join(", "),
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    let (value, millis_per_unit) = if let Some(value) = raw.strip_suffix("ms") {
        (value, 1)
    } else if let Some(value) = raw.strip_suffix('s') {
        (value, 1_000)
    } else if let Some(value) = raw.strip_suffix('m') {
        (value, 60_000)
    } else {
        bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)")
    };

    let amount: u64 = value
        .parse()
        .with_context(|| format!("invalid timeout duration {raw:?}"))?;
    Ok(Duration::from_millis(amount.saturating_mul(millis_per_unit)))
}
