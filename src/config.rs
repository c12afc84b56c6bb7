// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, fs, path::PathBuf, time::Duration};
use url::Url;

use crate::table::DEFAULT_PAGE_LENGTH;

/// Runtime settings. Defaults, then an optional YAML file named by
/// `PICKS_CONFIG`, then `PICKS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the CSV is served from; `csv_path` is resolved against it.
    pub base_url: String,
    pub csv_path: String,
    /// HTML file written after every load.
    pub output: PathBuf,
    pub title: String,
    pub page_length: usize,
    /// Reload interval. `None` loads once and exits.
    pub refresh_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            csv_path: "data/latest.csv".to_string(),
            output: PathBuf::from("index.html"),
            title: "Model Picks".to_string(),
            page_length: DEFAULT_PAGE_LENGTH,
            refresh_secs: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Same as [`Config::load`] with an injectable variable lookup.
    pub fn load_from(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = match var("PICKS_CONFIG") {
            Some(path) => Self::from_yaml_file(&path)?,
            None => Self::default(),
        };

        if let Some(v) = var("PICKS_BASE_URL") {
            cfg.base_url = v;
        }
        if let Some(v) = var("PICKS_CSV_PATH") {
            cfg.csv_path = v;
        }
        if let Some(v) = var("PICKS_OUTPUT") {
            cfg.output = PathBuf::from(v);
        }
        if let Some(v) = var("PICKS_TITLE") {
            cfg.title = v;
        }
        if let Some(v) = var("PICKS_PAGE_LENGTH") {
            cfg.page_length = v
                .parse()
                .with_context(|| format!("PICKS_PAGE_LENGTH is not a number: {v:?}"))?;
        }
        if let Some(v) = var("PICKS_REFRESH_SECS") {
            cfg.refresh_secs = Some(
                v.parse()
                    .with_context(|| format!("PICKS_REFRESH_SECS is not a number: {v:?}"))?,
            );
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config {path}"))
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.page_length > 0, "page_length must be at least 1");
        anyhow::ensure!(
            self.refresh_secs != Some(0),
            "refresh_secs must be at least 1 when set"
        );
        self.csv_url()?;
        Ok(())
    }

    /// `csv_path` joined onto `base_url`.
    pub fn csv_url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("parsing base URL {}", self.base_url))?;
        base.join(&self.csv_path)
            .with_context(|| format!("joining {} onto {}", self.csv_path, base))
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_secs.map(Duration::from_secs)
    }
}
