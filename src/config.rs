//! Deployment settings.
//!
//! Loaded once at startup, highest priority first:
//! 1. Environment variables (`PLANNERD_*`)
//! 2. TOML file named by `PLANNERD_CONFIG`
//! 3. Defaults

use crate::catalog::{Catalog, SubjectChapters, CATALOG_2022};
use crate::export::{ExportOptions, ExportStyle};
use crate::plan::PeriodScheme;
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_CONFIG_PATH: &str = "PLANNERD_CONFIG";
pub const ENV_PERIOD_SCHEME: &str = "PLANNERD_PERIOD_SCHEME";
pub const ENV_EXPORT_STYLE: &str = "PLANNERD_EXPORT_STYLE";
pub const ENV_CATALOG: &str = "PLANNERD_CATALOG";
pub const ENV_AUTO_PRINT: &str = "PLANNERD_AUTO_PRINT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub period_scheme: PeriodScheme,
    pub export_style: ExportStyle,
    /// Built-in catalog name; ignored when `subjects` is non-empty.
    pub catalog: String,
    pub auto_print: bool,
    pub subjects: Vec<SubjectChapters>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            period_scheme: PeriodScheme::Week,
            export_style: ExportStyle::Modern,
            catalog: CATALOG_2022.to_string(),
            auto_print: true,
            subjects: Vec::new(),
        }
    }
}

fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let base = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) if !path.trim().is_empty() => Self::load_from_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        base.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.to_string_lossy()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.to_string_lossy()))
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Applies `PLANNERD_*` overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_PERIOD_SCHEME) {
            self.period_scheme = PeriodScheme::parse(&raw)
                .ok_or_else(|| anyhow!("{} must be week or monthWeek, got {:?}", ENV_PERIOD_SCHEME, raw))?;
        }
        if let Some(raw) = lookup(ENV_EXPORT_STYLE) {
            self.export_style = ExportStyle::parse(&raw)
                .ok_or_else(|| anyhow!("{} must be classic or modern, got {:?}", ENV_EXPORT_STYLE, raw))?;
        }
        if let Some(raw) = lookup(ENV_CATALOG) {
            self.catalog = raw.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_AUTO_PRINT) {
            self.auto_print = parse_bool_flag(&raw)
                .ok_or_else(|| anyhow!("{} must be true or false, got {:?}", ENV_AUTO_PRINT, raw))?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.subjects.is_empty() && Catalog::builtin(&self.catalog).is_none() {
            return Err(anyhow!("unknown catalog {:?}", self.catalog));
        }
        if !self.subjects.is_empty() && Catalog::new(self.subjects.clone()).is_empty() {
            return Err(anyhow!("subjects must name at least one subject"));
        }
        Ok(())
    }

    pub fn build_catalog(&self) -> anyhow::Result<Catalog> {
        if !self.subjects.is_empty() {
            return Ok(Catalog::new(self.subjects.clone()));
        }
        Catalog::builtin(&self.catalog).ok_or_else(|| anyhow!("unknown catalog {:?}", self.catalog))
    }

    pub fn catalog_label(&self) -> &str {
        if self.subjects.is_empty() {
            &self.catalog
        } else {
            "custom"
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            style: self.export_style,
            auto_print: self.auto_print,
        }
    }
}
