use std::collections::{BTreeMap, HashSet};

use dioxus::prelude::*;
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub theme: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SiteConfig {
    pub sections: Vec<SectionConfig>,
    #[serde(rename = "defaultTheme")]
    pub default_theme: String,
    #[serde(default)]
    pub games: BTreeMap<String, String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no sections configured")]
    NoSections,
    #[error("section #{0} has an empty id")]
    EmptySectionId(usize),
    #[error("section {0} has no theme")]
    MissingTheme(String),
    #[error("section {0} is configured twice")]
    DuplicateSection(String),
    #[error("default theme is empty")]
    EmptyDefaultTheme,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let sections = [("00", "blue"), ("01", "pink"), ("02", "orange"), ("03", "black")]
            .into_iter()
            .map(|(id, theme)| SectionConfig {
                id: id.to_string(),
                theme: theme.to_string(),
            })
            .collect();
        let games = [
            "tao-kae-noi-world",
            "vasa-ship",
            "mega-museum-world",
            "bloom",
            "finding-stubby",
        ]
        .into_iter()
        .map(|game| (game.to_string(), format!("assets/images/{game}.png")))
        .collect();
        Self {
            sections,
            default_theme: "default".to_string(),
            games,
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::NoSections);
        }
        if self.default_theme.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultTheme);
        }
        let mut seen = HashSet::new();
        for (index, section) in self.sections.iter().enumerate() {
            if section.id.trim().is_empty() {
                return Err(ConfigError::EmptySectionId(index));
            }
            if section.theme.trim().is_empty() {
                return Err(ConfigError::MissingTheme(section.id.clone()));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(ConfigError::DuplicateSection(section.id.clone()));
            }
        }
        Ok(())
    }

    /// Falls back to the built-in page layout when the loaded config is unusable.
    pub fn or_default(loaded: Result<SiteConfig, String>) -> SiteConfig {
        match loaded {
            Ok(config) => match config.validate() {
                Ok(()) => config,
                Err(err) => {
                    tracing::warn!("site config rejected: {err}");
                    SiteConfig::default()
                }
            },
            Err(message) => {
                tracing::warn!("site config unavailable: {message}");
                SiteConfig::default()
            }
        }
    }
}

pub fn use_site_config() -> Resource<SiteConfig> {
    use_resource(|| async move { SiteConfig::or_default(fetch_site_config().await) })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_site_config() -> Result<SiteConfig, String> {
    match fetch_config_from("/config.json").await {
        Ok(config) => Ok(config),
        Err(_) => fetch_config_from("/assets/config.json").await,
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<SiteConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: status {}", response.status()));
    }
    response
        .json::<SiteConfig>()
        .await
        .map_err(|err| format!("config decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_site_config() -> Result<SiteConfig, String> {
    let raw = std::env::var("SITE_CONFIG").map_err(|_| "SITE_CONFIG not set".to_string())?;
    serde_json::from_str(&raw).map_err(|err| format!("config decode failed: {err}"))
}
