//! Showcase configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

use exhibit_content::{CacheBuster, Fetcher, HttpFetcher, StaticDirFetcher};
use exhibit_page::Markup;
use exhibit_panel::PanelSettings;
use exhibit_reveal::RevealSettings;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Base URL that remote slot paths are resolved against
    pub base_url: Option<String>,
    /// Read remote slot paths from this directory instead of over HTTP
    pub site_root: Option<PathBuf>,
    /// Query parameter carrying the cache-busting stamp
    pub cache_bust_param: String,
    pub user_agent: String,
}

impl FetchSettings {
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw)
                    .map_err(|e| CoreError::Config(format!("Invalid base URL {:?}: {}", raw, e)))
            })
            .transpose()
    }

    /// Build the fetcher these settings describe.
    pub fn fetcher(&self) -> Result<Arc<dyn Fetcher>> {
        if let Some(root) = &self.site_root {
            tracing::debug!(root = %root.display(), "Serving exhibit files from disk");
            return Ok(Arc::new(StaticDirFetcher::new(root.clone())));
        }

        let base = self.base_url()?;
        if let Some(base) = &base {
            tracing::debug!(base = %base, "Fetching exhibit files over HTTP");
        }
        Ok(Arc::new(HttpFetcher::new(base, &self.user_agent)?))
    }

    pub fn cache_buster(&self) -> CacheBuster {
        CacheBuster::new(self.cache_bust_param.clone())
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.is_some() && self.site_root.is_some() {
            return Err(CoreError::Config(
                "base_url and site_root are mutually exclusive".to_string(),
            ));
        }
        if self.cache_bust_param.trim().is_empty() {
            return Err(CoreError::Config(
                "cache_bust_param must not be empty".to_string(),
            ));
        }
        self.base_url()?;
        Ok(())
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            site_root: None,
            cache_bust_param: exhibit_content::DEFAULT_CACHE_BUST_PARAM.to_string(),
            user_agent: concat!("exhibit/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markup: Markup,
    pub panel: PanelSettings,
    pub reveal: RevealSettings,
    pub fetch: FetchSettings,
}

impl Config {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.markup.validate()?;
        self.reveal.validate()?;

        let panel = &self.panel;
        for (name, value) in [("width", panel.width), ("height", panel.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::Config(format!(
                    "Panel {} must be positive, got {}",
                    name, value
                )));
            }
        }
        let placement = &panel.placement;
        for (name, value) in [("gap", placement.gap), ("inset", placement.inset)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CoreError::Config(format!(
                    "Panel {} must not be negative, got {}",
                    name, value
                )));
            }
        }

        self.fetch.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exhibit_panel::PanelVariant;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.panel.opening_ms, 10);
        assert_eq!(config.panel.closing_ms, 200);
        assert_eq!(config.reveal.threshold, 0.15);
        assert_eq!(config.fetch.cache_bust_param, "t");
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(
            r#"{
                "panel": { "variant": "modal", "closing_ms": 300 },
                "fetch": { "base_url": "https://example.org/portfolio/" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.panel.variant, PanelVariant::Modal);
        assert_eq!(config.panel.closing_ms, 300);
        assert_eq!(config.panel.opening_ms, 10);
        assert_eq!(
            config.fetch.base_url().unwrap().unwrap().as_str(),
            "https://example.org/portfolio/"
        );
        assert_eq!(config.markup, Markup::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            Config::from_json(r#"{"reveal": {"threshold": 0}}"#),
            Err(CoreError::Reveal(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"reveal": {"threshold": 1.2}}"#),
            Err(CoreError::Reveal(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"panel": {"width": 0}}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"fetch": {"base_url": "not a url"}}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"fetch": {"base_url": "https://a.b/", "site_root": "/srv"}}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"markup": {"trigger": "[[bad"}}"#),
            Err(CoreError::Page(_))
        ));
        assert!(matches!(
            Config::from_json("{ nope"),
            Err(CoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"fetch": {{"cache_bust_param": "v"}}}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.fetch.cache_bust_param, "v");
        assert_eq!(config.fetch.cache_buster().param(), "v");
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = Config::default();
        config.fetch.site_root = Some(PathBuf::from("/srv/site"));
        let parsed = Config::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
