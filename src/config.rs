use crate::dates::Recency;
use crate::errors::ConfigError;
use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RESULTS_KEY: &str = "open_team";
pub const DEFAULT_SITE_NAME: &str = "相模原市バドミントン協会";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    Dir(PathBuf),
    Url(String),
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub port: u16,
    pub data: DataLocation,
    pub recency: Recency,
    pub results_key: String,
    pub site_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data: DataLocation::Dir(PathBuf::from("data")),
            recency: Recency::default(),
            results_key: DEFAULT_RESULTS_KEY.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = SiteConfig::default();
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(port) = get("PORT").and_then(|value| value.trim().parse::<u16>().ok()) {
            config.port = port;
        }

        if let Some(url) = get("SITE_DATA_URL") {
            let url = url.trim().to_string();
            reqwest::Url::parse(&url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
            config.data = DataLocation::Url(url);
        } else if let Some(dir) = get("SITE_DATA_DIR") {
            config.data = DataLocation::Dir(PathBuf::from(dir));
        }

        if let Some(value) = get("SITE_NEW_DAYS") {
            let days = value
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "SITE_NEW_DAYS",
                    value: value.clone(),
                })?;
            config.recency = Recency::new(days);
        }

        if let Some(key) = get("SITE_RESULTS_KEY") {
            config.results_key = key.trim().to_string();
        }

        if let Some(name) = get("SITE_NAME") {
            config.site_name = name.trim().to_string();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = SiteConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data, DataLocation::Dir(PathBuf::from("data")));
        assert_eq!(config.recency.window_days, 14);
        assert_eq!(config.results_key, "open_team");
    }

    #[test]
    fn url_wins_over_directory() {
        let config = SiteConfig::from_lookup(lookup(&[
            ("SITE_DATA_DIR", "/srv/data"),
            ("SITE_DATA_URL", "https://example.org/site/data/"),
            ("SITE_NEW_DAYS", "0"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap();
        assert_eq!(
            config.data,
            DataLocation::Url("https://example.org/site/data/".to_string())
        );
        assert_eq!(config.recency.window_days, 0);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            SiteConfig::from_lookup(lookup(&[("SITE_NEW_DAYS", "-3")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            SiteConfig::from_lookup(lookup(&[("SITE_DATA_URL", "not a url")])),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
