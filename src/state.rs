use crate::config::SiteConfig;
use crate::dates;
use crate::pages::RenderContext;
use crate::storage::DataSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub source: DataSource,
}

impl AppState {
    pub fn new(config: SiteConfig) -> Self {
        let source = DataSource::from_location(&config.data);
        Self {
            config: Arc::new(config),
            source,
        }
    }

    /// Context for one render, pinned to today's local date.
    pub fn context(&self) -> RenderContext {
        RenderContext {
            today: dates::today(),
            recency: self.config.recency,
            site_name: self.config.site_name.clone(),
            results_key: self.config.results_key.clone(),
        }
    }
}
