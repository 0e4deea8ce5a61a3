use crate::config::DataLocation;
use crate::errors::FetchError;
use crate::models::SiteDocument;
use reqwest::{header::CACHE_CONTROL, Client};
use serde_json::Value;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

pub const NEWS_DATA: &str = "news-data.json";
pub const TAIKAI_DATA: &str = "taikai-data.json";
pub const RESULTS_DATA: &str = "results-data.json";

/// Where the JSON data files are read from. Every fetch goes back to the
/// source; nothing is cached between renders.
#[derive(Debug, Clone)]
pub enum DataSource {
    Dir(PathBuf),
    Remote { client: Client, base: String },
}

impl DataSource {
    pub fn from_location(location: &DataLocation) -> Self {
        match location {
            DataLocation::Dir(path) => DataSource::Dir(path.clone()),
            DataLocation::Url(base) => DataSource::remote(base),
        }
    }

    pub fn remote(base: &str) -> Self {
        DataSource::Remote {
            client: Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn locate(&self, name: &str) -> String {
        match self {
            DataSource::Dir(root) => root.join(name).to_string_lossy().into_owned(),
            DataSource::Remote { base, .. } => format!("{base}/{name}"),
        }
    }

    pub async fn fetch(&self, name: &str) -> Result<SiteDocument, FetchError> {
        let location = self.locate(name);
        debug!("fetching {location}");
        let bytes = match self {
            DataSource::Dir(_) => fs::read(&location).await?,
            DataSource::Remote { client, .. } => {
                let response = client
                    .get(&location)
                    .header(CACHE_CONTROL, "no-cache")
                    .send()
                    .await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status.as_u16()));
                }
                response.bytes().await?.to_vec()
            }
        };
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(SiteDocument::from_value(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_dir() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("site_render_storage_{}_{}", std::process::id(), nanos));
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn reads_documents_from_directory() {
        let dir = unique_dir();
        std::fs::write(dir.join(NEWS_DATA), r#"{"items":[{"title":"a"}]}"#).unwrap();
        let doc = DataSource::Dir(dir).fetch(NEWS_DATA).await.unwrap();
        assert_eq!(doc.items.unwrap()[0].title, "a");
    }

    #[tokio::test]
    async fn missing_and_invalid_files_are_errors() {
        let dir = unique_dir();
        std::fs::write(dir.join(NEWS_DATA), "{not json").unwrap();
        let source = DataSource::Dir(dir);
        assert!(matches!(source.fetch(NEWS_DATA).await, Err(FetchError::Parse(_))));
        assert!(matches!(source.fetch(TAIKAI_DATA).await, Err(FetchError::Io(_))));
    }

    #[test]
    fn remote_locations_join_cleanly() {
        let source = DataSource::remote("http://localhost:9/data/");
        assert_eq!(source.locate(NEWS_DATA), "http://localhost:9/data/news-data.json");
    }
}
