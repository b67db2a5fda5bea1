use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::{NewFeed, NewFeedItem};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Feeds loaded into the store at startup
    #[serde(default)]
    pub feeds: Vec<SeedFeed>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedFeed {
    pub title: String,
    #[serde(default)]
    pub items: Vec<SeedItem>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedItem {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            static_dir: default_static_dir(),
            feeds: Vec::new(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn seed_feeds(&self) -> Vec<NewFeed> {
        self.feeds.iter().map(NewFeed::from).collect()
    }
}

impl From<&SeedFeed> for NewFeed {
    fn from(seed: &SeedFeed) -> Self {
        NewFeed {
            title: seed.title.clone(),
            items: seed
                .items
                .iter()
                .map(|item| NewFeedItem {
                    title: item.title.clone(),
                    content: item.content.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(config.feeds.is_empty());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            listen_addr = "127.0.0.1:9000"
            static_dir = "assets"

            [[feeds]]
            title = "New York Times"

            [[feeds]]
            title = "Hackernews"

              [[feeds.items]]
              title = "Show HN"
              content = "Something neat"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.static_dir, PathBuf::from("assets"));
        assert_eq!(config.feeds.len(), 2);
        assert_eq!(config.feeds[0].title, "New York Times");
        assert!(config.feeds[0].items.is_empty());
        assert_eq!(config.feeds[1].items.len(), 1);
        assert_eq!(config.feeds[1].items[0].content, "Something neat");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert!(config.feeds.is_empty());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/rssagg.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/path/rssagg.toml").unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_or_default_invalid_file_is_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"this is not valid toml {{{").unwrap();

        assert!(Config::load_or_default(temp_file.path()).is_err());
    }

    #[test]
    fn test_seed_feed_missing_title() {
        let content = r#"
            [[feeds]]
            # Missing title field
        "#;

        assert!(Config::from_str(content).is_err());
    }

    #[test]
    fn test_seed_item_content_defaults_empty() {
        let content = r#"
            [[feeds]]
            title = "Blog"

              [[feeds.items]]
              title = "Untitled draft"
        "#;

        let config = Config::from_str(content).unwrap();
        let seeds = config.seed_feeds();
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].items[0].title, "Untitled draft");
        assert_eq!(seeds[0].items[0].content, "");
    }
}
