//
// Copyright 2025 Tabs Data Inc.
//

use derive_builder::Builder;
use getset::Getters;
use serde::{Deserialize, Serialize};
use tf_common::config::Config;
use tf_error::TfError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration of a [`crate::fetcher::RemoteTabularFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[serde(default)]
#[builder(default, setter(into), build_fn(error = "TfError"))]
#[getset(get = "pub")]
pub struct FetcherConfig {
    /// Whole request timeout, from connecting to reading the last body byte.
    timeout_secs: u64,
    /// Whether failed fetches are memoized like successful ones.
    cache_failures: bool,
    user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_failures: true,
            user_agent: format!("tabfetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config for FetcherConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_common::config::load_config;
    use tf_common::env::get_current_dir;

    #[test]
    fn test_defaults() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout_secs(), &10);
        assert!(*config.cache_failures());
        assert!(config.user_agent().starts_with("tabfetch/"));
    }

    #[test]
    fn test_builder() {
        let config = FetcherConfigBuilder::default()
            .timeout_secs(3u64)
            .cache_failures(false)
            .build()
            .unwrap();
        assert_eq!(config.timeout_secs(), &3);
        assert!(!*config.cache_failures());
        assert_eq!(config.user_agent(), FetcherConfig::default().user_agent());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = get_current_dir().join("fetcher-conf");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.yaml"), "timeout_secs: 30\n").unwrap();

        let config: FetcherConfig = load_config("tabfetch", Some(dir), false).unwrap();
        assert_eq!(config.timeout_secs(), &30);
        assert!(*config.cache_failures());
    }

    #[test]
    fn test_yaml() {
        let yaml = FetcherConfig::default().as_yaml();
        assert!(yaml.contains("timeout_secs: 10"));
        assert!(yaml.contains("cache_failures: true"));
    }
}
