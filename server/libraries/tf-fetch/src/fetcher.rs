//
// Copyright 2025 Tabs Data Inc.
//

use crate::cache::{DatasetCache, MemoryCache};
use crate::config::FetcherConfig;
use crate::error::{FetchError, FetchResult};
use crate::format::{infer_format, parse_url};
use async_trait::async_trait;
use itertools::Itertools;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tf_tableframe::dataset::TabularDataset;
use tracing::{debug, error, info};

/// Something able to turn a URL into a [`TabularDataset`].
#[async_trait]
pub trait TabularFetcher: Send + Sync {
    /// Fetches and decodes the table at `url`. Failures are returned, never raised.
    async fn fetch(&self, url: &str) -> FetchResult;

    /// Like [`Self::fetch`], logging the failure and returning an empty dataset instead.
    async fn fetch_or_empty(&self, url: &str) -> TabularDataset {
        match self.fetch(url).await {
            Ok(dataset) => dataset,
            Err(e) => {
                error!("Showing an empty table for '{url}': {e}");
                TabularDataset::empty()
            }
        }
    }
}

/// Fetches CSV and spreadsheet tables over HTTP(S), memoizing results per URL.
pub struct RemoteTabularFetcher {
    config: FetcherConfig,
    client: reqwest::Client,
    cache: Arc<dyn DatasetCache>,
}

impl RemoteTabularFetcher {
    /// Creates a fetcher owning an unbounded [`MemoryCache`].
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        Self::with_cache(config, Arc::new(MemoryCache::new()))
    }

    /// Creates a fetcher using the given cache, which may be shared with other fetchers.
    pub fn with_cache(
        config: FetcherConfig,
        cache: Arc<dyn DatasetCache>,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| FetchError::Client(describe(&e)))?;
        Ok(Self {
            config,
            client,
            cache,
        })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<dyn DatasetCache> {
        &self.cache
    }

    async fn download(&self, url: &str) -> FetchResult {
        let parsed = parse_url(url)?;
        let format = infer_format(&parsed);
        debug!("Fetching '{url}' as {format}");

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::Network(url.to_string(), describe(&e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(url.to_string(), status.as_u16()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(url.to_string(), describe(&e)))?;
        debug!("Downloaded {} bytes from '{url}'", bytes.len());

        // decoding is CPU bound, keep it off the async workers
        tokio::task::spawn_blocking(move || format.decode(&bytes))
            .await
            .map_err(|e| FetchError::DecodeTaskFailed(url.to_string(), e.to_string()))?
            .map_err(|e| FetchError::Decode(url.to_string(), format, e))
    }
}

#[async_trait]
impl TabularFetcher for RemoteTabularFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        if let Some(result) = self.cache.get(url) {
            debug!("Using cached result for '{url}'");
            return result;
        }

        let result = self.download(url).await;
        match &result {
            Ok(dataset) => info!(
                "Fetched '{url}': {} rows, {} columns",
                dataset.height(),
                dataset.width()
            ),
            Err(e) => error!("Failed to fetch '{url}': {e}"),
        }
        if result.is_ok() || *self.config.cache_failures() {
            self.cache.put(url, result.clone());
        }
        result
    }
}

// reqwest keeps the useful part (refused, timed out, dns) in the source chain
fn describe(err: &reqwest::Error) -> String {
    std::iter::successors(Some(err as &dyn Error), |e| (*e).source())
        .map(|e| e.to_string())
        .join(": ")
}
