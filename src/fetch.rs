//! Transport used by the resource loader
//!
//! The loader never talks to the network directly; it calls a [`Fetcher`].
//! [`HttpFetcher`] is the production implementation: plain `GET` requests for
//! `http(s)://` URLs and direct disk reads for `file://` URLs.

use crate::config::ImageLoaderConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Asynchronous source of raw resource bytes
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    /// Download the resource at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ImageLoaderConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn fetch_file(&self, url: &Url) -> Result<Vec<u8>> {
        let path = url
            .to_file_path()
            .map_err(|_| Error::Other(format!("Not a local file URL: {}", url)))?;

        Ok(tokio::fs::read(&path).await?)
    }

    async fn fetch_http(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_connect() {
                Error::Other(format!(
                    "Cannot connect to {}\n\
                        Please check your network connection and the URL.",
                    url.host_str().unwrap_or("server")
                ))
            } else if e.is_timeout() {
                Error::Other(format!("Request to {} timed out", url))
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url)?;
        debug!(url, scheme = parsed.scheme(), "fetching resource");

        match parsed.scheme() {
            "http" | "https" => self.fetch_http(&parsed).await,
            "file" => self.fetch_file(&parsed).await,
            other => Err(Error::Other(format!(
                "Unsupported URL scheme '{}' in {}",
                other, url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let fetcher = HttpFetcher::new(&ImageLoaderConfig::default()).unwrap();
        let err = fetcher.fetch("ftp://example.com/a.png").await.unwrap_err();
        assert!(err.to_string().contains("Unsupported URL scheme 'ftp'"));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let fetcher = HttpFetcher::new(&ImageLoaderConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[tokio::test]
    async fn test_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.bin");
        std::fs::write(&path, b"payload").unwrap();

        let url = Url::from_file_path(&path).unwrap();
        let fetcher = HttpFetcher::new(&ImageLoaderConfig::default()).unwrap();
        let bytes = fetcher.fetch(url.as_str()).await.unwrap();
        assert_eq!(bytes, b"payload");
    }
}
