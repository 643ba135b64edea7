//! HTTP transport abstractions for the catalog flow.
//!
//! Both the manifest fetcher and the install orchestrator reach the
//! network through traits so tests can inject canned responses. The
//! production implementations use reqwest with fixed timeouts: a short
//! one for the small manifest document and a much longer one for
//! package artifacts, which are expected to be substantially larger.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use url::Url;

use appdeck_core::CatalogError;

/// Connect/read timeout for manifest requests.
pub const MANIFEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect/read timeout for artifact downloads.
pub const ARTIFACT_TIMEOUT: Duration = Duration::from_secs(60);

/// Progress callback: `(bytes_downloaded, total_bytes_if_known)`.
pub type ProgressFn = dyn Fn(u64, Option<u64>) + Send + Sync;

/// Transport for fetching the manifest document.
#[async_trait]
pub trait ManifestTransport: Send + Sync {
    /// HTTP GET the URL and return the parsed JSON body.
    ///
    /// Non-2xx responses are errors; the caller decides whether to
    /// fall back.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, CatalogError>;
}

/// Transport for downloading package artifacts.
#[async_trait]
pub trait ArtifactDownloader: Send + Sync {
    /// Download the artifact at `url` into memory.
    ///
    /// `progress` is invoked as chunks arrive with the running byte
    /// count and the total size when the server reports one.
    async fn download(
        &self,
        url: &Url,
        progress: Option<&ProgressFn>,
    ) -> Result<Vec<u8>, CatalogError>;
}

/// Production manifest transport backed by reqwest.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given connect/read timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(MANIFEST_TIMEOUT)
    }
}

#[async_trait]
impl ManifestTransport for ReqwestTransport {
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, CatalogError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::network_with_status(
                format!("GET {url} returned {status}"),
                status.as_u16(),
            ));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| CatalogError::manifest(e.to_string()))
    }
}

/// Production artifact downloader backed by reqwest with streaming.
pub struct ReqwestArtifactDownloader {
    client: reqwest::Client,
}

impl ReqwestArtifactDownloader {
    /// Create a downloader with the given connect/read timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");
        Self { client }
    }
}

impl Default for ReqwestArtifactDownloader {
    fn default() -> Self {
        Self::new(ARTIFACT_TIMEOUT)
    }
}

#[async_trait]
impl ArtifactDownloader for ReqwestArtifactDownloader {
    async fn download(
        &self,
        url: &Url,
        progress: Option<&ProgressFn>,
    ) -> Result<Vec<u8>, CatalogError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::network_with_status(
                format!("GET {url} returned {status}"),
                status.as_u16(),
            ));
        }

        let total = response.content_length();
        let mut stream = response.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| CatalogError::network(e.to_string()))?;
            buf.extend_from_slice(&chunk);
            if let Some(report) = progress {
                report(buf.len() as u64, total);
            }
        }

        Ok(buf)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// A fake manifest transport returning canned responses.
    #[derive(Default)]
    pub struct FakeTransport {
        responses: Mutex<HashMap<String, Result<serde_json::Value, CatalogError>>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a canned response for URLs containing `pattern`.
        pub fn with_response(self, pattern: &str, json: serde_json::Value) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(pattern.to_string(), Ok(json));
            self
        }

        /// Add a canned error for URLs containing `pattern`.
        pub fn with_error(self, pattern: &str, error: CatalogError) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(pattern.to_string(), Err(error));
            self
        }
    }

    #[async_trait]
    impl ManifestTransport for FakeTransport {
        async fn get_json(&self, url: &Url) -> Result<serde_json::Value, CatalogError> {
            let responses = self.responses.lock().unwrap();
            for (pattern, response) in responses.iter() {
                if url.as_str().contains(pattern.as_str()) {
                    return response.clone();
                }
            }
            Err(CatalogError::network_with_status(
                format!("no canned response for {url}"),
                404,
            ))
        }
    }

    /// A fake downloader serving fixed bytes and recording requests.
    pub struct FakeDownloader {
        bytes: Vec<u8>,
        error: Option<CatalogError>,
        pub requests: Mutex<Vec<String>>,
    }

    impl FakeDownloader {
        pub fn serving(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.to_vec(),
                error: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(error: CatalogError) -> Self {
            Self {
                bytes: Vec::new(),
                error: Some(error),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ArtifactDownloader for FakeDownloader {
        async fn download(
            &self,
            url: &Url,
            progress: Option<&ProgressFn>,
        ) -> Result<Vec<u8>, CatalogError> {
            self.requests.lock().unwrap().push(url.to_string());
            if let Some(err) = &self.error {
                return Err(err.clone());
            }
            if let Some(report) = progress {
                report(self.bytes.len() as u64, Some(self.bytes.len() as u64));
            }
            Ok(self.bytes.clone())
        }
    }
}
