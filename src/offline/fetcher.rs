//! Upstream network access for the offline asset service.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};

use crate::error::{WavecrestError, WavecrestResult};

/// A request crossing the interception boundary: method plus target URL
/// (absolute, or a path resolved against the configured upstream origin).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: String,
    pub url: String,
}

impl FetchRequest {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            url: url.to_string(),
        }
    }

    pub fn get(url: &str) -> Self {
        Self::new("GET", url)
    }
}

/// A fully materialized upstream response. The body is read to completion
/// before this is constructed, so it can be handed to a caller and stored
/// independently.
#[derive(Debug, Clone)]
pub struct NetworkResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    /// Whether the response (after redirects) came from the configured
    /// upstream origin.
    pub same_origin: bool,
}

/// Abstraction over the network so the fetch policy is testable without
/// one. The production implementation is [`HttpFetcher`].
#[async_trait]
pub trait NetworkFetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> WavecrestResult<NetworkResponse>;
}

/// reqwest-backed fetcher bound to one upstream origin.
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(upstream: &str) -> WavecrestResult<Self> {
        let base = Url::parse(upstream)
            .map_err(|err| WavecrestError::NetworkError(format!("invalid upstream {upstream}: {err}")))?;
        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    fn resolve(&self, target: &str) -> WavecrestResult<Url> {
        let resolved = if target.contains("://") {
            Url::parse(target)
        } else {
            self.base.join(target)
        };
        resolved.map_err(|err| WavecrestError::NetworkError(format!("invalid url {target}: {err}")))
    }
}

#[async_trait]
impl NetworkFetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> WavecrestResult<NetworkResponse> {
        let url = self.resolve(&request.url)?;
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|err| WavecrestError::NetworkError(format!("bad method {}: {err}", request.method)))?;

        let response = self.client.request(method, url).send().await?;
        let status = response.status().as_u16();
        let same_origin = response.url().origin() == self.base.origin();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|text| (name.to_string(), text.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(NetworkResponse {
            status,
            headers,
            body,
            same_origin,
        })
    }
}
