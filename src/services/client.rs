use crate::core::config::ApiConfig;
use crate::core::error::{Result, RosterError};
use crate::core::model::{Character, Listing};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use url::Url;

#[cfg(target_arch = "wasm32")]
pub trait ClientBounds {}
#[cfg(target_arch = "wasm32")]
impl<T> ClientBounds for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait ClientBounds: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> ClientBounds for T {}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RemoteClient: ClientBounds {
    /// First page of the people listing. No pagination follow-up.
    async fn fetch_listing(&self) -> Result<Vec<Character>>;

    /// GET an arbitrary locator and return its JSON object.
    async fn fetch_by_locator(&self, url: &str) -> Result<Value>;
}

/// Reads a string field out of a fetched resource.
pub fn string_field(resource: &Value, field: &str, url: &str) -> Result<String> {
    resource
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RosterError::parse(url, format!("missing string field `{}`", field)))
}

/// Numeric id of a SWAPI resource, e.g. `https://swapi.dev/api/people/4/` -> 4.
pub fn character_id_from_locator(locator: &str) -> Result<u32> {
    let url = Url::parse(locator).map_err(|e| RosterError::parse(locator, e))?;
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(|| RosterError::parse(locator, "locator has no path"))?;
    segment
        .parse()
        .map_err(|_| RosterError::parse(locator, format!("`{}` is not a numeric id", segment)))
}

pub struct HttpClient {
    listing_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let client = {
            let mut builder = reqwest::Client::builder();
            if let Some(secs) = config.request_timeout_secs {
                builder = builder.timeout(std::time::Duration::from_secs(secs));
            }
            builder
                .build()
                .map_err(|e| RosterError::network(&config.base_url, e))?
        };
        #[cfg(target_arch = "wasm32")]
        let client = reqwest::Client::new();

        Ok(Self {
            listing_url: config.listing_url(),
            client,
        })
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RosterError::network(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RosterError::network(url, format!("HTTP {}", status)));
        }

        let body = resp.text().await.map_err(|e| RosterError::network(url, e))?;
        serde_json::from_str(&body).map_err(|e| RosterError::parse(url, e))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RemoteClient for HttpClient {
    async fn fetch_listing(&self) -> Result<Vec<Character>> {
        let value = self.get_json(&self.listing_url).await?;
        let listing: Listing =
            serde_json::from_value(value).map_err(|e| RosterError::parse(&self.listing_url, e))?;
        debug!("Listing returned {} characters", listing.results.len());
        Ok(listing.results)
    }

    async fn fetch_by_locator(&self, url: &str) -> Result<Value> {
        self.get_json(url).await
    }
}
