//! Mocks shared by the service tests.

use crate::core::error::{Result, RosterError};
use crate::core::io::KeyValueStore;
use crate::core::model::Character;
use crate::services::client::RemoteClient;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const PORTRAIT_BASE: &str = "https://portraits.test/api";

enum MockResponse {
    Json(Value, Duration),
    Fail,
}

#[derive(Default)]
pub struct MockClient {
    listing: Vec<Character>,
    listing_fails: bool,
    responses: HashMap<String, MockResponse>,
    pub calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl MockClient {
    pub fn new(listing: Vec<Character>) -> Self {
        Self {
            listing,
            ..Default::default()
        }
    }

    pub fn failing_listing() -> Self {
        Self {
            listing_fails: true,
            ..Default::default()
        }
    }

    pub fn respond(mut self, url: &str, body: Value) -> Self {
        self.responses
            .insert(url.to_string(), MockResponse::Json(body, Duration::ZERO));
        self
    }

    pub fn respond_after(mut self, url: &str, body: Value, delay_ms: u64) -> Self {
        self.responses.insert(
            url.to_string(),
            MockResponse::Json(body, Duration::from_millis(delay_ms)),
        );
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.responses.insert(url.to_string(), MockResponse::Fail);
        self
    }

    /// Registers planet, portrait and film responses for every listed character.
    pub fn with_defaults(mut self) -> Self {
        for c in self.listing.clone() {
            if !self.responses.contains_key(&c.homeworld) {
                self = self.respond(&c.homeworld, json!({ "name": planet_name(&c.homeworld) }));
            }
            if let Ok(id) = crate::services::client::character_id_from_locator(&c.url) {
                let portrait = portrait_url(id);
                if !self.responses.contains_key(&portrait) {
                    self = self.respond(&portrait, json!({ "image": image_url(id) }));
                }
            }
        }
        self
    }
}

#[async_trait]
impl RemoteClient for MockClient {
    async fn fetch_listing(&self) -> Result<Vec<Character>> {
        if self.listing_fails {
            return Err(RosterError::network("mock://people/", "HTTP 500"));
        }
        Ok(self.listing.clone())
    }

    async fn fetch_by_locator(&self, url: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = match self.responses.get(url) {
            Some(MockResponse::Json(body, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                Ok(body.clone())
            }
            Some(MockResponse::Fail) => Err(RosterError::network(url, "HTTP 404")),
            None => Err(RosterError::network(url, "no mock registered")),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// A store whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Err(anyhow::anyhow!("disk unavailable"))
    }
    async fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("disk full"))
    }
    async fn remove(&self, _key: &str) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("disk unavailable"))
    }
}

pub fn character(id: u32, name: &str, planet: u32, films: &[u32]) -> Character {
    Character {
        name: name.to_string(),
        height: "172".to_string(),
        birth_year: "19BBY".to_string(),
        eye_color: "blue".to_string(),
        homeworld: format!("https://swapi.dev/api/planets/{}/", planet),
        films: films
            .iter()
            .map(|f| format!("https://swapi.dev/api/films/{}/", f))
            .collect(),
        url: format!("https://swapi.dev/api/people/{}/", id),
    }
}

pub fn planet_name(locator: &str) -> String {
    format!("Planet {}", locator.trim_end_matches('/').rsplit('/').next().unwrap_or(""))
}

pub fn portrait_url(id: u32) -> String {
    format!("{}/id/{}.json", PORTRAIT_BASE, id)
}

pub fn image_url(id: u32) -> String {
    format!("https://images.test/{}.jpg", id)
}

pub fn film_url(id: u32) -> String {
    format!("https://swapi.dev/api/films/{}/", id)
}
