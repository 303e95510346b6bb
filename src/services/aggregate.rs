use crate::core::config::ApiConfig;
use crate::core::error::{Result, RosterError};
use crate::core::model::{favorite_set, Character, EnrichedCharacter, FavoriteSet};
use crate::services::client::{character_id_from_locator, string_field, RemoteClient};
use crate::services::favorites::FavoriteStore;
use futures_util::{stream, StreamExt, TryStreamExt};
use log::{info, warn};
use std::sync::Arc;

/// Joins the people listing with homeworld, portrait and favorite data.
pub struct Aggregator {
    client: Arc<dyn RemoteClient>,
    api: ApiConfig,
}

impl Aggregator {
    pub fn new(client: Arc<dyn RemoteClient>, api: ApiConfig) -> Self {
        Self { client, api }
    }

    fn concurrency(&self) -> usize {
        self.api.max_concurrency.max(1)
    }

    /// Fetches the listing, enriches every record and merges stored favorites.
    ///
    /// Either every listed character comes back, in listing order, or the
    /// whole load fails. A partial table is never returned.
    pub async fn load_enriched_characters(
        &self,
        favorites: &FavoriteStore,
    ) -> Result<Vec<EnrichedCharacter>> {
        let listing = self.client.fetch_listing().await?;
        let mut records = self.enrich(listing).await?;

        let stored = favorites.load().await;
        merge_favorites(&mut records, &stored);

        info!(
            "Loaded {} characters ({} favorites)",
            records.len(),
            records.iter().filter(|c| c.favorite).count()
        );
        Ok(records)
    }

    pub async fn enrich(&self, listing: Vec<Character>) -> Result<Vec<EnrichedCharacter>> {
        stream::iter(listing)
            .map(|character| self.enrich_one(character))
            .buffered(self.concurrency())
            .try_collect()
            .await
    }

    async fn enrich_one(&self, character: Character) -> Result<EnrichedCharacter> {
        let (homeworld_name, image) =
            futures_util::join!(self.homeworld_name(&character), self.portrait(&character));

        Ok(EnrichedCharacter {
            homeworld_name: homeworld_name?,
            image,
            character,
            favorite: false,
        })
    }

    async fn homeworld_name(&self, character: &Character) -> Result<String> {
        let planet = self.client.fetch_by_locator(&character.homeworld).await?;
        string_field(&planet, "name", &character.homeworld)
    }

    /// Portraits come from a second provider; a miss leaves `image` empty.
    async fn portrait(&self, character: &Character) -> Option<String> {
        let id = match character_id_from_locator(&character.url) {
            Ok(id) => id,
            Err(e) => {
                warn!("No portrait id for {}: {}", character.name, e);
                return None;
            }
        };

        let url = self.api.portrait_url(id);
        let image = self
            .client
            .fetch_by_locator(&url)
            .await
            .and_then(|resource| string_field(&resource, "image", &url));

        match image {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("No portrait for {}: {}", character.name, e);
                None
            }
        }
    }

    /// Film titles in `films` order, or an empty list if any lookup fails.
    pub async fn resolve_film_titles(&self, character: &EnrichedCharacter) -> Vec<String> {
        match self.try_resolve_film_titles(&character.character.films).await {
            Ok(titles) => titles,
            Err(e) => {
                warn!("Error fetching films for {}: {}", character.name(), e);
                Vec::new()
            }
        }
    }

    pub async fn try_resolve_film_titles(&self, films: &[String]) -> Result<Vec<String>> {
        let lookups: Vec<_> = films
            .iter()
            .map(|url| async move {
                let film = self.client.fetch_by_locator(url).await?;
                string_field(&film, "title", url)
            })
            .collect();
        stream::iter(lookups)
            .buffered(self.concurrency())
            .try_collect()
            .await
    }
}

pub fn merge_favorites(records: &mut [EnrichedCharacter], stored: &FavoriteSet) {
    for record in records.iter_mut() {
        record.favorite = stored.contains(record.name());
    }
}

/// Flips the flag of every record named `name` and persists the full favorite set.
///
/// Returns the new flag. If the save fails the flags are restored so the
/// records keep matching what is stored.
pub async fn toggle_favorite(
    records: &mut [EnrichedCharacter],
    name: &str,
    favorites: &FavoriteStore,
) -> Result<bool> {
    let matching: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, c)| c.name() == name)
        .map(|(i, _)| i)
        .collect();
    let first = *matching
        .first()
        .ok_or_else(|| RosterError::UnknownCharacter(name.to_string()))?;

    let previous = records[first].favorite;
    for &i in &matching {
        records[i].favorite = !previous;
    }
    if let Err(e) = favorites.save(&favorite_set(records)).await {
        for &i in &matching {
            records[i].favorite = previous;
        }
        return Err(e);
    }
    Ok(!previous)
}
