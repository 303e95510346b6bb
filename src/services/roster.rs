use crate::core::config::Config;
use crate::core::error::{Result, RosterError};
use crate::core::io::KeyValueStore;
use crate::core::model::{EnrichedCharacter, FavoriteSet};
use crate::services::aggregate::{self, Aggregator};
use crate::services::client::{HttpClient, RemoteClient};
use crate::services::favorites::FavoriteStore;
use futures_util::lock::Mutex;
use log::{debug, error, info};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(RosterError),
}

/// The selected row and its film titles. Replaced or cleared as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub character: EnrichedCharacter,
    pub film_titles: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RosterState {
    pub status: LoadStatus,
    pub characters: Vec<EnrichedCharacter>,
    pub selection: Option<Selection>,
    selection_generation: u64,
}

impl RosterState {
    fn new() -> Self {
        Self {
            status: LoadStatus::Loading,
            characters: Vec::new(),
            selection: None,
            selection_generation: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

/// State container behind both front ends.
///
/// All mutation goes through one async mutex, so a toggle's
/// read-flip-persist sequence never interleaves with another toggle.
pub struct Roster {
    aggregator: Aggregator,
    favorites: FavoriteStore,
    state: Mutex<RosterState>,
}

impl Roster {
    pub fn new(client: Arc<dyn RemoteClient>, store: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        Self {
            aggregator: Aggregator::new(client, config.api.clone()),
            favorites: FavoriteStore::new(store, &config.storage.favorites_key),
            state: Mutex::new(RosterState::new()),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn native(config: &Config) -> Result<Self> {
        use crate::core::io::NativeStore;

        let client = Arc::new(HttpClient::new(&config.api)?);
        let store = Arc::new(NativeStore::new(&config.storage.path));
        Ok(Self::new(client, store, config))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn web(config: &Config) -> Result<Self> {
        use crate::core::io::WebStore;

        let client = Arc::new(HttpClient::new(&config.api)?);
        let store = WebStore::new().map_err(|e| RosterError::Storage(format!("{:#}", e)))?;
        Ok(Self::new(client, Arc::new(store), config))
    }

    pub async fn snapshot(&self) -> RosterState {
        self.state.lock().await.clone()
    }

    pub async fn characters(&self) -> Vec<EnrichedCharacter> {
        self.state.lock().await.characters.clone()
    }

    pub async fn selection(&self) -> Option<Selection> {
        self.state.lock().await.selection.clone()
    }

    pub async fn status(&self) -> LoadStatus {
        self.state.lock().await.status.clone()
    }

    pub async fn stored_favorites(&self) -> FavoriteSet {
        self.favorites.load().await
    }

    /// Runs the aggregation and publishes its outcome.
    ///
    /// On failure the list is left empty and the status carries the error.
    pub async fn load_enriched_characters(&self) -> Result<Vec<EnrichedCharacter>> {
        self.state.lock().await.status = LoadStatus::Loading;

        let result = self.aggregator.load_enriched_characters(&self.favorites).await;

        let mut state = self.state.lock().await;
        match &result {
            Ok(records) => {
                state.characters = records.clone();
                state.status = LoadStatus::Ready;
            }
            Err(e) => {
                error!("Error fetching data: {}", e);
                state.characters.clear();
                state.status = LoadStatus::Failed(e.clone());
            }
        }
        result
    }

    /// Flips a favorite and persists the full set while holding the state lock.
    pub async fn toggle_favorite(&self, name: &str) -> Result<bool> {
        let mut state = self.state.lock().await;
        let favorite = aggregate::toggle_favorite(&mut state.characters, name, &self.favorites).await?;

        if let Some(selection) = state.selection.as_mut() {
            if selection.character.name() == name {
                selection.character.favorite = favorite;
            }
        }
        debug!("{} favorite: {}", name, favorite);
        Ok(favorite)
    }

    pub async fn resolve_film_titles(&self, character: &EnrichedCharacter) -> Vec<String> {
        self.aggregator.resolve_film_titles(character).await
    }

    /// Selects `name` and resolves its films.
    ///
    /// Returns `None` when another selection or a close happened while the
    /// films were being fetched; the stale titles are dropped.
    pub async fn select(&self, name: &str) -> Result<Option<Selection>> {
        let (character, generation) = {
            let mut state = self.state.lock().await;
            let character = state
                .characters
                .iter()
                .find(|c| c.name() == name)
                .cloned()
                .ok_or_else(|| RosterError::UnknownCharacter(name.to_string()))?;

            state.selection_generation += 1;
            state.selection = Some(Selection {
                character: character.clone(),
                film_titles: Vec::new(),
            });
            (character, state.selection_generation)
        };
        info!("Selected {}", name);

        let titles = self.aggregator.resolve_film_titles(&character).await;

        let mut state = self.state.lock().await;
        if state.selection_generation != generation {
            debug!("Dropping stale film titles for {}", name);
            return Ok(None);
        }
        let selection = state.selection.as_mut().map(|selection| {
            selection.film_titles = titles;
            selection.clone()
        });
        Ok(selection)
    }

    pub async fn close_selection(&self) {
        let mut state = self.state.lock().await;
        state.selection_generation += 1;
        state.selection = None;
    }
}
