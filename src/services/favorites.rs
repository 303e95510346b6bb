use crate::core::error::{Result, RosterError};
use crate::core::io::KeyValueStore;
use crate::core::model::FavoriteSet;
use log::{debug, warn};
use std::sync::Arc;

/// The single persisted slot holding favorite character names as a JSON array.
#[derive(Clone)]
pub struct FavoriteStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl FavoriteStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// Never fails: a missing, unreadable or corrupt slot is an empty set.
    pub async fn load(&self) -> FavoriteSet {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return FavoriteSet::new(),
            Err(e) => {
                warn!("Could not read favorites slot {:?}: {:#}", self.key, e);
                return FavoriteSet::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(names) => {
                debug!("Loaded {} favorites", names.len());
                names.into_iter().collect()
            }
            Err(e) => {
                warn!("Ignoring corrupt favorites slot {:?}: {}", self.key, e);
                FavoriteSet::new()
            }
        }
    }

    /// Overwrites the slot with the complete set.
    pub async fn save(&self, names: &FavoriteSet) -> Result<()> {
        let content =
            serde_json::to_string(names).map_err(|e| RosterError::Storage(e.to_string()))?;
        self.store
            .set(&self.key, &content)
            .await
            .map_err(|e| RosterError::Storage(format!("{:#}", e)))?;
        debug!("Saved {} favorites", names.len());
        Ok(())
    }
}
