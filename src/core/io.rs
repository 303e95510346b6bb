use anyhow::Result;
use async_trait::async_trait;

#[cfg(target_arch = "wasm32")]
pub trait StoreBounds {}
#[cfg(target_arch = "wasm32")]
impl<T> StoreBounds for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait StoreBounds: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> StoreBounds for T {}

/// A string key-value slot store: `localStorage` in the browser, a JSON file natively.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait KeyValueStore: StoreBounds {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

// --- In-memory Implementation ---

#[derive(Default)]
pub struct MemoryStore {
    slots: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> Result<std::sync::MutexGuard<'_, std::collections::HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.slots()?.remove(key);
        Ok(())
    }
}

// --- Native Implementation ---

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;
#[cfg(not(target_arch = "wasm32"))]
use std::collections::BTreeMap;

/// All slots live in one JSON object file, rewritten on every `set`.
#[cfg(not(target_arch = "wasm32"))]
pub struct NativeStore {
    path: std::path::PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

#[cfg(not(target_arch = "wasm32"))]
impl NativeStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn read_slots(&self) -> Result<BTreeMap<String, String>> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(BTreeMap::new());
        }
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    async fn write_slots(&self, slots: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(slots)?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl KeyValueStore for NativeStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_slots().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut slots = self.read_slots().await.unwrap_or_else(|e| {
            log::warn!("Discarding unreadable store {}: {:#}", self.path.display(), e);
            BTreeMap::new()
        });
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut slots = self.read_slots().await?;
        if slots.remove(key).is_some() {
            self.write_slots(&slots).await?;
        }
        Ok(())
    }
}

// --- Web Implementation ---

#[cfg(target_arch = "wasm32")]
use anyhow::anyhow;

#[cfg(target_arch = "wasm32")]
pub struct WebStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl WebStore {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow!("No window available"))?;
        let storage = window
            .local_storage()
            .map_err(|e| anyhow!("localStorage error: {:?}", e))?
            .ok_or_else(|| anyhow!("localStorage is disabled"))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl KeyValueStore for WebStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| anyhow!("Get error: {:?}", e))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| anyhow!("Set error: {:?}", e))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| anyhow!("Remove error: {:?}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.get("favorites").await?, None);

        store.set("favorites", "[\"Luke Skywalker\"]").await?;
        assert_eq!(store.get("favorites").await?.as_deref(), Some("[\"Luke Skywalker\"]"));

        store.remove("favorites").await?;
        assert_eq!(store.get("favorites").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_native_store_persists_across_instances() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("state").join("favorites.json");

        let store = NativeStore::new(&path);
        store.set("favorites", "[\"Leia Organa\"]").await?;
        store.set("other", "x").await?;

        let reopened = NativeStore::new(&path);
        assert_eq!(reopened.get("favorites").await?.as_deref(), Some("[\"Leia Organa\"]"));
        assert_eq!(reopened.get("other").await?.as_deref(), Some("x"));

        reopened.remove("other").await?;
        assert_eq!(store.get("other").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_native_store_missing_file_is_empty() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let store = NativeStore::new(temp_dir.path().join("nothing.json"));
        assert_eq!(store.get("favorites").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_native_store_corrupt_file_errors_on_get_and_recovers_on_set() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("favorites.json");
        std::fs::write(&path, "not json")?;

        let store = NativeStore::new(&path);
        assert!(store.get("favorites").await.is_err());

        store.set("favorites", "[]").await?;
        assert_eq!(store.get("favorites").await?.as_deref(), Some("[]"));
        Ok(())
    }
}
