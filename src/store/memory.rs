// ============================================================================
// MemoryStorage : stockage en mémoire pour les tests
// ============================================================================
// Compilé uniquement avec cfg(test)
// ============================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::storage::Storage;

/// Stockage en mémoire
///
/// Les clones partagent les mêmes données : un test peut garder un clone pour
/// inspecter ce que la watchlist a écrit, ou simuler un redémarrage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stockage dont toutes les écritures échouent
    pub fn failing_writes() -> Self {
        Self {
            values: Arc::default(),
            fail_writes: true,
        }
    }

    /// Pré-remplit une clé
    pub fn with_value(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("Stockage mémoire empoisonné"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("Écriture refusée pour la clé {}", key);
        }

        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("Stockage mémoire empoisonné"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_values() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();

        writer.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_failing_writes() {
        let mut storage = MemoryStorage::failing_writes();
        assert!(storage.set("k", "v").is_err());
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
