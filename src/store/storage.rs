// ============================================================================
// Stockage clé/valeur persistant
// ============================================================================
// Équivalent terminal du localStorage : get/set d'un texte par clé fixe
//
// CONCEPT RUST : Trait comme point d'injection
// - La watchlist ne connaît que le trait Storage
// - FileStorage en production, MemoryStorage (store::memory) dans les tests
// ============================================================================

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

/// Stockage persistant par clé
pub trait Storage: Send {
    /// Lit la valeur d'une clé (None si absente)
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Écrit la valeur d'une clé
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Un fichier par clé dans un répertoire de données
///
/// Exemple : la clé "watchlist" est stockée dans `<dir>/watchlist.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Crée le stockage (le répertoire est créé à la première écriture)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!(?path, "No stored value");
            return Ok(None);
        }

        let value = fs::read_to_string(&path)
            .with_context(|| format!("Échec de la lecture de {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Échec de la création du répertoire {}", self.dir.display())
        })?;

        // Écriture dans un fichier temporaire puis renommage : pas de JSON à moitié écrit
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .with_context(|| format!("Échec de l'écriture de {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Échec du renommage vers {}", path.display()))?;

        debug!(?path, bytes = value.len(), "Value stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("watchlist").unwrap(), None);

        storage.set("watchlist", "[]").unwrap();
        assert_eq!(storage.get("watchlist").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested").join("watchlist.json").exists());
    }
}
