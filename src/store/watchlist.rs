// ============================================================================
// WatchlistStore : favoris persistés
// ============================================================================
// Collection ordonnée (plus ancien en premier) des instruments favoris.
// Chargée une fois au démarrage, réécrite en entier à chaque modification.
//
// Cycle de vie :
//   new() → Loading → load() → Ready
// - Pendant Loading : contains() = false, list() = vide, add/remove ignorés
// - Erreurs de lecture : collection vide (loggé, jamais propagé)
// - Erreurs d'écriture : loggées, pas de retry, pas de rollback mémoire
// ============================================================================

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, error, info, warn};

use crate::models::{NewWatchlistEntry, WatchlistEntry};
use crate::store::Storage;

/// Clé de la collection dans le stockage
pub const WATCHLIST_KEY: &str = "watchlist";

/// Clé de l'état replié/déplié du panneau
pub const EXPANDED_KEY: &str = "watchlist-expanded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Loading,
    Ready,
}

/// Watchlist persistée, injectée dans App (pas de singleton global)
pub struct WatchlistStore {
    storage: Box<dyn Storage>,
    entries: Vec<WatchlistEntry>,
    state: LoadState,
    expanded: bool,
}

impl WatchlistStore {
    /// Crée un store en état Loading
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            entries: Vec::new(),
            state: LoadState::Loading,
            expanded: true,
        }
    }

    /// Lit la collection persistée
    ///
    /// Absence ou JSON invalide → collection vide. Ne retourne jamais d'erreur.
    pub fn load(&mut self) {
        self.entries = match self.storage.get(WATCHLIST_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<WatchlistEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(error = %e, "Stored watchlist is not valid JSON, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = ?e, "Failed to read watchlist, starting empty");
                Vec::new()
            }
        };

        self.expanded = match self.storage.get(EXPANDED_KEY) {
            // Seul "true" déplie ; une valeur illisible replie le panneau
            Ok(Some(raw)) => raw.trim() == "true",
            _ => true,
        };

        self.state = LoadState::Ready;
        info!(entries = self.entries.len(), "Watchlist loaded");
    }

    /// Vérifie si le chargement est en cours
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Ajoute une entrée horodatée maintenant
    ///
    /// Retourne false si le store n'est pas chargé ou si le symbole est déjà présent.
    pub fn add(&mut self, entry: NewWatchlistEntry) -> bool {
        self.add_at(entry, now_millis())
    }

    /// Ajoute une entrée avec une date d'ajout explicite
    pub fn add_at(&mut self, entry: NewWatchlistEntry, added_at: DateTime<Utc>) -> bool {
        if self.is_loading() {
            warn!(symbol = %entry.symbol, "Watchlist still loading, add ignored");
            return false;
        }

        if self.contains(&entry.symbol) {
            debug!(symbol = %entry.symbol, "Symbol already in watchlist, add ignored");
            return false;
        }

        info!(symbol = %entry.symbol, kind = ?entry.kind, "Adding to watchlist");
        self.entries.push(entry.stamp(added_at));
        self.flush();
        true
    }

    /// Retire toutes les entrées d'un symbole (no-op si absent)
    pub fn remove(&mut self, symbol: &str) -> bool {
        if self.is_loading() {
            warn!(symbol, "Watchlist still loading, remove ignored");
            return false;
        }

        let before = self.entries.len();
        self.entries.retain(|entry| entry.symbol != symbol);

        if self.entries.len() == before {
            debug!(symbol, "Symbol not in watchlist, remove ignored");
            return false;
        }

        info!(symbol, "Removed from watchlist");
        self.flush();
        true
    }

    /// Test d'appartenance
    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.iter().any(|entry| entry.symbol == symbol)
    }

    /// Entrées dans l'ordre d'ajout (vide pendant le chargement)
    pub fn list(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retourne l'entrée à un index
    pub fn get(&self, index: usize) -> Option<&WatchlistEntry> {
        self.entries.get(index)
    }

    /// Panneau déplié ?
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Bascule replié/déplié et persiste le choix
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;

        let value = if self.expanded { "true" } else { "false" };
        if let Err(e) = self.storage.set(EXPANDED_KEY, value) {
            error!(error = ?e, "Failed to save watchlist panel state");
        }
    }

    /// Réécrit toute la collection dans le stockage
    ///
    /// En cas d'échec, l'état mémoire est conservé : mémoire et disque peuvent
    /// diverger jusqu'à la prochaine écriture réussie.
    fn flush(&mut self) {
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Failed to serialize watchlist");
                return;
            }
        };

        if let Err(e) = self.storage.set(WATCHLIST_KEY, &raw) {
            error!(error = ?e, entries = self.entries.len(), "Failed to save watchlist");
        }
    }
}

/// Maintenant, tronqué à la milliseconde (précision du format persisté)
fn now_millis() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(Utc::now().timestamp_millis())
        .single()
        .unwrap_or_else(Utc::now)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;
    use crate::store::{FileStorage, MemoryStorage};

    fn ready(storage: MemoryStorage) -> WatchlistStore {
        let mut store = WatchlistStore::new(storage);
        store.load();
        store
    }

    #[test]
    fn test_add_then_contains() {
        let mut store = ready(MemoryStorage::new());

        assert!(store.add(NewWatchlistEntry::commodity("GC=F", "Gold")));
        assert!(store.contains("GC=F"));

        assert!(store.remove("GC=F"));
        assert!(!store.contains("GC=F"));
        assert!(!store.remove("GC=F"));
    }

    #[test]
    fn test_duplicate_symbol_is_rejected() {
        let mut store = ready(MemoryStorage::new());

        assert!(store.add(NewWatchlistEntry::stock("AAPL", "Apple Inc.", None)));
        assert!(!store.add(NewWatchlistEntry::stock("AAPL", "Apple", None)));

        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].name, "Apple Inc.");
    }

    #[test]
    fn test_loading_state_ignores_writes() {
        let mut store = WatchlistStore::new(MemoryStorage::new());

        assert!(store.is_loading());
        assert!(!store.add(NewWatchlistEntry::commodity("GC=F", "Gold")));
        assert!(!store.contains("GC=F"));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_order_and_dates() {
        let storage = MemoryStorage::new();
        let mut store = ready(storage.clone());

        store.add(NewWatchlistEntry::commodity("SI=F", "Silver"));
        store.add(NewWatchlistEntry::stock("MSFT", "Microsoft", Some("NASDAQ".into())));
        store.add(NewWatchlistEntry::commodity("CL=F", "WTI Crude Oil"));

        // Simule un redémarrage : nouveau store sur le même stockage
        let reloaded = ready(storage);
        assert_eq!(reloaded.list(), store.list());

        let symbols: Vec<&str> = reloaded.list().iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, ["SI=F", "MSFT", "CL=F"]);
    }

    #[test]
    fn test_invalid_json_loads_empty() {
        let store = ready(MemoryStorage::new().with_value(WATCHLIST_KEY, "{not json"));

        assert!(!store.is_loading());
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = ready(MemoryStorage::failing_writes());

        assert!(store.add(NewWatchlistEntry::commodity("HG=F", "Copper")));
        assert!(store.contains("HG=F"));
    }

    #[test]
    fn test_remove_drops_every_match() {
        // Ancien stockage contenant des doublons
        let raw = r#"[
            {"symbol":"GC=F","name":"Gold","type":"commodity","addedAt":1},
            {"symbol":"AAPL","name":"Apple","type":"stock","exchange":"NASDAQ","addedAt":2},
            {"symbol":"GC=F","name":"Gold","type":"commodity","addedAt":3}
        ]"#;
        let mut store = ready(MemoryStorage::new().with_value(WATCHLIST_KEY, raw));
        assert_eq!(store.len(), 3);

        store.remove("GC=F");
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].kind, EntryKind::Stock);
    }

    #[test]
    fn test_expanded_flag_is_persisted() {
        let storage = MemoryStorage::new();
        let mut store = ready(storage.clone());
        assert!(store.is_expanded());

        store.toggle_expanded();
        assert!(!ready(storage).is_expanded());
    }

    #[test]
    fn test_expanded_flag_requires_true() {
        let garbage = MemoryStorage::new().with_value(EXPANDED_KEY, "yes");
        assert!(!ready(garbage).is_expanded());

        let stored = MemoryStorage::new().with_value(EXPANDED_KEY, "true");
        assert!(ready(stored).is_expanded());
    }

    #[test]
    fn test_file_backed_store() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = WatchlistStore::new(FileStorage::new(dir.path()));
        store.load();
        store.add(NewWatchlistEntry::commodity("KC=F", "Coffee"));

        let mut reloaded = WatchlistStore::new(FileStorage::new(dir.path()));
        reloaded.load();
        assert!(reloaded.contains("KC=F"));
    }
}
