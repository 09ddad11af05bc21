// ============================================================================
// Module : store
// ============================================================================
// Persistance locale : stockage clé/valeur et watchlist
// ============================================================================

pub mod storage;    // Trait Storage + implémentation fichier
pub mod watchlist;  // WatchlistStore

#[cfg(test)]
pub mod memory;     // Stockage en mémoire (tests uniquement)

pub use storage::{FileStorage, Storage};
pub use watchlist::WatchlistStore;

#[cfg(test)]
pub use memory::MemoryStorage;
