// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application
// ============================================================================

pub mod catalog;         // Catalogue statique des matières premières
pub mod display;         // Contexte d'affichage dérivé
pub mod embed;           // Widgets externes (TradingView)
pub mod keywords;        // Requêtes de news pour les actions
pub mod news;            // Articles de presse
pub mod ohlc;            // Séries de prix
pub mod search_result;   // Résultats de recherche d'actions
pub mod watchlist_item;  // Entrées de la watchlist

// Re-export des structures principales pour simplifier les imports
pub use catalog::{Category, Instrument};
pub use display::{DisplayContext, Mode};
pub use embed::EmbedSpec;
pub use news::NewsArticle;
pub use ohlc::{Interval, OHLCData, OHLC};
pub use search_result::SearchResult;
pub use watchlist_item::{EntryKind, NewWatchlistEntry, WatchlistEntry};
