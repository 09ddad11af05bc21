// ============================================================================
// Structure : DisplayContext
// ============================================================================
// Ce qui est actuellement affiché (graphique + news)
//
// CONCEPT : Valeur dérivée
// - Jamais stockée : recalculée à partir du mode et de la sélection courante
// - Voir DashboardController::display_context()
// ============================================================================

use crate::models::{EntryKind, NewWatchlistEntry};

/// Mode d'affichage du tableau de bord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Une matière première du catalogue
    #[default]
    Commodity,
    /// Une action issue de la recherche ou de la watchlist
    Stock,
}

/// Instrument affiché et paramètres dérivés pour le graphique et les news
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContext {
    pub symbol: String,
    pub display_name: String,
    pub news_keywords: String,
    pub is_stock: bool,
    pub exchange: Option<String>,
}

impl DisplayContext {
    /// Type d'entrée de watchlist correspondant
    pub fn kind(&self) -> EntryKind {
        if self.is_stock {
            EntryKind::Stock
        } else {
            EntryKind::Commodity
        }
    }

    /// Entrée de watchlist pour l'instrument affiché
    pub fn to_watchlist_entry(&self) -> NewWatchlistEntry {
        NewWatchlistEntry {
            symbol: self.symbol.clone(),
            name: self.display_name.clone(),
            kind: self.kind(),
            exchange: if self.is_stock { self.exchange.clone() } else { None },
        }
    }

    /// Sous-titre du graphique : "AAPL · NASDAQ · USD" ou "GC=F · Front Month Futures · USD"
    pub fn chart_subtitle(&self, currency: &str) -> String {
        match (&self.exchange, self.is_stock) {
            (Some(exchange), true) => format!("{} · {} · {}", self.symbol, exchange, currency),
            _ => format!("{} · Front Month Futures · {}", self.symbol, currency),
        }
    }
}
