// ============================================================================
// DashboardController : instrument actuellement affiché
// ============================================================================
// Coordonne le mode (commodity / stock), la catégorie, la matière première
// et l'action sélectionnées, et en dérive le DisplayContext utilisé par le
// graphique et les news.
//
// Règles :
// - Changer de catégorie sélectionne sa première matière première
// - Choisir une catégorie ou une matière première force le mode commodity
// - Choisir une action (recherche ou watchlist) force le mode stock
// - Une entrée commodity de la watchlist est résolue via le catalogue ;
//   symbole inconnu → aucune action
// ============================================================================

use tracing::{info, warn};

use crate::models::catalog::{self, Category, Instrument};
use crate::models::{keywords, DisplayContext, EntryKind, Mode, SearchResult, WatchlistEntry};
use crate::store::WatchlistStore;

/// Action choisie via la recherche ou la watchlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedStock {
    pub symbol: String,
    pub name: String,
    pub exchange: Option<String>,
}

impl From<SearchResult> for SelectedStock {
    fn from(result: SearchResult) -> Self {
        Self {
            symbol: result.symbol,
            name: result.name,
            exchange: Some(result.exchange).filter(|e| !e.is_empty()),
        }
    }
}

/// État de sélection du tableau de bord
#[derive(Debug, Clone)]
pub struct DashboardController {
    mode: Mode,
    category: &'static Category,
    commodity: &'static Instrument,
    stock: Option<SelectedStock>,
}

impl DashboardController {
    /// Démarre sur la première matière première de la première catégorie
    ///
    /// Retourne None si le catalogue est vide.
    pub fn new() -> Option<Self> {
        let category = catalog::categories().first()?;
        let commodity = category.instruments.first()?;

        Some(Self {
            mode: Mode::Commodity,
            category,
            commodity,
            stock: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn category(&self) -> &'static Category {
        self.category
    }

    pub fn commodity(&self) -> &'static Instrument {
        self.commodity
    }

    pub fn stock(&self) -> Option<&SelectedStock> {
        self.stock.as_ref()
    }

    /// Change de catégorie et sélectionne sa première matière première
    pub fn select_category(&mut self, category: &'static Category) {
        let Some(first) = category.instruments.first() else {
            warn!(category = category.name, "Category has no instruments, ignored");
            return;
        };

        info!(category = category.name, symbol = first.symbol, "Category changed");
        self.category = category;
        self.commodity = first;
        self.mode = Mode::Commodity;
    }

    /// Choisit une matière première (dropdown)
    ///
    /// Si elle n'appartient pas à la catégorie courante, la catégorie suit.
    pub fn select_commodity(&mut self, instrument: &'static Instrument) {
        if !self.category.instruments.contains(instrument) {
            match catalog::find_by_symbol(instrument.symbol) {
                Some((category, _)) => self.category = category,
                None => {
                    warn!(symbol = instrument.symbol, "Commodity not in catalog, ignored");
                    return;
                }
            }
        }

        info!(symbol = instrument.symbol, "Commodity selected");
        self.commodity = instrument;
        self.mode = Mode::Commodity;
    }

    /// Choisit une action
    pub fn select_stock(&mut self, stock: SelectedStock) {
        info!(symbol = %stock.symbol, "Stock selected");
        self.stock = Some(stock);
        self.mode = Mode::Stock;
    }

    /// Clic sur une entrée de la watchlist
    ///
    /// Retourne false si l'entrée n'a pas pu être résolue.
    pub fn open_watchlist_entry(&mut self, entry: &WatchlistEntry) -> bool {
        match entry.kind {
            EntryKind::Commodity => match catalog::find_by_symbol(&entry.symbol) {
                Some((category, instrument)) => {
                    self.category = category;
                    self.commodity = instrument;
                    self.mode = Mode::Commodity;
                    info!(symbol = %entry.symbol, "Opened commodity from watchlist");
                    true
                }
                None => {
                    warn!(symbol = %entry.symbol, "Watchlist commodity not in catalog, ignored");
                    false
                }
            },
            EntryKind::Stock => {
                self.select_stock(SelectedStock {
                    symbol: entry.symbol.clone(),
                    name: entry.name.clone(),
                    exchange: entry.exchange.clone(),
                });
                true
            }
        }
    }

    /// Ajoute ou retire l'instrument affiché de la watchlist
    ///
    /// Retourne l'appartenance après l'opération.
    pub fn toggle_watchlist(&self, store: &mut WatchlistStore) -> bool {
        let context = self.display_context();

        if store.contains(&context.symbol) {
            store.remove(&context.symbol);
        } else {
            store.add(context.to_watchlist_entry());
        }

        store.contains(&context.symbol)
    }

    /// Instrument affiché, recalculé à chaque appel
    pub fn display_context(&self) -> DisplayContext {
        match (self.mode, &self.stock) {
            (Mode::Stock, Some(stock)) => DisplayContext {
                symbol: stock.symbol.clone(),
                display_name: stock.name.clone(),
                news_keywords: keywords::synthesize(&stock.name, &stock.symbol),
                is_stock: true,
                exchange: stock.exchange.clone(),
            },
            _ => DisplayContext {
                symbol: self.commodity.symbol.to_string(),
                display_name: self.commodity.name.to_string(),
                news_keywords: self.commodity.news_keywords.to_string(),
                is_stock: false,
                exchange: None,
            },
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewWatchlistEntry;
    use crate::store::MemoryStorage;

    fn loaded_store() -> WatchlistStore {
        let mut store = WatchlistStore::new(MemoryStorage::new());
        store.load();
        store
    }

    fn apple() -> SelectedStock {
        SelectedStock {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            exchange: Some("NASDAQ".to_string()),
        }
    }

    #[test]
    fn test_starts_on_gold() {
        let dashboard = DashboardController::new().unwrap();
        let context = dashboard.display_context();

        assert_eq!(dashboard.mode(), Mode::Commodity);
        assert_eq!(dashboard.category().name, "Precious Metals");
        assert_eq!(context.symbol, "GC=F");
        assert!(!context.is_stock);
    }

    #[test]
    fn test_energy_category_selects_first_instrument() {
        let mut dashboard = DashboardController::new().unwrap();
        dashboard.select_stock(apple());

        let energy = catalog::category("Energy").unwrap();
        dashboard.select_category(energy);

        assert_eq!(dashboard.mode(), Mode::Commodity);
        assert_eq!(dashboard.category().instruments.len(), 5);
        assert_eq!(dashboard.commodity().name, "WTI Crude Oil");
        assert_eq!(dashboard.display_context().symbol, "CL=F");
    }

    #[test]
    fn test_commodity_selection_forces_commodity_mode() {
        let mut dashboard = DashboardController::new().unwrap();
        dashboard.select_stock(apple());

        let silver = &dashboard.category().instruments[1];
        dashboard.select_commodity(silver);

        assert_eq!(dashboard.mode(), Mode::Commodity);
        assert_eq!(dashboard.display_context().symbol, "SI=F");
    }

    #[test]
    fn test_stock_context_uses_synthesized_keywords() {
        let mut dashboard = DashboardController::new().unwrap();
        dashboard.select_stock(apple());

        let context = dashboard.display_context();
        assert!(context.is_stock);
        assert_eq!(context.exchange.as_deref(), Some("NASDAQ"));
        assert_eq!(
            context.news_keywords,
            r#""Apple" OR "Apple stock" OR "Apple shares" OR AAPL OR "AAPL stock""#
        );
    }

    #[test]
    fn test_stock_toggle_adds_then_removes() {
        let mut store = loaded_store();
        let mut dashboard = DashboardController::new().unwrap();
        dashboard.select_stock(apple());

        assert!(dashboard.toggle_watchlist(&mut store));
        assert_eq!(store.len(), 1);
        let entry = store.get(0).unwrap();
        assert_eq!(entry.kind, EntryKind::Stock);
        assert_eq!(entry.exchange.as_deref(), Some("NASDAQ"));

        assert!(!dashboard.toggle_watchlist(&mut store));
        assert!(store.is_empty());
    }

    #[test]
    fn test_watchlist_commodity_resolves_through_catalog() {
        let mut store = loaded_store();
        store.add(NewWatchlistEntry::commodity("KC=F", "Coffee"));
        store.add(NewWatchlistEntry::commodity("XX=F", "Unknown"));

        let mut dashboard = DashboardController::new().unwrap();
        dashboard.select_stock(apple());

        assert!(dashboard.open_watchlist_entry(store.get(0).unwrap()));
        assert_eq!(dashboard.mode(), Mode::Commodity);
        assert_eq!(dashboard.category().name, "Soft Commodities");
        assert_eq!(dashboard.commodity().symbol, "KC=F");

        // Symbole inconnu : rien ne change
        assert!(!dashboard.open_watchlist_entry(store.get(1).unwrap()));
        assert_eq!(dashboard.commodity().symbol, "KC=F");
    }

    #[test]
    fn test_watchlist_stock_switches_to_stock_mode() {
        let mut store = loaded_store();
        store.add(NewWatchlistEntry::stock("MSFT", "Microsoft Corporation", None));

        let mut dashboard = DashboardController::new().unwrap();
        assert!(dashboard.open_watchlist_entry(store.get(0).unwrap()));

        let context = dashboard.display_context();
        assert_eq!(dashboard.mode(), Mode::Stock);
        assert_eq!(context.symbol, "MSFT");
        assert_eq!(context.exchange, None);
    }

    #[test]
    fn test_search_result_conversion() {
        let stock = SelectedStock::from(SearchResult::new("SAP", "SAP SE", "", "EQUITY"));
        assert_eq!(stock.exchange, None);
    }
}
