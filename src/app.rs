// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Les appels réseau ne sont jamais faits ici : App dépose des AppCommand
//   dans une boîte d'envoi, l'event loop les transmet au worker
//
// CONCEPTS RUST :
// 1. Composition : App assemble les contrôleurs (dashboard, search, dropdowns)
// 2. Injection : la WatchlistStore est construite dans main() et passée ici
// 3. Résultats étiquetés : apply() ignore ce qui ne correspond plus à l'écran
// ============================================================================

use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::config::Config;
use crate::controllers::{
    DashboardController, DebouncedSearchController, KeyOutcome, Navigation, SelectableList,
};
use crate::models::catalog::{self, Category, Instrument};
use crate::models::embed::Theme;
use crate::models::{
    DisplayContext, EmbedSpec, Interval, NewsArticle, OHLCData, SearchResult, WatchlistEntry,
};
use crate::store::WatchlistStore;
use crate::ui::events::{
    get_char_from_event, is_backspace_event, is_delete_event, is_down_event, is_enter_event,
    is_escape_event, is_next_interval_event, is_previous_interval_event, is_quit_event,
    is_up_event, Event,
};
use crate::ui::layout::{self, DashboardLayout};
use crate::worker::{AppCommand, AppResult};

// ============================================================================
// Enums d'état
// ============================================================================

/// Zone qui reçoit le clavier
///
/// Tab / Shift-Tab parcourent les zones dans l'ordre de déclaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Category,
    Commodity,
    Search,
    Watchlist,
    Chart,
    News,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Category,
        Focus::Commodity,
        Focus::Search,
        Focus::Watchlist,
        Focus::Chart,
        Focus::News,
    ];

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Focus {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(&self) -> Focus {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Onglet du panneau de news
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsTab {
    /// Articles GDELT
    #[default]
    Commodity,
    /// Fil TradingView (embed)
    Market,
}

/// Données distantes : en cours, reçues ou en erreur
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }
}

impl<T> From<Result<T, String>> for Remote<T> {
    fn from(outcome: Result<T, String>) -> Self {
        match outcome {
            Ok(value) => Remote::Loaded(value),
            Err(message) => Remote::Failed(message),
        }
    }
}

// ============================================================================
// App
// ============================================================================

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Première pression de 'q' reçue (two-step quit)
    pub confirm_quit: bool,

    /// Première pression de 'd' reçue sur la watchlist (two-step delete)
    pub confirm_delete: bool,

    pub focus: Focus,

    /// Instrument affiché
    pub dashboard: DashboardController,

    /// Dropdown des catégories (navigation bornée)
    pub category_select: SelectableList<&'static Category>,

    /// Dropdown des matières premières de la catégorie courante
    pub commodity_select: SelectableList<&'static Instrument>,

    /// Recherche d'actions
    pub search: DebouncedSearchController,

    /// Favoris persistés
    pub watchlist: WatchlistStore,

    /// Entrée sélectionnée au clavier dans la watchlist
    pub watchlist_cursor: usize,

    /// Période du graphique
    pub interval: Interval,

    pub chart: Remote<OHLCData>,
    pub news: Remote<Vec<NewsArticle>>,
    pub news_tab: NewsTab,

    /// Premier article affiché
    pub news_scroll: usize,

    /// Contexte pour lequel chart et news ont été demandés
    context: DisplayContext,

    /// Taille du terminal, pour le hit-testing souris
    viewport: Rect,

    /// Commandes en attente d'envoi au worker
    outbox: Vec<AppCommand>,
}

impl App {
    /// Crée l'application et programme le premier chargement
    pub fn new(config: &Config, watchlist: WatchlistStore) -> Result<Self> {
        let dashboard = DashboardController::new().context("Le catalogue est vide")?;
        let context = dashboard.display_context();

        let category_select = SelectableList::new(
            catalog::categories().iter().collect(),
            Navigation::Clamp,
        );
        let commodity_select = SelectableList::new(
            dashboard.category().instruments.iter().collect(),
            Navigation::Clamp,
        );

        let mut app = Self {
            running: true,
            confirm_quit: false,
            confirm_delete: false,
            focus: Focus::Category,
            dashboard,
            category_select,
            commodity_select,
            search: DebouncedSearchController::new(config.debounce, config.min_query_chars),
            watchlist,
            watchlist_cursor: 0,
            interval: Interval::default(),
            chart: Remote::Loading,
            news: Remote::Loading,
            news_tab: NewsTab::default(),
            news_scroll: 0,
            context,
            viewport: Rect::default(),
            outbox: Vec::new(),
        };

        app.request_chart();
        app.request_news();
        Ok(app)
    }

    // ========================================================================
    // Boucle principale
    // ========================================================================

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        info!("Quitting application");
        self.running = false;
    }

    /// Vide la boîte d'envoi
    pub fn take_commands(&mut self) -> Vec<AppCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Avance les minuteries (anti-rebond de la recherche)
    pub fn tick(&mut self, now: Instant) {
        if let Some(request) = self.search.poll(now) {
            self.outbox.push(AppCommand::SearchStocks {
                seq: request.seq,
                query: request.query,
            });
        }
    }

    /// Enregistre la taille du terminal
    pub fn resize(&mut self, area: Rect) {
        self.viewport = area;
        self.sync_dropdown_scroll();
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Applique un résultat du worker s'il correspond encore à l'écran
    pub fn apply(&mut self, result: AppResult) {
        match result {
            AppResult::ChartLoaded {
                symbol,
                interval,
                outcome,
            } => {
                if symbol != self.context.symbol || interval != self.interval {
                    debug!(%symbol, interval = interval.label(), "Discarding stale price series");
                    return;
                }
                self.chart = outcome.into();
            }

            AppResult::NewsLoaded { keywords, outcome } => {
                if keywords != self.context.news_keywords {
                    debug!("Discarding stale news");
                    return;
                }
                self.news = outcome.into();
                self.news_scroll = 0;
            }

            AppResult::SearchCompleted { seq, outcome } => {
                if self.search.complete(seq, outcome) {
                    self.sync_dropdown_scroll();
                }
            }
        }
    }

    // ========================================================================
    // Instrument affiché
    // ========================================================================

    /// Contexte courant (graphique + news)
    pub fn context(&self) -> &DisplayContext {
        &self.context
    }

    /// L'instrument affiché est dans la watchlist
    pub fn is_saved(&self) -> bool {
        self.watchlist.contains(&self.context.symbol)
    }

    /// Fil de news TradingView pour l'instrument affiché
    pub fn market_news_embed(&self, width: u16, height: u16) -> EmbedSpec {
        EmbedSpec::timeline(&self.context.symbol, width, height).with_theme(Theme::Dark)
    }

    /// Graphique interactif TradingView pour l'instrument affiché
    pub fn chart_embed(&self, width: u16, height: u16) -> EmbedSpec {
        EmbedSpec::advanced_chart(&self.context.symbol, width, height).with_theme(Theme::Dark)
    }

    pub fn select_category(&mut self, category: &'static Category) {
        self.dashboard.select_category(category);
        self.context_changed();
    }

    pub fn select_commodity(&mut self, instrument: &'static Instrument) {
        self.dashboard.select_commodity(instrument);
        self.context_changed();
    }

    pub fn select_search_result(&mut self, result: SearchResult) {
        self.dashboard.select_stock(result.into());
        self.context_changed();
    }

    /// Ouvre l'entrée de watchlist à un index
    pub fn open_watchlist_entry(&mut self, index: usize) {
        let Some(entry) = self.watchlist.get(index).cloned() else {
            return;
        };

        self.watchlist_cursor = index;
        if self.dashboard.open_watchlist_entry(&entry) {
            self.context_changed();
        }
    }

    /// Bouton Save / Saved
    pub fn toggle_save(&mut self) {
        let saved = self.dashboard.toggle_watchlist(&mut self.watchlist);
        info!(symbol = %self.context.symbol, saved, "Watchlist toggled");
        self.clamp_watchlist_cursor();
    }

    /// Retire une entrée de la watchlist
    pub fn remove_watchlist_entry(&mut self, index: usize) {
        let Some(symbol) = self.watchlist.get(index).map(|e| e.symbol.clone()) else {
            return;
        };

        self.watchlist.remove(&symbol);
        self.clamp_watchlist_cursor();
    }

    /// Entrée sous le curseur de la watchlist
    pub fn selected_watchlist_entry(&self) -> Option<&WatchlistEntry> {
        self.watchlist.get(self.watchlist_cursor)
    }

    pub fn set_interval(&mut self, interval: Interval) {
        if interval == self.interval {
            return;
        }

        info!(interval = interval.label(), "Chart interval changed");
        self.interval = interval;
        self.request_chart();
    }

    pub fn set_news_tab(&mut self, tab: NewsTab) {
        self.news_tab = tab;
    }

    /// Change de focus ; les dropdowns ouverts sont fermés
    pub fn set_focus(&mut self, focus: Focus) {
        self.category_select.close();
        self.commodity_select.close();
        self.search.outside_click();
        self.focus = focus;
    }

    /// Recalcule le contexte et relance les chargements nécessaires
    ///
    /// - Symbole changé → nouveau graphique
    /// - Mots-clés changés → nouvelles news
    fn context_changed(&mut self) {
        let previous_category = self.commodity_select.options().first().copied();
        let category = self.dashboard.category();
        if previous_category.map_or(true, |first| !category.instruments.contains(first)) {
            self.commodity_select
                .set_options(category.instruments.iter().collect());
        }

        let context = self.dashboard.display_context();
        let symbol_changed = context.symbol != self.context.symbol;
        let keywords_changed = context.news_keywords != self.context.news_keywords;
        self.context = context;

        if symbol_changed {
            self.request_chart();
        }
        if keywords_changed {
            self.request_news();
        }
    }

    fn request_chart(&mut self) {
        self.chart = Remote::Loading;
        self.outbox.push(AppCommand::FetchChart {
            symbol: self.context.symbol.clone(),
            interval: self.interval,
        });
    }

    fn request_news(&mut self) {
        self.news = Remote::Loading;
        self.news_scroll = 0;
        self.outbox.push(AppCommand::FetchNews {
            keywords: self.context.news_keywords.clone(),
        });
    }

    fn clamp_watchlist_cursor(&mut self) {
        self.watchlist_cursor = self
            .watchlist_cursor
            .min(self.watchlist.len().saturating_sub(1));
    }

    fn news_len(&self) -> usize {
        match &self.news {
            Remote::Loaded(articles) => articles.len(),
            _ => 0,
        }
    }

    // ========================================================================
    // Clavier
    // ========================================================================

    /// Traite un événement terminal
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(_) => self.handle_key(&event, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(Rect::new(0, 0, width, height)),
            Event::Tick => {}
        }
        self.sync_dropdown_scroll();
    }

    /// Traite une touche
    ///
    /// Priorité : dropdown ouvert > champ de recherche > raccourcis globaux
    /// > zone qui a le focus. Toute touche annule les confirmations en cours.
    fn handle_key(&mut self, event: &Event, now: Instant) {
        let Event::Key(key) = event else {
            return;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        let awaiting_quit = std::mem::take(&mut self.confirm_quit);
        let awaiting_delete = std::mem::take(&mut self.confirm_delete);

        // Dropdowns statiques ouverts
        if self.category_select.is_open() {
            match self.category_select.handle_key(key.code) {
                KeyOutcome::Selected(category) => return self.select_category(category),
                KeyOutcome::Consumed => return,
                KeyOutcome::Ignored => {}
            }
        }
        if self.commodity_select.is_open() {
            match self.commodity_select.handle_key(key.code) {
                KeyOutcome::Selected(instrument) => return self.select_commodity(instrument),
                KeyOutcome::Consumed => return,
                KeyOutcome::Ignored => {}
            }
        }

        // Champ de recherche : capture la saisie
        if self.focus == Focus::Search {
            match self.search.handle_key(key.code) {
                KeyOutcome::Selected(result) => return self.select_search_result(result),
                KeyOutcome::Consumed => return,
                KeyOutcome::Ignored => {}
            }

            if is_backspace_event(event) {
                self.search.backspace(now);
                return;
            }
            if is_escape_event(event) {
                self.search.set_query("", now);
                self.set_focus(Focus::Chart);
                return;
            }
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                if let Some(c) = get_char_from_event(event) {
                    self.search.push_char(c, now);
                    return;
                }
            }
        }

        // Raccourcis globaux
        match key.code {
            KeyCode::Tab => return self.set_focus(self.focus.next()),
            KeyCode::BackTab => return self.set_focus(self.focus.previous()),
            KeyCode::Char('/') => return self.set_focus(Focus::Search),
            KeyCode::Char('s') => return self.toggle_save(),
            KeyCode::Char('[') => return self.set_interval(self.interval.previous()),
            KeyCode::Char(']') => return self.set_interval(self.interval.next()),
            KeyCode::Char('n') => {
                return self.set_news_tab(match self.news_tab {
                    NewsTab::Commodity => NewsTab::Market,
                    NewsTab::Market => NewsTab::Commodity,
                })
            }
            KeyCode::Char('w') => return self.watchlist.toggle_expanded(),
            _ => {}
        }

        if is_quit_event(event) {
            if awaiting_quit {
                info!("User confirmed quit");
                self.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                self.confirm_quit = true;
            }
            return;
        }

        match self.focus {
            Focus::Category => {
                self.category_select.handle_key(key.code);
            }
            Focus::Commodity => {
                self.commodity_select.handle_key(key.code);
            }
            Focus::Search => {}
            Focus::Watchlist => self.handle_watchlist_key(event, awaiting_delete),
            Focus::Chart => {
                if is_next_interval_event(event) || key.code == KeyCode::Right {
                    self.set_interval(self.interval.next());
                } else if is_previous_interval_event(event) || key.code == KeyCode::Left {
                    self.set_interval(self.interval.previous());
                }
            }
            Focus::News => {
                if is_down_event(event) {
                    self.news_scroll = (self.news_scroll + 1).min(self.news_len().saturating_sub(1));
                } else if is_up_event(event) {
                    self.news_scroll = self.news_scroll.saturating_sub(1);
                }
            }
        }
    }

    /// Navigation et suppression dans la watchlist
    fn handle_watchlist_key(&mut self, event: &Event, awaiting_delete: bool) {
        if !self.watchlist.is_expanded() || self.watchlist.is_empty() {
            return;
        }

        if is_up_event(event) {
            self.watchlist_cursor = self.watchlist_cursor.saturating_sub(1);
        } else if is_down_event(event) {
            self.watchlist_cursor = (self.watchlist_cursor + 1).min(self.watchlist.len() - 1);
        } else if is_enter_event(event) {
            self.open_watchlist_entry(self.watchlist_cursor);
        } else if is_delete_event(event) {
            // Two-step delete : la deuxième pression supprime
            if awaiting_delete {
                info!("User confirmed delete");
                self.remove_watchlist_entry(self.watchlist_cursor);
            } else {
                info!("User requested delete (awaiting confirmation)");
                self.confirm_delete = true;
            }
        }
    }

    // ========================================================================
    // Souris
    // ========================================================================

    /// Traite un événement souris avec la géométrie du rendu
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let layout = DashboardLayout::new(self.viewport);
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => self.hover(&layout, column, row),
            MouseEventKind::Down(MouseButton::Left) => self.click(&layout, column, row),
            MouseEventKind::ScrollDown if layout::contains(layout.news, column, row) => {
                self.news_scroll = (self.news_scroll + 1).min(self.news_len().saturating_sub(1));
            }
            MouseEventKind::ScrollUp if layout::contains(layout.news, column, row) => {
                self.news_scroll = self.news_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Zone d'un dropdown ouvert
    fn dropdown_area(&self, anchor: Rect, len: usize) -> Rect {
        layout::dropdown_area(anchor, len, self.viewport)
    }

    /// Ramène la surbrillance de chaque dropdown ouvert dans sa zone visible
    fn sync_dropdown_scroll(&mut self) {
        let layout = DashboardLayout::new(self.viewport);

        if self.category_select.is_open() {
            let area = self.dropdown_area(layout.category, self.category_select.len());
            self.category_select.reveal(layout::dropdown_visible_rows(area));
        }
        if self.commodity_select.is_open() {
            let area = self.dropdown_area(layout.commodity, self.commodity_select.len());
            self.commodity_select.reveal(layout::dropdown_visible_rows(area));
        }
        if self.search.is_open() {
            let area = self.dropdown_area(layout.search, self.search.results().len());
            self.search.reveal(layout::dropdown_visible_rows(area));
        }
    }

    fn hover(&mut self, layout: &DashboardLayout, column: u16, row: u16) {
        if self.category_select.is_open() {
            let area = self.dropdown_area(layout.category, self.category_select.len());
            let first = self.category_select.scroll();
            if let Some(i) = layout::dropdown_option_at(area, self.category_select.len(), first, column, row) {
                self.category_select.hover(i);
            }
        }

        if self.commodity_select.is_open() {
            let area = self.dropdown_area(layout.commodity, self.commodity_select.len());
            let first = self.commodity_select.scroll();
            if let Some(i) = layout::dropdown_option_at(area, self.commodity_select.len(), first, column, row) {
                self.commodity_select.hover(i);
            }
        }

        if self.search.is_open() {
            let len = self.search.results().len();
            let area = self.dropdown_area(layout.search, len);
            if let Some(i) = layout::dropdown_option_at(area, len, self.search.scroll(), column, row) {
                self.search.hover(i);
            }
        }
    }

    fn click(&mut self, layout: &DashboardLayout, column: u16, row: u16) {
        // Dropdowns ouverts : dessinés par-dessus le reste
        if self.category_select.is_open() {
            let len = self.category_select.len();
            let area = self.dropdown_area(layout.category, len);
            if layout::contains(area, column, row) {
                let first = self.category_select.scroll();
                if let Some(i) = layout::dropdown_option_at(area, len, first, column, row) {
                    if let Some(category) = self.category_select.click_option(i) {
                        self.select_category(category);
                    }
                }
                return;
            }
            if layout::contains(layout.category, column, row) {
                self.category_select.toggle();
                return;
            }
            self.category_select.outside_click();
        }

        if self.commodity_select.is_open() {
            let len = self.commodity_select.len();
            let area = self.dropdown_area(layout.commodity, len);
            if layout::contains(area, column, row) {
                let first = self.commodity_select.scroll();
                if let Some(i) = layout::dropdown_option_at(area, len, first, column, row) {
                    if let Some(instrument) = self.commodity_select.click_option(i) {
                        self.select_commodity(instrument);
                    }
                }
                return;
            }
            if layout::contains(layout.commodity, column, row) {
                self.commodity_select.toggle();
                return;
            }
            self.commodity_select.outside_click();
        }

        if self.search.is_open() {
            let len = self.search.results().len();
            let area = self.dropdown_area(layout.search, len);
            if layout::contains(area, column, row) {
                if let Some(i) = layout::dropdown_option_at(area, len, self.search.scroll(), column, row) {
                    if let Some(result) = self.search.select(i) {
                        self.select_search_result(result);
                    }
                }
                return;
            }
            if !layout::contains(layout.search, column, row) {
                self.search.outside_click();
            }
        }

        // Zones fixes
        if layout::contains(layout.category, column, row) {
            self.set_focus(Focus::Category);
            self.category_select.open();
        } else if layout::contains(layout.commodity, column, row) {
            self.set_focus(Focus::Commodity);
            self.commodity_select.open();
        } else if layout::contains(layout.search, column, row) {
            self.focus = Focus::Search;
        } else if layout::contains(layout.watchlist, column, row) {
            self.click_watchlist(layout, column, row);
        } else if layout::contains(layout.chart, column, row) {
            self.focus = Focus::Chart;
            if layout::contains(layout.save_button(), column, row) {
                self.toggle_save();
            } else if let Some((interval, _)) = layout
                .interval_buttons()
                .into_iter()
                .find(|(_, rect)| layout::contains(*rect, column, row))
            {
                self.set_interval(interval);
            }
        } else if layout::contains(layout.news, column, row) {
            self.focus = Focus::News;
            let [commodity_tab, market_tab] = layout.news_tabs();
            if layout::contains(commodity_tab, column, row) {
                self.set_news_tab(NewsTab::Commodity);
            } else if layout::contains(market_tab, column, row) {
                self.set_news_tab(NewsTab::Market);
            }
        }
    }

    fn click_watchlist(&mut self, layout: &DashboardLayout, column: u16, row: u16) {
        self.focus = Focus::Watchlist;

        if layout::contains(layout.watchlist_header(), column, row) {
            self.watchlist.toggle_expanded();
            return;
        }

        if !self.watchlist.is_expanded() {
            return;
        }

        let rows = layout.watchlist_rows(self.watchlist.len(), self.watchlist_cursor);
        if let Some((index, rect)) = rows
            .into_iter()
            .find(|(_, rect)| layout::contains(*rect, column, row))
        {
            if layout::contains(layout::remove_button(rect), column, row) {
                self.remove_watchlist_entry(index);
            } else {
                self.open_watchlist_entry(index);
            }
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
