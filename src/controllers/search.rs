// ============================================================================
// DebouncedSearchController : recherche d'actions avec anti-rebond
// ============================================================================
// Le champ de recherche ne déclenche une requête qu'après une période
// de silence (300 ms par défaut) et seulement si la saisie fait au moins
// 2 caractères.
//
// CONCEPT : Machine à états pure
// - Aucune I/O ici : le temps est passé en paramètre (Instant)
// - poll(now) retourne la requête à lancer quand le délai est écoulé
// - complete(seq, ...) applique la réponse si elle est encore attendue
// - L'App fait le lien avec le worker (AppCommand::SearchStocks)
//
// Ordre des réponses :
// - Chaque requête reçoit un numéro de séquence croissant
// - Seule la dernière requête émise est acceptée ; une réponse arrivée
//   après une nouvelle saisie ou une sélection est ignorée
// ============================================================================

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use tracing::debug;

use super::select::{KeyOutcome, Navigation, SelectableList};
use crate::models::SearchResult;

/// Délai de silence par défaut avant de lancer la recherche
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Longueur minimale de la saisie (en caractères)
pub const DEFAULT_MIN_CHARS: usize = 2;

/// Requête à envoyer au service de recherche
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
}

/// Requête en attente de la fin du délai
#[derive(Debug, Clone)]
struct Pending {
    query: String,
    due: Instant,
}

/// État du champ de recherche et de son dropdown de résultats
#[derive(Debug, Clone)]
pub struct DebouncedSearchController {
    query: String,
    results: SelectableList<SearchResult>,
    is_loading: bool,
    error: Option<String>,
    pending: Option<Pending>,
    /// Séquence de la dernière requête émise et non encore résolue
    in_flight: Option<u64>,
    next_seq: u64,
    quiet_period: Duration,
    min_chars: usize,
}

impl Default for DebouncedSearchController {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD, DEFAULT_MIN_CHARS)
    }
}

impl DebouncedSearchController {
    pub fn new(quiet_period: Duration, min_chars: usize) -> Self {
        Self {
            query: String::new(),
            results: SelectableList::new(Vec::new(), Navigation::Wrap),
            is_loading: false,
            error: None,
            pending: None,
            in_flight: None,
            next_seq: 0,
            quiet_period,
            min_chars,
        }
    }

    // ========================================================================
    // Accesseurs
    // ========================================================================

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        self.results.options()
    }

    pub fn is_open(&self) -> bool {
        self.results.is_open()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.results.highlighted()
    }

    pub fn scroll(&self) -> usize {
        self.results.scroll()
    }

    /// Garde le résultat en surbrillance dans les `visible` lignes affichées
    pub fn reveal(&mut self, visible: usize) {
        self.results.reveal(visible);
    }

    /// Vrai entre la frappe et l'arrivée de la réponse
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// La saisie est assez longue pour lancer une recherche
    pub fn has_valid_query(&self) -> bool {
        self.query.chars().count() >= self.min_chars
    }

    /// Aucun résultat pour une recherche terminée sans erreur
    pub fn is_empty_result(&self) -> bool {
        self.has_valid_query()
            && !self.is_loading
            && self.error.is_none()
            && self.results.is_empty()
            && self.in_flight.is_none()
            && self.pending.is_none()
    }

    // ========================================================================
    // Saisie
    // ========================================================================

    /// Remplace le texte saisi
    ///
    /// Sous le minimum : tout est effacé et la requête en attente annulée.
    /// Sinon : la requête est (re)planifiée à `now + quiet_period`.
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) {
        self.query = text.into();

        if !self.has_valid_query() {
            self.reset_lookup();
            return;
        }

        self.is_loading = true;
        self.pending = Some(Pending {
            query: self.query.clone(),
            due: now + self.quiet_period,
        });
    }

    /// Ajoute un caractère à la saisie
    pub fn push_char(&mut self, c: char, now: Instant) {
        let mut text = self.query.clone();
        text.push(c);
        self.set_query(text, now);
    }

    /// Retire le dernier caractère de la saisie
    pub fn backspace(&mut self, now: Instant) {
        let mut text = self.query.clone();
        if text.pop().is_some() {
            self.set_query(text, now);
        }
    }

    /// Retourne la requête à lancer si le délai est écoulé
    ///
    /// Chaque appel qui retourne Some invalide les requêtes précédentes.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        if self.pending.as_ref().map_or(true, |p| p.due > now) {
            return None;
        }

        let pending = self.pending.take()?;
        self.next_seq += 1;
        self.in_flight = Some(self.next_seq);

        debug!(seq = self.next_seq, query = %pending.query, "Search lookup due");
        Some(SearchRequest {
            seq: self.next_seq,
            query: pending.query,
        })
    }

    /// Instant auquel la prochaine requête sera due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Applique la réponse d'une requête
    ///
    /// Retourne false si la réponse est périmée (ignorée).
    pub fn complete(&mut self, seq: u64, outcome: Result<Vec<SearchResult>, String>) -> bool {
        if self.in_flight != Some(seq) || self.pending.is_some() {
            debug!(seq, "Discarding stale search response");
            return false;
        }

        self.in_flight = None;
        self.is_loading = false;

        match outcome {
            Ok(results) => {
                self.error = None;
                let has_results = !results.is_empty();
                self.results.set_options(results);
                if has_results {
                    self.results.open();
                    self.results.set_highlighted(Some(0));
                } else {
                    self.results.close();
                }
            }
            Err(message) => {
                self.results.clear();
                self.error = Some(message);
            }
        }

        true
    }

    // ========================================================================
    // Dropdown de résultats
    // ========================================================================

    /// Traite une touche quand le dropdown est ouvert
    ///
    /// ↑/↓ bouclent, Enter sélectionne, Échap ferme sans sélectionner.
    pub fn handle_key(&mut self, code: KeyCode) -> KeyOutcome<SearchResult> {
        if !self.results.is_open() || self.results.is_empty() {
            return KeyOutcome::Ignored;
        }

        match code {
            KeyCode::Up | KeyCode::Down | KeyCode::Esc => self.results.handle_key(code),
            KeyCode::Enter => match self.results.highlighted() {
                Some(index) => self.select(index).map_or(KeyOutcome::Consumed, KeyOutcome::Selected),
                None => KeyOutcome::Consumed,
            },
            _ => KeyOutcome::Ignored,
        }
    }

    /// Survol d'un résultat
    pub fn hover(&mut self, index: usize) {
        self.results.hover(index);
    }

    /// Interaction hors du champ et du dropdown
    pub fn outside_click(&mut self) {
        self.results.outside_click();
    }

    /// Sélectionne un résultat : vide la saisie et ferme le dropdown
    ///
    /// Toute requête en cours ou planifiée est abandonnée.
    pub fn select(&mut self, index: usize) -> Option<SearchResult> {
        if !self.results.is_open() {
            return None;
        }

        let chosen = self.results.click_option(index)?;
        self.query.clear();
        self.reset_lookup();
        Some(chosen)
    }

    fn reset_lookup(&mut self) {
        self.pending = None;
        self.in_flight = None;
        self.is_loading = false;
        self.error = None;
        self.results.clear();
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn result(symbol: &str) -> SearchResult {
        SearchResult::new(symbol, format!("{} Inc.", symbol), "NASDAQ", "EQUITY")
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Tape "ap" puis attend le délai : retourne la requête émise
    fn typed_and_due(search: &mut DebouncedSearchController, t0: Instant) -> SearchRequest {
        search.set_query("ap", t0);
        search.poll(t0 + ms(300)).unwrap()
    }

    #[test]
    fn test_short_query_never_fires() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();

        search.set_query("a", t0);
        assert!(search.poll(t0 + ms(1000)).is_none());
        assert!(!search.is_loading());
        assert!(!search.is_open());
    }

    #[test]
    fn test_rapid_typing_fires_once_with_last_text() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();

        search.set_query("ap", t0);
        search.set_query("app", t0 + ms(100));
        assert!(search.poll(t0 + ms(350)).is_none());

        search.set_query("appl", t0 + ms(200));
        assert_eq!(search.next_deadline(), Some(t0 + ms(500)));
        assert!(search.poll(t0 + ms(499)).is_none());

        let request = search.poll(t0 + ms(500)).unwrap();
        assert_eq!(request.query, "appl");
        assert_eq!(search.next_deadline(), None);
        assert!(search.poll(t0 + ms(2000)).is_none());
    }

    #[test]
    fn test_shrinking_below_minimum_cancels_pending() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();

        search.set_query("ap", t0);
        assert!(search.is_loading());
        search.backspace(t0 + ms(100));

        assert_eq!(search.query(), "a");
        assert!(!search.is_loading());
        assert!(search.poll(t0 + ms(1000)).is_none());
    }

    #[test]
    fn test_minimum_counts_characters_not_bytes() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();

        // Un seul caractère sur deux octets
        search.set_query("é", t0);
        assert!(search.poll(t0 + ms(1000)).is_none());
    }

    #[test]
    fn test_results_open_with_first_highlighted() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();
        let request = typed_and_due(&mut search, t0);

        assert!(search.complete(request.seq, Ok(vec![result("AAPL"), result("APP")])));
        assert!(search.is_open());
        assert!(!search.is_loading());
        assert_eq!(search.highlighted(), Some(0));
    }

    #[test]
    fn test_empty_results_keep_dropdown_closed() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();
        let request = typed_and_due(&mut search, t0);

        search.complete(request.seq, Ok(Vec::new()));
        assert!(!search.is_open());
        assert!(search.is_empty_result());
    }

    #[test]
    fn test_failure_sets_error_and_clears_results() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();
        let request = typed_and_due(&mut search, t0);

        search.complete(request.seq, Err("Search failed".to_string()));
        assert_eq!(search.error(), Some("Search failed"));
        assert!(search.results().is_empty());
        assert!(!search.is_open());
        assert!(!search.is_empty_result());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();
        let first = typed_and_due(&mut search, t0);

        // Nouvelle saisie avant la réponse de la première requête
        search.set_query("appl", t0 + ms(400));
        assert!(!search.complete(first.seq, Ok(vec![result("AP")])));
        assert!(search.results().is_empty());
        assert!(search.is_loading());

        let second = search.poll(t0 + ms(700)).unwrap();
        assert!(second.seq > first.seq);
        assert!(search.complete(second.seq, Ok(vec![result("AAPL")])));
        assert_eq!(search.results()[0].symbol, "AAPL");
    }

    #[test]
    fn test_keyboard_wraps_and_enter_selects() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();
        let request = typed_and_due(&mut search, t0);
        search.complete(request.seq, Ok(vec![result("A"), result("B"), result("C")]));

        search.handle_key(KeyCode::Up);
        assert_eq!(search.highlighted(), Some(2));
        search.handle_key(KeyCode::Down);
        assert_eq!(search.highlighted(), Some(0));
        search.handle_key(KeyCode::Down);

        let outcome = search.handle_key(KeyCode::Enter);
        assert_eq!(outcome, KeyOutcome::Selected(result("B")));
        assert_eq!(search.query(), "");
        assert!(!search.is_open());
        assert!(search.results().is_empty());
    }

    #[test]
    fn test_escape_closes_without_selecting() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();
        let request = typed_and_due(&mut search, t0);
        search.complete(request.seq, Ok(vec![result("A")]));

        assert_eq!(search.handle_key(KeyCode::Esc), KeyOutcome::Consumed);
        assert!(!search.is_open());
        assert_eq!(search.query(), "ap");
        assert_eq!(search.handle_key(KeyCode::Enter), KeyOutcome::Ignored);
    }

    #[test]
    fn test_selection_invalidates_in_flight_lookup() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();
        let first = typed_and_due(&mut search, t0);
        search.complete(first.seq, Ok(vec![result("A")]));

        search.set_query("abc", t0 + ms(400));
        let second = search.poll(t0 + ms(700)).unwrap();

        // Le dropdown est resté ouvert sur les anciens résultats
        assert_eq!(search.select(0), Some(result("A")));
        assert!(!search.complete(second.seq, Ok(vec![result("B")])));
        assert!(search.results().is_empty());
        assert!(!search.is_loading());
    }

    #[test]
    fn test_hover_and_outside_click() {
        let t0 = Instant::now();
        let mut search = DebouncedSearchController::default();
        let request = typed_and_due(&mut search, t0);
        search.complete(request.seq, Ok(vec![result("A"), result("B")]));

        search.hover(1);
        assert_eq!(search.highlighted(), Some(1));

        search.outside_click();
        assert!(!search.is_open());
        assert_eq!(search.select(0), None);
    }
}
