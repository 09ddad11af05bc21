// ============================================================================
// SelectableList : dropdown à sélection unique
// ============================================================================
// Machine à états Closed / Open, pilotée au clavier et à la souris.
//
// Transitions :
//   Closed --(clic, Enter, Espace, ↓)--> Open
//   Open   --(Échap, clic extérieur)--> Closed   (surbrillance remise à None)
//   Open   --(Enter avec surbrillance)--> Closed, émet l'option
//   Open   --(clic sur une option)--> Closed, émet l'option
//   Open   --(survol)--> Open, déplace la surbrillance
//   Open   --(↑ / ↓)--> Open, déplace la surbrillance (bornée ou cyclique)
//
// Invariant : `highlighted` est None ou un index valide de `options`.
//
// Défilement : `scroll` est le premier index visible. Il ne bouge que
// pour ramener la surbrillance à l'écran (reveal) ; un survol ne le
// change jamais, l'option sous le pointeur reste sous le pointeur.
//
// La valeur sélectionnée n'est pas stockée ici : elle appartient à
// l'appelant (DashboardController), le rendu la style séparément.
// ============================================================================

use crossterm::event::KeyCode;

/// Comportement des flèches en bout de liste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Reste dans [0, n-1] (dropdowns statiques)
    Clamp,
    /// Boucle modulo n (dropdown de recherche)
    Wrap,
}

/// Dropdown générique sur des options T
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    options: Vec<T>,
    is_open: bool,
    highlighted: Option<usize>,
    scroll: usize,
    navigation: Navigation,
}

impl<T: Clone> SelectableList<T> {
    /// Crée un dropdown fermé
    pub fn new(options: Vec<T>, navigation: Navigation) -> Self {
        Self {
            options,
            is_open: false,
            highlighted: None,
            scroll: 0,
            navigation,
        }
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Premier index visible
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Défile juste assez pour que la surbrillance tienne dans `visible` lignes
    pub fn reveal(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }

        self.scroll = self.scroll.min(self.options.len().saturating_sub(visible));
        if let Some(i) = self.highlighted {
            if i < self.scroll {
                self.scroll = i;
            } else if i >= self.scroll + visible {
                self.scroll = i + 1 - visible;
            }
        }
    }

    /// Remplace les options ; la surbrillance est remise à None
    pub fn set_options(&mut self, options: Vec<T>) {
        self.options = options;
        self.highlighted = None;
        self.scroll = 0;
    }

    /// Vide les options et ferme
    pub fn clear(&mut self) {
        self.options.clear();
        self.close();
    }

    /// Ouvre le dropdown (sans surbrillance)
    pub fn open(&mut self) {
        if !self.is_open {
            self.is_open = true;
            self.highlighted = None;
            self.scroll = 0;
        }
    }

    /// Ferme le dropdown
    pub fn close(&mut self) {
        self.is_open = false;
        self.highlighted = None;
        self.scroll = 0;
    }

    /// Clic sur l'en-tête : ouvre ou ferme
    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Positionne la surbrillance (ignoré si l'index est invalide)
    pub fn set_highlighted(&mut self, index: Option<usize>) {
        match index {
            Some(i) if i < self.options.len() => self.highlighted = Some(i),
            Some(_) => {}
            None => self.highlighted = None,
        }
    }

    /// Flèche bas
    pub fn move_down(&mut self) {
        let n = self.options.len();
        if n == 0 {
            return;
        }

        self.highlighted = Some(match (self.highlighted, self.navigation) {
            (None, _) => 0,
            (Some(i), Navigation::Clamp) => (i + 1).min(n - 1),
            (Some(i), Navigation::Wrap) => (i + 1) % n,
        });
    }

    /// Flèche haut
    pub fn move_up(&mut self) {
        let n = self.options.len();
        if n == 0 {
            return;
        }

        self.highlighted = Some(match (self.highlighted, self.navigation) {
            (None, Navigation::Clamp) => 0,
            (None, Navigation::Wrap) => n - 1,
            (Some(i), Navigation::Clamp) => i.saturating_sub(1),
            (Some(i), Navigation::Wrap) => (i + n - 1) % n,
        });
    }

    /// Survol d'une option : déplace la surbrillance sans fermer
    pub fn hover(&mut self, index: usize) {
        if self.is_open {
            self.set_highlighted(Some(index));
        }
    }

    /// Clic sur une option : émet sa valeur et ferme, quelle que soit la surbrillance
    pub fn click_option(&mut self, index: usize) -> Option<T> {
        if !self.is_open {
            return None;
        }

        let value = self.options.get(index).cloned()?;
        self.close();
        Some(value)
    }

    /// Interaction souris hors du dropdown
    pub fn outside_click(&mut self) {
        if self.is_open {
            self.close();
        }
    }

    /// Émet l'option en surbrillance et ferme
    pub fn select_highlighted(&mut self) -> Option<T> {
        let value = self.highlighted.and_then(|i| self.options.get(i)).cloned()?;
        self.close();
        Some(value)
    }

    /// Traite une touche ; retourne l'option émise s'il y en a une
    ///
    /// Retourne aussi si la touche a été consommée, pour que l'appelant
    /// sache s'il doit la traiter lui-même (ex: Échap quand tout est fermé).
    pub fn handle_key(&mut self, code: KeyCode) -> KeyOutcome<T> {
        if !self.is_open {
            return match code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    self.open();
                    KeyOutcome::Consumed
                }
                _ => KeyOutcome::Ignored,
            };
        }

        match code {
            KeyCode::Esc => {
                self.close();
                KeyOutcome::Consumed
            }
            KeyCode::Down => {
                self.move_down();
                KeyOutcome::Consumed
            }
            KeyCode::Up => {
                self.move_up();
                KeyOutcome::Consumed
            }
            KeyCode::Enter => match self.select_highlighted() {
                Some(value) => KeyOutcome::Selected(value),
                None => KeyOutcome::Consumed,
            },
            _ => KeyOutcome::Ignored,
        }
    }
}

/// Résultat d'une touche envoyée au dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome<T> {
    /// Une option a été choisie (le dropdown est fermé)
    Selected(T),
    /// La touche a modifié l'état du dropdown
    Consumed,
    /// Touche sans effet
    Ignored,
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize, navigation: Navigation) -> SelectableList<usize> {
        SelectableList::new((0..n).collect(), navigation)
    }

    #[test]
    fn test_activation_keys_open() {
        for code in [KeyCode::Enter, KeyCode::Char(' '), KeyCode::Down] {
            let mut dropdown = list(3, Navigation::Clamp);
            assert_eq!(dropdown.handle_key(code), KeyOutcome::Consumed);
            assert!(dropdown.is_open());
            assert_eq!(dropdown.highlighted(), None);
        }

        let mut dropdown = list(3, Navigation::Clamp);
        assert_eq!(dropdown.handle_key(KeyCode::Up), KeyOutcome::Ignored);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_clamped_navigation_stays_in_bounds() {
        let mut dropdown = list(3, Navigation::Clamp);
        dropdown.open();

        for _ in 0..10 {
            dropdown.move_down();
            assert!(dropdown.highlighted().unwrap() < 3);
        }
        assert_eq!(dropdown.highlighted(), Some(2));

        for _ in 0..10 {
            dropdown.move_up();
        }
        assert_eq!(dropdown.highlighted(), Some(0));
    }

    #[test]
    fn test_wrapping_navigation() {
        let mut dropdown = list(3, Navigation::Wrap);
        dropdown.open();
        dropdown.set_highlighted(Some(0));

        dropdown.move_up();
        assert_eq!(dropdown.highlighted(), Some(2));
        dropdown.move_down();
        assert_eq!(dropdown.highlighted(), Some(0));
    }

    #[test]
    fn test_enter_emits_highlighted_and_closes() {
        let mut dropdown = list(4, Navigation::Clamp);
        dropdown.open();
        dropdown.move_down();
        dropdown.move_down();

        assert_eq!(dropdown.handle_key(KeyCode::Enter), KeyOutcome::Selected(1));
        assert!(!dropdown.is_open());
        assert_eq!(dropdown.highlighted(), None);
    }

    #[test]
    fn test_enter_without_highlight_keeps_open() {
        let mut dropdown = list(4, Navigation::Clamp);
        dropdown.open();

        assert_eq!(dropdown.handle_key(KeyCode::Enter), KeyOutcome::Consumed);
        assert!(dropdown.is_open());
    }

    #[test]
    fn test_escape_resets_highlight() {
        let mut dropdown = list(4, Navigation::Clamp);
        dropdown.open();
        dropdown.move_down();

        dropdown.handle_key(KeyCode::Esc);
        assert!(!dropdown.is_open());
        assert_eq!(dropdown.highlighted(), None);
    }

    #[test]
    fn test_pointer_interactions() {
        let mut dropdown = list(4, Navigation::Clamp);
        dropdown.toggle();

        dropdown.hover(3);
        assert_eq!(dropdown.highlighted(), Some(3));
        assert!(dropdown.is_open());

        // Le clic émet l'option cliquée, pas celle en surbrillance
        assert_eq!(dropdown.click_option(1), Some(1));
        assert!(!dropdown.is_open());

        dropdown.toggle();
        dropdown.outside_click();
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_hover_out_of_range_is_ignored() {
        let mut dropdown = list(2, Navigation::Clamp);
        dropdown.open();
        dropdown.hover(5);
        assert_eq!(dropdown.highlighted(), None);
    }

    #[test]
    fn test_new_options_reset_highlight() {
        let mut dropdown = list(4, Navigation::Clamp);
        dropdown.open();
        dropdown.move_down();

        dropdown.set_options(vec![7, 8]);
        assert_eq!(dropdown.highlighted(), None);
    }

    #[test]
    fn test_reveal_follows_keyboard_only() {
        let mut list = list(6, Navigation::Clamp);
        list.open();
        for _ in 0..5 {
            list.move_down();
            list.reveal(2);
        }
        assert_eq!(list.highlighted(), Some(4));
        assert_eq!(list.scroll(), 3);

        // Survol de la première ligne visible : la liste ne bouge pas
        list.hover(3);
        list.reveal(2);
        assert_eq!(list.highlighted(), Some(3));
        assert_eq!(list.scroll(), 3);

        list.move_up();
        list.reveal(2);
        assert_eq!(list.scroll(), 2);
    }

    #[test]
    fn test_wrapping_back_to_top_scrolls_up() {
        let mut list = list(6, Navigation::Wrap);
        list.open();
        list.set_highlighted(Some(5));
        list.reveal(2);
        assert_eq!(list.scroll(), 4);

        list.move_down();
        list.reveal(2);
        assert_eq!(list.highlighted(), Some(0));
        assert_eq!(list.scroll(), 0);

        list.close();
        assert_eq!(list.scroll(), 0);
    }
}
