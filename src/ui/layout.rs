// ============================================================================
// Layout : géométrie de l'écran
// ============================================================================
// Calcul pur des zones de l'interface, utilisé à la fois :
// - par le rendu (où dessiner)
// - par la souris (qu'est-ce qui a été cliqué)
//
// CONCEPT : Une seule source de vérité
// - Le rendu et le hit-testing appellent les mêmes fonctions
// - Un clic tombe toujours sur ce qui est affiché
//
//   ┌ header ───────────────────────────────────────────────┐
//   │ Category     │ chart (intervalles · ☆ Save)           │
//   │ Commodity    │                                        │
//   │ Search       ├────────────────────────────────────────┤
//   │ Watchlist    │ news (onglets + liste)                 │
//   └ footer ───────────────────────────────────────────────┘
// ============================================================================

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::models::Interval;

/// Largeur de la colonne de gauche
pub const SIDEBAR_WIDTH: u16 = 36;

/// Nombre maximal de lignes visibles dans un dropdown
pub const DROPDOWN_MAX_ROWS: usize = 8;

/// Hauteur d'une entrée de watchlist (libellé + sous-titre)
pub const WATCHLIST_ROW_HEIGHT: u16 = 2;

/// Hauteur d'un article (titre, source, URL)
pub const NEWS_ITEM_HEIGHT: u16 = 3;

/// Largeur du bouton Save / Saved
pub const SAVE_BUTTON_WIDTH: u16 = 9;

/// Libellés des onglets de news, dans l'ordre d'affichage
pub const NEWS_TAB_LABELS: [&str; 2] = ["Commodity News", "Market News"];

/// Zones principales de l'écran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub screen: Rect,
    pub header: Rect,
    pub category: Rect,
    pub commodity: Rect,
    pub search: Rect,
    pub watchlist: Rect,
    pub chart: Rect,
    pub news: Rect,
    pub footer: Rect,
}

impl DashboardLayout {
    /// Découpe l'écran
    pub fn new(screen: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Contenu
                Constraint::Length(1), // Footer
            ])
            .split(screen);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(rows[1]);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Catégorie
                Constraint::Length(3), // Matière première
                Constraint::Length(3), // Recherche
                Constraint::Min(0),    // Watchlist
            ])
            .split(columns[0]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        Self {
            screen,
            header: rows[0],
            category: sidebar[0],
            commodity: sidebar[1],
            search: sidebar[2],
            watchlist: sidebar[3],
            chart: main[0],
            news: main[1],
            footer: rows[2],
        }
    }

    /// Boutons du sélecteur de période, sur la première ligne du graphique
    pub fn interval_buttons(&self) -> Vec<(Interval, Rect)> {
        let inner = inner(self.chart);
        let mut x = inner.x;

        Interval::all()
            .into_iter()
            .filter_map(|interval| {
                let width = interval.label().len() as u16 + 2;
                if x + width > inner.x + inner.width.saturating_sub(SAVE_BUTTON_WIDTH) {
                    return None;
                }
                let rect = Rect::new(x, inner.y, width, inner.height.min(1));
                x += width + 1;
                Some((interval, rect))
            })
            .collect()
    }

    /// Bouton Save, aligné à droite sur la première ligne du graphique
    pub fn save_button(&self) -> Rect {
        let inner = inner(self.chart);
        let width = SAVE_BUTTON_WIDTH.min(inner.width);
        Rect::new(inner.x + inner.width - width, inner.y, width, inner.height.min(1))
    }

    /// Zone du tracé, sous la ligne de boutons et le sous-titre
    pub fn chart_plot(&self) -> Rect {
        below(inner(self.chart), 2)
    }

    /// Onglets de news, dans l'ordre de NEWS_TAB_LABELS
    pub fn news_tabs(&self) -> [Rect; 2] {
        let inner = inner(self.news);
        let first = NEWS_TAB_LABELS[0].len() as u16 + 2;
        let second = NEWS_TAB_LABELS[1].len() as u16 + 2;
        let height = inner.height.min(1);

        [
            Rect::new(inner.x, inner.y, first.min(inner.width), height),
            Rect::new(
                inner.x + first + 1,
                inner.y,
                second.min(inner.width.saturating_sub(first + 1)),
                height,
            ),
        ]
    }

    /// Corps de l'onglet de news, sous la ligne d'onglets
    pub fn news_body(&self) -> Rect {
        below(inner(self.news), 2)
    }

    /// Ligne d'en-tête (bordure haute) du panneau watchlist
    pub fn watchlist_header(&self) -> Rect {
        Rect::new(self.watchlist.x, self.watchlist.y, self.watchlist.width, self.watchlist.height.min(1))
    }

    /// Entrées de watchlist visibles et leur zone
    pub fn watchlist_rows(&self, len: usize, cursor: usize) -> Vec<(usize, Rect)> {
        let inner = inner(self.watchlist);
        let visible = (inner.height / WATCHLIST_ROW_HEIGHT) as usize;
        let first = scroll_offset(Some(cursor), visible);

        (first..len.min(first + visible))
            .enumerate()
            .map(|(slot, index)| {
                let y = inner.y + slot as u16 * WATCHLIST_ROW_HEIGHT;
                (index, Rect::new(inner.x, y, inner.width, WATCHLIST_ROW_HEIGHT))
            })
            .collect()
    }
}

/// Bouton "×" de suppression, en fin de première ligne d'une entrée
pub fn remove_button(row: Rect) -> Rect {
    Rect::new(row.x + row.width.saturating_sub(2), row.y, row.width.min(1), row.height.min(1))
}

/// Zone d'un dropdown ouvert sous sa boîte d'ancrage
///
/// Hauteur = options visibles + bordures, tronquée au bas de l'écran.
pub fn dropdown_area(anchor: Rect, rows: usize, screen: Rect) -> Rect {
    let y = anchor.y + anchor.height;
    let wanted = rows.clamp(1, DROPDOWN_MAX_ROWS) as u16 + 2;
    let available = (screen.y + screen.height).saturating_sub(y);
    Rect::new(anchor.x, y, anchor.width, wanted.min(available))
}

/// Nombre d'options visibles dans un dropdown
pub fn dropdown_visible_rows(area: Rect) -> usize {
    inner(area).height as usize
}

/// Index de l'option sous la souris dans un dropdown défilé à partir de `first`
pub fn dropdown_option_at(
    area: Rect,
    len: usize,
    first: usize,
    column: u16,
    row: u16,
) -> Option<usize> {
    let inner = inner(area);
    if !contains(inner, column, row) {
        return None;
    }

    let index = first + (row - inner.y) as usize;
    (index < len).then_some(index)
}

/// Premier élément visible pour garder la sélection à l'écran
fn scroll_offset(selected: Option<usize>, visible: usize) -> usize {
    match selected {
        Some(index) if visible > 0 => index.saturating_sub(visible - 1),
        _ => 0,
    }
}

/// Test d'appartenance d'une cellule à une zone
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Intérieur d'une zone encadrée (bordure d'une cellule)
pub fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// Zone privée de ses `lines` premières lignes
fn below(area: Rect, lines: u16) -> Rect {
    let lines = lines.min(area.height);
    Rect::new(area.x, area.y + lines, area.width, area.height - lines)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn test_sidebar_and_main_split() {
        let layout = DashboardLayout::new(screen());

        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.y, 39);
        assert_eq!(layout.category, Rect::new(0, 1, SIDEBAR_WIDTH, 3));
        assert_eq!(layout.commodity.y, 4);
        assert_eq!(layout.search.y, 7);
        assert_eq!(layout.watchlist.y, 10);
        assert_eq!(layout.chart.x, SIDEBAR_WIDTH);
        assert_eq!(layout.news.y, layout.chart.y + layout.chart.height);
    }

    #[test]
    fn test_interval_buttons_do_not_overlap_save() {
        let layout = DashboardLayout::new(screen());
        let buttons = layout.interval_buttons();
        let save = layout.save_button();

        assert_eq!(buttons.len(), 9);
        assert_eq!(buttons[0].0, Interval::H1);
        for (_, rect) in &buttons {
            assert!(rect.x + rect.width <= save.x);
        }
    }

    #[test]
    fn test_dropdown_is_truncated_at_screen_bottom() {
        let anchor = Rect::new(0, 30, 36, 3);
        let area = dropdown_area(anchor, 20, screen());

        assert_eq!(area.y, 33);
        assert_eq!(area.height, 7);
        assert_eq!(dropdown_visible_rows(area), 5);
    }

    #[test]
    fn test_dropdown_option_hit_testing() {
        let area = dropdown_area(Rect::new(0, 1, 36, 3), 5, screen());

        // Première option : juste sous la bordure haute
        assert_eq!(dropdown_option_at(area, 5, 0, 2, 5), Some(0));
        assert_eq!(dropdown_option_at(area, 5, 0, 2, 9), Some(4));
        // Bordure
        assert_eq!(dropdown_option_at(area, 5, 0, 0, 5), None);
        assert_eq!(dropdown_option_at(area, 5, 0, 2, 4), None);
    }

    #[test]
    fn test_scrolled_dropdown_hit_testing() {
        let area = dropdown_area(Rect::new(0, 1, 36, 3), 20, screen());

        // 8 lignes visibles défilées de 3 : la première ligne montre l'option 3
        assert_eq!(dropdown_option_at(area, 20, 3, 2, 5), Some(3));
        assert_eq!(dropdown_option_at(area, 20, 3, 2, 12), Some(10));
        // Au-delà de la dernière option
        assert_eq!(dropdown_option_at(area, 6, 3, 2, 9), None);
    }

    #[test]
    fn test_watchlist_rows_follow_cursor() {
        let layout = DashboardLayout::new(screen());
        let visible = (inner(layout.watchlist).height / WATCHLIST_ROW_HEIGHT) as usize;

        let rows = layout.watchlist_rows(3, 0);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].1.y, layout.watchlist.y + 1 + WATCHLIST_ROW_HEIGHT);

        let rows = layout.watchlist_rows(50, 40);
        assert_eq!(rows.len(), visible);
        assert_eq!(rows.last().map(|(i, _)| *i), Some(40));
    }

    #[test]
    fn test_news_tabs_are_side_by_side() {
        let layout = DashboardLayout::new(screen());
        let [first, second] = layout.news_tabs();

        assert_eq!(first.y, second.y);
        assert_eq!(second.x, first.x + first.width + 1);
    }
}
