// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'écran unique de l'application :
//
//   ┌ header ───────────────────────────────────────────────┐
//   │ Catégorie      │ Graphique (périodes, Save, tracé)    │
//   │ Matière        │                                      │
//   │ Recherche      ├──────────────────────────────────────┤
//   │ Watchlist      │ News (onglets)                       │
//   └ footer ───────────────────────────────────────────────┘
//
// Les dropdowns ouverts sont dessinés en dernier, par-dessus le reste.
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Clear : efface une zone avant de dessiner un overlay
// 3. DashboardLayout : les mêmes zones servent au rendu et à la souris
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::models::Mode;
use crate::ui::chart::render_chart;
use crate::ui::layout::{self, remove_button, DashboardLayout};
use crate::ui::news::render_news;

/// Longueur maximale du nom affiché dans la watchlist
const WATCHLIST_NAME_MAX_CHARS: usize = 20;

/// Dessine l'interface complète
///
/// CONCEPT RUST : &App
/// - Le rendu lit l'état, il ne le modifie jamais
/// - Toutes les zones viennent de DashboardLayout::new(frame.size())
pub fn render(frame: &mut Frame, app: &App) {
    let layout = DashboardLayout::new(frame.size());

    render_header(frame, app, layout.header);

    render_select_box(
        frame,
        layout.category,
        " Category ",
        app.dashboard.category().name,
        app.focus == Focus::Category,
    );
    render_select_box(
        frame,
        layout.commodity,
        " Commodity ",
        app.dashboard.commodity().name,
        app.focus == Focus::Commodity,
    );
    render_search_box(frame, app, layout.search);
    render_watchlist(frame, app, &layout);

    render_chart(frame, app, &layout);
    render_news(frame, app, &layout);

    render_footer(frame, app, layout.footer);

    // Overlays
    render_dropdowns(frame, app, &layout);
}

// ============================================================================
// Header / Footer
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let context = app.context();
    let line = Line::from(vec![
        Span::styled(
            " LazyMarket ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} ({})", context.display_name, context.symbol),
            Style::default().fg(Color::Cyan),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let warning = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let key = Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::SLOW_BLINK);

    let line = if app.confirm_delete {
        let symbol = app
            .selected_watchlist_entry()
            .map(|entry| entry.symbol.as_str())
            .unwrap_or("?");

        Line::from(vec![
            Span::styled("⚠  Press ", warning),
            Span::styled("[d]", key),
            Span::styled(
                format!(" again to remove {}, any other key to cancel ⚠", symbol),
                warning,
            ),
        ])
    } else if app.confirm_quit {
        Line::from(vec![
            Span::styled("⚠  Press ", warning),
            Span::styled("[q]", key),
            Span::styled(" again to quit, any other key to cancel ⚠", warning),
        ])
    } else {
        let shortcut = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled("[Tab]", shortcut),
            Span::raw(" Focus  "),
            Span::styled("[/]", shortcut),
            Span::raw(" Search  "),
            Span::styled("[s]", shortcut),
            Span::raw(" Save  "),
            Span::styled("[ ]", shortcut),
            Span::raw(" Period  "),
            Span::styled("[n]", shortcut),
            Span::raw(" News tab  "),
            Span::styled("[w]", shortcut),
            Span::raw(" Watchlist  "),
            Span::styled("[d]", shortcut),
            Span::raw(" Remove  "),
            Span::styled("[q]", shortcut),
            Span::raw(" Quit"),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

// ============================================================================
// Barre latérale
// ============================================================================

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

/// Boîte fermée d'un dropdown : valeur courante + flèche
fn render_select_box(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title(title);

    let line = Line::from(vec![
        Span::styled(value.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" ▾", Style::default().fg(Color::Gray)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_search_box(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title(" 🔍 Search stocks ");

    let line = if app.search.query().is_empty() && !focused {
        Line::from(Span::styled(
            "Type at least 2 characters to search for stocks.",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(app.search.query().to_string())];
        if focused {
            spans.push(Span::styled(
                "█",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_watchlist(frame: &mut Frame, app: &App, layout: &DashboardLayout) {
    let store = &app.watchlist;
    let arrow = if store.is_expanded() { "▼" } else { "▶" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(app.focus == Focus::Watchlist))
        .title(format!(" ⭐ Watchlist ({}) {} ", store.len(), arrow));
    frame.render_widget(block, layout.watchlist);

    if !store.is_expanded() {
        return;
    }

    let inner = layout::inner(layout.watchlist);
    if store.is_loading() {
        frame.render_widget(
            Paragraph::new("Loading watchlist...").style(Style::default().fg(Color::Gray)),
            inner,
        );
        return;
    }

    if store.is_empty() {
        let text = vec![
            Line::from(Span::styled("No saved instruments.", Style::default().fg(Color::Gray))),
            Line::from(Span::styled(
                "Press [s] on a chart to save it.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(text), inner);
        return;
    }

    let current = &app.context().symbol;
    for (index, row) in layout.watchlist_rows(store.len(), app.watchlist_cursor) {
        let Some(entry) = store.get(index) else {
            continue;
        };

        let mut style = if entry.symbol == *current {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        if app.focus == Focus::Watchlist && index == app.watchlist_cursor {
            style = style.add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED);
        }

        let text = vec![
            Line::from(Span::styled(entry.display(WATCHLIST_NAME_MAX_CHARS), style)),
            Line::from(Span::styled(entry.subtitle(), Style::default().fg(Color::DarkGray))),
        ];
        frame.render_widget(Paragraph::new(text), row);

        frame.render_widget(
            Paragraph::new("×").style(Style::default().fg(Color::Red)),
            remove_button(row),
        );
    }
}

// ============================================================================
// Overlays : dropdowns ouverts
// ============================================================================

fn render_dropdowns(frame: &mut Frame, app: &App, layout: &DashboardLayout) {
    let screen = layout.screen;

    if app.category_select.is_open() {
        let names: Vec<String> = app
            .category_select
            .options()
            .iter()
            .map(|category| category.name.to_string())
            .collect();
        let selected = app
            .category_select
            .options()
            .iter()
            .position(|category| category.name == app.dashboard.category().name);
        let area = layout::dropdown_area(layout.category, names.len(), screen);
        render_dropdown(
            frame,
            area,
            &names,
            selected,
            app.category_select.highlighted(),
            app.category_select.scroll(),
        );
    }

    if app.commodity_select.is_open() {
        let names: Vec<String> = app
            .commodity_select
            .options()
            .iter()
            .map(|instrument| instrument.name.to_string())
            .collect();
        // En mode action, aucune matière première n'est la valeur courante
        let selected = if app.dashboard.mode() == Mode::Commodity {
            app.commodity_select
                .options()
                .iter()
                .position(|instrument| instrument.symbol == app.dashboard.commodity().symbol)
        } else {
            None
        };
        let area = layout::dropdown_area(layout.commodity, names.len(), screen);
        render_dropdown(
            frame,
            area,
            &names,
            selected,
            app.commodity_select.highlighted(),
            app.commodity_select.scroll(),
        );
    }

    if app.search.is_open() {
        let labels: Vec<String> = app
            .search
            .results()
            .iter()
            .map(|result| format!("{}  {} · {}", result.symbol, result.name, result.exchange))
            .collect();
        let area = layout::dropdown_area(layout.search, labels.len(), screen);
        render_dropdown(frame, area, &labels, None, app.search.highlighted(), app.search.scroll());
    } else if app.focus == Focus::Search {
        render_search_status(frame, app, layout);
    }
}

/// Liste d'options sous sa boîte, à partir de la première option visible
///
/// Valeur courante et surbrillance ont des styles indépendants qui se cumulent.
fn render_dropdown(
    frame: &mut Frame,
    area: Rect,
    options: &[String],
    selected: Option<usize>,
    highlighted: Option<usize>,
    first: usize,
) {
    let visible = layout::dropdown_visible_rows(area);

    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(index, label)| {
            let mut style = Style::default();
            let mut text = format!("  {}", label);
            if Some(index) == selected {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                text = format!("✓ {}", label);
            }
            if Some(index) == highlighted {
                style = style.bg(Color::DarkGray);
            }
            ListItem::new(text).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    frame.render_widget(Clear, area);
    frame.render_widget(List::new(items).block(block), area);
}

/// État de la recherche quand aucune liste n'est ouverte
fn render_search_status(frame: &mut Frame, app: &App, layout: &DashboardLayout) {
    let search = &app.search;

    let (message, color) = if search.is_loading() {
        ("Searching...".to_string(), Color::Gray)
    } else if let Some(error) = search.error() {
        (error.to_string(), Color::Red)
    } else if search.is_empty_result() {
        (format!("No stocks found for \"{}\"", search.query()), Color::Gray)
    } else if !search.has_valid_query() {
        ("Type at least 2 characters".to_string(), Color::DarkGray)
    } else {
        return;
    };

    let area = layout::dropdown_area(layout.search, 1, layout.screen);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Span::styled(message, Style::default().fg(color)))
            .block(block)
            .alignment(Alignment::Left),
        area,
    );
}
