// ============================================================================
// Chart - Panneau graphique
// ============================================================================
// Affiche la série de prix de l'instrument courant :
// - Ligne 1 : sélecteur de période (1H ... 10Y) et bouton Save
// - Ligne 2 : symbole · place · devise, variation, état de chargement
// - Reste   : graphique ligne des clôtures
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de données à afficher
// 3. Axis : configuration des axes X et Y
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
    Frame,
};

use crate::app::{App, Focus, Remote};
use crate::models::OHLCData;
use crate::ui::layout::{self, DashboardLayout};

/// Dessine le panneau graphique
pub fn render_chart(frame: &mut Frame, app: &App, layout: &DashboardLayout) {
    let area = layout.chart;
    let context = app.context();

    let border = if app.focus == Focus::Chart {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let embed = app.chart_embed(area.width, area.height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" 📈 {} ", context.display_name))
        .title(
            Title::from(Span::styled(
                format!(" TradingView {} ", embed.symbol),
                Style::default().fg(Color::DarkGray),
            ))
            .position(Position::Bottom)
            .alignment(Alignment::Right),
        );
    frame.render_widget(block, area);

    render_toolbar(frame, app, layout);
    render_subtitle(frame, app, layout::inner(area));

    let plot = layout.chart_plot();
    match &app.chart {
        Remote::Loaded(data) => render_graph(frame, data, plot),
        Remote::Loading => render_message(frame, plot, "Loading...", Color::Gray),
        Remote::Failed(message) => render_message(frame, plot, message, Color::Red),
    }
}

// ============================================================================
// Barre d'outils : périodes + Save
// ============================================================================

fn render_toolbar(frame: &mut Frame, app: &App, layout: &DashboardLayout) {
    for (interval, rect) in layout.interval_buttons() {
        let style = if interval == app.interval {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        frame.render_widget(
            Paragraph::new(format!(" {} ", interval.label())).style(style),
            rect,
        );
    }

    let (label, style) = if app.is_saved() {
        (
            " ★ Saved ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        (" ☆ Save ", Style::default().fg(Color::Gray))
    };

    frame.render_widget(
        Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Right),
        layout.save_button(),
    );
}

// ============================================================================
// Sous-titre
// ============================================================================

/// "AAPL · NASDAQ · USD   ▲ +3.21%" ou l'état de chargement
fn render_subtitle(frame: &mut Frame, app: &App, inner: Rect) {
    if inner.height < 2 {
        return;
    }
    let area = Rect::new(inner.x, inner.y + 1, inner.width, 1);

    let mut spans = Vec::new();
    match &app.chart {
        Remote::Loaded(data) => {
            spans.push(Span::styled(
                app.context().chart_subtitle(&data.currency),
                Style::default().fg(Color::Gray),
            ));

            if let (Some(last), Some(change)) = (data.last(), data.total_change_percent()) {
                let color = if change >= 0.0 { Color::Green } else { Color::Red };
                let arrow = if change >= 0.0 { "▲" } else { "▼" };
                spans.push(Span::raw("   "));
                spans.push(Span::styled(
                    format!("{:.2}", last.close),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    format!("  {} {:+.2}%", arrow, change),
                    Style::default().fg(color),
                ));
            }
        }
        Remote::Loading => spans.push(Span::styled(
            app.context().chart_subtitle("USD"),
            Style::default().fg(Color::Gray),
        )),
        Remote::Failed(_) => spans.push(Span::styled(
            app.context().symbol.clone(),
            Style::default().fg(Color::Gray),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ============================================================================
// Graphique principal
// ============================================================================

/// Dessine le graphique ligne des clôtures
fn render_graph(frame: &mut Frame, data: &OHLCData, area: Rect) {
    let points: Vec<(f64, f64)> = data
        .candles
        .iter()
        .enumerate()
        .map(|(i, candle)| (i as f64, candle.close))
        .collect();

    let Some((min_price, max_price)) = data.close_bounds() else {
        render_message(frame, area, "No data", Color::Gray);
        return;
    };

    // Marge de 5% pour que le graphique respire
    let margin = ((max_price - min_price) * 0.05).max(max_price * 0.001);
    let y_min = (min_price - margin).max(0.0);
    let y_max = max_price + margin;

    let color = match data.total_change_percent() {
        Some(change) if change < 0.0 => Color::Red,
        _ => Color::Green,
    };

    let datasets = vec![Dataset::default()
        .name(data.symbol.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    let date_format = if data.interval.is_intraday() {
        "%d/%m %H:%M"
    } else {
        "%d/%m/%Y"
    };
    let first_label = data
        .candles
        .first()
        .map(|c| c.timestamp.format(date_format).to_string())
        .unwrap_or_default();
    let last_label = data
        .candles
        .last()
        .map(|c| c.timestamp.format(date_format).to_string())
        .unwrap_or_default();

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, (points.len().max(2) - 1) as f64])
        .labels(vec![Span::raw(first_label), Span::raw(last_label)]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.2}", y_min)),
            Span::raw(format!("{:.2}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.2}", y_max)),
        ]);

    let chart = Chart::new(datasets).x_axis(x_axis).y_axis(y_axis);
    frame.render_widget(chart, area);
}

/// Message centré à la place du graphique
fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(color))),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}
