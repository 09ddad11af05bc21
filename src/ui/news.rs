// ============================================================================
// News - Panneau d'actualités
// ============================================================================
// Deux onglets :
// - Commodity News : articles GDELT pour les mots-clés courants
// - Market News    : fil TradingView embarqué (descripteur uniquement)
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, NewsTab, Remote};
use crate::models::news::truncate;
use crate::models::NewsArticle;
use crate::ui::layout::{DashboardLayout, NEWS_ITEM_HEIGHT, NEWS_TAB_LABELS};

const TITLE_MAX_CHARS: usize = 120;
const URL_MAX_CHARS: usize = 60;

/// Dessine le panneau de news
pub fn render_news(frame: &mut Frame, app: &App, layout: &DashboardLayout) {
    let border = if app.focus == Focus::News {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" 📰 News ");
    frame.render_widget(block, layout.news);

    render_tabs(frame, app, layout);

    let body = layout.news_body();
    match app.news_tab {
        NewsTab::Commodity => render_articles(frame, app, body),
        NewsTab::Market => render_embed(frame, app, body),
    }
}

fn render_tabs(frame: &mut Frame, app: &App, layout: &DashboardLayout) {
    let tabs = [NewsTab::Commodity, NewsTab::Market];

    for ((tab, label), rect) in tabs.iter().zip(NEWS_TAB_LABELS).zip(layout.news_tabs()) {
        let style = if *tab == app.news_tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        frame.render_widget(Paragraph::new(format!(" {} ", label)).style(style), rect);
    }
}

// ============================================================================
// Onglet Commodity News
// ============================================================================

fn render_articles(frame: &mut Frame, app: &App, area: Rect) {
    let articles = match &app.news {
        Remote::Loading => {
            frame.render_widget(
                Paragraph::new("Loading news...").style(Style::default().fg(Color::Gray)),
                area,
            );
            return;
        }
        Remote::Failed(message) => {
            frame.render_widget(
                Paragraph::new(format!("Error: {}", message))
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true }),
                area,
            );
            return;
        }
        Remote::Loaded(articles) => articles,
    };

    if articles.is_empty() {
        frame.render_widget(
            Paragraph::new("No news articles found.").style(Style::default().fg(Color::Gray)),
            area,
        );
        return;
    }

    let visible = (area.height / NEWS_ITEM_HEIGHT) as usize;
    let lines: Vec<Line> = articles
        .iter()
        .skip(app.news_scroll)
        .take(visible)
        .flat_map(article_lines)
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Trois lignes par article : titre, source + date, lien
fn article_lines(article: &NewsArticle) -> [Line<'static>; 3] {
    let mut meta = vec![Span::styled(
        article.source.clone(),
        Style::default().fg(Color::Cyan),
    )];
    if let Some(published) = &article.published_at {
        meta.push(Span::styled(
            format!(" · {}", published),
            Style::default().fg(Color::DarkGray),
        ));
    }

    [
        Line::from(Span::styled(
            truncate(&article.title, TITLE_MAX_CHARS),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(meta),
        Line::from(Span::styled(
            truncate(&article.url, URL_MAX_CHARS),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        )),
    ]
}

// ============================================================================
// Onglet Market News
// ============================================================================

/// Le fil est rendu par TradingView : on affiche ce qui serait embarqué
fn render_embed(frame: &mut Frame, app: &App, area: Rect) {
    let embed = app.market_news_embed(area.width, area.height);

    let lines = vec![
        Line::from(vec![
            Span::styled("Top Stories · ", Style::default().fg(Color::Gray)),
            Span::styled(
                embed.symbol.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            embed.script_url(),
            Style::default().fg(Color::Blue),
        )),
        Line::from(""),
        Line::from(Span::styled(
            embed.config().to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
