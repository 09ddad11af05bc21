// ============================================================================
// API Client : GDELT (news)
// ============================================================================
// Recherche d'articles en anglais par requête booléenne
//
// Format de la requête :
//   query=(terme1 OR terme2 ...)   ← GDELT exige les parenthèses autour des OR
//   mode=ArtList, format=JSON, maxrecords=30 par défaut (Config)
//
// GDELT répond parfois en texte brut (ex: requête trop courte) : on lit
// le corps en texte puis on parse, pour distinguer "JSON invalide".
// ============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::models::NewsArticle;

const DOC_URL: &str = "https://api.gdeltproject.org/api/v2/doc/doc";

#[derive(Debug, Deserialize)]
struct DocResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    url: Option<String>,
    domain: Option<String>,
    seendate: Option<String>,
}

/// Récupère au plus `max_records` articles pour une requête de mots-clés
#[instrument(skip(client))]
pub async fn fetch_news(
    client: &reqwest::Client,
    keywords: &str,
    max_records: usize,
) -> Result<Vec<NewsArticle>> {
    let query = format!("({})", keywords);
    let max_records = max_records.to_string();

    let response = client
        .get(DOC_URL)
        .query(&[
            ("query", query.as_str()),
            ("sourcelang", "English"),
            ("mode", "ArtList"),
            ("maxrecords", max_records.as_str()),
            ("format", "JSON"),
        ])
        .send()
        .await
        .context("Échec de la requête HTTP vers GDELT")?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("Échec de la lecture de la réponse GDELT")?;

    if !status.is_success() {
        error!(status = %status, body = %preview(&body), "GDELT returned error status");
        anyhow::bail!("GDELT API returned status: {}", status.as_u16());
    }

    debug!(body = %preview(&body), "GDELT raw response");
    let articles = parse_articles(&body)?;
    info!(count = articles.len(), "Fetched news articles");
    Ok(articles)
}

/// Convertit la réponse GDELT en articles, avec valeurs par défaut
fn parse_articles(body: &str) -> Result<Vec<NewsArticle>> {
    let response: DocResponse =
        serde_json::from_str(body).context("Invalid JSON response from GDELT")?;

    Ok(response
        .articles
        .into_iter()
        .map(|article| NewsArticle {
            title: article.title.unwrap_or_else(|| "Untitled".to_string()),
            url: article.url.unwrap_or_else(|| "#".to_string()),
            source: article.domain.unwrap_or_else(|| "Unknown".to_string()),
            published_at: article.seendate,
        })
        .collect())
}

/// Premiers caractères d'un corps de réponse, pour les logs
fn preview(body: &str) -> String {
    body.chars().take(500).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_articles_with_defaults() {
        let body = r#"{"articles":[
            {"url":"https://www.reuters.com/a","title":"Gold climbs","seendate":"20240115T103000Z","domain":"reuters.com","language":"English"},
            {"domain":"example.com"}
        ]}"#;

        let articles = parse_articles(body).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Gold climbs");
        assert_eq!(articles[0].published_at.as_deref(), Some("20240115T103000Z"));

        assert_eq!(articles[1].title, "Untitled");
        assert_eq!(articles[1].url, "#");
        assert_eq!(articles[1].source, "example.com");
        assert_eq!(articles[1].published_at, None);
    }

    #[test]
    fn test_empty_object_means_no_articles() {
        assert!(parse_articles("{}").unwrap().is_empty());
    }

    #[test]
    fn test_plain_text_body_is_an_error() {
        let err = parse_articles("Your search contained a phrase that was too short.").unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_fetch_news_live() {
        let client = crate::api::http_client().unwrap();

        match fetch_news(&client, r#""gold prices" OR "gold market""#, 5).await {
            Ok(articles) => assert!(articles.len() <= 5),
            Err(e) => println!("⚠ Appel GDELT impossible (pas de réseau ?) : {}", e),
        }
    }
}
