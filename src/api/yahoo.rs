// ============================================================================
// API Client : Yahoo Finance
// ============================================================================
// Deux services :
// - chart  : série de prix d'un symbole (query1 /v8/finance/chart)
// - search : recherche de symboles d'actions (query2 /v1/finance/search)
//
// CONCEPTS RUST :
// 1. async/await : appels réseau exécutés par le worker
// 2. Serde : désérialisation JSON, champs optionnels partout
// 3. Fonctions de parsing pures : testables sans réseau
// ============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::models::{Interval, OHLCData, SearchResult, OHLC};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";

/// Places de cotation US, classées en tête des résultats de recherche
const US_EXCHANGES: [&str; 6] = ["NMS", "NYQ", "ASE", "NASDAQ", "NYSE", "AMEX"];

// ============================================================================
// Structures pour parser la réponse chart
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<Meta>,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Option<Vec<Quote>>,
}

/// Colonnes OHLC ; Yahoo met null pour les périodes sans cotation
#[derive(Debug, Default, Deserialize)]
struct Quote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
}

// ============================================================================
// Structures pour parser la réponse search
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuote {
    symbol: Option<String>,
    quote_type: Option<String>,
    longname: Option<String>,
    shortname: Option<String>,
    exch_disp: Option<String>,
    exchange: Option<String>,
}

// ============================================================================
// Fonctions publiques de l'API
// ============================================================================

/// Récupère la série de prix d'un symbole
///
/// La fenêtre [period1, period2] est calculée depuis `Interval::lookback_days()`.
///
/// # Exemple
/// let data = fetch_price_series(&client, "GC=F", Interval::D1).await?;
#[instrument(skip(client, interval), fields(interval = %interval.label()))]
pub async fn fetch_price_series(
    client: &reqwest::Client,
    symbol: &str,
    interval: Interval,
) -> Result<OHLCData> {
    let period2 = Utc::now();
    let period1 = period2 - Duration::days(interval.lookback_days());

    let url = format!("{}/{}", CHART_URL, symbol);
    debug!(url = %url, yahoo_interval = interval.to_yahoo_string(), "Requesting price series");

    let response = client
        .get(&url)
        .query(&[
            ("interval", interval.to_yahoo_string().to_string()),
            ("period1", period1.timestamp().to_string()),
            ("period2", period2.timestamp().to_string()),
        ])
        .send()
        .await
        .context("Échec de la requête HTTP vers Yahoo Finance")?;

    let status = response.status();
    if !status.is_success() {
        error!(status = %status, "Yahoo Finance returned error status");
        anyhow::bail!("HTTP {}", status.as_u16());
    }

    let body = response
        .text()
        .await
        .context("Échec de la lecture de la réponse Yahoo")?;

    let data = parse_chart(&body, symbol, interval)?;
    info!(points = data.len(), currency = %data.currency, "Fetched price series");
    Ok(data)
}

/// Recherche des actions par texte libre
///
/// Seuls les instruments EQUITY sont gardés, places US en premier.
#[instrument(skip(client))]
pub async fn search_stocks(client: &reqwest::Client, query: &str) -> Result<Vec<SearchResult>> {
    let response = client
        .get(SEARCH_URL)
        .query(&[("q", query)])
        .send()
        .await
        .context("Échec de la requête de recherche Yahoo")?;

    let status = response.status();
    if !status.is_success() {
        error!(status = %status, "Yahoo search returned error status");
        anyhow::bail!("Yahoo Finance API error: {}", status.as_u16());
    }

    let body = response
        .text()
        .await
        .context("Échec de la lecture de la réponse de recherche")?;

    let results = parse_search(&body)?;
    info!(count = results.len(), "Stock search completed");
    Ok(results)
}

// ============================================================================
// Parsing
// ============================================================================

/// Convertit la réponse chart en OHLCData
///
/// - `chart.error` renseigné → erreur avec sa description
/// - open/high/low manquants → remplacés par close
/// - points sans close ou avec close <= 0 → ignorés
/// - aucun point valide → erreur
fn parse_chart(body: &str, symbol: &str, interval: Interval) -> Result<OHLCData> {
    let response: ChartResponse =
        serde_json::from_str(body).context("Échec du parsing JSON de la réponse Yahoo")?;

    if let Some(err) = response.chart.error {
        let description = err.description.unwrap_or_else(|| "API error".to_string());
        anyhow::bail!(description);
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .with_context(|| format!("No data available for symbol: {}", symbol))?;

    let currency = result
        .meta
        .and_then(|meta| meta.currency)
        .unwrap_or_else(|| "USD".to_string());

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .and_then(|indicators| indicators.quote)
        .and_then(|quotes| quotes.into_iter().next())
        .unwrap_or_default();

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();

    let mut data = OHLCData::new(symbol.to_string(), interval, currency);
    let mut skipped = 0;

    for (i, &timestamp) in timestamps.iter().enumerate() {
        let close = match closes.get(i).copied().flatten() {
            Some(close) if close > 0.0 => close,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let Some(datetime) = DateTime::from_timestamp(timestamp, 0) else {
            skipped += 1;
            continue;
        };

        let column = |values: &[Option<f64>]| values.get(i).copied().flatten().unwrap_or(close);
        data.add_candle(OHLC::new(
            datetime,
            column(&opens),
            column(&highs),
            column(&lows),
            close,
        ));
    }

    if skipped > 0 {
        warn!(skipped, total = timestamps.len(), "Skipped points without a valid close");
    }

    if data.is_empty() {
        anyhow::bail!("No price data available for symbol: {}", symbol);
    }

    Ok(data)
}

/// Convertit la réponse search en résultats triés
fn parse_search(body: &str) -> Result<Vec<SearchResult>> {
    let response: SearchResponse =
        serde_json::from_str(body).context("Échec du parsing JSON de la recherche Yahoo")?;

    let mut results: Vec<SearchResult> = response
        .quotes
        .into_iter()
        .filter(|quote| quote.quote_type.as_deref() == Some("EQUITY"))
        .filter_map(|quote| {
            let symbol = quote.symbol?;
            let name = quote
                .longname
                .or(quote.shortname)
                .unwrap_or_else(|| symbol.clone());
            let exchange = quote
                .exch_disp
                .or(quote.exchange)
                .unwrap_or_else(|| "N/A".to_string());

            Some(SearchResult::new(symbol, name, exchange, "EQUITY"))
        })
        .collect();

    // sort_by_key est stable : l'ordre Yahoo est conservé dans chaque groupe
    results.sort_by_key(|result| !US_EXCHANGES.contains(&result.exchange.as_str()));
    Ok(results)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_fills_missing_columns() {
        let body = r#"{"chart":{"result":[{
            "meta":{"currency":"USD","symbol":"GC=F"},
            "timestamp":[1700000000,1700086400,1700172800],
            "indicators":{"quote":[{
                "open":[null,2010.0,2020.0],
                "high":[2005.0,2015.0,2025.0],
                "low":[1995.0,2005.0,2015.0],
                "close":[2000.0,null,2022.0]
            }]}
        }],"error":null}}"#;

        let data = parse_chart(body, "GC=F", Interval::D1).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.currency, "USD");

        // open manquant → close
        assert_eq!(data.candles[0].open, 2000.0);
        assert_eq!(data.candles[0].high, 2005.0);
        assert_eq!(data.candles[1].close, 2022.0);
        assert_eq!(data.candles[1].timestamp.timestamp(), 1700172800);
    }

    #[test]
    fn test_parse_chart_drops_non_positive_close() {
        let body = r#"{"chart":{"result":[{
            "meta":{},
            "timestamp":[1700000000,1700086400],
            "indicators":{"quote":[{"close":[0.0,12.5]}]}
        }]}}"#;

        let data = parse_chart(body, "CL=F", Interval::H1).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.candles[0].low, 12.5);
        // Devise absente → USD
        assert_eq!(data.currency, "USD");
    }

    #[test]
    fn test_parse_chart_reports_api_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

        let err = parse_chart(body, "XXX", Interval::D1).unwrap_err();
        assert_eq!(err.to_string(), "No data found, symbol may be delisted");
    }

    #[test]
    fn test_parse_chart_without_points_is_an_error() {
        let body = r#"{"chart":{"result":[{"meta":{"currency":"USD"},"indicators":{"quote":[{}]}}]}}"#;

        let err = parse_chart(body, "GC=F", Interval::D1).unwrap_err();
        assert!(err.to_string().contains("GC=F"));
    }

    #[test]
    fn test_parse_search_filters_and_ranks() {
        let body = r#"{"quotes":[
            {"symbol":"APC.F","quoteType":"EQUITY","shortname":"APPLE INC","exchDisp":"Frankfurt"},
            {"symbol":"AAPL","quoteType":"EQUITY","longname":"Apple Inc.","shortname":"Apple","exchange":"NMS","exchDisp":"NASDAQ"},
            {"symbol":"AAPL240119C","quoteType":"OPTION","shortname":"AAPL Call"},
            {"symbol":"APLE","quoteType":"EQUITY","exchange":"NYQ"},
            {"symbol":"AAPL.MX","quoteType":"EQUITY","longname":"Apple Inc."}
        ]}"#;

        let results = parse_search(body).unwrap();
        let symbols: Vec<&str> = results.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAPL", "APLE", "APC.F", "AAPL.MX"]);

        assert_eq!(results[0].name, "Apple Inc.");
        assert_eq!(results[0].exchange, "NASDAQ");
        // Ni longname ni shortname → symbole
        assert_eq!(results[1].name, "APLE");
        assert_eq!(results[1].exchange, "NYQ");
        assert_eq!(results[3].exchange, "N/A");
        assert!(results.iter().all(|r| r.kind == "EQUITY"));
    }

    #[test]
    fn test_parse_search_without_quotes() {
        assert!(parse_search(r#"{"count":0}"#).unwrap().is_empty());
        assert!(parse_search("not json").is_err());
    }

    // Vrai appel réseau : peut échouer sans connexion, on ne vérifie que le succès
    #[tokio::test]
    async fn test_fetch_price_series_live() {
        let client = crate::api::http_client().unwrap();

        match fetch_price_series(&client, "GC=F", Interval::D1).await {
            Ok(data) => {
                assert_eq!(data.symbol, "GC=F");
                assert!(!data.is_empty());
                println!("✓ Récupéré {} points pour GC=F", data.len());
            }
            Err(e) => println!("⚠ Appel Yahoo impossible (pas de réseau ?) : {}", e),
        }
    }
}
