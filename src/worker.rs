// ============================================================================
// Background Worker
// ============================================================================
// Thread séparé qui exécute les appels réseau
// - Reçoit des AppCommand via un channel (command_rx)
// - Renvoie des AppResult via un autre channel (result_tx)
// - L'UI ne bloque jamais sur le réseau
//
// CONCEPT : Une tâche tokio par commande
// - Les appels chart / news / search tournent en parallèle
// - Chaque résultat est étiqueté (symbole + intervalle, mots-clés, seq)
//   pour que l'App ignore ceux qui ne correspondent plus à l'écran
// ============================================================================

use std::sync::mpsc;
use std::thread::JoinHandle;

use tracing::{debug, error, info, warn};

use crate::api;
use crate::models::{Interval, NewsArticle, OHLCData, SearchResult};

/// Commandes envoyées au worker thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Série de prix pour le graphique
    FetchChart { symbol: String, interval: Interval },

    /// Articles pour une requête de mots-clés
    FetchNews { keywords: String },

    /// Recherche d'actions (seq : numéro de la requête)
    SearchStocks { seq: u64, query: String },
}

/// Résultats renvoyés par le worker thread
///
/// Les erreurs sont converties en message à la frontière du worker.
#[derive(Debug)]
pub enum AppResult {
    ChartLoaded {
        symbol: String,
        interval: Interval,
        outcome: Result<OHLCData, String>,
    },

    NewsLoaded {
        keywords: String,
        outcome: Result<Vec<NewsArticle>, String>,
    },

    SearchCompleted {
        seq: u64,
        outcome: Result<Vec<SearchResult>, String>,
    },
}

/// Lance le worker thread
///
/// Le thread s'arrête quand tous les émetteurs de commandes sont fermés.
///
/// # Arguments
/// * `command_rx` - Receiver des commandes
/// * `result_tx` - Sender des résultats
/// * `client` - Client HTTP partagé par toutes les tâches
/// * `news_limit` - Nombre maximal d'articles par requête
pub fn spawn_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    client: reqwest::Client,
    news_limit: usize,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        // CONCEPT : Runtime per-thread
        // - Ce thread bloque sur recv(), les tâches tournent sur le runtime
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = ?e, "Failed to create tokio runtime, worker disabled");
                return;
            }
        };

        while let Ok(command) = command_rx.recv() {
            debug!(?command, "Worker received command");
            runtime.spawn(execute(command, client.clone(), result_tx.clone(), news_limit));
        }

        info!("Worker thread exiting (channel closed)");
    })
}

/// Exécute une commande et envoie son résultat
async fn execute(
    command: AppCommand,
    client: reqwest::Client,
    result_tx: mpsc::Sender<AppResult>,
    news_limit: usize,
) {
    let result = match command {
        AppCommand::FetchChart { symbol, interval } => {
            let outcome = api::fetch_price_series(&client, &symbol, interval)
                .await
                .map_err(|e| {
                    error!(%symbol, error = ?e, "Failed to load price series");
                    format!("{}: {}", symbol, e)
                });
            AppResult::ChartLoaded {
                symbol,
                interval,
                outcome,
            }
        }

        AppCommand::FetchNews { keywords } => {
            let outcome = api::fetch_news(&client, &keywords, news_limit)
                .await
                .map_err(|e| {
                    error!(error = ?e, "Failed to load news");
                    e.to_string()
                });
            AppResult::NewsLoaded { keywords, outcome }
        }

        AppCommand::SearchStocks { seq, query } => {
            let outcome = api::search_stocks(&client, &query).await.map_err(|e| {
                error!(seq, error = ?e, "Stock search failed");
                "Search failed. Please try again.".to_string()
            });
            AppResult::SearchCompleted { seq, outcome }
        }
    };

    // L'UI peut être fermée pendant l'appel
    if result_tx.send(result).is_err() {
        warn!("Result channel closed, dropping worker result");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_exits_when_commands_close() {
        let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
        let (result_tx, _result_rx) = mpsc::channel::<AppResult>();

        let handle = spawn_worker(command_rx, result_tx, reqwest::Client::new(), 30);
        drop(command_tx);

        assert!(handle.join().is_ok());
    }
}
