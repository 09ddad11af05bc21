// ============================================================================
// Module : api
// ============================================================================
// Clients des services distants (cotations, recherche d'actions, news)
// ============================================================================

use anyhow::{Context, Result};

pub mod gdelt;  // News (GDELT)
pub mod yahoo;  // Cotations et recherche (Yahoo Finance)

// Re-export des fonctions principales
pub use gdelt::fetch_news;
pub use yahoo::{fetch_price_series, search_stocks};

/// Yahoo bloque les clients sans User-Agent de navigateur
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Crée le client HTTP partagé par tous les appels
///
/// CONCEPT : reqwest::Client est un Arc interne
/// - clone() est bon marché et réutilise le pool de connexions
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(15))
        .build()
        .context("Échec de la création du client HTTP")
}
