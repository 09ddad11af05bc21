// ============================================================================
// Structure : SearchResult
// ============================================================================
// Une action renvoyée par la recherche de symboles
// Transitoire : n'existe que le temps d'un dropdown ouvert
// ============================================================================

use serde::{Deserialize, Serialize};

/// Résultat de recherche d'action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Symbole (ex: "AAPL")
    pub symbol: String,

    /// Nom de la société (ex: "Apple Inc.")
    pub name: String,

    /// Place de cotation affichée (ex: "NASDAQ")
    pub exchange: String,

    /// Type d'instrument chez le fournisseur (ex: "EQUITY")
    #[serde(rename = "type")]
    pub kind: String,
}

impl SearchResult {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
            kind: kind.into(),
        }
    }
}
