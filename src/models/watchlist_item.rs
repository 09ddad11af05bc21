// ============================================================================
// Structure : WatchlistEntry
// ============================================================================
// Un instrument favori, persisté entre les sessions
//
// Format JSON (identique à l'ancien stockage du navigateur) :
//   {"symbol":"AAPL","name":"Apple Inc.","type":"stock",
//    "exchange":"NASDAQ","addedAt":1700000000000}
//
// CONCEPTS RUST :
// 1. #[serde(rename...)] : noms de champs JSON différents des noms Rust
// 2. chrono::serde::ts_milliseconds : DateTime <-> nombre de millisecondes
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type d'instrument dans la watchlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Contrat futures du catalogue
    Commodity,
    /// Action trouvée via la recherche
    Stock,
}

/// Entrée de watchlist avant horodatage (ce que l'appelant fournit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWatchlistEntry {
    pub symbol: String,
    pub name: String,
    pub kind: EntryKind,
    /// Place de cotation (actions uniquement)
    pub exchange: Option<String>,
}

impl NewWatchlistEntry {
    /// Entrée pour une matière première du catalogue
    pub fn commodity(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            kind: EntryKind::Commodity,
            exchange: None,
        }
    }

    /// Entrée pour une action
    pub fn stock(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: Option<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            kind: EntryKind::Stock,
            exchange,
        }
    }

    /// Horodate l'entrée
    pub fn stamp(self, added_at: DateTime<Utc>) -> WatchlistEntry {
        WatchlistEntry {
            symbol: self.symbol,
            name: self.name,
            kind: self.kind,
            exchange: self.exchange,
            added_at,
        }
    }
}

/// Un instrument dans la watchlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    /// Symbole, clé unique (ex: "AAPL", "GC=F")
    pub symbol: String,

    /// Nom affiché (ex: "Apple Inc.", "Gold")
    pub name: String,

    #[serde(rename = "type")]
    pub kind: EntryKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    /// Date d'ajout, en millisecondes Unix dans le JSON
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
}

impl WatchlistEntry {
    /// Sous-titre affiché dans la liste : "Stock · NASDAQ" ou "Commodity"
    pub fn subtitle(&self) -> String {
        match (self.kind, self.exchange.as_deref()) {
            (EntryKind::Stock, Some(exchange)) if !exchange.is_empty() => {
                format!("Stock · {}", exchange)
            }
            (EntryKind::Stock, _) => "Stock".to_string(),
            (EntryKind::Commodity, _) => "Commodity".to_string(),
        }
    }

    /// Libellé principal : "Apple Inc. (AAPL)"
    ///
    /// Le nom est tronqué à `max_chars` caractères avec une ellipse.
    pub fn display(&self, max_chars: usize) -> String {
        let name = if self.name.chars().count() <= max_chars {
            self.name.clone()
        } else {
            let truncated: String = self.name.chars().take(max_chars.saturating_sub(1)).collect();
            format!("{}…", truncated)
        };

        format!("{} ({})", name, self.symbol)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_serialized_field_names() {
        let entry = NewWatchlistEntry::stock("AAPL", "Apple Inc.", Some("NASDAQ".to_string()))
            .stamp(Utc.timestamp_millis_opt(1_700_000_000_123).unwrap());

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["type"], "stock");
        assert_eq!(json["exchange"], "NASDAQ");
        assert_eq!(json["addedAt"], 1_700_000_000_123_i64);
    }

    #[test]
    fn test_commodity_without_exchange() {
        let raw = r#"{"symbol":"GC=F","name":"Gold","type":"commodity","addedAt":1700000000000}"#;
        let entry: WatchlistEntry = serde_json::from_str(raw).unwrap();

        assert_eq!(entry.kind, EntryKind::Commodity);
        assert_eq!(entry.exchange, None);
        assert_eq!(entry.subtitle(), "Commodity");

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("exchange"));
    }

    #[test]
    fn test_display_truncates_name() {
        let entry = NewWatchlistEntry::stock("BRK.B", "Berkshire Hathaway Inc. New", None)
            .stamp(Utc::now());

        assert_eq!(entry.display(10), "Berkshire… (BRK.B)");
        assert_eq!(entry.subtitle(), "Stock");
    }
}
