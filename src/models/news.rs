// ============================================================================
// Structure : NewsArticle
// ============================================================================

use serde::{Deserialize, Serialize};

/// Un article de presse renvoyé par le service de news
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    pub url: String,

    /// Domaine de la source (ex: "reuters.com")
    pub source: String,

    /// Date de publication brute du fournisseur (ex: "20240115T103000Z")
    pub published_at: Option<String>,
}

/// Tronque un texte avec "..." s'il dépasse `max_chars` caractères
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}
