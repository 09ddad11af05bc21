// ============================================================================
// Configuration
// ============================================================================
// Valeurs par défaut, surchargeables par variables d'environnement :
// - LAZYMARKET_DATA_DIR     : répertoire de la watchlist
// - LAZYMARKET_DEBOUNCE_MS  : délai d'anti-rebond de la recherche
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::controllers::search::{DEFAULT_MIN_CHARS, DEFAULT_QUIET_PERIOD};

pub const DATA_DIR_VAR: &str = "LAZYMARKET_DATA_DIR";
pub const DEBOUNCE_VAR: &str = "LAZYMARKET_DEBOUNCE_MS";

/// Paramètres de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Répertoire des fichiers JSON persistés
    pub data_dir: PathBuf,

    /// Délai de silence avant une recherche d'actions
    pub debounce: Duration,

    /// Longueur minimale d'une recherche
    pub min_query_chars: usize,

    /// Nombre maximal d'articles demandés
    pub news_limit: usize,

    /// Attente maximale d'un événement terminal par itération
    pub event_poll: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            debounce: DEFAULT_QUIET_PERIOD,
            min_query_chars: DEFAULT_MIN_CHARS,
            news_limit: 30,
            event_poll: Duration::from_millis(100),
        }
    }
}

impl Config {
    /// Configuration par défaut + variables d'environnement
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var(DATA_DIR_VAR).ok(),
            std::env::var(DEBOUNCE_VAR).ok(),
        )
    }

    /// Applique des surcharges brutes ; une valeur invalide est ignorée (loggée)
    fn with_overrides(mut self, data_dir: Option<String>, debounce_ms: Option<String>) -> Self {
        if let Some(dir) = data_dir.filter(|d| !d.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = debounce_ms {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.debounce = Duration::from_millis(ms),
                Err(e) => warn!(value = %raw, error = %e, "Invalid {}, keeping default", DEBOUNCE_VAR),
            }
        }

        self
    }
}

/// ~/.local/share/lazymarket sous Linux, ./data si introuvable
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("lazymarket"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.min_query_chars, 2);
        assert_eq!(config.news_limit, 30);
        assert!(config.data_dir.ends_with("lazymarket") || config.data_dir.ends_with("data"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_overrides(Some("/tmp/lm".to_string()), Some("50".to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/lm"));
        assert_eq!(config.debounce, Duration::from_millis(50));
    }

    #[test]
    fn test_invalid_override_is_ignored() {
        let config = Config::default().with_overrides(Some("  ".to_string()), Some("soon".to_string()));

        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.debounce, Duration::from_millis(300));
    }
}
