// ============================================================================
// Structure : OHLC (Open, High, Low, Close)
// ============================================================================
// Série de prix renvoyée par le service de cotations pour un symbole
//
// CONCEPTS RUST :
// 1. DateTime<Utc> : type de chrono pour dates avec timezone UTC
// 2. Enums Copy : l'intervalle est une petite valeur copiée partout
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Période affichée par le graphique (sélecteur 1H ... 10Y)
///
/// CONCEPT : Intervalle + fenêtre
/// - Chaque période correspond à une granularité Yahoo (1h, 1d, 1wk, 1mo)
/// - Et à une fenêtre de temps à remonter (en jours)
///
/// Exemples :
/// - H1 → chandelles d'une heure sur 5 jours
/// - D1 → chandelles journalières sur 6 mois
/// - Y10 → chandelles mensuelles sur 10 ans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// 1 heure
    H1,
    /// 4 heures (Yahoo ne connaît pas 4h : on demande 1h sur un mois)
    H4,
    /// 1 jour
    D1,
    /// 1 semaine
    W1,
    /// 1 mois
    MN1,
    /// 1 an
    Y1,
    /// 3 ans
    Y3,
    /// 5 ans
    Y5,
    /// 10 ans
    Y10,
}

impl Interval {
    /// Convertit la période en granularité pour l'API Yahoo Finance
    pub fn to_yahoo_string(&self) -> &'static str {
        match self {
            Interval::H1 | Interval::H4 => "1h",
            Interval::D1 | Interval::Y1 => "1d",
            Interval::W1 | Interval::Y3 | Interval::Y5 => "1wk",
            Interval::MN1 | Interval::Y10 => "1mo",
        }
    }

    /// Nombre de jours d'historique à demander
    pub fn lookback_days(&self) -> i64 {
        match self {
            Interval::H1 => 5,
            Interval::H4 => 30,
            Interval::D1 => 180,
            Interval::W1 => 730,
            Interval::MN1 => 1825,
            Interval::Y1 => 365,
            Interval::Y3 => 1095,
            Interval::Y5 => 1825,
            Interval::Y10 => 3650,
        }
    }

    /// Retourne le label court pour l'affichage (boutons du sélecteur)
    pub fn label(&self) -> &'static str {
        match self {
            Interval::H1 => "1H",
            Interval::H4 => "4H",
            Interval::D1 => "1D",
            Interval::W1 => "1W",
            Interval::MN1 => "1M",
            Interval::Y1 => "1Y",
            Interval::Y3 => "3Y",
            Interval::Y5 => "5Y",
            Interval::Y10 => "10Y",
        }
    }

    /// Retourne true si la période affiche des heures sur l'axe X
    pub fn is_intraday(&self) -> bool {
        matches!(self, Interval::H1 | Interval::H4)
    }

    /// Toutes les périodes, dans l'ordre du sélecteur
    pub fn all() -> [Interval; 9] {
        [
            Interval::H1,
            Interval::H4,
            Interval::D1,
            Interval::W1,
            Interval::MN1,
            Interval::Y1,
            Interval::Y3,
            Interval::Y5,
            Interval::Y10,
        ]
    }

    /// Retourne la période suivante (cycle)
    pub fn next(&self) -> Interval {
        let all = Self::all();
        let index = all.iter().position(|i| i == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    /// Retourne la période précédente (cycle)
    pub fn previous(&self) -> Interval {
        let all = Self::all();
        let index = all.iter().position(|i| i == self).unwrap_or(0);
        all[(index + all.len() - 1) % all.len()]
    }
}

impl Default for Interval {
    /// Période par défaut : 1 jour
    fn default() -> Self {
        Interval::D1
    }
}

/// Un point de la série de prix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OHLC {
    /// Timestamp du point
    pub timestamp: DateTime<Utc>,

    /// Prix d'ouverture (Open)
    pub open: f64,

    /// Prix le plus haut (High)
    pub high: f64,

    /// Prix le plus bas (Low)
    pub low: f64,

    /// Prix de clôture (Close)
    pub close: f64,
}

impl OHLC {
    /// Constructeur : crée un nouveau point OHLC
    pub fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }
}

/// Série de prix pour un symbole, triée par timestamp croissant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OHLCData {
    /// Symbole demandé (ex: "GC=F", "AAPL")
    pub symbol: String,

    /// Période demandée
    pub interval: Interval,

    /// Devise de cotation (ex: "USD")
    pub currency: String,

    /// Liste des points
    pub candles: Vec<OHLC>,
}

impl OHLCData {
    /// Crée une série vide
    pub fn new(symbol: String, interval: Interval, currency: String) -> Self {
        Self {
            symbol,
            interval,
            currency,
            candles: Vec::new(),
        }
    }

    /// Ajoute un point
    pub fn add_candle(&mut self, candle: OHLC) {
        self.candles.push(candle);
    }

    /// Retourne le nombre de points
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Vérifie si la série est vide
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Retourne le point le plus récent
    pub fn last(&self) -> Option<&OHLC> {
        self.candles.last()
    }

    /// Bornes (min, max) des clôtures, None si la série est vide
    ///
    /// CONCEPT RUST : fold
    /// - Un seul passage pour calculer min et max
    pub fn close_bounds(&self) -> Option<(f64, f64)> {
        if self.candles.is_empty() {
            return None;
        }

        Some(self.candles.iter().fold((f64::MAX, f64::MIN), |(min, max), c| {
            (min.min(c.close), max.max(c.close))
        }))
    }

    /// Variation en pourcentage entre la première et la dernière clôture
    pub fn total_change_percent(&self) -> Option<f64> {
        let first = self.candles.first()?;
        let last = self.candles.last()?;

        if first.close == 0.0 {
            return None;
        }

        Some(((last.close - first.close) / first.close) * 100.0)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
