// ============================================================================
// Widgets externes (TradingView)
// ============================================================================
// Le rendu est délégué à un fournisseur externe : on ne fournit que
// {symbole, thème, dimensions} et on ne reçoit rien en retour.
// Aucun échec d'embed n'est visible ici.
// ============================================================================

use serde_json::json;

/// Widget TradingView à embarquer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    /// Graphique avancé
    AdvancedChart,
    /// Fil de news "Top Stories"
    Timeline,
}

/// Thème demandé au widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Description opaque d'un embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSpec {
    pub widget: Widget,
    /// Symbole au format TradingView (ex: "COMEX:GC1!")
    pub symbol: String,
    pub theme: Theme,
    pub width: u16,
    pub height: u16,
}

impl EmbedSpec {
    /// Graphique avancé pour un symbole Yahoo
    pub fn advanced_chart(yahoo_symbol: &str, width: u16, height: u16) -> Self {
        Self {
            widget: Widget::AdvancedChart,
            symbol: tradingview_symbol(yahoo_symbol),
            theme: Theme::default(),
            width,
            height,
        }
    }

    /// Fil de news pour un symbole Yahoo
    pub fn timeline(yahoo_symbol: &str, width: u16, height: u16) -> Self {
        Self {
            widget: Widget::Timeline,
            symbol: tradingview_symbol(yahoo_symbol),
            theme: Theme::default(),
            width,
            height,
        }
    }

    /// Change le thème demandé au widget
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Script d'embed du fournisseur
    pub fn script_url(&self) -> &'static str {
        match self.widget {
            Widget::AdvancedChart => {
                "https://s3.tradingview.com/external-embedding/embed-widget-advanced-chart.js"
            }
            Widget::Timeline => {
                "https://s3.tradingview.com/external-embedding/embed-widget-timeline.js"
            }
        }
    }

    /// Configuration JSON passée au script
    pub fn config(&self) -> serde_json::Value {
        match self.widget {
            Widget::AdvancedChart => json!({
                "symbol": self.symbol,
                "interval": "D",
                "timezone": "Etc/UTC",
                "theme": self.theme.as_str(),
                "style": "1",
                "locale": "en",
                "width": self.width,
                "height": self.height,
            }),
            Widget::Timeline => json!({
                "feedMode": "symbol",
                "symbol": self.symbol,
                "colorTheme": self.theme.as_str(),
                "isTransparent": true,
                "displayMode": "regular",
                "width": self.width,
                "height": self.height,
                "locale": "en",
            }),
        }
    }
}

/// Convertit un symbole Yahoo en symbole TradingView
///
/// Les futures "ABC=F" ont besoin de la table ; les actions passent telles quelles.
pub fn tradingview_symbol(yahoo_symbol: &str) -> String {
    let mapped = match yahoo_symbol {
        // Precious Metals
        "GC=F" => "COMEX:GC1!",
        "SI=F" => "COMEX:SI1!",
        "PL=F" => "NYMEX:PL1!",
        "PA=F" => "NYMEX:PA1!",
        // Energy
        "CL=F" => "NYMEX:CL1!",
        "BZ=F" => "NYMEX:BZ1!",
        "NG=F" => "NYMEX:NG1!",
        "HO=F" => "NYMEX:HO1!",
        "RB=F" => "NYMEX:RB1!",
        // Grains
        "ZC=F" => "CBOT:ZC1!",
        "ZW=F" => "CBOT:ZW1!",
        "ZS=F" => "CBOT:ZS1!",
        "ZO=F" => "CBOT:ZO1!",
        // Soft Commodities
        "KC=F" => "ICEUS:KC1!",
        "SB=F" => "ICEUS:SB1!",
        "CT=F" => "ICEUS:CT1!",
        "CC=F" => "ICEUS:CC1!",
        "OJ=F" => "ICEUS:OJ1!",
        // Industrial Metals
        "HG=F" => "COMEX:HG1!",
        // Livestock
        "LE=F" => "CME:LE1!",
        "HE=F" => "CME:HE1!",
        "GF=F" => "CME:GF1!",
        other => other,
    };

    mapped.to_string()
}
