// ============================================================================
// Catalogue : matières premières par catégorie
// ============================================================================
// Table statique, chargée au démarrage et jamais modifiée
//
// Format des symboles : ABC=F
// - ABC = code du contrat (ex: GC pour l'or)
// - =F = contrat futures "front month" chez Yahoo Finance
//
// CONCEPT RUST : données 'static
// - Les slices &'static [T] vivent dans le binaire
// - Aucune allocation, aucun verrou : lecture seule partout
// ============================================================================

/// Une matière première du catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    /// Nom affiché (ex: "Gold")
    pub name: &'static str,

    /// Symbole Yahoo Finance (ex: "GC=F")
    pub symbol: &'static str,

    /// Requête booléenne pour la recherche de news (termes séparés par OR)
    pub news_keywords: &'static str,
}

/// Une catégorie et ses matières premières, dans l'ordre d'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub instruments: &'static [Instrument],
}

const fn instrument(
    name: &'static str,
    symbol: &'static str,
    news_keywords: &'static str,
) -> Instrument {
    Instrument {
        name,
        symbol,
        news_keywords,
    }
}

static CATEGORIES: &[Category] = &[
    Category {
        name: "Precious Metals",
        instruments: &[
            instrument(
                "Gold",
                "GC=F",
                r#""gold prices" OR "gold market" OR XAUUSD OR "gold futures" OR "gold trading""#,
            ),
            instrument(
                "Silver",
                "SI=F",
                r#""silver prices" OR "silver market" OR XAGUSD OR "silver futures" OR "silver trading""#,
            ),
            instrument(
                "Platinum",
                "PL=F",
                r#""platinum prices" OR "platinum market" OR "platinum futures" OR "platinum trading""#,
            ),
            instrument(
                "Palladium",
                "PA=F",
                r#""palladium prices" OR "palladium market" OR "palladium futures" OR "palladium trading""#,
            ),
        ],
    },
    Category {
        name: "Energy",
        instruments: &[
            instrument(
                "WTI Crude Oil",
                "CL=F",
                r#""crude oil prices" OR "oil market" OR "WTI crude" OR "oil futures" OR "crude trading""#,
            ),
            instrument(
                "Brent Crude Oil",
                "BZ=F",
                r#""Brent crude" OR "Brent oil" OR "oil market" OR "Brent futures" OR "oil prices""#,
            ),
            instrument(
                "Natural Gas",
                "NG=F",
                r#""natural gas prices" OR "gas market" OR "natural gas futures" OR "gas trading""#,
            ),
            instrument(
                "Heating Oil",
                "HO=F",
                r#""heating oil prices" OR "heating oil market" OR "heating oil futures""#,
            ),
            instrument(
                "RBOB Gasoline",
                "RB=F",
                r#""gasoline prices" OR "RBOB gasoline" OR "gasoline market" OR "gasoline futures""#,
            ),
        ],
    },
    Category {
        name: "Grains",
        instruments: &[
            instrument(
                "Corn",
                "ZC=F",
                r#""corn prices" OR "corn market" OR "corn futures" OR "grain trading" OR maize"#,
            ),
            instrument(
                "Wheat",
                "ZW=F",
                r#""wheat prices" OR "wheat market" OR "wheat futures" OR "grain trading""#,
            ),
            instrument(
                "Soybeans",
                "ZS=F",
                r#""soybean prices" OR "soybean market" OR "soybean futures" OR "soy trading""#,
            ),
            instrument(
                "Oats",
                "ZO=F",
                r#""oats prices" OR "oats market" OR "oats futures" OR "grain trading""#,
            ),
        ],
    },
    Category {
        name: "Soft Commodities",
        instruments: &[
            instrument(
                "Coffee",
                "KC=F",
                r#""coffee prices" OR "coffee market" OR "coffee futures" OR "coffee trading""#,
            ),
            instrument(
                "Sugar",
                "SB=F",
                r#""sugar prices" OR "sugar market" OR "sugar futures" OR "sugar trading""#,
            ),
            instrument(
                "Cotton",
                "CT=F",
                r#""cotton prices" OR "cotton market" OR "cotton futures" OR "cotton trading""#,
            ),
            instrument(
                "Cocoa",
                "CC=F",
                r#""cocoa prices" OR "cocoa market" OR "cocoa futures" OR "cocoa trading""#,
            ),
            instrument(
                "Orange Juice",
                "OJ=F",
                r#""orange juice prices" OR "orange juice market" OR "OJ futures" OR "citrus market""#,
            ),
        ],
    },
    Category {
        name: "Industrial Metals",
        instruments: &[instrument(
            "Copper",
            "HG=F",
            r#""copper prices" OR "copper market" OR "copper futures" OR "copper trading""#,
        )],
    },
    Category {
        name: "Livestock",
        instruments: &[
            instrument(
                "Live Cattle",
                "LE=F",
                r#""cattle prices" OR "cattle market" OR "livestock futures" OR "beef market""#,
            ),
            instrument(
                "Lean Hogs",
                "HE=F",
                r#""hog prices" OR "pork market" OR "hog futures" OR "livestock trading""#,
            ),
            instrument(
                "Feeder Cattle",
                "GF=F",
                r#""feeder cattle" OR "cattle market" OR "livestock futures" OR "cattle prices""#,
            ),
        ],
    },
];

/// Retourne toutes les catégories du catalogue
pub fn categories() -> &'static [Category] {
    CATEGORIES
}

/// Retourne une catégorie par son nom
pub fn category(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.name == name)
}

/// Retrouve une matière première (et sa catégorie) par symbole
///
/// Utilisé pour résoudre une entrée de watchlist de type commodity
pub fn find_by_symbol(symbol: &str) -> Option<(&'static Category, &'static Instrument)> {
    CATEGORIES.iter().find_map(|category| {
        category
            .instruments
            .iter()
            .find(|i| i.symbol == symbol)
            .map(|instrument| (category, instrument))
    })
}
