// ============================================================================
// Mots-clés de recherche de news pour une action
// ============================================================================
// Construit une requête booléenne (termes séparés par OR) à partir du nom
// de la société et de son symbole boursier.
//
// Exemple :
//   synthesize("Apple Inc.", "AAPL")
//   → "Apple" OR "Apple stock" OR "Apple shares" OR AAPL OR "AAPL stock"
// ============================================================================

/// Suffixes juridiques retirés en fin de nom (comparaison insensible à la casse)
const LEGAL_SUFFIXES: [&str; 9] = [
    "Inc.",
    "Corp.",
    "Corporation",
    "Ltd.",
    "Limited",
    "Co.",
    "Company",
    "PLC",
    "LLC",
];

/// Génère la requête de news pour une action
///
/// Fonction pure : pas d'I/O, déterministe, définie pour tout couple non vide.
pub fn synthesize(display_name: &str, symbol: &str) -> String {
    let base_name = strip_legal_suffix(display_name.trim_end()).replace(',', "");
    let base_name = base_name.trim();

    let mut keywords = vec![
        format!("\"{}\"", base_name),
        format!("\"{} stock\"", base_name),
        format!("\"{} shares\"", base_name),
    ];

    // BRK.B, SIKA.SG : la ponctuation casse la syntaxe booléenne en aval
    if symbol.contains(['.', '-']) {
        keywords.push(format!("\"{}\"", symbol));
    } else {
        keywords.push(symbol.to_string());
        keywords.push(format!("\"{} stock\"", symbol));
    }

    keywords.join(" OR ")
}

/// Retire un suffixe juridique final précédé d'un espace
///
/// Un seul suffixe est retiré : "Foo Holdings Ltd. Inc." devient "Foo Holdings Ltd.".
fn strip_legal_suffix(name: &str) -> &str {
    for suffix in LEGAL_SUFFIXES {
        if name.len() <= suffix.len() {
            continue;
        }

        let split = name.len() - suffix.len();
        if !name.is_char_boundary(split) {
            continue;
        }

        let (head, tail) = name.split_at(split);
        if tail.eq_ignore_ascii_case(suffix) && head.ends_with(char::is_whitespace) {
            return head.trim_end();
        }
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apple() {
        assert_eq!(
            synthesize("Apple Inc.", "AAPL"),
            r#""Apple" OR "Apple stock" OR "Apple shares" OR AAPL OR "AAPL stock""#
        );
    }

    #[test]
    fn test_symbol_with_punctuation_is_quoted() {
        let query = synthesize("Berkshire Hathaway", "BRK.B");
        assert!(query.ends_with(r#"OR "BRK.B""#));
        assert!(!query.contains(" BRK.B "));
        assert!(query.starts_with(r#""Berkshire Hathaway" OR"#));

        let query = synthesize("Some Fund", "ABC-D");
        assert!(query.ends_with(r#"OR "ABC-D""#));
    }

    #[test]
    fn test_comma_and_suffix_are_removed() {
        assert_eq!(
            synthesize("Tesla, Inc.", "TSLA"),
            r#""Tesla" OR "Tesla stock" OR "Tesla shares" OR TSLA OR "TSLA stock""#
        );
    }

    #[test]
    fn test_suffix_is_case_insensitive() {
        assert!(synthesize("Microsoft CORPORATION", "MSFT").starts_with(r#""Microsoft" OR"#));
        assert!(synthesize("Shell plc", "SHEL").starts_with(r#""Shell" OR"#));
    }

    #[test]
    fn test_suffix_only_stripped_at_the_end() {
        // "Co." au milieu du nom n'est pas un suffixe
        assert!(synthesize("Co. Holdings", "COH").starts_with(r#""Co. Holdings" OR"#));
        // Pas d'espace avant : ce n'est pas un suffixe
        assert!(synthesize("Zillow", "Z").starts_with(r#""Zillow" OR"#));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            synthesize("Alphabet Inc.", "GOOGL"),
            synthesize("Alphabet Inc.", "GOOGL")
        );
    }
}
