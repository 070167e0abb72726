//! Display titles for raw menu keys
//!
//! Known keys come from a translation table. Unknown keys fall back to
//! underscore-to-space substitution, compound-umlaut reconstruction
//! (ae → ä etc.) and per-word capitalisation.

/// Human-readable title for a raw menu key
pub fn pretty(key: &str) -> String {
    match translation(key) {
        Some(title) => title.to_string(),
        None => fallback_title(key),
    }
}

fn translation(key: &str) -> Option<&'static str> {
    let title = match key {
        "alkoholfrei" => "Alkoholfrei",
        "bier" => "Bier",
        "alkoholfreie_biere" => "Alkoholfreie Biere",
        "wein_sekt" => "Wein & Sekt",
        "longdrinks_cocktail" => "Longdrinks & Cocktails",
        "schnaps" => "Spirituosen",
        "heissgetraenke" => "Heißgetränke",

        "wasser" => "Wasser",
        "softdrinks" => "Softdrinks",
        "saefte" => "Säfte",
        "saftschorlen" => "Saftschorlen",
        "erfrischungsgetraenk" => "Erfrischungsgetränke",
        "erfrischungsgetraenke" => "Erfrischungsgetränke",

        "sekt" => "Sekt",
        "wein_rot" => "Rotwein",
        "wein_weiss" => "Weißwein",
        "x_wein_rose" => "Roséwein",
        "weinschorle_rot" => "Rotweinschorle",
        "weinschorle_weiss" => "Weißweinschorle",
        "x_weinschorle_rose" => "Roséweinschorle",

        "cocktails" => "Cocktails",
        "longdrinks" => "Longdrinks",

        "kaffee" => "Kaffeespezialitäten",
        "kaffeespezialitaeten" => "Kaffeespezialitäten",
        "tee" => "Tee",

        _ => return None,
    };
    Some(title)
}

/// underscore → space, compound umlauts restored, words capitalised
fn fallback_title(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let with_umlauts = apply_umlauts(&spaced);
    title_case(&with_umlauts)
}

/// Restore single accented characters from compound spellings.
/// Deliberately does not touch "ss" — it is ambiguous (Gross vs. Groß).
fn apply_umlauts(s: &str) -> String {
    s.replace("Ae", "Ä")
        .replace("Oe", "Ö")
        .replace("Ue", "Ü")
        .replace("ae", "ä")
        .replace("oe", "ö")
        .replace("ue", "ü")
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_use_table() {
        assert_eq!(pretty("heissgetraenke"), "Heißgetränke");
        assert_eq!(pretty("wein_sekt"), "Wein & Sekt");
        assert_eq!(pretty("schnaps"), "Spirituosen");
    }

    #[test]
    fn test_fallback_reconstructs_umlauts() {
        assert_eq!(pretty("kaesespaetzle_gross"), "Käsespätzle Gross");
        assert_eq!(pretty("gruene_bohnen"), "Grüne Bohnen");
    }

    #[test]
    fn test_fallback_capitalises_each_word() {
        assert_eq!(pretty("warmer apfelstrudel"), "Warmer Apfelstrudel");
        assert_eq!(pretty("veg_vegan"), "Veg Vegan");
    }

    #[test]
    fn test_already_capitalised_key_unchanged() {
        assert_eq!(pretty("Spezial"), "Spezial");
        assert_eq!(pretty("Kleinigkeiten"), "Kleinigkeiten");
    }
}
