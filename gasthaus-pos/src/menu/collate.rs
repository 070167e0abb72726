//! Menu ordering rules
//!
//! Two ordering mechanisms exist side by side:
//!
//! 1. Fixed priority lists for a handful of structural paths (the card's
//!    top-level sections and a few curated subfolders). Keys missing from a
//!    list sort after all known ones, ties broken by key.
//! 2. German primary-strength collation for everything else: case is
//!    ignored and base letters compare equal to their accented forms
//!    ("Äpfel" and "apfel" are equal at this strength).
//!
//! The comparators are named and parameterised by an explicit lookup table
//! keyed by the structural path being sorted, so the rules are data, not
//! code scattered across call sites.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Primary-strength sort key: lowercased with diacritics folded to base
/// letters and ß expanded to "ss" (DIN 5007-1 dictionary ordering).
pub fn collation_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        for lc in c.to_lowercase() {
            match lc {
                'ä' | 'à' | 'á' | 'â' | 'å' => out.push('a'),
                'ö' | 'ò' | 'ó' | 'ô' => out.push('o'),
                'ü' | 'ù' | 'ú' | 'û' => out.push('u'),
                'é' | 'è' | 'ê' | 'ë' => out.push('e'),
                'í' | 'ì' | 'î' | 'ï' => out.push('i'),
                'ç' => out.push('c'),
                'ñ' => out.push('n'),
                'ß' => out.push_str("ss"),
                _ => out.push(lc),
            }
        }
    }
    out
}

/// Compare two display names at primary strength
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// Position of `key` in a priority list; unknown keys go last
fn rank(list: &[&str], key: &str) -> usize {
    list.iter().position(|k| *k == key).unwrap_or(usize::MAX)
}

/// Ordering rules for the whole menu, keyed by structural path
/// (e.g. `"drinks"`, `"drinks/wein_sekt"`, `"foods/hauptspeisen"`).
pub struct SortRules {
    priorities: HashMap<&'static str, Vec<&'static str>>,
    /// Paths whose leaf items keep priority order instead of collated order
    item_priority_paths: HashSet<&'static str>,
}

impl SortRules {
    /// The restaurant's curated card order
    pub fn standard() -> Self {
        let mut priorities: HashMap<&'static str, Vec<&'static str>> = HashMap::new();

        priorities.insert(
            "drinks",
            vec![
                "alkoholfrei",
                "bier",
                "alkoholfreie_biere",
                "wein_sekt",
                "longdrinks_cocktail",
                "schnaps",
                "heissgetraenke",
            ],
        );
        priorities.insert(
            "drinks/alkoholfrei",
            vec![
                "wasser",
                "softdrinks",
                "saefte",
                "saftschorlen",
                "erfrischungsgetraenk",
                "erfrischungsgetraenke",
            ],
        );
        priorities.insert(
            "drinks/wein_sekt",
            vec![
                "sekt",
                "wein_rot",
                "wein_weiss",
                "weinschorle_rot",
                "weinschorle_weiss",
            ],
        );
        priorities.insert("drinks/longdrinks_cocktail", vec!["longdrinks", "cocktails"]);
        priorities.insert(
            "drinks/heissgetraenke",
            vec!["kaffee", "tee", "kaffeespezialitaeten"],
        );
        priorities.insert(
            "drinks/bier/bier",
            vec![
                "krombacher_pils",
                "krombacher_radler",
                "krombacher_diesel",
                "koestritzer_dunkel",
                "hefeweizen",
            ],
        );
        priorities.insert(
            "drinks/alkoholfreie_biere/alkoholfrei",
            vec!["krombacher_0_0", "hefeweizen_0_0"],
        );
        priorities.insert(
            "foods",
            vec![
                "vorspeisen",
                "suppen",
                "salate",
                "hauptspeisen",
                "nachspeisen",
                "kindergerichte",
                "menues",
                "Kleinigkeiten",
            ],
        );
        priorities.insert(
            "foods/hauptspeisen",
            vec!["Spezial", "huhn", "rind", "fisch", "schwein", "veg_vegan"],
        );

        let item_priority_paths: HashSet<&'static str> =
            ["drinks/bier/bier", "drinks/alkoholfreie_biere/alkoholfrei"]
                .into_iter()
                .collect();

        Self {
            priorities,
            item_priority_paths,
        }
    }

    /// Compare two child keys under the given structural path
    pub fn compare_keys(&self, path: &str, a: &str, b: &str) -> Ordering {
        match self.priorities.get(path) {
            Some(list) => rank(list, a)
                .cmp(&rank(list, b))
                .then_with(|| a.cmp(b)),
            None => collate(a, b).then_with(|| a.cmp(b)),
        }
    }

    /// Whether leaf items under this path are re-sorted by display name.
    /// The curated beer folders keep their priority order instead.
    pub fn sorts_items_by_name(&self, path: &str) -> bool {
        !self.item_priority_paths.contains(path)
    }
}

impl Default for SortRules {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_strength_equality() {
        assert_eq!(collate("Äpfel", "apfel"), Ordering::Equal);
        assert_eq!(collate("Weißbier", "weissbier"), Ordering::Equal);
    }

    #[test]
    fn test_collation_orders_umlauts_with_base() {
        // Ö sorts with O, not after Z
        assert_eq!(collate("Öl", "Oliven"), Ordering::Less); // "ol" < "oliven"
        assert_eq!(collate("Zwiebel", "Öl"), Ordering::Greater);
    }

    #[test]
    fn test_priority_path_ordering() {
        let rules = SortRules::standard();
        assert_eq!(
            rules.compare_keys("drinks", "bier", "schnaps"),
            Ordering::Less
        );
        // Unknown keys sort after all known ones
        assert_eq!(
            rules.compare_keys("drinks", "glühwein", "heissgetraenke"),
            Ordering::Greater
        );
        // Two unknown keys tie-break by key
        assert_eq!(
            rules.compare_keys("drinks", "aaa", "bbb"),
            Ordering::Less
        );
    }

    #[test]
    fn test_unlisted_path_falls_back_to_collation() {
        let rules = SortRules::standard();
        assert_eq!(
            rules.compare_keys("drinks/schnaps", "Äpfelbrand", "birne"),
            Ordering::Less
        );
    }

    #[test]
    fn test_item_order_exceptions() {
        let rules = SortRules::standard();
        assert!(!rules.sorts_items_by_name("drinks/bier/bier"));
        assert!(!rules.sorts_items_by_name("drinks/alkoholfreie_biere/alkoholfrei"));
        assert!(rules.sorts_items_by_name("drinks/wein_sekt/sekt"));
    }
}
