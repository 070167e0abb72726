//! Menu tree construction
//!
//! Turns the flat, arbitrarily nested menu document into an ordered,
//! display-ready tree. Rebuilt wholesale on every pushed snapshot; nothing
//! here is mutated in place.
//!
//! Leaf detection: a node is a leaf iff it has a `name` field and either a
//! `price` or a `sizes` field; anything else is a group to recurse into.

use serde_json::Value;
use shared::models::{MenuItem, MenuSize};
use tracing::warn;

use super::collate::{SortRules, collate};
use super::titles::pretty;

/// Which half of the card is being browsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Drinks,
    Foods,
}

/// A node of the drinks tree (arbitrary depth)
#[derive(Debug, Clone, PartialEq)]
pub struct DrinkNode {
    pub key: String,
    pub title: String,
    pub children: Vec<DrinkNode>,
    pub items: Vec<MenuItem>,
}

/// A named subgroup of a food category
#[derive(Debug, Clone, PartialEq)]
pub struct FoodGroup {
    pub key: String,
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// A top-level food category: either flat items or one level of subgroups
#[derive(Debug, Clone, PartialEq)]
pub struct FoodCategory {
    pub key: String,
    pub title: String,
    pub items: Vec<MenuItem>,
    pub groups: Vec<FoodGroup>,
}

/// The full display-ready menu
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuTree {
    pub drinks: Vec<DrinkNode>,
    pub foods: Vec<FoodCategory>,
}

/// Key of the synthetic subgroup that absorbs direct items of a category
/// that also carries subgroups (such input is probably unintended upstream,
/// but data is never dropped silently).
pub const MIXED_ITEMS_GROUP_KEY: &str = "sonstiges";

impl MenuTree {
    /// Build the tree from a full menu snapshot
    pub fn build(snapshot: &Value, rules: &SortRules) -> MenuTree {
        let drinks = snapshot
            .get("drinks")
            .map(|node| build_drinks(node, rules))
            .unwrap_or_default();
        let foods = snapshot
            .get("foods")
            .map(|node| build_foods(node, rules))
            .unwrap_or_default();
        MenuTree { drinks, foods }
    }

    /// The food category key an item belongs to, for course tagging
    pub fn food_category_of(&self, item_id: &str) -> Option<&str> {
        for cat in &self.foods {
            if cat.items.iter().any(|i| i.id == item_id) {
                return Some(&cat.key);
            }
            for group in &cat.groups {
                if group.items.iter().any(|i| i.id == item_id) {
                    return Some(&cat.key);
                }
            }
        }
        None
    }
}

/// Leaf test for the drinks side: name plus price or sizes
fn is_leaf(node: &Value) -> bool {
    node.get("name").is_some() && (node.get("price").is_some() || node.get("sizes").is_some())
}

/// Leaf test for the foods side: name plus scalar price
fn is_food_item(node: &Value) -> bool {
    node.get("name").is_some() && node.get("price").is_some()
}

/// Child objects of a node, sorted by the rules for this structural path.
/// The store may deliver collections as arrays or keyed objects; both are
/// normalised to `(key, value)` pairs.
fn sorted_children<'a>(node: &'a Value, path: &str, rules: &SortRules) -> Vec<(String, &'a Value)> {
    let mut children: Vec<(String, &Value)> = match node {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(list) => list
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    };
    children.sort_by(|(a, _), (b, _)| rules.compare_keys(path, a, b));
    children
}

/// Parse a leaf into a MenuItem. Returns None when `name` is missing.
fn parse_leaf(key: &str, node: &Value) -> Option<MenuItem> {
    let name = node.get("name")?.as_str()?.to_string();

    if let Some(sizes_node) = node.get("sizes") {
        let sizes = parse_sizes(sizes_node);
        if !sizes.is_empty() {
            return Some(MenuItem::with_sizes(key, name, sizes));
        }
    }

    let price = node.get("price").and_then(Value::as_f64).unwrap_or(0.0);
    Some(MenuItem::simple(key, name, price))
}

fn parse_sizes(node: &Value) -> Vec<MenuSize> {
    let entries: Vec<&Value> = match node {
        Value::Array(list) => list.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| {
            let label = entry.get("label")?.as_str()?.to_string();
            let price = entry.get("price").and_then(Value::as_f64).unwrap_or(0.0);
            Some(MenuSize { label, price })
        })
        .collect()
}

// ========================= Drinks =========================

fn build_drinks(node: &Value, rules: &SortRules) -> Vec<DrinkNode> {
    sorted_children(node, "drinks", rules)
        .into_iter()
        .map(|(key, child)| {
            let path = format!("drinks/{}", key);
            let title = pretty(&key);
            let (children, items) = fill_drink_node(child, &path, rules);
            DrinkNode {
                key,
                title,
                children,
                items,
            }
        })
        .collect()
}

/// Recursively split a node into subfolders and leaf items
fn fill_drink_node(
    node: &Value,
    path: &str,
    rules: &SortRules,
) -> (Vec<DrinkNode>, Vec<MenuItem>) {
    let mut children = Vec::new();
    let mut items = Vec::new();

    for (key, child) in sorted_children(node, path, rules) {
        if is_leaf(child) {
            if let Some(item) = parse_leaf(&key, child) {
                items.push(item);
            }
        } else {
            let child_path = format!("{}/{}", path, key);
            let title = pretty(&key);
            let (grand_children, child_items) = fill_drink_node(child, &child_path, rules);
            children.push(DrinkNode {
                key,
                title,
                children: grand_children,
                items: child_items,
            });
        }
    }

    if rules.sorts_items_by_name(path) {
        items.sort_by(|a, b| collate(&a.name, &b.name));
    }

    (children, items)
}

// ========================= Foods =========================

fn build_foods(node: &Value, rules: &SortRules) -> Vec<FoodCategory> {
    sorted_children(node, "foods", rules)
        .into_iter()
        .map(|(key, child)| build_food_category(key, child, rules))
        .collect()
}

fn build_food_category(key: String, node: &Value, rules: &SortRules) -> FoodCategory {
    let title = pretty(&key);
    let path = format!("foods/{}", key);

    let mut direct_items = Vec::new();
    let mut group_nodes: Vec<(String, &Value)> = Vec::new();

    for (child_key, child) in sorted_children(node, &path, rules) {
        if is_food_item(child) {
            if let Some(item) = parse_leaf(&child_key, child) {
                direct_items.push(item);
            }
        } else {
            group_nodes.push((child_key, child));
        }
    }

    if group_nodes.is_empty() {
        // Flat category: items collected recursively (tolerates one stray
        // nesting level) and collated
        let items = collect_food_items(node);
        return FoodCategory {
            key,
            title,
            items,
            groups: Vec::new(),
        };
    }

    let mut groups: Vec<FoodGroup> = group_nodes
        .into_iter()
        .map(|(group_key, group_node)| {
            let group_title = pretty(&group_key);
            let items = collect_food_items(group_node);
            FoodGroup {
                key: group_key,
                title: group_title,
                items,
            }
        })
        .collect();

    if !direct_items.is_empty() {
        // Mixed category: subgroups plus direct items. Probably unintended
        // upstream; keep the items in a synthetic trailing subgroup.
        warn!(
            category = %key,
            count = direct_items.len(),
            "food category mixes direct items and subgroups; \
             collecting direct items under 'Sonstiges'"
        );
        direct_items.sort_by(|a, b| collate(&a.name, &b.name));
        groups.push(FoodGroup {
            key: MIXED_ITEMS_GROUP_KEY.to_string(),
            title: pretty(MIXED_ITEMS_GROUP_KEY),
            items: direct_items,
        });
    }

    FoodCategory {
        key,
        title,
        items: Vec::new(),
        groups,
    }
}

/// Collect food items from any nesting depth below `node`, collated by name
fn collect_food_items(node: &Value) -> Vec<MenuItem> {
    let mut out = Vec::new();
    collect_food_items_into(node, &mut out);
    out.sort_by(|a, b| collate(&a.name, &b.name));
    out
}

fn collect_food_items_into(node: &Value, out: &mut Vec<MenuItem>) {
    let children: Vec<(String, &Value)> = match node {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        _ => Vec::new(),
    };

    for (key, child) in children {
        if is_food_item(child) {
            if let Some(item) = parse_leaf(&key, child) {
                out.push(item);
            }
        } else if child.is_object() {
            collect_food_items_into(child, out);
        }
    }
}
