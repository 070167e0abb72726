//! Accordion state and row flattening
//!
//! Pure UI-side state: which category is open and which subfolder paths are
//! open. Flattening projects the tree plus this state into the flat row
//! sequence the list view renders. Side-effect free and deterministic for
//! identical inputs.

use std::collections::BTreeSet;

use shared::models::MenuItem;

use super::tree::{DrinkNode, MenuTree, Section};

/// One row of the flattened menu list
#[derive(Debug, Clone, PartialEq)]
pub enum MenuRow {
    CategoryHeader {
        key: String,
        title: String,
    },
    /// `path` is the `/`-joined key chain from the category root (drinks) or
    /// the bare group key (foods); `depth` drives indentation.
    SubcategoryHeader {
        path: String,
        title: String,
        depth: usize,
    },
    Item(MenuItem),
}

/// Which branches of the accordion are open.
///
/// Invariant: at any nesting level at most one sibling path is open; opening
/// a path closes every other path sharing its immediate parent together with
/// their descendants. Opening a top-level category fully resets subfolder
/// state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccordionState {
    open_category: Option<String>,
    open_paths: BTreeSet<String>,
    open_food_group: Option<String>,
}

/// Path prefix up to the last `/`, empty for top-level paths
fn parent_of(path: &str) -> &str {
    path.rfind('/').map(|i| &path[..i]).unwrap_or("")
}

impl AccordionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_category(&self) -> Option<&str> {
        self.open_category.as_deref()
    }

    pub fn open_food_group(&self) -> Option<&str> {
        self.open_food_group.as_deref()
    }

    pub fn is_path_open(&self, path: &str) -> bool {
        self.open_paths.contains(path)
    }

    /// Switching tabs closes everything
    pub fn reset(&mut self) {
        self.open_category = None;
        self.open_paths.clear();
        self.open_food_group = None;
    }

    /// Open or close a top-level category; subfolder state resets either way
    pub fn toggle_category(&mut self, key: &str) {
        if self.open_category.as_deref() == Some(key) {
            self.open_category = None;
        } else {
            self.open_category = Some(key.to_string());
        }
        self.open_paths.clear();
        self.open_food_group = None;
    }

    /// Toggle a drinks subfolder path, keeping at most one sibling open
    pub fn toggle_path(&mut self, path: &str) {
        if self.open_paths.contains(path) {
            self.remove_subtree(path);
            return;
        }

        let parent = parent_of(path).to_string();
        let siblings: Vec<String> = self
            .open_paths
            .iter()
            .filter(|p| parent_of(p) == parent && p.as_str() != path)
            .cloned()
            .collect();
        for sibling in siblings {
            self.remove_subtree(&sibling);
        }

        self.open_paths.insert(path.to_string());
    }

    /// Toggle a food subgroup (foods nest exactly one level)
    pub fn toggle_food_group(&mut self, key: &str) {
        if self.open_food_group.as_deref() == Some(key) {
            self.open_food_group = None;
        } else {
            self.open_food_group = Some(key.to_string());
        }
    }

    fn remove_subtree(&mut self, path: &str) {
        let prefix = format!("{}/", path);
        self.open_paths
            .retain(|p| p != path && !p.starts_with(&prefix));
    }
}

/// Project the tree plus accordion state into the flat row list
pub fn flatten(tree: &MenuTree, section: Section, state: &AccordionState) -> Vec<MenuRow> {
    let mut rows = Vec::new();
    match section {
        Section::Drinks => flatten_drinks(tree, state, &mut rows),
        Section::Foods => flatten_foods(tree, state, &mut rows),
    }
    rows
}

fn flatten_drinks(tree: &MenuTree, state: &AccordionState, rows: &mut Vec<MenuRow>) {
    for root in &tree.drinks {
        rows.push(MenuRow::CategoryHeader {
            key: root.key.clone(),
            title: root.title.clone(),
        });

        if state.open_category() == Some(root.key.as_str()) {
            add_drink_rows(root, 1, &root.key, state, rows);
            for item in &root.items {
                rows.push(MenuRow::Item(item.clone()));
            }
        }
    }
}

fn add_drink_rows(
    node: &DrinkNode,
    depth: usize,
    parent_path: &str,
    state: &AccordionState,
    rows: &mut Vec<MenuRow>,
) {
    for child in &node.children {
        let path = format!("{}/{}", parent_path, child.key);
        rows.push(MenuRow::SubcategoryHeader {
            path: path.clone(),
            title: child.title.clone(),
            depth,
        });

        if state.is_path_open(&path) {
            add_drink_rows(child, depth + 1, &path, state, rows);
            for item in &child.items {
                rows.push(MenuRow::Item(item.clone()));
            }
        }
    }
}

fn flatten_foods(tree: &MenuTree, state: &AccordionState, rows: &mut Vec<MenuRow>) {
    for cat in &tree.foods {
        rows.push(MenuRow::CategoryHeader {
            key: cat.key.clone(),
            title: cat.title.clone(),
        });

        if state.open_category() != Some(cat.key.as_str()) {
            continue;
        }

        if cat.groups.is_empty() {
            for item in &cat.items {
                rows.push(MenuRow::Item(item.clone()));
            }
            continue;
        }

        for group in &cat.groups {
            rows.push(MenuRow::SubcategoryHeader {
                path: group.key.clone(),
                title: group.title.clone(),
                depth: 1,
            });

            if state.open_food_group() == Some(group.key.as_str()) {
                for item in &group.items {
                    rows.push(MenuRow::Item(item.clone()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::collate::SortRules;
    use serde_json::json;

    fn sample_tree() -> MenuTree {
        MenuTree::build(
            &json!({
                "drinks": {
                    "wein_sekt": {
                        "sekt": {
                            "prosecco": { "name": "Prosecco", "price": 5.5 }
                        },
                        "wein_rot": {
                            "spaet": { "name": "Spätburgunder", "price": 6.0 }
                        }
                    }
                },
                "foods": {
                    "hauptspeisen": {
                        "rind": { "steak": { "name": "Rumpsteak", "price": 24.5 } },
                        "huhn": { "schnitzel": { "name": "Hähnchenschnitzel", "price": 14.0 } }
                    }
                }
            }),
            &SortRules::standard(),
        )
    }

    #[test]
    fn test_toggle_one_per_level() {
        let mut state = AccordionState::new();
        state.toggle_category("wein_sekt");
        state.toggle_path("wein_sekt/sekt");
        state.toggle_path("wein_sekt/sekt/jahrgang");
        assert!(state.is_path_open("wein_sekt/sekt"));
        assert!(state.is_path_open("wein_sekt/sekt/jahrgang"));

        // Opening the sibling closes sekt and its descendant
        state.toggle_path("wein_sekt/wein_rot");
        assert!(!state.is_path_open("wein_sekt/sekt"));
        assert!(!state.is_path_open("wein_sekt/sekt/jahrgang"));
        assert!(state.is_path_open("wein_sekt/wein_rot"));
    }

    #[test]
    fn test_toggle_same_path_closes_subtree() {
        let mut state = AccordionState::new();
        state.toggle_path("a/b");
        state.toggle_path("a/b/c");
        state.toggle_path("a/b");
        assert!(!state.is_path_open("a/b"));
        assert!(!state.is_path_open("a/b/c"));
    }

    #[test]
    fn test_category_toggle_resets_paths() {
        let mut state = AccordionState::new();
        state.toggle_category("wein_sekt");
        state.toggle_path("wein_sekt/sekt");
        state.toggle_category("bier");
        assert_eq!(state.open_category(), Some("bier"));
        assert!(!state.is_path_open("wein_sekt/sekt"));
    }

    #[test]
    fn test_flatten_closed_tree_shows_only_headers() {
        let tree = sample_tree();
        let rows = flatten(&tree, Section::Drinks, &AccordionState::new());
        assert_eq!(rows.len(), 1);
        assert!(matches!(rows[0], MenuRow::CategoryHeader { .. }));
    }

    #[test]
    fn test_flatten_open_category_shows_subfolders_not_items() {
        let tree = sample_tree();
        let mut state = AccordionState::new();
        state.toggle_category("wein_sekt");

        let rows = flatten(&tree, Section::Drinks, &state);
        // category header + two subfolder headers (sekt before wein_rot per
        // priority list), no items until a path is open
        assert_eq!(rows.len(), 3);
        match &rows[1] {
            MenuRow::SubcategoryHeader { path, depth, .. } => {
                assert_eq!(path, "wein_sekt/sekt");
                assert_eq!(*depth, 1);
            }
            other => panic!("expected subfolder header, got {:?}", other),
        }
    }

    #[test]
    fn test_flatten_open_path_emits_items() {
        let tree = sample_tree();
        let mut state = AccordionState::new();
        state.toggle_category("wein_sekt");
        state.toggle_path("wein_sekt/sekt");

        let rows = flatten(&tree, Section::Drinks, &state);
        let items: Vec<&str> = rows
            .iter()
            .filter_map(|r| match r {
                MenuRow::Item(i) => Some(i.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(items, vec!["Prosecco"]);
    }

    #[test]
    fn test_flatten_foods_single_open_group() {
        let tree = sample_tree();
        let mut state = AccordionState::new();
        state.toggle_category("hauptspeisen");
        state.toggle_food_group("rind");

        let rows = flatten(&tree, Section::Foods, &state);
        let items: Vec<&str> = rows
            .iter()
            .filter_map(|r| match r {
                MenuRow::Item(i) => Some(i.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(items, vec!["Rumpsteak"]);

        // Switching groups swaps the emitted items
        state.toggle_food_group("huhn");
        let rows = flatten(&tree, Section::Foods, &state);
        let items: Vec<&str> = rows
            .iter()
            .filter_map(|r| match r {
                MenuRow::Item(i) => Some(i.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(items, vec!["Hähnchenschnitzel"]);
    }

    #[test]
    fn test_flatten_is_stable() {
        let tree = sample_tree();
        let mut state = AccordionState::new();
        state.toggle_category("wein_sekt");
        state.toggle_path("wein_sekt/sekt");

        assert_eq!(
            flatten(&tree, Section::Drinks, &state),
            flatten(&tree, Section::Drinks, &state)
        );
    }
}
