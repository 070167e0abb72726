//! Menu Item Model

use serde::{Deserialize, Serialize};

/// One size variant of a menu item, e.g. ("0,3l", 2.80)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSize {
    pub label: String,
    pub price: f64,
}

/// Menu leaf entity
///
/// Invariant: when `sizes` is non-empty it is sorted ascending by price and
/// `price` equals the cheapest size. [`MenuItem::with_sizes`] enforces this;
/// the tree builder only constructs items through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub sizes: Vec<MenuSize>,
}

impl MenuItem {
    /// Item with a single scalar price
    pub fn simple(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            sizes: Vec::new(),
        }
    }

    /// Item with size variants; sorts them ascending by price and takes the
    /// minimum as the nominal item price
    pub fn with_sizes(
        id: impl Into<String>,
        name: impl Into<String>,
        mut sizes: Vec<MenuSize>,
    ) -> Self {
        sizes.sort_by(|a, b| {
            a.price
                .partial_cmp(&b.price)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let price = sizes.first().map(|s| s.price).unwrap_or(0.0);
        Self {
            id: id.into(),
            name: name.into(),
            price,
            sizes,
        }
    }

    pub fn has_sizes(&self) -> bool {
        !self.sizes.is_empty()
    }
}
