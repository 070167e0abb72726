//! Menu browsing: tree construction, ordering rules, titles, accordion
//!
//! The backing store pushes the menu as one nested document; every snapshot
//! rebuilds the display-ready [`MenuTree`] from scratch. [`AccordionState`]
//! plus [`flatten`] turn the tree into the flat row list a list view renders.

pub mod accordion;
pub mod collate;
pub mod titles;
pub mod tree;

pub use accordion::{AccordionState, MenuRow, flatten};
pub use collate::{SortRules, collate, collation_key};
pub use titles::pretty;
pub use tree::{DrinkNode, FoodCategory, FoodGroup, MenuTree, Section};
