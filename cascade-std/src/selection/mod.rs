//! # Resource Selection
//!
//! Decides which resource configurations apply to a fragment for the active
//! profile set, and in which order.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`SpecificityCalculator`] | Scores one config against a profile set |
//! | [`SpecificityComparator`] | Total order: explicit before default, then by score |
//! | [`ResourceSelector`] | Filters to applicable configs and ranks them |

pub mod comparator;
pub mod resource_selector;
pub mod specificity;

pub use comparator::{SortKey, SpecificityComparator};
pub use resource_selector::ResourceSelector;
pub use specificity::SpecificityCalculator;
