//! # Handler Ordering
//!
//! Orders the handler bindings targeted at one selector so that every
//! producer runs before the consumers of its products.
//!
//! The pipeline is:
//!
//! ```text
//! bindings -> DependencyGraph::build -> find_cycle -> DependencySorter -> ordered bindings
//! ```

pub mod cycle;
pub mod graph;
pub mod sorter;

pub use cycle::find_cycle;
pub use graph::{DependencyGraph, DependencyNode};
pub use sorter::{DependencySorter, SortOrder, sort};
