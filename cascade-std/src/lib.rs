//! # cascade-std
//!
//! Standard implementations for the Cascade targeting and ordering engine.
//!
//! This crate provides:
//! - **Profiles**: [`DefaultProfileStore`](profile::DefaultProfileStore) with transitive expansion
//! - **Selection**: [`ResourceSelector`](selection::ResourceSelector) and the specificity comparator
//! - **Ordering**: [`DependencySorter`](ordering::DependencySorter) for producer/consumer ordering
//! - **Configuration**: [`ResourceConfigList`](config_list::ResourceConfigList) and the session [`Registry`](registry::Registry)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use cascade_core;

// Modules
pub mod config_list;
pub mod ordering;
pub mod profile;
pub mod registry;
pub mod selection;
pub mod testing;
