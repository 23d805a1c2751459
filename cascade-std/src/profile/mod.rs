//! Profile store implementations.

pub mod store;

pub use store::DefaultProfileStore;
