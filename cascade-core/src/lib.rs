//! # cascade-core
//!
//! Core types and traits for the Cascade targeting and ordering engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! configuration loaders and handler implementations that don't need the
//! engines in `cascade-std`.
//!
//! # Building Blocks
//!
//! ## Profiles ([`Profile`], [`ProfileSet`], [`ProfileStore`])
//!
//! Named capability tokens describing the execution environment, grouped
//! under a base profile. Stores resolve sub-profile references transitively.
//!
//! ## Targeting ([`ProfileTargetingExpression`], [`SelectorPath`])
//!
//! A [`ResourceConfig`] targets a selector and, optionally, a set of profile
//! expressions. Together they decide whether a configuration applies and how
//! specific it is.
//!
//! ## Handlers ([`ContentHandler`], [`Producer`], [`Consumer`])
//!
//! Handlers declare the products they create and require. A
//! [`HandlerBinding`] pairs a handler with its configuration and is the unit
//! the ordering engine sorts.
//!
//! # Error Types
//!
//! - [`CascadeError`] - Top-level error type
//! - [`ProfileError`] - Profile lookup and argument errors
//! - [`OrderingError`] - Circular producer/consumer dependencies
//! - [`RegistryError`] - Duplicate or mistyped registrations
//! - [`ConfigError`] - Invalid selectors and expressions

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod config;
mod error;
mod expression;
mod handler;
mod profile;
mod selector;
mod weights;

// Re-exports
pub use config::ResourceConfig;
pub use error::{
    CascadeError, ConfigError, DependencyCycle, OrderingError, ProfileError, RegistryError,
};
pub use expression::{ExpressionToken, ProfileTargetingExpression, WILDCARD_TOKEN};
pub use handler::{Capabilities, Consumer, ContentHandler, HandlerBinding, Producer, Role};
pub use profile::{Profile, ProfileSet, ProfileStore, QUALITY_PARAM};
pub use selector::{
    DOCUMENT_FRAGMENT_SELECTOR, DOCUMENT_VOID_SELECTOR, SelectorPath, WILDCARD_SELECTOR,
    XML_DEF_PREFIX,
};
pub use weights::{MIN_POSITIVE_MARGIN, SpecificityWeights};
