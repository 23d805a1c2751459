//! Error types for Cascade.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`CascadeError`] - Top-level error type for all Cascade operations
//! - [`ProfileError`] - Profile lookup and argument errors
//! - [`OrderingError`] - Errors raised while ordering handler bindings
//! - [`RegistryError`] - Errors from the keyed registry
//! - [`ConfigError`] - Errors building resource configurations

use crate::config::ResourceConfig;
use std::{fmt, sync::Arc};
use thiserror::Error;

/// Top-level error type for all Cascade operations.
#[derive(Error, Debug)]
pub enum CascadeError {
    /// A profile lookup or argument failed.
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Handler bindings could not be ordered.
    #[error("ordering error: {0}")]
    Ordering(#[from] OrderingError),

    /// A registry operation failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A resource configuration was invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by profile sets and profile stores.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// No profile set is registered under the given base profile name.
    #[error("unknown profile member: {0}")]
    UnknownProfileMember(String),

    /// A profile name or profile argument was empty or blank.
    #[error("invalid profile argument: {0}")]
    InvalidProfileArgument(String),
}

/// Errors raised while ordering handler bindings.
#[derive(Error, Debug, Clone)]
pub enum OrderingError {
    /// Two or more bindings depend on each other through their products.
    #[error("invalid 2-way/circular producer/consumer dependency detected in configuration\n{0}")]
    CircularDependency(DependencyCycle),
}

/// Errors raised by the keyed registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The key already has a registered value.
    #[error("duplicate registered object for key [{0}]")]
    DuplicateRegistration(String),

    /// The value stored under the key is not of the requested type.
    #[error("registered object for key [{0}] has an unexpected type")]
    TypeMismatch(String),
}

/// Errors raised while building resource configurations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The selector is empty or malformed.
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The offending selector.
        selector: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A target profile was given but contained no expressions.
    #[error("empty 'target-profile'")]
    EmptyTargetProfile,

    /// A profile targeting expression could not be read.
    #[error("invalid profile targeting expression '{0}'")]
    InvalidExpression(String),

    /// A resource config list was given an empty name.
    #[error("null or empty resource config list name")]
    EmptyListName,
}

/// The chain of resource configs forming a producer/consumer cycle.
///
/// The first entry is where the walk started; the last entry repeats the
/// binding that closed the loop.
#[derive(Debug, Clone)]
pub struct DependencyCycle {
    chain: Vec<Arc<ResourceConfig>>,
}

impl DependencyCycle {
    /// Create a cycle from its chain, root first.
    pub fn new(chain: Vec<Arc<ResourceConfig>>) -> Self {
        Self { chain }
    }

    /// The configs involved in the cycle, root first.
    pub fn chain(&self) -> &[Arc<ResourceConfig>] {
        &self.chain
    }

    /// Number of entries in the chain, including the repeated closing entry.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl fmt::Display for DependencyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, config) in self.chain.iter().enumerate() {
            for _ in 0..=depth {
                f.write_str("\t")?;
            }
            if depth > 0 {
                f.write_str("depends-on: ")?;
            }
            writeln!(f, "{config}")?;
        }
        Ok(())
    }
}
