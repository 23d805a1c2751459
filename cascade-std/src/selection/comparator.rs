//! Ordering of resource configurations for a fixed profile set.

use super::specificity::SpecificityCalculator;
use cascade_core::{ProfileSet, ResourceConfig};
use std::{cmp::Ordering, sync::Arc};

/// A total order over [`ResourceConfig`]s for one profile set.
///
/// Explicit configurations sort before default (fallback) ones; within each
/// group higher specificity sorts first. Equal keys compare `Equal`, so a
/// stable sort keeps registration order between ties.
#[derive(Debug, Clone)]
pub struct SpecificityComparator {
    profile_set: Arc<ProfileSet>,
    calculator: SpecificityCalculator,
}

impl SpecificityComparator {
    /// Create a comparator with the default weights.
    pub fn new(profile_set: Arc<ProfileSet>) -> Self {
        Self::with_calculator(profile_set, SpecificityCalculator::default())
    }

    /// Create a comparator with a custom calculator.
    pub fn with_calculator(profile_set: Arc<ProfileSet>, calculator: SpecificityCalculator) -> Self {
        Self {
            profile_set,
            calculator,
        }
    }

    /// The profile set configurations are scored against.
    pub fn profile_set(&self) -> &ProfileSet {
        &self.profile_set
    }

    /// The specificity of `config` for this comparator's profile set.
    pub fn specificity(&self, config: &ResourceConfig) -> f64 {
        self.calculator.specificity(config, &self.profile_set)
    }

    /// The sort key of `config`.
    pub fn key(&self, config: &ResourceConfig) -> SortKey {
        SortKey {
            default_resource: config.is_default_resource(),
            specificity: self.specificity(config),
        }
    }

    /// Compare two configurations.
    pub fn compare(&self, left: &ResourceConfig, right: &ResourceConfig) -> Ordering {
        if std::ptr::eq(left, right) {
            return Ordering::Equal;
        }
        self.key(left).cmp(&self.key(right))
    }

    /// Stable-sort `items` by the config each one carries.
    ///
    /// Keys are computed once per item.
    pub fn sort_by_config<T, F>(&self, items: Vec<T>, config_of: F) -> Vec<T>
    where
        F: Fn(&T) -> &ResourceConfig,
    {
        let mut keyed: Vec<(SortKey, T)> = items
            .into_iter()
            .map(|item| (self.key(config_of(&item)), item))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
        keyed.into_iter().map(|(_, item)| item).collect()
    }

    /// Stable-sort a list of configurations.
    pub fn sort(&self, configs: Vec<Arc<ResourceConfig>>) -> Vec<Arc<ResourceConfig>> {
        self.sort_by_config(configs, |config| config.as_ref())
    }
}

/// The precomputed ordering key of one configuration.
#[derive(Debug, Clone, Copy)]
pub struct SortKey {
    /// Whether the configuration is a fallback.
    pub default_resource: bool,
    /// Its specificity.
    pub specificity: f64,
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // `false < true`, so explicit configs come first.
        self.default_resource
            .cmp(&other.default_resource)
            .then_with(|| other.specificity.total_cmp(&self.specificity))
    }
}
