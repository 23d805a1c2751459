//! Specificity scoring for resource configurations.

use cascade_core::{ProfileSet, ResourceConfig, SpecificityWeights};

/// Scores how precisely a [`ResourceConfig`] targets a profile set.
///
/// The score is the sum of:
///
/// 1. every matching targeting expression's own specificity,
/// 2. a selector weight: `xmldef:` selectors, the `*` wildcard, or an
///    explicit selector plus a bonus for each contextual step past the first,
/// 3. a namespace bonus when the selector is namespace-qualified.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecificityCalculator {
    weights: SpecificityWeights,
}

impl SpecificityCalculator {
    /// Create a calculator with custom weights.
    pub fn new(weights: SpecificityWeights) -> Self {
        Self { weights }
    }

    /// The weights in use.
    pub fn weights(&self) -> &SpecificityWeights {
        &self.weights
    }

    /// Compute the specificity of `config` for `profile_set`.
    pub fn specificity(&self, config: &ResourceConfig, profile_set: &ProfileSet) -> f64 {
        let w = &self.weights;
        let mut specificity: f64 = config
            .expressions()
            .iter()
            .map(|expr| expr.specificity(profile_set, w))
            .sum();

        let selector = config.selector();
        if selector.is_xml_def() {
            specificity += w.xml_def_selector;
        } else if selector.is_wildcard() {
            specificity += w.wildcard_selector;
        } else {
            specificity += w.explicit_selector;
            if selector.is_contextual() {
                specificity += w.contextual_step * (selector.len() - 1) as f64;
            }
        }

        if selector.namespace_uri().is_some() {
            specificity += w.namespace;
        }

        specificity
    }
}
