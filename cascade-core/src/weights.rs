//! Tunable constants used when scoring resource configurations.

/// Smallest amount a matched positive token outscores a matched negated one.
pub const MIN_POSITIVE_MARGIN: f64 = 0.01;

/// The weights added up by the specificity calculator.
///
/// The defaults keep the ordering guarantees the selection pipeline relies on:
/// a matched base profile outranks a matched sub-profile, any positive match
/// outranks a negated one, and an explicit selector outranks the wildcard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecificityWeights {
    /// Token naming the base profile of the active set.
    pub base_profile: f64,
    /// Token naming a sub-profile (multiplied by the profile's `q` value).
    pub sub_profile: f64,
    /// The `*` profile token.
    pub wildcard_token: f64,
    /// A `not:` token whose profile is absent.
    pub negated_token: f64,
    /// The `*` selector.
    pub wildcard_selector: f64,
    /// Any explicit selector.
    pub explicit_selector: f64,
    /// Each contextual step beyond the first.
    pub contextual_step: f64,
    /// An `xmldef:` selector.
    pub xml_def_selector: f64,
    /// A namespace-qualified selector.
    pub namespace: f64,
}

impl Default for SpecificityWeights {
    fn default() -> Self {
        Self {
            base_profile: 100.0,
            sub_profile: 10.0,
            wildcard_token: 5.0,
            negated_token: 1.0,
            wildcard_selector: 5.0,
            explicit_selector: 100.0,
            contextual_step: 10.0,
            xml_def_selector: 10.0,
            namespace: 10.0,
        }
    }
}

impl SpecificityWeights {
    /// Set the base profile weight.
    pub fn with_base_profile(mut self, weight: f64) -> Self {
        self.base_profile = weight;
        self
    }

    /// Set the sub-profile weight.
    pub fn with_sub_profile(mut self, weight: f64) -> Self {
        self.sub_profile = weight;
        self
    }

    /// Set the wildcard token weight.
    pub fn with_wildcard_token(mut self, weight: f64) -> Self {
        self.wildcard_token = weight;
        self
    }

    /// Set the negated token weight.
    pub fn with_negated_token(mut self, weight: f64) -> Self {
        self.negated_token = weight;
        self
    }

    /// Set the wildcard selector weight.
    pub fn with_wildcard_selector(mut self, weight: f64) -> Self {
        self.wildcard_selector = weight;
        self
    }

    /// Set the explicit selector weight.
    pub fn with_explicit_selector(mut self, weight: f64) -> Self {
        self.explicit_selector = weight;
        self
    }

    /// Set the per-step contextual weight.
    pub fn with_contextual_step(mut self, weight: f64) -> Self {
        self.contextual_step = weight;
        self
    }

    /// Set the `xmldef:` selector weight.
    pub fn with_xml_def_selector(mut self, weight: f64) -> Self {
        self.xml_def_selector = weight;
        self
    }

    /// Score of a matched sub-profile token with the given `q` value.
    ///
    /// Never drops to or below a matched negated token, however small `q` is.
    pub fn sub_profile_score(&self, quality: f64) -> f64 {
        let floor = self.negated_token.max(0.0) + MIN_POSITIVE_MARGIN;
        (self.sub_profile * quality).max(floor)
    }

    /// Set the namespace bonus.
    pub fn with_namespace(mut self, weight: f64) -> Self {
        self.namespace = weight;
        self
    }
}
