//! The selection pipeline: filter configurations to those targeted at a
//! profile set and rank them by specificity.

use super::{comparator::SpecificityComparator, specificity::SpecificityCalculator};
use cascade_core::{HandlerBinding, ProfileSet, ResourceConfig};
use std::sync::Arc;

/// Ranks the configurations and bindings that apply to one profile set.
///
/// # Example
///
/// ```rust,ignore
/// let selector = ResourceSelector::new(store.get_profile_set("msie6")?);
/// let ranked = selector.select(configs);
/// ```
#[derive(Debug, Clone)]
pub struct ResourceSelector {
    comparator: SpecificityComparator,
}

impl ResourceSelector {
    /// Create a selector with default weights.
    pub fn new(profile_set: Arc<ProfileSet>) -> Self {
        Self {
            comparator: SpecificityComparator::new(profile_set),
        }
    }

    /// Create a selector with a custom calculator.
    pub fn with_calculator(profile_set: Arc<ProfileSet>, calculator: SpecificityCalculator) -> Self {
        Self {
            comparator: SpecificityComparator::with_calculator(profile_set, calculator),
        }
    }

    /// The comparator used for ranking.
    pub fn comparator(&self) -> &SpecificityComparator {
        &self.comparator
    }

    /// Keep the configs targeted at the profile set, most specific first.
    pub fn select<I>(&self, configs: I) -> Vec<Arc<ResourceConfig>>
    where
        I: IntoIterator<Item = Arc<ResourceConfig>>,
    {
        let profile_set = self.comparator.profile_set();
        let applicable: Vec<_> = configs
            .into_iter()
            .filter(|config| config.is_targeted_at(profile_set))
            .collect();
        self.comparator.sort(applicable)
    }

    /// Like [`select`](Self::select), restricted to configs whose selector
    /// targets the fragment named `element`.
    pub fn select_for<I>(&self, element: &str, configs: I) -> Vec<Arc<ResourceConfig>>
    where
        I: IntoIterator<Item = Arc<ResourceConfig>>,
    {
        self.select(
            configs
                .into_iter()
                .filter(|config| config.selector().targets(element)),
        )
    }

    /// Keep the bindings whose config is targeted at the profile set,
    /// most specific first.
    pub fn select_bindings<I>(&self, bindings: I) -> Vec<HandlerBinding>
    where
        I: IntoIterator<Item = HandlerBinding>,
    {
        let profile_set = self.comparator.profile_set();
        let applicable: Vec<_> = bindings
            .into_iter()
            .filter(|binding| binding.config().is_targeted_at(profile_set))
            .collect();
        self.comparator
            .sort_by_config(applicable, |binding| binding.config().as_ref())
    }
}
