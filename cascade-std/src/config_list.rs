//! Named lists of resource configurations.

use cascade_core::{ConfigError, ProfileSet, ResourceConfig, SelectorPath};
use std::sync::Arc;

/// Name of the built-in list that receives individually registered configs.
pub const SYSTEM_LIST_NAME: &str = "default";

/// A named, ordered list of resource configurations plus the profile sets
/// declared alongside them.
#[derive(Debug, Clone)]
pub struct ResourceConfigList {
    name: String,
    system: bool,
    configs: Vec<Arc<ResourceConfig>>,
    profiles: Vec<ProfileSet>,
}

impl ResourceConfigList {
    /// Create an empty list.
    pub fn new(name: &str) -> Result<Self, ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyListName);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(list = name, "resource config list created");
        Ok(Self {
            name: name.to_owned(),
            system: false,
            configs: Vec::new(),
            profiles: Vec::new(),
        })
    }

    /// The built-in system list, named [`SYSTEM_LIST_NAME`].
    pub fn system() -> Self {
        Self {
            name: SYSTEM_LIST_NAME.to_owned(),
            system: true,
            configs: Vec::new(),
            profiles: Vec::new(),
        }
    }

    /// The list name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Is this the built-in system list.
    pub fn is_system(&self) -> bool {
        self.system
    }

    /// Add a configuration.
    ///
    /// A comma-separated selector adds one copy of the configuration per
    /// selector, in the order written.
    pub fn add(&mut self, config: ResourceConfig) -> Result<(), ConfigError> {
        let selector = config.selector().selector();
        if !selector.contains(',') {
            self.push(Arc::new(config));
            return Ok(());
        }

        let copies = selector
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| SelectorPath::parse(part).map(|path| config.with_selector(path)))
            .collect::<Result<Vec<_>, _>>()?;
        for copy in copies {
            self.push(Arc::new(copy));
        }
        Ok(())
    }

    /// Add an already shared configuration as-is.
    pub fn push(&mut self, config: Arc<ResourceConfig>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(list = %self.name, config = %config, "resource config added");
        self.configs.push(config);
    }

    /// Declare a profile set alongside the configurations.
    pub fn add_profile_set(&mut self, profile_set: ProfileSet) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            list = %self.name,
            base_profile = profile_set.base_profile(),
            "profile set added to list"
        );
        self.profiles.push(profile_set);
    }

    /// The declared profile sets.
    pub fn profiles(&self) -> &[ProfileSet] {
        &self.profiles
    }

    /// The configurations, in registration order.
    pub fn configs(&self) -> &[Arc<ResourceConfig>] {
        &self.configs
    }

    /// Get a configuration by position.
    pub fn get(&self, index: usize) -> Option<&Arc<ResourceConfig>> {
        self.configs.get(index)
    }

    /// Number of configurations.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Check if the list has no configurations.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Iterate over the configurations.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ResourceConfig>> {
        self.configs.iter()
    }

    /// The configurations targeted at `profile_set`, in registration order.
    pub fn target_configurations(&self, profile_set: &ProfileSet) -> Vec<Arc<ResourceConfig>> {
        self.configs
            .iter()
            .filter(|config| {
                let targeted = config.is_targeted_at(profile_set);
                #[cfg(feature = "tracing")]
                {
                    if !targeted {
                        tracing::trace!(
                            config = %config,
                            profile_set = %profile_set,
                            "resource not targeted at profile"
                        );
                    }
                }
                targeted
            })
            .cloned()
            .collect()
    }

    /// The configurations matching `predicate`, in registration order.
    pub fn lookup<F>(&self, predicate: F) -> Vec<Arc<ResourceConfig>>
    where
        F: Fn(&ResourceConfig) -> bool,
    {
        self.configs
            .iter()
            .filter(|config| predicate(config))
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a ResourceConfigList {
    type Item = &'a Arc<ResourceConfig>;
    type IntoIter = std::slice::Iter<'a, Arc<ResourceConfig>>;

    fn into_iter(self) -> Self::IntoIter {
        self.configs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(
            ResourceConfigList::new("  ").unwrap_err(),
            ConfigError::EmptyListName
        );
    }

    #[test]
    fn comma_selectors_expand_into_copies() {
        let mut list = ResourceConfigList::new("orders").unwrap();
        list.add(
            ResourceConfig::new("order, order/item")
                .unwrap()
                .with_resource("visitor")
                .with_param("beanId", "order"),
        )
        .unwrap();

        let selectors: Vec<&str> = list.iter().map(|c| c.selector().selector()).collect();
        assert_eq!(selectors, ["order", "order/item"]);
        assert!(list.iter().all(|c| c.param("beanId") == Some("order")));
    }

    #[test]
    fn targets_by_profile_in_registration_order() {
        let mut list = ResourceConfigList::new("orders").unwrap();
        for (selector, profile) in [("a", "msie6"), ("b", "firefox"), ("c", "not:firefox")] {
            list.add(
                ResourceConfig::new(selector)
                    .unwrap()
                    .with_target_profile(profile)
                    .unwrap(),
            )
            .unwrap();
        }
        list.add(ResourceConfig::new("d").unwrap()).unwrap();

        let msie = ProfileSet::new("msie6").unwrap();
        let targeted: Vec<String> = list
            .target_configurations(&msie)
            .iter()
            .map(|c| c.selector().selector().to_owned())
            .collect();
        assert_eq!(targeted, ["a", "c", "d"]);
    }

    #[test]
    fn lookup_filters_by_predicate() {
        let mut list = ResourceConfigList::new("orders").unwrap();
        list.add(ResourceConfig::new("a").unwrap().with_resource("x")).unwrap();
        list.add(ResourceConfig::new("b").unwrap().with_resource("y")).unwrap();

        let found = list.lookup(|c| c.resource() == Some("y"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].selector().selector(), "b");
    }
}
