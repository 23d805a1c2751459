//! Registry module for per-session collaborators.
//!
//! A [`Registry`] is the processing context shared by everything that loads
//! configuration for one session: it owns the profile store, the resource
//! config lists, and a keyed store of singleton objects. Create one per
//! session and pass it by reference; there is no global instance.

use crate::{
    config_list::ResourceConfigList,
    profile::DefaultProfileStore,
    selection::{ResourceSelector, SpecificityCalculator},
};
use cascade_core::{
    CascadeError, ConfigError, ProfileError, ProfileSet, ProfileStore, RegistryError,
    ResourceConfig, SpecificityWeights,
};
use parking_lot::RwLock;
use std::{
    any::Any,
    borrow::Cow,
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::Arc,
};

/// A typed name for a registry slot.
///
/// # Example
/// ```ignore
/// const CONVERTERS: TypedKey<ConverterTable> = TypedKey::new("type-converters");
///
/// registry.register(&CONVERTERS, ConverterTable::default())?;
/// let table = registry.lookup(&CONVERTERS)?;
/// ```
pub struct TypedKey<T> {
    name: Cow<'static, str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedKey<T> {
    /// A key with a static name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _marker: PhantomData,
        }
    }

    /// A key with a runtime name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _marker: PhantomData,
        }
    }

    /// The key name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for TypedKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypedKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedKey").field(&self.name).finish()
    }
}

type Object = Arc<dyn Any + Send + Sync>;

/// A thread-safe processing context.
///
/// Registrations are serialized per store; lookups may run concurrently and
/// return shared snapshots.
pub struct Registry {
    objects: RwLock<HashMap<String, Object>>,
    profile_store: Arc<dyn ProfileStore>,
    config_lists: RwLock<Vec<ResourceConfigList>>,
    weights: SpecificityWeights,
}

impl Registry {
    /// Create a registry backed by a fresh [`DefaultProfileStore`].
    pub fn new() -> Self {
        Self::with_profile_store(Arc::new(DefaultProfileStore::new()))
    }

    /// Create a registry backed by the given profile store.
    pub fn with_profile_store(profile_store: Arc<dyn ProfileStore>) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            profile_store,
            config_lists: RwLock::new(vec![ResourceConfigList::system()]),
            weights: SpecificityWeights::default(),
        }
    }

    /// Use custom specificity weights when ranking configurations.
    pub fn with_weights(mut self, weights: SpecificityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The specificity weights in use.
    pub fn weights(&self) -> &SpecificityWeights {
        &self.weights
    }

    // ------------------------------------------------------------------------
    // Keyed objects
    // ------------------------------------------------------------------------

    /// Register `value` under `key`.
    ///
    /// Fails with [`RegistryError::DuplicateRegistration`] if the key is taken.
    pub fn register<T>(&self, key: &TypedKey<T>, value: T) -> Result<Arc<T>, RegistryError>
    where
        T: Send + Sync + 'static,
    {
        let value = Arc::new(value);
        self.register_arc(key, Arc::clone(&value))?;
        Ok(value)
    }

    /// Register an already shared value under `key`.
    pub fn register_arc<T>(&self, key: &TypedKey<T>, value: Arc<T>) -> Result<(), RegistryError>
    where
        T: Send + Sync + 'static,
    {
        let mut objects = self.objects.write();
        if objects.contains_key(key.name()) {
            return Err(RegistryError::DuplicateRegistration(key.name().to_owned()));
        }
        objects.insert(key.name().to_owned(), value);

        #[cfg(feature = "tracing")]
        tracing::debug!(key = key.name(), "registered object");
        Ok(())
    }

    /// Look up the value registered under `key`.
    ///
    /// Returns `Ok(None)` when nothing is registered and
    /// [`RegistryError::TypeMismatch`] when the value has another type.
    pub fn lookup<T>(&self, key: &TypedKey<T>) -> Result<Option<Arc<T>>, RegistryError>
    where
        T: Send + Sync + 'static,
    {
        let Some(object) = self.objects.read().get(key.name()).cloned() else {
            return Ok(None);
        };
        object
            .downcast::<T>()
            .map(Some)
            .map_err(|_| RegistryError::TypeMismatch(key.name().to_owned()))
    }

    /// Is anything registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.objects.read().contains_key(name)
    }

    /// Remove the value registered under `key`, returning whether one existed.
    pub fn deregister<T>(&self, key: &TypedKey<T>) -> bool {
        let removed = self.objects.write().remove(key.name()).is_some();
        #[cfg(feature = "tracing")]
        {
            if removed {
                tracing::debug!(key = key.name(), "deregistered object");
            }
        }
        removed
    }

    /// The registered key names, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    // ------------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------------

    /// The profile store of this session.
    pub fn profile_store(&self) -> &Arc<dyn ProfileStore> {
        &self.profile_store
    }

    /// Add a profile set to the store.
    pub fn add_profile_set(&self, profile_set: ProfileSet) -> Result<(), ProfileError> {
        self.profile_store.add_profile_set(profile_set)
    }

    // ------------------------------------------------------------------------
    // Resource configurations
    // ------------------------------------------------------------------------

    /// Add a configuration to the system list.
    pub fn register_resource_config(&self, config: ResourceConfig) -> Result<(), ConfigError> {
        let mut lists = self.config_lists.write();
        match lists.iter_mut().find(|list| list.is_system()) {
            Some(system) => system.add(config),
            None => {
                let mut system = ResourceConfigList::system();
                system.add(config)?;
                lists.insert(0, system);
                Ok(())
            }
        }
    }

    /// Add a list of configurations and register the profile sets it declares.
    pub fn register_resource_config_list(
        &self,
        list: ResourceConfigList,
    ) -> Result<(), CascadeError> {
        // Profiles first, so readers never see configs whose profiles are unknown.
        for profile_set in list.profiles() {
            self.profile_store.add_profile_set(profile_set.clone())?;
        }
        self.config_lists.write().push(list);
        Ok(())
    }

    /// A snapshot of the registered lists, system list first.
    pub fn resource_config_lists(&self) -> Vec<ResourceConfigList> {
        self.config_lists.read().clone()
    }

    /// Every registered configuration in list order.
    pub fn resource_configs(&self) -> Vec<Arc<ResourceConfig>> {
        self.config_lists
            .read()
            .iter()
            .flat_map(|list| list.iter().cloned())
            .collect()
    }

    /// The configurations targeted at `base_profile`, most specific first.
    ///
    /// Fails with [`ProfileError::UnknownProfileMember`] when no profile set
    /// is registered for `base_profile`.
    pub fn target_configurations(
        &self,
        base_profile: &str,
    ) -> Result<Vec<Arc<ResourceConfig>>, ProfileError> {
        let selector = self.selector_for(base_profile)?;
        Ok(selector.select(self.resource_configs()))
    }

    /// Like [`target_configurations`](Self::target_configurations), limited to
    /// configurations whose selector targets `element`.
    pub fn target_configurations_for(
        &self,
        base_profile: &str,
        element: &str,
    ) -> Result<Vec<Arc<ResourceConfig>>, ProfileError> {
        let selector = self.selector_for(base_profile)?;
        Ok(selector.select_for(element, self.resource_configs()))
    }

    fn selector_for(&self, base_profile: &str) -> Result<ResourceSelector, ProfileError> {
        let profile_set = self.profile_store.get_profile_set(base_profile)?;
        Ok(ResourceSelector::with_calculator(
            profile_set,
            SpecificityCalculator::new(self.weights),
        ))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("keys", &self.keys())
            .field("lists", &self.config_lists.read().len())
            .field("weights", &self.weights)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const COUNTER: TypedKey<u32> = TypedKey::new("counter");

    #[test]
    fn register_then_lookup() {
        let registry = Registry::new();
        registry.register(&COUNTER, 7).unwrap();

        assert!(registry.contains("counter"));
        assert_eq!(*registry.lookup(&COUNTER).unwrap().unwrap(), 7);
    }

    #[test]
    fn missing_keys_look_up_as_none() {
        assert!(Registry::new().lookup(&COUNTER).unwrap().is_none());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let registry = Registry::new();
        registry.register(&COUNTER, 1).unwrap();

        let err = registry.register(&COUNTER, 2).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateRegistration(ref key) if key == "counter"));
        assert_eq!(*registry.lookup(&COUNTER).unwrap().unwrap(), 1);
    }

    #[test]
    fn same_name_with_other_type_is_a_mismatch() {
        let registry = Registry::new();
        registry.register(&COUNTER, 1).unwrap();

        let as_string: TypedKey<String> = TypedKey::named("counter");
        assert!(matches!(
            registry.lookup(&as_string),
            Err(RegistryError::TypeMismatch(_))
        ));
    }

    #[test]
    fn deregister_frees_the_key() {
        let registry = Registry::new();
        registry.register(&COUNTER, 1).unwrap();

        assert!(registry.deregister(&COUNTER));
        assert!(!registry.deregister(&COUNTER));
        registry.register(&COUNTER, 2).unwrap();
        assert_eq!(registry.keys(), ["counter"]);
    }

    #[test]
    fn concurrent_registration_admits_one_winner() {
        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.register(&COUNTER, n).is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn configs_land_in_the_system_list() {
        let registry = Registry::new();
        registry
            .register_resource_config(ResourceConfig::new("order").unwrap())
            .unwrap();

        let lists = registry.resource_config_lists();
        assert_eq!(lists.len(), 1);
        assert!(lists[0].is_system());
        assert_eq!(lists[0].name(), "default");
        assert_eq!(lists[0].len(), 1);
    }

    #[test]
    fn lists_register_their_profile_sets() {
        let registry = Registry::new();
        let mut list = ResourceConfigList::new("browsers").unwrap();
        list.add_profile_set(ProfileSet::with_profiles("msie6", ["html"]).unwrap());
        list.add(
            ResourceConfig::new("table")
                .unwrap()
                .with_target_profile("html")
                .unwrap()
                .with_resource("html-table"),
        )
        .unwrap();
        registry.register_resource_config_list(list).unwrap();

        let targeted = registry.target_configurations("msie6").unwrap();
        assert_eq!(targeted.len(), 1);
        assert_eq!(targeted[0].resource(), Some("html-table"));
    }

    struct RejectingStore;

    impl ProfileStore for RejectingStore {
        fn add_profile_set(&self, _profile_set: ProfileSet) -> Result<(), ProfileError> {
            Err(ProfileError::InvalidProfileArgument("read-only store".into()))
        }

        fn get_profile_set(&self, base_profile: &str) -> Result<Arc<ProfileSet>, ProfileError> {
            Err(ProfileError::UnknownProfileMember(base_profile.into()))
        }
    }

    #[test]
    fn list_is_not_published_when_its_profiles_fail() {
        let registry = Registry::with_profile_store(Arc::new(RejectingStore));
        let mut list = ResourceConfigList::new("browsers").unwrap();
        list.add_profile_set(ProfileSet::new("msie6").unwrap());
        list.add(ResourceConfig::new("table").unwrap()).unwrap();

        assert!(matches!(
            registry.register_resource_config_list(list),
            Err(CascadeError::Profile(ProfileError::InvalidProfileArgument(_)))
        ));
        assert_eq!(registry.resource_config_lists().len(), 1);
        assert!(registry.resource_configs().is_empty());
    }

    #[test]
    fn published_lists_always_have_their_profiles() {
        let registry = Arc::new(Registry::new());
        let writer = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..200 {
                    let mut list = ResourceConfigList::new(&format!("list-{i}")).unwrap();
                    list.add_profile_set(ProfileSet::new(&format!("profile-{i}")).unwrap());
                    list.add(ResourceConfig::new("item").unwrap()).unwrap();
                    registry.register_resource_config_list(list).unwrap();
                }
            })
        };

        loop {
            let done = writer.is_finished();
            let lists = registry.resource_config_lists();
            for list in lists.iter().filter(|list| !list.is_system()) {
                for profile_set in list.profiles() {
                    assert!(
                        registry
                            .target_configurations(profile_set.base_profile())
                            .is_ok()
                    );
                }
            }
            if done {
                break;
            }
        }
        writer.join().unwrap();
        assert_eq!(registry.resource_config_lists().len(), 201);
    }

    #[test]
    fn unknown_base_profiles_fail_selection() {
        assert_eq!(
            Registry::new().target_configurations("nokia").unwrap_err(),
            ProfileError::UnknownProfileMember("nokia".into())
        );
    }

    #[test]
    fn custom_weights_change_the_ranking() {
        let weights = SpecificityWeights::default().with_wildcard_selector(500.0);
        let registry = Registry::new().with_weights(weights);
        registry.add_profile_set(ProfileSet::new("msie6").unwrap()).unwrap();
        for selector in ["order/item", "*"] {
            registry
                .register_resource_config(ResourceConfig::new(selector).unwrap())
                .unwrap();
        }

        let ranked = registry.target_configurations("msie6").unwrap();
        assert_eq!(ranked[0].selector().selector(), "*");
    }
}
