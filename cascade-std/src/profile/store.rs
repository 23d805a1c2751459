//! In-memory profile store with fixed-point sub-profile expansion.

use cascade_core::{ProfileError, ProfileSet, ProfileStore};
use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

/// The default [`ProfileStore`].
///
/// Registrations take the write lock and re-expand every set until no set
/// changes, so readers only ever see fully expanded snapshots.
#[derive(Default)]
pub struct DefaultProfileStore {
    sets: RwLock<HashMap<String, Arc<ProfileSet>>>,
}

impl DefaultProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered profile sets.
    pub fn len(&self) -> usize {
        self.sets.read().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sets.read().is_empty()
    }

    /// The registered base profile names, sorted.
    pub fn base_profiles(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sets.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl ProfileStore for DefaultProfileStore {
    fn add_profile_set(&self, profile_set: ProfileSet) -> Result<(), ProfileError> {
        let key = profile_set.base_profile().to_owned();
        let mut sets = self.sets.write();
        #[cfg(feature = "tracing")]
        tracing::debug!(base_profile = %key, "adding profile set");

        sets.insert(key, Arc::new(profile_set));
        let _passes = expand(&mut sets);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            passes = _passes,
            sets = sets.len(),
            "profile store re-expanded"
        );
        Ok(())
    }

    fn get_profile_set(&self, base_profile: &str) -> Result<Arc<ProfileSet>, ProfileError> {
        self.sets
            .read()
            .get(base_profile.trim())
            .cloned()
            .ok_or_else(|| ProfileError::UnknownProfileMember(base_profile.trim().to_owned()))
    }
}

/// Merge registered sets into every set that references them until nothing
/// changes. Returns the number of passes taken.
fn expand(sets: &mut HashMap<String, Arc<ProfileSet>>) -> usize {
    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        let keys: Vec<String> = sets.keys().cloned().collect();

        for key in &keys {
            let Some(current) = sets.get(key) else {
                continue;
            };
            let mut expanded: Option<ProfileSet> = None;
            for member in current.profile_names() {
                if member == key {
                    continue;
                }
                if let Some(referenced) = sets.get(member) {
                    let target = expanded.get_or_insert_with(|| ProfileSet::clone(current));
                    target.merge(referenced);
                }
            }
            if let Some(expanded) = expanded {
                if expanded.len() != current.len() {
                    changed = true;
                    sets.insert(key.clone(), Arc::new(expanded));
                }
            }
        }

        if !changed {
            return passes;
        }
    }
}
