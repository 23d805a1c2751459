//! # Profiles
//!
//! A [`Profile`] is a named capability token describing the execution
//! environment (a browser family, a media type, a deployment tier).
//! A [`ProfileSet`] groups one base profile with the sub-profiles it
//! implies, and a [`ProfileStore`] maps base profile names to their sets.
//!
//! # Membership
//!
//! - The base profile matches case-insensitively.
//! - Sub-profiles match case-sensitively after trimming.
//!
//! # Expansion
//!
//! A sub-profile may itself be the base profile of another registered set.
//! Stores resolve those references so that membership is transitive:
//! registering `msie6 -> [html]` and `html -> [dom-capable]` makes
//! `dom-capable` a member of `msie6`.

use crate::error::ProfileError;
use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// Parameter name carrying a profile's quality weighting.
pub const QUALITY_PARAM: &str = "q";

/// A named capability token.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    name: String,
    params: IndexMap<String, String>,
}

impl Profile {
    /// Create a profile, trimming the name.
    pub fn new(name: &str) -> Result<Self, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::InvalidProfileArgument(
                "null or empty profile name".into(),
            ));
        }
        Ok(Self {
            name: name.to_owned(),
            params: IndexMap::new(),
        })
    }

    /// Attach a parameter, such as a media `q` value.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// The profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a parameter value.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Read a parameter as a number, falling back to `default` when the
    /// parameter is missing or not numeric.
    pub fn param_numeric(&self, name: &str, default: f64) -> f64 {
        self.param(name)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(default)
    }

    /// The quality weighting of this profile (`q` parameter, default 1).
    pub fn quality(&self) -> f64 {
        self.param_numeric(QUALITY_PARAM, 1.0)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A base profile plus its (possibly expanded) sub-profiles.
///
/// Sub-profiles keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSet {
    base_profile: String,
    profiles: IndexMap<String, Profile>,
}

impl ProfileSet {
    /// Create an empty profile set for `base_profile`.
    pub fn new(base_profile: &str) -> Result<Self, ProfileError> {
        let base_profile = base_profile.trim();
        if base_profile.is_empty() {
            return Err(ProfileError::InvalidProfileArgument(
                "null or empty base profile".into(),
            ));
        }
        Ok(Self {
            base_profile: base_profile.to_owned(),
            profiles: IndexMap::new(),
        })
    }

    /// Create a profile set from a base profile and a list of sub-profile names.
    pub fn with_profiles<I, S>(base_profile: &str, profiles: I) -> Result<Self, ProfileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new(base_profile)?;
        for name in profiles {
            set.add_profile_name(name.as_ref())?;
        }
        Ok(set)
    }

    /// The base profile name.
    pub fn base_profile(&self) -> &str {
        &self.base_profile
    }

    /// Add a sub-profile. An existing sub-profile of the same name is kept.
    ///
    /// Returns `true` if the profile was not already a member.
    pub fn add_profile(&mut self, profile: Profile) -> bool {
        if self.profiles.contains_key(profile.name()) {
            return false;
        }
        self.profiles.insert(profile.name().to_owned(), profile);
        true
    }

    /// Add a sub-profile by name.
    pub fn add_profile_name(&mut self, name: &str) -> Result<bool, ProfileError> {
        Ok(self.add_profile(Profile::new(name)?))
    }

    /// Merge every sub-profile of `other` into this set.
    ///
    /// Returns `true` if any profile was added.
    pub fn merge(&mut self, other: &ProfileSet) -> bool {
        let mut changed = false;
        for profile in other.profiles() {
            if profile.name() != self.base_profile {
                changed |= self.add_profile(profile.clone());
            }
        }
        changed
    }

    /// Look up a sub-profile by name (trimmed, case-sensitive).
    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name.trim())
    }

    /// Is `token` the base profile or one of the sub-profiles.
    pub fn is_member(&self, token: &str) -> bool {
        let token = token.trim();
        self.base_profile.eq_ignore_ascii_case(token) || self.profiles.contains_key(token)
    }

    /// Is `token` the base profile (case-insensitive).
    pub fn is_base_profile(&self, token: &str) -> bool {
        self.base_profile.eq_ignore_ascii_case(token.trim())
    }

    /// Iterate over the sub-profiles in insertion order.
    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    /// Iterate over the sub-profile names in insertion order.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Number of sub-profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the set has no sub-profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl fmt::Display for ProfileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.base_profile)?;
        for (i, name) in self.profile_names().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("]")
    }
}

/// A store of profile sets keyed by base profile name.
///
/// Implementations must serialize registrations and hand out consistent
/// snapshots to readers.
pub trait ProfileStore: Send + Sync {
    /// Insert or overwrite a profile set, then re-resolve sub-profile
    /// references across the whole store.
    fn add_profile_set(&self, profile_set: ProfileSet) -> Result<(), ProfileError>;

    /// Look up the profile set registered for a base profile name.
    fn get_profile_set(&self, base_profile: &str) -> Result<Arc<ProfileSet>, ProfileError>;

    /// Is `token` a member of the set registered for `base_profile`.
    fn is_member(&self, base_profile: &str, token: &str) -> Result<bool, ProfileError> {
        Ok(self.get_profile_set(base_profile)?.is_member(token))
    }
}
