//! Resource configurations.
//!
//! A [`ResourceConfig`] binds a selector, an optional target profile, a
//! resource reference and a set of named parameters. Configurations are
//! immutable once built and are shared behind `Arc` by lists and bindings.

use crate::{
    error::ConfigError,
    expression::ProfileTargetingExpression,
    profile::ProfileSet,
    selector::SelectorPath,
};
use indexmap::IndexMap;
use std::fmt;

/// A unit of configuration targeting a selector.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceConfig {
    selector: SelectorPath,
    target_profile: Option<String>,
    expressions: Vec<ProfileTargetingExpression>,
    resource: Option<String>,
    params: IndexMap<String, String>,
    default_resource: bool,
}

impl ResourceConfig {
    /// Create a configuration for `selector`, targeting every profile.
    pub fn new(selector: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_selector(SelectorPath::parse(selector)?))
    }

    /// Create a configuration from an already-parsed selector.
    pub fn from_selector(selector: SelectorPath) -> Self {
        Self {
            selector,
            target_profile: None,
            expressions: Vec::new(),
            resource: None,
            params: IndexMap::new(),
            default_resource: false,
        }
    }

    /// Restrict the configuration to a target profile.
    ///
    /// Expressions are separated by `,`, `|` or `;`.
    pub fn with_target_profile(mut self, target_profile: &str) -> Result<Self, ConfigError> {
        let expressions = target_profile
            .split([',', '|', ';'])
            .filter(|expr| !expr.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<ProfileTargetingExpression>, _>>()?;
        if expressions.is_empty() {
            return Err(ConfigError::EmptyTargetProfile);
        }
        self.target_profile = Some(target_profile.trim().to_owned());
        self.expressions = expressions;
        Ok(self)
    }

    /// Attach pre-built targeting expressions.
    pub fn with_expressions(mut self, expressions: Vec<ProfileTargetingExpression>) -> Self {
        self.target_profile = if expressions.is_empty() {
            None
        } else {
            Some(
                expressions
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            )
        };
        self.expressions = expressions;
        self
    }

    /// Set the resource reference.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set a named parameter, replacing any earlier value.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Qualify the selector with a namespace URI.
    pub fn with_namespace(mut self, namespace_uri: impl Into<String>) -> Self {
        self.selector = self.selector.with_namespace(namespace_uri);
        self
    }

    /// Mark the configuration as a fallback applied only when nothing more
    /// specific targets the fragment.
    pub fn with_default_resource(mut self, default_resource: bool) -> Self {
        self.default_resource = default_resource;
        self
    }

    /// A copy of this configuration with a different selector.
    pub fn with_selector(&self, selector: SelectorPath) -> Self {
        let namespace = self.selector.namespace_uri().map(str::to_owned);
        let selector = match namespace {
            Some(uri) if selector.namespace_uri().is_none() => selector.with_namespace(uri),
            _ => selector,
        };
        Self {
            selector,
            ..self.clone()
        }
    }

    /// The parsed selector.
    pub fn selector(&self) -> &SelectorPath {
        &self.selector
    }

    /// The target profile as written, if any.
    pub fn target_profile(&self) -> Option<&str> {
        self.target_profile.as_deref()
    }

    /// The targeting expressions. Empty means "every profile".
    pub fn expressions(&self) -> &[ProfileTargetingExpression] {
        &self.expressions
    }

    /// The resource reference, if any.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Look up a parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Iterate over the parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Is this a fallback configuration.
    pub fn is_default_resource(&self) -> bool {
        self.default_resource
    }

    /// Does the configuration apply to `profile_set`.
    ///
    /// True when there are no expressions or any expression matches.
    pub fn is_targeted_at(&self, profile_set: &ProfileSet) -> bool {
        self.expressions.is_empty() || self.expressions.iter().any(|e| e.is_match(profile_set))
    }
}

impl fmt::Display for ResourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector: [{}]", self.selector)?;
        if let Some(uri) = self.selector.namespace_uri() {
            write!(f, ", Namespace: [{uri}]")?;
        }
        if let Some(profile) = &self.target_profile {
            write!(f, ", Target Profile: [{profile}]")?;
        }
        write!(f, ", Resource: [{}]", self.resource.as_deref().unwrap_or("none"))?;
        if !self.params.is_empty() {
            write!(f, ", Num Params: [{}]", self.params.len())?;
        }
        Ok(())
    }
}
