//! # cascade - Profile-Targeted Resource Selection
//!
//! `cascade` decides which processing resources apply to a piece of content
//! and in which order their handlers run.
//!
//! - **Targeting**: resource configurations name a selector and a profile
//!   expression; only those matching the active [`ProfileSet`] apply.
//! - **Ranking**: applicable configurations are ordered by specificity, with
//!   default resources last.
//! - **Ordering**: handler bindings are sorted so producers run before the
//!   consumers of their products, and circular dependencies are rejected.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cascade::prelude::*;
//!
//! let registry = Registry::new();
//! registry.add_profile_set(ProfileSet::with_profiles("msie6", ["html4", "css1"])?)?;
//! registry.register_resource_config(
//!     ResourceConfig::new("table")?.with_target_profile("html4")?.with_resource("table-writer"),
//! )?;
//!
//! let ranked = registry.target_configurations("msie6")?;
//! let ordered = sort(&bindings, SortOrder::ProducersFirst)?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use cascade_core::{
    // Handlers
    Capabilities,
    // Errors
    CascadeError,
    ConfigError,
    Consumer,
    ContentHandler,
    DependencyCycle,
    // Targeting
    ExpressionToken,
    HandlerBinding,
    OrderingError,
    Producer,
    // Profiles
    Profile,
    ProfileError,
    ProfileSet,
    ProfileStore,
    ProfileTargetingExpression,
    RegistryError,
    // Configuration
    ResourceConfig,
    Role,
    SelectorPath,
    SpecificityWeights,
};

pub use cascade_std::{
    config_list::ResourceConfigList,
    ordering::{DependencySorter, SortOrder, sort},
    profile::DefaultProfileStore,
    registry::{Registry, TypedKey},
    selection::{ResourceSelector, SpecificityCalculator, SpecificityComparator},
};

/// Well-known selector and token constants.
pub mod constants {
    pub use cascade_core::{
        DOCUMENT_FRAGMENT_SELECTOR, DOCUMENT_VOID_SELECTOR, QUALITY_PARAM, WILDCARD_SELECTOR,
        WILDCARD_TOKEN, XML_DEF_PREFIX,
    };
    pub use cascade_std::config_list::SYSTEM_LIST_NAME;
}

/// Producer/consumer dependency ordering.
pub mod ordering {
    pub use cascade_std::ordering::{
        DependencyGraph, DependencyNode, DependencySorter, SortOrder, find_cycle, sort,
    };
}

/// Specificity ranking of resource configurations.
pub mod selection {
    pub use cascade_std::selection::{
        ResourceSelector, SortKey, SpecificityCalculator, SpecificityComparator,
    };
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use cascade_std::testing::*;
}

/// Prelude module - common imports for Cascade.
///
/// # Usage
///
/// ```rust,ignore
/// use cascade::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        CascadeError,
        // Handlers
        Consumer,
        ContentHandler,
        HandlerBinding,
        // Profiles
        ProfileSet,
        ProfileStore,
        Producer,
        // Engine
        Registry,
        ResourceConfig,
        ResourceConfigList,
        ResourceSelector,
        SortOrder,
        sort,
    };
}
