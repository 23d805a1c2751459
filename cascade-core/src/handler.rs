//! # Content handlers and their capabilities
//!
//! A [`ContentHandler`] is whatever the surrounding engine invokes for a
//! fragment. Handlers may additionally declare data dependencies:
//!
//! - a [`Producer`] creates named products,
//! - a [`Consumer`] requires named products.
//!
//! Capabilities are exposed through explicit accessor methods rather than
//! type inspection, so a handler opts in by returning `Some(self)`.
//!
//! ```rust,ignore
//! struct BeanCreator;
//!
//! impl Producer for BeanCreator {
//!     fn products(&self) -> Vec<String> { vec!["order".into()] }
//! }
//!
//! impl ContentHandler for BeanCreator {
//!     fn as_producer(&self) -> Option<&dyn Producer> { Some(self) }
//! }
//! ```

use crate::config::ResourceConfig;
use bitflags::bitflags;
use std::{fmt, sync::Arc};

/// A handler that creates named products.
pub trait Producer: Send + Sync {
    /// The names of the products this handler creates.
    fn products(&self) -> Vec<String>;
}

/// A handler that requires named products.
pub trait Consumer: Send + Sync {
    /// Does this handler consume `product`.
    fn consumes(&self, product: &str) -> bool;
}

/// A handler invoked for document fragments.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `ContentHandler`",
    label = "missing `ContentHandler` implementation",
    note = "Implement `ContentHandler` and override `as_producer`/`as_consumer` to declare dependencies."
)]
pub trait ContentHandler: Send + Sync + 'static {
    /// A short name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// The producer capability, if this handler has one.
    fn as_producer(&self) -> Option<&dyn Producer> {
        None
    }

    /// The consumer capability, if this handler has one.
    fn as_consumer(&self) -> Option<&dyn Consumer> {
        None
    }

    /// The capability flags derived from the accessors.
    fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::PRODUCER, self.as_producer().is_some());
        caps.set(Capabilities::CONSUMER, self.as_consumer().is_some());
        caps
    }
}

bitflags! {
    /// Producer/consumer capability flags of a handler.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// The handler creates products.
        const PRODUCER = 1;
        /// The handler requires products.
        const CONSUMER = 1 << 1;
    }
}

impl Capabilities {
    /// The role block this capability set sorts into.
    pub fn role(self) -> Role {
        match (self.contains(Self::PRODUCER), self.contains(Self::CONSUMER)) {
            (true, false) => Role::Producer,
            (true, true) => Role::ProducerConsumer,
            (false, false) => Role::Visitor,
            (false, true) => Role::Consumer,
        }
    }
}

/// The ordering block a handler falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Producer only.
    Producer,
    /// Both producer and consumer.
    ProducerConsumer,
    /// Neither producer nor consumer.
    Visitor,
    /// Consumer only.
    Consumer,
}

impl Role {
    /// Higher scores sort first when producers lead.
    pub fn score(self) -> i8 {
        match self {
            Role::Producer => 2,
            Role::ProducerConsumer => 1,
            Role::Visitor => 0,
            Role::Consumer => -1,
        }
    }
}

/// A handler paired with the configuration it was created from.
#[derive(Clone)]
pub struct HandlerBinding {
    handler: Arc<dyn ContentHandler>,
    config: Arc<ResourceConfig>,
}

impl HandlerBinding {
    /// Bind a handler to its originating configuration.
    pub fn new(handler: Arc<dyn ContentHandler>, config: Arc<ResourceConfig>) -> Self {
        Self { handler, config }
    }

    /// The handler.
    pub fn handler(&self) -> &dyn ContentHandler {
        &*self.handler
    }

    /// The originating configuration.
    pub fn config(&self) -> &Arc<ResourceConfig> {
        &self.config
    }

    /// The handler's role block.
    pub fn role(&self) -> Role {
        self.handler.capabilities().role()
    }

    /// Does `other` wrap the same handler instance bound to the same config.
    pub fn same_binding(&self, other: &HandlerBinding) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler) && Arc::ptr_eq(&self.config, &other.config)
    }
}

impl fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerBinding")
            .field("handler", &self.handler.name())
            .field("role", &self.role())
            .field("config", &self.config.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    impl ContentHandler for Plain {}

    struct Both;
    impl Producer for Both {
        fn products(&self) -> Vec<String> {
            vec!["order".into()]
        }
    }
    impl Consumer for Both {
        fn consumes(&self, product: &str) -> bool {
            product == "header"
        }
    }
    impl ContentHandler for Both {
        fn name(&self) -> &str {
            "both"
        }
        fn as_producer(&self) -> Option<&dyn Producer> {
            Some(self)
        }
        fn as_consumer(&self) -> Option<&dyn Consumer> {
            Some(self)
        }
    }

    #[test]
    fn capabilities_follow_accessors() {
        assert_eq!(Plain.capabilities(), Capabilities::empty());
        assert_eq!(Plain.capabilities().role(), Role::Visitor);
        assert_eq!(
            Both.capabilities(),
            Capabilities::PRODUCER | Capabilities::CONSUMER
        );
        assert_eq!(Both.capabilities().role(), Role::ProducerConsumer);
    }

    #[test]
    fn role_scores_are_ordered() {
        let scores: Vec<i8> = [
            Role::Producer,
            Role::ProducerConsumer,
            Role::Visitor,
            Role::Consumer,
        ]
        .into_iter()
        .map(Role::score)
        .collect();
        assert!(scores.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn binding_identity_is_by_reference() {
        let handler: Arc<dyn ContentHandler> = Arc::new(Plain);
        let config = Arc::new(ResourceConfig::new("item").unwrap());
        let a = HandlerBinding::new(handler.clone(), config.clone());
        let b = a.clone();
        let c = HandlerBinding::new(Arc::new(Plain), config);

        assert!(a.same_binding(&b));
        assert!(!a.same_binding(&c));
    }
}
