//! Testing utilities for Cascade.
//!
//! This module provides handlers with configurable capabilities so that
//! selection and ordering can be exercised without real content handlers.
//!
//! # Features
//!
//! - [`StubHandler`]: A handler that can be a producer, a consumer, both, or neither
//! - [`binding`]: Build a [`HandlerBinding`] from a handler and a selector

use cascade_core::{
    ConfigError, Consumer, ContentHandler, HandlerBinding, Producer, ResourceConfig,
};
use std::sync::Arc;

// ============================================================================
// Stub Handler
// ============================================================================

/// A handler whose producer/consumer capabilities are set by the test.
///
/// # Example
///
/// ```rust,ignore
/// let creator = StubHandler::new("order-bean").producing(["order"]);
/// let writer = StubHandler::new("order-writer").consuming(["order"]);
///
/// let ordered = sort(&[writer.bind("order")?, creator.bind("order")?], SortOrder::ProducersFirst)?;
/// assert_eq!(ordered[0].handler().name(), "order-bean");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubHandler {
    name: String,
    products: Option<Vec<String>>,
    consumed: Option<Vec<String>>,
}

impl StubHandler {
    /// Create a plain visitor with no dependencies.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            products: None,
            consumed: None,
        }
    }

    /// Make the handler a producer of `products`.
    pub fn producing<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products
            .get_or_insert_with(Vec::new)
            .extend(products.into_iter().map(Into::into));
        self
    }

    /// Make the handler a consumer of `products`.
    pub fn consuming<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumed
            .get_or_insert_with(Vec::new)
            .extend(products.into_iter().map(Into::into));
        self
    }

    /// Bind the handler to a fresh config for `selector`, using the handler
    /// name as the resource.
    pub fn bind(self, selector: &str) -> Result<HandlerBinding, ConfigError> {
        let config = ResourceConfig::new(selector)?.with_resource(self.name.clone());
        Ok(self.bind_config(Arc::new(config)))
    }

    /// Bind the handler to an existing config.
    pub fn bind_config(self, config: Arc<ResourceConfig>) -> HandlerBinding {
        HandlerBinding::new(Arc::new(self), config)
    }
}

impl Producer for StubHandler {
    fn products(&self) -> Vec<String> {
        self.products.clone().unwrap_or_default()
    }
}

impl Consumer for StubHandler {
    fn consumes(&self, product: &str) -> bool {
        self.consumed
            .as_ref()
            .is_some_and(|consumed| consumed.iter().any(|c| c == product))
    }
}

impl ContentHandler for StubHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_producer(&self) -> Option<&dyn Producer> {
        self.products.as_ref().map(|_| self as &dyn Producer)
    }

    fn as_consumer(&self) -> Option<&dyn Consumer> {
        self.consumed.as_ref().map(|_| self as &dyn Consumer)
    }
}

// ============================================================================
// Binding helper
// ============================================================================

/// Bind any handler to a fresh config for `selector`.
pub fn binding<H: ContentHandler>(handler: H, selector: &str) -> Result<HandlerBinding, ConfigError> {
    Ok(HandlerBinding::new(
        Arc::new(handler),
        Arc::new(ResourceConfig::new(selector)?),
    ))
}
