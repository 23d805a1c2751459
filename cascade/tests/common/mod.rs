#![allow(dead_code)]

use cascade::{HandlerBinding, ProfileSet, ResourceConfig, testing::StubHandler};
use std::sync::Arc;

// ============================================================================
// Configs
// ============================================================================

pub fn config(selector: &str) -> ResourceConfig {
    ResourceConfig::new(selector).unwrap()
}

pub fn targeted(selector: &str, target_profile: &str) -> ResourceConfig {
    config(selector).with_target_profile(target_profile).unwrap()
}

pub fn shared(config: ResourceConfig) -> Arc<ResourceConfig> {
    Arc::new(config)
}

pub fn resources(configs: &[Arc<ResourceConfig>]) -> Vec<String> {
    configs
        .iter()
        .map(|c| c.resource().unwrap_or("none").to_owned())
        .collect()
}

pub fn profile_set(base: &str, members: &[&str]) -> ProfileSet {
    ProfileSet::with_profiles(base, members.iter().copied()).unwrap()
}

// ============================================================================
// Bindings
// ============================================================================

pub fn producer(name: &str, products: &[&str]) -> HandlerBinding {
    StubHandler::new(name)
        .producing(products.iter().copied())
        .bind("*")
        .unwrap()
}

pub fn consumer(name: &str, consumed: &[&str]) -> HandlerBinding {
    StubHandler::new(name)
        .consuming(consumed.iter().copied())
        .bind("*")
        .unwrap()
}

pub fn producer_consumer(name: &str, products: &[&str], consumed: &[&str]) -> HandlerBinding {
    StubHandler::new(name)
        .producing(products.iter().copied())
        .consuming(consumed.iter().copied())
        .bind("*")
        .unwrap()
}

pub fn visitor(name: &str) -> HandlerBinding {
    StubHandler::new(name).bind("*").unwrap()
}

pub fn names(bindings: &[HandlerBinding]) -> Vec<String> {
    bindings
        .iter()
        .map(|b| b.handler().name().to_owned())
        .collect()
}
