//! Dependency-aware ordering of handler bindings.

use super::{cycle::find_cycle, graph::DependencyGraph};
use cascade_core::{DependencyCycle, HandlerBinding, OrderingError};
use std::cmp::Reverse;

/// The overall direction of the final order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Producers before consumers.
    #[default]
    ProducersFirst,
    /// The producers-first order, reversed element by element.
    ConsumersFirst,
}

/// Orders handler bindings so producers run before their consumers.
///
/// Sorting happens in three steps:
///
/// 1. **Cycle check**: any circular producer/consumer relationship aborts
///    the sort with [`OrderingError::CircularDependency`].
/// 2. **Promotion**: the first binding found after one of its dependants is
///    moved to just before that dependant, and the scan restarts, until a
///    full scan moves nothing.
/// 3. **Role blocks**: a stable sort groups producers, then
///    producer/consumers, then plain visitors, then consumers.
///
/// With [`SortOrder::ConsumersFirst`] the result of step 3 is reversed.
///
/// # Example
///
/// ```rust,ignore
/// let ordered = DependencySorter::new(SortOrder::ProducersFirst).sort(&bindings)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencySorter {
    order: SortOrder,
}

impl DependencySorter {
    /// Create a sorter for the given direction.
    pub fn new(order: SortOrder) -> Self {
        Self { order }
    }

    /// The direction this sorter produces.
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Return `bindings` in invocation order. The input is left untouched.
    pub fn sort(&self, bindings: &[HandlerBinding]) -> Result<Vec<HandlerBinding>, OrderingError> {
        let indices = self.sort_indices(bindings)?;
        Ok(indices.into_iter().map(|i| bindings[i].clone()).collect())
    }

    /// Like [`sort`](Self::sort), but returns positions into `bindings`.
    pub fn sort_indices(&self, bindings: &[HandlerBinding]) -> Result<Vec<usize>, OrderingError> {
        let graph = DependencyGraph::build(bindings);

        if let Some(cycle) = find_cycle(&graph) {
            let chain = cycle
                .into_iter()
                .map(|i| bindings[i].config().clone())
                .collect();
            let cycle = DependencyCycle::new(chain);
            #[cfg(feature = "tracing")]
            tracing::warn!(length = cycle.len(), "circular producer/consumer dependency");
            return Err(OrderingError::CircularDependency(cycle));
        }

        let mut order = promote_dependencies(&graph);

        let scores: Vec<i8> = bindings.iter().map(|b| b.role().score()).collect();
        order.sort_by_key(|&i| Reverse(scores[i]));

        if self.order == SortOrder::ConsumersFirst {
            order.reverse();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            bindings = bindings.len(),
            edges = graph.edge_count(),
            order = ?self.order,
            "handler bindings sorted"
        );
        Ok(order)
    }
}

/// Sort `bindings` in the given direction.
pub fn sort(
    bindings: &[HandlerBinding],
    order: SortOrder,
) -> Result<Vec<HandlerBinding>, OrderingError> {
    DependencySorter::new(order).sort(bindings)
}

/// Move producers ahead of their dependants until the order is stable.
///
/// The graph must be acyclic.
fn promote_dependencies(graph: &DependencyGraph) -> Vec<usize> {
    let len = graph.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut position: Vec<usize> = (0..len).collect();

    'scan: loop {
        for i in 0..len {
            let node = order[i];
            for &dependant in graph.dependants(node) {
                let target = position[dependant];
                if target < i {
                    order[target..=i].rotate_right(1);
                    for (offset, &moved) in order[target..=i].iter().enumerate() {
                        position[moved] = target + offset;
                    }
                    #[cfg(feature = "tracing")]
                    tracing::trace!(node, from = i, to = target, "promoted producer");
                    continue 'scan;
                }
            }
        }
        return order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_places_producers_before_dependants() {
        // 2 -> 1 -> 0
        let graph = DependencyGraph::from_edges(3, [(2, 1), (1, 0)]);
        assert_eq!(promote_dependencies(&graph), [2, 1, 0]);
    }

    #[test]
    fn promotion_leaves_satisfied_orders_alone() {
        let graph = DependencyGraph::from_edges(4, [(0, 2), (1, 3)]);
        assert_eq!(promote_dependencies(&graph), [0, 1, 2, 3]);
    }

    #[test]
    fn promotion_moves_to_first_violated_dependant() {
        // 3 feeds both 0 and 2; it lands right before 0.
        let graph = DependencyGraph::from_edges(4, [(3, 2), (3, 0)]);
        assert_eq!(promote_dependencies(&graph), [3, 0, 1, 2]);
    }

    #[test]
    fn promotion_handles_empty_graphs() {
        assert!(promote_dependencies(&DependencyGraph::default()).is_empty());
    }
}
