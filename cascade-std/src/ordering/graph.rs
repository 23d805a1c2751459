//! Producer/consumer dependency graph over handler bindings.

use cascade_core::HandlerBinding;

/// A node of the dependency graph.
///
/// `dependants` holds indices of the bindings that consume something this
/// binding produces, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyNode {
    dependants: Vec<usize>,
}

impl DependencyNode {
    /// Indices of the nodes depending on this one.
    pub fn dependants(&self) -> &[usize] {
        &self.dependants
    }

    /// Does the node at `index` depend on this one.
    pub fn has_dependant(&self, index: usize) -> bool {
        self.dependants.contains(&index)
    }
}

/// An index-based graph of producer → consumer edges.
///
/// Node `i` corresponds to binding `i` of the slice the graph was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: Vec<DependencyNode>,
}

impl DependencyGraph {
    /// Build the graph for `bindings`.
    ///
    /// An edge `outer → inner` is added when `outer` is a producer, `inner`
    /// is a consumer, they are different bindings, and `inner` consumes any
    /// of `outer`'s products. Bindings never depend on themselves.
    pub fn build(bindings: &[HandlerBinding]) -> Self {
        let mut nodes = vec![DependencyNode::default(); bindings.len()];

        for (outer_idx, outer) in bindings.iter().enumerate() {
            let Some(producer) = outer.handler().as_producer() else {
                continue;
            };
            let products = producer.products();
            if products.is_empty() {
                continue;
            }

            for (inner_idx, inner) in bindings.iter().enumerate() {
                if inner_idx == outer_idx {
                    continue;
                }
                let Some(consumer) = inner.handler().as_consumer() else {
                    continue;
                };
                if products.iter().any(|product| consumer.consumes(product)) {
                    nodes[outer_idx].dependants.push(inner_idx);
                }
            }
        }

        Self { nodes }
    }

    /// Build a graph directly from adjacency lists.
    ///
    /// Out-of-range indices and self-edges are dropped.
    pub fn from_edges(node_count: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut nodes = vec![DependencyNode::default(); node_count];
        for (from, to) in edges {
            if from < node_count && to < node_count && from != to && !nodes[from].has_dependant(to)
            {
                nodes[from].dependants.push(to);
            }
        }
        Self { nodes }
    }

    /// The nodes, in binding order.
    pub fn nodes(&self) -> &[DependencyNode] {
        &self.nodes
    }

    /// The dependants of node `index`.
    pub fn dependants(&self, index: usize) -> &[usize] {
        self.nodes
            .get(index)
            .map(DependencyNode::dependants)
            .unwrap_or_default()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.dependants.len()).sum()
    }

    /// Iterate over every `(producer, consumer)` edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .flat_map(|(from, node)| node.dependants.iter().map(move |&to| (from, to)))
    }
}
