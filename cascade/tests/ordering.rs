mod common;

use cascade::{
    HandlerBinding, OrderingError, SortOrder,
    ordering::DependencyGraph,
    sort,
    testing::StubHandler,
};
use common::{consumer, names, producer, producer_consumer, visitor};
use proptest::prelude::*;

fn position(ordered: &[HandlerBinding], name: &str) -> usize {
    ordered
        .iter()
        .position(|b| b.handler().name() == name)
        .unwrap()
}

#[test]
fn producers_run_before_their_consumers() {
    let bindings = vec![
        consumer("writer", &["order"]),
        visitor("logger"),
        producer("creator", &["order"]),
    ];
    let ordered = sort(&bindings, SortOrder::ProducersFirst).unwrap();
    assert!(position(&ordered, "creator") < position(&ordered, "writer"));
}

#[test]
fn chains_resolve_through_producer_consumers() {
    let bindings = vec![
        consumer("report", &["totals"]),
        producer_consumer("summer", &["totals"], &["lines"]),
        producer_consumer("splitter", &["lines"], &["order"]),
        producer("reader", &["order"]),
    ];
    let ordered = sort(&bindings, SortOrder::ProducersFirst).unwrap();
    assert_eq!(names(&ordered), ["reader", "splitter", "summer", "report"]);
}

#[test]
fn independent_handlers_group_by_role() {
    let bindings = vec![
        consumer("c1", &["x"]),
        visitor("v1"),
        producer_consumer("pc1", &["y"], &["z"]),
        producer("p1", &["a"]),
        consumer("c2", &["w"]),
        producer("p2", &["b"]),
        visitor("v2"),
        producer_consumer("pc2", &["q"], &["r"]),
    ];
    let ordered = sort(&bindings, SortOrder::ProducersFirst).unwrap();
    assert_eq!(
        names(&ordered),
        ["p1", "p2", "pc1", "pc2", "v1", "v2", "c1", "c2"]
    );
}

#[test]
fn two_way_dependency_names_both_handlers() {
    let bindings = vec![
        producer_consumer("P", &["a"], &["b"]),
        producer_consumer("Q", &["b"], &["a"]),
    ];
    let Err(OrderingError::CircularDependency(cycle)) =
        sort(&bindings, SortOrder::ProducersFirst)
    else {
        panic!("expected a circular dependency");
    };

    let chain: Vec<_> = cycle.chain().iter().filter_map(|c| c.resource()).collect();
    assert!(chain.contains(&"P"));
    assert!(chain.contains(&"Q"));
    assert_eq!(chain.first(), chain.last());

    let message = OrderingError::CircularDependency(cycle).to_string();
    assert!(message.contains("depends-on"));
}

#[test]
fn four_node_cycle_is_rejected() {
    let bindings = vec![
        producer_consumer("a", &["1"], &["4"]),
        producer_consumer("b", &["2"], &["1"]),
        producer_consumer("c", &["3"], &["2"]),
        producer_consumer("d", &["4"], &["3"]),
        visitor("bystander"),
    ];
    let err = sort(&bindings, SortOrder::ConsumersFirst).unwrap_err();
    let OrderingError::CircularDependency(cycle) = err;
    assert_eq!(cycle.len(), 5);
}

#[test]
fn consumers_first_reverses_producers_first() {
    let bindings = vec![
        consumer("writer", &["order"]),
        visitor("logger"),
        producer("creator", &["order"]),
        producer_consumer("enricher", &["rich"], &["order"]),
    ];
    let mut forward = names(&sort(&bindings, SortOrder::ProducersFirst).unwrap());
    let backward = names(&sort(&bindings, SortOrder::ConsumersFirst).unwrap());
    forward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn handlers_without_capabilities_keep_input_order() {
    let bindings: Vec<_> = (0..5).map(|i| visitor(&format!("v{i}"))).collect();
    let ordered = sort(&bindings, SortOrder::ProducersFirst).unwrap();
    assert_eq!(names(&ordered), ["v0", "v1", "v2", "v3", "v4"]);
    assert!(sort(&[], SortOrder::ProducersFirst).unwrap().is_empty());
}

// ============================================================================
// Properties
// ============================================================================

const PRODUCTS: [&str; 5] = ["a", "b", "c", "d", "e"];

type Shape = (Option<Vec<usize>>, Option<Vec<usize>>);

fn arb_bindings() -> impl Strategy<Value = Vec<Shape>> {
    let products = prop::option::of(prop::collection::vec(0..PRODUCTS.len(), 0..3));
    prop::collection::vec((products.clone(), products), 0..8)
}

fn build(shapes: &[Shape]) -> Vec<HandlerBinding> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, (produced, consumed))| {
            let mut handler = StubHandler::new(format!("h{i}"));
            if let Some(produced) = produced {
                handler = handler.producing(produced.iter().map(|&p| PRODUCTS[p]));
            }
            if let Some(consumed) = consumed {
                handler = handler.consuming(consumed.iter().map(|&p| PRODUCTS[p]));
            }
            handler.bind("*").unwrap()
        })
        .collect()
}

/// Kahn's algorithm, independent of the sorter's own cycle check.
fn is_acyclic(graph: &DependencyGraph) -> bool {
    let mut in_degree = vec![0usize; graph.len()];
    for (_, to) in graph.edges() {
        in_degree[to] += 1;
    }
    let mut ready: Vec<usize> = (0..graph.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut visited = 0;
    while let Some(node) = ready.pop() {
        visited += 1;
        for &next in graph.dependants(node) {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(next);
            }
        }
    }
    visited == graph.len()
}

proptest! {
    #[test]
    fn sort_fails_exactly_on_cycles(shapes in arb_bindings()) {
        let bindings = build(&shapes);
        let graph = DependencyGraph::build(&bindings);
        let result = sort(&bindings, SortOrder::ProducersFirst);
        prop_assert_eq!(result.is_ok(), is_acyclic(&graph));
    }

    #[test]
    fn every_edge_points_forward(shapes in arb_bindings()) {
        let bindings = build(&shapes);
        let graph = DependencyGraph::build(&bindings);
        if let Ok(ordered) = sort(&bindings, SortOrder::ProducersFirst) {
            prop_assert_eq!(ordered.len(), bindings.len());
            for (from, to) in graph.edges() {
                let from = position(&ordered, bindings[from].handler().name());
                let to = position(&ordered, bindings[to].handler().name());
                prop_assert!(from < to);
            }
        }
    }

    #[test]
    fn consumers_first_is_a_literal_reversal(shapes in arb_bindings()) {
        let bindings = build(&shapes);
        if let Ok(forward) = sort(&bindings, SortOrder::ProducersFirst) {
            let mut forward = names(&forward);
            forward.reverse();
            let backward = names(&sort(&bindings, SortOrder::ConsumersFirst).unwrap());
            prop_assert_eq!(forward, backward);
        }
    }
}
