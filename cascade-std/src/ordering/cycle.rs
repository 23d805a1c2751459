//! Depth-first detection of circular producer/consumer dependencies.

use super::graph::DependencyGraph;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Find a directed cycle in `graph`.
///
/// Every node is used as a walk root, in index order, so the first cycle
/// reachable in binding order is reported. The returned path starts at the
/// node that closes the loop and ends by repeating it, e.g. `[p, q, p]`.
pub fn find_cycle(graph: &DependencyGraph) -> Option<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut path = Vec::new();

    for root in 0..graph.len() {
        if marks[root] == Mark::Unvisited {
            if let Some(cycle) = visit(graph, root, &mut marks, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn visit(
    graph: &DependencyGraph,
    node: usize,
    marks: &mut [Mark],
    path: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    marks[node] = Mark::OnPath;
    path.push(node);

    for &dependant in graph.dependants(node) {
        match marks[dependant] {
            Mark::OnPath => {
                // `dependant` is an ancestor on the current path.
                let start = path.iter().rposition(|&n| n == dependant).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(dependant);
                return Some(cycle);
            }
            Mark::Unvisited => {
                if let Some(cycle) = visit(graph, dependant, marks, path) {
                    return Some(cycle);
                }
            }
            Mark::Done => {}
        }
    }

    path.pop();
    marks[node] = Mark::Done;
    None
}
