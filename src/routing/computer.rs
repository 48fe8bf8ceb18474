//! Best-route search.
//!
//! A* over the graph with the straight-line distance to the destination as
//! the heuristic. Edge costs are `length * cost_factor`, so with a factor of
//! 1 everywhere the heuristic is admissible and the result is the true
//! shortest path; cost functions only ever make edges more expensive, which
//! keeps it admissible for them too.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::Graph;

use super::cost::CostFunction;
use super::edge::Edge;
use super::route::{Route, SingleRoute};

/// How the search reached a node: the predecessor node and which of its
/// outgoing edges was taken.
#[derive(Debug, Clone, Copy)]
struct PredecessorLink {
    node_id: u32,
    out_edge_index: u8,
}

/// Frontier entry ordered by f-score. `BinaryHeap` is a max-heap, so the
/// ordering is reversed to pop the smallest score first.
struct QueueEntry {
    score: f64,
    node_id: u32,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
    }
}

/// Computes best routes on a graph under a cost function.
pub struct RouteComputer<'a, C> {
    graph: &'a Graph,
    cost_function: C,
}

impl<'a, C: CostFunction> RouteComputer<'a, C> {
    pub fn new(graph: &'a Graph, cost_function: C) -> Self {
        Self {
            graph,
            cost_function,
        }
    }

    /// The cheapest route from `start_node_id` to `end_node_id`, or `None`
    /// when no route exists (disconnected, or every path crosses a forbidden
    /// edge).
    ///
    /// # Panics
    ///
    /// Panics if the two nodes are identical.
    pub fn best_route_between(&self, start_node_id: u32, end_node_id: u32) -> Option<Route> {
        assert!(
            start_node_id != end_node_id,
            "start and end node must differ"
        );

        let graph = self.graph;
        let end_point = graph.node_point(end_node_id);

        // f64::NEG_INFINITY marks a settled node: stale heap entries for it
        // are skipped instead of being removed from the heap.
        let mut distances = vec![f64::INFINITY; graph.node_count()];
        let mut predecessors: Vec<Option<PredecessorLink>> = vec![None; graph.node_count()];
        let mut frontier = BinaryHeap::new();

        distances[start_node_id as usize] = 0.0;
        frontier.push(QueueEntry {
            score: graph.node_point(start_node_id).distance_to(end_point),
            node_id: start_node_id,
        });

        while let Some(entry) = frontier.pop() {
            let node_id = entry.node_id;
            if distances[node_id as usize] == f64::NEG_INFINITY {
                continue;
            }
            if node_id == end_node_id {
                let route = self.reconstruct(start_node_id, end_node_id, &predecessors);
                tracing::debug!(
                    start = start_node_id,
                    end = end_node_id,
                    length = route.length(),
                    edges = route.edges().len(),
                    "route found"
                );
                return Some(route);
            }

            let from_distance = distances[node_id as usize];
            for out_edge_index in 0..graph.node_out_degree(node_id) {
                let edge_id = graph.node_out_edge_id(node_id, out_edge_index);
                let factor = self.cost_function.cost_factor(node_id, edge_id);
                let target = graph.edge_target_node_id(edge_id);
                let candidate = from_distance + factor * graph.edge_length(edge_id);
                if candidate < distances[target as usize] {
                    distances[target as usize] = candidate;
                    predecessors[target as usize] = Some(PredecessorLink {
                        node_id,
                        out_edge_index: out_edge_index as u8,
                    });
                    frontier.push(QueueEntry {
                        score: candidate + graph.node_point(target).distance_to(end_point),
                        node_id: target,
                    });
                }
            }
            distances[node_id as usize] = f64::NEG_INFINITY;
        }
        None
    }

    /// Walk the predecessor links back from the destination and turn them
    /// into a forward edge sequence.
    fn reconstruct(
        &self,
        start_node_id: u32,
        end_node_id: u32,
        predecessors: &[Option<PredecessorLink>],
    ) -> Route {
        let mut edges = Vec::new();
        let mut node_id = end_node_id;
        while node_id != start_node_id {
            let link = predecessors[node_id as usize]
                .expect("every settled node other than the start has a predecessor");
            let edge_id = self
                .graph
                .node_out_edge_id(link.node_id, u32::from(link.out_edge_index));
            edges.push(Edge::of(self.graph, edge_id, link.node_id, node_id));
            node_id = link.node_id;
        }
        edges.reverse();
        Route::Single(SingleRoute::new(edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::bounds;
    use crate::graph::attributes::AttributeSet;
    use crate::graph::edges::EdgeTable;
    use crate::graph::nodes::NodeTable;
    use crate::graph::sectors::SectorTable;
    use crate::routing::cost::UniformCost;

    /// A graph of nodes on a horizontal line, 100 m apart. `out_edges[i]`
    /// lists the targets of node i; every edge is 100 m per hop crossed.
    fn line_graph(out_edges: &[&[u32]]) -> Graph {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut profile_ids = Vec::new();
        let mut edge_count = 0u32;
        for (i, targets) in out_edges.iter().enumerate() {
            let e = ((bounds::MIN_E as i32) + 1000 + 100 * i as i32) << 4;
            let n = ((bounds::MIN_N as i32) + 1000) << 4;
            nodes.extend_from_slice(&e.to_be_bytes());
            nodes.extend_from_slice(&n.to_be_bytes());
            nodes.extend_from_slice(&(((targets.len() as u32) << 28) | edge_count).to_be_bytes());
            for &target in *targets {
                let hops = (i as i32 - target as i32).unsigned_abs() as u16;
                edges.extend_from_slice(&(target as i32).to_be_bytes());
                edges.extend_from_slice(&((hops * 100) << 4).to_be_bytes());
                edges.extend_from_slice(&0u16.to_be_bytes());
                edges.extend_from_slice(&0u16.to_be_bytes());
                profile_ids.extend_from_slice(&0u32.to_be_bytes());
                edge_count += 1;
            }
        }
        let mut sectors = Vec::new();
        for _ in 0..(128 * 128) {
            sectors.extend_from_slice(&0i32.to_be_bytes());
            sectors.extend_from_slice(&0u16.to_be_bytes());
        }
        Graph::new(
            NodeTable::new(nodes),
            SectorTable::new(sectors),
            EdgeTable::new(edges, profile_ids, Vec::new()),
            vec![AttributeSet::new(0)],
        )
    }

    #[test]
    fn finds_the_single_edge_route() {
        let graph = line_graph(&[&[1], &[]]);
        let computer = RouteComputer::new(&graph, UniformCost);
        let route = computer.best_route_between(0, 1).unwrap();
        assert_eq!(route.length(), 100.0);
        let edges = route.edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from_node_id, 0);
        assert_eq!(edges[0].to_node_id, 1);
    }

    #[test]
    fn equal_cost_paths_yield_the_optimal_length() {
        // 0 -> 1 -> 2 (100 + 100) and the direct 0 -> 2 (200 m) tie; either
        // way the best distance is 200.
        let graph = line_graph(&[&[1, 2], &[2], &[]]);
        let computer = RouteComputer::new(&graph, UniformCost);
        let route = computer.best_route_between(0, 2).unwrap();
        assert_eq!(route.length(), 200.0);
    }

    #[test]
    fn forbidden_edges_reroute_the_search() {
        let graph = line_graph(&[&[1, 2], &[2], &[]]);
        // Forbid the two-hop path's first edge (edge 0: node 0 -> node 1).
        let avoid_first = |_node: u32, edge: u32| {
            if edge == 0 {
                f64::INFINITY
            } else {
                1.0
            }
        };
        let computer = RouteComputer::new(&graph, avoid_first);
        let route = computer.best_route_between(0, 2).unwrap();
        assert_eq!(route.edges().len(), 1);
        assert_eq!(route.length(), 200.0);
    }

    #[test]
    fn disconnected_nodes_have_no_route() {
        let graph = line_graph(&[&[1], &[], &[]]);
        let computer = RouteComputer::new(&graph, UniformCost);
        assert!(computer.best_route_between(0, 2).is_none());
        // Edges are directed: nothing leads back to node 0.
        assert!(computer.best_route_between(1, 0).is_none());
    }

    #[test]
    #[should_panic]
    fn identical_endpoints_are_rejected() {
        let graph = line_graph(&[&[1], &[]]);
        RouteComputer::new(&graph, UniformCost).best_route_between(0, 0);
    }
}
