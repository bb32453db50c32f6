//! Shortest-path trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The loop generator calls routing via the [`Router`] trait, so applications
//! can swap in A* or a contraction hierarchy without touching the generator.
//!
//! # Cost units
//!
//! Edge cost is edge length in `f64` metres.  The priority queue orders
//! costs with `f64::total_cmp`, so ordering is total and deterministic and
//! no precision is lost: [`Path::length_m`] is exactly the cost Dijkstra
//! minimised.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use lw_core::{EdgeId, NodeId};

use crate::network::WalkNetwork;
use crate::SpatialError;

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Nodes visited in order, including both endpoints.  A trivial path
    /// (`from == to`) holds the single node.
    pub nodes: Vec<NodeId>,
    /// Edges traversed in order; `nodes.len() - 1` entries.
    pub edges: Vec<EdgeId>,
    /// Sum of `edge_length_m` over `edges`.
    pub length_m: f64,
}

impl Path {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve several
/// anchors generated in parallel.
pub trait Router: Send + Sync {
    /// Compute the shortest path from `from` to `to` by edge length.
    ///
    /// `from == to` yields a trivial path.  Returns
    /// [`SpatialError::NoPath`] if `to` is unreachable.
    fn route(
        &self,
        network: &WalkNetwork,
        from: NodeId,
        to: NodeId,
    ) -> Result<Path, SpatialError>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR walk graph, weighted by edge
/// length.
///
/// Parallel edges need no special casing: relaxation only keeps an edge that
/// strictly improves a node's distance, so the shortest of several parallel
/// edges (the first inserted, on ties) is the one recorded.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        network: &WalkNetwork,
        from: NodeId,
        to: NodeId,
    ) -> Result<Path, SpatialError> {
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Path cost in metres, totally ordered for the heap.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(network: &WalkNetwork, from: NodeId, to: NodeId) -> Result<Path, SpatialError> {
    let n = network.node_count();
    if from.index() >= n {
        return Err(SpatialError::NodeNotFound(from));
    }
    if to.index() >= n {
        return Err(SpatialError::NodeNotFound(to));
    }
    if from == to {
        return Ok(Path { nodes: vec![from], edges: vec![], length_m: 0.0 });
    }

    // dist[v] = best known length (m) to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + network.edge_length_m[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    Err(SpatialError::NoPath { from, to })
}

fn reconstruct(network: &WalkNetwork, prev_edge: &[EdgeId], from: NodeId, to: NodeId) -> Path {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(from);
    nodes.extend(edges.iter().map(|e| network.edge_to[e.index()]));

    let length_m = edges.iter().map(|e| network.edge_length_m[e.index()]).sum();
    Path { nodes, edges, length_m }
}
