//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The ranker calls routing via the [`Router`] trait, so applications can
//! swap in A* or a contraction hierarchy without touching the scorer.  The
//! default [`DijkstraRouter`] minimises total edge length in metres.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ev_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Nodes visited in order, source and destination included.
    pub nodes: Vec<NodeId>,
    /// Edges traversed in order; always `nodes.len() - 1` long.
    pub edges: Vec<EdgeId>,
    /// Sum of edge lengths in metres.
    pub length_m: f64,
}

impl Path {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn length_km(&self) -> f64 {
        self.length_m / 1_000.0
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a single router can sit in a
/// shared, read-only evacuation context.
pub trait Router: Send + Sync {
    /// Compute the shortest path from `from` to `to`.
    ///
    /// `from == to` yields a trivial one-node path.  Unreachable targets
    /// yield [`SpatialError::NoRoute`].
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Path>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph, weighted by
/// `edge_length_m`.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Path> {
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap key: metres, totally ordered.
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

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Path> {
    for node in [from, to] {
        if !network.contains(node) {
            return Err(SpatialError::NodeNotFound(node));
        }
    }
    if from == to {
        return Ok(Path { nodes: vec![from], edges: vec![], length_m: 0.0 });
    }

    let n = network.node_count();
    // dist[v] = best known length (m) to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    // Equal costs pop in NodeId order.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, to, cost));
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

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], to: NodeId, length_m: f64) -> Path {
    let mut edges = Vec::new();
    let mut nodes = vec![to];
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    edges.reverse();
    nodes.reverse();
    Path { nodes, edges, length_m }
}
