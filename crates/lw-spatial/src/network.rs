//! Walk network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`) are sorted by
//! source node and indexed by `EdgeId`.  Edges with the same source keep
//! their insertion order, so iteration is deterministic even when the graph
//! holds parallel edges between one node pair.
//!
//! # Parallel edges
//!
//! Street data routinely contains several ways joining the same two nodes
//! (a footpath beside a road, a split carriageway).  Wherever a single edge
//! has to stand for a node pair, the network uses the **shortest** one; see
//! [`WalkNetwork::min_edge_between`].
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.  Used
//! to snap the request center and sampled waypoints to graph nodes.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use lw_core::{EdgeId, GeoPoint, NodeId};

use crate::{SpatialError, SpatialResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Sufficient for
    /// nearest-node queries within a few kilometres of the center.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── WalkNetwork ───────────────────────────────────────────────────────────────

/// Directed walk graph in CSR format plus a spatial index for node snapping.
///
/// Immutable once built; share it across requests as `Arc<WalkNetwork>`.
/// Do not construct directly; use [`WalkNetworkBuilder`].
pub struct WalkNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.  Needed to trace `prev_edge` back to the
    /// source during path reconstruction.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.  Always positive.
    pub edge_length_m: Vec<f64>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
}

impl WalkNetwork {
    /// Construct an empty network with no nodes or edges.
    ///
    /// Nearest-node lookups against it fail with
    /// [`SpatialError::EmptyNetwork`].
    pub fn empty() -> Self {
        WalkNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Position of `node`, or `NodeNotFound` for an id outside the graph.
    pub fn position(&self, node: NodeId) -> SpatialResult<GeoPoint> {
        self.node_pos
            .get(node.index())
            .copied()
            .ok_or(SpatialError::NodeNotFound(node))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// A contiguous index range; no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// The shortest edge from `from` to `to`, if any.
    ///
    /// Among parallel edges of equal length the one inserted first wins.
    pub fn min_edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.out_edges(from)
            .filter(|e| self.edge_to[e.index()] == to)
            .fold(None, |best: Option<EdgeId>, e| match best {
                Some(b) if self.edge_length_m[b.index()] <= self.edge_length_m[e.index()] => Some(b),
                _ => Some(e),
            })
    }

    /// `true` if at least one directed edge joins `from` to `to`.
    #[inline]
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.out_edges(from).any(|e| self.edge_to[e.index()] == to)
    }

    /// Sum of the shortest edge between each consecutive pair of `nodes`.
    ///
    /// Fails with [`SpatialError::NoPath`] on the first pair that is not
    /// directly connected.
    pub fn path_length_m(&self, nodes: &[NodeId]) -> SpatialResult<f64> {
        nodes.windows(2).try_fold(0.0, |acc, pair| {
            let (u, v) = (pair[0], pair[1]);
            self.min_edge_between(u, v)
                .map(|e| acc + self.edge_length_m[e.index()])
                .ok_or(SpatialError::NoPath { from: u, to: v })
        })
    }

    /// Coordinates of `nodes`, in order.
    pub fn geometry(&self, nodes: &[NodeId]) -> Vec<GeoPoint> {
        nodes.iter().map(|n| self.node_pos[n.index()]).collect()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// Like [`snap_to_node`](Self::snap_to_node) but fails with
    /// [`SpatialError::EmptyNetwork`] instead of returning `None`.
    pub fn nearest_node(&self, pos: GeoPoint) -> SpatialResult<NodeId> {
        self.snap_to_node(pos).ok_or(SpatialError::EmptyNetwork)
    }

    /// Return up to `k` nearest nodes to `pos`, sorted by ascending distance.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    // ── Sub-graphs ────────────────────────────────────────────────────────

    /// Copy of the part of this network within `radius_m` (haversine) of
    /// `center`.  Edges survive only when both endpoints do.  Node ids are
    /// renumbered densely in ascending order of the original ids.
    pub fn clip(&self, center: GeoPoint, radius_m: f64) -> WalkNetwork {
        let mut remap = vec![NodeId::INVALID; self.node_count()];
        let mut b = WalkNetworkBuilder::new();

        for (i, &pos) in self.node_pos.iter().enumerate() {
            if center.distance_m(pos) <= radius_m {
                remap[i] = b.add_node(pos);
            }
        }

        for e in 0..self.edge_count() {
            let from = remap[self.edge_from[e].index()];
            let to   = remap[self.edge_to[e].index()];
            if from.is_valid() && to.is_valid() {
                b.add_directed_edge(from, to, self.edge_length_m[e]);
            }
        }

        b.build()
    }
}

// ── WalkNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`WalkNetwork`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order.  `build()`
/// stable-sorts edges by source node, constructs the CSR arrays, and
/// bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use lw_core::GeoPoint;
/// use lw_spatial::WalkNetworkBuilder;
///
/// let mut b = WalkNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(37.497, 127.027));
/// let c = b.add_node(GeoPoint::new(37.498, 127.028));
/// b.add_way(a, c, 140.0);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // walkable both ways
/// ```
pub struct WalkNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
}

impl WalkNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges to reduce
    /// reallocations when bulk-loading from OSM.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge from `from` to `to` of `length_m` metres.
    ///
    /// Non-positive or non-finite lengths are clamped to a millimetre so the
    /// positive-length invariant holds for every edge in the built network.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) {
        let length_m = if length_m.is_finite() && length_m > 0.0 { length_m } else { 0.001 };
        self.raw_edges.push(RawEdge { from, to, length_m });
    }

    /// Convenience: add edges in **both directions** (the common case: almost
    /// every footway is walkable both ways).
    pub fn add_way(&mut self, a: NodeId, b: NodeId, length_m: f64) {
        self.add_directed_edge(a, b, length_m);
        self.add_directed_edge(b, a, length_m);
    }

    /// Like [`add_way`](Self::add_way) with the length taken as the haversine
    /// distance between the two nodes.
    pub fn add_straight_way(&mut self, a: NodeId, b: NodeId) {
        let len = self.node_pos(a).distance_m(self.node_pos(b));
        self.add_way(a, b, len);
    }

    /// Look up the position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`WalkNetwork`].
    ///
    /// Time complexity: O(E log E) for edge sort + O(N log N) for R-tree bulk
    /// load, where N = nodes, E = edges.
    pub fn build(self) -> WalkNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort: parallel edges keep insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        WalkNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            spatial_idx,
        }
    }
}

impl Default for WalkNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
