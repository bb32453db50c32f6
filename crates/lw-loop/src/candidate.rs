//! Closed route candidates produced by the generator.

use lw_core::{GeoPoint, NodeId};
use lw_spatial::WalkNetwork;

/// How a candidate was constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CandidateKind {
    /// Stitched through randomly sampled waypoints.
    Loop,
    /// Out to a single turnaround point and back.
    OutAndBack,
}

/// A closed walk starting and ending at the same node.
///
/// Built once by the generator and never mutated.  For the network it was
/// built on, every consecutive node pair is joined by an edge and
/// `length_m` is the sum of the shortest edge between each pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    /// Node sequence; `nodes.first() == nodes.last()`.
    pub nodes: Vec<NodeId>,

    /// Total length in metres.
    pub length_m: f64,

    /// Coordinates of `nodes`, in order.
    pub geometry: Vec<GeoPoint>,

    /// The sampled waypoints (or the turnaround node), in visiting order.
    pub waypoints: Vec<NodeId>,

    pub kind: CandidateKind,
}

impl RouteCandidate {
    /// Start (and end) node.
    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Start coordinate.
    pub fn start_point(&self) -> Option<GeoPoint> {
        self.geometry.first().copied()
    }

    pub fn is_closed(&self) -> bool {
        self.nodes.len() >= 2 && self.nodes.first() == self.nodes.last()
    }

    #[inline]
    pub fn length_km(&self) -> f64 {
        self.length_m / 1_000.0
    }

    /// Geometry as `(longitude, latitude)` pairs, the order polyline and
    /// GeoJSON encoders expect.
    pub fn lon_lat(&self) -> Vec<(f64, f64)> {
        self.geometry.iter().map(|p| p.lon_lat()).collect()
    }

    /// `true` if the candidate is closed, every step follows an edge of
    /// `network`, and `length_m` matches the shortest-edge sum.
    pub fn is_consistent_with(&self, network: &WalkNetwork) -> bool {
        if !self.is_closed() || self.geometry.len() != self.nodes.len() {
            return false;
        }
        match network.path_length_m(&self.nodes) {
            Ok(len) => (len - self.length_m).abs() <= 1e-6 * len.max(1.0),
            Err(_)  => false,
        }
    }
}
