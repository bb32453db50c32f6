//! OSM PBF loader, enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use lw_core::GeoPoint;
//! use lw_spatial::osm::load_walk_network;
//!
//! let center = GeoPoint::new(37.4979, 127.0276);
//! let network = load_walk_network(Path::new("seoul.osm.pbf"), Some((center, 2_000.0)))?;
//! ```
//!
//! # What is loaded
//!
//! Only `highway=*` ways a pedestrian may use are included (see
//! [`is_walkable`]).  Every walkable way is added in both directions:
//! `oneway` restricts vehicles, not people on foot.  Edge length is the
//! haversine distance between consecutive way nodes.
//!
//! When a `(center, radius_m)` bound is given, only nodes within the radius
//! are kept and ways are cut where they leave it.
//!
//! # Memory note
//!
//! The loader buffers OSM node coordinates in a `HashMap<i64, GeoPoint>` for
//! the first pass (ways reference nodes by OSM id).  With a radius bound
//! only nodes inside the bound are buffered.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use osmpbf::{Element, ElementReader};

use lw_core::{GeoPoint, NodeId};

use crate::network::{WalkNetwork, WalkNetworkBuilder};
use crate::SpatialError;

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a walk network from an OSM PBF file, optionally bounded to a circle.
///
/// # Errors
///
/// Returns [`SpatialError::Osm`] on open or parse errors.
pub fn load_walk_network(
    path:  &Path,
    bound: Option<(GeoPoint, f64)>,
) -> Result<WalkNetwork, SpatialError> {
    // ── Phase 1: collect in-bound OSM nodes + walkable ways ───────────────
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let in_bound = |p: GeoPoint| match bound {
        Some((center, radius_m)) => center.distance_m(p) <= radius_m,
        None => true,
    };

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut walk_ways: Vec<Vec<i64>> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                let p = GeoPoint::new(n.lat(), n.lon());
                if in_bound(p) {
                    all_nodes.insert(n.id(), p);
                }
            }
            Element::DenseNode(n) => {
                let p = GeoPoint::new(n.lat(), n.lon());
                if in_bound(p) {
                    all_nodes.insert(n.id(), p);
                }
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                if is_walkable(&tags) {
                    walk_ways.push(w.refs().collect());
                }
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    // ── Phase 2: identify way-referenced node IDs that survived the bound ─
    let walk_node_ids: HashSet<i64> = walk_ways
        .iter()
        .flat_map(|refs| refs.iter().copied())
        .filter(|id| all_nodes.contains_key(id))
        .collect();

    // ── Phase 3: build network ────────────────────────────────────────────
    let mut builder = WalkNetworkBuilder::with_capacity(
        walk_node_ids.len(),
        walk_node_ids.len() * 2,
    );

    // Sorted so NodeIds are reproducible across runs (HashSet order is not).
    let mut ordered: Vec<i64> = walk_node_ids.into_iter().collect();
    ordered.sort_unstable();

    let mut osm_to_lw: HashMap<i64, NodeId> = HashMap::with_capacity(ordered.len());
    for osm_id in ordered {
        if let Some(&pos) = all_nodes.get(&osm_id) {
            osm_to_lw.insert(osm_id, builder.add_node(pos));
        }
    }

    // Node map no longer needed.
    drop(all_nodes);

    // Ways that leave the bound simply lose the out-of-bound segments.
    for refs in &walk_ways {
        for window in refs.windows(2) {
            if let (Some(&a), Some(&b)) = (osm_to_lw.get(&window[0]), osm_to_lw.get(&window[1])) {
                builder.add_straight_way(a, b);
            }
        }
    }

    log::info!(
        "loaded walk network from {}: {} nodes, {} edges",
        path.display(),
        builder.node_count(),
        builder.edge_count()
    );

    Ok(builder.build())
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// `true` if a pedestrian may use a way with these tags.
///
/// Motorways and trunk roads are excluded, as are ways under construction,
/// areas, and anything tagged `foot=no` or private access.  Every other
/// `highway=*` value, including roads without sidewalks tagged, counts as
/// walkable.
pub(crate) fn is_walkable(tags: &[(&str, &str)]) -> bool {
    let get = |key: &str| tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);

    let Some(highway) = get("highway") else {
        return false;
    };

    let excluded_class = matches!(
        highway,
        "motorway" | "motorway_link" | "trunk" | "trunk_link"
            | "construction" | "proposed" | "abandoned" | "platform" | "raceway"
            | "bus_guideway" | "escape"
    );
    let foot_banned = matches!(get("foot"), Some("no"));
    let private     = matches!(get("access"), Some("private" | "no")) && get("foot").is_none();
    let area        = matches!(get("area"), Some("yes"));

    !(excluded_class || foot_banned || private || area)
}
