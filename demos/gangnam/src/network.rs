//! Synthetic walk network around Gangnam Station, Seoul.
//!
//! A square street grid stands in for an OSM extract so the demo runs
//! without downloads.  Blocks are 100 m on a side; the grid spans 4 km.

use lw_core::{GeoPoint, Place};
use lw_spatial::{WalkNetwork, WalkNetworkBuilder};

pub const GANGNAM_STATION: GeoPoint = GeoPoint { lat: 37.4979, lon: 127.0276 };

const HALF_BLOCKS: i32 = 20;
const BLOCK_M:     f64 = 100.0;

/// Build the grid and return it with the start place.
pub fn build_network() -> (WalkNetwork, Place) {
    let side = (2 * HALF_BLOCKS + 1) as usize;
    let mut b = WalkNetworkBuilder::with_capacity(side * side, 4 * side * side);

    let mut ids = Vec::with_capacity(side * side);
    for row in -HALF_BLOCKS..=HALF_BLOCKS {
        for col in -HALF_BLOCKS..=HALF_BLOCKS {
            let pos = GANGNAM_STATION.offset_m(row as f64 * BLOCK_M, col as f64 * BLOCK_M);
            ids.push(b.add_node(pos));
        }
    }

    for r in 0..side {
        for c in 0..side {
            let here = ids[r * side + c];
            if c + 1 < side {
                b.add_straight_way(here, ids[r * side + c + 1]);
            }
            if r + 1 < side {
                b.add_straight_way(here, ids[(r + 1) * side + c]);
            }
        }
    }

    let start = Place::at(GANGNAM_STATION)
        .with_name("Gangnam Station")
        .with_address("396 Gangnam-daero, Gangnam-gu, Seoul");
    (b.build(), start)
}
