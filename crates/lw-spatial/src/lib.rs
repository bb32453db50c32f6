//! `lw-spatial` — walk network, nearest-node lookup, and shortest paths.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`network`]  | `WalkNetwork` (CSR + R-tree), `WalkNetworkBuilder`         |
//! | [`router`]   | `Router` trait, `Path`, `DijkstraRouter`                  |
//! | [`provider`] | `NetworkProvider` trait, `ClipProvider`, `PbfProvider`     |
//! | [`cache`]    | `NetworkCache` (bounded LRU of Arc snapshots, swap-on-refresh) |
//! | [`osm`]      | `load_walk_network` (feature = `"osm"` only)              |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `serde` | Derives `Serialize`/`Deserialize` on `lw-core` types.        |

pub mod cache;
pub mod error;
pub mod network;
pub mod provider;
pub mod router;

#[cfg(feature = "osm")]
pub mod osm;


pub use cache::NetworkCache;
pub use error::{SpatialError, SpatialResult};
pub use network::{WalkNetwork, WalkNetworkBuilder};
pub use provider::{ClipProvider, NetworkProvider};
pub use router::{DijkstraRouter, Path, Router};

#[cfg(feature = "osm")]
pub use provider::PbfProvider;
