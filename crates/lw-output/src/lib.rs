//! `lw-output` — response encoding and export for loopwalk routes.
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`polyline`] | 5-decimal encoded polylines of route geometry          |
//! | [`json`]     | `RouteItem` / `RouteResponse` JSON bodies              |
//! | [`csv`]      | `CsvRouteWriter` → `routes.csv`                        |
//!
//! Writers implement [`RouteWriter`] and are driven by
//! [`RouteOutputObserver`], which implements
//! `lw_recommend::RecommendObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lw_output::{CsvRouteWriter, RouteOutputObserver, RouteResponse};
//!
//! let mut obs = RouteOutputObserver::new(CsvRouteWriter::new(Path::new("./output"))?);
//! let rec = recommender.recommend_observed(&network, &start, &request, &mut rng, &mut obs)?;
//! obs.finish()?;
//! println!("{}", RouteResponse::from_recommendation(&rec)?.to_json_pretty()?);
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod observer;
pub mod polyline;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvRouteWriter;
pub use error::{OutputError, OutputResult};
pub use json::{RouteItem, RouteResponse, StartPoint};
pub use observer::RouteOutputObserver;
pub use polyline::{decode_polyline, encode_polyline};
pub use row::RouteRow;
pub use writer::RouteWriter;
