//! CSV output backend.
//!
//! Creates `routes.csv` in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{OutputResult, RouteRow};
use crate::writer::RouteWriter;

pub const ROUTES_FILE: &str = "routes.csv";

const HEADER: [&str; 12] = [
    "rank",
    "route_id",
    "name",
    "start_lat",
    "start_lon",
    "dist_km",
    "duration_min_est",
    "score",
    "lighting_index",
    "lamps_per_km",
    "badges",
    "polyline",
];

/// Writes ranked routes to one CSV file.
pub struct CsvRouteWriter {
    routes:   Writer<File>,
    finished: bool,
}

impl CsvRouteWriter {
    /// Create `routes.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut routes = Writer::from_path(dir.join(ROUTES_FILE))?;
        routes.write_record(HEADER)?;
        Ok(Self { routes, finished: false })
    }
}

impl RouteWriter for CsvRouteWriter {
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        for row in rows {
            self.routes.write_record(&[
                row.rank.to_string(),
                row.route_id.clone(),
                row.name.clone(),
                format!("{:.6}", row.start_lat),
                format!("{:.6}", row.start_lon),
                format!("{:.3}", row.distance_km),
                format!("{:.1}", row.duration_min),
                format!("{:.2}", row.score),
                format!("{:.3}", row.lighting_index),
                row.lamps_per_km.map(|v| format!("{v:.2}")).unwrap_or_default(),
                row.badges.clone(),
                row.polyline.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.routes.flush()?;
        Ok(())
    }
}
