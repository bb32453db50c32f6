//! Unit tests for lw-output.

#[cfg(test)]
mod fixtures {
    use lw_core::{GeoPoint, NodeId, Place, TimeOfDay};
    use lw_loop::{CandidateKind, RouteCandidate};
    use lw_recommend::ScoredRoute;
    use lw_score::{Badge, FeatureEstimator};

    /// Geometry of the reference polyline `_p~iF~ps|U_ulLnnqC_mqNvxq`@`.
    pub fn reference_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(38.5, -120.2),
            GeoPoint::new(40.7, -120.95),
            GeoPoint::new(43.252, -126.453),
        ]
    }

    pub const REFERENCE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    pub fn route(id: &str, score: f64) -> ScoredRoute {
        let start = GeoPoint::new(37.4979, 127.0276);
        let corner = start.offset_m(500.0, 0.0);
        let geometry = vec![start, corner, start];
        let candidate = RouteCandidate {
            nodes:     vec![NodeId(0), NodeId(1), NodeId(0)],
            length_m:  1_000.0,
            geometry,
            waypoints: vec![NodeId(1)],
            kind:      CandidateKind::OutAndBack,
        };
        ScoredRoute {
            route_id:  id.to_owned(),
            name:      "Gangnam Station loop #1".to_owned(),
            start:     Place::at(start).with_name("Gangnam Station").with_id("kakao:123"),
            features:  FeatureEstimator::default().estimate(candidate.length_m, TimeOfDay::Day),
            candidate,
            score,
            badges:    vec![Badge::FewIntersections, Badge::Flat],
        }
    }
}

#[cfg(test)]
mod polyline_tests {
    use lw_core::GeoPoint;

    use super::fixtures::{REFERENCE_POLYLINE, reference_points};
    use crate::{decode_polyline, encode_polyline};

    #[test]
    fn encodes_reference_geometry() {
        assert_eq!(encode_polyline(&reference_points()).unwrap(), REFERENCE_POLYLINE);
    }

    #[test]
    fn empty_geometry_encodes_to_empty_string() {
        assert_eq!(encode_polyline(&[]).unwrap(), "");
    }

    #[test]
    fn decode_recovers_five_decimals() {
        let points = vec![GeoPoint::new(37.497_912_3, 127.027_634_9), GeoPoint::new(37.5, 127.03)];
        let decoded = decode_polyline(&encode_polyline(&points).unwrap()).unwrap();
        assert_eq!(decoded.len(), 2);
        for (a, b) in points.iter().zip(&decoded) {
            assert!((a.lat - b.lat).abs() < 1e-5);
            assert!((a.lon - b.lon).abs() < 1e-5);
        }
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let bad = [GeoPoint::new(95.0, 10.0)];
        assert!(encode_polyline(&bad).is_err());
    }
}

#[cfg(test)]
mod json_tests {
    use serde_json::Value;

    use super::fixtures::route;
    use crate::{RouteItem, RouteResponse};

    #[test]
    fn item_carries_route_fields() {
        let item = RouteItem::from_scored(&route("loop_0_abcdef", 84.5)).unwrap();
        assert_eq!(item.route_id, "loop_0_abcdef");
        assert_eq!(item.start.place_id.as_deref(), Some("kakao:123"));
        assert_eq!(item.start.lng, 127.0276);
        assert_eq!(item.beginner_score(), Some(84.5));
        assert!(!item.polyline.is_empty());
    }

    #[test]
    fn response_json_shape() {
        let response = RouteResponse::from_routes(&[route("loop_0_abcdef", 84.5)]).unwrap();
        let v: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

        let r = &v["routes"][0];
        assert_eq!(r["route_id"], "loop_0_abcdef");
        assert_eq!(r["name"], "Gangnam Station loop #1");
        assert_eq!(r["start"]["lat"], 37.4979);
        assert_eq!(r["start"]["name"], "Gangnam Station");
        assert!(r["start"]["address"].is_null());
        assert_eq!(r["scores"]["beginner"], 84.5);
        assert_eq!(r["features"]["dist_km"], 1.0);
        assert_eq!(r["features"]["duration_min_est"], 9.0);
        assert!(r["features"].get("lamps_per_km").is_none(), "unmeasured lighting is omitted");
        assert_eq!(r["badges"], serde_json::json!(["few-intersections", "flat"]));
    }

    #[test]
    fn response_parses_back() {
        let response = RouteResponse::from_routes(&[route("a", 10.0), route("b", 5.0)]).unwrap();
        let back: RouteResponse = serde_json::from_str(&response.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, response);
    }

    #[test]
    fn empty_response() {
        let response = RouteResponse::from_routes(&[]).unwrap();
        assert_eq!(response.to_json().unwrap(), r#"{"routes":[]}"#);
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::fixtures::route;
    use crate::csv::{CsvRouteWriter, ROUTES_FILE};
    use crate::row::RouteRow;
    use crate::writer::RouteWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_file_created() {
        let dir = tmp();
        let _w = CsvRouteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(ROUTES_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvRouteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(ROUTES_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers[0], "rank");
        assert_eq!(headers[5], "dist_km");
        assert_eq!(headers[11], "polyline");
    }

    #[test]
    fn rows_ranked_from_one() {
        let rows = RouteRow::from_ranked(&[route("a", 90.0), route("b", 80.0)]).unwrap();
        assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(rows[0].badges, "few-intersections;flat");
        assert_eq!(rows[1].lamps_per_km, None);
    }

    #[test]
    fn csv_rows_written() {
        let dir = tmp();
        let mut w = CsvRouteWriter::new(dir.path()).unwrap();
        let rows = RouteRow::from_ranked(&[route("a", 90.0), route("b", 80.25)]).unwrap();
        w.write_routes(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(ROUTES_FILE)).unwrap();
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][0], "2");
        assert_eq!(&records[1][1], "b");
        assert_eq!(&records[1][7], "80.25");
        assert_eq!(&records[0][9], "", "no lamp density without lamp data");
        assert_eq!(&records[0][11], rows[0].polyline);
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvRouteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use lw_recommend::RecommendObserver;

    use super::fixtures::route;
    use crate::csv::ROUTES_FILE;
    use crate::{CsvRouteWriter, OutputError, OutputResult, RouteOutputObserver, RouteRow, RouteWriter};

    #[derive(Default)]
    struct Collect {
        rows:     Vec<RouteRow>,
        finished: usize,
    }

    impl RouteWriter for Collect {
        fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
            self.rows.extend_from_slice(rows);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    struct Failing;

    impl RouteWriter for Failing {
        fn write_routes(&mut self, _rows: &[RouteRow]) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn ranked_routes_are_written() {
        let mut obs = RouteOutputObserver::new(Collect::default());
        obs.on_ranked(&[route("a", 90.0), route("b", 80.0)]);
        obs.on_ranked(&[route("c", 70.0)]);
        assert_eq!(obs.written(), 3);
        obs.finish().unwrap();

        let w = obs.into_writer();
        assert_eq!(w.finished, 1);
        assert_eq!(w.rows.iter().map(|r| r.route_id.as_str()).collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(w.rows[2].rank, 1);
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = RouteOutputObserver::new(Failing);
        obs.on_ranked(&[route("a", 90.0)]);
        obs.on_ranked(&[route("b", 80.0)]);
        assert_eq!(obs.written(), 0);
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn finish_reports_stored_error() {
        let mut obs = RouteOutputObserver::new(Failing);
        obs.on_ranked(&[route("a", 90.0)]);
        assert!(obs.finish().is_err());
    }

    #[test]
    fn csv_backend_through_observer() {
        let dir = tempfile::tempdir().unwrap();
        let mut obs = RouteOutputObserver::new(CsvRouteWriter::new(dir.path()).unwrap());
        obs.on_ranked(&[route("a", 90.0)]);
        obs.finish().unwrap();

        let text = std::fs::read_to_string(dir.path().join(ROUTES_FILE)).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Gangnam Station loop #1"));
    }
}
