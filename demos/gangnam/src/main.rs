//! gangnam — loop recommendations around Gangnam Station.
//!
//! Fetches a walk network (clipped from a synthetic grid), loads street
//! lamps from an embedded CSV, and prints the top beginner-friendly loops
//! as JSON.  The ranked routes are also written to `output/gangnam/routes.csv`.
//!
//! ```text
//! gangnam [CONFIG.json] [day|night]
//! ```
//!
//! Environment overrides: `TARGET_DISTANCE_KM`, `LOOP_TOLERANCE`,
//! `DEFAULT_RADIUS_M`.  Logging is controlled by `RUST_LOG`.

mod network;

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use lw_core::{RecommendConfig, RequestRng, TimeOfDay};
use lw_output::{CsvRouteWriter, RouteOutputObserver, RouteResponse};
use lw_recommend::{RecommenderBuilder, RouteRequest, service};
use lw_score::load_lamps_reader;
use lw_spatial::{ClipProvider, DijkstraRouter};

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64  = 42;
const OUTPUT_DIR: &str = "output/gangnam";
const LAMPS_CSV:  &str = include_str!("../data/lamps.csv");

// ── Configuration ─────────────────────────────────────────────────────────────

fn env_f64(name: &str) -> Result<Option<f64>> {
    match std::env::var(name) {
        Ok(v) => {
            let parsed = v.trim().parse::<f64>().with_context(|| format!("{name}={v:?}"))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}

/// Defaults, then the JSON file (if given), then environment overrides.
fn load_config(path: Option<&str>) -> Result<RecommendConfig> {
    let mut config = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading {p}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {p}"))?
        }
        None => RecommendConfig::default(),
    };

    if let Some(km) = env_f64("TARGET_DISTANCE_KM")? {
        config.loops.target_km = km;
    }
    if let Some(tol) = env_f64("LOOP_TOLERANCE")? {
        config.loops.tolerance = tol;
    }
    if let Some(r) = env_f64("DEFAULT_RADIUS_M")? {
        config.loops.radius_m = r;
    }
    config.seed = config.seed.or(Some(SEED));
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = args.iter().find(|a| a.ends_with(".json"));
    let time = TimeOfDay::from_label(args.iter().find(|a| !a.ends_with(".json")).map(String::as_str));
    let config = load_config(config_path.map(String::as_str))?;

    eprintln!("=== gangnam — loopwalk ===");
    eprintln!(
        "Target: {} km ±{:.0}%  |  Radius: {} m  |  Time: {}",
        config.loops.target_km,
        config.loops.tolerance * 100.0,
        config.loops.radius_m,
        time
    );

    // 1. Fetch the walk network around the start.
    let (base, start) = build_network();
    let provider = Arc::new(ClipProvider::new(Arc::new(base)));
    let network = service::fetch_network(
        provider,
        start.point,
        config.loops.radius_m,
        config.fetch_timeout(),
    )
    .await?;
    eprintln!("Walk network: {} nodes, {} edges", network.node_count(), network.edge_count());

    // 2. Lamp data.
    let lamps = load_lamps_reader(Cursor::new(LAMPS_CSV), "longitude", "latitude")?;
    eprintln!("Lamps: {}", lamps.len());

    // 3. Recommender and output.
    let mut rng = RequestRng::seeded_or_entropy(config.seed);
    let recommender = RecommenderBuilder::new(config, DijkstraRouter).lamps(lamps).build()?;

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = RouteOutputObserver::new(CsvRouteWriter::new(Path::new(OUTPUT_DIR))?);

    // 4. Recommend on the blocking pool.
    let request = RouteRequest::new().at(time);
    let t0 = Instant::now();
    let (rec, mut obs) = tokio::task::spawn_blocking(move || -> Result<_> {
        let rec = recommender.recommend_observed(&network, &start, &request, &mut rng, &mut obs)?;
        Ok((rec, obs))
    })
    .await??;
    obs.finish()?;

    eprintln!(
        "{} trials, {} accepted, {} unroutable, {} out of band  ({:.1} ms)",
        rec.stats.trials,
        rec.stats.accepted,
        rec.stats.no_path,
        rec.stats.out_of_band,
        t0.elapsed().as_secs_f64() * 1_000.0
    );
    if rec.is_empty() {
        log::warn!("no loop within tolerance; try a larger LOOP_TOLERANCE");
    }
    eprintln!("  routes.csv : {} rows", obs.written());

    // 5. Response body.
    println!("{}", RouteResponse::from_recommendation(&rec)?.to_json_pretty()?);
    Ok(())
}
