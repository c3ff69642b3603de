//! mumbai: evacuation route recommender for Mumbai flood zones.
//!
//! Resolves each query against the area catalog, ranks safe destinations,
//! prints them, and writes `routes.csv` (plus `routes.json` with `--json`)
//! to the output directory.  Distances are straight-line unless a road
//! network is supplied:
//!
//! ```text
//! mumbai colaba "bandra wst"
//! mumbai --demo-roads --json colaba
//! mumbai --nodes nodes.csv --edges edges.csv --config route.toml worli
//! RUST_LOG=debug mumbai --catalog areas.csv andheri
//! ```

mod network;
#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use ev_catalog::CatalogSource;
use ev_core::{FloodRisk, title_case};
use ev_output::{CsvRouteWriter, JsonRouteWriter, OutputWriter};
use ev_route::{EvacuationContext, Recommendation, RouteCandidate, RouteConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Queried when none are given on the command line.
const DEMO_QUERIES: [&str; 4] = ["colaba", "Bandra Wst", "kurla", "xyzzynotaplace"];

// ── CLI ───────────────────────────────────────────────────────────────────────

/// Recommend evacuation routes away from flood-prone areas of Mumbai.
#[derive(Parser, Debug)]
#[command(name = "mumbai", version)]
struct Args {
    /// Place names to evacuate from; misspellings are fine.
    queries: Vec<String>,

    /// Area catalog CSV.  Defaults to the embedded Mumbai table.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Road graph nodes CSV (`id,lat,lon`).
    #[arg(long, requires = "edges")]
    nodes: Option<PathBuf>,

    /// Road graph edges CSV (`u,v[,length]`).
    #[arg(long, requires = "nodes")]
    edges: Option<PathBuf>,

    /// OSM PBF extract to route over.
    #[cfg(feature = "osm")]
    #[arg(long, conflicts_with_all = ["nodes", "demo_roads"])]
    pbf: Option<PathBuf>,

    /// Route over a small built-in South Mumbai network.
    #[arg(long, conflicts_with = "nodes")]
    demo_roads: bool,

    /// Only tag road nodes within this many km of an area centre.
    #[arg(long)]
    radius_km: Option<f64>,

    /// TOML file overriding the ranking configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of routes per query (overrides the config file).
    #[arg(long)]
    top_k: Option<usize>,

    /// Minimum match confidence, 0-100 (overrides the config file).
    #[arg(long)]
    threshold: Option<u8>,

    /// Directory for `routes.csv` / `routes.json`.
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// Also write `routes.json`.
    #[arg(long)]
    json: bool,
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<RouteConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str::<RouteConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RouteConfig::default(),
    };
    if let Some(k) = args.top_k {
        config.top_k = k;
    }
    if let Some(t) = args.threshold {
        config.match_threshold = t;
    }
    Ok(config)
}

/// Attach whichever road network the flags select, if any.
fn attach_roads(args: &Args, ctx: EvacuationContext) -> Result<EvacuationContext> {
    #[cfg(feature = "osm")]
    if let Some(pbf) = &args.pbf {
        let net = ev_spatial::osm::load_from_pbf(pbf)
            .with_context(|| format!("loading OSM extract {}", pbf.display()))?;
        return Ok(ctx.with_road_network(net, args.radius_km));
    }

    if let (Some(nodes), Some(edges)) = (&args.nodes, &args.edges) {
        return ctx
            .with_graph_csv(nodes, edges, args.radius_km)
            .context("loading road graph");
    }
    if args.demo_roads {
        let net = network::build_network(ctx.catalog())?;
        return Ok(ctx.with_road_network(net, args.radius_km));
    }
    Ok(ctx)
}

fn writers(args: &Args) -> Result<Vec<Box<dyn OutputWriter>>> {
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let mut out: Vec<Box<dyn OutputWriter>> = vec![Box::new(CsvRouteWriter::new(&args.out)?)];
    if args.json {
        out.push(Box::new(JsonRouteWriter::new(&args.out)?));
    }
    Ok(out)
}

// ── Printing ──────────────────────────────────────────────────────────────────

fn print_region_summary(ctx: &EvacuationContext) {
    let Some(road) = ctx.road() else { return };
    println!(
        "Road network: {} nodes, {} edges ({} nodes / {} edges tagged to an area)",
        road.network.node_count(),
        road.network.edge_count(),
        road.regions.assigned_node_count(),
        road.regions.assigned_edge_count(),
    );
    let counts = road.regions.edge_risk_counts();
    let by_risk: Vec<String> = FloodRisk::ALL
        .iter()
        .zip(counts)
        .map(|(risk, n)| format!("{} {n}", risk.as_str()))
        .collect();
    println!("Edges by risk: {}", by_risk.join(", "));
    println!();
}

fn print_recommendation(query: &str, rec: &Recommendation, ctx: &EvacuationContext) {
    match rec {
        Recommendation::Unresolved { confidence, suggestions, .. } => {
            println!("{query:?}: no matching area (best confidence {confidence}%)");
            if !suggestions.is_empty() {
                let names: Vec<String> = suggestions
                    .iter()
                    .map(|(name, score)| format!("{} ({score}%)", title_case(name)))
                    .collect();
                println!("  did you mean: {}", names.join(", "));
            }
        }
        Recommendation::NoRoute { start } => {
            println!(
                "{query:?} -> {} ({}%): no safe destination reachable",
                start.name.as_deref().map(title_case).unwrap_or_default(),
                start.confidence,
            );
        }
        Recommendation::Routes { start, routes } => {
            let origin = start.matched.and_then(|id| ctx.catalog().get(id));
            println!(
                "{query:?} -> {} ({}%), {} risk",
                origin.map(|r| r.display_name()).unwrap_or_default(),
                start.confidence,
                origin.map_or("unknown", |r| r.flood_risk.as_str()),
            );
            println!(
                "  {:<3} {:<22} {:<5} {:>8} {:>8} {:<9} {:>7}  {:<22} {}",
                "#", "Destination", "Ward", "km", "min", "Risk", "Score", "Transport", "Shelter"
            );
            for (i, r) in routes.iter().enumerate() {
                println!(
                    "  {:<3} {:<22} {:<5} {:>8.2} {:>8.1} {:<9} {:>7.2}  {:<22} {}",
                    i + 1,
                    r.name,
                    r.ward,
                    r.distance_km,
                    r.eta_minutes,
                    r.risk_level.as_str(),
                    r.score,
                    r.transport.as_str(),
                    shelter_label(r),
                );
            }
        }
    }
    println!();
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let source = match &args.catalog {
        Some(path) => CatalogSource::Csv(path.clone()),
        None => CatalogSource::Embedded,
    };
    let ctx = EvacuationContext::load(&source, config).context("loading area catalog")?;
    println!("Loaded {} areas", ctx.catalog().len());

    let t0 = Instant::now();
    let ctx = attach_roads(&args, ctx)?;
    if ctx.road().is_some() {
        log::info!("road network prepared in {:.3} s", t0.elapsed().as_secs_f64());
        print_region_summary(&ctx);
    } else {
        println!("No road network given; ranking by straight-line distance");
        println!();
    }

    let queries: Vec<String> = if args.queries.is_empty() {
        DEMO_QUERIES.iter().map(|q| (*q).to_owned()).collect()
    } else {
        args.queries.clone()
    };

    let mut out = writers(&args)?;
    for query in &queries {
        let rec = ctx.recommend(query);
        print_recommendation(query, &rec, &ctx);
        for w in &mut out {
            w.write_recommendation(query, &rec, &ctx)?;
        }
    }
    for w in &mut out {
        w.finish()?;
    }

    println!("Results written to {}", output_label(&args.out, args.json));
    Ok(())
}

fn shelter_label(r: &RouteCandidate) -> String {
    match (&r.shelter_type, r.shelter_capacity) {
        (Some(kind), Some(cap)) => format!("{kind} ({cap})"),
        (Some(kind), None) => kind.clone(),
        (None, Some(cap)) => format!("capacity {cap}"),
        (None, None) => "-".to_owned(),
    }
}

fn output_label(dir: &Path, json: bool) -> String {
    if json {
        format!("{0}/routes.csv and {0}/routes.json", dir.display())
    } else {
        format!("{}/routes.csv", dir.display())
    }
}
