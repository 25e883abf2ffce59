//! route-trace — command-line driver for the FiberQ route network core.
//!
//! Loads route and cable features from a CSV file (or a built-in sample
//! network) and runs the same queries the map tools issue on click:
//!
//! - `path`:   connect two points across route layers
//! - `break`:  snap a click to the nearest cable and measure along it
//! - `length`: cable length including reserve slack
//!
//! # Usage
//!
//! ```text
//! cargo run --bin route-trace -- path --from 0,0 --to 20,10
//! cargo run --bin route-trace -- break --at 11,4 --layer cable
//! RUST_LOG=debug cargo run --bin route-trace -- --features routes.csv path --from 0,0 --to 30,10
//! ```

#![allow(clippy::print_stdout)]

mod sample;

use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use fq_core::{DistanceMeasurer, EllipsoidMeasurer, FeatureId, NetworkConfig, PlanarMeasurer, Point};
use fq_network::{
    cable_length, load_features_csv, load_features_reader, locate_break, FeatureSource,
    LayerFilter, MemorySource, RoutePlanner,
};

use sample::SAMPLE_CSV;

/// Path finding and cable measurement over a FiberQ feature export.
#[derive(Parser)]
#[command(name = "route-trace", version)]
struct Cli {
    /// CSV with columns layer,feature_id,part,seq,x,y.  Uses a built-in
    /// sample network when omitted.
    #[arg(long)]
    features: Option<PathBuf>,

    /// JSON file overriding `NetworkConfig` fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Coordinates are lon/lat degrees; measure on the WGS 84 ellipsoid.
    #[arg(long)]
    geographic: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect two points across route layers.
    Path {
        #[arg(long, value_parser = parse_point)]
        from: Point,

        #[arg(long, value_parser = parse_point)]
        to: Point,

        /// Canvas map units per pixel.
        #[arg(long, default_value_t = 0.05)]
        map_units_per_pixel: f64,

        /// Case-insensitive layer name prefix for route layers.
        #[arg(long, default_value = "route")]
        layer: String,
    },

    /// Locate a fiber break at a clicked point.
    Break {
        #[arg(long, value_parser = parse_point)]
        at: Point,

        /// Case-insensitive layer name prefix for cable layers.
        #[arg(long, default_value = "cable")]
        layer: String,
    },

    /// Cable length including slack at its reserves.
    Length {
        #[arg(long)]
        layer: String,

        #[arg(long)]
        id: u64,

        /// Slack in metres at each reserve on the cable.
        #[arg(long, value_delimiter = ',')]
        slack: Vec<f64>,
    },
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn load_config(cli: &Cli) -> Result<NetworkConfig> {
    let config = match &cli.config {
        None => NetworkConfig::default(),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
    };
    config.validate()?;
    Ok(config)
}

fn load_source(cli: &Cli) -> Result<MemorySource> {
    let source = match &cli.features {
        Some(path) => load_features_csv(path).with_context(|| format!("loading {}", path.display()))?,
        None => load_features_reader(Cursor::new(SAMPLE_CSV))?,
    };
    Ok(source)
}

fn measurer(cli: &Cli) -> Box<dyn DistanceMeasurer> {
    if cli.geographic {
        Box::new(EllipsoidMeasurer::default())
    } else {
        Box::new(PlanarMeasurer::METRES)
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let source = load_source(&cli)?;
    log::info!("{} features loaded", source.len());

    match &cli.command {
        Command::Path { from, to, map_units_per_pixel, layer } => {
            let planner = RoutePlanner::new(config, LayerFilter::Prefix(layer.clone()));
            match planner.plan(&source, *from, *to, *map_units_per_pixel)? {
                Some(planned) => {
                    println!("Path ({} graph, {} points):", planned.strategy, planned.points.len());
                    for p in &planned.points {
                        println!("  {p}");
                    }
                }
                None => println!("No route connects {from} and {to}."),
            }
        }

        Command::Break { at, layer } => {
            let cables = source.list_polylines(&LayerFilter::Prefix(layer.clone()));
            match locate_break(&cables, *at, measurer(&cli).as_ref()) {
                Some(b) => println!(
                    "Cable layer: {} • Feature #{} • Distance: {:.2} m • Segments: {} • At {}",
                    b.layer, b.feature_id.0, b.distance_m, b.segment_count, b.point
                ),
                None => println!("No cable found nearby."),
            }
        }

        Command::Length { layer, id, slack } => {
            let cables = source.list_polylines(&LayerFilter::Named(vec![layer.clone()]));
            let Some(cable) = cables.iter().find(|f| f.id == FeatureId(*id)) else {
                bail!("no feature {id} on layer {layer:?}");
            };
            let len = cable_length(cable.points(), slack.iter().copied().map(Some), measurer(&cli).as_ref());
            println!(
                "Geometry: {:.2} m • Slack: {:.2} m • Total: {:.2} m",
                len.geometry_m, len.slack_m, len.total_m
            );
        }
    }

    Ok(())
}
