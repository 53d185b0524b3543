use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polyset::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod input;

#[derive(Parser)]
#[command(name = "polyset")]
#[command(version)]
#[command(about = "Named, non-overlapping polygons: submit, generate, query")]
struct Cmd {
    /// Polygon store document (created if missing)
    #[arg(long, env = "POLYSET_STORE", default_value = "data/polygons.json")]
    store: PathBuf,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print every stored polygon
    List,
    /// Print one polygon by exact name
    Get { name: String },
    /// Validate and store one polygon given counter-clockwise
    Submit {
        #[arg(long)]
        name: String,
        /// Vertices as "x,y x,y x,y"
        #[arg(long, conflicts_with = "json", required_unless_present = "json")]
        points: Option<String>,
        /// JSON file holding an array of {"x": .., "y": ..}
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Generate and store a batch of random polygons
    Generate {
        #[arg(long, default_value_t = 100)]
        size: usize,
        /// Fix the batch id so the batch can be replayed
        #[arg(long)]
        seed: Option<u64>,
        /// Worker threads (default: available parallelism)
        #[arg(long)]
        threads: Option<usize>,
        /// Print the full report instead of the accepted count
        #[arg(long)]
        report: bool,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let store = JsonFileStore::open(&cmd.store)
        .with_context(|| format!("opening store {}", cmd.store.display()))?;
    let svc = PolygonService::open(store, BatchCfg::default()).context("loading polygons")?;
    match cmd.action {
        Action::List => list(&svc),
        Action::Get { name } => get(&svc, &name),
        Action::Submit { name, points, json } => submit(&svc, name, points, json),
        Action::Generate {
            size,
            seed,
            threads,
            report,
        } => generate(&svc, size, seed, threads, report),
    }
}

fn list(svc: &PolygonService<JsonFileStore>) -> Result<()> {
    let all = svc.list_cached();
    print_json(all.as_slice())
}

fn get(svc: &PolygonService<JsonFileStore>, name: &str) -> Result<()> {
    match svc.lookup_by_name(name) {
        Some(p) => print_json(&p),
        None => bail!("polygon not found: {name}"),
    }
}

fn submit(
    svc: &PolygonService<JsonFileStore>,
    name: String,
    points: Option<String>,
    json: Option<PathBuf>,
) -> Result<()> {
    let ring = match (points, json) {
        (Some(text), _) => input::parse_points(&text)?,
        (None, Some(path)) => input::read_points_json(&path)?,
        (None, None) => bail!("either --points or --json is required"),
    };
    tracing::info!(name, vertices = ring.len(), "submit");
    let polygon = svc.submit_polygon(ring, name)?;
    print_json(&polygon)
}

fn generate(
    svc: &PolygonService<JsonFileStore>,
    size: usize,
    seed: Option<u64>,
    threads: Option<usize>,
    report: bool,
) -> Result<()> {
    tracing::info!(size, seed = ?seed, threads = ?threads, "generate");
    let cfg = BatchCfg {
        size,
        seed,
        threads,
        ..BatchCfg::default()
    };
    let full = svc.generate_batch_with(&cfg).context("batch generation failed")?;
    if report {
        print_json(&full)
    } else {
        print_json(&BatchSummary {
            accepted_count: full.accepted_count(),
        })
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
