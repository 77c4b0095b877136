//! Generate sphere shortest-path instances and report their statistics.
//!
//! Run with: cargo run --release --bin gen_instance
//!
//! Usage:
//!   gen_instance                   One instance with 100 vertices
//!   gen_instance 50 200 1k         Several sizes
//!   gen_instance 100 -i 5          Five instances per size (seeds seed..seed+4)
//!   gen_instance 100 --validate    Check invariants of each instance
//!   gen_instance 100 --json        Emit instances as JSON lines (needs `serde`)
//!
//! Set RUST_LOG=debug for per-stage logging.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use s2_sp_instance::validation::validate;
use s2_sp_instance::{GraphConfig, SphereGraph};
use std::process::ExitCode;
use std::time::Instant;

/// Largest accepted vertex count. The distance matrix is dense, so memory
/// grows as 8 * N^2 bytes (3.2 GB at this cap).
const MAX_VERTICES: usize = 20_000;

fn parse_count(s: &str) -> Result<usize, String> {
    let s = s.to_lowercase();
    let (num_str, multiplier) = match s.strip_suffix('k') {
        Some(rest) => (rest, 1_000),
        None => (s.as_str(), 1),
    };

    let n = num_str
        .parse::<f64>()
        .map(|n| (n * multiplier as f64) as usize)
        .map_err(|e| format!("Invalid number '{}': {}", s, e))?;
    if n > MAX_VERTICES {
        return Err(format!(
            "{} vertices exceeds the limit of {} (the distance matrix is dense N x N)",
            n, MAX_VERTICES
        ));
    }
    Ok(n)
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    let p: f64 = s
        .parse()
        .map_err(|e| format!("Invalid fraction '{}': {}", s, e))?;
    if (0.0..1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("fraction {} must be in [0, 1)", p))
    }
}

#[derive(Parser)]
#[command(name = "gen_instance")]
#[command(about = "Generate shortest-path instances on the unit sphere")]
struct Args {
    /// Vertex counts (e.g., 50, 200, 1k; at most 20k)
    #[arg(value_parser = parse_count)]
    sizes: Vec<usize>,

    /// Random seed of the first instance
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Minimum in/out degree kept by the sparsifier
    #[arg(short, long, default_value_t = 5)]
    degree: usize,

    /// Fraction of candidate arcs walked for deletion, longest first
    #[arg(short = 'p', long, default_value_t = 0.9, value_parser = parse_fraction)]
    throw_away: f64,

    /// Uncertainty budget stored with each instance
    #[arg(short, long, default_value_t = 7.0)]
    gamma: f64,

    /// Instances per size
    #[arg(short, long, default_value_t = 1)]
    instances: u32,

    /// Check structural invariants of every instance
    #[arg(long)]
    validate: bool,

    /// Print each instance as a JSON line instead of a table
    #[arg(long)]
    json: bool,
}

#[cfg(feature = "serde")]
fn print_json(seed: u64, config: &GraphConfig, graph: &SphereGraph) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct InstanceRecord<'a> {
        seed: u64,
        config: &'a GraphConfig,
        instance: s2_sp_instance::Precomputed,
        num_arcs: usize,
        big_m: f64,
        stats: Option<s2_sp_instance::SparsifyStats>,
    }

    let record = InstanceRecord {
        seed,
        config,
        instance: graph.precomputed(),
        num_arcs: graph.num_arcs(),
        big_m: graph.big_m(),
        stats: graph.sparsify_stats(),
    };
    let line = serde_json::to_string(&record).map_err(|e| e.to_string())?;
    println!("{}", line);
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn print_json(_seed: u64, _config: &GraphConfig, _graph: &SphereGraph) -> Result<(), String> {
    Err("JSON output requires the `serde` feature; rebuild with --features serde".to_string())
}

fn print_row(seed: u64, graph: &SphereGraph, time_ms: f64) {
    let (considered, deleted) = graph
        .sparsify_stats()
        .map(|s| (s.considered, s.deleted))
        .unwrap_or((0, 0));
    println!(
        "{:>8} {:>10} {:>8} {:>10} {:>10} {:>6} {:>6} {:>12.3} {:>9.1}",
        graph.n(),
        seed,
        graph.num_arcs(),
        considered,
        deleted,
        graph.source(),
        graph.sink(),
        graph.big_m(),
        time_ms
    );
}

fn run(args: &Args) -> Result<usize, String> {
    let sizes: Vec<usize> = if args.sizes.is_empty() {
        vec![100]
    } else {
        args.sizes.clone()
    };

    if !args.json {
        println!("s2-sp-instance generator");
        println!("========================\n");
        println!(
            "degree = {}, throw_away = {}, gamma = {}, seed = {}\n",
            args.degree, args.throw_away, args.gamma, args.seed
        );
        println!(
            "{:>8} {:>10} {:>8} {:>10} {:>10} {:>6} {:>6} {:>12} {:>9}",
            "n", "seed", "arcs", "considered", "deleted", "s", "t", "big_m", "ms"
        );
    }

    let mut invalid = 0usize;
    for &n in &sizes {
        for k in 0..args.instances {
            let seed = args.seed + k as u64;
            let config = GraphConfig::new(n)
                .with_degree(args.degree)
                .with_throw_away_perc(args.throw_away)
                .with_gamma(Some(args.gamma))
                .with_instance(k);

            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let t0 = Instant::now();
            let graph = SphereGraph::generate(&config, &mut rng).map_err(|e| e.to_string())?;
            let time_ms = t0.elapsed().as_secs_f64() * 1000.0;

            if args.json {
                print_json(seed, &config, &graph)?;
            } else {
                print_row(seed, &graph, time_ms);
            }

            if args.validate {
                let report = validate(&graph, args.degree);
                if !report.is_valid() {
                    invalid += 1;
                    eprintln!("WARNING: n={} seed={}: {}", n, seed, report);
                } else if !report.sink_reachable {
                    eprintln!("note: n={} seed={}: sink unreachable from source", n, seed);
                }
            }
        }
    }
    Ok(invalid)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(invalid) => {
            eprintln!("{} invalid instance(s)", invalid);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
