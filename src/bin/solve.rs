use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{info, warn};

use idasolve::{
    load_instances, random_instances, Domain, Ida, PancakeDomain, PerimeterBuilder, PerimeterDb,
    SearchConfig, SearchState, TileDomain,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DomainKind {
    Tile,
    Pancake,
}

#[derive(Debug, Parser)]
#[command(name = "solve", about = "Optimal puzzle solver: IDA* with TT and perimeter DB")]
struct Args {
    /// Puzzle family to solve
    #[arg(long, value_enum, default_value_t = DomainKind::Tile)]
    domain: DomainKind,

    /// Tile board width
    #[arg(long, default_value_t = 3)]
    width: usize,

    /// Tile board height
    #[arg(long, default_value_t = 3)]
    height: usize,

    /// Pancake stack size
    #[arg(long, default_value_t = 9)]
    pancakes: usize,

    /// Start states file (one per line, whitespace-separated integers);
    /// when omitted, instances are generated by random scrambling
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of independent searches when generating instances
    #[arg(long, default_value_t = 100)]
    searches: usize,

    /// Scramble length per generated instance
    #[arg(long, default_value_t = 100)]
    random_steps: usize,

    /// Scramble seed (deterministic)
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Full SearchConfig as a JSON file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Transposition table capacity (prefer a prime)
    #[arg(long)]
    tt_capacity: Option<usize>,

    /// Perimeter database capacity (prefer a prime)
    #[arg(long)]
    perimeter_capacity: Option<usize>,

    /// Perimeter radius (builder passes 0..depth)
    #[arg(long)]
    perimeter_depth: Option<i32>,

    /// Disable the transposition table
    #[arg(long)]
    no_tt: bool,

    /// Disable the perimeter database
    #[arg(long)]
    no_perimeter: bool,

    /// Disable the domain heuristic (degenerates toward plain ID-DFS)
    #[arg(long)]
    no_heuristic: bool,

    /// Enable the priority-greedy lookahead past cost frontiers
    #[arg(long)]
    lookahead: bool,
}

fn build_config(args: &Args) -> Result<SearchConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            serde_json::from_str(&data)
                .map_err(|e| format!("bad config {}: {e}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    if let Some(cap) = args.tt_capacity {
        config.tt_capacity = cap;
    }
    if let Some(cap) = args.perimeter_capacity {
        config.perimeter_capacity = cap;
    }
    if let Some(depth) = args.perimeter_depth {
        config.perimeter_depth = depth;
    }
    if args.no_tt {
        config.use_tt = false;
    }
    if args.no_perimeter {
        config.use_perimeter = false;
    }
    if args.no_heuristic {
        config.use_heuristic = false;
    }
    if args.lookahead {
        config.use_lookahead = true;
    }
    Ok(config)
}

fn run<D: Domain>(domain: &D, args: &Args, config: SearchConfig) -> Result<(), String> {
    let goal = SearchState::at_goal(domain);

    let starts = match &args.input {
        Some(path) => load_instances(domain, path)?,
        None => random_instances(
            domain,
            args.searches,
            args.random_steps,
            args.seed,
            config.skip_reverse_op,
        ),
    };
    if starts.is_empty() {
        return Err("no start states to solve".to_string());
    }

    let perimeter = if config.use_perimeter {
        let mut db = PerimeterDb::new(&config);
        let mut builder = PerimeterBuilder::new(domain, config);
        builder.build(&mut db, &goal);
        Some(db)
    } else {
        None
    };

    let mut ida = Ida::new(config, goal.clone(), perimeter.as_ref());

    let mut length_sum = 0i64;
    let mut nodes_sum = 0u64;
    for (i, start) in starts.iter().enumerate() {
        info!("start={} goal={}", start.render(), goal.render());
        let result = ida.search(start);
        warn!(
            "solution {i}: length={} nodes={}",
            result.length, result.nodes
        );
        length_sum += i64::from(result.length);
        nodes_sum += result.nodes;
        if let Some(db) = perimeter.as_ref() {
            info!(
                "perimeter: entries={} fill={:.3}",
                db.occupied(),
                db.fill_fraction()
            );
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let n = starts.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    {
        println!(
            "avg_solution_length={:.2} avg_nodes_generated={:.1} searches={}",
            length_sum as f64 / n,
            nodes_sum as f64 / n,
            starts.len()
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    match args.domain {
        DomainKind::Tile => {
            let domain = TileDomain::new(args.width, args.height)?;
            run(&domain, &args, config)?;
        }
        DomainKind::Pancake => {
            let domain = PancakeDomain::new(args.pancakes)?;
            run(&domain, &args, config)?;
        }
    }
    Ok(())
}
