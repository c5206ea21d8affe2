use coltype_eval::{ColumnTaskResults, EvalConfigBuilder, Instance, Vocabulary};
use serde_jsonlines::json_lines;
use std::ops::Range;
use std::path::Path;
use std::time::{Duration, Instant};

use clap::Parser;

fn load_instances<P: AsRef<Path>>(path: P) -> Vec<Instance> {
    json_lines::<Instance, P>(path)
        .unwrap()
        .map(|r| r.unwrap())
        .collect::<Vec<_>>()
}

#[derive(Debug, Parser)]
struct Args {
    #[arg(short, long, default_value_t = 1)]
    n_samples: u32,
    /// JSON-lines file, one instance per line
    #[arg(short, long, default_value_t=String::from("./tests/data/instances.jsonl"))]
    dataset: String,
    /// Every valid column type
    #[arg(short, long, value_delimiter = ',', default_value = "city,country,population,name")]
    column_types: Vec<String>,
    #[arg(short, long, default_value_t = 3)]
    max_adjustment: usize,
    #[arg(short, long, default_value_t = false)]
    parallel: bool,
    /// Verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let n_samples = args.n_samples;
    let iter = Range {
        start: 0,
        end: n_samples,
    };
    let vocabulary = Vocabulary::new(args.column_types).unwrap();
    let config = EvalConfigBuilder::default()
        .max_adjustment(args.max_adjustment)
        .parallel(args.parallel)
        .build();
    log::info!("Profiling with the configuration:\n {}", config);
    let mut total_duration = Duration::ZERO;
    for _ in iter {
        let instances = load_instances(&args.dataset);
        let now = Instant::now();
        {
            ColumnTaskResults::compute(&instances, &vocabulary, &config).unwrap();
        }
        let elapsed = now.elapsed();
        total_duration += elapsed;
    }
    println!(
        "Total duration: {} with {n_samples} samples",
        total_duration.as_secs_f64()
    )
}
