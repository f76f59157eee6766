//! u-binpack CLI - run repeated GA / Tabu Search experiments on BPP datasets.

use std::process;

use u_binpack::dataset;
use u_binpack::experiment::{run_repetitions, Algorithm, ExperimentPlan};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <dataset.bpp>... [--reps N] [--seed S] [--algo ga|ts|all] [--no-baselines]");
    eprintln!();
    eprintln!("Runs each dataset N times (default 30) with a reshuffled item order");
    eprintln!("and prints a JSON report to stdout.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --reps N         Number of repetitions per dataset (default: 30)");
    eprintln!("  --seed S         Base random seed (default: 0)");
    eprintln!("  --algo A         ga, ts or all (default: all)");
    eprintln!("  --no-baselines   Skip the single-heuristic baselines");
    process::exit(1);
}

fn parse_value<T: std::str::FromStr>(program: &str, flag: &str, value: Option<&String>) -> T {
    match value.and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("Error: {flag} expects a numeric value");
            usage(program);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("u-binpack");

    let mut plan = ExperimentPlan::default();
    let mut paths = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--reps" => plan.repetitions = parse_value(program, "--reps", iter.next()),
            "--seed" => plan.seed = parse_value(program, "--seed", iter.next()),
            "--algo" => {
                plan.algorithms = match iter.next().map(String::as_str) {
                    Some("ga") => vec![Algorithm::Ga],
                    Some("ts") => vec![Algorithm::Tabu],
                    Some("all") => vec![Algorithm::Ga, Algorithm::Tabu],
                    _ => {
                        eprintln!("Error: --algo expects ga, ts or all");
                        usage(program);
                    }
                }
            }
            "--no-baselines" => plan.baselines = false,
            "-h" | "--help" => usage(program),
            flag if flag.starts_with("--") => {
                eprintln!("Error: unknown option {flag}");
                usage(program);
            }
            path => paths.push(path.to_string()),
        }
    }

    if paths.is_empty() {
        usage(program);
    }

    let mut reports = Vec::with_capacity(paths.len());
    for path in &paths {
        let data = dataset::load(path).unwrap_or_else(|e| {
            eprintln!("Error loading {path}: {e}");
            process::exit(1);
        });

        eprintln!(
            "DATASET {}: {} items, capacity {}, lower bound {}",
            data.name,
            data.instance.len(),
            data.instance.capacity(),
            data.instance.lower_bound()
        );

        let report = run_repetitions(&data.name, &data.instance, &plan).unwrap_or_else(|e| {
            eprintln!("Error running {}: {e}", data.name);
            process::exit(1);
        });

        for algorithm in &plan.algorithms {
            if let Some(bins) = report.best_bins(*algorithm) {
                eprintln!("  {algorithm:?}: best {bins} bins");
            }
        }
        reports.push(report);
    }

    match serde_json::to_string_pretty(&reports) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing report: {e}");
            process::exit(1);
        }
    }
}
