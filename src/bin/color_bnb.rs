//! Solves a DIMACS `.col` instance exactly, using Sewell's or Furini's
//! branch-and-bound engine (or both, raced against each other).

use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use serde_json::json;

use chromatic_bnb::dimacs::parse_dimacs;
use chromatic_bnb::progress::NullSink;
use chromatic_bnb::solver::{solve, solve_race, Variant};

/// Exact chromatic number solver (Sewell 1996 / Furini 2017 branch-and-bound).
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to a DIMACS `.col` instance.
    instance: String,

    /// Which engine to run.
    #[arg(long, value_enum, default_value_t = AlgoArg::Race)]
    algo: AlgoArg,

    /// Wall-clock time budget, in seconds.
    #[arg(long, default_value_t = 60.0)]
    time: f64,

    /// Optional path to write the JSON result to.
    #[arg(long)]
    solution: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgoArg {
    Sewell,
    Furini,
    Race,
}

pub fn main() -> ExitCode {
    let args = Args::parse();

    let contents = match std::fs::read_to_string(&args.instance) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("could not read {}: {e}", args.instance);
            return ExitCode::from(2);
        }
    };
    let graph = match parse_dimacs(&contents) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("invalid input: {e}");
            return ExitCode::from(2);
        }
    };

    let t_start = Instant::now();
    let (optimal, timeout, stats, code) = match args.algo {
        AlgoArg::Sewell => run_one(Variant::Sewell, &graph, args.time),
        AlgoArg::Furini => run_one(Variant::Furini, &graph, args.time),
        AlgoArg::Race => {
            let (sewell, furini) =
                solve_race(&graph, args.time, &NullSink, &NullSink);
            let best = if sewell.optimal || (!furini.optimal && sewell.k <= furini.k) {
                sewell
            } else {
                furini
            };
            let optimal = best.optimal;
            let timeout = best.timeout;
            let stats = json!({
                "algo": best.algo,
                "K": best.k,
                "LB": best.lb,
                "UB_init": best.ub_init,
                "optimal": best.optimal,
                "nodes": best.nodes,
                "cuts": best.cuts,
                "elapsed": best.elapsed,
                "timeout": best.timeout,
            });
            let code = exit_code(optimal, timeout);
            (optimal, timeout, stats, code)
        }
    };

    let duration = t_start.elapsed().as_secs_f64();
    println!(
        "{} took {:.3}s. optimal = {optimal}, timeout = {timeout}",
        args.algo_name(),
        duration
    );
    println!("{}", serde_json::to_string_pretty(&stats).unwrap());

    if let Some(path) = &args.solution {
        if let Err(e) = std::fs::write(path, serde_json::to_string_pretty(&stats).unwrap()) {
            eprintln!("could not write {path}: {e}");
            return ExitCode::from(3);
        }
    }

    ExitCode::from(code)
}

fn run_one(
    variant: Variant,
    graph: &chromatic_bnb::graph::Graph,
    time: f64,
) -> (bool, bool, serde_json::Value, u8) {
    match solve(variant, graph, time, &NullSink) {
        Ok(result) => {
            let optimal = result.optimal;
            let timeout = result.timeout;
            let stats = json!({
                "algo": result.algo,
                "K": result.k,
                "LB": result.lb,
                "UB_init": result.ub_init,
                "optimal": result.optimal,
                "nodes": result.nodes,
                "cuts": result.cuts,
                "elapsed": result.elapsed,
                "timeout": result.timeout,
            });
            (optimal, timeout, stats, exit_code(optimal, timeout))
        }
        Err(e) => {
            eprintln!("internal error: {e}");
            (false, false, json!({"error": e.to_string()}), 3)
        }
    }
}

fn exit_code(optimal: bool, timeout: bool) -> u8 {
    if optimal {
        0
    } else if timeout {
        1
    } else {
        3
    }
}

impl Args {
    fn algo_name(&self) -> &'static str {
        match self.algo {
            AlgoArg::Sewell => "sewell",
            AlgoArg::Furini => "furini",
            AlgoArg::Race => "race",
        }
    }
}
