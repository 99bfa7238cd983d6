//! Command-line driver for the `boand` policy search engine: parses CLI
//! options into the fixed heuristic/selector/comparator combination a run
//! uses, and streams admitted policies to the solution and stats files in
//! `solution_folder`.
//!
//! No PDDL parser or determinizer is linked into this binary: a real
//! deployment links one in by implementing [`boand::task::Determinize`] and
//! wiring it in where [`build_task`] currently returns
//! [`boand::Error::NoDeterminizer`].

use boand::comparator::Comparator;
use boand::cost::Cost;
use boand::heuristics::{BestCaseHeuristic, SizeHeuristic, WorstCaseHeuristic};
use boand::policy::Policy;
use boand::search::{ResultSink, SearchEngine, SearchStats};
use boand::selector::Selector;
use boand::task::Task;
use boand::Error;
use clap::Parser;
use log::info;
use std::fmt::Debug;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    pretty_env_logger::init();

    let comparator = parse_comparator(&args.comparator)?;
    let classical_name = parse_classical_name(&args.classical_heuristic)?;
    let best_case = parse_best_case(&args.best_case_heuristic)?;
    let worst_case = parse_worst_case(&args.worst_case_heuristic)?;
    let size = parse_size(&args.size_heuristic)?;
    let selector = parse_selector(&args.selector)?;

    info!(
        "running with comparator={:?} classical={} best={:?} worst={:?} size={:?} selector={:?}",
        comparator, classical_name, best_case, worst_case, size, selector
    );

    // No Determinize implementation is linked in; see module docs.
    let _ = build_task(&args.domain_file, &args.problem_file)?;
    Ok(())
}

fn build_task(domain_file: &Path, problem_file: &Path) -> Result<(), Error> {
    let _ = (domain_file, problem_file);
    Err(Error::NoDeterminizer)
}

#[derive(Parser, Debug)]
#[command(name = "boand", about = "Pareto-optimal best-first search for FOND planning")]
struct Cli {
    /// PDDL domain file
    domain_file: PathBuf,
    /// PDDL problem file
    problem_file: PathBuf,
    /// Directory admitted policies and the stats file are written to
    solution_folder: PathBuf,

    /// Open-list comparator: b, w, bw, wb
    #[arg(short = 'm', default_value = "bw")]
    comparator: String,
    /// Classical heuristic: hmax, lmcut
    #[arg(long = "ch", default_value = "hmax")]
    classical_heuristic: String,
    /// Best-case heuristic: Blind, SumMin, MinSum
    #[arg(long = "bh", default_value = "MinSum")]
    best_case_heuristic: String,
    /// Worst-case heuristic: Blind, MaxSum
    #[arg(long = "wh", default_value = "MaxSum")]
    worst_case_heuristic: String,
    /// Size heuristic: Zero, Delta
    #[arg(long = "sh", default_value = "Delta")]
    size_heuristic: String,
    /// State selector: random, best, largestg, bounds
    #[arg(short = 's', default_value = "bounds")]
    selector: String,
}

fn parse_comparator(value: &str) -> Result<Comparator, Error> {
    match value {
        "b" => Ok(Comparator::Best),
        "w" => Ok(Comparator::Worst),
        "bw" => Ok(Comparator::BestWorst),
        "wb" => Ok(Comparator::WorstBest),
        _ => Err(Error::Configuration { option: "-m", value: value.to_string(), allowed: &["b", "w", "bw", "wb"] }),
    }
}

fn parse_classical_name(value: &str) -> Result<&'static str, Error> {
    match value {
        "hmax" => Ok("hmax"),
        "lmcut" => Ok("lmcut"),
        _ => Err(Error::Configuration { option: "-ch", value: value.to_string(), allowed: &["hmax", "lmcut"] }),
    }
}

fn parse_best_case(value: &str) -> Result<BestCaseHeuristic, Error> {
    match value {
        "Blind" => Ok(BestCaseHeuristic::Blind),
        "SumMin" => Ok(BestCaseHeuristic::SumMin),
        "MinSum" => Ok(BestCaseHeuristic::MinSum),
        _ => Err(Error::Configuration { option: "-bh", value: value.to_string(), allowed: &["Blind", "SumMin", "MinSum"] }),
    }
}

fn parse_worst_case(value: &str) -> Result<WorstCaseHeuristic, Error> {
    match value {
        "Blind" => Ok(WorstCaseHeuristic::Blind),
        "MaxSum" => Ok(WorstCaseHeuristic::MaxSum),
        _ => Err(Error::Configuration { option: "-wh", value: value.to_string(), allowed: &["Blind", "MaxSum"] }),
    }
}

fn parse_size(value: &str) -> Result<SizeHeuristic, Error> {
    match value {
        "Zero" => Ok(SizeHeuristic::Zero),
        "Delta" => Ok(SizeHeuristic::Delta),
        _ => Err(Error::Configuration { option: "-sh", value: value.to_string(), allowed: &["Zero", "Delta"] }),
    }
}

fn parse_selector(value: &str) -> Result<Selector, Error> {
    match value {
        "random" => Ok(Selector::Random),
        "best" => Ok(Selector::Best),
        "largestg" => Ok(Selector::LargestG),
        "bounds" => Ok(Selector::BoundsFirst),
        _ => Err(Error::Configuration {
            option: "-s",
            value: value.to_string(),
            allowed: &["random", "best", "largestg", "bounds"],
        }),
    }
}

/// Renders a state as the slash-separated list of atom names the solution
/// file format expects. No parser is linked in (see module docs), so no
/// naming scheme survives grounding; states are rendered via their [`Debug`]
/// representation as a single pseudo-atom instead.
fn render_atoms<S: Debug>(state: &S) -> Vec<String> {
    vec![format!("{:?}", state)]
}

/// Streams admitted policies to `<problem>.boand.<NNN>.out` files and keeps
/// `<problem>.stats` up to date.
struct FileSink {
    problem_stem: String,
    solution_folder: PathBuf,
    next_index: u32,
    started: Instant,
    stats_lines: Vec<String>,
}

impl FileSink {
    fn new(problem_stem: String, solution_folder: PathBuf) -> Self {
        Self { problem_stem, solution_folder, next_index: 1, started: Instant::now(), stats_lines: Vec::new() }
    }

    fn solution_path(&self, index: u32) -> PathBuf {
        self.solution_folder.join(format!("{}.boand.{:03}.out", self.problem_stem, index))
    }

    fn stats_path(&self) -> PathBuf {
        self.solution_folder.join(format!("{}.stats", self.problem_stem))
    }

    fn rewrite_stats(&self) -> Result<(), Error> {
        let path = self.stats_path();
        let mut body = String::new();
        for line in &self.stats_lines {
            body.push_str(line);
            body.push('\n');
        }
        fs::write(&path, body).map_err(|source| Error::Io { path, source })
    }

    /// Call once the search has run to exhaustion, to append the terminal
    /// `best=worst=size=-1` record with the final stats snapshot.
    fn finish(&mut self, stats: &SearchStats) -> Result<(), Error> {
        self.stats_lines.push(format!(
            "-1;-1;-1;{:.3};{};{};{};{}",
            self.started.elapsed().as_secs_f64(),
            stats.iterations,
            stats.expansions,
            stats.generations,
            stats.max_open
        ));
        self.rewrite_stats()
    }
}

impl<S: Clone + Eq + Hash + Debug> ResultSink<S> for FileSink {
    fn on_admitted(&mut self, policy: &Policy<S>, scores: (Cost, Cost, Cost), stats: &SearchStats) {
        let index = self.next_index;
        self.next_index += 1;
        let path = self.solution_path(index);
        let mut body = String::new();
        for (state, assignment) in policy.strategy.iter() {
            let atoms = render_atoms(state);
            body.push_str(&format!("If holds: {}\n", atoms.join("/")));
            body.push_str(&format!("Execute: {}\n\n", assignment.action));
        }
        if let Err(e) = fs::write(&path, body).map_err(|source| Error::Io { path, source }) {
            log::error!("failed to write solution file: {}", e);
        }

        self.stats_lines.push(format!(
            "{};{};{};{:.3};{};{};{};{}",
            scores.0,
            scores.1,
            scores.2,
            self.started.elapsed().as_secs_f64(),
            stats.iterations,
            stats.expansions,
            stats.generations,
            stats.max_open
        ));
        if let Err(e) = self.rewrite_stats() {
            log::error!("failed to write stats file: {}", e);
        }
    }
}
