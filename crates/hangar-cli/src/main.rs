// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod output;
mod render;
mod result;

use clap::Parser;
use clap::ValueEnum;
use hangar_csp::config::Heuristic;
use hangar_csp::config::SolverConfig;
use hangar_csp::monitor::log::LogMonitor;
use hangar_csp::monitor::no_op::NoOperationMonitor;
use hangar_csp::result::SolveOutcome;
use hangar_csp::solver::BacktrackingSolver;
use hangar_csp::validation::validate;
use hangar_model::loading::InstanceLoader;
use hangar_model::model::Model;
use hangar_solver::solver::ParallelSolver;
use log::LevelFilter;
use log::error;
use log::info;
use result::HangarError;
use result::HangarResult;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The instance to solve, in the line-oriented text format:
    ///  - the number of time slots ('Franjas: 4'),
    ///  - the grid dimensions ('5x5'),
    ///  - the 'STD:', 'SPC:' and 'PRK:' coordinate lists,
    ///  - one 'id-CATEGORY-RESTR-t1-t2' line per aircraft.
    #[clap(verbatim_doc_comment)]
    instance_path: PathBuf,

    /// The maximum number of schedules to enumerate.
    ///
    /// Possible values: usize
    #[arg(short = 'n', long = "max-solutions", default_value_t = 1, verbatim_doc_comment)]
    max_solutions: usize,

    /// Where to write the schedules. Defaults to the instance path with a '.csv' extension.
    #[arg(short = 'o', long = "output", verbatim_doc_comment)]
    output_path: Option<PathBuf>,

    /// The time budget for the search, given in seconds.
    ///
    /// Possible values: u64 (Optional)
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// The number of worker threads. With more than one, the first variable's domain is split
    /// across the workers; the reported schedules are the same as with one.
    ///
    /// Possible values: usize
    #[arg(long = "threads", default_value_t = 1, verbatim_doc_comment)]
    threads: usize,

    /// The variable ordering of the search.
    #[arg(long, value_enum, default_value_t)]
    heuristic: HeuristicArg,

    /// Disables forward checking. The same schedules are found in the same order, usually slower.
    ///
    /// Possible values: bool
    #[arg(long = "no-forward-checking", verbatim_doc_comment)]
    no_forward_checking: bool,

    /// Prints every schedule as one grid per time slot.
    ///
    /// Possible values: bool
    #[arg(long = "print-grid", verbatim_doc_comment)]
    print_grid: bool,

    /// Enables debug log output and periodic search progress.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum HeuristicArg {
    /// Variables in (slot, aircraft) order.
    #[default]
    Chronological,
    /// Fewest remaining locations first.
    MostConstrained,
}

impl From<HeuristicArg> for Heuristic {
    fn from(value: HeuristicArg) -> Self {
        match value {
            HeuristicArg::Chronological => Heuristic::Chronological,
            HeuristicArg::MostConstrained => Heuristic::MostConstrained,
        }
    }
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> HangarResult<()> {
    let args = Args::parse();
    configure_logging(args.verbose);

    let instance = InstanceLoader::new().from_path(&args.instance_path)?;
    let model = instance.build()?;
    info!("Loaded {}", model);

    let config = SolverConfig::new()
        .with_solution_limit(Some(args.max_solutions))
        .with_heuristic(args.heuristic.into())
        .with_forward_checking(!args.no_forward_checking)
        .with_time_limit(args.time_limit.map(Duration::from_secs))
        .with_threads(args.threads);
    info!("Solving with {}", config);

    let outcome = solve(&model, config, args.verbose);

    if cfg!(debug_assertions) {
        for (index, solution) in outcome.solutions().iter().enumerate() {
            validate(&model, solution)
                .map_err(|violation| HangarError::invalid_solution(index + 1, violation))?;
        }
    }

    print_summary(&outcome, args.max_solutions);
    info!("{}", outcome.statistics());

    if args.print_grid {
        for (index, solution) in outcome.solutions().iter().enumerate() {
            println!("\nSolution {}:", index + 1);
            print!("{}", render::render_solution(&model, solution));
        }
    }

    let output_path = args
        .output_path
        .unwrap_or_else(|| args.instance_path.with_extension("csv"));
    let mut writer = BufWriter::new(File::create(&output_path)?);
    output::write_solutions(&mut writer, &model, outcome.solutions())?;
    writer.flush()?;
    info!("Results written to {}", output_path.display());

    Ok(())
}

fn solve(model: &Model, config: SolverConfig, verbose: bool) -> SolveOutcome {
    if config.threads > 1 {
        return ParallelSolver::new(config).solve(model);
    }

    let solver = BacktrackingSolver::new(config);
    if verbose {
        solver.solve(model, LogMonitor::default())
    } else {
        solver.solve(model, NoOperationMonitor::new())
    }
}

fn print_summary(outcome: &SolveOutcome, max_solutions: usize) {
    if outcome.is_empty() {
        if outcome.termination().is_aborted() {
            println!("No schedule found before the search stopped ({}).", outcome.termination());
        } else {
            println!("No feasible schedule found.");
        }
    } else {
        println!(
            "Found {} solution(s) (limited to {}).",
            outcome.len(),
            max_solutions
        );
    }
}
