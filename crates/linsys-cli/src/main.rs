use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linsys_io::{ProblemDocument, ReportDocument, load_problem, write_report_dat, write_report_json};
use linsys_solver::{
    Execution, ExecutionReport, Method, Orchestrator, Outcome, SolverPolicy, determinant_capped,
    validate_shape, validate_square,
};

/// Solve dense linear systems with Gauss, Gauss-Jordan and Cramer's rule.
#[derive(Debug, Parser)]
#[command(name = "linsys", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the requested methods and print a per-method report
    Solve(SolveArgs),
    /// Print the shape checks for a problem document
    Validate { problem: PathBuf },
    /// Print the determinant of the coefficient matrix
    Det {
        problem: PathBuf,
        /// Refuse matrices above this order (0 disables the cap)
        #[arg(long, default_value_t = linsys_solver::CRAMER_MAX_ORDER)]
        max_order: usize,
    },
}

#[derive(Debug, clap::Args)]
struct SolveArgs {
    problem: PathBuf,
    /// Method to run; repeat for several (default: the document's list, else all)
    #[arg(long = "method", short = 'm')]
    methods: Vec<Method>,
    /// Run methods one after another instead of on the thread pool
    #[arg(long)]
    sequential: bool,
    /// Override the numerical-zero threshold
    #[arg(long)]
    threshold: Option<f64>,
    /// Override the number of decimal places in solutions
    #[arg(long)]
    precision: Option<u32>,
    /// Write the report as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// Write the report as a plain-text summary
    #[arg(long)]
    dat: Option<PathBuf>,
}

/// Exit code when at least one requested method failed to produce a solution.
const EXIT_METHOD_FAILED: u8 = 3;

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Solve(args) => {
            let report = solve_file(&args)?;
            print_report(&report);
            if report.all_succeeded() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_METHOD_FAILED))
            }
        }
        Command::Validate { problem } => {
            let doc = read_problem(&problem)?;
            let (a, b) = doc.system()?;
            println!("rows: {}", a.nrows());
            println!("columns: {}", a.ncols());
            println!("vector_len: {}", b.len());
            println!("valid_shape: {}", validate_shape(&a, &b));
            println!("square: {}", validate_square(&a));
            Ok(ExitCode::SUCCESS)
        }
        Command::Det { problem, max_order } => {
            let doc = read_problem(&problem)?;
            let (a, _) = doc.system()?;
            let limit = (max_order > 0).then_some(max_order);
            let det = determinant_capped(&a, limit)?;
            println!("determinant: {det}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_problem(path: &Path) -> Result<ProblemDocument> {
    load_problem(path).with_context(|| format!("failed to load {}", path.display()))
}

fn resolve_policy(doc: &ProblemDocument, args: &SolveArgs) -> Result<SolverPolicy> {
    let mut policy = doc.effective_policy();
    if let Some(threshold) = args.threshold {
        policy.zero_threshold = threshold;
    }
    if let Some(precision) = args.precision {
        policy.round_decimals = precision;
    }
    policy.validate()?;
    Ok(policy)
}

fn solve_file(args: &SolveArgs) -> Result<ExecutionReport> {
    let doc = read_problem(&args.problem)?;
    let policy = resolve_policy(&doc, args)?;
    let (a, b) = doc.system()?;
    let methods = if args.methods.is_empty() {
        doc.requested_methods()
    } else {
        args.methods.clone()
    };
    let execution = if args.sequential {
        Execution::Sequential
    } else {
        Execution::Parallel
    };

    log::info!(
        "solving {} ({}x{}) with {} method(s)",
        args.problem.display(),
        a.nrows(),
        a.ncols(),
        methods.len()
    );
    let report = Orchestrator::new(policy)
        .with_execution(execution)
        .run(&a, &b, &methods);

    if args.json.is_some() || args.dat.is_some() {
        let job_name = job_name(&doc, &args.problem);
        let out = ReportDocument::new(job_name, chrono::Utc::now().to_rfc3339(), report.clone());
        if let Some(path) = &args.json {
            write_report_json(path, &out)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        if let Some(path) = &args.dat {
            write_report_dat(path, &out)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }
    Ok(report)
}

fn job_name(doc: &ProblemDocument, path: &Path) -> String {
    if !doc.name.is_empty() {
        return doc.name.clone();
    }
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "linsys".to_string())
}

fn print_report(report: &ExecutionReport) {
    for entry in &report.entries {
        match &entry.outcome {
            Outcome::Solved { values, rank } => println!(
                "{}: solved rank={} time_us={} x={:?}",
                entry.method,
                rank,
                entry.elapsed.as_micros(),
                values
            ),
            Outcome::Failed { kind, message, .. } => println!(
                "{}: {} time_us={} ({})",
                entry.method,
                kind,
                entry.elapsed.as_micros(),
                message
            ),
        }
    }
    let check = report.cross_check_default();
    if check.compared >= 2 {
        println!(
            "cross_check: {} (max deviation {:e})",
            if check.agree { "agree" } else { "DISAGREE" },
            check.max_deviation
        );
    }
    if let Some(fastest) = report.fastest() {
        println!("fastest: {} ({})", fastest.method, fastest.method.label());
    }
}
