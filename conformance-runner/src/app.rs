use std::fs;
use std::time::Instant;

use clap::Parser;
use colored::Colorize;
use pledge::Engine;

use crate::cli::Cli;
use crate::execution::{init_thread_pool, run_suite};
use crate::report::Report;
use crate::suite;

/// Runs the command line and returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    let start = Instant::now();

    let engine = match load_engine(&cli) {
        Ok(engine) => engine,
        Err(reason) => {
            eprintln!("{} {reason}", "error:".red().bold());
            return 2;
        }
    };

    let scenarios = suite::select(cli.filter.as_deref());
    if cli.list {
        for scenario in &scenarios {
            println!("{}", scenario.title());
        }
        return 0;
    }

    init_thread_pool();
    println!(
        "{} {} scenarios...\n",
        "Running".bold().cyan(),
        scenarios.len()
    );

    let summary = run_suite(&engine, &scenarios, cli.verbose);
    let elapsed = start.elapsed().as_secs_f64();
    print_totals(summary.passed, summary.failed, elapsed);

    if summary.failed > 0 && !cli.verbose {
        print_failure_sample(&summary.failures);
    }

    if let Some(path) = &cli.json
        && let Err(reason) = Report::from_summary(&summary, elapsed).write(path)
    {
        eprintln!("{} {reason}", "error:".red().bold());
        return 2;
    }

    if summary.failed > 0 { 1 } else { 0 }
}

fn load_engine(cli: &Cli) -> Result<Engine, String> {
    let Some(path) = &cli.config else {
        return Ok(Engine::new());
    };
    let source = fs::read_to_string(path)
        .map_err(|err| format!("could not read '{}': {err}", path.display()))?;
    Engine::from_json(&source).map_err(|err| err.to_string())
}

fn print_totals(passed: usize, failed: usize, elapsed_secs: f64) {
    println!("\n{}", "=".repeat(60));
    println!(
        "Passed: {} | Failed: {}",
        passed.to_string().green().bold(),
        failed.to_string().red().bold(),
    );
    println!("Completed in {:.2}s", elapsed_secs);
    println!("{}", "=".repeat(60));
}

fn print_failure_sample(failures: &[(String, String)]) {
    let max_rows = 10;
    let shown = failures.len().min(max_rows);

    println!("\n{}", "Sample failures:".red().bold());
    for (title, reason) in failures.iter().take(shown) {
        println!("  {} - {}", title, reason);
    }
    if failures.len() > shown {
        println!(
            "  ... and {} more (use --verbose for all)",
            failures.len() - shown
        );
    }
}
