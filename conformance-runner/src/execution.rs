use std::panic::{self, AssertUnwindSafe};

use colored::Colorize;
use pledge::Engine;
use rayon::prelude::*;

use crate::panic_message::format_panic;
use crate::runner::{TestResult, run_scenario};
use crate::suite::Scenario;

pub struct CaseRecord {
    pub scenario: &'static Scenario,
    pub result: TestResult,
}

pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<(String, String)>,
    pub records: Vec<CaseRecord>,
}

pub fn init_thread_pool() {
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(8);

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

pub fn run_suite(engine: &Engine, scenarios: &[&'static Scenario], verbose: bool) -> SuiteSummary {
    let records: Vec<CaseRecord> = scenarios
        .par_iter()
        .map(|scenario| run_case(engine, *scenario))
        .collect();

    let mut summary = SuiteSummary {
        passed: 0,
        failed: 0,
        failures: Vec::new(),
        records: Vec::new(),
    };
    for record in records {
        apply_record(&mut summary, &record, verbose);
        summary.records.push(record);
    }
    summary
}

fn run_case(engine: &Engine, scenario: &'static Scenario) -> CaseRecord {
    let result = panic::catch_unwind(AssertUnwindSafe(|| run_scenario(engine, scenario)))
        .unwrap_or_else(|payload| TestResult::Failed(format_panic(payload)));

    CaseRecord { scenario, result }
}

fn apply_record(summary: &mut SuiteSummary, record: &CaseRecord, verbose: bool) {
    let title = record.scenario.title();
    match &record.result {
        TestResult::Passed => {
            summary.passed += 1;
            if verbose {
                println!("{} {}", "PASS".green(), title);
            }
        }
        TestResult::Failed(reason) => {
            summary.failed += 1;
            if verbose {
                println!("{} {} - {}", "FAIL".red(), title, reason);
            }
            summary.failures.push((title, reason.clone()));
        }
    }
}
