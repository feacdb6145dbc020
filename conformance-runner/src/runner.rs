use pledge::Engine;
use tracing::debug;

use crate::suite::Scenario;

#[derive(Debug, Clone)]
pub enum TestResult {
    Passed,
    Failed(String),
}

/// Runs one scenario in a fresh context, then drains whatever it left
/// queued so late failures surface too.
pub fn run_scenario(engine: &Engine, scenario: &Scenario) -> TestResult {
    let mut ctx = engine.new_context();
    debug!(section = scenario.section, name = scenario.name, "running scenario");

    if let Err(reason) = (scenario.run)(&mut ctx) {
        return TestResult::Failed(reason);
    }
    match ctx.run_microtasks() {
        Ok(_) => TestResult::Passed,
        Err(err) => TestResult::Failed(format!("draining after scenario: {err}")),
    }
}
