use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::execution::SuiteSummary;
use crate::runner::TestResult;

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub passed: usize,
    pub failed: usize,
    pub elapsed_secs: f64,
    pub cases: Vec<CaseReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CaseReport<'a> {
    pub section: &'a str,
    pub name: &'a str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

impl<'a> Report<'a> {
    pub fn from_summary(summary: &'a SuiteSummary, elapsed_secs: f64) -> Self {
        let cases = summary
            .records
            .iter()
            .map(|record| {
                let (status, reason) = match &record.result {
                    TestResult::Passed => ("passed", None),
                    TestResult::Failed(reason) => ("failed", Some(reason.as_str())),
                };
                CaseReport {
                    section: record.scenario.section,
                    name: record.scenario.name,
                    status,
                    reason,
                }
            })
            .collect();

        Self {
            passed: summary.passed,
            failed: summary.failed,
            elapsed_secs,
            cases,
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|err| err.to_string())?;
        fs::write(path, json)
            .map_err(|err| format!("could not write report to '{}': {err}", path.display()))
    }
}
