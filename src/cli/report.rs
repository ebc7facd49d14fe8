use std::fmt::Display;

use tabled::Table;

use crate::{
    error::Result,
    success,
    types::{DownloadReport, FailurePolicy, StepTableRow, UploadReport},
    warning,
};

#[derive(Debug, Clone)]
pub struct StepResult {
    pub step: String,
    pub items: usize,
    pub failures: Vec<String>,
}

impl StepResult {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of every step of a run, in execution order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    policy: FailurePolicy,
    steps: Vec<StepResult>,
}

impl RunReport {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            steps: Vec::new(),
        }
    }

    pub fn record_download(&mut self, step: &str, result: Result<DownloadReport>) {
        match result {
            Ok(report) => self.push(step, report.manifest.len(), report.failures),
            Err(e) => self.record_failure(step, e),
        }
    }

    pub fn record_upload(&mut self, step: &str, result: Result<UploadReport>) {
        match result {
            Ok(report) => {
                let mut failures = report.failures;
                if let Some(reason) = report.aborted {
                    failures.push(format!("aborted: {reason}"));
                }
                self.push(step, report.uploaded.len(), failures)
            }
            Err(e) => self.record_failure(step, e),
        }
    }

    pub fn record(&mut self, step: &str, result: Result<()>) {
        match result {
            Ok(()) => self.push(step, 0, Vec::new()),
            Err(e) => self.record_failure(step, e),
        }
    }

    pub fn record_failure<E: Display>(&mut self, step: &str, error: E) {
        log::error!("{step} failed: {error}");
        self.push(step, 0, vec![error.to_string()]);
    }

    fn push(&mut self, step: &str, items: usize, failures: Vec<String>) {
        self.steps.push(StepResult {
            step: step.to_string(),
            items,
            failures,
        });
    }

    /// True when the policy is [`FailurePolicy::Abort`] and the latest step failed.
    pub fn should_stop(&self) -> bool {
        self.policy == FailurePolicy::Abort && self.steps.last().is_some_and(|s| !s.is_ok())
    }

    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|s| !s.is_ok())
    }

    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    pub fn print_summary(&self) {
        if self.steps.is_empty() {
            warning!("Nothing was done.");
            return;
        }

        let rows: Vec<StepTableRow> = self
            .steps
            .iter()
            .map(|s| StepTableRow {
                step: s.step.clone(),
                status: if s.is_ok() { "ok" } else { "failed" }.to_string(),
                items: s.items,
                failures: s.failures.len(),
            })
            .collect();
        println!("{}", Table::new(rows));

        for step in self.steps.iter().filter(|s| !s.is_ok()) {
            for failure in &step.failures {
                warning!("{}: {}", step.step, failure);
            }
        }

        if self.has_failures() {
            warning!("Backup finished with failures. See vk.log for details.");
        } else {
            success!("Backup finished.");
        }
    }
}
