//! Report types emitted by scenario runs.

use bulwark_core::PlayerVitals;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::script::Op;

/// Point-in-time copy of every vitals field, as carried in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    pub health: i32,
    pub shield: i32,
    pub lives: i32,
    pub xp: i32,
    pub level: i32,
}

impl From<&PlayerVitals> for VitalsSnapshot {
    fn from(vitals: &PlayerVitals) -> Self {
        Self {
            health: vitals.health(),
            shield: vitals.shield(),
            lives: vitals.lives(),
            xp: vitals.xp(),
            level: vitals.level(),
        }
    }
}

/// A single expected-versus-observed divergence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mismatch {
    pub field: String,
    pub expected: i32,
    pub actual: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pass,
    Fail,
    Unchecked,
}

/// How one scripted step went: the operation, what the state looked like
/// afterwards, and any expectation mismatches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub index: usize,
    pub op: Op,
    pub amount: Option<i32>,
    pub status: StepStatus,
    pub observed: VitalsSnapshot,
    pub mismatches: Vec<Mismatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub status: ReportStatus,
    pub passed: usize,
    pub failed: usize,
    pub unchecked: usize,
}

/// Full record of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GauntletReport {
    pub id: String,
    pub timestamp: String,
    pub scenario: String,
    pub summary: ReportSummary,
    pub steps: Vec<StepOutcome>,
}

impl GauntletReport {
    /// Builds a report, rolling the step outcomes up into a summary.
    pub fn new(
        id: impl Into<String>,
        scenario: impl Into<String>,
        steps: Vec<StepOutcome>,
    ) -> Self {
        let summary = summarize(&steps);
        Self {
            id: id.into(),
            timestamp: Utc::now().to_rfc3339(),
            scenario: scenario.into(),
            summary,
            steps,
        }
    }

    pub fn passed(&self) -> bool {
        self.summary.status == ReportStatus::Pass
    }

    /// Pretty-printed JSON, as shown by the CLI and written to report files.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// A run with no checked steps still passes; only an observed mismatch fails it.
fn summarize(steps: &[StepOutcome]) -> ReportSummary {
    let passed = steps
        .iter()
        .filter(|step| step.status == StepStatus::Pass)
        .count();
    let failed = steps
        .iter()
        .filter(|step| step.status == StepStatus::Fail)
        .count();
    let unchecked = steps.len() - passed - failed;
    let status = if failed > 0 {
        ReportStatus::Fail
    } else {
        ReportStatus::Pass
    };
    ReportSummary {
        status,
        passed,
        failed,
        unchecked,
    }
}
