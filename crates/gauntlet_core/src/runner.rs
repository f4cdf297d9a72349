//! Replays scenario scripts against the vitals core and collects reports.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use bulwark_core::PlayerVitals;
use tracing::info;
use walkdir::WalkDir;

use crate::report::{GauntletReport, StepOutcome, StepStatus, VitalsSnapshot};
use crate::script::{Op, Scenario, Step};

const SKIPPED_DIRS: [&str; 3] = ["target", ".git", "reports"];

/// Executes a scenario against a fresh `PlayerVitals`.
///
/// Execution itself cannot fail: every core operation is total, so each step
/// always yields an observed snapshot. Expectation mismatches become data in
/// the report rather than errors.
pub fn run_scenario(scenario: &Scenario, run_id: impl Into<String>) -> GauntletReport {
    let mut vitals = PlayerVitals::new();
    let mut outcomes = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        apply_step(&mut vitals, step);
        let observed = VitalsSnapshot::from(&vitals);
        let (status, mismatches) = match &step.expect {
            Some(expectation) => {
                let mismatches = expectation.check(&observed);
                if mismatches.is_empty() {
                    (StepStatus::Pass, mismatches)
                } else {
                    (StepStatus::Fail, mismatches)
                }
            }
            None => (StepStatus::Unchecked, Vec::new()),
        };
        outcomes.push(StepOutcome {
            index,
            op: step.op,
            amount: step.amount,
            status,
            observed,
            mismatches,
        });
    }
    let report = GauntletReport::new(run_id, scenario.name.clone(), outcomes);
    info!(
        target: "gauntlet.runner",
        scenario = %report.scenario,
        passed = report.summary.passed,
        failed = report.summary.failed,
        "scenario executed"
    );
    report
}

// Amount arity is enforced by `Scenario::validate`, so a missing amount on a
// nullary op is the only case left and the default is never read.
fn apply_step(vitals: &mut PlayerVitals, step: &Step) {
    let amount = step.amount.unwrap_or_default();
    match step.op {
        Op::Reset => vitals.reset(),
        Op::TakeDamage => vitals.take_damage(amount),
        Op::Heal => vitals.heal(amount),
        Op::RegenerateShield => vitals.regenerate_shield(amount),
        Op::Revive => vitals.revive(),
        Op::IncreaseXp => vitals.increase_xp(amount),
    }
}

/// Finds every `*.toml` scenario under `root`, sorted for a stable run order.
pub fn discover_scenarios(root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry.path()))
    {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Loads and runs every scenario under `root`; report ids take the file stem.
pub fn run_suite(root: &Path) -> Result<Vec<GauntletReport>> {
    let paths = discover_scenarios(root)?;
    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let scenario = Scenario::from_path(&path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| scenario.name.clone());
        reports.push(run_scenario(&scenario, id));
    }
    Ok(reports)
}

fn is_skipped(path: &Path) -> bool {
    path.components().any(|part| {
        matches!(
            part,
            Component::Normal(name) if SKIPPED_DIRS.iter().any(|dir| name.to_str() == Some(*dir))
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(data: &str) -> Scenario {
        let scenario: Scenario = toml::from_str(data).unwrap();
        scenario.validate().unwrap();
        scenario
    }

    #[test]
    fn a_clean_run_passes_every_checked_step() {
        let scenario = scenario(
            r#"
            name = "triage"

            [[steps]]
            op = "take_damage"
            amount = 150
            expect = { health = 50, shield = 0, lives = 3 }

            [[steps]]
            op = "heal"
            amount = 25
            expect = { health = 75 }

            [[steps]]
            op = "regenerate_shield"
            amount = 40
            expect = { shield = 40 }
            "#,
        );
        let report = run_scenario(&scenario, "run-triage");
        assert!(report.passed());
        assert_eq!(report.summary.passed, 3);
        assert_eq!(report.summary.failed, 0);
        assert_eq!(report.steps[2].observed.shield, 40);
    }

    #[test]
    fn a_mismatch_is_recorded_not_raised() {
        let scenario = scenario(
            r#"
            name = "wrong guess"

            [[steps]]
            op = "take_damage"
            amount = 10
            expect = { shield = 95 }
            "#,
        );
        let report = run_scenario(&scenario, "run-wrong");
        assert!(!report.passed());
        let step = &report.steps[0];
        assert_eq!(step.status, StepStatus::Fail);
        assert_eq!(step.mismatches.len(), 1);
        assert_eq!(step.mismatches[0].field, "shield");
        assert_eq!(step.mismatches[0].expected, 95);
        assert_eq!(step.mismatches[0].actual, 90);
    }

    #[test]
    fn steps_without_expectations_stay_unchecked() {
        let scenario = scenario(
            r#"
            name = "observer"

            [[steps]]
            op = "take_damage"
            amount = 200

            [[steps]]
            op = "revive"
            expect = { health = 100, shield = 100, lives = 1 }
            "#,
        );
        let report = run_scenario(&scenario, "run-observe");
        assert!(report.passed());
        assert_eq!(report.steps[0].status, StepStatus::Unchecked);
        // Damage past zero already consumed one life before the scripted revive.
        assert_eq!(report.steps[0].observed.lives, 2);
        assert_eq!(report.steps[1].status, StepStatus::Pass);
    }

    #[test]
    fn reset_mid_script_starts_the_state_over() {
        let scenario = scenario(
            r#"
            name = "fresh start"

            [[steps]]
            op = "take_damage"
            amount = 200

            [[steps]]
            op = "reset"
            expect = { health = 100, shield = 100, lives = 3, xp = 0, level = 1 }
            "#,
        );
        let report = run_scenario(&scenario, "run-reset");
        assert!(report.passed());
    }

    #[test]
    fn skipped_directories_are_pruned_from_discovery() {
        assert!(is_skipped(Path::new("scenarios/target/cache.toml")));
        assert!(is_skipped(Path::new("scenarios/.git/config")));
        assert!(is_skipped(Path::new("reports/run-1.toml")));
        assert!(!is_skipped(Path::new("scenarios/survival/last_stand.toml")));
    }
}
