//! Scenario scripts: TOML tables of vitals operations with optional
//! per-step expectations.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::{Mismatch, VitalsSnapshot};

/// Why a scenario file could not be turned into a runnable script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read scenario at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("step {step}: {op} requires an amount")]
    AmountRequired { step: usize, op: Op },
    #[error("step {step}: {op} does not take an amount")]
    AmountForbidden { step: usize, op: Op },
}

/// A named sequence of operations to replay against a fresh vitals state.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One scripted operation, optionally checked against an expectation.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub op: Op,
    #[serde(default)]
    pub amount: Option<i32>,
    #[serde(default)]
    pub expect: Option<Expectation>,
}

/// The vitals operations a script can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Reset,
    TakeDamage,
    Heal,
    RegenerateShield,
    Revive,
    IncreaseXp,
}

impl Op {
    /// Whether the operation carries a damage/heal/xp magnitude.
    pub fn takes_amount(self) -> bool {
        matches!(
            self,
            Op::TakeDamage | Op::Heal | Op::RegenerateShield | Op::IncreaseXp
        )
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Op::Reset => "reset",
            Op::TakeDamage => "take_damage",
            Op::Heal => "heal",
            Op::RegenerateShield => "regenerate_shield",
            Op::Revive => "revive",
            Op::IncreaseXp => "increase_xp",
        };
        f.write_str(name)
    }
}

/// Partial expectation: only the fields the scenario names are checked.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Expectation {
    pub health: Option<i32>,
    pub shield: Option<i32>,
    pub lives: Option<i32>,
    pub xp: Option<i32>,
    pub level: Option<i32>,
}

impl Expectation {
    /// Compares every named field against an observed snapshot.
    pub fn check(&self, observed: &VitalsSnapshot) -> Vec<Mismatch> {
        let fields = [
            ("health", self.health, observed.health),
            ("shield", self.shield, observed.shield),
            ("lives", self.lives, observed.lives),
            ("xp", self.xp, observed.xp),
            ("level", self.level, observed.level),
        ];
        let mut mismatches = Vec::new();
        for (field, expected, actual) in fields {
            if let Some(expected) = expected {
                if expected != actual {
                    mismatches.push(Mismatch {
                        field: field.to_string(),
                        expected,
                        actual,
                    });
                }
            }
        }
        mismatches
    }
}

impl Scenario {
    /// Loads a scenario from a TOML file and validates its steps.
    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let data = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario: Scenario = toml::from_str(&data).map_err(|source| ScriptError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks amount arity for every step.
    pub fn validate(&self) -> Result<(), ScriptError> {
        for (step, entry) in self.steps.iter().enumerate() {
            if entry.op.takes_amount() && entry.amount.is_none() {
                return Err(ScriptError::AmountRequired { step, op: entry.op });
            }
            if !entry.op.takes_amount() && entry.amount.is_some() {
                return Err(ScriptError::AmountForbidden { step, op: entry.op });
            }
        }
        Ok(())
    }
}
