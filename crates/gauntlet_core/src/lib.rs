//! Data-driven exercise harness for the vitals core.
//!
//! A scenario is a TOML table of operations with optional per-step
//! expectations. Running one replays the table against a fresh
//! [`PlayerVitals`](bulwark_core::PlayerVitals) and emits a
//! [`GauntletReport`] instead of panicking on the first divergence, so a
//! whole suite can be swept in one pass.

pub mod report;
pub mod runner;
pub mod script;

pub use report::{
    GauntletReport, Mismatch, ReportStatus, ReportSummary, StepOutcome, StepStatus, VitalsSnapshot,
};
pub use runner::{discover_scenarios, run_scenario, run_suite};
pub use script::{Expectation, Op, Scenario, ScriptError, Step};
