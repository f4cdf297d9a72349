use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use gauntlet_core::{run_scenario, run_suite, GauntletReport, Scenario};
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Run vitals scenarios and emit JSON reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single scenario file and emit a JSON report.
    Run(RunArgs),
    /// Run every scenario under a directory and emit one report each.
    Suite(SuiteArgs),
    /// Pretty-print an existing report.
    Show(ShowArgs),
}

#[derive(Args)]
struct RunArgs {
    #[arg(long)]
    scenario: PathBuf,
    #[arg(long)]
    id: Option<String>,
    /// Write the report here in addition to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct SuiteArgs {
    #[arg(long, default_value = "scenarios")]
    dir: PathBuf,
    /// Write one `<id>.json` per scenario into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args)]
struct ShowArgs {
    #[arg(long)]
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => handle_run(args),
        Commands::Suite(args) => handle_suite(args),
        Commands::Show(args) => handle_show(args),
    }
}

fn handle_run(args: RunArgs) -> Result<()> {
    let scenario = Scenario::from_path(&args.scenario)?;
    let run_id = args
        .id
        .unwrap_or_else(|| format!("run-{}", Utc::now().format("%Y%m%dT%H%M%S")));
    info!(
        target: "gauntlet.cli",
        run_id = %run_id,
        scenario = %scenario.name,
        "running scenario"
    );
    let report = run_scenario(&scenario, run_id);

    println!("{}", report.to_json_pretty()?);
    if let Some(out) = args.out.as_ref() {
        write_report(&report, out)?;
        println!("Report written to {}", out.display());
    }

    if !report.passed() {
        bail!(
            "scenario '{}' failed {} step(s)",
            report.scenario,
            report.summary.failed
        );
    }
    Ok(())
}

fn handle_suite(args: SuiteArgs) -> Result<()> {
    let reports = run_suite(&args.dir)?;
    if reports.is_empty() {
        bail!("no scenarios found under {}", args.dir.display());
    }

    if let Some(out_dir) = args.out_dir.as_ref() {
        fs::create_dir_all(out_dir)?;
        for report in &reports {
            write_report(report, &out_dir.join(format!("{}.json", report.id)))?;
        }
        println!("Reports written to {}", out_dir.display());
    }

    let mut failed = 0usize;
    for report in &reports {
        println!(
            "{:<24} {:?} ({} passed, {} failed, {} unchecked)",
            report.id,
            report.summary.status,
            report.summary.passed,
            report.summary.failed,
            report.summary.unchecked
        );
        if !report.passed() {
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} scenario(s) failed", reports.len());
    }
    println!("All {} scenario(s) passed", reports.len());
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<()> {
    let data = fs::read_to_string(&args.input)?;
    let report: GauntletReport = serde_json::from_str(&data)?;
    println!(
        "Report {} on '{}' -> {:?} ({} passed, {} failed, {} unchecked)",
        report.id,
        report.scenario,
        report.summary.status,
        report.summary.passed,
        report.summary.failed,
        report.summary.unchecked
    );
    for step in report.steps.iter().filter(|step| !step.mismatches.is_empty()) {
        for mismatch in &step.mismatches {
            println!(
                "  step {} {}: {} expected {} got {}",
                step.index, step.op, mismatch.field, mismatch.expected, mismatch.actual
            );
        }
    }
    Ok(())
}

fn write_report(report: &GauntletReport, path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, report.to_json_pretty()?)?;
    Ok(())
}
