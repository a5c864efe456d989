use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use derby_control::{GarageSession, PresentationCue, TestRun};
use derby_core::{catalog, Material, SlotName};
use serde::Serialize;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "derby_cli", about = "Workshop Derby CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a car from five parts and run the track test.
    Run {
        #[arg(long)]
        tire: Option<String>,
        #[arg(long)]
        chassis: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        motor: Option<String>,
        #[arg(long)]
        gear: Option<String>,
        /// Emit the outcome and cue script as JSON instead of a timeline.
        #[arg(long)]
        json: bool,
    },
    /// List each slot and the materials on the workshop shelf.
    Parts,
}

// ---------------------------------------------------------------------------
// Run flow
// ---------------------------------------------------------------------------

fn shelf_listing(slot: SlotName) -> String {
    let offered: Vec<&str> = catalog::offered_materials(slot)
        .iter()
        .map(|m| m.as_str())
        .collect();
    offered.join(", ")
}

/// Parses one part choice and mounts it through the session boundary.
fn mount_part(session: &mut GarageSession, slot: SlotName, raw: &str) -> Result<()> {
    let material: Material = raw
        .parse()
        .map_err(|_| anyhow!("'{raw}' is not a material"))
        .with_context(|| format!("picking a {slot} (shelf has: {})", shelf_listing(slot)))?;

    session
        .install(slot, material)
        .with_context(|| format!("mounting the {slot} (shelf has: {})", shelf_listing(slot)))?;

    println!("Mounted {material} {slot}.");
    Ok(())
}

#[derive(Serialize)]
struct RunReport<'a> {
    outcome: &'a derby_core::Outcome,
    cues: &'a [PresentationCue],
}

fn print_timeline(run: &TestRun) {
    println!("{}", "-".repeat(60));
    let mut elapsed_ms = 0u64;
    for cue in &run.cues {
        match cue {
            PresentationCue::Countdown { hold_ms } => {
                println!("[t={elapsed_ms:>5}ms] engines on, holding at the line");
                elapsed_ms += hold_ms;
            }
            PresentationCue::Drive {
                distance,
                duration_ms,
            } => {
                println!("[t={elapsed_ms:>5}ms] driving {distance} units over {duration_ms}ms");
                elapsed_ms += duration_ms;
            }
            PresentationCue::FailureEffect { slot, tag } => {
                println!("[t={elapsed_ms:>5}ms] {slot} gives out: {tag} effect");
            }
            PresentationCue::Verdict { success, message } => {
                let banner = if *success { "PASS" } else { "FAIL" };
                println!("[t={elapsed_ms:>5}ms] {banner}: {message}");
            }
        }
    }
}

fn run(picks: &[(SlotName, Option<String>)], json: bool) -> Result<()> {
    let mut session = GarageSession::new();

    for (slot, raw) in picks {
        if let Some(raw) = raw {
            mount_part(&mut session, *slot, raw)?;
        }
    }

    let progress = session.progress();
    println!("{}", progress.status_line());
    if !progress.complete {
        // Mirrors the disabled run button: don't even reach the evaluator.
        let missing: Vec<&str> = session
            .assembly()
            .missing_slots()
            .into_iter()
            .map(SlotName::as_str)
            .collect();
        anyhow::bail!("cannot start the test, still missing: {}", missing.join(", "));
    }

    let test_run = session
        .run_test()
        .context("starting the track test")?;

    if json {
        let report = RunReport {
            outcome: &test_run.outcome,
            cues: &test_run.cues,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_timeline(&test_run);
    }
    Ok(())
}

fn list_parts() {
    for slot in SlotName::ALL {
        println!("{:>8}: {}", slot.as_str(), shelf_listing(slot));
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            tire,
            chassis,
            body,
            motor,
            gear,
            json,
        } => {
            let picks = [
                (SlotName::Tire, tire),
                (SlotName::Chassis, chassis),
                (SlotName::Body, body),
                (SlotName::Motor, motor),
                (SlotName::Gear, gear),
            ];
            run(&picks, json)?;
        }
        Commands::Parts => list_parts(),
    }
    Ok(())
}
