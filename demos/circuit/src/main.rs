//! circuit: a bus loops past three zones while the Shifter publishes
//! positions and pending collisions.
//!
//! Output goes to `<output>/positions.json` (the whole page, replaced each
//! tick) and `<output>/stages.rson` (one line per stage).  With `--requests`,
//! relocation requests are read from stdin, one JSON object per line:
//!
//! ```text
//! {"collision": [0, 3], "actor": 2, "destination": 3}
//! ```
//!
//! The process then stays up until stdin closes.

mod layout;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rust_decimal::Decimal;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sc_publish::{PublicInterface, PublishConfig, Publisher};
use sc_sim::{LineSource, Pacing, ShifterBuilder, watch};

use layout::build_theatre;

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "circuit", about = "Run the bus circuit and publish each tick")]
struct Args {
    /// Directory for positions.json and stages.rson.
    #[arg(long, default_value = "output/circuit")]
    output: PathBuf,

    /// Simulation time to stop before.
    #[arg(long, default_value = "240")]
    stop: Decimal,

    /// Simulation time between ticks.
    #[arg(long, default_value = "1")]
    step: Decimal,

    /// Seed for stage keys.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Do not sleep between ticks.
    #[arg(long)]
    fast: bool,

    /// Read relocation requests from stdin.
    #[arg(long)]
    requests: bool,

    /// Raise log verbosity (-v debug, -vv trace).  RUST_LOG overrides.
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    // 1. Theatre.
    let (theatre, marks) = build_theatre(args.seed)?;
    let [zone_a, _, _] = marks.zones;
    info!(stages = theatre.len(), seed = args.seed, "theatre built");

    // 2. Publishing.
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let public = Arc::new(PublicInterface::new());
    let publisher = Publisher::new(PublishConfig::for_shifter(&args.output), Arc::clone(&public));

    // 3. Shifter.  Actors 0 and 1 ride the bus; actor 2 waits in zone A.
    let pacing = if args.fast { Pacing::Immediate } else { Pacing::default() };
    let mut shifter = ShifterBuilder::new(theatre, publisher)
        .pacing(pacing)
        .initial_placements(vec![marks.bus, marks.bus, zone_a])
        .build()?;

    if args.requests {
        let source = LineSource::new(BufReader::new(tokio::io::stdin()));
        tokio::spawn(watch(source, shifter.inbox()));
    }

    // 4. Run.
    let t0 = Instant::now();
    let last = shifter.run(Decimal::ZERO, args.stop, args.step).await?;
    let elapsed = t0.elapsed();

    // 5. Summary.
    println!("Run complete in {:.3} s, last tick {last}", elapsed.as_secs_f64());
    println!("  pages published : {}", shifter.publisher().published());
    println!(
        "  colliding       : {}",
        public.event("colliding").is_some_and(|s| s.is_set())
    );
    println!();

    println!("{:<8} {:<12}", "Actor", "Stage");
    println!("{}", "-".repeat(20));
    for (actor, stage) in shifter.cast().iter() {
        let label = shifter.theatre().stage(stage).map_or("?", |s| s.label.as_str());
        println!("{:<8} {:<12}", actor.index(), label);
    }

    Ok(())
}
