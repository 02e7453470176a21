//! Set the per-part volumes of one registration slot, in place
//! Reads the bank, updates one slot, and writes the file back

use rbk_rs::formats::rbk::{load_rbk, save_rbk};
use std::env;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() != 6 {
        eprintln!("Usage: {} <file.rbk> <slot> <u1> <u2> <l>", args[0]);
        eprintln!("Example: {} bank.rbk 3 124 125 126", args[0]);
        std::process::exit(1);
    }

    let rbk_file = &args[1];
    let slot: usize = args[2].parse()?;
    let u1: u8 = args[3].parse()?;
    let u2: u8 = args[4].parse()?;
    let l: u8 = args[5].parse()?;

    tracing::info!("Loading {}", rbk_file);
    let mut bank = load_rbk(rbk_file)?;
    tracing::info!("Keyboard: {} ({} registrations)", bank.keyboard, bank.len());

    if slot >= bank.len() {
        anyhow::bail!("Slot {} out of range, bank has {} slots", slot, bank.len());
    }

    bank[slot].set_volumes(u1, u2, l)?;
    tracing::info!("Slot {} volumes set to U1={} U2={} L={}", slot, u1, u2, l);

    save_rbk(rbk_file, &bank)?;
    tracing::info!("Wrote {}", rbk_file);

    Ok(())
}
