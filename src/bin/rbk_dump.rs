//! Inspect a Casio registration bank (.RBK) file
//! Prints the keyboard model and decoded per-slot settings, plus a hex
//! dump of one slot when a slot number is given

use rbk_rs::core::constants::ATOM_PATCH;
use rbk_rs::formats::patch_names::patch_name;
use rbk_rs::formats::rbk::load_rbk;
use std::env;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file.rbk> [slot]", args[0]);
        eprintln!("\nExamples:");
        eprintln!("  {} bank.rbk                # Show all slots", args[0]);
        eprintln!("  {} bank.rbk 3              # Hex dump of slot 3", args[0]);
        std::process::exit(1);
    }

    let rbk_file = &args[1];
    let filter: Option<usize> = match args.get(2) {
        Some(s) => Some(s.parse()?),
        None => None,
    };

    println!("Loading .RBK file: {}", rbk_file);
    let bank = load_rbk(rbk_file)?;
    println!("Keyboard: {}", bank.keyboard);
    println!("Registrations: {}\n", bank.len());

    for (slot, reg) in bank.iter().enumerate() {
        if let Some(n) = filter {
            if n != slot {
                continue;
            }
        }

        println!("=== Slot {} ({} bytes) ===", slot, reg.len());

        match reg.volumes() {
            Ok((u1, u2, l)) => println!("Volumes: U1={} U2={} L={}", u1, u2, l),
            Err(_) => println!("Volumes: (not present)"),
        }
        match reg.pans() {
            Ok((u1, u2, l)) => println!("Pans:    U1={} U2={} L={}", u1, u2, l),
            Err(_) => println!("Pans:    (not present)"),
        }

        // The Patch field carries two bytes per part
        if let Ok(Some(patch)) = reg.get(ATOM_PATCH) {
            for part in 0..patch.len() / 2 {
                let (bank_sel, program) = reg.patch_bank(part)?;
                let name = patch_name(bank_sel, program).unwrap_or("(unknown)");
                println!(
                    "Part {}: bank {:3} program {:3}  {}",
                    part, bank_sel, program, name
                );
            }
        } else {
            println!("Patch:   (not present)");
        }

        if filter.is_some() {
            println!("\n{}", reg.printable());
        }
        println!();
    }

    Ok(())
}
