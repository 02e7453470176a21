// Patch (tone) name lookup
//
// Maps the (bank, program) selector pair decoded from a registration's
// Patch field to a human-readable instrument name. Pure lookup over a
// CSV-sourced table; not part of the codec's correctness surface.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Built-in subset of the CT-X tone table
const BUILTIN_TONES_CSV: &str = include_str!("../../data/ctx_tones.csv");

/// CSV-sourced (bank, program) -> name table
///
/// Expected row format: `bank,program,name`, one entry per line, with an
/// optional header row. Malformed rows are skipped with a warning so a
/// partially usable vendor CSV still loads.
pub struct PatchNameTable {
    names: HashMap<(u8, u8), String>,
}

impl PatchNameTable {
    /// Parse a table from CSV text
    pub fn from_csv(csv: &str) -> Self {
        let mut names = HashMap::new();

        for (line_num, line) in csv.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_row(line) {
                Some((bank, program, name)) => {
                    names.insert((bank, program), name);
                }
                None => {
                    // Header rows land here too; only warn past line one
                    if line_num > 0 {
                        tracing::warn!("Skipping line {}: not a bank,program,name row", line_num + 1);
                    }
                }
            }
        }

        Self { names }
    }

    pub fn get(&self, bank: u8, program: u8) -> Option<&str> {
        self.names.get(&(bank, program)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parse one `bank,program,name` row; names may themselves contain commas
fn parse_row(line: &str) -> Option<(u8, u8, String)> {
    let mut parts = line.splitn(3, ',');
    let bank = parts.next()?.trim().parse::<u8>().ok()?;
    let program = parts.next()?.trim().parse::<u8>().ok()?;
    let name = parts.next()?.trim();
    if name.is_empty() {
        return None;
    }
    Some((bank, program, name.to_string()))
}

lazy_static! {
    static ref BUILTIN: PatchNameTable = PatchNameTable::from_csv(BUILTIN_TONES_CSV);
}

/// Resolve a (bank, program) pair against the built-in tone table
pub fn patch_name(bank: u8, program: u8) -> Option<&'static str> {
    BUILTIN.get(bank, program)
}
