// Atom tags and part indices used by CT-X / CDP-S registration payloads

/// Patch selection per part (two bytes per part: bank, program)
pub const ATOM_PATCH: u8 = 0x10;

/// Per-part volume levels
pub const ATOM_VOLUME: u8 = 0x11;

/// Per-part stereo pan positions
pub const ATOM_PAN: u8 = 0x12;

// Part indices common to all CT-X keyboards and the CDP-S
pub const PART_U1: usize = 0;
pub const PART_U2: usize = 1;
pub const PART_AUTO_HARMONY: usize = 4;

/// Lower keyboard zone on CT-X700/800
pub const PART_L: usize = 2;

// CT-X3000/5000 split the lower zone in two
pub const PART_L1: usize = 2;
pub const PART_L2: usize = 3;
