// .RBK registration bank file handler
//
// Container layout (all integers little-endian):
//   16 bytes  keyboard identifier, ASCII, NUL-padded
//    4 bytes  "RBKH"
//    4 bytes  u32 file version
//   then one block per registration until end of file:
//    4 bytes  "REGH"
//    4 bytes  u32 file version
//    4 bytes  u32 CRC-32 of the payload
//    4 bytes  u32 payload length
//    N bytes  payload (TLV-encoded registration fields)
//    4 bytes  "EODA"

use crate::core::registration::Registration;
use crate::keyboards;
use std::fs::File;
use std::io::{Read, Write};
use std::ops::{Index, IndexMut};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RbkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Incorrect format: expected {expected} at offset {offset}")]
    InvalidFormat {
        expected: &'static str,
        offset: usize,
    },

    #[error("CRC mismatch at offset {offset}")]
    ChecksumMismatch { offset: usize },

    #[error("Unknown keyboard model: {0}")]
    UnknownKeyboard(String),

    #[error("Need at most {max} registrations to make an .RBK file, got {got}")]
    TooManyRegistrations { got: usize, max: usize },

    #[error("Keyboard name is {len} bytes; the identifier field holds at most 16")]
    KeyboardNameTooLong { len: usize },

    #[error("Cannot encode a bank with no registrations")]
    EmptyBank,
}

pub type Result<T> = std::result::Result<T, RbkError>;

const BANK_MAGIC: &str = "RBKH";
const REG_MAGIC: &str = "REGH";
const REG_TRAILER: &str = "EODA";

/// Width of the keyboard identifier field at the start of the file
pub const KEYBOARD_FIELD_LEN: usize = 16;

/// An ordered set of registrations plus the keyboard they target
///
/// Slot order is significant and preserved through decode/encode. The
/// bank exclusively owns its registrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationBank {
    /// Target keyboard model; must be in the format table to encode
    pub keyboard: String,

    /// Registration slots, in file order
    pub registrations: Vec<Registration>,
}

impl RegistrationBank {
    /// A stock bank for the given keyboard with four empty registrations
    pub fn with_keyboard(keyboard: impl Into<String>) -> Self {
        Self {
            keyboard: keyboard.into(),
            registrations: vec![
                Registration::new(),
                Registration::new(),
                Registration::new(),
                Registration::new(),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Registration> {
        self.registrations.iter()
    }

    /// Decode a complete .RBK byte sequence
    ///
    /// All-or-nothing: any structural or checksum failure aborts the
    /// whole decode.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let name = slice(data, 0, KEYBOARD_FIELD_LEN, "keyboard identifier")?;
        let keyboard = String::from_utf8_lossy(name)
            .trim_matches('\0')
            .to_string();

        let mut i = KEYBOARD_FIELD_LEN;
        expect_marker(data, i, BANK_MAGIC)?;
        // Bank file version is not validated on read
        i += 8;

        let mut registrations = Vec::new();
        while i < data.len() {
            expect_marker(data, i, REG_MAGIC)?;
            // Per-registration version, also unvalidated
            i += 8;

            let crc = read_u32(data, i, "registration checksum")?;
            let length = read_u32(data, i + 4, "registration length")? as usize;
            i += 8;

            let payload = slice(data, i, length, "registration payload")?;
            if crc32fast::hash(payload) != crc {
                return Err(RbkError::ChecksumMismatch { offset: i });
            }
            registrations.push(Registration::from_bytes(payload.to_vec()));
            i += length;

            expect_marker(data, i, REG_TRAILER)?;
            i += 4;
        }

        Ok(Self {
            keyboard,
            registrations,
        })
    }

    /// Encode the bank as a complete .RBK byte sequence
    ///
    /// The output always holds exactly the keyboard's bank_size
    /// registrations: a shorter bank is padded in the output by repeating
    /// the first registration. The in-memory bank is not modified.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.keyboard.len() > KEYBOARD_FIELD_LEN {
            return Err(RbkError::KeyboardNameTooLong {
                len: self.keyboard.len(),
            });
        }
        let fmt = keyboards::format_for(&self.keyboard)
            .ok_or_else(|| RbkError::UnknownKeyboard(self.keyboard.clone()))?;

        if self.registrations.len() > fmt.bank_size {
            return Err(RbkError::TooManyRegistrations {
                got: self.registrations.len(),
                max: fmt.bank_size,
            });
        }
        if self.registrations.is_empty() {
            return Err(RbkError::EmptyBank);
        }

        let mut out = Vec::new();
        out.extend_from_slice(self.keyboard.as_bytes());
        out.resize(KEYBOARD_FIELD_LEN, 0);
        out.extend_from_slice(BANK_MAGIC.as_bytes());
        out.extend_from_slice(&fmt.file_version.to_le_bytes());

        for slot in 0..fmt.bank_size {
            let reg = self
                .registrations
                .get(slot)
                .unwrap_or(&self.registrations[0]);
            let payload = reg.as_bytes();

            out.extend_from_slice(REG_MAGIC.as_bytes());
            out.extend_from_slice(&fmt.file_version.to_le_bytes());
            out.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
            out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            out.extend_from_slice(payload);
            out.extend_from_slice(REG_TRAILER.as_bytes());
        }

        Ok(out)
    }
}

impl Default for RegistrationBank {
    fn default() -> Self {
        Self::with_keyboard("CT-X700")
    }
}

impl Index<usize> for RegistrationBank {
    type Output = Registration;

    fn index(&self, slot: usize) -> &Registration {
        &self.registrations[slot]
    }
}

impl IndexMut<usize> for RegistrationBank {
    fn index_mut(&mut self, slot: usize) -> &mut Registration {
        &mut self.registrations[slot]
    }
}

impl<'a> IntoIterator for &'a RegistrationBank {
    type Item = &'a Registration;
    type IntoIter = std::slice::Iter<'a, Registration>;

    fn into_iter(self) -> Self::IntoIter {
        self.registrations.iter()
    }
}

/// Read a whole bank from a caller-supplied handle
///
/// The handle is consumed to end of stream in one bulk read; there is no
/// incremental parsing.
pub fn read_rbk<R: Read>(reader: &mut R) -> Result<RegistrationBank> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    RegistrationBank::from_bytes(&data)
}

/// Write a whole bank to a caller-supplied handle in one bulk write
///
/// Reading and rewriting through the same open handle requires the caller
/// to reposition it first; the codec only performs the bulk write.
pub fn write_rbk<W: Write>(writer: &mut W, bank: &RegistrationBank) -> Result<()> {
    writer.write_all(&bank.to_bytes()?)?;
    Ok(())
}

/// Load a .RBK file
pub fn load_rbk(filename: impl AsRef<Path>) -> Result<RegistrationBank> {
    let mut file = File::open(filename)?;
    read_rbk(&mut file)
}

/// Save a bank to a .RBK file
pub fn save_rbk(filename: impl AsRef<Path>, bank: &RegistrationBank) -> Result<()> {
    let mut file = File::create(filename)?;
    write_rbk(&mut file, bank)
}

fn slice<'a>(data: &'a [u8], offset: usize, len: usize, what: &'static str) -> Result<&'a [u8]> {
    data.get(offset..offset + len).ok_or(RbkError::InvalidFormat {
        expected: what,
        offset,
    })
}

fn expect_marker(data: &[u8], offset: usize, marker: &'static str) -> Result<()> {
    if slice(data, offset, 4, marker)? != marker.as_bytes() {
        return Err(RbkError::InvalidFormat {
            expected: marker,
            offset,
        });
    }
    Ok(())
}

fn read_u32(data: &[u8], offset: usize, what: &'static str) -> Result<u32> {
    let s = slice(data, offset, 4, what)?;
    Ok(u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
}
