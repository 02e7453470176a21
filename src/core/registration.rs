// A single registration: one stored snapshot of performance settings
// (patch, volume, pan, ...) occupying one bank slot

use crate::core::constants::*;
use crate::tlv::{self, TlvError};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("No field with tag {0:#04x} in this registration")]
    FieldNotFound(u8),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("Field too short: need {needed} bytes, have {available}")]
    FieldTooShort { needed: usize, available: usize },

    #[error(transparent)]
    Tlv(#[from] TlvError),
}

pub type Result<T> = std::result::Result<T, RegistrationError>;

/// One registration slot's payload, stored as an owned TLV byte buffer
///
/// Contents round-trip verbatim through the container codec except for
/// fields explicitly changed through the accessors below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    data: Vec<u8>,
}

impl Registration {
    /// Create an empty registration (stock slot contents)
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap raw payload bytes read from a bank file
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw payload bytes, exactly as they will be serialized
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Get a copy of the value bytes for @tag, or None if absent
    pub fn get(&self, tag: u8) -> Result<Option<Vec<u8>>> {
        Ok(tlv::lookup(&self.data, tag)?)
    }

    /// Overwrite the value region for @tag in place
    ///
    /// The new value must fit within the field's declared length; declared
    /// bytes beyond the written range keep their previous contents. An
    /// absent tag is an error here, unlike the raw TLV layer.
    pub fn set(&mut self, tag: u8, value: &[u8]) -> Result<()> {
        if tlv::update(&mut self.data, tag, value)? {
            Ok(())
        } else {
            Err(RegistrationError::FieldNotFound(tag))
        }
    }

    /// Borrow the value region for @tag as a bounded mutable view
    pub fn field(&mut self, tag: u8) -> Result<Field<'_>> {
        let range = tlv::value_range(&self.data, tag)?
            .ok_or(RegistrationError::FieldNotFound(tag))?;
        Ok(Field {
            bytes: &mut self.data[range],
        })
    }

    /// Per-part volume levels (U1, U2, lower zone)
    pub fn volumes(&self) -> Result<(u8, u8, u8)> {
        let v = self.fixed_field(ATOM_VOLUME, 3)?;
        Ok((v[0], v[1], v[2]))
    }

    pub fn set_volumes(&mut self, u1: u8, u2: u8, l: u8) -> Result<()> {
        self.set(ATOM_VOLUME, &[u1, u2, l])
    }

    /// Per-part stereo pan positions (U1, U2, lower zone)
    pub fn pans(&self) -> Result<(u8, u8, u8)> {
        let v = self.fixed_field(ATOM_PAN, 3)?;
        Ok((v[0], v[1], v[2]))
    }

    pub fn set_pans(&mut self, u1: u8, u2: u8, l: u8) -> Result<()> {
        self.set(ATOM_PAN, &[u1, u2, l])
    }

    /// The (bank, program) selector pair for @part from the Patch field
    ///
    /// Each part occupies two consecutive bytes at offset 2 * part.
    pub fn patch_bank(&self, part: usize) -> Result<(u8, u8)> {
        let v = self.fixed_field(ATOM_PATCH, 2 * part + 2)?;
        Ok((v[2 * part], v[2 * part + 1]))
    }

    /// Look up @tag and require at least @needed value bytes
    fn fixed_field(&self, tag: u8, needed: usize) -> Result<Vec<u8>> {
        let v = self
            .get(tag)?
            .ok_or(RegistrationError::FieldNotFound(tag))?;
        if v.len() < needed {
            return Err(RegistrationError::FieldTooShort {
                needed,
                available: v.len(),
            });
        }
        Ok(v)
    }

    /// Hex dump of the payload (similar to hexdump -C)
    pub fn printable(&self) -> String {
        let mut output = String::new();

        for (i, chunk) in self.data.chunks(16).enumerate() {
            output.push_str(&format!("{:08x}  ", i * 16));

            for byte in chunk {
                output.push_str(&format!("{:02x} ", byte));
            }
            for _ in chunk.len()..16 {
                output.push_str("   ");
            }

            output.push_str(" |");
            for byte in chunk {
                if (0x20..=0x7e).contains(byte) {
                    output.push(*byte as char);
                } else {
                    output.push('.');
                }
            }
            output.push_str("|\n");
        }

        output
    }
}

impl From<Vec<u8>> for Registration {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}

impl From<&[u8]> for Registration {
    fn from(data: &[u8]) -> Self {
        Self::from_bytes(data.to_vec())
    }
}

impl AsRef<[u8]> for Registration {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Registration({} bytes)", self.data.len())
    }
}

/// Fixed-size mutable window over one field's value bytes
///
/// The window's length is the field's declared length and can never
/// change: growing or shrinking a field would shift the tag/length
/// framing of every entry that follows it in the payload.
pub struct Field<'a> {
    bytes: &'a mut [u8],
}

impl Field<'_> {
    /// Declared length of the field
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Copy of the current value bytes
    pub fn read(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Overwrite the field from offset 0, leaving any trailing bytes as-is
    pub fn write(&mut self, value: &[u8]) -> Result<()> {
        self.write_at(0, value)
    }

    /// Overwrite exactly the addressed byte range within the field
    pub fn write_at(&mut self, offset: usize, value: &[u8]) -> Result<()> {
        let end = offset + value.len();
        if end > self.bytes.len() {
            return Err(TlvError::FieldTooLarge {
                attempted: end,
                available: self.bytes.len(),
            }
            .into());
        }
        self.bytes[offset..end].copy_from_slice(value);
        Ok(())
    }

    /// Inserting bytes into a field is never possible; the declared
    /// length is fixed when the registration is created
    pub fn insert(&mut self, _index: usize, _byte: u8) -> Result<()> {
        Err(RegistrationError::UnsupportedOperation(
            "cannot insert bytes into a fixed-length field",
        ))
    }

    /// Removing bytes from a field is never possible; see insert
    pub fn remove(&mut self, _index: usize) -> Result<()> {
        Err(RegistrationError::UnsupportedOperation(
            "cannot remove bytes from a fixed-length field",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Patch covers five parts (bank, program pairs), then volume, pan,
    // and the stream sentinel
    fn sample_reg() -> Registration {
        let mut data = vec![ATOM_PATCH, 0x0A];
        data.extend_from_slice(&[0x00, 0x01, 0x10, 0x05, 0x00, 0x30, 0x00, 0x31, 0x08, 0x02]);
        data.extend_from_slice(&[ATOM_VOLUME, 0x03, 100, 100, 100]);
        data.extend_from_slice(&[ATOM_PAN, 0x03, 64, 64, 64]);
        data.push(0xFF);
        Registration::from_bytes(data)
    }

    #[test]
    fn test_get_known_fields() {
        let reg = sample_reg();
        assert_eq!(
            reg.get(ATOM_VOLUME).unwrap(),
            Some(vec![100, 100, 100])
        );
        assert_eq!(reg.get(ATOM_PAN).unwrap(), Some(vec![64, 64, 64]));
        assert_eq!(reg.get(0x42).unwrap(), None);
    }

    #[test]
    fn test_set_volumes_exact_bytes() {
        let mut reg = sample_reg();
        reg.set_volumes(124, 125, 126).unwrap();
        assert_eq!(
            reg.get(ATOM_VOLUME).unwrap(),
            Some(vec![0x7C, 0x7D, 0x7E])
        );
        assert_eq!(reg.volumes().unwrap(), (124, 125, 126));
        // Neighbouring fields untouched
        assert_eq!(reg.pans().unwrap(), (64, 64, 64));
    }

    #[test]
    fn test_set_pans() {
        let mut reg = sample_reg();
        reg.set_pans(61, 62, 63).unwrap();
        assert_eq!(reg.pans().unwrap(), (61, 62, 63));
    }

    #[test]
    fn test_set_too_large_fails() {
        let mut reg = sample_reg();
        let before = reg.to_vec();
        let err = reg.set(ATOM_VOLUME, &[1, 2, 3, 4]).unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::Tlv(TlvError::FieldTooLarge {
                attempted: 4,
                available: 3
            })
        ));
        assert_eq!(reg.to_vec(), before);
    }

    #[test]
    fn test_set_absent_tag_is_an_error() {
        let mut reg = sample_reg();
        let before = reg.to_vec();
        let err = reg.set(0x42, &[0]).unwrap_err();
        assert!(matches!(err, RegistrationError::FieldNotFound(0x42)));
        assert_eq!(reg.to_vec(), before);
    }

    #[test]
    fn test_partial_write_keeps_tail() {
        let mut reg = sample_reg();
        reg.set(ATOM_VOLUME, &[42]).unwrap();
        assert_eq!(reg.volumes().unwrap(), (42, 100, 100));
    }

    #[test]
    fn test_patch_bank_per_part() {
        let reg = sample_reg();
        assert_eq!(reg.patch_bank(PART_U1).unwrap(), (0x00, 0x01));
        assert_eq!(reg.patch_bank(PART_U2).unwrap(), (0x10, 0x05));
        assert_eq!(reg.patch_bank(PART_AUTO_HARMONY).unwrap(), (0x08, 0x02));
    }

    #[test]
    fn test_patch_bank_out_of_range() {
        let reg = sample_reg();
        let err = reg.patch_bank(5).unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::FieldTooShort {
                needed: 12,
                available: 10
            }
        ));
    }

    #[test]
    fn test_field_view_read_write() {
        let mut reg = sample_reg();
        let mut vol = reg.field(ATOM_VOLUME).unwrap();
        assert_eq!(vol.len(), 3);
        assert_eq!(vol.read(), vec![100, 100, 100]);

        vol.write_at(1, &[115]).unwrap();
        assert_eq!(reg.volumes().unwrap(), (100, 115, 100));
    }

    #[test]
    fn test_field_view_bounds() {
        let mut reg = sample_reg();
        let mut vol = reg.field(ATOM_VOLUME).unwrap();
        let err = vol.write_at(2, &[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::Tlv(TlvError::FieldTooLarge {
                attempted: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn test_field_view_is_fixed_size() {
        let mut reg = sample_reg();
        let before = reg.to_vec();
        {
            let mut vol = reg.field(ATOM_VOLUME).unwrap();
            assert!(matches!(
                vol.insert(1, 0),
                Err(RegistrationError::UnsupportedOperation(_))
            ));
            assert!(matches!(
                vol.remove(1),
                Err(RegistrationError::UnsupportedOperation(_))
            ));
            assert_eq!(vol.len(), 3);
        }
        // Rejected resizes leave the payload byte-identical
        assert_eq!(reg.to_vec(), before);
    }

    #[test]
    fn test_field_view_absent_tag() {
        let mut reg = sample_reg();
        assert!(matches!(
            reg.field(0x42),
            Err(RegistrationError::FieldNotFound(0x42))
        ));
    }

    #[test]
    fn test_volumes_on_short_field() {
        let reg = Registration::from_bytes(vec![ATOM_VOLUME, 0x02, 10, 20, 0xFF]);
        assert!(matches!(
            reg.volumes(),
            Err(RegistrationError::FieldTooShort {
                needed: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn test_empty_registration() {
        let reg = Registration::new();
        assert!(reg.is_empty());
        assert_eq!(reg.get(ATOM_VOLUME).unwrap(), None);
    }

    #[test]
    fn test_printable() {
        let reg = sample_reg();
        let dump = reg.printable();
        assert!(dump.contains("00000000"));
        assert!(dump.contains("64 64 64"));
        assert!(dump.contains("|"));
    }
}
