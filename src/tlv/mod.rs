// Tag/length/value codec for registration payloads
//
// A registration payload is a flat sequence of entries, each framed as a
// 1-byte tag, a 1-byte length, then that many value bytes. The sequence
// runs to the end of the buffer unless a 0xFF tag ends it early.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TlvError {
    #[error("TLV entry at offset {offset} runs past the end of the buffer")]
    MalformedRecord { offset: usize },

    #[error("Trying to write {attempted} bytes when only space for {available}")]
    FieldTooLarge { attempted: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, TlvError>;

/// Tag value that marks the logical end of a TLV stream
pub const SENTINEL: u8 = 0xFF;

/// Walk the buffer and locate the value region for @tag
/// Returns (value offset, declared length) if the tag is present
fn find(buf: &[u8], tag: u8) -> Result<Option<(usize, usize)>> {
    let mut i = 0;
    while i < buf.len() {
        if buf[i] == SENTINEL {
            return Ok(None);
        }
        if i + 2 > buf.len() {
            return Err(TlvError::MalformedRecord { offset: i });
        }
        let entry_tag = buf[i];
        let len = buf[i + 1] as usize;
        if i + 2 + len > buf.len() {
            return Err(TlvError::MalformedRecord { offset: i });
        }
        if entry_tag == tag {
            return Ok(Some((i + 2, len)));
        }
        i += 2 + len;
    }
    Ok(None)
}

/// Find @tag and return a copy of its value bytes
/// Returns None if the tag is absent (sentinel reached or buffer exhausted)
pub fn lookup(buf: &[u8], tag: u8) -> Result<Option<Vec<u8>>> {
    Ok(find(buf, tag)?.map(|(start, len)| buf[start..start + len].to_vec()))
}

/// Find @tag and overwrite the start of its value region with @value
///
/// The write must fit within the entry's declared length; any declared
/// bytes beyond the written range are left untouched. Returns Ok(false)
/// when the tag is absent, leaving the buffer unchanged. Callers decide
/// whether an absent tag is an error.
pub fn update(buf: &mut [u8], tag: u8, value: &[u8]) -> Result<bool> {
    match find(buf, tag)? {
        Some((start, len)) => {
            if value.len() > len {
                return Err(TlvError::FieldTooLarge {
                    attempted: value.len(),
                    available: len,
                });
            }
            buf[start..start + value.len()].copy_from_slice(value);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Locate @tag and return the index range of its value bytes
/// Used by the field-view layer; same scan rules as lookup
pub fn value_range(buf: &[u8], tag: u8) -> Result<Option<std::ops::Range<usize>>> {
    Ok(find(buf, tag)?.map(|(start, len)| start..start + len))
}
