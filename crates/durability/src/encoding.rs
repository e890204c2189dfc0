//! On-disk byte format for the WAL file.
//!
//! ```text
//! file    := header frame*
//! header  := magic[4] = "ALOG" | version: u32 LE
//! frame   := len: u32 LE | crc32(payload): u32 LE | payload[len]
//! payload := bincode(WalEntry)
//! ```
//!
//! A frame cut short by a crash is indistinguishable from a frame still
//! being written, so a short read at the tail is reported as "incomplete"
//! rather than as corruption.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::wal::{WalEntry, WalError};

/// Magic bytes at the start of every WAL file
pub const SEGMENT_MAGIC: [u8; 4] = *b"ALOG";
/// Current file format version
pub const SEGMENT_FORMAT_VERSION: u32 = 1;
/// Header size in bytes
pub const SEGMENT_HEADER_SIZE: usize = 8;
/// Frame header size in bytes (length + checksum)
pub const FRAME_HEADER_SIZE: usize = 8;
/// Upper bound on a single payload; larger lengths are treated as corruption
pub const MAX_ENTRY_SIZE: usize = 16 * 1024 * 1024;

/// Encode the file header
pub fn encode_header() -> Vec<u8> {
    let mut buf = Vec::with_capacity(SEGMENT_HEADER_SIZE);
    buf.extend_from_slice(&SEGMENT_MAGIC);
    // Writing into a Vec cannot fail.
    let _ = buf.write_u32::<LittleEndian>(SEGMENT_FORMAT_VERSION);
    buf
}

/// Validate the file header
pub fn decode_header(buf: &[u8]) -> Result<(), WalError> {
    if buf.len() < SEGMENT_HEADER_SIZE {
        return Err(WalError::BadHeader(format!(
            "need {} bytes, have {}",
            SEGMENT_HEADER_SIZE,
            buf.len()
        )));
    }
    if buf[..4] != SEGMENT_MAGIC {
        return Err(WalError::BadHeader("wrong magic".to_string()));
    }
    let version = LittleEndian::read_u32(&buf[4..8]);
    if version != SEGMENT_FORMAT_VERSION {
        return Err(WalError::BadHeader(format!(
            "unsupported format version {}",
            version
        )));
    }
    Ok(())
}

/// Encode one entry as a checksummed frame
pub fn encode_entry(entry: &WalEntry) -> Result<Vec<u8>, WalError> {
    let payload = bincode::serialize(entry).map_err(|e| WalError::Serialization(e.to_string()))?;
    if payload.len() > MAX_ENTRY_SIZE {
        return Err(WalError::Serialization(format!(
            "entry of {} bytes exceeds maximum {}",
            payload.len(),
            MAX_ENTRY_SIZE
        )));
    }

    let mut frame = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
    let _ = frame.write_u32::<LittleEndian>(payload.len() as u32);
    let _ = frame.write_u32::<LittleEndian>(crc32fast::hash(&payload));
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Decode one frame from the start of `buf`
///
/// `offset` is the position of `buf[0]` in the file, used in error messages.
///
/// # Returns
///
/// - `Ok(Some((entry, consumed)))` for a complete, valid frame
/// - `Ok(None)` if `buf` ends before the frame does
/// - `Err(Corruption)` if the length is implausible, the checksum does not
///   match, or the payload does not decode
pub fn decode_entry(buf: &[u8], offset: u64) -> Result<Option<(WalEntry, usize)>, WalError> {
    if buf.len() < FRAME_HEADER_SIZE {
        return Ok(None);
    }

    let len = LittleEndian::read_u32(&buf[0..4]) as usize;
    let expected_crc = LittleEndian::read_u32(&buf[4..8]);

    if len > MAX_ENTRY_SIZE {
        return Err(WalError::Corruption {
            offset,
            reason: format!("frame length {} exceeds maximum {}", len, MAX_ENTRY_SIZE),
        });
    }

    let end = FRAME_HEADER_SIZE + len;
    if buf.len() < end {
        return Ok(None);
    }

    let payload = &buf[FRAME_HEADER_SIZE..end];
    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(WalError::Corruption {
            offset,
            reason: format!(
                "checksum mismatch: expected {:08x}, got {:08x}",
                expected_crc, actual_crc
            ),
        });
    }

    let entry: WalEntry = bincode::deserialize(payload).map_err(|e| WalError::Corruption {
        offset,
        reason: format!("undecodable payload: {}", e),
    })?;

    Ok(Some((entry, end)))
}
