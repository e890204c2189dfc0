//! WAL replay on open
//!
//! Rebuilds the in-memory key space from the log file.
//!
//! ## Key Principle
//!
//! After recovery the key space corresponds to a **prefix of the write
//! history**. A frame that was torn by a crash is dropped; nothing after a
//! corrupt frame is trusted.
//!
//! ## Recovery Sequence
//!
//! 1. Validate the file header
//! 2. Decode frames in order, applying each put
//! 3. Stop at the first incomplete or corrupt frame
//! 4. Report how many bytes past that point must be truncated

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::encoding::{decode_entry, decode_header, SEGMENT_HEADER_SIZE};
use crate::wal::WalError;

// ============================================================================
// Recovery Options
// ============================================================================

/// Recovery options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryOptions {
    /// Truncate a corrupt (checksum-failing) tail instead of refusing to open.
    ///
    /// A torn final frame is always truncated; it was never acknowledged.
    pub truncate_corrupt_tail: bool,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self::permissive()
    }
}

impl RecoveryOptions {
    /// Strict recovery options - fail on any checksum corruption
    pub fn strict() -> Self {
        RecoveryOptions {
            truncate_corrupt_tail: false,
        }
    }

    /// Permissive recovery options - drop everything from the first bad frame
    pub fn permissive() -> Self {
        RecoveryOptions {
            truncate_corrupt_tail: true,
        }
    }
}

// ============================================================================
// Recovery Result
// ============================================================================

/// Recovery result
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Frames applied
    pub entries_replayed: u64,
    /// Distinct keys in the rebuilt key space
    pub keys_recovered: usize,
    /// Length of the valid prefix of the file, header included
    pub valid_len: u64,
    /// Bytes past the valid prefix that were dropped
    pub bytes_truncated: u64,
    /// Whether the dropped tail failed a checksum (vs. simply being short)
    pub corrupt_tail: bool,
}

impl RecoveryResult {
    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "replayed {} entries, {} keys, truncated {} bytes{}",
            self.entries_replayed,
            self.keys_recovered,
            self.bytes_truncated,
            if self.corrupt_tail { " (corrupt tail)" } else { "" }
        )
    }
}

/// Replay a full WAL file image
///
/// Returns the recovered key space and the replay statistics. The caller is
/// responsible for truncating the file to `valid_len`.
pub fn replay(
    buf: &[u8],
    options: RecoveryOptions,
) -> Result<(HashMap<String, Vec<u8>>, RecoveryResult), WalError> {
    decode_header(buf)?;

    let mut data = HashMap::new();
    let mut result = RecoveryResult::default();
    let mut offset = SEGMENT_HEADER_SIZE;

    while offset < buf.len() {
        match decode_entry(&buf[offset..], offset as u64) {
            Ok(Some((entry, consumed))) => {
                let (key, value) = entry.into_write();
                debug!(key = %key, offset, "replaying WAL entry");
                data.insert(key, value);
                result.entries_replayed += 1;
                offset += consumed;
            }
            Ok(None) => {
                warn!(
                    offset,
                    dropped = buf.len() - offset,
                    "WAL ends in a torn frame, truncating"
                );
                break;
            }
            Err(WalError::Corruption { offset: at, reason }) => {
                if !options.truncate_corrupt_tail {
                    return Err(WalError::Corruption { offset: at, reason });
                }
                warn!(
                    offset = at,
                    dropped = buf.len() - offset,
                    reason = %reason,
                    "corrupt WAL entry, truncating the rest of the log"
                );
                result.corrupt_tail = true;
                break;
            }
            Err(other) => return Err(other),
        }
    }

    result.keys_recovered = data.len();
    result.valid_len = offset as u64;
    result.bytes_truncated = (buf.len() - offset) as u64;
    info!(summary = %result.summary(), "WAL recovery complete");

    Ok((data, result))
}
