//! Durable, file-backed key-value backend
//!
//! Every `put` is appended to a write-ahead log before it becomes visible;
//! reads are served from an in-memory copy rebuilt from the log on open.
//!
//! ## Write Sequence
//!
//! ```text
//! 1. Encode the entry (outside the lock)
//! 2. Acquire the writer lock
//! 3. Append the frame to the log
//! 4. fsync according to the DurabilityMode
//! 5. Apply the write to memory
//! 6. Release the lock
//! ```
//!
//! Steps 3-5 run under one lock, so the log order and the order in which
//! writes become visible are the same.
//!
//! ## Failed Appends
//!
//! If step 3 or 4 fails the log is cut back to where the frame started and
//! step 5 is skipped, so a write that returned an error is never visible and
//! never replayed. A failed fsync also disables the writer: the kernel may
//! have dropped earlier dirty pages, so no later write can be acknowledged.
//! The writer is disabled as well when the cut itself fails, or when an
//! explicit flush fails.
//!
//! ## Read-Only Open
//!
//! [`WalBackend::open_read_only`] never creates, writes or truncates the
//! file. A damaged tail is skipped in memory and left on disk for the next
//! read-write open to deal with.

use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use accesslog_core::{BackendError, KeyValueBackend};
use accesslog_storage::MemoryBackend;

use crate::encoding::{encode_entry, encode_header};
use crate::mode::DurabilityMode;
use crate::recovery::{replay, RecoveryOptions, RecoveryResult};
use crate::wal::{WalEntry, WalError};

/// WAL file name inside the data directory
pub const WAL_FILENAME: &str = "wal.dat";

/// Where the writer appends frames
trait LogFile: Write + Send {
    fn sync_data(&self) -> io::Result<()>;

    /// Cut the file back to `len` bytes and continue appending there
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
}

impl LogFile for File {
    fn sync_data(&self) -> io::Result<()> {
        File::sync_data(self)
    }

    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)?;
        self.seek(SeekFrom::Start(len))?;
        Ok(())
    }
}

struct WalWriter {
    file: Box<dyn LogFile>,
    /// End of the last complete frame
    len: u64,
    /// Writes appended since the last fsync
    pending: usize,
    last_sync: Instant,
    /// Set once the log can no longer be trusted to take appends
    poisoned: Option<String>,
}

impl WalWriter {
    fn new(file: Box<dyn LogFile>, len: u64) -> Self {
        Self {
            file,
            len,
            pending: 0,
            last_sync: Instant::now(),
            poisoned: None,
        }
    }

    fn check_usable(&self) -> Result<(), WalError> {
        match &self.poisoned {
            Some(reason) => Err(WalError::Poisoned(reason.clone())),
            None => Ok(()),
        }
    }

    fn sync(&mut self) -> Result<(), WalError> {
        self.check_usable()?;
        if let Err(e) = self.file.sync_data() {
            self.poison(format!("fsync failed: {}", e));
            return Err(e.into());
        }
        self.pending = 0;
        self.last_sync = Instant::now();
        Ok(())
    }

    fn sync_due(&self, mode: DurabilityMode) -> bool {
        if mode.requires_immediate_fsync() {
            return true;
        }
        match mode {
            DurabilityMode::Batched {
                interval_ms,
                batch_size,
            } => {
                self.pending >= batch_size
                    || self.last_sync.elapsed() >= Duration::from_millis(interval_ms)
            }
            _ => false,
        }
    }

    /// Append one frame, syncing if `mode` says so
    ///
    /// On error the frame is not in the log.
    fn append(&mut self, frame: &[u8], mode: DurabilityMode) -> Result<(), WalError> {
        self.check_usable()?;
        let start = self.len;

        if let Err(e) = self.file.write_all(frame) {
            self.roll_back(start, &e);
            return Err(e.into());
        }
        self.len += frame.len() as u64;
        self.pending += 1;

        if self.sync_due(mode) {
            if let Err(e) = self.file.sync_data() {
                self.roll_back(start, &e);
                self.poison(format!("fsync failed: {}", e));
                return Err(e.into());
            }
            self.pending = 0;
            self.last_sync = Instant::now();
        }
        Ok(())
    }

    fn roll_back(&mut self, start: u64, cause: &io::Error) {
        match self.file.truncate_to(start) {
            Ok(()) => {
                warn!(offset = start, error = %cause, "WAL append failed, frame removed");
                self.len = start;
            }
            Err(e) => self.poison(format!(
                "could not remove partial frame at offset {} after {}: {}",
                start, cause, e
            )),
        }
    }

    fn poison(&mut self, reason: String) {
        error!(reason = %reason, "WAL writer disabled");
        self.poisoned = Some(reason);
    }
}

/// Durable key-value backend over an append-only log
///
/// # Example
///
/// ```ignore
/// use accesslog_durability::{DurabilityMode, WalBackend};
///
/// let backend = WalBackend::open("./ledger", DurabilityMode::Strict)?;
/// backend.put("user1_t1", bytes)?;
/// ```
pub struct WalBackend {
    path: PathBuf,
    mode: DurabilityMode,
    memory: MemoryBackend,
    /// `None` when opened read-only
    writer: Option<Mutex<WalWriter>>,
    recovery: RecoveryResult,
}

impl WalBackend {
    /// Open (or create) a log in `dir` with default recovery options
    pub fn open(dir: impl AsRef<Path>, mode: DurabilityMode) -> Result<Self, WalError> {
        Self::open_with(dir, mode, RecoveryOptions::default())
    }

    /// Open (or create) a log in `dir`
    ///
    /// An existing log is replayed; a torn or (with permissive options)
    /// corrupt tail is truncated before new writes are appended.
    pub fn open_with(
        dir: impl AsRef<Path>,
        mode: DurabilityMode,
        options: RecoveryOptions,
    ) -> Result<Self, WalError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(WAL_FILENAME);

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)?;

        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;

        let (memory, recovery) = if buf.is_empty() {
            file.write_all(&encode_header())?;
            file.sync_all()?;
            info!(path = %path.display(), "created new WAL");
            (MemoryBackend::new(), RecoveryResult::default())
        } else {
            let (data, recovery) = replay(&buf, options)?;
            if recovery.bytes_truncated > 0 {
                warn!(
                    path = %path.display(),
                    bytes = recovery.bytes_truncated,
                    "truncating WAL tail"
                );
                file.set_len(recovery.valid_len)?;
                file.sync_all()?;
            }
            info!(path = %path.display(), summary = %recovery.summary(), "opened WAL");
            (MemoryBackend::from_entries(data), recovery)
        };

        let len = file.seek(SeekFrom::End(0))?;

        Ok(Self {
            path,
            mode,
            memory,
            writer: Some(Mutex::new(WalWriter::new(Box::new(file), len))),
            recovery,
        })
    }

    /// Open an existing log in `dir` for reading only
    ///
    /// The file is replayed into memory and never modified: nothing is
    /// created, a damaged tail is skipped rather than truncated, and every
    /// `put` fails.
    ///
    /// # Errors
    ///
    /// `Io` (`NotFound`) if there is no log in `dir`, plus any replay error.
    pub fn open_read_only(
        dir: impl AsRef<Path>,
        options: RecoveryOptions,
    ) -> Result<Self, WalError> {
        let path = dir.as_ref().join(WAL_FILENAME);
        let buf = fs::read(&path)?;

        let (memory, recovery) = if buf.is_empty() {
            (MemoryBackend::new(), RecoveryResult::default())
        } else {
            let (data, recovery) = replay(&buf, options)?;
            if recovery.bytes_truncated > 0 {
                warn!(
                    path = %path.display(),
                    bytes = recovery.bytes_truncated,
                    "skipping damaged WAL tail, file left unchanged"
                );
            }
            (MemoryBackend::from_entries(data), recovery)
        };
        info!(path = %path.display(), summary = %recovery.summary(), "opened WAL read-only");

        Ok(Self {
            path,
            mode: DurabilityMode::None,
            memory,
            writer: None,
            recovery,
        })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durability mode this backend was opened with
    ///
    /// `None` for a read-only backend.
    pub fn durability_mode(&self) -> DurabilityMode {
        self.mode
    }

    /// Check if the backend was opened with [`open_read_only`](Self::open_read_only)
    pub fn is_read_only(&self) -> bool {
        self.writer.is_none()
    }

    /// Statistics from the replay performed at open
    pub fn recovery(&self) -> &RecoveryResult {
        &self.recovery
    }

    /// Number of keys stored
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Check if no keys are stored
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    fn append(&self, key: &str, value: Vec<u8>) -> Result<(), WalError> {
        let writer = self.writer.as_ref().ok_or(WalError::ReadOnly)?;

        let entry = WalEntry::Put {
            key: key.to_string(),
            value,
        };
        let frame = encode_entry(&entry)?;

        let mut writer = writer.lock();
        writer.append(&frame, self.mode)?;

        let (key, value) = entry.into_write();
        // MemoryBackend::put is infallible.
        let _ = self.memory.put(&key, value);
        Ok(())
    }
}

impl KeyValueBackend for WalBackend {
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), BackendError> {
        self.append(key, value).map_err(BackendError::from)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        self.memory.get(key)
    }

    fn contains(&self, key: &str) -> Result<bool, BackendError> {
        self.memory.contains(key)
    }

    fn flush(&self) -> Result<(), BackendError> {
        match &self.writer {
            Some(writer) => writer.lock().sync().map_err(BackendError::from),
            None => Ok(()),
        }
    }
}

impl Drop for WalBackend {
    fn drop(&mut self) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let writer = writer.get_mut();
        if writer.pending > 0 && writer.poisoned.is_none() {
            if let Err(e) = writer.sync() {
                warn!(path = %self.path.display(), error = %e, "WAL fsync on close failed");
            }
        }
    }
}

impl std::fmt::Debug for WalBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalBackend")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("read_only", &self.is_read_only())
            .field("len", &self.len())
            .finish()
    }
}
