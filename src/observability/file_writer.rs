//! Rotating log file writer with size-based rotation and backup retention.
//!
//! Script filters run as short-lived processes, many times a minute while the user
//! types. Appending to one log forever would grow without bound, so the writer
//! rotates the file once it passes a size threshold and keeps only the newest
//! few backups.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (1 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 1024 * 1024;

/// Number of backup files to retain after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// `&FileWriter` implements [`io::Write`], so an `Arc<FileWriter>` can be handed to
/// `tracing_subscriber::fmt::layer().with_writer(..)` directly.
///
/// # Rotation Strategy
///
/// 1. Check file size before each write
/// 2. If size > threshold, rotate:
///    - Rename current file to `<name>.<timestamp>`
///    - Reopen a new empty file on the next write
///    - Remove oldest backups beyond [`MAX_BACKUP_FILES`]
pub struct FileWriter {
    /// Path to the primary log file.
    file_path: PathBuf,
    max_bytes: u64,
    /// Lazily-initialized file handle (opens on first write).
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer for `file_path`. The file is not opened until the first write.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_max_bytes(file_path, MAX_FILE_SIZE_BYTES)
    }

    pub const fn with_max_bytes(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            writer: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn write_bytes(&self, buf: &[u8]) -> io::Result<usize> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            if let Some(parent) = self.file_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::other("No file available"))?;

        file.write_all(buf)?;
        file.flush()?;
        drop(writer);

        Ok(buf.len())
    }

    /// Closes the handle and rotates if the file has grown past the threshold.
    fn check_and_rotate(&self, writer: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_bytes {
                *writer = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    /// Renames the current file to a timestamped backup and prunes old backups.
    fn rotate_files(&self) -> io::Result<()> {
        let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S%3f");
        let backup_path = backup_path(&self.file_path, &timestamp.to_string());

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups()
    }

    /// Deletes all but the newest [`MAX_BACKUP_FILES`] backups.
    ///
    /// Individual deletion errors are ignored so one stuck file does not stop the rest.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::other("No parent directory"))?;

        let prefix = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::other("Invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamps sort lexicographically; newest first.
        backups.sort_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

fn backup_path(file_path: &Path, timestamp: &str) -> PathBuf {
    let mut name = file_path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(timestamp);
    file_path.with_file_name(name)
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
