//! Atomic file writes.
//!
//! The entries document is replaced as a whole: content goes to a temp file
//! in the target directory which is then renamed over the target, so readers
//! see either the old document or the new one.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write content to a file atomically using a temporary file.
///
/// The temp file is created next to the target (rename must not cross
/// filesystems) and is removed automatically if any step fails.
///
/// # Errors
///
/// Returns an `io::Error` if the path has no parent directory, or if creating,
/// writing or persisting the temp file fails.
pub async fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if dir.as_os_str().is_empty() => PathBuf::from("."),
        Some(dir) => dir.to_path_buf(),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        }
    };
    let target_path = path.to_path_buf();
    let content_owned = content.to_string();

    tokio::task::spawn_blocking(move || -> io::Result<()> {
        use std::io::Write;

        let mut temp_file = NamedTempFile::new_in(&parent)?;
        temp_file.write_all(content_owned.as_bytes())?;
        temp_file.flush()?;
        temp_file.as_file().sync_all()?;

        // Consumes the NamedTempFile, so it is not deleted on drop
        temp_file.persist(&target_path).map_err(|e| e.error)?;

        Ok(())
    })
    .await
    .map_err(io::Error::other)?
}
