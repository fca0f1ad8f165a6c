//! Atomic filesystem operations for silvera.
//!
//! All atomic writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! The temporary file is named `.{filename}.tmp`, so a leftover from a crash is a
//! dotfile and is ignored by the next build's traversal.
//!
//! These helpers return plain `io::Result`s: the build decides whether a failure
//! is a setup error or a per-document error.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating missing parent directories.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> io::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let temp_path = generate_temp_path(path)?;

    if let Err(e) = write_and_sync(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

/// Copy a file's bytes verbatim to `destination` through [`atomic_write`].
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> io::Result<()> {
    let bytes = fs::read(source)?;
    atomic_write(destination, &bytes)
}

/// Create a directory (and parents) if it does not exist yet.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> io::Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid file path '{}'", target.display()),
        )
    })?;

    let mut temp_name = OsString::from(".");
    temp_name.push(filename);
    temp_name.push(".tmp");
    Ok(parent.join(temp_name))
}

fn write_and_sync(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}
