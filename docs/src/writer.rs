//! Filesystem side of the pipeline: output directory reset, schema copies,
//! and HTML page writes.

use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;

/// Removes `dir` recursively if it exists, then recreates it empty.
///
/// Nothing is created when the removal fails.
///
/// # Errors
///
/// Returns an error if the existing tree cannot be removed or the directory
/// cannot be created.
pub fn reset_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)
}

/// Creates `dir` if it does not exist yet. Existing directories are fine.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e),
    }
}

/// Copies `src` to `dest`, keeping permissions and access/modification times.
///
/// # Errors
///
/// Returns an error if the copy fails or the timestamps cannot be applied.
pub fn copy_preserving(src: &Path, dest: &Path) -> io::Result<()> {
    // Times are read before the copy touches the source's atime.
    let meta = fs::metadata(src)?;
    // fs::copy carries permission bits over.
    fs::copy(src, dest)?;
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dest, atime, mtime)
}

/// Writes an HTML page to the given path, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_html(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
