//! File and directory measurement.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::cue::measure_cue_sheet;
use crate::outcome::SizeOutcome;

/// Returns the size of a single file.
pub fn measure_file(path: &Path) -> SizeOutcome {
    if path.as_os_str().is_empty() {
        return SizeOutcome::NoPath;
    }
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => SizeOutcome::Bytes(meta.len()),
        Ok(_) => SizeOutcome::NoPath,
        Err(e) if e.kind() == ErrorKind::NotFound => SizeOutcome::NoPath,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "failed to stat file");
            SizeOutcome::ComputeError
        }
    }
}

/// Returns the total size of all files below `path`.
///
/// Entries that vanish or cannot be read while walking count as zero.
/// Symbolic links are not followed.
pub fn measure_directory(path: &Path) -> SizeOutcome {
    if path.as_os_str().is_empty() || !path.is_dir() {
        return SizeOutcome::NoPath;
    }

    if let Err(e) = std::fs::read_dir(path) {
        return match e.kind() {
            ErrorKind::NotFound => SizeOutcome::NoPath,
            ErrorKind::PermissionDenied => {
                warn!(path = %path.display(), "access denied enumerating directory");
                SizeOutcome::AccessDenied
            }
            _ => {
                warn!(path = %path.display(), error = %e, "failed to enumerate directory");
                SizeOutcome::ComputeError
            }
        };
    }

    let mut total: u64 = 0;
    let mut skipped = 0usize;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.metadata() {
            Ok(meta) => total = total.saturating_add(meta.len()),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(path = %path.display(), skipped, "skipped unreadable entries");
    }
    SizeOutcome::Bytes(total)
}

/// Measures whatever `path` is: a CUE sheet with its tracks, a plain file,
/// or a directory tree.
pub fn measure_path(path: &Path) -> SizeOutcome {
    if path.is_file() {
        let is_cue = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("cue"));
        if is_cue {
            return measure_cue_sheet(path);
        }
        return measure_file(path);
    }
    measure_directory(path)
}
