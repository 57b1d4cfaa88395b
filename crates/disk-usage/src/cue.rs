//! CUE sheet measurement.
//!
//! A CUE sheet lists its track files on `FILE "<name>" <type>` lines. The
//! size of a disc image is the CUE itself plus every referenced file that
//! exists, each counted once.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::outcome::SizeOutcome;

/// Returns the size of a CUE sheet and the track files it references.
///
/// Missing tracks are skipped. Fails with [`SizeOutcome::ComputeError`]
/// only when the sheet itself cannot be read.
pub fn measure_cue_sheet(cue: &Path) -> SizeOutcome {
    let cue_len = match std::fs::metadata(cue) {
        Ok(meta) if meta.is_file() => meta.len(),
        _ => return SizeOutcome::NoPath,
    };
    let text = match std::fs::read(cue) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            debug!(cue = %cue.display(), error = %e, "failed to read CUE sheet");
            return SizeOutcome::ComputeError;
        }
    };
    let dir = cue.parent().unwrap_or(Path::new(""));

    let mut seen = HashSet::new();
    seen.insert(dedup_key(cue));
    let mut total = cue_len;

    for name in referenced_files(&text) {
        let track = dir.join(native_separators(name));
        if !seen.insert(dedup_key(&track)) {
            continue;
        }
        match std::fs::metadata(&track) {
            Ok(meta) if meta.is_file() => total = total.saturating_add(meta.len()),
            _ => debug!(cue = %cue.display(), track = %track.display(), "referenced file missing"),
        }
    }

    SizeOutcome::Bytes(total)
}

/// Extracts the quoted file names from `FILE` lines.
pub fn referenced_files(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            line.get(..4)
                .is_some_and(|head| head.eq_ignore_ascii_case("FILE"))
        })
        .filter_map(|line| {
            let start = line.find('"')? + 1;
            let len = line[start..].find('"')?;
            Some(&line[start..start + len])
        })
        .collect()
}

#[cfg(windows)]
fn native_separators(name: &str) -> PathBuf {
    PathBuf::from(name)
}

#[cfg(not(windows))]
fn native_separators(name: &str) -> PathBuf {
    PathBuf::from(name.replace('\\', "/"))
}

/// Case-insensitive identity of a path, without touching the filesystem.
fn dedup_key(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized.to_string_lossy().to_lowercase()
}
