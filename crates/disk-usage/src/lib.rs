//! Disk usage accounting for game installations.
//!
//! Measures a single file, a directory tree, or a CUE sheet together with
//! the BIN/WAV tracks it references. Results are [`SizeOutcome`] values
//! rather than errors: a game that cannot be measured is a normal scan
//! result, not a failure of the caller.

pub mod cue;
pub mod format;
pub mod measure;
pub mod outcome;

pub use cue::measure_cue_sheet;
pub use format::{format_bytes, size_tier};
pub use measure::{measure_directory, measure_file, measure_path};
pub use outcome::{ERROR_SIZE_CODE, NO_PATH_SIZE_CODE, SKIPPED_SIZE_CODE, SizeOutcome};
