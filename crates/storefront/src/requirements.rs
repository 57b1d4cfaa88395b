//! Parsing of free-text system requirements.
//!
//! Storefront requirement blocks are prose written by publishers, e.g.
//! `"Memory: 8 GB RAM\nStorage: 70 GB available space"`. The parser tries
//! increasingly loose patterns and returns the first storage size it finds.

use std::sync::LazyLock;

use regex::{Captures, Regex};

const KIB: f64 = 1024.0;

/// `<n> GB available space`
static AVAILABLE_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+[.,]?\d*)\s*(GB|MB)\s+available space").expect("valid regex")
});

/// `Storage: <n> GB` and similar labels.
static STORAGE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Storage|Disk Space|Hard Drive|HDD|SSD):\s*(\d+[.,]?\d*)\s*(GB|MB)")
        .expect("valid regex")
});

/// Any `<n> GB` / `<n> MB`.
static STANDALONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+[.,]?\d*)\s*(GB|MB)\b").expect("valid regex"));

/// Text right before a standalone size that marks it as memory.
static MEMORY_LABEL_BEFORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:Memory|RAM|VRAM)\s*:\s*$").expect("valid regex"));

/// Text right after a standalone size that marks it as memory.
static RAM_AFTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*RAM").expect("valid regex"));

/// Words that mark a nearby size as storage.
const STORAGE_HINTS: &[&str] = &["storage", "disk", "hard drive", "hdd", "ssd"];

/// Characters before a standalone size searched for a storage hint.
const HINT_WINDOW_CHARS: usize = 40;

/// Extracts the required storage in bytes from a requirement text.
///
/// Patterns, first success wins:
/// 1. `<n> GB|MB available space`
/// 2. `Storage|Disk Space|Hard Drive|HDD|SSD: <n> GB|MB`
/// 3. any `<n> GB|MB` that is not labelled as memory; the last one with a
///    storage word in the preceding 40 characters, else the first one.
///
/// `.` and `,` are both accepted as decimal separators.
pub fn parse_storage_requirement(text: &str) -> Option<u64> {
    if text.trim().is_empty() {
        return None;
    }

    if let Some(bytes) = AVAILABLE_SPACE.captures(text).and_then(|c| size_from(&c)) {
        return Some(bytes);
    }
    if let Some(bytes) = STORAGE_LABEL.captures(text).and_then(|c| size_from(&c)) {
        return Some(bytes);
    }

    let candidates: Vec<Captures<'_>> = STANDALONE
        .captures_iter(text)
        .filter(|c| {
            let Some(whole) = c.get(0) else {
                return false;
            };
            !MEMORY_LABEL_BEFORE.is_match(&text[..whole.start()])
                && !RAM_AFTER.is_match(&text[whole.end()..])
        })
        .collect();

    let hinted = candidates.iter().rev().find_map(|c| {
        let start = c.get(0)?.start();
        has_storage_hint(&text[..start]).then(|| size_from(c)).flatten()
    });
    hinted.or_else(|| candidates.first().and_then(size_from))
}

fn has_storage_hint(before: &str) -> bool {
    let window_start = before
        .char_indices()
        .rev()
        .nth(HINT_WINDOW_CHARS - 1)
        .map_or(0, |(i, _)| i);
    let window = before[window_start..].to_lowercase();
    STORAGE_HINTS.iter().any(|hint| window.contains(hint))
}

/// Converts the number and unit capture groups to bytes.
fn size_from(caps: &Captures<'_>) -> Option<u64> {
    let value: f64 = caps.get(1)?.as_str().replace(',', ".").parse().ok()?;
    let unit = caps.get(2)?.as_str();
    let factor = if unit.eq_ignore_ascii_case("GB") {
        KIB * KIB * KIB
    } else {
        KIB * KIB
    };
    Some((value * factor) as u64)
}

/// Cleans a title for use as a search term.
///
/// Keeps letters, digits, whitespace, `-`, `:` and `'`, then trims and
/// collapses runs of whitespace.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | ':' | '\''))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
