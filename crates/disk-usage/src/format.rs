//! Human-readable sizes and size tiers.

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Tier lower bounds (inclusive), largest first. Anything below the last
/// bound falls into [`SMALLEST_TIER`].
const TIERS: [(u64, &str); 30] = [
    (200 * GB, "01) > 200 GB"),
    (150 * GB, "02) 150 GB - 200 GB"),
    (140 * GB, "03) 140 GB - 150 GB"),
    (130 * GB, "04) 130 GB - 140 GB"),
    (120 * GB, "05) 120 GB - 130 GB"),
    (100 * GB, "06) 100 GB - 120 GB"),
    (90 * GB, "07) 90 GB - 100 GB"),
    (80 * GB, "08) 80 GB - 90 GB"),
    (70 * GB, "09) 70 GB - 80 GB"),
    (60 * GB, "10) 60 GB - 70 GB"),
    (50 * GB, "11) 50 GB - 60 GB"),
    (40 * GB, "12) 40 GB - 50 GB"),
    (30 * GB, "13) 30 GB - 40 GB"),
    (25 * GB, "14) 25 GB - 30 GB"),
    (20 * GB, "15) 20 GB - 25 GB"),
    (15 * GB, "16) 15 GB - 20 GB"),
    (10 * GB, "17) 10 GB - 15 GB"),
    (5 * GB, "18) 5 GB - 10 GB"),
    (2 * GB, "19) 2 GB - 5 GB"),
    (GB, "20) 1 GB - 2 GB"),
    (750 * MB, "21) 750 MB - 1 GB"),
    (500 * MB, "22) 500 MB - 750 MB"),
    (300 * MB, "23) 300 MB - 500 MB"),
    (100 * MB, "24) 100 MB - 300 MB"),
    (50 * MB, "25) 50 MB - 100 MB"),
    (10 * MB, "26) 10 MB - 50 MB"),
    (MB, "27) 1 MB - 10 MB"),
    (100 * KB, "28) 100 KB - 1 MB"),
    (50 * KB, "29) 50 KB - 100 KB"),
    (5 * KB, "30) 5 KB - 50 KB"),
];

const SMALLEST_TIER: &str = "31) < 5 KB";

/// Formats a byte count with a binary unit and one decimal, e.g. `1.5 GB`.
///
/// A trailing `.0` is dropped (`2 MB`) and zero is `0 B`. Halves round to
/// even.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut place = 0;
    while place + 1 < UNITS.len() && bytes >= 1u64 << (10 * (place + 1)) {
        place += 1;
    }
    let scaled = bytes as f64 / (1u64 << (10 * place)) as f64;
    let rounded = (scaled * 10.0).round_ties_even() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0} {}", UNITS[place])
    } else {
        format!("{rounded:.1} {}", UNITS[place])
    }
}

/// Returns the tier label for a byte count.
pub fn size_tier(bytes: u64) -> &'static str {
    TIERS
        .iter()
        .find(|(lower, _)| bytes >= *lower)
        .map_or(SMALLEST_TIER, |(_, label)| label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_small_values() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1), "1 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1 KB");
    }

    #[test]
    fn format_one_decimal() {
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2 * MB), "2 MB");
        assert_eq!(format_bytes(GB + GB / 2), "1.5 GB");
        assert_eq!(format_bytes(12 * GB + 400 * MB), "12.4 GB");
    }

    #[test]
    fn format_large_units() {
        assert_eq!(format_bytes(3 * 1024 * GB), "3 TB");
        assert_eq!(format_bytes(u64::MAX), "16 EB");
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(size_tier(5 * GB), "18) 5 GB - 10 GB");
        assert_eq!(size_tier(5 * GB - 1), "19) 2 GB - 5 GB");
        assert_eq!(size_tier(200 * GB), "01) > 200 GB");
        assert_eq!(size_tier(200 * GB - 1), "02) 150 GB - 200 GB");
        assert_eq!(size_tier(u64::MAX), "01) > 200 GB");
        assert_eq!(size_tier(5 * KB), "30) 5 KB - 50 KB");
        assert_eq!(size_tier(5 * KB - 1), "31) < 5 KB");
        assert_eq!(size_tier(0), "31) < 5 KB");
    }

    #[test]
    fn tiers_are_a_strict_partition() {
        for pair in TIERS.windows(2) {
            assert!(pair[0].0 > pair[1].0, "{} not above {}", pair[0].1, pair[1].1);
        }
        for (i, (lower, label)) in TIERS.iter().enumerate() {
            assert_eq!(size_tier(*lower), *label);
            assert!(label.starts_with(&format!("{:02})", i + 1)));
        }
    }
}
