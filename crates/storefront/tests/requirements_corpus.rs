//! Real-world requirement texts and the storage size each should yield.

use gamesize_storefront::parse_storage_requirement;

const GIB: u64 = 1024 * 1024 * 1024;
const MIB: u64 = 1024 * 1024;

const CORPUS: &[(&str, &str, Option<u64>)] = &[
    ("cyberpunk-2077", include_str!("fixtures/cyberpunk-2077.txt"), Some(70 * GIB)),
    ("witcher-3", include_str!("fixtures/witcher-3.txt"), Some(35 * GIB)),
    ("hard-drive-label", include_str!("fixtures/hard-drive-label.txt"), Some(2_684_354_560)),
    ("hard-disk-space", include_str!("fixtures/hard-disk-space.txt"), Some(500 * MIB)),
    ("comma-decimal", include_str!("fixtures/comma-decimal.txt"), Some(1_610_612_736)),
    ("disk-free", include_str!("fixtures/disk-free.txt"), Some(4 * GIB)),
    ("memory-only", include_str!("fixtures/memory-only.txt"), None),
    ("install-size", include_str!("fixtures/install-size.txt"), Some(650 * MIB)),
    ("no-numbers", include_str!("fixtures/no-numbers.txt"), None),
    ("steam-html", include_str!("fixtures/steam-html.txt"), Some(20 * GIB)),
    ("ssd-label", include_str!("fixtures/ssd-label.txt"), Some(150 * GIB)),
    ("available-mb", include_str!("fixtures/available-mb.txt"), Some(300 * MIB)),
];

#[test]
fn corpus_parses_to_expected_sizes() {
    let mut failures = Vec::new();
    for (name, text, expected) in CORPUS {
        let got = parse_storage_requirement(text);
        if got != *expected {
            failures.push(format!("{name}: expected {expected:?}, got {got:?}"));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn crlf_line_endings_do_not_matter() {
    for (name, text, expected) in CORPUS {
        let crlf = text.replace('\n', "\r\n");
        assert_eq!(parse_storage_requirement(&crlf), *expected, "{name}");
    }
}
