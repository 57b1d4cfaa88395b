//! Platform classification.

use std::path::Path;

const PC_PLATFORMS: &[&str] = &["Windows", "MS-DOS", "Linux"];

const SINGLE_ROM_FILE_PLATFORMS: &[&str] = &[
    "Nintendo Entertainment System",
    "Super Nintendo Entertainment System",
    "Nintendo 64",
    "Sega Genesis",
    "Sega Mega Drive",
    "Sega Master System",
    "Nintendo Game Boy",
    "Nintendo Game Boy Color",
    "Nintendo Game Boy Advance",
    "Atari 2600",
    "ColecoVision",
    "Intellivision",
    "Neo Geo Pocket",
    "Neo Geo Pocket Color",
    "Sega Game Gear",
    "PC Engine",
    "TurboGrafx-16",
];

const DISC_IMAGE_PLATFORMS: &[&str] = &[
    "Sony Playstation",
    "Sony Playstation 2",
    "Sega CD",
    "Sega Saturn",
    "Sega Dreamcast",
    "Nintendo GameCube",
    "Nintendo Wii",
    "Nintendo Wii U",
    "Microsoft Xbox",
    "Microsoft Xbox 360",
    "PC Engine CD",
    "TurboGrafx-CD",
];

/// Single-file disc image formats.
const DISC_IMAGE_EXTENSIONS: &[&str] = &["chd", "iso", "gdi", "rvz", "ciso", "wbfs"];

/// How a platform lays out its games on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformClass {
    /// Installed PC games: an executable inside an install directory.
    Pc,
    /// Cartridge systems: one ROM file per game.
    SingleRomFile,
    /// Optical systems: a disc image, possibly a single file.
    DiscImage,
    ScummVm,
    Amiga,
    Other,
}

impl PlatformClass {
    /// Classifies a platform name, ignoring case.
    pub fn classify(platform: &str) -> Self {
        let platform = platform.trim();
        let is_in = |list: &[&str]| list.iter().any(|p| p.eq_ignore_ascii_case(platform));
        if is_in(PC_PLATFORMS) {
            Self::Pc
        } else if is_in(SINGLE_ROM_FILE_PLATFORMS) {
            Self::SingleRomFile
        } else if is_in(DISC_IMAGE_PLATFORMS) {
            Self::DiscImage
        } else if platform.eq_ignore_ascii_case("ScummVM Games") {
            Self::ScummVm
        } else if platform.eq_ignore_ascii_case("Commodore Amiga") {
            Self::Amiga
        } else {
            Self::Other
        }
    }
}

/// Returns `true` for single-file disc image extensions such as `.chd`.
pub fn is_disc_image_file(path: &Path) -> bool {
    has_extension(path, DISC_IMAGE_EXTENSIONS)
}

/// Returns `true` for `.cue` sheets.
pub fn is_cue_sheet(path: &Path) -> bool {
    has_extension(path, &["cue"])
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
