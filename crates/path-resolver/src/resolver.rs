//! Chooses what to measure for a game record.

use std::path::{Path, PathBuf};

use gamesize_catalog::GameRecord;
use tracing::debug;

use crate::heuristics::{
    MAX_ASCENTS, ascend_to_true_root, is_overly_generic_root, is_storefront_url,
    normalize_lexically,
};
use crate::platform::{PlatformClass, is_cue_sheet, is_disc_image_file};
use crate::types::{IssueCategory, ResolvedTarget};

/// Resolves catalog records to the file or directory that holds the game.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_dir: Option<PathBuf>,
    max_ascents: usize,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PathResolver {
    pub fn new() -> Self {
        Self {
            base_dir: None,
            max_ascents: MAX_ASCENTS,
        }
    }

    /// Resolves relative catalog paths against `base_dir` instead of the
    /// working directory.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Overrides how many parent steps a PC executable may climb.
    pub fn with_max_ascents(mut self, max_ascents: usize) -> Self {
        self.max_ascents = max_ascents;
        self
    }

    fn absolutize(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            return normalize_lexically(path);
        }
        let base = self.base_dir.clone().or_else(|| std::env::current_dir().ok());
        match base {
            Some(base) => normalize_lexically(&base.join(path)),
            None => normalize_lexically(path),
        }
    }

    /// Decides what to measure for `game`.
    pub fn resolve(&self, game: &GameRecord) -> ResolvedTarget {
        let title = game.title.as_str();
        let raw_app = game.application_path();

        if let Some(raw) = raw_app.filter(|p| is_storefront_url(p)) {
            debug!(game = %title, url = raw, "launcher URL");
            return ResolvedTarget::unresolved(
                IssueCategory::StorefrontGame,
                format!("{title} (Launcher URL: {raw})"),
            );
        }

        let app_path = raw_app.map(|raw| self.absolutize(raw));

        if let Some(root) = game.root_folder().map(|raw| self.absolutize(raw)) {
            if !root.is_dir() {
                debug!(game = %title, root = %root.display(), "root folder missing");
            } else if is_overly_generic_root(&root, &game.platform, app_path.as_deref()) {
                debug!(game = %title, root = %root.display(), "root folder too generic");
            } else {
                debug!(game = %title, path = %root.display(), "using root folder");
                return ResolvedTarget::Path(root);
            }
        }

        let (Some(raw), Some(app)) = (raw_app, app_path) else {
            return not_determined(title);
        };
        let class = PlatformClass::classify(&game.platform);

        if app.is_file() {
            let single_file_game = match class {
                PlatformClass::SingleRomFile => true,
                PlatformClass::DiscImage => is_disc_image_file(&app),
                _ => false,
            };
            let as_file = single_file_game || is_cue_sheet(&app);

            if as_file {
                debug!(game = %title, path = %app.display(), "using application file");
                return ResolvedTarget::Path(app);
            }
            if class == PlatformClass::Pc {
                let Some(start) = app.parent() else {
                    return not_determined(title);
                };
                return match ascend_to_true_root(start, title, self.max_ascents) {
                    Some(root) => {
                        debug!(game = %title, path = %root.display(), "ascended from executable");
                        ResolvedTarget::Path(root)
                    }
                    None => not_determined(title),
                };
            }
            debug!(game = %title, path = %app.display(), "using application file");
            return ResolvedTarget::Path(app);
        }

        if app.is_dir() {
            let accepted = match class {
                PlatformClass::Pc | PlatformClass::ScummVm => true,
                PlatformClass::Amiga => raw.to_lowercase().contains("whdload"),
                _ => false,
            };
            if accepted {
                debug!(game = %title, path = %app.display(), "using application directory");
                return ResolvedTarget::Path(app);
            }
            return ResolvedTarget::unresolved(
                IssueCategory::AmbiguousDirectoryAsApplicationPath,
                format!(
                    "{title} (AppPath '{raw}' is directory on platform '{}')",
                    game.platform
                ),
            );
        }

        ResolvedTarget::unresolved(
            IssueCategory::ApplicationPathNotFound,
            format!("{title} (ApplicationPath '{raw}' does not exist)"),
        )
    }
}

fn not_determined(title: &str) -> ResolvedTarget {
    ResolvedTarget::unresolved(
        IssueCategory::PathNotDetermined,
        format!("{title} (Could not determine a valid path from RootFolder or ApplicationPath)"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(title: &str, platform: &str, app: &str, root: &str) -> GameRecord {
        GameRecord {
            id: title.to_lowercase(),
            title: title.into(),
            application_path: app.into(),
            root_folder: root.into(),
            platform: platform.into(),
        }
    }

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn launcher_url_is_storefront_game() {
        let target = PathResolver::new().resolve(&game("Half-Life 2", "Windows", "steam://run/220", ""));
        assert_eq!(
            target,
            ResolvedTarget::Unresolved {
                category: IssueCategory::StorefrontGame,
                detail: "Half-Life 2 (Launcher URL: steam://run/220)".into(),
            }
        );
    }

    #[test]
    fn launcher_url_wins_over_root_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Half-Life 2");
        std::fs::create_dir_all(&root).unwrap();
        let record = game("Half-Life 2", "Windows", "steam://run/220", root.to_str().unwrap());
        assert_eq!(
            PathResolver::new().resolve(&record).category(),
            Some(IssueCategory::StorefrontGame)
        );
    }

    #[test]
    fn pc_executable_ascends_to_game_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let exe = tmp.path().join("My Game Folder/Binaries/Win64/game.exe");
        touch(&exe);

        let target = PathResolver::new().resolve(&game("My Game", "Windows", exe.to_str().unwrap(), ""));
        assert_eq!(target, ResolvedTarget::Path(tmp.path().join("My Game Folder")));
    }

    #[test]
    fn existing_root_folder_is_used() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Quake");
        std::fs::create_dir_all(&root).unwrap();

        let target = PathResolver::new().resolve(&game("Quake", "MS-DOS", "", root.to_str().unwrap()));
        assert_eq!(target, ResolvedTarget::Path(root));
    }

    #[test]
    fn generic_root_falls_through_to_application_path() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("LaunchBox/Games");
        let rom = root.join("pitfall.a26");
        touch(&rom);

        let record = game("Pitfall!", "Atari 2600", rom.to_str().unwrap(), root.to_str().unwrap());
        assert_eq!(PathResolver::new().resolve(&record), ResolvedTarget::Path(rom));
    }

    #[test]
    fn missing_root_falls_through_to_application_path() {
        let tmp = tempfile::tempdir().unwrap();
        let rom = tmp.path().join("Sonic.md");
        touch(&rom);

        let record = game(
            "Sonic",
            "Sega Genesis",
            rom.to_str().unwrap(),
            tmp.path().join("missing").to_str().unwrap(),
        );
        assert_eq!(PathResolver::new().resolve(&record), ResolvedTarget::Path(rom));
    }

    #[test]
    fn disc_image_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        let chd = tmp.path().join("Crash.chd");
        let bin = tmp.path().join("Crash.bin");
        let cue = tmp.path().join("Crash.cue");
        touch(&chd);
        touch(&bin);
        touch(&cue);

        let resolver = PathResolver::new();
        assert_eq!(
            resolver.resolve(&game("Crash", "Sony Playstation", chd.to_str().unwrap(), "")),
            ResolvedTarget::Path(chd)
        );
        assert_eq!(
            resolver.resolve(&game("Crash", "Sony Playstation", cue.to_str().unwrap(), "")),
            ResolvedTarget::Path(cue)
        );
        // Non-image file on a disc platform still falls back to the file.
        assert_eq!(
            resolver.resolve(&game("Crash", "Sony Playstation", bin.to_str().unwrap(), "")),
            ResolvedTarget::Path(bin)
        );
    }

    #[test]
    fn directory_application_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let scumm = tmp.path().join("monkey");
        let whd = tmp.path().join("WHDLoad/Turrican");
        let snes = tmp.path().join("snes-dir");
        for dir in [&scumm, &whd, &snes] {
            std::fs::create_dir_all(dir).unwrap();
        }
        let resolver = PathResolver::new();

        assert_eq!(
            resolver.resolve(&game("Monkey Island", "ScummVM Games", scumm.to_str().unwrap(), "")),
            ResolvedTarget::Path(scumm.clone())
        );
        assert_eq!(
            resolver.resolve(&game("Turrican", "Commodore Amiga", whd.to_str().unwrap(), "")),
            ResolvedTarget::Path(whd)
        );
        assert_eq!(
            resolver
                .resolve(&game("Monkey Island", "Commodore Amiga", scumm.to_str().unwrap(), ""))
                .category(),
            Some(IssueCategory::AmbiguousDirectoryAsApplicationPath)
        );

        let raw = snes.to_str().unwrap();
        assert_eq!(
            resolver.resolve(&game("Zelda", "Super Nintendo Entertainment System", raw, "")),
            ResolvedTarget::Unresolved {
                category: IssueCategory::AmbiguousDirectoryAsApplicationPath,
                detail: format!(
                    "Zelda (AppPath '{raw}' is directory on platform 'Super Nintendo Entertainment System')"
                ),
            }
        );
    }

    #[test]
    fn missing_application_path() {
        let target = PathResolver::new().resolve(&game("Ghost", "Windows", "/no/such/ghost.exe", ""));
        assert_eq!(
            target,
            ResolvedTarget::Unresolved {
                category: IssueCategory::ApplicationPathNotFound,
                detail: "Ghost (ApplicationPath '/no/such/ghost.exe' does not exist)".into(),
            }
        );
    }

    #[test]
    fn nothing_to_go_on() {
        let target = PathResolver::new().resolve(&game("Blank", "Windows", "  ", ""));
        assert_eq!(
            target,
            ResolvedTarget::Unresolved {
                category: IssueCategory::PathNotDetermined,
                detail: "Blank (Could not determine a valid path from RootFolder or ApplicationPath)"
                    .into(),
            }
        );
    }

    #[test]
    fn relative_paths_use_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let rom = tmp.path().join("Games/Atari 2600/pitfall.a26");
        touch(&rom);

        let resolver = PathResolver::new().with_base_dir(tmp.path());
        let record = game("Pitfall!", "Atari 2600", "Games/Atari 2600/./pitfall.a26", "");
        assert_eq!(resolver.resolve(&record), ResolvedTarget::Path(rom));
    }

    #[test]
    fn relative_paths_default_to_working_directory() {
        let cwd = std::env::current_dir().unwrap();
        let resolver = PathResolver::new();

        let anchored = resolver.absolutize("roms/../pitfall.a26");
        assert!(anchored.is_absolute());
        assert_eq!(anchored, normalize_lexically(&cwd.join("pitfall.a26")));

        let base = tempfile::tempdir().unwrap();
        let resolver = PathResolver::new().with_base_dir(base.path());
        assert_eq!(resolver.absolutize("pitfall.a26"), base.path().join("pitfall.a26"));
    }
}
