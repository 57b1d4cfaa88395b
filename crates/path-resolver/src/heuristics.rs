//! Named predicates used by the resolver.

use std::path::{Component, Path, PathBuf};

use tracing::trace;

/// Launcher URL schemes that never point at local files.
pub const STOREFRONT_SCHEMES: &[&str] = &[
    "steam://",
    "com.epicgames.launcher://",
    "amazon-games://",
    "goggalaxy://",
    "origin://",
    "uplay://",
];

/// Folder names that hold binaries or data rather than a whole game.
pub const GENERIC_SUBFOLDER_NAMES: &[&str] = &[
    "bin",
    "bins",
    "binaries",
    "win32",
    "win64",
    "x86",
    "x64",
    "system",
    "system32",
    "executable",
    "game",
    "dist",
    "data",
    "files",
    "retail",
    "shipping",
];

/// Folder names that usually hold a whole library rather than one game.
pub const LIBRARY_FOLDER_NAMES: &[&str] = &["Games", "ROMs"];

/// Install folder of the host launcher; a library directly below it is
/// treated as shallow.
pub const LAUNCHER_FOLDER_NAME: &str = "LaunchBox";

/// Maximum depth of an application path below a library folder for the
/// library folder to still count as overly generic.
pub const SHALLOW_APP_PATH_SEGMENTS: usize = 2;

/// Default number of parent steps when looking for an install root.
pub const MAX_ASCENTS: usize = 2;

/// Shortest normalized name accepted as a title match.
const MIN_MATCH_LEN: usize = 4;

/// Shortest contained name accepted by the lenient title match.
const MIN_LENIENT_MATCH_LEN: usize = 5;

/// Returns `true` if `application_path` is a launcher URL.
pub fn is_storefront_url(application_path: &str) -> bool {
    let path = application_path.trim();
    STOREFRONT_SCHEMES.iter().any(|scheme| {
        path.get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// Returns `true` if `name` is a binaries/data folder such as `Win64`.
pub fn is_generic_subfolder(name: &str) -> bool {
    GENERIC_SUBFOLDER_NAMES
        .iter()
        .any(|g| g.eq_ignore_ascii_case(name))
}

fn normalize_title(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns `true` if a folder name plausibly names the game.
///
/// Both sides are reduced to lowercase letters and digits; one must
/// contain the other and the match must not be trivially short.
pub fn is_good_title_match(folder_name: &str, title: &str) -> bool {
    let folder = normalize_title(folder_name);
    let title = normalize_title(title);
    if folder.is_empty() || title.is_empty() {
        return false;
    }
    let folder_len = folder.chars().count();
    let title_len = title.chars().count();

    if (title.contains(&folder) || folder.contains(&title))
        && folder_len.min(title_len) >= MIN_MATCH_LEN
    {
        return true;
    }
    (title.contains(&folder) && folder_len >= MIN_LENIENT_MATCH_LEN)
        || (folder.contains(&title) && title_len >= MIN_LENIENT_MATCH_LEN)
}

fn name_of(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

fn is_named(path: &Path, name: &str) -> bool {
    name_of(path).is_some_and(|n| n.eq_ignore_ascii_case(name))
}

/// Returns `true` if `root` looks like a whole library rather than one game.
///
/// That is the case when the folder is named `Games`, `ROMs` or after the
/// platform, sits near the filesystem root or directly in the launcher
/// folder, and the application path (if any) is at most two levels below it.
pub fn is_overly_generic_root(root: &Path, platform: &str, application_path: Option<&Path>) -> bool {
    let Some(name) = name_of(root) else {
        return true;
    };
    let Some(parent) = root.parent() else {
        return true;
    };

    let platform = platform.trim();
    let library_name = LIBRARY_FOLDER_NAMES
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
        || (!platform.is_empty() && name.eq_ignore_ascii_case(platform));
    if !library_name {
        return false;
    }

    let grandparent = parent.parent();
    let shallow = grandparent.is_none()
        || grandparent.and_then(Path::parent).is_none()
        || is_named(parent, LAUNCHER_FOLDER_NAME)
        || grandparent.is_some_and(|g| is_named(g, LAUNCHER_FOLDER_NAME));
    if !shallow {
        return false;
    }

    match application_path {
        None => true,
        Some(app) => {
            segments_below(root, app).is_some_and(|n| n <= SHALLOW_APP_PATH_SEGMENTS)
        }
    }
}

/// Number of path components of `path` below `root`, compared ignoring case.
fn segments_below(root: &Path, path: &Path) -> Option<usize> {
    let root_parts: Vec<String> = lowercase_components(root);
    let path_parts: Vec<String> = lowercase_components(path);
    if path_parts.len() <= root_parts.len() || !path_parts.starts_with(&root_parts) {
        return None;
    }
    Some(path_parts.len() - root_parts.len())
}

fn lowercase_components(path: &Path) -> Vec<String> {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
        .collect()
}

/// Walks up from `start` looking for the directory that holds the game.
///
/// `start` is returned directly when its own name matches `title`.
/// Otherwise each step adopts the parent if it matches the title (and
/// stops), or if the folder just left was a generic one like `Win64`.
/// Returns `None` when `start` is not an existing directory.
pub fn ascend_to_true_root(start: &Path, title: &str, max_ascents: usize) -> Option<PathBuf> {
    if !start.is_dir() {
        return None;
    }
    let accepts = |name: Option<&str>| {
        name.is_some_and(|n| is_good_title_match(n, title) && !is_generic_subfolder(n))
    };

    if accepts(name_of(start)) {
        return Some(start.to_path_buf());
    }

    let mut best = start.to_path_buf();
    let mut current = start.to_path_buf();
    for _ in 0..max_ascents {
        let Some(parent) = current.parent().map(Path::to_path_buf) else {
            break;
        };
        if accepts(name_of(&parent)) {
            trace!(title, path = %parent.display(), "parent matches title");
            best = parent;
            break;
        }
        if name_of(&current).is_some_and(is_generic_subfolder) {
            trace!(title, path = %parent.display(), "left generic folder");
            best = parent.clone();
            current = parent;
        } else {
            break;
        }
    }
    Some(best)
}

/// Resolves `.` and `..` without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
