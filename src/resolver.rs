//! Executable and resource resolution
//!
//! Pure lookup logic: given a logical name, find an executable or icon on
//! disk using a prioritized search strategy. The process PATH is consulted
//! first (via the `which` crate), then a fixed list of conventional install
//! locations is probed in order. Nothing here is cached: installations can
//! change between registration time and launch time, and every probe is a
//! handful of stat calls.
//!
//! Each public operation has a `*_in` twin taking an explicit search path,
//! so tests can exercise PATH resolution against a temporary directory
//! instead of the real environment.

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ProxyError, Result};
use crate::ide::generic_icon_name;

/// Name of the remote-display launcher executable
pub const LAUNCHER_NAME: &str = "projector";

/// Bundled fallback icons, embedded so a library build has no on-disk
/// asset directory to locate. Keyed by canonical IDE id, matching the
/// `icons/<ide_id>.svg` layout in the source tree.
const BUNDLED_ICONS: &[(&str, &[u8])] = &[
    ("pycharm", include_bytes!("../icons/pycharm.svg")),
    ("pycharm-professional", include_bytes!("../icons/pycharm-professional.svg")),
    ("pycharm-community", include_bytes!("../icons/pycharm-community.svg")),
    ("pycharm-educational", include_bytes!("../icons/pycharm-educational.svg")),
    ("idea", include_bytes!("../icons/idea.svg")),
    ("intellij-idea-ultimate", include_bytes!("../icons/intellij-idea-ultimate.svg")),
    ("intellij-idea-community", include_bytes!("../icons/intellij-idea-community.svg")),
    ("intellij-idea-educational", include_bytes!("../icons/intellij-idea-educational.svg")),
    ("datagrip", include_bytes!("../icons/datagrip.svg")),
    ("webstorm", include_bytes!("../icons/webstorm.svg")),
    ("goland", include_bytes!("../icons/goland.svg")),
    ("clion", include_bytes!("../icons/clion.svg")),
    ("phpstorm", include_bytes!("../icons/phpstorm.svg")),
    ("rubymine", include_bytes!("../icons/rubymine.svg")),
];

/// Find a program on the search path, falling back to a list of candidate
/// locations probed in order
///
/// The first existing fallback wins; order is significant.
pub fn find_executable(name: &str, fallback_paths: &[PathBuf]) -> Result<PathBuf> {
    find_executable_in(name, fallback_paths, env::var_os("PATH").as_deref())
}

pub(crate) fn find_executable_in(
    name: &str,
    fallback_paths: &[PathBuf],
    search_path: Option<&OsStr>,
) -> Result<PathBuf> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    if let Ok(found) = which::which_in(name, search_path, &cwd) {
        debug!("resolved {} to {} via search path", name, found.display());
        return Ok(found);
    }

    for candidate in fallback_paths {
        if candidate.exists() {
            debug!("resolved {} to fallback {}", name, candidate.display());
            return Ok(candidate.clone());
        }
    }

    Err(ProxyError::not_found("executable", name))
}

/// Conventional install locations for an IDE start script, in probe order:
/// system bin, local bin, user-local bin, then the /opt convention
pub(crate) fn ide_fallback_paths(ide_name: &str) -> Vec<PathBuf> {
    let script = format!("{ide_name}.sh");
    let mut paths = vec![
        Path::new("/usr/bin").join(&script),
        Path::new("/usr/local/bin").join(&script),
    ];
    if let Some(home) = home_dir() {
        paths.push(home.join(".local/bin").join(&script));
    }
    paths.push(Path::new("/opt").join(ide_name).join("bin").join(&script));
    paths
}

/// Find an IDE start script
///
/// PATH lookup first, which lets the install tree live anywhere; otherwise
/// the conventional locations require the `<IDE_HOME>/bin/<ide_name>.sh`
/// naming.
pub fn find_ide_executable(ide_name: &str) -> Result<PathBuf> {
    find_ide_executable_in(ide_name, env::var_os("PATH").as_deref())
}

pub(crate) fn find_ide_executable_in(
    ide_name: &str,
    search_path: Option<&OsStr>,
) -> Result<PathBuf> {
    find_executable_in(ide_name, &ide_fallback_paths(ide_name), search_path)
        .map_err(|_| ProxyError::not_found("IDE executable", ide_name))
}

/// Find the projector launcher executable
pub fn find_launcher_executable() -> Result<PathBuf> {
    find_launcher_executable_in(env::var_os("PATH").as_deref())
}

pub(crate) fn find_launcher_executable_in(search_path: Option<&OsStr>) -> Result<PathBuf> {
    let mut fallbacks = Vec::new();
    if let Some(home) = home_dir() {
        fallbacks.push(home.join(".local/bin").join(LAUNCHER_NAME));
    }
    find_executable_in(LAUNCHER_NAME, &fallbacks, search_path)
        .map_err(|_| ProxyError::not_found("launcher executable", LAUNCHER_NAME))
}

/// Find an IDE's installation root
///
/// The start script lives at `<IDE_HOME>/bin/<ide_name>`, so the home is
/// the canonicalized executable's grandparent.
pub fn find_ide_home(ide_name: &str) -> Result<PathBuf> {
    find_ide_home_in(ide_name, env::var_os("PATH").as_deref())
}

pub(crate) fn find_ide_home_in(ide_name: &str, search_path: Option<&OsStr>) -> Result<PathBuf> {
    let bin_dir = ide_bin_dir_in(ide_name, search_path)?;
    bin_dir
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ProxyError::not_found("IDE home", ide_name))
}

/// Canonicalized directory holding the IDE start script
fn ide_bin_dir_in(ide_name: &str, search_path: Option<&OsStr>) -> Result<PathBuf> {
    let executable = find_ide_executable_in(ide_name, search_path)?;
    // A dangling symlink or vanished tree counts as not installed
    let resolved = executable
        .canonicalize()
        .map_err(|_| ProxyError::not_found("IDE executable", ide_name))?;
    resolved
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ProxyError::not_found("IDE home", ide_name))
}

/// Find the icon for an IDE
///
/// Prefers the icon shipped inside the installation (`<bin_dir>/<generic>.svg`,
/// where editions collapse to their icon family name), so icon updates ride
/// along with the IDE itself. Falls back to the bundled icon for the id.
pub fn find_icon(ide_name: &str) -> Result<PathBuf> {
    find_icon_in(ide_name, env::var_os("PATH").as_deref())
}

pub(crate) fn find_icon_in(ide_name: &str, search_path: Option<&OsStr>) -> Result<PathBuf> {
    let bin_dir = ide_bin_dir_in(ide_name, search_path)?;
    let installed = bin_dir.join(format!("{}.svg", generic_icon_name(ide_name)));
    if installed.exists() {
        return Ok(installed);
    }
    bundled_icon(ide_name)
}

/// Materialize a bundled icon into the cache directory and return its path
pub(crate) fn bundled_icon(ide_name: &str) -> Result<PathBuf> {
    let bytes = BUNDLED_ICONS
        .iter()
        .find(|(id, _)| *id == ide_name)
        .map(|(_, bytes)| *bytes)
        .ok_or_else(|| ProxyError::not_found("icon", ide_name))?;

    let dir = icon_cache_dir().ok_or_else(|| ProxyError::not_found("icon cache directory", ide_name))?;
    let path = dir.join(format!("{ide_name}.svg"));
    if !path.exists() {
        fs::create_dir_all(&dir)?;
        fs::write(&path, bytes)?;
    }
    Ok(path)
}

fn icon_cache_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.cache_dir().join("projector-proxy").join("icons"))
}

/// Get the user's home directory
///
/// Uses the `home` crate on macOS, falls back to directories crate otherwise
pub(crate) fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        home::home_dir()
    }
    #[cfg(not(target_os = "macos"))]
    {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}
