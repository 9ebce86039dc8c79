//! Supported JetBrains IDE identities
//!
//! The static table of IDE variants this crate knows how to register. Each
//! entry carries the canonical identifier (matching the start script name,
//! `IDE_HOME/bin/<id>.sh`), the display title shown in the launcher, and the
//! generic icon family name. Editions sharing one icon family collapse to
//! the family name so the icon shipped with any edition can be reused.

use serde::Serialize;

use crate::error::{ProxyError, Result};

/// Identity of a supported IDE variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdeIdentity {
    /// Canonical identifier, e.g. "pycharm-professional"
    pub id: &'static str,
    /// Display title for the launcher entry
    pub title: &'static str,
    /// Generic icon base name, e.g. "pycharm" for every PyCharm edition
    pub icon: &'static str,
}

/// All supported IDE variants, in registration order
pub const KNOWN_IDES: &[IdeIdentity] = &[
    // PyCharm editions
    IdeIdentity { id: "pycharm", title: "PyCharm", icon: "pycharm" },
    IdeIdentity { id: "pycharm-professional", title: "PyCharm Professional", icon: "pycharm" },
    IdeIdentity { id: "pycharm-community", title: "PyCharm Community", icon: "pycharm" },
    IdeIdentity { id: "pycharm-educational", title: "PyCharm Educational", icon: "pycharm" },
    // IntelliJ IDEA editions
    IdeIdentity { id: "idea", title: "Intellij", icon: "idea" },
    IdeIdentity { id: "intellij-idea-ultimate", title: "Intellij Idea Ultimate", icon: "idea" },
    IdeIdentity { id: "intellij-idea-community", title: "Intellij Idea Community", icon: "idea" },
    IdeIdentity { id: "intellij-idea-educational", title: "Intellij Idea Edu", icon: "idea" },
    // Single-edition IDEs
    IdeIdentity { id: "datagrip", title: "DataGrip", icon: "datagrip" },
    IdeIdentity { id: "webstorm", title: "WebStorm", icon: "webstorm" },
    IdeIdentity { id: "goland", title: "Goland", icon: "goland" },
    IdeIdentity { id: "clion", title: "Clion", icon: "clion" },
    IdeIdentity { id: "phpstorm", title: "PhpStorm", icon: "phpstorm" },
    IdeIdentity { id: "rubymine", title: "RubyMine", icon: "rubymine" },
];

/// Look up a known identity by canonical id
pub fn find_identity(ide_id: &str) -> Option<&'static IdeIdentity> {
    KNOWN_IDES.iter().find(|ide| ide.id == ide_id)
}

/// Map an IDE id to its generic icon base name
///
/// Identifiers outside the known table map to themselves, so icon lookup
/// still works for an IDE variant the table does not list yet.
pub fn generic_icon_name(ide_id: &str) -> &str {
    find_identity(ide_id).map(|ide| ide.icon).unwrap_or(ide_id)
}

/// Validate an IDE identifier
///
/// Valid ids are non-empty and contain only lowercase alphanumerics and
/// hyphens, matching the start-script naming convention.
pub fn is_valid_ide_id(ide_id: &str) -> bool {
    !ide_id.is_empty()
        && ide_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Validate the (id, title) pair handed to the descriptor builder
///
/// Raised before any filesystem access; a violation is a programmer error in
/// the registration setup, not a missing installation.
pub fn validate_registration(ide_id: &str, title: &str) -> Result<()> {
    if !is_valid_ide_id(ide_id) {
        return Err(ProxyError::validation(format!(
            "invalid ide id {ide_id:?}: must be non-empty lowercase alphanumerics and hyphens"
        )));
    }
    if title.trim().is_empty() {
        return Err(ProxyError::validation(format!(
            "ide {ide_id} has an empty display title"
        )));
    }
    Ok(())
}
