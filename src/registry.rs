//! Registration of supported IDEs with the host framework
//!
//! Builds the registration list the host proxy framework consumes at load
//! time. Since this crate supports many JetBrains IDEs and most machines
//! have only a few installed, missing installations must fail silently per
//! IDE: every identifier in the table gets exactly one entry, degraded to a
//! disabled placeholder when the IDE (or its icon) cannot be resolved.

use std::ffi::OsStr;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::descriptor::LaunchDescriptor;
use crate::error::Result;
use crate::ide::{validate_registration, KNOWN_IDES};
use crate::resolver;

/// One row of the registration list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerEntry {
    pub id: &'static str,
    pub descriptor: LaunchDescriptor,
}

/// Build the descriptor for one IDE, degrading to a placeholder when the
/// IDE is not installed
///
/// The only error this can return is a `Validation` error for a malformed
/// id or title, raised before any filesystem access; resolution failures
/// never escape.
pub fn build_or_placeholder(ide_id: &str, title: &str) -> Result<LaunchDescriptor> {
    build_or_placeholder_in(ide_id, title, std::env::var_os("PATH").as_deref())
}

pub(crate) fn build_or_placeholder_in(
    ide_id: &str,
    title: &str,
    search_path: Option<&OsStr>,
) -> Result<LaunchDescriptor> {
    validate_registration(ide_id, title)?;

    let ide_home = match resolver::find_ide_home_in(ide_id, search_path) {
        Ok(home) => home,
        Err(err) => {
            warn!("{} could not be found: {}", ide_id, err);
            return Ok(LaunchDescriptor::placeholder(title));
        }
    };
    debug!("{} installed at {}", ide_id, ide_home.display());

    // An installed IDE without any resolvable icon also degrades, keeping
    // the per-IDE isolation policy uniform.
    let icon_path = match resolver::find_icon_in(ide_id, search_path) {
        Ok(icon) => icon,
        Err(err) => {
            warn!("no icon for installed ide {}: {}", ide_id, err);
            return Ok(LaunchDescriptor::placeholder(title));
        }
    };

    info!("Found installed ide {}", ide_id);
    Ok(LaunchDescriptor::enabled(ide_id, title, icon_path))
}

/// Enumerate the full registration list, one entry per supported IDE
///
/// Never panics and never omits an entry; uninstalled IDEs are present as
/// disabled placeholders.
pub fn projector_servers() -> Vec<ServerEntry> {
    projector_servers_in(std::env::var_os("PATH").as_deref())
}

pub(crate) fn projector_servers_in(search_path: Option<&OsStr>) -> Vec<ServerEntry> {
    let entries: Vec<ServerEntry> = KNOWN_IDES
        .iter()
        .map(|ide| {
            let descriptor = build_or_placeholder_in(ide.id, ide.title, search_path)
                .unwrap_or_else(|err| {
                    // Unreachable for the static table, but a table mistake
                    // must not take down the whole registration
                    warn!("failed to register {}: {}", ide.id, err);
                    LaunchDescriptor::placeholder(ide.title)
                });
            ServerEntry {
                id: ide.id,
                descriptor,
            }
        })
        .collect();

    if entries.iter().all(|entry| !entry.descriptor.launcher_entry.enabled) {
        warn!("no supported IDE could be found; all entries are disabled placeholders");
    }
    entries
}
