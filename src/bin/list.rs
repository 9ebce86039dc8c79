//! Print the registration list
//!
//! Diagnostic companion to the library: enumerates every supported IDE the
//! way the host framework would at load time and prints what registered as
//! launchable. Run with RUST_LOG=debug to see the resolution attempts.

use projector_proxy::{logging, projector_servers};

fn main() {
    logging::init();

    for entry in projector_servers() {
        let status = if entry.descriptor.launcher_entry.enabled {
            "enabled"
        } else {
            "disabled"
        };
        println!(
            "{:28} {:9} {}",
            entry.id, status, entry.descriptor.launcher_entry.title
        );
    }
}
