//! projector-proxy
//!
//! Exposes installed JetBrains IDEs to a notebook-server proxy framework as
//! browser-accessible remote-display sessions. For each supported IDE the
//! crate locates the installation and the `projector` launcher, and builds a
//! [`LaunchDescriptor`] the host framework uses to spawn and route to the
//! session; IDEs that cannot be found register as disabled placeholders so
//! one missing installation never affects the others.

pub mod descriptor;
pub mod error;
pub mod ide;
pub mod logging;
pub mod registry;
pub mod resolver;

pub use descriptor::{LaunchCommand, LaunchDescriptor, LauncherEntry, LAUNCH_TIMEOUT_SECS};
pub use error::{ProxyError, Result};
pub use ide::{IdeIdentity, KNOWN_IDES};
pub use registry::{build_or_placeholder, projector_servers, ServerEntry};
