//! Launch descriptors handed to the host proxy framework
//!
//! A [`LaunchDescriptor`] tells the host framework how to start an IDE's
//! remote-display session and how to present it in the launcher UI. The
//! `command` field is deferred: the framework allocates a port at launch
//! time and calls [`LaunchCommand::build`] with it, once per user session
//! and possibly concurrently across sessions. The command therefore holds
//! only the captured IDE identity and re-resolves everything else on every
//! call.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ProxyError, Result};
use crate::resolver;

/// Advisory startup timeout in seconds, enforced by the host framework
pub const LAUNCH_TIMEOUT_SECS: u64 = 500;

/// Directory under the user home where projector keeps generated configs
const PROJECTOR_CONFIG_DIR: &str = ".projector";

/// Launcher UI entry for one IDE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherEntry {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<PathBuf>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Registration record describing how to launch and present one IDE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchDescriptor {
    pub command: LaunchCommand,
    /// Startup timeout in seconds (advisory, consumed by the host framework)
    pub timeout: u64,
    pub new_browser_tab: bool,
    pub absolute_url: bool,
    pub launcher_entry: LauncherEntry,
}

/// Deferred argv construction for one descriptor
///
/// Modeled as data rather than a boxed closure: the captured identity is
/// visible, serializable, and trivially `Send + Sync`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaunchCommand {
    /// Configure a projector session for the captured IDE, then hand back
    /// the generated run script
    Projector { ide_id: String },
    /// No-op command of a placeholder entry; never launched by the host
    /// framework since the entry is disabled
    Disabled,
}

impl LaunchCommand {
    /// Build the argv for launching on the given port
    ///
    /// For [`LaunchCommand::Projector`] this re-resolves the launcher and the
    /// IDE home (tolerating installs moved since registration), runs the
    /// launcher to write a fresh per-port configuration, and returns the
    /// generated start script as a single-element argv. Unlike the
    /// registration-time probe, failure here is a hard error: the IDE was
    /// confirmed installed when the descriptor was built.
    pub fn build(&self, port: u16) -> Result<Vec<String>> {
        self.build_in(port, std::env::var_os("PATH").as_deref())
    }

    pub(crate) fn build_in(&self, port: u16, search_path: Option<&OsStr>) -> Result<Vec<String>> {
        let ide_id = match self {
            Self::Disabled => {
                debug!("build requested for a disabled placeholder entry");
                return Ok(Vec::new());
            }
            Self::Projector { ide_id } => ide_id,
        };

        let launcher = resolver::find_launcher_executable_in(search_path)?;
        let ide_home = resolver::find_ide_home_in(ide_id, search_path)?;

        // For this to succeed, IDE_HOME/bin/idea.properties must be writable
        // by the effective user; projector edits it when adding a config.
        let output = Command::new(&launcher)
            .args(configure_args(port, ide_id, &ide_home))
            .output()?;
        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(ProxyError::launcher(
                output.status.to_string(),
                combined.trim().to_string(),
            ));
        }

        info!("Configuration for {} successful", ide_id);
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            info!("{}", stdout.trim());
        }

        let start_cmd = run_script_path(ide_id)?;
        Ok(vec![start_cmd.to_string_lossy().into_owned()])
    }
}

/// Arguments for `projector config add`, binding the config to localhost
/// and the framework-allocated port
pub(crate) fn configure_args(port: u16, ide_id: &str, ide_home: &Path) -> Vec<String> {
    vec![
        "--accept-license".to_string(),
        "config".to_string(),
        "add".to_string(),
        "--use-separate-config".to_string(),
        "--force".to_string(),
        "--port".to_string(),
        port.to_string(),
        "--hostname=localhost".to_string(),
        ide_id.to_string(),
        ide_home.to_string_lossy().into_owned(),
    ]
}

/// Conventional location of the run script projector generates per config
pub(crate) fn run_script_path(ide_id: &str) -> Result<PathBuf> {
    let home = resolver::home_dir()
        .ok_or_else(|| ProxyError::not_found("home directory", ide_id))?;
    Ok(home
        .join(PROJECTOR_CONFIG_DIR)
        .join("configs")
        .join(ide_id)
        .join("run.sh"))
}

impl LaunchDescriptor {
    /// Full descriptor for a confirmed-installed IDE
    pub fn enabled(ide_id: &str, title: &str, icon_path: PathBuf) -> Self {
        Self {
            command: LaunchCommand::Projector {
                ide_id: ide_id.to_string(),
            },
            timeout: LAUNCH_TIMEOUT_SECS,
            new_browser_tab: true,
            absolute_url: false,
            launcher_entry: LauncherEntry {
                title: title.to_string(),
                icon_path: Some(icon_path),
                enabled: true,
            },
        }
    }

    /// Inert placeholder keeping the registration list structurally uniform
    /// when an IDE is not installed
    pub fn placeholder(title: &str) -> Self {
        Self {
            command: LaunchCommand::Disabled,
            timeout: LAUNCH_TIMEOUT_SECS,
            new_browser_tab: true,
            absolute_url: false,
            launcher_entry: LauncherEntry {
                title: title.to_string(),
                icon_path: None,
                enabled: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;
    use tempfile::TempDir;

    fn touch_executable(path: &Path, body: &str) {
        fs::write(path, body).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    /// Fake install tree plus a projector stub; returns the PATH value
    /// covering both
    fn fake_world(tmp: &TempDir, ide_id: &str, launcher_body: &str) -> OsString {
        let ide_bin = tmp.path().join(ide_id).join("bin");
        fs::create_dir_all(&ide_bin).unwrap();
        touch_executable(&ide_bin.join(ide_id), "#!/bin/sh\nexit 0\n");

        let tool_bin = tmp.path().join("bin");
        fs::create_dir_all(&tool_bin).unwrap();
        touch_executable(&tool_bin.join("projector"), launcher_body);

        std::env::join_paths([ide_bin, tool_bin]).unwrap()
    }

    #[test]
    fn test_configure_args_grammar() {
        let args = configure_args(12345, "clion", Path::new("/opt/clion"));
        assert_eq!(args[..3], ["--accept-license", "config", "add"]);
        assert!(args.contains(&"--port".to_string()));
        assert!(args.contains(&"12345".to_string()));
        assert!(args.contains(&"--hostname=localhost".to_string()));
        assert_eq!(args[args.len() - 2..], ["clion", "/opt/clion"]);

        // --port and its value are adjacent
        let port_idx = args.iter().position(|a| a == "--port").unwrap();
        assert_eq!(args[port_idx + 1], "12345");
    }

    #[test]
    fn test_run_script_path_convention() {
        let path = run_script_path("goland").unwrap();
        assert!(path.ends_with(".projector/configs/goland/run.sh"));
    }

    #[test]
    fn test_disabled_command_is_noop() {
        let argv = LaunchCommand::Disabled.build(12345).unwrap();
        assert!(argv.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_build_returns_run_script_on_launcher_success() {
        let tmp = TempDir::new().unwrap();
        let search_path = fake_world(&tmp, "fakeide", "#!/bin/sh\necho configured\nexit 0\n");

        let command = LaunchCommand::Projector {
            ide_id: "fakeide".to_string(),
        };
        let argv = command.build_in(12345, Some(search_path.as_os_str())).unwrap();
        assert_eq!(argv.len(), 1);
        assert!(argv[0].ends_with(".projector/configs/fakeide/run.sh"));
    }

    #[test]
    #[cfg(unix)]
    fn test_build_fails_on_launcher_nonzero_exit() {
        let tmp = TempDir::new().unwrap();
        let search_path = fake_world(&tmp, "fakeide", "#!/bin/sh\necho broken >&2\nexit 3\n");

        let command = LaunchCommand::Projector {
            ide_id: "fakeide".to_string(),
        };
        let err = command.build_in(12345, Some(search_path.as_os_str())).unwrap_err();
        match err {
            ProxyError::Launcher { output, .. } => assert!(output.contains("broken")),
            other => panic!("expected launcher error, got {other}"),
        }
    }

    #[test]
    fn test_build_fails_when_launcher_missing() {
        let command = LaunchCommand::Projector {
            ide_id: "fakeide".to_string(),
        };
        let err = command.build_in(12345, None).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    #[cfg(unix)]
    fn test_concurrent_builds_do_not_interfere() {
        let tmp = TempDir::new().unwrap();
        let ide_bin_a = tmp.path().join("ide-a").join("bin");
        let ide_bin_b = tmp.path().join("ide-b").join("bin");
        fs::create_dir_all(&ide_bin_a).unwrap();
        fs::create_dir_all(&ide_bin_b).unwrap();
        touch_executable(&ide_bin_a.join("ide-a"), "#!/bin/sh\nexit 0\n");
        touch_executable(&ide_bin_b.join("ide-b"), "#!/bin/sh\nexit 0\n");
        let tool_bin = tmp.path().join("bin");
        fs::create_dir_all(&tool_bin).unwrap();
        touch_executable(&tool_bin.join("projector"), "#!/bin/sh\nexit 0\n");

        let search_path = std::env::join_paths([ide_bin_a, ide_bin_b, tool_bin]).unwrap();
        let command_a = LaunchCommand::Projector {
            ide_id: "ide-a".to_string(),
        };
        let command_b = LaunchCommand::Projector {
            ide_id: "ide-b".to_string(),
        };

        std::thread::scope(|scope| {
            let handle_a =
                scope.spawn(|| command_a.build_in(40001, Some(search_path.as_os_str())));
            let handle_b =
                scope.spawn(|| command_b.build_in(40002, Some(search_path.as_os_str())));

            let argv_a = handle_a.join().unwrap().unwrap();
            let argv_b = handle_b.join().unwrap().unwrap();
            assert!(argv_a[0].contains("/ide-a/"));
            assert!(argv_b[0].contains("/ide-b/"));
        });
    }

    #[test]
    fn test_placeholder_shape() {
        let descriptor = LaunchDescriptor::placeholder("CLion");
        assert_eq!(descriptor.command, LaunchCommand::Disabled);
        assert!(!descriptor.launcher_entry.enabled);
        assert!(descriptor.launcher_entry.icon_path.is_none());
        assert_eq!(descriptor.timeout, LAUNCH_TIMEOUT_SECS);
    }

    #[test]
    fn test_enabled_serialization_shape() {
        let descriptor =
            LaunchDescriptor::enabled("clion", "CLion", PathBuf::from("/tmp/clion.svg"));
        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(value["timeout"], 500);
        assert_eq!(value["new_browser_tab"], true);
        assert_eq!(value["absolute_url"], false);
        assert_eq!(value["command"]["kind"], "projector");
        assert_eq!(value["command"]["ide_id"], "clion");
        assert_eq!(value["launcher_entry"]["title"], "CLion");
        assert_eq!(value["launcher_entry"]["enabled"], true);
    }

    #[test]
    fn test_enabled_defaults_true_when_deserializing() {
        let entry: LauncherEntry =
            serde_json::from_str(r#"{ "title": "CLion" }"#).unwrap();
        assert!(entry.enabled);
        assert!(entry.icon_path.is_none());
    }
}
