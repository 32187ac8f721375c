//! # Meshtastic CLI Access Module
//!
//! This module runs the official `meshtastic` command line tool against a
//! device and hands back its `--info` text. The node table inside that text is
//! processed by [`crate::peers`].
//!
//! ## Targets
//!
//! A device is reached either over a serial port (`--port /dev/ttyUSB0`) or
//! over the network (`--host 192.168.1.20`). See [`DeviceTarget`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use meshpeers::meshtastic::{DeviceTarget, InfoSource, MeshtasticCli};
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let cli = MeshtasticCli::new("meshtastic", Duration::from_secs(30));
//!     let text = cli.fetch_info(&DeviceTarget::Serial("/dev/ttyUSB0".into())).await?;
//!     println!("{} bytes of device info", text.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call is bounded by a deadline; a hung tool is killed when the deadline
//! passes. A missing `meshtastic` binary is reported separately from a tool
//! that ran and failed, see [`QueryError`].
//!
//! ## Configuration
//!
//! ```toml
//! [meshtastic]
//! cli_path = "meshtastic"
//! port = "/dev/ttyUSB0"
//! timeout_secs = 30
//! section_marker = "Nodes in mesh:"
//! ```

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use log::{debug, trace};
use thiserror::Error;
use tokio::process::Command;
use tokio::time::{timeout, Duration, Instant};

use crate::logutil::escape_log;

/// Marker the Meshtastic CLI prints before its node table.
pub const DEFAULT_SECTION_MARKER: &str = "Nodes in mesh:";

/// How much of stdout/stderr goes into debug logs.
const LOG_PREVIEW_CHARS: usize = 300;

/// Where the device lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceTarget {
    /// Serial device path, e.g. `/dev/ttyUSB0` or `COM3`
    Serial(String),
    /// IP address or hostname of a network-attached node
    Host(String),
}

impl DeviceTarget {
    /// Connection flags for the Meshtastic CLI.
    pub fn cli_args(&self) -> [&str; 2] {
        match self {
            DeviceTarget::Serial(path) => ["--port", path.as_str()],
            DeviceTarget::Host(host) => ["--host", host.as_str()],
        }
    }
}

impl fmt::Display for DeviceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceTarget::Serial(path) => f.write_str(path),
            DeviceTarget::Host(host) => f.write_str(host),
        }
    }
}

/// Why the device info could not be obtained.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The CLI binary is not installed or not on `PATH`.
    #[error("Meshtastic CLI '{}' not found. Make sure it's installed and in your PATH", .program.display())]
    NotInstalled { program: PathBuf },

    /// The CLI did not finish before the deadline.
    #[error("Meshtastic command timed out after {}s. Check your device connection", .elapsed.as_secs())]
    TimedOut { elapsed: Duration },

    /// The CLI ran and exited with a failure status.
    #[error("Meshtastic CLI exited with {}: {stderr}", describe_status(.status))]
    Failed { status: Option<i32>, stderr: String },

    /// Spawning or reading the process failed for another reason.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Anything that can produce `--info` text for a target.
pub trait InfoSource {
    fn fetch_info(
        &self,
        target: &DeviceTarget,
    ) -> impl Future<Output = Result<String, QueryError>>;
}

/// Runs `<program> --port|--host <target> --info` with a deadline.
#[derive(Debug, Clone)]
pub struct MeshtasticCli {
    program: PathBuf,
    timeout: Duration,
}

impl MeshtasticCli {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl InfoSource for MeshtasticCli {
    async fn fetch_info(&self, target: &DeviceTarget) -> Result<String, QueryError> {
        debug!(
            "Running {} {} --info",
            self.program.display(),
            target.cli_args().join(" ")
        );
        let started = Instant::now();
        let child = Command::new(&self.program)
            .args(target.cli_args())
            .arg("--info")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => QueryError::NotInstalled {
                    program: self.program.clone(),
                },
                _ => QueryError::Io(e),
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(QueryError::TimedOut {
                    elapsed: started.elapsed(),
                })
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(
                "Meshtastic CLI failed ({}): {}",
                output.status,
                escape_log(&stderr, LOG_PREVIEW_CHARS)
            );
            return Err(QueryError::Failed {
                status: output.status.code(),
                stderr,
            });
        }
        debug!(
            "Meshtastic CLI returned {} bytes in {} ms",
            stdout.len(),
            started.elapsed().as_millis()
        );
        trace!("stdout: {}", escape_log(&stdout, LOG_PREVIEW_CHARS));
        Ok(stdout)
    }
}

/// Text following the first `marker`, trimmed. `None` if the marker is absent.
pub fn find_section<'a>(output: &'a str, marker: &str) -> Option<&'a str> {
    output
        .find(marker)
        .map(|start| output[start + marker.len()..].trim())
}
