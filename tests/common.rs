//! Test utilities & fixtures.
//! Provides access to captured `meshtastic --info` output under `tests/test-data-int`
//! and an in-memory stand-in for the Meshtastic CLI.

use std::path::{Path, PathBuf};

use meshpeers::meshtastic::{DeviceTarget, InfoSource, QueryError};

/// Unix time the fixture peers are measured against (100s after the freshest peer).
#[allow(dead_code)]
pub const FIXTURE_NOW: i64 = 1_717_000_400;

/// Return the path to the static integration test fixture directory.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test-data-int")
}

/// Captured output of `meshtastic --port ... --info` with five peers.
#[allow(dead_code)]
pub fn info_output() -> String {
    std::fs::read_to_string(fixture_root().join("info_output.txt")).expect("fixture")
}

/// Canned replies in place of the real CLI.
#[allow(dead_code)]
pub enum FakeDevice {
    Replies(String),
    Missing,
    Exits { status: i32, stderr: &'static str },
}

impl InfoSource for FakeDevice {
    async fn fetch_info(&self, _target: &DeviceTarget) -> Result<String, QueryError> {
        match self {
            FakeDevice::Replies(text) => Ok(text.clone()),
            FakeDevice::Missing => Err(QueryError::NotInstalled {
                program: PathBuf::from("meshtastic"),
            }),
            FakeDevice::Exits { status, stderr } => Err(QueryError::Failed {
                status: Some(*status),
                stderr: stderr.to_string(),
            }),
        }
    }
}
