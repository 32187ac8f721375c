//! # Report Pipeline
//!
//! Glues the device query to the peer stages and produces the final, ordered
//! peer list for rendering.
//!
//! ```rust,no_run
//! use meshpeers::meshtastic::{DeviceTarget, MeshtasticCli, DEFAULT_SECTION_MARKER};
//! use meshpeers::peers::Mode;
//! use meshpeers::report::{self, render_report, ReportRequest};
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let request = ReportRequest::new(
//!         DeviceTarget::Serial("/dev/ttyUSB0".into()),
//!         Mode::Direct,
//!         Some("2h"),
//!         None,
//!     )?;
//!     let cli = MeshtasticCli::new("meshtastic", Duration::from_secs(30));
//!     let peers = report::run(&cli, &request, DEFAULT_SECTION_MARKER, chrono::Utc::now()).await?;
//!     print!("{}", render_report(request.mode(), &peers));
//!     Ok(())
//! }
//! ```

pub mod export;
pub mod render;

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::errors::ReportError;
use crate::logutil::preview;
use crate::meshtastic::{find_section, DeviceTarget, InfoSource};
use crate::peers::{
    extract_balanced_block, filter_peers, parse_age_spec, parse_peer_table, sort_peers, Mode,
    PeerView, TimestampZone,
};

pub use export::{export_json, write_json};
pub use render::{render_report, render_table, NO_RESULTS};

/// Characters of scanned text quoted when extraction fails.
const CONTEXT_CHARS: usize = 100;

/// What to report on. Built once from user input; read-only afterwards.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    target: DeviceTarget,
    mode: Mode,
    max_age: Option<Duration>,
    json_sink: Option<PathBuf>,
    zone: TimestampZone,
}

impl ReportRequest {
    /// Validate `age_spec` up front so bad input fails before the device is touched.
    pub fn new(
        target: DeviceTarget,
        mode: Mode,
        age_spec: Option<&str>,
        json_sink: Option<PathBuf>,
    ) -> Result<Self, ReportError> {
        let max_age = match age_spec {
            Some(spec) => Some(parse_age_spec(spec).ok_or_else(|| {
                ReportError::InvalidAgeSpec {
                    spec: spec.to_string(),
                }
            })?),
            None => None,
        };
        Ok(Self {
            target,
            mode,
            max_age,
            json_sink,
            zone: TimestampZone::default(),
        })
    }

    /// Render `lastHeard` in `zone` instead of local time.
    pub fn with_zone(mut self, zone: TimestampZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn target(&self) -> &DeviceTarget {
        &self.target
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    pub fn json_sink(&self) -> Option<&Path> {
        self.json_sink.as_deref()
    }

    pub fn zone(&self) -> TimestampZone {
        self.zone
    }
}

/// Turn raw `--info` output into the filtered, sorted peer list.
pub fn build_report(
    output: &str,
    marker: &str,
    request: &ReportRequest,
    now: DateTime<Utc>,
) -> Result<Vec<PeerView>, ReportError> {
    let section = find_section(output, marker).ok_or_else(|| ReportError::SectionNotFound {
        marker: marker.to_string(),
    })?;
    let block = extract_balanced_block(section).ok_or_else(|| ReportError::ExtractionFailed {
        context: preview(section, CONTEXT_CHARS),
    })?;
    let table = parse_peer_table(block)?;
    debug!("Peer table holds {} entries", table.len());

    let views: Vec<PeerView> = table
        .iter()
        .map(|(id, raw)| PeerView::normalize(id, raw, request.zone))
        .collect();
    let kept = filter_peers(views, request.mode, request.max_age, now);
    debug!(
        "{} peers left after mode={} age={:?}",
        kept.len(),
        request.mode,
        request.max_age
    );
    Ok(sort_peers(kept))
}

/// Query the device through `source` and build the report.
pub async fn run<S: InfoSource>(
    source: &S,
    request: &ReportRequest,
    marker: &str,
    now: DateTime<Utc>,
) -> Result<Vec<PeerView>, ReportError> {
    info!("Querying node table from {}", request.target);
    let output = source
        .fetch_info(&request.target)
        .await
        .map_err(|err| ReportError::TargetUnreachable {
            target: request.target.to_string(),
            source: err,
        })?;
    build_report(&output, marker, request, now)
}
