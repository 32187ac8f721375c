//! # Meshpeers - Mesh Peer Reports from the Meshtastic CLI
//!
//! Meshpeers asks a Meshtastic device for its known-peer table through the
//! official `meshtastic` command line tool, pulls the JSON node table out of
//! the free-form `--info` output, and prints a filtered, sorted report.
//!
//! ## Features
//!
//! - **Robust Extraction**: Brace-balanced scanning finds the node table inside arbitrary diagnostic text.
//! - **Normalization**: Sparse, loosely-typed peer records become uniform [`peers::PeerView`]s.
//! - **Filtering**: All peers, direct (zero-hop) neighbours, or routers/repeaters, optionally limited by age (`90s`, `30m`, `2h`, `1d`).
//! - **Output**: Aligned text table on stdout plus optional JSON export.
//! - **Bounded Device Calls**: The CLI runs under a deadline and is killed when it hangs.
//!
//! ## Quick Start
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
//!         Mode::Routers,
//!         None,
//!         None,
//!     )?;
//!     let cli = MeshtasticCli::new("meshtastic", Duration::from_secs(30));
//!     let peers = report::run(&cli, &request, DEFAULT_SECTION_MARKER, chrono::Utc::now()).await?;
//!     print!("{}", render_report(request.mode(), &peers));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`meshtastic`] - Running the Meshtastic CLI and locating the node table
//! - [`peers`] - Extraction, parsing, normalization, filtering and sorting
//! - [`report`] - Pipeline orchestration, table rendering and JSON export
//! - [`config`] - Configuration management and validation
//! - [`validation`] - Serial port / host validation
//! - [`errors`] - Report failure taxonomy
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Meshtastic    │ ← `meshtastic --port/--host … --info`
//! │   CLI           │
//! └─────────────────┘
//!          │ text
//! ┌─────────────────┐
//! │   Peers         │ ← extract → parse → normalize → filter → sort
//! └─────────────────┘
//!          │ Vec<PeerView>
//! ┌─────────────────┐
//! │   Report        │ ← table on stdout, optional JSON file
//! └─────────────────┘
//! ```

pub mod config;
pub mod errors;
pub mod legacy_args;
pub mod logutil;
pub mod meshtastic;
pub mod peers;
pub mod report;
pub mod validation;
