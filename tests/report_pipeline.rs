//! End-to-end report behaviour: device text in, filtered/sorted/rendered peers out.

mod common;

use chrono::{DateTime, Utc};
use common::{info_output, FakeDevice, FIXTURE_NOW};
use meshpeers::errors::ReportError;
use meshpeers::meshtastic::{DeviceTarget, QueryError, DEFAULT_SECTION_MARKER};
use meshpeers::peers::{Mode, PeerView, TimestampZone};
use meshpeers::report::{self, build_report, render_report, ReportRequest, NO_RESULTS};

fn now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXTURE_NOW, 0).unwrap()
}

fn request(mode: Mode, age: Option<&str>) -> ReportRequest {
    ReportRequest::new(DeviceTarget::Serial("/dev/ttyUSB0".into()), mode, age, None)
        .unwrap()
        .with_zone(TimestampZone::Utc)
}

fn ids(peers: &[PeerView]) -> Vec<&str> {
    peers.iter().map(PeerView::id).collect()
}

#[test]
fn test_all_peers_newest_first() {
    let peers = build_report(&info_output(), DEFAULT_SECTION_MARKER, &request(Mode::All, None), now()).unwrap();
    assert_eq!(
        ids(&peers),
        vec!["!da5a4f94", "!433e1a2c", "!9b1c7e01", "!0c4d2f88", "!77aa3310"]
    );

    let kayak = &peers[2];
    assert_eq!(kayak.name(), "KYK");
    assert_eq!(kayak.role(), "UNKNOWN");
    assert_eq!(kayak.hops_away(), Some(2));

    let bare = &peers[3];
    assert_eq!(bare.name(), "!0c4d2f88");
    assert_eq!(bare.role(), "REPEATER");
}

#[test]
fn test_direct_excludes_unknown_hops() {
    let peers = build_report(&info_output(), DEFAULT_SECTION_MARKER, &request(Mode::Direct, None), now()).unwrap();
    // Base Station has no hopsAway and is therefore not known to be direct
    assert_eq!(ids(&peers), vec!["!433e1a2c", "!77aa3310"]);
}

#[test]
fn test_routers_and_repeaters() {
    let peers = build_report(&info_output(), DEFAULT_SECTION_MARKER, &request(Mode::Routers, None), now()).unwrap();
    assert_eq!(ids(&peers), vec!["!433e1a2c", "!0c4d2f88"]);
}

#[test]
fn test_age_filter_drops_untimed_and_stale() {
    let peers = build_report(&info_output(), DEFAULT_SECTION_MARKER, &request(Mode::All, Some("1h")), now()).unwrap();
    assert_eq!(ids(&peers), vec!["!da5a4f94", "!433e1a2c"]);

    let peers = build_report(&info_output(), DEFAULT_SECTION_MARKER, &request(Mode::Direct, Some("1h")), now()).unwrap();
    assert_eq!(ids(&peers), vec!["!433e1a2c"]);

    let peers = build_report(&info_output(), DEFAULT_SECTION_MARKER, &request(Mode::All, Some("30d")), now()).unwrap();
    assert!(!ids(&peers).contains(&"!77aa3310"));
}

#[test]
fn test_direct_scenario_renders_single_row() {
    let output = r#"Nodes in mesh: {"!a": {"user": {"longName": "Alpha"}, "hopsAway": 0, "lastHeard": 1000, "snr": 5.5}, "!b": {"user": {"longName": "Beta"}, "hopsAway": 2, "lastHeard": 500}}"#;
    let peers = build_report(output, DEFAULT_SECTION_MARKER, &request(Mode::Direct, None), now()).unwrap();
    assert_eq!(ids(&peers), vec!["!a"]);

    let rendered = render_report(Mode::Direct, &peers);
    let lines: Vec<&str> = rendered.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines[0], "Directly Connected Nodes (Filtered & Sorted):");
    assert!(lines[1].starts_with("Name"));
    assert_eq!(lines.len(), 4, "heading, header, separator and one row: {}", rendered);
    assert!(lines[3].starts_with("Alpha"));
    assert!(lines[3].contains("!a"));
    assert!(!rendered.contains("Beta"));
}

#[test]
fn test_no_matches_renders_message() {
    let output = r#"Nodes in mesh: {"!b": {"hopsAway": 3}}"#;
    let peers = build_report(output, DEFAULT_SECTION_MARKER, &request(Mode::Direct, None), now()).unwrap();
    assert!(peers.is_empty());
    assert!(render_report(Mode::Direct, &peers).contains(NO_RESULTS));
}

#[tokio::test]
async fn test_run_through_fake_device() {
    let device = FakeDevice::Replies(info_output());
    let peers = report::run(&device, &request(Mode::Routers, None), DEFAULT_SECTION_MARKER, now())
        .await
        .unwrap();
    assert_eq!(ids(&peers), vec!["!433e1a2c", "!0c4d2f88"]);
}

#[tokio::test]
async fn test_unbalanced_block_yields_no_report() {
    let device = FakeDevice::Replies(r#"Nodes in mesh: {"!a": {"hopsAway": 0}"#.to_string());
    let result = report::run(&device, &request(Mode::All, None), DEFAULT_SECTION_MARKER, now()).await;
    match result {
        Err(ReportError::ExtractionFailed { context }) => assert!(context.contains("!a")),
        other => panic!("Expected ExtractionFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_device_failures_are_target_unreachable() {
    let missing = report::run(&FakeDevice::Missing, &request(Mode::All, None), DEFAULT_SECTION_MARKER, now()).await;
    match missing {
        Err(ReportError::TargetUnreachable { target, source }) => {
            assert_eq!(target, "/dev/ttyUSB0");
            assert!(matches!(source, QueryError::NotInstalled { .. }));
        }
        other => panic!("Expected TargetUnreachable, got {:?}", other),
    }

    let failed = report::run(
        &FakeDevice::Exits {
            status: 1,
            stderr: "Error: No serial Meshtastic device detected",
        },
        &request(Mode::All, None),
        DEFAULT_SECTION_MARKER,
        now(),
    )
    .await
    .unwrap_err();
    assert!(failed.to_string().contains("unreachable"));
    assert!(failed.is_fatal());
}

#[tokio::test]
async fn test_missing_section_marker() {
    let device = FakeDevice::Replies("Connected to radio\nOwner: Base\n".to_string());
    let err = report::run(&device, &request(Mode::All, None), DEFAULT_SECTION_MARKER, now())
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::SectionNotFound { ref marker } if marker == "Nodes in mesh:"));
}

#[test]
fn test_invalid_age_fails_before_query() {
    for spec in ["abc", "5x", "1.5h"] {
        let err = ReportRequest::new(DeviceTarget::Serial("/dev/ttyUSB0".into()), Mode::All, Some(spec), None)
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidAgeSpec { .. }), "{}", spec);
    }
}
