//! Connectivity-class and recency filtering.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::view::PeerView;

/// Role substrings that mark infrastructure nodes.
const ROUTER_ROLE_MARKERS: [&str; 2] = ["ROUTER", "REPEATER"];

/// Which peers a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every known peer
    #[default]
    All,
    /// Only peers reported zero hops away
    Direct,
    /// Only routers and repeaters
    Routers,
}

impl Mode {
    /// Report heading for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Mode::All => "All Nodes",
            Mode::Direct => "Directly Connected Nodes",
            Mode::Routers => "Router and Repeater Nodes",
        }
    }

    fn admits(self, view: &PeerView) -> bool {
        match self {
            Mode::All => true,
            Mode::Direct => view.hops_away() == Some(0),
            Mode::Routers => ROUTER_ROLE_MARKERS
                .iter()
                .any(|marker| view.role().contains(marker)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::All => "all",
            Mode::Direct => "direct",
            Mode::Routers => "routers",
        };
        f.write_str(s)
    }
}

/// Keep the views admitted by `mode` and, when `max_age` is set, heard within
/// `max_age` of `now`. Views without `lastHeard` are dropped only when an age
/// limit is active.
pub fn filter_peers(
    views: Vec<PeerView>,
    mode: Mode,
    max_age: Option<Duration>,
    now: DateTime<Utc>,
) -> Vec<PeerView> {
    let now_secs = now.timestamp_millis() as f64 / 1000.0;
    views
        .into_iter()
        .filter(|view| mode.admits(view))
        .filter(|view| match max_age {
            None => true,
            Some(limit) => match view.last_heard_secs() {
                Some(heard) => now_secs - heard <= limit.as_secs_f64(),
                None => false,
            },
        })
        .collect()
}
