//! # Peer table processing
//!
//! Pure stages that turn the Meshtastic CLI's `--info` text into an ordered
//! list of [`PeerView`]s:
//!
//! ```text
//! text ─▶ extract_balanced_block ─▶ parse_peer_table ─▶ PeerView::normalize
//!      ─▶ filter_peers ─▶ sort_peers
//! ```
//!
//! None of these keep state between calls. Orchestration lives in
//! [`crate::report`].

pub mod age;
pub mod extract;
pub mod filter;
pub mod sort;
pub mod table;
pub mod view;

pub use age::parse_age_spec;
pub use extract::extract_balanced_block;
pub use filter::{filter_peers, Mode};
pub use sort::sort_peers;
pub use table::{parse_peer_table, ParseError, PeerTable, RawPeerRecord};
pub use view::{PeerView, TimestampZone, NOT_AVAILABLE};
