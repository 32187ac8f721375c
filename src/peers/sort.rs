//! Recency ordering.

use std::cmp::Ordering;

use super::view::PeerView;

/// Most recently heard first; peers without `lastHeard` go last. The sort is
/// stable, so ties keep their incoming order.
pub fn sort_peers(mut views: Vec<PeerView>) -> Vec<PeerView> {
    views.sort_by(|a, b| compare_last_heard(b.last_heard_secs(), a.last_heard_secs()));
    views
}

/// Ascending order with an absent timestamp below every present one.
fn compare_last_heard(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
