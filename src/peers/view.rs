//! Canonical peer representation built from a loosely-typed CLI record.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::table::RawPeerRecord;

/// Display used for timestamps that are missing or out of range.
pub const NOT_AVAILABLE: &str = "N/A";

const LAST_HEARD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time zone used when rendering `lastHeard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampZone {
    #[default]
    Local,
    Utc,
}

/// A normalized peer. Fields are fixed at construction; absent values stay
/// `None` and only the renderer turns them into display sentinels.
///
/// Serializes as `{name, id, role, snr, hops_away, last_heard, last_heard_str}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerView {
    name: String,
    id: String,
    role: String,
    snr: Option<Number>,
    hops_away: Option<u32>,
    last_heard: Option<Number>,
    #[serde(rename = "last_heard_str")]
    last_heard_display: String,
}

impl PeerView {
    /// Build a view from a table key and its record. Never fails.
    ///
    /// - name: `user.longName` → `user.shortName` → `id`
    /// - role: `role` → `user.role` → `"UNKNOWN"`, upper-cased
    pub fn normalize(id: &str, raw: &RawPeerRecord, zone: TimestampZone) -> Self {
        let user = raw.get("user").and_then(Value::as_object);

        let name = user_field(user, "longName")
            .or_else(|| user_field(user, "shortName"))
            .unwrap_or(id)
            .to_string();
        let role = non_empty_str(raw.get("role"))
            .or_else(|| user_field(user, "role"))
            .unwrap_or("unknown")
            .to_uppercase();

        let snr = number(raw.get("snr"));
        let hops_away = raw
            .get("hopsAway")
            .and_then(Value::as_u64)
            .and_then(|h| u32::try_from(h).ok());
        let last_heard = number(raw.get("lastHeard"));
        let last_heard_display = format_last_heard(last_heard.as_ref(), zone);

        Self {
            name,
            id: id.to_string(),
            role,
            snr,
            hops_away,
            last_heard,
            last_heard_display,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn snr(&self) -> Option<&Number> {
        self.snr.as_ref()
    }

    /// `Some(0)` means direct radio contact; `None` means unknown.
    pub fn hops_away(&self) -> Option<u32> {
        self.hops_away
    }

    pub fn last_heard(&self) -> Option<&Number> {
        self.last_heard.as_ref()
    }

    /// `lastHeard` as fractional Unix seconds.
    pub fn last_heard_secs(&self) -> Option<f64> {
        self.last_heard.as_ref().and_then(Number::as_f64)
    }

    pub fn last_heard_display(&self) -> &str {
        &self.last_heard_display
    }
}

fn user_field<'a>(user: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a str> {
    user.and_then(|u| non_empty_str(u.get(key)))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn number(value: Option<&Value>) -> Option<Number> {
    match value {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

fn format_last_heard(ts: Option<&Number>, zone: TimestampZone) -> String {
    let Some(secs) = ts.and_then(Number::as_f64) else {
        return NOT_AVAILABLE.to_string();
    };
    if !secs.is_finite() || secs.abs() > i64::MAX as f64 {
        return NOT_AVAILABLE.to_string();
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    match DateTime::<Utc>::from_timestamp(whole as i64, nanos.min(999_999_999)) {
        Some(utc) => match zone {
            TimestampZone::Utc => utc.format(LAST_HEARD_FORMAT).to_string(),
            TimestampZone::Local => utc.with_timezone(&Local).format(LAST_HEARD_FORMAT).to_string(),
        },
        None => NOT_AVAILABLE.to_string(),
    }
}
