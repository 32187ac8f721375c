//! Decoding of the extracted node-table block.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::logutil::preview;

/// One peer entry exactly as the CLI reported it. Keys and value types are not
/// guaranteed; [`crate::peers::PeerView::normalize`] makes sense of it.
pub type RawPeerRecord = Map<String, Value>;

/// Peer id → raw record, in the order the CLI printed them.
pub type PeerTable = Vec<(String, RawPeerRecord)>;

/// How many characters of the offending block are kept for diagnostics.
const BLOCK_PREFIX_CHARS: usize = 100;

/// The block is not JSON, or not an object whose values are all objects.
#[derive(Debug, Error)]
#[error("{message} (block starts: {prefix})")]
pub struct ParseError {
    pub message: String,
    pub prefix: String,
}

impl ParseError {
    fn new(message: impl Into<String>, block: &str) -> Self {
        Self {
            message: message.into(),
            prefix: preview(block, BLOCK_PREFIX_CHARS),
        }
    }
}

/// Decode `block` into a peer table. No recovery is attempted.
pub fn parse_peer_table(block: &str) -> Result<PeerTable, ParseError> {
    let value: Value =
        serde_json::from_str(block).map_err(|e| ParseError::new(e.to_string(), block))?;

    let entries = match value {
        Value::Object(entries) => entries,
        other => {
            return Err(ParseError::new(
                format!("expected a JSON object of peers, found {}", kind(&other)),
                block,
            ))
        }
    };

    let mut table = Vec::with_capacity(entries.len());
    for (id, record) in entries {
        match record {
            Value::Object(fields) => table.push((id, fields)),
            other => {
                return Err(ParseError::new(
                    format!("peer {} is {}, expected an object", id, kind(&other)),
                    block,
                ))
            }
        }
    }
    Ok(table)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
