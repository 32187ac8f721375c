//! Target selector validation for the Meshtastic CLI connection flags

use std::net::IpAddr;

use crate::meshtastic::DeviceTarget;

/// Longest hostname allowed by DNS
const MAX_HOST_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Target validation errors with helpful messages
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("No device given: pass a serial port (e.g. /dev/ttyUSB0) or --host")]
    Missing,

    #[error("Give either a serial port or --host, not both")]
    Ambiguous,

    #[error("Serial port path is empty")]
    EmptyPort,

    #[error("Serial port path contains whitespace or control characters")]
    InvalidPortCharacters,

    #[error("Host is empty")]
    EmptyHost,

    #[error("Host is too long (maximum {max} characters)")]
    HostTooLong { max: usize },

    #[error("Host '{host}' is not a valid IP address or hostname")]
    InvalidHost { host: String },
}

/// Validate a serial device path such as `/dev/ttyUSB0` or `COM3`
pub fn validate_port(port: &str) -> Result<String, TargetError> {
    if port.is_empty() {
        return Err(TargetError::EmptyPort);
    }
    if port.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(TargetError::InvalidPortCharacters);
    }
    Ok(port.to_string())
}

/// Validate an IP literal or DNS hostname, optionally followed by `:port`
pub fn validate_host(host: &str) -> Result<String, TargetError> {
    let trimmed = host.trim();
    if trimmed.is_empty() {
        return Err(TargetError::EmptyHost);
    }
    if trimmed.len() > MAX_HOST_LEN {
        return Err(TargetError::HostTooLong { max: MAX_HOST_LEN });
    }
    if trimmed.parse::<IpAddr>().is_ok() {
        return Ok(trimmed.to_string());
    }
    // Bracketed IPv6 with port: [fe80::1]:4403
    if let Some(rest) = trimmed.strip_prefix('[') {
        if let Some((addr, port)) = rest.split_once("]:") {
            if addr.parse::<IpAddr>().is_ok() && valid_port_number(port) {
                return Ok(trimmed.to_string());
            }
        }
        return Err(invalid(trimmed));
    }

    let name = match trimmed.rsplit_once(':') {
        Some((name, port)) if valid_port_number(port) => name,
        Some(_) => return Err(invalid(trimmed)),
        None => trimmed,
    };
    if name.parse::<IpAddr>().is_ok() || is_hostname(name) {
        Ok(trimmed.to_string())
    } else {
        Err(invalid(trimmed))
    }
}

/// Build a [`DeviceTarget`] from whichever of port / host was supplied.
pub fn resolve_target(port: Option<&str>, host: Option<&str>) -> Result<DeviceTarget, TargetError> {
    match (port, host) {
        (Some(_), Some(_)) => Err(TargetError::Ambiguous),
        (Some(port), None) => validate_port(port).map(DeviceTarget::Serial),
        (None, Some(host)) => validate_host(host).map(DeviceTarget::Host),
        (None, None) => Err(TargetError::Missing),
    }
}

fn invalid(host: &str) -> TargetError {
    TargetError::InvalidHost {
        host: host.to_string(),
    }
}

fn valid_port_number(port: &str) -> bool {
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) && port.parse::<u16>().is_ok()
}

fn is_hostname(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    !name.is_empty()
        && name.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= MAX_LABEL_LEN
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}
