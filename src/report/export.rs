//! JSON export of a peer list.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use log::info;

use crate::errors::ReportError;
use crate::peers::PeerView;

/// Write `views` as one pretty-printed JSON array (a complete document).
pub fn write_json<W: Write>(mut writer: W, views: &[PeerView]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, views)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Write `views` to `path`. The file is written next to its destination and
/// renamed into place, so a failed export never leaves a half-written report.
pub fn export_json(path: &Path, views: &[PeerView]) -> Result<(), ReportError> {
    write_atomically(path, views).map_err(|source| ReportError::SinkWriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} peers to {}", views.len(), path.display());
    Ok(())
}

fn write_atomically(path: &Path, views: &[PeerView]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("meshpeers.json");

    let mut counter = 0u32;
    let (tmp_path, tmp) = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => break (candidate, file),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e),
        }
    };

    let written = write_json(io::BufWriter::new(&tmp), views).and_then(|_| tmp.sync_all());
    drop(tmp);
    match written.and_then(|_| fs::rename(&tmp_path, path)) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}
