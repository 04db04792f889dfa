//! Writing of the payload JSON file.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use super::payload::{Payload, ANALYSIS_TYPE};
use crate::err::Error;

/// File name for a payload with the given identifier.
pub fn payload_file_name(id: &uuid::Uuid) -> String {
    format!("{}.{}.payload.json", id, ANALYSIS_TYPE)
}

/// Write `payload` as pretty-printed JSON to a uniquely named file in `dir`.
///
/// The JSON is written to a temporary file first and only renamed into place once
/// complete.
pub fn write_payload(payload: &Payload, dir: &Path) -> Result<PathBuf, Error> {
    let path = dir.join(payload_file_name(&uuid::Uuid::new_v4()));
    tracing::info!("Writing payload to {:?}", &path);

    let json = serde_json::to_string_pretty(payload)
        .map_err(|e| Error::io(&path, std::io::Error::from(e)))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(&path).map_err(|e| Error::io(&path, e.error))?;

    Ok(path)
}
