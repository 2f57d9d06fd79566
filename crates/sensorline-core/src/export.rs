//! Export — renders [`CanonicalRecord`] values for the downstream sink.
//!
//! Each rendering is a single line without the trailing newline; the caller
//! owns framing.

use crate::config::OutputFormat;
use crate::error::ExportError;
use crate::types::CanonicalRecord;

/// Render `record` in the requested format.
pub fn render(record: &CanonicalRecord, format: OutputFormat) -> Result<String, ExportError> {
    match format {
        OutputFormat::Json => to_json(record),
        OutputFormat::LineProtocol => to_line_protocol(record),
    }
}

/// Compact JSON object with the four canonical fields.
pub fn to_json(record: &CanonicalRecord) -> Result<String, ExportError> {
    Ok(serde_json::to_string(record)?)
}

/// InfluxDB line protocol:
/// `measurement,k=v,... value=<float>,unit="<unit>" <unix-ns>`.
///
/// Tags are written in key order; tags with an empty value are skipped since
/// line protocol cannot carry them. A line break anywhere in the measurement,
/// a tag or the unit is refused: it cannot be escaped and would end the point.
pub fn to_line_protocol(record: &CanonicalRecord) -> Result<String, ExportError> {
    let ns = record
        .timestamp
        .timestamp_nanos_opt()
        .ok_or(ExportError::TimestampOutOfRange(record.timestamp))?;

    reject_line_breaks("measurement", &record.measurement)?;
    reject_line_breaks("unit", &record.payload.unit)?;

    let mut line = escape(&record.measurement, &[',', ' ']);
    for (key, value) in record.tags.iter().filter(|(_, v)| !v.is_empty()) {
        reject_line_breaks("tag key", key)?;
        reject_line_breaks(&format!("tag {key:?}"), value)?;
        line.push(',');
        line.push_str(&escape(key, &[',', '=', ' ']));
        line.push('=');
        line.push_str(&escape(value, &[',', '=', ' ']));
    }
    line.push_str(&format!(
        " value={},unit=\"{}\" {ns}",
        record.payload.value,
        escape(&record.payload.unit, &['"', '\\'])
    ));
    Ok(line)
}

fn reject_line_breaks(field: &str, s: &str) -> Result<(), ExportError> {
    if s.contains(['\n', '\r']) {
        return Err(ExportError::InvalidCharacter { field: field.to_string() });
    }
    Ok(())
}

fn escape(s: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
