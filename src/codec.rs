//! Dual-format JSON codec shared by the host and network whitelists.
//!
//! Two encodings are accepted on the wire. The compatibility encoding is a
//! single JSON string holding a comma-separated token list (`""` when
//! empty); the new encoding is a JSON array of strings (`[]` when empty).
//! Output honors the format an ACL was constructed with; input is
//! auto-detected from the outer shape and never consults the instance's
//! format.

use crate::error::{AclError, Result};
use serde::{Deserialize, Serialize};

/// Wire encoding for whitelist state, fixed per instance at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonFormat {
    /// Comma-separated token list inside one JSON string.
    #[default]
    Compatibility,
    /// JSON array of token strings.
    New,
}

/// Encodes a snapshot of entry strings in the requested format.
pub(crate) fn encode(entries: &[String], format: JsonFormat) -> Result<Vec<u8>> {
    let out = match format {
        JsonFormat::Compatibility => serde_json::to_vec(&entries.join(","))?,
        JsonFormat::New => serde_json::to_vec(entries)?,
    };
    Ok(out)
}

/// Decodes raw bytes into entry tokens, detecting the encoding from the
/// first and last non-whitespace bytes.
///
/// Compatibility input is split on commas with empty tokens dropped; new
/// input returns its elements verbatim, so an empty element surfaces later
/// as a parse failure.
pub(crate) fn decode(raw: &[u8]) -> Result<Vec<String>> {
    let trimmed = trim_ascii(raw);
    match (trimmed.first(), trimmed.last()) {
        (Some(&b'['), Some(&b']')) => Ok(serde_json::from_slice::<Vec<String>>(trimmed)?),
        (Some(&b'"'), Some(&b'"')) if trimmed.len() >= 2 => {
            let joined: String = serde_json::from_slice(trimmed)?;
            Ok(split_compat(&joined).map(str::to_string).collect())
        }
        _ => Err(AclError::InvalidEncoding),
    }
}

/// Splits compatibility-format content into trimmed, non-empty tokens.
pub(crate) fn split_compat(content: &str) -> impl Iterator<Item = &str> {
    content.split(',').map(str::trim).filter(|t| !t.is_empty())
}

fn trim_ascii(raw: &[u8]) -> &[u8] {
    let start = raw
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(raw.len());
    let end = raw
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &raw[start..end]
}
