//! Grant-list encoding for the permission store.
//!
//! Every stored value is a CBOR map `{"v": 1, "grants": [...]}` where each
//! grant is `{"Path": text, "Access": uint}`. The version tag is checked
//! before the grants are decoded so a newer layout fails loudly instead of
//! being misread.
//!
//! Values written by earlier deployments are JSON arrays
//! (`[{"Path":"/","Access":3}]`, or `null` for an empty list). Those are
//! still accepted on read; new writes always use the CBOR envelope.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::grant::{Grant, GrantList};

/// Current envelope version.
pub const ENCODING_VERSION: u8 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    v: u8,
    grants: &'a [Grant],
}

#[derive(Deserialize)]
struct VersionTag {
    v: u8,
}

#[derive(Deserialize)]
struct Envelope {
    grants: Vec<Grant>,
}

/// Encode a grant list into its stored form.
pub fn encode_grant_list(grants: &GrantList) -> Result<Bytes> {
    let envelope = EnvelopeRef {
        v: ENCODING_VERSION,
        grants: grants.as_slice(),
    };

    let mut buf = Vec::new();
    ciborium::into_writer(&envelope, &mut buf)
        .map_err(|e| CoreError::EncodingError(e.to_string()))?;
    Ok(Bytes::from(buf))
}

/// Decode a stored grant list, accepting the legacy JSON layout.
pub fn decode_grant_list(bytes: &[u8]) -> Result<GrantList> {
    if is_legacy_json(bytes) {
        return decode_legacy_json(bytes);
    }

    let tag: VersionTag =
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))?;
    if tag.v != ENCODING_VERSION {
        return Err(CoreError::UnsupportedVersion(tag.v));
    }

    let envelope: Envelope =
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))?;
    Ok(GrantList::from(envelope.grants))
}

/// A CBOR envelope always starts with a map header (major type 5), so a
/// leading `[` or `n` can only be JSON.
fn is_legacy_json(bytes: &[u8]) -> bool {
    matches!(
        bytes.iter().find(|b| !b.is_ascii_whitespace()),
        Some(b'[') | Some(b'n')
    )
}

fn decode_legacy_json(bytes: &[u8]) -> Result<GrantList> {
    let grants: Option<Vec<Grant>> =
        serde_json::from_slice(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))?;
    Ok(grants.map(GrantList::from).unwrap_or_default())
}
