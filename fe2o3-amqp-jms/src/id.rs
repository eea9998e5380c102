//! Bidirectional textual codec for the AMQP message-id / correlation-id union.
//!
//! Every encoded id begins with `ID:`. A type tag follows when the native value
//! is not a plain string, so the round trip through a JMS `String` is lossless:
//! `AMQP_UUID:<uuid>`, `AMQP_ULONG:<decimal>`, `AMQP_BINARY:<upper-hex>`, or no
//! tag at all for a plain string id.

use fe2o3_amqp_types::messaging::MessageId;
use serde_amqp::primitives::{Binary, Uuid};

const ID_PREFIX: &str = "ID:";
const TAG_UUID: &str = "AMQP_UUID:";
const TAG_ULONG: &str = "AMQP_ULONG:";
const TAG_BINARY: &str = "AMQP_BINARY:";

/// Failure modes of the id codec. Every one of these is a malformed-id
/// condition, never silently coerced.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdCodecError {
    /// The encoded string did not start with `ID:`.
    #[error("encoded id is missing the required 'ID:' prefix")]
    MissingPrefix,

    /// A recognized tag was followed by nothing.
    #[error("empty payload after id tag")]
    EmptyPayload,

    /// The payload after `AMQP_BINARY:` was not valid, even-length hex.
    #[error("invalid hex payload in AMQP_BINARY id: {0}")]
    InvalidHex(String),

    /// The payload after `AMQP_ULONG:` was not a decimal literal in range.
    #[error("invalid decimal payload in AMQP_ULONG id: {0}")]
    InvalidULong(String),

    /// The payload after `AMQP_UUID:` was not a well-formed UUID.
    #[error("invalid uuid payload in AMQP_UUID id: {0}")]
    InvalidUuid(String),
}

/// Encodes a native AMQP id value into its canonical `ID:`-prefixed JMS string form.
pub fn encode(id: &MessageId) -> String {
    match id {
        MessageId::String(s) => format!("{ID_PREFIX}{s}"),
        MessageId::ULong(v) => format!("{ID_PREFIX}{TAG_ULONG}{v}"),
        MessageId::Uuid(u) => format!("{ID_PREFIX}{TAG_UUID}{}", format_uuid(u)),
        MessageId::Binary(b) => format!("{ID_PREFIX}{TAG_BINARY}{}", hex_upper(b)),
    }
}

/// Decodes a `ID:`-prefixed JMS string back into its native AMQP id value.
///
/// Any parse failure is reported as an [`IdCodecError`], never silently coerced
/// into a plain string.
pub fn decode(s: &str) -> Result<MessageId, IdCodecError> {
    let rest = s.strip_prefix(ID_PREFIX).ok_or(IdCodecError::MissingPrefix)?;

    if let Some(payload) = rest.strip_prefix(TAG_UUID) {
        if payload.is_empty() {
            return Err(IdCodecError::EmptyPayload);
        }
        return Ok(MessageId::Uuid(parse_uuid(payload)?));
    }
    if let Some(payload) = rest.strip_prefix(TAG_ULONG) {
        if payload.is_empty() {
            return Err(IdCodecError::EmptyPayload);
        }
        let v: u64 = payload
            .parse()
            .map_err(|_| IdCodecError::InvalidULong(payload.to_string()))?;
        return Ok(MessageId::ULong(v));
    }
    if let Some(payload) = rest.strip_prefix(TAG_BINARY) {
        if payload.is_empty() {
            return Err(IdCodecError::EmptyPayload);
        }
        return Ok(MessageId::Binary(parse_hex(payload)?));
    }

    Ok(MessageId::String(rest.to_string()))
}

fn hex_upper(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{b:02X}"));
    }
    out
}

fn parse_hex(s: &str) -> Result<Binary, IdCodecError> {
    if s.len() % 2 != 0 {
        return Err(IdCodecError::InvalidHex(s.to_string()));
    }
    let mut out = Vec::with_capacity(s.len() / 2);
    let bytes = s.as_bytes();
    for chunk in bytes.chunks(2) {
        let byte_str = std::str::from_utf8(chunk).map_err(|_| IdCodecError::InvalidHex(s.to_string()))?;
        let byte = u8::from_str_radix(byte_str, 16).map_err(|_| IdCodecError::InvalidHex(s.to_string()))?;
        out.push(byte);
    }
    Ok(Binary::from(out))
}

fn format_uuid(uuid: &Uuid) -> String {
    let bytes = uuid.clone().into_inner();
    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        bytes[6], bytes[7],
        bytes[8], bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
    )
}

fn parse_uuid(s: &str) -> Result<Uuid, IdCodecError> {
    let stripped: String = s.chars().filter(|c| *c != '-').collect();
    if stripped.len() != 32 {
        return Err(IdCodecError::InvalidUuid(s.to_string()));
    }
    let bin = parse_hex(&stripped).map_err(|_| IdCodecError::InvalidUuid(s.to_string()))?;
    Uuid::try_from(bin.as_slice()).map_err(|_| IdCodecError::InvalidUuid(s.to_string()))
}
