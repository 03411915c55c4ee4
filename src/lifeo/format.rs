//! The polymorphic format contract and the conversion driver.

use super::error::{FormatError, Result};
use super::models::Diary;

/// Intermediate shape passed between `parse`/`decode` and `encode`/`dump`.
///
/// The native format works on raw bytes; the interchange format works on a
/// deserialized JSON document.
#[derive(Debug, Clone)]
pub enum Payload {
    Bytes(Vec<u8>),
    Value(serde_json::Value),
}

/// Contract implemented by every concrete diary format.
///
/// All four operations are pure transforms; file and stream I/O stays with
/// the caller. Formats without a write direction keep the default `encode`,
/// which fails with [`FormatError::UnsupportedOperation`].
pub trait Format {
    /// Convert a raw payload into whatever shape `decode` expects.
    fn parse(&self, raw: Vec<u8>) -> Result<Payload> {
        Ok(Payload::Bytes(raw))
    }

    /// Reconstruct a diary from the intermediate payload.
    fn decode(&self, data: Payload) -> Result<Diary>;

    /// Produce the intermediate payload for a diary.
    fn encode(&self, _diary: &Diary) -> Result<Payload> {
        Err(FormatError::UnsupportedOperation(
            "this format is decode-only",
        ))
    }

    /// Serialize the intermediate payload to raw bytes.
    fn dump(&self, data: Payload) -> Result<Vec<u8>> {
        match data {
            Payload::Bytes(bytes) => Ok(bytes),
            Payload::Value(_) => Err(FormatError::InvalidFormat(
                "this format dumps raw bytes, not a JSON document".to_string(),
            )),
        }
    }
}

/// Run the full conversion pipeline between two formats.
pub fn convert(src: &dyn Format, dst: &dyn Format, raw: Vec<u8>) -> Result<Vec<u8>> {
    let diary = src.decode(src.parse(raw)?)?;
    dst.dump(dst.encode(&diary)?)
}
