//! The JSON interchange format.
//!
//! A direct structural mapping: the document's top-level fields mirror the
//! diary's attribute names exactly, with no schema versioning. Decoding is
//! a shallow field copy; missing fields take their defaults. Documents
//! produced by `encode` round-trip through `decode` unchanged.

use super::error::{FormatError, Result};
use super::format::{Format, Payload};
use super::models::Diary;

#[derive(Debug, Default)]
pub struct JsonFormat;

impl JsonFormat {
    fn expect_value(data: Payload) -> Result<serde_json::Value> {
        match data {
            Payload::Value(value) => Ok(value),
            Payload::Bytes(_) => Err(FormatError::InvalidFormat(
                "JSON format works on a parsed document, not raw bytes".to_string(),
            )),
        }
    }
}

impl Format for JsonFormat {
    fn parse(&self, raw: Vec<u8>) -> Result<Payload> {
        Ok(Payload::Value(serde_json::from_slice(&raw)?))
    }

    fn decode(&self, data: Payload) -> Result<Diary> {
        Ok(serde_json::from_value(Self::expect_value(data)?)?)
    }

    fn encode(&self, diary: &Diary) -> Result<Payload> {
        Ok(Payload::Value(serde_json::to_value(diary)?))
    }

    fn dump(&self, data: Payload) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&Self::expect_value(data)?)?)
    }
}
