//! The native Lifeograph v110 database format.

use log::info;

use super::crypto;
use super::error::{FormatError, Result};
use super::format::{Format, Payload};
use super::grammar;
use super::header;
use super::models::Diary;

/// Decoder for the `LIFEOGRAPHDB` on-disk format.
///
/// The password is only consulted when the header flags the body as
/// encrypted. Encoding back to the native format is not implemented, so
/// `encode` keeps the default `UnsupportedOperation` behavior.
#[derive(Debug, Default)]
pub struct Db110Format {
    password: Option<String>,
}

impl Db110Format {
    pub fn new(password: Option<String>) -> Self {
        Self { password }
    }
}

impl Format for Db110Format {
    fn decode(&self, data: Payload) -> Result<Diary> {
        let Payload::Bytes(raw) = data else {
            return Err(FormatError::InvalidFormat(
                "native format decodes raw bytes, not a JSON document".to_string(),
            ));
        };

        let envelope = header::parse(&raw)?;
        let content = if envelope.encrypted() {
            let password = self
                .password
                .as_ref()
                .ok_or(FormatError::PasswordRequired)?;
            crypto::decrypt_body(envelope.body, password.as_bytes())?
        } else {
            envelope.body.to_vec()
        };

        let content = String::from_utf8(content)
            .map_err(|_| FormatError::InvalidFormat("content is not valid UTF-8".to_string()))?;

        let diary = grammar::parse_content(&content)?;
        info!(
            "Database decoded: {} entries, encrypted={}",
            diary.entries.len(),
            envelope.encrypted()
        );
        Ok(diary)
    }
}
