//! Native file envelope parsing.

use std::collections::HashMap;

use log::debug;

use super::error::{FormatError, Result};

/// Fixed ASCII identifier on the first header line.
pub const FILE_ID: &str = "LIFEOGRAPHDB";

/// Header field holding the encryption flag.
const ENCRYPTION_KEY: &str = "E";
/// An encryption flag value starting with this marker means "encrypted".
const YES_VALUE: &str = "y";

/// A blank line terminates the header; everything after it is the body.
const HEADER_DELIM: &[u8] = b"\n\n";

/// The split envelope: header fields plus the untouched body bytes.
///
/// Envelope structure:
/// - First line: the `LIFEOGRAPHDB` magic identifier
/// - Following lines: `KEY VALUE` pairs, single-space-delimited
/// - A blank line terminating the header
/// - Body: plaintext content, or `[salt][iv][ciphertext]` when encrypted
#[derive(Debug)]
pub struct Envelope<'a> {
    pub fields: HashMap<String, String>,
    pub body: &'a [u8],
}

impl Envelope<'_> {
    /// Whether the body is encrypted, per the `E` header field.
    /// An absent field means a plain body.
    pub fn encrypted(&self) -> bool {
        self.fields
            .get(ENCRYPTION_KEY)
            .is_some_and(|value| value.starts_with(YES_VALUE))
    }
}

/// Split raw file bytes into header fields and body.
///
/// Fails with `MalformedHeader` if the blank-line delimiter is missing, the
/// magic identifier is wrong, or a field line has no key/value separator.
pub fn parse(data: &[u8]) -> Result<Envelope<'_>> {
    let (header, body) = split_once_bytes(data, HEADER_DELIM).ok_or_else(|| {
        FormatError::MalformedHeader("missing blank-line header terminator".to_string())
    })?;

    let header = std::str::from_utf8(header)
        .map_err(|_| FormatError::MalformedHeader("header is not valid UTF-8".to_string()))?;

    let mut lines = header.split('\n');
    let file_id = lines.next().unwrap_or_default();
    if file_id != FILE_ID {
        return Err(FormatError::MalformedHeader(format!(
            "expected file identifier {:?}, found {:?}",
            FILE_ID, file_id
        )));
    }

    let mut fields = HashMap::new();
    for line in lines {
        let (key, value) = line.split_once(' ').ok_or_else(|| {
            FormatError::MalformedHeader(format!("header line without value: {:?}", line))
        })?;
        fields.insert(key.to_string(), value.to_string());
    }
    debug!("Header parsed: {} fields, {} body bytes", fields.len(), body.len());

    Ok(Envelope { fields, body })
}

/// Split a byte slice on the first occurrence of `delim`.
fn split_once_bytes<'a>(data: &'a [u8], delim: &[u8]) -> Option<(&'a [u8], &'a [u8])> {
    data.windows(delim.len())
        .position(|window| window == delim)
        .map(|at| (&data[..at], &data[at + delim.len()..]))
}
