//! Custom error types for the lifeo-convert crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The file identifier is missing or a header line is unparsable.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// The database is encrypted, but no password was provided to derive the key.
    #[error("Encrypted database requires a password, but none was provided.")]
    PasswordRequired,

    /// Decryption produced an implausible plaintext, almost always a wrong password.
    #[error("Decryption failed: {0}")]
    DecryptionError(String),

    /// A buffer or data region has an unexpected size.
    #[error("Size mismatch for {context}: expected at least {expected} bytes, but found {found} bytes")]
    SizeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// No grammar rule matched a content line. Always fatal: a migration
    /// tool must not silently drop data.
    #[error("Unrecognized line in {block} block: {line:?}")]
    UnrecognizedLine { block: &'static str, line: String },

    /// An owned-chapter line appeared before any chapter category.
    #[error("Chapter {name:?} appears before any chapter category")]
    OrphanChapter { name: String },

    /// An entry referenced a tag or theme name with no prior declaration.
    #[error("Entry references undeclared {kind} {name:?}")]
    UnresolvedReference { kind: &'static str, name: String },

    /// The content is structurally invalid (missing block separator,
    /// non-UTF-8 text, a continuation line with nothing to continue).
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The requested direction is not implemented for this format.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// An error from JSON (de)serialization of the interchange format.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience `Result` type alias using the crate's `FormatError` type.
pub type Result<T> = std::result::Result<T, FormatError>;
