//! # lifeo-convert
//!
//! A converter for Lifeograph diary databases (the v110 `LIFEOGRAPHDB`
//! on-disk format). Reads both plain and password-encrypted databases and
//! re-encodes the decoded diary as JSON for migration and backup.
//!
//! **Note:** Writing the native format back out is planned but not yet implemented;
//! the native format is currently decode-only.
pub mod lifeo;

// Re-export the main types for convenience
pub use lifeo::{
    convert,
    models::Diary,
    Db110Format,
    Format,
    FormatError,
    JsonFormat,
    Payload,
};
