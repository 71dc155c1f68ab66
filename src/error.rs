//! # Error Types
//!
//! This module defines the error type used throughout the parsing pipeline.
//! Device and transport failures have their own types in [`crate::device`].

use thiserror::Error;

/// Holds the result of every parsing, registry and reassembly operation.
pub type Result<T> = core::result::Result<T, Error>;

/// Represents all possible errors that can occur while turning a line of text
/// into a typed [`Message`](crate::Message).
///
/// Errors for a single line are local: the device read loop drops the line and
/// keeps going. Registry errors (`DuplicateType`, `MissingPattern`) are
/// programming errors surfaced at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The line is not a sentence: the `$` start marker or the sentence type is missing.
    #[error("framing error: {0}")]
    Framing(&'static str),

    /// The line contains non-ASCII characters.
    ///
    /// NMEA sentences must be ASCII-only for proper splitting and checksum calculation.
    #[error("sentence contains non-ASCII characters")]
    NonAscii,

    /// The text after `*` is not exactly two hexadecimal digits.
    #[error("malformed checksum `{0}`")]
    ChecksumFormat(String),

    /// The parser requires a checksum and the sentence carries none.
    #[error("sentence has no checksum")]
    MissingChecksum,

    /// The checksum of the sentence was corrupt or incorrect.
    ///
    /// Contains both the checksum calculated from the sentence content and the
    /// one declared after `*`.
    #[error("checksum mismatch: calculated {expected:02X}, declared {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the sentence content
        expected: u8,
        /// The checksum found in the sentence
        found: u8,
    },

    /// A pattern is already bound to a different factory.
    #[error("sentence type `{0}` is already registered")]
    DuplicateType(String),

    /// A variant descriptor was registered without a type pattern.
    #[error("variant descriptor has no type pattern")]
    MissingPattern,

    /// A multi-sentence fragment is malformed or inconsistent with its group.
    #[error("invalid fragment: {0}")]
    InvalidFragment(String),

    /// A required field is empty or absent.
    #[error("field {index} is missing")]
    MissingField {
        /// Zero-based position in the field list
        index: usize,
    },

    /// A field does not conform to the expected format, type or value range.
    #[error("field {index} has invalid value `{value}`")]
    InvalidField {
        /// Zero-based position in the field list
        index: usize,
        /// The offending field text
        value: String,
    },

    /// Fields remain after the last expected one.
    #[error("unexpected trailing field at {index}")]
    TrailingField {
        /// Zero-based position of the first unconsumed field
        index: usize,
    },
}
