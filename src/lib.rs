//! # NMEA 0183 Stream Parser
//!
//! This library turns a byte stream from a positioning or navigation sensor
//! into typed, validated NMEA 0183 messages of the form:
//! `$TTSSS,D1,D2,...,Dn*CC\r\n`
//!
//! The pipeline is split into small pieces that can be used on their own:
//! - [`framer::StreamFramer`] splits raw bytes into lines
//! - [`Sentence::tokenize`] splits a line into type id, fields and checksum
//! - [`TypeRegistry`] maps type ids, or talker-independent wildcards such as
//!   `--GGA`, to the factory building the matching [`MessageBody`]
//! - [`NmeaParser`] ties them together and reassembles sentence groups
//!   (satellites in view, routes) through [`NmeaParser::parse`]
//! - [`device::DeviceEngine`] runs all of the above on a background task
//!   over any [`device::Transport`]
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_stream::{MessageBody, NmeaParser, Parsed};
//!
//! let parser = NmeaParser::default();
//!
//! let Ok(Parsed::New(message)) = parser.parse("$HEHDT,274.07,T*19", None) else {
//!     panic!("parse failed");
//! };
//! assert_eq!(message.type_id(), "HEHDT");
//!
//! match message.body() {
//!     MessageBody::HDT(hdt) => assert_eq!(hdt.heading, Some(274.07)),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! ## Custom sentences
//!
//! Sentence structs implement [`FromFields`], usually through the derive
//! macro, and are registered with a factory:
//!
//! ```rust
//! use nmea0183_stream::{
//!     MessageBody, NmeaParser, OnConflict, Parsed, Result, Sentence, TypeRegistry,
//!     nmea_content::sentences::{HDT, build},
//! };
//!
//! fn heading_as_hdt(sentence: &Sentence) -> Result<MessageBody> {
//!     build::<HDT>(sentence)
//! }
//!
//! let mut registry = TypeRegistry::with_builtin();
//! registry.register("PXHDG", heading_as_hdt, OnConflict::Fail).unwrap();
//!
//! let parser = NmeaParser::builder().registry(registry).build();
//! let Ok(Parsed::New(message)) = parser.parse("$PXHDG,12.5,T", None) else {
//!     panic!("parse failed");
//! };
//! assert!(matches!(message.body(), MessageBody::HDT(_)));
//! ```

pub mod checksum;
#[cfg(feature = "device")]
pub mod device;
pub mod error;
pub mod fields;
pub mod framer;
pub mod message;
pub mod multi_sentence;
pub mod nmea_content;
pub mod parser;
pub mod registry;
pub mod sentence;
pub mod talker;

pub use error::{Error, Result};
pub use fields::{Fields, FromFields};
pub use message::{HasLocation, HasTimestamp, Message, MessageBody};
pub use multi_sentence::MultiSentence;
pub use nmea0183_stream_derive::FromFields;
pub use parser::{NmeaParser, NmeaParserBuilder, Parsed};
pub use registry::{OnConflict, TypeRegistry, VariantDescriptor};
pub use sentence::{ChecksumMode, Sentence};
pub use talker::TalkerId;
