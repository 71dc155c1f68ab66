//! # NMEA 0183 Message Parser
//!
//! Turns one line of text into a [`Message`]: tokenize, validate the checksum,
//! continue a multi-sentence group if the caller passes one in, and otherwise
//! build a new message through the [`TypeRegistry`].
//!
//! The parser is configurable to handle variations in:
//! - Checksum requirements (required or optional)
//! - The set of registered sentence variants

use crate::{ChecksumMode, Error, Message, Result, Sentence, registry::TypeRegistry};

/// Outcome of [`NmeaParser::parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// The sentence was absorbed into the message passed as `previous`.
    Appended,
    /// The sentence produced a new message.
    New(Message),
}

impl Parsed {
    /// The new message, `None` when the sentence was appended.
    pub fn into_new(self) -> Option<Message> {
        match self {
            Self::Appended => None,
            Self::New(message) => Some(message),
        }
    }
}

/// Builder for configuring an [`NmeaParser`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{ChecksumMode, NmeaParserBuilder, Parsed};
///
/// let parser = NmeaParserBuilder::new()
///     .checksum_mode(ChecksumMode::Required)
///     .build();
///
/// assert!(matches!(parser.parse("$GPBOD,,T,,M,,*47", None), Ok(Parsed::New(_))));
/// assert!(parser.parse("$GPBOD,,T,,M,,", None).is_err());
/// ```
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct NmeaParserBuilder {
    checksum_mode: ChecksumMode,
    registry: Option<TypeRegistry>,
}

impl NmeaParserBuilder {
    /// Creates a new parser builder with default settings.
    ///
    /// Checksums are validated when present, and the registry holds every
    /// built-in sentence variant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the checksum validation mode.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Replaces the registry the parser resolves sentence types with.
    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> NmeaParser {
        NmeaParser {
            checksum_mode: self.checksum_mode,
            registry: self.registry.unwrap_or_else(TypeRegistry::with_builtin),
        }
    }
}

/// Stateless line parser; the only state it touches is the message passed in
/// as `previous`.
#[derive(Debug, Clone)]
pub struct NmeaParser {
    checksum_mode: ChecksumMode,
    registry: TypeRegistry,
}

impl Default for NmeaParser {
    fn default() -> Self {
        NmeaParserBuilder::new().build()
    }
}

impl NmeaParser {
    pub fn builder() -> NmeaParserBuilder {
        NmeaParserBuilder::new()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Parses one line.
    ///
    /// When `previous` is a multi-sentence message of the same sentence code and
    /// the line continues its group, the line is absorbed into it and
    /// [`Parsed::Appended`] is returned. Any other line produces a new message;
    /// unregistered sentence types produce [`MessageBody::Unknown`](crate::MessageBody::Unknown).
    ///
    /// ```rust
    /// use nmea0183_stream::{NmeaParser, Parsed};
    ///
    /// let parser = NmeaParser::default();
    /// let mut gsv = parser
    ///     .parse("$GPGSV,2,1,05,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*78", None)
    ///     .unwrap()
    ///     .into_new()
    ///     .unwrap();
    /// assert!(!gsv.is_complete());
    ///
    /// let next = parser.parse("$GPGSV,2,2,05,15,48,082,44*4E", Some(&mut gsv)).unwrap();
    /// assert_eq!(next, Parsed::Appended);
    /// assert!(gsv.is_complete());
    /// ```
    pub fn parse(&self, line: &str, previous: Option<&mut Message>) -> Result<Parsed> {
        let sentence = self.tokenize(line)?;
        self.parse_sentence(&sentence, previous)
    }

    /// Tokenizes one line and validates its checksum.
    ///
    /// A mismatch fails with [`Error::ChecksumMismatch`] carrying the calculated
    /// and the declared value.
    pub fn tokenize(&self, line: &str) -> Result<Sentence> {
        let sentence = Sentence::tokenize(line)?;

        match sentence.checksum {
            Some(declared) => {
                let calculated = sentence.calculated_checksum();
                if declared != calculated {
                    return Err(Error::ChecksumMismatch {
                        expected: calculated,
                        found: declared,
                    });
                }
            }
            None if self.checksum_mode == ChecksumMode::Required => {
                return Err(Error::MissingChecksum);
            }
            None => {}
        }

        Ok(sentence)
    }

    /// Same as [`parse`](Self::parse) for an already validated sentence.
    pub fn parse_sentence(
        &self,
        sentence: &Sentence,
        previous: Option<&mut Message>,
    ) -> Result<Parsed> {
        if let Some(previous) = previous {
            if previous.is_multi_sentence()
                && previous.suffix() == sentence.suffix()
                && previous.try_append(sentence)
            {
                return Ok(Parsed::Appended);
            }
        }

        let message = match self.registry.resolve(&sentence.type_id) {
            Some(factory) => Message::from_sentence(sentence, factory)?,
            None => Message::unknown(sentence),
        };

        Ok(Parsed::New(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MessageBody, TalkerId};

    const GSV_3_1: &str =
        "$GPGSV,3,1,09,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*75";
    const GSV_3_2: &str =
        "$GPGSV,3,2,09,15,48,082,44,18,22,295,40,21,44,139,43,22,45,270,42*7D";
    const GSV_3_3: &str = "$GPGSV,3,3,09,24,35,050,44*45";

    fn parse_new(parser: &NmeaParser, line: &str) -> Message {
        match parser.parse(line, None) {
            Ok(Parsed::New(message)) => message,
            other => panic!("{line}: {other:?}"),
        }
    }

    const WELL_FORMED: [&str; 15] = [
        "$GPGGA,092725.00,4717.11399,N,00833.91590,E,1,08,1.01,499.6,M,48.0,M,,*5B",
        "$GPRMC,083559.00,A,4717.11437,N,00833.91522,E,0.004,77.52,091202,,,A*57",
        "$GPGLL,4916.45,N,12311.12,W,225444,A,A*5C",
        "$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39",
        "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25",
        "$GPZDA,201530.00,04,07,2002,00,00*60",
        "$GPBOD,099.3,T,105.6,M,POINTB,POINTA*45",
        "$SDDBT,7.8,f,2.4,M,1.3,F*0D",
        "$SDDPT,2.4,0.5*54",
        "$HEHDT,274.07,T*19",
        "$GPGST,024603.00,3.2,6.6,4.7,47.3,5.8,5.6,22.0*58",
        "$PGRME,15.0,M,45.0,M,25.0,M*1C",
        "$PGRMZ,246,f,3*1B",
        "$GNGSV,1,1,01,05,45,120,38*5A",
        "$XXYYY,1,2*5A",
    ];

    #[test]
    fn test_well_formed_sentences() {
        let parser = NmeaParser::default();

        for line in WELL_FORMED {
            let message = parse_new(&parser, line);
            let declared = Sentence::tokenize(line).unwrap().checksum;
            assert_eq!(Some(message.checksum()), declared, "{line}");
            assert!(message.is_complete(), "{line}");
        }
    }

    #[test]
    fn test_round_trip() {
        let parser = NmeaParser::default();
        let route = "$GPRTE,2,2,c,0,PCRESY,GRYRIE,GCORIO,GWERR,GWESTG,7FED*34";

        for line in WELL_FORMED.into_iter().chain([route]) {
            let message = parse_new(&parser, line);
            assert_eq!(message.to_wire(), line);

            let reparsed = parse_new(&parser, &message.to_wire());
            assert_eq!(reparsed.body(), message.body(), "{line}");
            assert_eq!(reparsed, message, "{line}");
        }
    }

    #[test]
    fn test_round_trip_with_nan() {
        let parser = NmeaParser::default();
        let message = parse_new(&parser, "$GPBOD,,T,,M,,*47");
        let reparsed = parse_new(&parser, &message.to_wire());

        let (MessageBody::BOD(before), MessageBody::BOD(after)) = (message.body(), reparsed.body())
        else {
            panic!("unexpected bodies {:?}, {:?}", message.body(), reparsed.body());
        };
        assert!(after.true_bearing.is_nan() && before.true_bearing.is_nan());
        assert!(after.magnetic_bearing.is_nan() && before.magnetic_bearing.is_nan());
        assert_eq!(after.destination_id, before.destination_id);
        assert_eq!(after.origin_id, before.origin_id);
        assert_eq!(reparsed.fields(), message.fields());
        assert_eq!(reparsed.checksum(), message.checksum());
    }

    #[test]
    fn test_corrupted_checksum() {
        let parser = NmeaParser::default();
        let cases = [
            ("$GPBOD,,T,,M,,*48", 0x47, 0x48),
            ("$HEHDT,274.07,T*91", 0x19, 0x91),
            ("$XXYYY,1,2*5B", 0x5A, 0x5B),
            ("$GPGSV,3,3,09,24,35,050,45*45", 0x44, 0x45),
        ];

        for (line, expected, found) in cases {
            assert_eq!(
                parser.parse(line, None),
                Err(Error::ChecksumMismatch { expected, found }),
                "{line}"
            );
        }
    }

    #[test]
    fn test_checksum_mode() {
        let optional = NmeaParser::default();
        assert!(optional.parse("$HEHDT,274.07,T", None).is_ok());

        let required = NmeaParser::builder()
            .checksum_mode(ChecksumMode::Required)
            .build();
        assert_eq!(
            required.parse("$HEHDT,274.07,T", None),
            Err(Error::MissingChecksum)
        );
        assert!(required.parse("$HEHDT,274.07,T*19", None).is_ok());
    }

    #[test]
    fn test_framing_errors_propagate() {
        let parser = NmeaParser::default();
        assert_eq!(
            parser.parse("GPBOD,,T,,M,,*47", None),
            Err(Error::Framing("missing start marker"))
        );
        assert_eq!(
            parser.parse("$GPBOD,,T,,M,,*4", None),
            Err(Error::ChecksumFormat("4".to_string()))
        );
    }

    #[test]
    fn test_bod_without_bearings() {
        let parser = NmeaParser::default();
        let message = parse_new(&parser, "$GPBOD,,T,,M,,*47");

        assert_eq!(message.type_id(), "GPBOD");
        assert_eq!(message.talker(), TalkerId::Gps);
        assert_eq!(message.checksum(), 0x47);
        let MessageBody::BOD(bod) = message.body() else {
            panic!("unexpected body {:?}", message.body());
        };
        assert!(bod.true_bearing.is_nan());
        assert!(bod.magnetic_bearing.is_nan());
        assert_eq!(bod.destination_id, None);
        assert_eq!(bod.origin_id, None);
    }

    #[test]
    fn test_unknown_sentence() {
        let parser = NmeaParser::default();
        let message = parse_new(&parser, "$XXYYY,1,2*5A");

        assert_eq!(message.body(), &MessageBody::Unknown);
        assert_eq!(message.type_id(), "XXYYY");
        assert_eq!(message.talker(), TalkerId::Unknown);
        assert_eq!(message.fields(), ["1", "2"]);
        assert_eq!(message.checksum(), 0x5A);
    }

    #[test]
    fn test_invalid_fields_are_errors() {
        let parser = NmeaParser::default();
        let line = "$GPGGA,092725.00,4717.11399,N,00833.91590,E,X,08,1.01,499.6,M,48.0,M,,";
        let result = parser.parse(line, None);
        assert_eq!(
            result,
            Err(Error::InvalidField {
                index: 5,
                value: "X".to_string()
            })
        );
    }

    #[test]
    fn test_multi_sentence_in_order() {
        let parser = NmeaParser::default();
        let mut message = parse_new(&parser, GSV_3_1);
        assert!(message.is_multi_sentence());
        assert!(!message.is_complete());

        assert_eq!(parser.parse(GSV_3_2, Some(&mut message)), Ok(Parsed::Appended));
        assert!(!message.is_complete());

        assert_eq!(parser.parse(GSV_3_3, Some(&mut message)), Ok(Parsed::Appended));
        assert!(message.is_complete());

        let MessageBody::GSV(gsv) = message.body() else {
            panic!("unexpected body {:?}", message.body());
        };
        assert_eq!(gsv.satellites.len(), 9);
        assert_eq!(gsv.message_number, 3);
        assert_eq!(message.checksum(), 0x45);
        assert_eq!(message.to_wire(), GSV_3_3);
    }

    #[test]
    fn test_complete_group_is_not_extended() {
        let parser = NmeaParser::default();
        let mut message = parse_new(&parser, GSV_3_1);
        parser.parse(GSV_3_2, Some(&mut message)).unwrap();
        parser.parse(GSV_3_3, Some(&mut message)).unwrap();
        assert!(message.is_complete());
        let complete = message.clone();

        // fragment 4 of 3 can neither extend the group nor start a new one
        let beyond = parser.parse("$GPGSV,3,4,09,30,10,100,20*46", Some(&mut message));
        assert!(matches!(beyond, Err(Error::InvalidFragment(_))), "{beyond:?}");
        assert_eq!(message, complete);

        // the next cycle starts a new message
        let next = parser.parse(GSV_3_1, Some(&mut message)).unwrap();
        assert!(matches!(next, Parsed::New(ref fresh) if !fresh.is_complete()));
        assert_eq!(message, complete);

        let MessageBody::GSV(gsv) = message.body() else {
            panic!("unexpected body {:?}", message.body());
        };
        assert_eq!(gsv.satellites.len(), 9);
    }

    #[test]
    fn test_single_sentence_group_is_not_extended() {
        let parser = NmeaParser::default();
        let mut message = parse_new(&parser, "$GPGSV,1,1,01,05,45,120,38*44");
        assert!(message.is_complete());

        let beyond = parser.parse("$GPGSV,1,2,01,05,45,120,38*47", Some(&mut message));
        assert!(matches!(beyond, Err(Error::InvalidFragment(_))), "{beyond:?}");
        assert!(message.is_complete());
    }

    #[test]
    fn test_unregistered_proprietary_sentence() {
        let parser = NmeaParser::default();
        let line = "$PGRMC,A,218.8,100,6378137.000,298.257223563,0.0,0.0,0.0,A,,,,1,1*76";
        let message = parse_new(&parser, line);

        assert_eq!(message.body(), &MessageBody::Unknown);
        assert_eq!(message.type_id(), "PGRMC");
        assert_eq!(message.talker(), TalkerId::Proprietary);
        assert_eq!(message.checksum(), 0x76);
    }

    #[test]
    fn test_mismatched_continuation_starts_new_message() {
        let parser = NmeaParser::default();
        let mut first = parse_new(
            &parser,
            "$GPGSV,2,1,09,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*74",
        );

        let second = parser
            .parse(
                "$GPGSV,2,2,08,15,48,082,44,18,22,295,40,21,44,139,43,22,45,270,42*7D",
                Some(&mut first),
            )
            .unwrap();
        let Parsed::New(second) = second else {
            panic!("fragment with another satellite count was appended");
        };

        assert!(!first.is_complete());
        assert!(!second.is_complete());
        assert_ne!(first, second);

        // total count differs from the group in progress
        let third = parser.parse(GSV_3_2, Some(&mut first)).unwrap();
        assert!(matches!(third, Parsed::New(ref message) if !message.is_complete()));
        assert!(!first.is_complete());
    }

    #[test]
    fn test_fragment_out_of_order() {
        let parser = NmeaParser::default();
        let mut message = parse_new(&parser, GSV_3_2);
        assert!(!message.is_complete());

        // the group did not start at 1 and never grows
        let next = parser.parse(GSV_3_3, Some(&mut message)).unwrap();
        assert!(matches!(next, Parsed::New(_)));
        assert!(!message.is_complete());

        // a duplicate fragment is not a continuation either
        let mut message = parse_new(&parser, GSV_3_1);
        assert!(matches!(parser.parse(GSV_3_1, Some(&mut message)), Ok(Parsed::New(_))));
    }

    #[test]
    fn test_previous_of_other_type_is_ignored() {
        let parser = NmeaParser::default();
        let mut previous = parse_new(&parser, "$HEHDT,274.07,T*19");
        let before = previous.clone();

        let parsed = parser.parse(GSV_3_1, Some(&mut previous)).unwrap();
        assert!(matches!(parsed, Parsed::New(_)));
        assert_eq!(previous, before);

        let mut route = parse_new(
            &parser,
            "$GPRTE,2,1,c,0,PBRCPK,PBRTO,PTELGR,PPLAND,PYAMBU,PPFAIR,PWARRN,PMORTL,PLISMR*73",
        );
        let parsed = parser.parse(GSV_3_2, Some(&mut route)).unwrap();
        assert!(matches!(parsed, Parsed::New(_)));
        assert!(!route.is_complete());
    }

    #[test]
    fn test_route_reassembly() {
        let parser = NmeaParser::default();
        let mut route = parse_new(
            &parser,
            "$GPRTE,2,1,c,0,PBRCPK,PBRTO,PTELGR,PPLAND,PYAMBU,PPFAIR,PWARRN,PMORTL,PLISMR*73",
        );

        // working route with the same id is a different message
        let parsed = parser
            .parse(
                "$GPRTE,2,2,w,0,PCRESY,GRYRIE,GCORIO,GWERR,GWESTG,7FED*20",
                Some(&mut route),
            )
            .unwrap();
        assert!(matches!(parsed, Parsed::New(_)));

        let parsed = parser
            .parse(
                "$GPRTE,2,2,c,0,PCRESY,GRYRIE,GCORIO,GWERR,GWESTG,7FED*34",
                Some(&mut route),
            )
            .unwrap();
        assert_eq!(parsed, Parsed::Appended);
        assert!(route.is_complete());

        let MessageBody::RTE(rte) = route.body() else {
            panic!("unexpected body {:?}", route.body());
        };
        assert_eq!(rte.waypoints.len(), 15);
    }

    #[test]
    fn test_mixed_talker_group() {
        let parser = NmeaParser::default();
        let mut message = parse_new(&parser, GSV_3_1);

        let parsed = parser
            .parse(
                "$GLGSV,3,2,09,15,48,082,44,18,22,295,40,21,44,139,43,22,45,270,42*61",
                Some(&mut message),
            )
            .unwrap();
        assert_eq!(parsed, Parsed::Appended);
        assert_eq!(message.talker(), TalkerId::Multiple);
        assert_eq!(message.type_id(), "GPGSV");
    }

    #[test]
    fn test_invalid_first_fragment() {
        let parser = NmeaParser::default();
        assert!(matches!(
            parser.parse("$GPGSV,0,1,00*78", None),
            Err(Error::InvalidFragment(_))
        ));
    }

    #[test]
    fn test_custom_registry() {
        use crate::{OnConflict, TypeRegistry};

        let mut registry = TypeRegistry::new();
        registry
            .register(
                "--HDT",
                crate::nmea_content::sentences::build::<crate::nmea_content::sentences::HDT>,
                OnConflict::Fail,
            )
            .unwrap();
        let parser = NmeaParser::builder().registry(registry).build();

        assert!(matches!(
            parse_new(&parser, "$HEHDT,274.07,T*19").body(),
            MessageBody::HDT(_)
        ));
        assert_eq!(
            parse_new(&parser, "$GPBOD,,T,,M,,*47").body(),
            &MessageBody::Unknown
        );
    }
}
