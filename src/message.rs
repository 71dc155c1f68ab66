//! # Messages
//!
//! A [`Message`] is the typed result of parsing one sentence, or of a whole
//! multi-sentence group absorbed into the message built from its first
//! fragment. The typed payload is a closed set of variants in
//! [`MessageBody`]; what some of them have in common is exposed through
//! capability traits rather than through the variant tag.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Result, Sentence,
    checksum::compute,
    multi_sentence::{MultiSentence, MultiSentenceState},
    nmea_content::{Location, sentences::*},
    registry::Factory,
    sentence::{render, type_suffix},
    talker::TalkerId,
};

/// Variants reporting the UTC time of their fix or measurement.
pub trait HasTimestamp {
    fn timestamp(&self) -> Option<time::Time>;
}

/// Variants reporting a geographic position.
pub trait HasLocation {
    fn location(&self) -> Option<Location>;
}

/// Typed payload of a [`Message`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    /// Bearing - Origin to Destination
    BOD(BOD),
    /// Depth Below Transducer
    DBT(DBT),
    /// Depth of Water
    DPT(DPT),
    /// Global Positioning System Fix Data
    GGA(GGA),
    /// Geographic Position - Latitude/Longitude
    GLL(GLL),
    /// GPS DOP and active satellites
    GSA(GSA),
    /// GPS Pseudorange Noise Statistics
    GST(GST),
    /// Satellites in View
    GSV(GSV),
    /// Heading - True
    HDT(HDT),
    /// Recommended Minimum Navigation Information
    RMC(RMC),
    /// Routes
    RTE(RTE),
    /// Track made good and Ground speed
    VTG(VTG),
    /// Time & Date - UTC, day, month, year and local time zone
    ZDA(ZDA),
    /// Garmin Estimated Error Information
    PGRME(PGRME),
    /// Garmin Altitude Information
    PGRMZ(PGRMZ),
    /// Well-framed sentence of a type nobody registered.
    ///
    /// The raw fields stay available through [`Message::fields`].
    Unknown,
}

macro_rules! impl_from_variant {
    ($($variant:ident),*) => ($(
        impl From<$variant> for MessageBody {
            fn from(value: $variant) -> Self {
                Self::$variant(value)
            }
        }
    )*)
}

impl_from_variant!(BOD, DBT, DPT, GGA, GLL, GSA, GST, GSV, HDT, RMC, RTE, VTG, ZDA, PGRME, PGRMZ);

impl MessageBody {
    pub fn as_multi_sentence(&self) -> Option<&dyn MultiSentence> {
        match self {
            Self::GSV(gsv) => Some(gsv),
            Self::RTE(rte) => Some(rte),
            _ => None,
        }
    }

    pub fn as_multi_sentence_mut(&mut self) -> Option<&mut dyn MultiSentence> {
        match self {
            Self::GSV(gsv) => Some(gsv),
            Self::RTE(rte) => Some(rte),
            _ => None,
        }
    }

    pub fn as_timestamped(&self) -> Option<&dyn HasTimestamp> {
        match self {
            Self::GGA(gga) => Some(gga),
            Self::GLL(gll) => Some(gll),
            Self::GST(gst) => Some(gst),
            Self::RMC(rmc) => Some(rmc),
            Self::ZDA(zda) => Some(zda),
            _ => None,
        }
    }

    pub fn as_located(&self) -> Option<&dyn HasLocation> {
        match self {
            Self::GGA(gga) => Some(gga),
            Self::GLL(gll) => Some(gll),
            Self::RMC(rmc) => Some(rmc),
            _ => None,
        }
    }
}

/// One parsed message.
///
/// `fields` and `checksum` describe the most recent sentence absorbed into the
/// message; the checksum is always recomputed from them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    type_id: String,
    talker: TalkerId,
    checksum: u8,
    fields: Vec<String>,
    body: MessageBody,
    fragments: Option<MultiSentenceState>,
}

impl Message {
    /// Builds a message with `factory`.
    ///
    /// Multi-sentence variants start tracking their group here and fail with
    /// [`Error::InvalidFragment`](crate::Error::InvalidFragment) when the
    /// first fragment's counters are unusable.
    pub fn from_sentence(sentence: &Sentence, factory: Factory) -> Result<Self> {
        let body = factory(sentence)?;
        let fragments = body
            .as_multi_sentence()
            .map(|multi| MultiSentenceState::start(sentence, multi.layout()))
            .transpose()?;

        Ok(Self {
            type_id: sentence.type_id.clone(),
            talker: TalkerId::from_type_id(&sentence.type_id),
            checksum: sentence.calculated_checksum(),
            fields: sentence.fields.clone(),
            body,
            fragments,
        })
    }

    /// Builds the fallback message for an unregistered type id.
    pub fn unknown(sentence: &Sentence) -> Self {
        Self {
            type_id: sentence.type_id.clone(),
            talker: TalkerId::from_type_id(&sentence.type_id),
            checksum: sentence.calculated_checksum(),
            fields: sentence.fields.clone(),
            body: MessageBody::Unknown,
            fragments: None,
        }
    }

    /// Tries to absorb the next fragment of a multi-sentence group.
    ///
    /// Returns `false`, leaving the message untouched, when this message is not
    /// multi-sentence or already complete, the sentence is of another type, the
    /// sequence does not continue, or the variant finds the fragment content
    /// inconsistent.
    pub fn try_append(&mut self, sentence: &Sentence) -> bool {
        let Some(state) = self.fragments.as_ref() else {
            return false;
        };
        if self.suffix() != sentence.suffix() {
            return false;
        }

        let Ok((count, index)) = state.layout().read(&sentence.fields) else {
            return false;
        };
        if !state.accepts(count, index) {
            return false;
        }

        let Some(body) = self.body.as_multi_sentence_mut() else {
            return false;
        };
        if !body.merge_fragment(sentence) {
            return false;
        }

        if let Some(state) = self.fragments.as_mut() {
            state.advance(index, TalkerId::from_type_id(&sentence.type_id));
            self.talker = state.talker();
        }
        self.fields.clone_from(&sentence.fields);
        self.checksum = compute(&self.type_id, &self.fields);

        true
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Sentence code without talker, e.g. `GSV`.
    pub fn suffix(&self) -> &str {
        type_suffix(&self.type_id)
    }

    pub fn talker(&self) -> TalkerId {
        self.talker
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Raw fields of the latest sentence absorbed into this message.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    pub fn into_body(self) -> MessageBody {
        self.body
    }

    /// Group bookkeeping, for multi-sentence messages only.
    pub fn fragments(&self) -> Option<&MultiSentenceState> {
        self.fragments.as_ref()
    }

    pub fn is_multi_sentence(&self) -> bool {
        self.fragments.is_some()
    }

    /// Whether the message has all of its payload.
    ///
    /// Single-sentence messages are always complete; a multi-sentence message
    /// is complete once fragments 1 to N have all been absorbed in order.
    pub fn is_complete(&self) -> bool {
        self.fragments
            .as_ref()
            .is_none_or(MultiSentenceState::is_complete)
    }

    pub fn timestamp(&self) -> Option<time::Time> {
        self.body.as_timestamped().and_then(|body| body.timestamp())
    }

    pub fn location(&self) -> Option<Location> {
        self.body.as_located().and_then(|body| body.location())
    }

    /// Renders the latest sentence back to wire form, `$TYPE,F1,...,Fn*CC`.
    pub fn to_wire(&self) -> String {
        render(&self.type_id, &self.fields)
    }
}
