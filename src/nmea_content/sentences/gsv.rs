use nom::{character::complete::hex_digit1, combinator::map_res};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error, Fields, FromFields, MultiSentence, Result, Sentence, nmea_content::Satellite,
};

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...,x*hh<CR><LF>
/// ```
///
/// One sentence lists at most four satellites; the full list is spread over a
/// group of sentences and accumulated in [`GSV::satellites`] as the group is
/// reassembled.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSV {
    /// Total number of GSV sentences to be transmitted in this group
    pub total_messages: u8,
    /// Sentence number of the latest GSV message absorbed from the current group
    pub message_number: u8,
    /// Total number of satellites in view
    pub satellites_in_view: u8,
    /// Satellite information accumulated so far
    pub satellites: Vec<Satellite>,
    /// Signal ID of the GNSS system used for the fix, NMEA 4.11
    pub signal_id: Option<u8>,
}

impl FromFields for GSV {
    fn from_fields(fields: &mut Fields<'_>) -> Result<Self> {
        let total_messages = u8::from_fields(fields)?;
        let message_number = u8::from_fields(fields)?;
        let satellites_in_view = u8::from_fields(fields)?;

        let mut satellites = Vec::with_capacity(4);
        while fields.remaining() >= 4 {
            let start = fields.position();
            // some receivers pad the last sentence with empty satellite blocks
            if (start..start + 4).all(|index| fields.get(index) == Some("")) {
                fields.skip(4);
                continue;
            }
            satellites.push(Satellite::from_fields(fields)?);
        }

        let signal_id = match fields.peek() {
            Some("") => {
                fields.skip(1);
                None
            }
            Some(_) => Some(fields.parse_with(map_res(hex_digit1, |digits: &str| {
                u8::from_str_radix(digits, 16)
            }))?),
            None => None,
        };

        if !fields.is_exhausted() {
            return Err(Error::TrailingField {
                index: fields.position(),
            });
        }

        Ok(Self {
            total_messages,
            message_number,
            satellites_in_view,
            satellites,
            signal_id,
        })
    }
}

impl MultiSentence for GSV {
    fn merge_fragment(&mut self, fragment: &Sentence) -> bool {
        let Ok(next) = GSV::from_fields(&mut Fields::new(&fragment.fields)) else {
            return false;
        };

        if next.total_messages != self.total_messages
            || next.satellites_in_view != self.satellites_in_view
        {
            return false;
        }

        self.message_number = next.message_number;
        self.satellites.extend(next.satellites);
        self.signal_id = next.signal_id.or(self.signal_id);
        true
    }
}
