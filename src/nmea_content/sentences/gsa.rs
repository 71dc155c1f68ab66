#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_stream, Fields, FromFields, Result,
    nmea_content::{FixMode, SelectionMode},
};

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                      15 16  17
///         | | |                       | |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,*hh<CR><LF>
/// ```
///
/// NMEA 4.11:
/// ```text
///         1 2 3                      15 16  17  18
///         | | |                       | |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(exact)]
pub struct GSA {
    /// Selection mode
    pub selection_mode: SelectionMode,
    /// Fix mode
    pub fix_mode: FixMode,
    #[nmea(parser(fix_satellites))]
    /// PRN numbers of the satellites used in the fix, up to 12
    pub fix_sats_prn: heapless::Vec<u8, 12>,
    /// Position Dilution of Precision
    pub pdop: Option<f32>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<f32>,
    /// Vertical Dilution of Precision
    pub vdop: Option<f32>,
    /// System ID of the GNSS system used for the fix, NMEA 4.11
    pub system_id: Option<u8>,
}

/// Exactly twelve PRN slots, empty slots are dropped.
fn fix_satellites(fields: &mut Fields<'_>) -> Result<heapless::Vec<u8, 12>> {
    let mut prns = heapless::Vec::new();
    for _ in 0..12 {
        let index = fields.position();
        if fields.peek().is_none() {
            return Err(crate::Error::MissingField { index });
        }
        if let Some(prn) = Option::<u8>::from_fields(fields)? {
            prns.push(prn).map_err(|_| fields.invalid(index))?;
        }
    }
    Ok(prns)
}
