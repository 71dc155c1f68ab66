#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_stream, Fields, FromFields, Result,
    nmea_content::{FaaMode, parse::with_unit},
};

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8
///          |  |  |  |  |  |  |  |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K*hh<CR><LF>
/// ```
///
/// NMEA 2.3:
///
/// ```text
///          1  2  3  4  5  6  7  8 9
///          |  |  |  |  |  |  |  | |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(exact)]
pub struct VTG {
    #[nmea(parser(with_unit('T')))]
    /// Course over ground in degrees true
    pub course_over_ground_true: Option<f32>,
    #[nmea(parser(with_unit('M')))]
    /// Course over ground in degrees magnetic
    pub course_over_ground_magnetic: Option<f32>,
    #[nmea(parser(speed_over_ground))]
    /// Speed over ground in knots
    pub speed_over_ground: Option<f32>,
    /// FAA Mode Indicator, NMEA 2.3 and later
    pub faa_mode: Option<FaaMode>,
}

/// Knots, falling back to km/h converted to knots.
fn speed_over_ground(fields: &mut Fields<'_>) -> Result<Option<f32>> {
    let knots = with_unit::<f32>('N')(fields)?;
    let kph = with_unit::<f32>('K')(fields)?;
    Ok(knots.or(kph.map(|kph| kph / 1.852)))
}
