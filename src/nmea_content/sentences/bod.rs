#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_stream, FromFields,
    nmea_content::parse::with_unit_or_nan,
};

/// BOD - Bearing - Waypoint to Waypoint
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_bod_bearing_waypoint_to_waypoint>
///
/// ```text
///         1   2 3   4 5    6
///         |   | |   | |    |
///  $--BOD,x.x,T,x.x,M,c--c,c--c*hh<CR><LF>
/// ```
///
/// Bearings that are not reported are NaN.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(exact)]
pub struct BOD {
    #[nmea(parser(with_unit_or_nan('T')))]
    /// Bearing from origin to destination in degrees true
    pub true_bearing: f64,
    #[nmea(parser(with_unit_or_nan('M')))]
    /// Bearing from origin to destination in degrees magnetic
    pub magnetic_bearing: f64,
    /// Destination waypoint ID
    pub destination_id: Option<String>,
    /// Origin waypoint ID
    pub origin_id: Option<String>,
}
