#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{self as nmea0183_stream, FromFields, nmea_content::parse::with_unit};

/// DBT - Depth Below Transducer
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_dbt_depth_below_transducer>
///
/// ```text
///         1   2 3   4 5   6
///         |   | |   | |   |
///  $--DBT,x.x,f,x.x,M,x.x,F*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(exact)]
pub struct DBT {
    #[nmea(parser(with_unit('f')))]
    /// Water depth in feet
    pub depth_feet: Option<f32>,
    #[nmea(parser(with_unit('M')))]
    /// Water depth in meters
    pub water_depth: Option<f32>,
    #[nmea(parser(with_unit('F')))]
    /// Water depth in fathoms
    pub depth_fathoms: Option<f32>,
}
