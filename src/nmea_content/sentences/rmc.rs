#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_stream, FromFields, HasLocation, HasTimestamp,
    nmea_content::{
        FaaMode, Location, Status,
        parse::{location, magnetic_variation},
    },
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 11
///         |         | |       | |        |  |   |   |    |  |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a*hh<CR><LF>
/// ```
///
/// NMEA 2.3:
/// ```text
///         1         2 3       4 5        6  7   8   9    10 1112
///         |         | |       | |        |  |   |   |    |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
/// ```
///
/// NMEA 4.1:
/// ```text
///         1         2 3       4 5        6  7   8   9    10 111213
///         |         | |       | |        |  |   |   |    |  | | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m,s*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(exact)]
pub struct RMC {
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    /// Status Mode Indicator
    pub status: Status,
    #[nmea(parser(location))]
    /// Location (latitude and longitude)
    pub location: Option<Location>,
    /// Speed over ground in knots
    pub speed_over_ground: Option<f32>,
    /// Course over ground in degrees
    pub course_over_ground: Option<f32>,
    /// Fix date in UTC
    pub fix_date: Option<time::Date>,
    #[nmea(parser(magnetic_variation))]
    /// Magnetic variation in degrees
    pub magnetic_variation: Option<f32>,
    /// FAA Mode Indicator, NMEA 2.3 and later
    pub faa_mode: Option<FaaMode>,
    /// Navigation status, NMEA 4.1 and later
    pub nav_status: Option<char>,
}

impl HasTimestamp for RMC {
    fn timestamp(&self) -> Option<time::Time> {
        self.fix_time
    }
}

impl HasLocation for RMC {
    fn location(&self) -> Option<Location> {
        self.location
    }
}

impl RMC {
    /// Fix date and time combined, when both are reported.
    pub fn fix_datetime(&self) -> Option<time::PrimitiveDateTime> {
        Some(time::PrimitiveDateTime::new(self.fix_date?, self.fix_time?))
    }
}
