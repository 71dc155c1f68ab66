#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{self as nmea0183_stream, FromFields, HasTimestamp};

/// GST - GPS Pseudorange Noise Statistics
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gst_gps_pseudorange_noise_statistics>
///
/// ```text
///         1         2 3 4 5 6 7 8
///         |         | | | | | | |
///  $--GST,hhmmss.ss,x,x,x,x,x,x,x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(exact)]
pub struct GST {
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    /// RMS value of the standard deviation of the range inputs
    pub rms_deviation: Option<f32>,
    /// Standard deviation of semi-major axis of error ellipse in meters
    pub semi_major_deviation: Option<f32>,
    /// Standard deviation of semi-minor axis of error ellipse in meters
    pub semi_minor_deviation: Option<f32>,
    /// Orientation of semi-major axis of error ellipse in degrees from true north
    pub semi_major_orientation: Option<f32>,
    /// Standard deviation of latitude error in meters
    pub latitude_error: Option<f32>,
    /// Standard deviation of longitude error in meters
    pub longitude_error: Option<f32>,
    /// Standard deviation of altitude error in meters
    pub altitude_error: Option<f32>,
}

impl HasTimestamp for GST {
    fn timestamp(&self) -> Option<time::Time> {
        self.fix_time
    }
}
