use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_stream, FromFields, HasLocation, HasTimestamp,
    nmea_content::{
        Location, Quality,
        parse::{location, with_unit},
    },
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(exact)]
pub struct GGA {
    /// Fix time in UTC
    pub fix_time: Option<time::Time>,
    #[nmea(parser(location))]
    /// Location (latitude and longitude)
    pub location: Option<Location>,
    /// GPS Quality Indicator
    pub fix_quality: Quality,
    /// Number of satellites in use
    pub satellite_count: Option<u8>,
    /// Horizontal Dilution of Precision
    pub hdop: Option<f32>,
    #[nmea(parser(with_unit('M')))]
    /// Altitude above/below mean sea level (geoid) in meters
    pub altitude: Option<f32>,
    #[nmea(parser(with_unit('M')))]
    /// Geoidal separation in meters, the difference between the WGS-84 earth ellipsoid and mean sea level (geoid),
    /// negative values indicate that the geoid is below the ellipsoid
    pub geoidal_separation: Option<f32>,
    #[nmea(map(|value| value.map(|sec| Duration::from_millis((sec * 1000.0) as u64))), parse_as(Option<f32>))]
    /// Age of Differential GPS data in seconds, time since last SC104 type 1 or 9 update, null field when DGPS is not used
    pub age_of_dgps: Option<Duration>,
    /// Differential reference station ID
    pub ref_station_id: Option<u16>,
}

impl HasTimestamp for GGA {
    fn timestamp(&self) -> Option<time::Time> {
        self.fix_time
    }
}

impl HasLocation for GGA {
    fn location(&self) -> Option<Location> {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fields;

    fn parse(input: &str) -> crate::Result<GGA> {
        let raw: Vec<String> = input.split(',').map(str::to_string).collect();
        GGA::from_fields(&mut Fields::new(&raw))
    }

    #[test]
    fn test_gga_parsing() {
        let cases = ["", ",", ",,", ",42.0,", ",,69", ",42.0,69"];

        for &input in &cases {
            let i = format!(
                "001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M{}",
                input
            );
            let result = parse(&i);
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }

        let cases = [",42.0,69,1", ",,x", ",abc,"];

        for &input in &cases {
            let i = format!(
                "001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M{}",
                input
            );
            let result = parse(&i);
            assert!(result.is_err(), "Failed: {input:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_gga_values() {
        let gga =
            parse("092725.00,4717.11399,N,00833.91590,E,1,08,1.01,499.6,M,48.0,M,1.5,0042")
                .unwrap();

        assert_eq!(gga.timestamp(), time::Time::from_hms(9, 27, 25).ok());
        let location = gga.location.unwrap();
        assert!((location.latitude - 47.285_233).abs() < 1e-5);
        assert!((location.longitude - 8.565_265).abs() < 1e-5);
        assert_eq!(gga.fix_quality, Quality::GPSFix);
        assert_eq!(gga.satellite_count, Some(8));
        assert_eq!(gga.altitude, Some(499.6));
        assert_eq!(gga.geoidal_separation, Some(48.0));
        assert_eq!(gga.age_of_dgps, Some(Duration::from_millis(1500)));
        assert_eq!(gga.ref_station_id, Some(42));
    }

    #[test]
    fn test_gga_without_fix() {
        let gga = parse(",,,,,0,00,99.99,,,,,,").unwrap();
        assert_eq!(gga.fix_time, None);
        assert_eq!(gga.location, None);
        assert_eq!(gga.fix_quality, Quality::NoFix);
        assert_eq!(gga.altitude, None);
    }
}
