#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{self as nmea0183_stream, FromFields};

/// DPT - Depth of Water
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_dpt_depth_of_water>
///
/// ```text
///         1   2
///         |   |
///  $--DPT,x.x,x.x*hh<CR><LF>
/// ```
///
/// NMEA 3.0:
/// ```text
///        1   2   3
///        |   |   |
/// $--DPT,x.x,x.x,x.x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(exact)]
pub struct DPT {
    /// Water depth relative to transducer in meters
    pub water_depth: Option<f32>,
    /// Offset from transducer in meters,
    /// positive means distance from transducer to water line,
    /// negative means distance from transducer to keel
    pub offset_from_transducer: Option<f32>,
    /// Maximum range scale in used for the measurement in meters
    pub max_range_scale: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fields;

    #[test]
    fn test_dpt_parsing() {
        let cases = [
            ("2.4,0.5", None),
            ("2.4,0.5,100.0", Some(100.0)),
            ("2.4,-0.5,", None),
        ];

        for (input, max_range_scale) in cases {
            let raw: Vec<String> = input.split(',').map(str::to_string).collect();
            let dpt = DPT::from_fields(&mut Fields::new(&raw)).unwrap();
            assert_eq!(dpt.water_depth, Some(2.4));
            assert_eq!(dpt.max_range_scale, max_range_scale, "{input:?}");
        }

        let raw: Vec<String> = "2.4,0.5,100.0,1".split(',').map(str::to_string).collect();
        assert!(DPT::from_fields(&mut Fields::new(&raw)).is_err());
    }
}
