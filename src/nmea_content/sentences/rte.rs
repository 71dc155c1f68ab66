#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_stream, Fields, FromFields, MultiSentence, Sentence,
    nmea_content::RouteMode,
};

/// RTE - Routes
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rte_routes>
///
/// ```text
///         1   2   3 4    5           x    n
///         |   |   | |    |           |    |
///  $--RTE,x.x,x.x,a,c--c,c--c, ..... c--c*hh<CR><LF>
/// ```
///
/// Long routes are split over several sentences; waypoints accumulate as the
/// group is reassembled.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
pub struct RTE {
    /// Total number of sentences needed for the full route
    pub total_messages: u8,
    /// Sentence number of the latest RTE message absorbed
    pub message_number: u8,
    /// Complete or working route
    pub mode: RouteMode,
    /// Route identifier
    pub route_id: String,
    #[nmea(parse_as(Vec<Option<String>>), map(|ids| ids.into_iter().flatten().collect()))]
    /// Waypoint identifiers in route order
    pub waypoints: Vec<String>,
}

impl MultiSentence for RTE {
    fn merge_fragment(&mut self, fragment: &Sentence) -> bool {
        let Ok(next) = RTE::from_fields(&mut Fields::new(&fragment.fields)) else {
            return false;
        };

        if next.mode != self.mode || next.route_id != self.route_id {
            return false;
        }

        self.message_number = next.message_number;
        self.waypoints.extend(next.waypoints);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "2,1,c,0,PBRCPK,PBRTO,PTELGR,PPLAND,PYAMBU,PPFAIR,PWARRN,PMORTL,PLISMR";

    fn sentence(input: &str) -> Sentence {
        Sentence::new("GPRTE", input.split(','))
    }

    #[test]
    fn test_rte_parsing() {
        let first = sentence(FIRST);
        let rte = RTE::from_fields(&mut Fields::new(&first.fields)).unwrap();
        assert_eq!(rte.total_messages, 2);
        assert_eq!(rte.mode, RouteMode::Complete);
        assert_eq!(rte.route_id, "0");
        assert_eq!(rte.waypoints.len(), 9);
        assert_eq!(rte.waypoints[0], "PBRCPK");

        let cases = ["2,1,x,0,A", "2,1,c,,A", "2,1,c"];

        for input in cases {
            let raw = sentence(input);
            let result = RTE::from_fields(&mut Fields::new(&raw.fields));
            assert!(result.is_err(), "Failed: {input:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_rte_merge() {
        let first = sentence(FIRST);
        let mut rte = RTE::from_fields(&mut Fields::new(&first.fields)).unwrap();

        assert!(!rte.merge_fragment(&sentence("2,2,w,0,PCRESY")));
        assert!(!rte.merge_fragment(&sentence("2,2,c,1,PCRESY")));

        assert!(rte.merge_fragment(&sentence("2,2,c,0,PCRESY,GRYRIE,GCORIO,GWERR,GWESTG,7FED")));
        assert_eq!(rte.message_number, 2);
        assert_eq!(rte.waypoints.len(), 15);
        assert_eq!(rte.waypoints.last().map(String::as_str), Some("7FED"));
    }
}
