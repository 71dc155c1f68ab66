//! # Talker identifiers
//!
//! The first two characters of a type id name the subsystem that emitted the
//! sentence.
//!
//! <https://gpsd.gitlab.io/gpsd/NMEA.html#_talker_ids>

macro_rules! talker_table {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $code:literal => $variant:ident, $description:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            /// Vendor specific sentence, prefix `P`
            Proprietary,
            /// Fragments of one group arrived under different talkers
            Multiple,
            /// Prefix not in the table
            Unknown,
        }

        impl $name {
            /// Looks up the talker of a type id. Ids starting with `P` are proprietary.
            pub fn from_type_id(type_id: &str) -> Self {
                if type_id.starts_with('P') {
                    return Self::Proprietary;
                }

                match type_id.get(..2) {
                    $(Some($code) => Self::$variant,)*
                    _ => Self::Unknown,
                }
            }

            /// Two-letter code, `None` for the sentinels.
            pub fn code(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($code),)*
                    _ => None,
                }
            }

            pub fn description(&self) -> &'static str {
                match self {
                    $(Self::$variant => $description,)*
                    Self::Proprietary => "Proprietary",
                    Self::Multiple => "Multiple talkers",
                    Self::Unknown => "Unknown",
                }
            }
        }
    };
}

talker_table! {
    /// Talker ID
    pub enum TalkerId {
        "AG" => Autopilot, "Autopilot - General",
        "AP" => AutopilotMagnetic, "Autopilot - Magnetic",
        "BD" => BeidouLegacy, "BeiDou (China)",
        "CD" => Dsc, "Communications - Digital Selective Calling",
        "EC" => Ecdis, "Electronic Chart Display & Information System",
        "GA" => Galileo, "Galileo Positioning System",
        "GB" => Beidou, "BeiDou (China)",
        "GI" => Navic, "NavIC, IRNSS (India)",
        "GL" => Glonass, "GLONASS, according to IEIC 61162-1",
        "GN" => Gnss, "Combination of multiple satellite systems",
        "GP" => Gps, "Global Positioning System receiver",
        "GQ" => Qzss, "QZSS regional GPS augmentation system (Japan)",
        "HC" => Compass, "Heading - Magnetic Compass",
        "HE" => Gyro, "Heading - North Seeking Gyro",
        "HN" => GyroNonNorthSeeking, "Heading - Non North Seeking Gyro",
        "II" => Integrated, "Integrated Instrumentation",
        "IN" => IntegratedNavigation, "Integrated Navigation",
        "LC" => LoranC, "Loran-C receiver",
        "RA" => Radar, "RADAR and/or ARPA",
        "SD" => DepthSounder, "Depth Sounder",
        "SN" => ElectronicPositioning, "Electronic Positioning System, other/general",
        "TI" => TurnRate, "Turn Rate Indicator",
        "VD" => Doppler, "Velocity Sensor, Doppler, other/general",
        "WI" => Weather, "Weather Instruments",
        "YX" => Transducer, "Transducer",
        "ZA" => AtomicClock, "Timekeeper - Atomic Clock",
        "ZC" => Chronometer, "Timekeeper - Chronometer",
        "ZQ" => QuartzClock, "Timekeeper - Quartz",
        "ZV" => RadioClock, "Timekeeper - Radio Update, WWV or WWVH",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let cases = [
            ("GPGGA", TalkerId::Gps),
            ("GNGSV", TalkerId::Gnss),
            ("GLGSV", TalkerId::Glonass),
            ("BDGSV", TalkerId::BeidouLegacy),
            ("HEHDT", TalkerId::Gyro),
            ("SDDBT", TalkerId::DepthSounder),
            ("PGRME", TalkerId::Proprietary),
            ("XXYYY", TalkerId::Unknown),
            ("G", TalkerId::Unknown),
        ];

        for (type_id, expected) in cases {
            assert_eq!(TalkerId::from_type_id(type_id), expected, "{type_id}");
        }
    }

    #[test]
    fn test_code_and_description() {
        assert_eq!(TalkerId::Gps.code(), Some("GP"));
        assert_eq!(TalkerId::Multiple.code(), None);
        assert_eq!(TalkerId::Proprietary.code(), None);
        assert_eq!(TalkerId::Gnss.description(), "Combination of multiple satellite systems");
        assert_eq!(TalkerId::Multiple.description(), "Multiple talkers");
    }
}
