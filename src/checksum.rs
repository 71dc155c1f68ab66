//! # Checksum codec
//!
//! The NMEA 0183 checksum is the XOR of every byte between the `$` start
//! marker and the `*` delimiter, commas included, rendered as two hexadecimal
//! digits after the `*`.

use nom::{
    Parser,
    bytes::complete::take_while_m_n,
    combinator::{all_consuming, map_res},
};

use crate::{Error, Result};

/// Calculates the checksum over raw sentence content.
///
/// `input` is everything between `$` and `*`, excluding both.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::checksum::checksum;
///
/// assert_eq!(checksum(b"GPGGA,123456,data"), 0x41);
/// ```
pub fn checksum(input: &[u8]) -> u8 {
    input
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Calculates the checksum of a sentence from its type id and field list.
///
/// A comma is folded in before every field, so the result is the same as
/// [`checksum`] over `type_id,field1,field2,...`, with empty fields included.
///
/// ```rust
/// use nmea0183_stream::checksum::compute;
///
/// let fields = ["", "T", "", "M", "", ""].map(String::from);
/// assert_eq!(compute("GPBOD", &fields), 0x47);
/// ```
pub fn compute<S: AsRef<str>>(type_id: &str, fields: &[S]) -> u8 {
    fields.iter().fold(checksum(type_id.as_bytes()), |cc, field| {
        cc ^ b',' ^ checksum(field.as_ref().as_bytes())
    })
}

/// Parses the declared checksum found after `*`.
///
/// Exactly two hexadecimal digits are accepted, in either case.
///
/// ```rust
/// use nmea0183_stream::checksum::parse_declared;
///
/// assert_eq!(parse_declared("4f"), Ok(0x4F));
/// assert!(parse_declared("4").is_err());
/// assert!(parse_declared("4G").is_err());
/// ```
pub fn parse_declared(hex: &str) -> Result<u8> {
    all_consuming(map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |digits: &str| u8::from_str_radix(digits, 16),
    ))
    .parse(hex)
    .map(|(_, cc)| cc)
    .map_err(|_: nom::Err<nom::error::Error<&str>>| Error::ChecksumFormat(hex.to_string()))
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// ```rust
/// use nmea0183_stream::checksum::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_matches_raw_checksum() {
        let cases = [
            ("GPGLL", vec!["4916.45", "N", "12311.12", "W", "225444", "A", "A"]),
            ("GPGSV", vec!["1", "1", "00"]),
            ("XXYYY", vec!["1", "2"]),
            ("GPRMC", vec!["", "", "", ""]),
        ];

        for (type_id, fields) in cases {
            let raw = format!("{type_id},{}", fields.join(","));
            assert_eq!(compute(type_id, &fields), checksum(raw.as_bytes()), "{raw}");
        }
    }

    #[test]
    fn test_compute_without_fields() {
        assert_eq!(compute::<&str>("GPGGA", &[]), checksum(b"GPGGA"));
    }

    #[test]
    fn test_known_checksums() {
        assert_eq!(compute("XXYYY", &["1", "2"]), 0x5A);
        assert_eq!(compute("HEHDT", &["274.07", "T"]), 0x19);
        assert_eq!(compute("GPGSV", &["1", "1", "00"]), 0x79);
    }

    #[test]
    fn test_parse_declared() {
        assert_eq!(parse_declared("00"), Ok(0x00));
        assert_eq!(parse_declared("FF"), Ok(0xFF));
        assert_eq!(parse_declared("a5"), Ok(0xA5));

        for bad in ["", "1", "123", "1z", "zz", " 1", "1F43"] {
            assert_eq!(
                parse_declared(bad),
                Err(Error::ChecksumFormat(bad.to_string())),
                "{bad:?}"
            );
        }
    }
}
