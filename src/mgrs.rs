use std::fmt::Display;

use crate::{grid, latlon::LatLon, usng::Usng, utm::Utm, Error, ParseCoord};

/// Representation of an MGRS grid reference: zone number, latitude band
/// letter, 100 km square id and an even run of easting/northing digits,
/// without separators, e.g. `32ULC9897356497`.
///
/// Construction is cheap and unvalidated; every malformed input surfaces
/// as an [`Error`] from [`Mgrs::to_utm`] (or eagerly via
/// [`crate::from_str`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mgrs(pub(crate) String);

impl Mgrs {
    pub fn new(value: impl Into<String>) -> Mgrs {
        Mgrs(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes into a UTM coordinate plus the accuracy in meters implied
    /// by the digit group length (100000 / 10^digits, or 0 when the
    /// reference carries no digits at all).
    ///
    /// # Errors
    ///
    /// Returns the error for the first malformed field: zone number, zone
    /// letter, grid square letters, then the digit groups.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Mgrs;
    ///
    /// let (utm, accuracy) = Mgrs::new("32ULC989564").to_utm().unwrap();
    ///
    /// assert_eq!(accuracy, 100);
    /// assert_eq!(utm.zone_number(), 32);
    /// assert_eq!(utm.zone_letter(), 'U');
    /// assert!((utm.easting() - 398900.).abs() < 1e-9);
    /// assert!((utm.northing() - 5756400.).abs() < 1e-9);
    /// ```
    pub fn to_utm(&self) -> Result<(Utm, u32), Error> {
        decode(&self.0)
    }

    /// Decodes and runs the inverse projection.
    ///
    /// # Errors
    ///
    /// Any decode error, or [`Error::InvalidZoneNumber`] from the inverse
    /// projection for zone numbers above 60.
    pub fn to_latlon(&self) -> Result<(LatLon, u32), Error> {
        let (utm, accuracy) = self.to_utm()?;

        Ok((utm.to_latlon()?, accuracy))
    }

    /// Re-spaces into the USNG dialect: one separator after the zone
    /// designator, one after the square id and one between the digit
    /// groups. A pure string transform; input that doesn't have the MGRS
    /// shape is handed back unchanged.
    pub fn to_usng(&self) -> Usng {
        let value = self.0.as_str();
        let zone_end = value
            .bytes()
            .position(|b| b.is_ascii_alphabetic())
            .map(|index| index + 1);

        match zone_end {
            Some(zone_end) if value.is_ascii() && value.len() >= zone_end + 2 => {
                let (zone, rest) = value.split_at(zone_end);
                let (square, digits) = rest.split_at(2);
                let (east, north) = digits.split_at(digits.len() / 2);

                Usng::new(
                    [zone, square, east, north]
                        .iter()
                        .filter(|part| !part.is_empty())
                        .copied()
                        .collect::<Vec<_>>()
                        .join(" "),
                )
            }
            _ => Usng::new(value),
        }
    }
}

fn decode(value: &str) -> Result<(Utm, u32), Error> {
    if value.is_empty() {
        return Err(Error::EmptyInput);
    }

    let upper = value.to_ascii_uppercase();
    let bytes = upper.as_bytes();

    // Zone number: everything before the first letter, at most two digits
    let mut p = 0;
    while p < bytes.len() && !bytes[p].is_ascii_uppercase() {
        if p >= 2 {
            return Err(Error::InvalidZoneNumber(upper.clone()));
        }
        p += 1;
    }

    // A usable reference is at least <zone><band letter><2-letter square>
    if p == 0 || p + 3 > bytes.len() {
        return Err(Error::InvalidZoneNumber(upper.clone()));
    }

    let zone_number = upper[..p]
        .parse::<u8>()
        .map_err(|_| Error::InvalidZoneNumber(upper.clone()))?;

    let zone_letter = char::from(bytes[p]);
    p += 1;

    if !('C'..='X').contains(&zone_letter) || zone_letter == 'I' || zone_letter == 'O' {
        return Err(Error::InvalidZoneLetter(zone_letter));
    }

    let set = grid::set_for_zone(zone_number);

    let column = bytes[p];
    let row = bytes[p + 1];
    p += 2;

    let east_100k = grid::easting_for_column(column, set)?;
    let mut north_100k = grid::northing_for_row(row, set)?;

    // The row letters repeat every 2,000 km; raise the decoded value into
    // the cycle belonging to the latitude band
    let min_northing = grid::min_northing(zone_letter)?;
    while north_100k < min_northing {
        north_100k += grid::ROW_CYCLE;
    }

    // What's left must split evenly into easting then northing digits
    let remainder = bytes.len() - p;
    if remainder % 2 != 0 {
        return Err(Error::UnevenDigitCount(upper.clone()));
    }

    if let Some(&bad) = bytes[p..].iter().find(|digit| !digit.is_ascii_digit()) {
        return Err(Error::InvalidDigit(char::from(bad)));
    }

    let digits = remainder / 2;
    let mut accuracy = 0.;
    let mut easting = east_100k;
    let mut northing = north_100k;

    if digits > 0 {
        accuracy = grid::SQUARE_SIZE / 10_f64.powi(digits as i32);
        easting += digit_group_value(&bytes[p..p + digits]) * accuracy;
        northing += digit_group_value(&bytes[p + digits..]) * accuracy;
    }

    Ok((
        Utm::new(zone_number, zone_letter, easting, northing),
        accuracy as u32,
    ))
}

fn digit_group_value(group: &[u8]) -> f64 {
    group
        .iter()
        .fold(0., |value, digit| value * 10. + f64::from(digit - b'0'))
}

impl ParseCoord for Mgrs {
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let mgrs = Mgrs::new(value);
        mgrs.to_utm()?;

        Ok(mgrs)
    }
}

impl Display for Mgrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
