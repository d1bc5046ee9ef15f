use std::fmt::Display;

use crate::{
    constants::{FALSE_EASTING, FALSE_NORTHING},
    grid,
    latlon::LatLon,
    mgrs::Mgrs,
    projections::transverse_mercator::TransverseMercator,
    usng::Usng,
    Error, ThisOrThat,
};

/// Latitude band letters from 80°S to 84°N in 8° steps ('X' spans 12°),
/// which double as the valid zone letters.
const LATITUDE_BANDS: &[u8] = b"CDEFGHJKLMNPQRSTUVWX";

/// Representation of a WGS84
/// [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
/// point. The zone letter is the latitude band of the position; letters
/// below 'N' place the coordinate in the southern hemisphere, where the
/// northing carries a 10,000,000 m false offset.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Utm {
    pub(crate) zone_number: u8,
    pub(crate) zone_letter: char,
    pub(crate) easting: f64,
    pub(crate) northing: f64,
}

impl Utm {
    /// Internal-only constructor that doesn't check the fields; decode
    /// paths may carry a zone number above 60 until the inverse projection
    /// rejects it.
    pub(crate) fn new(zone_number: u8, zone_letter: char, easting: f64, northing: f64) -> Utm {
        Self {
            zone_number,
            zone_letter,
            easting,
            northing,
        }
    }

    /// Tries to create a UTM coordinate from its constituent parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneNumber`] if the zone number is outside
    /// `[1, 60]` and [`Error::InvalidZoneLetter`] if the zone letter is not
    /// a latitude band letter (C..=X minus I and O).
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Utm;
    ///
    /// let coord = Utm::create(32, 'U', 398973.96, 5756497.74);
    /// assert!(coord.is_ok());
    ///
    /// assert!(Utm::create(0, 'U', 398973.96, 5756497.74).is_err());
    /// assert!(Utm::create(61, 'U', 398973.96, 5756497.74).is_err());
    /// assert!(Utm::create(32, 'I', 398973.96, 5756497.74).is_err());
    /// ```
    pub fn create(zone_number: u8, zone_letter: char, easting: f64, northing: f64) -> Result<Utm, Error> {
        if !(1..=60).contains(&zone_number) {
            return Err(Error::InvalidZoneNumber(zone_number.to_string()));
        }

        if !zone_letter.is_ascii_uppercase() || !LATITUDE_BANDS.contains(&(zone_letter as u8)) {
            return Err(Error::InvalidZoneLetter(zone_letter));
        }

        Ok(Utm::new(zone_number, zone_letter, easting, northing))
    }

    pub fn zone_number(&self) -> u8 {
        self.zone_number
    }

    pub fn zone_letter(&self) -> char {
        self.zone_letter
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Converts from [`LatLon`] with the forward projection. The zone is
    /// resolved from the position, including the Norway and Svalbard
    /// overrides; the band letter falls back to the sentinel 'Z' outside
    /// the supported latitudes.
    pub fn from_latlon(value: &LatLon) -> Utm {
        let lat = value.latitude();
        let lon = value.longitude();

        let zone_number = zone_number_for(lat, lon);
        let (x, y) = TransverseMercator::utm().from_latlon(central_meridian(zone_number), lat, lon);

        let easting = x + FALSE_EASTING;
        let northing = (lat < 0.).ternary(y + FALSE_NORTHING, y);

        Utm::new(zone_number, letter_designator(lat), easting, northing)
    }

    /// Converts to [`LatLon`] with the inverse projection. The hemisphere
    /// is taken from the zone letter alone, so a slightly-off band letter
    /// still resolves correctly as long as the hemisphere matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneNumber`] if the zone number exceeds 60.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Utm;
    ///
    /// let coord = Utm::create(32, 'U', 399000., 5757000.).unwrap();
    /// let converted = coord.to_latlon().unwrap();
    ///
    /// assert!((converted.latitude() - 51.954519).abs() < 1e-6);
    /// assert!((converted.longitude() - 7.530231).abs() < 1e-6);
    /// ```
    pub fn to_latlon(&self) -> Result<LatLon, Error> {
        if self.zone_number > 60 {
            return Err(Error::InvalidZoneNumber(self.zone_number.to_string()));
        }

        let x = self.easting - FALSE_EASTING;
        let y = (self.zone_letter < 'N').ternary(self.northing - FALSE_NORTHING, self.northing);

        Ok(TransverseMercator::utm().to_latlon(central_meridian(self.zone_number), x, y))
    }

    /// Converts to an [`Mgrs`] reference with the given accuracy in meters
    /// (1, 10, 100, 1000 or 10000).
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Utm;
    ///
    /// let coord = Utm::create(32, 'U', 398973., 5756497.).unwrap();
    ///
    /// assert_eq!(coord.to_mgrs(1).as_str(), "32ULC9897356497");
    /// assert_eq!(coord.to_mgrs(100).as_str(), "32ULC989564");
    /// ```
    pub fn to_mgrs(&self, accuracy: u32) -> Mgrs {
        Mgrs::new(self.grid_reference(accuracy, ""))
    }

    /// Converts to a [`Usng`] reference with the given accuracy in meters
    /// (1, 10, 100, 1000 or 10000).
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Utm;
    ///
    /// let coord = Utm::create(32, 'V', 594858., 6399060.).unwrap();
    ///
    /// assert_eq!(coord.to_usng(1).as_str(), "32V NJ 94858 99060");
    /// ```
    pub fn to_usng(&self, accuracy: u32) -> Usng {
        Usng::new(self.grid_reference(accuracy, " "))
    }

    // Grid reference string shared by the MGRS and USNG dialects: zone
    // designator, 100 km square id and one digit group per axis, truncated
    // (not rounded) to the digit count for the accuracy.
    fn grid_reference(&self, accuracy: u32, separator: &str) -> String {
        let digits = match accuracy {
            10_000 => 1,
            1_000 => 2,
            100 => 3,
            10 => 4,
            // 1 m, which is also the fallback for unrecognized accuracies
            _ => 5,
        };

        let easting = format!("{:05}", self.easting.floor() as i64);
        let northing = format!("{:05}", self.northing.floor() as i64);
        let east = &easting[easting.len() - 5..][..digits];
        let north = &northing[northing.len() - 5..][..digits];

        let square = grid::square_id(self.easting, self.northing, self.zone_number);

        format!(
            "{}{}{separator}{square}{separator}{east}{separator}{north}",
            self.zone_number, self.zone_letter,
        )
    }
}

pub(crate) fn central_meridian(zone_number: u8) -> f64 {
    6.0 * f64::from(zone_number) - 183.
}

/// UTM zone number for a position. Longitude 180° wraps into zone 60, and
/// the Norway and Svalbard exceptions reassign a handful of northern bands.
pub(crate) fn zone_number_for(lat: f64, lon: f64) -> u8 {
    // Zone 1 covers 180°W..174°W
    let mut zone_number = ((((lon + 180.) / 6.).floor() as u8) + 1).min(60);

    // The Norway exception
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        zone_number = 32;
    }

    // The Svalbard exceptions
    if (72.0..84.0).contains(&lat) {
        if (0.0..9.0).contains(&lon) {
            zone_number = 31;
        } else if (9.0..21.0).contains(&lon) {
            zone_number = 33;
        } else if (21.0..33.0).contains(&lon) {
            zone_number = 35;
        } else if (33.0..42.0).contains(&lon) {
            zone_number = 37;
        }
    }

    zone_number
}

/// Latitude band letter for the zone designator. Returns the sentinel 'Z'
/// outside [-80, 84], which never matches a real band.
pub(crate) fn letter_designator(lat: f64) -> char {
    if !(-80.0..=84.0).contains(&lat) {
        return 'Z';
    }
    if lat >= 72. {
        // 'X' is the one band spanning 12°
        return 'X';
    }

    let band = ((lat + 80.) / 8.).floor() as usize;
    char::from(LATITUDE_BANDS[band])
}

impl Display for Utm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {:.2} {:.2}",
            self.zone_number,
            self.zone_letter,
            self.easting,
            self.northing,
        )
    }
}
