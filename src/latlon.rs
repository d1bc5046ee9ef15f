use std::fmt::Display;

use crate::{mgrs::Mgrs, usng::Usng, utm::Utm, Error};

/// Representation of a WGS84 latitude/longitude point. Can be converted
/// to/from [`Utm`], [`Mgrs`] and [`Usng`].
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Tries to create a latitude/longitude point from a lat/lon pair.
    /// First checks if the values are valid:
    /// * Longitude must be in range [-180,180]
    /// * Latitude must be in range [-90,90]
    ///
    /// The checks run in that order; the first failing one determines the
    /// reported error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLongitude`] or [`Error::InvalidLatitude`].
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::LatLon;
    ///
    /// let coord = LatLon::create(51.95, 7.53);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.latitude(), 51.95);
    /// assert_eq!(coord.longitude(), 7.53);
    ///
    /// let invalid_coord_lat = LatLon::create(99.95, 7.53);
    /// assert!(invalid_coord_lat.is_err());
    ///
    /// let invalid_coord_lon = LatLon::create(51.95, 188.53);
    /// assert!(invalid_coord_lon.is_err());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        if !(-180_f64..=180_f64).contains(&lon) {
            return Err(Error::InvalidLongitude(lon));
        }

        if !(-90_f64..=90_f64).contains(&lat) {
            return Err(Error::InvalidLatitude(lat));
        }

        Ok(LatLon::new(lat, lon))
    }

    /// Returns the latitude value.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude value.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Converts from [`Utm`] to [`LatLon`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoneNumber`] if the zone number exceeds 60.
    pub fn from_utm(value: &Utm) -> Result<LatLon, Error> {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`Utm`]. Infallible: the forward
    /// projection accepts any point this type can hold, and positions
    /// outside the letter bands get the sentinel zone letter 'Z'.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::LatLon;
    ///
    /// let coord = LatLon::create(51.95, 7.53).unwrap();
    /// let converted = coord.to_utm();
    ///
    /// assert_eq!(converted.zone_number(), 32);
    /// assert_eq!(converted.zone_letter(), 'U');
    /// assert!((converted.easting() - 398973.96).abs() < 0.01);
    /// assert!((converted.northing() - 5756497.74).abs() < 0.01);
    /// ```
    pub fn to_utm(&self) -> Utm {
        Utm::from_latlon(self)
    }

    /// Converts from [`LatLon`] to [`Mgrs`] with the given accuracy in
    /// meters (1, 10, 100, 1000 or 10000).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPolarRegion`] for latitudes outside the
    /// grid's [-80, 84] band.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::LatLon;
    ///
    /// let coord = LatLon::create(51.95, 7.53).unwrap();
    ///
    /// assert_eq!(coord.to_mgrs(1).unwrap().as_str(), "32ULC9897356497");
    /// assert_eq!(coord.to_mgrs(100).unwrap().as_str(), "32ULC989564");
    /// ```
    pub fn to_mgrs(&self, accuracy: u32) -> Result<Mgrs, Error> {
        self.check_grid_band()?;

        Ok(self.to_utm().to_mgrs(accuracy))
    }

    /// Converts from [`LatLon`] to [`Usng`] with the given accuracy in
    /// meters (1, 10, 100, 1000 or 10000).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPolarRegion`] for latitudes outside the
    /// grid's [-80, 84] band.
    pub fn to_usng(&self, accuracy: u32) -> Result<Usng, Error> {
        self.check_grid_band()?;

        Ok(self.to_utm().to_usng(accuracy))
    }

    // The letter scheme has no bands beyond [-80, 84]
    fn check_grid_band(&self) -> Result<(), Error> {
        if !(-80_f64..=84_f64).contains(&self.latitude) {
            return Err(Error::UnsupportedPolarRegion(self.latitude));
        }

        Ok(())
    }
}

impl Display for LatLon {
    // Latitude then longitude per ISO-6709; six decimals is 0.11 m
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6} {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latlon_to_utm() {
        let tests = [
            ((51.95, 7.53), (32, 'U', 398_973.96, 5_756_497.74)),
            ((52.482728, -1.908445), (30, 'U', 574_125.98, 5_815_290.89)),
            ((-19.887495, -43.932663), (23, 'K', 611_733.14, 7_800_614.37)),
            ((60.0, 4.0), (32, 'V', 221_288.77, 6_661_953.04)),  // Norway 31->32
            ((75.0, 8.0), (31, 'X', 644_293.43, 8_329_692.65)),  // Svalbard 32->31
            ((75.0, 10.0), (33, 'X', 355_706.57, 8_329_692.65)), // Svalbard 32->33
            ((75.0, 22.0), (35, 'X', 355_706.57, 8_329_692.65)), // Svalbard 34->35
            ((75.0, 32.0), (35, 'X', 644_293.43, 8_329_692.65)), // Svalbard 36->35
            ((75.0, 34.0), (37, 'X', 355_706.57, 8_329_692.65)), // Svalbard 36->37
        ];

        for ((lat, lon), (zone_number, zone_letter, easting, northing)) in tests {
            let utm = LatLon::create(lat, lon).unwrap().to_utm();

            assert_eq!(utm.zone_number(), zone_number, "zone number for {lat} {lon}");
            assert_eq!(utm.zone_letter(), zone_letter, "zone letter for {lat} {lon}");
            assert!((utm.easting() - easting).abs() < 0.01, "easting for {lat} {lon}: {}", utm.easting());
            assert!((utm.northing() - northing).abs() < 0.01, "northing for {lat} {lon}: {}", utm.northing());
        }
    }

    #[test]
    fn latlon_to_mgrs() {
        let tests = [
            ((51.95, 7.53), 1, "32ULC9897356497"),
            ((51.95, 7.53), 100, "32ULC989564"),
            ((-19.887495, -43.932663), 1, "23KPU1173300614"),
            ((0.0, -0.592328), 1, "30NYF6799300000"),
        ];

        for ((lat, lon), accuracy, mgrs) in tests {
            let coord = LatLon::create(lat, lon).unwrap();
            assert_eq!(coord.to_mgrs(accuracy).unwrap().as_str(), mgrs, "mgrs for {lat} {lon}");
        }
    }

    #[test]
    fn latlon_to_usng() {
        let coord = LatLon::create(51.95, 7.53).unwrap();
        assert_eq!(coord.to_usng(1).unwrap().as_str(), "32U LC 98973 56497");
    }

    #[test]
    fn validation_order_and_bounds() {
        assert!(matches!(LatLon::create(51.95, 188.53), Err(Error::InvalidLongitude(_))));
        assert!(matches!(LatLon::create(51.95, -188.53), Err(Error::InvalidLongitude(_))));
        assert!(matches!(LatLon::create(99.95, 7.53), Err(Error::InvalidLatitude(_))));
        assert!(matches!(LatLon::create(-99.95, 7.53), Err(Error::InvalidLatitude(_))));
        // Longitude is checked first when both are out of range
        assert!(matches!(LatLon::create(99.95, 188.53), Err(Error::InvalidLongitude(_))));

        // Polar positions are valid geodetic points but have no grid band
        let polar = LatLon::create(88.95, 7.53).unwrap();
        assert!(matches!(polar.to_mgrs(100), Err(Error::UnsupportedPolarRegion(_))));

        let polar = LatLon::create(-88.95, 7.53).unwrap();
        assert!(matches!(polar.to_usng(100), Err(Error::UnsupportedPolarRegion(_))));
    }

    #[test]
    fn display_six_decimals() {
        let coord = LatLon::new(56.366667, 8.616667);
        assert_eq!(coord.to_string(), "56.366667 8.616667");

        let coord = LatLon::new(-19.887498, -43.932664);
        assert_eq!(coord.to_string(), "-19.887498 -43.932664");
    }
}
