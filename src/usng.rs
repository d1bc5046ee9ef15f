use std::fmt::Display;

use crate::{latlon::LatLon, mgrs::Mgrs, utm::Utm, Error, ParseCoord};

/// Representation of a USNG grid reference: the same fields as [`Mgrs`]
/// with single-space separators, e.g. `32U LC 98973 56497`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Usng(pub(crate) String);

impl Usng {
    pub fn new(value: impl Into<String>) -> Usng {
        Usng(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Removes the three separating spaces, yielding the MGRS dialect.
    /// A pure string transform, never a re-encode.
    ///
    /// # Usage
    ///
    /// ```
    /// use gridconvert::Usng;
    ///
    /// let usng = Usng::new("32V NJ 94858 99060");
    /// assert_eq!(usng.to_mgrs().as_str(), "32VNJ9485899060");
    /// ```
    pub fn to_mgrs(&self) -> Mgrs {
        Mgrs::new(self.0.replacen(' ', "", 3))
    }

    /// Decodes into a UTM coordinate plus the accuracy in meters.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Mgrs::to_utm`], evaluated on the de-spaced form.
    pub fn to_utm(&self) -> Result<(Utm, u32), Error> {
        self.to_mgrs().to_utm()
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
}

impl ParseCoord for Usng {
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let usng = Usng::new(value);
        usng.to_utm()?;

        Ok(usng)
    }
}

impl Display for Usng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
