//! Convert between WGS84 latitude/longitude, UTM, MGRS and USNG coordinates.
//!
//! Supported conversions: [`LatLon`] ↔ [`Utm`] ↔ [`Mgrs`] ↔ [`Usng`], plus
//! the chained shortcuts between the geodetic and grid-reference forms. All
//! operations are pure value transformations; invalid input is reported
//! through [`Error`], never panicked on.

#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use thiserror::Error;

pub mod latlon;
pub mod mgrs;
pub mod usng;
pub mod utm;

pub use latlon::LatLon;
pub use mgrs::Mgrs;
pub use usng::Usng;
pub use utm::Utm;

pub(crate) mod projections {
    pub mod transverse_mercator;
}

pub(crate) mod constants;
pub(crate) mod grid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Latitude {0} outside of valid range [-90, 90]")]
    InvalidLatitude(f64),
    #[error("Longitude {0} outside of valid range [-180, 180]")]
    InvalidLongitude(f64),
    #[error("Polar regions below 80°S and above 84°N not supported, lat = {0}")]
    UnsupportedPolarRegion(f64),
    #[error("Invalid zone number in {0:?}")]
    InvalidZoneNumber(String),
    #[error("Zone letter {0:?} not handled")]
    InvalidZoneLetter(char),
    #[error("Grid square column letter {0:?} not valid")]
    InvalidGridLetter(char),
    #[error("Grid square row letter {0:?} not valid")]
    InvalidNorthingLetter(char),
    #[error("Uneven number of easting/northing digits in {0:?}")]
    UnevenDigitCount(String),
    #[error("Non-digit {0:?} in easting/northing digits")]
    InvalidDigit(char),
    #[error("Empty grid reference")]
    EmptyInput,
}

pub trait ParseCoord {
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

/// Parses and validates a grid reference string into a coordinate wrapper.
///
/// # Errors
///
/// Returns the first decode error encountered; see [`Error`].
///
/// # Usage
///
/// ```
/// use gridconvert::{from_str, Mgrs, Usng};
///
/// let mgrs: Mgrs = from_str("32ULC9897356497").unwrap();
/// let usng: Usng = from_str("32U LC 98973 56497").unwrap();
///
/// assert_eq!(mgrs.as_str(), "32ULC9897356497");
/// assert_eq!(usng.as_str(), "32U LC 98973 56497");
///
/// assert!(from_str::<_, Mgrs>("32ULW989564").is_err());
/// ```
pub fn from_str<S, T>(value: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: ParseCoord
{
    T::parse_coord(value.as_ref())
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }
}
