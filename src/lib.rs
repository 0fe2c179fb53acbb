#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! Conversion between geodetic latitude/longitude and
//! [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
//! grid coordinates, with degrees-minutes-seconds rendering of angles.
//!
//! ```
//! use utmconvert::{Utm, UtmHemisphere};
//!
//! let utm = Utm::create(6227738.595, 594538.991, 32).unwrap();
//! assert_eq!(utm.hemisphere(), UtmHemisphere::North);
//! assert_eq!(utm.longitude().to_string(), "10° 31' 23,486\" East");
//!
//! let back = Utm::from_coordinates(&utm.latitude(), &utm.longitude()).unwrap();
//! assert_eq!(back.zone(), 32);
//! assert!((back.easting() - 594538.991).abs() < 1e-6);
//! assert!((back.northing() - 6227738.595).abs() < 1e-6);
//! ```

use thiserror::Error;

pub mod datum;

pub use coords::coordinate::{Coordinate, CoordinateType, Dms, Hemisphere};
pub use coords::format::{DmsFormat, MAX_PRECISION};
pub use coords::utm::{Utm, UtmHemisphere, ZoneSpec};
pub use datum::{Datum, Ellipsoid};

pub(crate) mod coords {
    pub mod coordinate;
    pub mod format;
    pub mod utm;
}

pub(crate) mod projections {
    pub mod transverse_mercator;
}

pub(crate) mod constants;
pub(crate) mod utility;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{} {} outside of valid range [-{}, {}]", .coord_type, .value, .coord_type.limit(), .coord_type.limit())]
    OutOfRange {
        coord_type: CoordinateType,
        value: f64,
    },
    #[error("UTM zone {0} outside of valid range [1, 60]")]
    InvalidZone(i32),
    #[error("UTM coords are invalid: {0}")]
    InvalidUtmCoords(String),
    #[error("Datum {0} is not supported")]
    UnsupportedDatum(String),
    #[error("Expected a {expected} coordinate, got a {found}")]
    CoordinateTypeMismatch {
        expected: CoordinateType,
        found: CoordinateType,
    },
    #[error("DMS string is invalid: {0}")]
    InvalidDms(String),
}

impl Error {
    /// Whether this is a domain error: an angle outside the range of its
    /// type, or a zone outside `[1, 60]`.
    ///
    /// # Example
    ///
    /// ```
    /// use utmconvert::{Coordinate, Utm};
    ///
    /// assert!(Coordinate::latitude(91.0).unwrap_err().is_domain_error());
    /// assert!(Utm::create(0.0, 500000.0, 61).unwrap_err().is_domain_error());
    /// assert!(!"NAD27".parse::<utmconvert::Datum>().unwrap_err().is_domain_error());
    /// ```
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Error::OutOfRange { .. } | Error::InvalidZone(_))
    }
}

pub trait ParseCoord {
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

/// Parses any coordinate type implementing [`ParseCoord`].
///
/// # Errors
///
/// Returns whatever error the target type reports for malformed input.
///
/// # Usage
///
/// ```
/// use utmconvert::Coordinate;
///
/// let coord: Coordinate = utmconvert::from_str("10° 31' 23,486\" East").unwrap();
/// assert!((coord.degrees() - 10.5231905).abs() < 1e-6);
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
    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }

    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T,
    {
        if *self { r#true() } else { r#false() }
    }
}
