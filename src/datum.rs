use std::{fmt::Display, str::FromStr};

use crate::{
    constants::{GRS80_A, GRS80_F, INTL1924_A, INTL1924_F, WGS84_A, WGS84_F},
    Error,
};

/// Parameters of a reference ellipsoid: the semi-major axis `a` in meters
/// and the flattening `f`. Everything else is derived from those two.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

impl Ellipsoid {
    /// World Geodetic System 1984
    pub const WGS84: Ellipsoid = Ellipsoid::new(WGS84_A, WGS84_F);
    /// Geodetic Reference System 1980, the ellipsoid of ETRS89
    pub const GRS80: Ellipsoid = Ellipsoid::new(GRS80_A, GRS80_F);
    /// International 1924 (Hayford), the ellipsoid of ED50
    pub const INTERNATIONAL_1924: Ellipsoid = Ellipsoid::new(INTL1924_A, INTL1924_F);

    /// Only used for the constants above, all of which satisfy `0 < f < 1`
    const fn new(a: f64, f: f64) -> Ellipsoid {
        Self { a, f }
    }

    /// Semi-major (equatorial) axis in meters.
    #[inline]
    pub fn semi_major_axis(&self) -> f64 {
        self.a
    }

    /// Semi-minor (polar) axis in meters.
    #[inline]
    pub fn semi_minor_axis(&self) -> f64 {
        self.a * (1. - self.f)
    }

    /// Flattening `f = (a - b) / a`.
    #[inline]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// Third flattening `n = (a - b) / (a + b)`, the expansion parameter
    /// of the Krüger series.
    #[inline]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2. - self.f)
    }

    /// First eccentricity squared `e² = f(2 - f)`.
    #[inline]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2. - self.f)
    }

    /// First eccentricity `e`.
    #[inline]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// Second eccentricity squared `e'² = e² / (1 - e²)`.
    ///
    /// # Example
    ///
    /// ```
    /// use utmconvert::Ellipsoid;
    ///
    /// let ep2 = Ellipsoid::WGS84.second_eccentricity_squared();
    /// assert!((ep2 - 0.006_739_496_742_276).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn second_eccentricity_squared(&self) -> f64 {
        let e2 = self.eccentricity_squared();
        e2 / (1. - e2)
    }
}

/// Geodetic datum a UTM coordinate is expressed in. Only the reference
/// ellipsoid of each datum is modelled, no transformation between datums
/// is performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Datum {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "WGS84"))]
    Wgs84,
    #[cfg_attr(feature = "serde", serde(alias = "ETRS89"))]
    Etrs89,
    #[cfg_attr(feature = "serde", serde(alias = "ED50"))]
    Ed50,
}

impl Datum {
    /// Returns the reference ellipsoid of the datum.
    ///
    /// # Example
    ///
    /// ```
    /// use utmconvert::{Datum, Ellipsoid};
    ///
    /// assert_eq!(Datum::Wgs84.ellipsoid(), Ellipsoid::WGS84);
    /// assert_eq!(Datum::Ed50.ellipsoid().semi_major_axis(), 6_378_388.0);
    /// ```
    pub fn ellipsoid(self) -> Ellipsoid {
        match self {
            Datum::Wgs84 => Ellipsoid::WGS84,
            Datum::Etrs89 => Ellipsoid::GRS80,
            Datum::Ed50 => Ellipsoid::INTERNATIONAL_1924,
        }
    }

    /// Geographic EPSG code of the datum.
    pub fn epsg(self) -> u32 {
        match self {
            Datum::Wgs84 => 4326,
            Datum::Etrs89 => 4258,
            Datum::Ed50 => 4230,
        }
    }

    /// Looks up a datum by its geographic EPSG code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDatum`] for any code other than 4326,
    /// 4258 or 4230.
    ///
    /// # Example
    ///
    /// ```
    /// use utmconvert::Datum;
    ///
    /// assert_eq!(Datum::from_epsg(4258).unwrap(), Datum::Etrs89);
    /// assert!(Datum::from_epsg(27700).is_err());
    /// ```
    pub fn from_epsg(code: u32) -> Result<Datum, Error> {
        [Datum::Wgs84, Datum::Etrs89, Datum::Ed50]
            .into_iter()
            .find(|datum| datum.epsg() == code)
            .ok_or_else(|| Error::UnsupportedDatum(format!("EPSG:{code}")))
    }
}

impl FromStr for Datum {
    type Err = Error;

    /// Parses a datum name (`WGS84`, `ETRS89`, `ED50`, case and
    /// separator insensitive) or an `EPSG:<code>` tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_uppercase();

        if let Some(code) = key.strip_prefix("EPSG:") {
            return code
                .parse()
                .map_err(|_| Error::UnsupportedDatum(s.to_string()))
                .and_then(Datum::from_epsg);
        }

        match key.as_str() {
            "WGS84" => Ok(Datum::Wgs84),
            "ETRS89" => Ok(Datum::Etrs89),
            "ED50" => Ok(Datum::Ed50),
            _ => Err(Error::UnsupportedDatum(s.to_string())),
        }
    }
}

impl Display for Datum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Datum::Wgs84 => "WGS84",
            Datum::Etrs89 => "ETRS89",
            Datum::Ed50 => "ED50",
        };
        write!(f, "{name}")
    }
}
