use std::{fmt::Display, str::FromStr};

use crate::{coords::format::{self, DmsFormat}, utility::dms, Error, ParseCoord, ThisOrThat};

/// Which axis a [`Coordinate`] measures. Decides the valid range and the
/// pair of hemispheres a value can fall in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateType {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    Latitude,
    #[cfg_attr(feature = "serde", serde(alias = "lon", alias = "lng"))]
    Longitude,
}

impl CoordinateType {
    /// Largest magnitude in degrees a value of this type may take:
    /// 90 for latitude, 180 for longitude.
    pub fn limit(self) -> f64 {
        match self {
            CoordinateType::Latitude => f64::from(dms::QD),
            CoordinateType::Longitude => f64::from(dms::HD),
        }
    }

    /// Hemisphere for a value of this type with the given sign.
    pub fn hemisphere(self, negative: bool) -> Hemisphere {
        match self {
            CoordinateType::Latitude => negative.ternary(Hemisphere::South, Hemisphere::North),
            CoordinateType::Longitude => negative.ternary(Hemisphere::West, Hemisphere::East),
        }
    }
}

impl Display for CoordinateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateType::Latitude => write!(f, "latitude"),
            CoordinateType::Longitude => write!(f, "longitude"),
        }
    }
}

/// Hemisphere a [`Coordinate`] lies in. Displays as the full English word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// The coordinate type this hemisphere belongs to.
    pub fn coordinate_type(self) -> CoordinateType {
        match self {
            Hemisphere::North | Hemisphere::South => CoordinateType::Latitude,
            Hemisphere::East | Hemisphere::West => CoordinateType::Longitude,
        }
    }

    /// Whether values in this hemisphere carry a negative sign.
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }

    /// Single letter abbreviation.
    pub fn letter(self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }
}

impl Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            Hemisphere::North => "North",
            Hemisphere::South => "South",
            Hemisphere::East => "East",
            Hemisphere::West => "West",
        };
        write!(f, "{word}")
    }
}

impl FromStr for Hemisphere {
    type Err = Error;

    /// Accepts the full word or its initial, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        [Hemisphere::North, Hemisphere::South, Hemisphere::East, Hemisphere::West]
            .into_iter()
            .find(|hemisphere| {
                let mut initial = [0; 4];
                name.eq_ignore_ascii_case(&hemisphere.to_string())
                    || name.eq_ignore_ascii_case(hemisphere.letter().encode_utf8(&mut initial))
            })
            .ok_or_else(|| Error::InvalidDms(format!("Unknown hemisphere {s:?}")))
    }
}

/// Degrees, minutes and seconds of a [`Coordinate`], rounded to a fixed
/// number of second decimals with carries already applied, so `minutes`
/// and `seconds` are always below 60.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl Dms {
    /// Signed decimal degrees of this value.
    ///
    /// # Example
    ///
    /// ```
    /// use utmconvert::{Dms, Hemisphere};
    ///
    /// let dms = Dms { degrees: 33, minutes: 30, seconds: 0.0, hemisphere: Hemisphere::South };
    /// assert_eq!(dms.to_degrees(), -33.5);
    /// ```
    pub fn to_degrees(&self) -> f64 {
        let magnitude = f64::from(self.degrees)
            + f64::from(self.minutes) / f64::from(dms::DM)
            + self.seconds / f64::from(dms::DS);

        self.hemisphere.is_negative().ternary(-magnitude, magnitude)
    }
}

/// A single latitude or longitude in signed decimal degrees. The sign
/// decides the hemisphere: negative latitudes are South, negative
/// longitudes are West, zero is North/East.
///
/// `Display` renders degrees-minutes-seconds as `D° M' S,SSS" H`.
///
/// With the `serde` feature, deserializing goes through
/// [`Coordinate::new`], so out-of-range values are rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCoordinate"))]
pub struct Coordinate {
    degrees: f64,
    coordinate_type: CoordinateType,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCoordinate {
    #[serde(alias = "value")]
    degrees: f64,
    #[serde(alias = "type")]
    coordinate_type: CoordinateType,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for Coordinate {
    type Error = Error;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.degrees, raw.coordinate_type)
    }
}

impl Coordinate {
    /// Tries to create a coordinate of the given type. The value must be
    /// within `[-90, 90]` for latitude or `[-180, 180]` for longitude.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the value is outside the range of
    /// its type or not finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmconvert::{Coordinate, CoordinateType, Hemisphere};
    ///
    /// let lat = Coordinate::new(-33.5, CoordinateType::Latitude).unwrap();
    /// assert_eq!(lat.hemisphere(), Hemisphere::South);
    /// assert_eq!(lat.to_string(), "33° 30' 0,000\" South");
    ///
    /// assert!(Coordinate::new(90.5, CoordinateType::Latitude).is_err());
    /// assert!(Coordinate::new(-180.0, CoordinateType::Longitude).is_ok());
    /// ```
    pub fn new(value: f64, coordinate_type: CoordinateType) -> Result<Coordinate, Error> {
        let limit = coordinate_type.limit();
        if (-limit..=limit).contains(&value) {
            Ok(Self {
                degrees: value,
                coordinate_type,
            })
        } else {
            Err(Error::OutOfRange {
                coord_type: coordinate_type,
                value,
            })
        }
    }

    /// Shorthand for [`Coordinate::new`] with [`CoordinateType::Latitude`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] outside `[-90, 90]`.
    pub fn latitude(value: f64) -> Result<Coordinate, Error> {
        Coordinate::new(value, CoordinateType::Latitude)
    }

    /// Shorthand for [`Coordinate::new`] with [`CoordinateType::Longitude`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] outside `[-180, 180]`.
    pub fn longitude(value: f64) -> Result<Coordinate, Error> {
        Coordinate::new(value, CoordinateType::Longitude)
    }

    /// Builds a coordinate from its DMS parts. The type is taken from the
    /// hemisphere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDms`] if minutes are not below 60 or
    /// seconds not in `[0, 60)`, and [`Error::OutOfRange`] if the total
    /// exceeds the range of the type.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmconvert::{Coordinate, Hemisphere};
    ///
    /// let lon = Coordinate::from_dms(102, 59, 5.634, Hemisphere::West).unwrap();
    /// assert!((lon.degrees() + 102.984_898).abs() < 1e-6);
    /// ```
    pub fn from_dms(degrees: u32, minutes: u32, seconds: f64, hemisphere: Hemisphere) -> Result<Coordinate, Error> {
        if i64::from(minutes) >= i64::from(dms::DM) {
            return Err(Error::InvalidDms(format!("Minutes {minutes} not in range [0, 60)")));
        }
        if !(0_f64..f64::from(dms::MS)).contains(&seconds) {
            return Err(Error::InvalidDms(format!("Seconds {seconds} not in range [0, 60)")));
        }

        let value = Dms { degrees, minutes, seconds, hemisphere }.to_degrees();
        Coordinate::new(value, hemisphere.coordinate_type())
    }

    /// Signed value in decimal degrees.
    ///
    /// # Example
    /// ```
    /// use utmconvert::Coordinate;
    ///
    /// let lat = Coordinate::latitude(56.1852203615381).unwrap();
    /// assert_eq!(lat.degrees(), 56.1852203615381);
    /// ```
    #[inline]
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    /// Signed value in radians.
    ///
    /// # Example
    /// ```
    /// use utmconvert::Coordinate;
    ///
    /// let lon = Coordinate::longitude(-90.0).unwrap();
    /// assert!((lon.radian() + std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    /// ```
    #[inline]
    pub fn radian(&self) -> f64 {
        self.degrees.to_radians()
    }

    #[inline]
    pub fn coordinate_type(&self) -> CoordinateType {
        self.coordinate_type
    }

    /// Whether the value is below zero. `-0.0` counts as non-negative.
    pub fn is_negative(&self) -> bool {
        self.degrees < 0.
    }

    /// Hemisphere the value lies in, consistent with its sign.
    pub fn hemisphere(&self) -> Hemisphere {
        self.coordinate_type.hemisphere(self.is_negative())
    }

    /// DMS parts with seconds rounded to three decimals.
    ///
    /// # Example
    ///
    /// ```
    /// use utmconvert::{Coordinate, Hemisphere};
    ///
    /// let lon = Coordinate::longitude(10.5231905076506).unwrap();
    /// let dms = lon.dms();
    ///
    /// assert_eq!((dms.degrees, dms.minutes), (10, 31));
    /// assert!((dms.seconds - 23.486).abs() < 1e-9);
    /// assert_eq!(dms.hemisphere, Hemisphere::East);
    /// ```
    pub fn dms(&self) -> Dms {
        self.to_dms(DmsFormat::default().precision())
    }

    /// DMS parts with seconds rounded half away from zero to `precision`
    /// decimals (at most 9).
    pub fn to_dms(&self, precision: u8) -> Dms {
        let (degrees, minutes, units, scale) = format::split(self.degrees.abs(), precision);

        #[allow(clippy::cast_precision_loss)]
        let seconds = units as f64 / scale as f64;

        Dms {
            degrees,
            minutes,
            seconds,
            hemisphere: self.hemisphere(),
        }
    }

    /// Renders the value in DMS form using the given format.
    ///
    /// # Example
    ///
    /// ```
    /// use utmconvert::{Coordinate, DmsFormat};
    ///
    /// let lat = Coordinate::latitude(56.1852203615381).unwrap();
    /// let format = DmsFormat::default().with_decimal_separator('.').with_precision(1);
    ///
    /// assert_eq!(lat.to_dms_string(&format), "56° 11' 6.8\" North");
    /// ```
    pub fn to_dms_string(&self, format: &DmsFormat) -> String {
        format.render(self)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", DmsFormat::default().render(self))
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        format::parse(s)
    }
}

impl ParseCoord for Coordinate {
    fn parse_coord(value: &str) -> Result<Self, Error> {
        format::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hemisphere_follows_sign() {
        let cases = [
            (12.5, CoordinateType::Latitude, Hemisphere::North),
            (-12.5, CoordinateType::Latitude, Hemisphere::South),
            (0.0, CoordinateType::Latitude, Hemisphere::North),
            (-0.0, CoordinateType::Latitude, Hemisphere::North),
            (170.0, CoordinateType::Longitude, Hemisphere::East),
            (-0.25, CoordinateType::Longitude, Hemisphere::West),
        ];

        for (value, kind, hemisphere) in cases {
            let coord = Coordinate::new(value, kind).unwrap();
            assert_eq!(coord.hemisphere(), hemisphere);
            assert_eq!(coord.is_negative(), hemisphere.is_negative());
        }
    }

    #[test]
    fn range_is_inclusive() {
        assert!(Coordinate::latitude(90.0).is_ok());
        assert!(Coordinate::latitude(-90.0).is_ok());
        assert!(Coordinate::longitude(180.0).is_ok());
        assert!(Coordinate::longitude(-180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_and_non_finite() {
        for (value, kind) in [
            (90.000_001, CoordinateType::Latitude),
            (-91.0, CoordinateType::Latitude),
            (180.5, CoordinateType::Longitude),
            (f64::NAN, CoordinateType::Longitude),
            (f64::INFINITY, CoordinateType::Latitude),
        ] {
            let err = Coordinate::new(value, kind).unwrap_err();
            assert!(matches!(err, Error::OutOfRange { coord_type, .. } if coord_type == kind));
            assert!(err.is_domain_error());
        }
    }

    #[test]
    fn radian_converts_degrees() {
        let lat = Coordinate::latitude(56.185_220_361_538_1).unwrap();
        assert!((lat.radian() - 56.185_220_361_538_1 * std::f64::consts::PI / 180.).abs() < 1e-15);
    }

    #[test]
    fn from_dms_validates_parts() {
        assert!(matches!(
            Coordinate::from_dms(10, 60, 0.0, Hemisphere::North),
            Err(Error::InvalidDms(_))
        ));
        assert!(matches!(
            Coordinate::from_dms(10, 0, 60.0, Hemisphere::North),
            Err(Error::InvalidDms(_))
        ));
        assert!(matches!(
            Coordinate::from_dms(91, 0, 0.0, Hemisphere::South),
            Err(Error::OutOfRange { .. })
        ));

        let lon = Coordinate::from_dms(0, 30, 0.0, Hemisphere::West).unwrap();
        assert_eq!(lon.coordinate_type(), CoordinateType::Longitude);
        assert!((lon.degrees() + 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn dms_parts_carry() {
        let dms = Coordinate::latitude(-10.999_999_99).unwrap().dms();
        assert_eq!((dms.degrees, dms.minutes), (11, 0));
        assert!(dms.seconds.abs() < f64::EPSILON);
        assert_eq!(dms.hemisphere, Hemisphere::South);
    }

    #[test]
    fn hemisphere_parses_words_and_letters() {
        assert_eq!("north".parse::<Hemisphere>().unwrap(), Hemisphere::North);
        assert_eq!("W".parse::<Hemisphere>().unwrap(), Hemisphere::West);
        assert!("up".parse::<Hemisphere>().is_err());
        assert!("".parse::<Hemisphere>().is_err());
        assert!("No".parse::<Hemisphere>().is_err());
    }

    #[test]
    fn letter_is_the_initial_and_parses_back() {
        for hemisphere in [Hemisphere::North, Hemisphere::South, Hemisphere::East, Hemisphere::West] {
            let letter = hemisphere.letter();
            assert!(hemisphere.to_string().starts_with(letter));
            assert_eq!(letter.to_string().parse::<Hemisphere>().unwrap(), hemisphere);
            assert_eq!(letter.to_ascii_lowercase().to_string().parse::<Hemisphere>().unwrap(), hemisphere);
        }
    }
}
