use log::{debug, warn};

use crate::{
    constants::{UTM_FALSE_EASTING, UTM_FALSE_NORTHING_S, UTM_MAX_NORTHING_N},
    coords::coordinate::{Coordinate, CoordinateType},
    datum::Datum,
    projections::transverse_mercator::TransverseMercator,
    utility::{dms, GeoMath},
    Error, ThisOrThat,
};

pub(crate) mod zonespec {
    pub(crate) const MINUTMZONE: i32 = 1;
    pub(crate) const MAXUTMZONE: i32 = 60;
}

const LATBAND: &[u8] = b"CDEFGHJKLMNPQRSTUVWX";
// Latitude limits of the UTM grid proper
const MIN_UTM_LAT: f64 = -80.;
const MAX_UTM_LAT: f64 = 84.;

/// Hemisphere label of a [`Utm`] coordinate. Selects whether the southern
/// false northing of 10 000 000 m applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UtmHemisphere {
    #[default]
    North,
    South,
}

impl UtmHemisphere {
    /// Hemisphere by convention for a bare northing: values beyond the
    /// northern grid limit of 9 500 000 m can only be southern.
    ///
    /// # Example
    ///
    /// ```
    /// use utmconvert::UtmHemisphere;
    ///
    /// assert_eq!(UtmHemisphere::infer(6_227_738.595), UtmHemisphere::North);
    /// assert_eq!(UtmHemisphere::infer(9_700_000.0), UtmHemisphere::South);
    /// ```
    pub fn infer(northing: f64) -> UtmHemisphere {
        (northing > UTM_MAX_NORTHING_N).ternary(UtmHemisphere::South, UtmHemisphere::North)
    }

    pub fn is_north(self) -> bool {
        self == UtmHemisphere::North
    }

    fn false_northing(self) -> f64 {
        self.is_north().ternary(0., UTM_FALSE_NORTHING_S)
    }
}

impl std::fmt::Display for UtmHemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.is_north().ternary("North", "South"))
    }
}

/// How the zone of a forward projection is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneSpec {
    /// `floor((lon + 180) / 6) + 1`, with 180° wrapping to zone 1.
    #[default]
    Arithmetic,
    /// The arithmetic zone, plus the Norway and Svalbard exceptions.
    Standard,
    /// Always project into this zone.
    Fixed(i32),
}

impl ZoneSpec {
    fn resolve(self, lat: f64, lon: f64) -> Result<i32, Error> {
        match self {
            ZoneSpec::Arithmetic => Ok(arithmetic_zone(lon)),
            ZoneSpec::Standard => Ok(standard_zone(lat, lon)),
            ZoneSpec::Fixed(zone) => check_zone(zone).map(|()| zone),
        }
    }
}

/// Representation of a
/// [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
/// point together with its geographic position.
///
/// The latitude and longitude are worked out once, when the value is
/// constructed. The hemisphere label can be reassigned afterwards with
/// [`Utm::set_hemisphere`]; that only changes the label and never
/// recomputes the position. Build a new value with [`Utm::create_with`]
/// to convert under another hemisphere.
///
/// `Utm` is a plain value. Sharing one between threads while calling
/// `set_hemisphere` needs the caller's own synchronization.
///
/// With the `serde` feature, deserializing checks the zone, the
/// finiteness of easting and northing, and the type of each cached
/// coordinate. The cached position is taken as given.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawUtm"))]
pub struct Utm {
    zone: i32,
    hemisphere: UtmHemisphere,
    easting: f64,
    northing: f64,
    datum: Datum,
    latitude: Coordinate,
    longitude: Coordinate,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawUtm {
    zone: i32,
    #[serde(alias = "north", alias = "is_north")]
    hemisphere: UtmHemisphere,
    easting: f64,
    northing: f64,
    #[serde(default)]
    datum: Datum,
    latitude: Coordinate,
    longitude: Coordinate,
}

#[cfg(feature = "serde")]
impl TryFrom<RawUtm> for Utm {
    type Error = Error;

    fn try_from(raw: RawUtm) -> Result<Self, Self::Error> {
        check_zone(raw.zone)?;
        if !raw.easting.is_finite() || !raw.northing.is_finite() {
            return Err(Error::InvalidUtmCoords(format!(
                "Easting {} and northing {} must be finite",
                raw.easting, raw.northing
            )));
        }
        expect_type(&raw.latitude, CoordinateType::Latitude)?;
        expect_type(&raw.longitude, CoordinateType::Longitude)?;

        Ok(Utm {
            zone: raw.zone,
            hemisphere: raw.hemisphere,
            easting: raw.easting,
            northing: raw.northing,
            datum: raw.datum,
            latitude: raw.latitude,
            longitude: raw.longitude,
        })
    }
}

impl Utm {
    /// Projects a latitude/longitude pair on WGS84 into its arithmetic
    /// UTM zone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateTypeMismatch`] if `lat` is not a
    /// latitude or `lng` is not a longitude.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmconvert::{Coordinate, Utm, UtmHemisphere};
    ///
    /// let lat = Coordinate::latitude(40.748333).unwrap();
    /// let lng = Coordinate::longitude(-73.985278).unwrap();
    ///
    /// let utm = Utm::from_coordinates(&lat, &lng).unwrap();
    ///
    /// assert_eq!(utm.zone(), 18);
    /// assert_eq!(utm.hemisphere(), UtmHemisphere::North);
    /// assert!((utm.easting() - 585664.121).abs() < 1e-2);
    /// assert!((utm.northing() - 4511315.422).abs() < 1e-2);
    /// ```
    pub fn from_coordinates(lat: &Coordinate, lng: &Coordinate) -> Result<Utm, Error> {
        Utm::project(lat, lng, Datum::default(), ZoneSpec::default())
    }

    /// Projects a latitude/longitude pair on the ellipsoid of `datum`,
    /// choosing the zone as `zone` says. The hemisphere follows the sign
    /// of the latitude, and the given coordinates are kept as the
    /// position of the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateTypeMismatch`] for swapped or mistyped
    /// arguments and [`Error::InvalidZone`] for a fixed zone outside
    /// `[1, 60]`.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmconvert::{Coordinate, Datum, Utm, UtmHemisphere, ZoneSpec};
    ///
    /// let lat = Coordinate::latitude(-33.9249).unwrap();
    /// let lng = Coordinate::longitude(18.4241).unwrap();
    ///
    /// let utm = Utm::project(&lat, &lng, Datum::Wgs84, ZoneSpec::Arithmetic).unwrap();
    ///
    /// assert_eq!(utm.zone(), 34);
    /// assert_eq!(utm.hemisphere(), UtmHemisphere::South);
    /// assert!((utm.easting() - 261881.599).abs() < 1e-2);
    /// assert!((utm.northing() - 6243182.355).abs() < 1e-2);
    /// ```
    pub fn project(lat: &Coordinate, lng: &Coordinate, datum: Datum, zone: ZoneSpec) -> Result<Utm, Error> {
        expect_type(lat, CoordinateType::Latitude)?;
        expect_type(lng, CoordinateType::Longitude)?;

        let zone = zone.resolve(lat.degrees(), lng.degrees())?;

        if !(MIN_UTM_LAT..=MAX_UTM_LAT).contains(&lat.degrees()) {
            warn!(
                "Latitude {} is outside the UTM limits [{MIN_UTM_LAT}, {MAX_UTM_LAT}], distortion will be large",
                lat.degrees()
            );
        }

        let hemisphere = lat.is_negative().ternary(UtmHemisphere::South, UtmHemisphere::North);

        let (x, y) = TransverseMercator::utm(datum)
            .forward(central_meridian(zone), lat.degrees(), lng.degrees());

        let utm = Utm {
            zone,
            hemisphere,
            easting: x + UTM_FALSE_EASTING,
            northing: y + hemisphere.false_northing(),
            datum,
            latitude: *lat,
            longitude: *lng,
        };

        debug!("Projected ({}, {}) on {datum} to {utm}", lat.degrees(), lng.degrees());

        Ok(utm)
    }

    /// Converts a WGS84 UTM position to latitude/longitude. The hemisphere
    /// is inferred from the northing with [`UtmHemisphere::infer`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZone`] if the zone is outside `[1, 60]` and
    /// [`Error::InvalidUtmCoords`] if easting or northing are not finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmconvert::{Datum, Utm, UtmHemisphere};
    ///
    /// let utm = Utm::create(6227738.595, 594538.991, 32).unwrap();
    ///
    /// assert_eq!(utm.datum(), Datum::Wgs84);
    /// assert_eq!(utm.hemisphere(), UtmHemisphere::North);
    /// assert!((utm.latitude().degrees() - 56.1852203615381).abs() < 1e-5);
    /// assert_eq!(utm.longitude().to_string(), "10° 31' 23,486\" East");
    ///
    /// assert!(Utm::create(6227738.595, 594538.991, 0).is_err());
    /// assert!(Utm::create(6227738.595, 594538.991, 61).is_err());
    /// ```
    pub fn create(northing: f64, easting: f64, zone: i32) -> Result<Utm, Error> {
        Utm::create_with(northing, easting, zone, UtmHemisphere::infer(northing), Datum::default())
    }

    /// Converts a UTM position with an explicit hemisphere and datum to
    /// latitude/longitude.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZone`] if the zone is outside `[1, 60]` and
    /// [`Error::InvalidUtmCoords`] if easting or northing are not finite
    /// or do not map to a position.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmconvert::{Datum, Utm, UtmHemisphere};
    ///
    /// let utm = Utm::create_with(6243182.355, 261881.599, 34, UtmHemisphere::South, Datum::Wgs84).unwrap();
    ///
    /// assert!((utm.latitude().degrees() + 33.9249).abs() < 1e-7);
    /// assert!((utm.longitude().degrees() - 18.4241).abs() < 1e-7);
    /// ```
    pub fn create_with(
        northing: f64,
        easting: f64,
        zone: i32,
        hemisphere: UtmHemisphere,
        datum: Datum,
    ) -> Result<Utm, Error> {
        check_zone(zone)?;

        if !easting.is_finite() || !northing.is_finite() {
            return Err(Error::InvalidUtmCoords(format!(
                "Easting {easting} and northing {northing} must be finite"
            )));
        }

        let x = easting - UTM_FALSE_EASTING;
        let y = northing - hemisphere.false_northing();

        let (lat, lon) = TransverseMercator::utm(datum).reverse(central_meridian(zone), x, y);

        let position = |value, kind| {
            Coordinate::new(value, kind).map_err(|_| {
                Error::InvalidUtmCoords(format!(
                    "Easting {easting} and northing {northing} in zone {zone}{} do not map to a position",
                    hemisphere.is_north().ternary("N", "S"),
                ))
            })
        };

        let utm = Utm {
            zone,
            hemisphere,
            easting,
            northing,
            datum,
            latitude: position(lat, CoordinateType::Latitude)?,
            longitude: position(lon, CoordinateType::Longitude)?,
        };

        debug!("Converted {utm} on {datum} to ({lat}, {lon})");

        Ok(utm)
    }

    /// Returns the UTM zone.
    ///
    /// # Example
    /// ```
    /// use utmconvert::Utm;
    ///
    /// let coord = Utm::create(4511315.422, 585664.121, 18).unwrap();
    /// assert_eq!(coord.zone(), 18);
    /// ```
    #[inline]
    pub fn zone(&self) -> i32 {
        self.zone
    }

    /// Returns the hemisphere label.
    #[inline]
    pub fn hemisphere(&self) -> UtmHemisphere {
        self.hemisphere
    }

    /// Returns whether the hemisphere label is North.
    pub fn is_north(&self) -> bool {
        self.hemisphere.is_north()
    }

    /// Relabels the hemisphere. The easting, northing and the already
    /// computed latitude/longitude stay as they are.
    ///
    /// # Example
    /// ```
    /// use utmconvert::{Utm, UtmHemisphere};
    ///
    /// let mut coord = Utm::create(4041000.0, 310000.0, 45).unwrap();
    /// let before = coord.longitude();
    ///
    /// coord.set_hemisphere(UtmHemisphere::South);
    ///
    /// assert_eq!(coord.hemisphere(), UtmHemisphere::South);
    /// assert_eq!(coord.longitude(), before);
    /// ```
    pub fn set_hemisphere(&mut self, hemisphere: UtmHemisphere) {
        self.hemisphere = hemisphere;
    }

    /// By-value form of [`Utm::set_hemisphere`].
    pub fn with_hemisphere(mut self, hemisphere: UtmHemisphere) -> Utm {
        self.set_hemisphere(hemisphere);
        self
    }

    /// Returns the UTM easting in meters.
    #[inline]
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// Returns the UTM northing in meters.
    #[inline]
    pub fn northing(&self) -> f64 {
        self.northing
    }

    #[inline]
    pub fn datum(&self) -> Datum {
        self.datum
    }

    /// Latitude of the position, as computed at construction.
    #[inline]
    pub fn latitude(&self) -> Coordinate {
        self.latitude
    }

    /// Longitude of the position, as computed at construction.
    #[inline]
    pub fn longitude(&self) -> Coordinate {
        self.longitude
    }

    /// Central meridian of the zone in degrees.
    ///
    /// # Example
    /// ```
    /// use utmconvert::Utm;
    ///
    /// let coord = Utm::create(6227738.595, 594538.991, 32).unwrap();
    /// assert_eq!(coord.central_meridian(), 9.0);
    /// ```
    pub fn central_meridian(&self) -> f64 {
        central_meridian(self.zone)
    }

    /// Latitude band letter (`C` to `X`) of the position, or `None`
    /// outside the UTM latitude limits.
    ///
    /// # Example
    /// ```
    /// use utmconvert::Utm;
    ///
    /// let coord = Utm::create(6227738.595, 594538.991, 32).unwrap();
    /// assert_eq!(coord.latitude_band(), Some('V'));
    /// ```
    pub fn latitude_band(&self) -> Option<char> {
        let lat = self.latitude.degrees();
        if !(MIN_UTM_LAT..=MAX_UTM_LAT).contains(&lat) {
            return None;
        }

        let band = to_latitude_band(lat) + 10;
        usize::try_from(band)
            .ok()
            .and_then(|index| LATBAND.get(index))
            .map(|letter| char::from(*letter))
    }
}

pub(crate) fn central_meridian(zone: i32) -> f64 {
    6.0 * f64::from(zone) - 183.
}

fn check_zone(zone: i32) -> Result<(), Error> {
    if (zonespec::MINUTMZONE..=zonespec::MAXUTMZONE).contains(&zone) {
        Ok(())
    } else {
        Err(Error::InvalidZone(zone))
    }
}

fn expect_type(coord: &Coordinate, expected: CoordinateType) -> Result<(), Error> {
    if coord.coordinate_type() == expected {
        Ok(())
    } else {
        Err(Error::CoordinateTypeMismatch {
            expected,
            found: coord.coordinate_type(),
        })
    }
}

// Whole degrees of longitude, with 180 folded onto -180
#[allow(clippy::cast_possible_truncation)]
fn longitude_int(lon: f64) -> i32 {
    let lon_int = lon.ang_normalize().floor() as i32;
    (lon_int == dms::HD).ternary(-dms::HD, lon_int)
}

fn arithmetic_zone(lon: f64) -> i32 {
    (longitude_int(lon) + 186) / 6
}

// Band index in [-10, 9], band 0 starts at the equator
#[allow(clippy::cast_possible_truncation)]
fn to_latitude_band(lat: f64) -> i32 {
    let lat_int = lat.floor() as i32;
    (-10).max(9.min((lat_int + 80) / 8 - 10))
}

fn standard_zone(lat: f64, lon: f64) -> i32 {
    let lon_int = longitude_int(lon);
    let zone = arithmetic_zone(lon);

    if !(MIN_UTM_LAT..MAX_UTM_LAT).contains(&lat) {
        return zone;
    }

    let band = to_latitude_band(lat);
    // The Norway exception
    if band == 7 && zone == 31 && lon_int >= 3 {
        32
    }
    // The Svalbard exception
    else if band == 9 && (0..42).contains(&lon_int) {
        2 * ((lon_int + 183) / 12) + 1
    } else {
        zone
    }
}

impl std::fmt::Display for Utm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let easting = buf.format(self.easting);
        let mut buf = ryu::Buffer::new();
        let northing = buf.format(self.northing);
        write!(
            f,
            "{}{} {easting} {northing}",
            self.zone,
            self.hemisphere.is_north().ternary("n", "s"),
        )
    }
}
