// WGS84 semi-major axis a
pub(crate) const WGS84_A: f64 = 6_378_137.;
// WGS84 flattening
#[allow(clippy::unreadable_literal)]
pub(crate) const WGS84_F: f64 = 1.0 / 298.257223563;

// GRS80 shares the WGS84 axis, differs in flattening
pub(crate) const GRS80_A: f64 = WGS84_A;
#[allow(clippy::unreadable_literal)]
pub(crate) const GRS80_F: f64 = 1.0 / 298.257222101;

// International 1924 (Hayford), used by ED50
pub(crate) const INTL1924_A: f64 = 6_378_388.;
pub(crate) const INTL1924_F: f64 = 1.0 / 297.;

// UTM central scale factor
pub(crate) const UTM_K0: f64 = 9996.0 / 10_000.;
// UTM false easting, applied in both hemispheres
pub(crate) const UTM_FALSE_EASTING: f64 = 500_000.;
// UTM false northing, southern hemisphere only
pub(crate) const UTM_FALSE_NORTHING_S: f64 = 10_000_000.;
// Northern UTM grid limit. A northing beyond it can only be southern.
pub(crate) const UTM_MAX_NORTHING_N: f64 = 9_500_000.;
