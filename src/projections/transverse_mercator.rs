use std::f64::consts::FRAC_PI_2;

use lazy_static::lazy_static;
use num::Complex;

use crate::{
    constants::UTM_K0,
    datum::{Datum, Ellipsoid},
    utility::{dms, polyval, sincosd, GeoMath},
    ThisOrThat,
};

// ================================
// Transverse Mercator Constants
// ================================

// Krüger series to sixth order in the third flattening n
const B1_COEFF: [f64; 5] = [
    // b1*(n+1), polynomial in n2 of order 3
    1., 4., 64., 256., 256.,
];  // count = 5

#[allow(clippy::unreadable_literal)]
const ALP_COEFF: [f64; 27] = [
    // alp[1]/n^1, polynomial in n of order 5
    31564., -66675., 34440., 47250., -100800., 75600., 151200.,
    // alp[2]/n^2, polynomial in n of order 4
    -1983433., 863232., 748608., -1161216., 524160., 1935360.,
    // alp[3]/n^3, polynomial in n of order 3
    670412., 406647., -533952., 184464., 725760.,
    // alp[4]/n^4, polynomial in n of order 2
    6601661., -7732800., 2230245., 7257600.,
    // alp[5]/n^5, polynomial in n of order 1
    -13675556., 3438171., 7983360.,
    // alp[6]/n^6, polynomial in n of order 0
    212378941., 319334400.,
];  // count = 27

#[allow(clippy::unreadable_literal)]
const BET_COEFF: [f64; 27] = [
    // bet[1]/n^1, polynomial in n of order 5
    384796., -382725., -6720., 932400., -1612800., 1209600., 2419200.,
    // bet[2]/n^2, polynomial in n of order 4
    -1118711., 1695744., -1174656., 258048., 80640., 3870720.,
    // bet[3]/n^3, polynomial in n of order 3
    22276., -16929., -15984., 12852., 362880.,
    // bet[4]/n^4, polynomial in n of order 2
    -830251., -158400., 197865., 7257600.,
    // bet[5]/n^5, polynomial in n of order 1
    -435388., 453717., 15966720.,
    // bet[6]/n^6, polynomial in n of order 0
    20648693., 638668800.,
];  // count = 27

const MAXPOW: usize = 6;

lazy_static! {
    static ref UTM_WGS84: TransverseMercator = TransverseMercator::new(&Ellipsoid::WGS84, UTM_K0);
    static ref UTM_GRS80: TransverseMercator = TransverseMercator::new(&Ellipsoid::GRS80, UTM_K0);
    static ref UTM_INTL1924: TransverseMercator =
        TransverseMercator::new(&Ellipsoid::INTERNATIONAL_1924, UTM_K0);
}

/// Transverse Mercator projection on an ellipsoid, evaluated with the
/// Krüger series. Coordinates are relative to the central meridian and
/// the equator, false easting/northing are the caller's business.
pub(crate) struct TransverseMercator {
    k0: f64,
    es: f64,
    a1: f64,
    alp: [f64; MAXPOW + 1],
    bet: [f64; MAXPOW + 1],
}

impl TransverseMercator {
    /// Shared UTM parameters for the ellipsoid of `datum`.
    pub fn utm(datum: Datum) -> &'static TransverseMercator {
        match datum {
            Datum::Wgs84 => &UTM_WGS84,
            Datum::Etrs89 => &UTM_GRS80,
            Datum::Ed50 => &UTM_INTL1924,
        }
    }

    pub fn new(ellipsoid: &Ellipsoid, k0: f64) -> TransverseMercator {
        let f = ellipsoid.flattening();
        let n = ellipsoid.third_flattening();
        let es = (f < 0.).ternary(-1., 1.) * ellipsoid.eccentricity_squared().abs().sqrt();

        let m = MAXPOW / 2;
        let b1 = polyval(&B1_COEFF[0..=m], n.powi(2)) / (B1_COEFF[m + 1] * (1. + n));
        // a1 is the equivalent radius for computing the circumference of
        // ellipse.
        let a1 = b1 * ellipsoid.semi_major_axis();

        let mut alp = [0_f64; MAXPOW + 1];
        let mut bet = [0_f64; MAXPOW + 1];

        let mut o = 0;
        let mut d = n;

        for l in 1..=MAXPOW {
            let m = MAXPOW - l;
            alp[l] = d * polyval(&ALP_COEFF[o..=o+m], n) / ALP_COEFF[o + m + 1];
            bet[l] = d * polyval(&BET_COEFF[o..=o+m], n) / BET_COEFF[o + m + 1];
            o += m + 2;
            d *= n;
        }

        Self {
            k0,
            es,
            a1,
            alp,
            bet,
        }
    }

    /// Projects `(lat, lon)` in degrees onto the plane of the meridian
    /// `lon0`. Returns `(x, y)` in meters.
    pub fn forward(&self, lon0: f64, lat: f64, lon: f64) -> (f64, f64) {
        let mut lat_sign = lat.is_sign_negative().ternary(-1., 1.);
        let lon = lon0.ang_diff(lon);
        let lon_sign = lon.is_sign_negative().ternary(-1., 1.);

        let lat = lat * lat_sign;
        let mut lon = lon * lon_sign;

        let backside = lon > f64::from(dms::QD);
        if backside {
            if lat.is_zero() {
                lat_sign = -1.;
            }
            lon = f64::from(dms::HD) - lon;
        }

        let (sphi, cphi) = sincosd(lat);
        let (slam, clam) = sincosd(lon);

        let (xip, etap) = if lat.eps_eq(f64::from(dms::QD)) {
            (FRAC_PI_2, 0.)
        } else {
            let taup = (sphi / cphi).taupf(self.es);
            (taup.atan2(clam), (slam / taup.hypot(clam)).asinh())
        };

        let c0 = (2. * xip).cos();
        let ch0 = (2. * etap).cosh();
        let s0 = (2. * xip).sin();
        let sh0 = (2. * etap).sinh();

        // 2 * cos(2 * zeta')
        let a = Complex::new(2. * c0 * ch0, -2. * s0 * sh0);
        let y0 = clenshaw(a, &self.alp, 1.);

        // sin(2 * zeta')
        let a = Complex::new(s0 * ch0, c0 * sh0);
        let zeta = Complex::new(xip, etap) + a * y0;

        let xi = backside.ternary(std::f64::consts::PI - zeta.re, zeta.re);
        let eta = zeta.im;

        let x = self.a1 * self.k0 * eta * lon_sign;
        let y = self.a1 * self.k0 * xi * lat_sign;

        (x, y)
    }

    /// Inverse of [`TransverseMercator::forward`]. Returns `(lat, lon)` in
    /// degrees, longitude normalized to `[-180, 180]`.
    pub fn reverse(&self, lon0: f64, x: f64, y: f64) -> (f64, f64) {
        let mut xi = y / (self.a1 * self.k0);
        let mut eta = x / (self.a1 * self.k0);

        let xi_sign = xi.is_sign_negative().ternary(-1., 1.);
        let eta_sign = eta.is_sign_negative().ternary(-1., 1.);

        xi *= xi_sign;
        eta *= eta_sign;

        let backside = xi > FRAC_PI_2;
        if backside {
            xi = std::f64::consts::PI - xi;
        }

        let c0 = (2. * xi).cos();
        let ch0 = (2. * eta).cosh();
        let s0 = (2. * xi).sin();
        let sh0 = (2. * eta).sinh();

        // 2 * cos(2 * zeta)
        let a = Complex::new(2. * c0 * ch0, -2. * s0 * sh0);
        let y0 = clenshaw(a, &self.bet, -1.);

        // sin(2 * zeta)
        let a = Complex::new(s0 * ch0, c0 * sh0);
        let zetap = Complex::new(xi, eta) + a * y0;

        let xip = zetap.re;
        let etap = zetap.im;
        let s = etap.sinh();
        let c = 0_f64.max(xip.cos());
        let r = s.hypot(c);

        let (mut lat, mut lon) = if r.is_zero() {
            (f64::from(dms::QD), 0.)
        } else {
            let lon = s.atan2(c).to_degrees();
            let tau = (xip.sin() / r).tauf(self.es);

            (tau.atan().to_degrees(), lon)
        };

        lat *= xi_sign;
        if backside {
            lon = f64::from(dms::HD) - lon;
        }
        lon *= eta_sign;

        (lat, (lon + lon0).ang_normalize())
    }
}

/// Clenshaw summation of `sum(sign * coeffs[k] * sin(2k zeta))` for
/// `k = 1..=MAXPOW`, given `a = 2 cos(2 zeta)`. Returns the series
/// divided by `sin(2 zeta)`.
fn clenshaw(a: Complex<f64>, coeffs: &[f64; MAXPOW + 1], sign: f64) -> Complex<f64> {
    let mut k = MAXPOW;

    let mut y0 = if k % 2 == 1 { Complex::new(sign * coeffs[k], 0.) } else { Complex::new(0., 0.) };
    let mut y1 = Complex::new(0., 0.);
    if k % 2 == 1 {
        k -= 1;
    }

    while k > 0 {
        y1 = a * y0 - y1 + sign * coeffs[k];
        k -= 1;
        y0 = a * y1 - y0 + sign * coeffs[k];
        k -= 1;
    }

    y0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn central_meridian_equator_is_origin() {
        let tm = TransverseMercator::utm(Datum::Wgs84);
        let (x, y) = tm.forward(3., 0., 3.);
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn pole_maps_to_scaled_quarter_meridian() {
        let tm = TransverseMercator::utm(Datum::Wgs84);
        let (x, y) = tm.forward(0., 90., 0.);
        // Quarter meridian of WGS84 is 10 001 965.729 m
        assert!(x.abs() < 1e-6);
        assert!((y - 10_001_965.729 * UTM_K0).abs() < 1e-2);
    }

    #[test]
    fn equator_beyond_quadrant_uses_back_side() {
        let tm = TransverseMercator::utm(Datum::Wgs84);
        let (x, y) = tm.forward(0., 0., 120.);
        // Half meridian of WGS84 is 20 003 931.458 m
        assert!(x.is_finite());
        assert!((y + 20_003_931.458 * UTM_K0).abs() < 1e-2);
    }

    #[test]
    fn pole_reverses_to_pole() {
        let tm = TransverseMercator::utm(Datum::Wgs84);
        let (lat, lon) = tm.reverse(9., 0., 10_001_965.729 * UTM_K0);
        assert!((lat - 90.).abs() < 1e-6);
        assert!(lon.is_finite());

        let (lat, _) = tm.reverse(9., 0., -10_001_965.729 * UTM_K0);
        assert!((lat + 90.).abs() < 1e-6);
    }

    #[test]
    fn forward_then_reverse_is_identity() {
        let tm = TransverseMercator::utm(Datum::Ed50);
        for (lat, lon) in [(52.1, 4.3), (-33.9, 18.4), (0.5, -2.9), (71.2, 27.0)] {
            let lon0 = (lon / 6.0_f64).floor() * 6. + 3.;
            let (x, y) = tm.forward(lon0, lat, lon);
            let (lat2, lon2) = tm.reverse(lon0, x, y);
            assert!((lat - lat2).abs() < 1e-9, "{lat} != {lat2}");
            assert!((lon - lon2).abs() < 1e-9, "{lon} != {lon2}");
        }
    }

    #[test]
    fn reverse_is_odd_in_x_and_y() {
        let tm = TransverseMercator::utm(Datum::Wgs84);
        let (lat_a, lon_a) = tm.reverse(0., 120_000., 3_500_000.);
        let (lat_b, lon_b) = tm.reverse(0., -120_000., -3_500_000.);
        assert!((lat_a + lat_b).abs() < 1e-12);
        assert!((lon_a + lon_b).abs() < 1e-12);
    }
}
