use utmconvert::{Coordinate, Datum, Error, Hemisphere, Utm, UtmHemisphere};

const DELTA: f64 = 1e-5;

const ETRS_N: f64 = 6_227_738.595;
const ETRS_E: f64 = 594_538.991;

#[test]
fn converts_etrs_grid_point_latitude() {
    let coordinate = Utm::create(ETRS_N, ETRS_E, 32).unwrap();
    let latitude = coordinate.latitude();

    assert_eq!(latitude.to_string(), "56° 11' 6,793\" North");
    assert!((latitude.degrees() - 56.185_220_361_538_1).abs() <= DELTA);
    assert!((latitude.radian() - 56.185_220_361_538_1_f64.to_radians()).abs() <= DELTA);
    assert_eq!(latitude.hemisphere(), Hemisphere::North);

    // The reference decimal renders the same text as the projected value
    let decimal = Coordinate::latitude(56.185_220_361_538_1).unwrap();
    assert_eq!(decimal.to_string(), latitude.to_string());

    assert_eq!(coordinate.datum(), Datum::Wgs84);
    assert_eq!(coordinate.easting(), ETRS_E);
    assert_eq!(coordinate.northing(), ETRS_N);
    assert_eq!(coordinate.hemisphere(), UtmHemisphere::North);
}

#[test]
fn converts_etrs_grid_point_longitude() {
    let coordinate = Utm::create(ETRS_N, ETRS_E, 32).unwrap();
    let longitude = coordinate.longitude();

    assert_eq!(longitude.to_string(), "10° 31' 23,486\" East");
    assert!((longitude.degrees() - 10.523_190_507_650_6).abs() <= DELTA);
    assert!((longitude.radian() - 10.523_190_507_650_6_f64.to_radians()).abs() <= DELTA);

    assert_eq!(coordinate.datum(), Datum::Wgs84);
    assert_eq!(coordinate.easting(), ETRS_E);
    assert_eq!(coordinate.northing(), ETRS_N);
    assert_eq!(coordinate.hemisphere(), UtmHemisphere::North);
}

#[test]
fn assigned_hemisphere_is_kept() {
    use UtmHemisphere::{North, South};

    let cases = [
        (6_227_738.595, 594_538.991, North, 32),
        (7_020_000., 300_000., North, 14),
        (4_041_000., 310_000., South, 45),
        (1_000_000., 320_000., North, 30),
        (2_000_000., 330_000., South, 2),
        (3_000_000., 340_000., North, 22),
        (4_000_000., 350_000., South, 43),
        (5_000_000., 360_000., North, 32),
        (6_000_000., 370_000., South, 51),
        (7_000_000., 380_000., North, 23),
        (8_000_000., 390_000., South, 27),
        (1_000_000., 400_000., North, 18),
        (2_000_000., 410_000., South, 52),
        (3_000_000., 420_000., North, 37),
        (3_000_000., 430_000., South, 28),
        (4_000_000., 440_000., North, 19),
        (5_002_000., 450_000., South, 16),
    ];

    for (northing, easting, hemisphere, zone) in cases {
        let coordinate = Utm::create(northing, easting, zone)
            .unwrap()
            .with_hemisphere(hemisphere);

        assert_eq!(coordinate.hemisphere(), hemisphere, "{northing} {easting} {zone}");
    }
}

#[test]
fn longitude_strings_for_northern_points() {
    let cases = [
        (3_000_000., 420_000., 37, "38° 11' 34,180\" East"),
        (3_000_000., 340_000., 22, "52° 36' 50,940\" West"),
        (5_000_000., 360_000., 32, "7° 13' 9,714\" East"),
        (7_020_000., 300_000., 14, "102° 59' 5,634\" West"),
        (6_227_738.595, 594_538.991, 32, "10° 31' 23,486\" East"),
        (1_000_000., 320_000., 30, "4° 38' 15,447\" West"),
        (7_000_000., 380_000., 23, "47° 22' 42,195\" West"),
        (1_000_000., 400_000., 18, "75° 54' 35,566\" West"),
        (4_000_000., 440_000., 19, "69° 40' 0,923\" West"),
    ];

    for (northing, easting, zone, expected) in cases {
        let coordinate = Utm::create(northing, easting, zone)
            .unwrap()
            .with_hemisphere(UtmHemisphere::North);

        assert_eq!(coordinate.longitude().to_string(), expected);
    }
}

#[test]
fn relabelling_as_south_keeps_the_northern_position() {
    // Position is fixed at construction, so these are the northern answers
    let cases = [
        (4_041_000., 310_000., 45, "84° 52' 43,216\" East"),
        (2_000_000., 330_000., 2, "172° 36' 23,141\" West"),
        (4_000_000., 350_000., 43, "73° 19' 58,654\" East"),
        (6_000_000., 370_000., 51, "121° 0' 37,292\" East"),
        (8_000_000., 390_000., 27, "24° 12' 11,484\" West"),
        (2_000_000., 410_000., 52, "128° 8' 58,019\" East"),
        (3_000_000., 430_000., 28, "15° 42' 22,616\" West"),
        (5_002_000., 450_000., 16, "87° 38' 10,593\" West"),
    ];

    for (northing, easting, zone, expected) in cases {
        let mut coordinate = Utm::create(northing, easting, zone).unwrap();
        let latitude = coordinate.latitude();

        coordinate.set_hemisphere(UtmHemisphere::South);

        assert_eq!(coordinate.hemisphere(), UtmHemisphere::South);
        assert_eq!(coordinate.longitude().to_string(), expected);
        assert_eq!(coordinate.latitude(), latitude);
        assert_eq!(coordinate.latitude().hemisphere(), Hemisphere::North);
    }
}

#[test]
fn southern_points_with_explicit_hemisphere() {
    let cases = [
        (4_041_000., 310_000., 45, "53° 44' 41,847\" South", "84° 7' 7,125\" East"),
        (2_000_000., 330_000., 2, "72° 2' 11,872\" South", "175° 56' 36,899\" West"),
        (6_000_000., 370_000., 51, "36° 8' 9,609\" South", "121° 33' 18,587\" East"),
        (8_000_000., 390_000., 27, "18° 5' 9,271\" South", "22° 2' 22,347\" West"),
    ];

    for (northing, easting, zone, latitude, longitude) in cases {
        let coordinate =
            Utm::create_with(northing, easting, zone, UtmHemisphere::South, Datum::Wgs84).unwrap();

        assert_eq!(coordinate.latitude().to_string(), latitude);
        assert_eq!(coordinate.longitude().to_string(), longitude);
        assert!(coordinate.latitude().is_negative());
    }
}

#[test]
fn zone_outside_grid_is_a_domain_error() {
    for zone in [0, 61] {
        let err = Utm::create(ETRS_N, ETRS_E, zone).unwrap_err();
        assert!(matches!(err, Error::InvalidZone(_)));
        assert!(err.is_domain_error());
    }
}

#[test]
fn formatting_twice_gives_the_same_text() {
    let coordinate = Utm::create(7_020_000., 300_000., 14).unwrap();

    let first = coordinate.longitude().to_string();
    let second = coordinate.longitude().to_string();

    assert_eq!(first, second);
    assert_eq!(first, "102° 59' 5,634\" West");
}
