use num::Integer;

use crate::{
    coords::coordinate::{Coordinate, Hemisphere},
    utility::dms,
    Error,
};

/// Largest supported number of decimals on the seconds
pub const MAX_PRECISION: u8 = 9;

const DEGREE_MARKS: &[char] = &['°'];
const MINUTE_MARKS: &[char] = &['\'', '′'];
const SECOND_MARKS: &[char] = &['"', '″'];

/// How a [`Coordinate`] is rendered in degrees-minutes-seconds form.
///
/// The default renders seconds with three decimals and a comma, e.g.
/// `56° 11' 6,793" North`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DmsFormat {
    #[cfg_attr(feature = "serde", serde(alias = "separator"))]
    decimal_separator: char,
    precision: u8,
}

impl Default for DmsFormat {
    fn default() -> Self {
        Self {
            decimal_separator: ',',
            precision: 3,
        }
    }
}

impl DmsFormat {
    /// Creates a format. `precision` is the number of decimals on the
    /// seconds and is capped at [`MAX_PRECISION`].
    pub fn new(decimal_separator: char, precision: u8) -> DmsFormat {
        Self {
            decimal_separator,
            precision: precision.min(MAX_PRECISION),
        }
    }

    pub fn with_decimal_separator(self, decimal_separator: char) -> DmsFormat {
        DmsFormat::new(decimal_separator, self.precision)
    }

    pub fn with_precision(self, precision: u8) -> DmsFormat {
        DmsFormat::new(self.decimal_separator, precision)
    }

    #[inline]
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision.min(MAX_PRECISION)
    }

    pub(crate) fn render(&self, coord: &Coordinate) -> String {
        let precision = self.precision();
        let (degrees, minutes, units, scale) = split(coord.degrees().abs(), precision);
        let (whole, frac) = units.div_rem(&scale);
        let hemisphere = coord.hemisphere();

        if precision == 0 {
            format!("{degrees}° {minutes}' {whole}\" {hemisphere}")
        } else {
            format!(
                "{degrees}° {minutes}' {whole}{}{frac:0width$}\" {hemisphere}",
                self.decimal_separator,
                width = usize::from(precision),
            )
        }
    }
}

/// Splits an unsigned angle into whole degrees, whole minutes and seconds
/// in units of `10^-precision` arc-seconds. Rounding is done once on the
/// total (half away from zero), so a seconds or minutes carry rolls into
/// the next field. Also returns the unit scale `10^precision`.
pub(crate) fn split(magnitude: f64, precision: u8) -> (u32, u32, u64, u64) {
    let scale = 10_u64.pow(u32::from(precision.min(MAX_PRECISION)));
    let per_minute = u64::from(dms::MS.unsigned_abs()) * scale;
    let per_degree = u64::from(dms::DM.unsigned_abs()) * per_minute;

    // magnitude is at most 180, so the total stays below 2^53
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let total = (magnitude * f64::from(dms::DS) * scale as f64).round() as u64;

    let (degrees, rest) = total.div_rem(&per_degree);
    let (minutes, units) = rest.div_rem(&per_minute);

    #[allow(clippy::cast_possible_truncation)]
    let (degrees, minutes) = (degrees as u32, minutes as u32);

    (degrees, minutes, units, scale)
}

/// Parses `D° M' S,SSS" H`. Minutes and seconds are optional, the
/// seconds may use `,` or `.`, and the hemisphere may be a word or its
/// initial. The coordinate type follows from the hemisphere.
pub(crate) fn parse(value: &str) -> Result<Coordinate, Error> {
    let trimmed = value.trim();
    let body = trimmed.trim_end_matches(char::is_alphabetic);
    let hemisphere = &trimmed[body.len()..];

    if hemisphere.is_empty() {
        return Err(invalid(value, "missing hemisphere"));
    }
    let hemisphere: Hemisphere = hemisphere.parse()?;

    let mut rest = body;

    let degrees = take_component(&mut rest, DEGREE_MARKS)
        .ok_or_else(|| invalid(value, "missing degree sign"))?;
    let degrees = whole_number(degrees).ok_or_else(|| invalid(value, "degrees are not a whole number"))?;

    let minutes = match take_component(&mut rest, MINUTE_MARKS) {
        Some(minutes) => whole_number(minutes).ok_or_else(|| invalid(value, "minutes are not a whole number"))?,
        None => 0,
    };

    let seconds = match take_component(&mut rest, SECOND_MARKS) {
        Some(seconds) => decimal_number(seconds).ok_or_else(|| invalid(value, "seconds are not a number"))?,
        None => 0.,
    };

    if !rest.trim().is_empty() {
        return Err(invalid(value, "unexpected trailing characters"));
    }

    Coordinate::from_dms(degrees, minutes, seconds, hemisphere)
}

/// Takes the text up to the next of `marks` off the front of `rest`.
fn take_component<'a>(rest: &mut &'a str, marks: &[char]) -> Option<&'a str> {
    let trimmed = rest.trim_start();
    let (idx, mark) = trimmed.char_indices().find(|(_, c)| marks.contains(c))?;

    *rest = &trimmed[idx + mark.len_utf8()..];
    Some(trimmed[..idx].trim())
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

// Plain digits only, no sign or exponent
fn whole_number(text: &str) -> Option<u32> {
    if is_digits(text) { text.parse().ok() } else { None }
}

// Digits with an optional `,` or `.` fraction
fn decimal_number(text: &str) -> Option<f64> {
    let valid = match text.split_once([',', '.']) {
        Some((whole, frac)) => is_digits(whole) && is_digits(frac),
        None => is_digits(text),
    };

    if valid { text.replace(',', ".").parse().ok() } else { None }
}

fn invalid(value: &str, reason: &str) -> Error {
    Error::InvalidDms(format!("{value:?}: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoordinateType;

    fn lat(value: f64) -> Coordinate {
        Coordinate::latitude(value).unwrap()
    }

    fn lon(value: f64) -> Coordinate {
        Coordinate::longitude(value).unwrap()
    }

    #[test]
    fn renders_reference_form() {
        assert_eq!(lat(56.185_220_361_538_1).to_string(), "56° 11' 6,793\" North");
        assert_eq!(lon(10.523_190_507_650_6).to_string(), "10° 31' 23,486\" East");
        assert_eq!(lon(-4.637_624_184_353_9).to_string(), "4° 38' 15,447\" West");
        assert_eq!(lat(0.0).to_string(), "0° 0' 0,000\" North");
    }

    #[test]
    fn seconds_carry_into_minutes_and_degrees() {
        assert_eq!(lat(10.999_999_9).to_string(), "11° 0' 0,000\" North");
        assert_eq!(lat(-(12. + 59. / 60. + 59.9996 / 3600.)).to_string(), "13° 0' 0,000\" South");
        assert_eq!(lon(-179.999_999_99).to_string(), "180° 0' 0,000\" West");
    }

    #[test]
    fn just_below_carry_keeps_fields() {
        assert_eq!(lat(12. + 59. / 60. + 59.9994 / 3600.).to_string(), "12° 59' 59,999\" North");
    }

    #[test]
    fn never_renders_sixty() {
        let mut value = 0.0;
        while value < 90.0 {
            let text = lat(value).to_string();
            assert!(!text.contains(" 60'"), "{text}");
            assert!(!text.contains(" 60,"), "{text}");
            value += 0.000_37;
        }
    }

    #[test]
    fn precision_and_separator() {
        let coord = lon(-102.984_898_214_094_83);

        assert_eq!(coord.to_dms_string(&DmsFormat::new('.', 0)), "102° 59' 6\" West");
        assert_eq!(coord.to_dms_string(&DmsFormat::new('.', 5)), "102° 59' 5.63357\" West");
        assert_eq!(DmsFormat::new(',', 42).precision(), MAX_PRECISION);
    }

    #[test]
    fn formatting_is_idempotent() {
        let coord = lat(-27.113_194_386_476_724);
        assert_eq!(coord.to_string(), coord.to_string());
        assert_eq!(coord.to_string(), "27° 6' 47,500\" South");
    }

    #[test]
    fn parses_rendered_form() {
        let coord: Coordinate = "56° 11' 6,793\" North".parse().unwrap();
        assert_eq!(coord.coordinate_type(), CoordinateType::Latitude);
        assert!((coord.degrees() - 56.185_220_361_538_1).abs() < 1e-6);

        let coord: Coordinate = "102°59'5.634\"W".parse().unwrap();
        assert_eq!(coord.coordinate_type(), CoordinateType::Longitude);
        assert!((coord.degrees() + 102.984_898_214).abs() < 1e-6);

        let coord: Coordinate = "45° S".parse().unwrap();
        assert!((coord.degrees() + 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_then_render_round_trips() {
        for text in ["63° 15' 11,040\" North", "0° 0' 0,923\" West", "180° 0' 0,000\" East"] {
            let coord: Coordinate = text.parse().unwrap();
            assert_eq!(coord.to_string(), text);
        }
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "56 11 6 North", "56° 11' 6,793\"", "56° x' North", "56° 11' 6\" 7 North", "56° 11' 6\" Up"] {
            assert!(matches!(text.parse::<Coordinate>(), Err(Error::InvalidDms(_))), "{text}");
        }
        assert!(matches!("95° 0' 0\" North".parse::<Coordinate>(), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn rejects_signs_and_exponents() {
        for text in [
            "+5° N",
            "-5° N",
            "5° +1' N",
            "5° 1e1\" N",
            "5° 0' 1E1\" N",
            "5° 0' inf\" N",
            "5° 0' NaN\" N",
            "5° 0' 1,\" N",
            "5° 0' ,5\" N",
            "5° 0' 1,2,3\" N",
            "5° 0' 1 2\" N",
        ] {
            assert!(matches!(text.parse::<Coordinate>(), Err(Error::InvalidDms(_))), "{text}");
        }

        let coord: Coordinate = "5° 0' 10\" N".parse().unwrap();
        assert_eq!(coord.to_string(), "5° 0' 10,000\" North");
    }
}
