//! Hour quantities logged against a single day and summed per week.
//!
//! Hours are held as whole hundredths so fractional entries such as `7.5`
//! add up exactly; the wire form is a plain JSON number.

use std::fmt;
use std::iter::Sum;

use serde::{Deserialize, Serialize, Serializer};

use super::TimesheetValidationError;

/// Most hours that can be logged on one entry.
pub const MAX_DAILY_HOURS: u8 = 24;

/// Hundredths in one hour.
pub(super) const CENTIS_PER_HOUR: u32 = 100;

const MAX_DAILY_CENTIS: u16 = 2400;

/// Hours logged on a single entry, `0..=24` with up to two decimals.
///
/// # Examples
/// ```
/// use backend::domain::Hours;
///
/// assert_eq!(Hours::new(8).map(Hours::centis), Ok(800));
/// assert_eq!("7.5".parse::<Hours>().map(Hours::centis), Ok(750));
/// assert!(Hours::new(25).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "serde_json::Number")]
pub struct Hours(u16);

impl Hours {
    /// Whole hours.
    pub fn new(whole: impl Into<i64>) -> Result<Self, TimesheetValidationError> {
        let actual = whole.into();
        actual
            .checked_mul(i64::from(CENTIS_PER_HOUR))
            .and_then(|centis| u16::try_from(centis).ok())
            .filter(|centis| *centis <= MAX_DAILY_CENTIS)
            .map(Self)
            .ok_or_else(|| out_of_range(actual.to_string()))
    }

    /// Hundredths of an hour, as stored.
    pub fn from_centis(centis: i64) -> Result<Self, TimesheetValidationError> {
        u16::try_from(centis)
            .ok()
            .filter(|value| *value <= MAX_DAILY_CENTIS)
            .map(Self)
            .ok_or_else(|| out_of_range(format_centis(centis.unsigned_abs(), centis < 0)))
    }

    /// Hundredths of an hour.
    #[must_use]
    pub const fn centis(self) -> u16 {
        self.0
    }
}

fn out_of_range(actual: String) -> TimesheetValidationError {
    TimesheetValidationError::HoursOutOfRange {
        max: MAX_DAILY_HOURS,
        actual,
    }
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

impl std::str::FromStr for Hours {
    type Err = TimesheetValidationError;

    /// Parse a plain decimal such as `8`, `7.5` or `0.25`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || TimesheetValidationError::InvalidHours {
            actual: text.to_owned(),
        };
        let (negative, digits) = text
            .strip_prefix('-')
            .map_or((false, text), |rest| (true, rest));
        let (whole_text, fraction_text) = digits.split_once('.').unwrap_or((digits, ""));
        if whole_text.is_empty() || !all_digits(whole_text) || !all_digits(fraction_text) {
            return Err(invalid());
        }
        let significant = fraction_text.trim_end_matches('0');
        if significant.len() > 2 {
            return Err(TimesheetValidationError::HoursTooPrecise {
                actual: text.to_owned(),
            });
        }
        let whole: u32 = whole_text
            .parse()
            .map_err(|_| out_of_range(text.to_owned()))?;
        let fraction: u32 = format!("{significant:0<2}").parse().map_err(|_| invalid())?;
        let centis = whole
            .checked_mul(CENTIS_PER_HOUR)
            .and_then(|value| value.checked_add(fraction))
            .ok_or_else(|| out_of_range(text.to_owned()))?;
        if negative && centis > 0 {
            return Err(out_of_range(text.to_owned()));
        }
        u16::try_from(centis)
            .ok()
            .filter(|value| *value <= MAX_DAILY_CENTIS)
            .map(Self)
            .ok_or_else(|| out_of_range(text.to_owned()))
    }
}

impl TryFrom<serde_json::Number> for Hours {
    type Error = TimesheetValidationError;

    fn try_from(value: serde_json::Number) -> Result<Self, Self::Error> {
        value.to_string().parse()
    }
}

impl Serialize for Hours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_centis(u32::from(self.0), serializer)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", format_centis(u64::from(self.0), false))
    }
}

/// Sum of hours across several entries, in hundredths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TotalHours(u32);

impl TotalHours {
    /// Total of `whole` hours.
    #[must_use]
    pub const fn new(whole: u32) -> Self {
        Self(whole.saturating_mul(CENTIS_PER_HOUR))
    }

    /// Total of `centis` hundredths.
    #[must_use]
    pub const fn from_centis(centis: u32) -> Self {
        Self(centis)
    }

    /// Hundredths of an hour.
    #[must_use]
    pub const fn centis(self) -> u32 {
        self.0
    }
}

impl Sum<Hours> for TotalHours {
    fn sum<I: Iterator<Item = Hours>>(iter: I) -> Self {
        Self(
            iter.map(|hours| u32::from(hours.centis()))
                .fold(0, u32::saturating_add),
        )
    }
}

impl Serialize for TotalHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_centis(self.0, serializer)
    }
}

impl fmt::Display for TotalHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", format_centis(u64::from(self.0), false))
    }
}

/// Decimal text for `centis` hundredths with trailing zeros dropped.
fn format_centis(centis: u64, negative: bool) -> String {
    let sign = if negative { "-" } else { "" };
    let whole = centis.div_euclid(u64::from(CENTIS_PER_HOUR));
    let fraction = centis.rem_euclid(u64::from(CENTIS_PER_HOUR));
    match fraction {
        0 => format!("{sign}{whole}"),
        tenths if tenths.rem_euclid(10) == 0 => {
            format!("{sign}{whole}.{}", tenths.div_euclid(10))
        }
        hundredths => format!("{sign}{whole}.{hundredths:02}"),
    }
}

fn serialize_centis<S: Serializer>(centis: u32, serializer: S) -> Result<S::Ok, S::Error> {
    if centis.rem_euclid(CENTIS_PER_HOUR) == 0 {
        return serializer.serialize_u32(centis.div_euclid(CENTIS_PER_HOUR));
    }
    let decimal: f64 = format_centis(u64::from(centis), false)
        .parse()
        .map_err(<S::Error as serde::ser::Error>::custom)?;
    serializer.serialize_f64(decimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(8)]
    #[case(24)]
    fn accepts_whole_day_range(#[case] value: i64) {
        assert!(Hours::new(value).is_ok());
    }

    #[rstest]
    #[case(-1)]
    #[case(25)]
    #[case(300)]
    fn rejects_values_outside_a_day(#[case] value: i64) {
        assert_eq!(
            Hours::new(value),
            Err(TimesheetValidationError::HoursOutOfRange {
                max: 24,
                actual: value.to_string(),
            })
        );
    }

    #[rstest]
    #[case("7.5", 750)]
    #[case("0.25", 25)]
    #[case("8", 800)]
    #[case("8.0", 800)]
    #[case("23.99", 2399)]
    #[case("24.00", 2400)]
    #[case("0", 0)]
    fn parses_decimal_hours(#[case] text: &str, #[case] centis: u16) {
        assert_eq!(text.parse::<Hours>().map(Hours::centis), Ok(centis));
    }

    #[rstest]
    #[case("24.01", "hours_out_of_range")]
    #[case("-0.5", "hours_out_of_range")]
    #[case("99999999999", "hours_out_of_range")]
    #[case("7.125", "hours_too_precise")]
    #[case("1e2", "invalid_hours")]
    #[case(".5", "invalid_hours")]
    fn rejects_unusable_decimals(#[case] text: &str, #[case] code: &str) {
        let err = text.parse::<Hours>().expect_err("rejected");
        assert_eq!(err.code(), code);
        assert_eq!(err.field(), "hours");
    }

    #[rstest]
    fn deserialises_json_numbers() {
        let half: Hours = serde_json::from_str("7.5").expect("fractional hours");
        assert_eq!(half.centis(), 750);
        let whole: Hours = serde_json::from_str("6").expect("whole hours");
        assert_eq!(whole, Hours::new(6).expect("hours"));
        assert!(serde_json::from_str::<Hours>("-2").is_err());
        assert!(serde_json::from_str::<Hours>("\"6\"").is_err());
    }

    #[rstest]
    #[case(750, serde_json::json!(7.5))]
    #[case(825, serde_json::json!(8.25))]
    #[case(800, serde_json::json!(8))]
    fn serialises_as_plain_numbers(#[case] centis: i64, #[case] expected: serde_json::Value) {
        let hours = Hours::from_centis(centis).expect("in range");
        assert_eq!(serde_json::to_value(hours).expect("serialise"), expected);
    }

    #[rstest]
    fn totals_sum_entry_hours() {
        let total: TotalHours = [800, 750, 425].into_iter().map(Hours).sum();
        assert_eq!(total, TotalHours::from_centis(1975));
        assert_eq!(total.to_string(), "19.75h");
        assert_eq!(TotalHours::new(20), TotalHours::from_centis(2000));
    }
}
