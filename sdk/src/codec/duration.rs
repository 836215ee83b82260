use lazy_static::lazy_static;
use regex::Regex;

use super::Codec;
use crate::error::ValueError;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

lazy_static! {
    // Longer units first: alternation picks the first branch that matches.
    static ref COMPONENT: Regex = Regex::new(r"^([0-9]*)(?:\.([0-9]*))?(ns|us|µs|μs|ms|s|m|h)").unwrap();
}

fn unit_nanos(unit: &str) -> i128 {
    match unit {
        "ns"              => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms"              => 1_000_000,
        "s"               => NANOS_PER_SECOND,
        "m"               => 60 * NANOS_PER_SECOND,
        _                 => 3_600 * NANOS_PER_SECOND,
    }
}

/// Parses durations such as `300ms`, `-1.5h` or `2h45m` into nanoseconds.
///
/// The total must fit in a signed 64-bit nanosecond count.
pub fn parse_duration(input: &str) -> Result<i128, ValueError> {
    let invalid = |reason: &str| ValueError::invalid("duration", input, reason);

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        let caps = COMPONENT
            .captures(rest)
            .ok_or_else(|| invalid("expected a number followed by one of ns, us, µs, ms, s, m, h"))?;
        let whole = caps.get(1).map_or("", |m| m.as_str());
        let fraction = caps.get(2).map_or("", |m| m.as_str());
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("missing number before unit"));
        }
        if whole.len() > 20 {
            return Err(invalid("value out of range"));
        }
        let unit = unit_nanos(caps.get(3).map_or("", |m| m.as_str()));

        let mut value = if whole.is_empty() {
            0
        } else {
            whole.parse::<i128>().map_err(|_| invalid("value out of range"))? * unit
        };
        // Digits past nanosecond resolution are dropped.
        let mut scale = unit;
        for digit in fraction.bytes() {
            scale /= 10;
            if scale == 0 {
                break;
            }
            value += i128::from(digit - b'0') * scale;
        }

        total += value;
        if total > i128::from(i64::MAX) + i128::from(negative) {
            return Err(invalid("value out of range"));
        }
        rest = &rest[caps[0].len()..];
    }

    Ok(if negative { -total } else { total })
}

fn push_fraction(out: &mut String, value: u128, digits: u32) {
    let scale = 10u128.pow(digits);
    out.push_str(&(value / scale).to_string());
    let fraction = value % scale;
    if fraction != 0 {
        let text = format!("{:0width$}", fraction, width = digits as usize);
        out.push('.');
        out.push_str(text.trim_end_matches('0'));
    }
}

/// Renders nanoseconds the canonical way: `1h2m3.5s`, `1.5ms`, `0s`.
pub fn format_duration(nanos: i128) -> String {
    if nanos == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    let magnitude = nanos.unsigned_abs();

    if magnitude < 1_000 {
        out.push_str(&format!("{magnitude}ns"));
    } else if magnitude < 1_000_000 {
        push_fraction(&mut out, magnitude, 3);
        out.push_str("µs");
    } else if magnitude < 1_000_000_000 {
        push_fraction(&mut out, magnitude, 6);
        out.push_str("ms");
    } else {
        let seconds = magnitude / 1_000_000_000;
        let sub = magnitude % 1_000_000_000;
        let hours = seconds / 3_600;
        let minutes = (seconds / 60) % 60;
        if hours > 0 {
            out.push_str(&format!("{hours}h{minutes}m"));
        } else if minutes > 0 {
            out.push_str(&format!("{minutes}m"));
        }
        push_fraction(&mut out, (seconds % 60) * 1_000_000_000 + sub, 9);
        out.push('s');
    }
    out
}

/// `google.protobuf.Duration` values written as `1h30m`, `250ms`, ...
#[derive(Debug, Clone, Copy, Default)]
pub struct Duration;

impl Codec for Duration {
    type Item = prost_types::Duration;

    fn kind(&self) -> String {
        "duration".to_string()
    }

    fn decode(&self, input: &str) -> Result<prost_types::Duration, ValueError> {
        let nanos = parse_duration(input)?;
        // Truncating division keeps seconds and nanos on the same side of zero.
        Ok(prost_types::Duration {
            seconds: (nanos / NANOS_PER_SECOND) as i64,
            nanos:   (nanos % NANOS_PER_SECOND) as i32,
        })
    }

    fn encode(&self, item: &prost_types::Duration) -> String {
        format_duration(i128::from(item.seconds) * NANOS_PER_SECOND + i128::from(item.nanos))
    }

    fn zero(&self) -> String {
        "0s".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("-0", 0)]
    #[case("5s", 5_000_000_000)]
    #[case("+5s", 5_000_000_000)]
    #[case("1.5h", 5_400_000_000_000)]
    #[case("2h45m", 9_900_000_000_000)]
    #[case("300ms", 300_000_000)]
    #[case("1us", 1_000)]
    #[case("1µs", 1_000)]
    #[case("1μs", 1_000)]
    #[case("-1m30s", -90_000_000_000)]
    #[case(".5s", 500_000_000)]
    #[case("1.0000000001s", 1_000_000_000)]
    fn parses_components(#[case] input: &str, #[case] nanos: i128) {
        assert_eq!(parse_duration(input).unwrap(), nanos);
    }

    #[rstest]
    #[case("")]
    #[case("5")]
    #[case("s")]
    #[case(".s")]
    #[case("5d")]
    #[case("1h 2m")]
    #[case("3000000h")]
    fn rejects_malformed(#[case] input: &str) {
        assert!(parse_duration(input).is_err(), "{input} should fail");
    }

    #[rstest]
    #[case(0, "0s")]
    #[case(1, "1ns")]
    #[case(1_500, "1.5µs")]
    #[case(1_500_000, "1.5ms")]
    #[case(5_000_000_000, "5s")]
    #[case(90_000_000_000, "1m30s")]
    #[case(3_600_000_000_000, "1h0m0s")]
    #[case(3_723_500_000_000, "1h2m3.5s")]
    #[case(-1_500_000_000, "-1.5s")]
    fn formats_canonically(#[case] nanos: i128, #[case] text: &str) {
        assert_eq!(format_duration(nanos), text);
        assert_eq!(parse_duration(text).unwrap(), nanos);
    }

    #[test]
    fn splits_into_seconds_and_nanos() {
        let negative = Duration.decode("-1.5s").unwrap();
        assert_eq!((negative.seconds, negative.nanos), (-1, -500_000_000));
        assert_eq!(Duration.encode(&negative), "-1.5s");
    }
}
