//! CSV element lists and timestamp layouts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::ValueError;

/// Reads one CSV record from `input`. The empty string is an empty list.
///
/// The reader is lenient: a quote inside an unquoted field is kept as a
/// literal character and an unterminated quoted field runs to the end of the
/// input. [`ValueError::Csv`] is only returned for records the `csv` reader
/// itself refuses.
pub fn read_csv(input: &str) -> Result<Vec<String>, ValueError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => Ok(record.iter().map(str::to_string).collect()),
        Some(Err(err)) => Err(ValueError::Csv {
            input:  input.to_string(),
            reason: err.to_string(),
        }),
        None => Ok(Vec::new()),
    }
}

/// Strips one surrounding `[`/`]` pair, the form list and map values are
/// formatted in, so that formatted values parse back.
pub fn strip_brackets(input: &str) -> &str {
    input
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(input)
}

/// Like [`read_csv`], but strips backticks and single quotes first so that
/// shell-style quoting around list items is ignored.
pub fn read_csv_unquoted(input: &str) -> Result<Vec<String>, ValueError> {
    let stripped: String = input.chars().filter(|c| !matches!(c, '`' | '\'')).collect();
    read_csv(&stripped)
}

/// Writes `fields` as a single CSV record without the trailing newline.
pub fn write_csv<I, S>(fields: I) -> Result<String, ValueError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let fields: Vec<S> = fields.into_iter().collect();
    if fields.is_empty() {
        return Ok(String::new());
    }

    let csv_error = |reason: String| ValueError::Csv {
        input: String::new(),
        reason,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(&fields).map_err(|e| csv_error(e.to_string()))?;
    let bytes = writer.into_inner().map_err(|e| csv_error(e.error().to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| csv_error(e.to_string()))?;

    Ok(text.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// A concrete way of reading a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// RFC 3339, with or without fractional seconds.
    Rfc3339,
    /// Full date and time followed by a numeric offset matched by the pattern.
    Zoned(&'static str),
    /// Full date and time followed by a space and a zone abbreviation such as
    /// `UTC` or `PST`. The abbreviation is recorded with a zero offset.
    Abbreviated(&'static str),
    /// Full date and time without zone, read as UTC.
    Naive(&'static str),
    /// Month, day and time without a year; the year is 0.
    Yearless(&'static str),
    /// A date at midnight UTC.
    DateOnly(&'static str),
    /// A time of day on January 1st of year 0, UTC.
    TimeOnly(&'static str),
    /// A `chrono` format string supplied verbatim.
    Literal(String),
}

/// Resolves a layout alias. Unknown names are used verbatim as a `chrono`
/// format string.
pub fn resolve_layout(name: &str) -> Layout {
    match name {
        "RFC3339" | "RFC3339Nano" => Layout::Rfc3339,
        "RFC822"      => Layout::Abbreviated("%d %b %y %H:%M"),
        "RFC822Z"     => Layout::Zoned("%d %b %y %H:%M %z"),
        "RFC850"      => Layout::Abbreviated("%A, %d-%b-%y %H:%M:%S"),
        "RFC1123"     => Layout::Abbreviated("%a, %d %b %Y %H:%M:%S"),
        "RFC1123Z"    => Layout::Zoned("%a, %d %b %Y %H:%M:%S %z"),
        "ISO8601"     => Layout::Zoned("%Y-%m-%dT%H:%M:%S%z"),
        "ISO8601Time" => Layout::Zoned("%Y-%m-%dT%H:%M:%S%.f%z"),
        "Kitchen"     => Layout::TimeOnly("%I:%M%p"),
        "Stamp" | "StampMilli" | "StampMicro" | "StampNano" => Layout::Yearless("%b %e %H:%M:%S%.f"),
        "DateTime"    => Layout::Naive("%Y-%m-%d %H:%M:%S"),
        "DateOnly"    => Layout::DateOnly("%Y-%m-%d"),
        "TimeOnly"    => Layout::TimeOnly("%H:%M:%S"),
        other         => Layout::Literal(other.to_string()),
    }
}

fn year_zero() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(0, 1, 1)
}

impl Layout {
    /// Reads `input` as a UTC instant, or `None` if it does not fit the layout.
    pub fn parse(&self, input: &str) -> Option<DateTime<Utc>> {
        match self {
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            Layout::Zoned(pattern) => DateTime::parse_from_str(input, pattern)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            Layout::Abbreviated(pattern) => {
                let (head, zone) = input.rsplit_once(' ')?;
                if zone.is_empty() || zone.len() > 5 || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
                    return None;
                }
                NaiveDateTime::parse_from_str(head, pattern).ok().map(|t| t.and_utc())
            }
            Layout::Naive(pattern) => NaiveDateTime::parse_from_str(input, pattern)
                .ok()
                .map(|t| t.and_utc()),
            Layout::Yearless(pattern) => {
                let padded = format!("0000 {input}");
                NaiveDateTime::parse_from_str(&padded, &format!("%Y {pattern}"))
                    .ok()
                    .map(|t| t.and_utc())
            }
            Layout::DateOnly(pattern) => NaiveDate::parse_from_str(input, pattern)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|t| t.and_utc()),
            Layout::TimeOnly(pattern) => {
                let time = NaiveTime::parse_from_str(input, pattern).ok()?;
                Some(year_zero()?.and_time(time).and_utc())
            }
            Layout::Literal(pattern) => DateTime::parse_from_str(input, pattern)
                .map(|t| t.with_timezone(&Utc))
                .ok()
                .or_else(|| NaiveDateTime::parse_from_str(input, pattern).ok().map(|t| t.and_utc()))
                .or_else(|| {
                    NaiveDate::parse_from_str(input, pattern)
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|t| t.and_utc())
                }),
        }
    }
}
