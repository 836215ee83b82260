use super::Codec;
use crate::error::ValueError;

/// Enum values by symbolic name or number, checked against the enum's
/// declared values.
///
/// Generated code passes the value table inline, so no runtime reflection is
/// involved:
///
/// ```
/// use protoflags::codec::{Codec, Enum};
///
/// let level = Enum::new("LogLevel", &[("LOG_LEVEL_UNSPECIFIED", 0), ("LOG_LEVEL_INFO", 1)]);
/// assert_eq!(level.decode("LOG_LEVEL_INFO").unwrap(), 1);
/// assert_eq!(level.decode("1").unwrap(), 1);
/// assert_eq!(level.encode(&7), "7");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Enum {
    name:   &'static str,
    values: &'static [(&'static str, i32)],
}

impl Enum {
    pub const fn new(name: &'static str, values: &'static [(&'static str, i32)]) -> Self {
        Enum { name, values }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.values.iter().map(|(name, _)| *name).collect()
    }

    fn is_defined(&self, number: i32) -> bool {
        self.values.iter().any(|(_, n)| *n == number)
    }
}

impl Codec for Enum {
    type Item = i32;

    fn kind(&self) -> String {
        self.name.to_string()
    }

    fn decode(&self, input: &str) -> Result<i32, ValueError> {
        let trimmed = input.trim();
        if let Some((_, number)) = self.values.iter().find(|(name, _)| *name == trimmed) {
            return Ok(*number);
        }
        if let Ok(number) = trimmed.parse::<i32>() {
            if self.is_defined(number) {
                return Ok(number);
            }
        }
        Err(ValueError::UnknownEnum {
            name:     self.name.to_string(),
            input:    input.to_string(),
            expected: self.names().join(", "),
        })
    }

    // Numbers without a name are printed as-is so values from newer schemas survive.
    fn encode(&self, item: &i32) -> String {
        self.values
            .iter()
            .find(|(_, number)| number == item)
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| item.to_string())
    }
}
