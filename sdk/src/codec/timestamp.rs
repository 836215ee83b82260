use chrono::{DateTime, SecondsFormat, Utc};

use super::Codec;
use crate::encoding::{resolve_layout, Layout};
use crate::error::ValueError;

/// `google.protobuf.Timestamp` values read through an ordered list of
/// layouts; the first layout that accepts the input wins.
#[derive(Debug, Clone)]
pub struct Timestamp {
    names:   Vec<String>,
    layouts: Vec<Layout>,
}

impl Timestamp {
    /// `formats` are layout aliases (`RFC3339`, `DateOnly`, ...) or literal
    /// `chrono` format strings.
    pub fn new(formats: &[&str]) -> Self {
        Timestamp {
            names:   formats.iter().map(|name| name.to_string()).collect(),
            layouts: formats.iter().map(|name| resolve_layout(name)).collect(),
        }
    }

    pub fn formats(&self) -> &[String] {
        &self.names
    }
}

impl Codec for Timestamp {
    type Item = prost_types::Timestamp;

    fn kind(&self) -> String {
        "timestamp".to_string()
    }

    fn decode(&self, input: &str) -> Result<prost_types::Timestamp, ValueError> {
        let parsed = self
            .layouts
            .iter()
            .find_map(|layout| layout.parse(input))
            .ok_or_else(|| ValueError::Timestamp {
                input:   input.to_string(),
                layouts: self.names.join(", "),
            })?;

        Ok(prost_types::Timestamp {
            seconds: parsed.timestamp(),
            nanos:   parsed.timestamp_subsec_nanos() as i32,
        })
    }

    fn encode(&self, item: &prost_types::Timestamp) -> String {
        let nanos = u32::try_from(item.nanos).unwrap_or(0);
        match DateTime::<Utc>::from_timestamp(item.seconds, nanos) {
            Some(moment) => moment.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            None => format!("{}.{:09}s", item.seconds, item.nanos),
        }
    }
}
