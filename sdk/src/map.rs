//! Adapters for `map<string, V>` fields.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::Codec;
use crate::encoding::{read_csv_unquoted, strip_brackets, write_csv};
use crate::error::ValueError;
use crate::value::Value;

/// A map written as `key=value` pairs separated by commas, optionally
/// wrapped in the `[...]` that [`Value::format`] produces.
///
/// The first argument replaces the map's initial contents; later arguments are
/// merged into it, later keys winning.
pub struct StringMap<'a, C: Codec> {
    target:  &'a mut HashMap<String, C::Item>,
    codec:   C,
    touched: bool,
}

impl<'a, C: Codec> StringMap<'a, C> {
    pub fn new(target: &'a mut HashMap<String, C::Item>, codec: C) -> Self {
        StringMap {
            target,
            codec,
            touched: false,
        }
    }

    fn decode_entries(&self, input: &str) -> Result<Vec<(String, C::Item)>, ValueError> {
        read_csv_unquoted(strip_brackets(input))?
            .into_iter()
            .map(|entry| {
                let (key, value) = entry.split_once('=').ok_or_else(|| ValueError::MapEntry {
                    entry:  entry.clone(),
                    reason: "expected key=value".to_string(),
                })?;
                let item = self.codec.decode(value).map_err(|err| ValueError::MapEntry {
                    entry:  entry.clone(),
                    reason: err.to_string(),
                })?;
                Ok((key.to_string(), item))
            })
            .collect()
    }
}

impl<C: Codec> Value for StringMap<'_, C> {
    fn parse(&mut self, input: &str) -> Result<(), ValueError> {
        let entries = self.decode_entries(input)?;
        if !self.touched {
            self.target.clear();
            self.touched = true;
        }
        self.target.extend(entries);
        Ok(())
    }

    fn format(&self) -> String {
        let mut entries: Vec<String> = self
            .target
            .iter()
            .map(|(key, item)| format!("{}={}", key, self.codec.encode(item)))
            .collect();
        entries.sort();
        let body = write_csv(&entries).unwrap_or_else(|_| entries.join(","));
        format!("[{body}]")
    }

    fn kind(&self) -> String {
        let kind = self.codec.kind();
        let mut chars = kind.chars();
        match chars.next() {
            Some(first) => format!("stringTo{}{}", first.to_uppercase(), chars.as_str()),
            None => "stringTo".to_string(),
        }
    }
}

/// A map given as one JSON object. Every parse replaces the whole map.
pub struct JsonMap<'a, V> {
    target: &'a mut HashMap<String, V>,
}

impl<'a, V> JsonMap<'a, V> {
    pub fn new(target: &'a mut HashMap<String, V>) -> Self {
        JsonMap { target }
    }
}

impl<V> Value for JsonMap<'_, V>
where
    V: Serialize + DeserializeOwned,
{
    fn parse(&mut self, input: &str) -> Result<(), ValueError> {
        if input.trim().is_empty() {
            self.target.clear();
            return Ok(());
        }
        let decoded: HashMap<String, V> = serde_json::from_str(input).map_err(|err| ValueError::Json {
            input:  input.to_string(),
            reason: err.to_string(),
        })?;
        *self.target = decoded;
        Ok(())
    }

    fn format(&self) -> String {
        if self.target.is_empty() {
            return "{}".to_string();
        }
        let sorted: BTreeMap<&String, &V> = self.target.iter().collect();
        serde_json::to_string(&sorted).unwrap_or_else(|_| "{}".to_string())
    }

    fn kind(&self) -> String {
        "json".to_string()
    }
}
