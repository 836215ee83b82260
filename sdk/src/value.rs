//! Adapters between string-valued flags and message fields.

use crate::codec::Codec;
use crate::encoding::{read_csv, strip_brackets, write_csv};
use crate::error::ValueError;

/// What the flag registry needs from a flag's storage.
///
/// `parse` either succeeds or leaves the backing field exactly as it was.
pub trait Value {
    fn parse(&mut self, input: &str) -> Result<(), ValueError>;

    fn format(&self) -> String;

    fn kind(&self) -> String;

    /// Value used when the flag appears without an argument (`--verbose`).
    fn implicit_value(&self) -> Option<&'static str> {
        None
    }

    fn as_slice_mut(&mut self) -> Option<&mut dyn SliceValue> {
        None
    }
}

/// Extra operations offered by list-valued flags.
pub trait SliceValue {
    /// Adds one element, whatever state the list is in.
    fn append(&mut self, input: &str) -> Result<(), ValueError>;

    /// Overwrites the whole list.
    fn replace(&mut self, inputs: &[String]) -> Result<(), ValueError>;

    /// The elements in their encoded form.
    fn get_slice(&self) -> Vec<String>;
}

/// A field stored directly (`i32`, `String`, `Vec<u8>`, enum `i32`, ...).
pub struct Plain<'a, C: Codec> {
    target: &'a mut C::Item,
    codec:  C,
}

impl<'a, C: Codec> Plain<'a, C> {
    pub fn new(target: &'a mut C::Item, codec: C) -> Self {
        Plain { target, codec }
    }
}

impl<C: Codec> Value for Plain<'_, C> {
    fn parse(&mut self, input: &str) -> Result<(), ValueError> {
        *self.target = self.codec.decode(input)?;
        Ok(())
    }

    fn format(&self) -> String {
        self.codec.encode(self.target)
    }

    fn kind(&self) -> String {
        self.codec.kind()
    }

    fn implicit_value(&self) -> Option<&'static str> {
        self.codec.implicit_value()
    }
}

/// A field with presence: a nullable wrapper, an `optional` scalar or a
/// duration/timestamp message. The value is created on the first parse.
pub struct Optional<'a, C: Codec> {
    target: &'a mut Option<C::Item>,
    codec:  C,
}

impl<'a, C: Codec> Optional<'a, C> {
    pub fn new(target: &'a mut Option<C::Item>, codec: C) -> Self {
        Optional { target, codec }
    }
}

impl<C: Codec> Value for Optional<'_, C> {
    fn parse(&mut self, input: &str) -> Result<(), ValueError> {
        *self.target = Some(self.codec.decode(input)?);
        Ok(())
    }

    fn format(&self) -> String {
        match self.target.as_ref() {
            Some(item) => self.codec.encode(item),
            None => self.codec.zero(),
        }
    }

    fn kind(&self) -> String {
        self.codec.kind()
    }

    fn implicit_value(&self) -> Option<&'static str> {
        self.codec.implicit_value()
    }
}

/// A repeated field.
///
/// Each argument is a CSV list of elements, optionally wrapped in the `[...]`
/// that [`Value::format`] produces. The first argument replaces the list's
/// initial contents; later arguments append to it.
pub struct Repeated<'a, C: Codec> {
    target:  &'a mut Vec<C::Item>,
    codec:   C,
    touched: bool,
}

impl<'a, C: Codec> Repeated<'a, C> {
    pub fn new(target: &'a mut Vec<C::Item>, codec: C) -> Self {
        Repeated {
            target,
            codec,
            touched: false,
        }
    }

    fn decode_all<S: AsRef<str>>(&self, inputs: &[S]) -> Result<Vec<C::Item>, ValueError> {
        inputs.iter().map(|input| self.codec.decode(input.as_ref())).collect()
    }
}

impl<C: Codec> Value for Repeated<'_, C> {
    fn parse(&mut self, input: &str) -> Result<(), ValueError> {
        let items = self.decode_all(&read_csv(strip_brackets(input))?)?;
        if self.touched {
            self.target.extend(items);
        } else {
            *self.target = items;
            self.touched = true;
        }
        Ok(())
    }

    fn format(&self) -> String {
        let encoded = self.get_slice();
        let body = write_csv(&encoded).unwrap_or_else(|_| encoded.join(","));
        format!("[{body}]")
    }

    fn kind(&self) -> String {
        format!("{}Slice", self.codec.kind())
    }

    fn as_slice_mut(&mut self) -> Option<&mut dyn SliceValue> {
        Some(self)
    }
}

impl<C: Codec> SliceValue for Repeated<'_, C> {
    fn append(&mut self, input: &str) -> Result<(), ValueError> {
        let item = self.codec.decode(input)?;
        self.target.push(item);
        Ok(())
    }

    fn replace(&mut self, inputs: &[String]) -> Result<(), ValueError> {
        *self.target = self.decode_all(inputs)?;
        Ok(())
    }

    fn get_slice(&self) -> Vec<String> {
        self.target.iter().map(|item| self.codec.encode(item)).collect()
    }
}
