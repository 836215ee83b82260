//! Element codecs.
//!
//! A codec turns one command-line token into one element of a field and back.
//! The adapters in [`crate::value`] and [`crate::map`] are generic over a codec,
//! so every (kind × single/optional/repeated/map) combination shares one
//! implementation of the storage protocol.

mod bytes;
mod duration;
mod enumeration;
mod scalar;
mod timestamp;

pub use bytes::{Base64, Hex};
pub use duration::{format_duration, parse_duration, Duration};
pub use enumeration::Enum;
pub use scalar::{Bool, Double, Float, Int32, Int64, Str, UInt32, UInt64};
pub use timestamp::Timestamp;

use crate::error::ValueError;

pub trait Codec {
    type Item;

    /// Identifier reported to the flag registry (`"int32"`, `"bytesHex"`, ...).
    fn kind(&self) -> String;

    fn decode(&self, input: &str) -> Result<Self::Item, ValueError>;

    fn encode(&self, item: &Self::Item) -> String;

    /// Text shown for an unset optional value.
    fn zero(&self) -> String {
        String::new()
    }

    /// Value assumed when the flag is given without an argument.
    fn implicit_value(&self) -> Option<&'static str> {
        None
    }
}
