//! protoflags
//!
//! Runtime support for code generated by `protoc-gen-flags`.
//!
//! - `Bind` / `SetDefaults` traits implemented by generated code
//! - `FlagSet`, a clap-backed flag registry
//! - value adapters between flag arguments and prost message fields
//! - `NameBuilder` for hierarchical flag names

pub mod codec;
pub mod encoding;
pub mod error;
pub mod flagset;
pub mod map;
pub mod names;
pub mod traits;
pub mod value;

pub use error::{FlagError, ValueError};
pub use flagset::{Flag, FlagSet};
pub use map::{JsonMap, StringMap};
pub use names::NameBuilder;
pub use traits::{Bind, SetDefaults};
pub use value::{Optional, Plain, Repeated, SliceValue, Value};
