//! Data model for the protoflags generator.
//!
//! The schema compiler hands the generator a forest of files, messages and
//! enums. This crate holds the plain-data form of that input together with the
//! per-field flag options, so that checking and code generation never touch
//! protobuf descriptors directly.
//!
//! ```
//! use protoflags_schema::*;
//!
//! let field = Field::new("port", 2, FieldType::Scalar(ScalarKind::Int32))
//!     .with_flags(FieldFlags::new(FlagKind::Scalar { kind: ScalarKind::Int32, default: None }).with_usage("Port"));
//! assert!(field.is_enabled());
//! ```

pub mod options;
pub mod types;

pub use options::*;
pub use types::*;
