//! protoflags-compiler
//!
//! This crate implements:
//!  1) Decoding of `protoc` plugin requests with the `flags.*` options intact,
//!  2) Loading of the descriptors into the `protoflags-schema` model,
//!  3) A checker for flag options (type fit, unique names, nesting cycles),
//!  4) Code generation of `Bind` / `SetDefaults` implementations, and
//!  5) Error types (`CompileError`) and plugin parameters (`Config`).

pub mod compiler;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod gen_rust;
pub mod options;
pub mod utils;
pub mod verifier;

pub use compiler::{compile_schema, generate, PLUGIN_NAME};
pub use config::Config;
pub use descriptor::{decode_request, load_schema, Request};
pub use error::CompileError;
pub use gen_rust::compile_file_to_rust;
pub use verifier::verify_schema;
