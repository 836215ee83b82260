//! Plugin parameters (`--flags_opt=runtime=::my_flags,suffix=.cli.rs`).

use crate::error::CompileError;
use crate::utils::quote;

pub const DEFAULT_RUNTIME: &str = "::protoflags";
pub const DEFAULT_SUFFIX: &str = ".flags.rs";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path of the runtime crate in emitted code.
    pub runtime: String,
    /// Appended to the input file stem to name each output file.
    pub suffix:  String,
    /// Pretty-print emitted code.
    pub format:  bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            runtime: DEFAULT_RUNTIME.to_string(),
            suffix:  DEFAULT_SUFFIX.to_string(),
            format:  true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runtime(mut self, path: &str) -> Self {
        self.runtime = path.trim_end_matches("::").to_string();
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    pub fn skip_format(mut self) -> Self {
        self.format = false;
        self
    }

    /// Reads the comma-separated `key=value` parameter string protoc passes
    /// along. An absent or empty parameter gives the defaults.
    pub fn from_parameter(parameter: Option<&str>) -> Result<Config, CompileError> {
        let mut config = Config::default();
        let parameter = match parameter {
            Some(p) if !p.trim().is_empty() => p,
            _ => return Ok(config),
        };

        for pair in parameter.split(',') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| CompileError::InvalidParameter(format!("{}: expected key=value", quote(pair))))?;
            let value = value.trim();

            match key.trim() {
                "runtime" => {
                    if value.is_empty() {
                        return Err(CompileError::InvalidParameter("runtime: path must not be empty".to_string()));
                    }
                    config = config.runtime(value);
                }
                "suffix" => {
                    if value.is_empty() {
                        return Err(CompileError::InvalidParameter("suffix: must not be empty".to_string()));
                    }
                    config = config.suffix(value);
                }
                "format" => {
                    config.format = match value {
                        "true" => true,
                        "false" => false,
                        other => {
                            return Err(CompileError::InvalidParameter(format!(
                                "format: expected true or false, got {}",
                                quote(other)
                            )))
                        }
                    };
                }
                other => {
                    return Err(CompileError::InvalidParameter(format!("unknown key {}", quote(other))));
                }
            }
        }

        Ok(config)
    }

    /// Output file name for an input `.proto` file.
    pub fn output_name(&self, proto_file: &str) -> String {
        let stem = proto_file.strip_suffix(".proto").unwrap_or(proto_file);
        format!("{}{}", stem, self.suffix)
    }
}
