use super::Codec;
use crate::error::ValueError;

macro_rules! integer_codec {
    ($name:ident, $ty:ty, $kind:literal) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Codec for $name {
            type Item = $ty;

            fn kind(&self) -> String {
                $kind.to_string()
            }

            fn decode(&self, input: &str) -> Result<$ty, ValueError> {
                input
                    .parse::<$ty>()
                    .map_err(|err| ValueError::invalid($kind, input, err))
            }

            fn encode(&self, item: &$ty) -> String {
                item.to_string()
            }

            fn zero(&self) -> String {
                "0".to_string()
            }
        }
    };
}

integer_codec!(Int32, i32, "int32");
integer_codec!(Int64, i64, "int64");
integer_codec!(UInt32, u32, "uint32");
integer_codec!(UInt64, u64, "uint64");

fn is_infinity_literal(input: &str) -> bool {
    let unsigned = input.trim_start_matches(&['+', '-'][..]);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

macro_rules! float_codec {
    ($name:ident, $ty:ty, $kind:literal) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Codec for $name {
            type Item = $ty;

            fn kind(&self) -> String {
                $kind.to_string()
            }

            fn decode(&self, input: &str) -> Result<$ty, ValueError> {
                let value = input
                    .parse::<$ty>()
                    .map_err(|err| ValueError::invalid($kind, input, err))?;
                if value.is_infinite() && !is_infinity_literal(input) {
                    return Err(ValueError::invalid($kind, input, "value out of range"));
                }
                Ok(value)
            }

            // `Display` for floats is the shortest text that reads back exactly.
            fn encode(&self, item: &$ty) -> String {
                item.to_string()
            }

            fn zero(&self) -> String {
                "0".to_string()
            }
        }
    };
}

float_codec!(Float, f32, "float32");
float_codec!(Double, f64, "float64");

#[derive(Debug, Clone, Copy, Default)]
pub struct Bool;

impl Codec for Bool {
    type Item = bool;

    fn kind(&self) -> String {
        "bool".to_string()
    }

    fn decode(&self, input: &str) -> Result<bool, ValueError> {
        match input {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err(ValueError::invalid("bool", input, "expected true or false")),
        }
    }

    fn encode(&self, item: &bool) -> String {
        item.to_string()
    }

    fn zero(&self) -> String {
        "false".to_string()
    }

    fn implicit_value(&self) -> Option<&'static str> {
        Some("true")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Str;

impl Codec for Str {
    type Item = String;

    fn kind(&self) -> String {
        "string".to_string()
    }

    fn decode(&self, input: &str) -> Result<String, ValueError> {
        Ok(input.to_string())
    }

    fn encode(&self, item: &String) -> String {
        item.clone()
    }
}
