use heck::{ToSnakeCase, ToUpperCamelCase};
use protoflags_schema::{DefaultValue, ScalarKind};

/// Quotes `text` as a JSON string, for diagnostics.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Quotes `text` as a Rust string literal.
pub fn rust_str(text: &str) -> String {
    format!("{:?}", text)
}

const KEYWORDS: [&str; 52] = [
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen",
    "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override",
    "priv", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where",
    "while", "yield",
];

/// Escapes an identifier the way prost does: raw identifiers where Rust
/// allows them, a trailing underscore where it does not.
fn escape_ident(ident: String) -> String {
    match ident.as_str() {
        "self" | "super" | "crate" | "Self" | "extern" => format!("{}_", ident),
        s if KEYWORDS.contains(&s) => format!("r#{}", ident),
        _ => ident,
    }
}

/// The struct field prost generates for a protobuf field.
pub fn rust_field_name(name: &str) -> String {
    escape_ident(name.to_snake_case())
}

/// Path of the struct prost generates for a message, relative to the
/// package module: enclosing messages become snake_case modules.
pub fn rust_type_path(path: &[String]) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(path.len());
    if let Some((last, parents)) = path.split_last() {
        for parent in parents {
            segments.push(escape_ident(parent.to_snake_case()));
        }
        segments.push(escape_ident(last.to_upper_camel_case()));
    }
    segments.join("::")
}

/// Flag name used when the options do not set one: the field name in lower
/// case, with `_` turned into `-`.
pub fn default_flag_name(field_name: &str) -> String {
    field_name.to_lowercase().replace('_', "-")
}

/// The Rust type prost uses for a scalar kind.
pub fn rust_scalar_type(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Float    => "f32",
        ScalarKind::Double   => "f64",
        ScalarKind::Int32    => "i32",
        ScalarKind::Int64    => "i64",
        ScalarKind::UInt32   => "u32",
        ScalarKind::UInt64   => "u64",
        ScalarKind::SInt32   => "i32",
        ScalarKind::SInt64   => "i64",
        ScalarKind::Fixed32  => "u32",
        ScalarKind::Fixed64  => "u64",
        ScalarKind::SFixed32 => "i32",
        ScalarKind::SFixed64 => "i64",
        ScalarKind::Bool     => "bool",
        ScalarKind::String   => "String",
    }
}

/// The runtime codec for a scalar kind, by the Rust type it decodes into.
pub fn scalar_codec(kind: ScalarKind) -> &'static str {
    match rust_scalar_type(kind) {
        "f32"  => "Float",
        "f64"  => "Double",
        "i32"  => "Int32",
        "i64"  => "Int64",
        "u32"  => "UInt32",
        "u64"  => "UInt64",
        "bool" => "Bool",
        _      => "Str",
    }
}

/// A Rust literal for `value`, typed like `kind`'s field; `None` when the
/// value's type is not the field's.
pub fn default_literal(kind: ScalarKind, value: DefaultValue) -> Option<String> {
    let literal = match (rust_scalar_type(kind), value) {
        ("f32", DefaultValue::Float(v)) if v.is_nan() => "::core::f32::NAN".to_string(),
        ("f32", DefaultValue::Float(v)) if v.is_infinite() => {
            format!("{}::core::f32::INFINITY", if v < 0.0 { "-" } else { "" })
        }
        ("f32", DefaultValue::Float(v))  => format!("{:?}f32", v),
        ("f64", DefaultValue::Double(v)) if v.is_nan() => "::core::f64::NAN".to_string(),
        ("f64", DefaultValue::Double(v)) if v.is_infinite() => {
            format!("{}::core::f64::INFINITY", if v < 0.0 { "-" } else { "" })
        }
        ("f64", DefaultValue::Double(v)) => format!("{:?}f64", v),
        ("i32", DefaultValue::Int32(v))  => format!("{}i32", v),
        ("i64", DefaultValue::Int64(v))  => format!("{}i64", v),
        ("u32", DefaultValue::UInt32(v)) => format!("{}u32", v),
        ("u64", DefaultValue::UInt64(v)) => format!("{}u64", v),
        ("bool", DefaultValue::Bool(v))  => v.to_string(),
        _ => return None,
    };
    Some(literal)
}
