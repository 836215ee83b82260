//! Conversion of the `flags.field` / `flags.message` option messages into the
//! schema's flag-options model.

use std::borrow::Cow;

use prost_reflect::{DynamicMessage, Value};
use protoflags_schema::{
    BytesEncoding, DefaultValue, FieldFlags, FlagCommon, FlagKind, MapFormat, RepeatedKind, ScalarKind,
};

/// Full name of the field-options extension.
pub const FIELD_EXTENSION: &str = "flags.field";
/// Full name of the message-options extension.
pub const MESSAGE_EXTENSION: &str = "flags.message";

fn get<'a>(options: &'a DynamicMessage, name: &str) -> Option<Cow<'a, Value>> {
    if !options.has_field_by_name(name) {
        return None;
    }
    options.get_field_by_name(name)
}

fn get_string(options: &DynamicMessage, name: &str) -> Option<String> {
    get(options, name).and_then(|value| value.as_str().map(str::to_string))
}

fn get_bool(options: &DynamicMessage, name: &str) -> bool {
    get(options, name).and_then(|value| value.as_bool()).unwrap_or(false)
}

fn get_enum(options: &DynamicMessage, name: &str) -> i32 {
    get(options, name)
        .and_then(|value| value.as_enum_number().or_else(|| value.as_i32()))
        .unwrap_or(0)
}

fn get_strings(options: &DynamicMessage, name: &str) -> Vec<String> {
    match get(options, name) {
        Some(value) => value
            .as_list()
            .map(|items| items.iter().filter_map(|item| item.as_str().map(str::to_string)).collect())
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

fn get_default(options: &DynamicMessage) -> Option<DefaultValue> {
    let value = get(options, "default")?;
    match &*value {
        Value::F32(v)  => Some(DefaultValue::Float(*v)),
        Value::F64(v)  => Some(DefaultValue::Double(*v)),
        Value::I32(v)  => Some(DefaultValue::Int32(*v)),
        Value::I64(v)  => Some(DefaultValue::Int64(*v)),
        Value::U32(v)  => Some(DefaultValue::UInt32(*v)),
        Value::U64(v)  => Some(DefaultValue::UInt64(*v)),
        Value::Bool(v) => Some(DefaultValue::Bool(*v)),
        _ => None,
    }
}

fn read_common(options: &DynamicMessage) -> FlagCommon {
    FlagCommon {
        name:             get_string(options, "name").filter(|s| !s.is_empty()),
        short:            get_string(options, "short").filter(|s| !s.is_empty()),
        usage:            get_string(options, "usage").unwrap_or_default(),
        hidden:           get_bool(options, "hidden"),
        deprecated:       get_bool(options, "deprecated"),
        deprecated_usage: get_string(options, "deprecated_usage").unwrap_or_default(),
        disabled:         get_bool(options, "disabled"),
    }
}

/// The variant set in a message whose fields form a `oneof`, with its options.
fn variant(options: &DynamicMessage) -> Option<(String, DynamicMessage)> {
    options.fields().find_map(|(field, value)| {
        field.containing_oneof()?;
        let message = value.as_message()?;
        Some((field.name().to_string(), message.clone()))
    })
}

fn repeated_kind(name: &str, options: &DynamicMessage) -> RepeatedKind {
    if let Some(kind) = ScalarKind::from_proto_name(name) {
        return RepeatedKind::Scalar(kind);
    }
    match name {
        "bytes"     => RepeatedKind::Bytes { encoding: BytesEncoding::from_number(get_enum(options, "encoding")) },
        "enum"      => RepeatedKind::Enum,
        "duration"  => RepeatedKind::Duration,
        "timestamp" => RepeatedKind::Timestamp { formats: get_strings(options, "formats") },
        other       => RepeatedKind::Unknown(other.to_string()),
    }
}

/// Converts a `flags.FieldFlags` message.
///
/// A record with no variant set converts to [`FlagKind::Unknown`] with an
/// empty name. For `repeated`, the element record's shared options become the
/// field's shared options.
pub fn field_flags(options: &DynamicMessage) -> FieldFlags {
    let (name, inner) = match variant(options) {
        Some(found) => found,
        None => return FieldFlags::new(FlagKind::Unknown(String::new())),
    };

    let kind = match name.as_str() {
        "bytes"     => FlagKind::Bytes { encoding: BytesEncoding::from_number(get_enum(&inner, "encoding")) },
        "enum"      => FlagKind::Enum { default: get(&inner, "default").and_then(|v| v.as_enum_number().or_else(|| v.as_i32())) },
        "duration"  => FlagKind::Duration,
        "timestamp" => FlagKind::Timestamp { formats: get_strings(&inner, "formats") },
        "map"       => FlagKind::Map { format: MapFormat::from_number(get_enum(&inner, "format")) },
        "message"   => FlagKind::Message { nested: get_bool(&inner, "nested") },
        "repeated"  => {
            return match variant(&inner) {
                Some((element, element_options)) => FieldFlags {
                    common: read_common(&element_options),
                    kind:   FlagKind::Repeated(repeated_kind(&element, &element_options)),
                },
                None => FieldFlags {
                    common: read_common(&inner),
                    kind:   FlagKind::Repeated(RepeatedKind::Unknown(String::new())),
                },
            };
        }
        other => match ScalarKind::from_proto_name(other) {
            Some(kind) => FlagKind::Scalar { kind, default: get_default(&inner) },
            None => FlagKind::Unknown(other.to_string()),
        },
    };

    FieldFlags {
        common: read_common(&inner),
        kind,
    }
}

/// Reads `disabled` from a `flags.MessageFlags` message.
pub fn message_disabled(options: &DynamicMessage) -> bool {
    get_bool(options, "disabled")
}
