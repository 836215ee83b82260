use std::collections::HashMap;

use protoflags_schema::{
    BytesEncoding, Field, FieldFlags, FieldType, FlagKind, MapFormat, Message, RepeatedKind, ScalarKind, Schema,
    WellKnown,
};

use crate::{error::CompileError, utils::{default_flag_name, default_literal, quote}};

/// Scalar kinds that have a `google.protobuf.*Value` wrapper.
pub const WRAPPED_KINDS: [ScalarKind; 8] = [
    ScalarKind::Float,
    ScalarKind::Double,
    ScalarKind::Int32,
    ScalarKind::Int64,
    ScalarKind::UInt32,
    ScalarKind::UInt64,
    ScalarKind::Bool,
    ScalarKind::String,
];

/// The flag name a field registers under, before any prefix is applied.
pub fn flag_name(field: &Field, flags: &FieldFlags) -> String {
    match &flags.common.name {
        Some(name) => name.clone(),
        None => default_flag_name(&field.name),
    }
}

/// Whether the options register a flag of their own (as opposed to binding a
/// submessage or nothing at all).
pub fn registers_flag(flags: &FieldFlags) -> bool {
    !flags.common.disabled && !matches!(flags.kind, FlagKind::Message { .. })
}

fn field_error(message: &Message, field: &Field, reason: String) -> CompileError {
    CompileError::InvalidField {
        message: message.full_name.clone(),
        field:   field.name.clone(),
        reason,
    }
}

fn mismatch(field: &Field, variant: &str) -> String {
    format!(
        "flag kind {} does not match the declared type {}{}",
        quote(variant),
        if field.repeated { "repeated " } else { "" },
        field.type_.describe()
    )
}

fn check_formats(formats: &[String]) -> Result<(), String> {
    if formats.is_empty() {
        return Err("timestamp flags need at least one format".to_string());
    }
    let mut seen: Vec<&str> = Vec::with_capacity(formats.len());
    for format in formats {
        if format.is_empty() {
            return Err("timestamp formats must not be empty".to_string());
        }
        if seen.contains(&format.as_str()) {
            return Err(format!("timestamp format {} is listed twice", quote(format)));
        }
        seen.push(format);
    }
    Ok(())
}

fn check_encoding(encoding: BytesEncoding) -> Result<(), String> {
    match encoding {
        BytesEncoding::Base64 | BytesEncoding::Hex => Ok(()),
        BytesEncoding::Unspecified => Err("bytes flags need an encoding (BASE64 or HEX)".to_string()),
        BytesEncoding::Unknown(n) => Err(format!("unknown bytes encoding {}", n)),
    }
}

fn check_map(field: &Field, format: MapFormat) -> Result<(), String> {
    let entry = match &field.map {
        Some(entry) => entry,
        None => return Err(mismatch(field, "map")),
    };
    let string_key = entry.key == FieldType::Scalar(ScalarKind::String);
    match format {
        // Decoded with serde_json into HashMap<String, V>.
        MapFormat::Unspecified | MapFormat::Json => {
            if !string_key {
                Err(format!("JSON maps need string keys, found {}", entry.key.describe()))
            } else if matches!(entry.value, FieldType::Message(_)) {
                Err(format!("JSON maps cannot hold message values ({})", entry.value.describe()))
            } else {
                Ok(())
            }
        }
        MapFormat::StringToString => {
            if string_key && entry.value == FieldType::Scalar(ScalarKind::String) {
                Ok(())
            } else {
                Err(format!(
                    "STRING_TO_STRING needs map<string, string>, found map<{}, {}>",
                    entry.key.describe(),
                    entry.value.describe()
                ))
            }
        }
        MapFormat::StringToInt => {
            let int_value = matches!(entry.value, FieldType::Scalar(kind) if kind.is_integer());
            if string_key && int_value {
                Ok(())
            } else {
                Err(format!(
                    "STRING_TO_INT needs a string key and an integer value, found map<{}, {}>",
                    entry.key.describe(),
                    entry.value.describe()
                ))
            }
        }
        MapFormat::Unknown(n) => Err(format!("unknown map format {}", n)),
    }
}

fn check_repeated(field: &Field, element: &RepeatedKind) -> Result<(), String> {
    if !field.repeated || field.map.is_some() {
        return Err(format!("the repeated variant needs a repeated field, found {}", field.type_.describe()));
    }
    let matches = match element {
        // prost lowers repeated wrappers to `Vec<T>` of the wrapped value.
        RepeatedKind::Scalar(kind) => {
            field.type_ == FieldType::Scalar(*kind)
                || (WRAPPED_KINDS.contains(kind) && field.type_.well_known() == Some(WellKnown::Wrapper(*kind)))
        }
        RepeatedKind::Bytes { encoding } => {
            check_encoding(*encoding)?;
            field.type_ == FieldType::Bytes || field.type_.well_known() == Some(WellKnown::BytesValue)
        }
        RepeatedKind::Enum => matches!(field.type_, FieldType::Enum(_)),
        RepeatedKind::Duration => field.type_.well_known() == Some(WellKnown::Duration),
        RepeatedKind::Timestamp { formats } => {
            check_formats(formats)?;
            field.type_.well_known() == Some(WellKnown::Timestamp)
        }
        RepeatedKind::Unknown(name) if name.is_empty() => {
            return Err("repeated flag options do not set an element kind".to_string())
        }
        RepeatedKind::Unknown(name) => return Err(format!("unknown repeated flag kind {}", quote(name))),
    };
    if matches {
        Ok(())
    } else {
        Err(mismatch(field, "repeated"))
    }
}

fn check_nested(schema: &Schema, field: &Field) -> Result<(), String> {
    if field.repeated || field.map.is_some() {
        return Err("nested bindings need a singular message field".to_string());
    }
    let target = match &field.type_ {
        FieldType::Message(m) if m.well_known.is_none() => &m.full_name,
        FieldType::Message(m) => {
            return Err(format!("{} is a well-known type and cannot be nested", m.full_name));
        }
        other => return Err(format!("nested bindings need a message field, found {}", other.describe())),
    };
    match schema.find_message(target) {
        None => Err(format!("message {} is not part of the request", target)),
        Some(message) if message.disabled => Err(format!("message {} has flags disabled", target)),
        Some(_) => Ok(()),
    }
}

fn check_kind(schema: &Schema, field: &Field, flags: &FieldFlags) -> Result<(), String> {
    let singular = !field.repeated && field.map.is_none();
    let requires_singular = |variant: &str| {
        if singular {
            Ok(())
        } else {
            Err(format!("{}; use the repeated variant", mismatch(field, variant)))
        }
    };

    match &flags.kind {
        FlagKind::Scalar { kind, default } => {
            requires_singular(kind.proto_name())?;
            let raw = field.type_ == FieldType::Scalar(*kind);
            let wrapped = WRAPPED_KINDS.contains(kind) && field.type_.well_known() == Some(WellKnown::Wrapper(*kind));
            if !raw && !wrapped {
                return Err(mismatch(field, kind.proto_name()));
            }
            if let Some(value) = default {
                if default_literal(*kind, *value).is_none() {
                    return Err(format!("default {:?} does not fit a {} field", value, kind.proto_name()));
                }
            }
        }
        FlagKind::Bytes { encoding } => {
            requires_singular("bytes")?;
            if field.type_ != FieldType::Bytes && field.type_.well_known() != Some(WellKnown::BytesValue) {
                return Err(mismatch(field, "bytes"));
            }
            check_encoding(*encoding)?;
        }
        FlagKind::Enum { default } => {
            requires_singular("enum")?;
            let enum_type = match &field.type_ {
                FieldType::Enum(e) => e,
                _ => return Err(mismatch(field, "enum")),
            };
            if let Some(number) = default {
                if !enum_type.contains(*number) {
                    return Err(format!("default {} is not a value of enum {}", number, enum_type.full_name));
                }
            }
        }
        FlagKind::Duration => {
            requires_singular("duration")?;
            if field.type_.well_known() != Some(WellKnown::Duration) {
                return Err(mismatch(field, "duration"));
            }
        }
        FlagKind::Timestamp { formats } => {
            requires_singular("timestamp")?;
            if field.type_.well_known() != Some(WellKnown::Timestamp) {
                return Err(mismatch(field, "timestamp"));
            }
            check_formats(formats)?;
        }
        FlagKind::Map { format } => check_map(field, *format)?,
        FlagKind::Message { nested } => {
            if *nested {
                check_nested(schema, field)?;
            }
        }
        FlagKind::Repeated(element) => check_repeated(field, element)?,
        FlagKind::Unknown(name) if name.is_empty() => return Err("flag options do not set a flag kind".to_string()),
        FlagKind::Unknown(name) => return Err(format!("unknown flag kind {}", quote(name))),
    }
    Ok(())
}

fn check_common(flags: &FieldFlags) -> Result<(), String> {
    let common = &flags.common;
    if let Some(short) = &common.short {
        if short.chars().count() != 1 {
            return Err(format!("short alias {} must be a single character", quote(short)));
        }
    }
    if registers_flag(flags) && common.usage.trim().is_empty() {
        return Err("usage must be set".to_string());
    }
    if common.deprecated && common.deprecated_usage.trim().is_empty() {
        return Err("deprecated flags need a deprecated_usage message".to_string());
    }
    Ok(())
}

/// Checks the flag options of one message.
pub fn verify_message(schema: &Schema, message: &Message) -> Result<(), CompileError> {
    if message.disabled {
        return Ok(());
    }
    log::debug!("verifying message {}", message.full_name);

    // 1) Flag names and short aliases are unique within the message
    let mut names: HashMap<String, &Field> = HashMap::new();
    let mut shorts: HashMap<&str, &Field> = HashMap::new();
    for field in &message.fields {
        let flags = match &field.flags {
            Some(flags) if registers_flag(flags) => flags,
            _ => continue,
        };
        let name = flag_name(field, flags);
        if let Some(previous) = names.get(&name) {
            return Err(field_error(
                message,
                field,
                format!("flag name {} is already used by field {}", quote(&name), quote(&previous.name)),
            ));
        }
        if let Some(short) = &flags.common.short {
            if let Some(previous) = shorts.get(short.as_str()) {
                return Err(field_error(
                    message,
                    field,
                    format!("short alias {} is already used by field {}", quote(short), quote(&previous.name)),
                ));
            }
            shorts.insert(short, field);
        }
        names.insert(name, field);
    }

    // 2) Each field's options fit its declared type
    for field in &message.fields {
        let flags = match &field.flags {
            Some(flags) => flags,
            None => continue,
        };
        log::debug!("verifying field {}.{} ({})", message.full_name, field.name, flags.kind.variant_name());

        if let Some(oneof) = &field.oneof {
            return Err(field_error(
                message,
                field,
                format!("fields of oneof {} cannot carry flag options", quote(oneof)),
            ));
        }
        if flags.common.disabled {
            continue;
        }
        check_kind(schema, field, flags).map_err(|reason| field_error(message, field, reason))?;
        check_common(flags).map_err(|reason| field_error(message, field, reason))?;
    }

    Ok(())
}

/// Returns `Ok(())` if every message of every file to generate passed, or the
/// first configuration error otherwise.
pub fn verify_schema(schema: &Schema) -> Result<(), CompileError> {
    for file in schema.files.iter().filter(|file| file.generate) {
        for message in &file.messages {
            verify_message(schema, message)?;
        }
    }

    // 3) Nested bindings do not contain themselves recursively
    let mut state: HashMap<String, u8> = HashMap::new();
    fn check_recursion(schema: &Schema, name: &str, state: &mut HashMap<String, u8>) -> Result<(), CompileError> {
        let message = match schema.find_message(name) {
            Some(message) if !message.disabled => message,
            _ => return Ok(()),
        };
        if let Some(&s) = state.get(name) {
            if s == 1 {
                return Err(CompileError::InvalidMessage {
                    message: name.to_string(),
                    reason:  "nested flag bindings recurse into this message".to_string(),
                });
            } else if s == 2 {
                return Ok(());
            }
        }
        state.insert(name.to_string(), 1);
        for field in &message.fields {
            let nested = match &field.flags {
                Some(flags) => !flags.common.disabled && flags.kind == FlagKind::Message { nested: true },
                None => false,
            };
            if let (true, FieldType::Message(target)) = (nested, &field.type_) {
                check_recursion(schema, target.full_name.trim_start_matches('.'), state)?;
            }
        }
        state.insert(name.to_string(), 2);
        Ok(())
    }

    for file in schema.files.iter().filter(|file| file.generate) {
        for message in &file.messages {
            check_recursion(schema, &message.full_name, &mut state)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoflags_schema::{
        DefaultValue, EnumType, EnumValue, File, MapEntry, MessageType,
    };
    use rstest::rstest;

    fn message(name: &str, fields: Vec<Field>) -> Message {
        Message {
            name:      name.to_string(),
            full_name: format!("acme.{}", name),
            path:      vec![name.to_string()],
            disabled:  false,
            fields,
        }
    }

    fn schema(messages: Vec<Message>) -> Schema {
        Schema {
            files: vec![File {
                name:     "acme.proto".to_string(),
                package:  "acme".to_string(),
                generate: true,
                messages,
            }],
        }
    }

    fn scalar(name: &str, kind: ScalarKind) -> Field {
        Field::new(name, 1, FieldType::Scalar(kind))
    }

    fn flags(kind: FlagKind) -> FieldFlags {
        FieldFlags::new(kind).with_usage("usage")
    }

    fn int32_flags() -> FieldFlags {
        flags(FlagKind::Scalar { kind: ScalarKind::Int32, default: None })
    }

    fn reason(result: Result<(), CompileError>) -> String {
        match result {
            Err(CompileError::InvalidField { reason, .. }) => reason,
            Err(CompileError::InvalidMessage { reason, .. }) => reason,
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    fn log_level() -> FieldType {
        FieldType::Enum(EnumType {
            name:      "LogLevel".to_string(),
            full_name: "acme.LogLevel".to_string(),
            values:    vec![
                EnumValue { name: "LOG_LEVEL_UNSPECIFIED".to_string(), number: 0 },
                EnumValue { name: "LOG_LEVEL_INFO".to_string(), number: 1 },
            ],
        })
    }

    #[test]
    fn accepts_raw_and_wrapped_scalars() {
        let s = schema(vec![message(
            "Service",
            vec![
                scalar("port", ScalarKind::Int32).with_flags(int32_flags()),
                Field::new("max", 2, FieldType::Message(MessageType::new(".google.protobuf.Int32Value")))
                    .with_flags(int32_flags().with_name("max")),
            ],
        )]);
        verify_schema(&s).unwrap();
    }

    fn repeated(type_: FieldType, element: RepeatedKind) -> Field {
        let mut field = Field::new("items", 1, type_).with_flags(flags(FlagKind::Repeated(element)));
        field.repeated = true;
        field
    }

    #[rstest]
    #[case(".google.protobuf.BytesValue", RepeatedKind::Bytes { encoding: BytesEncoding::Hex })]
    #[case(".google.protobuf.Int32Value", RepeatedKind::Scalar(ScalarKind::Int32))]
    #[case(".google.protobuf.UInt64Value", RepeatedKind::Scalar(ScalarKind::UInt64))]
    #[case(".google.protobuf.StringValue", RepeatedKind::Scalar(ScalarKind::String))]
    #[case(".google.protobuf.BoolValue", RepeatedKind::Scalar(ScalarKind::Bool))]
    fn repeated_wrappers_are_accepted(#[case] wrapper: &str, #[case] element: RepeatedKind) {
        let field = repeated(FieldType::Message(MessageType::new(wrapper)), element);
        verify_schema(&schema(vec![message("M", vec![field])])).unwrap();
    }

    #[rstest]
    #[case(".google.protobuf.Int64Value", RepeatedKind::Scalar(ScalarKind::Int32))]
    #[case(".google.protobuf.Int32Value", RepeatedKind::Scalar(ScalarKind::SInt32))]
    #[case(".google.protobuf.StringValue", RepeatedKind::Bytes { encoding: BytesEncoding::Base64 })]
    #[case(".google.protobuf.BytesValue", RepeatedKind::Scalar(ScalarKind::String))]
    fn repeated_wrappers_must_match(#[case] wrapper: &str, #[case] element: RepeatedKind) {
        let field = repeated(FieldType::Message(MessageType::new(wrapper)), element);
        assert!(reason(verify_schema(&schema(vec![message("M", vec![field])]))).contains("does not match"));
    }

    #[test]
    fn duplicate_names_mention_both_fields() {
        let s = schema(vec![message(
            "Service",
            vec![
                scalar("port", ScalarKind::Int32).with_flags(int32_flags()),
                scalar("listen_port", ScalarKind::Int32).with_flags(int32_flags().with_name("port")),
            ],
        )]);
        let err = verify_schema(&s).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("listen_port") && text.contains("\"port\""), "{}", text);
    }

    #[test]
    fn duplicate_shorts_are_rejected() {
        let s = schema(vec![message(
            "Service",
            vec![
                scalar("port", ScalarKind::Int32).with_flags(int32_flags().with_short("p")),
                scalar("peers", ScalarKind::Int32).with_flags(int32_flags().with_short("p")),
            ],
        )]);
        assert!(reason(verify_schema(&s)).contains("already used by field \"port\""));
    }

    #[test]
    fn disabled_fields_do_not_collide() {
        let mut disabled = int32_flags();
        disabled.common.disabled = true;
        let s = schema(vec![message(
            "Service",
            vec![
                scalar("port", ScalarKind::Int32).with_flags(int32_flags()),
                scalar("port2", ScalarKind::String).with_flags(disabled.with_name("port")),
            ],
        )]);
        verify_schema(&s).unwrap();
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let s = schema(vec![message("Service", vec![scalar("port", ScalarKind::Int64).with_flags(int32_flags())])]);
        assert_eq!(
            reason(verify_schema(&s)),
            "flag kind \"int32\" does not match the declared type int64"
        );

        let wrong_wrapper = Field::new("max", 1, FieldType::Message(MessageType::new(".google.protobuf.Int64Value")))
            .with_flags(int32_flags());
        assert!(verify_schema(&schema(vec![message("Service", vec![wrong_wrapper])])).is_err());
    }

    #[test]
    fn sint_kinds_have_no_wrapper() {
        let field = Field::new("n", 1, FieldType::Message(MessageType::new(".google.protobuf.Int32Value")))
            .with_flags(flags(FlagKind::Scalar { kind: ScalarKind::SInt32, default: None }));
        assert!(verify_schema(&schema(vec![message("M", vec![field])])).is_err());
    }

    #[test]
    fn oneof_members_cannot_have_flags() {
        let mut field = scalar("port", ScalarKind::Int32).with_flags(int32_flags());
        field.oneof = Some("listen".to_string());
        assert!(reason(verify_schema(&schema(vec![message("Service", vec![field])]))).contains("oneof"));
    }

    #[test]
    fn common_options_are_checked() {
        let no_usage = scalar("port", ScalarKind::Int32)
            .with_flags(FieldFlags::new(FlagKind::Scalar { kind: ScalarKind::Int32, default: None }));
        assert_eq!(reason(verify_schema(&schema(vec![message("S", vec![no_usage])]))), "usage must be set");

        let long_short = scalar("port", ScalarKind::Int32).with_flags(int32_flags().with_short("pp"));
        assert!(verify_schema(&schema(vec![message("S", vec![long_short])])).is_err());

        let mut deprecated = int32_flags();
        deprecated.common.deprecated = true;
        let field = scalar("port", ScalarKind::Int32).with_flags(deprecated);
        assert!(reason(verify_schema(&schema(vec![message("S", vec![field])]))).contains("deprecated_usage"));
    }

    #[test]
    fn enum_defaults_must_exist() {
        let field = Field::new("level", 1, log_level()).with_flags(flags(FlagKind::Enum { default: Some(7) }));
        assert!(reason(verify_schema(&schema(vec![message("S", vec![field])]))).contains("default 7"));

        let field = Field::new("level", 1, log_level()).with_flags(flags(FlagKind::Enum { default: Some(1) }));
        verify_schema(&schema(vec![message("S", vec![field])])).unwrap();
    }

    #[test]
    fn bytes_need_an_encoding() {
        let field = Field::new("key", 1, FieldType::Bytes)
            .with_flags(flags(FlagKind::Bytes { encoding: BytesEncoding::Unspecified }));
        assert!(verify_schema(&schema(vec![message("S", vec![field])])).is_err());

        let field = Field::new("key", 1, FieldType::Bytes).with_flags(flags(FlagKind::Bytes { encoding: BytesEncoding::Hex }));
        verify_schema(&schema(vec![message("S", vec![field])])).unwrap();
    }

    fn map_field(value: ScalarKind, format: MapFormat) -> Field {
        let mut field = Field::new("limits", 1, FieldType::Message(MessageType::new(".acme.S.LimitsEntry")));
        field.map = Some(MapEntry {
            key:   FieldType::Scalar(ScalarKind::String),
            value: FieldType::Scalar(value),
        });
        field.with_flags(flags(FlagKind::Map { format }))
    }

    #[test]
    fn map_formats_constrain_entry_types() {
        let ok = [
            map_field(ScalarKind::Int64, MapFormat::StringToInt),
            map_field(ScalarKind::UInt32, MapFormat::StringToInt),
            map_field(ScalarKind::String, MapFormat::StringToString),
            map_field(ScalarKind::Double, MapFormat::Json),
            map_field(ScalarKind::Bool, MapFormat::Unspecified),
        ];
        for field in ok {
            verify_schema(&schema(vec![message("S", vec![field])])).unwrap();
        }

        let bad = [
            map_field(ScalarKind::String, MapFormat::StringToInt),
            map_field(ScalarKind::Int32, MapFormat::StringToString),
            map_field(ScalarKind::Int32, MapFormat::Unknown(9)),
        ];
        for field in bad {
            assert!(verify_schema(&schema(vec![message("S", vec![field])])).is_err());
        }

        let not_a_map = scalar("limits", ScalarKind::String).with_flags(flags(FlagKind::Map { format: MapFormat::Json }));
        assert!(verify_schema(&schema(vec![message("S", vec![not_a_map])])).is_err());
    }

    #[test]
    fn timestamp_formats_are_validated() {
        let stamp = || Field::new("at", 1, FieldType::Message(MessageType::new(".google.protobuf.Timestamp")));
        for formats in [vec![], vec![String::new()], vec!["RFC3339".to_string(), "RFC3339".to_string()]] {
            let field = stamp().with_flags(flags(FlagKind::Timestamp { formats }));
            assert!(verify_schema(&schema(vec![message("S", vec![field])])).is_err());
        }
        let field = stamp().with_flags(flags(FlagKind::Timestamp { formats: vec!["RFC3339".to_string()] }));
        verify_schema(&schema(vec![message("S", vec![field])])).unwrap();
    }

    #[test]
    fn repeated_variants_need_repeated_fields() {
        let mut servers = scalar("servers", ScalarKind::String)
            .with_flags(flags(FlagKind::Repeated(RepeatedKind::Scalar(ScalarKind::String))));
        assert!(verify_schema(&schema(vec![message("S", vec![servers.clone()])])).is_err());
        servers.repeated = true;
        verify_schema(&schema(vec![message("S", vec![servers.clone()])])).unwrap();

        let mut single = scalar("servers", ScalarKind::String).with_flags(flags(FlagKind::Scalar {
            kind:    ScalarKind::String,
            default: None,
        }));
        single.repeated = true;
        assert!(reason(verify_schema(&schema(vec![message("S", vec![single])]))).contains("use the repeated variant"));
    }

    #[test]
    fn unknown_variants_are_rejected() {
        let field = scalar("x", ScalarKind::Int32).with_flags(flags(FlagKind::Unknown("any".to_string())));
        assert!(reason(verify_schema(&schema(vec![message("S", vec![field])]))).contains("unknown flag kind"));
    }

    fn nested(name: &str, target: &str) -> Field {
        Field::new(name, 1, FieldType::Message(MessageType::new(target)))
            .with_flags(FieldFlags::new(FlagKind::Message { nested: true }))
    }

    #[test]
    fn nested_targets_must_be_bindable() {
        let s = schema(vec![message("Config", vec![nested("tls", ".acme.Tls")]), message("Tls", vec![])]);
        verify_schema(&s).unwrap();

        let s = schema(vec![message("Config", vec![nested("tls", ".acme.Missing")])]);
        assert!(verify_schema(&s).is_err());

        let mut tls = message("Tls", vec![]);
        tls.disabled = true;
        let s = schema(vec![message("Config", vec![nested("tls", ".acme.Tls")]), tls]);
        assert!(reason(verify_schema(&s)).contains("disabled"));

        let s = schema(vec![message("Config", vec![nested("at", ".google.protobuf.Timestamp")])]);
        assert!(reason(verify_schema(&s)).contains("well-known"));
    }

    #[test]
    fn nested_cycles_are_rejected() {
        let s = schema(vec![
            message("A", vec![nested("b", ".acme.B")]),
            message("B", vec![nested("a", ".acme.A")]),
        ]);
        match verify_schema(&s) {
            Err(CompileError::InvalidMessage { message, .. }) => assert_eq!(message, "acme.A"),
            other => panic!("expected a recursion error, got {:?}", other),
        }
    }

    #[test]
    fn non_nested_message_fields_are_ignored() {
        let field = Field::new("parent", 1, FieldType::Message(MessageType::new(".acme.A")))
            .with_flags(FieldFlags::new(FlagKind::Message { nested: false }));
        verify_schema(&schema(vec![message("A", vec![field])])).unwrap();
    }

    #[test]
    fn disabled_messages_are_skipped() {
        let mut m = message("S", vec![scalar("x", ScalarKind::Int64).with_flags(int32_flags())]);
        m.disabled = true;
        verify_schema(&schema(vec![m])).unwrap();
    }

    #[test]
    fn float_defaults_are_accepted() {
        let field = scalar("ratio", ScalarKind::Float).with_flags(flags(FlagKind::Scalar {
            kind:    ScalarKind::Float,
            default: Some(DefaultValue::Float(0.5)),
        }));
        verify_schema(&schema(vec![message("S", vec![field])])).unwrap();
    }
}
