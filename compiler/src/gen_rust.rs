use protoflags_schema::{
    BytesEncoding, EnumType, Field, FieldFlags, FieldType, File, FlagKind, MapFormat, Message, RepeatedKind,
    ScalarKind, WellKnown,
};

use crate::{
    config::Config,
    utils::{default_literal, rust_field_name, rust_str, rust_type_path, scalar_codec},
    verifier::flag_name,
};

/// Whether any message of `file` carries flag options.
pub fn has_flags(file: &File) -> bool {
    file.messages
        .iter()
        .any(|message| !message.disabled && message.fields.iter().any(|field| field.flags.is_some()))
}

fn codec(rt: &str, name: &str) -> String {
    format!("{}::codec::{}", rt, name)
}

fn bytes_codec(rt: &str, encoding: BytesEncoding) -> String {
    match encoding {
        BytesEncoding::Hex => codec(rt, "Hex"),
        _ => codec(rt, "Base64"),
    }
}

fn enum_codec(rt: &str, enum_type: &EnumType) -> String {
    let values: Vec<String> = enum_type
        .values
        .iter()
        .map(|value| format!("({}, {}i32)", rust_str(&value.name), value.number))
        .collect();
    format!(
        "{}::codec::Enum::new({}, &[{}])",
        rt,
        rust_str(&enum_type.name),
        values.join(", ")
    )
}

fn timestamp_codec(rt: &str, formats: &[String]) -> String {
    let formats: Vec<String> = formats.iter().map(|format| rust_str(format)).collect();
    format!("{}::codec::Timestamp::new(&[{}])", rt, formats.join(", "))
}

/// The adapter expression registered for a field, or `None` for options that
/// do not register a flag.
fn adapter(rt: &str, field: &Field, flags: &FieldFlags) -> Option<String> {
    let target = format!("&mut self.{}", rust_field_name(&field.name));
    // Wrappers, `optional` scalars and message-typed values are `Option<T>`.
    let presence = field.optional || field.type_.well_known().is_some();
    let single = |codec: String| {
        let kind = if presence { "Optional" } else { "Plain" };
        format!("{}::{}::new({}, {})", rt, kind, target, codec)
    };
    let repeated = |codec: String| format!("{}::Repeated::new({}, {})", rt, target, codec);

    let expr = match &flags.kind {
        FlagKind::Scalar { kind, .. } => single(codec(rt, scalar_codec(*kind))),
        FlagKind::Bytes { encoding } => single(bytes_codec(rt, *encoding)),
        FlagKind::Enum { .. } => match &field.type_ {
            FieldType::Enum(enum_type) => single(enum_codec(rt, enum_type)),
            _ => return None,
        },
        FlagKind::Duration => single(codec(rt, "Duration")),
        FlagKind::Timestamp { formats } => single(timestamp_codec(rt, formats)),
        FlagKind::Map { format } => match format {
            MapFormat::StringToString => format!("{}::StringMap::new({}, {})", rt, target, codec(rt, "Str")),
            MapFormat::StringToInt => {
                let value = match field.map.as_ref().map(|entry| &entry.value) {
                    Some(FieldType::Scalar(kind)) => *kind,
                    _ => ScalarKind::Int64,
                };
                format!("{}::StringMap::new({}, {})", rt, target, codec(rt, scalar_codec(value)))
            }
            _ => format!("{}::JsonMap::new({})", rt, target),
        },
        FlagKind::Repeated(element) => match element {
            RepeatedKind::Scalar(kind) => repeated(codec(rt, scalar_codec(*kind))),
            RepeatedKind::Bytes { encoding } => repeated(bytes_codec(rt, *encoding)),
            RepeatedKind::Enum => match &field.type_ {
                FieldType::Enum(enum_type) => repeated(enum_codec(rt, enum_type)),
                _ => return None,
            },
            RepeatedKind::Duration => repeated(codec(rt, "Duration")),
            RepeatedKind::Timestamp { formats } => repeated(timestamp_codec(rt, formats)),
            RepeatedKind::Unknown(_) => return None,
        },
        FlagKind::Message { .. } | FlagKind::Unknown(_) => return None,
    };
    Some(expr)
}

fn generate_field_bind(rt: &str, field: &Field, flags: &FieldFlags) -> Option<String> {
    let adapter = adapter(rt, field, flags)?;
    let short = match flags.common.short.as_ref().and_then(|s| s.chars().next()) {
        Some(c) => format!("::core::option::Option::Some({:?})", c),
        None => "::core::option::Option::None".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("        {".to_string());
    lines.push(format!("            let name = names.build({});", rust_str(&flag_name(field, flags))));
    lines.push(format!(
        "            fs.var({}, &name, {}, {})?;",
        adapter,
        short,
        rust_str(&flags.common.usage)
    ));
    if flags.common.hidden {
        lines.push("            fs.mark_hidden(&name)?;".to_string());
    }
    if flags.common.deprecated {
        lines.push(format!(
            "            fs.mark_deprecated(&name, {})?;",
            rust_str(&flags.common.deprecated_usage)
        ));
    }
    lines.push("        }".to_string());
    Some(lines.join("\n"))
}

fn nested_target(field: &Field) -> String {
    format!(
        "self.{}.get_or_insert_with(::core::default::Default::default)",
        rust_field_name(&field.name)
    )
}

/// Generates the `Bind` implementation for a message.
fn generate_bind(rt: &str, message: &Message) -> String {
    let type_path = rust_type_path(&message.path);
    let mut body = Vec::new();
    let mut skipped = Vec::new();

    for field in &message.fields {
        let flags = match &field.flags {
            Some(flags) => flags,
            None => continue,
        };
        if flags.common.disabled {
            skipped.push(format!("`{}` (disabled)", field.name));
            continue;
        }
        if let FlagKind::Message { nested } = flags.kind {
            if nested {
                body.push(format!(
                    "        {}::Bind::bind({}, fs, &names.nested({}))?;",
                    rt,
                    nested_target(field),
                    rust_str(&flag_name(field, flags))
                ));
            } else {
                skipped.push(format!("`{}` (not nested)", field.name));
            }
            continue;
        }
        if let Some(block) = generate_field_bind(rt, field, flags) {
            body.push(block);
        }
    }

    let mut lines = Vec::new();
    lines.push(format!("impl {}::Bind for {} {{", rt, type_path));
    lines.push(format!("    /// Registers the flags of `{}`.", message.full_name));
    if !skipped.is_empty() {
        lines.push("    ///".to_string());
        lines.push(format!("    /// Fields without a flag: {}.", skipped.join(", ")));
    }
    lines.push("    #[allow(unused_variables)]".to_string());
    lines.push(format!(
        "    fn bind<'a>(&'a mut self, fs: &mut {rt}::FlagSet<'a>, names: &{rt}::NameBuilder) -> ::core::result::Result<(), {rt}::FlagError> {{",
        rt = rt
    ));
    for block in body {
        lines.push(block);
    }
    lines.push("        ::core::result::Result::Ok(())".to_string());
    lines.push("    }".to_string());
    lines.push("}".to_string());
    lines.join("\n")
}

fn generate_field_default(rt: &str, field: &Field, flags: &FieldFlags) -> Option<String> {
    if flags.common.disabled {
        return None;
    }
    let name = rust_field_name(&field.name);
    match &flags.kind {
        FlagKind::Scalar { kind, default: Some(value) } => {
            let literal = default_literal(*kind, *value)?;
            let wrapped = field.optional || matches!(field.type_.well_known(), Some(WellKnown::Wrapper(_)));
            if wrapped {
                Some(format!("        self.{} = ::core::option::Option::Some({});", name, literal))
            } else {
                Some(format!("        self.{} = {};", name, literal))
            }
        }
        FlagKind::Message { nested: true } => Some(format!(
            "        {}::SetDefaults::set_defaults({});",
            rt,
            nested_target(field)
        )),
        _ => None,
    }
}

/// Generates the `SetDefaults` implementation for a message.
fn generate_set_defaults(rt: &str, message: &Message) -> String {
    let mut lines = Vec::new();
    lines.push(format!("impl {}::SetDefaults for {} {{", rt, rust_type_path(&message.path)));
    lines.push("    fn set_defaults(&mut self) {".to_string());
    for field in &message.fields {
        if let Some(flags) = &field.flags {
            if let Some(line) = generate_field_default(rt, field, flags) {
                lines.push(line);
            }
        }
    }
    lines.push("    }".to_string());
    lines.push("}".to_string());
    lines.join("\n")
}

/// Generates the flag bindings for every message of `file` as Rust source.
///
/// Disabled messages are skipped. The output is meant to be `include!`d in
/// the module holding the prost output for the file's package.
pub fn compile_file_to_rust(file: &File, config: &Config) -> String {
    let rt = config.runtime.as_str();
    let mut rust_code: Vec<String> = Vec::new();

    for message in &file.messages {
        if message.disabled {
            log::debug!("skipping disabled message {}", message.full_name);
            continue;
        }
        log::debug!("generating bindings for {}", message.full_name);
        rust_code.push(generate_bind(rt, message));
        rust_code.push(String::new());
        rust_code.push(generate_set_defaults(rt, message));
        rust_code.push(String::new());
    }

    rust_code.join("\n")
}
