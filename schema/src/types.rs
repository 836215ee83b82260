use serde::Serialize;

use crate::options::{FieldFlags, ScalarKind};

/// Every file the schema compiler handed over, dependencies included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub files: Vec<File>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    pub name:     String,
    pub package:  String,
    /// Whether code should be generated for this file (as opposed to a
    /// dependency that is only present for type resolution).
    pub generate: bool,
    /// Messages in declaration order; nested messages follow their parent.
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub name:      String,
    pub full_name: String,
    /// Names from the outermost enclosing message down to this one.
    pub path:      Vec<String>,
    pub disabled:  bool,
    pub fields:    Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name:     String,
    pub number:   i32,
    pub type_:    FieldType,
    pub repeated: bool,
    /// Explicit presence on a singular scalar or enum (`optional` keyword).
    pub optional: bool,
    pub map:      Option<MapEntry>,
    /// Name of the real (non-synthetic) oneof group this field belongs to.
    pub oneof:    Option<String>,
    pub flags:    Option<FieldFlags>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldType {
    Scalar(ScalarKind),
    Bytes,
    Enum(EnumType),
    Message(MessageType),
}

impl FieldType {
    pub fn describe(&self) -> String {
        match self {
            FieldType::Scalar(kind)  => kind.proto_name().to_string(),
            FieldType::Bytes         => "bytes".to_string(),
            FieldType::Enum(e)       => e.full_name.clone(),
            FieldType::Message(m)    => m.full_name.clone(),
        }
    }

    pub fn well_known(&self) -> Option<WellKnown> {
        match self {
            FieldType::Message(m) => m.well_known,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub key:   FieldType,
    pub value: FieldType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageType {
    pub full_name:  String,
    pub well_known: Option<WellKnown>,
}

impl MessageType {
    pub fn new(full_name: &str) -> Self {
        MessageType {
            full_name:  full_name.to_string(),
            well_known: WellKnown::from_full_name(full_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumType {
    pub name:      String,
    pub full_name: String,
    pub values:    Vec<EnumValue>,
}

impl EnumType {
    pub fn contains(&self, number: i32) -> bool {
        self.values.iter().any(|v| v.number == number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    pub name:   String,
    pub number: i32,
}

/// Message types the generator treats specially instead of as plain messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WellKnown {
    /// A nullable wrapper around a single scalar (`google.protobuf.Int32Value`, ...).
    Wrapper(ScalarKind),
    BytesValue,
    Duration,
    Timestamp,
    Empty,
    /// Any other `google.protobuf` message (`Struct`, `Any`, ...).
    Other,
}

impl WellKnown {
    pub fn from_full_name(full_name: &str) -> Option<WellKnown> {
        let name = full_name.trim_start_matches('.').strip_prefix("google.protobuf.")?;
        let known = match name {
            "DoubleValue" => WellKnown::Wrapper(ScalarKind::Double),
            "FloatValue"  => WellKnown::Wrapper(ScalarKind::Float),
            "Int64Value"  => WellKnown::Wrapper(ScalarKind::Int64),
            "UInt64Value" => WellKnown::Wrapper(ScalarKind::UInt64),
            "Int32Value"  => WellKnown::Wrapper(ScalarKind::Int32),
            "UInt32Value" => WellKnown::Wrapper(ScalarKind::UInt32),
            "BoolValue"   => WellKnown::Wrapper(ScalarKind::Bool),
            "StringValue" => WellKnown::Wrapper(ScalarKind::String),
            "BytesValue"  => WellKnown::BytesValue,
            "Duration"    => WellKnown::Duration,
            "Timestamp"   => WellKnown::Timestamp,
            "Empty"       => WellKnown::Empty,
            _             => WellKnown::Other,
        };
        Some(known)
    }
}

impl Schema {
    pub fn find_message(&self, full_name: &str) -> Option<&Message> {
        let full_name = full_name.trim_start_matches('.');
        self.files
            .iter()
            .flat_map(|file| file.messages.iter())
            .find(|message| message.full_name == full_name)
    }
}

impl Field {
    /// A singular field of `type_` with no options attached.
    pub fn new(name: &str, number: i32, type_: FieldType) -> Self {
        Field {
            name: name.to_string(),
            number,
            type_,
            repeated: false,
            optional: false,
            map: None,
            oneof: None,
            flags: None,
        }
    }

    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Whether the field carries a flag that will be registered.
    pub fn is_enabled(&self) -> bool {
        self.flags.as_ref().is_some_and(|flags| !flags.common.disabled)
    }
}
