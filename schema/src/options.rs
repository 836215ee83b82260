use serde::Serialize;

/// Scalar field kinds a flag can be bound to.
///
/// The protobuf zig-zag and fixed-width encodings are kept distinct because a
/// flag-options variant must name the exact declared type of its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarKind {
    Float,
    Double,
    Int32,
    Int64,
    UInt32,
    UInt64,
    SInt32,
    SInt64,
    Fixed32,
    Fixed64,
    SFixed32,
    SFixed64,
    Bool,
    String,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 14] = [
        ScalarKind::Float,
        ScalarKind::Double,
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::UInt32,
        ScalarKind::UInt64,
        ScalarKind::SInt32,
        ScalarKind::SInt64,
        ScalarKind::Fixed32,
        ScalarKind::Fixed64,
        ScalarKind::SFixed32,
        ScalarKind::SFixed64,
        ScalarKind::Bool,
        ScalarKind::String,
    ];

    /// Name of the kind as written in `.proto` files and in the options schema.
    pub fn proto_name(self) -> &'static str {
        match self {
            ScalarKind::Float    => "float",
            ScalarKind::Double   => "double",
            ScalarKind::Int32    => "int32",
            ScalarKind::Int64    => "int64",
            ScalarKind::UInt32   => "uint32",
            ScalarKind::UInt64   => "uint64",
            ScalarKind::SInt32   => "sint32",
            ScalarKind::SInt64   => "sint64",
            ScalarKind::Fixed32  => "fixed32",
            ScalarKind::Fixed64  => "fixed64",
            ScalarKind::SFixed32 => "sfixed32",
            ScalarKind::SFixed64 => "sfixed64",
            ScalarKind::Bool     => "bool",
            ScalarKind::String   => "string",
        }
    }

    pub fn from_proto_name(name: &str) -> Option<ScalarKind> {
        ScalarKind::ALL.into_iter().find(|kind| kind.proto_name() == name)
    }

    /// Whether the kind belongs to the integer family (any width or encoding).
    pub fn is_integer(self) -> bool {
        !matches!(self, ScalarKind::Float | ScalarKind::Double | ScalarKind::Bool | ScalarKind::String)
    }
}

/// A default value declared on a numeric or bool flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DefaultValue {
    Float(f32),
    Double(f64),
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BytesEncoding {
    Unspecified,
    Base64,
    Hex,
    Unknown(i32),
}

impl BytesEncoding {
    pub fn from_number(number: i32) -> BytesEncoding {
        match number {
            0 => BytesEncoding::Unspecified,
            1 => BytesEncoding::Base64,
            2 => BytesEncoding::Hex,
            other => BytesEncoding::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MapFormat {
    /// Treated as [`MapFormat::Json`].
    Unspecified,
    Json,
    StringToString,
    StringToInt,
    Unknown(i32),
}

impl MapFormat {
    pub fn from_number(number: i32) -> MapFormat {
        match number {
            0 => MapFormat::Unspecified,
            1 => MapFormat::Json,
            2 => MapFormat::StringToString,
            3 => MapFormat::StringToInt,
            other => MapFormat::Unknown(other),
        }
    }
}

/// Options shared by every flag-options variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlagCommon {
    pub name:             Option<String>,
    pub short:            Option<String>,
    pub usage:            String,
    pub hidden:           bool,
    pub deprecated:       bool,
    pub deprecated_usage: String,
    pub disabled:         bool,
}

/// Element kinds accepted under the `repeated` variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RepeatedKind {
    Scalar(ScalarKind),
    Bytes { encoding: BytesEncoding },
    Enum,
    Duration,
    Timestamp { formats: Vec<String> },
    /// A variant name the generator does not know.
    Unknown(String),
}

/// The variant-specific part of a field's flag options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FlagKind {
    Scalar {
        kind:    ScalarKind,
        default: Option<DefaultValue>,
    },
    Bytes {
        encoding: BytesEncoding,
    },
    Enum {
        default: Option<i32>,
    },
    Duration,
    Timestamp {
        formats: Vec<String>,
    },
    Map {
        format: MapFormat,
    },
    Message {
        nested: bool,
    },
    Repeated(RepeatedKind),
    /// A variant name the generator does not know.
    Unknown(String),
}

impl FlagKind {
    /// The variant's name in the options schema, used in diagnostics.
    pub fn variant_name(&self) -> String {
        match self {
            FlagKind::Scalar { kind, .. } => kind.proto_name().to_string(),
            FlagKind::Bytes { .. }        => "bytes".to_string(),
            FlagKind::Enum { .. }         => "enum".to_string(),
            FlagKind::Duration            => "duration".to_string(),
            FlagKind::Timestamp { .. }    => "timestamp".to_string(),
            FlagKind::Map { .. }          => "map".to_string(),
            FlagKind::Message { .. }      => "message".to_string(),
            FlagKind::Repeated(_)         => "repeated".to_string(),
            FlagKind::Unknown(name)       => name.clone(),
        }
    }
}

/// The flag options attached to one field.
///
/// For the `repeated` variant the shared options come from the nested element
/// record; they are lifted into `common` when the options are loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFlags {
    pub common: FlagCommon,
    pub kind:   FlagKind,
}

impl FieldFlags {
    pub fn new(kind: FlagKind) -> Self {
        FieldFlags {
            common: FlagCommon::default(),
            kind,
        }
    }

    pub fn with_usage(mut self, usage: &str) -> Self {
        self.common.usage = usage.to_string();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.common.name = Some(name.to_string());
        self
    }

    pub fn with_short(mut self, short: &str) -> Self {
        self.common.short = Some(short.to_string());
        self
    }
}
