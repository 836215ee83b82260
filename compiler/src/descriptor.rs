//! Decoding of the plugin request and loading of the schema IR.
//!
//! `prost_types::compiler::CodeGeneratorRequest` decodes `proto_file` into
//! `prost_types::FileDescriptorProto`, which drops custom options. The request
//! is decoded here with `proto_file` kept as raw bytes instead, and the raw
//! files are loaded into a `prost_reflect::DescriptorPool`, where the
//! `flags.*` extensions stay readable.

use prost::Message as _;
use prost_reflect::{
    Cardinality, DescriptorPool, ExtensionDescriptor, FieldDescriptor, FileDescriptor, Kind, MessageDescriptor,
};
use protoflags_schema::{
    EnumType, EnumValue, Field, FieldType, File, MapEntry, Message, MessageType, ScalarKind, Schema,
};

use crate::error::CompileError;
use crate::options::{field_flags, message_disabled, FIELD_EXTENSION, MESSAGE_EXTENSION};

/// `google.protobuf.compiler.CodeGeneratorRequest` with undecoded files.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RawRequest {
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: Vec<String>,
    #[prost(string, optional, tag = "2")]
    pub parameter:        Option<String>,
    #[prost(bytes = "vec", repeated, tag = "15")]
    pub proto_file:       Vec<Vec<u8>>,
}

/// `google.protobuf.FileDescriptorSet` with undecoded files.
#[derive(Clone, PartialEq, prost::Message)]
pub struct RawFileSet {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub file: Vec<Vec<u8>>,
}

/// A decoded plugin request.
#[derive(Debug, Clone)]
pub struct Request {
    pub file_to_generate: Vec<String>,
    pub parameter:        Option<String>,
    pub pool:             DescriptorPool,
}

pub fn decode_request(bytes: &[u8]) -> Result<Request, CompileError> {
    let raw = RawRequest::decode(bytes)?;
    let set = RawFileSet { file: raw.proto_file };
    let pool = DescriptorPool::decode(set.encode_to_vec().as_slice())?;

    for name in &raw.file_to_generate {
        if pool.get_file_by_name(name).is_none() {
            return Err(CompileError::MissingFile(name.clone()));
        }
    }

    Ok(Request {
        file_to_generate: raw.file_to_generate,
        parameter:        raw.parameter,
        pool,
    })
}

fn scalar_kind(kind: &Kind) -> Option<ScalarKind> {
    let scalar = match kind {
        Kind::Float    => ScalarKind::Float,
        Kind::Double   => ScalarKind::Double,
        Kind::Int32    => ScalarKind::Int32,
        Kind::Int64    => ScalarKind::Int64,
        Kind::Uint32   => ScalarKind::UInt32,
        Kind::Uint64   => ScalarKind::UInt64,
        Kind::Sint32   => ScalarKind::SInt32,
        Kind::Sint64   => ScalarKind::SInt64,
        Kind::Fixed32  => ScalarKind::Fixed32,
        Kind::Fixed64  => ScalarKind::Fixed64,
        Kind::Sfixed32 => ScalarKind::SFixed32,
        Kind::Sfixed64 => ScalarKind::SFixed64,
        Kind::Bool     => ScalarKind::Bool,
        Kind::String   => ScalarKind::String,
        _ => return None,
    };
    Some(scalar)
}

fn field_type(kind: Kind) -> FieldType {
    if let Some(scalar) = scalar_kind(&kind) {
        return FieldType::Scalar(scalar);
    }
    match kind {
        Kind::Enum(descriptor) => FieldType::Enum(EnumType {
            name:      descriptor.name().to_string(),
            full_name: descriptor.full_name().to_string(),
            values:    descriptor
                .values()
                .map(|value| EnumValue {
                    name:   value.name().to_string(),
                    number: value.number(),
                })
                .collect(),
        }),
        Kind::Message(descriptor) => FieldType::Message(MessageType::new(descriptor.full_name())),
        _ => FieldType::Bytes,
    }
}

struct Loader {
    field_ext:   Option<ExtensionDescriptor>,
    message_ext: Option<ExtensionDescriptor>,
}

impl Loader {
    fn new(pool: &DescriptorPool) -> Self {
        Loader {
            field_ext:   pool.get_extension_by_name(FIELD_EXTENSION),
            message_ext: pool.get_extension_by_name(MESSAGE_EXTENSION),
        }
    }

    fn field(&self, descriptor: &FieldDescriptor) -> Field {
        let kind = descriptor.kind();
        let map = if descriptor.is_map() {
            match &kind {
                Kind::Message(entry) => Some(MapEntry {
                    key:   field_type(entry.map_entry_key_field().kind()),
                    value: field_type(entry.map_entry_value_field().kind()),
                }),
                _ => None,
            }
        } else {
            None
        };

        // proto3 `optional` fields sit in a synthetic oneof of their own.
        let proto3_optional = descriptor.field_descriptor_proto().proto3_optional();
        let oneof = descriptor
            .containing_oneof()
            .filter(|_| !proto3_optional)
            .map(|oneof| oneof.name().to_string());

        // prost keeps `required` fields as plain values.
        let is_message = matches!(kind, Kind::Message(_));
        let optional = descriptor.supports_presence()
            && descriptor.cardinality() != Cardinality::Required
            && !is_message
            && !descriptor.is_list()
            && oneof.is_none();

        let flags = self.field_ext.as_ref().and_then(|ext| {
            let options = descriptor.options();
            if !options.has_extension(ext) {
                return None;
            }
            options.get_extension(ext).as_message().map(field_flags)
        });

        Field {
            name: descriptor.name().to_string(),
            number: descriptor.number() as i32,
            type_: field_type(kind),
            repeated: descriptor.is_list(),
            optional,
            map,
            oneof,
            flags,
        }
    }

    fn message(&self, descriptor: &MessageDescriptor, path: &[String], out: &mut Vec<Message>) {
        let mut path = path.to_vec();
        path.push(descriptor.name().to_string());

        let disabled = self.message_ext.as_ref().is_some_and(|ext| {
            let options = descriptor.options();
            options.has_extension(ext) && options.get_extension(ext).as_message().is_some_and(message_disabled)
        });

        out.push(Message {
            name: descriptor.name().to_string(),
            full_name: descriptor.full_name().to_string(),
            path: path.clone(),
            disabled,
            fields: descriptor.fields().map(|field| self.field(&field)).collect(),
        });

        for child in descriptor.child_messages() {
            if !child.is_map_entry() {
                self.message(&child, &path, out);
            }
        }
    }

    fn file(&self, descriptor: &FileDescriptor, generate: bool) -> File {
        let mut messages = Vec::new();
        for message in descriptor.messages() {
            self.message(&message, &[], &mut messages);
        }
        File {
            name: descriptor.name().to_string(),
            package: descriptor.package_name().to_string(),
            generate,
            messages,
        }
    }
}

/// Builds the schema IR for every file in `pool`, marking the ones listed in
/// `file_to_generate`.
pub fn load_schema(pool: &DescriptorPool, file_to_generate: &[String]) -> Schema {
    let loader = Loader::new(pool);
    let files = pool
        .files()
        .map(|file| {
            let generate = file_to_generate.iter().any(|name| name == file.name());
            loader.file(&file, generate)
        })
        .collect();
    Schema { files }
}
