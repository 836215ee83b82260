use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode plugin request: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Invalid descriptor set: {0}")]
    Descriptor(#[from] prost_reflect::DescriptorError),

    #[error("Unreadable flag options on {target}: {msg}")]
    Options {
        target: String,
        msg:    String,
    },

    #[error("Invalid plugin parameter {0}")]
    InvalidParameter(String),

    #[error("Invalid flag on field {message}.{field}: {reason}")]
    InvalidField {
        message: String,
        field:   String,
        reason:  String,
    },

    #[error("Invalid flags on message {message}: {reason}")]
    InvalidMessage {
        message: String,
        reason:  String,
    },

    #[error("File to generate {0} is not part of the request")]
    MissingFile(String),

    #[error("Generated code for {file} does not parse: {source}")]
    Format {
        file:   String,
        #[source]
        source: syn::Error,
    },
}
