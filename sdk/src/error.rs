use thiserror::Error;

/// A flag argument that could not be turned into a value.
///
/// Adapters never modify their backing storage when they return one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("invalid {kind} value {input:?}: {reason}")]
    Invalid {
        kind:   String,
        input:  String,
        reason: String,
    },

    #[error("invalid value {input:?} for enum {name}: expected one of {expected}")]
    UnknownEnum {
        name:     String,
        input:    String,
        expected: String,
    },

    #[error("cannot parse {input:?} as a timestamp: expected one of {layouts}")]
    Timestamp {
        input:   String,
        layouts: String,
    },

    #[error("invalid map entry {entry:?}: {reason}")]
    MapEntry {
        entry:  String,
        reason: String,
    },

    #[error("malformed list {input:?}: {reason}")]
    Csv {
        input:  String,
        reason: String,
    },

    #[error("invalid JSON object {input:?}: {reason}")]
    Json {
        input:  String,
        reason: String,
    },
}

impl ValueError {
    pub(crate) fn invalid(kind: &str, input: &str, reason: impl ToString) -> Self {
        ValueError::Invalid {
            kind:   kind.to_string(),
            input:  input.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while registering or parsing flags.
#[derive(Debug, Error)]
pub enum FlagError {
    #[error("flag redefined: --{0}")]
    Redefined(String),

    #[error("shorthand -{short} for --{name} is already used by --{existing}")]
    ShortRedefined {
        short:    char,
        name:     String,
        existing: String,
    },

    #[error("invalid flag name {name:?}: {reason}")]
    InvalidName {
        name:   String,
        reason: String,
    },

    #[error("flag --{0} does not exist")]
    NoSuchFlag(String),

    #[error("deprecation message for flag --{0} must be set")]
    MissingDeprecationMessage(String),

    #[error("invalid argument {input:?} for --{flag}: {source}")]
    InvalidArgument {
        flag:   String,
        input:  String,
        #[source]
        source: ValueError,
    },

    #[error(transparent)]
    Command(#[from] clap::Error),
}
