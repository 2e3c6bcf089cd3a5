use thiserror::Error;

pub type DescriptorResult<T> = Result<T, DescriptorError>;
pub type CodecResult<T> = Result<T, CodecError>;

/// Reason code carried by every [`DescriptorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorReason {
    MissingClassAttribute,
    ClassNotFound,
    ClassNotInstantiable,
    UnsupportedSeparator,
    UnsupportedCharset,
    InvalidAttribute,
    InvalidConfigurationSource,
    InvalidColumnBinding,
    InvalidConversionPattern,
}

/// Descriptor construction failures
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Invalid CSV configuration. Missing class attribute.")]
    MissingClassAttribute,

    #[error("Invalid CSV configuration. Class '{0}' not found.")]
    ClassNotFound(String),

    #[error("Invalid CSV configuration. Class '{0}' not instantiable.")]
    ClassNotInstantiable(String),

    #[error("Invalid CSV configuration. Separator '{0}' not supported.")]
    UnsupportedSeparator(String),

    #[error("Invalid CSV configuration. Charset '{0}' not supported.")]
    UnsupportedCharset(String),

    #[error("Invalid CSV configuration. Attribute '{name}' has invalid value '{value}'.")]
    InvalidAttribute { name: String, value: String },

    #[error("Invalid configuration source: {0}")]
    InvalidConfigurationSource(#[from] csvmap_config::ConfigError),

    #[error("Invalid column binding: {0}")]
    InvalidColumnBinding(String),

    #[error("Invalid conversion pattern '{pattern}' for field '{field}': {message}")]
    InvalidConversionPattern {
        field: String,
        pattern: String,
        message: String,
    },
}

impl DescriptorError {
    pub fn reason(&self) -> ErrorReason {
        match self {
            DescriptorError::MissingClassAttribute => ErrorReason::MissingClassAttribute,
            DescriptorError::ClassNotFound(_) => ErrorReason::ClassNotFound,
            DescriptorError::ClassNotInstantiable(_) => ErrorReason::ClassNotInstantiable,
            DescriptorError::UnsupportedSeparator(_) => ErrorReason::UnsupportedSeparator,
            DescriptorError::UnsupportedCharset(_) => ErrorReason::UnsupportedCharset,
            DescriptorError::InvalidAttribute { .. } => ErrorReason::InvalidAttribute,
            DescriptorError::InvalidConfigurationSource(_) => {
                ErrorReason::InvalidConfigurationSource
            }
            DescriptorError::InvalidColumnBinding(_) => ErrorReason::InvalidColumnBinding,
            DescriptorError::InvalidConversionPattern { .. } => {
                ErrorReason::InvalidConversionPattern
            }
        }
    }
}

/// Row encoding/decoding failures
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row}, field '{field}': {message}")]
    Conversion {
        row: usize,
        field: String,
        message: String,
    },

    #[error("Cannot instantiate record type '{0}'")]
    Instantiation(String),

    #[error("Input is not valid {0}")]
    Malformed(&'static str),

    #[error("Text not representable in charset {0}")]
    Unmappable(&'static str),
}
