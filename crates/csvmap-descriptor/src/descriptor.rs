/*!
# CSV Descriptor

[`CsvDescriptor`] is the compiled form of a descriptor document: the target
record type, separator, null sentinel, charset, debug flag and the ordered
column bindings. It is built once, never mutated, and shared freely.

## Root attributes

- `class`: registered record type name (required)
- `separator`: `tab`, `space`, `comma`, `dot`, `colon` or `semicolon` (default comma)
- `null-value`: text written for and read as null (default empty)
- `charset`: encoding label (default `UTF-8`)
- `debug`: `true` or `false` (default false)

Each child node of the root is one column, in order.
*/

use crate::{
    charset::{charset_for, DEFAULT_CHARSET},
    errors::{DescriptorError, DescriptorResult},
    record::RecordType,
    registry::{TypeRegistry, TYPE_REGISTRY},
    separator::{separator_for, DEFAULT_SEPARATOR},
    value_descriptor::ValueDescriptor,
};
use csvmap_config::{ConfigBuilder, ConfigNode};
use encoding_rs::Encoding;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub const CLASS_ATTRIBUTE: &str = "class";
pub const SEPARATOR_ATTRIBUTE: &str = "separator";
pub const NULL_VALUE_ATTRIBUTE: &str = "null-value";
pub const CHARSET_ATTRIBUTE: &str = "charset";
pub const DEBUG_ATTRIBUTE: &str = "debug";

/// Default text used for null values
pub const DEFAULT_NULL_VALUE: &str = "";

/// Compiled mapping between CSV rows and a record type
#[derive(Debug, Clone)]
pub struct CsvDescriptor {
    target_type: Arc<RecordType>,
    separator: char,
    null_value: String,
    charset: &'static Encoding,
    debug: bool,
    columns: Vec<ValueDescriptor>,
}

impl CsvDescriptor {
    /// Build a descriptor, resolving `class` against the global [`TYPE_REGISTRY`]
    pub fn new(config: &ConfigNode) -> DescriptorResult<Self> {
        Self::with_registry(config, &TYPE_REGISTRY)
    }

    /// Build a descriptor, resolving `class` against `registry`
    pub fn with_registry(config: &ConfigNode, registry: &TypeRegistry) -> DescriptorResult<Self> {
        let class_name = config
            .attribute(CLASS_ATTRIBUTE)
            .ok_or(DescriptorError::MissingClassAttribute)?;
        let target_type = registry
            .get(class_name)
            .ok_or_else(|| DescriptorError::ClassNotFound(class_name.to_string()))?;
        if !target_type.is_instantiable() {
            return Err(DescriptorError::ClassNotInstantiable(class_name.to_string()));
        }

        let separator = match config.attribute(SEPARATOR_ATTRIBUTE) {
            None => DEFAULT_SEPARATOR,
            Some(name) => separator_for(name)
                .ok_or_else(|| DescriptorError::UnsupportedSeparator(name.to_string()))?,
        };

        let null_value = config
            .attribute_or(NULL_VALUE_ATTRIBUTE, DEFAULT_NULL_VALUE)
            .to_string();

        let charset_name = config.attribute_or(CHARSET_ATTRIBUTE, DEFAULT_CHARSET);
        let charset = charset_for(charset_name)
            .ok_or_else(|| DescriptorError::UnsupportedCharset(charset_name.to_string()))?;

        let debug = match config.attribute(DEBUG_ATTRIBUTE) {
            None => false,
            Some(value) => parse_flag(value).ok_or_else(|| DescriptorError::InvalidAttribute {
                name: DEBUG_ATTRIBUTE.to_string(),
                value: value.to_string(),
            })?,
        };

        let columns = config
            .children()
            .iter()
            .map(|child| ValueDescriptor::new(child, &target_type))
            .collect::<DescriptorResult<Vec<_>>>()?;

        debug!(
            class = class_name,
            separator = %separator.escape_debug(),
            charset = charset.name(),
            columns = columns.len(),
            "built CSV descriptor"
        );

        Ok(Self {
            target_type,
            separator,
            null_value,
            charset,
            debug,
            columns,
        })
    }

    /// Parse a descriptor document from `source` and build against the global registry
    pub fn from_reader<R: Read>(source: R) -> DescriptorResult<Self> {
        Self::from_reader_with_registry(source, &TYPE_REGISTRY)
    }

    /// Parse a descriptor document from `source` and build against `registry`
    pub fn from_reader_with_registry<R: Read>(
        source: R,
        registry: &TypeRegistry,
    ) -> DescriptorResult<Self> {
        let config = ConfigBuilder::new(source).build()?;
        Self::with_registry(&config, registry)
    }

    /// Load a descriptor document from a file and build against the global registry
    pub fn from_path<P: AsRef<Path>>(path: P) -> DescriptorResult<Self> {
        Self::from_path_with_registry(path, &TYPE_REGISTRY)
    }

    /// Load a descriptor document from a file and build against `registry`
    pub fn from_path_with_registry<P: AsRef<Path>>(
        path: P,
        registry: &TypeRegistry,
    ) -> DescriptorResult<Self> {
        let file = File::open(path).map_err(csvmap_config::ConfigError::from)?;
        Self::from_reader_with_registry(file, registry)
    }

    pub fn target_type(&self) -> &RecordType {
        &self.target_type
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn null_value(&self) -> &str {
        &self.null_value
    }

    pub fn charset(&self) -> &'static Encoding {
        self.charset
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Column bindings in CSV column order
    pub fn columns(&self) -> &[ValueDescriptor] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// First column bound to `field_name`
    pub fn column(&self, field_name: &str) -> Option<&ValueDescriptor> {
        self.columns.iter().find(|c| c.field_name() == field_name)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
