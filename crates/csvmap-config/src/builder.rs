/*!
# Configuration Tree Builder

Turns YAML (or JSON) bytes into a [`ConfigNode`] tree:

- scalar entries become attributes, stringified as written
- a sequence of mappings becomes one child per item, named after the key
- a nested mapping becomes a single child named after the key
- `null` entries are treated as absent

Entry order is kept everywhere, so child order is document order.
*/

use crate::{
    errors::{ConfigError, ConfigResult},
    node::ConfigNode,
};
use serde_yaml::{Mapping, Value};
use std::io::Read;

/// Element name given to the document root
pub const ROOT_NODE_NAME: &str = "root";

/// Builds a configuration tree from a byte source
pub struct ConfigBuilder<R> {
    source: R,
}

impl<R: Read> ConfigBuilder<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Consume the source and build the tree
    pub fn build(mut self) -> ConfigResult<ConfigNode> {
        let mut text = String::new();
        self.source.read_to_string(&mut text)?;
        parse_str(&text)
    }
}

/// Build a configuration tree from an in-memory document
pub fn parse_str(text: &str) -> ConfigResult<ConfigNode> {
    let document: Value = serde_yaml::from_str(text)?;
    match untag(&document) {
        Value::Mapping(mapping) => build_node(ROOT_NODE_NAME, mapping, ROOT_NODE_NAME),
        other => Err(ConfigError::structure(
            ROOT_NODE_NAME,
            format!("document root must be a mapping, found {}", kind_of(other)),
        )),
    }
}

fn build_node(name: &str, mapping: &Mapping, path: &str) -> ConfigResult<ConfigNode> {
    let mut node = ConfigNode::new(name);

    for (key, value) in mapping {
        let key = scalar_text(untag(key))
            .ok_or_else(|| ConfigError::structure(path, "mapping keys must be scalars"))?;
        let child_path = format!("{}.{}", path, key);

        match untag(value) {
            Value::Null => {}
            Value::Mapping(inner) => {
                node.push_child(build_node(&key, inner, &child_path)?);
            }
            Value::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", child_path, i);
                    match untag(item) {
                        Value::Mapping(inner) => {
                            node.push_child(build_node(&key, inner, &item_path)?);
                        }
                        other => {
                            return Err(ConfigError::structure(
                                &item_path,
                                format!("sequence items must be mappings, found {}", kind_of(other)),
                            ));
                        }
                    }
                }
            }
            scalar => {
                // Bool, Number and String are the only remaining shapes
                let text = scalar_text(scalar).ok_or_else(|| {
                    ConfigError::structure(&child_path, "unsupported attribute value")
                })?;
                node.set_attribute(key, text);
            }
        }
    }

    Ok(node)
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
