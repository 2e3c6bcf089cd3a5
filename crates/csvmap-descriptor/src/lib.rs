/*!
# csvmap CSV Descriptors

Compiles a declarative descriptor document into a [`CsvDescriptor`]: the
record type rows map to, the column separator, the null sentinel, the charset,
and one [`ValueDescriptor`] per column in document order.

## Record Types

Record types declare their fields and are registered by name, either in the
global [`TYPE_REGISTRY`] or in a private [`TypeRegistry`]. The descriptor's
`class` attribute is looked up there.

## Descriptor Document

```yaml
class: fixture.Person
separator: semicolon
null-value: "N/A"
columns:
  - field: name
  - field: born
    format: "%d/%m/%Y"
```

## Usage

```rust
use csvmap_descriptor::{
    CsvDescriptor, DescriptorResult, FieldDef, FieldKind, Record, TypeRegistry, Value,
};

#[derive(Default)]
struct Person {
    name: Option<String>,
    age: i64,
}

const PERSON_FIELDS: &[FieldDef] = &[
    FieldDef::new("name", FieldKind::Text),
    FieldDef::new("age", FieldKind::Integer),
];

impl Record for Person {
    fn fields() -> &'static [FieldDef] {
        PERSON_FIELDS
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "name" => Some(self.name.clone().map_or(Value::Null, Value::Text)),
            "age" => Some(Value::Integer(self.age)),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), String> {
        match (field, value) {
            ("name", Value::Text(name)) => self.name = Some(name),
            ("name", Value::Null) => self.name = None,
            ("age", Value::Integer(age)) => self.age = age,
            (field, value) => return Err(format!("cannot set {} to {}", field, value)),
        }
        Ok(())
    }
}

fn example() -> DescriptorResult<()> {
    let registry = TypeRegistry::new();
    registry.register_type::<Person>("fixture.Person");

    let document = "class: fixture.Person\nseparator: semicolon\ncolumns:\n  - field: name\n  - field: age\n";
    let descriptor = CsvDescriptor::from_reader_with_registry(document.as_bytes(), &registry)?;

    assert_eq!(descriptor.separator(), ';');
    assert_eq!(descriptor.columns().len(), 2);
    Ok(())
}
```
*/

pub mod charset;
pub mod codec;
pub mod descriptor;
pub mod errors;
pub mod record;
pub mod registry;
pub mod separator;
pub mod value_descriptor;

// Re-export main types for convenience
pub use codec::{CsvReader, CsvWriter};
pub use descriptor::{CsvDescriptor, DEFAULT_NULL_VALUE};
pub use errors::{CodecError, CodecResult, DescriptorError, DescriptorResult, ErrorReason};
pub use record::{FieldDef, FieldKind, Record, RecordType, Value};
pub use registry::{TypeRegistry, TYPE_REGISTRY};
pub use separator::{DEFAULT_SEPARATOR, SEPARATORS};
pub use value_descriptor::{Conversion, ValueDescriptor};

pub use csvmap_config::{ConfigBuilder, ConfigNode};
