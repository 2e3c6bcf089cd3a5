/*!
# Record Model

Target record types declare their fields statically and expose name-based
access to field values. A [`RecordType`] is the registered handle a descriptor
binds to; it knows the declared fields and, for concrete types, how to build a
default instance.
*/

use chrono::{NaiveDate, NaiveDateTime};
use std::any::{Any, TypeId};
use std::fmt;

/// Declared type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
}

/// A field declared by a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Runtime value of a single record field
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Text(s) => write!(f, "{}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Date(d) => write!(f, "{}", d),
            Value::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

/// A type whose instances can be mapped to and from CSV rows
///
/// `get` returns `None` for names the type does not declare; `set` reports
/// values it cannot store as an error message.
pub trait Record: Any + Send {
    fn fields() -> &'static [FieldDef]
    where
        Self: Sized;

    fn get(&self, field: &str) -> Option<Value>;

    fn set(&mut self, field: &str, value: Value) -> Result<(), String>;
}

type Factory = fn() -> Box<dyn Record>;

fn default_instance<T: Record + Default>() -> Box<dyn Record> {
    Box::new(T::default())
}

/// Registered handle for a record type
#[derive(Clone)]
pub struct RecordType {
    name: String,
    fields: &'static [FieldDef],
    type_id: Option<TypeId>,
    factory: Option<Factory>,
}

impl RecordType {
    /// Handle for a concrete record type, instantiable through `T::default()`
    pub fn of<T: Record + Default>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: T::fields(),
            type_id: Some(TypeId::of::<T>()),
            factory: Some(default_instance::<T>),
        }
    }

    /// Handle for a type that declares fields but cannot be instantiated
    pub fn abstract_type(name: impl Into<String>, fields: &'static [FieldDef]) -> Self {
        Self {
            name: name.into(),
            fields,
            type_id: None,
            factory: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_instantiable(&self) -> bool {
        self.factory.is_some()
    }

    /// Whether this handle was registered for the Rust type `T`
    pub fn is<T: Record>(&self) -> bool {
        self.type_id == Some(TypeId::of::<T>())
    }

    /// Build a default instance, or `None` for abstract types
    pub fn instantiate(&self) -> Option<Box<dyn Record>> {
        self.factory.map(|factory| factory())
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("instantiable", &self.is_instantiable())
            .finish()
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.type_id == other.type_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Point {
        x: i64,
        label: Option<String>,
    }

    const POINT_FIELDS: &[FieldDef] = &[
        FieldDef::new("x", FieldKind::Integer),
        FieldDef::new("label", FieldKind::Text),
    ];

    impl Record for Point {
        fn fields() -> &'static [FieldDef] {
            POINT_FIELDS
        }

        fn get(&self, field: &str) -> Option<Value> {
            match field {
                "x" => Some(Value::Integer(self.x)),
                "label" => Some(self.label.clone().map_or(Value::Null, Value::Text)),
                _ => None,
            }
        }

        fn set(&mut self, field: &str, value: Value) -> Result<(), String> {
            match (field, value) {
                ("x", Value::Integer(x)) => self.x = x,
                ("label", Value::Text(s)) => self.label = Some(s),
                ("label", Value::Null) => self.label = None,
                (field, value) => return Err(format!("cannot set {} to {:?}", field, value)),
            }
            Ok(())
        }
    }

    #[test]
    fn test_concrete_type_is_instantiable() {
        let record_type = RecordType::of::<Point>("geo.Point");
        assert!(record_type.is_instantiable());
        assert!(record_type.is::<Point>());

        let mut instance = record_type.instantiate().unwrap();
        assert_eq!(instance.get("x"), Some(Value::Integer(0)));
        instance.set("x", Value::Integer(7)).unwrap();
        assert_eq!(instance.get("x"), Some(Value::Integer(7)));
        assert_eq!(instance.get("missing"), None);
    }

    #[test]
    fn test_abstract_type_is_not_instantiable() {
        let record_type = RecordType::abstract_type("geo.Shape", POINT_FIELDS);
        assert!(!record_type.is_instantiable());
        assert!(record_type.instantiate().is_none());
        assert!(!record_type.is::<Point>());
    }

    #[test]
    fn test_field_lookup() {
        let record_type = RecordType::of::<Point>("geo.Point");
        assert_eq!(record_type.field("label").unwrap().kind, FieldKind::Text);
        assert!(record_type.field("y").is_none());
    }
}
