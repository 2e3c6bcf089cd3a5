#![allow(dead_code)]

use chrono::NaiveDate;
use csvmap_descriptor::{FieldDef, FieldKind, Record, RecordType, TypeRegistry, Value};

pub const PERSON: &str = "fixture.Person";
pub const CONTACT: &str = "fixture.Contact";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Person {
    pub name: Option<String>,
    pub age: i64,
    pub born: Option<NaiveDate>,
    pub member: bool,
    pub balance: f64,
}

const PERSON_FIELDS: &[FieldDef] = &[
    FieldDef::new("name", FieldKind::Text),
    FieldDef::new("age", FieldKind::Integer),
    FieldDef::new("born", FieldKind::Date),
    FieldDef::new("member", FieldKind::Boolean),
    FieldDef::new("balance", FieldKind::Float),
];

impl Record for Person {
    fn fields() -> &'static [FieldDef] {
        PERSON_FIELDS
    }

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "name" => Some(self.name.clone().map_or(Value::Null, Value::Text)),
            "age" => Some(Value::Integer(self.age)),
            "born" => Some(self.born.map_or(Value::Null, Value::Date)),
            "member" => Some(Value::Boolean(self.member)),
            "balance" => Some(Value::Float(self.balance)),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), String> {
        match (field, value) {
            ("name", Value::Text(name)) => self.name = Some(name),
            ("name", Value::Null) => self.name = None,
            ("age", Value::Integer(age)) => self.age = age,
            ("age", Value::Null) => self.age = 0,
            ("born", Value::Date(born)) => self.born = Some(born),
            ("born", Value::Null) => self.born = None,
            ("member", Value::Boolean(member)) => self.member = member,
            ("balance", Value::Float(balance)) => self.balance = balance,
            (field, value) => return Err(format!("cannot set {} to {}", field, value)),
        }
        Ok(())
    }
}

/// Registry holding `fixture.Person` and the abstract `fixture.Contact`
pub fn registry() -> TypeRegistry {
    let registry = TypeRegistry::new();
    registry.register_type::<Person>(PERSON);
    registry.register(RecordType::abstract_type(CONTACT, PERSON_FIELDS));
    registry
}

pub fn person(name: &str, age: i64) -> Person {
    Person {
        name: Some(name.to_string()),
        age,
        ..Default::default()
    }
}
