//! Presentation value model
//!
//! [`PresentationValue`] is what projections produce. Untyped mappings
//! ([`PresentationValue::Map`]) come out of the legacy format; typed
//! [`PresentationObject`]s come out of the structured format and carry type
//! names for presentation-layer dispatch.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// A projected value
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<PresentationValue>),
    /// Untyped key/value mapping
    Map(Mapping),
    /// Typed object with type names
    Object(PresentationObject),
}

impl PresentationValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PresentationValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PresentationValue]> {
        match self {
            PresentationValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            PresentationValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&PresentationObject> {
        match self {
            PresentationValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Type label of a structured object; `None` for every other variant
    pub fn type_label(&self) -> Option<&str> {
        self.as_object().and_then(PresentationObject::type_name)
    }

    /// Plain JSON view, dropping type names
    pub fn to_json(&self) -> Value {
        match self {
            PresentationValue::Null => Value::Null,
            PresentationValue::Bool(b) => Value::Bool(*b),
            PresentationValue::Number(n) => Value::Number(n.clone()),
            PresentationValue::String(s) => Value::String(s.clone()),
            PresentationValue::List(items) => {
                Value::Array(items.iter().map(PresentationValue::to_json).collect())
            }
            PresentationValue::Map(map) => map.to_json(),
            PresentationValue::Object(obj) => obj.members().to_json(),
        }
    }
}

impl From<String> for PresentationValue {
    fn from(s: String) -> Self {
        PresentationValue::String(s)
    }
}

impl From<&str> for PresentationValue {
    fn from(s: &str) -> Self {
        PresentationValue::String(s.to_string())
    }
}

impl From<Mapping> for PresentationValue {
    fn from(map: Mapping) -> Self {
        PresentationValue::Map(map)
    }
}

impl From<PresentationObject> for PresentationValue {
    fn from(obj: PresentationObject) -> Self {
        PresentationValue::Object(obj)
    }
}

/// Insertion-ordered name/value members
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping(Vec<(String, PresentationValue)>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member, replacing an existing one with the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: PresentationValue) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PresentationValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PresentationValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(n, v)| (n.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, PresentationValue)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, PresentationValue)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        for (n, v) in iter {
            map.insert(n, v);
        }
        map
    }
}

/// Structured object: ordered members plus the type names used to pick a view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationObject {
    type_names: Vec<String>,
    members: Mapping,
}

impl PresentationObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_names: vec![type_name.into()],
            members: Mapping::new(),
        }
    }

    /// Append a further type name, keeping duplicates
    pub fn add_type_name(&mut self, type_name: impl Into<String>) {
        self.type_names.push(type_name.into());
    }

    /// Primary type name
    pub fn type_name(&self) -> Option<&str> {
        self.type_names.first().map(String::as_str)
    }

    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    pub fn insert(&mut self, name: impl Into<String>, value: PresentationValue) {
        self.members.insert(name, value);
    }

    /// Insert only when `value` is present
    pub fn insert_present<V: Into<PresentationValue>>(
        &mut self,
        name: &str,
        value: Option<V>,
    ) {
        if let Some(value) = value {
            self.members.insert(name, value.into());
        }
    }

    pub fn get(&self, name: &str) -> Option<&PresentationValue> {
        self.members.get(name)
    }

    pub fn members(&self) -> &Mapping {
        &self.members
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members.names().collect()
    }

    pub fn to_json(&self) -> Value {
        self.members.to_json()
    }
}

impl Serialize for PresentationValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PresentationValue::Null => serializer.serialize_unit(),
            PresentationValue::Bool(b) => serializer.serialize_bool(*b),
            PresentationValue::Number(n) => n.serialize(serializer),
            PresentationValue::String(s) => serializer.serialize_str(s),
            PresentationValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PresentationValue::Map(map) => map.serialize(serializer),
            PresentationValue::Object(obj) => obj.serialize(serializer),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (n, v) in &self.0 {
            map.serialize_entry(n, v)?;
        }
        map.end()
    }
}

/// Serializes the members only; type names are view metadata
impl Serialize for PresentationObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.members.serialize(serializer)
    }
}
