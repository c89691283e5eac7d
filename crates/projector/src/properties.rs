//! Projection of opaque JSON payloads
//!
//! Walks a `serde_json::Value` tree with a [`JsonVisitor`]:
//! - Legacy: objects become untyped [`Mapping`]s
//! - Structured: objects become [`PresentationObject`]s labelled with their
//!   dotted position in the tree (`Properties.hardwareProfile`, ...)
//!
//! Lists and scalars come out the same in both formats. A top-level `null`
//! projects to `None`, never to an empty object.

use crate::value::{Mapping, PresentationObject, PresentationValue};
use arm_resource_projector_common::ProjectionFormat;
use serde_json::{Map, Number, Value};

/// Root label used when the caller does not supply one
pub const DEFAULT_ROOT_LABEL: &str = "Object";

/// Callbacks for each JSON variant
pub trait JsonVisitor {
    type Output;

    fn visit_null(&mut self) -> Self::Output;
    fn visit_bool(&mut self, value: bool) -> Self::Output;
    fn visit_number(&mut self, value: &Number) -> Self::Output;
    fn visit_string(&mut self, value: &str) -> Self::Output;
    fn visit_array(&mut self, items: &[Value]) -> Self::Output;
    fn visit_object(&mut self, members: &Map<String, Value>) -> Self::Output;
}

/// Dispatch `value` to the matching visitor callback
pub fn walk<V: JsonVisitor>(visitor: &mut V, value: &Value) -> V::Output {
    match value {
        Value::Null => visitor.visit_null(),
        Value::Bool(b) => visitor.visit_bool(*b),
        Value::Number(n) => visitor.visit_number(n),
        Value::String(s) => visitor.visit_string(s),
        Value::Array(items) => visitor.visit_array(items),
        Value::Object(members) => visitor.visit_object(members),
    }
}

/// Builds untyped mappings
struct LegacyVisitor;

impl JsonVisitor for LegacyVisitor {
    type Output = PresentationValue;

    fn visit_null(&mut self) -> PresentationValue {
        PresentationValue::Null
    }

    fn visit_bool(&mut self, value: bool) -> PresentationValue {
        PresentationValue::Bool(value)
    }

    fn visit_number(&mut self, value: &Number) -> PresentationValue {
        PresentationValue::Number(value.clone())
    }

    fn visit_string(&mut self, value: &str) -> PresentationValue {
        PresentationValue::String(value.to_string())
    }

    fn visit_array(&mut self, items: &[Value]) -> PresentationValue {
        PresentationValue::List(items.iter().map(|item| walk(self, item)).collect())
    }

    fn visit_object(&mut self, members: &Map<String, Value>) -> PresentationValue {
        let map: Mapping = members
            .iter()
            .map(|(name, value)| (name.clone(), walk(self, value)))
            .collect();
        PresentationValue::Map(map)
    }
}

/// Builds typed objects, tracking the member path for type labels
struct StructuredVisitor {
    path: Vec<String>,
}

impl StructuredVisitor {
    fn new(root_label: &str) -> Self {
        Self {
            path: vec![root_label.to_string()],
        }
    }

    fn label(&self) -> String {
        self.path.join(".")
    }
}

impl JsonVisitor for StructuredVisitor {
    type Output = PresentationValue;

    fn visit_null(&mut self) -> PresentationValue {
        PresentationValue::Null
    }

    fn visit_bool(&mut self, value: bool) -> PresentationValue {
        PresentationValue::Bool(value)
    }

    fn visit_number(&mut self, value: &Number) -> PresentationValue {
        PresentationValue::Number(value.clone())
    }

    fn visit_string(&mut self, value: &str) -> PresentationValue {
        PresentationValue::String(value.to_string())
    }

    // Elements share the label of the list they belong to
    fn visit_array(&mut self, items: &[Value]) -> PresentationValue {
        PresentationValue::List(items.iter().map(|item| walk(self, item)).collect())
    }

    fn visit_object(&mut self, members: &Map<String, Value>) -> PresentationValue {
        let mut obj = PresentationObject::new(self.label());
        for (name, value) in members {
            self.path.push(name.clone());
            let projected = walk(self, value);
            self.path.pop();
            obj.insert(name.clone(), projected);
        }
        PresentationValue::Object(obj)
    }
}

/// Project a payload using [`DEFAULT_ROOT_LABEL`] for structured type labels
pub fn project(value: Option<&Value>, format: ProjectionFormat) -> Option<PresentationValue> {
    project_labeled(value, format, DEFAULT_ROOT_LABEL)
}

/// Project a payload; `root_label` names the top-level structured object
pub fn project_labeled(
    value: Option<&Value>,
    format: ProjectionFormat,
    root_label: &str,
) -> Option<PresentationValue> {
    let value = value.filter(|v| !v.is_null())?;
    let projected = match format {
        ProjectionFormat::Legacy => walk(&mut LegacyVisitor, value),
        ProjectionFormat::Structured => walk(&mut StructuredVisitor::new(root_label), value),
    };
    Some(projected)
}

/// Plain JSON-to-mapping deserialization
///
/// Yields the same tree as [`project`] with [`ProjectionFormat::Legacy`]. The
/// resource projector uses it for legacy `Properties` only; `Plan` is always
/// projected as a structured object.
pub fn to_untyped(value: Option<&Value>) -> Option<PresentationValue> {
    let value = value.filter(|v| !v.is_null())?;
    Some(walk(&mut LegacyVisitor, value))
}
