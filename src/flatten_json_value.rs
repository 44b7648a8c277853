use {
    itertools::Itertools,
    serde_json::{Map, Value},
    std::borrow::Cow,
    tap::Tap,
};

/// How a single value takes part in flattening. Only [`Node::NestedRecord`] is descended into,
/// everything else ends a field path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'v> {
    NestedRecord(&'v Map<String, Value>),
    Scalar(&'v Value),
    ArrayValue(&'v [Value]),
    /// `null`, or a key that is not there at all
    Missing,
}

impl<'v> Node<'v> {
    pub fn classify(value: Option<&'v Value>) -> Self {
        match value {
            None | Some(Value::Null) => Node::Missing,
            Some(Value::Object(map)) => Node::NestedRecord(map),
            Some(Value::Array(items)) => Node::ArrayValue(items),
            Some(scalar @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => Node::Scalar(scalar),
        }
    }

    pub fn nested_record(self) -> Option<&'v Map<String, Value>> {
        match self {
            Node::NestedRecord(map) => Some(map),
            Node::Scalar(_) | Node::ArrayValue(_) | Node::Missing => None,
        }
    }
}

/// Chain of keys from the root record down to some value. Appending never touches the original
/// chain, so a parent chain can be shared by every child it produces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath<'a>(Vec<Cow<'a, str>>);

impl<'a> FieldPath<'a> {
    pub fn join(&self, segment: impl Into<Cow<'a, str>>) -> Self {
        self.clone().tap_mut(|p| p.0.push(segment.into()))
    }

    pub fn segments(&self) -> &[Cow<'a, str>] {
        &self.0
    }

    /// textual form, the name of a column
    pub fn joined(&self, delimiter: &str) -> String {
        self.0.iter().join(delimiter)
    }
}

/// Views any value as a dataset: arrays are used as they are, anything else is a dataset of one.
pub fn as_dataset(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        record => std::slice::from_ref(record),
    }
}

pub mod escape;
pub mod materialize;
pub mod schema;
