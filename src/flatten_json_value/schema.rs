use {
    super::{FieldPath, Node},
    indexmap::IndexMap,
    serde_json::{Map, Value},
    std::borrow::Cow,
    tracing::{debug, trace},
};

/// Reads one flattened field out of any record: walks `parents`, then reads `leaf`.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor<'a> {
    parents: FieldPath<'a>,
    leaf: Cow<'a, str>,
}

impl<'a> Accessor<'a> {
    pub fn new(leaf: impl Into<Cow<'a, str>>, parents: FieldPath<'a>) -> Self {
        Self {
            parents,
            leaf: leaf.into(),
        }
    }

    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    /// `None` when any step of the walk is not a nested record, or when the leaf is `null` or
    /// absent.
    pub fn get<'v>(&self, record: &'v Value) -> Option<&'v Value> {
        self.parents
            .segments()
            .iter()
            .try_fold(record, |cursor, step| {
                Node::classify(Some(cursor))
                    .nested_record()
                    .and_then(|parent| parent.get(step.as_ref()))
            })
            .and_then(|parent| Node::classify(Some(parent)).nested_record())
            .and_then(|parent| {
                let value = parent.get(self.leaf.as_ref());
                match Node::classify(value) {
                    Node::Missing => None,
                    Node::NestedRecord(_) | Node::Scalar(_) | Node::ArrayValue(_) => value,
                }
            })
    }

    pub fn get_or<'v>(&self, record: &'v Value, empty_value: &'v Value) -> &'v Value {
        self.get(record).unwrap_or(empty_value)
    }
}

/// Ordered field paths of a dataset, each bound to the [`Accessor`] that reads it.
///
/// Fields keep the order they were first met in: records in dataset order, keys in the order the
/// record enumerates them, depth first.
#[derive(Debug, Clone, Default)]
pub struct Schema<'a> {
    table: IndexMap<String, Accessor<'a>>,
}

impl<'a> Schema<'a> {
    pub fn discover(dataset: &'a [Value], nested_path_delimiter: &str) -> Self {
        let mut schema = Self::default();
        dataset
            .iter()
            .enumerate()
            .for_each(|(idx, record)| match Node::classify(Some(record)) {
                Node::NestedRecord(record) => {
                    schema.discover_record(record, &FieldPath::default(), nested_path_delimiter)
                }
                other => debug!(idx, ?other, "record is not an object, it has no fields"),
            });
        debug!(records = dataset.len(), fields = schema.len(), "discovered schema");
        schema
    }

    fn discover_record(&mut self, record: &'a Map<String, Value>, parents: &FieldPath<'a>, nested_path_delimiter: &str) {
        record
            .iter()
            .for_each(|(key, value)| match Node::classify(Some(value)) {
                Node::NestedRecord(nested) => {
                    self.discover_record(nested, &parents.join(key.as_str()), nested_path_delimiter)
                }
                Node::Scalar(_) | Node::ArrayValue(_) | Node::Missing => {
                    let field = parents.join(key.as_str()).joined(nested_path_delimiter);
                    if !self.table.contains_key(&field) {
                        trace!(%field, "new field");
                        self.table
                            .insert(field, Accessor::new(key.as_str(), parents.clone()));
                    }
                }
            })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.keys().map(String::as_str)
    }

    pub fn accessor(&self, field: &str) -> Option<&Accessor<'a>> {
        self.table.get(field)
    }

    /// Raw values of `record` in field order, `empty_value` standing in for unresolved ones.
    pub fn row<'s, 'v>(&'s self, record: &'v Value, empty_value: &'v Value) -> impl Iterator<Item = &'v Value> {
        self.table
            .values()
            .map(move |accessor| accessor.get_or(record, empty_value))
    }
}
