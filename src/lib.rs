use {
    crate::{
        flatten_json_value::{as_dataset, materialize::materialize, schema::Schema},
        options::{ConfigurationError, Options},
    },
    serde::Serialize,
    serde_json::Value,
    std::fmt,
    tracing::instrument,
};

pub mod flatten_json_value;
pub mod nested_csv;
pub mod options;
pub mod save;

pub use crate::{
    flatten_json_value::{FieldPath, Node, escape::escape},
    nested_csv::write::{CsvWriterTableExt, write_table_csv},
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid options")]
    Configuration(#[from] ConfigurationError),
    #[error("Could not serialize the input to value")]
    SerializingToValue(#[source] serde_json::Error),
}

type Result<T> = std::result::Result<T, self::Error>;

/// Outcome of [`convert`].
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    /// objects and arrays, flattened into delimited text
    Table(String),
    /// anything else is handed back untouched (`null` becomes the configured empty value)
    Skipped(Value),
}

impl Converted {
    pub fn into_string(self) -> String {
        match self {
            Converted::Table(text) | Converted::Skipped(Value::String(text)) => text,
            Converted::Skipped(other) => other.to_string(),
        }
    }
}

impl fmt::Display for Converted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converted::Table(text) => f.write_str(text),
            Converted::Skipped(Value::String(text)) => f.write_str(text),
            Converted::Skipped(other) => write!(f, "{other}"),
        }
    }
}

/// Flattens `data` into a table: one column per distinct field path, one line per record.
///
/// A single object is treated as a dataset of one record.
#[instrument(skip(data))]
pub fn convert(data: &Value, options: &Options) -> Converted {
    match data {
        Value::Null => Converted::Skipped(options.empty_value.clone()),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Converted::Skipped(data.clone()),
        Value::Object(_) | Value::Array(_) => {
            let dataset = as_dataset(data);
            let schema = Schema::discover(dataset, &options.nested_path_delimiter);
            Converted::Table(materialize(dataset, &schema, options))
        }
    }
}

#[instrument(skip_all)]
pub fn convert_serializable<T: Serialize + ?Sized>(data: &T, options: &Options) -> Result<Converted> {
    serde_json::to_value(data)
        .map_err(self::Error::SerializingToValue)
        .map(|data| convert(&data, options))
}

/// Same as [`convert`], with options given as an untyped JSON object.
pub fn convert_with_raw_options(data: &Value, raw_options: &Value) -> Result<Converted> {
    Options::from_value(raw_options)
        .map_err(self::Error::from)
        .map(|options| convert(data, &options))
}
