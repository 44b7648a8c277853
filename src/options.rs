use {
    serde::{Deserialize, Serialize},
    serde_json::Value,
    tap::Pipe,
};

pub const DEFAULT_FIELD_DELIMITER: &str = "\t";
pub const DEFAULT_NESTED_PATH_DELIMITER: &str = "__";

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("Options must be given as an object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("Option has an invalid type")]
    InvalidOption(#[source] serde_json::Error),
}

/// Conversion options.
///
/// Every field falls back to its default only when the caller left it out, so an explicit
/// `"includeHeader": false` stays `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// emit a header line of escaped field paths first
    pub include_header: bool,
    /// inserted between cells of a line
    #[serde(alias = "fieldDelim")]
    pub field_delimiter: String,
    /// inserted between the key segments of a field path
    #[serde(alias = "nestedDelim")]
    pub nested_path_delimiter: String,
    /// substituted for every field a record does not resolve
    pub empty_value: Value,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            include_header: true,
            field_delimiter: DEFAULT_FIELD_DELIMITER.to_string(),
            nested_path_delimiter: DEFAULT_NESTED_PATH_DELIMITER.to_string(),
            empty_value: Value::Null,
        }
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "Value::Null",
        Value::Bool(_) => "Value::Bool",
        Value::Number(_) => "Value::Number",
        Value::String(_) => "Value::String",
        Value::Array(_) => "Value::Array",
        Value::Object(_) => "Value::Object",
    }
}

impl Options {
    /// Reads options from an untyped JSON object. `null` means "all defaults".
    pub fn from_value(raw: &Value) -> Result<Self, ConfigurationError> {
        match raw {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => {
                Self::deserialize(raw).map_err(ConfigurationError::InvalidOption)
            }
            other => ConfigurationError::NotAnObject {
                found: kind_of(other),
            }
            .pipe(Err),
        }
    }

    pub fn with_include_header(self, include_header: bool) -> Self {
        Self {
            include_header,
            ..self
        }
    }

    pub fn with_field_delimiter(self, field_delimiter: impl Into<String>) -> Self {
        Self {
            field_delimiter: field_delimiter.into(),
            ..self
        }
    }

    pub fn with_nested_path_delimiter(self, nested_path_delimiter: impl Into<String>) -> Self {
        Self {
            nested_path_delimiter: nested_path_delimiter.into(),
            ..self
        }
    }

    pub fn with_empty_value(self, empty_value: impl Into<Value>) -> Self {
        Self {
            empty_value: empty_value.into(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn test_defaults_for_missing_options() {
        assert_eq!(Options::from_value(&json!({})).unwrap(), Options::default());
        assert_eq!(Options::from_value(&Value::Null).unwrap(), Options::default());
    }

    #[test]
    fn test_explicit_falsy_values_are_kept() {
        let options = Options::from_value(&json!({
            "includeHeader": false,
            "fieldDelimiter": "",
            "emptyValue": 0
        }))
        .unwrap();
        assert!(!options.include_header);
        assert_eq!(options.field_delimiter, "");
        assert_eq!(options.nested_path_delimiter, DEFAULT_NESTED_PATH_DELIMITER);
        assert_eq!(options.empty_value, json!(0));
    }

    #[test]
    fn test_short_aliases() {
        let options = Options::from_value(&json!({
            "fieldDelim": ",",
            "nestedDelim": "."
        }))
        .unwrap();
        assert_eq!(options.field_delimiter, ",");
        assert_eq!(options.nested_path_delimiter, ".");
    }

    #[test]
    fn test_invalid_types_are_configuration_errors() {
        assert!(matches!(
            Options::from_value(&json!({"includeHeader": "yes"})),
            Err(ConfigurationError::InvalidOption(_))
        ));
        assert!(matches!(
            Options::from_value(&json!({"fieldDelimiter": 9})),
            Err(ConfigurationError::InvalidOption(_))
        ));
        assert!(matches!(
            Options::from_value(&json!("tab")),
            Err(ConfigurationError::NotAnObject {
                found: "Value::String"
            })
        ));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        assert_eq!(
            Options::from_value(&json!({"colour": "blue"})).unwrap(),
            Options::default()
        );
    }
}
