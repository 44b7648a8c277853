use {serde_json::Value, std::borrow::Cow, tap::Pipe};

const QUOTE: &str = "\"";
const ESCAPED_QUOTE: &str = "\"\"";

/// Quotes a cell. Strings are used verbatim, any other value is written as JSON. Quotes inside
/// are doubled. Numbers and booleans are quoted too.
pub fn escape(value: &Value) -> String {
    match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        other => Cow::Owned(other.to_string()),
    }
    .pipe(|payload| escape_str(&payload))
}

pub fn escape_str(text: &str) -> String {
    format!("{QUOTE}{}{QUOTE}", text.replace(QUOTE, ESCAPED_QUOTE))
}
