use {
    super::{
        escape::{escape, escape_str},
        schema::Schema,
    },
    crate::options::Options,
    itertools::Itertools,
    serde_json::Value,
};

pub const LINE_SEPARATOR: &str = "\n";

pub fn header_line(schema: &Schema, options: &Options) -> String {
    schema
        .fields()
        .map(escape_str)
        .join(&options.field_delimiter)
}

pub fn row_line(record: &Value, schema: &Schema, options: &Options) -> String {
    schema
        .row(record, &options.empty_value)
        .map(escape)
        .join(&options.field_delimiter)
}

/// Header (when enabled) and one line per record, joined by `\n` without a trailing newline.
pub fn materialize(dataset: &[Value], schema: &Schema, options: &Options) -> String {
    options
        .include_header
        .then(|| header_line(schema, options))
        .into_iter()
        .chain(dataset.iter().map(|record| row_line(record, schema, options)))
        .join(LINE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn comma_dot() -> Options {
        Options::default()
            .with_field_delimiter(",")
            .with_nested_path_delimiter(".")
    }

    #[test]
    fn test_header_and_rows() {
        let dataset = json!([{"id": 248, "animal": "fox"}, {"id": 369, "animal": "monkey"}]);
        let records = dataset.as_array().unwrap();
        let options = comma_dot();
        let schema = Schema::discover(records, &options.nested_path_delimiter);
        assert_eq!(
            materialize(records, &schema, &options),
            "\"id\",\"animal\"\n\"248\",\"fox\"\n\"369\",\"monkey\""
        );
    }

    #[test]
    fn test_sparse_rows_use_empty_value() {
        let dataset = json!([{"id": 1}, {"id": 2, "animal": "monkey"}, {"animal": "frog"}]);
        let records = dataset.as_array().unwrap();
        let options = comma_dot().with_empty_value("-");
        let schema = Schema::discover(records, &options.nested_path_delimiter);
        assert_eq!(row_line(&records[0], &schema, &options), r#""1","-""#);
        assert_eq!(row_line(&records[2], &schema, &options), r#""-","frog""#);
    }

    #[test]
    fn test_no_header() {
        let dataset = json!([{"data": {"num": 5}}]);
        let records = dataset.as_array().unwrap();
        let options = comma_dot().with_include_header(false);
        let schema = Schema::discover(records, &options.nested_path_delimiter);
        assert_eq!(materialize(records, &schema, &options), r#""5""#);
    }

    #[test]
    fn test_empty_dataset() {
        let schema = Schema::discover(&[], "__");
        assert_eq!(materialize(&[], &schema, &Options::default()), "");
        assert_eq!(
            materialize(&[], &schema, &Options::default().with_include_header(false)),
            ""
        );
    }

    #[test]
    fn test_default_delimiters() {
        let dataset = json!([{"a": {"b": null, "c": 1}}]);
        let records = dataset.as_array().unwrap();
        let options = Options::default();
        let schema = Schema::discover(records, &options.nested_path_delimiter);
        assert_eq!(
            materialize(records, &schema, &options),
            "\"a__b\"\t\"a__c\"\n\"null\"\t\"1\""
        );
    }

    #[test]
    fn test_header_line_alone() {
        let dataset = json!({"say": {"quote\"d": 1}});
        let options = comma_dot();
        let schema = Schema::discover(std::slice::from_ref(&dataset), &options.nested_path_delimiter);
        assert_eq!(header_line(&schema, &options), r#""say.quote""d""#);
    }
}
