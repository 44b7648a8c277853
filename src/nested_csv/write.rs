use {
    crate::{
        flatten_json_value::{as_dataset, schema::Schema},
        options::Options,
    },
    serde_json::Value,
    std::{borrow::Cow, io::Write},
    tap::Pipe,
    tracing::instrument,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not convert into inner error:\n{0}")]
    IntoInner(Box<str>),
    #[error("Field delimiter must be a single byte for csv output, found {0:?}")]
    UnsupportedDelimiter(String),
    #[error("Could not write headers")]
    WritingHeaders(#[source] csv::Error),
    #[error("Writing record #{idx}")]
    WritingRecord {
        idx: usize,
        #[source]
        source: csv::Error,
    },
}

type Result<T> = std::result::Result<T, self::Error>;

fn cell(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

#[extension_traits::extension(pub trait CsvWriterTableExt)]
impl<W: Write> csv::Writer<W> {
    /// Writes `data` as a flattened table through this writer: header first when
    /// `options.include_header` is set, then one record per row. Quoting and the field delimiter
    /// are whatever the writer was built with. Returns the number of rows written.
    ///
    /// Without any field every line is a bare `\n`.
    fn write_table(&mut self, data: &Value, options: &Options) -> Result<usize> {
        let dataset = as_dataset(data);
        let schema = Schema::discover(dataset, &options.nested_path_delimiter);
        if options.include_header {
            match schema.is_empty() {
                true => write_empty_line(self),
                false => self.write_record(schema.fields()),
            }
            .map_err(self::Error::WritingHeaders)?;
        }
        dataset
            .iter()
            .enumerate()
            .try_for_each(|(idx, record)| {
                match schema.is_empty() {
                    true => write_empty_line(self),
                    false => schema
                        .row(record, &options.empty_value)
                        .map(cell)
                        .collect::<Vec<_>>()
                        .pipe(|row| self.write_record(row.iter().map(|cell| cell.as_bytes()))),
                }
                .map_err(|source| self::Error::WritingRecord { idx, source })
            })
            .map(|()| dataset.len())
    }
}

/// csv writes a record without fields as `""`, this writes an empty line instead.
fn write_empty_line<W: Write>(writer: &mut csv::Writer<W>) -> csv::Result<()> {
    writer
        .flush()
        .and_then(|()| writer.get_mut().write_all(b"\n"))
        .map_err(csv::Error::from)
}

fn single_byte(delimiter: &str) -> Result<u8> {
    match delimiter.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(self::Error::UnsupportedDelimiter(delimiter.to_string())),
    }
}

/// Writes `data` the way [`crate::convert`] renders it (always quoted, `\n` between lines), plus
/// the trailing newline the csv writer ends every record with. A table with no lines at all is
/// written as nothing.
#[instrument(skip(writer, data))]
pub fn write_table_csv<W: Write>(writer: W, data: &Value, options: &Options) -> Result<W> {
    single_byte(&options.field_delimiter)
        .map(|delimiter| {
            csv::WriterBuilder::new()
                .has_headers(false)
                .delimiter(delimiter)
                .quote_style(csv::QuoteStyle::Always)
                .double_quote(true)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(writer)
        })
        .and_then(|mut writer| writer.write_table(data, options).map(|_| writer))
        .and_then(|writer| {
            writer
                .into_inner()
                .map_err(|e| self::Error::IntoInner(e.error().to_string().pipe(Box::from)))
        })
}
