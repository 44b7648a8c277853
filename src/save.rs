use {
    crate::{Converted, convert, options::Options},
    serde_json::Value,
    std::path::{Path, PathBuf},
    tracing::{info, instrument},
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Writing file at {path:?}")]
    WritingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

type Result<T> = std::result::Result<T, self::Error>;

/// Saves `text` as UTF-8 at `path`, replacing whatever was there.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_text(text: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, text)
        .map_err(|source| self::Error::WritingFile {
            path: path.to_path_buf(),
            source,
        })
        .map(|()| info!(bytes = text.len(), "saved"))
}

/// Converts `data` and saves the outcome at `path`.
pub fn save_table(data: &Value, options: &Options, path: impl AsRef<Path>) -> Result<Converted> {
    let converted = convert(data, options);
    save_text(&converted.to_string(), path).map(|()| converted)
}
