use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a data view from its source.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(
        "Unsupported type {type_name} in column \"{column}\"; cast it to text, a number, a boolean or a date in the query"
    )]
    UnsupportedType { column: String, type_name: String },
}

/// Failure to load the palette file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid palette: {0}")]
    Parse(#[from] toml::de::Error),
}
