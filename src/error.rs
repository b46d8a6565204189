use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: &'static str },

    #[error("no usable input files")]
    NoInput,

    #[error("quantity conservation violated: {input} in, {output} out")]
    Conservation { input: i64, output: i64 },
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
