use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NflxError>;

#[derive(Error, Debug)]
pub enum NflxError {
    /// A cell that must be numeric (or an enum) could not be parsed.
    /// `row` is 1-based and does not count the header line.
    #[error("row {row}: cannot parse {column} from {value:?}")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("no titles loaded")]
    EmptyInput,

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
