use thiserror::Error;

/// Errors surfaced by the stylesheet mutation and parsing APIs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The index passed to `insert_rule`/`delete_rule` is outside the valid
    /// range for that operation (DOM `INDEX_SIZE_ERR`).
    #[error("index {index} is out of range for a rule list of length {len} (INDEX_SIZE_ERR)")]
    IndexSize { index: usize, len: usize },

    /// The rule text could not be parsed.
    #[error("failed to parse rule: {0}")]
    Parse(String),
}
