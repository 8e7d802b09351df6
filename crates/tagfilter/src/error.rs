/// Errors raised while parsing tag-filter text or normalizing REST trees.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TagFilterError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { pos: usize, ch: char },

    #[error("unterminated string starting at position {pos}")]
    UnterminatedString { pos: usize },

    #[error("invalid number '{text}' at position {pos}")]
    InvalidNumber { pos: usize, text: String },

    #[error("expected {expected} at position {pos}, found {found}")]
    UnexpectedToken {
        pos: usize,
        expected: String,
        found: String,
    },

    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("unknown entity origin '{0}'")]
    UnknownOrigin(String),

    #[error("unsupported tag filter element type '{0}'")]
    UnsupportedType(String),

    #[error("tag filter element is missing '{0}'")]
    MissingField(&'static str),

    #[error("operator {0} requires a value")]
    MissingValue(String),
}
