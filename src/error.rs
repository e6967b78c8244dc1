use crate::frontend::lexer::LexError;

/// Every way an evaluation call can fail.
///
/// Variants carry structured data; the human-readable text only exists in
/// the `Display` impl so callers can match on the kind.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("need {} to {}", quantity(.needed), .action)]
    StackUnderflow { action: &'static str, needed: usize },

    #[error("unknown word: {0:?}")]
    UnknownWord(String),

    #[error("divide by zero")]
    DivideByZero,

    #[error("invalid word definition")]
    InvalidDefinition,

    #[error("cannot redefine numbers")]
    NumericName(i64),

    #[error("unexpected ';' outside of a word definition")]
    UnexpectedDefinitionEnd,

    #[error("call depth limit exceeded ({limit})")]
    CallDepthExceeded { limit: usize },

    #[error("stack size limit exceeded ({limit})")]
    StackOverflow { limit: usize },

    #[error(transparent)]
    Stream(#[from] LexError),

    #[error("output error: {0}")]
    Output(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn quantity(needed: &usize) -> String {
    match needed {
        1 => "a value".to_string(),
        2 => "two values".to_string(),
        n => format!("{} values", n),
    }
}
