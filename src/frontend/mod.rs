//! Source text to tokens: the lexer, the token type and the `--tokens` view.

pub mod lexer;
pub mod token;
pub mod token_dumper;
