//! # forthy
//!
//! A small Forth-like interpreter over a stack of `i64`.
//!
//! Source text is split into whitespace-separated tokens. Integer literals
//! are pushed; anything else is looked up, case-insensitively, in the
//! dictionary and run. `: name body ;` defines a word whose body is bound to
//! the dictionary as it stood at that moment, so later redefinitions never
//! change what an existing word does.
//!
//! ```
//! let mut m = forthy::Machine::new(Vec::new());
//! m.eval_str(": foo 10 ; : foo foo 1 + ; foo .s").unwrap();
//! assert_eq!(m.stack(), &[11]);
//! assert_eq!(m.output(), b"11 ");
//! ```

pub mod error;
pub mod frontend;
pub mod runtime;

pub use error::{Error, Result};
pub use frontend::lexer::{LexError, Lexer, Span, Spanned};
pub use frontend::token::Token;
pub use frontend::token_dumper::TokenDumper;
pub use runtime::config::MachineConfig;
pub use runtime::dictionary::{Dictionary, Operation};
pub use runtime::machine::Machine;
pub use runtime::stack::Stack;
