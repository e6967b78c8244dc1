//! Everything that runs tokens: the value stack, built-in words, the
//! dictionary, the evaluator and the `Machine` facade.

pub mod builtins;
pub mod config;
pub mod dictionary;
pub mod evaluator;
pub mod machine;
pub mod stack;
