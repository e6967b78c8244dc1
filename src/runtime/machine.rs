use std::io::{BufRead, Write};

use tracing::trace;

use crate::error::Result;
use crate::frontend::lexer::Lexer;
use crate::runtime::config::MachineConfig;
use crate::runtime::dictionary::Dictionary;
use crate::runtime::evaluator::Evaluator;
use crate::runtime::stack::Stack;

/// An interpreter whose stack and definitions survive across `eval` calls.
///
/// Output from `.`, `.s` and `emit` goes to the writer given at
/// construction.
pub struct Machine<W> {
    stack: Stack,
    dictionary: Dictionary,
    out: W,
    config: MachineConfig,
}

impl<W: Write> Machine<W> {
    pub fn new(out: W) -> Self {
        Self::with_config(out, MachineConfig::default())
    }

    pub fn with_config(out: W, config: MachineConfig) -> Self {
        Machine {
            stack: Stack::with_limit(config.max_stack_size),
            dictionary: Dictionary::with_builtins(),
            out,
            config,
        }
    }

    /// Lexes and evaluates `input` against the current state.
    pub fn eval<R: BufRead>(&mut self, input: R) -> Result<()> {
        trace!(stack_len = self.stack.len(), "eval start");
        let mut evaluator = Evaluator::new(&mut self.stack, &mut self.out, &self.config);
        let result = evaluator.run(&mut self.dictionary, Lexer::new(input));
        trace!(stack_len = self.stack.len(), ok = result.is_ok(), "eval done");
        result
    }

    pub fn eval_str(&mut self, source: &str) -> Result<()> {
        self.eval(source.as_bytes())
    }

    /// Current stack, bottom first.
    pub fn stack(&self) -> &[i64] {
        self.stack.as_slice()
    }

    /// Names of every bound word, sorted.
    pub fn words(&self) -> Vec<&str> {
        self.dictionary.names()
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
