use std::io::Write;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::frontend::lexer::{LexError, Spanned};
use crate::frontend::token::Token;
use crate::runtime::config::MachineConfig;
use crate::runtime::dictionary::{Dictionary, Operation, UserWord};
use crate::runtime::stack::Stack;

/// A user word being replayed, and the index of its next body token.
struct Frame {
    word: Rc<UserWord>,
    pos: usize,
}

/// Applies tokens to a stack for the duration of one evaluation call.
///
/// Calls to user-defined words are kept on an explicit frame stack rather
/// than the native one, so long chains of redefinitions replay in a loop.
pub struct Evaluator<'a> {
    stack: &'a mut Stack,
    out: &'a mut dyn Write,
    config: &'a MachineConfig,
    frames: Vec<Frame>,
}

impl<'a> Evaluator<'a> {
    pub fn new(stack: &'a mut Stack, out: &'a mut dyn Write, config: &'a MachineConfig) -> Self {
        Evaluator {
            stack,
            out,
            config,
            frames: Vec::new(),
        }
    }

    /// Runs a token stream at top level, where `: name ... ;` installs words
    /// into `dict`. Stops at the first error; earlier effects are kept.
    pub fn run<I>(&mut self, dict: &mut Dictionary, mut tokens: I) -> Result<()>
    where
        I: Iterator<Item = std::result::Result<Spanned, LexError>>,
    {
        while let Some(next) = tokens.next() {
            let spanned = next?;
            match spanned.token {
                Token::DefinitionStart => self.define(dict, &mut tokens)?,
                Token::DefinitionEnd => return Err(Error::UnexpectedDefinitionEnd),
                token => self.perform(dict, &token)?,
            }
        }
        Ok(())
    }

    /// Runs already-lexed tokens against `dict` without definition handling.
    pub fn execute(&mut self, dict: &Dictionary, body: &[Token]) -> Result<()> {
        for token in body {
            self.perform(dict, token)?;
        }
        Ok(())
    }

    fn define<I>(&mut self, dict: &mut Dictionary, tokens: &mut I) -> Result<()>
    where
        I: Iterator<Item = std::result::Result<Spanned, LexError>>,
    {
        let name = match tokens.next().transpose()? {
            Some(Spanned {
                token: Token::Word(name),
                ..
            }) => name,
            Some(Spanned {
                token: Token::Number(n),
                ..
            }) => return Err(Error::NumericName(n)),
            _ => return Err(Error::InvalidDefinition),
        };

        // Nested ':' is kept as a plain token. A missing ';' or a read error
        // ends the body where the input stopped; the error is reported after
        // the word is installed.
        let mut body = Vec::new();
        let mut failure = None;
        for next in tokens.by_ref() {
            match next {
                Ok(Spanned {
                    token: Token::DefinitionEnd,
                    ..
                }) => break,
                Ok(spanned) => body.push(spanned.token),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        debug!(word = %name, body_len = body.len(), "defining word");
        dict.define_word(&name, body);
        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Applies one top-level token and replays whatever it calls to the end.
    fn perform(&mut self, dict: &Dictionary, token: &Token) -> Result<()> {
        let result = self.apply(dict, token).and_then(|()| self.resume());
        if result.is_err() {
            self.frames.clear();
        }
        result
    }

    fn resume(&mut self) -> Result<()> {
        while let Some(frame) = self.frames.last_mut() {
            let word = Rc::clone(&frame.word);
            let pos = frame.pos;
            frame.pos += 1;
            match word.body.get(pos) {
                Some(token) => self.apply(&word.scope, token)?,
                None => {
                    self.frames.pop();
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, dict: &Dictionary, token: &Token) -> Result<()> {
        match token {
            Token::Number(n) => self.stack.push(*n),
            Token::Word(w) => match dict.get(w) {
                Some(Operation::Primitive(f)) => f(&mut *self.stack),
                Some(Operation::Printer(f)) => f(&mut *self.stack, &mut *self.out),
                Some(Operation::UserDefined(word)) => self.enter(Rc::clone(word)),
                None => Err(Error::UnknownWord(w.clone())),
            },
            // markers have no binding once inside a body
            marker => Err(Error::UnknownWord(marker.to_string())),
        }
    }

    fn enter(&mut self, word: Rc<UserWord>) -> Result<()> {
        if let Some(limit) = self.config.max_call_depth {
            if self.frames.len() >= limit {
                return Err(Error::CallDepthExceeded { limit });
            }
        }

        trace!(word = %word.name, depth = self.frames.len() + 1, "calling word");
        self.frames.push(Frame { word, pos: 0 });
        Ok(())
    }
}
