use std::io::{self, BufRead};

use serde::{Deserialize, Serialize};

use crate::frontend::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spanned {
    pub token: Token,
    pub span: Span,
}

/// The underlying reader failed before input was exhausted.
#[derive(Debug, thiserror::Error)]
#[error("{line}:{col}: read error: {source}")]
pub struct LexError {
    pub line: usize,
    pub col: usize,
    #[source]
    pub source: std::io::Error,
}

/// Splits a buffered character stream into tokens on demand.
///
/// Input is pulled one line at a time, so tokens are available before the
/// reader reaches end of input. Iteration ends at end of input or right after
/// the first read error. Whole words read before the error are still yielded.
pub struct Lexer<R> {
    reader: R,
    source: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    pending: Option<io::Error>,
    done: bool,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Lexer {
            reader,
            source: Vec::new(),
            pos: 0,
            line: 1,
            col: 1,
            pending: None,
            done: false,
        }
    }

    fn current(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current();
        if ch == Some('\n') {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.pos += 1;
        ch
    }

    fn span(&self) -> Span {
        Span {
            line: self.line,
            col: self.col,
        }
    }

    /// Loads the next line. Returns false at end of input.
    ///
    /// If the read fails or the line is not valid UTF-8, the words before the
    /// bad spot are loaded and the error is held until they are used up.
    fn fill(&mut self) -> bool {
        let mut bytes = Vec::new();
        let mut failure = self.reader.read_until(b'\n', &mut bytes).err();
        let text = match std::str::from_utf8(&bytes) {
            Ok(text) => text,
            Err(e) => {
                failure.get_or_insert_with(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        "stream did not contain valid UTF-8",
                    )
                });
                std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default()
            }
        };
        // a word cut off by the failure goes with it
        let text = if failure.is_some() {
            text.trim_end_matches(|c: char| !c.is_whitespace())
        } else {
            text
        };

        self.source = text.chars().collect();
        self.pos = 0;
        let loaded = !self.source.is_empty() || failure.is_some();
        self.pending = failure;
        loaded
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                break;
            }
            word.push(ch);
            self.advance();
        }
        word
    }

    fn scan(&mut self) -> Result<Option<Spanned>, LexError> {
        loop {
            self.skip_whitespace();
            if self.current().is_none() {
                if let Some(source) = self.pending.take() {
                    return Err(LexError {
                        line: self.line,
                        col: self.col,
                        source,
                    });
                }
                if !self.fill() {
                    return Ok(None);
                }
                continue;
            }

            let span = self.span();
            let text = self.read_word();
            return Ok(Some(Spanned {
                token: classify(text),
                span,
            }));
        }
    }
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = Result<Spanned, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scan() {
            Ok(Some(spanned)) => Some(Ok(spanned)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn classify(text: String) -> Token {
    match text.as_str() {
        ":" => Token::DefinitionStart,
        ";" => Token::DefinitionEnd,
        _ => match text.parse::<i64>() {
            Ok(n) => Token::Number(n),
            Err(_) => Token::Word(text),
        },
    }
}
