use std::io::{self, Write};

use crate::frontend::lexer::Spanned;
use crate::frontend::token::Token;

/// How the dumper renders each token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    /// `[line:col] KIND  Debug-repr`
    Debug,
    /// `[line:col] KIND  source text`
    Pretty,
    /// One JSON object per line.
    Json,
}

pub struct TokenDumper {
    pub color: bool,
    pub format: DumpFormat,
}

impl Default for TokenDumper {
    fn default() -> Self {
        Self {
            color: true,
            format: DumpFormat::Debug,
        }
    }
}

impl TokenDumper {
    // ANSI colors
    const RESET: &'static str = "\x1b[0m";
    const YEL: &'static str = "\x1b[33m";
    const CYN: &'static str = "\x1b[36m";
    const MAG: &'static str = "\x1b[35m";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.format = DumpFormat::Pretty;
        self
    }

    pub fn json(mut self) -> Self {
        self.format = DumpFormat::Json;
        self.color = false;
        self
    }

    pub fn dump_one<W: Write>(&self, out: &mut W, s: &Spanned) -> io::Result<()> {
        if self.format == DumpFormat::Json {
            serde_json::to_writer(&mut *out, s)?;
            return writeln!(out);
        }

        let kind = kind(&s.token);
        let colr = if self.color { color(&s.token) } else { "" };
        let reset = if self.color { Self::RESET } else { "" };

        match self.format {
            DumpFormat::Pretty => writeln!(
                out,
                "[{:02}:{:02}] {}{:<8} {}{}",
                s.span.line, s.span.col, colr, kind, s.token, reset
            ),
            _ => writeln!(
                out,
                "[{:02}:{:02}] {}{:<8} {:?}{}",
                s.span.line, s.span.col, colr, kind, s.token, reset
            ),
        }
    }
}

fn kind(t: &Token) -> &'static str {
    match t {
        Token::Number(_) => "NUMBER",
        Token::Word(_) => "WORD",
        Token::DefinitionStart | Token::DefinitionEnd => "DEF",
    }
}

fn color(t: &Token) -> &'static str {
    match t {
        Token::Number(_) => TokenDumper::CYN,
        Token::Word(_) => TokenDumper::YEL,
        Token::DefinitionStart | Token::DefinitionEnd => TokenDumper::MAG,
    }
}
