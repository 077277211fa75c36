//! Logos-based lexer for SDF
//!
//! Fast tokenization using the logos crate. Trivia (whitespace, newlines and
//! comments) is consumed here and never reaches the parser; newlines only
//! advance the line counter used for diagnostics.

use super::syntax_kind::SyntaxKind;
use crate::base::{Position, TextSize};
use crate::error::{Error, Result};
use logos::Logos;

/// A token with its kind, text, and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
    pub position: Position,
}

/// Lexer wrapping the logos-generated tokenizer
///
/// Each lexer owns its own line counter, so independent parses never share
/// scanning state. The first illegal character ends the sequence.
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, LogosToken>,
    line: u32,
    line_start: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            source: input,
            inner: LogosToken::lexer(input),
            line: 1,
            line_start: 0,
            failed: false,
        }
    }

    fn position_at(&self, offset: usize) -> Position {
        let column = self.source[self.line_start..offset].chars().count() as u32 + 1;
        Position::new(self.line, column)
    }

    /// Advance the line counter past any newlines inside `text`
    fn track_newlines(&mut self, offset: usize, text: &str) {
        for (idx, _) in text.match_indices('\n') {
            self.line += 1;
            self.line_start = offset + idx + 1;
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let logos_token = self.inner.next()?;
            let span = self.inner.span();
            let text = self.inner.slice();
            let position = self.position_at(span.start);
            self.track_newlines(span.start, text);

            let kind: SyntaxKind = match logos_token {
                Ok(t) => t.into(),
                Err(()) => {
                    self.failed = true;
                    let ch = text.chars().next().unwrap_or('\0');
                    return Some(Err(Error::lex(ch, position)));
                }
            };
            if kind.is_trivia() {
                continue;
            }
            let kind = match kind {
                SyntaxKind::STRING => SyntaxKind::from_keyword(text).unwrap_or(kind),
                _ => kind,
            };

            return Some(Ok(Token {
                kind,
                text,
                offset: TextSize::new(span.start as u32),
                position,
            }));
        }
    }
}

/// Tokenize a string lazily.
///
/// Calling this again on the same text re-scans from the start.
pub fn tokenize(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

/// Logos token enum - maps to SyntaxKind
///
/// Logos picks the longest match; where a number and an identifier match the
/// same text (`12`, `1.5`) the explicit priorities make FLOAT win, and a lone
/// `.` or `/` is punctuation rather than a name. A longer run such as
/// `12_reg` stays one STRING.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[01]?'[bB][01]")]
    ScalarConstant,

    #[regex(r"-?\.?[0-9]+(\.[0-9]+)?", priority = 3)]
    Float,

    #[regex(r#""[-+]?[0-9]+\.[0-9]+""#, priority = 10)]
    QFloat,

    #[regex(r#""[^"]*""#)]
    QString,

    #[regex(r"([a-zA-Z0-9_/.\[\]]|\\.)+")]
    String,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(".", priority = 3)]
    Dot,
    #[token("/", priority = 3)]
    Slash,
    #[token("*")]
    Star,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&&")]
    AmpAmp,
    #[token("&")]
    Amp,
    #[token("~&")]
    TildeAmp,
    #[token("||")]
    PipePipe,
    #[token("|")]
    Pipe,
    #[token("~|")]
    TildePipe,
    #[token("^")]
    Caret,
    #[token("~^")]
    #[token("^~")]
    TildeCaret,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    BangEqEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Literals
            ScalarConstant => SyntaxKind::SCALAR_CONSTANT,
            Float => SyntaxKind::FLOAT,
            QFloat => SyntaxKind::QFLOAT,
            QString => SyntaxKind::QSTRING,
            String => SyntaxKind::STRING,

            // Punctuation
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Slash => SyntaxKind::SLASH,
            Star => SyntaxKind::STAR,

            // Operators
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Percent => SyntaxKind::PERCENT,
            Bang => SyntaxKind::BANG,
            Tilde => SyntaxKind::TILDE,
            AmpAmp => SyntaxKind::AMP_AMP,
            Amp => SyntaxKind::AMP,
            TildeAmp => SyntaxKind::TILDE_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            Pipe => SyntaxKind::PIPE,
            TildePipe => SyntaxKind::TILDE_PIPE,
            Caret => SyntaxKind::CARET,
            TildeCaret => SyntaxKind::TILDE_CARET,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            EqEqEq => SyntaxKind::EQ_EQ_EQ,
            BangEqEq => SyntaxKind::BANG_EQ_EQ,
            LtLt => SyntaxKind::LT_LT,
            GtGt => SyntaxKind::GT_GT,
            Gt => SyntaxKind::GT,
            GtEq => SyntaxKind::GT_EQ,
            Lt => SyntaxKind::LT,
            LtEq => SyntaxKind::LT_EQ,
        }
    }
}
