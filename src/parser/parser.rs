//! Recursive descent parser for SDF
//!
//! The token cursor lives here; the productions are free functions in
//! [`super::grammar`] that drive it and hand finished entries to a
//! [`Builder`]. Parsing stops at the first error.

use tracing::debug;

use super::grammar;
use super::lexer::{Token, tokenize};
use super::syntax_kind::SyntaxKind;
use crate::error::{END_OF_INPUT, Error, Result};
use crate::model::{Builder, Model};

/// Parse SDF text into a [`Model`]
pub fn parse(input: &str) -> Result<Model> {
    let mut parser = Parser::new(input)?;
    debug!("[PARSE] {} tokens", parser.tokens.len());

    let mut builder = Builder::new();
    grammar::delay_file(&mut parser, &mut builder)?;
    let model = builder.finish();

    debug!(
        "[PARSE] {} cells, {} entries",
        model.cells.len(),
        model.entry_count()
    );
    Ok(model)
}

/// The parser state: a fully lexed token buffer and a cursor into it
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Lex `input` completely; the first illegal character fails here.
    pub fn new(input: &'a str) -> Result<Self> {
        let tokens = tokenize(input).collect::<Result<Vec<_>>>()?;
        Ok(Self { tokens, pos: 0 })
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    pub fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Kind of the token `n` places ahead, `EOF` past the end
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Line of the current token, or of the last token at end of input
    pub fn line(&self) -> u32 {
        self.current()
            .or_else(|| self.tokens.last())
            .map(|t| t.position.line)
            .unwrap_or(1)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Consume the current token and return its text
    pub fn bump(&mut self) -> &'a str {
        let text = self.current_text();
        if !self.at_eof() {
            self.pos += 1;
        }
        text
    }

    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` and return its text, or fail on the current one
    pub fn expect(&mut self, kind: SyntaxKind) -> Result<&'a str> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error())
        }
    }

    /// Consume a token of any of `kinds` and return its text
    pub fn expect_any(&mut self, kinds: &[SyntaxKind]) -> Result<&'a str> {
        if self.at_any(kinds) {
            Ok(self.bump())
        } else {
            Err(self.error())
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    /// Syntax error at the current token
    pub fn error(&self) -> Error {
        let token = match self.current() {
            Some(token) => token.text,
            None => END_OF_INPUT,
        };
        Error::parse_at(token, self.line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_lookahead() {
        let p = Parser::new("(CELL (CELLTYPE").unwrap();
        assert!(p.at(SyntaxKind::L_PAREN));
        assert_eq!(p.nth(1), SyntaxKind::CELL_KW);
        assert_eq!(p.nth(3), SyntaxKind::CELLTYPE_KW);
        assert_eq!(p.nth(4), SyntaxKind::EOF);
    }

    #[test]
    fn test_expect_reports_token_and_line() {
        let mut p = Parser::new("(\n\nIOPATH").unwrap();
        p.expect(SyntaxKind::L_PAREN).unwrap();
        let err = p.expect(SyntaxKind::CELL_KW).unwrap_err();
        assert_eq!(err, Error::parse_at("IOPATH", 3));
    }

    #[test]
    fn test_error_at_end_of_input() {
        let mut p = Parser::new("(\n)").unwrap();
        p.bump();
        p.bump();
        assert!(p.at_eof());
        assert_eq!(p.error(), Error::parse_at(END_OF_INPUT, 2));
    }

    #[test]
    fn test_lex_error_surfaces_from_new() {
        assert!(matches!(
            Parser::new("(DELAYFILE #)"),
            Err(Error::Lex { ch: '#', .. })
        ));
    }
}
