//! Token kinds produced by the SDF lexer
//!
//! Keywords are not lexed directly: a generic STRING whose text exactly equals
//! a reserved word is reclassified through [`SyntaxKind::from_keyword`].

/// All token kinds of the SDF language
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (never handed to the parser)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    FLOAT,           // 12, -0.5, .25
    SCALAR_CONSTANT, // 1'b0, 'B1
    QFLOAT,          // "3.0"
    QSTRING,         // "BIGCHIP"
    STRING,          // a/b/c, d[0], slicem/lut_c

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN, // (
    R_PAREN, // )
    COLON,   // :
    DOT,     // .
    SLASH,   // /
    STAR,    // *

    // =========================================================================
    // OPERATORS (conditional equations)
    // =========================================================================
    PLUS,        // +
    MINUS,       // -
    PERCENT,     // %
    BANG,        // !
    TILDE,       // ~
    AMP_AMP,     // &&
    AMP,         // &
    TILDE_AMP,   // ~&
    PIPE_PIPE,   // ||
    PIPE,        // |
    TILDE_PIPE,  // ~|
    CARET,       // ^
    TILDE_CARET, // ~^ or ^~
    EQ_EQ,       // ==
    BANG_EQ,     // !=
    EQ_EQ_EQ,    // ===
    BANG_EQ_EQ,  // !==
    LT_LT,       // <<
    GT_GT,       // >>
    GT,          // >
    GT_EQ,       // >=
    LT,          // <
    LT_EQ,       // <=

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    DELAYFILE_KW,
    SDFVERSION_KW,
    DESIGN_KW,
    DATE_KW,
    VENDOR_KW,
    PROGRAM_KW,
    VERSION_KW,
    DIVIDER_KW,
    VOLTAGE_KW,
    PROCESS_KW,
    TEMPERATURE_KW,
    TIMESCALE_KW,
    CELL_KW,
    CELLTYPE_KW,
    INSTANCE_KW,
    DELAY_KW,
    ABSOLUTE_KW,
    INCREMENT_KW,
    IOPATH_KW,
    INTERCONNECT_KW,
    PORT_KW,
    DEVICE_KW,
    RETAIN_KW,
    COND_KW,
    POSEDGE_KW,
    NEGEDGE_KW,
    TIMINGCHECK_KW,
    SETUP_KW,
    HOLD_KW,
    SETUPHOLD_KW,
    RECOVERY_KW,
    REMOVAL_KW,
    RECREM_KW,
    WIDTH_KW,
    PERIOD_KW,
    NOCHANGE_KW,
    TIMINGENV_KW,
    PATHCONSTRAINT_KW,

    // Marker returned when the parser looks past the last token
    EOF,
}

/// Reserved words and the kinds they reclassify to. Case-sensitive.
const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("DELAYFILE", SyntaxKind::DELAYFILE_KW),
    ("SDFVERSION", SyntaxKind::SDFVERSION_KW),
    ("DESIGN", SyntaxKind::DESIGN_KW),
    ("DATE", SyntaxKind::DATE_KW),
    ("VENDOR", SyntaxKind::VENDOR_KW),
    ("PROGRAM", SyntaxKind::PROGRAM_KW),
    ("VERSION", SyntaxKind::VERSION_KW),
    ("DIVIDER", SyntaxKind::DIVIDER_KW),
    ("VOLTAGE", SyntaxKind::VOLTAGE_KW),
    ("PROCESS", SyntaxKind::PROCESS_KW),
    ("TEMPERATURE", SyntaxKind::TEMPERATURE_KW),
    ("TIMESCALE", SyntaxKind::TIMESCALE_KW),
    ("CELL", SyntaxKind::CELL_KW),
    ("CELLTYPE", SyntaxKind::CELLTYPE_KW),
    ("INSTANCE", SyntaxKind::INSTANCE_KW),
    ("DELAY", SyntaxKind::DELAY_KW),
    ("ABSOLUTE", SyntaxKind::ABSOLUTE_KW),
    ("INCREMENT", SyntaxKind::INCREMENT_KW),
    ("IOPATH", SyntaxKind::IOPATH_KW),
    ("INTERCONNECT", SyntaxKind::INTERCONNECT_KW),
    ("PORT", SyntaxKind::PORT_KW),
    ("DEVICE", SyntaxKind::DEVICE_KW),
    ("RETAIN", SyntaxKind::RETAIN_KW),
    ("COND", SyntaxKind::COND_KW),
    ("posedge", SyntaxKind::POSEDGE_KW),
    ("negedge", SyntaxKind::NEGEDGE_KW),
    ("TIMINGCHECK", SyntaxKind::TIMINGCHECK_KW),
    ("SETUP", SyntaxKind::SETUP_KW),
    ("HOLD", SyntaxKind::HOLD_KW),
    ("SETUPHOLD", SyntaxKind::SETUPHOLD_KW),
    ("RECOVERY", SyntaxKind::RECOVERY_KW),
    ("REMOVAL", SyntaxKind::REMOVAL_KW),
    ("RECREM", SyntaxKind::RECREM_KW),
    ("WIDTH", SyntaxKind::WIDTH_KW),
    ("PERIOD", SyntaxKind::PERIOD_KW),
    ("NOCHANGE", SyntaxKind::NOCHANGE_KW),
    ("TIMINGENV", SyntaxKind::TIMINGENV_KW),
    ("PATHCONSTRAINT", SyntaxKind::PATHCONSTRAINT_KW),
];

impl SyntaxKind {
    /// Look up the keyword kind for an identifier, if it is reserved
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == text)
            .map(|(_, kind)| *kind)
    }

    /// Check if this is trivia (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE | SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT
        )
    }

    /// Check if this is a reserved word
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::DELAYFILE_KW as u16)
            && (self as u16) <= (SyntaxKind::PATHCONSTRAINT_KW as u16)
    }

    /// Operators that may appear in prefix position of a conditional equation
    pub fn is_unary_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::BANG
                | SyntaxKind::TILDE
                | SyntaxKind::AMP
                | SyntaxKind::TILDE_AMP
                | SyntaxKind::PIPE
                | SyntaxKind::TILDE_PIPE
                | SyntaxKind::CARET
                | SyntaxKind::TILDE_CARET
                | SyntaxKind::PLUS
                | SyntaxKind::MINUS
        )
    }

    /// Operators that join two operands of a conditional equation.
    ///
    /// `*` and `/` lex as punctuation but act as arithmetic operators here.
    pub fn is_binary_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::PLUS
                | SyntaxKind::MINUS
                | SyntaxKind::STAR
                | SyntaxKind::SLASH
                | SyntaxKind::PERCENT
                | SyntaxKind::AMP_AMP
                | SyntaxKind::AMP
                | SyntaxKind::TILDE_AMP
                | SyntaxKind::PIPE_PIPE
                | SyntaxKind::PIPE
                | SyntaxKind::TILDE_PIPE
                | SyntaxKind::CARET
                | SyntaxKind::TILDE_CARET
                | SyntaxKind::EQ_EQ
                | SyntaxKind::BANG_EQ
                | SyntaxKind::EQ_EQ_EQ
                | SyntaxKind::BANG_EQ_EQ
                | SyntaxKind::LT_LT
                | SyntaxKind::GT_GT
                | SyntaxKind::GT
                | SyntaxKind::GT_EQ
                | SyntaxKind::LT
                | SyntaxKind::LT_EQ
        )
    }
}
