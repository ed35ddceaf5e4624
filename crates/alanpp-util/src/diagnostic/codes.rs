//! Diagnostic codes for categorizing compiler errors and warnings.
//!
//! This module provides the [`DiagnosticCode`] type for uniquely identifying
//! diagnostic messages, enabling users to look up documentation and suppress
//! specific warnings.
//!
//! # Examples
//!
//! ```
//! use alanpp_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_LEXER_INVALID_CHAR;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.as_str(), "E1001");
//! ```

/// A unique code identifying a diagnostic message
///
/// Diagnostic codes follow the format `{prefix}{number}` where:
/// - `prefix` is typically "E" for errors or "W" for warnings
/// - `number` is a 4-digit number (padded with zeros)
///
/// This allows users to reference specific diagnostics in documentation
/// and suppression attributes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix (e.g., "E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    ///
    /// # Arguments
    ///
    /// * `prefix` - The code prefix (typically "E" or "W")
    /// * `number` - The numeric identifier
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the prefix (e.g., "E" for error, "W" for warning)
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Get the full code string (e.g., "E1001", "W4001")
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // LEXER (E1xxx)
    // =========================================================================

    /// E1001: invalid character outside `{ } ( ) + = ! $ "`, a letter, a digit, or whitespace
    pub const E_LEXER_INVALID_CHAR: Self = Self::new("E", 1001);
    /// E1002: non-`[a-z ]` character inside a string literal
    pub const E_LEXER_INVALID_STRING_CHAR: Self = Self::new("E", 1002);
    /// E1003: newline encountered inside an open string literal
    pub const E_LEXER_NEWLINE_IN_STRING: Self = Self::new("E", 1003);
    /// E1004: string literal still open at end of input
    pub const E_LEXER_UNTERMINATED_STRING: Self = Self::new("E", 1004);
    /// E1005: `/*` block comment never closed before end of input
    pub const E_LEXER_UNTERMINATED_COMMENT: Self = Self::new("E", 1005);
    /// E1006: `!` not followed by `=`
    pub const E_LEXER_BANG_WITHOUT_EQ: Self = Self::new("E", 1006);

    // =========================================================================
    // PARSER (E2xxx)
    // =========================================================================

    /// E2001: current token does not start any production the grammar allows here
    pub const E_PARSER_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    /// E2002: a specific token kind was required and a different one was found
    pub const E_PARSER_EXPECTED_TOKEN: Self = Self::new("E", 2002);
    /// E2003: input ended while a production was still expecting tokens
    pub const E_PARSER_UNEXPECTED_EOF: Self = Self::new("E", 2003);
    /// E2004: a program's token stream ended without the `$` end-of-program marker
    pub const E_PARSER_MISSING_EOP: Self = Self::new("E", 2004);

    // =========================================================================
    // SEMANTIC (E3xxx)
    // =========================================================================

    /// E3001: right-hand side type is not assignable to the declared left-hand type
    pub const E_SEMANTIC_TYPE_MISMATCH: Self = Self::new("E", 3001);
    /// E3002: identifier referenced without a reachable declaration
    pub const E_SEMANTIC_UNDECLARED_VAR: Self = Self::new("E", 3002);
    /// E3003: a name is declared twice in the same scope
    pub const E_SEMANTIC_DUPLICATE_DECL: Self = Self::new("E", 3003);
    /// E3004: operands of `+` are not both `int`
    pub const E_SEMANTIC_INTOP_TYPE: Self = Self::new("E", 3004);
    /// E3005: operands of `==`/`!=` are not the same primitive type
    pub const E_SEMANTIC_BOOLOP_TYPE: Self = Self::new("E", 3005);
    /// E3006: `if`/`while` condition is not a boolean expression or value
    pub const E_SEMANTIC_CONDITION_TYPE: Self = Self::new("E", 3006);

    // =========================================================================
    // CODEGEN (E4xxx fatal, W4xxx non-fatal)
    // =========================================================================

    /// E4001: a signed one-byte branch displacement does not fit the required distance
    pub const E_CODEGEN_BRANCH_OUT_OF_RANGE: Self = Self::new("E", 4001);
    /// E4002: a variable address could not be resolved during backpatching
    pub const E_CODEGEN_UNRESOLVED_ADDRESS: Self = Self::new("E", 4002);

    /// W4001: emitted code image exceeds 256 bytes; the image is still produced
    pub const W_CODEGEN_IMAGE_TOO_LARGE: Self = Self::new("W", 4001);

    // =========================================================================
    // SEMANTIC-FLOW (W3xxx, non-fatal)
    // =========================================================================

    /// W3001: a declared name's value is read before any reachable assignment
    pub const W_SEMANTIC_MAYBE_UNINITIALIZED: Self = Self::new("W", 3001);
    /// W3002: a declared name is never read or printed
    pub const W_SEMANTIC_UNUSED_VARIABLE: Self = Self::new("W", 3002);

    // =========================================================================
    // DRIVER (E5xxx) — CLI/I-O failures outside the four core stages
    // =========================================================================

    /// E5001: the input path could not be opened or read
    pub const E_DRIVER_IO_FAILURE: Self = Self::new("E", 5001);
    /// E5002: output path could not be created or written
    pub const E_DRIVER_OUTPUT_FAILURE: Self = Self::new("E", 5002);
    /// E5003: invalid combination of CLI arguments
    pub const E_DRIVER_BAD_ARGS: Self = Self::new("E", 5003);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
