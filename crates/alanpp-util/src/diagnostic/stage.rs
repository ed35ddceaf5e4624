use std::fmt;

/// Which pipeline stage produced a diagnostic.
///
/// The core four mirror the stages defined by the language: lexing, parsing,
/// semantic analysis, and code generation. `Driver` is not part of that
/// taxonomy — it covers diagnostics raised by the command-line front end
/// itself (bad CLI arguments, I/O failures) before any stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lexer,
    Parser,
    Semantic,
    Codegen,
    Driver,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Lexer => "lexer",
            Stage::Parser => "parser",
            Stage::Semantic => "semantic",
            Stage::Codegen => "codegen",
            Stage::Driver => "driver",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
