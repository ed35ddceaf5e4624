//! Per-program compilation: each program runs through its own lexer,
//! parser, analyzer, and code generator, with no state shared across
//! programs or files.
use alanpp_gen::Image;
use alanpp_lex::{Lexer, Token};
use alanpp_par::{CstNode, Parser};
use alanpp_sem::{AstNode, ScopeTree};
use alanpp_util::Handler;

/// Splits a source stream on its `$` end-of-program markers, re-appending
/// the marker to each non-empty chunk so every program is independently
/// re-parseable. Whitespace-only gaps between programs (and a trailing
/// newline after the last `$`) are dropped.
pub fn split_programs(source: &str) -> Vec<String> {
    source
        .split('$')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| format!("{chunk}$"))
        .collect()
}

/// Everything produced while compiling one `$`-terminated program. Each
/// field downstream of a failed stage stays `None`; the diagnostics that
/// explain why live on `handler`.
pub struct ProgramResult {
    pub index: usize,
    pub tokens: Vec<Token>,
    pub cst: Option<CstNode>,
    pub ast: Option<AstNode>,
    pub scopes: Option<ScopeTree>,
    pub image: Option<Image>,
    pub handler: Handler,
}

/// Runs one program through the full pipeline. All state — the token
/// vector, the handler, the scope tree, the emitter's heap/string
/// counters — is fresh per call, so nothing leaks between programs in a
/// multi-program file.
pub fn compile_program(source: &str, index: usize) -> ProgramResult {
    let _span = tracing::info_span!("compile_program", index).entered();
    let handler = Handler::new();

    let tokens: Vec<Token> = Lexer::new(source, &handler).collect();
    tracing::debug!(count = tokens.len(), "lexed program");

    let mut parser = Parser::new(tokens.clone(), &handler);
    let cst = parser.parse_program();

    let (ast, scopes) = match &cst {
        Some(cst) if !handler.has_errors() => {
            let (ast, scopes) = alanpp_sem::analyze_with_scopes(cst, &handler);
            (Some(ast), Some(scopes))
        }
        _ => (None, None),
    };

    let image = match &ast {
        Some(ast) if !handler.has_errors() => alanpp_gen::generate(ast, &handler),
        _ => None,
    };

    if image.is_some() {
        tracing::debug!("codegen produced an image");
    }

    ProgramResult {
        index,
        tokens,
        cst,
        ast,
        scopes,
        image,
        handler,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_programs_drops_whitespace_between_marker_and_next_brace() {
        let programs = split_programs("{print(\"a\")}$\n\n{print(\"b\")}$");
        assert_eq!(programs, vec!["{print(\"a\")}$", "{print(\"b\")}$"]);
    }

    #[test]
    fn a_single_program_round_trips_unchanged() {
        let programs = split_programs("{}$");
        assert_eq!(programs, vec!["{}$"]);
    }

    #[test]
    fn a_clean_program_compiles_all_the_way_to_an_image() {
        let result = compile_program("{print(\"hi\")}$", 0);
        assert!(!result.handler.has_errors());
        assert!(result.image.is_some());
    }

    #[test]
    fn a_parse_error_stops_the_pipeline_before_analysis() {
        let result = compile_program("{print(\"hi\")}", 0);
        assert!(result.handler.has_errors());
        assert!(result.ast.is_none());
        assert!(result.image.is_none());
    }

    #[test]
    fn a_semantic_error_stops_the_pipeline_before_codegen() {
        let result = compile_program("{a=1}$", 0);
        assert!(result.handler.has_errors());
        assert!(result.ast.is_some());
        assert!(result.image.is_none());
    }
}
