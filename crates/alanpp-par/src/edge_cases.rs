//! Edge-case tests for the Alan++ parser, exercising whole-program scenarios
//! (`Block EOP`) rather than one production at a time.

#[cfg(test)]
mod tests {
    use alanpp_util::Handler;

    use crate::{CstNode, Parser};

    fn parse_program(source: &str) -> (Option<CstNode>, Handler) {
        let handler = Handler::new();
        let mut parser = Parser::from_source(source, &handler);
        let cst = parser.parse_program();
        (cst, handler)
    }

    #[test]
    fn empty_program_parses() {
        let (cst, handler) = parse_program("{}$");
        assert!(!handler.has_errors());
        assert!(cst.is_some());
    }

    #[test]
    fn whitespace_only_source_is_missing_eop() {
        let (cst, handler) = parse_program("   \n\t  ");
        assert!(cst.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn deeply_nested_blocks_parse() {
        let source = "{{{{{}}}}}$";
        let (cst, handler) = parse_program(source);
        assert!(!handler.has_errors());
        assert!(cst.is_some());
    }

    #[test]
    fn multiple_declarations_and_assignments() {
        let source = "{int a string b boolean c a=1 b=\"x\" c=true}$";
        let (cst, handler) = parse_program(source);
        assert!(!handler.has_errors());
        assert!(cst.is_some());
    }

    #[test]
    fn while_loop_with_nested_if() {
        let source = "{while(a==b){if true{print(a)}}}$";
        let (cst, handler) = parse_program(source);
        assert!(!handler.has_errors());
        assert!(cst.is_some());
    }

    #[test]
    fn print_of_a_plus_chain() {
        let source = "{print(1+2+3)}$";
        let (cst, handler) = parse_program(source);
        assert!(!handler.has_errors());
        assert!(cst.is_some());
    }

    #[test]
    fn error_missing_closing_brace() {
        let (cst, handler) = parse_program("{int a$");
        assert!(cst.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn error_missing_eop_after_otherwise_valid_program() {
        let (cst, handler) = parse_program("{int a a=1}");
        assert!(cst.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn error_unbalanced_paren_in_print() {
        let (cst, handler) = parse_program("{print(1}$");
        assert!(cst.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn error_while_without_parenthesized_condition() {
        // `while` requires a BoolExpr condition: a bare comparison with no
        // parens is not one, so `while a==b {}` fails on the missing block
        // (the `==` and second operand are never consumed as a condition).
        let (cst, handler) = parse_program("{while a==b{}}$");
        assert!(cst.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn error_vardecl_missing_identifier() {
        let (cst, handler) = parse_program("{int}$");
        assert!(cst.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn error_assignment_missing_expr() {
        let (cst, handler) = parse_program("{int a a=}$");
        assert!(cst.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn error_invalid_token_at_block_start_falls_through_to_unbalanced_braces() {
        let (cst, handler) = parse_program("{)}$");
        assert!(cst.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn error_first_error_does_not_prevent_diagnostic_from_naming_position() {
        let handler = Handler::new();
        let mut parser = Parser::from_source("{int a a=}$", &handler);
        let _ = parser.parse_program();
        let diagnostics = handler.diagnostics();
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn comment_between_statements_is_invisible_to_the_parser() {
        let source = "{int/* a variable */a a=1}$";
        let (cst, handler) = parse_program(source);
        assert!(!handler.has_errors());
        assert!(cst.is_some());
    }

    #[test]
    fn nested_comparisons_as_operands_parse() {
        let source = "{if((1+1==2)==true){}}$";
        let (cst, handler) = parse_program(source);
        assert!(!handler.has_errors());
        assert!(cst.is_some());
    }
}
