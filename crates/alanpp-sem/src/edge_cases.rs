//! Edge-case tests for semantic analysis, exercising whole-program scenarios
//! end to end: source text through the parser's CST into the analyzer.

#[cfg(test)]
mod tests {
    use alanpp_par::Parser;
    use alanpp_util::{DiagnosticCode, Handler};

    use crate::analyze;

    fn codes(handler: &Handler) -> Vec<Option<DiagnosticCode>> {
        handler.diagnostics().iter().map(|d| d.code).collect()
    }

    fn run(source: &str) -> Handler {
        let handler = Handler::new();
        let mut parser = Parser::from_source(source, &handler);
        let cst = parser
            .parse_program()
            .expect("all edge case sources here are syntactically valid");
        analyze(&cst, &handler);
        handler
    }

    #[test]
    fn a_clean_program_has_no_diagnostics() {
        let handler = run("{int a a=1 print(a)}$");
        assert!(!handler.has_errors());
        assert!(handler.diagnostics().is_empty());
    }

    #[test]
    fn shadowing_an_outer_declaration_in_a_nested_block_is_allowed() {
        // S3: `a` declared at the outer scope, then redeclared inside a
        // nested block — not a duplicate, since duplicate-declaration
        // checking only looks at the current scope.
        let handler = run("{int a a=1 {int a a=2 print(a)} print(a)}$");
        assert!(!handler.has_errors());
        assert!(!codes(&handler).contains(&Some(DiagnosticCode::E_SEMANTIC_DUPLICATE_DECL)));
    }

    #[test]
    fn redeclaring_in_the_same_scope_is_a_duplicate_declaration() {
        let handler = run("{int a int a a=1 print(a)}$");
        assert!(handler.has_errors());
        assert!(codes(&handler).contains(&Some(DiagnosticCode::E_SEMANTIC_DUPLICATE_DECL)));
    }

    #[test]
    fn assigning_a_string_to_an_int_variable_is_a_type_mismatch() {
        // S4: declared type disagrees with the assigned expression's type.
        let handler = run(r#"{int a a="x"}$"#);
        assert!(handler.has_errors());
        assert!(codes(&handler).contains(&Some(DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH)));
    }

    #[test]
    fn assigning_a_variable_of_the_matching_type_is_fine() {
        let handler = run("{int a int b a=1 b=a print(b)}$");
        assert!(!handler.has_errors());
    }

    #[test]
    fn using_an_undeclared_identifier_is_reported() {
        // S5: `b` is never declared anywhere in scope.
        let handler = run("{int a a=1 print(b)}$");
        assert!(handler.has_errors());
        assert!(codes(&handler).contains(&Some(DiagnosticCode::E_SEMANTIC_UNDECLARED_VAR)));
    }

    #[test]
    fn assigning_to_an_undeclared_identifier_is_also_reported() {
        let handler = run("{a=1}$");
        assert!(handler.has_errors());
        assert!(codes(&handler).contains(&Some(DiagnosticCode::E_SEMANTIC_UNDECLARED_VAR)));
    }

    #[test]
    fn reading_a_declared_but_never_assigned_variable_warns() {
        let handler = run("{int a print(a)}$");
        assert!(!handler.has_errors());
        assert!(codes(&handler).contains(&Some(DiagnosticCode::W_SEMANTIC_MAYBE_UNINITIALIZED)));
    }

    #[test]
    fn a_declared_and_assigned_but_never_read_variable_warns_unused() {
        let handler = run("{int a a=1}$");
        assert!(!handler.has_errors());
        assert!(codes(&handler).contains(&Some(DiagnosticCode::W_SEMANTIC_UNUSED_VARIABLE)));
    }

    #[test]
    fn a_variable_that_is_both_assigned_and_read_has_neither_warning() {
        let handler = run("{int a a=1 print(a)}$");
        let cs = codes(&handler);
        assert!(!cs.contains(&Some(DiagnosticCode::W_SEMANTIC_UNUSED_VARIABLE)));
        assert!(!cs.contains(&Some(DiagnosticCode::W_SEMANTIC_MAYBE_UNINITIALIZED)));
    }

    #[test]
    fn plus_chain_with_a_non_int_operand_is_reported() {
        let handler = run(r#"{string s s="x" print(1+s)}$"#);
        assert!(handler.has_errors());
        assert!(codes(&handler).contains(&Some(DiagnosticCode::E_SEMANTIC_INTOP_TYPE)));
    }

    #[test]
    fn comparing_operands_of_different_types_is_a_boolop_type_error() {
        let handler = run(r#"{string s s="x" if(1==s){}}$"#);
        assert!(handler.has_errors());
        assert!(codes(&handler).contains(&Some(DiagnosticCode::E_SEMANTIC_BOOLOP_TYPE)));
    }

    #[test]
    fn comparing_operands_of_the_same_type_is_fine() {
        let handler = run("{int a a=1 if(a==1){}}$");
        assert!(!handler.has_errors());
    }

    #[test]
    fn a_bare_boolval_condition_needs_no_operand_check() {
        let handler = run("{while true{}}$");
        assert!(!handler.has_errors());
    }

    #[test]
    fn while_loop_body_is_its_own_scope() {
        let handler = run("{while true{int a a=1 print(a)}}$");
        assert!(!handler.has_errors());
    }

    #[test]
    fn a_variable_declared_inside_a_loop_body_does_not_leak_out() {
        let handler = run("{while true{int a a=1}}$");
        assert!(!handler.has_errors());
        // `a` lives only inside the loop body's scope; nothing outside
        // references it, so it is neither undeclared-used nor flagged twice.
    }

    #[test]
    fn every_primitive_type_can_be_printed() {
        let handler = run(r#"{int a string b boolean c a=1 b="x" c=true print(a) print(b) print(c)}$"#);
        assert!(!handler.has_errors());
    }
}
