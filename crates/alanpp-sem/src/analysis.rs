//! The semantic analysis pass.
//!
//! `Analyzer::analyze_program` walks the parser's [`CstNode`] tree exactly
//! once, producing an [`AstNode`] tree and, as a side effect, a fully
//! populated [`ScopeTree`]. Consuming the CST rather than re-lexing the
//! source is a deliberate choice: the CST already encodes everything a
//! second token-stream walk would have to reconstruct (which production
//! matched, in what order), so there is nothing to gain from throwing it
//! away and starting over from tokens.
//!
//! Every check below maps onto one diagnostic code: a duplicate declaration
//! is `E_SEMANTIC_DUPLICATE_DECL`, an unresolved name is
//! `E_SEMANTIC_UNDECLARED_VAR`, and so on. None of these abort the walk
//! early — a malformed statement still gets an `AstNode` built for it so
//! that later siblings can still be checked — but `has_errors` on the
//! handler is what a caller checks before handing the result to codegen.
use alanpp_lex::PrimitiveType;
use alanpp_par::CstNode;
use alanpp_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span, Stage, Symbol};

use crate::ast::{AstKind, AstNode};
use crate::scope::ScopeTree;

pub struct Analyzer<'a> {
    handler: &'a Handler,
    scopes: ScopeTree,
}

impl<'a> Analyzer<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            handler,
            scopes: ScopeTree::new(),
        }
    }

    fn error(&self, code: DiagnosticCode, line: u32, column: u32, message: impl Into<String>) {
        DiagnosticBuilder::error(message)
            .code(code)
            .stage(Stage::Semantic)
            .span(Span::point(line, column))
            .emit(self.handler);
    }

    fn warning(&self, code: DiagnosticCode, line: u32, column: u32, message: impl Into<String>) {
        DiagnosticBuilder::warning(message)
            .code(code)
            .stage(Stage::Semantic)
            .span(Span::point(line, column))
            .emit(self.handler);
    }

    /// `Program ::= Block EOP` — the CST's outer two children are `Block`
    /// and `Eop`; only the block carries anything worth walking.
    pub fn analyze_program(self, cst: &CstNode) -> AstNode {
        self.analyze_program_with_scopes(cst).0
    }

    /// Same walk as [`Analyzer::analyze_program`], but also hands back the
    /// populated [`ScopeTree`] instead of discarding it — the driver's
    /// `--emit symbols` needs the scope-level/initialized/used bookkeeping
    /// that doesn't survive into the AST.
    pub fn analyze_program_with_scopes(mut self, cst: &CstNode) -> (AstNode, ScopeTree) {
        let block = &cst.children[0];
        let ast_block = self.analyze_block(block, true);
        self.check_unused();
        let program = AstNode::node(AstKind::Program, vec![ast_block], cst.line, cst.column);
        (program, self.scopes)
    }

    /// `Block ::= '{' StatementList '}'`. `is_root` suppresses pushing a
    /// fresh scope for the program's outermost block, which already owns
    /// the tree's root scope.
    fn analyze_block(&mut self, block: &CstNode, is_root: bool) -> AstNode {
        if !is_root {
            self.scopes.enter_scope();
        }
        let statement_list = &block.children[1];
        let statements = statement_list
            .children
            .iter()
            .map(|stmt| self.analyze_statement(stmt))
            .collect();
        if !is_root {
            self.scopes.exit_scope();
        }
        AstNode::node(AstKind::Block, statements, block.line, block.column)
    }

    /// `Statement` wraps exactly one of the six statement productions; this
    /// unwraps it and dispatches on the inner node's name.
    fn analyze_statement(&mut self, stmt: &CstNode) -> AstNode {
        let inner = &stmt.children[0];
        match inner.name {
            "PrintStmt" => self.analyze_print(inner),
            "AssignStmt" => self.analyze_assignment(inner),
            "VarDecl" => self.analyze_var_decl(inner),
            "WhileStmt" => self.analyze_while(inner),
            "IfStmt" => self.analyze_if(inner),
            "Block" => self.analyze_block(inner, false),
            other => unreachable!("parser never produces a Statement wrapping '{other}'"),
        }
    }

    /// `VarDecl ::= TYPE ID`
    fn analyze_var_decl(&mut self, decl: &CstNode) -> AstNode {
        let ty = primitive_type_of(&decl.children[0]);
        let id_node = &decl.children[1];
        let name = Symbol::intern(id_node.value.as_deref().unwrap_or_default());

        if self.scopes.declare(name, ty, decl.line, decl.column).is_err() {
            self.error(
                DiagnosticCode::E_SEMANTIC_DUPLICATE_DECL,
                decl.line,
                decl.column,
                format!("'{name}' is already declared in this scope"),
            );
        }

        AstNode::operator_node(
            AstKind::VarDecl,
            ty.as_str(),
            vec![AstNode::leaf(
                AstKind::Id,
                name.to_string(),
                id_node.line,
                id_node.column,
            )],
            decl.line,
            decl.column,
        )
    }

    /// `AssignStmt ::= ID '=' Expr`. Resolves the target, checks the
    /// expression's type against it, and on success marks the target
    /// initialized — an assignment that fails its type check still leaves
    /// the variable uninitialized, since nothing was actually stored.
    fn analyze_assignment(&mut self, assign: &CstNode) -> AstNode {
        let id_node = &assign.children[0];
        let name = Symbol::intern(id_node.value.as_deref().unwrap_or_default());
        let expr_node = &assign.children[2];
        let (ast_expr, expr_ty) = self.analyze_expr(expr_node);

        match self.scopes.resolve(name) {
            Some(scope) => {
                let declared_ty = self.scopes.entry(scope, name).map(|e| e.ty);
                if let Some(declared_ty) = declared_ty {
                    if Some(declared_ty) == expr_ty {
                        if let Some(entry) = self.scopes.entry_mut(scope, name) {
                            entry.initialized = true;
                        }
                    } else if let Some(expr_ty) = expr_ty {
                        self.error(
                            DiagnosticCode::E_SEMANTIC_TYPE_MISMATCH,
                            assign.line,
                            assign.column,
                            format!(
                                "cannot assign a value of type '{}' to '{name}', which is '{}'",
                                expr_ty.as_str(),
                                declared_ty.as_str()
                            ),
                        );
                    }
                }
            }
            None => {
                self.error(
                    DiagnosticCode::E_SEMANTIC_UNDECLARED_VAR,
                    assign.line,
                    assign.column,
                    format!("'{name}' is not declared in any enclosing scope"),
                );
            }
        }

        AstNode::node(
            AstKind::Assignment,
            vec![
                AstNode::leaf(AstKind::Id, name.to_string(), id_node.line, id_node.column),
                ast_expr,
            ],
            assign.line,
            assign.column,
        )
    }

    /// `PrintStmt ::= 'print' '(' Expr ')'` — any of the three primitive
    /// types may be printed, so there is no type check here beyond whatever
    /// `analyze_expr` already performs on the expression itself.
    fn analyze_print(&mut self, print: &CstNode) -> AstNode {
        let (expr, _ty) = self.analyze_expr(&print.children[2]);
        AstNode::node(AstKind::Print, vec![expr], print.line, print.column)
    }

    /// `WhileStmt ::= 'while' BoolExpr Block`
    fn analyze_while(&mut self, stmt: &CstNode) -> AstNode {
        let cond = self.analyze_condition(&stmt.children[1]);
        let body = self.analyze_block(&stmt.children[2], false);
        AstNode::node(AstKind::While, vec![cond, body], stmt.line, stmt.column)
    }

    /// `IfStmt ::= 'if' BoolExpr Block`
    fn analyze_if(&mut self, stmt: &CstNode) -> AstNode {
        let cond = self.analyze_condition(&stmt.children[1]);
        let body = self.analyze_block(&stmt.children[2], false);
        AstNode::node(AstKind::If, vec![cond, body], stmt.line, stmt.column)
    }

    /// A `while`/`if` condition must be a `BoolExpr` or a bare `BOOLVAL`;
    /// the grammar already guarantees the CST node is one of those two, so
    /// this only exists to route through `analyze_bool_expr` and report
    /// `E_SEMANTIC_CONDITION_TYPE` if its operands disagree in type.
    fn analyze_condition(&mut self, bool_expr: &CstNode) -> AstNode {
        let (node, ok) = self.analyze_bool_expr(bool_expr);
        if !ok {
            self.error(
                DiagnosticCode::E_SEMANTIC_CONDITION_TYPE,
                bool_expr.line,
                bool_expr.column,
                "condition's operands must have the same, comparable type",
            );
        }
        node
    }

    /// `Expr ::= IntExpr | StringExpr | BoolExpr | ID`. Returns the built
    /// `AstNode` plus its static type, where determinable — an unresolved
    /// identifier has no type to report, so callers that need one must
    /// treat `None` as "already diagnosed, do not pile on a second error".
    fn analyze_expr(&mut self, expr: &CstNode) -> (AstNode, Option<PrimitiveType>) {
        let inner = &expr.children[0];
        match inner.name {
            "IntExpr" => self.analyze_int_expr(inner),
            "StringExpr" => (self.analyze_string_expr(inner), Some(PrimitiveType::String)),
            "BoolExpr" => {
                let (node, _ok) = self.analyze_bool_expr(inner);
                (node, Some(PrimitiveType::Boolean))
            }
            "Id" => self.analyze_id(inner),
            other => unreachable!("parser never produces an Expr wrapping '{other}'"),
        }
    }

    /// `IntExpr ::= DIGIT ('+' Expr)?`. A bare digit is always `int`; a
    /// `+`-chain additionally requires its right-hand side to be `int`,
    /// which `E_SEMANTIC_INTOP_TYPE` reports when it is not.
    fn analyze_int_expr(&mut self, int_expr: &CstNode) -> (AstNode, Option<PrimitiveType>) {
        let digit = &int_expr.children[0];
        let digit_node = AstNode::leaf(
            AstKind::Digit,
            digit.value.clone().unwrap_or_default(),
            digit.line,
            digit.column,
        );

        if int_expr.children.len() == 1 {
            return (
                AstNode::node(
                    AstKind::IntExpr,
                    vec![digit_node],
                    int_expr.line,
                    int_expr.column,
                ),
                Some(PrimitiveType::Int),
            );
        }

        let rhs_expr = &int_expr.children[2];
        let (rhs_node, rhs_ty) = self.analyze_expr(rhs_expr);
        if rhs_ty.is_some() && rhs_ty != Some(PrimitiveType::Int) {
            self.error(
                DiagnosticCode::E_SEMANTIC_INTOP_TYPE,
                int_expr.line,
                int_expr.column,
                "the right-hand side of '+' must be an int",
            );
        }

        (
            AstNode::operator_node(
                AstKind::IntExpr,
                "+",
                vec![digit_node, rhs_node],
                int_expr.line,
                int_expr.column,
            ),
            Some(PrimitiveType::Int),
        )
    }

    /// `StringExpr ::= '"' CHAR* '"'`
    fn analyze_string_expr(&self, string_expr: &CstNode) -> AstNode {
        let chars = string_expr.children[1..string_expr.children.len() - 1]
            .iter()
            .map(|c| {
                AstNode::leaf(
                    AstKind::Char,
                    c.value.clone().unwrap_or_default(),
                    c.line,
                    c.column,
                )
            })
            .collect();
        AstNode::node(
            AstKind::StringExpr,
            chars,
            string_expr.line,
            string_expr.column,
        )
    }

    /// `BoolExpr ::= '(' Expr BOOLOP Expr ')' | BOOLVAL`. Returns whether the
    /// two comparison operands agreed in type — always `true` for the bare
    /// `BOOLVAL` form, which has no operands to disagree.
    fn analyze_bool_expr(&mut self, bool_expr: &CstNode) -> (AstNode, bool) {
        if bool_expr.children.len() == 1 {
            let boolval = &bool_expr.children[0];
            let node = AstNode::leaf(
                AstKind::BoolVal,
                boolval.value.clone().unwrap_or_default(),
                boolval.line,
                boolval.column,
            );
            return (
                AstNode::node(
                    AstKind::BoolExpr,
                    vec![node],
                    bool_expr.line,
                    bool_expr.column,
                ),
                true,
            );
        }

        let op = bool_expr.children[2].value.clone().unwrap_or_default();
        let (left, left_ty) = self.analyze_expr(&bool_expr.children[1]);
        let (right, right_ty) = self.analyze_expr(&bool_expr.children[3]);
        let ok = match (left_ty, right_ty) {
            (Some(l), Some(r)) => l == r,
            _ => true,
        };
        if !ok {
            self.error(
                DiagnosticCode::E_SEMANTIC_BOOLOP_TYPE,
                bool_expr.line,
                bool_expr.column,
                "'==' and '!=' require operands of the same type",
            );
        }
        (
            AstNode::operator_node(
                AstKind::BoolExpr,
                op,
                vec![left, right],
                bool_expr.line,
                bool_expr.column,
            ),
            ok,
        )
    }

    /// A bare identifier used as an expression: resolves it, flags it used,
    /// and warns if it has never been assigned.
    fn analyze_id(&mut self, id_node: &CstNode) -> (AstNode, Option<PrimitiveType>) {
        let name = Symbol::intern(id_node.value.as_deref().unwrap_or_default());
        let ast = AstNode::leaf(AstKind::Id, name.to_string(), id_node.line, id_node.column);

        let Some(scope) = self.scopes.resolve(name) else {
            self.error(
                DiagnosticCode::E_SEMANTIC_UNDECLARED_VAR,
                id_node.line,
                id_node.column,
                format!("'{name}' is not declared in any enclosing scope"),
            );
            return (ast, None);
        };

        let ty = self.scopes.entry(scope, name).map(|e| e.ty);
        let initialized = self
            .scopes
            .entry(scope, name)
            .map(|e| e.initialized)
            .unwrap_or(false);
        if let Some(entry) = self.scopes.entry_mut(scope, name) {
            entry.used = true;
        }
        if !initialized {
            self.warning(
                DiagnosticCode::W_SEMANTIC_MAYBE_UNINITIALIZED,
                id_node.line,
                id_node.column,
                format!("'{name}' might not be initialized"),
            );
        }
        (ast, ty)
    }

    /// End-of-analysis sweep: every entry across every scope that was never
    /// read gets `W_SEMANTIC_UNUSED_VARIABLE`, regardless of whether it was
    /// ever assigned.
    fn check_unused(&self) {
        for scope in self.scopes.all_scopes() {
            for entry in scope.entries.values() {
                if !entry.used {
                    self.warning(
                        DiagnosticCode::W_SEMANTIC_UNUSED_VARIABLE,
                        entry.line,
                        entry.column,
                        format!("'{}' is declared but never used", entry.name),
                    );
                }
            }
        }
    }
}

fn primitive_type_of(type_node: &CstNode) -> PrimitiveType {
    match type_node.value.as_deref() {
        Some("int") => PrimitiveType::Int,
        Some("string") => PrimitiveType::String,
        Some("boolean") => PrimitiveType::Boolean,
        other => unreachable!("parser never produces a Type node with value {other:?}"),
    }
}
