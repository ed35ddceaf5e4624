//! Concrete syntax tree produced by the parser.
//!
//! A [`CstNode`] is a direct rendition of a grammar production: `name` names
//! the non-terminal (or terminal) it came from, `value` carries a terminal's
//! lexeme (`None` on every interior node), and `children` holds the ordered
//! list of sub-productions, left to right, exactly as written. Nothing here
//! drops punctuation or collapses single-production wrappers — that
//! simplification is the AST's job, built by a separate pass over the token
//! stream rather than by rewriting this tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CstNode {
    pub name: &'static str,
    pub value: Option<String>,
    pub children: Vec<CstNode>,
    /// Position of this node's first token. Interior nodes inherit it from
    /// their leftmost child rather than tracking it independently.
    pub line: u32,
    pub column: u32,
}

impl CstNode {
    /// A terminal node: carries a lexeme, has no children.
    pub fn leaf(name: &'static str, value: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            name,
            value: Some(value.into()),
            children: Vec::new(),
            line,
            column,
        }
    }

    /// An interior node: names a non-terminal, carries its children. Its
    /// position is its first child's, or `(0, 0)` for an empty node (the
    /// `ε` branch of `StatementList`).
    pub fn node(name: &'static str, children: Vec<CstNode>) -> Self {
        let (line, column) = children.first().map_or((0, 0), |c| (c.line, c.column));
        Self {
            name,
            value: None,
            children,
            line,
            column,
        }
    }

    /// Depth-first count of every node in the tree, this one included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(CstNode::size).sum::<usize>()
    }

    /// Finds the first descendant (including self) whose `name` matches.
    pub fn find(&self, name: &str) -> Option<&CstNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}
