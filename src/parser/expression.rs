use crate::lexer::Span;
use crate::string::Ident;
use std::convert::Infallible;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefixOperator {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    IntegerDivide,
    FloatDivide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpressionNodeRef(u32);

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionAtomKind {
    Integer(i64),
    Real(f64),
    Identifier(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionAtom {
    pub kind: ExpressionAtomKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    Atom(ExpressionAtom),
    Prefix {
        operator: PrefixOperator,
        rhs: ExpressionNodeRef,
        span: Span,
    },
    Infix {
        operator: InfixOperator,
        lhs: ExpressionNodeRef,
        rhs: ExpressionNodeRef,
        /// Span of the operator token.
        span: Span,
    },
    Group {
        inner: ExpressionNodeRef,
        span: Span,
    },
}

impl ExpressionNode {
    pub fn get_span(&self) -> Span {
        match self {
            ExpressionNode::Atom(atom) => atom.span,
            ExpressionNode::Prefix { span, .. }
            | ExpressionNode::Infix { span, .. }
            | ExpressionNode::Group { span, .. } => *span,
        }
    }
}

/// Builds an [`Expression`]. Children must be pushed before the nodes that refer to them.
#[derive(Debug, Clone)]
pub struct ExpressionTree {
    nodes: Vec<ExpressionNode>,
}

impl ExpressionTree {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: ExpressionNode) -> ExpressionNodeRef {
        self.nodes.push(node);
        ExpressionNodeRef(self.nodes.len() as u32 - 1)
    }

    /// Closes the tree at `root`, which must be the last node pushed.
    pub fn finish(self, root: ExpressionNodeRef) -> Option<Expression> {
        if root.0 as usize + 1 != self.nodes.len() {
            None
        } else {
            Some(Expression {
                nodes: self.nodes,
                root,
            })
        }
    }
}

/// An arena of expression nodes stored in post-order: every node comes after its children
/// and the root is the last node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    nodes: Vec<ExpressionNode>,
    root: ExpressionNodeRef,
}

impl Expression {
    pub fn get_root_ref(&self) -> ExpressionNodeRef {
        self.root
    }

    pub fn get_node(&self, node: ExpressionNodeRef) -> Option<&ExpressionNode> {
        self.nodes.get(node.0 as usize)
    }

    /// Computes a value for every node from the values of its children, left to right, and
    /// returns the value of the root. The first error stops the walk.
    ///
    /// Walks the arena in a loop so that deep trees do not exhaust the native stack.
    pub fn fold<T, E>(
        &self,
        mut visit: impl FnMut(&ExpressionNode, &mut FoldResults<T>) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut results = FoldResults(Vec::with_capacity(self.nodes.len()));
        for node in self.nodes.iter() {
            let value = visit(node, &mut results)?;
            results.0.push(Some(value));
        }
        Ok(results.take(self.root))
    }

    /// The span covering the whole expression.
    pub fn get_span(&self) -> Span {
        let span: Result<Span, Infallible> = self.fold(|node, spans| {
            Ok(match node {
                ExpressionNode::Atom(_) | ExpressionNode::Group { .. } => node.get_span(),
                ExpressionNode::Prefix { rhs, span, .. } => span.merge(&spans.take(*rhs)),
                ExpressionNode::Infix { lhs, rhs, .. } => {
                    spans.take(*lhs).merge(&spans.take(*rhs))
                }
            })
        });
        span.unwrap_or_else(|never| match never {})
    }
}

/// Values of the nodes visited so far by [`Expression::fold`].
pub struct FoldResults<T>(Vec<Option<T>>);

impl<T> FoldResults<T> {
    /// Moves out the value of a child. Each child has exactly one parent.
    pub fn take(&mut self, node: ExpressionNodeRef) -> T {
        self.0
            .get_mut(node.0 as usize)
            .and_then(Option::take)
            .expect("Children are visited before their parent and taken once.")
    }
}
