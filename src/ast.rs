//! Abstract syntax trees for arithmetic expressions.
//!
//! A parsed expression is a tree of [`Node`]s, wrapped in an [`Ast`] at its root. Every node
//! owns its children outright, and nothing is mutated after construction.
//!
//! The [`Display`] implementations produce a fully-parenthesised rendering of the tree:
//! - a number renders as its token, e.g. `INT : 2`;
//! - a unary operation renders as `(<op>, <operand>)`;
//! - a binary operation renders as `(<left>, <op>, <right>)`.

use std::fmt::Display;

use num_traits::Unsigned;

use crate::{
    error::Error,
    lexer::token::{Token, Tokens},
    parser::Parser,
    position::Position,
};

use self::tree::{NodeCount, Tree};

pub mod tree;

/// A node in an expression tree.
///
/// Binary chains are not bounded in length, so a tree can be arbitrarily deep along its left
/// spine. Apart from the derived [`Debug`], every walk over a [`Node`] (its [`Clone`],
/// [`PartialEq`], [`Display`] and [`Drop`] implementations included) keeps its own work stack
/// rather than recursing per node.
#[derive(Debug)]
pub enum Node {
    /// An integer or float literal.
    Number(Token),
    /// A prefix `+` or `-` applied to an operand.
    UnaryOp {
        /// The operator token.
        op: Token,
        /// The expression the operator applies to.
        operand: Box<Node>,
    },
    /// A binary operator applied to two operands.
    BinOp {
        /// The left-hand operand.
        left: Box<Node>,
        /// The operator token.
        op: Token,
        /// The right-hand operand.
        right: Box<Node>,
    },
}

/// A step of a post-order walk, see [`Node::fold`].
enum Step<'a> {
    /// Queue the children of a node.
    Enter(&'a Node),
    /// Combine the children's values.
    Exit(&'a Node),
}

/// A pending piece of an in-order walk.
enum Piece<'a> {
    /// A subtree yet to be expanded.
    Node(&'a Node),
    /// An operator token.
    Op(&'a Token),
    /// Punctuation, only used when rendering.
    Text(&'static str),
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![Piece::Node(self)];

        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Op(op) => write!(f, "{op}")?,
                Piece::Node(Self::Number(tok)) => write!(f, "{tok}")?,
                Piece::Node(Self::UnaryOp { op, operand }) => {
                    write!(f, "({op}, ")?;
                    pending.extend([Piece::Text(")"), Piece::Node(operand)]);
                }
                Piece::Node(Self::BinOp { left, op, right }) => {
                    f.write_str("(")?;
                    pending.extend([
                        Piece::Text(")"),
                        Piece::Node(right),
                        Piece::Text(", "),
                        Piece::Op(op),
                        Piece::Text(", "),
                        Piece::Node(left),
                    ]);
                }
            }
        }

        Ok(())
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        self.fold(
            |tok| Self::Number(tok.clone()),
            |op, operand| Self::unary(op.clone(), operand),
            |left, op, right| Self::binary(left, op.clone(), right),
        )
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];

        while let Some(pair) = pairs.pop() {
            match pair {
                (Self::Number(a), Self::Number(b)) if a == b => (),
                (Self::UnaryOp { op: a, operand: x }, Self::UnaryOp { op: b, operand: y })
                    if a == b =>
                {
                    pairs.push((x.as_ref(), y.as_ref()));
                }
                (
                    Self::BinOp {
                        left: l1,
                        op: a,
                        right: r1,
                    },
                    Self::BinOp {
                        left: l2,
                        op: b,
                        right: r2,
                    },
                ) if a == b => {
                    pairs.push((r1.as_ref(), r2.as_ref()));
                    pairs.push((l1.as_ref(), l2.as_ref()));
                }
                _ => return false,
            }
        }

        true
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_children(&mut detached);

        // each detached node is left with only leaf children, so dropping it here is shallow
        while let Some(mut node) = detached.pop() {
            node.detach_children(&mut detached);
        }
    }
}

impl Tree for Node {
    type Node = Self;

    #[inline(always)]
    fn root(&self) -> &Self::Node {
        self
    }

    #[inline(always)]
    fn map<U, F>(self, op: F) -> U
    where
        F: FnOnce(Self::Node) -> U,
    {
        op(self)
    }
}

impl<U> NodeCount<U> for Node
where
    U: Unsigned,
{
    fn count_nodes(&self) -> U {
        self.fold(
            |_| U::one(),
            |_, operand| operand + U::one(),
            |left, _, right| left + right + U::one(),
        )
    }
}

impl Node {
    /// Constructs a [`Node::UnaryOp`].
    pub fn unary(op: Token, operand: Node) -> Self {
        Self::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    /// Constructs a [`Node::BinOp`].
    pub fn binary(left: Node, op: Token, right: Node) -> Self {
        Self::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Returns the source span covered by `self`.
    ///
    /// Parentheses are not part of the tree, so the span of a parenthesised expression
    /// excludes them.
    pub fn span(&self) -> (&Position, &Position) {
        let mut first = self;
        let start = loop {
            match first {
                Self::Number(tok) => break &tok.start,
                Self::UnaryOp { op, .. } => break &op.start,
                Self::BinOp { left, .. } => first = left.as_ref(),
            }
        };

        let mut last = self;
        let end = loop {
            match last {
                Self::Number(tok) => break &tok.end,
                Self::UnaryOp { operand, .. } => last = operand.as_ref(),
                Self::BinOp { right, .. } => last = right.as_ref(),
            }
        };

        (start, end)
    }

    /// Returns the operator tokens of `self` in source order.
    pub fn operators(&self) -> Vec<&Token> {
        let mut ops = Vec::new();
        let mut pending = vec![Piece::Node(self)];

        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Op(op) => ops.push(op),
                Piece::Node(Self::UnaryOp { op, operand }) => {
                    ops.push(op);
                    pending.push(Piece::Node(operand));
                }
                Piece::Node(Self::BinOp { left, op, right }) => {
                    pending.extend([Piece::Node(right), Piece::Op(op), Piece::Node(left)]);
                }
                Piece::Node(Self::Number(_)) | Piece::Text(_) => (),
            }
        }

        ops
    }

    /// Returns the length of the longest path from `self` to a leaf, counting `self`.
    pub fn depth(&self) -> usize {
        self.fold(
            |_| 1,
            |_, operand| operand + 1,
            |left, _, right| left.max(right) + 1,
        )
    }

    /// Combines the values of the children of each node into a value for the node itself,
    /// starting at the leaves and working up to `self`.
    fn fold<T>(
        &self,
        mut leaf: impl FnMut(&Token) -> T,
        mut unary: impl FnMut(&Token, T) -> T,
        mut binary: impl FnMut(T, &Token, T) -> T,
    ) -> T {
        let mut steps = vec![Step::Enter(self)];
        let mut values = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(Self::Number(tok)) => values.push(leaf(tok)),
                Step::Enter(node) => {
                    steps.push(Step::Exit(node));
                    match node {
                        Self::UnaryOp { operand, .. } => steps.push(Step::Enter(operand)),
                        Self::BinOp { left, right, .. } => {
                            steps.extend([Step::Enter(right), Step::Enter(left)]);
                        }
                        Self::Number(_) => unreachable!(),
                    }
                }
                Step::Exit(node) => {
                    // children are exited before their parent, so their values are on top
                    let value = match (node, values.pop()) {
                        (Self::UnaryOp { op, .. }, Some(operand)) => unary(op, operand),
                        (Self::BinOp { op, .. }, Some(right)) => match values.pop() {
                            Some(left) => binary(left, op, right),
                            None => unreachable!(),
                        },
                        _ => unreachable!(),
                    };
                    values.push(value);
                }
            }
        }

        match values.pop() {
            Some(value) => value,
            None => unreachable!(),
        }
    }

    /// Moves every non-leaf child of `self` onto `detached`, leaving a leaf in its place.
    fn detach_children(&mut self, detached: &mut Vec<Node>) {
        match self {
            Self::Number(_) => (),
            Self::UnaryOp { op, operand } => {
                if !matches!(**operand, Self::Number(_)) {
                    detached.push(std::mem::replace(&mut **operand, Self::Number(op.clone())));
                }
            }
            Self::BinOp { left, op, right } => {
                for child in [left, right] {
                    if !matches!(**child, Self::Number(_)) {
                        detached.push(std::mem::replace(&mut **child, Self::Number(op.clone())));
                    }
                }
            }
        }
    }
}

/// An abstract syntax tree for a single expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    /// The root of this tree.
    root: Node,
}

impl From<Node> for Ast {
    fn from(root: Node) -> Self {
        Self { root }
    }
}

impl Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl TryFrom<&Tokens> for Ast {
    type Error = Error;

    /// Parses `value` with a default [`Parser`].
    fn try_from(value: &Tokens) -> Result<Self, Self::Error> {
        Parser::default().parse(value)
    }
}

impl Tree for Ast {
    type Node = Node;

    #[inline(always)]
    fn root(&self) -> &Self::Node {
        &self.root
    }

    #[inline(always)]
    fn map<U, F>(self, op: F) -> U
    where
        F: FnOnce(Self::Node) -> U,
    {
        op(self.root)
    }
}

impl<U: Unsigned> NodeCount<U> for Ast {
    fn count_nodes(&self) -> U {
        <Node as NodeCount<U>>::count_nodes(&self.root)
    }
}

impl Ast {
    /// Consumes `self` and returns its root.
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Returns the operator tokens of `self` in source order.
    pub fn operators(&self) -> Vec<&Token> {
        self.root.operators()
    }

    /// Returns the source span covered by `self`.
    pub fn span(&self) -> (&Position, &Position) {
        self.root.span()
    }

    /// Returns the depth of `self`.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}
