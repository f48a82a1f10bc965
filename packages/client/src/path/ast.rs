//! Abstract syntax tree for path expressions
//!
//! A path is an [`Expression`]; navigation is expressed as a base
//! expression followed by [`Step`]s, so `store.book[0]` at the top level and
//! `it.price` inside a closure share one representation.

use crate::value::PathValue;

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal value
    Literal(PathValue),
    /// The document root (`$` or the implicit start of a path)
    Root,
    /// Closure parameter, local or named parameter
    Variable(String),
    /// `[a, b, c]`
    List(Vec<Expression>),
    /// Navigation from a base
    Path {
        base: Box<Expression>,
        steps: Vec<Step>,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: BinaryOp,
        right: Box<Expression>,
    },
    /// Short-circuiting `&&` and `||`
    Logical {
        left: Box<Expression>,
        operator: LogicalOp,
        right: Box<Expression>,
    },
}

/// Navigation step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// `name` or `'quoted name'`
    Property(String),
    /// `@name`
    Attribute(String),
    /// `[...]`
    Index(Vec<IndexSelector>),
    /// `**`
    DepthFirst,
    /// `*`
    Children,
    /// `name(args)`
    Method { name: String, args: Vec<Expression> },
    /// `name { closure }` or `name(args) { closure }`
    ClosureCall {
        name: String,
        args: Vec<Expression>,
        closure: Closure,
    },
    /// `*.step`: apply the step to every member
    Spread(Box<Step>),
}

/// One selector inside brackets
#[derive(Debug, Clone, PartialEq)]
pub enum IndexSelector {
    /// Index, negative index or key
    Single(Expression),
    /// `a..b` or `a..<b`
    Range {
        from: Expression,
        to: Expression,
        inclusive: bool,
    },
}

/// `{ param -> def local = expr; body }`
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    /// Explicit parameter; `it` when absent
    pub param: Option<String>,
    pub locals: Vec<(String, Expression)>,
    pub body: Box<Expression>,
}

impl Closure {
    #[inline]
    #[must_use]
    pub fn param_name(&self) -> &str {
        self.param.as_deref().unwrap_or("it")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    RegexFind,
    RegexMatch,
    In,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl Expression {
    /// A path from the document root with no further expression around it
    #[must_use]
    pub fn root_steps(&self) -> Option<&[Step]> {
        match self {
            Expression::Root => Some(&[]),
            Expression::Path { base, steps } if **base == Expression::Root => Some(steps),
            _ => None,
        }
    }
}
