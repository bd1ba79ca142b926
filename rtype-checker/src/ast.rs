use std::ops::Range;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceSpan {
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl SourceSpan {
    pub fn new(line: usize, column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            line,
            column,
            end_line,
            end_column,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Module {
    pub expressions: Vec<Expr>,
}

impl Module {
    pub fn new(expressions: Vec<Expr>) -> Self {
        Self { expressions }
    }
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub span: SourceSpan,
    /// Indices into the token vector the expression was parsed from.
    pub tokens: Range<usize>,
    pub kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    Namespace(NamespaceAccess),
    Call(CallExpr),
    Index(IndexExpr),
    Member(MemberExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Assign(AssignExpr),
    Formula(FormulaExpr),
    Function(FunctionExpr),
    Block(Vec<Expr>),
    Paren(Box<Expr>),
    If(IfExpr),
    For(ForExpr),
    While(WhileExpr),
    Repeat(Box<Expr>),
    Break,
    Next,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(String),
    Float(String),
    Complex(String),
    String(String),
    Logical(bool),
    Null,
    Na,
    NaInteger,
    NaReal,
    NaCharacter,
    Inf,
    NaN,
}

#[derive(Debug, Clone)]
pub struct NamespaceAccess {
    pub package: String,
    pub name: String,
    pub internal: bool,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Argument>,
}

impl CallExpr {
    /// Function name for `f(...)`, `pkg::f(...)` and `"f"(...)` call shapes.
    pub fn callee_name(&self) -> Option<&str> {
        match &self.callee.kind {
            ExprKind::Identifier(name) => Some(name),
            ExprKind::Namespace(access) => Some(&access.name),
            ExprKind::Literal(Literal::String(name)) => Some(name),
            _ => None,
        }
    }

    pub fn positional(&self, index: usize) -> Option<&Expr> {
        self.arguments
            .iter()
            .filter(|argument| argument.name.is_none())
            .nth(index)
            .and_then(|argument| argument.value.as_ref())
    }

    pub fn named(&self, name: &str) -> Option<&Expr> {
        self.arguments
            .iter()
            .find(|argument| argument.name.as_deref() == Some(name))
            .and_then(|argument| argument.value.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct Argument {
    pub name: Option<String>,
    /// `None` for empty arguments such as the row slot in `x[, 1]`.
    pub value: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub target: Box<Expr>,
    pub arguments: Vec<Argument>,
    pub double: bool,
}

#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub target: Box<Expr>,
    pub name: String,
    /// `@` slot access rather than `$`.
    pub slot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Plus,
    Not,
    Help,
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub operator: UnaryOperator,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Range,
    /// `%op%`, stored with its delimiters.
    Special(String),
    Pipe,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    AndAnd,
    Or,
    OrOr,
    Help,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub operator: BinaryOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOperator {
    Left,
    SuperLeft,
    Equal,
    Right,
    SuperRight,
}

impl AssignOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOperator::Left => "<-",
            AssignOperator::SuperLeft => "<<-",
            AssignOperator::Equal => "=",
            AssignOperator::Right => "->",
            AssignOperator::SuperRight => "->>",
        }
    }

    pub fn is_rightward(self) -> bool {
        matches!(self, AssignOperator::Right | AssignOperator::SuperRight)
    }
}

/// Assignment in textual order: `left <op> right`.
#[derive(Debug, Clone)]
pub struct AssignExpr {
    pub operator: AssignOperator,
    pub operator_span: SourceSpan,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl AssignExpr {
    /// The side receiving the value; `value -> target` reverses the roles.
    pub fn target(&self) -> &Expr {
        if self.operator.is_rightward() {
            &self.right
        } else {
            &self.left
        }
    }

    pub fn value(&self) -> &Expr {
        if self.operator.is_rightward() {
            &self.left
        } else {
            &self.right
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormulaExpr {
    pub left: Option<Box<Expr>>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub default: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct FunctionExpr {
    pub parameters: Vec<Parameter>,
    pub body: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternative: Option<Box<Expr>>,
}

#[derive(Debug, Clone)]
pub struct ForExpr {
    pub variable: String,
    pub sequence: Box<Expr>,
    pub body: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct WhileExpr {
    pub condition: Box<Expr>,
    pub body: Box<Expr>,
}

impl Expr {
    /// Direct sub-expressions in source order.
    pub fn children(&self) -> Vec<&Expr> {
        fn arguments(arguments: &[Argument]) -> impl Iterator<Item = &Expr> {
            arguments.iter().filter_map(|argument| argument.value.as_ref())
        }

        match &self.kind {
            ExprKind::Literal(_)
            | ExprKind::Identifier(_)
            | ExprKind::Namespace(_)
            | ExprKind::Break
            | ExprKind::Next => Vec::new(),
            ExprKind::Call(call) => std::iter::once(call.callee.as_ref())
                .chain(arguments(&call.arguments))
                .collect(),
            ExprKind::Index(index) => std::iter::once(index.target.as_ref())
                .chain(arguments(&index.arguments))
                .collect(),
            ExprKind::Member(member) => vec![member.target.as_ref()],
            ExprKind::Unary(unary) => vec![unary.operand.as_ref()],
            ExprKind::Binary(binary) => vec![binary.left.as_ref(), binary.right.as_ref()],
            ExprKind::Assign(assign) => vec![assign.left.as_ref(), assign.right.as_ref()],
            ExprKind::Formula(formula) => formula
                .left
                .iter()
                .map(|left| left.as_ref())
                .chain(std::iter::once(formula.right.as_ref()))
                .collect(),
            ExprKind::Function(function) => function
                .parameters
                .iter()
                .filter_map(|parameter| parameter.default.as_ref())
                .chain(std::iter::once(function.body.as_ref()))
                .collect(),
            ExprKind::Block(expressions) => expressions.iter().collect(),
            ExprKind::Paren(inner) | ExprKind::Repeat(inner) => vec![inner.as_ref()],
            ExprKind::If(if_expr) => {
                let mut children = vec![if_expr.condition.as_ref(), if_expr.consequent.as_ref()];
                if let Some(alternative) = &if_expr.alternative {
                    children.push(alternative.as_ref());
                }
                children
            }
            ExprKind::For(for_expr) => vec![for_expr.sequence.as_ref(), for_expr.body.as_ref()],
            ExprKind::While(while_expr) => {
                vec![while_expr.condition.as_ref(), while_expr.body.as_ref()]
            }
        }
    }

    /// Pre-order traversal of this expression and everything nested in it.
    pub fn walk<'e>(&'e self, visit: &mut impl FnMut(&'e Expr)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
