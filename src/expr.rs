//! Tagged syntax-tree nodes for Julia function definitions.
//!
//! `Expr` is a closed sum type with one variant per recognized expression
//! head, mirroring Julia's `Expr(head, args...)` representation. The
//! splitter and combiner pattern-match on these variants instead of on
//! raw head symbols, so malformed shapes are rejected at the type level
//! wherever possible.
//!
//! Heads that the definition tooling never inspects are preserved in
//! [`Expr::Opaque`] and passed through unexamined.

use serde::{Deserialize, Serialize};

/// A literal leaf value appearing in a syntax tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Integer literal: `42`
    Int(i64),
    /// Floating point literal: `2.5`
    Float(f64),
    /// Boolean literal: `true` / `false`
    Bool(bool),
    /// String literal: `"hello"`
    Str(String),
    /// Symbol literal: `:foo`
    Sym(String),
    /// The `nothing` literal
    Nothing,
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Float(v) => write!(f, "{:?}", v),
            Literal::Bool(v) => write!(f, "{}", v),
            Literal::Str(s) => write!(f, "{:?}", s),
            Literal::Sym(s) => write!(f, ":{}", s),
            Literal::Nothing => write!(f, "nothing"),
        }
    }
}

/// A Julia expression tree node.
///
/// Children are strongly typed where the grammar fixes the arity
/// (`Assign`, `Arrow`, `Kw`, ...) and `Vec`-shaped where it does not
/// (`Call`, `Tuple`, `Block`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Long-form definition `function ... end`. Children are either
    /// `[signature, body]` or a single bare name (forward declaration).
    Function(Vec<Expr>),
    /// Assignment `lhs = rhs`; doubles as the short definition form.
    Assign(Box<Expr>, Box<Expr>),
    /// Arrow form `params -> body`.
    Arrow(Box<Expr>, Box<Expr>),
    /// Call `f(args...)`; the first child is the callee.
    Call(Vec<Expr>),
    /// Bare tuple `(a, b)`.
    Tuple(Vec<Expr>),
    /// Statement block; may contain line markers.
    Block(Vec<Expr>),
    /// `body where {constraints...}`.
    Where {
        body: Box<Expr>,
        constraints: Vec<Expr>,
    },
    /// Type ascription `x::T`; `value` is absent for the anonymous
    /// parameter form `::T`.
    Ascribe {
        value: Option<Box<Expr>>,
        ty: Box<Expr>,
    },
    /// Generic instantiation `Name{params...}`; the first child is the name.
    Curly(Vec<Expr>),
    /// Keyword-parameter marker: the part after `;` in a parameter list.
    Parameters(Vec<Expr>),
    /// Keyword with default, `name = default`, in parameter position.
    Kw(Box<Expr>, Box<Expr>),
    /// Splat `expr...`.
    Splat(Box<Expr>),
    /// Subtype constraint `a <: b`.
    SubtypeOf(Box<Expr>, Box<Expr>),
    /// Supertype constraint `a >: b`.
    SupertypeOf(Box<Expr>, Box<Expr>),
    /// Comparison chain such as `lo <: T <: hi`; operators appear as
    /// `Symbol` children between the operands.
    Comparison(Vec<Expr>),
    /// Quoted expression `:(...)`; `:sym` when the child is a symbol.
    Quote(Box<Expr>),
    /// Qualified reference `base.name` (e.g. `Base.Iterators.zip`).
    Path(Box<Expr>, String),
    /// Identifier leaf.
    Symbol(String),
    /// Literal leaf.
    Literal(Literal),
    /// Source line marker (`LineNumberNode`); position metadata only.
    Line { line: u32, file: Option<String> },
    /// Any head the definition tooling does not recognize. Carried
    /// through splitting and combining unexamined.
    Opaque { head: String, args: Vec<Expr> },
}

impl Expr {
    /// Create an identifier leaf.
    pub fn symbol(name: impl Into<String>) -> Expr {
        Expr::Symbol(name.into())
    }

    /// Create an integer literal leaf.
    pub fn int(value: i64) -> Expr {
        Expr::Literal(Literal::Int(value))
    }

    /// Create a call node from a callee and its arguments.
    pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
        let mut children = Vec::with_capacity(args.len() + 1);
        children.push(callee);
        children.extend(args);
        Expr::Call(children)
    }

    /// The head symbol of this node as text, matching Julia's head names.
    pub fn head_name(&self) -> &str {
        match self {
            Expr::Function(_) => "function",
            Expr::Assign(_, _) => "=",
            Expr::Arrow(_, _) => "->",
            Expr::Call(_) => "call",
            Expr::Tuple(_) => "tuple",
            Expr::Block(_) => "block",
            Expr::Where { .. } => "where",
            Expr::Ascribe { .. } => "::",
            Expr::Curly(_) => "curly",
            Expr::Parameters(_) => "parameters",
            Expr::Kw(_, _) => "kw",
            Expr::Splat(_) => "...",
            Expr::SubtypeOf(_, _) => "<:",
            Expr::SupertypeOf(_, _) => ">:",
            Expr::Comparison(_) => "comparison",
            Expr::Quote(_) => "quote",
            Expr::Path(_, _) => ".",
            Expr::Symbol(_) => "symbol",
            Expr::Literal(_) => "literal",
            Expr::Line { .. } => "line",
            Expr::Opaque { head, .. } => head,
        }
    }

    /// Get the identifier name if this node is a bare symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Whether this node is a source line marker.
    pub fn is_line(&self) -> bool {
        matches!(self, Expr::Line { .. })
    }

    /// A copy of this tree with all line markers removed.
    ///
    /// Structural comparisons (the round-trip law in particular) are
    /// stated modulo source-position metadata; this is the normalization
    /// they use.
    pub fn without_lines(&self) -> Expr {
        fn strip_vec(children: &[Expr]) -> Vec<Expr> {
            children
                .iter()
                .filter(|c| !c.is_line())
                .map(Expr::without_lines)
                .collect()
        }

        match self {
            Expr::Function(children) => Expr::Function(strip_vec(children)),
            Expr::Assign(l, r) => {
                Expr::Assign(Box::new(l.without_lines()), Box::new(r.without_lines()))
            }
            Expr::Arrow(l, r) => {
                Expr::Arrow(Box::new(l.without_lines()), Box::new(r.without_lines()))
            }
            Expr::Call(children) => Expr::Call(strip_vec(children)),
            Expr::Tuple(children) => Expr::Tuple(strip_vec(children)),
            Expr::Block(children) => Expr::Block(strip_vec(children)),
            Expr::Where { body, constraints } => Expr::Where {
                body: Box::new(body.without_lines()),
                constraints: strip_vec(constraints),
            },
            Expr::Ascribe { value, ty } => Expr::Ascribe {
                value: value.as_ref().map(|v| Box::new(v.without_lines())),
                ty: Box::new(ty.without_lines()),
            },
            Expr::Curly(children) => Expr::Curly(strip_vec(children)),
            Expr::Parameters(children) => Expr::Parameters(strip_vec(children)),
            Expr::Kw(l, r) => Expr::Kw(Box::new(l.without_lines()), Box::new(r.without_lines())),
            Expr::Splat(inner) => Expr::Splat(Box::new(inner.without_lines())),
            Expr::SubtypeOf(l, r) => {
                Expr::SubtypeOf(Box::new(l.without_lines()), Box::new(r.without_lines()))
            }
            Expr::SupertypeOf(l, r) => {
                Expr::SupertypeOf(Box::new(l.without_lines()), Box::new(r.without_lines()))
            }
            Expr::Comparison(children) => Expr::Comparison(strip_vec(children)),
            Expr::Quote(inner) => Expr::Quote(Box::new(inner.without_lines())),
            Expr::Path(base, name) => Expr::Path(Box::new(base.without_lines()), name.clone()),
            Expr::Opaque { head, args } => Expr::Opaque {
                head: head.clone(),
                args: strip_vec(args),
            },
            leaf => leaf.clone(),
        }
    }
}

/// Operators rendered infix by the `Display` implementation.
const INFIX_OPS: &[&str] = &[
    "+", "-", "*", "/", "^", "%", "==", "!=", "<", "<=", ">", ">=", "&&", "||", "=>", ":",
];

/// Render a function body for single-line display: blocks are unwrapped
/// into `;`-separated statements, everything else prints as-is.
fn body_text(body: &Expr) -> String {
    match body {
        Expr::Block(children) => children
            .iter()
            .filter(|c| !c.is_line())
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

fn join(children: &[Expr], sep: &str) -> String {
    children
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Format a parameter/argument list, placing a leading `Parameters`
/// marker after the positional arguments as Julia surface syntax does:
/// `f(x; k = 1)`.
fn arg_list_text(children: &[Expr]) -> String {
    match children.split_first() {
        Some((Expr::Parameters(kws), rest)) if kws.is_empty() => format!("{};", join(rest, ", ")),
        Some((Expr::Parameters(kws), rest)) => {
            format!("{}; {}", join(rest, ", "), join(kws, ", "))
        }
        _ => join(children, ", "),
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Function(children) => match children.as_slice() {
                [name] => write!(f, "function {} end", name),
                [sig, body] => write!(f, "function {} {} end", sig, body_text(body)),
                _ => write!(f, "function({})", join(children, ", ")),
            },
            Expr::Assign(l, r) => write!(f, "{} = {}", l, r),
            Expr::Arrow(l, r) => write!(f, "{} -> {}", l, body_text(r)),
            Expr::Call(children) => match children.split_first() {
                Some((Expr::Symbol(op), rest))
                    if rest.len() == 2 && INFIX_OPS.contains(&op.as_str()) =>
                {
                    write!(f, "{} {} {}", rest[0], op, rest[1])
                }
                Some((callee, rest)) => write!(f, "{}({})", callee, arg_list_text(rest)),
                None => write!(f, "()"),
            },
            Expr::Tuple(children) => match children.as_slice() {
                [single] if !matches!(single, Expr::Parameters(_)) => write!(f, "({},)", single),
                _ => write!(f, "({})", arg_list_text(children)),
            },
            Expr::Block(children) => {
                let stmts: Vec<String> = children
                    .iter()
                    .filter(|c| !c.is_line())
                    .map(|c| c.to_string())
                    .collect();
                write!(f, "begin {} end", stmts.join("; "))
            }
            Expr::Where { body, constraints } => match constraints.as_slice() {
                [single] => write!(f, "{} where {}", body, single),
                _ => write!(f, "{} where {{{}}}", body, join(constraints, ", ")),
            },
            Expr::Ascribe { value, ty } => match value {
                Some(v) => write!(f, "{}::{}", v, ty),
                None => write!(f, "::{}", ty),
            },
            Expr::Curly(children) => match children.split_first() {
                Some((name, params)) => write!(f, "{}{{{}}}", name, join(params, ", ")),
                None => write!(f, "{{}}"),
            },
            Expr::Parameters(children) => write!(f, "; {}", join(children, ", ")),
            Expr::Kw(name, default) => write!(f, "{} = {}", name, default),
            Expr::Splat(inner) => write!(f, "{}...", inner),
            Expr::SubtypeOf(l, r) => write!(f, "{} <: {}", l, r),
            Expr::SupertypeOf(l, r) => write!(f, "{} >: {}", l, r),
            Expr::Comparison(children) => write!(f, "{}", join(children, " ")),
            Expr::Quote(inner) => match inner.as_ref() {
                Expr::Symbol(name) => write!(f, ":{}", name),
                other => write!(f, ":({})", other),
            },
            Expr::Path(base, name) => write!(f, "{}.{}", base, name),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Line { line, file } => match file {
                Some(file) => write!(f, "#= {}:{} =#", file, line),
                None => write!(f, "#= line {} =#", line),
            },
            Expr::Opaque { head, args } => {
                if args.is_empty() {
                    write!(f, "Expr(:{})", head)
                } else {
                    write!(f, "Expr(:{}, {})", head, join(args, ", "))
                }
            }
        }
    }
}
