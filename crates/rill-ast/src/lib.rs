pub mod print;
pub mod ty;
pub mod walk;

pub use ty::{scalar_init_field, TupleField, Ty};

use la_arena::{Arena, Idx};
use smol_str::SmolStr;

// ── Spans ─────────────────────────────────────────────────────────

/// Source span as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

// ── ID types ──────────────────────────────────────────────────────

pub type ExprId = Idx<Expr>;
pub type DeclId = Idx<Decl>;

// ── Module ────────────────────────────────────────────────────────

/// All nodes of one compilation unit. Expressions and declarations are
/// arena-allocated, referenced by index, and live exactly as long as the
/// module; nothing is freed individually.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub exprs: Arena<Expr>,
    pub decls: Arena<Decl>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_expr(&mut self, kind: ExprKind, ty: Ty) -> ExprId {
        self.exprs.alloc(Expr { kind, ty })
    }

    pub fn alloc_decl(&mut self, decl: Decl) -> DeclId {
        self.decls.alloc(decl)
    }
}

// ── Declarations ──────────────────────────────────────────────────

/// A named entity (variable, function, type) referenced by expressions.
/// Expression nodes hold `DeclId` links only; the module's declaration
/// table owns the declarations, so the expression tree stays acyclic.
#[derive(Debug, Clone)]
pub struct Decl {
    pub name: SmolStr,
    pub ty: Ty,
    /// Initializer expression. The walker rewrites this slot in place for
    /// declarations appearing inside brace blocks.
    pub init: Option<ExprId>,
    pub span: Span,
}

// ── Expressions ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    /// Result type, filled in during checking.
    pub ty: Ty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Integer literal. The value is parsed on demand from the source text;
    /// the lexer guarantees the text is well formed.
    IntLit { text: SmolStr, span: Span },
    /// Reference to exactly one resolved declaration.
    DeclRef { decl: DeclId, span: Span },
    /// Unresolved overload: one or more candidate declarations.
    OverloadSetRef { decls: Vec<DeclId>, span: Span },
    /// Pre-resolution placeholder for a plain name.
    UnresolvedRef { name: SmolStr, span: Span },
    /// Pre-resolution placeholder for `:member` syntax.
    UnresolvedMember { name: SmolStr, colon_span: Span },
    /// Pre-resolution placeholder for `Type::member`.
    UnresolvedScoped {
        type_decl: DeclId,
        type_decl_span: Span,
        name: SmolStr,
    },
    /// Tuple literal. An absent element means "use the field's default".
    Tuple {
        elements: Vec<Option<ExprId>>,
        lparen_span: Span,
        /// True for `(e)` used as grouping parens rather than a real tuple.
        is_grouping: bool,
    },
    /// Member access `base.field`, not yet resolved to a declaration.
    UnresolvedDot {
        base: Option<ExprId>,
        field: SmolStr,
        dot_span: Span,
        /// Candidate declarations found so far; may be empty.
        resolved: Vec<DeclId>,
    },
    /// Access to a tuple field by index.
    TupleElement { base: ExprId, field_index: u32 },
    /// Function call. The argument is always a single expression, possibly
    /// itself a tuple.
    Apply { callee: ExprId, arg: ExprId },
    /// Unresolved operator chain, folded into Apply/Binary nodes later.
    /// Always has at least one element.
    Sequence { elements: Vec<ExprId> },
    /// Block of expressions and declarations.
    Brace {
        elements: Vec<BraceElement>,
        lbrace_span: Span,
    },
    /// Closure with a single input pattern-expression. The argument count is
    /// derived from its function type.
    Closure { input: ExprId },
    /// Positional closure argument placeholder: `$0`, `$1`, ...
    AnonClosureArg { index: u32, span: Span },
    /// Binary operator application. `op` is a reference to the operator
    /// declaration; absent means assignment.
    Binary {
        lhs: ExprId,
        rhs: ExprId,
        op: Option<ExprId>,
    },
}

/// One element of a brace block: an expression or a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceElement {
    Expr(ExprId),
    Decl(DeclId),
}

// ── Location resolution ───────────────────────────────────────────

/// Source position a diagnostic about this expression should point at,
/// computed recursively per variant: a compound node reports where its
/// leading child starts.
pub fn start_span(module: &Module, expr: ExprId) -> Span {
    match &module.exprs[expr].kind {
        ExprKind::IntLit { span, .. }
        | ExprKind::DeclRef { span, .. }
        | ExprKind::OverloadSetRef { span, .. }
        | ExprKind::UnresolvedRef { span, .. }
        | ExprKind::AnonClosureArg { span, .. } => *span,
        ExprKind::UnresolvedMember { colon_span, .. } => *colon_span,
        ExprKind::UnresolvedScoped { type_decl_span, .. } => *type_decl_span,
        ExprKind::Tuple { lparen_span, .. } => *lparen_span,
        ExprKind::UnresolvedDot { base, dot_span, .. } => match base {
            Some(base) => start_span(module, *base),
            None => *dot_span,
        },
        ExprKind::TupleElement { base, .. } => start_span(module, *base),
        ExprKind::Apply { callee, .. } => start_span(module, *callee),
        ExprKind::Sequence { elements } => start_span(module, elements[0]),
        ExprKind::Brace { lbrace_span, .. } => *lbrace_span,
        ExprKind::Closure { input } => start_span(module, *input),
        ExprKind::Binary { lhs, .. } => start_span(module, *lhs),
    }
}

// ── Node support ──────────────────────────────────────────────────

/// Value of an integer literal, parsed from its source text with the usual
/// `0x`/`0o`/`0b` radix prefixes. The lexer only ever produces well-formed
/// text; anything else is a broken contract between collaborators.
pub fn int_literal_value(text: &str) -> u64 {
    let (digits, radix) = match text.as_bytes() {
        [b'0', b'x' | b'X', rest @ ..] if !rest.is_empty() => (&text[2..], 16),
        [b'0', b'o' | b'O', rest @ ..] if !rest.is_empty() => (&text[2..], 8),
        [b'0', b'b' | b'B', rest @ ..] if !rest.is_empty() => (&text[2..], 2),
        _ => (text, 10),
    };
    u64::from_str_radix(digits, radix).expect("malformed integer literal")
}

/// Number of arguments a closure takes: the field count of its function
/// type's input tuple, or 1 if the input is not a tuple.
pub fn closure_arg_count(module: &Module, closure: ExprId) -> usize {
    let (input, _result) = module.exprs[closure]
        .ty
        .as_fn()
        .expect("closure without a function type");
    match input.as_tuple() {
        Some(fields) => fields.len(),
        None => 1,
    }
}

// ── Tests ─────────────────────────────────────────────────────────
