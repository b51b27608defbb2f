//! The type vocabulary shared by the AST and the conversion-rank engine.
//! It lives next to the expression nodes because the two reference each
//! other: every expression carries its result type, and a tuple-type field
//! may carry a default-value expression.

use smol_str::SmolStr;
use std::fmt;

use crate::ExprId;

// ── Types ─────────────────────────────────────────────────────────

/// A field of a tuple type: optional name, element type, and an optional
/// default-value expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleField {
    pub name: Option<SmolStr>,
    pub ty: Ty,
    pub default: Option<ExprId>,
}

impl TupleField {
    pub fn unnamed(ty: Ty) -> TupleField {
        TupleField {
            name: None,
            ty,
            default: None,
        }
    }

    pub fn named(name: impl Into<SmolStr>, ty: Ty) -> TupleField {
        TupleField {
            name: Some(name.into()),
            ty,
            default: None,
        }
    }
}

/// Canonical equality is structural equality: two types convert with no work
/// exactly when they compare equal.
#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Int,
    Float,
    /// Nominal type, opaque to this subsystem.
    Named(SmolStr),
    /// Placeholder for a type not yet resolved. Illegal as a conversion
    /// destination.
    Dependent,
    /// Ordered named/typed fields, each optionally carrying a default value.
    Tuple(Vec<TupleField>),
    /// Function type with one input and one result.
    Fn { input: Box<Ty>, result: Box<Ty> },
}

impl Ty {
    pub fn fun(input: Ty, result: Ty) -> Ty {
        Ty::Fn {
            input: Box::new(input),
            result: Box::new(result),
        }
    }

    pub fn is_dependent(&self) -> bool {
        matches!(self, Ty::Dependent)
    }

    pub fn as_tuple(&self) -> Option<&[TupleField]> {
        match self {
            Ty::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_fn(&self) -> Option<(&Ty, &Ty)> {
        match self {
            Ty::Fn { input, result } => Some((input, result)),
            _ => None,
        }
    }
}

/// Index of the field a bare scalar may initialize: the single field lacking
/// a default value. `None` when zero or several fields lack one.
pub fn scalar_init_field(fields: &[TupleField]) -> Option<usize> {
    let mut found = None;
    for (i, field) in fields.iter().enumerate() {
        if field.default.is_some() {
            continue;
        }
        if found.is_some() {
            return None;
        }
        found = Some(i);
    }
    found
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int => write!(f, "int"),
            Ty::Float => write!(f, "float"),
            Ty::Named(name) => write!(f, "{}", name),
            Ty::Dependent => write!(f, "<dependent>"),
            Ty::Tuple(fields) => {
                write!(f, "(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(name) = &field.name {
                        write!(f, "{} : ", name)?;
                    }
                    write!(f, "{}", field.ty)?;
                    if field.default.is_some() {
                        write!(f, " = <default>")?;
                    }
                }
                write!(f, ")")
            }
            Ty::Fn { input, result } => write!(f, "{} -> {}", input, result),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────
