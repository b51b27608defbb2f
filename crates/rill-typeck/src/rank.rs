//! Ranking of type conversions: whether and how an expression can be
//! adapted to a destination type.

use rill_ast::{scalar_init_field, ExprId, ExprKind, Module, TupleField, Ty};
use smol_str::SmolStr;

/// How an expression can be adapted to a destination type.
///
/// Ordered best-to-worst so that `max` combines per-element ranks into the
/// worst case for a whole tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConversionRank {
    /// No change needed.
    Identity,
    /// Implicitly wrapped as a zero-argument closure producing the value.
    AutoClosure,
    /// No conversion exists.
    Invalid,
}

/// Rank the conversion of `expr` to `dest`.
///
/// `Invalid` is an expected outcome, not an error. The destination must
/// already be resolved; a dependent destination is a broken contract with
/// the caller, not bad user input.
pub fn rank_of_conversion(module: &Module, expr: ExprId, dest: &Ty) -> ConversionRank {
    assert!(
        !dest.is_dependent(),
        "conversion destination must not be dependent"
    );

    // Exact matches are identity conversions.
    if module.exprs[expr].ty == *dest {
        return ConversionRank::Identity;
    }

    // Grouping parens are an identity wrapper around the inner expression.
    if let ExprKind::Tuple {
        elements,
        is_grouping: true,
        ..
    } = &module.exprs[expr].kind
    {
        if let Some(inner) = elements[0] {
            return rank_of_conversion(module, inner, dest);
        }
    }

    if let Ty::Tuple(dest_fields) = dest {
        if let ExprKind::Tuple { elements, .. } = &module.exprs[expr].kind {
            return tuple_conversion_rank(module, expr, elements.len(), dest_fields);
        }

        // A bare scalar can initialize a tuple whose other fields all have
        // defaults, as in assigning 4 to `(a = 4, b : int)`.
        if let Some(field) = scalar_init_field(dest_fields) {
            return rank_of_conversion(module, expr, &dest_fields[field].ty);
        }

        if let Some(src_fields) = module.exprs[expr].ty.as_tuple() {
            return tuple_conversion_rank(module, expr, src_fields.len(), dest_fields);
        }
    }

    // Auto-closure: converting E to a function type whose result accepts E.
    if let Ty::Fn { result, .. } = dest {
        if rank_of_conversion(module, expr, result) == ConversionRank::Invalid {
            return ConversionRank::Invalid;
        }
        return ConversionRank::AutoClosure;
    }

    ConversionRank::Invalid
}

/// What a destination field ended up bound to during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Unbound,
    /// Bound to the source element at this index.
    Source(usize),
    /// Bound to the field's declared default value.
    Default,
}

/// Reconcile a tuple-shaped source with the destination field list: bind
/// named destination fields to same-named source elements from any position,
/// fill the rest positionally from unused unnamed elements, and fall back to
/// declared defaults. Unconsumed source elements fail the conversion.
fn tuple_conversion_rank(
    module: &Module,
    expr: ExprId,
    num_src: usize,
    dest_fields: &[TupleField],
) -> ConversionRank {
    // Source element names come from the expression's tuple type, which
    // records them for literal and non-literal sources alike.
    let mut names: Vec<Option<SmolStr>> = vec![None; num_src];
    let mut used = vec![false; num_src];
    let mut bindings = vec![Binding::Unbound; dest_fields.len()];

    if let Some(src_fields) = module.exprs[expr].ty.as_tuple() {
        assert_eq!(src_fields.len(), num_src, "tuple element count mismatch");
        for (i, field) in src_fields.iter().enumerate() {
            names[i] = field.name.clone();
        }

        // Named destination fields match a same-named source element from
        // any position. This is the swizzle case, converting
        //   (y = 4, x = 3)  to  (x : int, y : int).
        for (i, dest_field) in dest_fields.iter().enumerate() {
            let Some(dest_name) = &dest_field.name else {
                continue;
            };
            let Some(j) = names.iter().position(|n| n.as_ref() == Some(dest_name)) else {
                continue;
            };
            bindings[i] = Binding::Source(j);
            used[j] = true;
        }
    }

    // Fill the remaining destination fields in order from the leftover
    // unnamed source elements.
    let mut next_src = 0;
    for (i, dest_field) in dest_fields.iter().enumerate() {
        if bindings[i] != Binding::Unbound {
            continue;
        }
        while next_src != num_src && (used[next_src] || names[next_src].is_some()) {
            next_src += 1;
        }
        if next_src == num_src {
            // Out of inputs: either the field's default covers it, or
            // nothing does and the conversion fails.
            if dest_field.default.is_none() {
                return ConversionRank::Invalid;
            }
            bindings[i] = Binding::Default;
            continue;
        }
        bindings[i] = Binding::Source(next_src);
        used[next_src] = true;
    }

    // Extra source elements are never silently dropped.
    if used.iter().any(|u| !u) {
        return ConversionRank::Invalid;
    }

    // A multi-element literal whose arity matches the destination converts
    // element-wise; the tuple's rank is the worst case over its elements.
    // Fields bound to a default contribute nothing.
    if let ExprKind::Tuple { elements, .. } = &module.exprs[expr].kind {
        if elements.len() != 1 && elements.len() == dest_fields.len() {
            let mut worst = ConversionRank::Identity;
            for (i, dest_field) in dest_fields.iter().enumerate() {
                let Binding::Source(j) = bindings[i] else {
                    continue;
                };
                let Some(element) = elements[j] else {
                    continue;
                };
                worst = worst.max(rank_of_conversion(module, element, &dest_field.ty));
            }
            return worst;
        }
    }

    // Any other tuple-typed source may permute its elements but not convert
    // them: every bound pair must agree exactly.
    let Some(src_fields) = module.exprs[expr].ty.as_tuple() else {
        return ConversionRank::Invalid;
    };
    for (i, dest_field) in dest_fields.iter().enumerate() {
        let Binding::Source(j) = bindings[i] else {
            continue;
        };
        if src_fields[j].ty != dest_field.ty {
            return ConversionRank::Invalid;
        }
    }
    ConversionRank::Identity
}
