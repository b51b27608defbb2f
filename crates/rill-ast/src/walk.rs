//! Callback-driven pre/post-order traversal that rewrites expression trees
//! in place.

use crate::{BraceElement, ExprId, ExprKind, Module};

/// Which side of a node's children the callback is being invoked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    Pre,
    Post,
}

/// Walk the tree rooted at `root`, invoking `f` on every node both before
/// and after its children are visited.
///
/// Pre-order: returning `None` skips the node's children and leaves the
/// subtree untouched; traversal continues with the node's siblings. A `Some`
/// payload is discarded — pre-order only gates descent, it never substitutes
/// the node.
///
/// Post-order: returning `None` aborts the entire walk and `walk_expr`
/// returns `None`; returning `Some(id)` installs `id` in the parent slot
/// that referenced the node. Replacements committed by completed siblings
/// survive a later abort.
///
/// Children are visited in a fixed order per variant. The operator slot of a
/// binary node is not a structural child and is not walked. For declarations
/// inside brace blocks the initializer expression is rewritten in place.
pub fn walk_expr<F>(module: &mut Module, root: ExprId, f: &mut F) -> Option<ExprId>
where
    F: FnMut(&mut Module, ExprId, WalkOrder) -> Option<ExprId>,
{
    process(module, root, f)
}

fn process<F>(module: &mut Module, expr: ExprId, f: &mut F) -> Option<ExprId>
where
    F: FnMut(&mut Module, ExprId, WalkOrder) -> Option<ExprId>,
{
    // A pre-order veto skips the subtree without aborting the walk.
    if f(module, expr, WalkOrder::Pre).is_none() {
        return Some(expr);
    }

    walk_children(module, expr, f)?;
    f(module, expr, WalkOrder::Post)
}

fn walk_children<F>(module: &mut Module, expr: ExprId, f: &mut F) -> Option<()>
where
    F: FnMut(&mut Module, ExprId, WalkOrder) -> Option<ExprId>,
{
    match &module.exprs[expr].kind {
        ExprKind::IntLit { .. }
        | ExprKind::DeclRef { .. }
        | ExprKind::OverloadSetRef { .. }
        | ExprKind::UnresolvedRef { .. }
        | ExprKind::UnresolvedMember { .. }
        | ExprKind::UnresolvedScoped { .. }
        | ExprKind::AnonClosureArg { .. } => Some(()),

        ExprKind::Tuple { elements, .. } => {
            let elements = elements.clone();
            for (i, slot) in elements.into_iter().enumerate() {
                let Some(child) = slot else { continue };
                let child = process(module, child, f)?;
                if let ExprKind::Tuple { elements, .. } = &mut module.exprs[expr].kind {
                    elements[i] = Some(child);
                }
            }
            Some(())
        }

        ExprKind::UnresolvedDot { base, .. } => {
            let Some(base) = *base else { return Some(()) };
            let base = process(module, base, f)?;
            if let ExprKind::UnresolvedDot { base: slot, .. } = &mut module.exprs[expr].kind {
                *slot = Some(base);
            }
            Some(())
        }

        ExprKind::TupleElement { base, .. } => {
            let base = *base;
            let base = process(module, base, f)?;
            if let ExprKind::TupleElement { base: slot, .. } = &mut module.exprs[expr].kind {
                *slot = base;
            }
            Some(())
        }

        ExprKind::Apply { callee, arg } => {
            let (callee, arg) = (*callee, *arg);
            let callee = process(module, callee, f)?;
            if let ExprKind::Apply { callee: slot, .. } = &mut module.exprs[expr].kind {
                *slot = callee;
            }
            let arg = process(module, arg, f)?;
            if let ExprKind::Apply { arg: slot, .. } = &mut module.exprs[expr].kind {
                *slot = arg;
            }
            Some(())
        }

        ExprKind::Sequence { elements } => {
            let elements = elements.clone();
            for (i, child) in elements.into_iter().enumerate() {
                let child = process(module, child, f)?;
                if let ExprKind::Sequence { elements } = &mut module.exprs[expr].kind {
                    elements[i] = child;
                }
            }
            Some(())
        }

        ExprKind::Brace { elements, .. } => {
            let elements = elements.clone();
            for (i, element) in elements.into_iter().enumerate() {
                match element {
                    BraceElement::Expr(child) => {
                        let child = process(module, child, f)?;
                        if let ExprKind::Brace { elements, .. } = &mut module.exprs[expr].kind {
                            elements[i] = BraceElement::Expr(child);
                        }
                    }
                    BraceElement::Decl(decl) => {
                        let Some(init) = module.decls[decl].init else {
                            continue;
                        };
                        let init = process(module, init, f)?;
                        module.decls[decl].init = Some(init);
                    }
                }
            }
            Some(())
        }

        ExprKind::Closure { input } => {
            let input = *input;
            let input = process(module, input, f)?;
            if let ExprKind::Closure { input: slot } = &mut module.exprs[expr].kind {
                *slot = input;
            }
            Some(())
        }

        ExprKind::Binary { lhs, rhs, .. } => {
            let (lhs, rhs) = (*lhs, *rhs);
            let lhs = process(module, lhs, f)?;
            if let ExprKind::Binary { lhs: slot, .. } = &mut module.exprs[expr].kind {
                *slot = lhs;
            }
            let rhs = process(module, rhs, f)?;
            if let ExprKind::Binary { rhs: slot, .. } = &mut module.exprs[expr].kind {
                *slot = rhs;
            }
            Some(())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────
