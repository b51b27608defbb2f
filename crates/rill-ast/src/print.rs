//! Debug dump of expression trees: one parenthesized form per node variant,
//! children indented below their parent.

use crate::{BraceElement, DeclId, ExprId, ExprKind, Module};

const INDENT: usize = 2;

/// Render the tree rooted at `expr`, starting at `indent` spaces.
pub fn print_expr(module: &Module, expr: ExprId, indent: usize) -> String {
    let mut printer = Printer {
        module,
        buf: String::new(),
        indent,
    };
    printer.print(expr);
    printer.buf
}

/// Print a tree to stderr with a trailing newline.
pub fn dump_expr(module: &Module, expr: ExprId) {
    eprintln!("{}", print_expr(module, expr, 0));
}

struct Printer<'a> {
    module: &'a Module,
    buf: String,
    indent: usize,
}

impl<'a> Printer<'a> {
    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buf.push(' ');
        }
    }

    fn print_child(&mut self, expr: ExprId) {
        self.indent += INDENT;
        self.buf.push('\n');
        self.print(expr);
        self.indent -= INDENT;
    }

    fn print_decl(&mut self, decl: DeclId) {
        let module = self.module;
        let d = &module.decls[decl];
        self.indent += INDENT;
        self.buf.push('\n');
        self.write_indent();
        self.buf
            .push_str(&format!("(decl name={} type='{}'", d.name, d.ty));
        if let Some(init) = d.init {
            self.print_child(init);
        }
        self.buf.push(')');
        self.indent -= INDENT;
    }

    /// Name shown for a binary node's operator slot: `=` for assignment, the
    /// referenced declaration's name when resolved.
    fn operator_name(&self, op: Option<ExprId>) -> String {
        let module = self.module;
        let Some(op) = op else {
            return "=".to_string();
        };
        match &module.exprs[op].kind {
            ExprKind::DeclRef { decl, .. } => module.decls[*decl].name.to_string(),
            ExprKind::OverloadSetRef { decls, .. } => module.decls[decls[0]].name.to_string(),
            _ => "***UNKNOWN***".to_string(),
        }
    }

    fn print(&mut self, expr: ExprId) {
        let module = self.module;
        let e = &module.exprs[expr];
        self.write_indent();
        match &e.kind {
            ExprKind::IntLit { text, .. } => {
                self.buf
                    .push_str(&format!("(integer_literal type='{}' value={})", e.ty, text));
            }
            ExprKind::DeclRef { decl, .. } => {
                self.buf.push_str(&format!(
                    "(declref_expr type='{}' decl={})",
                    e.ty, module.decls[*decl].name
                ));
            }
            ExprKind::OverloadSetRef { decls, .. } => {
                self.buf.push_str(&format!(
                    "(overloadsetref_expr type='{}' decl={})",
                    e.ty, module.decls[decls[0]].name
                ));
            }
            ExprKind::UnresolvedRef { name, .. } => {
                self.buf.push_str(&format!(
                    "(unresolved_decl_ref_expr type='{}' name={})",
                    e.ty, name
                ));
            }
            ExprKind::UnresolvedMember { name, .. } => {
                self.buf.push_str(&format!(
                    "(unresolved_member_expr type='{}' name='{}')",
                    e.ty, name
                ));
            }
            ExprKind::UnresolvedScoped {
                type_decl, name, ..
            } => {
                self.buf.push_str(&format!(
                    "(unresolved_scoped_identifier_expr type='{}' name='{}')",
                    module.decls[*type_decl].name, name
                ));
            }
            ExprKind::Tuple { elements, .. } => {
                self.buf
                    .push_str(&format!("(tuple_expr type='{}'", e.ty));
                for slot in elements {
                    match slot {
                        Some(child) => self.print_child(*child),
                        None => {
                            self.indent += INDENT;
                            self.buf.push('\n');
                            self.write_indent();
                            self.buf.push_str("<<tuple element default value>>");
                            self.indent -= INDENT;
                        }
                    }
                }
                self.buf.push(')');
            }
            ExprKind::UnresolvedDot {
                base,
                field,
                resolved,
                ..
            } => {
                self.buf.push_str(&format!(
                    "(unresolved_dot_expr type='{}' field '{}'",
                    e.ty, field
                ));
                if !resolved.is_empty() {
                    self.buf.push_str(&format!(
                        " decl resolved to {} candidate(s)!",
                        resolved.len()
                    ));
                }
                if let Some(base) = base {
                    self.print_child(*base);
                }
                self.buf.push(')');
            }
            ExprKind::TupleElement { base, field_index } => {
                self.buf.push_str(&format!(
                    "(tuple_element_expr type='{}' field #{}",
                    e.ty, field_index
                ));
                self.print_child(*base);
                self.buf.push(')');
            }
            ExprKind::Apply { callee, arg } => {
                self.buf.push_str(&format!("(apply_expr type='{}'", e.ty));
                self.print_child(*callee);
                self.print_child(*arg);
                self.buf.push(')');
            }
            ExprKind::Sequence { elements } => {
                self.buf
                    .push_str(&format!("(sequence_expr type='{}'", e.ty));
                for child in elements {
                    self.print_child(*child);
                }
                self.buf.push(')');
            }
            ExprKind::Brace { elements, .. } => {
                self.buf.push_str(&format!("(brace_expr type='{}'", e.ty));
                for element in elements {
                    match element {
                        BraceElement::Expr(child) => self.print_child(*child),
                        BraceElement::Decl(decl) => self.print_decl(*decl),
                    }
                }
                self.buf.push(')');
            }
            ExprKind::Closure { input } => {
                self.buf
                    .push_str(&format!("(closure_expr type='{}'", e.ty));
                self.print_child(*input);
                self.buf.push(')');
            }
            ExprKind::AnonClosureArg { index, .. } => {
                self.buf.push_str(&format!(
                    "(anon_closure_arg_expr type='{}' arg_no={})",
                    e.ty, index
                ));
            }
            ExprKind::Binary { lhs, rhs, op } => {
                let name = self.operator_name(*op);
                self.buf
                    .push_str(&format!("(binary_expr '{}' type='{}'", name, e.ty));
                self.print_child(*lhs);
                self.print_child(*rhs);
                self.buf.push(')');
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decl, Span, Ty};
    use smol_str::SmolStr;

    fn sp() -> Span {
        Span::new(0, 0)
    }

    fn int_lit(m: &mut Module, text: &str) -> ExprId {
        m.alloc_expr(
            ExprKind::IntLit {
                text: SmolStr::new(text),
                span: sp(),
            },
            Ty::Int,
        )
    }

    fn decl(m: &mut Module, name: &str) -> crate::DeclId {
        m.alloc_decl(Decl {
            name: SmolStr::new(name),
            ty: Ty::Int,
            init: None,
            span: sp(),
        })
    }

    #[test]
    fn every_variant_has_a_distinct_form() {
        let mut m = Module::new();
        let d = decl(&mut m, "f");
        let lit = int_lit(&mut m, "1");
        let lit2 = int_lit(&mut m, "2");

        let cases = vec![
            (lit, "integer_literal"),
            (
                m.alloc_expr(ExprKind::DeclRef { decl: d, span: sp() }, Ty::Int),
                "declref_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::OverloadSetRef {
                        decls: vec![d],
                        span: sp(),
                    },
                    Ty::Dependent,
                ),
                "overloadsetref_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::UnresolvedRef {
                        name: SmolStr::new("g"),
                        span: sp(),
                    },
                    Ty::Dependent,
                ),
                "unresolved_decl_ref_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::UnresolvedMember {
                        name: SmolStr::new("m"),
                        colon_span: sp(),
                    },
                    Ty::Dependent,
                ),
                "unresolved_member_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::UnresolvedScoped {
                        type_decl: d,
                        type_decl_span: sp(),
                        name: SmolStr::new("m"),
                    },
                    Ty::Dependent,
                ),
                "unresolved_scoped_identifier_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::Tuple {
                        elements: vec![Some(lit)],
                        lparen_span: sp(),
                        is_grouping: false,
                    },
                    Ty::Dependent,
                ),
                "tuple_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::UnresolvedDot {
                        base: Some(lit),
                        field: SmolStr::new("x"),
                        dot_span: sp(),
                        resolved: vec![],
                    },
                    Ty::Dependent,
                ),
                "unresolved_dot_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::TupleElement {
                        base: lit,
                        field_index: 0,
                    },
                    Ty::Int,
                ),
                "tuple_element_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::Apply {
                        callee: lit,
                        arg: lit2,
                    },
                    Ty::Int,
                ),
                "apply_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::Sequence {
                        elements: vec![lit, lit2],
                    },
                    Ty::Dependent,
                ),
                "sequence_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::Brace {
                        elements: vec![BraceElement::Expr(lit)],
                        lbrace_span: sp(),
                    },
                    Ty::Dependent,
                ),
                "brace_expr",
            ),
            (
                m.alloc_expr(ExprKind::Closure { input: lit }, Ty::fun(Ty::Int, Ty::Int)),
                "closure_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::AnonClosureArg { index: 0, span: sp() },
                    Ty::Int,
                ),
                "anon_closure_arg_expr",
            ),
            (
                m.alloc_expr(
                    ExprKind::Binary {
                        lhs: lit,
                        rhs: lit2,
                        op: None,
                    },
                    Ty::Int,
                ),
                "binary_expr",
            ),
        ];

        for (expr, tag) in cases {
            let out = print_expr(&m, expr, 0);
            assert!(!out.is_empty());
            assert!(out.contains(tag), "missing tag {} in {}", tag, out);
        }
    }

    #[test]
    fn absent_tuple_element_prints_a_placeholder() {
        let mut m = Module::new();
        let lit = int_lit(&mut m, "3");
        let tuple = m.alloc_expr(
            ExprKind::Tuple {
                elements: vec![Some(lit), None],
                lparen_span: sp(),
                is_grouping: false,
            },
            Ty::Dependent,
        );

        let out = print_expr(&m, tuple, 0);
        assert!(out.contains("<<tuple element default value>>"));
        assert!(out.contains("value=3"));
    }

    #[test]
    fn children_are_indented() {
        let mut m = Module::new();
        let callee = int_lit(&mut m, "1");
        let arg = int_lit(&mut m, "2");
        let root = m.alloc_expr(ExprKind::Apply { callee, arg }, Ty::Int);

        let out = print_expr(&m, root, 0);
        assert!(out.starts_with("(apply_expr"));
        assert!(out.contains("\n  (integer_literal"));

        let nested = print_expr(&m, root, 4);
        assert!(nested.starts_with("    (apply_expr"));
        assert!(nested.contains("\n      (integer_literal"));
    }

    #[test]
    fn binary_operator_names() {
        let mut m = Module::new();
        let plus = decl(&mut m, "+");
        let lhs = int_lit(&mut m, "1");
        let rhs = int_lit(&mut m, "2");

        let assign = m.alloc_expr(
            ExprKind::Binary {
                lhs,
                rhs,
                op: None,
            },
            Ty::Int,
        );
        assert!(print_expr(&m, assign, 0).contains("(binary_expr '='"));

        let op_ref = m.alloc_expr(ExprKind::DeclRef { decl: plus, span: sp() }, Ty::Int);
        let add = m.alloc_expr(
            ExprKind::Binary {
                lhs,
                rhs,
                op: Some(op_ref),
            },
            Ty::Int,
        );
        assert!(print_expr(&m, add, 0).contains("(binary_expr '+'"));

        let odd = int_lit(&mut m, "0");
        let unknown = m.alloc_expr(
            ExprKind::Binary {
                lhs,
                rhs,
                op: Some(odd),
            },
            Ty::Int,
        );
        assert!(print_expr(&m, unknown, 0).contains("'***UNKNOWN***'"));
    }

    #[test]
    fn brace_prints_declarations_with_initializers() {
        let mut m = Module::new();
        let init = int_lit(&mut m, "7");
        let d = m.alloc_decl(Decl {
            name: SmolStr::new("x"),
            ty: Ty::Int,
            init: Some(init),
            span: sp(),
        });
        let root = m.alloc_expr(
            ExprKind::Brace {
                elements: vec![BraceElement::Decl(d)],
                lbrace_span: sp(),
            },
            Ty::Dependent,
        );

        let out = print_expr(&m, root, 0);
        assert!(out.contains("(decl name=x type='int'"));
        assert!(out.contains("value=7"));
    }

    #[test]
    fn dot_candidates_are_reported() {
        let mut m = Module::new();
        let d1 = decl(&mut m, "a");
        let d2 = decl(&mut m, "b");
        let base = int_lit(&mut m, "1");
        let dot = m.alloc_expr(
            ExprKind::UnresolvedDot {
                base: Some(base),
                field: SmolStr::new("len"),
                dot_span: sp(),
                resolved: vec![d1, d2],
            },
            Ty::Dependent,
        );

        let out = print_expr(&m, dot, 0);
        assert!(out.contains("field 'len'"));
        assert!(out.contains("decl resolved to 2 candidate(s)!"));
    }
}
