//! Function bodies and statements.

use ns_diagnostic::{Diagnostic, ErrorCode};
use ns_ir::ast::{DeclKind, Label, StmtKind};
use ns_ir::{DeclId, ExprId, Span, StmtId};
use ns_stack::ensure_sufficient_stack;

use super::Checker;
use crate::labels::{JumpKind, LabelError, TargetKind};
use crate::pool::TypeData;
use crate::scope::{Symbol, SymbolKind};
use crate::TypeId;

impl Checker<'_> {
    pub(super) fn check_function_body(&mut self, decl_id: DeclId, func_ty: TypeId) {
        let arena = self.arena;
        let decl = arena.decl(decl_id);
        let DeclKind::Func {
            params,
            body: Some(body),
            ..
        } = &decl.kind
        else {
            return;
        };
        let (ret, param_types) = match self.pool.get(func_ty) {
            TypeData::Func { ret, params, .. } => (*ret, params.clone()),
            _ => (TypeId::ERROR, Vec::new()),
        };
        let name = self.name_str(decl.name);
        let _span = tracing::debug_span!("function", name).entered();

        self.with_function(ret, |this| {
            for (i, param) in params.iter().enumerate() {
                let ty = param_types.get(i).copied().unwrap_or(TypeId::ERROR);
                let symbol = Symbol::new(param.name, SymbolKind::Var, ty, param.span);
                if let Err(err) = this.scopes.declare(symbol) {
                    this.report_symbol_error(err, param.name, param.span);
                }
            }
            // The outermost block shares the parameters' scope.
            match &arena.stmt(*body).kind {
                StmtKind::Compound(stmts) => {
                    for &stmt in stmts {
                        this.check_stmt(stmt);
                    }
                }
                _ => this.check_stmt(*body),
            }
        });

        if !ret.is_void() && !ret.is_error() && !self.always_returns(*body) {
            let ret_name = self.fmt_ty(ret);
            self.report(
                Diagnostic::error(ErrorCode::E3012)
                    .with_message(format!(
                        "function `{name}` may reach its end without returning a value"
                    ))
                    .with_label(decl.name_span, format!("returns `{ret_name}`"))
                    .with_secondary_label(arena.stmt(*body).span, "control can leave this body"),
            );
        }
    }

    pub(super) fn check_stmt(&mut self, id: StmtId) {
        ensure_sufficient_stack(|| self.check_stmt_inner(id));
    }

    fn check_stmt_inner(&mut self, id: StmtId) {
        let arena = self.arena;
        let stmt = arena.stmt(id);
        match &stmt.kind {
            StmtKind::Empty => {}
            StmtKind::Def(decl) => self.check_local_decl(*decl),
            StmtKind::Compound(stmts) => self.with_scope(|this| {
                for &stmt in stmts {
                    this.check_stmt(stmt);
                }
            }),
            StmtKind::Expr(expr) => {
                self.check_expr(*expr);
            }
            StmtKind::Continue { label } => {
                self.check_jump(id, JumpKind::Continue, *label, stmt.span);
            }
            StmtKind::Break { is_breakif, label } => {
                let kind = if *is_breakif {
                    JumpKind::BreakIf
                } else {
                    JumpKind::Break
                };
                self.check_jump(id, kind, *label, stmt.span);
            }
            StmtKind::Return(value) => self.check_return(*value, stmt.span),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
                label,
            } => {
                self.check_condition(*cond);
                self.with_jump_target(id, TargetKind::Cond, *label, |this| {
                    this.check_stmt(*then_branch);
                    if let Some(else_branch) = else_branch {
                        this.check_stmt(*else_branch);
                    }
                });
            }
            StmtKind::Iter {
                init,
                cond,
                step,
                body,
                else_branch,
                label,
            } => {
                if let Some(init) = init {
                    self.check_expr(*init);
                }
                if let Some(cond) = cond {
                    self.check_condition(*cond);
                }
                if let Some(step) = step {
                    self.check_expr(*step);
                }
                self.with_jump_target(id, TargetKind::Loop, *label, |this| {
                    this.check_stmt(*body);
                });
                // The `else` of a loop runs after it ends; jumps in it
                // belong to the enclosing statements.
                if let Some(else_branch) = else_branch {
                    self.check_stmt(*else_branch);
                }
            }
        }
    }

    fn check_jump(&mut self, id: StmtId, kind: JumpKind, label: Option<Label>, span: Span) {
        let err = match self.labels.resolve(kind, label.map(|l| l.name)) {
            Ok(target) => {
                self.jump_targets.insert(id, target);
                if kind != JumpKind::Continue {
                    self.broken.insert(target);
                }
                return;
            }
            Err(err) => err,
        };

        let keyword = kind.keyword();
        let (target_desc, other_desc) = match kind.target() {
            TargetKind::Loop => ("a loop", "an `if`"),
            TargetKind::Cond => ("an `if`", "a loop"),
        };
        let label_name = label.map_or("", |l| self.name_str(l.name));
        let message = match err {
            LabelError::NoTarget => format!("`{keyword}` outside of {target_desc}"),
            LabelError::Unknown => format!("no enclosing statement is labeled `{label_name}`"),
            LabelError::WrongKind { .. } => {
                format!("`{keyword}` needs {target_desc}, but `{label_name}` labels {other_desc}")
            }
        };
        let at = label.map_or(span, |l| l.span);
        let mut diag = Diagnostic::error(err.code())
            .with_message(message)
            .with_label(at, err.to_string());
        if let LabelError::WrongKind { label } = err {
            diag = diag.with_secondary_label(label, "label defined here");
        }
        self.report(diag);
    }

    fn check_return(&mut self, value: Option<ExprId>, span: Span) {
        let ret = self.return_type.unwrap_or(TypeId::ERROR);
        let Some(value) = value else {
            if !ret.is_void() && !ret.is_error() {
                let message = format!(
                    "missing return value in a function returning `{}`",
                    self.fmt_ty(ret)
                );
                self.error(ErrorCode::E3001, span, message);
            }
            return;
        };
        let found = self.check_expr(value);
        let value_span = self.arena.expr(value).span;
        if ret.is_void() {
            if !found.is_void() && !found.is_error() {
                self.error(
                    ErrorCode::E3001,
                    value_span,
                    "a function returning `void` cannot return a value",
                );
            }
        } else {
            self.check_assignable(found, ret, value_span, "as the return value");
        }
    }

    /// Conservative check that control never falls off the end of `id`.
    ///
    /// Holds for `return`, a block with such a statement, an `if` whose
    /// both branches hold and that no `breakif` leaves, and a loop that no
    /// `break` leaves which either has no condition or ends in such an
    /// `else`.
    fn always_returns(&self, id: StmtId) -> bool {
        ensure_sufficient_stack(|| match &self.arena.stmt(id).kind {
            StmtKind::Return(_) => true,
            StmtKind::Compound(stmts) => stmts.iter().any(|&s| self.always_returns(s)),
            StmtKind::If {
                then_branch,
                else_branch: Some(else_branch),
                ..
            } => {
                !self.broken.contains(&id)
                    && self.always_returns(*then_branch)
                    && self.always_returns(*else_branch)
            }
            StmtKind::Iter { cond: None, .. } => !self.broken.contains(&id),
            StmtKind::Iter {
                else_branch: Some(else_branch),
                ..
            } => !self.broken.contains(&id) && self.always_returns(*else_branch),
            _ => false,
        })
    }
}
