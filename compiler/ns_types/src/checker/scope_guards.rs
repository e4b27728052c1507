//! Scope and label guards.
//!
//! Each helper pushes before running the closure and pops after it, so
//! early returns inside the closure cannot leave a frame behind.

use ns_ir::ast::Label;
use ns_ir::StmtId;

use super::Checker;
use crate::labels::{LabelStack, TargetKind};
use crate::TypeId;

impl Checker<'_> {
    /// Run `f` inside a new block scope.
    pub(super) fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// Run `f` with `stmt` on the label stack.
    pub(super) fn with_jump_target<T>(
        &mut self,
        stmt: StmtId,
        kind: TargetKind,
        label: Option<Label>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.labels.push(stmt, kind, label);
        let result = f(self);
        self.labels.pop();
        result
    }

    /// Run `f` as the body of a function returning `ret`: fresh labels and
    /// a scope for the parameters.
    pub(super) fn with_function<T>(&mut self, ret: TypeId, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved_labels = std::mem::replace(&mut self.labels, LabelStack::new());
        let saved_ret = self.return_type.replace(ret);
        let result = self.with_scope(f);
        self.return_type = saved_ret;
        self.labels = saved_labels;
        result
    }
}
