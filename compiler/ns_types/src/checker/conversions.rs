//! Implicit conversions and casts.

use ns_diagnostic::{incompatible_cast, type_mismatch, ErrorCode};
use ns_ir::Span;

use super::Checker;
use crate::pool::TypeData;
use crate::TypeId;

impl Checker<'_> {
    /// Whether a value of type `from` may be stored into `to` without a
    /// cast.
    ///
    /// Integers convert to each other; a sized array decays to a pointer
    /// to its element; `*void` converts to and from any pointer; a
    /// function converts to a pointer to itself.
    pub(super) fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        if from == to || from.is_error() || to.is_error() {
            return true;
        }
        if self.pool.is_integral(from) && self.pool.is_integral(to) {
            return true;
        }
        let TypeData::Array {
            elem: to_elem,
            len: None,
        } = *self.pool.get(to)
        else {
            return false;
        };
        match self.pool.get(from) {
            TypeData::Array { elem, .. } => {
                *elem == to_elem || elem.is_void() || to_elem.is_void()
            }
            TypeData::Func { .. } => to_elem == from || to_elem.is_void(),
            _ => false,
        }
    }

    /// Report a mismatch unless `found` may be stored into `expected`.
    pub(super) fn check_assignable(
        &mut self,
        found: TypeId,
        expected: TypeId,
        span: Span,
        context: &str,
    ) -> bool {
        if found.is_void() {
            self.error(
                ErrorCode::E3014,
                span,
                "`void` value used where a value is required",
            );
            return false;
        }
        if self.is_assignable(found, expected) {
            return true;
        }
        let (expected, found) = (self.fmt_ty(expected), self.fmt_ty(found));
        self.report(type_mismatch(span, &expected, &found, context));
        false
    }

    /// Check `source as target` (or `as$` when `signed`); returns whether
    /// the cast is legal.
    ///
    /// Integers, pointers, arrays and functions cast freely among each
    /// other; a signed cast needs an integer target. Records cast only to
    /// structurally equal records.
    pub(super) fn check_cast(
        &mut self,
        source: TypeId,
        target: TypeId,
        signed: bool,
        span: Span,
    ) -> bool {
        if target.is_void() {
            self.error(ErrorCode::E3001, span, "cannot cast to `void`");
            return false;
        }
        if source.is_void() {
            self.error(ErrorCode::E3014, span, "cannot cast a `void` value");
            return false;
        }
        if source.is_error() || target.is_error() {
            return false;
        }
        let legal = if signed && !self.pool.is_integral(target) {
            false
        } else if self.pool.is_scalar(source) && self.pool.is_scalar(target) {
            true
        } else {
            self.pool.record_of(source).is_some()
                && self.pool.record_of(target).is_some()
                && self.pool.structurally_equal(source, target)
        };
        if !legal {
            let (from, to) = (self.fmt_ty(source), self.fmt_ty(target));
            let mut diag = incompatible_cast(span, &from, &to);
            if signed && !self.pool.is_integral(target) {
                diag = diag.with_note("`as$` needs an integer target type");
            }
            self.report(diag);
        }
        legal
    }
}
