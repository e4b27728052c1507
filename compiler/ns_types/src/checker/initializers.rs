//! Initial values.
//!
//! An initializer is checked against the declared type and may complete
//! it: an array without a size takes its length from a brace list or a
//! string literal.

use ns_diagnostic::{Diagnostic, ErrorCode};
use ns_ir::ast::{AggregateKind, AggregatePayload, BinaryOp, ExprKind, FieldInit};
use ns_ir::{ExprId, Span};
use ns_stack::ensure_sufficient_stack;

use super::Checker;
use crate::pool::{RecordKind, TypeData};
use crate::scope::SymbolKind;
use crate::TypeId;

impl Checker<'_> {
    /// Check `init` as the initial value of an object of type `ty` and
    /// return the object's completed type.
    pub(super) fn check_init(&mut self, init: ExprId, ty: TypeId) -> TypeId {
        let completed = ensure_sufficient_stack(|| self.check_init_inner(init, ty));
        if matches!(
            self.arena.expr(init).kind,
            ExprKind::AggregateInit { .. }
        ) {
            self.expr_types[init.index()] = completed;
        }
        completed
    }

    fn check_init_inner(&mut self, init: ExprId, ty: TypeId) -> TypeId {
        let arena = self.arena;
        let expr = arena.expr(init);
        match &expr.kind {
            ExprKind::AggregateInit { kind, payload } => {
                self.check_aggregate(*kind, payload, ty, expr.span)
            }
            ExprKind::Str(_) => {
                let found = self.check_expr(init);
                self.check_string_init(found, ty, expr.span)
            }
            _ => {
                let found = self.check_value(init);
                self.check_assignable(found, ty, expr.span, "in initializer");
                ty
            }
        }
    }

    /// A string literal fills an array of its unit type.
    fn check_string_init(&mut self, found: TypeId, ty: TypeId, span: Span) -> TypeId {
        let target = match self.pool.get(ty) {
            TypeData::Array { elem, len } => Some((*elem, *len)),
            _ => None,
        };
        let literal = match self.pool.get(found) {
            TypeData::Array {
                elem,
                len: Some(units),
            } => Some((*elem, *units)),
            _ => None,
        };
        let (Some((want, len)), Some((unit, units))) = (target, literal) else {
            self.check_assignable(found, ty, span, "in initializer");
            return ty;
        };
        if want != unit {
            self.check_assignable(found, ty, span, "in initializer");
            return ty;
        }
        match len {
            None => found,
            Some(capacity) if units > capacity => {
                let message = format!(
                    "string of {units} units including the terminator does not fit in `{}`",
                    self.fmt_ty(ty)
                );
                self.error(ErrorCode::E3006, span, message);
                ty
            }
            Some(_) => ty,
        }
    }

    fn check_aggregate(
        &mut self,
        kind: AggregateKind,
        payload: &AggregatePayload,
        ty: TypeId,
        span: Span,
    ) -> TypeId {
        if ty.is_error() {
            self.check_init_children(payload);
            return TypeId::ERROR;
        }
        match (kind, payload) {
            (AggregateKind::Array, AggregatePayload::Elements(elements)) => {
                self.check_array_init(elements, ty, span)
            }
            (AggregateKind::Struct | AggregateKind::Union, AggregatePayload::Fields(fields)) => {
                let record_kind = if kind == AggregateKind::Struct {
                    RecordKind::Struct
                } else {
                    RecordKind::Union
                };
                self.check_record_init(record_kind, fields, ty, span)
            }
            _ => {
                self.check_init_children(payload);
                self.error(ErrorCode::E3001, span, "malformed initializer");
                ty
            }
        }
    }

    fn check_array_init(&mut self, elements: &[ExprId], ty: TypeId, span: Span) -> TypeId {
        let TypeData::Array { elem, len } = *self.pool.get(ty) else {
            self.check_init_children_of(elements);
            let message = format!(
                "an array initializer cannot initialize a value of type `{}`",
                self.fmt_ty(ty)
            );
            self.error(ErrorCode::E3001, span, message);
            return ty;
        };
        for &element in elements {
            self.check_init(element, elem);
        }
        let count = u32::try_from(elements.len()).unwrap_or(u32::MAX);
        match len {
            None => self.pool.array(elem, count),
            Some(capacity) if count > capacity => {
                let first_extra = elements
                    .get(capacity as usize)
                    .map_or(span, |&e| self.arena.expr(e).span);
                self.report(
                    Diagnostic::error(ErrorCode::E3006)
                        .with_message(format!(
                            "too many initializers: `{}` holds {capacity} element(s) but {count} were given",
                            self.fmt_ty(ty)
                        ))
                        .with_label(first_extra, "no room for this element")
                        .with_secondary_label(span, "in this initializer"),
                );
                ty
            }
            Some(_) => ty,
        }
    }

    fn check_record_init(
        &mut self,
        kind: RecordKind,
        fields: &[FieldInit],
        ty: TypeId,
        span: Span,
    ) -> TypeId {
        let record = self
            .pool
            .record_of(ty)
            .filter(|&id| self.pool.record(id).kind == kind);
        let Some(record) = record else {
            for field in fields {
                self.check_init(field.value, TypeId::ERROR);
            }
            let message = format!(
                "a {} initializer cannot initialize a value of type `{}`",
                kind.keyword(),
                self.fmt_ty(ty)
            );
            self.error(ErrorCode::E3001, span, message);
            return ty;
        };

        if kind == RecordKind::Union && fields.len() != 1 {
            self.error(
                ErrorCode::E3006,
                span,
                "a union initializer must name exactly one member",
            );
        }
        for field in fields {
            let member_ty = self
                .pool
                .record(record)
                .member(field.name)
                .map(|(_, member)| member.ty);
            match member_ty {
                Some(member_ty) => {
                    self.check_init(field.value, member_ty);
                }
                None => {
                    let message = format!(
                        "`{}` has no member `{}`",
                        self.fmt_ty(ty),
                        self.name_str(field.name)
                    );
                    self.error(ErrorCode::E3003, field.span, message);
                    self.check_init(field.value, TypeId::ERROR);
                }
            }
        }
        ty
    }

    fn check_init_children(&mut self, payload: &AggregatePayload) {
        match payload {
            AggregatePayload::Elements(elements) => self.check_init_children_of(elements),
            AggregatePayload::Fields(fields) => {
                for field in fields {
                    self.check_init(field.value, TypeId::ERROR);
                }
            }
        }
    }

    fn check_init_children_of(&mut self, elements: &[ExprId]) {
        for &element in elements {
            self.check_init(element, TypeId::ERROR);
        }
    }

    /// Whether an initializer can be computed before the program runs:
    /// integral constants, string literals, addresses of objects with
    /// static storage and of functions, and brace lists of those.
    pub(super) fn is_constant_init(&self, id: ExprId) -> bool {
        if self.const_of(id).is_some() {
            return true;
        }
        ensure_sufficient_stack(|| match &self.arena.expr(id).kind {
            ExprKind::Str(_) => true,
            // Functions and static arrays stand for their address.
            ExprKind::Name(_) => {
                self.names_function(id)
                    || (self.is_static_object(id) && self.is_sized_array(self.expr_types[id.index()]))
            }
            ExprKind::AddrOf(inner) => self.is_static_address(*inner),
            ExprKind::Cast { expr, .. } => self.is_constant_init(*expr),
            ExprKind::Binary {
                left,
                op: BinaryOp::Add | BinaryOp::Sub,
                right,
            } => self.is_constant_init(*left) && self.const_of(*right).is_some(),
            ExprKind::AggregateInit { payload, .. } => match payload {
                AggregatePayload::Elements(elements) => {
                    elements.iter().all(|&e| self.is_constant_init(e))
                }
                AggregatePayload::Fields(fields) => {
                    fields.iter().all(|f| self.is_constant_init(f.value))
                }
            },
            _ => false,
        })
    }

    /// Whether `id` designates storage whose address is fixed at link
    /// time.
    fn is_static_address(&self, id: ExprId) -> bool {
        match &self.arena.expr(id).kind {
            ExprKind::Name(_) => self.names_function(id) || self.is_static_object(id),
            ExprKind::Index { array, index } => {
                self.is_sized_array(self.expr_types[array.index()])
                    && self.is_static_address(*array)
                    && self.const_of(*index).is_some()
            }
            ExprKind::Access { record, .. } => self.is_static_address(*record),
            _ => false,
        }
    }

    fn is_static_object(&self, id: ExprId) -> bool {
        self.name_bindings.get(&id).is_some_and(|&symbol| {
            let symbol = self.scopes.symbol(symbol);
            symbol.kind == SymbolKind::Var && symbol.has_static_storage()
        })
    }

    fn is_sized_array(&self, ty: TypeId) -> bool {
        matches!(self.pool.get(ty), TypeData::Array { len: Some(_), .. })
    }
}
