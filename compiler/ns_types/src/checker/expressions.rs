//! Expression typing and constant folding.
//!
//! Every checked expression gets a type in `expr_types`. Integral
//! constants are folded bottom-up into `const_values` as they are typed,
//! so "is this a constant" is a table lookup.

use ns_diagnostic::{invalid_operands, type_mismatch, unknown_name, ErrorCode};
use ns_ir::ast::{BinaryOp, CondOp, ExprKind, IntWidth, UnaryCondOp, UnaryOp};
use ns_ir::{Encoding, ExprId, LitWidth, Name, ParsedTypeId, Span};
use ns_stack::ensure_sufficient_stack;

use super::Checker;
use crate::const_eval;
use crate::pool::TypeData;
use crate::scope::SymbolKind;
use crate::{TypeId, TypePool};

/// Callee signature: return type, parameter types, variadic.
type Signature = (TypeId, Vec<TypeId>, bool);

impl Checker<'_> {
    /// Type an expression and record the result.
    pub(super) fn check_expr(&mut self, id: ExprId) -> TypeId {
        let ty = ensure_sufficient_stack(|| self.infer_expr(id));
        self.expr_types[id.index()] = ty;
        ty
    }

    /// Type an expression whose value is used.
    pub(super) fn check_value(&mut self, id: ExprId) -> TypeId {
        let ty = self.check_expr(id);
        if ty.is_void() {
            self.error(
                ErrorCode::E3014,
                self.arena.expr(id).span,
                "`void` value used where a value is required",
            );
            return TypeId::ERROR;
        }
        ty
    }

    /// Type the condition of `if`, a loop, `!`, `&&`, `||` or `?:`.
    pub(super) fn check_condition(&mut self, id: ExprId) -> TypeId {
        let ty = self.check_value(id);
        if !ty.is_error() && !self.pool.is_scalar(ty) {
            let message = format!(
                "condition has type `{}`, which is not an integer, pointer or function",
                self.fmt_ty(ty)
            );
            self.error(ErrorCode::E3001, self.arena.expr(id).span, message);
        }
        ty
    }

    pub(super) fn const_of(&self, id: ExprId) -> Option<u32> {
        self.const_values.get(&id).copied()
    }

    fn set_const(&mut self, id: ExprId, value: Option<u32>) {
        if let Some(value) = value {
            self.const_values.insert(id, value);
        }
    }

    /// Width at which a value of `ty` folds: its integer width, or 32 bits
    /// for pointers.
    fn value_width(&self, ty: TypeId) -> Option<IntWidth> {
        match self.pool.get(ty) {
            TypeData::Int(width) => Some(*width),
            TypeData::Array { len: None, .. } => Some(IntWidth::W32),
            _ => None,
        }
    }

    fn infer_expr(&mut self, id: ExprId) -> TypeId {
        let arena = self.arena;
        let expr = arena.expr(id);
        let span = expr.span;
        match &expr.kind {
            ExprKind::Name(name) => self.infer_name(id, *name, span),
            ExprKind::Int(lit) => {
                self.const_values.insert(id, lit.value);
                match lit.width {
                    LitWidth::W16 => TypeId::INT16,
                    LitWidth::W32 => TypeId::INT32,
                    LitWidth::Ptr => self.pool.pointer(TypeId::VOID),
                }
            }
            ExprKind::Str(lit) => {
                let unit = match lit.encoding {
                    Encoding::Narrow => TypeId::INT8,
                    Encoding::Wide => TypeId::INT16,
                };
                let len = u32::try_from(lit.units.len() + 1).unwrap_or(u32::MAX);
                self.pool.array(unit, len)
            }
            ExprKind::SizeofExpr(operand) => {
                let ty = self.sizeof_operand(*operand);
                self.infer_sizeof(id, ty, span)
            }
            ExprKind::SizeofType(ty) => {
                let ty = self.resolve_type(*ty);
                self.infer_sizeof(id, ty, span)
            }
            ExprKind::Call { func, args } => self.infer_call(*func, args),
            ExprKind::Index { array, index } => self.infer_index(*array, *index),
            ExprKind::Access {
                record,
                member,
                member_span,
            } => self.infer_access(*record, *member, *member_span),
            ExprKind::Cast {
                expr: inner,
                ty,
                signed,
            } => self.infer_cast(id, *inner, *ty, *signed, span),
            ExprKind::Deref(inner) => self.infer_deref(*inner),
            ExprKind::AddrOf(inner) => self.infer_addr_of(*inner),
            ExprKind::Unary { op, operand } => self.infer_unary(id, *op, *operand, span),
            ExprKind::UnaryCond {
                op: UnaryCondOp::Not,
                operand,
            } => {
                self.check_condition(*operand);
                let folded = self.const_of(*operand).map(const_eval::fold_not);
                self.set_const(id, folded);
                TypeId::INT16
            }
            ExprKind::Binary { left, op, right } => {
                let lt = self.check_value(*left);
                let rt = self.check_value(*right);
                let ty = self.arith_result(*op, lt, rt, *right, span);
                self.fold_binary(id, *op, *left, *right, ty);
                ty
            }
            ExprKind::BinaryCond { left, op, right } => {
                self.infer_binary_cond(id, *left, *op, *right, span)
            }
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => self.infer_ternary(id, *cond, *then_expr, *else_expr),
            ExprKind::Assign { target, value, op } => {
                self.infer_assign(*target, *value, *op, span)
            }
            ExprKind::Comma(exprs) => {
                let mut ty = TypeId::VOID;
                for &expr in exprs {
                    ty = self.check_expr(expr);
                }
                ty
            }
            ExprKind::AggregateInit { .. } => {
                self.error(
                    ErrorCode::E3001,
                    span,
                    "a brace initializer is only allowed as an initial value",
                );
                TypeId::ERROR
            }
        }
    }

    fn infer_name(&mut self, id: ExprId, name: Name, span: Span) -> TypeId {
        let Some(symbol) = self.scopes.resolve(name) else {
            self.report(unknown_name(span, self.name_str(name)));
            return TypeId::ERROR;
        };
        self.name_bindings.insert(id, symbol);
        let (kind, ty, value) = {
            let symbol = self.scopes.symbol(symbol);
            (symbol.kind, symbol.ty, symbol.value)
        };
        match kind {
            SymbolKind::Type => {
                let message = format!("`{}` is a type, not a value", self.name_str(name));
                self.error(ErrorCode::E2007, span, message);
                TypeId::ERROR
            }
            SymbolKind::Const => {
                self.set_const(id, value);
                ty
            }
            SymbolKind::Var | SymbolKind::Func => ty,
        }
    }

    /// `sizeof(name)` where `name` is a type measures that type.
    fn sizeof_operand(&mut self, operand: ExprId) -> TypeId {
        match self.sizeof_type_operand(operand) {
            Some(ty) => ty,
            None => self.check_expr(operand),
        }
    }

    /// A `sizeof` operand spelled `T`, `*T`, `**T`, ... where `T` names a
    /// type is measured as that type or pointer type.
    fn sizeof_type_operand(&mut self, operand: ExprId) -> Option<TypeId> {
        let arena = self.arena;
        let ty = match &arena.expr(operand).kind {
            ExprKind::Name(name) => {
                let symbol = self.scopes.resolve(*name)?;
                if self.scopes.symbol(symbol).kind != SymbolKind::Type {
                    return None;
                }
                self.name_bindings.insert(operand, symbol);
                self.type_symbol_type(symbol)
            }
            ExprKind::Deref(inner) => {
                let target = self.sizeof_type_operand(*inner)?;
                if target.is_error() {
                    TypeId::ERROR
                } else {
                    self.pool.pointer(target)
                }
            }
            _ => return None,
        };
        self.expr_types[operand.index()] = ty;
        Some(ty)
    }

    fn infer_sizeof(&mut self, id: ExprId, ty: TypeId, span: Span) -> TypeId {
        if ty.is_error() {
            return TypeId::ERROR;
        }
        match self.size_align_of(ty) {
            Some((size, _)) => {
                self.const_values
                    .insert(id, const_eval::truncate(size, IntWidth::W16));
                TypeId::INT16
            }
            None => {
                // Records that failed layout were reported there.
                if ty.is_void() {
                    self.error(ErrorCode::E3005, span, "`void` has no size");
                }
                TypeId::ERROR
            }
        }
    }

    fn signature(&self, ty: TypeId) -> Option<Signature> {
        let func = match self.pool.get(ty) {
            TypeData::Array { elem, len: None } => self.pool.get(*elem),
            data => data,
        };
        match func {
            TypeData::Func {
                ret,
                params,
                variadic,
            } => Some((*ret, params.clone(), *variadic)),
            _ => None,
        }
    }

    fn infer_call(&mut self, func: ExprId, args: &[ExprId]) -> TypeId {
        let callee = self.check_value(func);
        let arg_types: Vec<TypeId> = args.iter().map(|&arg| self.check_value(arg)).collect();
        if callee.is_error() {
            return TypeId::ERROR;
        }
        let func_span = self.arena.expr(func).span;
        let Some((ret, params, variadic)) = self.signature(callee) else {
            let message = format!(
                "`{}` is not a function or function pointer",
                self.fmt_ty(callee)
            );
            self.error(ErrorCode::E3004, func_span, message);
            return TypeId::ERROR;
        };

        if args.len() < params.len() || (!variadic && args.len() > params.len()) {
            let expected = if variadic {
                format!("at least {}", params.len())
            } else {
                params.len().to_string()
            };
            let message = format!(
                "this function takes {expected} argument(s) but {} were supplied",
                args.len()
            );
            self.error(ErrorCode::E3011, func_span, message);
        }
        for ((&arg, &found), &param) in args.iter().zip(&arg_types).zip(&params) {
            let span = self.arena.expr(arg).span;
            self.check_assignable(found, param, span, "for this argument");
        }
        ret
    }

    fn infer_index(&mut self, array: ExprId, index: ExprId) -> TypeId {
        let base = self.check_value(array);
        let index_ty = self.check_value(index);
        if base.is_error() {
            return TypeId::ERROR;
        }
        let span = self.arena.expr(array).span;
        let Some(elem) = self.pool.elem(base) else {
            let message = format!("cannot index into a value of type `{}`", self.fmt_ty(base));
            self.error(ErrorCode::E3004, span, message);
            return TypeId::ERROR;
        };
        if elem.is_void() {
            self.error(ErrorCode::E3004, span, "cannot index through a `*void`");
            return TypeId::ERROR;
        }
        if !index_ty.is_error() && !self.pool.is_integral(index_ty) {
            let message = format!("array index must be an integer, found `{}`", self.fmt_ty(index_ty));
            self.error(ErrorCode::E3004, self.arena.expr(index).span, message);
        }
        elem
    }

    fn infer_access(&mut self, record: ExprId, member: Name, member_span: Span) -> TypeId {
        let ty = self.check_value(record);
        if ty.is_error() {
            return TypeId::ERROR;
        }
        let member_name = self.name_str(member);
        let Some(id) = self.pool.record_of(ty) else {
            let message = format!(
                "no member `{member_name}` on `{}`, which is not a struct or union",
                self.fmt_ty(ty)
            );
            self.error(ErrorCode::E3003, member_span, message);
            return TypeId::ERROR;
        };
        if let Some((_, found)) = self.pool.record(id).member(member) {
            return found.ty;
        }
        let message = format!("`{}` has no member `{member_name}`", self.fmt_ty(ty));
        self.error(ErrorCode::E3003, member_span, message);
        TypeId::ERROR
    }

    fn infer_cast(
        &mut self,
        id: ExprId,
        inner: ExprId,
        ty: ParsedTypeId,
        signed: bool,
        span: Span,
    ) -> TypeId {
        let source = self.check_expr(inner);
        let target = self.resolve_type(ty);
        if self.check_cast(source, target, signed, span) {
            let widths = (self.value_width(source), self.value_width(target));
            if let (Some(value), (Some(from), Some(to))) = (self.const_of(inner), widths) {
                self.const_values
                    .insert(id, const_eval::convert(value, from, to, signed));
            }
        }
        target
    }

    fn infer_deref(&mut self, inner: ExprId) -> TypeId {
        let ty = self.check_value(inner);
        if ty.is_error() {
            return TypeId::ERROR;
        }
        let span = self.arena.expr(inner).span;
        match self.pool.elem(ty) {
            Some(elem) if elem.is_void() => {
                self.error(ErrorCode::E3004, span, "cannot dereference a `*void`");
                TypeId::ERROR
            }
            Some(elem) => elem,
            None => {
                let message = format!("cannot dereference a value of type `{}`", self.fmt_ty(ty));
                self.error(ErrorCode::E3004, span, message);
                TypeId::ERROR
            }
        }
    }

    fn infer_addr_of(&mut self, inner: ExprId) -> TypeId {
        let ty = self.check_expr(inner);
        if ty.is_error() {
            return TypeId::ERROR;
        }
        if self.is_lvalue(inner) || self.names_function(inner) {
            return self.pool.pointer(ty);
        }
        self.error(
            ErrorCode::E3008,
            self.arena.expr(inner).span,
            "cannot take the address of this expression",
        );
        TypeId::ERROR
    }

    fn infer_unary(&mut self, id: ExprId, op: UnaryOp, operand: ExprId, span: Span) -> TypeId {
        let ty = self.check_value(operand);
        if ty.is_error() {
            return TypeId::ERROR;
        }
        let Some(width) = self.pool.int_width(ty) else {
            let message = format!(
                "`{}` cannot be applied to `{}`",
                op.as_symbol(),
                self.fmt_ty(ty)
            );
            self.error(ErrorCode::E3004, span, message);
            return TypeId::ERROR;
        };
        let folded = self
            .const_of(operand)
            .map(|value| const_eval::fold_unary(op, value, width));
        self.set_const(id, folded);
        ty
    }

    /// Result type of an arithmetic operator, also used for compound
    /// assignment.
    ///
    /// The right operand is converted to the left operand's type. With a
    /// pointer, array or function on either side only `+` and `-` are
    /// legal; the result keeps the left operand's type, except that pointer
    /// minus pointer is a 32-bit difference.
    pub(super) fn arith_result(
        &mut self,
        op: BinaryOp,
        lt: TypeId,
        rt: TypeId,
        right: ExprId,
        span: Span,
    ) -> TypeId {
        if lt.is_error() || rt.is_error() {
            return TypeId::ERROR;
        }
        let address = |ty| self.pool.is_pointer_like(ty) || self.pool.is_func(ty);
        let (la, ra) = (address(lt), address(rt));
        let scalar = self.pool.is_scalar(lt) && self.pool.is_scalar(rt);
        if !scalar || ((la || ra) && !op.allows_pointers()) {
            let (left, right) = (self.fmt_ty(lt), self.fmt_ty(rt));
            self.report(invalid_operands(span, op.as_symbol(), &left, &right));
            return TypeId::ERROR;
        }

        let left = self.widen_right(right, lt, rt);
        let difference = op == BinaryOp::Sub
            && self.pool.is_pointer_like(lt)
            && self.pool.is_pointer_like(rt);
        if difference {
            TypeId::INT32
        } else {
            left
        }
    }

    /// Record the conversion of a binary operator's right operand to the
    /// left operand's type, returning that type.
    fn widen_right(&mut self, right: ExprId, lt: TypeId, rt: TypeId) -> TypeId {
        let (left, value) = (self.pool.decay(lt), self.pool.decay(rt));
        if left != value {
            self.implicit_casts.insert(right, left);
        }
        left
    }

    fn fold_binary(&mut self, id: ExprId, op: BinaryOp, left: ExprId, right: ExprId, ty: TypeId) {
        let (Some(l), Some(r), Some(width)) =
            (self.const_of(left), self.const_of(right), self.value_width(ty))
        else {
            return;
        };
        let folded = const_eval::fold_binary(op, l, r, width);
        self.set_const(id, folded);
    }

    fn infer_binary_cond(
        &mut self,
        id: ExprId,
        left: ExprId,
        op: CondOp,
        right: ExprId,
        span: Span,
    ) -> TypeId {
        let (lt, rt) = if op.is_logical() {
            (self.check_condition(left), self.check_condition(right))
        } else {
            let (lt, rt) = (self.check_value(left), self.check_value(right));
            if !lt.is_error() && !rt.is_error() {
                if self.comparable(op, lt, rt) {
                    self.widen_right(right, lt, rt);
                } else {
                    let (l, r) = (self.fmt_ty(lt), self.fmt_ty(rt));
                    self.report(invalid_operands(span, op.as_symbol(), &l, &r));
                }
            }
            (lt, rt)
        };

        let width = self.value_width(lt).max(self.value_width(rt));
        if let (Some(l), Some(r), Some(width)) = (self.const_of(left), self.const_of(right), width)
        {
            self.const_values
                .insert(id, const_eval::fold_cond(op, l, r, width));
        }
        TypeId::INT16
    }

    /// Comparisons take two integers; `==` and `!=` also take pointers,
    /// arrays and functions, against each other or against an integer.
    fn comparable(&self, op: CondOp, lt: TypeId, rt: TypeId) -> bool {
        let address = |ty| self.pool.is_pointer_like(ty) || self.pool.is_func(ty);
        let (la, ra) = (address(lt), address(rt));
        let (li, ri) = (self.pool.is_integral(lt), self.pool.is_integral(rt));
        if la || ra {
            op.allows_pointers() && (la || li) && (ra || ri)
        } else {
            li && ri
        }
    }

    fn infer_ternary(
        &mut self,
        id: ExprId,
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    ) -> TypeId {
        self.check_condition(cond);
        let then_ty = self.check_value(then_expr);
        let else_ty = self.check_value(else_expr);

        let ty = if then_ty.is_error() || else_ty.is_error() {
            TypeId::ERROR
        } else if let (Some(a), Some(b)) =
            (self.pool.int_width(then_ty), self.pool.int_width(else_ty))
        {
            TypePool::int(a.max(b))
        } else if then_ty == else_ty {
            then_ty
        } else {
            let (then_decayed, else_decayed) = (self.pool.decay(then_ty), self.pool.decay(else_ty));
            if then_decayed == else_decayed {
                then_decayed
            } else {
                let (expected, found) = (self.fmt_ty(then_ty), self.fmt_ty(else_ty));
                let span = self.arena.expr(else_expr).span;
                self.report(type_mismatch(span, &expected, &found, "to match the other branch"));
                TypeId::ERROR
            }
        };

        let chosen = self
            .const_of(cond)
            .map(|c| if c != 0 { then_expr } else { else_expr });
        let folded = chosen.and_then(|branch| self.const_of(branch));
        self.set_const(id, folded);
        ty
    }

    fn infer_assign(
        &mut self,
        target: ExprId,
        value: ExprId,
        op: Option<BinaryOp>,
        span: Span,
    ) -> TypeId {
        let target_ty = self.check_expr(target);
        let value_ty = self.check_value(value);
        if target_ty.is_error() {
            return TypeId::ERROR;
        }
        let target_span = self.arena.expr(target).span;
        if !self.is_lvalue(target) {
            self.error(ErrorCode::E3008, target_span, "cannot assign to this expression");
            return TypeId::ERROR;
        }
        if matches!(self.pool.get(target_ty), TypeData::Array { len: Some(_), .. }) {
            let message = format!("cannot assign to an array of type `{}`", self.fmt_ty(target_ty));
            self.error(ErrorCode::E3008, target_span, message);
            return TypeId::ERROR;
        }
        match op {
            Some(op) => {
                self.arith_result(op, target_ty, value_ty, value, span);
            }
            None => {
                let value_span = self.arena.expr(value).span;
                self.check_assignable(value_ty, target_ty, value_span, "in assignment");
            }
        }
        target_ty
    }

    /// Whether `id` designates storage: a variable, an element, a
    /// dereference, or a member of one of those.
    pub(super) fn is_lvalue(&self, id: ExprId) -> bool {
        match &self.arena.expr(id).kind {
            ExprKind::Name(_) => self.bound_kind(id) == Some(SymbolKind::Var),
            ExprKind::Index { .. } | ExprKind::Deref(_) => true,
            ExprKind::Access { record, .. } => self.is_lvalue(*record),
            _ => false,
        }
    }

    pub(super) fn names_function(&self, id: ExprId) -> bool {
        matches!(self.arena.expr(id).kind, ExprKind::Name(_))
            && self.bound_kind(id) == Some(SymbolKind::Func)
    }

    fn bound_kind(&self, id: ExprId) -> Option<SymbolKind> {
        self.name_bindings
            .get(&id)
            .map(|&symbol| self.scopes.symbol(symbol).kind)
    }
}
