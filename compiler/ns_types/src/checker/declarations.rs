//! Variables, constants, functions and type declarations.

use ns_diagnostic::ErrorCode;
use ns_ir::ast::{DeclKind, TypeKind};
use ns_ir::{DeclId, ExprId};

use super::{Checker, PendingBody};
use crate::const_eval;
use crate::pool::RecordKind;
use crate::scope::{Symbol, SymbolKind};
use crate::{SymbolId, TypeId};

impl Checker<'_> {
    /// Check a module-level declaration.
    pub(super) fn check_decl(&mut self, decl_id: DeclId) {
        let arena = self.arena;
        let decl = arena.decl(decl_id);
        tracing::debug!(name = self.name_str(decl.name), "checking declaration");
        match &decl.kind {
            DeclKind::Var { value, is_static } => self.check_var(decl_id, *value, *is_static),
            DeclKind::Const { value, is_static } => {
                self.check_const(decl_id, *value, *is_static);
            }
            DeclKind::Func {
                body,
                is_static,
                is_inline,
                ..
            } => self.check_func_decl(decl_id, body.is_some(), *is_static, *is_inline),
            DeclKind::Type => {
                if let Some(&symbol) = self.decl_symbols.get(&decl_id) {
                    self.ensure_type_decl(decl_id, symbol);
                }
            }
        }
    }

    /// Check a declaration statement inside a function body.
    pub(super) fn check_local_decl(&mut self, decl_id: DeclId) {
        let arena = self.arena;
        let decl = arena.decl(decl_id);
        match &decl.kind {
            DeclKind::Var { value, is_static } => self.check_var(decl_id, *value, *is_static),
            DeclKind::Const { value, is_static } => {
                self.check_const(decl_id, *value, *is_static);
            }
            // Nested functions never reach the AST.
            DeclKind::Func { .. } => {}
            DeclKind::Type => self.define_local_type(decl_id),
        }
    }

    /// Bind a declaration's symbol, reporting clashes.
    fn bind_decl(&mut self, decl_id: DeclId, symbol: Symbol) -> Option<SymbolId> {
        let (name, span) = (symbol.name, symbol.span);
        match self.scopes.declare(symbol) {
            Ok(id) => {
                self.decl_symbols.insert(decl_id, id);
                Some(id)
            }
            Err(err) => {
                self.report_symbol_error(err, name, span);
                None
            }
        }
    }

    fn check_var(&mut self, decl_id: DeclId, value: Option<ExprId>, is_static: bool) {
        let arena = self.arena;
        let decl = arena.decl(decl_id);
        let global = self.scopes.at_module_level();
        let name = self.name_str(decl.name);

        let mut ty = self.resolve_type(decl.ty);
        if ty.is_void() {
            let message = format!("variable `{name}` cannot have type `void`");
            self.error(ErrorCode::E3001, self.arena.ty(decl.ty).span, message);
            ty = TypeId::ERROR;
        }
        if let Some(value) = value {
            ty = self.check_init(value, ty);
            let typed = !self.expr_types[value.index()].is_error();
            if (global || is_static) && typed && !self.is_constant_init(value) {
                let message = format!("initial value of `{name}` is not a compile-time constant");
                self.error(ErrorCode::E3007, self.arena.expr(value).span, message);
            }
        } else if global && !decl.is_declare {
            let message =
                format!("`{name}` is defined without a value; give it one or mark it `declare`");
            self.error(ErrorCode::E3013, decl.name_span, message);
        }

        let defined = !decl.is_declare || value.is_some();
        let symbol = Symbol {
            is_static,
            is_global: global,
            defined,
            decl: Some(decl_id),
            definition: defined.then_some(decl_id),
            ..Symbol::new(decl.name, SymbolKind::Var, ty, decl.name_span)
        };
        let bound = self.bind_decl(decl_id, symbol);
        if let Some(symbol) = bound.filter(|_| is_static && !global) {
            if !self.static_locals.contains(&symbol) {
                self.static_locals.push(symbol);
            }
        }
        self.decl_types[decl_id.index()] = ty;
    }

    fn check_const(&mut self, decl_id: DeclId, value: ExprId, is_static: bool) {
        let arena = self.arena;
        let decl = arena.decl(decl_id);
        let name = self.name_str(decl.name);
        let value_span = self.arena.expr(value).span;

        let mut ty = self.resolve_type(decl.ty);
        if !ty.is_error() && !self.pool.is_integral(ty) {
            let message = format!(
                "constant `{name}` must have an integer type, found `{}`",
                self.fmt_ty(ty)
            );
            self.error(ErrorCode::E3001, self.arena.ty(decl.ty).span, message);
            ty = TypeId::ERROR;
        }
        let found = self.check_value(value);
        self.check_assignable(found, ty, value_span, "for this constant");

        let folded = match (self.const_of(value), self.pool.int_width(ty)) {
            (Some(v), Some(width)) => Some(const_eval::truncate(v, width)),
            (Some(v), None) => Some(v),
            (None, _) => {
                if !found.is_error() {
                    let message = format!("value of `{name}` is not a compile-time constant");
                    self.error(ErrorCode::E3007, value_span, message);
                }
                None
            }
        };

        let symbol = Symbol {
            is_static,
            is_global: self.scopes.at_module_level(),
            decl: Some(decl_id),
            definition: Some(decl_id),
            value: folded,
            ..Symbol::new(decl.name, SymbolKind::Const, ty, decl.name_span)
        };
        self.bind_decl(decl_id, symbol);
        self.decl_types[decl_id.index()] = ty;
    }

    fn check_func_decl(&mut self, decl_id: DeclId, has_body: bool, is_static: bool, is_inline: bool) {
        let arena = self.arena;
        let decl = arena.decl(decl_id);
        let ty = self.resolve_type(decl.ty);
        if !decl.is_declare && !has_body {
            let message = format!(
                "function `{}` has no body; give it one or mark it `declare`",
                self.name_str(decl.name)
            );
            self.error(ErrorCode::E3013, decl.name_span, message);
        }

        let symbol = Symbol {
            is_static,
            is_inline,
            is_global: true,
            defined: has_body,
            decl: Some(decl_id),
            definition: has_body.then_some(decl_id),
            ..Symbol::new(decl.name, SymbolKind::Func, ty, decl.name_span)
        };
        self.bind_decl(decl_id, symbol);
        self.decl_types[decl_id.index()] = ty;
        if has_body {
            self.pending_bodies.push(PendingBody {
                decl: decl_id,
                func_ty: ty,
            });
        }
    }

    /// `using`, `struct` or `union` inside a function body. Records are
    /// bound before their members so they can point at themselves.
    fn define_local_type(&mut self, decl_id: DeclId) {
        let arena = self.arena;
        let decl = arena.decl(decl_id);
        let placeholder = Symbol {
            decl: Some(decl_id),
            definition: Some(decl_id),
            ..Symbol::new(decl.name, SymbolKind::Type, TypeId::ERROR, decl.name_span)
        };
        let ty = match &arena.ty(decl.ty).kind {
            TypeKind::Struct(members) => {
                let symbol = self.bind_decl(decl_id, placeholder);
                let kind = RecordKind::Struct;
                self.define_record(decl.ty, kind, Some(decl.name), members, symbol)
            }
            TypeKind::Union(members) => {
                let symbol = self.bind_decl(decl_id, placeholder);
                let kind = RecordKind::Union;
                self.define_record(decl.ty, kind, Some(decl.name), members, symbol)
            }
            _ => {
                let ty = self.resolve_type(decl.ty);
                self.bind_decl(decl_id, Symbol { ty, ..placeholder });
                ty
            }
        };
        self.decl_types[decl_id.index()] = ty;
    }
}
