//! Parsed types to pool types.

use ns_diagnostic::{unknown_name, Diagnostic, ErrorCode};
use ns_ir::ast::{MemberData, TypeKind};
use ns_ir::{DeclId, ExprId, Name, ParsedTypeId, Span};
use ns_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use super::{Checker, TypeDeclState};
use crate::pool::{LayoutState, Member, RecordKind};
use crate::scope::SymbolKind;
use crate::{SymbolId, TypeId, TypePool};

impl Checker<'_> {
    /// Resolve a type node and record the result in the side table.
    pub(super) fn resolve_type(&mut self, id: ParsedTypeId) -> TypeId {
        let ty = ensure_sufficient_stack(|| self.resolve_type_inner(id));
        self.type_nodes[id.index()] = ty;
        ty
    }

    fn resolve_type_inner(&mut self, id: ParsedTypeId) -> TypeId {
        let arena = self.arena;
        let parsed = arena.ty(id);
        match &parsed.kind {
            TypeKind::Void => TypeId::VOID,
            TypeKind::Int(width) => TypePool::int(*width),
            TypeKind::Ref(name) => self.resolve_type_name(*name, parsed.span),
            TypeKind::Array { inner, size } => {
                let elem = self.resolve_type(*inner);
                match size {
                    None => self.pool.pointer(elem),
                    Some(size) => self.resolve_sized_array(elem, *size),
                }
            }
            TypeKind::Func {
                ret,
                params,
                variadic,
            } => {
                let ret = self.resolve_type(*ret);
                let mut param_types = Vec::with_capacity(params.len());
                for &param in params {
                    let ty = self.resolve_type(param);
                    if ty.is_void() {
                        self.error(
                            ErrorCode::E3001,
                            arena.ty(param).span,
                            "a parameter cannot have type `void`",
                        );
                        param_types.push(TypeId::ERROR);
                    } else {
                        param_types.push(ty);
                    }
                }
                self.pool.func(ret, param_types, *variadic)
            }
            TypeKind::Struct(members) => {
                self.define_record(id, RecordKind::Struct, None, members, None)
            }
            TypeKind::Union(members) => {
                self.define_record(id, RecordKind::Union, None, members, None)
            }
            TypeKind::Typeof(expr) => self.check_expr(*expr),
        }
    }

    fn resolve_type_name(&mut self, name: Name, span: Span) -> TypeId {
        let Some(id) = self.scopes.resolve(name) else {
            self.report(unknown_name(span, self.name_str(name)));
            return TypeId::ERROR;
        };
        let kind = self.scopes.symbol(id).kind;
        if kind != SymbolKind::Type {
            let message = format!(
                "`{}` is a {}, not a type",
                self.name_str(name),
                kind.describe()
            );
            self.error(ErrorCode::E2007, span, message);
            return TypeId::ERROR;
        }
        self.type_symbol_type(id)
    }

    /// Type named by a type symbol, resolving its declaration first if it
    /// is a module-level declaration not reached yet.
    pub(super) fn type_symbol_type(&mut self, id: SymbolId) -> TypeId {
        if let Some(decl) = self.scopes.symbol(id).decl {
            self.ensure_type_decl(decl, id);
        }
        self.scopes.symbol(id).ty
    }

    /// Resolve a module-level type declaration once.
    ///
    /// Records are bound before their members are resolved, so members may
    /// point at the record itself. An alias reached again while it is
    /// being resolved is circular.
    pub(super) fn ensure_type_decl(&mut self, decl_id: DeclId, symbol: SymbolId) {
        match self.type_decls.get(&decl_id).copied() {
            None | Some(TypeDeclState::Done) => {}
            Some(TypeDeclState::Resolving) => {
                let arena = self.arena;
                let decl = arena.decl(decl_id);
                let message = format!(
                    "type `{}` is defined in terms of itself",
                    self.name_str(decl.name)
                );
                self.report(
                    Diagnostic::error(ErrorCode::E3009)
                        .with_message(message)
                        .with_label(decl.name_span, "circular type definition"),
                );
                self.scopes.symbol_mut(symbol).ty = TypeId::ERROR;
            }
            Some(TypeDeclState::Unresolved) => {
                let arena = self.arena;
                let decl = arena.decl(decl_id);
                let ty = match &arena.ty(decl.ty).kind {
                    TypeKind::Struct(members) => {
                        self.type_decls.insert(decl_id, TypeDeclState::Done);
                        let kind = RecordKind::Struct;
                        self.define_record(decl.ty, kind, Some(decl.name), members, Some(symbol))
                    }
                    TypeKind::Union(members) => {
                        self.type_decls.insert(decl_id, TypeDeclState::Done);
                        let kind = RecordKind::Union;
                        self.define_record(decl.ty, kind, Some(decl.name), members, Some(symbol))
                    }
                    _ => {
                        self.type_decls.insert(decl_id, TypeDeclState::Resolving);
                        let ty = self.resolve_type(decl.ty);
                        self.type_decls.insert(decl_id, TypeDeclState::Done);
                        // A cycle through this alias already reported it.
                        if self.scopes.symbol(symbol).ty.is_error() && !ty.is_error() {
                            self.scopes.symbol_mut(symbol).ty = ty;
                        }
                        self.scopes.symbol(symbol).ty
                    }
                };
                self.decl_types[decl_id.index()] = ty;
                tracing::debug!(name = self.name_str(decl.name), ty = ?ty, "resolved type declaration");
            }
        }
    }

    /// Create a record for the type node `id` and resolve its members.
    ///
    /// When `binding` is given, the symbol is pointed at the new record
    /// before any member is resolved.
    pub(super) fn define_record(
        &mut self,
        id: ParsedTypeId,
        kind: RecordKind,
        name: Option<Name>,
        members: &[MemberData],
        binding: Option<SymbolId>,
    ) -> TypeId {
        let arena = self.arena;
        let parsed = arena.ty(id);
        let (record, ty) = self
            .pool
            .new_record(kind, name, parsed.volatile, parsed.span);
        self.type_nodes[id.index()] = ty;
        if let Some(symbol) = binding {
            self.scopes.symbol_mut(symbol).ty = ty;
        }
        // Measuring the record from inside its own definition is circular.
        self.pool.record_mut(record).layout = LayoutState::InProgress;
        let members = self.resolve_members(members);
        self.pool.set_members(record, members);
        let def = self.pool.record_mut(record);
        if def.layout == LayoutState::InProgress {
            def.layout = LayoutState::Pending;
        }
        ty
    }

    fn resolve_members(&mut self, members: &[MemberData]) -> Vec<Member> {
        let mut seen: FxHashMap<Name, Span> = FxHashMap::default();
        let mut resolved = Vec::with_capacity(members.len());
        for data in members {
            let mut ty = self.resolve_type(data.ty);
            let name = self.name_str(data.name);
            if let Some(&first) = seen.get(&data.name) {
                self.report(
                    Diagnostic::error(ErrorCode::E2001)
                        .with_message(format!("member `{name}` is defined more than once"))
                        .with_label(data.span, "redefined here")
                        .with_secondary_label(first, "first defined here"),
                );
                continue;
            }
            seen.insert(data.name, data.span);
            if ty.is_void() {
                let message = format!("member `{name}` cannot have type `void`");
                self.error(ErrorCode::E3001, data.span, message);
                ty = TypeId::ERROR;
            }
            let bits = data
                .bits
                .and_then(|bits| self.check_bitfield(data.name, ty, bits, data.span));
            resolved.push(Member {
                name: data.name,
                ty,
                bits,
                span: data.span,
            });
        }
        resolved
    }

    fn check_bitfield(&mut self, name: Name, ty: TypeId, bits: u32, span: Span) -> Option<u32> {
        if ty.is_error() {
            return None;
        }
        let name = self.name_str(name);
        let Some(width) = self.pool.int_width(ty) else {
            let message = format!(
                "bitfield `{name}` must have an integer type, found `{}`",
                self.fmt_ty(ty)
            );
            self.error(ErrorCode::E3010, span, message);
            return None;
        };
        if bits == 0 || bits > width.bits() {
            let message = format!(
                "bitfield `{name}` has width {bits}, but `{width}` allows 1 to {}",
                width.bits()
            );
            self.error(ErrorCode::E3010, span, message);
            return None;
        }
        Some(bits)
    }

    fn resolve_sized_array(&mut self, elem: TypeId, size: ExprId) -> TypeId {
        let size_ty = self.check_value(size);
        let span = self.arena.expr(size).span;
        if size_ty.is_error() || elem.is_error() {
            return TypeId::ERROR;
        }
        if !self.pool.is_integral(size_ty) {
            let message = format!("array size must be an integer, found `{}`", self.fmt_ty(size_ty));
            self.error(ErrorCode::E3001, span, message);
            return TypeId::ERROR;
        }
        let Some(len) = self.const_of(size) else {
            self.error(
                ErrorCode::E3007,
                span,
                "array size must be a compile-time constant",
            );
            return TypeId::ERROR;
        };
        if elem.is_void() {
            self.error(ErrorCode::E3005, span, "an array of `void` has no size");
            return TypeId::ERROR;
        }
        self.pool.array(elem, len)
    }
}
