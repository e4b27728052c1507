//! Type checker.
//!
//! Runs in three passes over one module:
//! 1. every module-level type name is bound, so types may be used before
//!    their declaration;
//! 2. module-level declarations are checked in order, resolving type
//!    declarations on first use;
//! 3. function bodies are checked, each with a fresh label stack.
//!
//! Record layouts are computed on demand (`sizeof` needs them) and for
//! every remaining record at the end.
//!
//! # Module Structure
//!
//! - `type_resolution`: parsed types to pool types, named types, records
//! - `layout_engine`: lazy record layout with cycle detection
//! - `declarations`: variables, constants, functions and local types
//! - `function_checking`: bodies, statements, jumps and return analysis
//! - `expressions`: expression typing and constant folding
//! - `conversions`: assignability and casts
//! - `initializers`: initializer typing and static constant checks
//! - `scope_guards`: scope and label push/pop around closures

mod conversions;
mod declarations;
mod expressions;
mod function_checking;
mod initializers;
mod layout_engine;
mod scope_guards;
mod type_resolution;

use ns_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use ns_ir::ast::{DeclKind, Module};
use ns_ir::{AstArena, DeclId, ExprId, Name, Span, StmtId, StringInterner};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::labels::LabelStack;
use crate::scope::{ScopeStack, Symbol, SymbolError, SymbolKind};
use crate::{SymbolId, TypeId, TypePool, TypedModule};

/// Resolution state of a module-level type declaration.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum TypeDeclState {
    Unresolved,
    Resolving,
    Done,
}

/// A function whose body is checked in the last pass.
#[derive(Copy, Clone, Debug)]
struct PendingBody {
    decl: DeclId,
    func_ty: TypeId,
}

pub(crate) struct Checker<'a> {
    arena: &'a AstArena,
    interner: &'a StringInterner,
    pool: TypePool,
    scopes: ScopeStack,
    labels: LabelStack,
    diagnostics: DiagnosticQueue,

    expr_types: Vec<TypeId>,
    type_nodes: Vec<TypeId>,
    decl_types: Vec<TypeId>,
    name_bindings: FxHashMap<ExprId, SymbolId>,
    decl_symbols: FxHashMap<DeclId, SymbolId>,
    jump_targets: FxHashMap<StmtId, StmtId>,
    const_values: FxHashMap<ExprId, u32>,
    implicit_casts: FxHashMap<ExprId, TypeId>,
    static_locals: Vec<SymbolId>,

    type_decls: FxHashMap<DeclId, TypeDeclState>,
    pending_bodies: Vec<PendingBody>,
    /// Statements some `break` or `breakif` leaves.
    broken: FxHashSet<StmtId>,
    /// Return type of the function being checked.
    return_type: Option<TypeId>,
}

impl<'a> Checker<'a> {
    pub(crate) fn new(arena: &'a AstArena, interner: &'a StringInterner) -> Self {
        Checker {
            arena,
            interner,
            pool: TypePool::new(),
            scopes: ScopeStack::new(),
            labels: LabelStack::new(),
            diagnostics: DiagnosticQueue::new(),
            expr_types: vec![TypeId::ERROR; arena.expr_count()],
            type_nodes: vec![TypeId::ERROR; arena.type_count()],
            decl_types: vec![TypeId::ERROR; arena.decl_count()],
            name_bindings: FxHashMap::default(),
            decl_symbols: FxHashMap::default(),
            jump_targets: FxHashMap::default(),
            const_values: FxHashMap::default(),
            implicit_casts: FxHashMap::default(),
            static_locals: Vec::new(),
            type_decls: FxHashMap::default(),
            pending_bodies: Vec::new(),
            broken: FxHashSet::default(),
            return_type: None,
        }
    }

    pub(crate) fn check_module(mut self, module: &Module) -> TypedModule {
        for &decl in &module.decls {
            self.bind_global_type(decl);
        }
        for &decl in &module.decls {
            self.check_decl(decl);
        }
        for pending in std::mem::take(&mut self.pending_bodies) {
            self.check_function_body(pending.decl, pending.func_ty);
        }
        self.layout_all_records();
        self.finish()
    }

    fn finish(mut self) -> TypedModule {
        TypedModule {
            expr_types: self.expr_types,
            type_nodes: self.type_nodes,
            decl_types: self.decl_types,
            name_bindings: self.name_bindings,
            decl_symbols: self.decl_symbols,
            jump_targets: self.jump_targets,
            const_values: self.const_values,
            implicit_casts: self.implicit_casts,
            pool: self.pool,
            symbols: self.scopes.into_table(),
            static_locals: self.static_locals,
            diagnostics: self.diagnostics.flush(),
        }
    }

    /// Bind a module-level `using`, `struct` or `union` name to a
    /// placeholder that is resolved on first use.
    fn bind_global_type(&mut self, decl_id: DeclId) {
        let arena = self.arena;
        let decl = arena.decl(decl_id);
        if decl.kind != DeclKind::Type {
            return;
        }
        let symbol = Symbol {
            is_global: true,
            decl: Some(decl_id),
            definition: Some(decl_id),
            ..Symbol::new(decl.name, SymbolKind::Type, TypeId::ERROR, decl.name_span)
        };
        match self.scopes.declare(symbol) {
            Ok(id) => {
                self.decl_symbols.insert(decl_id, id);
                self.type_decls.insert(decl_id, TypeDeclState::Unresolved);
            }
            Err(err) => self.report_symbol_error(err, decl.name, decl.name_span),
        }
    }

    // Reporting

    fn report(&mut self, diag: Diagnostic) {
        tracing::trace!(code = %diag.code, message = %diag.message, "type diagnostic");
        self.diagnostics.add(diag);
    }

    fn error(&mut self, code: ErrorCode, span: Span, message: impl Into<String>) {
        let message = message.into();
        self.report(
            Diagnostic::error(code)
                .with_message(message.clone())
                .with_label(span, message),
        );
    }

    fn report_symbol_error(&mut self, err: SymbolError, name: Name, span: Span) {
        let name = self.interner.lookup(name);
        let (message, previous) = match err {
            SymbolError::Redefinition { .. } => {
                (format!("`{name}` is defined more than once"), "first defined here")
            }
            SymbolError::Conflicting { .. } => (
                format!("conflicting declarations of `{name}`"),
                "previously declared here",
            ),
        };
        self.report(
            Diagnostic::error(err.code())
                .with_message(message)
                .with_label(span, err.to_string())
                .with_secondary_label(err.previous(), previous),
        );
    }

    fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    fn fmt_ty(&self, ty: TypeId) -> String {
        self.pool.format_type(ty, self.interner)
    }
}
