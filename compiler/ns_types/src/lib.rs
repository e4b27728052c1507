//! Semantic analysis for New Solar.
//!
//! Takes a parsed [`Module`] and produces a [`TypedModule`]: every
//! expression typed, every name bound to a symbol, every jump bound to the
//! statement it leaves, and every record laid out. The AST is never
//! modified.
//!
//! # Type Interning
//!
//! Types live in a [`TypePool`] and are referred to by [`TypeId`]. Equal
//! type data always yields the same id, so type equality is id equality.
//! Records are nominal: each `struct` or `union` definition gets its own
//! [`RecordId`], and casts between records compare them structurally.

mod checker;
pub mod const_eval;
mod idx;
pub mod labels;
pub mod layout;
mod output;
pub mod pool;
pub mod scope;

pub use idx::{RecordId, SymbolId, TypeId};
pub use labels::{JumpKind, LabelError, LabelStack, TargetKind};
pub use layout::{Layout, MemberLayout};
pub use output::TypedModule;
pub use pool::{Member, RecordDef, RecordKind, TypeData, TypePool, POINTER_SIZE};
pub use scope::{ScopeStack, Symbol, SymbolError, SymbolKind, SymbolTable};

use ns_ir::ast::Module;
use ns_ir::{AstArena, StringInterner};

/// Check a parsed module.
///
/// Never fails: problems are reported in [`TypedModule::diagnostics`] and
/// the offending nodes are typed as [`TypeId::ERROR`], which suppresses
/// follow-on errors.
#[tracing::instrument(level = "debug", skip_all, fields(decls = module.decls.len()))]
pub fn check_module(module: &Module, arena: &AstArena, interner: &StringInterner) -> TypedModule {
    let typed = checker::Checker::new(arena, interner).check_module(module);
    tracing::debug!(
        types = typed.pool.len(),
        errors = typed.diagnostics.iter().filter(|d| d.is_error()).count(),
        "checked"
    );
    typed
}

#[cfg(test)]
mod tests;
