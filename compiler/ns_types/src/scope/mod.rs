//! Scope chain and symbol arena.
//!
//! Symbols live in one arena and frames map names to arena ids, so
//! shadowing and scope exit never move symbols. The bottom frame is the
//! module scope and is never popped.

use ns_diagnostic::ErrorCode;
use ns_ir::{DeclId, Name, Span};
use rustc_hash::FxHashMap;

use crate::{SymbolId, TypeId};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SymbolKind {
    Var,
    Const,
    Func,
    Type,
}

impl SymbolKind {
    pub const fn describe(self) -> &'static str {
        match self {
            SymbolKind::Var => "variable",
            SymbolKind::Const => "constant",
            SymbolKind::Func => "function",
            SymbolKind::Type => "type",
        }
    }

    /// Whether the name denotes a value rather than a type.
    pub const fn is_value(self) -> bool {
        !matches!(self, SymbolKind::Type)
    }
}

/// A binding of a name in some scope.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Symbol {
    pub name: Name,
    pub kind: SymbolKind,
    pub ty: TypeId,
    pub is_static: bool,
    pub is_inline: bool,
    /// Declared at module level.
    pub is_global: bool,
    /// Some appearance carried a value or body.
    pub defined: bool,
    /// First appearance; `None` for parameters.
    pub decl: Option<DeclId>,
    /// The defining appearance.
    pub definition: Option<DeclId>,
    /// Where the name first appeared.
    pub span: Span,
    /// Folded value of a constant.
    pub value: Option<u32>,
}

impl Symbol {
    pub fn new(name: Name, kind: SymbolKind, ty: TypeId, span: Span) -> Self {
        Symbol {
            name,
            kind,
            ty,
            is_static: false,
            is_inline: false,
            is_global: false,
            defined: true,
            decl: None,
            definition: None,
            span,
            value: None,
        }
    }

    /// Static storage: module-level or `static` local.
    pub fn has_static_storage(&self) -> bool {
        self.is_global || self.is_static
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum SymbolError {
    #[error("name is already defined in this scope")]
    Redefinition { previous: Span },
    #[error("declaration conflicts with an earlier declaration")]
    Conflicting { previous: Span },
}

impl SymbolError {
    pub fn code(self) -> ErrorCode {
        match self {
            SymbolError::Redefinition { .. } => ErrorCode::E2001,
            SymbolError::Conflicting { .. } => ErrorCode::E2006,
        }
    }

    pub fn previous(self) -> Span {
        match self {
            SymbolError::Redefinition { previous } | SymbolError::Conflicting { previous } => {
                previous
            }
        }
    }
}

/// Module-level bindings after checking, plus every symbol they refer to.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    globals: FxHashMap<Name, SymbolId>,
}

impl SymbolTable {
    #[inline]
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn global(&self, name: Name) -> Option<&Symbol> {
        self.globals.get(&name).map(|&id| self.symbol(id))
    }

    pub fn global_id(&self, name: Name) -> Option<SymbolId> {
        self.globals.get(&name).copied()
    }

    /// Module-level bindings in no particular order.
    pub fn globals(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.globals.values().map(|&id| (id, self.symbol(id)))
    }
}

#[derive(Clone, Debug)]
pub struct ScopeStack {
    symbols: Vec<Symbol>,
    frames: Vec<FxHashMap<Name, SymbolId>>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            symbols: Vec::new(),
            frames: vec![FxHashMap::default()],
        }
    }

    pub fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of open frames, the module scope included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn at_module_level(&self) -> bool {
        self.frames.len() == 1
    }

    /// Bind `symbol.name` in the innermost scope.
    ///
    /// An existing binding of the same name in the same scope absorbs the
    /// new appearance when both are variables or both are functions, their
    /// types and `static`/`inline` markers agree, and at most one of them
    /// is defining. The merged symbol keeps the first appearance's span.
    pub fn declare(&mut self, symbol: Symbol) -> Result<SymbolId, SymbolError> {
        let frame = self.frames.len() - 1;
        if let Some(&id) = self.frames[frame].get(&symbol.name) {
            let existing = &mut self.symbols[id.index()];
            let previous = existing.span;
            let mergeable = matches!(existing.kind, SymbolKind::Var | SymbolKind::Func);
            if existing.kind != symbol.kind || !mergeable {
                return Err(SymbolError::Redefinition { previous });
            }
            let types_agree =
                existing.ty == symbol.ty || existing.ty.is_error() || symbol.ty.is_error();
            if !types_agree
                || existing.is_static != symbol.is_static
                || existing.is_inline != symbol.is_inline
            {
                return Err(SymbolError::Conflicting { previous });
            }
            if existing.defined && symbol.defined {
                return Err(SymbolError::Redefinition { previous });
            }
            if symbol.defined {
                existing.defined = true;
                existing.definition = symbol.definition;
            }
            if existing.ty.is_error() {
                existing.ty = symbol.ty;
            }
            return Ok(id);
        }

        let id = SymbolId::new(u32::try_from(self.symbols.len()).unwrap_or(u32::MAX));
        self.frames[frame].insert(symbol.name, id);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// Innermost binding of `name`.
    pub fn resolve(&self, name: Name) -> Option<SymbolId> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(&name).copied())
    }

    /// Binding of `name` in the innermost scope only.
    pub fn resolve_local(&self, name: Name) -> Option<SymbolId> {
        self.frames.last().and_then(|frame| frame.get(&name).copied())
    }

    #[inline]
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    #[inline]
    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    /// Close every inner scope and keep the module-level bindings.
    pub fn into_table(mut self) -> SymbolTable {
        self.frames.truncate(1);
        let globals = self.frames.pop().unwrap_or_default();
        SymbolTable {
            symbols: self.symbols,
            globals,
        }
    }
}

#[cfg(test)]
mod tests;
