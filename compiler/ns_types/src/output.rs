//! Checker output handed to IR lowering.

use ns_diagnostic::Diagnostic;
use ns_ir::{DeclId, ExprId, ParsedTypeId, StmtId, StringInterner};
use rustc_hash::FxHashMap;

use crate::layout::Layout;
use crate::{SymbolId, SymbolTable, TypeId, TypePool};

/// A checked module: side tables over the AST plus the finished symbol
/// table and type pool.
///
/// The AST itself is not touched; every annotation is keyed by node id.
/// Nodes the checker never reached (for example after an error) hold
/// [`TypeId::ERROR`].
#[derive(Clone, Debug, Default)]
pub struct TypedModule {
    /// Type of each expression, indexed by `ExprId`.
    pub expr_types: Vec<TypeId>,
    /// Resolved type of each type node, indexed by `ParsedTypeId`.
    pub type_nodes: Vec<TypeId>,
    /// Final type of each declaration, indexed by `DeclId`. Array sizes
    /// inferred from initializers are filled in here.
    pub decl_types: Vec<TypeId>,
    /// Symbol each `Name` expression refers to.
    pub name_bindings: FxHashMap<ExprId, SymbolId>,
    /// Symbol each declaration introduced or merged into.
    pub decl_symbols: FxHashMap<DeclId, SymbolId>,
    /// Statement each `continue`, `break` and `breakif` leaves.
    pub jump_targets: FxHashMap<StmtId, StmtId>,
    /// Folded value of every integral constant expression.
    pub const_values: FxHashMap<ExprId, u32>,
    /// Right operands of `Binary`, comparison and compound `Assign`
    /// expressions whose type differs from the left operand's, mapped to
    /// the left operand's type. Lowered as an unsigned cast.
    pub implicit_casts: FxHashMap<ExprId, TypeId>,
    pub pool: TypePool,
    pub symbols: SymbolTable,
    /// `static` locals; they keep static storage after their scope closes.
    pub static_locals: Vec<SymbolId>,
    /// Symbol and type diagnostics, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl TypedModule {
    pub fn expr_type(&self, id: ExprId) -> TypeId {
        self.expr_types
            .get(id.index())
            .copied()
            .unwrap_or(TypeId::ERROR)
    }

    pub fn type_of_node(&self, id: ParsedTypeId) -> TypeId {
        self.type_nodes
            .get(id.index())
            .copied()
            .unwrap_or(TypeId::ERROR)
    }

    pub fn decl_type(&self, id: DeclId) -> TypeId {
        self.decl_types
            .get(id.index())
            .copied()
            .unwrap_or(TypeId::ERROR)
    }

    pub fn binding(&self, id: ExprId) -> Option<SymbolId> {
        self.name_bindings.get(&id).copied()
    }

    pub fn jump_target(&self, id: StmtId) -> Option<StmtId> {
        self.jump_targets.get(&id).copied()
    }

    pub fn const_value(&self, id: ExprId) -> Option<u32> {
        self.const_values.get(&id).copied()
    }

    /// Type the expression is converted to before use, if any.
    pub fn implicit_cast(&self, id: ExprId) -> Option<TypeId> {
        self.implicit_casts.get(&id).copied()
    }

    /// Layout of a record type.
    pub fn layout(&self, ty: TypeId) -> Option<&Layout> {
        self.pool
            .record_of(ty)
            .and_then(|id| self.pool.record(id).layout())
    }

    /// Byte size of a complete type.
    pub fn size_of(&self, ty: TypeId) -> Option<u32> {
        self.pool.size_align(ty).map(|(size, _)| size)
    }

    pub fn format_type(&self, ty: TypeId, interner: &StringInterner) -> String {
        self.pool.format_type(ty, interner)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
