//! Arena storage for AST nodes.

use crate::ast::{Decl, DeclId, Expr, ExprId, ParsedType, ParsedTypeId, Stmt, StmtId};

fn next_id(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Owns every node of one module.
#[derive(Clone, Default, Debug)]
pub struct AstArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    types: Vec<ParsedType>,
    decls: Vec<Decl>,
}

impl AstArena {
    pub fn new() -> Self {
        AstArena::default()
    }

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(next_id(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(next_id(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    #[inline]
    pub fn alloc_type(&mut self, ty: ParsedType) -> ParsedTypeId {
        let id = ParsedTypeId::new(next_id(self.types.len()));
        self.types.push(ty);
        id
    }

    #[inline]
    pub fn alloc_decl(&mut self, decl: Decl) -> DeclId {
        let id = DeclId::new(next_id(self.decls.len()));
        self.decls.push(decl);
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn ty(&self, id: ParsedTypeId) -> &ParsedType {
        &self.types[id.index()]
    }

    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }
}
