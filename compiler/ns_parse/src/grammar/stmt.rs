//! Statements and blocks.

use ns_ir::ast::{Label, Stmt, StmtKind};
use ns_ir::{ExprId, Span, StmtId, TokenKind};

use crate::recovery::{DECL_START, STMT_KEYWORD};
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `{ stmt* }`
    ///
    /// Errors inside the block are recovered from statement by statement;
    /// only running off the end of input propagates.
    pub(crate) fn parse_block(&mut self) -> Result<StmtId, ParseError> {
        let open = self.expect(TokenKind::LBrace)?.span;
        let mut stmts = Vec::new();
        loop {
            match self.current_kind() {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(ParseError::unterminated_block(open, self.current_span()));
                }
                _ => match self.parse_stmt() {
                    Ok(stmt) => stmts.push(stmt),
                    Err(error) if error.is_fatal() => return Err(error),
                    Err(error) => self.recover(error),
                },
            }
        }
        let span = self.span_from(open);
        Ok(self.arena.alloc_stmt(Stmt::new(StmtKind::Compound(stmts), span)))
    }

    pub(crate) fn parse_stmt(&mut self) -> Result<StmtId, ParseError> {
        self.nested(Self::parse_stmt_inner)
    }

    fn parse_stmt_inner(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Semicolon => {
                self.advance();
                StmtKind::Empty
            }
            TokenKind::LBrace => return self.parse_block(),
            kind if DECL_START.contains(kind) => StmtKind::Def(self.parse_local_decl()?),
            kind if STMT_KEYWORD.contains(kind) => return self.parse_keyword_stmt(None, start),
            TokenKind::Ident if self.peek_kind(1) == TokenKind::Colon => {
                let (name, span) = self.cursor.expect_ident()?;
                self.advance();
                let label = Label { name, span };
                if !matches!(
                    self.current_kind(),
                    TokenKind::If | TokenKind::While | TokenKind::For
                ) {
                    return Err(ParseError::unexpected(
                        &[TokenKind::If, TokenKind::While, TokenKind::For],
                        self.current_kind(),
                        self.current_span(),
                    )
                    .with_context("after a label"));
                }
                return self.parse_keyword_stmt(Some(label), start);
            }
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                StmtKind::Expr(expr)
            }
        };
        Ok(self.alloc_stmt(kind, start))
    }

    /// Statements introduced by a keyword; `label` only reaches `if` and
    /// the loops.
    fn parse_keyword_stmt(
        &mut self,
        label: Option<Label>,
        start: Span,
    ) -> Result<StmtId, ParseError> {
        let kind = match self.current_kind() {
            TokenKind::If => {
                self.advance();
                let cond = self.parse_condition()?;
                let then_branch = self.parse_stmt()?;
                let else_branch = self.parse_else()?;
                StmtKind::If {
                    cond,
                    then_branch,
                    else_branch,
                    label,
                }
            }
            TokenKind::While => {
                self.advance();
                let cond = self.parse_condition()?;
                let body = self.parse_stmt()?;
                let else_branch = self.parse_else()?;
                StmtKind::Iter {
                    init: None,
                    cond: Some(cond),
                    step: None,
                    body,
                    else_branch,
                    label,
                }
            }
            TokenKind::For => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let init = self.parse_optional_expr(TokenKind::Semicolon)?;
                self.expect(TokenKind::Semicolon)?;
                let cond = self.parse_optional_expr(TokenKind::Semicolon)?;
                self.expect(TokenKind::Semicolon)?;
                let step = self.parse_optional_expr(TokenKind::RParen)?;
                self.expect(TokenKind::RParen)?;
                let body = self.parse_stmt()?;
                let else_branch = self.parse_else()?;
                StmtKind::Iter {
                    init,
                    cond,
                    step,
                    body,
                    else_branch,
                    label,
                }
            }
            TokenKind::Continue => {
                self.advance();
                let label = self.parse_jump_label()?;
                StmtKind::Continue { label }
            }
            TokenKind::Break | TokenKind::BreakIf => {
                let is_breakif = self.advance().kind == TokenKind::BreakIf;
                let label = self.parse_jump_label()?;
                StmtKind::Break { is_breakif, label }
            }
            TokenKind::Return => {
                self.advance();
                let value = self.parse_optional_expr(TokenKind::Semicolon)?;
                self.expect(TokenKind::Semicolon)?;
                StmtKind::Return(value)
            }
            found => {
                return Err(ParseError::expected_construct(
                    "a statement",
                    found,
                    self.current_span(),
                ));
            }
        };
        Ok(self.alloc_stmt(kind, start))
    }

    /// `( expr )`
    fn parse_condition(&mut self) -> Result<ExprId, ParseError> {
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(cond)
    }

    fn parse_else(&mut self) -> Result<Option<StmtId>, ParseError> {
        if self.eat(TokenKind::Else) {
            Ok(Some(self.parse_stmt()?))
        } else {
            Ok(None)
        }
    }

    /// `[NAME] ;` after `continue`, `break` or `breakif`.
    fn parse_jump_label(&mut self) -> Result<Option<Label>, ParseError> {
        let label = if self.check(TokenKind::Ident) {
            let (name, span) = self.cursor.expect_ident()?;
            Some(Label { name, span })
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(label)
    }

    fn parse_optional_expr(&mut self, terminator: TokenKind) -> Result<Option<ExprId>, ParseError> {
        if self.check(terminator) {
            Ok(None)
        } else {
            self.parse_expr().map(Some)
        }
    }

    fn alloc_stmt(&mut self, kind: StmtKind, start: Span) -> StmtId {
        let span = self.span_from(start);
        self.arena.alloc_stmt(Stmt::new(kind, span))
    }
}
