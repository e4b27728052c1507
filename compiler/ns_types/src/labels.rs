//! Jump target resolution.
//!
//! Labels live in their own namespace and follow statement nesting: every
//! `if` and loop pushes an entry whether or not it is labeled, and the
//! entry is popped when the statement ends. A fresh stack is used for
//! each function body, so labels never cross function boundaries.

use ns_diagnostic::ErrorCode;
use ns_ir::ast::Label;
use ns_ir::{Name, Span, StmtId};

/// What a statement on the label stack can be the target of.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TargetKind {
    /// `while` or `for`: target of `continue` and `break`.
    Loop,
    /// `if`: target of `breakif`.
    Cond,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum JumpKind {
    Continue,
    Break,
    BreakIf,
}

impl JumpKind {
    pub const fn target(self) -> TargetKind {
        match self {
            JumpKind::Continue | JumpKind::Break => TargetKind::Loop,
            JumpKind::BreakIf => TargetKind::Cond,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            JumpKind::Continue => "continue",
            JumpKind::Break => "break",
            JumpKind::BreakIf => "breakif",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum LabelError {
    #[error("jump is not inside a statement it can leave")]
    NoTarget,
    #[error("no enclosing statement has this label")]
    Unknown,
    #[error("label names a statement of the wrong kind for this jump")]
    WrongKind { label: Span },
}

impl LabelError {
    pub fn code(self) -> ErrorCode {
        match self {
            LabelError::NoTarget => ErrorCode::E2005,
            LabelError::Unknown => ErrorCode::E2002,
            LabelError::WrongKind { .. } => ErrorCode::E2003,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Entry {
    label: Option<Label>,
    kind: TargetKind,
    stmt: StmtId,
}

#[derive(Clone, Debug, Default)]
pub struct LabelStack {
    entries: Vec<Entry>,
}

impl LabelStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stmt: StmtId, kind: TargetKind, label: Option<Label>) {
        self.entries.push(Entry { label, kind, stmt });
    }

    pub fn pop(&mut self) {
        self.entries.pop();
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// The statement a jump leaves or continues.
    ///
    /// Without a label the innermost statement of the right kind is
    /// chosen. With one, the innermost statement carrying that label is
    /// chosen and must be of the right kind.
    pub fn resolve(&self, jump: JumpKind, label: Option<Name>) -> Result<StmtId, LabelError> {
        let wanted = jump.target();
        let mut enclosing = self.entries.iter().rev();
        match label {
            None => enclosing
                .find(|e| e.kind == wanted)
                .map(|e| e.stmt)
                .ok_or(LabelError::NoTarget),
            Some(name) => {
                let entry = enclosing
                    .find(|e| e.label.is_some_and(|l| l.name == name))
                    .ok_or(LabelError::Unknown)?;
                if entry.kind == wanted {
                    Ok(entry.stmt)
                } else {
                    Err(LabelError::WrongKind {
                        label: entry.label.map_or(Span::DUMMY, |l| l.span),
                    })
                }
            }
        }
    }
}
