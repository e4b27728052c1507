//! Operators.
//!
//! Arithmetic/bitwise operators and conditional operators are separate
//! enums: the former yield an operand-typed value, the latter a 16-bit truth
//! value.

/// Prefix arithmetic operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Plus,
    Neg,
    BitNot,
}

/// Prefix conditional operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryCondOp {
    Not,
}

/// Binary arithmetic, shift and bitwise operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// `/`
    UDiv,
    /// `/$`
    SDiv,
    /// `%`
    UMod,
    /// `%$`
    SMod,
    Shl,
    /// `>>`, logical
    Shr,
    /// `>>$`, arithmetic
    Sar,
    BitAnd,
    BitXor,
    BitOr,
}

/// Binary conditional operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CondOp {
    And,
    Or,
    Eq,
    NotEq,
    ULt,
    ULtEq,
    UGt,
    UGtEq,
    SLt,
    SLtEq,
    SGt,
    SGtEq,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::BitNot => "~",
        }
    }
}

impl BinaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::UDiv => "/",
            BinaryOp::SDiv => "/$",
            BinaryOp::UMod => "%",
            BinaryOp::SMod => "%$",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Sar => ">>$",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
        }
    }

    /// Operators legal when an operand is a pointer or array.
    pub const fn allows_pointers(self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Sub)
    }
}

impl CondOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            CondOp::And => "&&",
            CondOp::Or => "||",
            CondOp::Eq => "==",
            CondOp::NotEq => "!=",
            CondOp::ULt => "<",
            CondOp::ULtEq => "<=",
            CondOp::UGt => ">",
            CondOp::UGtEq => ">=",
            CondOp::SLt => "<$",
            CondOp::SLtEq => "<=$",
            CondOp::SGt => ">$",
            CondOp::SGtEq => ">=$",
        }
    }

    pub const fn is_logical(self) -> bool {
        matches!(self, CondOp::And | CondOp::Or)
    }

    /// Operators legal when an operand is a pointer or array.
    pub const fn allows_pointers(self) -> bool {
        matches!(self, CondOp::And | CondOp::Or | CondOp::Eq | CondOp::NotEq)
    }
}
