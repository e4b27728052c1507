//! Diagnostics for the New Solar front end.
//!
//! Every phase reports through [`Diagnostic`]: an [`ErrorCode`] for
//! searchability, a message, labeled spans and notes. Each code maps onto
//! one tag of the error taxonomy ([`ErrorKind`]) and through it onto the
//! phase that raised it ([`ErrorFamily`]).

mod diagnostic;
mod error_code;
pub mod queue;
pub mod span_utils;

pub use diagnostic::{
    incompatible_cast, invalid_operands, type_mismatch, unexpected_token, unknown_name,
    Diagnostic, Label, Severity,
};
pub use error_code::{ErrorCode, ErrorFamily, ErrorKind};
pub use queue::DiagnosticQueue;
pub use span_utils::{LineCol, LineOffsetTable};
