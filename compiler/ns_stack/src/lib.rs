//! Stack safety for the recursive descent parser and the checker.
//!
//! Two layers:
//! - [`ensure_sufficient_stack`] grows the native stack on demand so deep
//!   but legal nesting never overflows.
//! - [`NestingBudget`] caps syntactic nesting so adversarial input produces
//!   a diagnostic instead of unbounded memory use.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Default nesting limit for expressions, statements and types.
pub const DEFAULT_MAX_NESTING: u32 = 512;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Returned by [`NestingBudget::enter`] once the limit is hit.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct NestingExceeded {
    pub limit: u32,
}

/// Depth counter for one recursive pass.
#[derive(Clone, Debug)]
pub struct NestingBudget {
    depth: u32,
    limit: u32,
}

impl NestingBudget {
    pub fn new(limit: u32) -> Self {
        NestingBudget { depth: 0, limit }
    }

    /// Enter one nesting level. Every successful `enter` must be paired
    /// with an [`exit`](Self::exit).
    pub fn enter(&mut self) -> Result<(), NestingExceeded> {
        if self.depth >= self.limit {
            return Err(NestingExceeded { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Default for NestingBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NESTING)
    }
}
