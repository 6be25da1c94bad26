//! Verdict returned by an interceptor

use std::fmt;

/// Whether a log call may proceed to the real sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogPropagation {
    /// Suppress the log call
    Block,
    /// Let the log call through
    Continue,
}

impl LogPropagation {
    #[inline]
    pub fn is_continue(self) -> bool {
        self == LogPropagation::Continue
    }

    #[inline]
    pub fn is_block(self) -> bool {
        self == LogPropagation::Block
    }
}

impl fmt::Display for LogPropagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogPropagation::Block => write!(f, "BLOCK"),
            LogPropagation::Continue => write!(f, "CONTINUE"),
        }
    }
}
