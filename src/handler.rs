//! Pluggable abort-vs-continue policy for recoverable parse failures.
//!
//! The binding operations in [`crate::state`] stay policy-agnostic: every
//! recoverable failure is offered to the handler, and the handler's return
//! value is the only thing that decides whether the parse aborts. Fatal
//! errors never reach a handler (see [`crate::errors`]).

use crate::errors::ParseError;

pub trait ErrorHandler {
    /// Receives one recoverable failure. `Err` re-raises it and aborts the
    /// parse at the point of failure; `Ok` records it (or drops it) and lets
    /// parsing continue.
    fn handle(&mut self, error: ParseError) -> Result<(), ParseError>;

    /// Drains any diagnostics the policy accumulated during the parse.
    fn drain(&mut self) -> Vec<ParseError> {
        Vec::new()
    }
}

/// Re-raises every failure immediately, aborting the whole parse.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailFast;

impl ErrorHandler for FailFast {
    fn handle(&mut self, error: ParseError) -> Result<(), ParseError> {
        Err(error)
    }
}

/// Records every failure and keeps going, producing a best-effort result
/// with the aggregate diagnostics list attached.
#[derive(Debug, Default)]
pub struct CollectAll {
    errors: Vec<ParseError>,
}

impl CollectAll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}

impl ErrorHandler for CollectAll {
    fn handle(&mut self, error: ParseError) -> Result<(), ParseError> {
        self.errors.push(error);
        Ok(())
    }

    fn drain(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }
}
