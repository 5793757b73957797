//! Halyard error taxonomy.
//!
//! Every failure the engine can produce is a [`ParseError`]. Variants fall in
//! two categories with different propagation rules:
//!
//! - **Recoverable** failures (bad user input: conversion failures,
//!   restriction violations, a missing option value) are caught at the point
//!   of occurrence and routed to the configured
//!   [`crate::handler::ErrorHandler`], which alone decides abort-vs-continue.
//! - **Fatal** failures (restriction misconfiguration, unsupported syntax,
//!   structural defects such as popping an empty location stack) signal a
//!   defect in the command definition or the driver and bypass the handler
//!   entirely.
//!
//! [`ParseError::is_fatal`] is the single routing predicate; binding code
//! must consult it before offering a failure to the handler.

use miette::Diagnostic;
use thiserror::Error;

use crate::restrictions::range::RangeBounds;
use crate::value::{Value, ValueType};

#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    /// A raw token could not be converted to the declared value type.
    #[error("value '{raw}' for {target} is not a valid {expected}")]
    #[diagnostic(code(halyard::parse::conversion_failed))]
    ConversionFailed {
        target: String,
        raw: String,
        expected: ValueType,
    },

    /// An arity-consuming option reached the end of input before its value.
    #[error("{target} requires a value but the input ended")]
    #[diagnostic(code(halyard::parse::option_missing_value))]
    OptionMissingValue { target: String },

    /// A value failed a configured restriction.
    #[error("{message}")]
    #[diagnostic(code(halyard::restriction::violated))]
    RestrictionViolated { message: String },

    /// Range-specific violation, carrying the offending value and the bound
    /// configuration for diagnostics.
    #[error("{target} was given value '{value}' which is outside the allowed range")]
    #[diagnostic(
        code(halyard::restriction::out_of_range),
        help("the allowed range is {bounds}")
    )]
    OutOfRange {
        target: String,
        value: Value,
        bounds: RangeBounds,
    },

    /// A restriction was built with an invalid configuration or applied to an
    /// incompatible value type. Fatal: this is a defect in the static command
    /// definition, not bad user input.
    #[error("invalid restriction configuration: {message}")]
    #[diagnostic(code(halyard::restriction::invalid))]
    InvalidRestriction { message: String },

    /// A recognizer matched an option whose arity cannot be expressed in the
    /// matched syntactic form. Fatal: no alternative parse of the token
    /// exists.
    #[error("option '{option}' with arity {arity} cannot be used in {syntax} form")]
    #[diagnostic(code(halyard::parse::unsupported_syntax))]
    UnsupportedSyntax {
        option: String,
        arity: usize,
        syntax: &'static str,
    },

    /// The driver popped a location marker off an empty stack. Fatal
    /// structural defect.
    #[error("attempted to pop an empty location stack")]
    #[diagnostic(
        code(halyard::parse::empty_location_stack),
        help("this is an engine defect; push and pop calls must be balanced")
    )]
    EmptyLocationStack,
}

impl ParseError {
    /// Returns true for failures that must never be offered to the error
    /// handler: they abort the parse regardless of policy.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParseError::InvalidRestriction { .. }
                | ParseError::UnsupportedSyntax { .. }
                | ParseError::EmptyLocationStack
        )
    }
}
