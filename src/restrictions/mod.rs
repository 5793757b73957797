//! The restriction framework: validation rules attached to options,
//! positional slots, and vararg collections.
//!
//! A restriction is pure and read-only with respect to [`ParseState`]; it may
//! inspect the state for diagnostics but never mutates it. Dispatch is by
//! [`Target`] kind rather than by separate per-kind methods, so a rule
//! implements validation once and describes its binding site through the
//! tagged reference it receives.
//!
//! Failure contract: a *violation* (the value fails the rule) is recoverable
//! and gets routed through the error handler by the binding operation; a
//! *misconfiguration* (the rule itself is invalid, or applied to an
//! incompatible value type) is fatal and bypasses the handler.

pub mod ports;
pub mod range;

use std::fmt;

use crate::errors::ParseError;
use crate::metadata::{OptionMeta, PositionalMeta, VarargMeta};
use crate::state::ParseState;
use crate::value::Value;

/// The binding site a restriction is currently validating.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Option(&'a OptionMeta),
    Positional(&'a PositionalMeta),
    Varargs(&'a VarargMeta),
}

impl<'a> Target<'a> {
    /// Human-readable description used in violation messages.
    pub fn describe(&self) -> String {
        match self {
            Target::Option(option) => format!("option '{}'", option.title),
            Target::Positional(slot) => {
                format!("positional argument {} ('{}')", slot.position, slot.title)
            }
            Target::Varargs(varargs) => format!("argument '{}'", varargs.title),
        }
    }

    pub fn title(&self) -> &'a str {
        match self {
            Target::Option(option) => &option.title,
            Target::Positional(slot) => &slot.title,
            Target::Varargs(varargs) => &varargs.title,
        }
    }

    pub fn value_type(&self) -> crate::value::ValueType {
        match self {
            Target::Option(option) => option.value_type,
            Target::Positional(slot) => slot.value_type,
            Target::Varargs(varargs) => varargs.value_type,
        }
    }

    pub fn restrictions(&self) -> &'a [std::sync::Arc<dyn Restriction>] {
        match self {
            Target::Option(option) => &option.restrictions,
            Target::Positional(slot) => &slot.restrictions,
            Target::Varargs(varargs) => &varargs.restrictions,
        }
    }
}

/// A validation rule. Implement whichever hooks the rule needs; both default
/// to accepting everything, so a post-conversion-only rule leaves
/// `pre_validate` alone.
pub trait Restriction: fmt::Debug + Send + Sync {
    /// Pre-conversion check against the raw token.
    fn pre_validate(
        &self,
        _state: &ParseState,
        _target: Target<'_>,
        _raw: &str,
    ) -> Result<(), ParseError> {
        Ok(())
    }

    /// Post-conversion check against the typed value.
    fn post_validate(
        &self,
        _state: &ParseState,
        _target: Target<'_>,
        _value: &Value,
    ) -> Result<(), ParseError> {
        Ok(())
    }
}
