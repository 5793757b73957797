//! The immutable parse state and the session that threads mutable
//! collaborators (type converter, error handler) through a parse.
//!
//! Every transition on [`ParseState`] returns a fresh snapshot; the receiver
//! is never touched. Recognizers rely on this to attempt a tentative
//! transition, discard the result, and retry with another strategy without
//! any rollback step. The append-only lists are persistent
//! [`im::Vector`]s, so a snapshot is a handful of pointer copies.

use std::fmt;
use std::sync::Arc;

use im::Vector;

use crate::convert::TypeConverter;
use crate::errors::ParseError;
use crate::handler::ErrorHandler;
use crate::metadata::{CommandMeta, GlobalMeta, GroupMeta, OptionMeta, PositionalMeta, VarargMeta};
use crate::restrictions::Target;
use crate::value::Value;

/// A point in the global → group → command → option/argument nesting. The
/// top of the state's location stack is the current location, used for
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Global,
    Group,
    Command,
    Option,
    Argument,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Global => "global",
            Location::Group => "group",
            Location::Command => "command",
            Location::Option => "option",
            Location::Argument => "argument",
        };
        write!(f, "{}", name)
    }
}

/// Mutable companion to the immutable state: the converter and error handler
/// a parse was configured with, passed explicitly through every binding
/// operation instead of living in ambient configuration.
pub struct ParseSession<'a> {
    pub converter: &'a dyn TypeConverter,
    pub handler: &'a mut dyn ErrorHandler,
}

impl<'a> ParseSession<'a> {
    pub fn new(converter: &'a dyn TypeConverter, handler: &'a mut dyn ErrorHandler) -> Self {
        ParseSession { converter, handler }
    }

    /// Routes one failure. Fatal errors abort immediately without consulting
    /// the handler; recoverable ones go to the handler, which decides whether
    /// to re-raise.
    pub fn route(&mut self, error: ParseError) -> Result<(), ParseError> {
        if error.is_fatal() {
            return Err(error);
        }
        self.handler.handle(error)
    }
}

/// Immutable snapshot of parsing progress.
#[derive(Debug, Clone, Default)]
pub struct ParseState {
    global: Option<Arc<GlobalMeta>>,
    group: Option<Arc<GroupMeta>>,
    command: Option<Arc<CommandMeta>>,
    locations: Vector<Location>,
    parsed_options: Vector<(Arc<OptionMeta>, Value)>,
    parsed_positionals: Vector<(Arc<PositionalMeta>, Value)>,
    parsed_varargs: Vector<Value>,
    current_option: Option<Arc<OptionMeta>>,
    unparsed: Vector<String>,
}

impl ParseState {
    /// The empty state a parse starts from.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(&self) -> Option<&Arc<GlobalMeta>> {
        self.global.as_ref()
    }

    pub fn group(&self) -> Option<&Arc<GroupMeta>> {
        self.group.as_ref()
    }

    pub fn command(&self) -> Option<&Arc<CommandMeta>> {
        self.command.as_ref()
    }

    pub fn current_option(&self) -> Option<&Arc<OptionMeta>> {
        self.current_option.as_ref()
    }

    /// The current location, i.e. the top of the location stack.
    pub fn location(&self) -> Option<Location> {
        self.locations.back().copied()
    }

    pub fn locations(&self) -> &Vector<Location> {
        &self.locations
    }

    /// Ordered (option, value) pairs in binding order; repeated options
    /// appear once per binding.
    pub fn parsed_options(&self) -> &Vector<(Arc<OptionMeta>, Value)> {
        &self.parsed_options
    }

    pub fn parsed_positionals(&self) -> &Vector<(Arc<PositionalMeta>, Value)> {
        &self.parsed_positionals
    }

    pub fn parsed_varargs(&self) -> &Vector<Value> {
        &self.parsed_varargs
    }

    /// Raw tokens that failed conversion/validation or matched nothing.
    pub fn unparsed_input(&self) -> &Vector<String> {
        &self.unparsed
    }

    pub fn push_context(&self, location: Location) -> Self {
        let mut next = self.clone();
        next.locations.push_back(location);
        next
    }

    /// Pops the current location. Popping an empty stack is a structural
    /// defect in the driver, never a user input problem, and is fatal.
    pub fn pop_context(&self) -> Result<Self, ParseError> {
        let mut next = self.clone();
        if next.locations.pop_back().is_none() {
            return Err(ParseError::EmptyLocationStack);
        }
        Ok(next)
    }

    pub fn with_global(&self, global: Arc<GlobalMeta>) -> Self {
        let mut next = self.clone();
        next.global = Some(global);
        next
    }

    pub fn with_group(&self, group: Arc<GroupMeta>) -> Self {
        let mut next = self.clone();
        next.group = Some(group);
        next
    }

    pub fn with_command(&self, command: Arc<CommandMeta>) -> Self {
        let mut next = self.clone();
        next.command = Some(command);
        next
    }

    /// Marks the option currently awaiting a value.
    pub fn with_option(&self, option: Arc<OptionMeta>) -> Self {
        let mut next = self.clone();
        next.current_option = Some(option);
        next
    }

    /// Unconditionally records a token that matched no known shape.
    pub fn with_unparsed_input(&self, token: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.unparsed.push_back(token.into());
        next
    }

    /// Binds `raw` to `option`: pre-validate, convert, post-validate, append.
    ///
    /// Each restriction failure is routed to the handler individually and all
    /// restrictions run even after one fails, so a single bad value can
    /// surface several diagnostics. If anything failed but the handler
    /// tolerated it, the token moves to unparsed input and no pair is
    /// appended; the rest of the parse proceeds.
    pub fn with_option_value(
        &self,
        option: &Arc<OptionMeta>,
        raw: &str,
        session: &mut ParseSession<'_>,
    ) -> Result<Self, ParseError> {
        match self.validate_and_convert(Target::Option(option), raw, session)? {
            Some(value) => {
                let mut next = self.clone();
                next.parsed_options.push_back((Arc::clone(option), value));
                Ok(next)
            }
            None => Ok(self.with_unparsed_input(raw)),
        }
    }

    /// Binds `raw` as an argument: the next unfilled declared positional slot
    /// if any remain, otherwise the vararg collection if one is declared,
    /// otherwise unparsed input (an extra token, recorded without raising).
    pub fn with_argument(
        &self,
        positionals: &[Arc<PositionalMeta>],
        varargs: Option<&Arc<VarargMeta>>,
        raw: &str,
        session: &mut ParseSession<'_>,
    ) -> Result<Self, ParseError> {
        let slot_index = self.parsed_positionals.len();
        if slot_index < positionals.len() {
            let slot = &positionals[slot_index];
            match self.validate_and_convert(Target::Positional(slot), raw, session)? {
                Some(value) => {
                    let mut next = self.clone();
                    next.parsed_positionals.push_back((Arc::clone(slot), value));
                    Ok(next)
                }
                None => Ok(self.with_unparsed_input(raw)),
            }
        } else if let Some(varargs) = varargs {
            match self.validate_and_convert(Target::Varargs(varargs), raw, session)? {
                Some(value) => {
                    let mut next = self.clone();
                    next.parsed_varargs.push_back(value);
                    Ok(next)
                }
                None => Ok(self.with_unparsed_input(raw)),
            }
        } else {
            Ok(self.with_unparsed_input(raw))
        }
    }

    /// Shared binding pass. `Ok(None)` means a failure occurred but the
    /// handler tolerated it: the caller drops the token to unparsed input.
    fn validate_and_convert(
        &self,
        target: Target<'_>,
        raw: &str,
        session: &mut ParseSession<'_>,
    ) -> Result<Option<Value>, ParseError> {
        let mut ok = true;
        for restriction in target.restrictions() {
            if let Err(error) = restriction.pre_validate(self, target, raw) {
                ok = false;
                session.route(error)?;
            }
        }
        let value = match session
            .converter
            .convert(target.title(), target.value_type(), raw)
        {
            Ok(value) => value,
            Err(error) => {
                session.route(error)?;
                return Ok(None);
            }
        };
        for restriction in target.restrictions() {
            if let Err(error) = restriction.post_validate(self, target, &value) {
                ok = false;
                session.route(error)?;
            }
        }
        Ok(if ok { Some(value) } else { None })
    }
}
