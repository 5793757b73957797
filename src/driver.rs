//! The driver loop: scope resolution and token classification.
//!
//! The driver walks GLOBAL options, an optional GROUP name, a COMMAND name,
//! then command options and arguments until the tokens run out. At each step
//! it computes the legal option set for the active scope (command options are
//! offered together with still-applicable group and global options) and tries
//! each configured recognizer in priority order. When every recognizer
//! declines, classification falls through in precedence order: group/command
//! name match (only before a command has been selected), then positional
//! slot, then vararg, then unparsed input.

use std::fmt;
use std::sync::Arc;

use crate::convert::DefaultTypeConverter;
use crate::errors::ParseError;
use crate::handler::{CollectAll, ErrorHandler};
use crate::metadata::{GlobalMeta, OptionMeta};
use crate::recognizers::{
    LongAssignRecognizer, OptionRecognizer, ShortClusterRecognizer, StandardOptionRecognizer,
    TokenStream,
};
use crate::state::{Location, ParseSession, ParseState};

/// The literal that, when enabled, terminates option recognition: every
/// later token is treated as a positional/vararg value regardless of leading
/// dashes.
pub const SEPARATOR: &str = "--";

/// Explicit parser configuration threaded through every parse: the ordered
/// recognizer strategies and whether the `--` separator is honoured.
#[derive(Debug)]
pub struct ParserConfig {
    pub recognizers: Vec<Box<dyn OptionRecognizer>>,
    pub allow_separator: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            recognizers: vec![
                Box::new(StandardOptionRecognizer),
                Box::new(LongAssignRecognizer),
                Box::new(ShortClusterRecognizer),
            ],
            allow_separator: true,
        }
    }
}

/// Extension point run on the final state once all tokens are consumed, for
/// checks that only make sense then (required options, mutually exclusive
/// sets, and so on). Failures are routed like any recoverable failure.
pub trait CompletionCheck: fmt::Debug {
    fn check(&self, state: &ParseState, session: &mut ParseSession<'_>) -> Result<(), ParseError>;
}

/// Stock completion check: every option and positional slot marked required
/// in the scopes that ended up active must have been bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequiredCheck;

impl CompletionCheck for RequiredCheck {
    fn check(&self, state: &ParseState, session: &mut ParseSession<'_>) -> Result<(), ParseError> {
        for option in legal_options(state) {
            let bound = state
                .parsed_options()
                .iter()
                .any(|(parsed, _)| Arc::ptr_eq(parsed, &option));
            if option.required && !bound {
                session.route(ParseError::RestrictionViolated {
                    message: format!("required option '{}' was not provided", option.title),
                })?;
            }
        }
        if let Some(command) = state.command() {
            for slot in &command.positionals {
                let bound = state
                    .parsed_positionals()
                    .iter()
                    .any(|(parsed, _)| Arc::ptr_eq(parsed, slot));
                if slot.required && !bound {
                    session.route(ParseError::RestrictionViolated {
                        message: format!(
                            "required positional argument {} ('{}') was not provided",
                            slot.position, slot.title
                        ),
                    })?;
                }
            }
        }
        Ok(())
    }
}

/// The legal option set for the state's active scope, closest scope first.
fn legal_options(state: &ParseState) -> Vec<Arc<OptionMeta>> {
    let mut options = Vec::new();
    if let Some(command) = state.command() {
        options.extend(command.options.iter().cloned());
    }
    if let Some(group) = state.group() {
        options.extend(group.options.iter().cloned());
    }
    if let Some(global) = state.global() {
        options.extend(global.options.iter().cloned());
    }
    options
}

/// Parses a token sequence against a metadata model.
#[derive(Debug)]
pub struct CliParser {
    config: ParserConfig,
    completion_checks: Vec<Box<dyn CompletionCheck>>,
}

impl Default for CliParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl CliParser {
    pub fn new(config: ParserConfig) -> Self {
        CliParser {
            config,
            completion_checks: Vec::new(),
        }
    }

    pub fn with_check(mut self, check: Box<dyn CompletionCheck>) -> Self {
        self.completion_checks.push(check);
        self
    }

    /// Runs the full driver loop. Returns the final state; under a
    /// collecting handler the aggregated diagnostics are drained from the
    /// handler afterwards, under fail-fast the first failure surfaces here
    /// as `Err` and no later token is examined.
    pub fn parse(
        &self,
        global: &Arc<GlobalMeta>,
        tokens: &[String],
        session: &mut ParseSession<'_>,
    ) -> Result<ParseState, ParseError> {
        let mut stream: TokenStream<'_> = tokens.iter().peekable();
        let mut state = ParseState::new()
            .with_global(Arc::clone(global))
            .push_context(Location::Global);
        let mut options_closed = false;

        while let Some(token) = stream.peek().copied() {
            if !options_closed {
                let allowed = legal_options(&state);
                if let Some(next) =
                    self.try_recognizers(&mut stream, &state, &allowed, session)?
                {
                    state = next;
                    continue;
                }
                if self.config.allow_separator && token.as_str() == SEPARATOR {
                    stream.next();
                    options_closed = true;
                    continue;
                }
                if state.command().is_none() {
                    if state.group().is_none() {
                        if let Some(group) = global.find_group(token) {
                            stream.next();
                            state = state
                                .with_group(Arc::clone(group))
                                .push_context(Location::Group);
                            continue;
                        }
                    }
                    let command = match state.group() {
                        Some(group) => group.find_command(token),
                        None => global.find_command(token),
                    };
                    if let Some(command) = command {
                        stream.next();
                        state = state
                            .with_command(Arc::clone(command))
                            .push_context(Location::Command);
                        continue;
                    }
                }
            }

            stream.next();
            let command = state.command().cloned();
            state = match command {
                Some(command) => state
                    .push_context(Location::Argument)
                    .with_argument(
                        &command.positionals,
                        command.varargs.as_ref(),
                        token,
                        session,
                    )?
                    .pop_context()?,
                None => state.with_unparsed_input(token.as_str()),
            };
        }

        for check in &self.completion_checks {
            check.check(&state, session)?;
        }
        Ok(state)
    }

    /// Convenience wrapper: default converter, collect-and-continue policy,
    /// returning the final state plus the aggregated diagnostics.
    pub fn parse_collecting(
        &self,
        global: &Arc<GlobalMeta>,
        tokens: &[String],
    ) -> Result<(ParseState, Vec<ParseError>), ParseError> {
        let converter = DefaultTypeConverter;
        let mut handler = CollectAll::new();
        let mut session = ParseSession::new(&converter, &mut handler);
        let state = self.parse(global, tokens, &mut session)?;
        Ok((state, handler.drain()))
    }

    fn try_recognizers(
        &self,
        stream: &mut TokenStream<'_>,
        state: &ParseState,
        allowed: &[Arc<OptionMeta>],
        session: &mut ParseSession<'_>,
    ) -> Result<Option<ParseState>, ParseError> {
        for recognizer in &self.config.recognizers {
            if let Some(next) = recognizer.recognize(stream, state, allowed, session)? {
                return Ok(Some(next));
            }
        }
        Ok(None)
    }
}
