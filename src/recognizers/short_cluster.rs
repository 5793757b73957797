use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ParseError;
use crate::metadata::OptionMeta;
use crate::recognizers::{find_option, OptionRecognizer, TokenStream};
use crate::state::{Location, ParseSession, ParseState};

static SHORT_CLUSTER: Lazy<Regex> =
    Lazy::new(|| Regex::new("^-[^-]").expect("short cluster pattern"));

/// Squashed short-flag form: `-abc` resolves each character against the
/// single-character option names in the legal set.
///
/// Arity-0 options are satisfied with `true` and the loop continues over the
/// remaining characters. An arity-1 option ends the cluster: the rest of the
/// token, if non-empty, is its value, otherwise the next whole token is.
/// Arity >= 2 cannot be expressed in this form and is fatal. An unresolvable
/// character makes the whole recognizer not applicable; at that point nothing
/// has been consumed, because consumption only happens once a binding is
/// certain.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortClusterRecognizer;

impl OptionRecognizer for ShortClusterRecognizer {
    fn recognize(
        &self,
        tokens: &mut TokenStream<'_>,
        state: &ParseState,
        allowed: &[Arc<OptionMeta>],
        session: &mut ParseSession<'_>,
    ) -> Result<Option<ParseState>, ParseError> {
        let Some(token) = tokens.peek().copied() else {
            return Ok(None);
        };
        if !SHORT_CLUSTER.is_match(token) {
            return Ok(None);
        }

        let mut remaining = &token[1..];
        let mut next = state.clone();
        while let Some(ch) = remaining.chars().next() {
            let Some(option) = find_option(allowed, &format!("-{}", ch)) else {
                // Tentative work so far is simply discarded.
                return Ok(None);
            };
            let option = Arc::clone(option);
            remaining = &remaining[ch.len_utf8()..];
            let bound = next
                .push_context(Location::Option)
                .with_option(Arc::clone(&option));

            match option.arity {
                0 => {
                    next = bound.with_option_value(&option, "true", session)?.pop_context()?;
                }
                1 => {
                    // Consume the cluster token so the value token is visible.
                    tokens.next();
                    if !remaining.is_empty() {
                        next = bound
                            .with_option_value(&option, remaining, session)?
                            .pop_context()?;
                    } else if let Some(raw) = tokens.next() {
                        next = bound.with_option_value(&option, raw, session)?.pop_context()?;
                    } else {
                        session.route(ParseError::OptionMissingValue {
                            target: format!("option '{}'", option.title),
                        })?;
                        next = bound.pop_context()?;
                    }
                    // An arity-1 option always terminates the cluster.
                    return Ok(Some(next));
                }
                arity => {
                    return Err(ParseError::UnsupportedSyntax {
                        option: option.title.clone(),
                        arity,
                        syntax: "squashed short option",
                    });
                }
            }
        }

        tokens.next();
        Ok(Some(next))
    }
}
