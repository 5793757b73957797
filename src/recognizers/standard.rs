use std::sync::Arc;

use crate::errors::ParseError;
use crate::metadata::OptionMeta;
use crate::recognizers::{find_option, OptionRecognizer, TokenStream};
use crate::state::{Location, ParseSession, ParseState};

/// Whitespace-separated form: a token that exactly matches an option name,
/// followed by arity-many value tokens (`--name value`, `-n value`).
///
/// Arity 0 binds the flag to `true` without consuming a value token. Higher
/// arities bind one value per following token, each going through the full
/// validation pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardOptionRecognizer;

impl OptionRecognizer for StandardOptionRecognizer {
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
        let Some(option) = find_option(allowed, token) else {
            return Ok(None);
        };
        let option = Arc::clone(option);

        // The name matched, so the match is certain: commit.
        tokens.next();
        let mut next = state
            .push_context(Location::Option)
            .with_option(Arc::clone(&option));

        if option.arity == 0 {
            next = next.with_option_value(&option, "true", session)?;
        } else {
            for _ in 0..option.arity {
                match tokens.next() {
                    Some(raw) => next = next.with_option_value(&option, raw, session)?,
                    None => {
                        session.route(ParseError::OptionMissingValue {
                            target: format!("option '{}'", option.title),
                        })?;
                        break;
                    }
                }
            }
        }
        Ok(Some(next.pop_context()?))
    }
}
