use std::sync::Arc;

use crate::errors::ParseError;
use crate::metadata::OptionMeta;
use crate::recognizers::{find_option, OptionRecognizer, TokenStream};
use crate::state::{Location, ParseSession, ParseState};

/// Assignment form: `--name=value` in a single token.
///
/// Only arity-1 options can carry an inline value; a matched option with any
/// other arity is unsupported syntax, which is fatal because no alternative
/// parse of the token exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct LongAssignRecognizer;

impl OptionRecognizer for LongAssignRecognizer {
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
        let Some(body) = token.strip_prefix("--") else {
            return Ok(None);
        };
        let Some((name_part, raw)) = body.split_once('=') else {
            return Ok(None);
        };
        let name = format!("--{}", name_part);
        let Some(option) = find_option(allowed, &name) else {
            return Ok(None);
        };
        if option.arity != 1 {
            return Err(ParseError::UnsupportedSyntax {
                option: option.title.clone(),
                arity: option.arity,
                syntax: "assignment",
            });
        }
        let option = Arc::clone(option);

        tokens.next();
        let next = state
            .push_context(Location::Option)
            .with_option(Arc::clone(&option))
            .with_option_value(&option, raw, session)?
            .pop_context()?;
        Ok(Some(next))
    }
}
