//! Option recognition strategies.
//!
//! A recognizer is a stateless strategy: it peeks at the remaining tokens,
//! consults the legal option set for the active scope, and either produces a
//! new [`ParseState`] after consuming at least one token or reports "not
//! applicable" so the driver can try the next strategy. Recognizers must peek
//! before consuming definitively; nothing un-consumes a token, and a
//! discarded tentative state costs nothing because states are immutable.

pub mod long_assign;
pub mod short_cluster;
pub mod standard;

use std::fmt;
use std::iter::Peekable;
use std::slice::Iter;
use std::sync::Arc;

use crate::errors::ParseError;
use crate::metadata::OptionMeta;
use crate::state::{ParseSession, ParseState};

pub use long_assign::LongAssignRecognizer;
pub use short_cluster::ShortClusterRecognizer;
pub use standard::StandardOptionRecognizer;

/// The remaining token view: lookahead without consumption via `peek`.
pub type TokenStream<'a> = Peekable<Iter<'a, String>>;

pub trait OptionRecognizer: fmt::Debug {
    /// `Ok(Some(state))` after consuming one or more tokens, `Ok(None)` when
    /// the strategy does not apply, `Err` only for fatal failures (a matched
    /// option whose arity the syntactic form cannot express).
    fn recognize(
        &self,
        tokens: &mut TokenStream<'_>,
        state: &ParseState,
        allowed: &[Arc<OptionMeta>],
        session: &mut ParseSession<'_>,
    ) -> Result<Option<ParseState>, ParseError>;
}

/// Resolves a name (leading dashes included) against the legal option set.
pub fn find_option<'a>(allowed: &'a [Arc<OptionMeta>], name: &str) -> Option<&'a Arc<OptionMeta>> {
    allowed.iter().find(|option| option.answers_to(name))
}
