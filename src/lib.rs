pub use crate::errors::ParseError;
pub use crate::state::{Location, ParseSession, ParseState};

pub mod convert;
pub mod driver;
pub mod errors;
pub mod handler;
pub mod metadata;
pub mod recognizers;
pub mod restrictions;
pub mod state;
pub mod value;
