//! Rich-text markup: emission from resolved spans and parsing back into styled runs.

pub(crate) mod builder;
pub(crate) mod parse;
