//! Avatar loading, letter-avatar fallback and circular masking.

pub(crate) mod decode;
pub(crate) mod letters;
pub(crate) mod resolver;
