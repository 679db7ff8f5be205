//! Message input model and formatting-entity resolution.

pub(crate) mod entities;
pub(crate) mod model;
