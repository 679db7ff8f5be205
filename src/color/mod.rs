//! Background contrast classification and deterministic identity colors.

pub(crate) mod contrast;
pub(crate) mod palette;
