//! Raster primitives, card layout and compositing.
//!
//! [`layout`] is pure arithmetic over sub-bitmap sizes; [`compositor`] executes the resulting
//! plan onto a premultiplied canvas; [`pipeline`] drives a whole request through text rendering,
//! avatar resolution and composition.

pub(crate) mod bitmap;
pub(crate) mod compositor;
pub(crate) mod layout;
pub(crate) mod pipeline;
pub(crate) mod shapes;
