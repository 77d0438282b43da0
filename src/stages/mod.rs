//! The three per-pixel stages: mask sampling, alpha shaping and color compositing.

pub(crate) mod blend;
pub(crate) mod sampler;
pub(crate) mod shaper;
pub(crate) mod spill;
