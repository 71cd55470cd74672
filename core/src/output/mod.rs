//! Rendering of recovered universe models.

pub mod json;
pub mod qvs;
