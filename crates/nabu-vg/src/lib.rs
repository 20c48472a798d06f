//! Nabu vector-graphics crate.
//!
//! This crate owns the lifecycle pieces wrapped around an embedded
//! vector-graphics library: native contexts, image/font uploads, and the
//! per-frame begin/end bracket. Drawing itself stays inside the wrapped
//! library, reached through the [`backend`] boundary.

pub mod backend;
pub mod canvas;
pub mod limits;

pub mod logging;
