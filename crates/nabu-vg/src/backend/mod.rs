//! Boundary with the wrapped vector-graphics library.
//!
//! The library is consumed as a fixed capability: create/destroy contexts,
//! upload image and font bytes, bracket frames. Everything above this module
//! reaches it through [`VgBackend`], so the facade can run against a real
//! binding, the windowless [`HeadlessVg`], or a test double.

mod api;
mod headless;
mod options;

pub use api::VgBackend;
pub use headless::{HeadlessContext, HeadlessVg};
pub use options::{ContextOptions, ImageOptions};
