//! Context + resource lifecycle facade.
//!
//! This module is responsible for:
//! - creating and destroying native rendering contexts
//! - uploading image/font assets and mapping the handles the wrapped library
//!   returns back to the buffers that back them
//! - enforcing the begin/end frame bracket per context

mod error;
mod facade;
mod handle;
mod registry;

pub use error::{Error, Result};
pub use facade::VgFacade;
pub use handle::{ContextId, FontId, ImageId};
