use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the canvas facade.
///
/// Every variant is a synchronous return-path failure; nothing is retried or
/// deferred internally. `ContextCreation` is usually fatal for the caller's
/// rendering subsystem; the rest are recoverable at the call site (skip the
/// asset, log, continue).
#[derive(Debug, Error)]
pub enum Error {
    /// The wrapped library could not allocate a native context.
    #[error("failed to create rendering context")]
    ContextCreation,

    /// Image or font bytes the wrapped library could not decode.
    #[error("{what} data could not be decoded")]
    Decode { what: &'static str },

    /// Operation on a context/image/font that is not live.
    #[error("{what} handle is not live")]
    InvalidHandle { what: &'static str },

    /// A live font in the same context already uses this name.
    #[error("font name {name:?} is already registered in this context")]
    DuplicateFontName { name: String },

    /// Begin/end frame calls out of order on a context.
    #[error("frame bracket out of order: {0}")]
    FrameMismatch(&'static str),
}
