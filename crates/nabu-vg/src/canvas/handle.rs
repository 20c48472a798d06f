/// Identifies a live rendering context owned by a
/// [`VgFacade`](super::VgFacade).
///
/// Ids are never reused; an id kept past `delete_context` stays invalid
/// forever instead of aliasing a newer context.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ContextId(pub(crate) u32);

/// Identifies an image uploaded into one context.
///
/// Only meaningful together with the [`ContextId`] it was created under.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ImageId(pub(crate) i32);

/// Identifies a font registered in one context.
///
/// Only meaningful together with the [`ContextId`] it was created under.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) i32);

impl ImageId {
    /// Raw handle value inside the wrapped library.
    #[inline]
    pub fn raw(self) -> i32 {
        self.0
    }
}

impl FontId {
    /// Raw handle value inside the wrapped library.
    #[inline]
    pub fn raw(self) -> i32 {
        self.0
    }
}
