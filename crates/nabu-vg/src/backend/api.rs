use super::{ContextOptions, ImageOptions};

/// Raw capability surface of the wrapped vector-graphics library.
///
/// Resource handles are small non-negative integers scoped to one context; a
/// negative return value signals failure. The facade layer translates
/// sentinels into typed errors and never hands raw values to callers.
pub trait VgBackend {
    /// Owned native context. Move-only; handed back to
    /// [`destroy_context`](Self::destroy_context) exactly once.
    type Context;

    /// Creates a native context, or `None` when the library cannot allocate
    /// (no graphics device, exhausted native resources).
    fn create_context(&mut self, options: &ContextOptions) -> Option<Self::Context>;

    /// Destroys a context and every resource the library owns for it.
    fn destroy_context(&mut self, ctx: Self::Context);

    /// Decodes and uploads image bytes, returning the image handle.
    ///
    /// The library copies decoded pixels; `bytes` is not referenced after the
    /// call returns.
    fn create_image(
        &mut self,
        ctx: &mut Self::Context,
        bytes: &[u8],
        options: &ImageOptions,
    ) -> i32;

    /// Releases a native image resource.
    fn delete_image(&mut self, ctx: &mut Self::Context, handle: i32);

    /// Registers font bytes under `name`, returning the font handle.
    ///
    /// The library may reference `bytes` for the font's whole lifetime. The
    /// caller must keep the allocation alive, at a stable address, until the
    /// matching [`delete_font`](Self::delete_font).
    fn create_font(&mut self, ctx: &mut Self::Context, name: &str, bytes: &[u8]) -> i32;

    /// Removes a font from the library.
    fn delete_font(&mut self, ctx: &mut Self::Context, handle: i32);

    /// Opens a frame bracket. `width`/`height` are the viewport size in
    /// logical units; `device_pixel_ratio` maps logical to physical pixels.
    fn begin_frame(
        &mut self,
        ctx: &mut Self::Context,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
    );

    /// Closes the current frame bracket, flushing accumulated draw commands.
    fn end_frame(&mut self, ctx: &mut Self::Context);
}
