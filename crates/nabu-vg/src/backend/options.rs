/// Context creation parameters.
///
/// Keep this structure stable and minimal. Add a flag only when a concrete
/// backend exposes the capability.
#[derive(Debug, Clone)]
pub struct ContextOptions {
    /// Enable geometry-based anti-aliasing.
    ///
    /// Leave off when the render target is already multisampled.
    pub antialias: bool,

    /// Use the stencil buffer when stroking overlapping, self-intersecting
    /// paths.
    pub stencil_strokes: bool,

    /// Enable the library's extra validation checks.
    pub debug: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            antialias: true,
            stencil_strokes: true,
            debug: false,
        }
    }
}

/// Image upload parameters.
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    /// Generate mipmaps during upload.
    pub generate_mipmaps: bool,

    /// Repeat on X instead of clamping.
    pub repeat_x: bool,

    /// Repeat on Y instead of clamping.
    pub repeat_y: bool,

    /// Flip the image vertically during upload.
    pub flip_y: bool,

    /// Treat the pixel data as premultiplied alpha.
    pub premultiplied: bool,

    /// Sample with nearest-neighbor filtering instead of linear.
    pub nearest: bool,
}
